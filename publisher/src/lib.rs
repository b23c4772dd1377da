//! # Crate publisher
//!
//! ## publisher
//!
//! The `publisher` crate provides a mechanism for registering and notifying listeners
//! of new events of type `T`, grouped by topic, and [`SensorHub`], an in-process
//! sensor service built on top of it.
//!
//! Listeners are plain callbacks (`Fn(Uuid, Arc<T>)`). Every registration gets its own
//! id, which is the only handle needed to unregister it.
//!
//! ### Example
//!
//! ```
//! use std::sync::Arc;
//! use uuid::Uuid;
//! use publisher::{Publishable, Publisher};
//!
//! let publisher = Publisher::<String>::new();
//!
//! // Register a listener
//! let listener_id = publisher.register_listener(Arc::new(|_id: Uuid, data: Arc<String>| {
//!     println!("Listener received: {}", data);
//! }));
//!
//! // Notify all listeners
//! assert_eq!(publisher.notify_listeners(Arc::new("Hello, World!".to_string())), 1);
//!
//! // Unregister the listener
//! assert!(publisher.unregister_listener(listener_id));
//! assert!(publisher.is_empty());
//! ```

pub mod publisher;
pub mod publisher_manager;
pub mod sensor_hub;

pub use publisher::{Callback, Publishable, Publisher};
pub use publisher_manager::PublisherManager;
pub use sensor_hub::{HubEvent, SensorHub};
