use dashmap::DashMap;
use std::cmp::Eq;
use std::hash::Hash;
use std::sync::Arc;
use uuid::Uuid;

use super::publisher::{Callback, Publishable, Publisher};

/// This module defines the `PublisherManager` struct, which keeps one publisher per topic `S`
/// and remembers which topic every listener id belongs to, so a listener can be removed
/// with its id alone.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use uuid::Uuid;
/// use publisher::{Callback, PublisherManager};
/// use sensor_common::{SensorSample, SensorType};
///
/// let manager = PublisherManager::<SensorSample, SensorType>::new(&[]);
/// manager.add_publisher(SensorType::Light);
///
/// let listener: Callback<SensorSample> = Arc::new(|_id: Uuid, sample: Arc<SensorSample>| {
///     println!("Sample: {:?}", sample);
/// });
/// let id = manager.add_listener(listener, &SensorType::Light).unwrap();
///
/// manager.remove_listener(id).unwrap();
/// ```
pub struct PublisherManager<T, S> {
    publishers: Arc<DashMap<S, Publisher<T>>>,
    control: Arc<DashMap<Uuid, S>>,
}

impl<T, S> Clone for PublisherManager<T, S> {
    fn clone(&self) -> Self {
        Self {
            publishers: self.publishers.clone(),
            control: self.control.clone(),
        }
    }
}

impl<T, S> PublisherManager<T, S>
where
    T: Send + Sync + 'static,
    S: Send + Sync + Hash + Eq + Clone + Into<usize>,
{
    pub fn new(publisher_types: &[S]) -> Self {
        let collection = DashMap::<S, Publisher<T>>::new();
        for publisher_type in publisher_types {
            collection.insert(publisher_type.clone(), Publisher::new());
        }

        Self {
            publishers: Arc::new(collection),
            control: Arc::new(DashMap::new()),
        }
    }

    /// Adds an empty publisher for `publisher_type`. An existing publisher keeps its listeners.
    pub fn add_publisher(&self, publisher_type: S) {
        self.publishers.entry(publisher_type).or_default();
    }

    /// Removes the publisher and all its listeners. Returns the ids of the removed listeners.
    pub fn remove_publisher(&self, publisher_type: &S) -> Vec<Uuid> {
        if let Some((_, publisher)) = self.publishers.remove(publisher_type) {
            let ids = publisher.unregister_all();
            for id in ids.iter() {
                self.control.remove(id);
            }
            return ids;
        }
        vec![]
    }

    pub fn get_available_publisher_types(&self) -> Vec<S> {
        let mut publisher_types: Vec<S> = self
            .publishers
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        publisher_types.sort_by_key(|publisher_type| publisher_type.clone().into());
        publisher_types
    }

    pub fn add_listener(&self, callback: Callback<T>, publisher_type: &S) -> Result<Uuid, String> {
        if let Some(publisher) = self.publishers.get(publisher_type) {
            let id = publisher.register_listener(callback);
            self.control.insert(id, publisher_type.clone());
            return Ok(id);
        }
        Err("Publisher doesnt exist".to_string())
    }

    pub fn remove_listener(&self, id: Uuid) -> Result<(), String> {
        if let Some((_, publisher_type)) = self.control.remove(&id) {
            if let Some(publisher) = self.publishers.get(&publisher_type) {
                publisher.unregister_listener(id);
            } else {
                return Err("Publisher doesnt exist".to_string());
            }
            return Ok(());
        }
        Err("Listener Id not found".to_string())
    }

    pub fn contains_listener(&self, id: &Uuid) -> bool {
        self.control.contains_key(id)
    }

    pub fn listener_count(&self, publisher_type: &S) -> usize {
        self.publishers
            .get(publisher_type)
            .map(|publisher| publisher.len())
            .unwrap_or(0)
    }

    pub fn total_listeners(&self) -> usize {
        self.control.len()
    }

    /// Notifies the listeners of `publisher_type`. Returns how many were called.
    pub fn notify_listeners(&self, publisher_type: &S, data: Arc<T>) -> usize {
        // Clone the publisher out so no map guard is held while callbacks run.
        let publisher = self
            .publishers
            .get(publisher_type)
            .map(|publisher| publisher.clone());
        match publisher {
            Some(publisher) => publisher.notify_listeners(data),
            None => 0,
        }
    }
}
