//! # Crate sensey-rs
//!
//! ## sensey-rs
//!
//! The `sensey-rs` crate turns raw phone sensor readings into gestures and device states.
//! Applications register a listener per detection kind and get called when the gesture
//! happens, without touching the sensor stream themselves.
//!
//! Features include:
//! - Shake detection with a configurable speed threshold [m/s^3] and time window.
//! - Flip detection (screen facing up or down) from the accelerometer z axis.
//! - Orientation detection (top, bottom, left or right side up) from accelerometer and
//!   magnetometer, smoothed with a moving average.
//! - Light detection (dark or lit environment) with a configurable lux threshold.
//! - Proximity detection (near or far) and hand wave detection from the proximity sensor.
//!
//! Detectors consume samples from any platform implementing
//! [`sensor_common::SensorManagerPort`]. The `publisher` crate ships an in-process
//! implementation, `SensorHub`, fed by a driver, a recorded trace or a test.
//!
//! **NOTE** Events are edge triggered: a state is reported once when entered, not on every
//! sample.

pub mod config;
pub mod constants;
pub mod detectors;
pub mod errors;
pub mod listeners;
pub mod registry;
pub mod services;

pub use config::{LightConfig, OrientationConfig, SenseyConfig, ShakeConfig, WaveConfig};
pub use detectors::{DetectionEvent, DetectionKind, OrientationBucket};
pub use errors::SenseyError;
pub use listeners::{
    FlipListener, LightListener, Listener, OrientationListener, ProximityListener,
    ShakeListener, WaveListener,
};
pub use services::Sensey;
