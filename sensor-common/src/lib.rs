//! Shared types and platform traits for the `sensey-rs` workspace.
//!
//! The platform sensor service is abstracted by [`SensorManagerPort`]: it reports which
//! [`Sensor`]s exist and delivers [`SensorSample`]s to registered [`SensorEventListener`]s.

pub mod constants;

#[doc(hidden)]
pub mod traits;
#[doc(hidden)]
pub mod types;

// Re-export traits
#[doc(inline)]
pub use traits::{BasicArithmetic, SensorEventListener, SensorManagerPort};

// Re-export types
#[doc(inline)]
pub use types::{
    buffers, filters, Accuracy, SampleError, SamplingRate, Sensor, SensorSample, SensorType, XYZ,
};
