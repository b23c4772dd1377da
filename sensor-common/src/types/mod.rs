pub mod buffers;
pub mod filters;
pub mod sensors;
pub mod timed;
pub mod untimed;

pub use sensors::{Accuracy, SamplingRate, Sensor, SensorType};
pub use timed::{SampleError, SensorSample};
pub use untimed::XYZ;
