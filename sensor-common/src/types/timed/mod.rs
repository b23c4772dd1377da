pub mod sensor_sample;

pub use sensor_sample::{SampleError, SensorSample};
