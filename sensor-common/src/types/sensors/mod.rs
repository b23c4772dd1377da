pub mod sampling_rate;
pub mod sensor;
pub mod sensor_type;

pub use sampling_rate::{Accuracy, SamplingRate};
pub use sensor::Sensor;
pub use sensor_type::SensorType;
