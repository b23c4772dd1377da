pub mod arithmetic;
pub mod sensor_manager;

pub use crate::traits::arithmetic::BasicArithmetic;
pub use crate::traits::sensor_manager::{SensorEventListener, SensorManagerPort};
