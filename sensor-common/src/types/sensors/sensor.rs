use super::SensorType;

/// Descriptor of a physical sensor as reported by the platform.
#[derive(Clone, Debug, PartialEq)]
pub struct Sensor {
    sensor_type: SensorType,
    name: String,
    maximum_range: f64,
}

impl Sensor {
    pub fn new(sensor_type: SensorType, name: &str, maximum_range: f64) -> Self {
        Self {
            sensor_type,
            name: name.to_string(),
            maximum_range,
        }
    }

    pub fn get_sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Maximum value the sensor can report, in the sensor's units.
    /// Proximity sensors report this value when nothing is near.
    pub fn get_maximum_range(&self) -> f64 {
        self.maximum_range
    }
}
