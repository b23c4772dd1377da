use crate::constants::MAX_SAMPLE_VALUES;
use crate::types::sensors::{Accuracy, SensorType};
use crate::types::untimed::XYZ;

#[cfg(any(feature = "serde-serialize", test))]
use serde::{Deserialize, Serialize};

/// Errors building a [`SensorSample`].
#[derive(Debug, Clone, PartialEq)]
pub enum SampleError {
    /// Samples carry between one and three values.
    InvalidValueCount(usize),
    /// Row could not be mapped into a sample.
    InvalidFormat(String),
}

impl std::fmt::Display for SampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleError::InvalidValueCount(n) => {
                write!(f, "Sensor samples carry 1 to 3 values, got {}", n)
            }
            SampleError::InvalidFormat(msg) => write!(f, "Invalid sample format: {}", msg),
        }
    }
}

impl std::error::Error for SampleError {}

/// A raw reading delivered by the platform.
///
/// # Examples
///
/// ```
/// use sensor_common::{SensorSample, SensorType};
///
/// let sample = SensorSample::new(SensorType::Accelerometer, 0.5, &[0.0, 0.0, 9.8]).unwrap();
/// assert_eq!(sample.get_timestamp_secs(), 0.5);
/// assert_eq!(sample.values_xyz().z(), 9.8);
///
/// assert!(SensorSample::new(SensorType::Light, 0.5, &[]).is_err());
/// ```
#[cfg_attr(any(feature = "serde-serialize", test), derive(Serialize, Deserialize))]
#[cfg_attr(
    any(feature = "serde-serialize", test),
    serde(try_from = "RawSensorSample")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSample {
    sensor_type: SensorType,
    timestamp: f64,
    values: Vec<f64>,
    accuracy: Accuracy,
}

// Wire form, checked by `SensorSample::with_accuracy` on the way in.
#[cfg(any(feature = "serde-serialize", test))]
#[derive(Deserialize)]
struct RawSensorSample {
    sensor_type: SensorType,
    timestamp: f64,
    values: Vec<f64>,
    #[serde(default)]
    accuracy: Accuracy,
}

#[cfg(any(feature = "serde-serialize", test))]
impl TryFrom<RawSensorSample> for SensorSample {
    type Error = SampleError;

    fn try_from(raw: RawSensorSample) -> Result<Self, Self::Error> {
        SensorSample::with_accuracy(raw.sensor_type, raw.timestamp, &raw.values, raw.accuracy)
    }
}

impl SensorSample {
    /// Creates a sample with `High` accuracy.
    pub fn new(sensor_type: SensorType, timestamp: f64, values: &[f64]) -> Result<Self, SampleError> {
        Self::with_accuracy(sensor_type, timestamp, values, Accuracy::default())
    }

    pub fn with_accuracy(
        sensor_type: SensorType,
        timestamp: f64,
        values: &[f64],
        accuracy: Accuracy,
    ) -> Result<Self, SampleError> {
        if values.is_empty() || values.len() > MAX_SAMPLE_VALUES {
            return Err(SampleError::InvalidValueCount(values.len()));
        }
        Ok(Self {
            sensor_type,
            timestamp,
            values: values.to_vec(),
            accuracy,
        })
    }

    /// Builds a sample from an `XYZ` measurement.
    pub fn from_xyz(sensor_type: SensorType, timestamp: f64, measurement: XYZ) -> Self {
        Self {
            sensor_type,
            timestamp,
            values: measurement.into(),
            accuracy: Accuracy::default(),
        }
    }

    pub fn get_sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    pub fn get_timestamp_secs(&self) -> f64 {
        self.timestamp
    }

    pub fn get_values(&self) -> &[f64] {
        &self.values
    }

    pub fn get_accuracy(&self) -> Accuracy {
        self.accuracy
    }

    /// First value, the only one for scalar sensors.
    pub fn first_value(&self) -> f64 {
        self.values.first().copied().unwrap_or_default()
    }

    /// First three values as an `XYZ`. Missing axes are zero.
    pub fn values_xyz(&self) -> XYZ {
        let mut data = [0.0; MAX_SAMPLE_VALUES];
        for (dst, src) in data.iter_mut().zip(self.values.iter()) {
            *dst = *src;
        }
        XYZ::new(data)
    }

    /// Same sample moved to another point in time.
    pub fn with_timestamp(&self, timestamp: f64) -> Self {
        Self {
            timestamp,
            ..self.clone()
        }
    }
}

/// `[timestamp, v0, v1?, v2?]`
impl TryFrom<(SensorType, Vec<f64>)> for SensorSample {
    type Error = SampleError;

    fn try_from(value: (SensorType, Vec<f64>)) -> Result<Self, Self::Error> {
        let (sensor_type, row) = value;
        let Some((timestamp, values)) = row.split_first() else {
            return Err(SampleError::InvalidFormat("empty row".to_string()));
        };
        SensorSample::new(sensor_type, *timestamp, values)
    }
}
