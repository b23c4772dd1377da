/// Represents the kinds of physical sensor a detector can subscribe to.
///
/// # Examples
///
/// ```
/// use sensor_common::SensorType;
///
/// let sensor = SensorType::Accelerometer;
/// assert_eq!(usize::from(sensor), 0);
///
/// let sensor = SensorType::try_from("magnetic_field").unwrap();
/// assert_eq!(sensor, SensorType::MagneticField);
///
/// assert!(SensorType::try_from("barometer").is_err());
/// ```
#[cfg_attr(
    any(feature = "serde-serialize", test),
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(usize)]
pub enum SensorType {
    Accelerometer = 0,
    MagneticField,
    Light,
    Proximity,
}

impl SensorType {
    /// All supported sensor types, sorted by index.
    pub const ALL: [SensorType; 4] = [
        SensorType::Accelerometer,
        SensorType::MagneticField,
        SensorType::Light,
        SensorType::Proximity,
    ];

    /// Number of values a sample of this type carries.
    pub fn value_count(&self) -> usize {
        match self {
            SensorType::Accelerometer | SensorType::MagneticField => 3,
            SensorType::Light | SensorType::Proximity => 1,
        }
    }
}

impl From<&SensorType> for usize {
    fn from(value: &SensorType) -> Self {
        *value as usize
    }
}

impl From<SensorType> for usize {
    fn from(value: SensorType) -> Self {
        usize::from(&value)
    }
}

impl TryFrom<&str> for SensorType {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower_case_value = value.to_lowercase();

        if lower_case_value.contains("acc") {
            Ok(Self::Accelerometer)
        } else if lower_case_value.contains("mag") {
            Ok(Self::MagneticField)
        } else if lower_case_value.contains("light") || lower_case_value.contains("lux") {
            Ok(Self::Light)
        } else if lower_case_value.contains("prox") {
            Ok(Self::Proximity)
        } else {
            Err(format!("Unknown sensor type {}", value))
        }
    }
}

impl std::fmt::Display for SensorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SensorType::Accelerometer => "accelerometer",
            SensorType::MagneticField => "magnetic_field",
            SensorType::Light => "light",
            SensorType::Proximity => "proximity",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_usize() {
        assert_eq!(usize::from(SensorType::Accelerometer), 0);
        assert_eq!(usize::from(SensorType::MagneticField), 1);
        assert_eq!(usize::from(SensorType::Light), 2);
        assert_eq!(usize::from(SensorType::Proximity), 3);
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!(
            SensorType::try_from("ACCELEROMETER"),
            Ok(SensorType::Accelerometer)
        );
        assert_eq!(SensorType::try_from("Magnetometer"), Ok(SensorType::MagneticField));
        assert_eq!(SensorType::try_from("LIGHT"), Ok(SensorType::Light));
        assert_eq!(SensorType::try_from("Proximity"), Ok(SensorType::Proximity));
    }

    #[test]
    fn test_from_str_partial_match() {
        assert_eq!(SensorType::try_from("acc"), Ok(SensorType::Accelerometer));
        assert_eq!(SensorType::try_from("mag"), Ok(SensorType::MagneticField));
        assert_eq!(SensorType::try_from("lux"), Ok(SensorType::Light));
        assert_eq!(SensorType::try_from("prox"), Ok(SensorType::Proximity));
        assert!(SensorType::try_from("unknown").is_err());
    }

    #[test]
    fn test_display_round_trips_through_parser() {
        for sensor_type in SensorType::ALL {
            let name = sensor_type.to_string();
            assert_eq!(SensorType::try_from(name.as_str()), Ok(sensor_type));
        }
    }

    #[test]
    fn test_value_count() {
        assert_eq!(SensorType::Accelerometer.value_count(), 3);
        assert_eq!(SensorType::MagneticField.value_count(), 3);
        assert_eq!(SensorType::Light.value_count(), 1);
        assert_eq!(SensorType::Proximity.value_count(), 1);
    }
}
