//! Detectors turn raw sensor samples into semantic events.
//!
//! A detector is fed every sample of the sensor types its kind needs and returns at most
//! one event per sample. Detectors that classify into a discrete state (flip, light,
//! proximity, orientation) only report changes of that state; the shake detector is
//! rate-limited by a time window instead.

pub mod flip;
pub mod light;
pub mod orientation;
pub mod proximity;
pub mod shake;
pub mod wave;

pub use flip::FlipDetector;
pub use light::LightDetector;
pub use orientation::{OrientationBucket, OrientationDetector};
pub use proximity::ProximityDetector;
pub use shake::ShakeDetector;
pub use wave::WaveDetector;

use sensor_common::{Sensor, SensorSample, SensorType};

use crate::config::DetectorConfig;

/// Gesture or state a detector reports on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DetectionKind {
    Shake,
    Flip,
    Orientation,
    Light,
    Proximity,
    Wave,
}

impl DetectionKind {
    /// Sensor types a detector of this kind subscribes to.
    pub fn required_sensors(&self) -> Vec<SensorType> {
        match self {
            DetectionKind::Shake | DetectionKind::Flip => vec![SensorType::Accelerometer],
            DetectionKind::Orientation => {
                vec![SensorType::Accelerometer, SensorType::MagneticField]
            }
            DetectionKind::Light => vec![SensorType::Light],
            DetectionKind::Proximity | DetectionKind::Wave => vec![SensorType::Proximity],
        }
    }
}

impl std::fmt::Display for DetectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DetectionKind::Shake => "shake",
            DetectionKind::Flip => "flip",
            DetectionKind::Orientation => "orientation",
            DetectionKind::Light => "light",
            DetectionKind::Proximity => "proximity",
            DetectionKind::Wave => "wave",
        };
        write!(f, "{}", name)
    }
}

/// Positive decision of a detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectionEvent {
    ShakeDetected,
    ShakeStopped,
    FaceUp,
    FaceDown,
    Orientation(OrientationBucket),
    Dark,
    Light,
    Near,
    Far,
    Wave,
}

impl DetectionEvent {
    /// Kind of detector that emits this event.
    pub fn kind(&self) -> DetectionKind {
        match self {
            DetectionEvent::ShakeDetected | DetectionEvent::ShakeStopped => DetectionKind::Shake,
            DetectionEvent::FaceUp | DetectionEvent::FaceDown => DetectionKind::Flip,
            DetectionEvent::Orientation(_) => DetectionKind::Orientation,
            DetectionEvent::Dark | DetectionEvent::Light => DetectionKind::Light,
            DetectionEvent::Near | DetectionEvent::Far => DetectionKind::Proximity,
            DetectionEvent::Wave => DetectionKind::Wave,
        }
    }
}

pub trait Detector: Send {
    fn kind(&self) -> DetectionKind;

    /// Evaluates one sample. Samples of sensor types the detector does not use are ignored.
    fn on_sample(&mut self, sample: &SensorSample) -> Option<DetectionEvent>;
}

/// Builds the detector for `config`. `sensors` are the descriptors the platform reported
/// for the kind's required sensor types; missing ones are simply absent.
pub fn build_detector(config: &DetectorConfig, sensors: &[Sensor]) -> Box<dyn Detector> {
    let proximity_range = sensors
        .iter()
        .find(|sensor| sensor.get_sensor_type() == SensorType::Proximity)
        .map(|sensor| sensor.get_maximum_range());

    match config {
        DetectorConfig::Shake(config) => Box::new(ShakeDetector::new(config.clone())),
        DetectorConfig::Flip => Box::new(FlipDetector::new()),
        DetectorConfig::Orientation(config) => Box::new(OrientationDetector::new(config.clone())),
        DetectorConfig::Light(config) => Box::new(LightDetector::new(config.clone())),
        DetectorConfig::Proximity => Box::new(ProximityDetector::new(proximity_range)),
        DetectorConfig::Wave(config) => Box::new(WaveDetector::new(config.clone(), proximity_range)),
    }
}

impl DetectorConfig {
    pub fn kind(&self) -> DetectionKind {
        match self {
            DetectorConfig::Shake(_) => DetectionKind::Shake,
            DetectorConfig::Flip => DetectionKind::Flip,
            DetectorConfig::Orientation(_) => DetectionKind::Orientation,
            DetectorConfig::Light(_) => DetectionKind::Light,
            DetectorConfig::Proximity => DetectionKind::Proximity,
            DetectorConfig::Wave(_) => DetectionKind::Wave,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LightConfig, OrientationConfig, ShakeConfig, WaveConfig};

    #[test]
    fn test_required_sensors() {
        assert_eq!(
            DetectionKind::Orientation.required_sensors(),
            vec![SensorType::Accelerometer, SensorType::MagneticField]
        );
        assert_eq!(
            DetectionKind::Wave.required_sensors(),
            vec![SensorType::Proximity]
        );
    }

    #[test]
    fn test_built_detector_matches_config_kind() {
        let configs = [
            DetectorConfig::Shake(ShakeConfig::default()),
            DetectorConfig::Flip,
            DetectorConfig::Orientation(OrientationConfig::default()),
            DetectorConfig::Light(LightConfig::default()),
            DetectorConfig::Proximity,
            DetectorConfig::Wave(WaveConfig::default()),
        ];
        for config in configs {
            let detector = build_detector(&config, &[]);
            assert_eq!(detector.kind(), config.kind());
        }
    }

    #[test]
    fn test_event_kind() {
        assert_eq!(DetectionEvent::ShakeStopped.kind(), DetectionKind::Shake);
        assert_eq!(
            DetectionEvent::Orientation(OrientationBucket::LeftSideUp).kind(),
            DetectionKind::Orientation
        );
        assert_eq!(DetectionEvent::Far.kind(), DetectionKind::Proximity);
    }
}
