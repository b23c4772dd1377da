use sensor_common::{SensorSample, SensorType};

use super::{DetectionEvent, DetectionKind, Detector};
use crate::config::LightConfig;

/// Reports transitions between dark and light surroundings.
#[derive(Debug, Clone)]
pub struct LightDetector {
    config: LightConfig,
    dark: Option<bool>,
}

impl LightDetector {
    pub fn new(config: LightConfig) -> Self {
        Self { config, dark: None }
    }
}

impl Detector for LightDetector {
    fn kind(&self) -> DetectionKind {
        DetectionKind::Light
    }

    fn on_sample(&mut self, sample: &SensorSample) -> Option<DetectionEvent> {
        if sample.get_sensor_type() != SensorType::Light {
            return None;
        }
        let dark = sample.first_value() < self.config.darkness_threshold;
        if self.dark == Some(dark) {
            return None;
        }
        self.dark = Some(dark);
        if dark {
            Some(DetectionEvent::Dark)
        } else {
            Some(DetectionEvent::Light)
        }
    }
}
