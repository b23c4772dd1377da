use sensor_common::{SensorSample, SensorType};

use super::{DetectionEvent, DetectionKind, Detector};
use crate::config::WaveConfig;
use crate::constants::DEFAULT_PROXIMITY_RANGE;

/// Detects a hand waved over the proximity sensor: the sensor reads near, then far again
/// within the time window. Covering the sensor for longer is not a wave.
#[derive(Debug, Clone)]
pub struct WaveDetector {
    config: WaveConfig,
    maximum_range: f64,
    near_since: Option<f64>,
}

impl WaveDetector {
    pub fn new(config: WaveConfig, maximum_range: Option<f64>) -> Self {
        Self {
            config,
            maximum_range: maximum_range.unwrap_or(DEFAULT_PROXIMITY_RANGE),
            near_since: None,
        }
    }
}

impl Detector for WaveDetector {
    fn kind(&self) -> DetectionKind {
        DetectionKind::Wave
    }

    fn on_sample(&mut self, sample: &SensorSample) -> Option<DetectionEvent> {
        if sample.get_sensor_type() != SensorType::Proximity {
            return None;
        }
        let now = sample.get_timestamp_secs();
        if sample.first_value() < self.maximum_range {
            self.near_since.get_or_insert(now);
            return None;
        }

        let near_since = self.near_since.take()?;
        if now - near_since <= self.config.time_window.as_secs_f64() {
            return Some(DetectionEvent::Wave);
        }
        None
    }
}
