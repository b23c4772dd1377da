use sensor_common::{SensorSample, SensorType, XYZ};

use super::{DetectionEvent, DetectionKind, Detector};
use crate::config::ShakeConfig;

/// Detects shakes from the rate of change of acceleration.
///
/// A sample whose speed `|a - a_prev| / dt` exceeds the threshold counts as motion.
/// Motion raises `ShakeDetected` unless a shake was already reported within the time window.
/// Once shaking, the first quiet sample arriving more than a window after the last motion
/// raises `ShakeStopped`.
#[derive(Debug, Clone)]
pub struct ShakeDetector {
    config: ShakeConfig,
    last_sample: Option<(f64, XYZ)>,
    last_shake: Option<f64>,
    last_motion: Option<f64>,
    shaking: bool,
}

impl ShakeDetector {
    pub fn new(config: ShakeConfig) -> Self {
        Self {
            config,
            last_sample: None,
            last_shake: None,
            last_motion: None,
            shaking: false,
        }
    }

    pub fn is_shaking(&self) -> bool {
        self.shaking
    }
}

impl Detector for ShakeDetector {
    fn kind(&self) -> DetectionKind {
        DetectionKind::Shake
    }

    fn on_sample(&mut self, sample: &SensorSample) -> Option<DetectionEvent> {
        if sample.get_sensor_type() != SensorType::Accelerometer {
            return None;
        }
        let now = sample.get_timestamp_secs();
        let acceleration = sample.values_xyz();

        let (previous_time, previous_acceleration) =
            self.last_sample.replace((now, acceleration))?;
        let elapsed = now - previous_time;
        if elapsed <= 0.0 {
            return None;
        }

        let speed = (acceleration - previous_acceleration).norm() / elapsed;
        let window = self.config.time_window.as_secs_f64();

        if speed > self.config.threshold {
            self.last_motion = Some(now);
            let window_elapsed = self.last_shake.map_or(true, |last| now - last > window);
            if window_elapsed {
                self.last_shake = Some(now);
                self.shaking = true;
                return Some(DetectionEvent::ShakeDetected);
            }
            return None;
        }

        let quiet = self.last_motion.map_or(false, |last| now - last > window);
        if self.shaking && quiet {
            self.shaking = false;
            return Some(DetectionEvent::ShakeStopped);
        }
        None
    }
}
