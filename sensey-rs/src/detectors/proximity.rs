use sensor_common::{SensorSample, SensorType};

use super::{DetectionEvent, DetectionKind, Detector};
use crate::constants::DEFAULT_PROXIMITY_RANGE;

/// Reports when an object comes near the proximity sensor or moves away.
/// A distance below the sensor's maximum range is near.
#[derive(Debug, Clone)]
pub struct ProximityDetector {
    maximum_range: f64,
    near: Option<bool>,
}

impl ProximityDetector {
    pub fn new(maximum_range: Option<f64>) -> Self {
        Self {
            maximum_range: maximum_range.unwrap_or(DEFAULT_PROXIMITY_RANGE),
            near: None,
        }
    }

    pub fn maximum_range(&self) -> f64 {
        self.maximum_range
    }
}

impl Detector for ProximityDetector {
    fn kind(&self) -> DetectionKind {
        DetectionKind::Proximity
    }

    fn on_sample(&mut self, sample: &SensorSample) -> Option<DetectionEvent> {
        if sample.get_sensor_type() != SensorType::Proximity {
            return None;
        }
        let near = sample.first_value() < self.maximum_range;
        if self.near == Some(near) {
            return None;
        }
        self.near = Some(near);
        if near {
            Some(DetectionEvent::Near)
        } else {
            Some(DetectionEvent::Far)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(value: f64) -> SensorSample {
        SensorSample::new(SensorType::Proximity, 0.0, &[value]).unwrap()
    }

    #[test]
    fn test_near_far_transitions() {
        let mut detector = ProximityDetector::new(Some(8.0));
        assert_eq!(detector.on_sample(&distance(0.0)), Some(DetectionEvent::Near));
        assert_eq!(detector.on_sample(&distance(8.0)), Some(DetectionEvent::Far));
    }

    #[test]
    fn test_same_state_emits_once() {
        let mut detector = ProximityDetector::new(Some(8.0));
        assert_eq!(detector.on_sample(&distance(8.0)), Some(DetectionEvent::Far));
        assert_eq!(detector.on_sample(&distance(8.0)), None);
    }

    #[test]
    fn test_default_range_without_sensor() {
        let detector = ProximityDetector::new(None);
        assert_eq!(detector.maximum_range(), DEFAULT_PROXIMITY_RANGE);
    }
}
