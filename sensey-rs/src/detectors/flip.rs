use sensor_common::{SensorSample, SensorType};

use super::{DetectionEvent, DetectionKind, Detector};
use crate::constants::FLIP_THRESHOLD;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Face {
    Up,
    Down,
}

/// Reports when the device is turned face up or face down, based on the z axis of the
/// accelerometer. Readings between the two thresholds keep the last known face.
#[derive(Debug, Clone, Default)]
pub struct FlipDetector {
    face: Option<Face>,
}

impl FlipDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Detector for FlipDetector {
    fn kind(&self) -> DetectionKind {
        DetectionKind::Flip
    }

    fn on_sample(&mut self, sample: &SensorSample) -> Option<DetectionEvent> {
        if sample.get_sensor_type() != SensorType::Accelerometer {
            return None;
        }
        let z = sample.values_xyz().z();
        let face = if z >= FLIP_THRESHOLD {
            Face::Up
        } else if z <= -FLIP_THRESHOLD {
            Face::Down
        } else {
            return None;
        };

        if self.face == Some(face) {
            return None;
        }
        self.face = Some(face);
        match face {
            Face::Up => Some(DetectionEvent::FaceUp),
            Face::Down => Some(DetectionEvent::FaceDown),
        }
    }
}
