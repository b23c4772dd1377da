use nalgebra::Matrix3;

use sensor_common::constants::STANDARD_GRAVITY;
use sensor_common::filters::MovingAverage;
use sensor_common::{SensorSample, SensorType, XYZ};

use super::{DetectionEvent, DetectionKind, Detector};
use crate::config::OrientationConfig;
use crate::constants::ORIENTATION_ANGLE_THRESHOLD;

/// Below this squared acceleration the device is in free fall and has no usable gravity.
const FREE_FALL_GRAVITY_SQUARED: f64 = 0.01 * STANDARD_GRAVITY * STANDARD_GRAVITY;
/// Below this norm the magnetic field is (almost) parallel to gravity.
const MIN_HORIZONTAL_FIELD: f64 = 0.1;

/// Side of the device pointing up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrientationBucket {
    /// Portrait.
    TopSideUp,
    /// Upside down portrait.
    BottomSideUp,
    /// Landscape, left edge up.
    LeftSideUp,
    /// Landscape, right edge up.
    RightSideUp,
}

/// Rotation matrix from device to world coordinates, built from gravity and the
/// geomagnetic field. Rows are east, north and up expressed in device axes.
/// `None` in free fall or when the field is parallel to gravity.
pub fn rotation_matrix(gravity: &XYZ, geomagnetic: &XYZ) -> Option<Matrix3<f64>> {
    let a = gravity.0;
    if a.norm_squared() < FREE_FALL_GRAVITY_SQUARED {
        return None;
    }
    let h = geomagnetic.0.cross(&a);
    let norm_h = h.norm();
    if norm_h < MIN_HORIZONTAL_FIELD {
        return None;
    }
    let h = h / norm_h;
    let a = a.normalize();
    let m = a.cross(&h);

    Some(Matrix3::new(
        h.x, h.y, h.z, //
        m.x, m.y, m.z, //
        a.x, a.y, a.z,
    ))
}

/// Decomposes a rotation matrix into `[azimuth, pitch, roll]`, in radians.
pub fn orientation_angles(r: &Matrix3<f64>) -> [f64; 3] {
    let azimuth = r[(0, 1)].atan2(r[(1, 1)]);
    let pitch = (-r[(2, 1)]).clamp(-1.0, 1.0).asin();
    let roll = (-r[(2, 0)]).atan2(r[(2, 2)]);
    [azimuth, pitch, roll]
}

/// Maps smoothed pitch and roll, in degrees, to the side facing up.
/// A device lying flat has no bucket.
pub fn classify(pitch: f64, roll: f64) -> Option<OrientationBucket> {
    let threshold = ORIENTATION_ANGLE_THRESHOLD;
    if pitch < -threshold {
        Some(OrientationBucket::TopSideUp)
    } else if pitch > threshold {
        Some(OrientationBucket::BottomSideUp)
    } else if roll > threshold && roll < 180.0 - threshold {
        Some(OrientationBucket::LeftSideUp)
    } else if roll < -threshold && roll > -(180.0 - threshold) {
        Some(OrientationBucket::RightSideUp)
    } else {
        None
    }
}

/// Reports which side of the device faces up.
///
/// Needs both accelerometer and magnetic field readings; until both have been seen it stays
/// silent. Pitch and roll are averaged over the last `smoothness` readings before being
/// classified, and only changes of the resulting bucket are reported.
#[derive(Debug, Clone)]
pub struct OrientationDetector {
    gravity: Option<XYZ>,
    geomagnetic: Option<XYZ>,
    smoothing: MovingAverage<XYZ>,
    bucket: Option<OrientationBucket>,
}

impl OrientationDetector {
    pub fn new(config: OrientationConfig) -> Self {
        Self {
            gravity: None,
            geomagnetic: None,
            smoothing: MovingAverage::new(config.smoothness),
            bucket: None,
        }
    }

    pub fn current_bucket(&self) -> Option<OrientationBucket> {
        self.bucket
    }
}

impl Detector for OrientationDetector {
    fn kind(&self) -> DetectionKind {
        DetectionKind::Orientation
    }

    fn on_sample(&mut self, sample: &SensorSample) -> Option<DetectionEvent> {
        match sample.get_sensor_type() {
            SensorType::Accelerometer => self.gravity = Some(sample.values_xyz()),
            SensorType::MagneticField => self.geomagnetic = Some(sample.values_xyz()),
            _ => return None,
        }
        let (gravity, geomagnetic) = (self.gravity?, self.geomagnetic?);
        let r = rotation_matrix(&gravity, &geomagnetic)?;
        let [_, pitch, roll] = orientation_angles(&r);

        // x: pitch, y: roll
        let smoothed = self
            .smoothing
            .filter(XYZ::new([pitch.to_degrees(), roll.to_degrees(), 0.0]));
        let bucket = classify(smoothed.x(), smoothed.y())?;

        if self.bucket == Some(bucket) {
            return None;
        }
        self.bucket = Some(bucket);
        Some(DetectionEvent::Orientation(bucket))
    }
}
