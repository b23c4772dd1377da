use std::time::Duration;

/// Shake speed threshold, in m/s^2 per second.
pub const DEFAULT_SHAKE_THRESHOLD: f64 = 300.0;
/// Minimum time between two shake events, and quiet time before a shake is declared stopped.
pub const DEFAULT_SHAKE_TIME_WINDOW: Duration = Duration::from_millis(1000);

/// |z| acceleration above which the device is considered face up / face down, in m/s^2.
pub const FLIP_THRESHOLD: f64 = 9.0;

/// Illuminance under which it is dark, in lux.
pub const DEFAULT_DARKNESS_THRESHOLD: f64 = 3.0;

/// Number of readings averaged by the orientation detector.
pub const DEFAULT_ORIENTATION_SMOOTHNESS: usize = 1;
/// Pitch or roll, in degrees, past which the device is held on one of its sides.
pub const ORIENTATION_ANGLE_THRESHOLD: f64 = 45.0;

/// Longest time the hand may cover the proximity sensor for the gesture to count as a wave.
pub const DEFAULT_WAVE_TIME_WINDOW: Duration = Duration::from_millis(1000);

/// Proximity range assumed when the platform reports no proximity sensor, in cm.
pub const DEFAULT_PROXIMITY_RANGE: f64 = 5.0;
