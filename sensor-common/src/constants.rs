/// Standard gravity in m/s^2.
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Maximum number of values carried by one sensor sample.
pub const MAX_SAMPLE_VALUES: usize = 3;
