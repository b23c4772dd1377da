//! Detector and service configuration.
//!
//! Every detector config has sensible defaults and is validated when detection starts;
//! an invalid config is rejected before anything is registered.

use std::time::Duration;

use sensor_common::SamplingRate;

use crate::constants::{
    DEFAULT_DARKNESS_THRESHOLD, DEFAULT_ORIENTATION_SMOOTHNESS, DEFAULT_SHAKE_THRESHOLD,
    DEFAULT_SHAKE_TIME_WINDOW, DEFAULT_WAVE_TIME_WINDOW,
};
use crate::errors::SenseyError;

/// Service wide settings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SenseyConfig {
    /// Rate requested from the platform for every subscription.
    pub sampling_rate: SamplingRate,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShakeConfig {
    /// Speed of acceleration change, in m/s^2 per second, above which the device is shaking.
    pub threshold: f64,
    /// Minimum time between two shake events.
    pub time_window: Duration,
}

impl ShakeConfig {
    pub fn new(threshold: f64, time_window: Duration) -> Self {
        Self {
            threshold,
            time_window,
        }
    }
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SHAKE_THRESHOLD, DEFAULT_SHAKE_TIME_WINDOW)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrientationConfig {
    /// Number of readings averaged before classifying. Higher reacts slower.
    pub smoothness: usize,
}

impl OrientationConfig {
    pub fn new(smoothness: usize) -> Self {
        Self { smoothness }
    }
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ORIENTATION_SMOOTHNESS)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightConfig {
    /// Illuminance, in lux, under which it is dark.
    pub darkness_threshold: f64,
}

impl LightConfig {
    pub fn new(darkness_threshold: f64) -> Self {
        Self { darkness_threshold }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DARKNESS_THRESHOLD)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WaveConfig {
    /// Longest near phase still counted as a wave.
    pub time_window: Duration,
}

impl WaveConfig {
    pub fn new(time_window: Duration) -> Self {
        Self { time_window }
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WAVE_TIME_WINDOW)
    }
}

/// Config of a running detector.
#[derive(Clone, Debug, PartialEq)]
pub enum DetectorConfig {
    Shake(ShakeConfig),
    Flip,
    Orientation(OrientationConfig),
    Light(LightConfig),
    Proximity,
    Wave(WaveConfig),
}

impl DetectorConfig {
    /// Rejects thresholds and windows that would make the detector meaningless.
    pub fn validate(&self) -> Result<(), SenseyError> {
        match self {
            DetectorConfig::Shake(config) => {
                check_positive("shake threshold", config.threshold)?;
                check_window("shake time window", config.time_window)
            }
            DetectorConfig::Orientation(config) => {
                if config.smoothness == 0 {
                    return Err(SenseyError::InvalidConfig(
                        "orientation smoothness must be at least 1".to_string(),
                    ));
                }
                Ok(())
            }
            DetectorConfig::Light(config) => {
                check_positive("darkness threshold", config.darkness_threshold)
            }
            DetectorConfig::Wave(config) => check_window("wave time window", config.time_window),
            DetectorConfig::Flip | DetectorConfig::Proximity => Ok(()),
        }
    }
}

fn check_positive(name: &str, value: f64) -> Result<(), SenseyError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SenseyError::InvalidConfig(format!(
            "{} must be a positive number, got {}",
            name, value
        )));
    }
    Ok(())
}

fn check_window(name: &str, window: Duration) -> Result<(), SenseyError> {
    if window.is_zero() {
        return Err(SenseyError::InvalidConfig(format!(
            "{} must be longer than zero",
            name
        )));
    }
    Ok(())
}
