use std::time::Duration;

/// Delivery rate hint passed to the platform when subscribing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SamplingRate {
    Fastest,
    Game,
    Ui,
    #[default]
    Normal,
    Custom(Duration),
}

impl SamplingRate {
    /// Requested period between two samples.
    pub fn period(&self) -> Duration {
        match self {
            SamplingRate::Fastest => Duration::ZERO,
            SamplingRate::Game => Duration::from_millis(20),
            SamplingRate::Ui => Duration::from_micros(66_667),
            SamplingRate::Normal => Duration::from_millis(200),
            SamplingRate::Custom(period) => *period,
        }
    }
}

/// Accuracy of the values reported by a sensor.
#[cfg_attr(
    any(feature = "serde-serialize", test),
    derive(serde::Serialize, serde::Deserialize)
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Accuracy {
    NoContact,
    Unreliable,
    Low,
    Medium,
    #[default]
    High,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_periods_are_ordered() {
        assert!(SamplingRate::Fastest.period() < SamplingRate::Game.period());
        assert!(SamplingRate::Game.period() < SamplingRate::Ui.period());
        assert!(SamplingRate::Ui.period() < SamplingRate::Normal.period());
    }

    #[test]
    fn test_custom_period() {
        let rate = SamplingRate::Custom(Duration::from_millis(5));
        assert_eq!(rate.period(), Duration::from_millis(5));
    }

    #[test]
    fn test_default_rate_and_accuracy() {
        assert_eq!(SamplingRate::default(), SamplingRate::Normal);
        assert_eq!(Accuracy::default(), Accuracy::High);
    }
}
