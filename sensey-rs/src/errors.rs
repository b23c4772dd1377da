//! Module errors

/// Represents the different types of errors returned by the detection service.
#[derive(Debug, Clone, PartialEq)]
pub enum SenseyError {
    /// A start or stop was requested before `Sensey::init`.
    NotInitialized,

    /// A detector config failed validation.
    InvalidConfig(String),

    /// The platform refused a subscription.
    Subscription(String),
}

impl std::fmt::Display for SenseyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SenseyError::NotInitialized => {
                write!(f, "Sensey is not initialized, call init() first")
            }
            SenseyError::InvalidConfig(msg) => write!(f, "Invalid detector config: {}", msg),
            SenseyError::Subscription(msg) => write!(f, "Sensor subscription failed: {}", msg),
        }
    }
}

impl std::error::Error for SenseyError {}
