use std::sync::Arc;
use uuid::Uuid;

use crate::types::{Accuracy, SamplingRate, Sensor, SensorSample, SensorType};

/// Receiver of raw samples from the platform sensor service.
///
/// Called on the platform delivery thread. Implementations must not block.
pub trait SensorEventListener: Send + Sync {
    /// A new sample is available for a sensor this listener is registered to.
    fn on_sensor_changed(&self, sample: &SensorSample);

    /// The accuracy reported by `sensor` changed.
    fn on_accuracy_changed(&self, _sensor: &Sensor, _accuracy: Accuracy) {}
}

/// Platform sensor service.
pub trait SensorManagerPort: Send + Sync {
    /// Returns the default sensor of the given type, or `None` if the device has none.
    fn get_default_sensor(&self, sensor_type: SensorType) -> Option<Sensor>;

    /// Subscribes `listener` to samples of `sensor`, delivered roughly at `rate`.
    /// Returns the id of the subscription, or an error if the platform refuses it.
    fn register_listener(
        &self,
        listener: Arc<dyn SensorEventListener>,
        sensor: &Sensor,
        rate: SamplingRate,
    ) -> Result<Uuid, String>;

    /// Cancels a subscription. Unknown ids are ignored.
    fn unregister_listener(&self, id: Uuid);
}
