use dashmap::DashMap;
use log::{debug, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::publisher::Callback;
use crate::publisher_manager::PublisherManager;
use sensor_common::{
    Accuracy, SamplingRate, Sensor, SensorEventListener, SensorManagerPort, SensorSample,
    SensorType,
};

/// What the hub fans out to the listeners of one sensor type.
#[derive(Clone, Debug)]
pub enum HubEvent {
    Sample(SensorSample),
    Accuracy(Sensor, Accuracy),
}

/// In-process sensor service.
///
/// Sensors are declared with [`SensorHub::add_sensor`]; whoever owns the hardware (a driver,
/// a recorded trace, a test) pushes readings with [`SensorHub::publish`]. Registered
/// listeners are called synchronously on the publishing thread.
///
/// Each `register_listener` call creates an independent subscription. Registering the
/// same listener twice yields two ids and double delivery.
pub struct SensorHub {
    sensors: DashMap<SensorType, Sensor>,
    publishers: PublisherManager<HubEvent, SensorType>,
    rates: DashMap<Uuid, SamplingRate>,
}

impl Default for SensorHub {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorHub {
    /// Creates a hub with no sensors.
    pub fn new() -> Self {
        Self {
            sensors: DashMap::new(),
            publishers: PublisherManager::new(&[]),
            rates: DashMap::new(),
        }
    }

    /// Creates a hub exposing `sensors`.
    pub fn with_sensors(sensors: Vec<Sensor>) -> Self {
        let hub = Self::new();
        for sensor in sensors {
            hub.add_sensor(sensor);
        }
        hub
    }

    /// Declares a sensor. Replaces the descriptor of an existing sensor of the same type
    /// and keeps its subscriptions.
    pub fn add_sensor(&self, sensor: Sensor) {
        let sensor_type = sensor.get_sensor_type();
        self.publishers.add_publisher(sensor_type);
        self.sensors.insert(sensor_type, sensor);
    }

    /// Removes a sensor. Its subscriptions are dropped.
    pub fn remove_sensor(&self, sensor_type: SensorType) -> Option<Sensor> {
        for id in self.publishers.remove_publisher(&sensor_type) {
            self.rates.remove(&id);
        }
        self.sensors.remove(&sensor_type).map(|(_, sensor)| sensor)
    }

    pub fn get_sensors(&self) -> Vec<Sensor> {
        self.publishers
            .get_available_publisher_types()
            .iter()
            .filter_map(|sensor_type| self.sensors.get(sensor_type).map(|s| s.clone()))
            .collect()
    }

    /// Delivers `sample` to every listener of its sensor type. Returns how many listeners
    /// were called.
    pub fn publish(&self, sample: SensorSample) -> usize {
        let sensor_type = sample.get_sensor_type();
        if !self.sensors.contains_key(&sensor_type) {
            warn!("Dropping {} sample: sensor not available", sensor_type);
            return 0;
        }
        self.publishers
            .notify_listeners(&sensor_type, Arc::new(HubEvent::Sample(sample)))
    }

    /// Reports an accuracy change of the sensor of type `sensor_type`.
    pub fn set_accuracy(&self, sensor_type: SensorType, accuracy: Accuracy) -> usize {
        let Some(sensor) = self.sensors.get(&sensor_type).map(|s| s.clone()) else {
            return 0;
        };
        self.publishers
            .notify_listeners(&sensor_type, Arc::new(HubEvent::Accuracy(sensor, accuracy)))
    }

    /// True while the subscription `id` is active.
    pub fn has_listener(&self, id: Uuid) -> bool {
        self.publishers.contains_listener(&id)
    }

    pub fn listener_count(&self, sensor_type: SensorType) -> usize {
        self.publishers.listener_count(&sensor_type)
    }

    pub fn total_listeners(&self) -> usize {
        self.publishers.total_listeners()
    }

    /// Rate requested by subscription `id`.
    pub fn get_sampling_rate(&self, id: Uuid) -> Option<SamplingRate> {
        self.rates.get(&id).map(|rate| *rate)
    }
}

impl SensorManagerPort for SensorHub {
    fn get_default_sensor(&self, sensor_type: SensorType) -> Option<Sensor> {
        self.sensors.get(&sensor_type).map(|sensor| sensor.clone())
    }

    fn register_listener(
        &self,
        listener: Arc<dyn SensorEventListener>,
        sensor: &Sensor,
        rate: SamplingRate,
    ) -> Result<Uuid, String> {
        let callback: Callback<HubEvent> =
            Arc::new(move |_id: Uuid, event: Arc<HubEvent>| match event.as_ref() {
                HubEvent::Sample(sample) => listener.on_sensor_changed(sample),
                HubEvent::Accuracy(sensor, accuracy) => {
                    listener.on_accuracy_changed(sensor, *accuracy)
                }
            });
        let id = self
            .publishers
            .add_listener(callback, &sensor.get_sensor_type())?;
        self.rates.insert(id, rate);
        debug!(
            "Registered listener {} on {} at {:?}",
            id,
            sensor.get_sensor_type(),
            rate
        );
        Ok(id)
    }

    fn unregister_listener(&self, id: Uuid) {
        self.rates.remove(&id);
        if self.publishers.remove_listener(id).is_ok() {
            debug!("Unregistered listener {}", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingListener {
        samples: Mutex<Vec<SensorSample>>,
        accuracies: Mutex<Vec<Accuracy>>,
    }

    impl SensorEventListener for RecordingListener {
        fn on_sensor_changed(&self, sample: &SensorSample) {
            self.samples.lock().unwrap().push(sample.clone());
        }

        fn on_accuracy_changed(&self, _sensor: &Sensor, accuracy: Accuracy) {
            self.accuracies.lock().unwrap().push(accuracy);
        }
    }

    fn light_hub() -> SensorHub {
        SensorHub::with_sensors(vec![Sensor::new(SensorType::Light, "light", 10_000.0)])
    }

    #[test]
    fn test_default_sensor() {
        let hub = light_hub();
        assert!(hub.get_default_sensor(SensorType::Light).is_some());
        assert!(hub.get_default_sensor(SensorType::Proximity).is_none());
    }

    #[test]
    fn test_publish_reaches_registered_listener() {
        let hub = light_hub();
        let listener = Arc::new(RecordingListener::default());
        let sensor = hub.get_default_sensor(SensorType::Light).unwrap();
        let id = hub
            .register_listener(listener.clone(), &sensor, SamplingRate::Game)
            .unwrap();

        let sample = SensorSample::new(SensorType::Light, 0.0, &[42.0]).unwrap();
        assert_eq!(hub.publish(sample.clone()), 1);

        assert!(hub.has_listener(id));
        assert_eq!(hub.get_sampling_rate(id), Some(SamplingRate::Game));
        assert_eq!(*listener.samples.lock().unwrap(), vec![sample]);
    }

    #[test]
    fn test_unregister_stops_delivery() {
        let hub = light_hub();
        let listener = Arc::new(RecordingListener::default());
        let sensor = hub.get_default_sensor(SensorType::Light).unwrap();
        let id = hub
            .register_listener(listener.clone(), &sensor, SamplingRate::Normal)
            .unwrap();

        hub.unregister_listener(id);
        hub.unregister_listener(id);

        assert!(!hub.has_listener(id));
        assert_eq!(hub.listener_count(SensorType::Light), 0);
        assert_eq!(
            hub.publish(SensorSample::new(SensorType::Light, 0.0, &[1.0]).unwrap()),
            0
        );
        assert!(listener.samples.lock().unwrap().is_empty());
    }

    #[test]
    fn test_register_on_missing_sensor_fails() {
        let hub = light_hub();
        let listener = Arc::new(RecordingListener::default());
        let sensor = Sensor::new(SensorType::Proximity, "proximity", 5.0);

        assert!(hub
            .register_listener(listener, &sensor, SamplingRate::Normal)
            .is_err());
    }

    #[test]
    fn test_publish_without_sensor_is_dropped() {
        let hub = light_hub();
        let sample = SensorSample::new(SensorType::Proximity, 0.0, &[0.0]).unwrap();
        assert_eq!(hub.publish(sample), 0);
    }

    #[test]
    fn test_remove_sensor_drops_subscriptions() {
        let hub = light_hub();
        let listener = Arc::new(RecordingListener::default());
        let sensor = hub.get_default_sensor(SensorType::Light).unwrap();
        let id = hub
            .register_listener(listener, &sensor, SamplingRate::Normal)
            .unwrap();

        assert!(hub.remove_sensor(SensorType::Light).is_some());
        assert!(!hub.has_listener(id));
        assert_eq!(hub.total_listeners(), 0);
        assert!(hub.get_sensors().is_empty());
    }

    #[test]
    fn test_accuracy_change_is_forwarded() {
        let hub = light_hub();
        let listener = Arc::new(RecordingListener::default());
        let sensor = hub.get_default_sensor(SensorType::Light).unwrap();
        hub.register_listener(listener.clone(), &sensor, SamplingRate::Normal)
            .unwrap();

        assert_eq!(hub.set_accuracy(SensorType::Light, Accuracy::Low), 1);
        assert_eq!(hub.set_accuracy(SensorType::Proximity, Accuracy::Low), 0);
        assert_eq!(*listener.accuracies.lock().unwrap(), vec![Accuracy::Low]);
    }
}
