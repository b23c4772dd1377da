use log::{debug, error, info, warn};
use std::sync::{Arc, RwLock, RwLockReadGuard};
use uuid::Uuid;

use sensor_common::{Accuracy, Sensor, SensorEventListener, SensorManagerPort, SensorSample};

use crate::config::{
    DetectorConfig, LightConfig, OrientationConfig, SenseyConfig, ShakeConfig, WaveConfig,
};
use crate::detectors::{build_detector, DetectionKind};
use crate::errors::SenseyError;
use crate::listeners::{
    Callback, FlipListener, LightListener, ListenerKey, OrientationListener, ProximityListener,
    ShakeListener, WaveListener,
};
use crate::registry::{ActiveDetection, Registration, Registry, RegistryKey};

/// Platform listener of one registration. Forwards samples to the registry, which drops
/// them once the registration is stopped or replaced.
struct DetectorRoute {
    registry: Registry,
    key: RegistryKey,
    id: Uuid,
}

impl SensorEventListener for DetectorRoute {
    fn on_sensor_changed(&self, sample: &SensorSample) {
        self.registry.route(&self.key, self.id, sample);
    }

    fn on_accuracy_changed(&self, sensor: &Sensor, accuracy: Accuracy) {
        debug!(
            "{} detector {}: {} accuracy changed to {:?}",
            self.key.kind,
            self.id,
            sensor.get_sensor_type(),
            accuracy
        );
    }
}

/// Gesture detection service.
///
/// Owns the registry of running detectors and the handle to the platform sensor service.
/// A detection is identified by its kind and its listener `Arc`; starting the same pair
/// again replaces the running detector.
pub struct Sensey {
    config: SenseyConfig,
    port: RwLock<Option<Arc<dyn SensorManagerPort>>>,
    registry: Registry,
}

impl Default for Sensey {
    fn default() -> Self {
        Self::new(SenseyConfig::default())
    }
}

impl Sensey {
    /// Creates an uninitialized service.
    pub fn new(config: SenseyConfig) -> Self {
        Sensey {
            config,
            port: RwLock::new(None),
            registry: Registry::new(),
        }
    }

    /// Attaches the platform sensor service. Re-initializing stops every detection
    /// subscribed to the previous platform.
    pub fn init(&self, port: Arc<dyn SensorManagerPort>) {
        // Held across drain and swap so no start can subscribe to the previous platform.
        let mut current = self
            .port
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = current.as_deref() {
            release_all(previous, self.registry.drain());
        }
        *current = Some(port);
        info!("Sensey initialized");
    }

    pub fn is_initialized(&self) -> bool {
        self.port
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    pub fn get_config(&self) -> &SenseyConfig {
        &self.config
    }

    // Start and stop keep this guard for their whole run, so `init` cannot swap the
    // platform under them.
    fn read_port(&self) -> RwLockReadGuard<'_, Option<Arc<dyn SensorManagerPort>>> {
        self.port
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn start_shake_detection(
        &self,
        config: Option<ShakeConfig>,
        listener: Arc<dyn ShakeListener>,
    ) -> Result<(), SenseyError> {
        self.start_detection(
            DetectorConfig::Shake(config.unwrap_or_default()),
            Callback::Shake(listener),
        )
    }

    pub fn stop_shake_detection<L>(&self, listener: &Arc<L>) -> Result<(), SenseyError>
    where
        L: ShakeListener + ?Sized,
    {
        self.stop_detection(RegistryKey::new(DetectionKind::Shake, ListenerKey::of(listener)))
    }

    pub fn start_flip_detection(&self, listener: Arc<dyn FlipListener>) -> Result<(), SenseyError> {
        self.start_detection(DetectorConfig::Flip, Callback::Flip(listener))
    }

    pub fn stop_flip_detection<L>(&self, listener: &Arc<L>) -> Result<(), SenseyError>
    where
        L: FlipListener + ?Sized,
    {
        self.stop_detection(RegistryKey::new(DetectionKind::Flip, ListenerKey::of(listener)))
    }

    pub fn start_orientation_detection(
        &self,
        config: Option<OrientationConfig>,
        listener: Arc<dyn OrientationListener>,
    ) -> Result<(), SenseyError> {
        self.start_detection(
            DetectorConfig::Orientation(config.unwrap_or_default()),
            Callback::Orientation(listener),
        )
    }

    pub fn stop_orientation_detection<L>(&self, listener: &Arc<L>) -> Result<(), SenseyError>
    where
        L: OrientationListener + ?Sized,
    {
        self.stop_detection(RegistryKey::new(
            DetectionKind::Orientation,
            ListenerKey::of(listener),
        ))
    }

    pub fn start_light_detection(
        &self,
        config: Option<LightConfig>,
        listener: Arc<dyn LightListener>,
    ) -> Result<(), SenseyError> {
        self.start_detection(
            DetectorConfig::Light(config.unwrap_or_default()),
            Callback::Light(listener),
        )
    }

    pub fn stop_light_detection<L>(&self, listener: &Arc<L>) -> Result<(), SenseyError>
    where
        L: LightListener + ?Sized,
    {
        self.stop_detection(RegistryKey::new(DetectionKind::Light, ListenerKey::of(listener)))
    }

    pub fn start_proximity_detection(
        &self,
        listener: Arc<dyn ProximityListener>,
    ) -> Result<(), SenseyError> {
        self.start_detection(DetectorConfig::Proximity, Callback::Proximity(listener))
    }

    pub fn stop_proximity_detection<L>(&self, listener: &Arc<L>) -> Result<(), SenseyError>
    where
        L: ProximityListener + ?Sized,
    {
        self.stop_detection(RegistryKey::new(
            DetectionKind::Proximity,
            ListenerKey::of(listener),
        ))
    }

    pub fn start_wave_detection(
        &self,
        config: Option<WaveConfig>,
        listener: Arc<dyn WaveListener>,
    ) -> Result<(), SenseyError> {
        self.start_detection(
            DetectorConfig::Wave(config.unwrap_or_default()),
            Callback::Wave(listener),
        )
    }

    pub fn stop_wave_detection<L>(&self, listener: &Arc<L>) -> Result<(), SenseyError>
    where
        L: WaveListener + ?Sized,
    {
        self.stop_detection(RegistryKey::new(DetectionKind::Wave, ListenerKey::of(listener)))
    }

    /// Stops every running detection.
    pub fn stop_all(&self) {
        let guard = self.read_port();
        let registrations = self.registry.drain();
        if registrations.is_empty() {
            return;
        }
        match guard.as_deref() {
            Some(port) => release_all(port, registrations),
            None => warn!("Dropped {} detections without a platform", registrations.len()),
        }
    }

    /// Snapshot of the detection running for `kind` and `listener`.
    pub fn active_detection<L: ?Sized>(
        &self,
        kind: DetectionKind,
        listener: &Arc<L>,
    ) -> Option<ActiveDetection> {
        self.registry
            .lookup(&RegistryKey::new(kind, ListenerKey::of(listener)))
    }

    /// Number of running detections.
    pub fn active_count(&self) -> usize {
        self.registry.len()
    }

    fn start_detection(&self, config: DetectorConfig, callback: Callback) -> Result<(), SenseyError> {
        let guard = self.read_port();
        let port = guard.as_deref().ok_or(SenseyError::NotInitialized)?;
        config.validate()?;

        let kind = config.kind();
        let sensors: Vec<Sensor> = kind
            .required_sensors()
            .into_iter()
            .filter_map(|sensor_type| {
                let sensor = port.get_default_sensor(sensor_type);
                if sensor.is_none() {
                    warn!("No {} sensor available, {} detection will not fire", sensor_type, kind);
                }
                sensor
            })
            .collect();

        let detector = build_detector(&config, &sensors);
        let registration = Registration::new(config, callback, detector)?;
        let (key, id) = (registration.key(), registration.id());

        if let Some(replaced) = self.registry.register(registration) {
            info!("Replacing {} detection {} with {}", kind, replaced.id(), id);
            release(port, &replaced);
        } else {
            info!("Started {} detection {}", kind, id);
        }

        let route: Arc<dyn SensorEventListener> = Arc::new(DetectorRoute {
            registry: self.registry.clone(),
            key,
            id,
        });
        let subscriptions: Vec<Uuid> = sensors
            .iter()
            .filter_map(|sensor| {
                match subscribe(port, route.clone(), sensor, &self.config) {
                    Ok(subscription) => Some(subscription),
                    Err(err) => {
                        error!("{} detection {}: {}", kind, id, err);
                        None
                    }
                }
            })
            .collect();

        // A concurrent stop may have removed the registration while subscribing.
        if !self.registry.attach_subscriptions(&key, id, &subscriptions) {
            for subscription in subscriptions {
                port.unregister_listener(subscription);
            }
        }
        Ok(())
    }

    fn stop_detection(&self, key: RegistryKey) -> Result<(), SenseyError> {
        let guard = self.read_port();
        let port = guard.as_deref().ok_or(SenseyError::NotInitialized)?;
        if let Some(registration) = self.registry.unregister(&key) {
            info!("Stopped {} detection {}", key.kind, registration.id());
            release(port, &registration);
        }
        Ok(())
    }
}

impl Drop for Sensey {
    fn drop(&mut self) {
        self.stop_all();
    }
}

fn subscribe(
    port: &dyn SensorManagerPort,
    route: Arc<dyn SensorEventListener>,
    sensor: &Sensor,
    config: &SenseyConfig,
) -> Result<Uuid, SenseyError> {
    port.register_listener(route, sensor, config.sampling_rate)
        .map_err(|err| SenseyError::Subscription(format!("{}: {}", sensor.get_sensor_type(), err)))
}

fn release_all(port: &dyn SensorManagerPort, registrations: Vec<Registration>) {
    if registrations.is_empty() {
        return;
    }
    info!("Stopping {} detections", registrations.len());
    for registration in registrations {
        release(port, &registration);
    }
}

fn release(port: &dyn SensorManagerPort, registration: &Registration) {
    for subscription in registration.subscriptions() {
        port.unregister_listener(*subscription);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::Listener;
    use publisher::SensorHub;
    use sensor_common::{SamplingRate, SensorType};
    use std::sync::Mutex;

    /// Platform that reports every sensor but refuses all subscriptions.
    struct RefusingPort;

    impl SensorManagerPort for RefusingPort {
        fn get_default_sensor(&self, sensor_type: SensorType) -> Option<Sensor> {
            Some(Sensor::new(sensor_type, "refusing", 10.0))
        }

        fn register_listener(
            &self,
            _listener: Arc<dyn SensorEventListener>,
            _sensor: &Sensor,
            _rate: SamplingRate,
        ) -> Result<Uuid, String> {
            Err("permission denied".to_string())
        }

        fn unregister_listener(&self, _id: Uuid) {}
    }

    fn full_hub() -> Arc<SensorHub> {
        Arc::new(SensorHub::with_sensors(
            SensorType::ALL
                .iter()
                .map(|sensor_type| Sensor::new(*sensor_type, "test", 5.0))
                .collect(),
        ))
    }

    fn silent_listener() -> Arc<Listener> {
        Arc::new(Listener::new(|_event| {}))
    }

    #[test]
    fn test_not_initialized() {
        let sensey = Sensey::default();
        let listener = silent_listener();

        assert!(!sensey.is_initialized());
        assert_eq!(
            sensey.start_flip_detection(listener.clone()),
            Err(SenseyError::NotInitialized)
        );
        assert_eq!(
            sensey.stop_flip_detection(&listener),
            Err(SenseyError::NotInitialized)
        );
    }

    #[test]
    fn test_refused_subscription_degrades() {
        let sensey = Sensey::default();
        sensey.init(Arc::new(RefusingPort));
        let listener = silent_listener();

        assert!(sensey.start_light_detection(None, listener.clone()).is_ok());

        let active = sensey
            .active_detection(DetectionKind::Light, &listener)
            .unwrap();
        assert!(active.subscriptions.is_empty());
        assert!(sensey.stop_light_detection(&listener).is_ok());
    }

    #[test]
    fn test_sampling_rate_is_forwarded() {
        let hub = full_hub();
        let sensey = Sensey::new(SenseyConfig {
            sampling_rate: SamplingRate::Game,
        });
        sensey.init(hub.clone());
        let listener = silent_listener();

        sensey.start_proximity_detection(listener.clone()).unwrap();

        let active = sensey
            .active_detection(DetectionKind::Proximity, &listener)
            .unwrap();
        assert_eq!(active.subscriptions.len(), 1);
        assert_eq!(
            hub.get_sampling_rate(active.subscriptions[0]),
            Some(SamplingRate::Game)
        );
    }

    #[test]
    fn test_reinit_releases_previous_platform() {
        let first = full_hub();
        let second = full_hub();
        let sensey = Sensey::default();
        let listener = silent_listener();

        sensey.init(first.clone());
        sensey.start_shake_detection(None, listener.clone()).unwrap();
        assert_eq!(first.listener_count(SensorType::Accelerometer), 1);

        sensey.init(second.clone());

        assert_eq!(first.total_listeners(), 0);
        assert_eq!(sensey.active_count(), 0);
    }

    #[test]
    fn test_drop_stops_everything() {
        let hub = full_hub();
        let listener = silent_listener();
        {
            let sensey = Sensey::default();
            sensey.init(hub.clone());
            sensey.start_orientation_detection(None, listener.clone()).unwrap();
            sensey.start_wave_detection(None, listener.clone()).unwrap();
            assert_eq!(hub.total_listeners(), 3);
        }
        assert_eq!(hub.total_listeners(), 0);
    }

    #[test]
    fn test_routes_only_samples_of_the_live_registration() {
        let hub = full_hub();
        let sensey = Sensey::default();
        sensey.init(hub.clone());
        let events = Arc::new(Mutex::new(Vec::new()));
        let listener = {
            let events = events.clone();
            Arc::new(Listener::new(move |event| events.lock().unwrap().push(event)))
        };

        sensey
            .start_light_detection(Some(LightConfig::new(3.0)), listener.clone())
            .unwrap();
        hub.publish(SensorSample::new(SensorType::Light, 0.0, &[1.0]).unwrap());
        sensey.stop_light_detection(&listener).unwrap();
        hub.publish(SensorSample::new(SensorType::Light, 0.1, &[100.0]).unwrap());

        assert_eq!(events.lock().unwrap().len(), 1);
    }
}
