use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, warn};
use uuid::Uuid;

use sensor_common::SensorSample;

use crate::config::DetectorConfig;
use crate::detectors::{DetectionKind, Detector};
use crate::errors::SenseyError;
use crate::listeners::{Callback, ListenerKey};

/// Registry key: one live detector per listener and kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegistryKey {
    pub kind: DetectionKind,
    pub listener: ListenerKey,
}

impl RegistryKey {
    pub fn new(kind: DetectionKind, listener: ListenerKey) -> Self {
        Self { kind, listener }
    }
}

/// A live detector together with its listener and platform subscriptions.
pub struct Registration {
    id: Uuid,
    config: DetectorConfig,
    callback: Callback,
    detector: Box<dyn Detector>,
    subscriptions: Vec<Uuid>,
}

impl Registration {
    /// Fails if `config`, `callback` and `detector` are not all of the same kind.
    pub fn new(
        config: DetectorConfig,
        callback: Callback,
        detector: Box<dyn Detector>,
    ) -> Result<Self, SenseyError> {
        let kind = detector.kind();
        if config.kind() != kind || callback.kind() != kind {
            return Err(SenseyError::InvalidConfig(format!(
                "{} detector registered with {} config and {} listener",
                kind,
                config.kind(),
                callback.kind()
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            config,
            callback,
            detector,
            subscriptions: vec![],
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> DetectionKind {
        self.detector.kind()
    }

    pub fn key(&self) -> RegistryKey {
        RegistryKey::new(self.kind(), self.callback.key())
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn subscriptions(&self) -> &[Uuid] {
        &self.subscriptions
    }

    fn snapshot(&self) -> ActiveDetection {
        ActiveDetection {
            id: self.id,
            kind: self.kind(),
            config: self.config.clone(),
            subscriptions: self.subscriptions.clone(),
        }
    }
}

/// Read-only view of a registration.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveDetection {
    pub id: Uuid,
    pub kind: DetectionKind,
    pub config: DetectorConfig,
    /// Platform subscription ids held by the detector.
    pub subscriptions: Vec<Uuid>,
}

/// Listener to detector map. Every operation, sample routing included, runs under the same
/// lock, so a registration is either fully present or fully gone for a concurrent reader.
#[derive(Clone, Default)]
pub struct Registry {
    entries: Arc<Mutex<HashMap<RegistryKey, Registration>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<RegistryKey, Registration>> {
        // A panicking listener never runs under this lock, so the map is consistent even
        // if the mutex was poisoned.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Inserts `registration`, replacing and returning any registration for the same
    /// listener and kind.
    pub fn register(&self, registration: Registration) -> Option<Registration> {
        let key = registration.key();
        self.lock().insert(key, registration)
    }

    /// Removes and returns the registration for `key`, if any.
    pub fn unregister(&self, key: &RegistryKey) -> Option<Registration> {
        self.lock().remove(key)
    }

    pub fn lookup(&self, key: &RegistryKey) -> Option<ActiveDetection> {
        self.lock().get(key).map(|registration| registration.snapshot())
    }

    /// Records the platform subscriptions of registration `id`. Returns false when that
    /// registration is no longer present, in which case the caller owns the subscriptions.
    pub fn attach_subscriptions(&self, key: &RegistryKey, id: Uuid, subscriptions: &[Uuid]) -> bool {
        match self.lock().get_mut(key) {
            Some(registration) if registration.id == id => {
                registration.subscriptions.extend_from_slice(subscriptions);
                true
            }
            _ => false,
        }
    }

    /// Feeds `sample` to the detector of registration `id` and notifies its listener of the
    /// resulting event. The listener runs after the lock is released.
    pub fn route(&self, key: &RegistryKey, id: Uuid, sample: &SensorSample) {
        let notification = {
            let mut entries = self.lock();
            let Some(registration) = entries.get_mut(key) else {
                return;
            };
            if registration.id != id {
                return;
            }
            registration
                .detector
                .on_sample(sample)
                .map(|event| (event, registration.callback.clone()))
        };

        if let Some((event, callback)) = notification {
            debug!("{} detector {} emitted {:?}", key.kind, id, event);
            if !callback.dispatch(event) {
                warn!("{} listener cannot handle {:?}", callback.kind(), event);
            }
        }
    }

    /// Removes every registration.
    pub fn drain(&self) -> Vec<Registration> {
        self.lock().drain().map(|(_, registration)| registration).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
