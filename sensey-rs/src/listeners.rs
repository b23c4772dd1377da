//! Application side callbacks.
//!
//! Each detection kind has its own listener trait. Listeners are handed over as
//! `Arc<dyn …Listener>` and identified by the address of that allocation: starting and
//! stopping detection must use clones of the same `Arc`.

use std::sync::Arc;

use crate::detectors::{DetectionEvent, DetectionKind, OrientationBucket};

pub trait ShakeListener: Send + Sync {
    fn on_shake_detected(&self);
    fn on_shake_stopped(&self);
}

pub trait FlipListener: Send + Sync {
    fn on_face_up(&self);
    fn on_face_down(&self);
}

pub trait OrientationListener: Send + Sync {
    fn on_top_side_up(&self);
    fn on_bottom_side_up(&self);
    fn on_right_side_up(&self);
    fn on_left_side_up(&self);
}

pub trait LightListener: Send + Sync {
    fn on_dark(&self);
    fn on_light(&self);
}

pub trait ProximityListener: Send + Sync {
    fn on_near(&self);
    fn on_far(&self);
}

pub trait WaveListener: Send + Sync {
    fn on_wave(&self);
}

/// Identity of a listener: the address of its `Arc` allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerKey(usize);

impl ListenerKey {
    pub fn of<L: ?Sized>(listener: &Arc<L>) -> Self {
        Self(Arc::as_ptr(listener) as *const () as usize)
    }
}

/// Listener of one kind, as stored by the registry.
#[derive(Clone)]
pub enum Callback {
    Shake(Arc<dyn ShakeListener>),
    Flip(Arc<dyn FlipListener>),
    Orientation(Arc<dyn OrientationListener>),
    Light(Arc<dyn LightListener>),
    Proximity(Arc<dyn ProximityListener>),
    Wave(Arc<dyn WaveListener>),
}

impl Callback {
    pub fn kind(&self) -> DetectionKind {
        match self {
            Callback::Shake(_) => DetectionKind::Shake,
            Callback::Flip(_) => DetectionKind::Flip,
            Callback::Orientation(_) => DetectionKind::Orientation,
            Callback::Light(_) => DetectionKind::Light,
            Callback::Proximity(_) => DetectionKind::Proximity,
            Callback::Wave(_) => DetectionKind::Wave,
        }
    }

    pub fn key(&self) -> ListenerKey {
        match self {
            Callback::Shake(listener) => ListenerKey::of(listener),
            Callback::Flip(listener) => ListenerKey::of(listener),
            Callback::Orientation(listener) => ListenerKey::of(listener),
            Callback::Light(listener) => ListenerKey::of(listener),
            Callback::Proximity(listener) => ListenerKey::of(listener),
            Callback::Wave(listener) => ListenerKey::of(listener),
        }
    }

    /// Calls the listener method matching `event`. Returns false if the event belongs to
    /// another kind.
    pub fn dispatch(&self, event: DetectionEvent) -> bool {
        match (self, event) {
            (Callback::Shake(l), DetectionEvent::ShakeDetected) => l.on_shake_detected(),
            (Callback::Shake(l), DetectionEvent::ShakeStopped) => l.on_shake_stopped(),
            (Callback::Flip(l), DetectionEvent::FaceUp) => l.on_face_up(),
            (Callback::Flip(l), DetectionEvent::FaceDown) => l.on_face_down(),
            (Callback::Orientation(l), DetectionEvent::Orientation(bucket)) => match bucket {
                OrientationBucket::TopSideUp => l.on_top_side_up(),
                OrientationBucket::BottomSideUp => l.on_bottom_side_up(),
                OrientationBucket::RightSideUp => l.on_right_side_up(),
                OrientationBucket::LeftSideUp => l.on_left_side_up(),
            },
            (Callback::Light(l), DetectionEvent::Dark) => l.on_dark(),
            (Callback::Light(l), DetectionEvent::Light) => l.on_light(),
            (Callback::Proximity(l), DetectionEvent::Near) => l.on_near(),
            (Callback::Proximity(l), DetectionEvent::Far) => l.on_far(),
            (Callback::Wave(l), DetectionEvent::Wave) => l.on_wave(),
            _ => return false,
        }
        true
    }
}

/// Listener of every kind that forwards each event to a closure.
///
/// ```
/// use std::sync::{mpsc, Arc};
/// use sensey_rs::listeners::{Listener, LightListener};
/// use sensey_rs::DetectionEvent;
///
/// let (tx, rx) = mpsc::channel();
/// let tx = std::sync::Mutex::new(tx);
/// let listener = Arc::new(Listener::new(move |event| {
///     let _ = tx.lock().unwrap().send(event);
/// }));
/// listener.on_dark();
/// assert_eq!(rx.recv().unwrap(), DetectionEvent::Dark);
/// ```
#[derive(Clone)]
pub struct Listener {
    callback: Arc<dyn Fn(DetectionEvent) + Send + Sync>,
}

impl Listener {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(DetectionEvent) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    fn emit(&self, event: DetectionEvent) {
        (self.callback)(event)
    }
}

impl ShakeListener for Listener {
    fn on_shake_detected(&self) {
        self.emit(DetectionEvent::ShakeDetected)
    }
    fn on_shake_stopped(&self) {
        self.emit(DetectionEvent::ShakeStopped)
    }
}

impl FlipListener for Listener {
    fn on_face_up(&self) {
        self.emit(DetectionEvent::FaceUp)
    }
    fn on_face_down(&self) {
        self.emit(DetectionEvent::FaceDown)
    }
}

impl OrientationListener for Listener {
    fn on_top_side_up(&self) {
        self.emit(DetectionEvent::Orientation(OrientationBucket::TopSideUp))
    }
    fn on_bottom_side_up(&self) {
        self.emit(DetectionEvent::Orientation(OrientationBucket::BottomSideUp))
    }
    fn on_right_side_up(&self) {
        self.emit(DetectionEvent::Orientation(OrientationBucket::RightSideUp))
    }
    fn on_left_side_up(&self) {
        self.emit(DetectionEvent::Orientation(OrientationBucket::LeftSideUp))
    }
}

impl LightListener for Listener {
    fn on_dark(&self) {
        self.emit(DetectionEvent::Dark)
    }
    fn on_light(&self) {
        self.emit(DetectionEvent::Light)
    }
}

impl ProximityListener for Listener {
    fn on_near(&self) {
        self.emit(DetectionEvent::Near)
    }
    fn on_far(&self) {
        self.emit(DetectionEvent::Far)
    }
}

impl WaveListener for Listener {
    fn on_wave(&self) {
        self.emit(DetectionEvent::Wave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording() -> (Arc<Listener>, Arc<Mutex<Vec<DetectionEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let listener = {
            let events = events.clone();
            Arc::new(Listener::new(move |event| events.lock().unwrap().push(event)))
        };
        (listener, events)
    }

    #[test]
    fn test_key_follows_allocation_not_value() {
        let (a, _) = recording();
        let b = Arc::new(a.as_ref().clone());
        let a_dyn: Arc<dyn LightListener> = a.clone();

        assert_eq!(ListenerKey::of(&a), ListenerKey::of(&a.clone()));
        assert_eq!(ListenerKey::of(&a), ListenerKey::of(&a_dyn));
        assert_ne!(ListenerKey::of(&a), ListenerKey::of(&b));
    }

    #[test]
    fn test_dispatch_matching_event() {
        let (listener, events) = recording();
        let callback = Callback::Orientation(listener);

        assert!(callback.dispatch(DetectionEvent::Orientation(OrientationBucket::LeftSideUp)));
        assert_eq!(
            *events.lock().unwrap(),
            vec![DetectionEvent::Orientation(OrientationBucket::LeftSideUp)]
        );
    }

    #[test]
    fn test_dispatch_rejects_foreign_event() {
        let (listener, events) = recording();
        let callback = Callback::Light(listener);

        assert!(!callback.dispatch(DetectionEvent::Near));
        assert!(events.lock().unwrap().is_empty());
        assert_eq!(callback.kind(), DetectionKind::Light);
    }

    #[test]
    fn test_same_object_has_same_key_for_every_kind() {
        let (listener, _) = recording();
        let shake = Callback::Shake(listener.clone());
        let wave = Callback::Wave(listener.clone());
        assert_eq!(shake.key(), wave.key());
        assert_eq!(shake.key(), ListenerKey::of(&listener));
    }
}
