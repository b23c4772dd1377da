use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Listener callback. Receives the id it was registered with and the published data.
pub type Callback<T> = Arc<dyn Fn(Uuid, Arc<T>) + Send + Sync>;

pub trait Publishable<T> {
    fn register_listener(&self, callback: Callback<T>) -> Uuid;
    fn register_listener_with_id(&self, id: Uuid, callback: Callback<T>);
    fn unregister_listener(&self, listener_id: Uuid) -> bool;
    fn unregister_all(&self) -> Vec<Uuid>;
    /// Calls every listener in turn, on the calling thread. Returns how many were called.
    fn notify_listeners(&self, data: Arc<T>) -> usize;
}

/// Record of registered listeners that will be notified of updates
pub struct Publisher<T> {
    listeners: Arc<DashMap<Uuid, Callback<T>>>,
}

// Clones share the listener set, so `T` needs no `Clone` bound.
impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: self.listeners.clone(),
        }
    }
}

impl<T> Default for Publisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Publisher<T> {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(DashMap::new()),
        }
    }

    pub fn contains(&self, listener_id: &Uuid) -> bool {
        self.listeners.contains_key(listener_id)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<T> Publishable<T> for Publisher<T>
where
    T: Send + Sync + 'static,
{
    fn register_listener(&self, callback: Callback<T>) -> Uuid {
        let listener_id = Uuid::new_v4();
        self.register_listener_with_id(listener_id, callback);
        listener_id
    }

    fn register_listener_with_id(&self, id: Uuid, callback: Callback<T>) {
        self.listeners.insert(id, callback);
    }

    fn unregister_listener(&self, listener_id: Uuid) -> bool {
        self.listeners.remove(&listener_id).is_some()
    }

    fn unregister_all(&self) -> Vec<Uuid> {
        let ids: Vec<Uuid> = self.listeners.iter().map(|entry| *entry.key()).collect();
        self.listeners.clear();
        ids
    }

    fn notify_listeners(&self, data: Arc<T>) -> usize {
        // Snapshot first: listeners may (un)register from inside their callback.
        let listeners: Vec<(Uuid, Callback<T>)> = self
            .listeners
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        for (id, callback) in listeners.iter() {
            callback(*id, data.clone());
        }
        listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Payload without a `Clone` impl.
    struct Reading(f64);

    #[test]
    fn test_clone_shares_listeners_without_clone_payload() {
        let publisher = Publisher::<Reading>::new();
        let copy = publisher.clone();
        let seen = Arc::new(Mutex::new(0.0));
        let id = {
            let seen = seen.clone();
            copy.register_listener(Arc::new(move |_id: Uuid, reading: Arc<Reading>| {
                *seen.lock().unwrap() = reading.0;
            }))
        };

        assert!(publisher.contains(&id));
        assert_eq!(publisher.notify_listeners(Arc::new(Reading(2.5))), 1);
        assert_eq!(*seen.lock().unwrap(), 2.5);
    }

    struct TestHandler {
        data: Arc<Mutex<i32>>,
    }

    impl TestHandler {
        fn new() -> Self {
            Self {
                data: Arc::new(Mutex::new(0)),
            }
        }

        fn handle(&self, _id: Uuid, value: Arc<i32>) {
            let mut data = self.data.lock().unwrap();
            *data += *value;
        }
    }

    fn listener_for(handler: &Arc<TestHandler>) -> Callback<i32> {
        let handler = handler.clone();
        Arc::new(move |id: Uuid, value: Arc<i32>| handler.handle(id, value))
    }

    #[test]
    fn test_register_and_notify_listener() {
        let publisher = Publisher::new();
        let handler = Arc::new(TestHandler::new());

        let _listener_id = publisher.register_listener(listener_for(&handler));
        assert_eq!(publisher.notify_listeners(Arc::new(42)), 1);

        assert_eq!(*handler.data.lock().unwrap(), 42);
    }

    #[test]
    fn test_notify_every_listener() {
        let publisher = Publisher::new();
        let handler = Arc::new(TestHandler::new());

        publisher.register_listener(listener_for(&handler));
        publisher.register_listener(listener_for(&handler));
        assert_eq!(publisher.len(), 2);
        assert_eq!(publisher.notify_listeners(Arc::new(5)), 2);

        assert_eq!(*handler.data.lock().unwrap(), 10);
    }

    #[test]
    fn test_unregister_listener() {
        let publisher = Publisher::new();
        let handler = Arc::new(TestHandler::new());

        let listener_id = publisher.register_listener(listener_for(&handler));
        assert!(publisher.contains(&listener_id));
        assert!(publisher.unregister_listener(listener_id));
        assert!(!publisher.unregister_listener(listener_id));
        assert_eq!(publisher.notify_listeners(Arc::new(100)), 0);

        // Should remain unchanged since listener was removed
        assert_eq!(*handler.data.lock().unwrap(), 0);
    }

    #[test]
    fn test_unregister_all_returns_ids() {
        let publisher = Publisher::new();
        let handler = Arc::new(TestHandler::new());

        let id1 = publisher.register_listener(listener_for(&handler));
        let id2 = publisher.register_listener(listener_for(&handler));
        let mut removed = publisher.unregister_all();
        removed.sort();
        let mut expected = vec![id1, id2];
        expected.sort();

        assert_eq!(removed, expected);
        assert!(publisher.is_empty());
    }

    #[test]
    fn test_listener_can_unregister_itself_while_notified() {
        let publisher = Arc::new(Publisher::<i32>::new());
        let calls = Arc::new(Mutex::new(0));

        let callback: Callback<i32> = {
            let publisher = Arc::downgrade(&publisher);
            let calls = calls.clone();
            Arc::new(move |id: Uuid, _value: Arc<i32>| {
                *calls.lock().unwrap() += 1;
                if let Some(publisher) = publisher.upgrade() {
                    publisher.unregister_listener(id);
                }
            })
        };
        publisher.register_listener(callback);

        publisher.notify_listeners(Arc::new(1));
        publisher.notify_listeners(Arc::new(1));

        assert_eq!(*calls.lock().unwrap(), 1);
        assert!(publisher.is_empty());
    }
}
