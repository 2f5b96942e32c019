use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::status::{AdapterStatus, StatusEvent};

type Subscriber = Arc<dyn Fn(&StatusEvent) + Send + Sync>;

/// Routes adapter status events to the callbacks registered for them.
#[derive(Default)]
pub struct StatusPublisher {
    subscribers: RwLock<HashMap<AdapterStatus, Vec<Subscriber>>>,
}

impl StatusPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, status: AdapterStatus, callback: F)
    where
        F: Fn(&StatusEvent) + Send + Sync + 'static,
    {
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(status)
            .or_default()
            .push(Arc::new(callback));
    }

    /// Calls every subscriber of `status` in registration order and returns how
    /// many were notified. Subscribers added while publishing only see later events.
    pub fn publish(&self, status: AdapterStatus, event: &StatusEvent) -> usize {
        let callbacks = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&status)
            .cloned()
            .unwrap_or_default();

        for callback in &callbacks {
            callback(event);
        }
        callbacks.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn delivers_to_matching_subscribers_in_order() {
        let publisher = StatusPublisher::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for label in ["first", "second"] {
            let seen = Arc::clone(&seen);
            publisher.subscribe(AdapterStatus::Online, move |event| {
                seen.lock().unwrap().push(format!("{label}:{}", event.id));
            });
        }
        let offline_seen = Arc::clone(&seen);
        publisher.subscribe(AdapterStatus::Offline, move |event| {
            offline_seen.lock().unwrap().push(format!("offline:{}", event.id));
        });

        let delivered = publisher.publish(
            AdapterStatus::Online,
            &StatusEvent {
                id: "snow-1".to_string(),
            },
        );

        assert_eq!(delivered, 2);
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["first:snow-1".to_string(), "second:snow-1".to_string()]
        );
    }

    #[test]
    fn subscribers_may_subscribe_while_publishing() {
        let publisher = Arc::new(StatusPublisher::new());
        let offline_calls = Arc::new(Mutex::new(Vec::new()));

        let inner = Arc::clone(&publisher);
        let calls = Arc::clone(&offline_calls);
        publisher.subscribe(AdapterStatus::Online, move |_| {
            let calls = Arc::clone(&calls);
            inner.subscribe(AdapterStatus::Offline, move |event| {
                calls.lock().unwrap().push(event.id.clone());
            });
        });

        let event = StatusEvent {
            id: "snow-1".to_string(),
        };
        assert_eq!(publisher.publish(AdapterStatus::Online, &event), 1);
        assert_eq!(publisher.publish(AdapterStatus::Offline, &event), 1);
        assert_eq!(*offline_calls.lock().unwrap(), vec!["snow-1".to_string()]);
    }

    #[test]
    fn subscribers_added_during_publish_wait_for_the_next_event() {
        let publisher = Arc::new(StatusPublisher::new());
        let inner = Arc::clone(&publisher);
        publisher.subscribe(AdapterStatus::Online, move |_| {
            inner.subscribe(AdapterStatus::Online, |_| {});
        });

        let event = StatusEvent {
            id: "snow-1".to_string(),
        };
        assert_eq!(publisher.publish(AdapterStatus::Online, &event), 1);
        assert_eq!(publisher.publish(AdapterStatus::Online, &event), 2);
    }

    #[test]
    fn publishing_without_subscribers_is_a_no_op() {
        let publisher = StatusPublisher::new();
        let delivered = publisher.publish(
            AdapterStatus::Offline,
            &StatusEvent {
                id: "snow-1".to_string(),
            },
        );
        assert_eq!(delivered, 0);
    }
}
