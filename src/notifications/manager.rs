//! AsyncNotificationManager implementation

use crate::notifications::error::NotificationError;
use crate::notifications::event::ScanEvent;
use std::collections::HashMap;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

pub type EventReceiver = UnboundedReceiver<ScanEvent>;

struct SubscriberInfo {
    source: String,
    sender: UnboundedSender<ScanEvent>,
}

/// Fan-out of scan events to subscribers
///
/// Subscribers whose receiver has been dropped are removed on the next
/// publish.
#[derive(Default)]
pub struct AsyncNotificationManager {
    subscribers: HashMap<String, SubscriberInfo>,
}

impl AsyncNotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber_id: String, source: String) -> EventReceiver {
        let (sender, receiver) = unbounded_channel();

        let info = SubscriberInfo {
            source: source.clone(),
            sender,
        };

        if let Some(existing) = self.subscribers.insert(subscriber_id.clone(), info) {
            log::warn!(
                "Subscriber '{}' replaced existing subscription (source: {} -> {})",
                subscriber_id,
                existing.source,
                source
            );
        } else {
            log::trace!("Subscriber '{}' registered ({})", subscriber_id, source);
        }

        receiver
    }

    pub async fn publish(&mut self, event: ScanEvent) -> Result<(), NotificationError> {
        let mut failed_subscribers = Vec::new();

        for (subscriber_id, info) in &self.subscribers {
            if info.sender.send(event.clone()).is_err() {
                failed_subscribers.push(subscriber_id.clone());
            }
        }

        for subscriber_id in &failed_subscribers {
            self.subscribers.remove(subscriber_id);
        }

        if failed_subscribers.is_empty() {
            Ok(())
        } else {
            Err(NotificationError::PublishFailed {
                event_type: event.event_type,
                failed_subscribers,
            })
        }
    }
}
