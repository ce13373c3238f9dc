//! Error types for the notification system

use crate::notifications::event::ScanEventType;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Failed to publish {event_type} event to {} subscribers: {failed_subscribers:?}", .failed_subscribers.len())]
    PublishFailed {
        event_type: ScanEventType,
        failed_subscribers: Vec<String>,
    },
}
