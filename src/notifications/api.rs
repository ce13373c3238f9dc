//! Public API for the notification system
//!
//! External modules should import from here rather than directly from
//! internal modules. There is no global service: each `ScannerManager` owns
//! its notification manager and hands out subscriptions.

pub use crate::notifications::error::NotificationError;
pub use crate::notifications::event::{ScanEvent, ScanEventType};
pub use crate::notifications::manager::{AsyncNotificationManager, EventReceiver};
