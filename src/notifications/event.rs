//! Event types for the notification system

use crate::scanner::types::{ScanProgress, ScanState};
use std::time::SystemTime;
use strum_macros::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum ScanEventType {
    Started,
    Progress,
    Completed,
    Error,
}

/// Lifecycle or progress notice from one scan
#[derive(Clone, Debug)]
pub struct ScanEvent {
    pub event_type: ScanEventType,
    pub timestamp: SystemTime,
    pub scan_id: String,
    pub state: ScanState,
    pub progress: Option<ScanProgress>,
    pub message: Option<String>,
}

impl ScanEvent {
    pub fn new(event_type: ScanEventType, scan_id: String, state: ScanState) -> Self {
        Self {
            event_type,
            timestamp: SystemTime::now(),
            scan_id,
            state,
            progress: None,
            message: None,
        }
    }

    pub fn with_progress(mut self, progress: ScanProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
