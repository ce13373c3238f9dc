//! Progress spinner for terminal feedback
//!
//! Driven by scan events: `Started` sets the label, `Progress` updates the
//! `completed/total` counter, `Completed`/`Error` clear the line and stop.

use crate::notifications::api::{EventReceiver, ScanEvent, ScanEventType};
use crate::scanner::api::ScanProgress;
use std::io::Write;
use thiserror::Error;
use tokio::time::{interval, Duration};

/// Module-local result type for spinner operations
type Result<T> = std::result::Result<T, SpinnerError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpinnerError {
    /// Writing to stderr failed
    #[error("Failed to draw progress: {reason}")]
    Output { reason: String },
}

impl From<std::io::Error> for SpinnerError {
    fn from(error: std::io::Error) -> Self {
        SpinnerError::Output {
            reason: error.to_string(),
        }
    }
}

const BRAILLE_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Spinner only draws on an interactive stderr, and not over info logs
pub fn should_show_spinner() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr()) && !log::log_enabled!(log::Level::Info)
}

pub struct ProgressSpinner {
    frame_index: usize,
    label: String,
    progress: Option<ScanProgress>,
}

impl Default for ProgressSpinner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSpinner {
    pub fn new() -> Self {
        Self {
            frame_index: 0,
            label: String::new(),
            progress: None,
        }
    }

    /// Current line, without the carriage return
    pub fn line(&self) -> String {
        let frame = BRAILLE_FRAMES[self.frame_index];
        let mut line = format!("{frame}");
        if !self.label.is_empty() {
            line.push(' ');
            line.push_str(&self.label);
        }
        if let Some(progress) = self.progress {
            line.push_str(&format!(" {progress}"));
        }
        line
    }

    pub fn apply(&mut self, event: &ScanEvent) {
        if event.event_type == ScanEventType::Started {
            if let Some(message) = &event.message {
                self.label = message.clone();
            }
        }
        if let Some(progress) = event.progress {
            self.progress = Some(progress);
        }
    }

    pub fn tick(&mut self) -> Result<()> {
        self.frame_index = (self.frame_index + 1) % BRAILLE_FRAMES.len();
        let mut stderr = std::io::stderr();
        write!(stderr, "\r\x1b[2K{}", self.line())?;
        stderr.flush()?;
        Ok(())
    }

    pub fn finish(&self) -> Result<()> {
        let mut stderr = std::io::stderr();
        write!(stderr, "\r\x1b[2K")?;
        stderr.flush()?;
        Ok(())
    }
}

/// Run the spinner until the scan ends or shutdown is signalled
pub async fn run_spinner(
    mut event_receiver: EventReceiver,
    mut shutdown_rx: tokio::sync::broadcast::Receiver<()>,
) -> Result<()> {
    if !should_show_spinner() {
        return Ok(());
    }

    let mut spinner = ProgressSpinner::new();
    let mut update_interval = interval(Duration::from_millis(100));

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => {
                return spinner.finish();
            }

            event = event_receiver.recv() => {
                match event {
                    Some(scan) => match scan.event_type {
                        ScanEventType::Completed | ScanEventType::Error => return spinner.finish(),
                        _ => spinner.apply(&scan),
                    },
                    None => return spinner.finish(),
                }
            }

            _ = update_interval.tick() => {
                spinner.tick()?;
            }
        }
    }
}
