//! Append-only analytics event log.
//!
//! - [`EventSink`] is the storage seam (file-backed in the app, in-memory in tests).
//! - [`EventLogger`] never lets a storage failure reach the caller; failures go to `tracing`.

use std::{
    fmt, io,
    sync::{Arc, Mutex},
};

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{AnalyticsEvent, LoggedEvent};

#[derive(Debug, Error)]
pub enum EventLogError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error("event log lock poisoned")]
    Poisoned,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

pub trait EventSink: Send + Sync {
    fn append(&self, event: &LoggedEvent) -> Result<(), EventLogError>;
    fn read_all(&self) -> Result<Vec<LoggedEvent>, EventLogError>;
    fn clear(&self) -> Result<(), EventLogError>;
}

#[derive(Debug, Default)]
pub struct MemoryEventLog {
    events: Mutex<Vec<LoggedEvent>>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for MemoryEventLog {
    fn append(&self, event: &LoggedEvent) -> Result<(), EventLogError> {
        self.events
            .lock()
            .map_err(|_| EventLogError::Poisoned)?
            .push(event.clone());
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<LoggedEvent>, EventLogError> {
        Ok(self
            .events
            .lock()
            .map_err(|_| EventLogError::Poisoned)?
            .clone())
    }

    fn clear(&self) -> Result<(), EventLogError> {
        self.events
            .lock()
            .map_err(|_| EventLogError::Poisoned)?
            .clear();
        Ok(())
    }
}

/// Cheap-to-clone handle the state coordinator records events through.
#[derive(Clone)]
pub struct EventLogger {
    sink: Arc<dyn EventSink>,
    echo: bool,
}

impl EventLogger {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink, echo: false }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryEventLog::new()))
    }

    /// Mirror every recorded event to the debug log.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn log(&self, event: AnalyticsEvent) {
        let entry = LoggedEvent::now(event);
        if let Err(err) = self.sink.append(&entry) {
            warn!(event = entry.name(), "Failed to log event: {err}");
            return;
        }
        if self.echo {
            debug!(target: "analytics", event = entry.name(), params = ?entry.event);
        }
    }

    /// Everything recorded so far, oldest first. Empty when the log cannot be read.
    pub fn events(&self) -> Vec<LoggedEvent> {
        self.sink.read_all().unwrap_or_else(|err| {
            warn!("Failed to retrieve events: {err}");
            Vec::new()
        })
    }

    pub fn clear(&self) {
        if let Err(err) = self.sink.clear() {
            warn!("Failed to clear events: {err}");
        }
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl fmt::Debug for EventLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLogger")
            .field("echo", &self.echo)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenSink;

    impl EventSink for BrokenSink {
        fn append(&self, _event: &LoggedEvent) -> Result<(), EventLogError> {
            Err(EventLogError::StorageUnavailable)
        }

        fn read_all(&self) -> Result<Vec<LoggedEvent>, EventLogError> {
            Err(EventLogError::StorageUnavailable)
        }

        fn clear(&self) -> Result<(), EventLogError> {
            Err(EventLogError::StorageUnavailable)
        }
    }

    #[test]
    fn records_events_in_order() {
        let logger = EventLogger::in_memory();
        logger.log(AnalyticsEvent::ViewList { count: 5 });
        logger.log(AnalyticsEvent::FilterChange {
            amount: 1000.0,
            period: 12,
            tags: None,
        });
        logger.log(AnalyticsEvent::CtaClick {
            offer_id: "123".to_string(),
            offer_name: "Test".to_string(),
            apr: 15.5,
        });

        let names: Vec<_> = logger.events().iter().map(LoggedEvent::name).collect();
        assert_eq!(names, ["view_list", "filter_change", "cta_click"]);
        assert_eq!(
            logger.events()[0].event,
            AnalyticsEvent::ViewList { count: 5 }
        );
    }

    #[test]
    fn clear_empties_the_log() {
        let logger = EventLogger::in_memory();
        logger.log(AnalyticsEvent::ViewList { count: 5 });
        logger.clear();
        assert!(logger.events().is_empty());
    }

    #[test]
    fn repeated_reads_are_identical() {
        let logger = EventLogger::in_memory();
        logger.log(AnalyticsEvent::ViewList { count: 5 });
        assert_eq!(logger.events(), logger.events());
    }

    #[test]
    fn clones_share_the_same_sink() {
        let logger = EventLogger::in_memory();
        let clone = logger.clone().with_echo(true);
        clone.log(AnalyticsEvent::ViewList { count: 1 });
        assert_eq!(logger.events().len(), 1);
    }

    #[test]
    fn sink_failures_are_swallowed() {
        let logger = EventLogger::new(Arc::new(BrokenSink));
        logger.log(AnalyticsEvent::ViewList { count: 3 });
        logger.clear();
        assert!(logger.events().is_empty());
    }
}
