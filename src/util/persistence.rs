use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use directories::ProjectDirs;
use tracing::{info, warn};

use crate::config::AnalyticsConfig;
use crate::domain::LoggedEvent;
use crate::infra::analytics::{EventLogError, EventLogger, EventSink, MemoryEventLog};

const APP_QUALIFIER: &str = "pl";
const APP_ORG: &str = "YouMoney";
const APP_NAME: &str = "LoanOfferRanking";
const EVENTS_FILENAME: &str = "analytics_events.json";

/// Default location of the analytics log inside the platform data directory.
pub fn default_events_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.data_local_dir().join(EVENTS_FILENAME))
}

/// Builds the application's event logger. Falls back to an in-memory log when
/// no storage directory can be resolved.
pub fn open_event_log(config: &AnalyticsConfig) -> EventLogger {
    let file = match &config.log_path {
        Some(path) => Ok(FileEventLog::at(path)),
        None => FileEventLog::open_default(),
    };
    let sink: Arc<dyn EventSink> = match file {
        Ok(log) => {
            info!("Recording analytics events to {}", log.path().display());
            Arc::new(log)
        }
        Err(err) => {
            warn!("Analytics events will not be persisted: {err}");
            Arc::new(MemoryEventLog::new())
        }
    };
    EventLogger::new(sink).with_echo(config.echo)
}

/// Event log kept as a JSON array on disk. Every append rewrites the file.
#[derive(Debug)]
pub struct FileEventLog {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileEventLog {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn open_default() -> Result<Self, EventLogError> {
        default_events_file()
            .map(Self::at)
            .ok_or(EventLogError::StorageUnavailable)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<LoggedEvent>, EventLogError> {
        match fs::read_to_string(&self.path) {
            Ok(data) if data.trim().is_empty() => Ok(Vec::new()),
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Keeps an undecodable log next to the fresh one as `<name>.corrupt`.
    fn set_aside_corrupt(&self) {
        let target = self.corrupt_path();
        if let Err(err) = fs::rename(&self.path, &target) {
            warn!("Failed to move corrupt event log to {}: {err}", target.display());
        }
    }

    fn corrupt_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".corrupt");
        self.path.with_file_name(name)
    }

    fn store(&self, events: &[LoggedEvent]) -> Result<(), EventLogError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(events)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl EventSink for FileEventLog {
    fn append(&self, event: &LoggedEvent) -> Result<(), EventLogError> {
        let _guard = self.guard.lock().map_err(|_| EventLogError::Poisoned)?;
        let mut events = match self.load() {
            Ok(events) => events,
            Err(EventLogError::Serde(err)) => {
                warn!(
                    "Event log {} is unreadable, starting a new one: {err}",
                    self.path.display()
                );
                self.set_aside_corrupt();
                Vec::new()
            }
            Err(err) => return Err(err),
        };
        events.push(event.clone());
        self.store(&events)
    }

    fn read_all(&self) -> Result<Vec<LoggedEvent>, EventLogError> {
        let _guard = self.guard.lock().map_err(|_| EventLogError::Poisoned)?;
        self.load()
    }

    fn clear(&self) -> Result<(), EventLogError> {
        let _guard = self.guard.lock().map_err(|_| EventLogError::Poisoned)?;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
