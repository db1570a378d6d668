use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogEvent {
    pub ts: DateTime<Utc>,
    pub level: LogLevel,
    pub package: Option<String>,
    pub checker: Option<String>,
    pub report_dir: Option<String>,
    pub message: String,
    pub fields: HashMap<String, String>,
}

impl LogEvent {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            ts: Utc::now(),
            level,
            package: None,
            checker: None,
            report_dir: None,
            message: message.into(),
            fields: HashMap::new(),
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_checker(mut self, checker: impl Into<String>) -> Self {
        self.checker = Some(checker.into());
        self
    }

    pub fn with_report_dir(mut self, report_dir: impl Into<String>) -> Self {
        self.report_dir = Some(report_dir.into());
        self
    }

    pub fn with_field(mut self, k: impl Into<String>, v: impl Into<String>) -> Self {
        self.fields.insert(k.into(), v.into());
        self
    }
}

pub trait EventLogger: Send + Sync {
    fn log(&self, event: LogEvent);
}

#[derive(Default)]
pub struct NoopEventLogger;

impl EventLogger for NoopEventLogger {
    fn log(&self, _event: LogEvent) {}
}

pub type SharedEventLogger = Arc<dyn EventLogger>;

pub struct BufferedFileEventLogger {
    seq: AtomicU64,
    max_events: usize,
    state: Mutex<VecDeque<(u64, LogEvent)>>,
}

impl BufferedFileEventLogger {
    pub fn new(max_events: usize) -> Self {
        Self {
            seq: AtomicU64::new(0),
            max_events: max_events.max(1),
            state: Mutex::new(VecDeque::new()),
        }
    }

    pub fn tail(&self, max: usize) -> Vec<LogEvent> {
        let state = self.state.lock().unwrap();
        state
            .iter()
            .rev()
            .take(max)
            .map(|(_, ev)| ev.clone())
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect()
    }

    fn event_path(event: &LogEvent) -> Option<PathBuf> {
        let report_dir = event.report_dir.as_ref()?;
        let package = event.package.as_ref()?;
        Some(Path::new(report_dir).join(format!("{package}.events.jsonl")))
    }

    fn write_to_file(event: &LogEvent) {
        let Some(path) = Self::event_path(event) else {
            return;
        };
        let Some(parent) = path.parent() else {
            return;
        };
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
        let Ok(line) = serde_json::to_string(event) else {
            return;
        };
        let line = line + "\n";
        let Ok(mut f) = std::fs::OpenOptions::new().create(true).append(true).open(path) else {
            return;
        };
        let _ = std::io::Write::write_all(&mut f, line.as_bytes());
    }
}

impl EventLogger for BufferedFileEventLogger {
    fn log(&self, event: LogEvent) {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;

        Self::write_to_file(&event);

        let mut state = self.state.lock().unwrap();
        state.push_back((seq, event));
        while state.len() > self.max_events {
            state.pop_front();
        }
    }
}
