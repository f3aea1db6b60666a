//! GC Logging and Event History
//!
//! Every command a session executes produces typed events. The session keeps
//! them in a bounded history so a presentation layer can render an event log,
//! and forwards each one to the `log` facade.
//!
//! Log Levels:
//! - ERROR: Rejected commands
//! - INFO: Object/reference creation, cycle start/end, reclaimed objects
//! - DEBUG: Heap statistics after a cycle

use crate::collector::Algorithm;
use crate::object::ObjectId;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Log level for GC events
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// How an event log entry should be styled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Success,
    Error,
    Info,
    Warning,
}

/// GC event types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GcEvent {
    /// Object allocated
    ObjectCreated {
        id: ObjectId,
        name: String,
        size: usize,
    },

    /// Object creation rejected for lack of space
    AllocationRejected {
        requested: usize,
        used: usize,
        capacity: usize,
    },

    /// Reference created (or repeated)
    ReferenceCreated {
        from: ObjectId,
        to: ObjectId,
        from_name: String,
        to_name: String,
        new_edge: bool,
    },

    /// Reference request rejected
    ReferenceRejected {
        from: ObjectId,
        to: ObjectId,
        reason: String,
    },

    /// Collection cycle started
    CycleStart { cycle: u64, algorithm: Algorithm },

    /// Object reclaimed by a cycle
    ObjectCollected {
        cycle: u64,
        id: ObjectId,
        name: String,
        size: usize,
    },

    /// Collection cycle completed
    CycleEnd {
        cycle: u64,
        algorithm: Algorithm,
        reclaimed_count: usize,
        bytes_freed: usize,
        duration_ms: f64,
    },

    /// Heap statistics
    HeapStats {
        used: usize,
        capacity: usize,
        utilization: f64,
    },
}

impl GcEvent {
    /// Get log level for event
    pub fn level(&self) -> LogLevel {
        match self {
            GcEvent::AllocationRejected { .. } | GcEvent::ReferenceRejected { .. } => {
                LogLevel::Error
            },
            GcEvent::ObjectCreated { .. }
            | GcEvent::ReferenceCreated { .. }
            | GcEvent::CycleStart { .. }
            | GcEvent::ObjectCollected { .. }
            | GcEvent::CycleEnd { .. } => LogLevel::Info,
            GcEvent::HeapStats { .. } => LogLevel::Debug,
        }
    }

    pub fn category(&self) -> EventCategory {
        match self {
            GcEvent::ObjectCreated { .. } => EventCategory::Success,
            GcEvent::AllocationRejected { .. } | GcEvent::ReferenceRejected { .. } => {
                EventCategory::Error
            },
            GcEvent::CycleStart { .. } | GcEvent::ObjectCollected { .. } => EventCategory::Warning,
            GcEvent::ReferenceCreated { .. } | GcEvent::CycleEnd { .. } | GcEvent::HeapStats { .. } => {
                EventCategory::Info
            },
        }
    }
}

impl fmt::Display for GcEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GcEvent::ObjectCreated { name, size, .. } => {
                write!(f, "Created object: {} ({} MB)", name, size)
            },
            GcEvent::AllocationRejected { .. } => {
                write!(f, "Error: Not enough memory available")
            },
            GcEvent::ReferenceCreated {
                from_name, to_name, ..
            } => write!(f, "Created reference: {} → {}", from_name, to_name),
            GcEvent::ReferenceRejected { reason, .. } => write!(f, "Error: {}", reason),
            GcEvent::CycleStart { cycle, .. } => {
                write!(f, "Starting garbage collection cycle {}", cycle)
            },
            GcEvent::ObjectCollected { name, size, .. } => {
                write!(f, "Collected: {} ({} MB)", name, size)
            },
            GcEvent::CycleEnd {
                cycle,
                algorithm,
                reclaimed_count,
                bytes_freed,
                duration_ms,
            } => write!(
                f,
                "Cycle {} ({}) reclaimed {} objects, {} MB in {:.3}ms",
                cycle, algorithm, reclaimed_count, bytes_freed, duration_ms
            ),
            GcEvent::HeapStats {
                used,
                capacity,
                utilization,
            } => write!(
                f,
                "Heap: {}/{} MB ({:.1}% utilized)",
                used,
                capacity,
                utilization * 100.0
            ),
        }
    }
}

/// A recorded event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub category: EventCategory,
    pub event: GcEvent,
}

impl LogEntry {
    fn new(event: GcEvent) -> Self {
        Self {
            timestamp: Local::now(),
            level: event.level(),
            category: event.category(),
            event,
        }
    }

    /// Human-readable line, `[HH:MM:SS] message`
    pub fn to_human(&self) -> String {
        format!("[{}] {}", self.timestamp.format("%H:%M:%S"), self.event)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// GC Logger configuration
#[derive(Debug, Clone)]
pub struct GcLoggerConfig {
    /// Events above this level are dropped
    pub level: LogLevel,

    /// Echo accepted events to stdout
    pub console: bool,

    /// Echo in JSON instead of human format
    pub json: bool,

    /// Number of events kept in history
    pub max_events: usize,
}

impl Default for GcLoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Debug,
            console: false,
            json: false,
            max_events: 256,
        }
    }
}

/// GC Logger - bounded event history for one session
#[derive(Debug)]
pub struct GcLogger {
    config: GcLoggerConfig,
    events: VecDeque<LogEntry>,
    enabled: bool,
}

impl GcLogger {
    /// Create new GC logger
    pub fn new(config: GcLoggerConfig) -> Self {
        Self {
            events: VecDeque::with_capacity(config.max_events.min(1024)),
            config,
            enabled: true,
        }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Log a GC event
    ///
    /// The event always reaches the `log` facade; it is recorded only when
    /// the logger is enabled and the event passes the level filter. The
    /// oldest entry is evicted once history is full.
    pub fn log(&mut self, event: GcEvent) {
        let level: log::Level = event.level().into();
        log::log!(level, "{}", event);

        if !self.enabled || event.level() > self.config.level {
            return;
        }

        let entry = LogEntry::new(event);

        if self.config.console {
            self.output_console(&entry);
        }

        if self.events.len() == self.config.max_events {
            self.events.pop_front();
        }
        self.events.push_back(entry);
    }

    fn output_console(&self, entry: &LogEntry) {
        if self.config.json {
            if let Ok(line) = entry.to_json() {
                println!("{}", line);
            }
        } else {
            println!("{}", entry.to_human());
        }
    }

    /// Recorded events, oldest first
    pub fn events(&self) -> impl Iterator<Item = &LogEntry> + '_ {
        self.events.iter()
    }

    /// Take and clear recorded events
    pub fn drain(&mut self) -> Vec<LogEntry> {
        self.events.drain(..).collect()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

impl Default for GcLogger {
    fn default() -> Self {
        Self::new(GcLoggerConfig::default())
    }
}
