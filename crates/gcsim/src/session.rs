//! Session Module - Command Surface for Presentation Layers
//!
//! A `Session` owns one heap and everything observing it: the event logger,
//! cycle statistics and the two collectors. Presentation layers push the
//! three commands (create object, create reference, run collection) and
//! read back snapshots and events. Errors from the heap are forwarded
//! unchanged after being recorded as events.

use crate::collector::{
    Algorithm, CollectionReport, Collector, MarkSweepCollector, RefCountCollector,
};
use crate::config::SimConfig;
use crate::error::{GcSimError, Result};
use crate::heap::{Heap, HeapSnapshot};
use crate::logging::{GcEvent, GcLogger, LogEntry};
use crate::object::{ObjectId, ObjectView};
use crate::stats::GcStats;
use serde::{Deserialize, Serialize};

/// Result of a reference request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceOutcome {
    pub from: ObjectId,
    pub to: ObjectId,
    /// `false` when the edge already existed
    pub created: bool,
}

/// Session - single-owner simulation driver
#[derive(Debug)]
pub struct Session {
    heap: Heap,
    config: SimConfig,
    logger: GcLogger,
    stats: GcStats,
    tracer: MarkSweepCollector,
    counter: RefCountCollector,
}

impl Session {
    /// Create a session with an empty heap
    ///
    /// # Errors
    /// `Configuration` if `config` fails validation.
    pub fn new(config: SimConfig) -> Result<Self> {
        let heap = Heap::with_config(&config)?;

        Ok(Self {
            heap,
            logger: GcLogger::new(config.logger.clone()),
            stats: GcStats::new(config.cycle_history),
            config,
            tracer: MarkSweepCollector::new(),
            counter: RefCountCollector::new(),
        })
    }

    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::new(SimConfig::with_capacity(capacity))
    }

    /// Allocate an object
    ///
    /// A blank name becomes `Object_<id>`; a missing or non-positive size
    /// becomes the configured default.
    pub fn create_object(&mut self, name: Option<&str>, size: Option<i64>) -> Result<ObjectView> {
        let size = size.and_then(|size| usize::try_from(size).ok());

        match self.heap.create_object(name, size) {
            Ok(id) => {
                self.stats.record_allocation(self.heap.used());
                let view = self.view(id)?;
                self.logger.log(GcEvent::ObjectCreated {
                    id,
                    name: view.name.clone(),
                    size: view.size,
                });
                Ok(view)
            },
            Err(err) => {
                if let GcSimError::CapacityExceeded {
                    requested,
                    used,
                    capacity,
                } = err
                {
                    self.logger.log(GcEvent::AllocationRejected {
                        requested,
                        used,
                        capacity,
                    });
                }
                Err(err)
            },
        }
    }

    /// Allocate an object from raw form text
    ///
    /// The size text is read as a leading integer (`" 42kb"` is 42); text
    /// with no leading digits uses the default size.
    pub fn create_object_from_input(&mut self, name: &str, size: &str) -> Result<ObjectView> {
        self.create_object(Some(name), parse_size_input(size))
    }

    /// Add a reference `from -> to`
    ///
    /// Repeating an existing edge succeeds with `created == false` and
    /// changes nothing.
    pub fn create_reference(&mut self, from: ObjectId, to: ObjectId) -> Result<ReferenceOutcome> {
        match self.heap.create_reference(from, to) {
            Ok(created) => {
                let from_name = self.name_of(from);
                let to_name = self.name_of(to);
                self.logger.log(GcEvent::ReferenceCreated {
                    from,
                    to,
                    from_name,
                    to_name,
                    new_edge: created,
                });
                Ok(ReferenceOutcome { from, to, created })
            },
            Err(err) => {
                self.logger.log(GcEvent::ReferenceRejected {
                    from,
                    to,
                    reason: err.to_string(),
                });
                Err(err)
            },
        }
    }

    /// Run one collection cycle
    pub fn run_collection(&mut self, algorithm: Algorithm) -> CollectionReport {
        self.logger.log(GcEvent::CycleStart {
            cycle: self.heap.cycle_count() + 1,
            algorithm,
        });

        let collector: &mut dyn Collector = match algorithm {
            Algorithm::Tracing => &mut self.tracer,
            Algorithm::ReferenceCounting => &mut self.counter,
        };
        let report = collector.collect(&mut self.heap);

        for object in &report.reclaimed {
            self.logger.log(GcEvent::ObjectCollected {
                cycle: report.cycle,
                id: object.id,
                name: object.name.clone(),
                size: object.size,
            });
        }

        let duration_ms = report.duration.as_secs_f64() * 1000.0;
        self.logger.log(GcEvent::CycleEnd {
            cycle: report.cycle,
            algorithm,
            reclaimed_count: report.reclaimed.len(),
            bytes_freed: report.bytes_freed,
            duration_ms,
        });
        self.logger.log(GcEvent::HeapStats {
            used: self.heap.used(),
            capacity: self.heap.capacity(),
            utilization: self.heap.utilization(),
        });

        self.stats.record_collection(&report);

        if self.config.verbose {
            log::info!(
                "[GC] Cycle {} ({}) reclaimed {} objects, heap {}/{}",
                report.cycle,
                algorithm,
                report.reclaimed.len(),
                self.heap.used(),
                self.heap.capacity()
            );
        } else {
            log::debug!(
                "cycle {} ({}) reclaimed {} objects",
                report.cycle,
                algorithm,
                report.reclaimed.len()
            );
        }

        report
    }

    /// Capture the heap for rendering
    pub fn snapshot(&self) -> HeapSnapshot {
        self.heap.snapshot()
    }

    /// View of one live object
    pub fn object(&self, id: ObjectId) -> Option<ObjectView> {
        self.heap
            .get(id)
            .map(|object| ObjectView::new(object, self.heap.is_root(id)))
    }

    fn view(&self, id: ObjectId) -> Result<ObjectView> {
        self.object(id).ok_or(GcSimError::UnknownObject(id))
    }

    fn name_of(&self, id: ObjectId) -> String {
        self.heap
            .get(id)
            .map(|object| object.name().to_string())
            .unwrap_or_else(|| id.to_string())
    }

    /// Recorded events, oldest first
    pub fn events(&self) -> impl Iterator<Item = &LogEntry> + '_ {
        self.logger.events()
    }

    /// Take and clear recorded events
    pub fn drain_events(&mut self) -> Vec<LogEntry> {
        self.logger.drain()
    }

    pub fn logger_mut(&mut self) -> &mut GcLogger {
        &mut self.logger
    }

    pub fn stats(&self) -> &GcStats {
        &self.stats
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}

/// Leading-integer parse of form text
///
/// Skips leading whitespace, accepts one sign and then as many digits as
/// follow. Returns `None` when no digit is found. Values too large for `i64`
/// saturate.
pub fn parse_size_input(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
    }

    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}
