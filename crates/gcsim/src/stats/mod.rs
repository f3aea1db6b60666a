//! Stats Module - Collection Statistics
//!
//! Records one `CycleStats` per collection and aggregates totals across
//! the life of a session:
//! - Cycles per algorithm
//! - Objects and memory reclaimed
//! - Peak heap usage
//! - Cycle durations

pub mod timer;

pub use timer::GcTimer;

use crate::collector::{Algorithm, CollectionReport};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Statistics for a single collection cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleStats {
    pub cycle_id: u64,
    pub algorithm: Algorithm,
    pub heap_used_before: usize,
    pub heap_used_after: usize,
    pub objects_marked: usize,
    pub objects_reclaimed: usize,
    pub memory_reclaimed: usize,
    pub duration: Duration,
}

impl From<&CollectionReport> for CycleStats {
    fn from(report: &CollectionReport) -> Self {
        Self {
            cycle_id: report.cycle,
            algorithm: report.algorithm,
            heap_used_before: report.used_before,
            heap_used_after: report.used_after,
            objects_marked: report.objects_marked,
            objects_reclaimed: report.reclaimed.len(),
            memory_reclaimed: report.bytes_freed,
            duration: report.duration,
        }
    }
}

/// GcStats - statistics collector for a session
#[derive(Debug, Clone)]
pub struct GcStats {
    history: VecDeque<CycleStats>,
    max_history: usize,

    tracing_cycles: u64,
    refcount_cycles: u64,
    total_objects_allocated: u64,
    total_objects_reclaimed: u64,
    total_memory_reclaimed: usize,
    total_gc_time: Duration,
    peak_heap_used: usize,
}

impl GcStats {
    pub fn new(max_history: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(max_history.min(1024)),
            max_history,
            tracing_cycles: 0,
            refcount_cycles: 0,
            total_objects_allocated: 0,
            total_objects_reclaimed: 0,
            total_memory_reclaimed: 0,
            total_gc_time: Duration::ZERO,
            peak_heap_used: 0,
        }
    }

    /// Record a successful allocation and the resulting heap usage
    pub fn record_allocation(&mut self, heap_used: usize) {
        self.total_objects_allocated += 1;
        self.peak_heap_used = self.peak_heap_used.max(heap_used);
    }

    /// Record a finished collection
    pub fn record_collection(&mut self, report: &CollectionReport) {
        match report.algorithm {
            Algorithm::Tracing => self.tracing_cycles += 1,
            Algorithm::ReferenceCounting => self.refcount_cycles += 1,
        }

        self.total_objects_reclaimed += report.reclaimed.len() as u64;
        self.total_memory_reclaimed += report.bytes_freed;
        self.total_gc_time += report.duration;
        self.peak_heap_used = self.peak_heap_used.max(report.used_before);

        if self.history.len() == self.max_history {
            self.history.pop_front();
        }
        self.history.push_back(CycleStats::from(report));
    }

    pub fn total_cycles(&self) -> u64 {
        self.tracing_cycles + self.refcount_cycles
    }

    pub fn cycles_for(&self, algorithm: Algorithm) -> u64 {
        match algorithm {
            Algorithm::Tracing => self.tracing_cycles,
            Algorithm::ReferenceCounting => self.refcount_cycles,
        }
    }

    pub fn total_objects_allocated(&self) -> u64 {
        self.total_objects_allocated
    }

    pub fn total_objects_reclaimed(&self) -> u64 {
        self.total_objects_reclaimed
    }

    pub fn total_memory_reclaimed(&self) -> usize {
        self.total_memory_reclaimed
    }

    pub fn peak_heap_used(&self) -> usize {
        self.peak_heap_used
    }

    /// Average cycle time in milliseconds
    pub fn avg_cycle_ms(&self) -> f64 {
        let cycles = self.total_cycles();
        if cycles == 0 {
            0.0
        } else {
            self.total_gc_time.as_secs_f64() * 1000.0 / cycles as f64
        }
    }

    /// Recent cycles, oldest first
    pub fn history(&self) -> impl Iterator<Item = &CycleStats> + '_ {
        self.history.iter()
    }

    pub fn last_cycle(&self) -> Option<&CycleStats> {
        self.history.back()
    }
}
