//! Collector Module - Collection Algorithms
//!
//! Two interchangeable strategies run against a `Heap`:
//!
//! - [`MarkSweepCollector`]: tracing. Marks everything reachable from the
//!   root set, then sweeps the rest. Reclaims unreachable cycles.
//! - [`RefCountCollector`]: reference counting. Reclaims non-root objects
//!   with no inbound references in a single, non-cascading pass. Unreachable
//!   cycles are never reclaimed.
//!
//! Every invocation bumps the heap's cycle counter exactly once and returns
//! a [`CollectionReport`].

pub mod mark_stack;
pub mod mark_sweep;
pub mod ref_count;

pub use mark_stack::MarkStack;
pub use mark_sweep::MarkSweepCollector;
pub use ref_count::RefCountCollector;

use crate::heap::Heap;
use crate::object::{MemoryObject, ObjectId};
use crate::stats::GcTimer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Collection algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Mark-and-sweep from the root set
    Tracing,
    /// Reclaim objects whose inbound count is zero
    ReferenceCounting,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Tracing, Algorithm::ReferenceCounting];

    /// Fresh collector for this algorithm
    pub fn collector(self) -> Box<dyn Collector> {
        match self {
            Algorithm::Tracing => Box::new(MarkSweepCollector::new()),
            Algorithm::ReferenceCounting => Box::new(RefCountCollector::new()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Tracing => "mark-and-sweep",
            Algorithm::ReferenceCounting => "reference-counting",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for unrecognized algorithm names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown collection algorithm: {0}")]
pub struct ParseAlgorithmError(String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    /// Accepts kebab, snake and camel spellings, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "tracing" | "markandsweep" | "marksweep" => Ok(Algorithm::Tracing),
            "referencecounting" | "referencecount" | "refcount" | "refcounting" => {
                Ok(Algorithm::ReferenceCounting)
            },
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// A collection strategy
pub trait Collector {
    fn algorithm(&self) -> Algorithm;

    /// Run one cycle against `heap`
    fn collect(&mut self, heap: &mut Heap) -> CollectionReport;
}

/// Identity of an object reclaimed by a cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReclaimedObject {
    pub id: ObjectId,
    pub name: String,
    pub size: usize,
}

impl From<&MemoryObject> for ReclaimedObject {
    fn from(object: &MemoryObject) -> Self {
        Self {
            id: object.id(),
            name: object.name().to_string(),
            size: object.size(),
        }
    }
}

/// Outcome of one collection cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionReport {
    pub algorithm: Algorithm,
    /// Cycle number, starting at 1
    pub cycle: u64,
    /// Reclaimed objects in reclaim order
    pub reclaimed: Vec<ReclaimedObject>,
    pub bytes_freed: usize,
    pub used_before: usize,
    pub used_after: usize,
    /// Objects found reachable (tracing only)
    pub objects_marked: usize,
    pub duration: Duration,
}

impl CollectionReport {
    pub(crate) fn new(
        algorithm: Algorithm,
        cycle: u64,
        used_before: usize,
        removed: &[MemoryObject],
        objects_marked: usize,
        heap: &Heap,
        timer: &GcTimer,
    ) -> Self {
        let reclaimed: Vec<ReclaimedObject> = removed.iter().map(ReclaimedObject::from).collect();
        let bytes_freed = reclaimed.iter().map(|r| r.size).sum();

        Self {
            algorithm,
            cycle,
            reclaimed,
            bytes_freed,
            used_before,
            used_after: heap.used(),
            objects_marked,
            duration: timer.elapsed(),
        }
    }

    pub fn reclaimed_ids(&self) -> Vec<ObjectId> {
        self.reclaimed.iter().map(|r| r.id).collect()
    }

    pub fn reclaimed_count(&self) -> usize {
        self.reclaimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reclaimed.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Run one cycle of `algorithm` against `heap`
pub fn collect(heap: &mut Heap, algorithm: Algorithm) -> CollectionReport {
    algorithm.collector().collect(heap)
}
