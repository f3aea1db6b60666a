//! Reference-Counting Collector
//!
//! One cycle:
//! 1. Candidates are non-root objects whose inbound count is zero, in heap order
//! 2. Each candidate releases its references, decrementing its targets
//! 3. All candidates are removed together
//!
//! The pass does not cascade. An object whose count reaches zero in step 2
//! waits for the next cycle, and objects kept alive only by each other are
//! never reclaimed.

use super::{Algorithm, CollectionReport, Collector};
use crate::heap::Heap;
use crate::object::ObjectId;
use crate::stats::GcTimer;

/// Reference-counting collector
#[derive(Debug, Default)]
pub struct RefCountCollector {
    /// Decrements applied in the last cycle
    last_decrements: usize,
}

impl RefCountCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inbound-count decrements applied by the most recent cycle
    pub fn last_decrements(&self) -> usize {
        self.last_decrements
    }

    fn candidates(heap: &Heap) -> Vec<ObjectId> {
        heap.objects()
            .filter(|object| object.inbound_count() == 0 && !heap.is_root(object.id()))
            .map(|object| object.id())
            .collect()
    }
}

impl Collector for RefCountCollector {
    fn algorithm(&self) -> Algorithm {
        Algorithm::ReferenceCounting
    }

    fn collect(&mut self, heap: &mut Heap) -> CollectionReport {
        let timer = GcTimer::new();
        let cycle = heap.begin_cycle();
        let used_before = heap.used();

        let candidates = Self::candidates(heap);

        self.last_decrements = 0;
        for &id in &candidates {
            let released = heap.release_references(id);
            self.last_decrements += released.len();
        }

        let removed = heap.remove_objects(&candidates);

        debug_assert!(heap.verify().is_ok(), "{:?}", heap.verify());

        CollectionReport::new(
            Algorithm::ReferenceCounting,
            cycle,
            used_before,
            &removed,
            0,
            heap,
            &timer,
        )
    }
}
