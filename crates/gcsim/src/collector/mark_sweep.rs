//! Mark-and-Sweep Collector
//!
//! Cycle phases:
//! 1. Clear every mark bit
//! 2. Mark: walk from each root through outgoing references
//! 3. Sweep: remove every unmarked object, in heap order
//!
//! The mark bit doubles as the visited set, so cycles terminate without any
//! extra bookkeeping. Root membership is never changed by a cycle.

use super::{Algorithm, CollectionReport, Collector, MarkStack};
use crate::heap::Heap;
use crate::object::ObjectId;
use crate::stats::GcTimer;

/// Tracing collector
#[derive(Debug, Default)]
pub struct MarkSweepCollector {
    stack: MarkStack,
}

impl MarkSweepCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark everything reachable from the roots, returning how many objects
    /// were marked
    fn mark(&mut self, heap: &mut Heap) -> usize {
        self.stack.reset();
        self.stack.extend(heap.roots());

        let mut marked = 0;
        while let Some(id) = self.stack.pop() {
            let object = match heap.get_mut(id) {
                Some(object) if !object.marked => object,
                _ => continue,
            };

            object.marked = true;
            marked += 1;
            self.stack.extend(object.outgoing.iter().copied());
        }

        log::trace!(
            "mark phase visited {} ids, marked {}",
            self.stack.popped_count(),
            marked
        );
        marked
    }

    fn unmarked(heap: &Heap) -> Vec<ObjectId> {
        heap.objects()
            .filter(|object| !object.is_marked())
            .map(|object| object.id())
            .collect()
    }
}

impl Collector for MarkSweepCollector {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Tracing
    }

    fn collect(&mut self, heap: &mut Heap) -> CollectionReport {
        let timer = GcTimer::new();
        let cycle = heap.begin_cycle();
        let used_before = heap.used();

        heap.clear_marks();
        let marked = self.mark(heap);

        let garbage = Self::unmarked(heap);
        let removed = heap.remove_objects(&garbage);

        debug_assert!(heap.verify().is_ok(), "{:?}", heap.verify());

        CollectionReport::new(
            Algorithm::Tracing,
            cycle,
            used_before,
            &removed,
            marked,
            heap,
            &timer,
        )
    }
}
