//! Test Utilities for the gcsim Test Suite
//!
//! Shared fixture and strict assertion helpers. Every helper checks the full
//! heap invariant set, so a test that forgets to call `verify` still catches
//! bookkeeping drift.

#![allow(dead_code)]

use gcsim::{Algorithm, CollectionReport, HeapSnapshot, ObjectId, Session, SimConfig};

/// Default capacity for tests
pub const DEFAULT_CAPACITY: usize = 1024;

/// ============================================================================
/// SESSION FIXTURE
/// ============================================================================

/// Test fixture wrapping a fresh session
pub struct HeapFixture {
    pub session: Session,
}

impl HeapFixture {
    pub fn with_defaults() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let session = Session::new(SimConfig::with_capacity(capacity))
            .expect("session initialization should succeed with valid capacity");
        Self { session }
    }

    /// Allocate a named object, panicking on failure
    pub fn object(&mut self, name: &str, size: usize) -> ObjectId {
        let size = i64::try_from(size).expect("test sizes fit in i64");
        self.session
            .create_object(Some(name), Some(size))
            .unwrap_or_else(|e| panic!("Allocation of '{}' ({}) failed: {}", name, size, e))
            .id
    }

    /// Allocate `count` objects of `size`, named `<prefix><index>`
    pub fn objects(&mut self, prefix: &str, count: usize, size: usize) -> Vec<ObjectId> {
        (0..count)
            .map(|i| self.object(&format!("{}{}", prefix, i), size))
            .collect()
    }

    /// Add a reference, panicking on failure
    pub fn link(&mut self, from: ObjectId, to: ObjectId) {
        self.session
            .create_reference(from, to)
            .unwrap_or_else(|e| panic!("Reference {} -> {} failed: {}", from, to, e));
    }

    /// Link `ids` into a ring
    pub fn ring(&mut self, ids: &[ObjectId]) {
        for (i, &from) in ids.iter().enumerate() {
            self.link(from, ids[(i + 1) % ids.len()]);
        }
    }

    /// Run a cycle and check invariants afterwards
    pub fn collect(&mut self, algorithm: Algorithm) -> CollectionReport {
        let report = self.session.run_collection(algorithm);
        assert_invariants(&self.session, "after collection");
        report
    }

    pub fn snapshot(&self) -> HeapSnapshot {
        self.session.snapshot()
    }

    pub fn used(&self) -> usize {
        self.session.heap().used()
    }

    pub fn is_live(&self, id: ObjectId) -> bool {
        self.session.heap().contains(id)
    }

    pub fn is_root(&self, id: ObjectId) -> bool {
        self.session.heap().is_root(id)
    }

    pub fn inbound(&self, id: ObjectId) -> usize {
        self.session
            .heap()
            .get(id)
            .map(|object| object.inbound_count())
            .unwrap_or_else(|| panic!("{} is not live", id))
    }
}

/// ============================================================================
/// STRICT ASSERTION HELPERS
/// ============================================================================

/// Assert every heap invariant holds
#[track_caller]
pub fn assert_invariants(session: &Session, context: &str) {
    if let Err(e) = session.heap().verify() {
        panic!("{}: {}", context, e);
    }
}

/// Assert a cycle reclaimed exactly `expected`, in order
#[track_caller]
pub fn assert_reclaimed(report: &CollectionReport, expected: &[ObjectId], context: &str) {
    assert_eq!(
        report.reclaimed_ids(),
        expected,
        "{}: cycle {} ({}) reclaimed the wrong objects",
        context,
        report.cycle,
        report.algorithm
    );
}

/// Assert a cycle reclaimed nothing
#[track_caller]
pub fn assert_nothing_reclaimed(report: &CollectionReport, context: &str) {
    assert!(
        report.reclaimed.is_empty(),
        "{}: expected no reclamation, cycle {} reclaimed {:?}",
        context,
        report.cycle,
        report.reclaimed_ids()
    );
    assert_eq!(report.bytes_freed, 0, "{}: freed bytes without reclaiming", context);
}
