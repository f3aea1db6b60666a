//! Object Module - Simulated Heap Objects
//!
//! Every object lives in the heap's arena and is addressed by its `ObjectId`.
//! Objects never own each other: an edge is just the target's id stored in the
//! source's `outgoing` set, so cyclic graphs need no special handling.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a heap object
///
/// Assigned by the heap in increasing order starting at 1 and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(u64);

impl ObjectId {
    pub const fn new(raw: u64) -> Self {
        ObjectId(raw)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ObjectId {
    fn from(raw: u64) -> Self {
        ObjectId(raw)
    }
}

/// A node of the simulated object graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryObject {
    id: ObjectId,
    name: String,
    size: usize,
    /// Targets of this object's references, in creation order
    pub(crate) outgoing: IndexSet<ObjectId>,
    /// Number of live edges pointing at this object
    pub(crate) inbound: usize,
    /// Reachability bit, only meaningful after a tracing cycle
    pub(crate) marked: bool,
}

impl MemoryObject {
    pub(crate) fn new(id: ObjectId, name: String, size: usize) -> Self {
        Self {
            id,
            name,
            size,
            outgoing: IndexSet::new(),
            inbound: 0,
            marked: false,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn outgoing(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.outgoing.iter().copied()
    }

    pub fn references(&self, target: ObjectId) -> bool {
        self.outgoing.contains(&target)
    }

    pub fn inbound_count(&self) -> usize {
        self.inbound
    }

    pub fn is_marked(&self) -> bool {
        self.marked
    }
}

/// Label for an object: the trimmed requested name, or `Object_<id>` when blank
pub fn display_name(requested: Option<&str>, id: ObjectId) -> String {
    match requested.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("Object_{}", id.as_u64()),
    }
}

/// Read-only view of an object for presentation layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectView {
    pub id: ObjectId,
    pub name: String,
    pub size: usize,
    pub inbound: usize,
    pub outgoing: Vec<ObjectId>,
    pub marked: bool,
    pub is_root: bool,
}

impl ObjectView {
    pub fn new(object: &MemoryObject, is_root: bool) -> Self {
        Self {
            id: object.id,
            name: object.name.clone(),
            size: object.size,
            inbound: object.inbound,
            outgoing: object.outgoing().collect(),
            marked: object.marked,
            is_root,
        }
    }
}
