//! Heap Management Module - Object Arena and Memory Accounting
//!
//! The heap owns every simulated object, keyed by `ObjectId` in creation
//! order. It is the only place objects and edges are created or destroyed.
//!
//! Bookkeeping maintained across every public operation:
//! - `used` equals the sum of live object sizes and never exceeds `capacity`
//! - every edge target and every root is a live object
//! - each object's inbound count equals the number of edges pointing at it
//! - an object is a root until it first becomes the target of an edge, and
//!   never becomes one again
//!
//! Heap Structure:
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                      Heap                         │
//! │  objects: #1 ──► #2 ──► #3     #4 ◄──► #5         │
//! │  roots:   {#1}                                    │
//! │  used / capacity, cycle_count, next_id            │
//! └──────────────────────────────────────────────────┘
//! ```

use crate::config::SimConfig;
use crate::error::{GcSimError, Result};
use crate::object::{display_name, MemoryObject, ObjectId, ObjectView};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Heap - arena of simulated objects
#[derive(Debug, Clone)]
pub struct Heap {
    /// Live objects in creation order
    objects: IndexMap<ObjectId, MemoryObject>,

    /// Objects that have never been the target of a reference
    roots: IndexSet<ObjectId>,

    /// Total capacity in memory units
    capacity: usize,

    /// Sum of live object sizes
    used: usize,

    /// Size given to objects created without one
    default_object_size: usize,

    /// Next identity to hand out
    next_id: u64,

    /// Collection cycles run against this heap
    cycle_count: u64,
}

impl Heap {
    /// Create an empty heap with the given capacity
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(&SimConfig::with_capacity(capacity))
    }

    /// Create an empty heap from a session configuration
    pub fn with_config(config: &SimConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            objects: IndexMap::new(),
            roots: IndexSet::new(),
            capacity: config.capacity,
            used: 0,
            default_object_size: config.default_object_size,
            next_id: 1,
            cycle_count: 0,
        })
    }

    /// Allocate a new object
    ///
    /// A missing or zero `size` falls back to the configured default size.
    /// The new object starts as a root.
    ///
    /// # Errors
    /// `CapacityExceeded` if the object does not fit. The heap, including
    /// the id counter, is left untouched.
    pub fn create_object(&mut self, name: Option<&str>, size: Option<usize>) -> Result<ObjectId> {
        let size = match size {
            Some(size) if size > 0 => size,
            _ => self.default_object_size,
        };

        if size > self.available() {
            log::debug!(
                "rejecting allocation of {} units ({}/{} used)",
                size,
                self.used,
                self.capacity
            );
            return Err(GcSimError::CapacityExceeded {
                requested: size,
                used: self.used,
                capacity: self.capacity,
            });
        }

        let id = ObjectId::new(self.next_id);
        self.next_id += 1;

        let object = MemoryObject::new(id, display_name(name, id), size);
        log::debug!("allocated {} '{}' ({} units)", id, object.name(), size);

        self.objects.insert(id, object);
        self.roots.insert(id);
        self.used += size;

        Ok(id)
    }

    /// Add an edge `from -> to`
    ///
    /// Returns `true` when the edge is new and `false` when it already
    /// existed, in which case nothing changes. Either way `to` is no longer
    /// a root afterwards.
    ///
    /// # Errors
    /// - `SelfReference` if `from == to`
    /// - `UnknownObject` if either endpoint is missing (source checked first)
    pub fn create_reference(&mut self, from: ObjectId, to: ObjectId) -> Result<bool> {
        if from == to {
            return Err(GcSimError::SelfReference(from));
        }
        if !self.objects.contains_key(&from) {
            return Err(GcSimError::UnknownObject(from));
        }
        if !self.objects.contains_key(&to) {
            return Err(GcSimError::UnknownObject(to));
        }

        let created = self
            .objects
            .get_mut(&from)
            .map(|source| source.outgoing.insert(to))
            .unwrap_or(false);

        if created {
            if let Some(target) = self.objects.get_mut(&to) {
                target.inbound += 1;
            }
            log::trace!("edge {} -> {}", from, to);
        }

        self.roots.shift_remove(&to);

        Ok(created)
    }

    /// Drop all references held by `id`
    ///
    /// Empties the object's outgoing set and decrements the inbound count of
    /// each target still in the heap. Returns the targets that were
    /// decremented, in edge order. Unknown ids release nothing.
    ///
    /// Only a collector about to remove `id` may call this; edges of a live
    /// object disappear only together with the object.
    pub(crate) fn release_references(&mut self, id: ObjectId) -> Vec<ObjectId> {
        let targets = match self.objects.get_mut(&id) {
            Some(object) => std::mem::take(&mut object.outgoing),
            None => return Vec::new(),
        };

        let mut released = Vec::with_capacity(targets.len());
        for target in targets {
            if let Some(object) = self.objects.get_mut(&target) {
                object.inbound = object.inbound.saturating_sub(1);
                released.push(target);
            }
        }

        released
    }

    /// Remove a set of objects at once
    ///
    /// Subtracts each removed size from `used`, releases any edges the
    /// removed objects still hold on survivors, and strips survivors' edges
    /// into removed objects. Ids that are not live, or repeated, are
    /// ignored. Returns the removed objects in request order.
    ///
    /// This is the only way edges leave the heap; a live object's references
    /// cannot be dropped on their own:
    ///
    /// ```compile_fail
    /// let mut heap = gcsim::Heap::new(100).unwrap();
    /// let a = heap.create_object(None, None).unwrap();
    /// heap.release_references(a);
    /// ```
    pub fn remove_objects(&mut self, ids: &[ObjectId]) -> Vec<MemoryObject> {
        let mut removed = Vec::with_capacity(ids.len());
        for &id in ids {
            if let Some(object) = self.objects.shift_remove(&id) {
                self.used -= object.size();
                self.roots.shift_remove(&id);
                removed.push(object);
            }
        }

        if removed.is_empty() {
            return removed;
        }

        for object in &removed {
            for target in object.outgoing() {
                if let Some(survivor) = self.objects.get_mut(&target) {
                    survivor.inbound = survivor.inbound.saturating_sub(1);
                }
            }
        }

        let gone: IndexSet<ObjectId> = removed.iter().map(MemoryObject::id).collect();
        for survivor in self.objects.values_mut() {
            survivor.outgoing.retain(|target| !gone.contains(target));
        }

        removed
    }

    /// Start a collection cycle and return its number
    pub fn begin_cycle(&mut self) -> u64 {
        self.cycle_count += 1;
        self.cycle_count
    }

    pub(crate) fn clear_marks(&mut self) {
        for object in self.objects.values_mut() {
            object.marked = false;
        }
    }

    pub(crate) fn get_mut(&mut self, id: ObjectId) -> Option<&mut MemoryObject> {
        self.objects.get_mut(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&MemoryObject> {
        self.objects.get(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Live objects in creation order
    pub fn objects(&self) -> impl Iterator<Item = &MemoryObject> + '_ {
        self.objects.values()
    }

    /// All edges as `(from, to)` pairs, ordered by source then edge creation
    pub fn edges(&self) -> impl Iterator<Item = (ObjectId, ObjectId)> + '_ {
        self.objects
            .values()
            .flat_map(|object| object.outgoing().map(move |to| (object.id(), to)))
    }

    pub fn roots(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.roots.iter().copied()
    }

    pub fn is_root(&self, id: ObjectId) -> bool {
        self.roots.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn available(&self) -> usize {
        self.capacity.saturating_sub(self.used)
    }

    /// Fraction of capacity in use (0.0 - 1.0)
    pub fn utilization(&self) -> f64 {
        self.used as f64 / self.capacity as f64
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn default_object_size(&self) -> usize {
        self.default_object_size
    }

    /// Returns heap statistics
    pub fn stats(&self) -> HeapStats {
        HeapStats {
            used: self.used,
            capacity: self.capacity,
            object_count: self.objects.len(),
            root_count: self.roots.len(),
            edge_count: self.objects.values().map(|o| o.outgoing.len()).sum(),
            cycle_count: self.cycle_count,
        }
    }

    /// Capture the whole heap for rendering
    pub fn snapshot(&self) -> HeapSnapshot {
        HeapSnapshot {
            objects: self
                .objects
                .values()
                .map(|object| ObjectView::new(object, self.is_root(object.id())))
                .collect(),
            edges: self.edges().collect(),
            roots: self.roots().collect(),
            capacity: self.capacity,
            used: self.used,
            cycle_count: self.cycle_count,
        }
    }

    /// Check every heap invariant
    ///
    /// # Errors
    /// `InvariantViolation` describing the first inconsistency found.
    pub fn verify(&self) -> Result<()> {
        let violation = |msg: String| Err(GcSimError::InvariantViolation(msg));

        let total: usize = self.objects.values().map(MemoryObject::size).sum();
        if total != self.used {
            return violation(format!("used is {} but live sizes sum to {}", self.used, total));
        }
        if self.used > self.capacity {
            return violation(format!("used {} exceeds capacity {}", self.used, self.capacity));
        }

        for root in &self.roots {
            match self.objects.get(root) {
                None => return violation(format!("root {} is not a live object", root)),
                Some(object) if object.inbound != 0 => {
                    return violation(format!(
                        "root {} has {} inbound references",
                        root, object.inbound
                    ))
                }
                Some(_) => {}
            }
        }

        let mut expected: IndexMap<ObjectId, usize> =
            self.objects.keys().map(|&id| (id, 0)).collect();
        for (from, to) in self.edges() {
            if from == to {
                return violation(format!("self-reference on {}", from));
            }
            match expected.get_mut(&to) {
                Some(count) => *count += 1,
                None => return violation(format!("dangling edge {} -> {}", from, to)),
            }
        }

        for (id, object) in &self.objects {
            if object.id() != *id {
                return violation(format!("object {} stored under key {}", object.id(), id));
            }
            if id.as_u64() >= self.next_id {
                return violation(format!("object {} was never handed out", id));
            }
            let actual = expected.get(id).copied().unwrap_or(0);
            if object.inbound != actual {
                return violation(format!(
                    "{} records {} inbound references but {} edges point at it",
                    id, object.inbound, actual
                ));
            }
        }

        Ok(())
    }
}

/// Heap statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeapStats {
    /// Memory currently in use
    pub used: usize,
    /// Total capacity
    pub capacity: usize,
    /// Number of live objects
    pub object_count: usize,
    /// Number of roots
    pub root_count: usize,
    /// Number of edges
    pub edge_count: usize,
    /// Collection cycles run so far
    pub cycle_count: u64,
}

impl HeapStats {
    /// Calculate utilization percentage
    pub fn utilization_percent(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        (self.used as f64 / self.capacity as f64) * 100.0
    }

    /// Get available memory
    pub fn available(&self) -> usize {
        self.capacity.saturating_sub(self.used)
    }
}

/// Everything a presentation layer needs to draw the heap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeapSnapshot {
    /// Objects in creation order
    pub objects: Vec<ObjectView>,
    /// `(from, to)` pairs
    pub edges: Vec<(ObjectId, ObjectId)>,
    pub roots: Vec<ObjectId>,
    pub capacity: usize,
    pub used: usize,
    pub cycle_count: u64,
}

impl HeapSnapshot {
    pub fn object(&self, id: ObjectId) -> Option<&ObjectView> {
        self.objects.iter().find(|view| view.id == id)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
