//! # gcsim - Garbage Collection Simulator
//!
//! gcsim models a small managed heap so the behaviour of two collection
//! strategies can be observed on a hand-built object graph:
//!
//! - **Mark-and-sweep (tracing)**: everything reachable from the root set
//!   survives, everything else is reclaimed, cycles included
//! - **Reference counting**: non-root objects with no inbound references are
//!   reclaimed in a single non-cascading pass; cycles leak
//!
//! Objects have a name and a size in memory units, and are linked by
//! directed references. No real memory is allocated.
//!
//! ## Quick Start
//!
//! ```rust
//! use gcsim::{Algorithm, Session, SimConfig};
//!
//! fn main() -> gcsim::Result<()> {
//!     let mut session = Session::new(SimConfig::with_capacity(100))?;
//!
//!     let a = session.create_object(Some("A"), Some(40))?;
//!     let b = session.create_object(Some("B"), Some(30))?;
//!     session.create_reference(a.id, b.id)?;
//!
//!     let report = session.run_collection(Algorithm::Tracing);
//!     assert!(report.reclaimed.is_empty());
//!     assert_eq!(session.snapshot().used, 70);
//!     Ok(())
//! }
//! ```
//!
//! ## Root Set
//!
//! Every new object starts as a root. The first time an object becomes the
//! target of a reference it leaves the root set for good, even if every
//! object referring to it is later collected.
//!
//! ## Modules
//!
//! - [`collector`]: Collection algorithms and cycle reports
//! - [`config`]: Session configuration and validation
//! - [`error`]: Error types
//! - [`heap`]: Object arena, memory accounting, snapshots
//! - [`logging`]: Typed events and the bounded event log
//! - [`object`]: Object identity and views
//! - [`session`]: Command surface for presentation layers
//! - [`stats`]: Per-cycle and aggregate statistics

// Core modules
pub mod config;
pub mod error;
pub mod heap;
pub mod object;

// Collection
pub mod collector;

// Orchestration and monitoring
pub mod logging;
pub mod session;
pub mod stats;

// Re-export main types for convenience
pub use collector::{Algorithm, CollectionReport, Collector, ReclaimedObject};
pub use config::SimConfig;
pub use error::{GcSimError, Result};
pub use heap::{Heap, HeapSnapshot, HeapStats};
pub use logging::{EventCategory, GcEvent, LogEntry};
pub use object::{MemoryObject, ObjectId, ObjectView};
pub use session::{ReferenceOutcome, Session};

/// gcsim version string from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Create a session with default configuration
pub fn init() -> Result<Session> {
    Session::new(SimConfig::default())
}

/// Create a session with custom configuration
///
/// # Examples
///
/// ```rust
/// let config = gcsim::SimConfig {
///     capacity: 256,
///     verbose: true,
///     ..Default::default()
/// };
///
/// let session = gcsim::init_with_config(config)?;
/// assert_eq!(session.heap().capacity(), 256);
/// # Ok::<(), gcsim::GcSimError>(())
/// ```
pub fn init_with_config(config: SimConfig) -> Result<Session> {
    Session::new(config)
}
