//! Error Module - gcsim Error Types
//!
//! Defines all error types returned by the simulated heap.
//!
//! # Error Categories
//!
//! ## Command Errors
//! - `CapacityExceeded` - Object creation would overflow the heap
//! - `SelfReference` - Edge whose source and target are the same object
//! - `UnknownObject` - Edge endpoint that is not in the heap
//!
//! ## Setup Errors
//! - `Configuration` - Invalid `SimConfig`
//!
//! ## Internal Errors
//! - `InvariantViolation` - Heap bookkeeping is inconsistent (a bug)
//!
//! Every command error is raised before any mutation, so a failed call leaves
//! the heap exactly as it was.

use crate::config::ConfigError;
use crate::object::ObjectId;
use thiserror::Error;

/// Main error type for all gcsim operations
///
/// # Examples
///
/// ```rust
/// use gcsim::GcSimError;
///
/// fn describe(err: &GcSimError) -> String {
///     match err {
///         GcSimError::CapacityExceeded { requested, used, capacity } => {
///             format!("need {} units, {} of {} in use", requested, used, capacity)
///         }
///         other => other.to_string(),
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GcSimError {
    /// Object creation would push heap usage past capacity
    ///
    /// **When returned:** `used + requested > capacity`
    ///
    /// **Recovery strategy:** Run a collection cycle or request a smaller object
    #[error("Not enough memory available: requested {requested}, used {used} of {capacity}")]
    CapacityExceeded {
        requested: usize,
        used: usize,
        capacity: usize,
    },

    /// Reference from an object to itself
    #[error("Cannot create self-reference on object {0}")]
    SelfReference(ObjectId),

    /// Reference endpoint does not exist in the heap
    ///
    /// **When returned:** The id was never allocated or has already been collected
    #[error("Unknown object {0}")]
    UnknownObject(ObjectId),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Heap bookkeeping does not match the object graph
    ///
    /// **Action required:** This is a bug, report it with the heap snapshot
    #[error("Heap invariant violated: {0}")]
    InvariantViolation(String),
}

impl GcSimError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GcSimError::CapacityExceeded { .. }
                | GcSimError::SelfReference(_)
                | GcSimError::UnknownObject(_)
        )
    }

    /// Check if this error indicates a bug in the code
    pub fn is_bug(&self) -> bool {
        matches!(self, GcSimError::InvariantViolation(_))
    }
}

impl From<ConfigError> for GcSimError {
    fn from(err: ConfigError) -> Self {
        GcSimError::Configuration(err.to_string())
    }
}

/// Result type alias for gcsim operations
pub type Result<T> = std::result::Result<T, GcSimError>;
