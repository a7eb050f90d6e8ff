//! Filter trait for lexical candidate predicates

use spotgate_core::SurfaceFormOccurrence;

/// A pure predicate over an occurrence
///
/// `applies` returns `true` when the occurrence passes the filter. Filters
/// must not panic for any well-formed occurrence.
pub trait Filter: Send + Sync {
    /// Check whether the occurrence passes this filter
    fn applies(&self, occurrence: &SurfaceFormOccurrence) -> bool;

    /// Get the filter name
    fn name(&self) -> &str;
}
