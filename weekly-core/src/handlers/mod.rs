//! Per-sheet processing handlers

pub mod registry;

// Handler implementations
pub mod corext;
pub mod missing_data;
pub mod transco_by_ref;
pub mod transco_by_source;

pub use registry::HandlerRegistry;

use crate::reader::RowRecord;
use anyhow::Result;

/// Trait that all sheet handlers must implement
pub trait SheetHandler {
    /// Name of the sheet this handler consumes (e.g., "COREXT")
    fn sheet_name(&self) -> &str;

    /// Process the records of the sheet and return how many were handled
    ///
    /// Faults are reported through `Err`; a handler must not panic.
    fn process(&self, rows: &[RowRecord]) -> Result<usize>;
}
