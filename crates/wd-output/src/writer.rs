//! The `TraceWriter` trait implemented by all backend writers.

use crate::{EventRow, OutputResult, RayRow, StateRow};

/// Trait implemented by trace backends.
///
/// Errors are stored by the observer and retrieved with
/// [`TraceObserver::take_error`][crate::TraceObserver::take_error].
pub trait TraceWriter {
    fn write_state(&mut self, row: &StateRow) -> OutputResult<()>;

    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    /// Write the rays of one sensor sample.
    fn write_rays(&mut self, rows: &[RayRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
