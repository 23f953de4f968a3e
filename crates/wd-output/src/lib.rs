//! `wd-output`: trace recording for warden simulations.
//!
//! | Backend | Files created                                         |
//! |---------|-------------------------------------------------------|
//! | CSV     | `state_trace.csv`, `events.csv`, `sight_rays.csv`     |
//!
//! Backends implement [`TraceWriter`] and are driven by [`TraceObserver`],
//! which implements `wd_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wd_output::{CsvTraceWriter, TraceObserver};
//!
//! let writer = CsvTraceWriter::new(Path::new("./trace"))?;
//! let mut obs = TraceObserver::new(writer);
//! sim.run_for(30.0, &mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("trace error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvTraceWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{EventRow, RayRow, StateRow};
pub use writer::TraceWriter;
