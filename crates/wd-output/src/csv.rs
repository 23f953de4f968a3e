//! CSV trace backend.
//!
//! Creates three files in the configured output directory:
//! - `state_trace.csv`
//! - `events.csv`
//! - `sight_rays.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TraceWriter;
use crate::{EventRow, OutputResult, RayRow, StateRow};

pub const STATE_FILE: &str = "state_trace.csv";
pub const EVENT_FILE: &str = "events.csv";
pub const RAY_FILE:   &str = "sight_rays.csv";

/// Writes a trace to three CSV files.
pub struct CsvTraceWriter {
    states:   Writer<File>,
    events:   Writer<File>,
    rays:     Writer<File>,
    finished: bool,
}

impl CsvTraceWriter {
    /// Create `dir` if needed, open the three CSV files in it and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut states = Writer::from_path(dir.join(STATE_FILE))?;
        states.write_record([
            "tick", "time_secs", "state", "x", "y", "vx", "vy", "facing",
            "grounded", "sees_target", "movement_enabled", "patrol_index",
        ])?;

        let mut events = Writer::from_path(dir.join(EVENT_FILE))?;
        events.write_record(["tick", "kind", "detail"])?;

        let mut rays = Writer::from_path(dir.join(RAY_FILE))?;
        rays.write_record(["tick", "index", "from_x", "from_y", "to_x", "to_y", "outcome"])?;

        Ok(Self { states, events, rays, finished: false })
    }
}

impl TraceWriter for CsvTraceWriter {
    fn write_state(&mut self, row: &StateRow) -> OutputResult<()> {
        self.states.write_record(&[
            row.tick.to_string(),
            row.time_secs.to_string(),
            row.state.to_string(),
            row.x.to_string(),
            row.y.to_string(),
            row.vx.to_string(),
            row.vy.to_string(),
            row.facing.to_string(),
            (row.grounded as u8).to_string(),
            (row.sees_target as u8).to_string(),
            (row.movement_enabled as u8).to_string(),
            row.patrol_index.to_string(),
        ])?;
        Ok(())
    }

    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record(&[row.tick.to_string(), row.kind.to_string(), row.detail.clone()])?;
        Ok(())
    }

    fn write_rays(&mut self, rows: &[RayRow]) -> OutputResult<()> {
        for row in rows {
            self.rays.write_record(&[
                row.tick.to_string(),
                row.index.to_string(),
                row.from_x.to_string(),
                row.from_y.to_string(),
                row.to_x.to_string(),
                row.to_y.to_string(),
                row.outcome.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.states.flush()?;
        self.events.flush()?;
        self.rays.flush()?;
        Ok(())
    }
}
