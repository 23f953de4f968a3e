//! CSV route loader.
//!
//! # CSV format
//!
//! One row per waypoint, in patrol order:
//!
//! ```csv
//! x,y,wait_secs,turn_around
//! 4.0,0.5,1.5,false
//! 12.0,0.5,2.0,true
//! -3.0,0.5,0.0,true
//! ```
//!
//! `turn_around` accepts `true`/`false`.  The file must contain at least one
//! row.

use std::io::Read;
use std::path::Path;

use glam::Vec2;
use serde::Deserialize;

use crate::{PatrolRoute, ScheduleError, ScheduleResult, Waypoint};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WaypointRecord {
    x:           f32,
    y:           f32,
    wait_secs:   f64,
    turn_around: bool,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`PatrolRoute`] from a CSV file.
pub fn load_route_csv(path: &Path) -> ScheduleResult<PatrolRoute> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_route_reader(file)
}

/// Like [`load_route_csv`] but accepts any `Read` source.
pub fn load_route_reader<R: Read>(reader: R) -> ScheduleResult<PatrolRoute> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let waypoints = csv_reader
        .deserialize::<WaypointRecord>()
        .enumerate()
        .map(|(i, result)| {
            let row = result.map_err(|e| ScheduleError::Parse(format!("row {}: {e}", i + 1)))?;
            Ok(Waypoint {
                position:    Vec2::new(row.x, row.y),
                wait_secs:   row.wait_secs,
                turn_around: row.turn_around,
            })
        })
        .collect::<ScheduleResult<Vec<_>>>()?;

    PatrolRoute::new(waypoints)
}
