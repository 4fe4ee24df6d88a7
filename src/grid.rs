//! Weekly calendar layout: turns the flat meeting list into positioned,
//! colored blocks on a fixed Monday-Friday grid of 15-minute rows.
//!
//! The pipeline is a pure function of its input: group by section and time,
//! expand to one instance per weekday, position each instance on the grid and
//! decorate it with the section's color.

use crate::color::{Color, ColorMap};
use crate::error::LoadError;
use crate::meeting::{DaySet, MeetingRecord, Weekday};
use crate::time::{Slot, TimeRange};
use serde::{Serialize, Serializer};
use std::path::Path;
use tracing::info;

pub mod expand;
pub mod group;
pub mod layout;
pub mod position;

#[cfg(test)]
pub(crate) mod tests;

pub const START_HOUR: u8 = 7;
pub const GRID_HOURS: u8 = 14;
pub const SLOTS_PER_HOUR: u8 = 4;
pub const SLOT_COUNT: i32 = GRID_HOURS as i32 * SLOTS_PER_HOUR as i32;
pub const DAY_COLUMNS: usize = Weekday::ALL.len();

/// Raw records sharing a section and a time range, with their day codes merged.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupedMeeting {
    /// Display fields of the first contributing record.
    pub record: MeetingRecord,
    pub days: DaySet,
    pub times: TimeRange,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedEvent {
    #[serde(flatten)]
    pub record: MeetingRecord,
    #[serde(rename = "dayColumn", serialize_with = "day_column")]
    pub day: Weekday,
    pub start_slot: Slot,
    pub slot_span: i32,
    pub color: Color,
    pub all_days: DaySet,
}

impl PositionedEvent {
    pub fn end_slot(&self) -> Slot {
        self.start_slot + self.slot_span
    }

    pub fn covers(&self, day: Weekday, slot: Slot) -> bool {
        self.day == day && self.start_slot <= slot && slot < self.end_slot()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GridLayout {
    pub events: Vec<PositionedEvent>,
    #[serde(rename = "colorMap")]
    pub color_map: ColorMap,
}

impl GridLayout {
    /// First event occupying the cell, in output order.
    pub fn event_at(&self, day: Weekday, slot: Slot) -> Option<&PositionedEvent> {
        self.events.iter().find(|e| e.covers(day, slot))
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), LoadError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), events = self.events.len(), "exported layout");
        Ok(())
    }
}

fn day_column<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(day.column() as u64)
}
