use crate::grid::GroupedMeeting;
use crate::meeting::{DaySet, MeetingRecord, SectionId};
use crate::time::TimeRange;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tracing::debug;

/// Merges records with the same section and time range, unioning their day
/// codes. Output keeps the first-seen order of keys.
pub fn group(records: &[MeetingRecord]) -> Vec<GroupedMeeting> {
    let mut index: HashMap<(SectionId, Arc<str>), usize> = HashMap::new();
    let groups = records.iter().fold(Vec::new(), |mut groups: Vec<GroupedMeeting>, record| {
        let days = DaySet::parse(&record.days);
        match index.entry((record.crn.clone(), record.time.clone())) {
            Entry::Occupied(entry) => {
                let existing = &mut groups[*entry.get()];
                existing.days = existing.days.union(days);
            }
            Entry::Vacant(entry) => {
                entry.insert(groups.len());
                groups.push(GroupedMeeting {
                    record: record.clone(),
                    days,
                    times: TimeRange::parse(&record.time),
                });
            }
        }
        groups
    });
    debug!(records = records.len(), groups = groups.len(), "grouped meetings");
    groups
}
