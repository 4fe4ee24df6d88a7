use crate::grid::GroupedMeeting;
use crate::meeting::{SectionId, Weekday};
use crate::time::Time;
use std::sync::Arc;

/// Back-to-back meetings need at least this much time between them.
pub const MIN_GAP_MINUTES: u16 = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct Booking {
    pub crn: SectionId,
    pub course_number: Arc<str>,
    pub start: Time,
    pub end: Time,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Conflict {
    pub day: Weekday,
    pub earlier: Booking,
    pub later: Booking,
}

impl Conflict {
    pub fn is_overlap(&self) -> bool {
        Time::is_overlapping(
            &(self.earlier.start, self.earlier.end),
            &(self.later.start, self.later.end),
        )
    }
}

/// Pairs of different sections that overlap, or leave less than
/// `MIN_GAP_MINUTES` between them, on the same weekday. Meetings whose times
/// do not parse are skipped.
pub fn find_conflicts(groups: &[GroupedMeeting]) -> Vec<Conflict> {
    Weekday::ALL
        .into_iter()
        .flat_map(|day| {
            let mut bookings = groups
                .iter()
                .filter(|g| g.days.contains(day))
                .filter_map(|g| {
                    g.times.bounds().map(|(start, end)| Booking {
                        crn: g.record.crn.clone(),
                        course_number: g.record.course_number.clone(),
                        start,
                        end,
                    })
                })
                .collect::<Vec<_>>();
            bookings.sort_by_key(|b| (b.start, b.end));

            let mut conflicts = vec![];
            for (i, earlier) in bookings.iter().enumerate() {
                for later in bookings
                    .iter()
                    .skip(i + 1)
                    .take_while(|later| later.start < earlier.end + MIN_GAP_MINUTES)
                {
                    if later.crn != earlier.crn {
                        conflicts.push(Conflict {
                            day,
                            earlier: earlier.clone(),
                            later: later.clone(),
                        });
                    }
                }
            }
            conflicts
        })
        .collect()
}
