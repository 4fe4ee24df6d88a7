use crate::color::Color;
use crate::grid::{GroupedMeeting, PositionedEvent, SLOT_COUNT};
use crate::meeting::Weekday;
use crate::time::{ClockTime, Slot, TimeParseError};
use tracing::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotSpan {
    pub start: Slot,
    pub span: i32,
}

impl SlotSpan {
    pub fn new(start: Slot, end: Slot) -> SlotSpan {
        SlotSpan {
            start,
            span: (end - start).max(1),
        }
    }

    /// Out-of-window spans are dropped whole, never clipped.
    pub fn fits_grid(&self) -> bool {
        self.start.0 >= 0 && self.start.0 + self.span <= SLOT_COUNT
    }
}

/// Start and span of a group's time range. A side that fails to parse lands on
/// slot 0 and is reported, so one bad record never blocks the rest.
pub fn resolve_slots(group: &GroupedMeeting) -> SlotSpan {
    let start = side_slot(group, &group.times.start);
    let end = side_slot(group, &group.times.end);
    SlotSpan::new(start, end)
}

fn side_slot(group: &GroupedMeeting, side: &Result<ClockTime, TimeParseError>) -> Slot {
    match side {
        Ok(clock) => Slot::from_time(clock.to_time()),
        Err(err) => {
            warn!(
                crn = %group.record.crn,
                course = %group.record.course_number,
                time = %group.record.time,
                "unparseable meeting time, using first slot: {}",
                err
            );
            Slot(0)
        }
    }
}

pub fn position(
    group: &GroupedMeeting,
    day: Weekday,
    slots: SlotSpan,
    color: Color,
) -> Option<PositionedEvent> {
    slots.fits_grid().then(|| PositionedEvent {
        record: group.record.clone(),
        day,
        start_slot: slots.start,
        slot_span: slots.span,
        color,
        all_days: group.days,
    })
}
