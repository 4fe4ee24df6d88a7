use crate::grid::GroupedMeeting;
use crate::meeting::Weekday;

/// One instance per weekday the group meets on, Monday first. A group with no
/// recognized day codes yields nothing.
pub fn expand(group: &GroupedMeeting) -> impl Iterator<Item = (&GroupedMeeting, Weekday)> {
    group.days.iter().map(move |day| (group, day))
}
