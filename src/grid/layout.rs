use crate::color::ColorMap;
use crate::grid::expand::expand;
use crate::grid::group::group;
use crate::grid::position::{position, resolve_slots};
use crate::grid::{GridLayout, PositionedEvent};
use crate::meeting::ScheduleResult;
use tracing::debug;

pub fn layout(schedule: &ScheduleResult) -> GridLayout {
    let color_map = ColorMap::assign(&schedule.classes);
    let groups = group(&schedule.classes);

    // groups without a recognized weekday never reach the grid
    let placed = groups.iter().filter(|g| !g.days.is_empty()).collect::<Vec<_>>();
    let instances = placed.iter().map(|g| g.days.len()).sum::<usize>();

    let events = placed
        .into_iter()
        .filter_map(|g| color_map.get(&g.record.crn).map(|color| (g, color)))
        .flat_map(|(g, color)| {
            let slots = resolve_slots(g);
            expand(g).filter_map(move |(g, day)| position(g, day, slots, color))
        })
        .collect::<Vec<PositionedEvent>>();

    debug!(
        instances,
        events = events.len(),
        sections = color_map.len(),
        "laid out weekly grid"
    );
    GridLayout { events, color_map }
}
