use crate::conflict::Conflict;
use crate::grid::{DAY_COLUMNS, GridLayout, SLOT_COUNT, SLOTS_PER_HOUR};
use crate::meeting::{MeetingRecord, ScheduleResult, Weekday};
use crate::time::{Slot, Time};
use colored::Colorize;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

const CELL_WIDTH: usize = 14;
const LABEL_WIDTH: usize = 9;

#[derive(Tabled)]
struct ClassRow {
    #[tabled(rename = "CRN")]
    crn: String,
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Course Name")]
    name: String,
    #[tabled(rename = "Instructor")]
    instructor: String,
    #[tabled(rename = "Time & Days")]
    when: String,
    #[tabled(rename = "Location")]
    location: String,
}

impl From<&MeetingRecord> for ClassRow {
    fn from(record: &MeetingRecord) -> Self {
        ClassRow {
            crn: record.crn.to_string(),
            course: record.course_number.to_string(),
            name: record.course_name.to_string(),
            instructor: record.professor_name.to_string(),
            when: format!("{} on {}", record.time, record.days),
            location: record.location.to_string(),
        }
    }
}

#[derive(Tabled)]
struct LegendRow {
    #[tabled(rename = "")]
    swatch: String,
    #[tabled(rename = "CRN")]
    crn: String,
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Hex")]
    hex: String,
}

#[derive(Tabled)]
struct ConflictRow {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "First")]
    earlier: String,
    #[tabled(rename = "Second")]
    later: String,
    #[tabled(rename = "Kind")]
    kind: String,
}

fn styled(table: &mut Table) -> String {
    table.with(Style::rounded());
    table.with(Alignment::left());
    table.to_string()
}

fn class_rows<'a>(records: impl Iterator<Item = &'a MeetingRecord>) -> Option<String> {
    let rows = records.map(ClassRow::from).collect::<Vec<_>>();
    (!rows.is_empty()).then(|| styled(&mut Table::new(rows)))
}

pub fn class_table(schedule: &ScheduleResult) -> String {
    class_rows(schedule.classes.iter()).unwrap_or_else(|| "No classes scheduled.".to_string())
}

pub fn online_table(schedule: &ScheduleResult) -> String {
    class_rows(schedule.classes.iter().filter(|c| c.is_online()))
        .unwrap_or_else(|| "No online classes.".to_string())
}

pub fn physical_table(schedule: &ScheduleResult) -> String {
    class_rows(schedule.classes.iter().filter(|c| !c.is_online()))
        .unwrap_or_else(|| "No in-person classes.".to_string())
}

pub fn legend(layout: &GridLayout, schedule: &ScheduleResult) -> String {
    if layout.color_map.is_empty() {
        return "No sections to color.".to_string();
    }
    let rows = layout
        .color_map
        .iter()
        .map(|(crn, color)| LegendRow {
            swatch: "  ".on_color(color.terminal()).to_string(),
            crn: crn.to_string(),
            course: schedule
                .classes
                .iter()
                .find(|c| c.crn == *crn)
                .map(|c| c.course_number.to_string())
                .unwrap_or_default(),
            color: color.name().to_string(),
            hex: color.hex(),
        })
        .collect::<Vec<_>>();
    styled(&mut Table::new(rows))
}

pub fn conflict_table(conflicts: &[Conflict]) -> String {
    if conflicts.is_empty() {
        return "No conflicts found.".to_string();
    }
    let booking = |b: &crate::conflict::Booking| {
        format!("{} ({}) {}-{}", b.course_number, b.crn, b.start, b.end)
    };
    let rows = conflicts
        .iter()
        .map(|c| ConflictRow {
            day: c.day.to_string(),
            earlier: booking(&c.earlier),
            later: booking(&c.later),
            kind: if c.is_overlap() { "overlap" } else { "tight gap" }.to_string(),
        })
        .collect::<Vec<_>>();
    styled(&mut Table::new(rows))
}

/// `7:00 AM` style label used on the grid's hour rows.
pub fn hour_label(time: Time) -> String {
    let hour = time.hour();
    let display = if hour > 12 { hour - 12 } else if hour == 0 { 12 } else { hour };
    let marker = if hour >= 12 { "PM" } else { "AM" };
    format!("{}:{:02} {}", display, time.minute(), marker)
}

/// Terminal rendering of the weekly grid, one line per 15-minute slot.
pub fn weekly_grid(layout: &GridLayout) -> String {
    let mut out = String::new();
    out.push_str(&" ".repeat(LABEL_WIDTH));
    for day in Weekday::ALL {
        out.push_str(&format!("│{:^w$}", day.short_name(), w = CELL_WIDTH));
    }
    out.push_str("│\n");
    out.push_str(&"─".repeat(LABEL_WIDTH + DAY_COLUMNS * (CELL_WIDTH + 1) + 1));
    out.push('\n');

    for row in 0..SLOT_COUNT {
        let slot = Slot(row);
        let label = slot
            .start_time()
            .filter(|_| row % SLOTS_PER_HOUR as i32 == 0)
            .map(hour_label)
            .unwrap_or_default();
        out.push_str(&format!("{:>w$}", label, w = LABEL_WIDTH));

        for day in Weekday::ALL {
            out.push('│');
            match layout.event_at(day, slot) {
                Some(event) => {
                    let text = if event.start_slot == slot {
                        event.record.course_number.to_string()
                    } else {
                        String::new()
                    };
                    let cell = format!("{:<w$.w$}", text, w = CELL_WIDTH);
                    out.push_str(&cell.black().on_color(event.color.terminal()).to_string());
                }
                None => out.push_str(&" ".repeat(CELL_WIDTH)),
            }
        }
        out.push_str("│\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::layout::layout;
    use crate::grid::tests::utils::{record, schedule};

    #[test]
    fn test_empty_schedule_messages() {
        let empty = ScheduleResult::default();
        assert_eq!("No classes scheduled.", class_table(&empty));
        assert_eq!("No online classes.", online_table(&empty));
        assert_eq!("No sections to color.", legend(&layout(&empty), &empty));
        assert_eq!("No conflicts found.", conflict_table(&[]));
    }

    #[test]
    fn test_class_table_lists_time_and_days() {
        let s = schedule(vec![record("100", "CS-1114", "8:00AM - 8:50AM", "MWF", "Torg 1000")]);
        let table = class_table(&s);
        assert!(table.contains("CS-1114"));
        assert!(table.contains("8:00AM - 8:50AM on MWF"));
    }

    #[test]
    fn test_online_split() {
        let s = schedule(vec![
            record("100", "CS-1114", "8:00AM - 8:50AM", "MWF", "Torg 1000"),
            record("200", "ENGL-1105", "", "", "Online: Asynchronous"),
        ]);
        let online = online_table(&s);
        assert!(online.contains("ENGL-1105"));
        assert!(!online.contains("CS-1114"));
        assert!(physical_table(&s).contains("CS-1114"));
    }

    #[test]
    fn test_hour_labels() {
        assert_eq!("7:00 AM", hour_label(Time(7 * 60)));
        assert_eq!("12:00 PM", hour_label(Time(12 * 60)));
        assert_eq!("8:00 PM", hour_label(Time(20 * 60)));
    }

    #[test]
    fn test_weekly_grid_shape() {
        colored::control::set_override(false);
        let s = schedule(vec![record("100", "CS-1114", "8:00AM - 8:50AM", "MWF", "Torg 1000")]);
        let grid = weekly_grid(&layout(&s));
        let lines = grid.lines().collect::<Vec<_>>();
        assert_eq!(2 + SLOT_COUNT as usize, lines.len());
        assert!(lines[0].contains("Mon"));
        assert!(lines[2].contains("7:00 AM"));
        assert!(!lines[3].contains("AM"));
        assert!(lines[6].contains("8:00 AM"));
        assert!(lines[6].contains("CS-1114"));
        assert_eq!(3, grid.matches("CS-1114").count());
    }
}
