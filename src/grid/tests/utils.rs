use crate::grid::GroupedMeeting;
use crate::grid::group::group;
use crate::meeting::{MeetingRecord, ScheduleResult};
use crate::time::{ClockTime, Meridiem};
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

pub fn id(s: &str) -> Arc<str> {
    Arc::from(s)
}

pub fn record(crn: &str, course: &str, time: &str, days: &str, location: &str) -> MeetingRecord {
    MeetingRecord {
        crn: id(crn),
        course_number: id(course),
        course_name: id(&format!("{} lecture", course)),
        professor_name: id("Staff"),
        time: id(time),
        days: id(days),
        location: id(location),
    }
}

pub fn schedule(classes: Vec<MeetingRecord>) -> ScheduleResult {
    ScheduleResult { classes }
}

pub fn grouped(crn: &str, time: &str, days: &str) -> GroupedMeeting {
    group(&[record(crn, "CS-1114", time, days, "Torg 1000")])
        .pop()
        .unwrap()
}

pub fn arb_clock() -> impl Strategy<Value = ClockTime> {
    (
        1..=12u8,
        0..60u8,
        prop_oneof![Just(Meridiem::Am), Just(Meridiem::Pm)],
    )
        .prop_map(|(hour, minute, meridiem)| ClockTime {
            hour,
            minute,
            meridiem,
        })
}

pub fn arb_crn() -> impl Strategy<Value = Arc<str>> {
    (10000..10040u32).prop_map(|n| Arc::from(n.to_string()))
}

pub fn arb_days() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![Just('M'), Just('T'), Just('W'), Just('R'), Just('F'), Just('S')],
        0..6,
    )
    .prop_map(|codes| codes.into_iter().collect())
}

pub fn arb_record() -> impl Strategy<Value = MeetingRecord> {
    (arb_crn(), arb_clock(), arb_clock(), arb_days()).prop_map(|(crn, start, end, days)| {
        let time = format!("{} - {}", start, end);
        record(&crn, "CS-1114", &time, &days, "Torg 1000")
    })
}

/// Log sink shared between the subscriber and the test body.
#[derive(Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs `f` with a thread-local subscriber and returns what it logged at
/// `WARN` and above.
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let sink = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let value = tracing::subscriber::with_default(subscriber, f);
    let logged = String::from_utf8_lossy(&sink.0.lock().unwrap()).into_owned();
    (value, logged)
}
