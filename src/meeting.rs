use crate::error::LoadError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

pub type SectionId = Arc<str>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn from_code(code: char) -> Option<Weekday> {
        match code {
            'M' => Some(Weekday::Monday),
            'T' => Some(Weekday::Tuesday),
            'W' => Some(Weekday::Wednesday),
            'R' => Some(Weekday::Thursday),
            'F' => Some(Weekday::Friday),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            Weekday::Monday => 'M',
            Weekday::Tuesday => 'T',
            Weekday::Wednesday => 'W',
            Weekday::Thursday => 'R',
            Weekday::Friday => 'F',
        }
    }

    /// Grid column, Monday = 0.
    pub fn column(self) -> usize {
        self as usize
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Set of weekdays, iterated Monday first regardless of insertion order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DaySet(u8);

impl DaySet {
    /// Unrecognized codes are dropped.
    pub fn parse(codes: &str) -> DaySet {
        codes
            .chars()
            .filter_map(Weekday::from_code)
            .fold(DaySet::default(), |set, day| set.with(day))
    }

    pub fn with(self, day: Weekday) -> DaySet {
        DaySet(self.0 | 1 << day.column())
    }

    pub fn union(self, other: DaySet) -> DaySet {
        DaySet(self.0 | other.0)
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0 & 1 << day.column() != 0
    }

    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        Weekday::ALL.into_iter().filter(move |d| self.contains(*d))
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.iter().try_for_each(|d| write!(f, "{}", d.code()))
    }
}

impl Serialize for DaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One row from the scheduling service: a section meeting at one time
/// range on one or more days.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub crn: SectionId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub course_number: Arc<str>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub course_name: Arc<str>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub professor_name: Arc<str>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: Arc<str>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub days: Arc<str>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: Arc<str>,
}

impl MeetingRecord {
    pub fn is_online(&self) -> bool {
        self.location.to_lowercase().contains("online")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub classes: Vec<MeetingRecord>,
}

impl ScheduleResult {
    pub fn load_from_file(path: &Path) -> Result<Self, LoadError> {
        let data = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SectionId, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }
    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => Arc::from(s),
        Some(Raw::Number(n)) => Arc::from(n.to_string()),
        None => SectionId::default(),
    })
}

/// Upstream rows sometimes carry `null` where a value is expected; treat it
/// like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
