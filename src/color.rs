use crate::meeting::{MeetingRecord, SectionId};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Pink,
    Indigo,
    Teal,
    Orange,
    Cyan,
    Lime,
    Amber,
    Emerald,
    Violet,
    Fuchsia,
}

/// Fixed display palette, cycled in this order.
pub const PALETTE: [Color; 15] = [
    Color::Red,
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::Purple,
    Color::Pink,
    Color::Indigo,
    Color::Teal,
    Color::Orange,
    Color::Cyan,
    Color::Lime,
    Color::Amber,
    Color::Emerald,
    Color::Violet,
    Color::Fuchsia,
];

impl Color {
    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Pink => "pink",
            Color::Indigo => "indigo",
            Color::Teal => "teal",
            Color::Orange => "orange",
            Color::Cyan => "cyan",
            Color::Lime => "lime",
            Color::Amber => "amber",
            Color::Emerald => "emerald",
            Color::Violet => "violet",
            Color::Fuchsia => "fuchsia",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Red => (0xFE, 0xCA, 0xCA),
            Color::Blue => (0xBF, 0xDB, 0xFE),
            Color::Green => (0xBB, 0xF7, 0xD0),
            Color::Yellow => (0xFE, 0xF0, 0x8A),
            Color::Purple => (0xE9, 0xD5, 0xFF),
            Color::Pink => (0xFB, 0xCF, 0xE8),
            Color::Indigo => (0xC7, 0xD2, 0xFE),
            Color::Teal => (0x99, 0xF6, 0xE4),
            Color::Orange => (0xFE, 0xD7, 0xAA),
            Color::Cyan => (0xA5, 0xF3, 0xFC),
            Color::Lime => (0xD9, 0xF9, 0x9D),
            Color::Amber => (0xFD, 0xE6, 0x8A),
            Color::Emerald => (0xA7, 0xF3, 0xD0),
            Color::Violet => (0xDD, 0xD6, 0xFE),
            Color::Fuchsia => (0xF5, 0xD0, 0xFE),
        }
    }

    pub fn hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }

    pub fn terminal(self) -> colored::Color {
        let (r, g, b) = self.rgb();
        colored::Color::TrueColor { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

/// Section -> color, in first-occurrence order of the raw input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorMap {
    entries: Vec<(SectionId, Color)>,
    index: HashMap<SectionId, usize>,
}

impl ColorMap {
    /// The n-th distinct section gets `PALETTE[n % 15]`; repeats reuse it.
    pub fn assign(records: &[MeetingRecord]) -> ColorMap {
        records.iter().fold(ColorMap::default(), |mut map, record| {
            if !map.index.contains_key(&record.crn) {
                let color = PALETTE[map.entries.len() % PALETTE.len()];
                map.index.insert(record.crn.clone(), map.entries.len());
                map.entries.push((record.crn.clone(), color));
            }
            map
        })
    }

    pub fn get(&self, section: &str) -> Option<Color> {
        self.index.get(section).map(|i| self.entries[*i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SectionId, Color)> {
        self.entries.iter().map(|(id, color)| (id, *color))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ColorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, color) in &self.entries {
            map.serialize_entry(id, color)?;
        }
        map.end()
    }
}
