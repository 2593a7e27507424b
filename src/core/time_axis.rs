//! Time axis inference for timetable grids.
//!
//! Only one header cell carries a time annotation; every other slot column
//! is unlabeled. The axis is projected from that anchor with a fixed slot
//! duration. Parsing failures never abort a load: the anchor falls back to
//! the configured default start.

use chrono::{Duration, NaiveTime};
use regex::Regex;
use tracing::{debug, warn};

/// Display format of every slot label ("08:10 AM")
pub const TIME_FORMAT: &str = "%I:%M %p";

/// Separator between the start and end of a course block, and between
/// joined slot labels
pub const RANGE_SEPARATOR: &str = " - ";

const ANCHOR_PATTERN: &str = r"(?i)(\d{1,2})[:.]?(\d{2})\.?\s*(am|pm)\.?";

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Parse a rendered slot label back into a time
pub fn parse_label(label: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(label.trim(), TIME_FORMAT).ok()
}

/// Start of a "start - end" range, used purely for ordering
pub fn start_of(range: &str) -> Option<NaiveTime> {
    range.split(RANGE_SEPARATOR).next().and_then(parse_label)
}

/// Extract a clock time from a free-form annotation such as "8.00am." or
/// "08:00 PM".
pub fn parse_anchor(text: &str) -> Option<NaiveTime> {
    let pattern = Regex::new(ANCHOR_PATTERN).ok()?;
    let caps = pattern.captures(text)?;

    let mut hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = caps.get(2)?.as_str().parse().ok()?;
    let pm = caps.get(3)?.as_str().eq_ignore_ascii_case("pm");

    if pm && hour < 12 {
        hour += 12;
    } else if !pm && hour == 12 {
        hour = 0;
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Anchor time for the axis, degrading to `default` when the annotation is
/// missing or unreadable
pub fn resolve_anchor(text: Option<&str>, default: NaiveTime) -> NaiveTime {
    match text.and_then(parse_anchor) {
        Some(time) => {
            debug!(anchor = %format_time(time), "resolved anchor time");
            time
        }
        None => {
            warn!(
                annotation = text.unwrap_or(""),
                fallback = %format_time(default),
                "no anchor time found, using default start"
            );
            default
        }
    }
}

/// Column index → slot label mapping for one parsed grid
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    labels: Vec<(usize, String)>,
    slot: Duration,
}

impl TimeAxis {
    /// Project labels for columns `first_col..end_col`.
    ///
    /// The anchor marks the start of the first lecture, so the first slot
    /// column is labelled one slot later.
    pub fn project(anchor: NaiveTime, slot_minutes: i64, first_col: usize, end_col: usize) -> Self {
        let slot = Duration::minutes(slot_minutes);
        let mut current = anchor;
        let labels = (first_col..end_col)
            .map(|col| {
                current = current.overflowing_add_signed(slot).0;
                (col, format_time(current))
            })
            .collect();
        Self { labels, slot }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, col: usize) -> Option<&str> {
        self.labels
            .iter()
            .find(|(c, _)| *c == col)
            .map(|(_, label)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.labels.iter().map(|(col, label)| (*col, label.as_str()))
    }

    /// Join the labels of the occupied columns
    pub fn join(&self, cols: &[usize]) -> String {
        cols.iter()
            .filter_map(|col| self.label(*col))
            .collect::<Vec<_>>()
            .join(RANGE_SEPARATOR)
    }

    /// Collapse a joined label string into "start - end".
    ///
    /// Each label marks the end of its slot, so the displayed start is moved
    /// back by one slot.
    pub fn span_range(&self, joined: &str) -> String {
        let mut labels = joined.split(RANGE_SEPARATOR);
        let first = labels.next().unwrap_or_default();
        let last = labels.last().unwrap_or(first);

        let start = match parse_label(first) {
            Some(time) => format_time(time.overflowing_sub_signed(self.slot).0),
            None => first.to_string(),
        };
        format!("{}{}{}", start, RANGE_SEPARATOR, last)
    }
}
