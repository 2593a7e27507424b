//! Course title cleanup and section tags.
//!
//! Timetable cells look like "Data Structures (BCS-3A,BCS-3B)"; the
//! parenthesized part names the sections attending.

use crate::types::TimetableRow;
use regex::{Captures, Regex};
use std::collections::BTreeSet;

/// Normalize the parenthesized groups of a course title: hyphens become
/// spaces and every comma is followed by a space.
pub fn clean_course_title(input: &str) -> String {
    let (Ok(group), Ok(comma)) = (Regex::new(r"\((.*?)\)"), Regex::new(r",([^ ])")) else {
        return input.trim().to_string();
    };

    let cleaned = group.replace_all(input, |caps: &Captures| {
        let inner = caps[1].replace('-', " ");
        format!("({})", comma.replace_all(&inner, ", $1"))
    });
    cleaned.trim().to_string()
}

/// First "(...)" of a course title, parentheses included
pub fn extract_section(course: &str) -> Option<&str> {
    let start = course.find('(')?;
    let end = start + course[start..].find(')')?;
    Some(&course[start..=end])
}

/// Strip the section tag from every row when the rows carry exactly one
/// distinct tag. Rows without a tag do not count as a second section.
///
/// Returns the tag that was removed.
pub fn collapse_single_section(rows: &mut [TimetableRow]) -> Option<String> {
    let sections: BTreeSet<String> = rows
        .iter()
        .filter_map(|row| extract_section(&row.course))
        .map(str::to_string)
        .collect();

    if sections.len() != 1 {
        return None;
    }
    let section = sections.into_iter().next()?;
    for row in rows.iter_mut() {
        row.course = row.course.replace(&section, "").trim().to_string();
    }
    Some(section)
}
