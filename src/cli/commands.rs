use crate::config::LayoutConfig;
use crate::core::timetable::partition_by_day;
use crate::core::{DateSheet, TimeTable};
use crate::error::{ScheduleError, ScheduleResult};
use crate::excel::ExcelExporter;
use crate::types::{DateSheetRow, DisplayRow};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Which pipeline a file is fed through
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SheetKind {
    Datesheet,
    Timetable,
}

const FORMAT_MISMATCH: &str = "The provided sheet does not match the expected layout. \
Kindly verify the integrity of the file (run with -v for details).";

#[derive(Serialize)]
struct DateSheetOutput<'a> {
    title: &'a str,
    semester: &'a str,
    rows: &'a [DateSheetRow],
}

#[derive(Serialize)]
struct TimetableOutput<'a> {
    title: &'a str,
    batches: &'a [String],
    rows: &'a [DisplayRow],
}

fn not_loaded(file: &Path) -> ScheduleError {
    eprintln!("{} {}", "⚠️ ".yellow(), FORMAT_MISMATCH.yellow());
    ScheduleError::NotLoaded(file.display().to_string())
}

/// Load a date-sheet into its loader, or report the generic mismatch
fn load_datesheet(
    file: &Path,
    config: &LayoutConfig,
    title: Option<String>,
    semester: Option<String>,
) -> ScheduleResult<DateSheet> {
    let mut sheet = DateSheet::new(config.datesheet.clone());
    if let Some(title) = title {
        sheet = sheet.with_title(title);
    }
    if let Some(semester) = semester {
        sheet = sheet.with_semester(semester);
    }
    if sheet.load(file) {
        Ok(sheet)
    } else {
        Err(not_loaded(file))
    }
}

fn load_timetable(file: &Path, config: &LayoutConfig, title: Option<String>) -> ScheduleResult<TimeTable> {
    let mut timetable = TimeTable::new(config.timetable.clone());
    if let Some(title) = title {
        timetable = timetable.with_title(title);
    }
    if timetable.load(file) {
        Ok(timetable)
    } else {
        Err(not_loaded(file))
    }
}

/// Selected date-sheet rows: by catalog key, else by code, else everything
fn select_datesheet_rows(sheet: &DateSheet, courses: &[String], codes: &[String]) -> Vec<DateSheetRow> {
    if !courses.is_empty() {
        sheet.read_by_course(courses)
    } else if !codes.is_empty() {
        sheet.read_by_code(codes)
    } else {
        sheet
            .model()
            .map(|model| model.rows().to_vec())
            .unwrap_or_default()
    }
}

/// Selected timetable rows: by course, else the whole week
fn select_timetable_rows(timetable: &TimeTable, courses: &[String]) -> Vec<DisplayRow> {
    if !courses.is_empty() {
        return timetable.read_by_course(courses);
    }
    timetable
        .model()
        .map(|model| partition_by_day(model.rows().to_vec()))
        .unwrap_or_default()
}

/// Execute the datesheet command
#[allow(clippy::too_many_arguments)]
pub fn datesheet(
    file: PathBuf,
    courses: Vec<String>,
    codes: Vec<String>,
    list: bool,
    json: bool,
    title: Option<String>,
    semester: Option<String>,
    config: &LayoutConfig,
) -> ScheduleResult<()> {
    let sheet = load_datesheet(&file, config, title, semester)?;
    let Some(model) = sheet.model() else {
        return Err(not_loaded(&file));
    };

    if list {
        if json {
            println!("{}", serde_json::to_string_pretty(model.courses())?);
        } else {
            for course in model.courses() {
                println!("{}", course.key);
            }
        }
        return Ok(());
    }

    let rows = select_datesheet_rows(&sheet, &courses, &codes);

    if json {
        let output = DateSheetOutput {
            title: &model.title,
            semester: &model.semester,
            rows: &rows,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", model.title.bold().green());
    println!("{}\n", model.semester.cyan());
    print!("{}", render_datesheet(&rows));
    println!("\n{} {} rows", "✅".green(), rows.len());
    Ok(())
}

/// Execute the timetable command
pub fn timetable(
    file: PathBuf,
    courses: Vec<String>,
    list: bool,
    json: bool,
    title: Option<String>,
    config: &LayoutConfig,
) -> ScheduleResult<()> {
    let timetable = load_timetable(&file, config, title)?;
    let Some(model) = timetable.model() else {
        return Err(not_loaded(&file));
    };

    if list {
        if json {
            println!("{}", serde_json::to_string_pretty(model.courses())?);
        } else {
            for course in model.courses() {
                println!("{}", course);
            }
        }
        return Ok(());
    }

    let rows = select_timetable_rows(&timetable, &courses);

    if json {
        let output = TimetableOutput {
            title: &model.title,
            batches: &model.batches,
            rows: &rows,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", model.title.bold().green());
    if !model.batches.is_empty() {
        println!("{}", model.batches.join(", ").cyan());
    }
    println!();
    print!("{}", render_timetable(&rows));
    let entries = rows.iter().filter(|row| !row.is_separator()).count();
    println!("\n{} {} rows", "✅".green(), entries);
    Ok(())
}

/// Execute the export command
pub fn export(
    input: PathBuf,
    output: PathBuf,
    kind: SheetKind,
    courses: Vec<String>,
    config: &LayoutConfig,
) -> ScheduleResult<()> {
    println!("{}", "🔥 Schedule Forge - Excel Export".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    let written = match kind {
        SheetKind::Datesheet => {
            let sheet = load_datesheet(&input, config, None, None)?;
            let rows = select_datesheet_rows(&sheet, &courses, &[]);
            ExcelExporter::new("Date Sheet").export_datesheet(&rows, &output)?;
            rows.len()
        }
        SheetKind::Timetable => {
            let timetable = load_timetable(&input, config, None)?;
            let rows = select_timetable_rows(&timetable, &courses);
            ExcelExporter::new("Timetable").export_timetable(&rows, &output)?;
            rows.iter().filter(|row| !row.is_separator()).count()
        }
    };

    println!("{}", "✅ Export Complete!".bold().green());
    println!("   {} rows written to {}\n", written, output.display());
    Ok(())
}

/// Print the effective layout configuration as YAML
pub fn print_config(config: &LayoutConfig) -> ScheduleResult<()> {
    print!("{}", config.to_yaml()?);
    Ok(())
}

//==============================================================================
// Plain-text rendering
//==============================================================================

fn render_table(headers: &[&str], rows: &[Option<Vec<&str>>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for cells in rows.iter().flatten() {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[&str]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut out = line(headers);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("{}\n", rule.join("  ")));
    for row in rows {
        match row {
            Some(cells) => out.push_str(&line(cells)),
            None => out.push('\n'),
        }
    }
    out
}

/// Render date-sheet rows as an aligned text table
pub fn render_datesheet(rows: &[DateSheetRow]) -> String {
    let cells: Vec<Option<Vec<&str>>> = rows
        .iter()
        .map(|r| {
            Some(vec![
                r.date.as_str(),
                r.day.as_str(),
                r.time.as_str(),
                r.code.as_str(),
                r.course.as_str(),
            ])
        })
        .collect();
    render_table(&["Date", "Day", "Time", "Code", "Course"], &cells)
}

/// Render timetable rows as an aligned text table; separators become blank lines
pub fn render_timetable(rows: &[DisplayRow]) -> String {
    let cells: Vec<Option<Vec<&str>>> = rows
        .iter()
        .map(|row| {
            row.entry().map(|r| {
                vec![
                    r.day.as_str(),
                    r.time.as_str(),
                    r.room.as_str(),
                    r.course.as_str(),
                ]
            })
        })
        .collect();
    render_table(&["Day", "Time", "Room", "Course"], &cells)
}
