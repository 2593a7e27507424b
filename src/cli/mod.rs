//! CLI command handlers

pub mod commands;

pub use commands::{datesheet, export, print_config, timetable, SheetKind};
