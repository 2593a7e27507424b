use clap::{Parser, Subcommand};
use schedule_forge::cli::{self, SheetKind};
use schedule_forge::config::LayoutConfig;
use schedule_forge::error::ScheduleResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "schedule-forge")]
#[command(about = "Normalize university date-sheets and timetables from Excel.")]
#[command(long_about = "Schedule Forge - Excel date-sheets and timetables as clean tables

Rebuilds the structure the published sheets only imply visually (merged
course blocks, repeated Code/course column pairs, a single time annotation)
and prints one row per exam slot or course block.

COMMANDS:
  datesheet   - Normalize an exam date-sheet and filter by course
  timetable   - Normalize a weekly timetable and filter by course
  export      - Write the normalized (filtered) table to .xlsx
  config      - Print the effective layout configuration

EXAMPLES:
  schedule-forge datesheet finals.xlsx --list
  schedule-forge datesheet finals.xlsx -c \"CS101 - Intro to CS\"
  schedule-forge timetable spring.xlsx -c \"Data Structures (BCS 3A)\"
  schedule-forge export spring.xlsx mine.xlsx --kind timetable -c \"OOP (BCS 2A)\"")]
#[command(version)]
struct Cli {
    /// Layout configuration file (YAML)
    #[arg(long, global = true, env = "SCHEDULE_FORGE_CONFIG")]
    config: Option<PathBuf>,

    /// Log parsing details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Normalize an exam date-sheet.

Each (Code, <time slot>) column pair becomes rows of
Date | Day | Time | Code | Course, sorted by date, day, time and code.

SELECTION:
  --course takes catalog keys as printed by --list (\"CODE - TITLE\").
  --code selects every sitting of a course code.
  Without a selection the whole date-sheet is printed.")]
    /// Normalize an exam date-sheet
    Datesheet {
        /// Path to the workbook (.xls, .xlsx, .xlsm)
        file: PathBuf,

        /// Catalog key to select ("CODE - TITLE"), repeatable
        #[arg(short, long = "course")]
        courses: Vec<String>,

        /// Course code to select, repeatable
        #[arg(long = "code", conflicts_with = "courses")]
        codes: Vec<String>,

        /// List the course catalog instead of rows
        #[arg(short, long)]
        list: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Override the title read from the sheet
        #[arg(long)]
        title: Option<String>,

        /// Override the semester line read from the sheet
        #[arg(long)]
        semester: Option<String>,
    },

    #[command(long_about = "Normalize a weekly class timetable.

Merged course blocks become rows of Day | Time | Room | Course with a
\"start - end\" time range inferred from the sheet's time annotation.

SELECTION:
  --course takes course names exactly as printed by --list.
  When all selected rows share one section tag, the tag is dropped.
  Days are separated by a blank row.")]
    /// Normalize a weekly class timetable
    Timetable {
        /// Path to the workbook (.xls, .xlsx, .xlsm)
        file: PathBuf,

        /// Course to select, repeatable
        #[arg(short, long = "course")]
        courses: Vec<String>,

        /// List the course catalog instead of rows
        #[arg(short, long)]
        list: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Override the title read from the sheet
        #[arg(long)]
        title: Option<String>,
    },

    /// Export the normalized table to Excel .xlsx
    Export {
        /// Path to the source workbook
        input: PathBuf,

        /// Output Excel file path (.xlsx)
        output: PathBuf,

        /// Kind of sheet being exported
        #[arg(short, long, value_enum)]
        kind: SheetKind,

        /// Course to select, repeatable
        #[arg(short, long = "course")]
        courses: Vec<String>,
    },

    /// Print the effective layout configuration as YAML
    Config,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "schedule_forge=debug"
    } else {
        "schedule_forge=error"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

fn main() -> ScheduleResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = LayoutConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Datesheet {
            file,
            courses,
            codes,
            list,
            json,
            title,
            semester,
        } => cli::datesheet(file, courses, codes, list, json, title, semester, &config),

        Commands::Timetable {
            file,
            courses,
            list,
            json,
            title,
        } => cli::timetable(file, courses, list, json, title, &config),

        Commands::Export {
            input,
            output,
            kind,
            courses,
        } => cli::export(input, output, kind, courses, &config),

        Commands::Config => cli::print_config(&config),
    }
}
