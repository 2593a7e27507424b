use thiserror::Error;

pub type ScheduleResult<T> = Result<T, ScheduleError>;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Malformed workbook: {0}")]
    MalformedWorkbook(String),

    #[error("Unsupported layout: {0}")]
    UnsupportedLayout(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Workbook not loaded: {0}")]
    NotLoaded(String),
}

impl From<calamine::Error> for ScheduleError {
    fn from(err: calamine::Error) -> Self {
        ScheduleError::Workbook(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ScheduleError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ScheduleError::Export(err.to_string())
    }
}
