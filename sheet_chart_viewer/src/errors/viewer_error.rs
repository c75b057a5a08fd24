use crate::common::*;

use crate::enums::chart_kind::*;

#[doc = "Coarse failure category, used for logging and for telling causes apart without reading messages"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Staging,
    Parse,
    Resolve,
    Render,
    Cleanup,
}

#[doc = r#"
    Every way an upload can fail between receipt and cleanup.
    Each variant belongs to exactly one `ErrorKind`.
"#]
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("no file field in the upload")]
    MissingFile,

    #[error("uploaded file has an empty filename")]
    EmptyFilename,

    #[error("'{filename}' is not an xlsx, xls or csv file")]
    InvalidExtension { filename: String },

    #[error("malformed upload: {0}")]
    Upload(String),

    #[error("failed to stage upload at {path:?}: {source}")]
    Staging {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("column '{column}' not found (available: {available:?})")]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    #[error("row {row}: '{raw}' is not a numeric value")]
    InvalidValue { row: usize, raw: String },

    #[error("the sheet has a header row but no data rows")]
    EmptyTable,

    #[error("category/value length mismatch: {categories} vs {values}")]
    LengthMismatch { categories: usize, values: usize },

    #[error("failed to render the {kind} chart: {reason}")]
    Render { kind: ChartKind, reason: String },

    #[error("failed to prepare chart output at {path:?}: {source}")]
    ChartOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to remove {path:?}: {source}")]
    Cleanup {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ViewerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingFile
            | Self::EmptyFilename
            | Self::InvalidExtension { .. }
            | Self::Upload(_) => ErrorKind::Validation,
            Self::Staging { .. } => ErrorKind::Staging,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::ColumnNotFound { .. }
            | Self::InvalidValue { .. }
            | Self::EmptyTable
            | Self::LengthMismatch { .. } => ErrorKind::Resolve,
            Self::Render { .. } | Self::ChartOutput { .. } => ErrorKind::Render,
            Self::Cleanup { .. } => ErrorKind::Cleanup,
        }
    }

    #[doc = "Text shown to the user as a flash message on the entry view"]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingFile | Self::EmptyFilename => "No file selected".to_string(),
            Self::InvalidExtension { .. } => {
                "Invalid file format. Please upload an Excel or CSV file.".to_string()
            }
            Self::Upload(_) | Self::Staging { .. } => {
                "The upload could not be received. Please try again.".to_string()
            }
            Self::Parse { reason, .. } => format!("Error reading the file: {}", reason),
            _ => format!("Error processing the file: {}", self),
        }
    }

    pub fn render(kind: ChartKind, reason: impl ToString) -> Self {
        Self::Render {
            kind,
            reason: reason.to_string(),
        }
    }

    pub fn parse(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
