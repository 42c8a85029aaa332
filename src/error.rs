//! Error types shared by the loader, the export layer and the interactive menus.

use plotters::drawing::DrawingAreaErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors while reading the review dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// `row` is 1-based and counts data rows only.
    #[error("row {row}: column {column} is not an integer: {value:?}")]
    InvalidInteger {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Failures while writing a summary file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while drawing a chart file.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("nothing to plot")]
    NoData,

    #[error("chart rendering failed: {0}")]
    Render(String),
}

impl<E> From<DrawingAreaErrorKind<E>> for ChartError
where
    E: std::error::Error + Send + Sync,
{
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Render(e.to_string())
    }
}

/// Input rejected before any query runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("{0} cannot be empty.")]
    Empty(&'static str),

    #[error("Year must be in YYYY format.")]
    InvalidYear(String),

    #[error("Unknown export format: {0}")]
    UnknownFormat(String),
}

/// The user interrupted while a prompt was waiting for input.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("interrupted by user")]
pub struct Interrupted;

pub type LoadResult<T> = Result<T, LoadError>;
pub type ExportResult<T> = Result<T, ExportError>;
pub type ChartResult<T> = Result<T, ChartError>;
