use crate::error::{ExportResult, InputError};
use crate::types::{ParkSummary, SummaryRow};
use crate::util::format_float;
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub type Summary = BTreeMap<String, ParkSummary>;

/// Supported summary file formats. Parsed once from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Txt,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn file_name(self) -> String {
        format!("summary.{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TXT" => Ok(ExportFormat::Txt),
            "CSV" => Ok(ExportFormat::Csv),
            "JSON" => Ok(ExportFormat::Json),
            _ => Err(InputError::UnknownFormat(s.trim().to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

/// Write `summary` as `summary.<ext>` inside `dir` and return the file path.
pub fn export_summary(summary: &Summary, format: ExportFormat, dir: &Path) -> ExportResult<PathBuf> {
    let path = dir.join(format.file_name());
    match format {
        ExportFormat::Txt => write_txt(&path, summary)?,
        ExportFormat::Csv => write_csv(&path, &summary_rows(summary))?,
        ExportFormat::Json => write_json(&path, summary)?,
    }
    info!("Exported {} summary to {}", format, path.display());
    Ok(path)
}

pub fn summary_rows(summary: &Summary) -> Vec<SummaryRow> {
    summary
        .iter()
        .map(|(park, s)| SummaryRow::new(park, s))
        .collect()
}

pub fn write_txt(path: &Path, summary: &Summary) -> ExportResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for (park, s) in summary {
        writeln!(out, "{}", park)?;
        writeln!(out, "  reviews: {}", s.reviews)?;
        writeln!(out, "  positive: {}", s.positive)?;
        writeln!(out, "  avg: {}", format_float(s.avg))?;
        writeln!(out, "  countries: {}", s.countries)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> ExportResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> ExportResult<()> {
    // `to_string_pretty` indents with two spaces and keeps non-ASCII text as is.
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;

    fn summary() -> Summary {
        let mut s = Summary::new();
        s.insert(
            "Disneyland_Paris".into(),
            ParkSummary { reviews: 3, positive: 2, avg: 4.0, countries: 3 },
        );
        s.insert(
            "Disneyland_Zürich".into(),
            ParkSummary { reviews: 2, positive: 1, avg: 3.5, countries: 1 },
        );
        s
    }

    #[test]
    fn test_format_parsing_is_case_insensitive() {
        assert_eq!("txt".parse::<ExportFormat>(), Ok(ExportFormat::Txt));
        assert_eq!(" Csv ".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("JSON".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert_eq!(
            "xml".parse::<ExportFormat>(),
            Err(InputError::UnknownFormat("xml".into()))
        );
        assert_eq!(ExportFormat::Json.file_name(), "summary.json");
    }

    #[test]
    fn test_txt_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_summary(&summary(), ExportFormat::Txt, dir.path()).unwrap();
        assert_eq!(path, dir.path().join("summary.txt"));
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(
            text,
            "Disneyland_Paris\n  reviews: 3\n  positive: 2\n  avg: 4.0\n  countries: 3\n\n\
             Disneyland_Zürich\n  reviews: 2\n  positive: 1\n  avg: 3.5\n  countries: 1\n\n"
        );
    }

    #[test]
    fn test_csv_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_summary(&summary(), ExportFormat::Csv, dir.path()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Park,reviews,positive,avg,countries"));
        assert_eq!(lines.next(), Some("Disneyland_Paris,3,2,4.0,3"));
        assert_eq!(lines.next(), Some("Disneyland_Zürich,2,1,3.5,1"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_json_indent_and_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_summary(&summary(), ExportFormat::Json, dir.path()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Zürich"));
        assert!(text.starts_with("{\n  \"Disneyland_Paris\": {\n    \"reviews\": 3,"));
        let back: Summary = serde_json::from_str(&text).unwrap();
        assert_eq!(back, summary());
    }

    #[test]
    fn test_unwritable_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = export_summary(&summary(), ExportFormat::Txt, &missing).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
