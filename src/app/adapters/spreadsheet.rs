//! Spreadsheet decoding adapter
//!
//! Decodes a partner CSV export into the in-memory [`TabularData`] shape
//! the reconciliation core consumes. This is the only place file bytes are
//! touched on the partner side; the core itself receives already-tabulated
//! data.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::app::models::TabularData;
use crate::{Error, Result};

/// Load a partner sheet from a CSV file
pub fn load_tabular(path: &Path) -> Result<TabularData> {
    let content = fs::read_to_string(path)
        .map_err(|error| Error::io(format!("failed to read sheet {}", path.display()), error))?;

    read_tabular(&content).map_err(|error| match error {
        Error::CsvParsing {
            message, source, ..
        } => Error::CsvParsing {
            file: path.display().to_string(),
            message,
            source,
        },
        other => other,
    })
}

/// Decode CSV content into tabular data
///
/// The first row is the header. Ragged rows are tolerated here and
/// resolved by the parser (missing trailing cells read as empty). A UTF-8
/// BOM, common in partner exports saved from desktop spreadsheet tools,
/// is stripped.
pub fn read_tabular(content: &str) -> Result<TabularData> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|error| {
            Error::csv_parsing("input", "failed to read header row", Some(error))
        })?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|error| {
            Error::csv_parsing(
                "input",
                format!("failed to read data row {}", rows.len() + 1),
                Some(error),
            )
        })?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    debug!(
        "Decoded sheet: {} columns, {} data rows",
        headers.len(),
        rows.len()
    );

    Ok(TabularData::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_tabular_basic() {
        let content = "Date,Route Name,Departure Tag,Return Tag\n01/01/2026,North loop,A1,B2\n";
        let table = read_tabular(content).unwrap();

        assert_eq!(
            table.headers,
            vec!["Date", "Route Name", "Departure Tag", "Return Tag"]
        );
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][2], "A1");
    }

    #[test]
    fn test_read_tabular_strips_bom_and_trims_headers() {
        let content = "\u{feff}Date , Leg Tag\n02/01/2026,L1\n";
        let table = read_tabular(content).unwrap();

        assert_eq!(table.headers, vec!["Date", "Leg Tag"]);
    }

    #[test]
    fn test_read_tabular_tolerates_ragged_rows() {
        let content = "Date,Leg Tag,Direction,Vehicle\n01/01/2026,L1\n";
        let table = read_tabular(content).unwrap();

        assert_eq!(table.rows[0].len(), 2);
    }

    #[test]
    fn test_load_tabular_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Date,Shift Name,Trip Tags,Vehicle").unwrap();
        writeln!(file, "01/01/2026,Morning,\"A1\nB2\",12-345-67").unwrap();

        let table = load_tabular(file.path()).unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.rows[0][2], "A1\nB2");
    }

    #[test]
    fn test_load_tabular_missing_file() {
        let error = load_tabular(Path::new("/nonexistent/partner.csv")).unwrap_err();
        assert!(matches!(error, Error::Io { .. }));
    }
}
