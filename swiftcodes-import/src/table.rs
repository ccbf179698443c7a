//! Reading spreadsheet files into a header row plus string cells.

use std::io;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use csv::{ReaderBuilder, Trim};

use crate::error::{ImportError, Result};

/// Extensions handed to calamine.
const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// The first sheet of a spreadsheet, every cell rendered as a trimmed string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Read a table from disk, picking the reader from the file extension.
    pub fn read(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if extension == "csv" {
            let reader = ReaderBuilder::new()
                .flexible(true)
                .trim(Trim::All)
                .from_path(path)?;
            return Self::from_csv(reader);
        }
        if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
            return Self::from_workbook(path);
        }
        Err(ImportError::UnsupportedFormat(path.to_path_buf()))
    }

    /// Parse CSV text from any reader. The first record is the header.
    pub fn from_csv_reader<R: io::Read>(input: R) -> Result<Self> {
        let reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(input);
        Self::from_csv(reader)
    }

    fn from_csv<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|field| String::from_utf8_lossy(field).into_owned())
            .collect();

        let mut rows = Vec::new();
        for record in reader.byte_records() {
            let record = record?;
            rows.push(
                record
                    .iter()
                    .map(|field| String::from_utf8_lossy(field).trim().to_owned())
                    .collect(),
            );
        }

        Ok(Self { headers, rows })
    }

    fn from_workbook(path: &Path) -> Result<Self> {
        let open_error = |e: calamine::Error| ImportError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let mut workbook = open_workbook_auto(path).map_err(open_error)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ImportError::NoWorksheet(path.to_path_buf()))?
            .map_err(open_error)?;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .map(|row| row.iter().map(cell_string).collect())
            .unwrap_or_default();
        let rows: Vec<Vec<String>> = rows
            .map(|row| row.iter().map(cell_string).collect())
            .collect();

        Ok(Self { headers, rows })
    }
}

/// Render one cell. Integral floats print without a fractional part.
fn cell_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(v) => format!("{v}"),
        Data::Int(v) => format!("{v}"),
        Data::Bool(v) => v.to_string(),
        other => other.to_string().trim().to_string(),
    }
}
