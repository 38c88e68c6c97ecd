// src/sheet/reader.rs
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::sheet::models::{Cell, Sheet};
use crate::utils::error::SheetError;

/// Sheet name exports carry by default; delimited text has no sheet name so it gets this one.
pub const DEFAULT_SHEET_NAME: &str = "Results";

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

/// Decodes an export into its first sheet.
/// Workbooks (xls, xlsx, xlsb, ods) are sniffed by magic bytes; everything else is
/// treated as UTF-8 delimited text.
pub fn read_sheet(bytes: &[u8]) -> Result<Sheet, SheetError> {
    if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC) {
        read_workbook(bytes)
    } else {
        read_delimited(bytes)
    }
}

/// Reads the first worksheet of a workbook held in memory.
pub fn read_workbook(bytes: &[u8]) -> Result<Sheet, SheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(SheetError::NoWorksheet)?;
    let range = workbook.worksheet_range(&name)?;
    tracing::debug!("Reading worksheet '{}' ({:?} cells)", name, range.get_size());

    let rows = range
        .rows()
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();

    Ok(Sheet::new(name, rows))
}

/// Reads CSV, or TSV when the first line contains a tab.
pub fn read_delimited(bytes: &[u8]) -> Result<Sheet, SheetError> {
    let text = std::str::from_utf8(bytes).map_err(|_| SheetError::Encoding)?;
    let text = text.trim_start_matches('\u{feff}');
    let first_line = text.lines().next().unwrap_or_default();
    let delimiter = if first_line.contains('\t') { b'\t' } else { b',' };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Cell::from_text).collect());
    }
    tracing::debug!("Read {} delimited rows", rows.len());

    Ok(Sheet::new(DEFAULT_SHEET_NAME, rows))
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            if s.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        // Booleans, error cells and blanks carry no label or value
        _ => Cell::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_export() {
        let csv = "Teams,Red,Blue,Green,Gold\nIncome Statement, k USD, Global\n\"Sales revenue\",\"1,000\",2000,,abc\n";
        let sheet = read_sheet(csv.as_bytes()).unwrap();

        assert_eq!(sheet.name, DEFAULT_SHEET_NAME);
        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet.row(0)[1], Cell::Text("Red".into()));
        // Unquoted commas split the header into several cells
        assert_eq!(sheet.label(1).as_deref(), Some("Income Statement"));
        assert_eq!(sheet.row(2)[1], Cell::Text("1,000".into()));
        assert_eq!(sheet.row(2)[2], Cell::Number(2000.0));
        assert_eq!(sheet.row(2)[3], Cell::Empty);
    }

    #[test]
    fn test_read_tsv_export() {
        let tsv = "\u{feff}\tRed\tBlue\nIncome Statement, k USD, Global\nSales revenue\t1,000\t2,000\n";
        let sheet = read_sheet(tsv.as_bytes()).unwrap();

        assert_eq!(sheet.label(1).as_deref(), Some("Income Statement, k USD, Global"));
        assert_eq!(sheet.row(2)[1].to_number(), Some(1000.0));
        assert_eq!(sheet.row(0)[0], Cell::Empty);
    }

    #[test]
    fn test_empty_input_is_empty_sheet() {
        let sheet = read_sheet(b"").unwrap();
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let result = read_sheet(&[0xFF, 0xFE, 0x00, 0x41]);
        assert!(matches!(result, Err(SheetError::Encoding)));
    }

    #[test]
    fn test_corrupt_workbook_is_rejected() {
        let result = read_sheet(b"PK\x03\x04not really a zip archive");
        assert!(matches!(result, Err(SheetError::Workbook(_))));
    }

    #[test]
    fn test_convert_workbook_cells() {
        assert_eq!(convert_cell(&Data::Int(5)), Cell::Number(5.0));
        assert_eq!(convert_cell(&Data::String("  ".into())), Cell::Empty);
        assert_eq!(convert_cell(&Data::Bool(true)), Cell::Empty);
        assert_eq!(convert_cell(&Data::String("Tech 1".into())), Cell::Text("Tech 1".into()));
    }
}
