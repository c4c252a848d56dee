use crate::book::Book;
use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use calamine::{open_workbook, Data, Range, Reader, SheetVisible, Xlsx, XlsxError};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::DateTime(dt) => {
            // Durations and out-of-range serials stay numeric
            match dt.as_datetime() {
                Some(naive) if dt.is_datetime() => CellValue::DateTime(naive),
                _ => CellValue::Float(dt.as_f64()),
            }
        }
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}

/// Copy a calamine range into a row-major grid anchored at A1.
///
/// calamine ranges start at the first used cell, so leading empty rows and
/// columns are padded back in to keep worksheet row numbers intact.
fn range_to_grid(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };

    let mut data: Vec<Vec<CellValue>> = vec![Vec::new(); start_row as usize];

    for row in range.rows() {
        let mut row_data = vec![CellValue::Null; start_col as usize];
        row_data.extend(row.iter().map(data_to_cell_value));
        data.push(row_data);
    }

    data
}

fn open<P: AsRef<Path>>(path: P) -> Result<Xlsx<BufReader<File>>> {
    open_workbook(path.as_ref())
        .map_err(|e: XlsxError| SheetError::workbook(path.as_ref().display().to_string(), e.to_string()))
}

fn read_sheet(
    workbook: &mut Xlsx<BufReader<File>>,
    path: &Path,
    sheet_name: &str,
) -> Result<Sheet> {
    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e: XlsxError| SheetError::workbook(path.display().to_string(), e.to_string()))?;

    let visible = workbook
        .sheets_metadata()
        .iter()
        .find(|meta| meta.name == sheet_name)
        .map_or(true, |meta| matches!(meta.visible, SheetVisible::Visible));

    let mut sheet = Sheet::with_name(sheet_name);
    *sheet.data_mut() = range_to_grid(&range);
    sheet.set_visible(visible);
    Ok(sheet)
}

impl Sheet {
    /// Load a specific sheet from an Excel file by name
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be opened, sheet not found, or read fails.
    pub fn from_xlsx_sheet<P: AsRef<Path>>(path: P, sheet_name: &str) -> Result<Self> {
        let mut workbook = open(path.as_ref())?;

        if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
            return Err(SheetError::SheetNotFound {
                name: sheet_name.to_string(),
            });
        }

        read_sheet(&mut workbook, path.as_ref(), sheet_name)
    }
}

impl Book {
    /// Load a book from an Excel file (all sheets, in workbook order)
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be opened or read.
    pub fn from_xlsx<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut workbook = open(path)?;

        let sheet_names: Vec<String> = workbook.sheet_names().iter().map(|s| s.to_string()).collect();
        let book_name = path
            .file_stem()
            .map_or_else(|| "Book1".to_string(), |stem| stem.to_string_lossy().into_owned());
        let mut book = Book::with_name(&book_name);

        for sheet_name in sheet_names {
            let sheet = read_sheet(&mut workbook, path, &sheet_name)?;
            book.add_sheet(&sheet_name, sheet)?;
        }

        Ok(book)
    }
}
