//! Read-only row and cell accessors over a [`Sheet`], plus worksheet filtering.
//!
//! Row and column numbers here are 1-based, matching what users see in a
//! spreadsheet application. Reads past the end of the sheet or of a row yield
//! a null cell.

use crate::options::SheetFilter;
use crate::value::DataType;
use frontsheet_sheet::{Book, CellValue, Sheet};

static NULL_CELL: CellValue = CellValue::Null;

/// Number of the last row of the sheet (0 for an empty sheet).
#[must_use]
pub fn last_row(sheet: &Sheet) -> usize {
    sheet.row_count()
}

/// The cells of a row; empty when the row is past the end of the sheet.
#[must_use]
pub fn row_cells(sheet: &Sheet, row: usize) -> &[CellValue] {
    match row.checked_sub(1) {
        Some(index) => sheet.row(index).unwrap_or(&[]),
        None => &[],
    }
}

/// The cell at `row`, `col`.
#[must_use]
pub fn cell(sheet: &Sheet, row: usize, col: usize) -> &CellValue {
    match (row.checked_sub(1), col.checked_sub(1)) {
        (Some(row), Some(col)) => sheet.get(row, col).unwrap_or(&NULL_CELL),
        _ => &NULL_CELL,
    }
}

/// Trimmed text of a non-blank cell; non-text cells are rendered.
#[must_use]
pub fn cell_text(sheet: &Sheet, row: usize, col: usize) -> Option<String> {
    let value = cell(sheet, row, col);
    if value.is_blank() {
        return None;
    }
    match value {
        CellValue::String(s) => Some(s.trim().to_string()),
        other => Some(other.to_string()),
    }
}

/// The data type declared by a text cell, if it holds a valid token.
#[must_use]
pub fn cell_data_type(sheet: &Sheet, row: usize, col: usize) -> Option<DataType> {
    cell(sheet, row, col).as_text()?.parse().ok()
}

/// Whether every cell of the row is blank (rows past the end are blank).
#[must_use]
pub fn is_blank_row(sheet: &Sheet, row: usize) -> bool {
    row_cells(sheet, row).iter().all(CellValue::is_blank)
}

/// Column numbers of the non-blank cells in a row.
#[must_use]
pub fn occupied_columns(sheet: &Sheet, row: usize) -> Vec<usize> {
    row_cells(sheet, row)
        .iter()
        .enumerate()
        .filter(|(_, value)| !value.is_blank())
        .map(|(index, _)| index + 1)
        .collect()
}

/// First non-blank row at or after `from`.
#[must_use]
pub fn next_non_blank_row(sheet: &Sheet, from: usize) -> Option<usize> {
    (from.max(1)..=last_row(sheet)).find(|&row| !is_blank_row(sheet, row))
}

/// Whether the row's first non-blank cell holds the termination marker.
///
/// Leading blank cells are skipped so a body that starts right of column 1
/// can be ended in its own first column.
#[must_use]
pub fn is_termination_row(sheet: &Sheet, row: usize, marker: Option<&str>) -> bool {
    let Some(marker) = marker else {
        return false;
    };
    match row_cells(sheet, row).iter().find(|value| !value.is_blank()) {
        Some(CellValue::String(s)) => s.trim() == marker,
        _ => false,
    }
}

/// Whether a data body stops before `row`: past the end, blank, or marked.
pub(crate) fn ends_body(sheet: &Sheet, row: usize, marker: Option<&str>) -> bool {
    row > last_row(sheet) || is_blank_row(sheet, row) || is_termination_row(sheet, row, marker)
}

/// Worksheets of the book that pass every filter, in workbook order.
#[must_use]
pub fn worksheet_list<'a>(book: &'a Book, filters: &[SheetFilter]) -> Vec<&'a Sheet> {
    book.sheets()
        .filter(|&sheet| filters.iter().all(|filter| filter(sheet)))
        .collect()
}

/// Filter: the worksheet is not hidden.
#[must_use]
pub fn is_visible(sheet: &Sheet) -> bool {
    sheet.is_visible()
}

/// Filter: the worksheet has at least one non-blank cell.
#[must_use]
pub fn is_not_empty(sheet: &Sheet) -> bool {
    !sheet.is_blank()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> Sheet {
        Sheet::from_data(vec![
            vec![CellValue::from(" title "), CellValue::from("string"), CellValue::from("Report")],
            vec![CellValue::Null, CellValue::from("  ")],
            vec![CellValue::Int(2024), CellValue::Null, CellValue::from("x")],
            vec![CellValue::from("---")],
        ])
    }

    #[test]
    fn test_cell_access_is_one_based() {
        let sheet = sheet();
        assert_eq!(cell(&sheet, 1, 3), &CellValue::from("Report"));
        assert_eq!(cell(&sheet, 0, 1), &CellValue::Null);
        assert_eq!(cell(&sheet, 1, 0), &CellValue::Null);
        assert_eq!(cell(&sheet, 9, 9), &CellValue::Null);
        assert_eq!(last_row(&sheet), 4);
        assert!(row_cells(&sheet, 5).is_empty());
    }

    #[test]
    fn test_cell_text_and_type() {
        let sheet = sheet();
        assert_eq!(cell_text(&sheet, 1, 1).as_deref(), Some("title"));
        assert_eq!(cell_text(&sheet, 3, 1).as_deref(), Some("2024"));
        assert_eq!(cell_text(&sheet, 2, 2), None);
        assert_eq!(cell_data_type(&sheet, 1, 2), Some(DataType::String));
        assert_eq!(cell_data_type(&sheet, 1, 3), None);
    }

    #[test]
    fn test_blank_rows_and_columns() {
        let sheet = sheet();
        assert!(is_blank_row(&sheet, 2));
        assert!(is_blank_row(&sheet, 10));
        assert!(!is_blank_row(&sheet, 3));
        assert_eq!(occupied_columns(&sheet, 3), vec![1, 3]);
        assert_eq!(next_non_blank_row(&sheet, 2), Some(3));
        assert_eq!(next_non_blank_row(&sheet, 5), None);
    }

    #[test]
    fn test_termination_row() {
        let sheet = sheet();
        assert!(is_termination_row(&sheet, 4, Some("---")));
        assert!(!is_termination_row(&sheet, 4, None));
        assert!(!is_termination_row(&sheet, 4, Some("END")));
        assert!(!is_termination_row(&sheet, 1, Some("---")));
    }

    #[test]
    fn test_termination_marker_after_leading_gap() {
        let sheet = Sheet::from_data(vec![
            vec![CellValue::Null, CellValue::from(" --- ")],
            vec![CellValue::from(""), CellValue::from("x"), CellValue::from("---")],
            vec![CellValue::Null, CellValue::Null],
        ]);
        assert!(is_termination_row(&sheet, 1, Some("---")));
        assert!(!is_termination_row(&sheet, 2, Some("---")));
        assert!(!is_termination_row(&sheet, 3, Some("---")));
    }

    #[test]
    fn test_worksheet_list_filters() {
        let mut book = Book::new();
        book.add_sheet("Data", Sheet::from_data(vec![vec!["a"]])).unwrap();
        book.add_sheet("Empty", Sheet::new()).unwrap();
        let mut hidden = Sheet::from_data(vec![vec!["b"]]);
        hidden.set_visible(false);
        book.add_sheet("Hidden", hidden).unwrap();

        let all = worksheet_list(&book, &[]);
        assert_eq!(all.len(), 3);

        let filters: Vec<SheetFilter> = vec![Box::new(is_visible) as SheetFilter, Box::new(is_not_empty) as SheetFilter];
        let names: Vec<&str> = worksheet_list(&book, &filters)
            .into_iter()
            .map(Sheet::name)
            .collect();
        assert_eq!(names, vec!["Data"]);
    }
}
