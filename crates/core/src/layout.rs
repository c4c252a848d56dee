//! Data layout classification.
//!
//! Looks at the first non-blank rows of a worksheet body and decides whether
//! they hold a data table (a header row over a row of type tokens) or a data
//! list (key, type, value rows).

use crate::error::{ParseError, ParseResult};
use crate::rows::{
    cell_data_type, cell_text, last_row, next_non_blank_row, occupied_columns,
};
use crate::value::{DataLayout, DataType};
use frontsheet_sheet::Sheet;

/// Outcome of [`classify_layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutClassification {
    pub layout: DataLayout,
    /// First row of the body (the header row or first list row).
    pub next_row: usize,
}

/// Whether `row` is a header row with a row of type tokens under it.
///
/// Both rows must occupy exactly the same columns, and every cell of the
/// second row must be a valid type token. Two stacked key/type rows with no
/// values are read as key/type rows, not as a two-column table.
pub(crate) fn is_table_start(sheet: &Sheet, row: usize) -> bool {
    let header = occupied_columns(sheet, row);
    if header.is_empty() || header != occupied_columns(sheet, row + 1) {
        return false;
    }
    if header == [1, 2] && is_triple_row(sheet, row) && is_triple_row(sheet, row + 1) {
        return false;
    }
    header
        .iter()
        .all(|&col| cell_data_type(sheet, row + 1, col).is_some())
}

/// Whether `row` has a key in column 1 and a valid type token in column 2.
pub(crate) fn is_triple_row(sheet: &Sheet, row: usize) -> bool {
    cell_text(sheet, row, 1).is_some() && cell_data_type(sheet, row, 2).is_some()
}

/// Classify the body that starts at or after `start_row`.
///
/// Blank rows are skipped. A sheet with nothing left is
/// [`DataLayout::FrontMatterOnly`].
///
/// # Examples
///
/// ```
/// use frontsheet_core::{classify_layout, DataLayout};
/// use frontsheet_sheet::Sheet;
///
/// let sheet = Sheet::from_data(vec![
///     vec!["", ""],
///     vec!["name", "age"],
///     vec!["string", "number"],
///     vec!["bob", "30"],
/// ]);
/// let found = classify_layout(&sheet, 1).unwrap();
/// assert_eq!(found.layout, DataLayout::DataTable);
/// assert_eq!(found.next_row, 2);
/// ```
pub fn classify_layout(sheet: &Sheet, start_row: usize) -> ParseResult<LayoutClassification> {
    let Some(row) = next_non_blank_row(sheet, start_row) else {
        return Ok(LayoutClassification {
            layout: DataLayout::FrontMatterOnly,
            next_row: (last_row(sheet) + 1).max(start_row),
        });
    };

    let layout = if is_table_start(sheet, row) {
        DataLayout::DataTable
    } else if is_triple_row(sheet, row) {
        DataLayout::DataList
    } else {
        return Err(diagnose(sheet, row));
    };
    tracing::debug!(
        worksheet = sheet.name(),
        row,
        layout = %layout,
        "classified data layout"
    );
    Ok(LayoutClassification {
        layout,
        next_row: row,
    })
}

fn diagnose(sheet: &Sheet, row: usize) -> ParseError {
    let name = sheet.name();
    let header = occupied_columns(sheet, row);

    let types = occupied_columns(sheet, row + 1);

    // table-shaped rows with a bad type token
    if header == types {
        let bad = header
            .iter()
            .find(|&&col| cell_data_type(sheet, row + 1, col).is_none());
        if let Some(&col) = bad {
            let token = cell_text(sheet, row + 1, col).unwrap_or_default();
            return ParseError::unknown_data_type(name, row + 1, col, token);
        }
    }

    // type row with gaps under the header
    if !types.is_empty()
        && types.iter().all(|col| header.contains(col))
        && types
            .iter()
            .all(|&col| cell_data_type(sheet, row + 1, col).is_some())
    {
        if let Some(&col) = header.iter().find(|col| !types.contains(col)) {
            let column = cell_text(sheet, row, col).unwrap_or_default();
            return ParseError::missing_data_type(name, row + 1, col, column);
        }
    }

    match (cell_text(sheet, row, 1), cell_text(sheet, row, 2)) {
        (Some(key), Some(token)) => ParseError::layout(
            name,
            row,
            format!(
                "'{token}' in column 2 for key '{key}' is not a data type (expected one of: {})",
                DataType::token_list()
            ),
        ),
        _ => ParseError::layout(
            name,
            row,
            "expected a data table (column names over a row of data types) \
             or a data list (key, data type and value in columns 1 to 3)",
        ),
    }
}
