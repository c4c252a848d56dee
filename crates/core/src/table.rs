//! Data table parsing: a header row, a type row, then one record per row.

use crate::coerce::coerce_into_record;
use crate::error::{CellMeta, ParseError, ParseResult};
use crate::options::ParseOptions;
use crate::rows::{cell, cell_text, ends_body, occupied_columns};
use crate::value::{DataType, DataTypeMap, Record};
use frontsheet_sheet::Sheet;

/// Result of [`parse_data_table`].
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    pub records: Vec<Record>,
    pub data_type_map: DataTypeMap,
    pub num_data_rows_parsed: usize,
    /// Row where parsing stopped: blank, terminator, or one past the last row.
    pub end_row: usize,
}

/// A named column of the table.
struct Column {
    col: usize,
    name: String,
    data_type: DataType,
}

/// Parse a data table whose header row is `start_row`.
///
/// The row below the header declares one type per named column. Data rows
/// follow until a blank row, a row starting with the termination marker, or
/// the end of the sheet.
pub fn parse_data_table(
    sheet: &Sheet,
    start_row: usize,
    opts: &ParseOptions,
) -> ParseResult<DataTable> {
    let name = sheet.name();
    let type_row = start_row + 1;
    let columns = read_columns(sheet, start_row, type_row)?;
    let data_type_map: DataTypeMap = columns
        .iter()
        .map(|c| (c.name.clone(), c.data_type))
        .collect();

    let mut records = Vec::new();
    let mut row = type_row + 1;
    while !ends_body(sheet, row, opts.termination_marker()) {
        let mut record = Record::new();
        for column in &columns {
            let target = CellMeta {
                worksheet_name: name,
                row_number: row,
                col_number: column.col,
                prop_name: &column.name,
            };
            coerce_into_record(
                &mut record,
                cell(sheet, row, column.col),
                column.data_type,
                &target,
                opts,
            )?;
        }
        if opts.report_progress {
            tracing::debug!(worksheet = name, row, "parsed data table row");
        }
        records.push(record);
        row += 1;
    }

    Ok(DataTable {
        num_data_rows_parsed: records.len(),
        records,
        data_type_map,
        end_row: row,
    })
}

fn read_columns(sheet: &Sheet, header_row: usize, type_row: usize) -> ParseResult<Vec<Column>> {
    let name = sheet.name();
    let mut columns: Vec<Column> = Vec::new();

    for col in occupied_columns(sheet, header_row) {
        let Some(column_name) = cell_text(sheet, header_row, col) else {
            continue;
        };
        let Some(token) = cell_text(sheet, type_row, col) else {
            return Err(ParseError::missing_data_type(name, type_row, col, column_name));
        };
        let data_type = token
            .parse::<DataType>()
            .map_err(|_| ParseError::unknown_data_type(name, type_row, col, &token))?;
        if columns.iter().any(|c| c.name == column_name) {
            return Err(ParseError::duplicate_key(name, header_row, col, column_name));
        }
        columns.push(Column {
            col,
            name: column_name,
            data_type,
        });
    }

    if columns.is_empty() {
        return Err(ParseError::layout(name, header_row, "data table has no column names"));
    }
    Ok(columns)
}
