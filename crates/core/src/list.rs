//! Data list parsing: key, type, value rows forming a single record.

use crate::coerce::coerce_into_record;
use crate::error::{CellMeta, ParseError, ParseResult};
use crate::options::ParseOptions;
use crate::rows::{cell, cell_text, ends_body};
use crate::value::{DataType, DataTypeMap, Record};
use frontsheet_sheet::Sheet;

/// Result of [`parse_data_list`].
#[derive(Debug, Clone, Default)]
pub struct DataList {
    pub record: Record,
    pub data_type_map: DataTypeMap,
    pub num_data_rows_parsed: usize,
    /// Row where parsing stopped: blank, terminator, or one past the last row.
    pub end_row: usize,
}

/// Parse a data list whose first row is `start_row`.
///
/// Unlike front matter, every row up to the end of the list must carry a key
/// and a valid type token.
pub fn parse_data_list(sheet: &Sheet, start_row: usize, opts: &ParseOptions) -> ParseResult<DataList> {
    let name = sheet.name();
    let mut record = Record::new();
    let mut data_type_map = DataTypeMap::new();
    let mut row = start_row.max(1);

    while !ends_body(sheet, row, opts.termination_marker()) {
        let Some(key) = cell_text(sheet, row, 1) else {
            return Err(ParseError::MissingKey {
                worksheet_name: name.to_string(),
                row_number: row,
            });
        };
        let Some(token) = cell_text(sheet, row, 2) else {
            return Err(ParseError::missing_data_type(name, row, 2, key));
        };
        let data_type = token
            .parse::<DataType>()
            .map_err(|_| ParseError::unknown_data_type(name, row, 2, &token))?;
        if data_type_map.contains_key(&key) {
            return Err(ParseError::duplicate_key(name, row, 1, key));
        }

        let target = CellMeta {
            worksheet_name: name,
            row_number: row,
            col_number: 3,
            prop_name: &key,
        };
        coerce_into_record(&mut record, cell(sheet, row, 3), data_type, &target, opts)?;
        if opts.report_progress {
            tracing::debug!(worksheet = name, row, key = %key, "parsed data list row");
        }
        data_type_map.insert(key, data_type);
        row += 1;
    }

    Ok(DataList {
        num_data_rows_parsed: data_type_map.len(),
        record,
        data_type_map,
        end_row: row,
    })
}
