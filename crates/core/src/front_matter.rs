//! Front matter: the block of key, type, value rows at the top of a worksheet.

use crate::coerce::coerce_into_record;
use crate::error::{CellMeta, ParseError, ParseResult, ParseWarning};
use crate::layout::is_table_start;
use crate::options::ParseOptions;
use crate::rows::{cell, cell_text, is_blank_row, last_row};
use crate::value::{DataType, Meta, MetaTypeMap};
use frontsheet_sheet::Sheet;

/// Result of [`parse_front_matter`].
#[derive(Debug, Clone, Default)]
pub struct FrontMatter {
    /// `None` when no key, type, value row was read.
    pub meta: Option<Meta>,
    pub meta_type_map: Option<MetaTypeMap>,
    /// Row where the worksheet body may begin.
    pub next_row: usize,
    pub warnings: Vec<ParseWarning>,
}

/// Read the front matter block starting at `start_row`.
///
/// The block ends at a blank row (which is consumed), at the end of the sheet,
/// or before a row that starts a data table or holds an invalid type token in
/// column 2. Rows missing their key or type are skipped with a warning.
pub fn parse_front_matter(
    sheet: &Sheet,
    start_row: usize,
    opts: &ParseOptions,
) -> ParseResult<FrontMatter> {
    let name = sheet.name();
    let mut meta = Meta::new();
    let mut meta_type_map = MetaTypeMap::new();
    let mut warnings = Vec::new();
    let mut row = start_row.max(1);

    let next_row = loop {
        if row > last_row(sheet) {
            break row;
        }
        if is_blank_row(sheet, row) {
            break row + 1;
        }
        if is_table_start(sheet, row) {
            break row;
        }

        match (cell_text(sheet, row, 1), cell_text(sheet, row, 2)) {
            (key, Some(token)) => {
                let Ok(data_type) = token.parse::<DataType>() else {
                    // not front matter; the body starts here
                    break row;
                };
                let Some(key) = key else {
                    opts.warn(
                        &mut warnings,
                        sheet,
                        row,
                        format!("data type '{data_type}' has no key in column 1, row skipped"),
                    );
                    row += 1;
                    continue;
                };
                if meta_type_map.contains_key(&key) {
                    return Err(ParseError::duplicate_key(name, row, 1, key));
                }
                let target = CellMeta {
                    worksheet_name: name,
                    row_number: row,
                    col_number: 3,
                    prop_name: &key,
                };
                coerce_into_record(&mut meta, cell(sheet, row, 3), data_type, &target, opts)?;
                meta_type_map.insert(key, data_type);
            }
            (Some(key), None) => opts.warn(
                &mut warnings,
                sheet,
                row,
                format!("key '{key}' has no data type in column 2, row skipped"),
            ),
            (None, None) => opts.warn(
                &mut warnings,
                sheet,
                row,
                "no key or data type in columns 1 and 2, row skipped",
            ),
        }
        row += 1;
    };

    let found = !meta_type_map.is_empty();
    Ok(FrontMatter {
        meta: found.then_some(meta),
        meta_type_map: found.then_some(meta_type_map),
        next_row,
        warnings,
    })
}
