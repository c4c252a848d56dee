//! Shared fixtures for frontsheet-core integration tests.

#![allow(dead_code)]

use frontsheet_sheet::{CellValue, Sheet};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;

/// A named in-memory worksheet.
pub fn sheet(name: &str, rows: Vec<Vec<CellValue>>) -> Sheet {
    let mut sheet = Sheet::from_data(rows);
    sheet.set_name(name);
    sheet
}

/// Shorthand for a text cell.
pub fn s(text: &str) -> CellValue {
    CellValue::from(text)
}

fn write_row(ws: &mut Worksheet, row: u32, cells: &[&str]) {
    for (col, text) in cells.iter().enumerate() {
        if !text.is_empty() {
            ws.write_string(row, col as u16, *text).unwrap();
        }
    }
}

/// Write a workbook covering every layout:
///
/// - `Cover`: front matter only
/// - `People`: front matter, then a data table ended by `---`
/// - `Config`: a data list without front matter
/// - `Archive`: a hidden data table
pub fn write_fixture(path: &Path) {
    let mut workbook = Workbook::new();

    let cover = workbook.add_worksheet();
    cover.set_name("Cover").unwrap();
    write_row(cover, 0, &["title", "string", "Quarterly report"]);
    write_row(cover, 1, &["count", "number"]);
    cover.write_number(1, 2, 7).unwrap();

    let people = workbook.add_worksheet();
    people.set_name("People").unwrap();
    write_row(people, 0, &["team", "string", "Platform"]);
    write_row(people, 2, &["name", "age", "joined", "active", "id"]);
    write_row(people, 3, &["string", "number", "date", "boolean", "uuid"]);
    write_row(people, 4, &["bob", "", "2021-03-01", "", "67e55044-10b1-426f-9247-bb680e5fe0c8"]);
    people.write_number(4, 1, 30).unwrap();
    people.write_boolean(4, 3, true).unwrap();
    write_row(people, 5, &["amy", "", "2022-11-15T09:00:00Z", "false", "A1A2A3A4-B1B2-C1C2-D1D2-D3D4D5D6D7D8"]);
    people.write_number(5, 1, 41.5).unwrap();
    write_row(people, 6, &["---"]);
    write_row(people, 7, &["ghost", "not-a-number"]);

    let config = workbook.add_worksheet();
    config.set_name("Config").unwrap();
    write_row(config, 1, &["host", "string", "db.internal"]);
    write_row(config, 2, &["port", "number"]);
    config.write_number(2, 2, 5432).unwrap();
    write_row(config, 3, &["password", "password", "hunter2"]);
    write_row(config, 4, &["limits", "json", r#"{"max": 10, "burst": [1, 2]}"#]);
    write_row(config, 5, &["shards", "bigint", "9007199254740993"]);

    let archive = workbook.add_worksheet();
    archive.set_name("Archive").unwrap();
    write_row(archive, 0, &["name"]);
    write_row(archive, 1, &["string"]);
    write_row(archive, 2, &["old"]);
    archive.set_hidden(true);

    workbook.save(path).unwrap();
}
