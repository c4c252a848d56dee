//! # frontsheet-core
//!
//! Typed parsing of spreadsheet worksheets.
//!
//! Each worksheet may open with a block of **front matter** (key, data type,
//! value rows), followed by a body that is either a **data table** (column
//! names over a row of data types, then one record per row) or a **data list**
//! (more key, type, value rows forming a single record). Every value is coerced
//! to its declared [`DataType`].
//!
//! # Examples
//!
//! ```
//! use frontsheet_core::{parse_worksheet_from_start, DataLayout, ParseOptions, Value};
//! use frontsheet_sheet::Sheet;
//!
//! let sheet = Sheet::from_data(vec![
//!     vec!["title", "string", "Staff"],
//!     vec!["", "", ""],
//!     vec!["name", "age", ""],
//!     vec!["string", "number", ""],
//!     vec!["bob", "30", ""],
//!     vec!["---", "", ""],
//! ]);
//!
//! let parsed = parse_worksheet_from_start(&sheet, &ParseOptions::default()).unwrap();
//! assert_eq!(parsed.data_layout(), DataLayout::DataTable);
//! assert_eq!(parsed.num_data_rows_parsed, 1);
//! assert_eq!(parsed.records()[0].get("age"), Some(&Value::Number(30.0)));
//! ```

/// Cell to typed value coercion.
pub mod coerce;
/// Error and warning types.
pub mod error;
/// Front matter parsing.
pub mod front_matter;
/// Data layout classification.
pub mod layout;
/// Data list parsing.
pub mod list;
/// Parse and iteration options.
pub mod options;
/// Row and cell accessors.
pub mod rows;
/// Data table parsing.
pub mod table;
/// Typed values, type maps and records.
pub mod value;
/// Workbook iteration.
pub mod workbook;
/// Worksheet orchestration.
pub mod worksheet;

pub use coerce::coerce;
pub use error::{CellMeta, CoercionError, ParseError, ParseResult, ParseWarning};
pub use front_matter::{parse_front_matter, FrontMatter};
pub use layout::{classify_layout, LayoutClassification};
pub use list::{parse_data_list, DataList};
pub use options::{CoercionPolicy, ParseOptions, SheetFilter, WorkbookOptions, DEFAULT_TERMINATION_MARKER};
pub use rows::{is_not_empty, is_visible, worksheet_list};
pub use table::{parse_data_table, DataTable};
pub use value::{DataLayout, DataType, DataTypeMap, Meta, MetaTypeMap, Password, Record, UnknownToken, Value};
pub use workbook::{for_each_sheet, for_each_sheet_in_book, open_book, parse_sheet_by_name, Control};
pub use worksheet::{parse_worksheet, parse_worksheet_from_start, ParsedWorksheet, WorksheetBody};
