//! Sheet/Book model for frontsheet
//!
//! A read-only view of spreadsheet workbooks: a [`Book`] holds named [`Sheet`]s in
//! workbook order, and each sheet is a grid of raw [`CellValue`]s. Workbooks are
//! loaded from `.xlsx` files with calamine.
//!
//! # Examples
//!
//! ## Creating a sheet from data
//!
//! ```
//! use frontsheet_sheet::{Sheet, CellValue};
//!
//! let sheet = Sheet::from_data(vec![
//!     vec!["name", "age"],
//!     vec!["string", "number"],
//!     vec!["bob", "30"],
//! ]);
//!
//! assert_eq!(sheet.row_count(), 3);
//! assert_eq!(sheet.get(2, 0).unwrap(), &CellValue::from("bob"));
//! ```
//!
//! ## Working with books
//!
//! ```
//! use frontsheet_sheet::{Book, Sheet};
//!
//! let mut book = Book::new();
//! book.add_sheet("People", Sheet::new()).unwrap();
//! book.add_sheet("Places", Sheet::new()).unwrap();
//!
//! assert_eq!(book.sheet_names(), vec!["People", "Places"]);
//! ```
//!
//! ## Loading from xlsx
//!
//! ```no_run
//! use frontsheet_sheet::Book;
//!
//! let book = Book::from_xlsx("data.xlsx").unwrap();
//! ```

mod book;
mod cell;
mod error;
mod sheet;
mod xlsx;

/// Re-export book type.
pub use book::Book;
/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export sheet type.
pub use sheet::Sheet;
