//! Workbook iteration: parse each worksheet in order and hand it to a callback.

use crate::error::{ParseError, ParseResult};
use crate::options::{ParseOptions, WorkbookOptions};
use crate::rows::worksheet_list;
use crate::worksheet::{parse_worksheet, ParsedWorksheet};
use frontsheet_sheet::{Book, Sheet};
use std::path::Path;

/// What the handler wants after receiving a worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Control {
    #[default]
    Continue,
    /// Skip every remaining worksheet.
    Stop,
}

fn ensure_exists(path: &Path) -> ParseResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ParseError::MissingInput {
            path: path.to_path_buf(),
        })
    }
}

/// Load a workbook, failing with [`ParseError::MissingInput`] if the file is absent.
pub fn open_book(path: impl AsRef<Path>) -> ParseResult<Book> {
    let path = path.as_ref();
    ensure_exists(path)?;
    Ok(Book::from_xlsx(path)?)
}

/// Parse every worksheet of an xlsx file and pass each to `handler`.
///
/// Worksheets are filtered by `workbook_opts.filters` and visited in workbook
/// order, one at a time. The handler gets the parsed worksheet by value and
/// `client_data` by mutable reference; returning [`Control::Stop`] ends the
/// iteration. Parse errors and handler errors abort it.
///
/// # Examples
///
/// ```no_run
/// use frontsheet_core::{for_each_sheet, Control, ParseError, ParseOptions, WorkbookOptions};
///
/// let mut names = Vec::new();
/// for_each_sheet(
///     "people.xlsx",
///     &mut names,
///     &ParseOptions::default(),
///     &WorkbookOptions::default(),
///     |parsed, names: &mut Vec<String>| {
///         names.push(parsed.worksheet_name);
///         Ok::<_, ParseError>(Control::Continue)
///     },
/// )?;
/// # Ok::<(), ParseError>(())
/// ```
pub fn for_each_sheet<C, E, F>(
    path: impl AsRef<Path>,
    client_data: &mut C,
    parse_opts: &ParseOptions,
    workbook_opts: &WorkbookOptions,
    handler: F,
) -> Result<(), E>
where
    F: FnMut(ParsedWorksheet, &mut C) -> Result<Control, E>,
    E: From<ParseError>,
{
    let book = open_book(path)?;
    for_each_sheet_in_book(&book, client_data, parse_opts, workbook_opts, handler)
}

/// Same as [`for_each_sheet`], over an already loaded [`Book`].
pub fn for_each_sheet_in_book<C, E, F>(
    book: &Book,
    client_data: &mut C,
    parse_opts: &ParseOptions,
    workbook_opts: &WorkbookOptions,
    mut handler: F,
) -> Result<(), E>
where
    F: FnMut(ParsedWorksheet, &mut C) -> Result<Control, E>,
    E: From<ParseError>,
{
    let sheets = worksheet_list(book, &workbook_opts.filters);
    if parse_opts.report_progress {
        tracing::info!(
            workbook = book.name(),
            worksheets = sheets.len(),
            "parsing workbook"
        );
    }

    for (index, sheet) in sheets.iter().enumerate() {
        let parsed = parse_worksheet(sheet, parse_opts, workbook_opts.start_row)?;
        if handler(parsed, client_data)? == Control::Stop {
            if parse_opts.report_progress {
                tracing::info!(
                    worksheet = sheet.name(),
                    skipped = sheets.len() - index - 1,
                    "iteration stopped by handler"
                );
            }
            break;
        }
    }
    Ok(())
}

/// Parse one worksheet of an xlsx file by name.
pub fn parse_sheet_by_name(
    path: impl AsRef<Path>,
    worksheet_name: &str,
    opts: &ParseOptions,
    start_row: usize,
) -> ParseResult<ParsedWorksheet> {
    let path = path.as_ref();
    ensure_exists(path)?;
    let sheet = Sheet::from_xlsx_sheet(path, worksheet_name)?;
    parse_worksheet(&sheet, opts, start_row)
}
