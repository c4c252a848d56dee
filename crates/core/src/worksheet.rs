//! Worksheet orchestration: front matter, layout classification, then the body.

use crate::error::{CoercionError, ParseResult, ParseWarning};
use crate::front_matter::parse_front_matter;
use crate::layout::classify_layout;
use crate::list::parse_data_list;
use crate::options::ParseOptions;
use crate::rows::{is_termination_row, last_row, next_non_blank_row};
use crate::table::parse_data_table;
use crate::value::{DataLayout, DataTypeMap, Meta, MetaTypeMap, Record};
use frontsheet_sheet::Sheet;
use serde_json::{json, Map};
use std::slice;

/// The parsed body of a worksheet.
#[derive(Debug, Clone)]
pub enum WorksheetBody {
    Table {
        records: Vec<Record>,
        data_type_map: DataTypeMap,
    },
    List {
        record: Record,
        data_type_map: DataTypeMap,
    },
    FrontMatterOnly,
}

impl WorksheetBody {
    #[must_use]
    pub fn layout(&self) -> DataLayout {
        match self {
            Self::Table { .. } => DataLayout::DataTable,
            Self::List { .. } => DataLayout::DataList,
            Self::FrontMatterOnly => DataLayout::FrontMatterOnly,
        }
    }
}

/// Everything read from one worksheet.
#[derive(Debug, Clone)]
pub struct ParsedWorksheet {
    pub worksheet_name: String,
    pub body: WorksheetBody,
    pub num_data_rows_parsed: usize,
    pub meta: Option<Meta>,
    pub meta_type_map: Option<MetaTypeMap>,
    pub warnings: Vec<ParseWarning>,
}

impl ParsedWorksheet {
    #[must_use]
    pub fn data_layout(&self) -> DataLayout {
        self.body.layout()
    }

    /// Column or key types of the body; `None` for front matter only.
    #[must_use]
    pub fn data_type_map(&self) -> Option<&DataTypeMap> {
        match &self.body {
            WorksheetBody::Table { data_type_map, .. } | WorksheetBody::List { data_type_map, .. } => {
                Some(data_type_map)
            }
            WorksheetBody::FrontMatterOnly => None,
        }
    }

    /// Body records: one per table row, the single list record, or none.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        match &self.body {
            WorksheetBody::Table { records, .. } => records,
            WorksheetBody::List { record, .. } => slice::from_ref(record),
            WorksheetBody::FrontMatterOnly => &[],
        }
    }

    /// The data list record, if the body is a data list.
    #[must_use]
    pub fn record(&self) -> Option<&Record> {
        match &self.body {
            WorksheetBody::List { record, .. } => Some(record),
            _ => None,
        }
    }

    /// Coercion errors collected under the lenient policy, front matter first.
    pub fn coercion_errors(&self) -> impl Iterator<Item = &CoercionError> {
        self.meta
            .iter()
            .chain(self.records())
            .flat_map(|record| record.errors())
    }

    /// JSON view of the worksheet.
    ///
    /// Keys follow the camelCase names of the result fields (`worksheetName`,
    /// `dataLayout`, `numDataRowsParsed`, `meta`, `metaTypes`, `data`,
    /// `dataTypes`), plus `warnings` and `errors` as message lists.
    #[must_use]
    pub fn to_json(&self, reveal_passwords: bool) -> serde_json::Value {
        let type_names = |map: &DataTypeMap| -> serde_json::Value {
            map.iter()
                .map(|(k, t)| (k.clone(), json!(t.as_str())))
                .collect::<Map<_, _>>()
                .into()
        };
        let data: serde_json::Value = match &self.body {
            WorksheetBody::Table { records, .. } => records
                .iter()
                .map(|r| r.to_json(reveal_passwords))
                .collect::<Vec<_>>()
                .into(),
            WorksheetBody::List { record, .. } => record.to_json(reveal_passwords),
            WorksheetBody::FrontMatterOnly => serde_json::Value::Null,
        };

        json!({
            "worksheetName": self.worksheet_name,
            "dataLayout": self.data_layout().as_str(),
            "numDataRowsParsed": self.num_data_rows_parsed,
            "meta": self.meta.as_ref().map(|m| m.to_json(reveal_passwords)),
            "metaTypes": self.meta_type_map.as_ref().map(type_names),
            "data": data,
            "dataTypes": self.data_type_map().map(type_names),
            "warnings": self.warnings.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "errors": self.coercion_errors().map(ToString::to_string).collect::<Vec<_>>(),
        })
    }
}

/// Parse one worksheet whose content begins at `start_row` (1-based).
pub fn parse_worksheet(
    sheet: &Sheet,
    opts: &ParseOptions,
    start_row: usize,
) -> ParseResult<ParsedWorksheet> {
    let name = sheet.name();
    if opts.report_progress {
        tracing::info!(worksheet = name, "parsing worksheet");
    }

    let front_matter = parse_front_matter(sheet, start_row, opts)?;
    let mut warnings = front_matter.warnings;
    let classification = classify_layout(sheet, front_matter.next_row)?;

    let (body, num_data_rows_parsed, end_row) = match classification.layout {
        DataLayout::DataTable => {
            let table = parse_data_table(sheet, classification.next_row, opts)?;
            let body = WorksheetBody::Table {
                records: table.records,
                data_type_map: table.data_type_map,
            };
            (body, table.num_data_rows_parsed, Some(table.end_row))
        }
        DataLayout::DataList => {
            let list = parse_data_list(sheet, classification.next_row, opts)?;
            let body = WorksheetBody::List {
                record: list.record,
                data_type_map: list.data_type_map,
            };
            (body, list.num_data_rows_parsed, Some(list.end_row))
        }
        DataLayout::FrontMatterOnly => (WorksheetBody::FrontMatterOnly, 0, None),
    };

    if let Some(end_row) = end_row {
        warn_trailing_content(sheet, end_row, opts, &mut warnings);
    }
    if opts.report_progress {
        tracing::info!(
            worksheet = name,
            layout = %body.layout(),
            rows = num_data_rows_parsed,
            "parsed worksheet"
        );
    }

    Ok(ParsedWorksheet {
        worksheet_name: name.to_string(),
        body,
        num_data_rows_parsed,
        meta: front_matter.meta,
        meta_type_map: front_matter.meta_type_map,
        warnings,
    })
}

/// Parse one worksheet from its first row.
pub fn parse_worksheet_from_start(sheet: &Sheet, opts: &ParseOptions) -> ParseResult<ParsedWorksheet> {
    parse_worksheet(sheet, opts, 1)
}

/// Content after a body that ended at a blank row is never read.
fn warn_trailing_content(
    sheet: &Sheet,
    end_row: usize,
    opts: &ParseOptions,
    warnings: &mut Vec<ParseWarning>,
) {
    if end_row > last_row(sheet) || is_termination_row(sheet, end_row, opts.termination_marker()) {
        return;
    }
    if let Some(row) = next_non_blank_row(sheet, end_row) {
        opts.warn(
            warnings,
            sheet,
            row,
            format!("content after the blank row {end_row} is ignored"),
        );
    }
}
