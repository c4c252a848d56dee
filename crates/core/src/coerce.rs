//! Cell to typed value coercion.
//!
//! [`coerce`] turns one raw [`CellValue`] into a [`Value`] of the declared
//! [`DataType`]. `Ok(None)` means the cell is absent (null or blank text);
//! failures carry the cell's coordinates in a [`CoercionError`].

use crate::error::{CellMeta, CoercionError, ParseResult};
use crate::options::{CoercionPolicy, ParseOptions};
use crate::value::{format_date, DataType, Password, Record, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use frontsheet_sheet::CellValue;
use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;

/// Naive formats accepted for date text, interpreted as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

fn uuid_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
            .expect("valid regex")
    })
}

/// Coerce a raw cell to `data_type`.
///
/// # Examples
///
/// ```
/// use frontsheet_core::{coerce, CellMeta, DataType, ParseOptions, Value};
/// use frontsheet_sheet::CellValue;
///
/// let cell = CellMeta { worksheet_name: "People", row_number: 3, col_number: 2, prop_name: "age" };
/// let opts = ParseOptions::default();
///
/// let age = coerce(&CellValue::from(" 30 "), DataType::Number, &cell, &opts).unwrap();
/// assert_eq!(age, Some(Value::Number(30.0)));
///
/// assert_eq!(coerce(&CellValue::Null, DataType::Number, &cell, &opts).unwrap(), None);
/// assert!(coerce(&CellValue::from("thirty"), DataType::Number, &cell, &opts).is_err());
/// ```
pub fn coerce(
    raw: &CellValue,
    data_type: DataType,
    cell: &CellMeta<'_>,
    opts: &ParseOptions,
) -> Result<Option<Value>, CoercionError> {
    if let CellValue::Error(code) = raw {
        return Err(cell.error(raw, data_type, format!("cell holds error {code}")));
    }
    if raw.is_blank() {
        if opts.strict_missing_values && data_type != DataType::String {
            return Err(cell.error(raw, data_type, "missing value"));
        }
        return Ok(None);
    }

    let value = match data_type {
        DataType::String => Ok(Value::String(stringify(raw))),
        DataType::Password => Ok(Value::Password(Password::new(stringify(raw)))),
        DataType::Number => to_number(raw).map(Value::Number),
        DataType::BigInt => to_bigint(raw).map(Value::BigInt),
        DataType::Boolean => to_boolean(raw).map(Value::Boolean),
        DataType::Date => to_date(raw).map(Value::Date),
        DataType::Uuid => to_uuid(raw).map(Value::Uuid),
        DataType::Json => to_json(raw).map(Value::Json),
    };
    value
        .map(Some)
        .map_err(|reason| cell.error(raw, data_type, reason))
}

/// Coerce a cell and store it in `record` under the active policy.
///
/// Under [`CoercionPolicy::Abort`] the first error is returned; under
/// [`CoercionPolicy::Collect`] it is attached to the record.
pub(crate) fn coerce_into_record(
    record: &mut Record,
    raw: &CellValue,
    data_type: DataType,
    cell: &CellMeta<'_>,
    opts: &ParseOptions,
) -> ParseResult<()> {
    match coerce(raw, data_type, cell, opts) {
        Ok(Some(value)) => {
            record.insert(cell.prop_name, value);
        }
        Ok(None) => {}
        Err(error) => match opts.coercion_policy {
            CoercionPolicy::Abort => return Err(error.into()),
            CoercionPolicy::Collect => {
                tracing::debug!("{error}");
                record.push_error(error);
            }
        },
    }
    Ok(())
}

/// Text form of a non-absent cell.
fn stringify(raw: &CellValue) -> String {
    match raw {
        CellValue::DateTime(dt) => format_date(&dt.and_utc()),
        other => other.to_string(),
    }
}

fn to_number(raw: &CellValue) -> Result<f64, String> {
    match raw {
        CellValue::Int(i) => Ok(*i as f64),
        CellValue::Float(f) if f.is_finite() => Ok(*f),
        CellValue::String(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            Ok(_) => Err("number is not finite".to_string()),
            Err(_) => Err("not a number".to_string()),
        },
        other => Err(format!("{} cell is not a number", other.type_name())),
    }
}

/// 2^127, the first float magnitude past the `i128` range.
const I128_FLOAT_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

fn to_bigint(raw: &CellValue) -> Result<i128, String> {
    match raw {
        CellValue::Int(i) => Ok(i128::from(*i)),
        CellValue::Float(f) if f.is_finite() && f.fract() == 0.0 => {
            if (-I128_FLOAT_BOUND..I128_FLOAT_BOUND).contains(f) {
                Ok(*f as i128)
            } else {
                Err("integer out of range".to_string())
            }
        }
        CellValue::Float(_) => Err("number is not an integer".to_string()),
        CellValue::String(s) => s
            .trim()
            .parse::<i128>()
            .map_err(|_| "not an integer".to_string()),
        other => Err(format!("{} cell is not an integer", other.type_name())),
    }
}

fn to_boolean(raw: &CellValue) -> Result<bool, String> {
    match raw {
        CellValue::Bool(b) => Ok(*b),
        CellValue::String(s) => {
            let text = s.trim();
            if text.eq_ignore_ascii_case("true") {
                Ok(true)
            } else if text.eq_ignore_ascii_case("false") {
                Ok(false)
            } else {
                Err("expected true or false".to_string())
            }
        }
        other => Err(format!("{} cell is not a boolean", other.type_name())),
    }
}

fn to_date(raw: &CellValue) -> Result<DateTime<Utc>, String> {
    match raw {
        CellValue::DateTime(dt) => Ok(dt.and_utc()),
        CellValue::String(s) => parse_date(s.trim()).ok_or_else(|| "not an ISO-8601 date".to_string()),
        other => Err(format!("{} cell is not a date", other.type_name())),
    }
}

fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

fn to_uuid(raw: &CellValue) -> Result<Uuid, String> {
    let Some(text) = raw.as_text().map(str::trim) else {
        return Err(format!("{} cell is not a uuid", raw.type_name()));
    };
    if !uuid_pattern().is_match(text) {
        return Err("not a canonical uuid".to_string());
    }
    Uuid::parse_str(text).map_err(|e| e.to_string())
}

fn to_json(raw: &CellValue) -> Result<serde_json::Value, String> {
    if matches!(raw, CellValue::DateTime(_)) {
        return Err("datetime cell is not json text".to_string());
    }
    serde_json::from_str(&stringify(raw)).map_err(|e| format!("invalid json: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL: CellMeta<'static> = CellMeta {
        worksheet_name: "Types",
        row_number: 5,
        col_number: 3,
        prop_name: "field",
    };

    fn ok(raw: impl Into<CellValue>, data_type: DataType) -> Option<Value> {
        coerce(&raw.into(), data_type, &CELL, &ParseOptions::default()).unwrap()
    }

    fn err(raw: impl Into<CellValue>, data_type: DataType) -> CoercionError {
        coerce(&raw.into(), data_type, &CELL, &ParseOptions::default()).unwrap_err()
    }

    fn utc(text: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(text).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_absent_cells_are_undefined() {
        for data_type in DataType::ALL {
            assert_eq!(ok(CellValue::Null, data_type), None);
            assert_eq!(ok("   ", data_type), None);
        }
    }

    #[test]
    fn test_strict_missing_values() {
        let opts = ParseOptions::default().with_strict_missing_values(true);
        assert_eq!(coerce(&CellValue::Null, DataType::String, &CELL, &opts).unwrap(), None);

        let error = coerce(&CellValue::Null, DataType::Number, &CELL, &opts).unwrap_err();
        assert_eq!(error.reason, "missing value");
        assert_eq!(error.row_number, 5);
        assert_eq!(error.col_number, 3);
    }

    #[test]
    fn test_string() {
        assert_eq!(ok("  bob ", DataType::String), Some(Value::String("  bob ".to_string())));
        assert_eq!(ok(30.0, DataType::String), Some(Value::String("30".to_string())));
        assert_eq!(ok(2.5, DataType::String), Some(Value::String("2.5".to_string())));
        assert_eq!(ok(true, DataType::String), Some(Value::String("true".to_string())));

        let dt = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(
            ok(dt, DataType::String),
            Some(Value::String("2024-01-15T10:30:00Z".to_string()))
        );
    }

    #[test]
    fn test_number() {
        assert_eq!(ok(7, DataType::Number), Some(Value::Number(7.0)));
        assert_eq!(ok(" -1.25e2 ", DataType::Number), Some(Value::Number(-125.0)));
        assert_eq!(err("not-a-number", DataType::Number).reason, "not a number");
        assert_eq!(err("inf", DataType::Number).reason, "number is not finite");
        assert!(err(true, DataType::Number).reason.contains("bool"));
    }

    #[test]
    fn test_bigint() {
        assert_eq!(ok(42, DataType::BigInt), Some(Value::BigInt(42)));
        assert_eq!(ok(1e15, DataType::BigInt), Some(Value::BigInt(1_000_000_000_000_000)));
        assert_eq!(
            ok("170141183460469231731687303715884105727", DataType::BigInt),
            Some(Value::BigInt(i128::MAX))
        );
        assert_eq!(err(1.5, DataType::BigInt).reason, "number is not an integer");
        assert_eq!(err("12.0", DataType::BigInt).reason, "not an integer");
    }

    #[test]
    fn test_bigint_rejects_floats_past_i128() {
        assert_eq!(err(1e40, DataType::BigInt).reason, "integer out of range");
        assert_eq!(err(-1e40, DataType::BigInt).reason, "integer out of range");
        assert_eq!(err(2f64.powi(127), DataType::BigInt).reason, "integer out of range");
        assert_eq!(
            ok(-(2f64.powi(127)), DataType::BigInt),
            Some(Value::BigInt(i128::MIN))
        );
        assert_eq!(ok(2f64.powi(100), DataType::BigInt), Some(Value::BigInt(1_i128 << 100)));
    }

    #[test]
    fn test_boolean() {
        assert_eq!(ok(false, DataType::Boolean), Some(Value::Boolean(false)));
        assert_eq!(ok(" TRUE ", DataType::Boolean), Some(Value::Boolean(true)));
        assert_eq!(ok("False", DataType::Boolean), Some(Value::Boolean(false)));
        assert!(err("yes", DataType::Boolean).reason.contains("true or false"));
        assert!(err(1, DataType::Boolean).reason.contains("int"));
    }

    #[test]
    fn test_date() {
        assert_eq!(
            ok("2024-01-15T10:30:00+02:00", DataType::Date),
            Some(Value::Date(utc("2024-01-15T08:30:00Z")))
        );
        assert_eq!(
            ok("2024-01-15T10:30:00.250", DataType::Date),
            Some(Value::Date(utc("2024-01-15T10:30:00.250Z")))
        );
        assert_eq!(
            ok("2024-01-15 10:30:00", DataType::Date),
            Some(Value::Date(utc("2024-01-15T10:30:00Z")))
        );
        assert_eq!(
            ok("2024-01-15", DataType::Date),
            Some(Value::Date(utc("2024-01-15T00:00:00Z")))
        );

        let dt = NaiveDate::from_ymd_opt(2023, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        assert_eq!(ok(dt, DataType::Date), Some(Value::Date(utc("2023-12-31T23:59:59Z"))));

        assert!(err("15/01/2024", DataType::Date).reason.contains("ISO-8601"));
        assert!(err(45000, DataType::Date).reason.contains("int"));
    }

    #[test]
    fn test_uuid() {
        let text = "67E55044-10B1-426F-9247-BB680E5FE0C8";
        let value = ok(text, DataType::Uuid).unwrap();
        assert_eq!(
            value.to_string(),
            "67e55044-10b1-426f-9247-bb680e5fe0c8"
        );
        assert_eq!(err("67e5504410b1426f9247bb680e5fe0c8", DataType::Uuid).reason, "not a canonical uuid");
        assert!(err(12, DataType::Uuid).reason.contains("int"));
    }

    #[test]
    fn test_json() {
        assert_eq!(
            ok(r#"{"a": [1, 2]}"#, DataType::Json),
            Some(Value::Json(serde_json::json!({"a": [1, 2]})))
        );
        assert_eq!(ok(12, DataType::Json), Some(Value::Json(serde_json::json!(12))));
        assert_eq!(ok(true, DataType::Json), Some(Value::Json(serde_json::json!(true))));
        assert!(err("{oops", DataType::Json).reason.starts_with("invalid json"));
    }

    #[test]
    fn test_password() {
        let value = ok("hunter2", DataType::Password).unwrap();
        assert_eq!(value.as_password().map(Password::expose), Some("hunter2"));
        assert_eq!(value.to_string(), "********");
    }

    #[test]
    fn test_error_cells_fail_every_type() {
        for data_type in DataType::ALL {
            let error = err(CellValue::Error("#DIV/0!".to_string()), data_type);
            assert!(error.reason.contains("#DIV/0!"));
        }
    }

    #[test]
    fn test_formatted_values_round_trip() {
        let date = ok("2024-02-29T12:00:00.5Z", DataType::Date).unwrap();
        assert_eq!(ok(date.to_string(), DataType::Date), Some(date));

        let json = ok(r#"{"k":[true,null,"v"]}"#, DataType::Json).unwrap();
        assert_eq!(ok(json.to_string(), DataType::Json), Some(json));

        let uuid = ok("a1a2a3a4-b1b2-c1c2-d1d2-d3d4d5d6d7d8", DataType::Uuid).unwrap();
        assert_eq!(ok(uuid.to_string(), DataType::Uuid), Some(uuid));

        let number = ok("0.1", DataType::Number).unwrap();
        assert_eq!(ok(number.to_string(), DataType::Number), Some(number));

        let boolean = ok("TRUE", DataType::Boolean).unwrap();
        assert_eq!(ok(boolean.to_string(), DataType::Boolean), Some(boolean));
    }

    #[test]
    fn test_collect_policy_keeps_errors_on_record() {
        let mut record = Record::new();
        let opts = ParseOptions::default().with_coercion_policy(CoercionPolicy::Collect);
        coerce_into_record(&mut record, &CellValue::from("x"), DataType::Number, &CELL, &opts).unwrap();
        assert!(record.is_empty());
        assert_eq!(record.errors().len(), 1);

        let abort = ParseOptions::default();
        assert!(coerce_into_record(&mut record, &CellValue::from("x"), DataType::Number, &CELL, &abort).is_err());

        coerce_into_record(&mut record, &CellValue::Int(4), DataType::Number, &CELL, &abort).unwrap();
        assert_eq!(record.get("field"), Some(&Value::Number(4.0)));
    }
}
