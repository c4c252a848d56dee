//! Typed values produced by coercing worksheet cells.

use crate::error::CoercionError;
use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Declared type of a front matter key, data table column or data list key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Number,
    Boolean,
    BigInt,
    Date,
    Password,
    Json,
    Uuid,
}

impl DataType {
    /// Every valid type, in declaration order.
    pub const ALL: [DataType; 8] = [
        DataType::String,
        DataType::Number,
        DataType::Boolean,
        DataType::BigInt,
        DataType::Date,
        DataType::Password,
        DataType::Json,
        DataType::Uuid,
    ];

    /// The token used to declare this type in a worksheet.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Number => "number",
            DataType::Boolean => "boolean",
            DataType::BigInt => "bigint",
            DataType::Date => "date",
            DataType::Password => "password",
            DataType::Json => "json",
            DataType::Uuid => "uuid",
        }
    }

    /// Comma separated list of the valid tokens, for diagnostics.
    #[must_use]
    pub fn token_list() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token that does not name a known [`DataType`] or [`DataLayout`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} token '{token}'")]
pub struct UnknownToken {
    pub kind: &'static str,
    pub token: String,
}

impl FromStr for DataType {
    type Err = UnknownToken;

    /// Parse a type token. Surrounding whitespace is ignored; matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == token)
            .ok_or_else(|| UnknownToken {
                kind: "data type",
                token: token.to_string(),
            })
    }
}

/// Shape of a worksheet's data body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataLayout {
    DataTable,
    DataList,
    FrontMatterOnly,
}

impl DataLayout {
    pub const ALL: [DataLayout; 3] = [
        DataLayout::DataTable,
        DataLayout::DataList,
        DataLayout::FrontMatterOnly,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DataLayout::DataTable => "dataTable",
            DataLayout::DataList => "dataList",
            DataLayout::FrontMatterOnly => "frontMatterOnly",
        }
    }
}

impl fmt::Display for DataLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataLayout {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == token)
            .ok_or_else(|| UnknownToken {
                kind: "data layout",
                token: token.to_string(),
            })
    }
}

/// A secret string. `Debug` and `Display` never print the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MASK: &'static str = "********";

    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Borrow the secret itself.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Password({})", Self::MASK)
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::MASK)
    }
}

/// A successfully coerced cell value; the variant mirrors its [`DataType`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Number(f64),
    Boolean(bool),
    BigInt(i128),
    Date(DateTime<Utc>),
    Password(Password),
    Json(serde_json::Value),
    Uuid(Uuid),
}

impl Value {
    /// The data type this value was coerced to.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        match self {
            Self::String(_) => DataType::String,
            Self::Number(_) => DataType::Number,
            Self::Boolean(_) => DataType::Boolean,
            Self::BigInt(_) => DataType::BigInt,
            Self::Date(_) => DataType::Date,
            Self::Password(_) => DataType::Password,
            Self::Json(_) => DataType::Json,
            Self::Uuid(_) => DataType::Uuid,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Self::BigInt(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_password(&self) -> Option<&Password> {
        match self {
            Self::Password(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(j) => Some(j),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            Self::Uuid(u) => Some(u),
            _ => None,
        }
    }

    /// Convert to `serde_json::Value`.
    ///
    /// Dates become RFC 3339 strings and bigints outside the `i64` range become
    /// decimal strings. Passwords are masked unless `reveal_passwords` is set.
    #[must_use]
    pub fn to_json(&self, reveal_passwords: bool) -> serde_json::Value {
        match self {
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::Boolean(b) => serde_json::Value::Bool(*b),
            Self::BigInt(n) => match i64::try_from(*n) {
                Ok(small) => serde_json::Value::Number(small.into()),
                Err(_) => serde_json::Value::String(n.to_string()),
            },
            Self::Date(d) => serde_json::Value::String(format_date(d)),
            Self::Password(p) if reveal_passwords => serde_json::Value::String(p.expose().to_string()),
            Self::Password(p) => serde_json::Value::String(p.to_string()),
            Self::Json(j) => j.clone(),
            Self::Uuid(u) => serde_json::Value::String(u.hyphenated().to_string()),
        }
    }
}

pub(crate) fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::BigInt(n) => write!(f, "{n}"),
            Self::Date(d) => f.write_str(&format_date(d)),
            Self::Password(p) => write!(f, "{p}"),
            Self::Json(j) => write!(f, "{j}"),
            Self::Uuid(u) => write!(f, "{}", u.hyphenated()),
        }
    }
}

/// Ordered mapping from property/column name to its declared type.
pub type DataTypeMap = IndexMap<String, DataType>;

/// Type map of a worksheet's front matter.
pub type MetaTypeMap = DataTypeMap;

/// One typed object: a data table row, a data list, or front matter.
///
/// Absent (undefined) values are not stored. Coercion errors collected under
/// [`CoercionPolicy::Collect`](crate::CoercionPolicy::Collect) are kept
/// alongside the values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: IndexMap<String, Value>,
    errors: Vec<CoercionError>,
}

/// Front matter of a worksheet.
pub type Meta = Record;

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Insert a value, returning the previous one for that key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(key.into(), value)
    }

    /// Number of defined values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    #[must_use]
    pub fn errors(&self) -> &[CoercionError] {
        &self.errors
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub(crate) fn push_error(&mut self, error: CoercionError) {
        self.errors.push(error);
    }

    /// Convert the defined values to a JSON object, in key order.
    #[must_use]
    pub fn to_json(&self, reveal_passwords: bool) -> serde_json::Value {
        serde_json::Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json(reveal_passwords)))
                .collect(),
        )
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
            errors: Vec::new(),
        }
    }
}
