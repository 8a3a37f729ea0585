use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

/// One owned game as returned by the library endpoint. Keys keep their JSON order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }
}

pub type RecordSet = Vec<Record>;

/// How the header row is ordered. `Sorted` is the default output contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum HeaderOrder {
    /// Lexicographic by field name.
    #[default]
    Sorted,
    /// First appearance while scanning records in library order.
    FirstSeen,
}

/// Tagged view of a JSON value, used to render a single CSV cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Null,
    Text(&'a str),
    Boolean(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Structured(&'a Value),
}

impl<'a> From<&'a Value> for CellValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::String(s) => CellValue::Text(s),
            Value::Bool(b) => CellValue::Boolean(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    CellValue::Unsigned(u)
                } else {
                    CellValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::Array(_) | Value::Object(_) => CellValue::Structured(value),
        }
    }
}

impl fmt::Display for CellValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Unsigned(u) => write!(f, "{}", u),
            // f64's Display is the shortest round-trippable form and never uses an exponent.
            CellValue::Float(x) => write!(f, "{}", x),
            // Non-normative: compact JSON.
            CellValue::Structured(v) => write!(f, "{}", v),
        }
    }
}

/// API key and Steam ID for one run.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub steam_id: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, steam_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            steam_id: steam_id.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("steam_id", &self.steam_id)
            .finish()
    }
}

/// Output of the extract phase.
#[derive(Debug, Clone)]
pub struct Library {
    pub persona_name: String,
    pub games: RecordSet,
}

/// Rectangular table: every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub(crate) headers: Vec<String>,
    pub(crate) rows: Vec<Vec<String>>,
}

impl Table {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub persona_name: String,
    pub file_name: String,
    pub table: Table,
    pub csv_output: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub persona_name: String,
    pub output_path: String,
    pub rows_written: usize,
}
