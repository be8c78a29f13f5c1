//! Result rows
//!
//! Rows keep their columns in select-list order and serialize as JSON
//! objects in that order.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// A single cell
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// SQL NULL
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit integer
    Integer(i64),
    /// Floating point
    Float(f64),
    /// Exact decimal kept as text by drivers that have one
    Decimal(String),
    /// Text
    Text(String),
    /// Raw bytes
    Bytes(Vec<u8>),
}

impl CellValue {
    /// Convert an exact decimal to floating point so it serializes as a number
    ///
    /// Unparseable decimals are left untouched.
    pub fn normalized(self) -> Self {
        match self {
            CellValue::Decimal(text) => match text.trim().parse::<f64>() {
                Ok(value) => CellValue::Float(value),
                Err(_) => CellValue::Decimal(text),
            },
            other => other,
        }
    }

    /// Text content, if this is a text cell
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the cell is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "NULL"),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::Decimal(d) => write!(f, "{}", d),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// An ordered column-name to value mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, CellValue)>,
}

impl Row {
    /// Empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style append
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.push(column, value);
        self
    }

    /// Append a cell
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.push((column.into(), value.into()));
    }

    /// First cell with the given column name
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Column names in order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    /// Cells in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Normalize every decimal cell to floating point
    pub fn normalized(self) -> Self {
        Self {
            cells: self
                .cells
                .into_iter()
                .map(|(name, value)| (name, value.normalized()))
                .collect(),
        }
    }
}

impl FromIterator<(String, CellValue)> for Row {
    fn from_iter<T: IntoIterator<Item = (String, CellValue)>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_normalized_to_float() {
        assert_eq!(
            CellValue::Decimal("4.99".to_string()).normalized(),
            CellValue::Float(4.99)
        );
        assert_eq!(CellValue::Integer(3).normalized(), CellValue::Integer(3));
        assert_eq!(
            CellValue::Decimal("n/a".to_string()).normalized(),
            CellValue::Decimal("n/a".to_string())
        );
    }

    #[test]
    fn test_row_serializes_in_column_order() {
        let row = Row::new()
            .with("title", "Zorro Ark")
            .with("rentals", 31i64)
            .with("amount", CellValue::Decimal("12.50".into()).normalized())
            .with("rating", CellValue::Null);

        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Zorro Ark","rentals":31,"amount":12.5,"rating":null}"#
        );
    }

    #[test]
    fn test_row_lookup() {
        let row = Row::new().with("name", "Action").with("count", 64i64);
        assert_eq!(row.get("count"), Some(&CellValue::Integer(64)));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["name", "count"]);
        assert_eq!(row.get("name").and_then(CellValue::as_str), Some("Action"));
    }
}
