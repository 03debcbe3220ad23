//! Workbook data structures

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::fmt;

/// Data ingested from one file: sheet name to its records, in file sheet order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkbookData {
    pub sheets: Vec<SheetData>,
}

impl WorkbookData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the records of a sheet by name
    pub fn get(&self, name: &str) -> Option<&[RowRecord]> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.rows.as_slice())
    }

    /// Store the records of a sheet, replacing any previous entry with the same name
    pub fn insert(&mut self, name: impl Into<String>, rows: Vec<RowRecord>) {
        let name = name.into();
        match self.sheets.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.rows = rows,
            None => self.sheets.push(SheetData { name, rows }),
        }
    }

    /// Get all sheet names
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RowRecord])> {
        self.sheets
            .iter()
            .map(|s| (s.name.as_str(), s.rows.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Total number of records across all sheets
    pub fn total_rows(&self) -> usize {
        self.sheets.iter().map(|s| s.rows.len()).sum()
    }
}

/// Records of a single sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetData {
    pub name: String,
    pub rows: Vec<RowRecord>,
}

/// One data row keyed by the sheet's header labels
///
/// Keys keep the column order of the header row. A label repeated in the
/// header maps to a single key holding the value of its last column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowRecord {
    fields: Vec<(String, CellValue)>,
}

impl RowRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record by pairing labels with values, dropping unpaired entries
    pub fn from_pairs<'a, I>(headers: &[String], values: I) -> Self
    where
        I: IntoIterator<Item = &'a CellValue>,
    {
        let mut record = Self::new();
        for (label, value) in headers.iter().zip(values) {
            record.insert(label.clone(), value.clone());
        }
        record
    }

    pub fn insert(&mut self, label: String, value: CellValue) {
        match self.fields.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(l, v)| (l.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for RowRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (label, value) in &self.fields {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Cell value types
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl CellValue {
    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Empty cells and zero-length text carry no data
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            // Integral numbers print without a fractional part
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}
