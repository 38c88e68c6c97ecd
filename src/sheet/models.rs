// src/sheet/models.rs
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// A single cell of an exported sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Builds a cell from a text field of a delimited export.
    /// Blank fields are empty, plain floats are numbers, anything else stays text.
    pub fn from_text(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Cell::Empty;
        }
        match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Cell::Number(n),
            _ => Cell::Text(raw.to_string()),
        }
    }

    /// True for text cells with at least one character (whitespace counts).
    pub fn is_non_empty_text(&self) -> bool {
        matches!(self, Cell::Text(s) if !s.is_empty())
    }

    /// Converts the cell to a finite number, or `None` when it carries no value.
    ///
    /// Native numbers pass through. Strings have their grouping commas removed and
    /// the leading decimal literal is taken, so `"1,234.5"` is `1234.5` and `"45.2 %"`
    /// is `45.2`, while `"abc"` is `None`.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Text(s) => parse_number(s),
            _ => None,
        }
    }

    /// The row label form of this cell: trimmed text, or a rendered number.
    /// Empty text and numeric zero give no label.
    pub fn label(&self) -> Option<String> {
        match self {
            Cell::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Cell::Number(n) if *n != 0.0 && !n.is_nan() => Some(self.to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
            Cell::Empty => Ok(()),
        }
    }
}

static LEADING_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("Failed to compile LEADING_NUMBER_RE")
});

/// Parses a formatted numeric string: commas are dropped and the longest leading
/// decimal literal is read. Returns `None` when no digits lead the string.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(',', "");
    let literal = LEADING_NUMBER_RE.find(cleaned.trim_start())?;
    literal.as_str().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// One sheet of an export: a name and its rows, column 0 being the row label.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { name: name.into(), rows }
    }

    /// Builds a sheet from plain string rows, typing each field with [`Cell::from_text`].
    pub fn from_strings<R, S>(name: &str, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|c| Cell::from_text(c.as_ref())).collect())
            .collect();
        Self::new(name, rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> &[Cell] {
        self.rows.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Trimmed label of the row at `index`, if any.
    pub fn label(&self, index: usize) -> Option<String> {
        self.row(index).first().and_then(Cell::label)
    }
}
