use std::fmt;

use serde::{Deserialize, Serialize};

/// A single decoded table cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Coerces the cell to a finite number.
    ///
    /// Numbers pass through, text is parsed after trimming surrounding
    /// whitespace. Everything else, including empty text and non-finite
    /// values, yields `None`. Currency symbols and grouping separators are
    /// not stripped.
    pub fn as_number(&self) -> Option<f64> {
        let parsed = match self {
            Cell::Number(n) => *n,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
            Cell::Null => return None,
        };
        parsed.is_finite().then_some(parsed)
    }

    /// Trimmed, lower-cased text used as a classification key. Only text cells
    /// produce a key.
    pub fn as_label(&self) -> Option<String> {
        match self {
            Cell::Text(s) => Some(normalize_label(s)),
            _ => None,
        }
    }

    pub fn as_display(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    (*n as i64).to_string()
                } else {
                    n.to_string()
                }
            }
            Cell::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl<T> From<Option<T>> for Cell
where
    T: Into<Cell>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Null)
    }
}

pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase()
}

pub fn normalize_label(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_column_name_trims_and_lowercases() {
        assert_eq!(normalize_column_name("  Total Amount "), "total amount");
        assert_eq!(normalize_column_name("VAT"), "vat");
    }

    #[test]
    fn as_number_accepts_numbers_and_numeric_text() {
        assert_eq!(Cell::Number(12.5).as_number(), Some(12.5));
        assert_eq!(Cell::text(" 42 ").as_number(), Some(42.0));
        assert_eq!(Cell::text("-3.75").as_number(), Some(-3.75));
        assert_eq!(Cell::text("1e3").as_number(), Some(1000.0));
    }

    #[test]
    fn as_number_rejects_everything_else() {
        assert_eq!(Cell::Null.as_number(), None);
        assert_eq!(Cell::text("").as_number(), None);
        assert_eq!(Cell::text("bad").as_number(), None);
        assert_eq!(Cell::text("€10").as_number(), None);
        assert_eq!(Cell::text("1,000").as_number(), None);
        assert_eq!(Cell::text("NaN").as_number(), None);
        assert_eq!(Cell::text("inf").as_number(), None);
        assert_eq!(Cell::Number(f64::NAN).as_number(), None);
    }

    #[test]
    fn as_label_only_for_text() {
        assert_eq!(Cell::text(" Purchases ").as_label().as_deref(), Some("purchases"));
        assert_eq!(Cell::Number(1.0).as_label(), None);
        assert_eq!(Cell::Null.as_label(), None);
    }

    #[test]
    fn display_drops_trailing_zero_fraction() {
        assert_eq!(Cell::Number(100.0).as_display(), "100");
        assert_eq!(Cell::Number(9.35).as_display(), "9.35");
        assert_eq!(Cell::Null.as_display(), "");
    }

    #[test]
    fn option_converts_to_null() {
        assert_eq!(Cell::from(None::<f64>), Cell::Null);
        assert_eq!(Cell::from(Some("sale")), Cell::text("sale"));
    }
}
