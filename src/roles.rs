//! Heuristic column-role resolution.
//!
//! Columns are scanned left to right and tested for keyword substrings. Each
//! later match overwrites the previous assignment for that role, so the
//! rightmost qualifying column wins. This is observable on ambiguous headers
//! such as `total_amount,amount` and must stay a plain ordered scan.

use log::debug;
use serde::Serialize;

use crate::error::{ReconcileError, Role};

pub const AMOUNT_KEYWORDS: &[&str] = &["amount", "value", "total"];
pub const TYPE_KEYWORDS: &[&str] = &["type", "category", "kind"];
pub const VAT_KEYWORDS: &[&str] = &["vat"];

/// A column selected for a role, by position and normalized name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedColumn {
    pub index: usize,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnRoles {
    pub amount: ResolvedColumn,
    #[serde(rename = "type")]
    pub kind: ResolvedColumn,
    pub vat: Option<ResolvedColumn>,
}

fn matches_any(name: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| name.contains(keyword))
}

/// Resolves roles over already-normalized column names.
pub fn resolve_roles(columns: &[String]) -> Result<ColumnRoles, ReconcileError> {
    let mut amount: Option<ResolvedColumn> = None;
    let mut kind: Option<ResolvedColumn> = None;
    let mut vat: Option<ResolvedColumn> = None;

    for (index, name) in columns.iter().enumerate() {
        let candidate = ResolvedColumn {
            index,
            name: name.clone(),
        };
        if matches_any(name, AMOUNT_KEYWORDS) {
            amount = Some(candidate.clone());
        }
        if matches_any(name, TYPE_KEYWORDS) {
            kind = Some(candidate.clone());
        }
        let is_amount_column = amount.as_ref().is_some_and(|a| a.index == index);
        if matches_any(name, VAT_KEYWORDS) && !is_amount_column {
            vat = Some(candidate);
        }
    }

    let amount = amount.ok_or(ReconcileError::MissingColumn(Role::Amount))?;
    let kind = kind.ok_or(ReconcileError::MissingColumn(Role::Type))?;
    debug!(
        "Resolved roles: amount='{}' type='{}' vat={:?}",
        amount.name,
        kind.name,
        vat.as_ref().map(|v| v.name.as_str())
    );
    Ok(ColumnRoles { amount, kind, vat })
}
