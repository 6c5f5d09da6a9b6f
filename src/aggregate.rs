use log::debug;
use serde::Serialize;

use crate::{config::ReconcileConfig, error::ReconcileError, validate::WorkingRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionClass {
    Sales,
    Purchases,
    Other,
}

impl TransactionClass {
    /// Single class for a normalized type value; the sales marker is checked
    /// first. Totals do not use this: see [`aggregate`].
    pub fn classify(label: Option<&str>, config: &ReconcileConfig) -> Self {
        match label {
            Some(l) if l.contains(config.sales_marker.as_str()) => TransactionClass::Sales,
            Some(l) if l.contains(config.purchase_marker.as_str()) => TransactionClass::Purchases,
            _ => TransactionClass::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub sales_vat: f64,
    pub purchases_vat: f64,
    pub sales_rows: usize,
    pub purchase_rows: usize,
}

fn label_contains(row: &WorkingRow, marker: &str) -> bool {
    row.label.as_deref().is_some_and(|l| l.contains(marker))
}

/// Sums VAT per class over the retained rows.
///
/// The sales and purchases filters are independent, so a type value holding
/// both markers (e.g. `sale-purchase-adjustment`) counts in both totals.
/// Both totals being exactly zero is reported as `NoTransactions`, which also
/// covers a dataset that genuinely nets to zero on both sides.
pub fn aggregate(rows: &[WorkingRow], config: &ReconcileConfig) -> Result<Totals, ReconcileError> {
    let mut totals = Totals::default();
    for row in rows.iter().filter(|r| label_contains(r, &config.sales_marker)) {
        totals.sales_vat += row.vat_amount;
        totals.sales_rows += 1;
    }
    for row in rows.iter().filter(|r| label_contains(r, &config.purchase_marker)) {
        totals.purchases_vat += row.vat_amount;
        totals.purchase_rows += 1;
    }
    debug!(
        "Aggregated {} sales row(s) and {} purchase row(s)",
        totals.sales_rows, totals.purchase_rows
    );

    if totals.sales_vat == 0.0 && totals.purchases_vat == 0.0 {
        return Err(ReconcileError::NoTransactions);
    }
    Ok(totals)
}
