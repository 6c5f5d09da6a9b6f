//! The reconciliation pipeline: resolve roles, derive VAT, validate rows,
//! aggregate, build the result.
//!
//! Everything here is a pure function of the table and the configuration.

use log::debug;
use serde::Serialize;

use crate::{
    aggregate::{TransactionClass, aggregate},
    config::ReconcileConfig,
    dataset::Table,
    error::ReconcileError,
    roles::{ColumnRoles, resolve_roles},
    validate::validate_rows,
    vat::{VatSource, derive_vat_amounts},
};

/// Final VAT position. Values are unrounded; rounding is a presentation
/// concern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationResult {
    pub sales_vat: f64,
    pub purchases_vat: f64,
    pub net_position: f64,
    pub warnings: Vec<String>,
}

impl ReconciliationResult {
    pub fn new(sales_vat: f64, purchases_vat: f64, warnings: Vec<String>) -> Self {
        Self {
            sales_vat,
            purchases_vat,
            net_position: sales_vat - purchases_vat,
            warnings,
        }
    }

    /// True when purchases VAT exceeds sales VAT and money is due back.
    pub fn is_refund(&self) -> bool {
        self.net_position < 0.0
    }
}

/// A successful run together with the intermediate facts callers may want to
/// log or display.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub roles: ColumnRoles,
    pub vat_source: VatSource,
    pub rows_read: usize,
    pub rows_retained: usize,
    /// Retained rows whose type value matched neither marker.
    pub unclassified_rows: usize,
    pub result: ReconciliationResult,
}

pub fn reconcile(
    table: &Table,
    config: &ReconcileConfig,
) -> Result<ReconciliationResult, ReconcileError> {
    run(table, config).map(|reconciliation| reconciliation.result)
}

pub fn run(table: &Table, config: &ReconcileConfig) -> Result<Reconciliation, ReconcileError> {
    let roles = resolve_roles(&table.normalized_columns())?;
    let derivation = derive_vat_amounts(table, &roles, config);
    let validation = validate_rows(table, &roles, &derivation.amounts);
    let totals = aggregate(&validation.retained, config)?;

    let unclassified_rows = validation
        .retained
        .iter()
        .filter(|r| {
            TransactionClass::classify(r.label.as_deref(), config) == TransactionClass::Other
        })
        .count();

    let mut warnings = Vec::with_capacity(3);
    warnings.extend(derivation.warning);
    warnings.extend(validation.warnings);

    let result = ReconciliationResult::new(totals.sales_vat, totals.purchases_vat, warnings);
    debug!(
        "Reconciled sales_vat={} purchases_vat={} net_position={}",
        result.sales_vat, result.purchases_vat, result.net_position
    );
    Ok(Reconciliation {
        roles,
        vat_source: derivation.source,
        rows_read: table.row_count(),
        rows_retained: validation.retained.len(),
        unclassified_rows,
        result,
    })
}
