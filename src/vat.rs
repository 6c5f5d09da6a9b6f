use log::debug;

use crate::{config::ReconcileConfig, dataset::Table, roles::ColumnRoles};

/// Where per-row VAT amounts came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VatSource {
    /// Copied from an explicit VAT column.
    Column(usize),
    /// Extracted from the VAT-inclusive amount column at the standard rate.
    Inferred { amount_column: usize, multiplier: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct VatDerivation {
    pub source: VatSource,
    /// One entry per table row; `None` marks an unparseable amount.
    pub amounts: Vec<Option<f64>>,
    pub warning: Option<String>,
}

pub fn inferred_rate_warning(config: &ReconcileConfig) -> String {
    format!(
        "No VAT column found. Calculating VAT from amounts using {} rate.",
        config.rate_label()
    )
}

pub fn derive_vat_amounts(
    table: &Table,
    roles: &ColumnRoles,
    config: &ReconcileConfig,
) -> VatDerivation {
    match &roles.vat {
        Some(vat) => VatDerivation {
            source: VatSource::Column(vat.index),
            amounts: table.column_cells(vat.index).map(|c| c.as_number()).collect(),
            warning: None,
        },
        None => {
            let multiplier = config.fallback_multiplier();
            debug!(
                "No VAT column; inferring from '{}' with multiplier {multiplier}",
                roles.amount.name
            );
            VatDerivation {
                source: VatSource::Inferred {
                    amount_column: roles.amount.index,
                    multiplier,
                },
                amounts: table
                    .column_cells(roles.amount.index)
                    .map(|c| c.as_number().map(|gross| gross * multiplier))
                    .collect(),
                warning: Some(inferred_rate_warning(config)),
            }
        }
    }
}
