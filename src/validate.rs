use log::debug;

use crate::{dataset::Table, roles::ColumnRoles};

/// A row that survived validation.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingRow {
    /// Zero-based position in the source table.
    pub row: usize,
    pub vat_amount: f64,
    /// Normalized type value; `None` when the type cell is not text.
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Validation {
    pub retained: Vec<WorkingRow>,
    pub invalid_rows: usize,
    pub negative_rows: usize,
    pub warnings: Vec<String>,
}

/// Drops rows without a usable VAT amount and flags negative ones.
///
/// `amounts` must hold one entry per table row. Negative rows are kept and
/// still count towards the totals.
pub fn validate_rows(table: &Table, roles: &ColumnRoles, amounts: &[Option<f64>]) -> Validation {
    let mut validation = Validation::default();

    for (row, amount) in amounts.iter().enumerate() {
        let Some(vat_amount) = *amount else {
            validation.invalid_rows += 1;
            continue;
        };
        validation.retained.push(WorkingRow {
            row,
            vat_amount,
            label: table.cell(row, roles.kind.index).as_label(),
        });
    }

    if validation.invalid_rows > 0 {
        validation.warnings.push(format!(
            "{} row(s) with invalid VAT amounts (skipped).",
            validation.invalid_rows
        ));
    }

    validation.negative_rows = validation
        .retained
        .iter()
        .filter(|r| r.vat_amount < 0.0)
        .count();
    if validation.negative_rows > 0 {
        validation.warnings.push(format!(
            "{} row(s) with negative VAT amounts detected.",
            validation.negative_rows
        ));
    }

    debug!(
        "Validated {} row(s): {} retained, {} invalid, {} negative",
        amounts.len(),
        validation.retained.len(),
        validation.invalid_rows,
        validation.negative_rows
    );
    validation
}
