//! Rendering of reconciliation results for the terminal and as JSON.

use std::fmt::Write as _;

use anyhow::Result;
use serde_json::json;

use crate::{engine::ReconciliationResult, roles::ColumnRoles};

const CURRENCY: &str = "€";

pub fn format_amount(value: f64) -> String {
    format!("{CURRENCY}{value:.2}")
}

/// Label for the net line; zero counts as owed.
pub fn net_label(result: &ReconciliationResult) -> &'static str {
    if result.is_refund() {
        "Refund Due"
    } else {
        "Amount Owed to Revenue"
    }
}

pub fn render_result(result: &ReconciliationResult) -> String {
    let rows = vec![
        vec!["Total Sales VAT".to_string(), format_amount(result.sales_vat)],
        vec![
            "Total Purchases VAT".to_string(),
            format_amount(result.purchases_vat),
        ],
        vec![
            net_label(result).to_string(),
            format_amount(result.net_position.abs()),
        ],
    ];
    let mut output = render_pairs(&rows);
    if !result.warnings.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "Warnings:");
        for warning in &result.warnings {
            let _ = writeln!(output, "  - {warning}");
        }
    }
    output
}

pub fn render_roles(roles: &ColumnRoles) -> String {
    let vat = roles
        .vat
        .as_ref()
        .map(|column| column.name.clone())
        .unwrap_or_else(|| "(none: inferred from amount)".to_string());
    let rows = vec![
        vec!["amount".to_string(), roles.amount.name.clone()],
        vec!["type".to_string(), roles.kind.name.clone()],
        vec!["vat".to_string(), vat],
    ];
    render_pairs(&rows)
}

pub fn result_json(result: &ReconciliationResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

pub fn error_json(message: &str) -> String {
    json!({ "error": message }).to_string()
}

fn render_pairs(rows: &[Vec<String>]) -> String {
    let width = rows
        .iter()
        .filter_map(|row| row.first())
        .map(|label| display_width(label))
        .max()
        .unwrap_or(0);
    let mut output = String::new();
    for row in rows {
        let line = format_row(row, width);
        let _ = writeln!(output, "{line}");
    }
    output
}

fn format_row(values: &[String], label_width: usize) -> String {
    let mut line = String::new();
    if let Some(label) = values.first() {
        line.push_str(label);
        line.push(':');
        let padding = label_width.saturating_sub(display_width(label));
        line.push_str(&" ".repeat(padding + 2));
    }
    for value in values.iter().skip(1) {
        line.push_str(value);
    }
    while line.ends_with(' ') {
        line.pop();
    }
    line
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}
