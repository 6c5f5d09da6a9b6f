use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Semantic role a column can play in a transaction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Amount,
    Type,
    Vat,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::Amount => "amount",
            Role::Type => "type",
            Role::Vat => "vat",
        };
        f.write_str(label)
    }
}

/// Terminal failures of a reconciliation run. The `Display` text is the
/// message shown to the user; no partial result accompanies any variant.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReconcileError {
    #[error("Unsupported file format. Please upload CSV, Excel, or JSON.")]
    UnsupportedFormat(String),
    #[error("Error parsing file: {0}")]
    DecodeFailure(String),
    #[error("File is {size} bytes, which exceeds the {limit} byte limit.")]
    InputTooLarge { size: u64, limit: u64 },
    #[error("{}", missing_column_message(.0))]
    MissingColumn(Role),
    #[error(
        "No valid sales or purchases transactions found. Check your type column values (should be 'sales' or 'purchases')."
    )]
    NoTransactions,
}

fn missing_column_message(role: &Role) -> &'static str {
    match role {
        Role::Amount => {
            "No amount column found. Expected columns like 'amount', 'value', or 'total'."
        }
        Role::Type => {
            "No type column found. Expected columns like 'type', 'category' with values 'sales' or 'purchases'."
        }
        Role::Vat => "No VAT column found.",
    }
}
