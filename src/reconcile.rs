use anyhow::{Error, Result};
use log::info;

use crate::{
    cli::{OutputFormat, ReconcileArgs},
    config::ReconcileConfig,
    engine,
    error::ReconcileError,
    ingest, report,
    vat::VatSource,
};

pub fn execute(args: &ReconcileArgs) -> Result<()> {
    let outcome = reconcile_input(args);
    match (args.output, outcome) {
        (OutputFormat::Table, Ok(result)) => {
            print!("{}", report::render_result(&result));
            Ok(())
        }
        (OutputFormat::Json, Ok(result)) => {
            println!("{}", report::result_json(&result)?);
            Ok(())
        }
        (OutputFormat::Json, Err(err)) => {
            println!("{}", report::error_json(&user_message(&err)));
            Err(err)
        }
        (OutputFormat::Table, Err(err)) => Err(err),
    }
}

fn reconcile_input(args: &ReconcileArgs) -> Result<engine::ReconciliationResult> {
    let options = args.source.ingest_options()?;
    let (format, table) = ingest::load_table(&args.source.input, &options)?;
    let config = ReconcileConfig::default().with_standard_rate(args.standard_rate);

    let reconciliation = engine::run(&table, &config)?;
    let vat_origin = match reconciliation.vat_source {
        VatSource::Column(_) => reconciliation
            .roles
            .vat
            .as_ref()
            .map(|column| format!("column '{}'", column.name))
            .unwrap_or_default(),
        VatSource::Inferred { .. } => format!("inferred at {}", config.rate_label()),
    };
    info!(
        "Reconciled {:?} ({format}): amount='{}' type='{}' vat={}",
        args.source.input,
        reconciliation.roles.amount.name,
        reconciliation.roles.kind.name,
        vat_origin
    );
    info!(
        "{} of {} row(s) retained; {} matched neither sales nor purchases",
        reconciliation.rows_retained, reconciliation.rows_read, reconciliation.unclassified_rows
    );
    Ok(reconciliation.result)
}

/// Message shown to API-style consumers: the bare domain message when the
/// failure is a [`ReconcileError`], the full context chain otherwise.
pub fn user_message(err: &Error) -> String {
    match err.downcast_ref::<ReconcileError>() {
        Some(domain) => domain.to_string(),
        None => format!("{err:#}"),
    }
}
