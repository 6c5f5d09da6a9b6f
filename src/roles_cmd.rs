use anyhow::Result;
use log::info;

use crate::{cli::RolesArgs, ingest, report, roles};

pub fn execute(args: &RolesArgs) -> Result<()> {
    let options = args.source.ingest_options()?;
    let (format, table) = ingest::load_table(&args.source.input, &options)?;
    let resolved = roles::resolve_roles(&table.normalized_columns())?;
    print!("{}", report::render_roles(&resolved));
    info!(
        "Resolved column roles for {:?} ({format}) across {} column(s)",
        args.source.input,
        table.columns().len()
    );
    Ok(())
}
