pub mod aggregate;
pub mod cli;
pub mod config;
pub mod data;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod io_utils;
pub mod reconcile;
pub mod report;
pub mod roles;
pub mod roles_cmd;
pub mod validate;
pub mod vat;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, debug};

use crate::cli::{Cli, Commands};

pub use crate::{
    config::ReconcileConfig,
    data::Cell,
    dataset::Table,
    engine::{ReconciliationResult, reconcile},
    error::{ReconcileError, Role},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("vat_recon", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    debug!("Parsed command line: {:?}", cli.command);
    match cli.command {
        Commands::Reconcile(args) => reconcile::execute(&args),
        Commands::Roles(args) => roles_cmd::execute(&args),
    }
}
