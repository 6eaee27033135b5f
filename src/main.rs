mod config;
mod gateway;
mod ingest;

use std::path::PathBuf;

use anyhow::{Context, Result};
use rdf::Record;
use serde_json::Value;
use tracing::info;

use crate::config::Config;
use crate::gateway::{Fedora, StorageGateway};
use crate::ingest::Pipeline;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let flags = xflags::parse_or_exit! {
        /// TOML configuration file
        optional -c,--config CONFIG: PathBuf
        /// Fedora container root, overrides fedora.base_url
        optional --base-url URL: String
        /// Log the resolved paths and SPARQL update without contacting Fedora
        optional --dry-run
        /// Fetch and log the container's JSON-LD after patching
        optional --show
        /// JSON file holding one DesignSafe metadata record
        required record: PathBuf
    };

    let mut config = match &flags.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(base_url) = flags.base_url {
        config.fedora.base_url = base_url;
    }

    let text = tokio::fs::read_to_string(&flags.record)
        .await
        .with_context(|| format!("unable to read record {}", flags.record.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("record {} is not valid JSON", flags.record.display()))?;
    let record = Record::from(value);

    let pipeline = Pipeline::new(
        config.fedora.base_url.clone(),
        config.field_mapper()?,
        config.quoting(),
    );

    if flags.dry_run {
        let prepared = pipeline.prepare(&record)?;
        info!(
            container = %prepared.paths.container,
            parent = ?prepared.paths.parent,
            "dry-run update\n{}",
            prepared.update
        );
        return Ok(());
    }

    let fedora = Fedora::new(&config.fedora)?;
    let paths = pipeline
        .create_container_with_metadata(&fedora, &record)
        .await?;

    if flags.show {
        let metadata = fedora.get_container_metadata(&paths.container).await?;
        info!(
            container = %paths.container,
            "container metadata {}",
            serde_json::to_string_pretty(&metadata)?
        );
    }

    Ok(())
}
