use std::{fs, sync::Arc};

use anyhow::Context;
use berth_common::logging::{self, LoggerConfig};
use rockbound::rocksdb;
use tokio::runtime::Handle;

use crate::{
    args::{apply_override, parse_override, Args},
    config::Config,
};

/// Sets up the global tracing subscriber, with OTLP export if the standard
/// envvar points at a collector.
pub fn init_logging(handle: &Handle) {
    let mut lconfig = LoggerConfig::with_base_name("berth-client");
    if let Some(url) = logging::get_otlp_url_from_env() {
        lconfig.set_otlp_url(url);
    }

    // the OTLP batch exporter wants a runtime context
    let _rt_guard = handle.enter();
    logging::init(lconfig);
}

/// Loads the toml config and layers the CLI overrides on top before
/// deserializing.
pub fn get_config(args: Args) -> anyhow::Result<Config> {
    let config_str = fs::read_to_string(&args.config)
        .with_context(|| format!("reading config {:?}", args.config))?;
    let mut toml_value = toml::from_str::<toml::Value>(&config_str)?;
    let table = toml_value
        .as_table_mut()
        .context("config root must be a table")?;

    for override_str in args.get_overrides()? {
        let (path, value) = parse_override(&override_str)?;
        apply_override(&path, value, table)?;
    }

    Ok(toml_value.try_into::<Config>()?)
}

pub fn open_rocksdb_database(
    config: &Config,
) -> anyhow::Result<Arc<rockbound::OptimisticTransactionDB>> {
    let mut database_dir = config.client.datadir.clone();
    database_dir.push("rocksdb");

    if !database_dir.exists() {
        fs::create_dir_all(&database_dir)?;
    }

    let dbname = berth_rocksdb::ROCKSDB_NAME;
    let cfs = berth_rocksdb::STORE_COLUMN_FAMILIES;
    let mut opts = rocksdb::Options::default();
    opts.create_if_missing(true);
    opts.create_missing_column_families(true);

    let rbdb = rockbound::OptimisticTransactionDB::open(
        &database_dir,
        dbname,
        cfs.iter().map(|s| s.to_string()),
        &opts,
    )
    .context("opening database")?;

    Ok(Arc::new(rbdb))
}
