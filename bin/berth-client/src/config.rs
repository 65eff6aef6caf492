use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default value for `datadir` in [`ClientConfig`].
const DEFAULT_DATADIR: &str = "berth-data";

/// Default value for `db_retry_count` in [`ClientConfig`].
const DEFAULT_DB_RETRY_COUNT: u16 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Chain identifier handed to the chain-init hook.
    pub chain_id: String,

    /// The data directory where database contents reside.
    #[serde(default = "default_datadir")]
    pub datadir: PathBuf,

    /// For optimistic transactions, how many times to retry if a write fails.
    #[serde(default = "default_db_retry_count")]
    pub db_retry_count: u16,
}

fn default_datadir() -> PathBuf {
    DEFAULT_DATADIR.into()
}

fn default_db_retry_count() -> u16 {
    DEFAULT_DB_RETRY_COUNT
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub client: ClientConfig,
}
