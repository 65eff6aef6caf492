pub mod checkpoint;

pub mod macros;

#[cfg(feature = "test_utils")]
pub mod test_utils;

use rockbound::{schema::ColumnFamilyName, Schema};

use crate::checkpoint::schemas::{AckCountSchema, CheckpointSchema};

pub const ROCKSDB_NAME: &str = "berth";

pub const STORE_COLUMN_FAMILIES: &[ColumnFamilyName] = &[
    CheckpointSchema::COLUMN_FAMILY_NAME,
    AckCountSchema::COLUMN_FAMILY_NAME,
];

// Re-exports
pub use checkpoint::db::RBCheckpointDB;

/// database operations configuration
#[derive(Clone, Copy, Debug)]
pub struct DbOpsConfig {
    pub retry_count: u16,
}

impl DbOpsConfig {
    pub fn new(retry_count: u16) -> Self {
        Self { retry_count }
    }
}
