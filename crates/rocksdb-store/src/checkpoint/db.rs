use std::sync::Arc;

use berth_db::{errors::DbError, traits::CheckpointDatabase, DbResult};
use berth_primitives::checkpoint::CheckpointRecord;
use rockbound::{OptimisticTransactionDB, SchemaDBOperationsExt, TransactionRetry};

use super::schemas::{AckCountSchema, CheckpointSchema, ACK_COUNT_KEY};
use crate::DbOpsConfig;

pub struct RBCheckpointDB {
    db: Arc<OptimisticTransactionDB>,
    ops: DbOpsConfig,
}

impl RBCheckpointDB {
    /// Wraps an existing database handle.
    ///
    /// Assumes it was opened with column families as defined in `STORE_COLUMN_FAMILIES`.
    pub fn new(db: Arc<OptimisticTransactionDB>, ops: DbOpsConfig) -> Self {
        Self { db, ops }
    }
}

impl CheckpointDatabase for RBCheckpointDB {
    fn put_checkpoint(&self, height: u64, record: CheckpointRecord) -> DbResult<()> {
        self.db
            .with_optimistic_txn(TransactionRetry::Count(self.ops.retry_count), |txn| {
                if let Some(existing) = txn.get::<CheckpointSchema>(&height)? {
                    if existing != record {
                        return Err(DbError::OverwriteCheckpoint(height));
                    }
                    return Ok(());
                }
                txn.put::<CheckpointSchema>(&height, &record)?;
                Ok(())
            })
            .map_err(DbError::from)
    }

    fn get_checkpoint(&self, height: u64) -> DbResult<Option<CheckpointRecord>> {
        Ok(self.db.get::<CheckpointSchema>(&height)?)
    }

    fn get_last_checkpoint_height(&self) -> DbResult<Option<u64>> {
        Ok(rockbound::utils::get_last::<CheckpointSchema>(&*self.db)?.map(|(x, _)| x))
    }

    fn init_ack_count(&self) -> DbResult<()> {
        let key = ACK_COUNT_KEY.to_vec();
        self.db
            .with_optimistic_txn(TransactionRetry::Count(self.ops.retry_count), |txn| {
                if txn.get::<AckCountSchema>(&key)?.is_none() {
                    txn.put::<AckCountSchema>(&key, &0)?;
                }
                Ok::<(), DbError>(())
            })
            .map_err(DbError::from)
    }

    fn get_ack_count(&self) -> DbResult<u64> {
        let key = ACK_COUNT_KEY.to_vec();
        self.db
            .get::<AckCountSchema>(&key)?
            .ok_or(DbError::NotBootstrapped)
    }

    fn increment_ack_count(&self) -> DbResult<u64> {
        let key = ACK_COUNT_KEY.to_vec();
        self.db
            .with_optimistic_txn(TransactionRetry::Count(self.ops.retry_count), |txn| {
                let cur = txn
                    .get_for_update::<AckCountSchema>(&key)?
                    .ok_or(DbError::NotBootstrapped)?;
                let next = cur + 1;
                txn.put::<AckCountSchema>(&key, &next)?;
                Ok(next)
            })
            .map_err(DbError::from)
    }
}

#[cfg(feature = "test_utils")]
#[cfg(test)]
mod tests {
    use berth_test_utils::ArbitraryGenerator;

    use super::*;
    use crate::test_utils::get_rocksdb_tmp_instance;

    fn setup_db() -> RBCheckpointDB {
        let (db, db_ops) = get_rocksdb_tmp_instance().unwrap();
        RBCheckpointDB::new(db, db_ops)
    }

    #[test]
    fn test_checkpoint_new_entry() {
        let ckpt_db = setup_db();

        let record: CheckpointRecord = ArbitraryGenerator::new().generate();
        ckpt_db.put_checkpoint(1, record).unwrap();

        let retrieved = ckpt_db.get_checkpoint(1).unwrap().unwrap();
        assert_eq!(record, retrieved);
        assert_eq!(ckpt_db.get_checkpoint(2).unwrap(), None);
    }

    #[test]
    fn test_checkpoint_idempotent_reinsert() {
        let ckpt_db = setup_db();

        let record: CheckpointRecord = ArbitraryGenerator::new().generate();
        ckpt_db.put_checkpoint(1, record).unwrap();
        ckpt_db.put_checkpoint(1, record).unwrap();
    }

    #[test]
    fn test_checkpoint_conflicting_overwrite() {
        let ckpt_db = setup_db();

        let ag = ArbitraryGenerator::new();
        let record: CheckpointRecord = ag.generate();
        let other: CheckpointRecord = ag.generate();
        assert_ne!(record, other);

        ckpt_db.put_checkpoint(1, record).unwrap();
        let res = ckpt_db.put_checkpoint(1, other);
        assert!(matches!(res, Err(DbError::OverwriteCheckpoint(1))));

        // the stored record is untouched
        assert_eq!(ckpt_db.get_checkpoint(1).unwrap().unwrap(), record);
    }

    #[test]
    fn test_checkpoint_non_monotonic_entries() {
        let ckpt_db = setup_db();

        let record: CheckpointRecord = ArbitraryGenerator::new().generate();
        ckpt_db.put_checkpoint(100, record).unwrap();
        ckpt_db.put_checkpoint(1, record).unwrap();
        ckpt_db.put_checkpoint(3, record).unwrap();

        let last = ckpt_db.get_last_checkpoint_height().unwrap().unwrap();
        assert_eq!(last, 100);

        ckpt_db.put_checkpoint(50, record).unwrap();
        let last = ckpt_db.get_last_checkpoint_height().unwrap().unwrap();
        assert_eq!(last, 100);
    }

    #[test]
    fn test_ack_count_uninitialized() {
        let ckpt_db = setup_db();
        assert!(matches!(
            ckpt_db.get_ack_count(),
            Err(DbError::NotBootstrapped)
        ));
        assert!(matches!(
            ckpt_db.increment_ack_count(),
            Err(DbError::NotBootstrapped)
        ));
    }

    #[test]
    fn test_ack_count_init_and_increment() {
        let ckpt_db = setup_db();

        ckpt_db.init_ack_count().unwrap();
        assert_eq!(ckpt_db.get_ack_count().unwrap(), 0);

        assert_eq!(ckpt_db.increment_ack_count().unwrap(), 1);
        assert_eq!(ckpt_db.increment_ack_count().unwrap(), 2);
        assert_eq!(ckpt_db.get_ack_count().unwrap(), 2);

        // re-init never resets
        ckpt_db.init_ack_count().unwrap();
        assert_eq!(ckpt_db.get_ack_count().unwrap(), 2);
    }
}
