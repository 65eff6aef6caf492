//! In-memory store used in tests and local tooling.

use std::collections::BTreeMap;

use berth_primitives::checkpoint::CheckpointRecord;
use parking_lot::Mutex;

use crate::{traits::CheckpointDatabase, DbError, DbResult};

#[derive(Debug, Default)]
pub struct StubCheckpointDb {
    checkpoints: Mutex<BTreeMap<u64, CheckpointRecord>>,
    ack_count: Mutex<Option<u64>>,
}

impl StubCheckpointDb {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CheckpointDatabase for StubCheckpointDb {
    fn put_checkpoint(&self, height: u64, record: CheckpointRecord) -> DbResult<()> {
        let mut checkpoints = self.checkpoints.lock();
        if let Some(existing) = checkpoints.get(&height) {
            if *existing != record {
                return Err(DbError::OverwriteCheckpoint(height));
            }
            return Ok(());
        }
        checkpoints.insert(height, record);
        Ok(())
    }

    fn get_checkpoint(&self, height: u64) -> DbResult<Option<CheckpointRecord>> {
        Ok(self.checkpoints.lock().get(&height).copied())
    }

    fn get_last_checkpoint_height(&self) -> DbResult<Option<u64>> {
        Ok(self.checkpoints.lock().keys().next_back().copied())
    }

    fn init_ack_count(&self) -> DbResult<()> {
        let mut ack = self.ack_count.lock();
        if ack.is_none() {
            *ack = Some(0);
        }
        Ok(())
    }

    fn get_ack_count(&self) -> DbResult<u64> {
        self.ack_count.lock().ok_or(DbError::NotBootstrapped)
    }

    fn increment_ack_count(&self) -> DbResult<u64> {
        let mut ack = self.ack_count.lock();
        let cur = ack.ok_or(DbError::NotBootstrapped)?;
        let next = cur + 1;
        *ack = Some(next);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use berth_test_utils::ArbitraryGenerator;

    use super::*;

    #[test]
    fn test_put_get_checkpoint() {
        let db = StubCheckpointDb::new();
        let record: CheckpointRecord = ArbitraryGenerator::new().generate();

        db.put_checkpoint(42, record).expect("test: insert");
        assert_eq!(db.get_checkpoint(42).expect("test: query"), Some(record));
        assert_eq!(db.get_checkpoint(43).expect("test: query"), None);
        assert_eq!(
            db.get_last_checkpoint_height().expect("test: query"),
            Some(42)
        );
    }

    #[test]
    fn test_put_checkpoint_idempotent_same_record() {
        let db = StubCheckpointDb::new();
        let record: CheckpointRecord = ArbitraryGenerator::new().generate();

        db.put_checkpoint(42, record).expect("test: insert");
        db.put_checkpoint(42, record).expect("test: reinsert");
    }

    #[test]
    fn test_put_checkpoint_rejects_conflicting_overwrite() {
        let db = StubCheckpointDb::new();
        let ag = ArbitraryGenerator::new();
        let record: CheckpointRecord = ag.generate();
        let other: CheckpointRecord = ag.generate();
        assert_ne!(record, other);

        db.put_checkpoint(42, record).expect("test: insert");
        let res = db.put_checkpoint(42, other);
        assert!(matches!(res, Err(DbError::OverwriteCheckpoint(42))));
    }

    #[test]
    fn test_ack_count_requires_bootstrap() {
        let db = StubCheckpointDb::new();
        assert!(matches!(db.get_ack_count(), Err(DbError::NotBootstrapped)));
        assert!(matches!(
            db.increment_ack_count(),
            Err(DbError::NotBootstrapped)
        ));
    }

    #[test]
    fn test_ack_count_init_is_write_once() {
        let db = StubCheckpointDb::new();

        db.init_ack_count().expect("test: init");
        assert_eq!(db.get_ack_count().expect("test: query"), 0);

        db.increment_ack_count().expect("test: incr");
        db.increment_ack_count().expect("test: incr");
        assert_eq!(db.get_ack_count().expect("test: query"), 2);

        // A repeated init must not reset an advanced counter.
        db.init_ack_count().expect("test: reinit");
        assert_eq!(db.get_ack_count().expect("test: query"), 2);
    }
}
