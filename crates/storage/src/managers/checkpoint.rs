use std::sync::Arc;

use berth_db::{traits::CheckpointDatabase, DbResult};
use berth_primitives::checkpoint::CheckpointRecord;
use threadpool::ThreadPool;

use crate::ops;

/// Checkpoint store frontend handed around the node.
///
/// Wraps the raw ops so callers never deal with the thread pool indirection
/// directly.
pub struct CheckpointDbManager {
    ops: ops::checkpoint::CheckpointDataOps,
}

impl CheckpointDbManager {
    pub fn new<D: CheckpointDatabase + Sync + Send + 'static>(pool: ThreadPool, db: Arc<D>) -> Self {
        let ops = ops::checkpoint::Context::new(db).into_ops(pool);
        Self { ops }
    }

    pub async fn put_checkpoint(&self, height: u64, record: CheckpointRecord) -> DbResult<()> {
        self.ops.put_checkpoint_async(height, record).await
    }

    pub fn put_checkpoint_blocking(&self, height: u64, record: CheckpointRecord) -> DbResult<()> {
        self.ops.put_checkpoint_blocking(height, record)
    }

    pub async fn get_checkpoint(&self, height: u64) -> DbResult<Option<CheckpointRecord>> {
        self.ops.get_checkpoint_async(height).await
    }

    pub fn get_checkpoint_blocking(&self, height: u64) -> DbResult<Option<CheckpointRecord>> {
        self.ops.get_checkpoint_blocking(height)
    }

    pub async fn get_last_checkpoint_height(&self) -> DbResult<Option<u64>> {
        self.ops.get_last_checkpoint_height_async().await
    }

    pub fn get_last_checkpoint_height_blocking(&self) -> DbResult<Option<u64>> {
        self.ops.get_last_checkpoint_height_blocking()
    }

    pub async fn init_ack_count(&self) -> DbResult<()> {
        self.ops.init_ack_count_async().await
    }

    pub fn init_ack_count_blocking(&self) -> DbResult<()> {
        self.ops.init_ack_count_blocking()
    }

    pub async fn get_ack_count(&self) -> DbResult<u64> {
        self.ops.get_ack_count_async().await
    }

    pub fn get_ack_count_blocking(&self) -> DbResult<u64> {
        self.ops.get_ack_count_blocking()
    }

    pub async fn increment_ack_count(&self) -> DbResult<u64> {
        self.ops.increment_ack_count_async().await
    }

    pub fn increment_ack_count_blocking(&self) -> DbResult<u64> {
        self.ops.increment_ack_count_blocking()
    }
}

#[cfg(test)]
mod tests {
    use berth_db::stubs::StubCheckpointDb;
    use berth_test_utils::ArbitraryGenerator;

    use super::*;

    fn setup_manager() -> CheckpointDbManager {
        let pool = ThreadPool::new(2);
        let db = Arc::new(StubCheckpointDb::new());
        CheckpointDbManager::new(pool, db)
    }

    #[tokio::test]
    async fn test_put_get_roundtrip_through_pool() {
        let mgr = setup_manager();
        let record: CheckpointRecord = ArbitraryGenerator::new().generate();

        mgr.put_checkpoint(10, record).await.expect("test: insert");
        let got = mgr.get_checkpoint(10).await.expect("test: query");
        assert_eq!(got, Some(record));

        let last = mgr
            .get_last_checkpoint_height()
            .await
            .expect("test: query");
        assert_eq!(last, Some(10));
    }

    #[tokio::test]
    async fn test_ack_count_lifecycle() {
        let mgr = setup_manager();

        mgr.init_ack_count().await.expect("test: init");
        assert_eq!(mgr.get_ack_count().await.expect("test: query"), 0);
        assert_eq!(mgr.increment_ack_count().await.expect("test: incr"), 1);

        // blocking variants see the same state
        assert_eq!(mgr.get_ack_count_blocking().expect("test: query"), 1);
    }
}
