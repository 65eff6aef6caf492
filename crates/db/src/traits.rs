//! Interface traits the checkpoint store implementations provide.

use berth_primitives::checkpoint::CheckpointRecord;

use crate::DbResult;

/// Persistent store for checkpoint records and the submission ack counter.
///
/// Implementations must make writes durable before returning. Callers treat
/// any error from these methods other than the documented logical ones as a
/// storage fault.
pub trait CheckpointDatabase {
    /// Stores the checkpoint record proposed for a block height.
    ///
    /// Re-putting an identical record is a no-op. Putting a *different*
    /// record at an occupied height fails with
    /// [`DbError::OverwriteCheckpoint`](crate::DbError::OverwriteCheckpoint).
    fn put_checkpoint(&self, height: u64, record: CheckpointRecord) -> DbResult<()>;

    /// Fetches the checkpoint record stored at a height, if any.
    fn get_checkpoint(&self, height: u64) -> DbResult<Option<CheckpointRecord>>;

    /// Returns the greatest height with a stored checkpoint, if any.
    fn get_last_checkpoint_height(&self) -> DbResult<Option<u64>>;

    /// Initializes the ack counter to zero if it does not exist yet.
    ///
    /// Calling this again later is a no-op, an already-advanced counter is
    /// never reset.
    fn init_ack_count(&self) -> DbResult<()>;

    /// Reads the current ack counter.
    ///
    /// Fails with [`DbError::NotBootstrapped`](crate::DbError::NotBootstrapped)
    /// if [`init_ack_count`](Self::init_ack_count) has never run.
    fn get_ack_count(&self) -> DbResult<u64>;

    /// Bumps the ack counter by one, returning the new value.
    fn increment_ack_count(&self) -> DbResult<u64>;
}
