//! Checkpoint data operation interface.

use berth_db::traits::*;
use berth_primitives::checkpoint::CheckpointRecord;

use crate::exec::*;

inst_ops_simple! {
    (<D: CheckpointDatabase> => CheckpointDataOps) {
        put_checkpoint(height: u64, record: CheckpointRecord) => ();
        get_checkpoint(height: u64) => Option<CheckpointRecord>;
        get_last_checkpoint_height() => Option<u64>;
        init_ack_count() => ();
        get_ack_count() => u64;
        increment_ack_count() => u64;
    }
}
