use berth_primitives::checkpoint::CheckpointRecord;

use crate::{define_table_with_default_codec, define_table_without_codec, impl_borsh_value_codec};

define_table_with_default_codec!(
    /// A table to store height -> CheckpointRecord mapping
    (CheckpointSchema) u64 => CheckpointRecord
);

define_table_with_default_codec!(
    /// A single-row table holding the submission ack counter
    (AckCountSchema) Vec<u8> => u64
);

/// Key of the lone row in [`AckCountSchema`].
pub(crate) const ACK_COUNT_KEY: &[u8] = b"ack_count";
