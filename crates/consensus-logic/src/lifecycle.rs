//! Block lifecycle controller.
//!
//! Owns the checkpoint store handle, the root chain view and the relayer
//! queue for the duration of one block's processing. The worker drives it
//! strictly sequentially, so no internal locking is needed.

use std::sync::Arc;

use berth_primitives::{prelude::*, tx::encode_checkpoint};
use berth_relayer::{RelayerHandle, SubmissionPayload};
use berth_status::StatusChannel;
use berth_storage::CheckpointDbManager;
use tracing::*;

use crate::{
    errors::LifecycleError,
    policy::CheckpointMarkerPolicy,
    validation::validate_start_block,
    votes::{aggregate_signatures, vote_sign_bytes},
};

/// Source of validator set changes queued up by the staking collaborator.
///
/// Block-end passes these through to the replication runtime unmodified,
/// this core never computes them.
pub trait ValidatorSetView: Sync + Send + 'static {
    /// Drains the updates accumulated since the previous block.
    fn take_pending_updates(&self) -> Vec<ValidatorSetUpdate>;
}

/// View for deployments without a staking module.
#[derive(Debug, Clone, Default)]
pub struct NullValidatorSetView;

impl ValidatorSetView for NullValidatorSetView {
    fn take_pending_updates(&self) -> Vec<ValidatorSetUpdate> {
        Vec::new()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum LifecycleState {
    Idle,
    Initialized,
}

pub struct LifecycleController {
    ckman: Arc<CheckpointDbManager>,
    status: StatusChannel,
    relayer: RelayerHandle,
    marker_policy: Box<dyn CheckpointMarkerPolicy>,
    valset: Arc<dyn ValidatorSetView>,
    state: LifecycleState,
}

impl LifecycleController {
    pub fn new(
        ckman: Arc<CheckpointDbManager>,
        status: StatusChannel,
        relayer: RelayerHandle,
        marker_policy: Box<dyn CheckpointMarkerPolicy>,
        valset: Arc<dyn ValidatorSetView>,
    ) -> Self {
        Self {
            ckman,
            status,
            relayer,
            marker_policy,
            valset,
            state: LifecycleState::Idle,
        }
    }

    /// Chain-init hook. Bootstraps the ack counter, tolerating replays of an
    /// already-bootstrapped store, and arms the block hooks.
    pub fn on_chain_init(&mut self, params: &GenesisParams) -> Result<(), LifecycleError> {
        if self.state == LifecycleState::Initialized {
            return Err(LifecycleError::AlreadyInitialized);
        }

        self.ckman.init_ack_count_blocking()?;
        self.state = LifecycleState::Initialized;
        info!(chain_id = %params.chain_id(), "chain initialized");
        Ok(())
    }

    /// Block-begin hook. Reserved for validator set rotation, currently a
    /// no-op.
    pub fn on_block_begin(&self, _header: &BlockHeader) {}

    /// Block-end hook, the submission decision ladder.
    ///
    /// Missing record, empty votes and start-block mismatch are expected
    /// conditions: logged, submission skipped, resolved naturally on a later
    /// block. Encoding and store faults propagate as errors.
    pub fn on_block_end(
        &mut self,
        header: &BlockHeader,
        votes: &[Vote],
    ) -> Result<Vec<ValidatorSetUpdate>, LifecycleError> {
        if self.state != LifecycleState::Initialized {
            return Err(LifecycleError::NotInitialized);
        }

        if !self.marker_policy.is_checkpoint_block(header) {
            return Ok(Vec::new());
        }

        let height = header.height();
        let Some(record) = self.ckman.get_checkpoint_blocking(height)? else {
            warn!(%height, "checkpoint marker without a stored record, skipping");
            return Ok(Vec::new());
        };

        // The staking collaborator's updates ride along whenever a record is
        // present, whether or not we end up submitting.
        let updates = self.valset.take_pending_updates();

        let Some(sign_bytes) = vote_sign_bytes(votes) else {
            warn!(%height, "insufficient votes for checkpoint, skipping submission");
            return Ok(updates);
        };
        let agg_signature = aggregate_signatures(votes);

        let external = self.status.get_root_chain_status();
        if let Err(e) = validate_start_block(&record, &external) {
            warn!(%height, err = %e, "checkpoint failed validation, skipping submission");
            return Ok(updates);
        }

        let extra_data = encode_checkpoint(&record)?;
        let payload = SubmissionPayload::new(sign_bytes.to_vec(), agg_signature, extra_data);

        match self.relayer.submit(payload) {
            Ok(()) => {
                let acks = self.ckman.increment_ack_count_blocking()?;
                info!(%height, %acks, "checkpoint submission dispatched");
            }
            Err(e) => {
                // transient, the next confirmed range picks it up
                warn!(%height, err = %e, "could not queue checkpoint submission");
            }
        }

        Ok(updates)
    }
}
