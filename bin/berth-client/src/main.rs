use std::{sync::Arc, time::Duration};

use berth_consensus_logic::{
    lifecycle::NullValidatorSetView, policy::SingleTxMarkerPolicy,
    worker::spawn_lifecycle_worker, LifecycleController,
};
use berth_primitives::{block::GenesisParams, status::RootChainStatus};
use berth_relayer::{spawn_relayer_task, NoopRelay};
use berth_rocksdb::{DbOpsConfig, RBCheckpointDB};
use berth_status::StatusChannel;
use berth_storage::CheckpointDbManager;
use berth_tasks::TaskManager;
use tracing::*;

use crate::{args::Args, helpers::*};

mod args;
mod config;
mod errors;
mod helpers;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();
    if let Err(e) = main_inner(args) {
        eprintln!("FATAL ERROR: {e}");
        return Err(e);
    }

    Ok(())
}

fn main_inner(args: Args) -> anyhow::Result<()> {
    // Start runtime for async IO tasks.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("berth-rt")
        .build()
        .expect("init: build rt");

    // Init the logging before we do anything else.
    init_logging(runtime.handle());

    let config = get_config(args)?;

    // Open and initialize the database.
    let rbdb = open_rocksdb_database(&config)?;
    let ops_config = DbOpsConfig::new(config.client.db_retry_count);
    let checkpoint_db = Arc::new(RBCheckpointDB::new(rbdb, ops_config));

    // Init thread pool for blocking db jobs.
    let pool = threadpool::ThreadPool::with_name("berth-pool".to_owned(), 8);

    let task_manager = TaskManager::new(runtime.handle().clone());
    let executor = task_manager.executor();

    let checkpoint_manager: Arc<_> = CheckpointDbManager::new(pool, checkpoint_db).into();

    // Root chain view, fed by a bridge monitor in full deployments.
    let status_channel = StatusChannel::new(RootChainStatus::default());

    let relayer_handle = spawn_relayer_task(&executor, Arc::new(NoopRelay));

    let controller = LifecycleController::new(
        checkpoint_manager,
        status_channel,
        relayer_handle,
        Box::new(SingleTxMarkerPolicy),
        Arc::new(NullValidatorSetView),
    );
    let lifecycle_handle = spawn_lifecycle_worker(&executor, controller);

    // Arm the block hooks. The ack counter bootstrap inside tolerates
    // replays on restart.
    let genesis = GenesisParams::new(config.client.chain_id.clone());
    runtime.block_on(lifecycle_handle.chain_init(genesis))?;

    info!("init finished, serving block events");

    task_manager.start_signal_listeners();

    if let Err(e) = task_manager.monitor(Some(SHUTDOWN_TIMEOUT)) {
        return Err(anyhow::anyhow!("critical task exited: {e}"));
    }

    info!("exiting");
    Ok(())
}
