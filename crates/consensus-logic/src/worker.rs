//! Lifecycle worker thread.
//!
//! A single worker drains the block event channel, which is what gives the
//! store its single-writer-per-block guarantee on this runtime. Store faults
//! make the worker bail so the task monitor halts the process.

use berth_tasks::{ShutdownGuard, TaskExecutor};
use tokio::sync::mpsc;
use tracing::*;

use crate::{
    errors::LifecycleError,
    lifecycle::LifecycleController,
    message::{BlockEvent, LifecycleHandle},
};

/// Depth of the block event channel. The runtime feeds blocks one at a time,
/// this only buffers bursts around init.
const BLOCK_EVENT_QUEUE_DEPTH: usize = 16;

pub fn spawn_lifecycle_worker(
    executor: &TaskExecutor,
    controller: LifecycleController,
) -> LifecycleHandle {
    let (event_tx, event_rx) = mpsc::channel(BLOCK_EVENT_QUEUE_DEPTH);
    executor.spawn_critical("lifecycle_worker", move |shutdown| {
        // a store fault is fatal, let the panic reach the monitor
        lifecycle_worker(shutdown, event_rx, controller).expect("lifecycle worker")
    });
    LifecycleHandle::new(event_tx)
}

pub fn lifecycle_worker(
    shutdown: ShutdownGuard,
    mut event_rx: mpsc::Receiver<BlockEvent>,
    mut controller: LifecycleController,
) -> anyhow::Result<()> {
    info!("starting lifecycle worker");

    while let Some(event) = event_rx.blocking_recv() {
        if shutdown.should_shutdown() {
            info!("lifecycle worker received shutdown signal");
            break;
        }

        match event {
            BlockEvent::ChainInit(params) => match controller.on_chain_init(&params) {
                Ok(()) => {}
                Err(LifecycleError::Db(e)) => {
                    return Err(anyhow::Error::from(e).context("bootstrapping ack counter"));
                }
                Err(e) => {
                    error!(err = %e, "chain init rejected");
                }
            },

            BlockEvent::BlockBegin(header) => {
                controller.on_block_begin(&header);
            }

            BlockEvent::BlockEnd {
                header,
                votes,
                resp,
            } => {
                let height = header.height();
                let res = controller.on_block_end(&header, &votes);

                let fatal = matches!(res, Err(LifecycleError::Db(_)));
                if let Err(e) = &res {
                    error!(%height, err = %e, "block end handling failed");
                }

                if let Some(resp) = resp {
                    if resp.send(res).is_err() {
                        warn!(%height, "block end caller went away");
                    }
                }

                if fatal {
                    anyhow::bail!("checkpoint store failure at height {height}");
                }
            }
        }
    }

    info!("lifecycle worker exiting");
    Ok(())
}
