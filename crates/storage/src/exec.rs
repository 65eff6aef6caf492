//! DB operation executor logic.
//!
//! This manages the indirection to spawn async requests onto a threadpool and
//! execute blocking calls locally.

use berth_db::DbError;
use thiserror::Error;

/// Handle for receiving a result from a database operation.
pub type DbRecv<T> = tokio::sync::oneshot::Receiver<berth_db::DbResult<T>>;

#[derive(Debug, Clone, Error)]
pub enum OpsError {
    #[error("worker failed strangely")]
    WorkerFailedStrangely,
}

impl From<OpsError> for DbError {
    fn from(value: OpsError) -> Self {
        DbError::Other(value.to_string())
    }
}

/// Generates an `Ops` interface over a database trait, providing `_async`,
/// `_blocking`, and `_chan` variants of each listed method. The async variants
/// ship the call onto the thread pool, the blocking ones run it in place.
macro_rules! inst_ops_simple {
    {
        (< $tparam:ident: $tpconstr:tt > => $base:ident) {
            $($iname:ident($($aname:ident: $aty:ty),*) => $ret:ty;)*
        }
    } => {
        pub struct $base {
            pool: ::threadpool::ThreadPool,
            inner: ::std::sync::Arc<dyn ShimTrait>,
        }

        #[derive(Debug)]
        pub struct Context<$tparam: $tpconstr> {
            db: ::std::sync::Arc<$tparam>,
        }

        impl<$tparam: $tpconstr + Sync + Send + 'static> Context<$tparam> {
            pub fn new(db: ::std::sync::Arc<$tparam>) -> Self {
                Self { db }
            }

            pub fn into_ops(self, pool: ::threadpool::ThreadPool) -> $base {
                $base::new(pool, ::std::sync::Arc::new(self))
            }
        }

        ::paste::paste! {
            impl $base {
                pub fn new<$tparam: $tpconstr + Sync + Send + 'static>(
                    pool: ::threadpool::ThreadPool,
                    ctx: ::std::sync::Arc<Context<$tparam>>,
                ) -> Self {
                    Self {
                        pool,
                        inner: ctx,
                    }
                }

                $(
                    pub async fn [<$iname _async>](&self, $($aname: $aty),*) -> ::berth_db::DbResult<$ret> {
                        let resp_rx = self.inner.[<$iname _chan>](&self.pool, $($aname),*);
                        match resp_rx.await {
                            Ok(v) => v,
                            Err(_e) => Err(::berth_db::DbError::from($crate::exec::OpsError::WorkerFailedStrangely)),
                        }
                    }

                    pub fn [<$iname _blocking>](&self, $($aname: $aty),*) -> ::berth_db::DbResult<$ret> {
                        self.inner.[<$iname _blocking>]($($aname),*)
                    }

                    pub fn [<$iname _chan>](&self, $($aname: $aty),*) -> $crate::exec::DbRecv<$ret> {
                        self.inner.[<$iname _chan>](&self.pool, $($aname),*)
                    }
                )*
            }

            trait ShimTrait: Sync + Send + 'static {
                $(
                    fn [<$iname _blocking>](&self, $($aname: $aty),*) -> ::berth_db::DbResult<$ret>;
                    fn [<$iname _chan>](&self, pool: &::threadpool::ThreadPool, $($aname: $aty),*) -> $crate::exec::DbRecv<$ret>;
                )*
            }

            impl<$tparam: $tpconstr + Sync + Send + 'static> ShimTrait for Context<$tparam> {
                $(
                    fn [<$iname _blocking>](&self, $($aname: $aty),*) -> ::berth_db::DbResult<$ret> {
                        self.db.as_ref().$iname($($aname),*)
                    }

                    fn [<$iname _chan>](&self, pool: &::threadpool::ThreadPool, $($aname: $aty),*) -> $crate::exec::DbRecv<$ret> {
                        let (resp_tx, resp_rx) = ::tokio::sync::oneshot::channel();
                        let db = self.db.clone();

                        pool.execute(move || {
                            let res = db.as_ref().$iname($($aname),*);
                            if resp_tx.send(res).is_err() {
                                ::tracing::warn!("failed to send response");
                            }
                        });

                        resp_rx
                    }
                )*
            }
        }
    }
}

pub(crate) use inst_ops_simple;
