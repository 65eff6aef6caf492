mod exec;
pub mod managers;
pub mod ops;

pub use managers::checkpoint::CheckpointDbManager;
pub use ops::checkpoint::CheckpointDataOps;
