pub mod permutation;
pub mod storage;

pub use permutation::RandomPermutation;
pub use storage::{load_exchange, load_snapshot, save_exchange, save_snapshot, StorageError};
