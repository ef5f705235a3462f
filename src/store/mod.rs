//! Durable key-value storage for values that outlive a session
//!
//! Only the high score is stored today, under [`HIGH_SCORE_KEY`].

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use thiserror::Error;

/// Key the best score is kept under
pub const HIGH_SCORE_KEY: &str = "highScore";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access store file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store file {path:?} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A small persistent store of integer values
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError>;
    fn set(&mut self, key: &str, value: u32) -> Result<(), StoreError>;
}
