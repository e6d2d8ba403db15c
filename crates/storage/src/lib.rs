//! Storage Layer
//!
//! Payload codec and SQLite-backed repository for device data points.

pub mod codec;
mod repository;

pub use codec::CodecError;
pub use repository::{DataPoint, DataPointRequest, Repository, RowDecode};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Encoding error: {0}")]
    Encoding(#[from] CodecError),
    #[error("Database error: {0}")]
    Persistence(#[from] sqlx::Error),
}
