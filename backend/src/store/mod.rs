//! Persistence behind the bulk import.
//!
//! The import pipeline only sees [`RecordStore`]. Two backings exist:
//! - [`sqlite::SqliteStore`]: the local embedded database.
//! - [`rest::RestStore`]: the hosted backend reached over its REST API.
//!
//! Which one the server uses is chosen at startup from `STORE_BACKEND`.

pub mod rest;
pub mod sqlite;

use async_trait::async_trait;
use common::model::reservation::ReservationRecord;
use thiserror::Error;

/// Table written by the reservation import.
pub const RESERVATIONS_TABLE: &str = "reservations";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The hosted backend answered with a non-2xx status.
    #[error("record store rejected the batch ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("storage task failed: {0}")]
    Task(String),
}

/// Write side of a record store.
///
/// One call inserts one batch; the batch either commits as a whole or the
/// call returns an error.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_batch(
        &self,
        table: &str,
        records: &[ReservationRecord],
    ) -> Result<(), StoreError>;
}
