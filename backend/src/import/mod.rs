//! Reservation bulk import.
//!
//! An uploaded CSV goes through four steps:
//! 1. `parser`: file-type check, header split, schema check, row split.
//! 2. `record`: each raw row is narrowed into a `ReservationRecord` or
//!    rejected; rejected rows are skipped.
//! 3. `pipeline`: valid records are written to the record store in batches,
//!    in file order, stopping at the first rejected batch.
//! 4. Progress events are pushed to the caller's channel along the way.

pub mod error;
pub mod parser;
pub mod pipeline;
pub mod record;

pub use error::ImportError;
pub use pipeline::{BulkImporter, DEFAULT_BATCH_SIZE};
