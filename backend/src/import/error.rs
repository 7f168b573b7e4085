use crate::store::StoreError;
use common::model::import::ImportResult;
use thiserror::Error;

/// Terminal outcomes of an import attempt other than full success.
///
/// None of them is retried. All but `PartialFailure` leave the store
/// untouched.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The upload is not a UTF-8 CSV file.
    #[error("Only CSV files can be imported: {0}")]
    Format(String),

    /// The header lacks required columns.
    #[error("Missing required headers: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// Every data row was skipped.
    #[error("The file contains no valid reservation rows")]
    EmptyResult,

    /// The store rejected a batch. Batches committed before it stay
    /// committed; `result.success_count` counts their rows.
    #[error(
        "Import stopped at row {failed_at_row_offset} after {} of {} rows: {source}",
        .result.success_count,
        .result.total_rows
    )]
    PartialFailure {
        failed_at_row_offset: usize,
        result: ImportResult,
        #[source]
        source: StoreError,
    },
}

impl ImportError {
    /// Rows persisted before the import stopped.
    pub fn persisted_rows(&self) -> usize {
        match self {
            ImportError::PartialFailure { result, .. } => result.success_count,
            _ => 0,
        }
    }

    /// Valid rows found in the file, when the import got that far.
    pub fn total_rows(&self) -> usize {
        match self {
            ImportError::PartialFailure { result, .. } => result.total_rows,
            _ => 0,
        }
    }
}
