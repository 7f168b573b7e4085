use super::parser;
use super::record::{build_record, RowRejection};
use super::ImportError;
use crate::store::{RecordStore, RESERVATIONS_TABLE};
use common::jobs::ImportProgress;
use common::model::import::ImportResult;
use common::model::reservation::ReservationRecord;
use log::{debug, error, info};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Rows per insert call.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Drives one CSV upload into the record store.
///
/// Batches are submitted one at a time; batch `k + 1` is only sent once
/// batch `k` has committed. The first rejected batch ends the import and
/// nothing already committed is rolled back.
pub struct BulkImporter {
    store: Arc<dyn RecordStore>,
    batch_size: usize,
}

impl BulkImporter {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Import `contents` uploaded as `file_name`.
    ///
    /// Progress events go to `progress`, ending with a `done` or `error`
    /// event. A closed receiver does not interrupt the import.
    pub async fn import_file(
        &self,
        file_name: &str,
        contents: &[u8],
        required_columns: &[&str],
        progress: &mpsc::Sender<ImportProgress>,
    ) -> Result<ImportResult, ImportError> {
        report(progress, ImportProgress::validating()).await;

        let outcome = self
            .run(file_name, contents, required_columns, progress)
            .await;

        let last = match &outcome {
            Ok(result) => {
                info!(
                    "Imported {} reservations from '{}'",
                    result.success_count, file_name
                );
                ImportProgress::done(result.success_count, result.total_rows)
            }
            Err(e) => {
                info!("Import of '{}' failed: {}", file_name, e);
                ImportProgress::error(e.persisted_rows(), e.total_rows(), e.to_string())
            }
        };
        report(progress, last).await;
        outcome
    }

    async fn run(
        &self,
        file_name: &str,
        contents: &[u8],
        required_columns: &[&str],
        progress: &mpsc::Sender<ImportProgress>,
    ) -> Result<ImportResult, ImportError> {
        parser::ensure_csv_file_name(file_name)?;
        let text = parser::decode(contents)?;
        let records = prepare_records(text, required_columns)?;
        self.upload(&records, progress).await
    }

    async fn upload(
        &self,
        records: &[ReservationRecord],
        progress: &mpsc::Sender<ImportProgress>,
    ) -> Result<ImportResult, ImportError> {
        let total_rows = records.len();
        let mut success_count = 0;
        report(progress, ImportProgress::uploading(0, total_rows)).await;

        for (index, batch) in records.chunks(self.batch_size).enumerate() {
            let offset = index * self.batch_size;
            if let Err(source) = self.store.insert_batch(RESERVATIONS_TABLE, batch).await {
                error!(
                    "Batch {} (rows {}..{}) rejected: {}",
                    index + 1,
                    offset,
                    offset + batch.len(),
                    source
                );
                return Err(ImportError::PartialFailure {
                    failed_at_row_offset: offset,
                    result: ImportResult::aborted(success_count, total_rows),
                    source,
                });
            }
            success_count += batch.len();
            report(progress, ImportProgress::uploading(success_count, total_rows)).await;
        }

        Ok(ImportResult::completed(total_rows))
    }
}

/// Parse and validate the whole file into reservations, without touching
/// the store.
///
/// Short rows and rows with a blank required field are skipped.
pub fn prepare_records(
    text: &str,
    required_columns: &[&str],
) -> Result<Vec<ReservationRecord>, ImportError> {
    let lines = parser::split_lines(text);

    let missing = parser::missing_columns(&lines.header, required_columns);
    if !missing.is_empty() {
        return Err(ImportError::Schema { missing });
    }

    let mut records = Vec::with_capacity(lines.rows.len());
    for (index, line) in lines.rows.iter().enumerate() {
        let Some(row) = parser::parse_row(&lines.header, line) else {
            debug!("Skipping data row {}: fewer values than columns", index + 1);
            continue;
        };
        match build_record(&row) {
            Ok(record) => records.push(record),
            Err(RowRejection::MissingField(column)) => {
                debug!("Skipping data row {}: '{}' is empty", index + 1, column);
            }
        }
    }

    if records.is_empty() {
        return Err(ImportError::EmptyResult);
    }
    Ok(records)
}

async fn report(progress: &mpsc::Sender<ImportProgress>, event: ImportProgress) {
    let _ = progress.send(event).await;
}
