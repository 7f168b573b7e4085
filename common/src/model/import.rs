use serde::{Deserialize, Serialize};

/// Final tally of one bulk import attempt.
///
/// `aborted` is set when the record store rejected a batch; in that case
/// `success_count` counts only the rows of batches committed before the
/// rejection, and those rows stay persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub success_count: usize,
    pub total_rows: usize,
    pub aborted: bool,
}

impl ImportResult {
    pub fn completed(total_rows: usize) -> Self {
        Self {
            success_count: total_rows,
            total_rows,
            aborted: false,
        }
    }

    pub fn aborted(success_count: usize, total_rows: usize) -> Self {
        Self {
            success_count,
            total_rows,
            aborted: true,
        }
    }
}
