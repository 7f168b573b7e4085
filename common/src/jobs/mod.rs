use serde::{Deserialize, Serialize};

/// Stage of a running bulk import, as shown to the uploading client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportPhase {
    Validating,
    Uploading,
    Done,
    Error,
}

/// Advisory progress event for a bulk import job.
///
/// Events are emitted as the import advances and the latest one is kept per
/// job so clients can poll it. They are not part of the import result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportProgress {
    pub phase: ImportPhase,
    pub success_count: usize,
    pub total_rows: usize,
    pub message: Option<String>,
}

impl ImportProgress {
    pub fn validating() -> Self {
        Self {
            phase: ImportPhase::Validating,
            success_count: 0,
            total_rows: 0,
            message: None,
        }
    }

    pub fn uploading(success_count: usize, total_rows: usize) -> Self {
        Self {
            phase: ImportPhase::Uploading,
            success_count,
            total_rows,
            message: Some(format!("{success_count}/{total_rows} rows uploaded")),
        }
    }

    pub fn done(success_count: usize, total_rows: usize) -> Self {
        Self {
            phase: ImportPhase::Done,
            success_count,
            total_rows,
            message: Some(format!("{success_count} reservations imported")),
        }
    }

    pub fn error(success_count: usize, total_rows: usize, message: impl Into<String>) -> Self {
        Self {
            phase: ImportPhase::Error,
            success_count,
            total_rows,
            message: Some(message.into()),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, ImportPhase::Done | ImportPhase::Error)
    }
}
