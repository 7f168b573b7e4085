//! Shared state of background import jobs.
//!
//! - `JobsState`: clonable handle holding the latest progress of every job
//!   and the fingerprints of files already imported. Injected into the Actix
//!   application state in `main.rs`.
//! - `JobUpdate`: message carrying a job's new progress to the updater.
//! - `start_job_updater`: long-running task that applies `JobUpdate`s.

use common::jobs::ImportProgress;
use log::debug;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{mpsc, RwLock};

/// Jobs kept before finished ones are evicted.
pub const DEFAULT_MAX_TRACKED_JOBS: usize = 1000;

#[derive(Clone)]
pub struct JobsState {
    /// Latest progress per job id. `register` adds and evicts entries;
    /// `start_job_updater` applies progress.
    pub jobs: Arc<RwLock<HashMap<String, ImportProgress>>>,

    /// MD5 of each successfully imported upload, mapped to the job that
    /// imported it.
    pub imported: Arc<RwLock<HashMap<String, String>>>,

    pub tx: mpsc::Sender<JobUpdate>,

    max_tracked_jobs: usize,
}

impl JobsState {
    pub fn new(tx: mpsc::Sender<JobUpdate>) -> Self {
        Self::with_job_limit(tx, DEFAULT_MAX_TRACKED_JOBS)
    }

    pub fn with_job_limit(tx: mpsc::Sender<JobUpdate>, max_tracked_jobs: usize) -> Self {
        Self {
            jobs: Arc::new(RwLock::new(HashMap::new())),
            imported: Arc::new(RwLock::new(HashMap::new())),
            tx,
            max_tracked_jobs: max_tracked_jobs.max(1),
        }
    }

    /// Register a new job in the `validating` phase.
    ///
    /// Once the limit is reached, finished jobs are evicted together with
    /// the fingerprints they recorded. Running jobs are never evicted.
    pub async fn register(&self, job_id: &str) {
        let mut jobs = self.jobs.write().await;
        if jobs.len() >= self.max_tracked_jobs {
            jobs.retain(|_, progress| !progress.is_finished());
            self.imported
                .write()
                .await
                .retain(|_, job| jobs.contains_key(job));
            debug!("Evicted finished import jobs, {} still tracked", jobs.len());
        }
        jobs.insert(job_id.to_string(), ImportProgress::validating());
    }

    pub async fn progress(&self, job_id: &str) -> Option<ImportProgress> {
        self.jobs.read().await.get(job_id).cloned()
    }
}

#[derive(Debug)]
pub struct JobUpdate {
    pub(crate) job_id: String,
    pub(crate) progress: ImportProgress,
}

/// Apply `JobUpdate`s to the shared map until every sender is dropped.
pub async fn start_job_updater(state: JobsState, mut rx: mpsc::Receiver<JobUpdate>) {
    while let Some(update) = rx.recv().await {
        let mut jobs = state.jobs.write().await;
        jobs.insert(update.job_id, update.progress);
    }
}
