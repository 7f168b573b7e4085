use crate::import::BulkImporter;
use crate::job_controller::state::{JobUpdate, JobsState};
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use common::jobs::ImportProgress;
use common::model::csv::REQUIRED_COLUMNS;
use futures_util::StreamExt;
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Largest upload read into memory.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// An uploaded file, read whole.
pub struct Upload {
    pub file_name: String,
    pub contents: Vec<u8>,
}

/// HTTP handler for `POST /upload`.
///
/// - On success: `200 OK` with `{"job_id": ...}`; poll `/status/{job_id}`.
/// - When no usable `file` part was sent: `400 Bad Request`.
pub(crate) async fn process(
    payload: Multipart,
    jobs: web::Data<JobsState>,
    importer: web::Data<BulkImporter>,
) -> impl Responder {
    match read_upload(payload).await {
        Ok(upload) => {
            let job_id =
                schedule_import_job(jobs.get_ref().clone(), importer.into_inner(), upload).await;
            HttpResponse::Ok().json(serde_json::json!({ "job_id": job_id }))
        }
        Err(e) => HttpResponse::BadRequest().body(format!("Error: {}", e)),
    }
}

/// Read the `file` part of the form. Other parts are ignored.
async fn read_upload(mut payload: Multipart) -> Result<Upload, String> {
    let mut upload: Option<Upload> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| e.to_string())?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        if name.as_deref() != Some("file") {
            continue;
        }

        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();

        let mut contents = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| e.to_string())?;
            if contents.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(format!(
                    "file exceeds the {} MiB upload limit",
                    MAX_UPLOAD_BYTES / (1024 * 1024)
                ));
            }
            contents.extend_from_slice(&chunk);
        }
        upload = Some(Upload {
            file_name,
            contents,
        });
    }

    upload.ok_or_else(|| "Missing file".to_string())
}

/// Register an import job and run it in the background.
///
/// The importer's progress events are forwarded to the central job updater
/// under the returned job id.
pub async fn schedule_import_job(
    state: JobsState,
    importer: Arc<BulkImporter>,
    upload: Upload,
) -> String {
    let job_id = Uuid::new_v4().to_string();
    state.register(&job_id).await;

    let fingerprint = format!("{:x}", md5::compute(&upload.contents));
    if let Some(previous) = state.imported.read().await.get(&fingerprint) {
        warn!(
            "'{}' matches the upload already imported by job {}; its rows will be stored again",
            upload.file_name, previous
        );
    }

    let job = job_id.clone();
    tokio::spawn(async move {
        let (progress_tx, mut progress_rx) = mpsc::channel::<ImportProgress>(100);

        let updater_tx = state.tx.clone();
        let job_for_updater = job.clone();
        let forwarder = tokio::spawn(async move {
            while let Some(progress) = progress_rx.recv().await {
                let update = JobUpdate {
                    job_id: job_for_updater.clone(),
                    progress,
                };
                if updater_tx.send(update).await.is_err() {
                    break;
                }
            }
        });

        let outcome = importer
            .import_file(
                &upload.file_name,
                &upload.contents,
                &REQUIRED_COLUMNS,
                &progress_tx,
            )
            .await;
        drop(progress_tx);
        let _ = forwarder.await;

        match outcome {
            Ok(result) => {
                info!(
                    "Import job {} stored {}/{} rows",
                    job, result.success_count, result.total_rows
                );
                state.imported.write().await.insert(fingerprint, job);
            }
            Err(e) => warn!("Import job {} ended with an error: {}", job, e),
        }
    });

    job_id
}
