//! HTTP endpoints for bulk-importing reservation inquiries from CSV.
//!
//! - `POST /api/reservations/import/upload`: multipart form with a `file`
//!   part. The whole file is read into memory and handed to a background
//!   import job; the response carries its `job_id`.
//! - `GET /api/reservations/import/status/{job_id}`: latest
//!   `ImportProgress` of a job (`validating`, `uploading`, `done` or
//!   `error`), `404` for unknown ids.
//! - `GET /api/reservations/import/template`: downloadable CSV template with
//!   the expected header and two sample rows.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod get_status;
mod template;
mod upload;

const API_PATH: &str = "/api/reservations/import";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/upload", post().to(upload::process))
        .route("/status/{job_id}", get().to(get_status::process))
        .route("/template", get().to(template::process))
}
