mod config;
mod import;
mod job_controller;
mod services;
mod store;

use crate::config::{Config, StoreBackend};
use crate::import::BulkImporter;
use crate::job_controller::state::JobsState;
use crate::store::rest::RestStore;
use crate::store::sqlite::SqliteStore;
use crate::store::{RecordStore, StoreError, RESERVATIONS_TABLE};
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{error, info};
use std::sync::Arc;
use tokio::sync::mpsc;

fn open_store(backend: &StoreBackend) -> Result<Arc<dyn RecordStore>, StoreError> {
    match backend {
        StoreBackend::Sqlite { path } => {
            let store = SqliteStore::open(path)?;
            info!(
                "Using embedded record store at {} ({} reservations)",
                path,
                store.count_rows(RESERVATIONS_TABLE)?
            );
            Ok(Arc::new(store))
        }
        StoreBackend::Rest { url, api_key } => {
            info!("Using hosted record store at {}", url);
            Ok(Arc::new(RestStore::new(url.as_str(), api_key.as_str())))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        std::io::Error::other(e)
    })?;
    let store = open_store(&config.store).map_err(|e| {
        error!("Cannot open record store: {}", e);
        std::io::Error::other(e)
    })?;
    let importer = web::Data::new(BulkImporter::new(store).with_batch_size(config.batch_size));

    // Initialize job controller state
    let (tx, rx) = mpsc::channel(100);
    let jobs_state = JobsState::new(tx);

    // Start job updater task
    let updater_state = jobs_state.clone();
    tokio::spawn(async move {
        job_controller::state::start_job_updater(updater_state, rx).await;
    });

    info!(
        "Server running at http://{}:{} (batch size {})",
        config.host,
        config.port,
        importer.batch_size()
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(jobs_state.clone()))
            .app_data(importer.clone())
            .service(services::reservations::configure_routes())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
