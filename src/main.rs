use crate::config::Config;
use crate::db::connection::{init_db, Database};
use crate::db::seed::seed_sample_listings;
use crate::photos::PhotoStore;
use crate::responses::error_to_response;
use crate::router::{handle, AppState};
use astra::Server;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod db;
mod domain;
mod errors;
mod geocoding;
mod photos;
mod responses;
mod router;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let db = Database::new(config.database_path.clone());

    if let Err(e) = init_db(&db, &config.schema_path) {
        error!("Database initialization failed: {e}");
        std::process::exit(1);
    }

    if std::env::args().any(|a| a == "--seed") {
        match seed_sample_listings(&db, chrono::Utc::now()) {
            Ok(n) => info!("Seeded {n} sample listings"),
            Err(e) => {
                error!("Seeding failed: {e}");
                std::process::exit(1);
            }
        }
    }

    let geocoder = match config.geocoder.build_geocoder() {
        Ok(g) => g,
        Err(e) => {
            error!("Geocoder setup failed: {e}");
            std::process::exit(1);
        }
    };

    let photos = match PhotoStore::new(config.upload_dir.clone(), config.max_upload_bytes) {
        Ok(p) => p,
        Err(e) => {
            error!("Upload directory unavailable: {e}");
            std::process::exit(1);
        }
    };

    let app = AppState {
        db,
        geocoder,
        photos,
    };

    let addr = config.bind_addr;
    info!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(config.max_workers);

    let result = server.serve(move |req: astra::Request, _info| {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        match handle(req, &app) {
            Ok(resp) => resp,
            Err(err) => {
                if err.status() >= 500 {
                    error!(%method, %path, "request failed: {err}");
                } else {
                    info!(%method, %path, status = err.status(), "{err}");
                }
                error_to_response(err)
            }
        }
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
    }

    info!("Server shut down cleanly.");
}
