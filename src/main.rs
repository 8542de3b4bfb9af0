use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use dotenvy::dotenv;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod repository;
mod routes;
mod utils;

use config::Config;
use db::init_db;
use repository::{PostgresUserStatusRepository, UserStatusRepository};

use crate::docs::ApiDoc;
use tracing::{error, info};
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env().map_err(|e| {
        eprintln!("Invalid configuration: {e:#}");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "user_status.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    info!(server_addr = %config.server_addr, "Server starting...");

    let pool = init_db(&config).await.map_err(|e| {
        error!(error = %e, "Failed to initialise database");
        std::io::Error::other(e)
    })?;

    let repo: Arc<dyn UserStatusRepository> = Arc::new(PostgresUserStatusRepository::new(pool));
    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::from(repo.clone()))
            .configure(|cfg| routes::configure(cfg, &config))
    })
    .bind(server_addr)?
    .run()
    .await
}
