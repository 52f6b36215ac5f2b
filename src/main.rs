use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use edge_taskflow::{
    ai::TextGenerator,
    config::{Config, StorageBackend},
    cors, routes,
    state::AppState,
    store::{MemoryStore, PgStore},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        log::error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let ai = TextGenerator::from_config(config.ai.as_ref());
    if !ai.is_available() {
        log::warn!("AI_RUN_URL is not set; tags default to \"General\" and descriptions are empty");
    }

    let state = match &config.storage {
        StorageBackend::Postgres { database_url } => {
            let store = PgStore::connect(database_url).await.map_err(|e| {
                log::error!("{}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
            })?;
            AppState::new(Arc::new(store), ai)
        }
        StorageBackend::Memory => {
            log::warn!("Using in-memory storage; all data is lost on restart");
            AppState::new(Arc::new(MemoryStore::new()), ai)
        }
    }
    .with_session_ttl(config.session_ttl_secs);
    let state = web::Data::new(state);

    log::info!("Starting server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors::Preflight)
            .wrap(Logger::default())
            .wrap(cors::headers())
            .configure(routes::config)
            .default_service(web::to(routes::not_found))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
