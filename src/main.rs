use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use fitswap::config::Settings;
use fitswap::error::{handle_json_payload_error, handle_path_error, handle_query_payload_error};
use fitswap::routes::{self, AppState};
use fitswap::services::{self, CacheManager, Repository};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }

    info!("Starting FitSwap service...");
    info!("Using {:?} document store", settings.store.backend);

    let store = services::build_store(&settings.store).await.map_err(|e| {
        error!("Failed to initialize document store: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    // Initialize cache manager; Redis is optional
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);

    let cache = match &settings.cache.redis_url {
        Some(url) => match CacheManager::new(url, l1_cache_size, cache_ttl).await {
            Ok(c) => {
                info!("Cache manager initialized with Redis (L1: {} entries, TTL: {}s)", l1_cache_size, cache_ttl);
                c
            }
            Err(e) => {
                warn!("Failed to connect to Redis ({}), falling back to in-process cache", e);
                CacheManager::in_memory(l1_cache_size, cache_ttl)
            }
        },
        None => {
            info!("Cache manager initialized (L1: {} entries, TTL: {}s)", l1_cache_size, cache_ttl);
            CacheManager::in_memory(l1_cache_size, cache_ttl)
        }
    };

    let app_state = AppState::new(Repository::new(store), Arc::new(cache));

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
