// src/main.rs - HTTP server wiring for the availability search service
use actix_web::{
    middleware::{Compress, DefaultHeaders, Logger},
    web, App, HttpServer,
};
use actix_cors::Cors;
use anyhow::Context;
use sqlx::{
    migrate::MigrateDatabase, sqlite::SqliteConnectOptions, sqlite::SqlitePoolOptions, Sqlite,
    SqlitePool,
};
use std::sync::Arc;
use std::time::Duration;

// Module declarations
mod availability;
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod search_handlers;
mod store;

use config::{load_config, Config};
use handlers::{health_check, welcome};
use search_handlers::{get_hotel_details, search};
use store::{InventoryStore, SqlStore};

pub struct AppState {
    pub store: Arc<dyn InventoryStore>,
    pub config: Config,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (this calls load_env_file internally)
    let config = load_config()?;

    setup_logging(&config);
    config.print_startup_info();

    // Setup database
    setup_database(&config.database.url).await?;

    // Create database pool
    let pool = create_database_pool(&config.database).await?;

    // Run migrations
    db::run_migrations(&pool).await?;

    // Create app state
    let app_state = Arc::new(AppState {
        store: Arc::new(SqlStore::new(pool)),
        config: config.clone(),
    });

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    log::info!("Starting server at http://{}", bind_address);

    let workers = config.server.workers;
    let keep_alive = config.server.keep_alive;
    let client_timeout = config.server.client_timeout;

    let mut server = HttpServer::new(move || {
        let cors = setup_cors(&config.security.allowed_origins);
        let security_headers = setup_security_headers();

        App::new()
            .wrap(cors)
            .wrap(security_headers)
            .wrap(Logger::default())
            .wrap(Compress::default())
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().limit(config.security.max_request_size))
            .route("/", web::get().to(welcome))
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/api/v1")
                    .route("/search", web::post().to(search))
                    .route("/hotels/{hotel_id}", web::get().to(get_hotel_details)),
            )
    })
    .keep_alive(Duration::from_secs(keep_alive))
    .client_request_timeout(Duration::from_secs(client_timeout))
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind to {}", bind_address))?;

    if let Some(workers) = workers {
        server = server.workers(workers);
    }

    server.run().await?;

    Ok(())
}

fn setup_logging(config: &Config) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    );
    builder.init();
}

async fn setup_database(database_url: &str) -> anyhow::Result<()> {
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        log::info!("Creating database: {}", database_url);
        Sqlite::create_database(database_url).await?;
    }
    Ok(())
}

async fn create_database_pool(db_config: &config::DatabaseConfig) -> anyhow::Result<SqlitePool> {
    // SqliteConnectOptions takes a bare path, not a connection URL
    let path = db_config
        .url
        .strip_prefix("sqlite:")
        .unwrap_or(&db_config.url);
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(db_config.max_connections)
        .min_connections(db_config.min_connections)
        .acquire_timeout(Duration::from_secs(db_config.connect_timeout))
        .idle_timeout(Duration::from_secs(db_config.idle_timeout))
        .connect_with(options)
        .await?;
    Ok(pool)
}

pub fn setup_cors(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec!["Content-Type", "Accept"])
        .max_age(3600);

    for origin in allowed_origins {
        if origin == "*" {
            return Cors::permissive();
        }
        cors = cors.allowed_origin(origin);
    }

    cors
}

fn setup_security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "DENY"))
        .add(("Referrer-Policy", "strict-origin-when-cross-origin"))
}
