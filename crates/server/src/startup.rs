use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, ServerConfig};
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::routes::{self, auth};
use service::auth::TokenService;
use service::booking::{BookingRepository, MongoBookingRepository};
use service::catalog::{CatalogRepository, MongoCatalogRepository};
use service::unavailable::UnavailableStore;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// One client for the whole process; the driver pools connections internally.
/// Neither a client build failure (bad URI, SRV lookup) nor a failed ping stops the
/// server: it keeps answering and store calls fail until the database is reachable.
async fn build_stores(cfg: &AppConfig) -> (Arc<dyn CatalogRepository>, Arc<dyn BookingRepository>) {
    let client = match models::db::connect(&cfg.database).await {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "mongodb client could not be built; serving without a database");
            let store = Arc::new(UnavailableStore::new(e.to_string()));
            let catalog: Arc<dyn CatalogRepository> = store.clone();
            return (catalog, store);
        }
    };
    match models::db::ping(&client).await {
        Ok(()) => info!(db_name = %cfg.database.name, "pinged deployment; connected to MongoDB"),
        Err(e) => warn!(error = %e, "mongodb ping failed"),
    }
    let db = models::db::database(&client, &cfg.database);
    let catalog: Arc<dyn CatalogRepository> = Arc::new(MongoCatalogRepository::new(&db));
    let bookings: Arc<dyn BookingRepository> = Arc::new(MongoBookingRepository::new(&db));
    (catalog, bookings)
}

/// Public entry: load config, then build and serve the app
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();
    let cfg = AppConfig::load_and_validate()?;
    run_with_config(cfg).await
}

pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    if !cfg.auth.has_secret() {
        warn!("ACCESS_TOKEN_SECRET not set; signing tokens with the development secret");
    }
    if !cfg.auth.protect_booking_mutations {
        warn!("PATCH/DELETE /booking/:id accept unauthenticated requests; set PROTECT_BOOKING_MUTATIONS=true to require a bearer token");
    }

    let (catalog, bookings) = build_stores(&cfg).await;
    let state = auth::ServerState::new(
        TokenService::new(&cfg.auth.secret_or_dev(), cfg.auth.token_ttl_hours),
        catalog,
        bookings,
        auth::ServerAuthConfig { protect_booking_mutations: cfg.auth.protect_booking_mutations },
    );

    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "server is running");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_combines_host_and_port() {
        let s = ServerConfig { host: "127.0.0.1".into(), port: 5000, worker_threads: None };
        assert_eq!(bind_addr(&s).unwrap(), "127.0.0.1:5000".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn bind_addr_rejects_hostnames() {
        let s = ServerConfig { host: "not a host".into(), port: 5000, worker_threads: None };
        assert!(bind_addr(&s).is_err());
    }

    #[tokio::test]
    async fn unusable_connection_string_still_yields_stores() {
        let mut cfg = AppConfig::default();
        cfg.database.uri = "postgres://localhost/db".into();
        let (catalog, bookings) = build_stores(&cfg).await;
        assert!(catalog.list().await.is_err());
        assert!(bookings.find(None).await.is_err());
    }
}
