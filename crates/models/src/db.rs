use std::time::Duration;

use configs::DatabaseConfig;
use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Database,
};
use tracing::info;

use crate::errors::ModelError;

pub const APP_NAME: &str = "bike-club";

/// Build the shared client. The driver connects lazily; call [`ping`] to verify reachability.
pub async fn connect(cfg: &DatabaseConfig) -> Result<Client, ModelError> {
    let mut options = ClientOptions::parse(cfg.connection_uri()).await?;
    options.app_name = Some(APP_NAME.to_string());
    options.connect_timeout = Some(Duration::from_secs(cfg.connect_timeout_secs));
    options.server_selection_timeout = Some(Duration::from_secs(cfg.server_selection_timeout_secs));
    // Stable API v1, strict
    options.server_api = Some(
        ServerApi::builder()
            .version(ServerApiVersion::V1)
            .strict(true)
            .deprecation_errors(true)
            .build(),
    );
    let client = Client::with_options(options)?;
    info!(db_host = %cfg.host, db_name = %cfg.name, "mongodb client created");
    Ok(client)
}

pub async fn ping(client: &Client) -> Result<(), ModelError> {
    client.database("admin").run_command(doc! { "ping": 1 }, None).await?;
    Ok(())
}

pub fn database(client: &Client, cfg: &DatabaseConfig) -> Database {
    client.database(&cfg.name)
}
