use std::time::Duration;

use mongodb::{bson::doc, options::ClientOptions, Client, Database};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

use crate::config::MongoConfig;
use crate::error::StoreError;

const APP_NAME: &str = "calorie-tracker";
/// Connection attempts are serialized, so each failed one must give up quickly.
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Owns the single MongoDB client of the process.
///
/// The client is created on first use and kept until [`ConnectionManager::shutdown`].
/// Check-and-connect happens under one lock, so concurrent callers never open
/// more than one client.
pub struct ConnectionManager {
    uri: String,
    database: String,
    client: Mutex<Option<Client>>,
}

impl ConnectionManager {
    pub fn new(config: &MongoConfig) -> Self {
        Self {
            uri: config.uri.clone(),
            database: config.database.clone(),
            client: Mutex::new(None),
        }
    }

    /// Returns the live client, connecting first if none is held.
    #[instrument(skip(self), fields(database = %self.database))]
    pub async fn ensure_connected(&self) -> Result<Client, StoreError> {
        let mut guard = self.client.lock().await;
        if let Some(client) = guard.as_ref() {
            return Ok(client.clone());
        }

        debug!("no active client, connecting to MongoDB");
        let client = self.connect().await.map_err(|e| {
            error!(error = %e, "error connecting to MongoDB");
            StoreError::Connection(e.to_string())
        })?;
        info!("connected to MongoDB");
        *guard = Some(client.clone());
        Ok(client)
    }

    pub async fn database(&self) -> Result<Database, StoreError> {
        let client = self.ensure_connected().await?;
        Ok(client.database(&self.database))
    }

    #[cfg(test)]
    pub async fn is_connected(&self) -> bool {
        self.client.lock().await.is_some()
    }

    /// Closes the held client. Safe to call when nothing is connected.
    pub async fn shutdown(&self) {
        let Some(client) = self.client.lock().await.take() else {
            debug!("MongoDB shutdown requested with no active client");
            return;
        };
        client.shutdown().await;
        info!("MongoDB connection closed");
    }

    async fn client_options(&self) -> mongodb::error::Result<ClientOptions> {
        let mut options = ClientOptions::parse(&self.uri).await?;
        options.app_name = Some(APP_NAME.to_string());
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
        options.connect_timeout = Some(CONNECT_TIMEOUT);
        Ok(options)
    }

    async fn connect(&self) -> mongodb::error::Result<Client> {
        let client = Client::with_options(self.client_options().await?)?;

        // the driver connects lazily; ping so an unreachable server fails here
        client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(client)
    }
}
