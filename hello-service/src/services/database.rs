use mongodb::{bson::doc, Client};

use super::{DependencyState, DependencyStatus};
use crate::config::MongoSettings;
use crate::error::AppError;

/// Handle to the document store.
///
/// Construction only parses the URI; reachability is probed by a single
/// background ping. The handle is never closed.
#[derive(Clone)]
pub struct DocumentDb {
    client: Client,
    status: DependencyStatus,
}

impl DocumentDb {
    pub async fn new(settings: &MongoSettings) -> Result<Self, AppError> {
        // The URI carries credentials, so log the endpoint only.
        tracing::info!(host = %settings.host, port = settings.port, "Configuring MongoDB client");
        let client = Client::with_uri_str(settings.uri()).await?;
        Ok(Self {
            client,
            status: DependencyStatus::new(),
        })
    }

    /// Probe the store once without blocking the caller.
    ///
    /// Failure is logged and swallowed; the listener starts regardless.
    pub fn connect_in_background(&self) {
        let db = self.clone();
        self.status.set(DependencyState::Connecting);

        tokio::spawn(async move {
            match db.ping().await {
                Ok(()) => {
                    tracing::info!("Connected to MongoDB");
                    db.status.set(DependencyState::Ready);
                }
                Err(e) => {
                    tracing::error!("MongoDB connection error: {}", e);
                    db.status.set(DependencyState::Failed);
                }
            }
        });
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(())
    }

    pub fn status(&self) -> DependencyStatus {
        self.status.clone()
    }
}
