use redis::{aio::MultiplexedConnection, Client};
use std::sync::{Arc, RwLock};

use super::{DependencyState, DependencyStatus};
use crate::config::RedisSettings;
use crate::error::AppError;

/// Handle to the cache store.
///
/// The connection attempt is issued exactly once, in the background. The
/// handle lives for the lifetime of the process and is never closed.
#[derive(Clone)]
pub struct CacheService {
    client: Client,
    connection: Arc<RwLock<Option<MultiplexedConnection>>>,
    status: DependencyStatus,
}

impl CacheService {
    pub fn new(settings: &RedisSettings) -> Result<Self, AppError> {
        let client = Client::open(settings.url.clone())?;
        Ok(Self {
            client,
            connection: Arc::new(RwLock::new(None)),
            status: DependencyStatus::new(),
        })
    }

    /// Issue the single connection attempt without blocking the caller.
    ///
    /// Failure is logged and swallowed; it does not stop the listener and
    /// there is no retry.
    pub fn connect_in_background(&self) {
        let client = self.client.clone();
        let connection = Arc::clone(&self.connection);
        let status = self.status.clone();
        status.set(DependencyState::Connecting);

        tokio::spawn(async move {
            match client.get_multiplexed_async_connection().await {
                Ok(conn) => {
                    tracing::info!("Connected to Redis");
                    *connection.write().unwrap_or_else(|e| e.into_inner()) = Some(conn);
                    status.set(DependencyState::Ready);
                }
                Err(e) => {
                    tracing::error!("Redis connection error: {}", e);
                    status.set(DependencyState::Failed);
                }
            }
        });
    }

    /// The established connection, once the background attempt has succeeded.
    pub fn connection(&self) -> Option<MultiplexedConnection> {
        self.connection
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn status(&self) -> DependencyStatus {
        self.status.clone()
    }
}
