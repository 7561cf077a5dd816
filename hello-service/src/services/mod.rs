mod cache;
mod database;

pub use cache::CacheService;
pub use database::DocumentDb;

use std::sync::{Arc, RwLock};

/// Connection lifecycle of an external dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyState {
    Unconnected,
    Connecting,
    Ready,
    Failed,
}

impl DependencyState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyState::Unconnected => "unconnected",
            DependencyState::Connecting => "connecting",
            DependencyState::Ready => "ready",
            DependencyState::Failed => "failed",
        }
    }
}

/// Shared, process-wide view of one dependency's connection state.
#[derive(Clone)]
pub struct DependencyStatus(Arc<RwLock<DependencyState>>);

impl DependencyStatus {
    pub fn new() -> Self {
        Self(Arc::new(RwLock::new(DependencyState::Unconnected)))
    }

    pub fn set(&self, state: DependencyState) {
        *self.0.write().unwrap_or_else(|e| e.into_inner()) = state;
    }

    pub fn get(&self) -> DependencyState {
        *self.0.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_ready(&self) -> bool {
        self.get() == DependencyState::Ready
    }
}

impl Default for DependencyStatus {
    fn default() -> Self {
        Self::new()
    }
}
