use std::sync::Arc;

use crate::models::Scope;
use crate::storage::StorageConfig;

/// Handles shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<StorageConfig>,

    /// Scope used when a request does not pass `?scope=`
    pub default_scope: Scope,

    /// Allowed CORS origin, `*` for any
    pub cors_origin: String,
}

impl AppState {
    pub fn new(storage: StorageConfig, default_scope: Scope, cors_origin: String) -> Self {
        Self {
            storage: Arc::new(storage),
            default_scope,
            cors_origin,
        }
    }
}
