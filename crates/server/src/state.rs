use std::sync::Arc;

use configs::VariablesConfig;
use service::variables::{InMemoryVariableStore, VariableStore};

/// Shared handler state: the one store instance plus request-handling knobs.
#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn VariableStore>,
    pub settings: VariablesConfig,
}

impl ServerState {
    pub fn new(store: Arc<dyn VariableStore>, settings: VariablesConfig) -> Self {
        Self { store, settings }
    }

    /// Fresh in-memory store configured from `settings`.
    pub fn in_memory(settings: VariablesConfig) -> Self {
        let store = InMemoryVariableStore::new(settings.default_scope.clone());
        Self::new(Arc::new(store), settings)
    }
}
