//! Application state for the roster API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::roster::Roster;
use crate::store::DocumentStore;

/// Shared application state.
///
/// Holds the loaded configuration and the roster operations over the
/// shared document store.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    roster: Roster,
}

impl AppState {
    /// Creates a new application state over `store`.
    pub fn new(config: ConfigLoader, store: Arc<dyn DocumentStore>) -> Self {
        let config = Arc::new(config);
        Self {
            roster: Roster::new(store, Arc::clone(&config)),
            config,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the roster operations.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_roster_shares_config() {
        let state = AppState::new(ConfigLoader::default(), Arc::new(MemoryStore::new()));
        assert_eq!(
            state.roster().config().coverage_window(),
            state.config().coverage_window()
        );
    }
}
