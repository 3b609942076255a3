//! Health surface backing the `/health` endpoint.
//!
//! A process that is up but cannot load its configuration or account state
//! cannot decide anything, so reachability of both is part of `ok`.

use crate::store::StateStore;

/// Engine version reported by `/health`.
pub const ENGINE_VERSION: &str = "0.2.0";

/// Health response for the `/health` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    /// True when the process is up and both documents are loadable.
    pub ok: bool,
    /// Engine version (e.g., "0.2.0").
    pub engine_version: String,
    /// Configuration loaded and validated.
    pub config_ok: bool,
    /// Account state loaded (or seeded) successfully.
    pub state_ok: bool,
}

/// Probe the store and report engine health.
///
/// Both loads run through the same `StateStore` path a decision would use, so
/// a broken config.json or unwritable state file surfaces here before the
/// first intent arrives.
pub fn check_health<S: StateStore>(store: &S) -> HealthResponse {
    let config_ok = store.load_config().is_ok();
    let state_ok = store.load_state().is_ok();
    HealthResponse {
        ok: config_ok && state_ok,
        engine_version: ENGINE_VERSION.to_string(),
        config_ok,
        state_ok,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonFileStore, MemoryStore};
    use warden_core::config::EngineConfig;
    use warden_core::types::AccountState;

    #[test]
    fn test_reachable_store_is_healthy() {
        let store = MemoryStore::new(
            EngineConfig::sane_defaults(),
            AccountState::default_state(1_000),
        );
        let resp = check_health(&store);
        assert!(resp.ok);
        assert!(resp.config_ok);
        assert!(resp.state_ok);
        assert_eq!(resp.engine_version, ENGINE_VERSION);
    }

    #[test]
    fn test_unreachable_files_are_unhealthy() {
        let store = JsonFileStore::new(
            "/nonexistent/warden/config.json",
            "/nonexistent/warden/state.json",
        );
        let resp = check_health(&store);
        assert!(!resp.ok);
        assert!(!resp.config_ok);
        assert!(!resp.state_ok);
    }
}
