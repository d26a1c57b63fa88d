//! Composition root
//!
//! Owns the process-wide singletons (one modal coordinator, one SDK loader)
//! so they are created once, explicitly, and handed to whoever needs them.
//! Tests build a fresh context per case.

use crate::config::AppConfig;
use crate::modal::ModalCoordinator;
use crate::places::{PlaceSearchFlow, PlaceSearcher};
use crate::sdk::{HttpStatusProbe, SdkEnvironment, SdkLoader, StatusProbe};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Shared application services
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub modals: ModalCoordinator,
    pub map_sdk: SdkLoader,
}

impl AppContext {
    /// Build the context, diagnosing SDK failures over HTTP
    ///
    /// Environment overrides (`BOOKCLUB_MAP_APP_KEY`) are applied here.
    pub fn new(config: AppConfig, environment: Arc<dyn SdkEnvironment>) -> Result<Self> {
        let config = config.with_env_overrides();
        let probe = HttpStatusProbe::new(config.map_sdk.probe_timeout())
            .context("Failed to build HTTP client for map SDK diagnostics")?;
        Self::with_probe(config, environment, Arc::new(probe))
    }

    /// Build the context with a custom status probe
    ///
    /// `config` is used as given, without environment overrides.
    pub fn with_probe(
        config: AppConfig,
        environment: Arc<dyn SdkEnvironment>,
        probe: Arc<dyn StatusProbe>,
    ) -> Result<Self> {
        let script_url = config
            .map_sdk
            .script_url()
            .with_context(|| format!("Invalid map SDK endpoint: {:?}", config.map_sdk.endpoint))?;

        log::info!("context: map SDK endpoint {}", script_url.path());

        Ok(Self {
            map_sdk: SdkLoader::new(script_url, environment, probe),
            modals: ModalCoordinator::new(),
            config,
        })
    }

    /// A place picker wired to the shared loader and modal coordinator
    pub fn place_search(&self, searcher: Arc<dyn PlaceSearcher>) -> PlaceSearchFlow {
        PlaceSearchFlow::new(self.map_sdk.clone(), searcher, self.modals.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MapSdkConfig, APP_KEY_ENV};
    use crate::modal::ModalKind;
    use crate::places::{Place, PlaceSearchError, SearchPhase, SDK_FAILURE_TITLE};
    use crate::sdk::test_support::{FakeEnvironment, FixedProbe};
    use async_trait::async_trait;

    struct NoPlaces;

    #[async_trait]
    impl PlaceSearcher for NoPlaces {
        async fn keyword_search(&self, _keyword: &str) -> Result<Vec<Place>, PlaceSearchError> {
            Ok(Vec::new())
        }
    }

    fn config() -> AppConfig {
        AppConfig {
            map_sdk: MapSdkConfig {
                app_key: "test-key".to_string(),
                ..MapSdkConfig::default()
            },
        }
    }

    #[test]
    fn test_script_url_built_from_config() {
        let context = AppContext::with_probe(
            config(),
            Arc::new(FakeEnvironment::default()),
            Arc::new(FixedProbe::status(200)),
        )
        .unwrap();
        assert_eq!(
            context.map_sdk.script_url().query(),
            Some("appkey=test-key&libraries=services&autoload=false")
        );
        assert!(!context.modals.is_open());
    }

    // The only test that touches BOOKCLUB_MAP_APP_KEY
    #[test]
    fn test_new_applies_app_key_from_environment() {
        std::env::set_var(APP_KEY_ENV, "env-key");
        let context = AppContext::new(config(), Arc::new(FakeEnvironment::default()));
        std::env::remove_var(APP_KEY_ENV);

        let context = context.unwrap();
        assert_eq!(context.config.map_sdk.app_key, "env-key");
        assert_eq!(
            context.map_sdk.script_url().query(),
            Some("appkey=env-key&libraries=services&autoload=false")
        );
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let mut config = config();
        config.map_sdk.endpoint = "::not a url::".to_string();
        let result = AppContext::new(config, Arc::new(FakeEnvironment::default()));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_place_searches_share_loader_and_modals() {
        let environment = Arc::new(FakeEnvironment::failing(1));
        let context = AppContext::with_probe(
            config(),
            environment.clone(),
            Arc::new(FixedProbe::status(503)),
        )
        .unwrap();

        let mut first = context.place_search(Arc::new(NoPlaces));
        let mut second = context.place_search(Arc::new(NoPlaces));

        assert!(matches!(first.search("합정").await, SearchPhase::Failed { .. }));
        let state = context.modals.state();
        assert_eq!(state.kind, ModalKind::Error);
        assert_eq!(state.title, SDK_FAILURE_TITLE);

        context.modals.close();
        assert!(matches!(second.search("합정").await, SearchPhase::NoResults { .. }));
        assert_eq!(environment.injections(), 2);
        assert!(context.map_sdk.is_ready());
    }
}
