//! Meeting place search
//!
//! Drives the "find a place" step of meeting creation: load the map SDK,
//! run a keyword search through it and let the user pick a result. Failures
//! are reported through the shared [`ModalCoordinator`].
//!
//! ```text
//!  Idle ──search()──► LoadingSdk ──► Searching ──► Results / NoResults
//!                          │              │
//!                          └──────────────┴──────► Failed (+ error modal)
//! ```

use crate::modal::ModalCoordinator;
use crate::sdk::{SdkLoad, SdkLoader};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

pub const EMPTY_KEYWORD_TITLE: &str = "검색어를 입력해주세요";
pub const SDK_FAILURE_TITLE: &str = "지도를 불러오지 못했습니다";
pub const SEARCH_FAILURE_TITLE: &str = "장소 검색에 실패했습니다";

/// A search result
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub id: String,
    pub name: String,
    /// Lot-number address
    pub address: String,
    pub road_address: Option<String>,
    pub phone: Option<String>,
    /// Place detail page
    pub url: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
}

/// Errors reported by a [`PlaceSearcher`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaceSearchError {
    /// The SDK's search service answered with an error status
    #[error("장소 검색 중 오류가 발생했습니다. ({0})")]
    Service(String),
}

/// Keyword search through the loaded SDK
///
/// An empty result set is `Ok(vec![])`, not an error.
#[async_trait]
pub trait PlaceSearcher: Send + Sync {
    async fn keyword_search(&self, keyword: &str) -> Result<Vec<Place>, PlaceSearchError>;
}

/// Where the search flow currently is
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    LoadingSdk,
    Searching { keyword: String },
    Results(Vec<Place>),
    NoResults { keyword: String },
    Failed { message: String },
}

/// Search state for one place picker
pub struct PlaceSearchFlow {
    loader: SdkLoader,
    searcher: Arc<dyn PlaceSearcher>,
    modals: ModalCoordinator,
    phase: SearchPhase,
    selected: Option<Place>,
}

impl PlaceSearchFlow {
    pub fn new(loader: SdkLoader, searcher: Arc<dyn PlaceSearcher>, modals: ModalCoordinator) -> Self {
        Self {
            loader,
            searcher,
            modals,
            phase: SearchPhase::Idle,
            selected: None,
        }
    }

    /// Start loading the SDK ahead of the first search (e.g. when the picker opens)
    ///
    /// The load keeps going if the returned handle is dropped.
    pub fn prepare(&self) -> SdkLoad {
        self.loader.load()
    }

    /// Search for `keyword`
    ///
    /// A blank keyword raises an alert and leaves the phase untouched.
    pub async fn search(&mut self, keyword: &str) -> &SearchPhase {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            self.modals.open_alert(EMPTY_KEYWORD_TITLE, "", None);
            return &self.phase;
        }

        self.selected = None;

        if !self.loader.is_ready() {
            self.phase = SearchPhase::LoadingSdk;
            let loaded = self.loader.load().await;
            if let Err(e) = loaded {
                return self.fail(SDK_FAILURE_TITLE, e.to_string());
            }
        }

        self.phase = SearchPhase::Searching {
            keyword: keyword.to_string(),
        };
        log::debug!("places: searching for {:?}", keyword);

        let outcome = self.searcher.keyword_search(keyword).await;
        match outcome {
            Ok(places) if places.is_empty() => {
                self.phase = SearchPhase::NoResults {
                    keyword: keyword.to_string(),
                };
            }
            Ok(places) => {
                log::debug!("places: {} results for {:?}", places.len(), keyword);
                self.phase = SearchPhase::Results(places);
            }
            Err(e) => return self.fail(SEARCH_FAILURE_TITLE, e.to_string()),
        }

        &self.phase
    }

    fn fail(&mut self, title: &str, message: String) -> &SearchPhase {
        log::warn!("places: {}: {}", title, message);
        self.modals.open_error(title, message.clone(), None);
        self.phase = SearchPhase::Failed { message };
        &self.phase
    }

    /// Pick result `index`; out-of-range picks keep the previous selection
    pub fn select(&mut self, index: usize) -> Option<&Place> {
        if let SearchPhase::Results(places) = &self.phase {
            if let Some(place) = places.get(index) {
                self.selected = Some(place.clone());
            }
        }
        self.selected.as_ref()
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    pub fn selected(&self) -> Option<&Place> {
        self.selected.as_ref()
    }

    pub fn reset(&mut self) {
        self.phase = SearchPhase::Idle;
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::ModalKind;
    use crate::sdk::test_support::{script_url, FakeEnvironment, FixedProbe};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeSearcher {
        outcome: Result<Vec<Place>, PlaceSearchError>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PlaceSearcher for FakeSearcher {
        async fn keyword_search(&self, _keyword: &str) -> Result<Vec<Place>, PlaceSearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn place(name: &str) -> Place {
        Place {
            id: name.to_string(),
            name: name.to_string(),
            address: "서울 마포구 서교동".to_string(),
            road_address: Some("서울 마포구 양화로 1".to_string()),
            phone: None,
            url: None,
            longitude: 126.92,
            latitude: 37.55,
        }
    }

    fn flow(
        environment: FakeEnvironment,
        outcome: Result<Vec<Place>, PlaceSearchError>,
    ) -> (PlaceSearchFlow, ModalCoordinator, Arc<FakeSearcher>) {
        let modals = ModalCoordinator::new();
        let searcher = Arc::new(FakeSearcher {
            outcome,
            calls: AtomicUsize::new(0),
        });
        let loader = SdkLoader::new(
            script_url(),
            Arc::new(environment),
            Arc::new(FixedProbe::status(401)),
        );
        let flow = PlaceSearchFlow::new(loader, searcher.clone(), modals.clone());
        (flow, modals, searcher)
    }

    #[tokio::test]
    async fn test_search_returns_results() {
        let (mut flow, modals, _) = flow(
            FakeEnvironment::default(),
            Ok(vec![place("책방 A"), place("카페 B")]),
        );

        let phase = flow.search("  합정 책방 ").await.clone();
        assert_eq!(phase, SearchPhase::Results(vec![place("책방 A"), place("카페 B")]));
        assert!(!modals.is_open());

        assert_eq!(flow.select(1).map(|p| p.name.as_str()), Some("카페 B"));
        assert_eq!(flow.select(9).map(|p| p.name.as_str()), Some("카페 B"));
    }

    #[tokio::test]
    async fn test_empty_results() {
        let (mut flow, _, _) = flow(FakeEnvironment::default(), Ok(Vec::new()));
        assert_eq!(
            flow.search("없는 장소").await,
            &SearchPhase::NoResults {
                keyword: "없는 장소".to_string()
            }
        );
        assert_eq!(flow.select(0), None);
    }

    #[tokio::test]
    async fn test_blank_keyword_alerts() {
        let (mut flow, modals, searcher) = flow(FakeEnvironment::default(), Ok(Vec::new()));

        assert_eq!(flow.search("   ").await, &SearchPhase::Idle);
        let state = modals.state();
        assert_eq!(state.kind, ModalKind::Alert);
        assert_eq!(state.title, EMPTY_KEYWORD_TITLE);
        assert_eq!(searcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_sdk_failure_opens_error_modal() {
        let (mut flow, modals, searcher) = flow(FakeEnvironment::failing(1), Ok(Vec::new()));

        let message = match flow.search("합정").await {
            SearchPhase::Failed { message } => message.clone(),
            other => panic!("expected failure, got {:?}", other),
        };
        assert!(message.contains("인증 오류"));

        let state = modals.state();
        assert_eq!(state.kind, ModalKind::Error);
        assert_eq!(state.title, SDK_FAILURE_TITLE);
        assert_eq!(state.description, message);
        assert_eq!(searcher.calls.load(Ordering::SeqCst), 0);

        // The loader went back to idle, so the next search retries
        modals.close();
        assert!(matches!(flow.search("합정").await, SearchPhase::NoResults { .. }));
    }

    #[tokio::test]
    async fn test_search_failure_opens_error_modal() {
        let (mut flow, modals, _) = flow(
            FakeEnvironment::default(),
            Err(PlaceSearchError::Service("ERROR".to_string())),
        );

        assert!(matches!(flow.search("합정").await, SearchPhase::Failed { .. }));
        assert_eq!(modals.state().title, SEARCH_FAILURE_TITLE);
    }

    #[tokio::test]
    async fn test_prepare_loads_once() {
        let environment = Arc::new(FakeEnvironment::default());
        let loader = SdkLoader::new(
            script_url(),
            environment.clone(),
            Arc::new(FixedProbe::status(200)),
        );
        let searcher = Arc::new(FakeSearcher {
            outcome: Ok(vec![place("책방 A")]),
            calls: AtomicUsize::new(0),
        });
        let mut flow = PlaceSearchFlow::new(loader, searcher, ModalCoordinator::new());

        assert_eq!(flow.prepare().await, Ok(()));
        flow.search("책방").await;
        flow.search("카페").await;
        assert_eq!(environment.injections(), 1);
    }

    #[tokio::test]
    async fn test_prepare_starts_loading_without_awaiting() {
        let environment = Arc::new(FakeEnvironment::default());
        let loader = SdkLoader::new(
            script_url(),
            environment.clone(),
            Arc::new(FixedProbe::status(200)),
        );
        let searcher = Arc::new(FakeSearcher {
            outcome: Ok(Vec::new()),
            calls: AtomicUsize::new(0),
        });
        let flow = PlaceSearchFlow::new(loader.clone(), searcher, ModalCoordinator::new());

        let _ = flow.prepare();
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert_eq!(environment.injections(), 1);
        assert!(loader.is_ready());
    }

    #[tokio::test]
    async fn test_reset() {
        let (mut flow, _, _) = flow(FakeEnvironment::default(), Ok(vec![place("책방 A")]));
        flow.search("책방").await;
        flow.select(0);
        flow.reset();
        assert_eq!(flow.phase(), &SearchPhase::Idle);
        assert_eq!(flow.selected(), None);
    }
}
