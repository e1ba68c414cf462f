use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use macrostate_core::{MacroError, RawObservation, SeriesProvider, SeriesRequest};

/// Instruction for how a fetch should behave for a given series.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(MacroError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<String, MockBehavior<Vec<RawObservation>>>,
    requests: Vec<SeriesRequest>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for fetches of a specific series.
    pub async fn set_behavior(
        &self,
        series_id: impl Into<String>,
        behavior: MockBehavior<Vec<RawObservation>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(series_id.into(), behavior);
    }

    /// Copy of every request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<SeriesRequest> {
        self.state.lock().await.requests.clone()
    }

    /// Clear all configured behaviors and the request log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.requests.clear();
    }
}

/// A provider that defers all behavior to an external controller.
///
/// Series without a configured behavior fail with `NotFound`.
pub struct DynamicMockProvider {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockProvider {
    /// Create a new dynamic mock provider and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn SeriesProvider>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn SeriesProvider>, controller)
    }
}

#[async_trait]
impl SeriesProvider for DynamicMockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    async fn observations(&self, req: &SeriesRequest) -> Result<Vec<RawObservation>, MacroError> {
        // Snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.requests.push(req.clone());
            guard.rules.get(&req.series_id).cloned()
        };

        match behavior {
            Some(MockBehavior::Return(rows)) => Ok(rows),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            None => Err(MacroError::not_found(format!("series {}", req.series_id))),
        }
    }
}
