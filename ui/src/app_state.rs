use api::config::DashboardConfig;
use std::ops::Deref;
use std::sync::Arc;

#[derive(Debug, PartialEq)]
pub struct AppStateData {
    pub config: DashboardConfig,
}

/// Immutable, cheaply cloned state shared through context.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState(Arc<AppStateData>);

impl Deref for AppState {
    type Target = AppStateData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self(Arc::new(AppStateData { config }))
    }
}
