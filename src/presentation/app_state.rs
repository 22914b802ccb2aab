// Application state for HTTP handlers
use crate::application::chart_registry::ChartRegistry;
use crate::domain::filters::FilterOptions;

#[derive(Clone)]
pub struct AppState {
    pub registry: ChartRegistry,
    pub options: FilterOptions,
}

impl AppState {
    /// Dropdown options are enumerated once here, from the unfiltered dataset.
    pub fn new(registry: ChartRegistry) -> Self {
        let options = registry.dataset().filter_options();
        Self { registry, options }
    }
}
