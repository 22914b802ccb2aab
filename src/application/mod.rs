// Application layer - Use cases over the loaded dataset
pub mod chart_registry;
pub mod dataset;
pub mod dataset_source;
