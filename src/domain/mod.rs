// Domain layer - Records, filter selections and chart aggregates
pub mod consultation;
pub mod filters;
pub mod record;
pub mod report;
