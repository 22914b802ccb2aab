// Chart registry - Maps chart ids to their aggregation and declared filters
use crate::application::dataset::Dataset;
use crate::domain::filters::{AttentionRange, CategoryChoice, FilterInput, InvalidChoice, Selection};
use crate::domain::report::ChartFigure;
use crate::infrastructure::config::ChartsConfig;
use crate::infrastructure::figure_mapper::{
    attention_figure, cancellation_figure, consultation_figure,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

pub const ATTENTION_CHART: &str = "attention";
pub const CANCELLATIONS_CHART: &str = "cancellations";
pub const CONSULTATIONS_CHART: &str = "consultations";

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("unknown chart '{0}'")]
    UnknownChart(String),
    #[error(transparent)]
    InvalidSelection(#[from] InvalidChoice),
}

type RenderFn = fn(&Dataset, &ChartsConfig, &Selection) -> Result<ChartFigure, ChartError>;

struct ChartEntry {
    id: &'static str,
    inputs: &'static [FilterInput],
    render: RenderFn,
}

const CHARTS: &[ChartEntry] = &[
    ChartEntry {
        id: ATTENTION_CHART,
        inputs: &[FilterInput::GivenBy, FilterInput::Range, FilterInput::Month],
        render: render_attention,
    },
    ChartEntry {
        id: CANCELLATIONS_CHART,
        inputs: &[FilterInput::Physician, FilterInput::GivenBy, FilterInput::Month],
        render: render_cancellations,
    },
    ChartEntry {
        id: CONSULTATIONS_CHART,
        inputs: &[FilterInput::Category, FilterInput::Month],
        render: render_consultations,
    },
];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartDescriptor {
    pub id: String,
    pub title: String,
    pub inputs: Vec<FilterInput>,
}

#[derive(Clone)]
pub struct ChartRegistry {
    dataset: Arc<Dataset>,
    charts_config: ChartsConfig,
}

impl ChartRegistry {
    pub fn new(dataset: Arc<Dataset>, charts_config: ChartsConfig) -> Self {
        Self {
            dataset,
            charts_config,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn describe(&self) -> Vec<ChartDescriptor> {
        CHARTS
            .iter()
            .map(|entry| ChartDescriptor {
                id: entry.id.to_string(),
                title: self.title_of(entry.id),
                inputs: entry.inputs.to_vec(),
            })
            .collect()
    }

    /// Recompute one chart from the current dropdown values.
    /// Inputs the chart does not declare are ignored.
    pub fn render(&self, chart_id: &str, selection: &Selection) -> Result<ChartFigure, ChartError> {
        let entry = CHARTS
            .iter()
            .find(|entry| entry.id == chart_id)
            .ok_or_else(|| ChartError::UnknownChart(chart_id.to_string()))?;

        let declared = entry
            .inputs
            .iter()
            .filter_map(|input| selection.get(*input).map(|value| (*input, value)))
            .fold(Selection::default(), |acc, (input, value)| acc.with(input, value));

        let figure = (entry.render)(&self.dataset, &self.charts_config, &declared)?;
        tracing::debug!(chart = chart_id, bars = figure.labels.len(), "Rendered chart");
        Ok(figure)
    }

    fn title_of(&self, chart_id: &str) -> String {
        match chart_id {
            ATTENTION_CHART => self.charts_config.attention.title.clone(),
            CANCELLATIONS_CHART => self.charts_config.cancellations.title.clone(),
            _ => self.charts_config.consultations.title.clone(),
        }
    }
}

fn render_attention(
    dataset: &Dataset,
    config: &ChartsConfig,
    selection: &Selection,
) -> Result<ChartFigure, ChartError> {
    let range = selection.parse::<AttentionRange>(FilterInput::Range)?;
    let counts = dataset.compute_attention_counts(
        selection.get(FilterInput::GivenBy),
        range,
        selection.get(FilterInput::Month),
    );
    Ok(attention_figure(ATTENTION_CHART, &config.attention, counts))
}

fn render_cancellations(
    dataset: &Dataset,
    config: &ChartsConfig,
    selection: &Selection,
) -> Result<ChartFigure, ChartError> {
    let rates = dataset.compute_cancellation_rates(
        selection.get(FilterInput::Physician),
        selection.get(FilterInput::GivenBy),
        selection.get(FilterInput::Month),
    );
    Ok(cancellation_figure(CANCELLATIONS_CHART, &config.cancellations, rates))
}

fn render_consultations(
    dataset: &Dataset,
    config: &ChartsConfig,
    selection: &Selection,
) -> Result<ChartFigure, ChartError> {
    let category = selection.parse::<CategoryChoice>(FilterInput::Category)?;
    let groups = dataset.compute_consultation_groups(category, selection.get(FilterInput::Month));
    Ok(consultation_figure(CONSULTATIONS_CHART, &config.consultations, groups))
}
