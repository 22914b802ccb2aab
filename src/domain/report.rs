// Aggregate tables and chart figures
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttentionCount {
    pub given_by: String,
    pub count: u64,
}

impl AttentionCount {
    pub fn new(given_by: String, count: u64) -> Self {
        Self { given_by, count }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CancellationRate {
    pub physician: String,
    pub mean_is_cancelled: f64,
}

impl CancellationRate {
    pub fn new(physician: String, mean_is_cancelled: f64) -> Self {
        Self {
            physician,
            mean_is_cancelled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: u64,
}

impl LabelCount {
    pub fn new(label: String, count: u64) -> Self {
        Self { label, count }
    }
}

/// Paired with-cost / without-cost series sharing one label axis.
/// Both series hold one entry per label, zero where the series has no rows.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ConsultationGroups {
    pub labels: Vec<String>,
    pub with_cost: Vec<LabelCount>,
    pub without_cost: Vec<LabelCount>,
}

impl ConsultationGroups {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureSeries {
    pub name: String,
    pub color: Option<String>,
    pub values: Vec<f64>,
}

impl FigureSeries {
    pub fn new(name: String, color: Option<String>, values: Vec<f64>) -> Self {
        Self { name, color, values }
    }
}

/// Chart-ready bar figure handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFigure {
    pub id: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub labels: Vec<String>,
    pub series: Vec<FigureSeries>,
}

impl ChartFigure {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
