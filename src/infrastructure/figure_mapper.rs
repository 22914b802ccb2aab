// Mapper to convert aggregate tables to bar chart figures
use crate::domain::report::{
    AttentionCount, CancellationRate, ChartFigure, ConsultationGroups, FigureSeries, LabelCount,
};
use crate::infrastructure::config::{ChartStyle, PairedChartStyle};

pub fn attention_figure(id: &str, style: &ChartStyle, counts: Vec<AttentionCount>) -> ChartFigure {
    let (labels, values): (Vec<String>, Vec<f64>) = counts
        .into_iter()
        .map(|c| (c.given_by, c.count as f64))
        .unzip();

    ChartFigure {
        id: id.to_string(),
        title: style.title.clone(),
        x_label: "dadopor".to_string(),
        y_label: "cantidad_atenciones".to_string(),
        labels,
        series: vec![FigureSeries::new(
            "cantidad_atenciones".to_string(),
            style.color.clone(),
            values,
        )],
    }
}

pub fn cancellation_figure(
    id: &str,
    style: &ChartStyle,
    rates: Vec<CancellationRate>,
) -> ChartFigure {
    let (labels, values): (Vec<String>, Vec<f64>) = rates
        .into_iter()
        .map(|r| (r.physician, r.mean_is_cancelled))
        .unzip();

    ChartFigure {
        id: id.to_string(),
        title: style.title.clone(),
        x_label: "Medico".to_string(),
        y_label: "tasa_anulacion".to_string(),
        labels,
        series: vec![FigureSeries::new(
            "tasa_anulacion".to_string(),
            style.color.clone(),
            values,
        )],
    }
}

/// Two series over the same label axis, so bars stay paired per label.
pub fn consultation_figure(
    id: &str,
    style: &PairedChartStyle,
    groups: ConsultationGroups,
) -> ChartFigure {
    ChartFigure {
        id: id.to_string(),
        title: style.title.clone(),
        x_label: "tipo_consulta".to_string(),
        y_label: "cantidad".to_string(),
        labels: groups.labels,
        series: vec![
            FigureSeries::new(
                "Con Costo".to_string(),
                style.with_cost_color.clone(),
                series_values(groups.with_cost),
            ),
            FigureSeries::new(
                "Sin Costo".to_string(),
                style.without_cost_color.clone(),
                series_values(groups.without_cost),
            ),
        ],
    }
}

fn series_values(series: Vec<LabelCount>) -> Vec<f64> {
    series.into_iter().map(|c| c.count as f64).collect()
}
