use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub dataset: DatasetSettings,
    pub charts: ChartsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetSettings {
    pub path: String,
    pub delimiter: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartsConfig {
    pub attention: ChartStyle,
    pub cancellations: ChartStyle,
    pub consultations: PairedChartStyle,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartStyle {
    pub title: String,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PairedChartStyle {
    pub title: String,
    pub with_cost_color: Option<String>,
    pub without_cost_color: Option<String>,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            attention: ChartStyle {
                title: "Cantidad Total de Atenciones por Dadopor".to_string(),
                color: Some("#636efa".to_string()),
            },
            cancellations: ChartStyle {
                title: "Tasa de anulación por médico".to_string(),
                color: Some("#ef553b".to_string()),
            },
            consultations: PairedChartStyle {
                title: "Atenciones finalizadas por tipo de consulta".to_string(),
                with_cost_color: Some("#00cc96".to_string()),
                without_cost_color: Some("#ab63fa".to_string()),
            },
        }
    }
}

/// Load settings from built-in defaults, then `config/dashboard.*` if present,
/// then `DASHBOARD_*` environment variables (`__` separates sections).
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_app_config_from("config/dashboard")
}

pub fn load_app_config_from(file: &str) -> anyhow::Result<AppConfig> {
    let charts = ChartsConfig::default();
    let settings = config::Config::builder()
        .set_default("server.bind", "0.0.0.0:8050")?
        .set_default("dataset.path", "LLamados2024.csv")?
        .set_default("dataset.delimiter", ";")?
        .set_default("charts.attention.title", charts.attention.title)?
        .set_default("charts.attention.color", charts.attention.color)?
        .set_default("charts.cancellations.title", charts.cancellations.title)?
        .set_default("charts.cancellations.color", charts.cancellations.color)?
        .set_default("charts.consultations.title", charts.consultations.title)?
        .set_default(
            "charts.consultations.with_cost_color",
            charts.consultations.with_cost_color,
        )?
        .set_default(
            "charts.consultations.without_cost_color",
            charts.consultations.without_cost_color,
        )?
        .add_source(config::File::with_name(file).required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
