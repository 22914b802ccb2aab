// Static dashboard page
use axum::response::Html;

const DASHBOARD_HTML: &str = include_str!("../../static/index.html");

/// Dashboard layout: dropdowns plus one bar chart per registered chart
pub async fn dashboard_page() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
