use crate::results::{ResultCollector, SpecResult, Summary};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SpecView {
    pub name: String,
    pub path: Vec<u32>,
    pub failed: bool,
    pub errors: Vec<String>,
    pub children: Vec<SpecView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    /// Roots in report order; children nested in declaration order.
    pub specs: Vec<SpecView>,
    pub totals: Summary,
}

pub fn build_report_data(results: &ResultCollector) -> ReportData {
    ReportData {
        specs: results
            .roots()
            .into_iter()
            .map(|root| spec_view(results, root))
            .collect(),
        totals: results.summary(),
    }
}

fn spec_view(results: &ResultCollector, spec: &SpecResult) -> SpecView {
    SpecView {
        name: spec.name().to_string(),
        path: results.path(spec).0,
        failed: spec.is_failing(),
        errors: spec.errors().to_vec(),
        children: results
            .children(spec)
            .into_iter()
            .map(|child| spec_view(results, child))
            .collect(),
    }
}

/// Render the report as pretty-printed JSON.
pub fn render_json_report(results: &ResultCollector) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(&build_report_data(results))?;
    json.push('\n');
    Ok(json)
}
