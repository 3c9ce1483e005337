use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathsReport<'a> {
    pub resource_types: &'a [String],
    pub inherited: bool,
    pub paths: &'a [String],
}

/// One path per line, newline terminated.
pub fn render_text(paths: &[String]) -> String {
    let mut out = String::new();
    for p in paths {
        out.push_str(p);
        out.push('\n');
    }
    out
}

pub fn render_json(report: &PathsReport<'_>) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}
