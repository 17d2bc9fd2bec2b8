use serde::{Deserialize, Serialize};

/// Placeholder rendered wherever a statistic is missing.
pub const NO_DATA: &str = "—";

/// Aggregate statistics for one subject (or the total score) as the remote
/// API reports them. Rates are fractions in [0,1]; conversion to percentages
/// happens exactly once, in [`format_stats`], never upstream.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatBlock {
    #[serde(default)]
    pub avg_score: Option<f64>,
    #[serde(default)]
    pub max_score: Option<f64>,
    #[serde(default)]
    pub min_score: Option<f64>,
    #[serde(default)]
    pub pass_rate: Option<f64>,
    #[serde(default)]
    pub excellent_rate: Option<f64>,
    #[serde(default)]
    pub full_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayStatBlock {
    pub avg_score: String,
    pub max_score: String,
    pub min_score: String,
    pub pass_rate: String,
    pub excellent_rate: String,
    pub full_score: String,
}

fn percent(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.2}", r * 100.0),
        None => NO_DATA.to_string(),
    }
}

fn two_decimals(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => NO_DATA.to_string(),
    }
}

fn as_is(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}", v),
        None => NO_DATA.to_string(),
    }
}

/// Format one stat block for display. Missing fields render as the
/// [`NO_DATA`] placeholder; this never produces `NaN%` and never panics.
pub fn format_stats(block: &StatBlock) -> DisplayStatBlock {
    DisplayStatBlock {
        avg_score: two_decimals(block.avg_score),
        max_score: as_is(block.max_score),
        min_score: as_is(block.min_score),
        pass_rate: percent(block.pass_rate),
        excellent_rate: percent(block.excellent_rate),
        full_score: as_is(block.full_score),
    }
}
