use serde::Serialize;

use crate::models::SessionStat;

/// Per-model rollup, sorted by descending cost in the snapshot.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelAggregate {
    pub model: String,
    pub tokens_in: u64,
    pub tokens_out: u64,
    pub cost: f64,
    pub sessions: u64,
}

/// Per-UTC-day rollup. The snapshot keeps at most the last seven days,
/// ascending.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAggregate {
    pub day: String,
    pub cost: f64,
    pub tokens: u64,
}

/// Cron vs. interactive split.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginSplit {
    pub cost: f64,
    pub tokens: u64,
    pub count: u64,
}

/// The finalized output of one aggregation run. Field names serialize in
/// camelCase; this shape is the whole contract toward the renderer.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub total_cost: f64,
    pub today_cost: f64,
    pub week_cost: f64,
    pub total_in: u64,
    pub total_out: u64,
    pub session_count: u64,
    pub by_model: Vec<ModelAggregate>,
    pub by_day: Vec<DayAggregate>,
    pub top_sessions: Vec<SessionStat>,
    pub cron: OriginSplit,
    pub interactive: OriginSplit,
    pub generated_at: String,
}
