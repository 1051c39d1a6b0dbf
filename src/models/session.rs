use serde::Serialize;

/// Mutable per-session accumulator. Lives for one aggregation run; `cost`
/// stays zero until finalization prices the accumulated tokens.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStat {
    pub id: String,
    pub model: String,
    pub timestamp: String,
    pub tokens_in: u64,
    pub tokens_out: u64,
    pub messages: u64,
    pub is_cron: bool,
    pub cost: f64,
}

impl SessionStat {
    pub fn new(id: String, timestamp: String) -> Self {
        let is_cron = id.to_lowercase().contains("cron");
        Self {
            id,
            model: "unknown".to_string(),
            timestamp,
            tokens_in: 0,
            tokens_out: 0,
            messages: 0,
            is_cron,
            cost: 0.0,
        }
    }

    pub fn total_tokens(&self) -> u64 {
        self.tokens_in + self.tokens_out
    }
}
