//! # Aggregator
//!
//! Folds classified log records into per-session state, then finalizes the
//! run into one [`Snapshot`].
//!
//! Record order matters: session files interleave `session` /
//! `model_change` / `message` events, and the aggregator tracks which
//! session (and which model inside it) subsequent messages belong to. That
//! tracking is an explicit two-state machine rather than ambient mutable
//! globals, so synthetic record streams can be tested without touching the
//! filesystem.

use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeMap, HashMap};

use crate::models::{
    DayAggregate, LogRecord, ModelAggregate, OriginSplit, Role, SessionStat, Snapshot,
};
use crate::pricing::resolve_pricing;
use crate::utils::round_to;

/// Sessions shown in the dashboard detail table by default.
pub const DEFAULT_TOP_SESSIONS: usize = 15;

/// Days kept in the by-day series.
const DAY_WINDOW: usize = 7;

/// Where messages land while a stream is being consumed. Messages that
/// arrive outside any session are dropped on the floor.
#[derive(Clone, Debug)]
enum Cursor {
    NoActiveSession,
    ActiveSession { id: String, model: Option<String> },
}

pub struct Aggregator {
    sessions: HashMap<String, SessionStat>,
    // Encounter order; ties in the top-session sort resolve to this.
    order: Vec<String>,
    cursor: Cursor,
    top_n: usize,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_SESSIONS)
    }
}

impl Aggregator {
    pub fn new(top_n: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            order: Vec::new(),
            cursor: Cursor::NoActiveSession,
            top_n,
        }
    }

    pub fn ingest(&mut self, record: LogRecord) {
        match record {
            LogRecord::SessionStart { id, timestamp } => {
                self.cursor = Cursor::ActiveSession {
                    id: id.clone(),
                    model: None,
                };
                // A restart resets the session's stats but keeps its
                // original position in the encounter order.
                if !self.sessions.contains_key(&id) {
                    self.order.push(id.clone());
                }
                self.sessions
                    .insert(id.clone(), SessionStat::new(id, timestamp));
            }
            LogRecord::ModelChange { model } => {
                if let Cursor::ActiveSession {
                    id,
                    model: current_model,
                } = &mut self.cursor
                {
                    *current_model = Some(model.clone());
                    if let Some(stat) = self.sessions.get_mut(id) {
                        stat.model = model;
                    }
                }
            }
            LogRecord::Message {
                role,
                tokens,
                timestamp,
            } => {
                let Cursor::ActiveSession { id, .. } = &self.cursor else {
                    return;
                };
                let Some(stat) = self.sessions.get_mut(id) else {
                    return;
                };
                match role {
                    Some(Role::User) => stat.tokens_in += tokens,
                    Some(Role::Assistant) => stat.tokens_out += tokens,
                    None => {}
                }
                stat.messages += 1;
                if let Some(ts) = timestamp {
                    stat.timestamp = ts;
                }
            }
            LogRecord::Usage(ev) => {
                // Day-log events carry their own attribution and bypass the
                // cursor. Events with no session id pool under their model.
                let key = ev
                    .session
                    .clone()
                    .or_else(|| ev.model.clone())
                    .unwrap_or_else(|| "unknown".to_string());
                let order = &mut self.order;
                let stat = self.sessions.entry(key).or_insert_with_key(|k| {
                    order.push(k.clone());
                    SessionStat::new(k.clone(), String::new())
                });
                if let Some(model) = ev.model {
                    stat.model = model;
                }
                stat.tokens_in += ev.input_tokens;
                stat.tokens_out += ev.output_tokens;
                stat.messages += 1;
                if !ev.timestamp.is_empty() {
                    stat.timestamp = ev.timestamp;
                }
            }
        }
    }

    /// Price every session and roll up the totals. `now` anchors the
    /// today/week buckets and the generation timestamp.
    pub fn finalize(mut self, now: DateTime<Utc>) -> Snapshot {
        let today = now.format("%Y-%m-%d").to_string();
        let seven_ago = (now - Duration::days(7)).to_rfc3339();

        let mut total_cost = 0.0;
        let mut today_cost = 0.0;
        let mut week_cost = 0.0;
        let mut total_in = 0u64;
        let mut total_out = 0u64;
        let mut by_model: HashMap<String, ModelAggregate> = HashMap::new();
        let mut model_order: Vec<String> = Vec::new();
        let mut by_day: BTreeMap<String, (f64, u64)> = BTreeMap::new();
        let mut cron = OriginSplit::default();
        let mut interactive = OriginSplit::default();
        let mut all: Vec<SessionStat> = Vec::with_capacity(self.order.len());

        for id in &self.order {
            let Some(stat) = self.sessions.get_mut(id) else {
                continue;
            };
            let pricing = resolve_pricing(&stat.model);
            let cost = (stat.tokens_in as f64 * pricing.in_per_mtok
                + stat.tokens_out as f64 * pricing.out_per_mtok)
                / 1_000_000.0;
            stat.cost = round_to(cost, 4);

            total_cost += cost;
            total_in += stat.tokens_in;
            total_out += stat.tokens_out;

            let day = if stat.timestamp.is_empty() {
                "unknown"
            } else {
                stat.timestamp.get(..10).unwrap_or(&stat.timestamp)
            };
            if day == today {
                today_cost += cost;
            }
            if stat.timestamp.as_str() >= seven_ago.as_str() {
                week_cost += cost;
            }
            if day != "unknown" {
                let bucket = by_day.entry(day.to_string()).or_insert((0.0, 0));
                bucket.0 += cost;
                bucket.1 += stat.total_tokens();
            }

            let agg = by_model
                .entry(stat.model.clone())
                .or_insert_with(|| {
                    model_order.push(stat.model.clone());
                    ModelAggregate {
                        model: stat.model.clone(),
                        tokens_in: 0,
                        tokens_out: 0,
                        cost: 0.0,
                        sessions: 0,
                    }
                });
            agg.tokens_in += stat.tokens_in;
            agg.tokens_out += stat.tokens_out;
            agg.cost += cost;
            agg.sessions += 1;

            let split = if stat.is_cron { &mut cron } else { &mut interactive };
            split.cost += cost;
            split.tokens += stat.total_tokens();
            split.count += 1;

            all.push(stat.clone());
        }

        let mut model_list: Vec<ModelAggregate> = model_order
            .into_iter()
            .filter_map(|m| by_model.remove(&m))
            .map(|mut agg| {
                agg.cost = round_to(agg.cost, 4);
                agg
            })
            .collect();
        // Stable sort: equal-cost models keep encounter order.
        model_list.sort_by(|a, b| b.cost.total_cmp(&a.cost));

        let mut day_list: Vec<DayAggregate> = by_day
            .into_iter()
            .map(|(day, (cost, tokens))| DayAggregate {
                day,
                cost: round_to(cost, 4),
                tokens,
            })
            .collect();
        if day_list.len() > DAY_WINDOW {
            day_list.drain(..day_list.len() - DAY_WINDOW);
        }

        let session_count = all.len() as u64;
        let mut top_sessions = all;
        top_sessions.sort_by(|a, b| b.total_tokens().cmp(&a.total_tokens()));
        top_sessions.truncate(self.top_n);

        cron.cost = round_to(cron.cost, 4);
        interactive.cost = round_to(interactive.cost, 4);

        Snapshot {
            total_cost: round_to(total_cost, 2),
            today_cost: round_to(today_cost, 2),
            week_cost: round_to(week_cost, 2),
            total_in,
            total_out,
            session_count,
            by_model: model_list,
            by_day: day_list,
            top_sessions,
            cron,
            interactive,
            generated_at: now.to_rfc3339(),
        }
    }
}
