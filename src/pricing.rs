//! # Pricing Module
//!
//! Maps model identifiers to USD-per-million-token rates for cost estimates.
//!
//! ## Resolution order
//!
//! 1. Exact match against the static table
//! 2. Substring match (table key inside the id, or the id inside the key)
//! 3. Free-tier provider prefix (`venice/`, `google/`) resolves to zero
//! 4. Default fallback pair for anything else
//!
//! Free-tier detection must stay after substring matching and before the
//! default fallback; moving it after the fallback would bill free-tier
//! models at the fallback rate.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pricing {
    pub in_per_mtok: f64,
    pub out_per_mtok: f64,
}

impl Pricing {
    pub const fn new(in_per_mtok: f64, out_per_mtok: f64) -> Self {
        Self {
            in_per_mtok,
            out_per_mtok,
        }
    }
}

/// Fallback rate for models not covered by the table.
pub const DEFAULT_PRICING: Pricing = Pricing::new(1.0, 4.0);

/// Providers whose traffic is not billed per token.
const FREE_TIER_PREFIXES: &[&str] = &["venice/", "google/"];

/// Static rates in USD per 1M tokens, approximate from provider price pages.
const PRICING_TABLE: &[(&str, Pricing)] = &[
    ("anthropic/claude-opus-4-6", Pricing::new(15.0, 75.0)),
    ("claude-opus-4-6", Pricing::new(15.0, 75.0)),
    ("openrouter/moonshotai/kimi-k2.5", Pricing::new(0.60, 3.00)),
    ("openai/gpt-4o", Pricing::new(2.50, 10.00)),
    ("openai/gpt-4o-mini", Pricing::new(0.15, 0.60)),
];

pub fn resolve_pricing(model_id: &str) -> Pricing {
    for (key, pricing) in PRICING_TABLE {
        if *key == model_id {
            return *pricing;
        }
    }
    for (key, pricing) in PRICING_TABLE {
        if model_id.contains(key) || key.contains(model_id) {
            return *pricing;
        }
    }
    if FREE_TIER_PREFIXES.iter().any(|p| model_id.starts_with(p)) {
        return Pricing::new(0.0, 0.0);
    }
    DEFAULT_PRICING
}
