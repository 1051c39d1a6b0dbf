//! # OpenClaw Costboard
//!
//! Estimates API token spend from locally stored OpenClaw session logs and
//! renders it as a static HTML dashboard.
//!
//! ## Overview
//!
//! The pipeline reads newline-delimited JSON log files (per-session or
//! per-day layout), classifies each line, attributes tokens to sessions and
//! models, prices them against a static table, and folds everything into a
//! single snapshot:
//! - total/today/week cost and token counts
//! - per-model and per-day rollups
//! - cron vs. interactive split and a top-session table
//!
//! Token counts are approximate (~4 characters per token) unless a record
//! declares them; the numbers are directional, not billing-grade.
//!
//! ## Features
//!
//! - `colors` (default): colored terminal status output via owo-colors

/// Record stream folding and snapshot finalization
pub mod aggregate;

/// Command-line argument parsing
pub mod cli;

/// Terminal status output
pub mod display;

/// Log file discovery and tolerant line reading
pub mod logs;

/// Data models for records, sessions, and the snapshot
pub mod models;

/// Raw line classification and field extraction
pub mod parser;

/// Model pricing lookup
pub mod pricing;

/// HTML template injection and browser launch
pub mod render;

/// Path resolution and formatting helpers
pub mod utils;
