use chrono::NaiveDate;
use std::path::PathBuf;

use crate::aggregate::DEFAULT_TOP_SESSIONS;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceArg {
    /// Per-session .jsonl files under <root>/agents/main/sessions
    Sessions,
    /// The per-day openclaw-YYYY-MM-DD log
    Daylog,
}

#[derive(clap::Parser, Debug)]
pub struct Args {
    /// OpenClaw state directory. Defaults to ~/.openclaw
    #[arg(long, env = "OPENCLAW_STATE_DIR")]
    pub root: Option<String>,

    /// Explicit sessions directory (overrides <root>/agents/main/sessions)
    #[arg(long, env = "OPENCLAW_SESSIONS_DIR")]
    pub sessions_dir: Option<PathBuf>,

    /// Which log layout to read: sessions|daylog
    #[arg(long, value_enum, default_value_t = SourceArg::Sessions)]
    pub source: SourceArg,

    /// Day to analyze with --source daylog (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Print the snapshot JSON to stdout instead of rendering HTML
    #[arg(long)]
    pub json: bool,

    /// Write the rendered dashboard here instead of a temp file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Custom HTML template (must contain the dashboard and empty-state nodes)
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// How many sessions the detail table shows
    #[arg(long, default_value_t = DEFAULT_TOP_SESSIONS)]
    pub top: usize,

    /// Skip launching the browser after rendering
    #[arg(long)]
    pub no_open: bool,
}

impl Args {
    pub fn parse() -> Self {
        <Args as clap::Parser>::parse()
    }
}
