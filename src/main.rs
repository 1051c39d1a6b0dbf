use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::PathBuf;

use openclaw_costboard::aggregate::Aggregator;
use openclaw_costboard::cli::{Args, SourceArg};
use openclaw_costboard::display::{print_rendered, print_summary};
use openclaw_costboard::logs::{SESSIONS_SUBDIR, day_log_path, read_lines, session_log_files};
use openclaw_costboard::parser::parse_line;
use openclaw_costboard::render::{DEFAULT_TEMPLATE, inject, open_in_browser};
use openclaw_costboard::utils::openclaw_root;

fn main() -> Result<()> {
    let args = Args::parse();
    let root = openclaw_root(args.root.as_deref());

    let files: Vec<PathBuf> = match args.source {
        SourceArg::Sessions => {
            let dir = args
                .sessions_dir
                .clone()
                .unwrap_or_else(|| root.join(SESSIONS_SUBDIR));
            session_log_files(&dir)
        }
        SourceArg::Daylog => {
            let date = args.date.unwrap_or_else(|| Utc::now().date_naive());
            vec![day_log_path(&root, date)]
        }
    };

    let mut aggregator = Aggregator::new(args.top);
    for file in &files {
        for line in read_lines(file) {
            if let Some(record) = parse_line(&line) {
                aggregator.ingest(record);
            }
        }
    }
    let snapshot = aggregator.finalize(Utc::now());
    print_summary(&snapshot);

    let snapshot_json = serde_json::to_string(&snapshot).context("serialize snapshot")?;
    if args.json {
        println!("{snapshot_json}");
        return Ok(());
    }

    let template = match &args.template {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("read template {}", path.display()))?,
        None => DEFAULT_TEMPLATE.to_string(),
    };
    let html = inject(&template, &snapshot_json)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("openclaw-costboard.html"));
    fs::write(&output, html).with_context(|| format!("write dashboard {}", output.display()))?;

    let mut opened = false;
    if !args.no_open {
        opened = open_in_browser(&output).is_ok();
    }
    print_rendered(&output, opened);

    Ok(())
}
