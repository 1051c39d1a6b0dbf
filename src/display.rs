//! Terminal status output for the pipeline run.
//!
//! Colors come from owo-colors when the `colors` feature is on; otherwise
//! a no-op shim keeps the call sites identical.

use std::path::Path;

#[cfg(feature = "colors")]
use owo_colors::OwoColorize;

#[cfg(not(feature = "colors"))]
pub mod color_shim {
    use std::fmt::{self, Display, Formatter};

    #[derive(Clone)]
    pub struct Plain(pub String);

    impl Display for Plain {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    pub trait ColorizeShim {
        fn as_str(&self) -> &str;

        fn cyan(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn green(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn magenta(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn bold(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn dimmed(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
    }

    impl ColorizeShim for str {
        fn as_str(&self) -> &str {
            self
        }
    }

    impl ColorizeShim for String {
        fn as_str(&self) -> &str {
            self
        }
    }
}

#[cfg(not(feature = "colors"))]
use color_shim::ColorizeShim;

use crate::models::Snapshot;
use crate::utils::{format_currency, format_tokens};

/// One-line run summary on stderr, out of the way of `--json` stdout.
pub fn print_summary(snapshot: &Snapshot) {
    eprintln!(
        "{} {} sessions, {} in / {} out, est. total {}",
        "parsed".dimmed(),
        snapshot.session_count.to_string().bold(),
        format_tokens(snapshot.total_in),
        format_tokens(snapshot.total_out),
        format_currency(snapshot.total_cost).green(),
    );
}

pub fn print_rendered(path: &Path, opened: bool) {
    let dest = path.display().to_string();
    if opened {
        eprintln!("{} {}", "dashboard".dimmed(), dest.cyan());
    } else {
        eprintln!("{} {} {}", "dashboard".dimmed(), dest.cyan(), "(not opened)".dimmed());
    }
}
