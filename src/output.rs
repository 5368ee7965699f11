//! # Output
//!
//! Rendering of the end-of-run summary, as text for people or JSON for
//! scripts, plus the color policy the text form follows.
//!
//! ## Color
//!
//! Colors and status emoji are used when `--color=always`, or when
//! `--color=auto` and the environment allows it. Auto mode turns them off when
//! `NO_COLOR` is set (https://no-color.org/), `CLICOLOR=0`, `TERM=dumb`, or
//! stdout is not a terminal, unless `CLICOLOR_FORCE` is set to a non-zero
//! value.

use std::env;
use std::fmt::Write;

use console::style;
use serde::Serialize;

use crate::engine::{SyncOutcome, SyncReport};
use crate::error::Result;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from the environment and the value of
    /// the `--color` flag (`always`, `never`, or `auto`).
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // Presence alone disables colors, even when empty
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns `emoji_str` when colors are enabled, `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Outcome counts for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub cloned: usize,
    pub updated: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn from_reports(reports: &[SyncReport]) -> Self {
        let mut summary = Self::default();
        for report in reports {
            match report.outcome {
                SyncOutcome::Cloned { .. } => summary.cloned += 1,
                SyncOutcome::Updated => summary.updated += 1,
                SyncOutcome::UpdateFailed(_)
                | SyncOutcome::CloneExhausted { .. }
                | SyncOutcome::Aborted(_) => summary.failed += 1,
            }
        }
        summary
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// One repository's outcome in the JSON summary.
#[derive(Debug, Serialize)]
pub struct OutcomeRecord {
    pub repository: String,
    pub local_name: String,
    pub status: &'static str,
    pub attempts: u32,
    pub error: Option<String>,
    pub elapsed_ms: u128,
}

impl From<&SyncReport> for OutcomeRecord {
    fn from(report: &SyncReport) -> Self {
        Self {
            repository: report.repo.to_string(),
            local_name: report.repo.local_name().to_string(),
            status: report.outcome.status(),
            attempts: report.outcome.attempts(),
            error: report.outcome.error().map(|e| e.to_string()),
            elapsed_ms: report.elapsed.as_millis(),
        }
    }
}

/// Reports sorted by local name, so output is stable across runs.
fn sorted(reports: &[SyncReport]) -> Vec<&SyncReport> {
    let mut sorted: Vec<&SyncReport> = reports.iter().collect();
    sorted.sort_by(|a, b| a.repo.local_name().cmp(b.repo.local_name()));
    sorted
}

/// Render the summary as a pretty-printed JSON array.
pub fn render_json(reports: &[SyncReport]) -> Result<String> {
    let records: Vec<OutcomeRecord> = sorted(reports).into_iter().map(Into::into).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Render the human-readable summary: one line per repository and a totals
/// line.
pub fn render_text(config: &OutputConfig, reports: &[SyncReport]) -> String {
    let mut out = String::new();
    let width = reports
        .iter()
        .map(|r| r.repo.local_name().len())
        .max()
        .unwrap_or(0);

    for report in sorted(reports) {
        let outcome = &report.outcome;
        let (marker, status) = if outcome.is_success() {
            (emoji(config, "✅", "[OK]"), style(outcome.status()).green())
        } else {
            (emoji(config, "❌", "[FAIL]"), style(outcome.status()).red())
        };
        let _ = writeln!(
            out,
            "{} {:<width$}  {}  {}",
            marker,
            report.repo.local_name(),
            status.force_styling(config.use_color),
            report.repo,
            width = width
        );
        if let Some(error) = outcome.error() {
            for line in error.to_string().lines() {
                let _ = writeln!(out, "      {}", line);
            }
        }
    }

    let summary = RunSummary::from_reports(reports);
    let _ = writeln!(
        out,
        "Summary: {} cloned, {} updated, {} failed",
        summary.cloned, summary.updated, summary.failed
    );
    out
}
