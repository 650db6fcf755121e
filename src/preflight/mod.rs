//! Startup checks behind `movie-tv-mcp check`.
//!
//! Each check yields one line of output; failed checks add a hint on the
//! following line.

mod tmdb;

use crate::models::config::TmdbConfig;
use crate::services::tmdb::Gateway;
use colored::{ColoredString, Colorize};

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: &'static str,
    pub success: bool,
    pub message: String,
    pub hint: Option<String>,
}

impl CheckResult {
    pub fn passed(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            success: true,
            message: message.into(),
            hint: None,
        }
    }

    pub fn failed(
        name: &'static str,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self {
            name,
            success: false,
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    fn label(&self) -> ColoredString {
        if self.success {
            "[OK]".green()
        } else {
            "[FAIL]".red()
        }
    }
}

/// Check the key, then ask TMDb whether it accepts it.
///
/// Without a key the connection check is not attempted.
pub async fn run_preflight_checks(
    config: &TmdbConfig,
    gateway: &dyn Gateway,
) -> Vec<CheckResult> {
    let key = tmdb::check_api_key(config);
    if !key.success {
        return vec![key];
    }

    vec![key, tmdb::check_connection(gateway, config.timeout).await]
}

pub fn print_results(results: &[CheckResult]) {
    for result in results {
        println!("{} {}: {}", result.label(), result.name.bold(), result.message);
        if let Some(hint) = &result.hint {
            println!("  {} {}", "->".yellow(), hint);
        }
    }
}

pub fn all_passed(results: &[CheckResult]) -> bool {
    results.iter().all(|r| r.success)
}
