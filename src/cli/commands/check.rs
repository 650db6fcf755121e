//! Check command implementation.

use crate::models::config::Config;
use crate::preflight;
use crate::services::tmdb::TmdbClient;
use crate::{Error, Result};
use colored::Colorize;

/// Run the preflight checks and print the results.
pub async fn check(config: &Config) -> Result<()> {
    println!("{}", "Running preflight checks...".bold());
    println!();

    let client = TmdbClient::new(config.tmdb.clone())?;
    let results = preflight::run_preflight_checks(&config.tmdb, &client).await;
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        return Err(Error::other(
            "Preflight checks failed. Fix the issues above and try again.",
        ));
    }

    println!("{}", "All checks passed.".green());
    Ok(())
}
