//! TMDb credential and reachability checks.

use super::CheckResult;
use crate::error::{ApiError, SETUP_URL};
use crate::models::config::TmdbConfig;
use crate::services::tmdb::Gateway;

const KEY_CHECK: &str = "TMDb API key";
const CONNECTION_CHECK: &str = "TMDb API";

pub fn check_api_key(config: &TmdbConfig) -> CheckResult {
    if config.api_key_configured() {
        CheckResult::passed(KEY_CHECK, "configured")
    } else {
        CheckResult::failed(
            KEY_CHECK,
            "API key not configured",
            format!(
                "Request a v3 key at {} and put TMDB_API_KEY=<key> in the environment or .env",
                SETUP_URL
            ),
        )
    }
}

/// GET `/authentication`, which succeeds only for an accepted key.
pub async fn check_connection(gateway: &dyn Gateway, timeout: u64) -> CheckResult {
    match gateway.request("/authentication", Vec::new()).await {
        Ok(_) => CheckResult::passed(CONNECTION_CHECK, "key accepted"),
        Err(ApiError::InvalidKey) => CheckResult::failed(
            CONNECTION_CHECK,
            "invalid API key",
            format!(
                "TMDb rejected TMDB_API_KEY; copy the v3 key (not the read access token) from {}",
                SETUP_URL
            ),
        ),
        Err(ApiError::Timeout(_)) => CheckResult::failed(
            CONNECTION_CHECK,
            format!("no response within {}s", timeout),
            "Raise API_TIMEOUT or check TMDB_BASE_URL",
        ),
        Err(e) => CheckResult::failed(
            CONNECTION_CHECK,
            format!("connection failed: {}", e),
            "Check your network connection and TMDB_BASE_URL",
        ),
    }
}
