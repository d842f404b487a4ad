//! Shared blocking HTTP client construction.

use std::time::Duration;

use crate::error::Result;

/// User agent sent with every service request.
pub const USER_AGENT: &str = concat!("skyglue/", env!("CARGO_PKG_VERSION"));

/// Build the blocking client used by all service modules.
///
/// Catalogue services can be slow for large cones, hence the generous
/// timeout.
pub fn client() -> Result<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(300))
        .build()?)
}
