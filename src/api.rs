//! Thin JSON API client over a shared `ureq` agent.
//!
//! Every request goes through one agent configured with a bounded timeout,
//! so a stalled backend surfaces as an ordinary error instead of hanging a
//! background task forever.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::constants::REQUEST_TIMEOUT_SECS;

const USER_AGENT: &str = concat!("worldplate/", env!("CARGO_PKG_VERSION"));

/// Build the shared agent with the request timeout applied.
fn agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
}

/// Join a base URL and an endpoint path into a full request URL.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// GET `base_url/path` and decode the JSON body.
pub fn get<T: DeserializeOwned>(base_url: &str, path: &str) -> Result<T, String> {
    let url = endpoint_url(base_url, path);
    let response = agent()
        .get(&url)
        .set("User-Agent", USER_AGENT)
        .call()
        .map_err(|e| format!("GET {} failed: {}", url, e))?;

    response
        .into_json::<T>()
        .map_err(|e| format!("GET {} returned malformed JSON: {}", url, e))
}

/// POST a JSON body to `base_url/path` and decode the JSON response.
pub fn post_json<T: DeserializeOwned>(
    base_url: &str,
    path: &str,
    body: serde_json::Value,
) -> Result<T, String> {
    let url = endpoint_url(base_url, path);
    let response = agent()
        .post(&url)
        .set("User-Agent", USER_AGENT)
        .send_json(body)
        .map_err(|e| format!("POST {} failed: {}", url, e))?;

    response
        .into_json::<T>()
        .map_err(|e| format!("POST {} returned malformed JSON: {}", url, e))
}
