// src/core/net.rs
// Blocking HTTP over one shared client (reqwest, rustls).

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde_json::Value;

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::NetError;

static CLIENT: OnceLock<Client> = OnceLock::new();

fn client() -> &'static Client {
    CLIENT.get_or_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

fn send(url: &str, query: &[(&str, String)]) -> Result<Response, NetError> {
    let resp = client()
        .get(url)
        .query(query)
        .send()
        .map_err(|source| NetError::Request { url: s!(url), source })?;

    let status = resp.status();
    if !status.is_success() {
        // query strings carry API keys; report the bare URL only
        return Err(NetError::Status { status: status.as_u16(), url: s!(url) });
    }
    Ok(resp)
}

/// Where collectors get pages from: [`http_get`] live, saved pages in tests.
pub type PageFetch<'a> = dyn Fn(&str) -> Result<String, NetError> + Sync + 'a;

/// JSON endpoint source: [`get_json`] live, canned responses in tests.
pub type JsonFetch<'a> = dyn Fn(&str, &[(&str, String)]) -> Result<Value, NetError> + Sync + 'a;

/// GET a page and return its body as text.
pub fn http_get(url: &str) -> Result<String, NetError> {
    send(url, &[])?
        .text()
        .map_err(|source| NetError::Request { url: s!(url), source })
}

/// GET a JSON endpoint with query parameters.
pub fn get_json(url: &str, query: &[(&str, String)]) -> Result<Value, NetError> {
    send(url, query)?
        .json::<Value>()
        .map_err(|source| NetError::Json { url: s!(url), source })
}

/// Resolve a site-relative `href` against `base` (which must end in `/`).
/// Absolute URLs pass through untouched.
pub fn join_url(base: &str, href: &str) -> String {
    let href = href.trim();
    if href.starts_with("http://") || href.starts_with("https://") {
        return s!(href);
    }
    join!(base, href.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::join_url;

    #[test]
    fn join_url_handles_relative_rooted_and_absolute() {
        let base = "https://mmadecisions.com/";
        assert_eq!(join_url(base, "decision/123/A-vs-B"), "https://mmadecisions.com/decision/123/A-vs-B");
        assert_eq!(join_url(base, " /event/9/UFC "), "https://mmadecisions.com/event/9/UFC");
        assert_eq!(join_url(base, "http://ufcstats.com/x"), "http://ufcstats.com/x");
    }
}
