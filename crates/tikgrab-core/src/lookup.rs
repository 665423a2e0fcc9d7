//! Lookup client: resolves a TikTok page URL to result markup via the
//! external lookup service.
//!
//! One form-encoded POST per call, browser-emulating header set, bounded
//! timeout, no retries. Only a 2xx response body is usable.

use crate::config::TikgrabConfig;
use crate::error::TransferError;
use std::time::Duration;
use url::form_urlencoded;

/// Headers the lookup service requires to not reject the request. Origin,
/// Referer, and User-Agent come from config; the rest are fixed.
const FIXED_HEADERS: [(&str, &str); 11] = [
    ("Accept", "*/*"),
    ("Accept-Language", "en-US,en;q=0.9"),
    ("Content-Type", "application/x-www-form-urlencoded"),
    ("Priority", "u=1, i"),
    (
        "Sec-Ch-Ua",
        "\"Not/A)Brand\";v=\"8\", \"Chromium\";v=\"126\", \"Google Chrome\";v=\"126\"",
    ),
    ("Sec-Ch-Ua-Mobile", "?0"),
    ("Sec-Ch-Ua-Platform", "\"Windows\""),
    ("Sec-Fetch-Dest", "empty"),
    ("Sec-Fetch-Mode", "cors"),
    ("Sec-Fetch-Site", "same-origin"),
    ("X-Requested-With", "XMLHttpRequest"),
];

/// Canned page URL for the connectivity probe.
const PROBE_QUERY: &str = "https://www.tiktok.com/@test/video/test";

/// Client for the external resolution endpoint.
#[derive(Debug, Clone)]
pub struct LookupClient {
    endpoint: String,
    headers: Vec<(String, String)>,
    timeout: Duration,
    check_timeout: Duration,
}

impl LookupClient {
    pub fn new(config: &TikgrabConfig) -> Self {
        let mut headers: Vec<(String, String)> = FIXED_HEADERS
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        headers.push(("Origin".to_string(), config.origin.clone()));
        headers.push(("Referer".to_string(), config.referer.clone()));
        headers.push(("User-Agent".to_string(), config.user_agent.clone()));

        Self {
            endpoint: config.endpoint.clone(),
            headers,
            timeout: Duration::from_secs(config.lookup_timeout_secs),
            check_timeout: Duration::from_secs(config.check_timeout_secs),
        }
    }

    /// Resolve `url` to the service's result markup.
    ///
    /// A non-2xx status, timeout, or transport failure comes back as a
    /// `TransferError`; the caller reports it and moves on to the next input.
    pub fn resolve(&self, url: &str) -> Result<String, TransferError> {
        tracing::info!(url, "resolving page URL");
        match self.post(url, self.timeout) {
            Ok(markup) => Ok(markup),
            Err(e) => {
                tracing::warn!(url, error = %e, "lookup failed");
                Err(e)
            }
        }
    }

    /// Probe the endpoint with a canned query to assess reachability.
    /// Used as a gate before entering interactive mode.
    pub fn check_connection(&self) -> bool {
        match self.post(PROBE_QUERY, self.check_timeout) {
            Ok(_) => {
                tracing::info!(endpoint = %self.endpoint, "lookup service reachable");
                true
            }
            Err(e) => {
                tracing::warn!(endpoint = %self.endpoint, error = %e, "lookup service unreachable");
                false
            }
        }
    }

    fn post(&self, query: &str, timeout: Duration) -> Result<String, TransferError> {
        let body = form_urlencoded::Serializer::new(String::new())
            .append_pair("q", query)
            .append_pair("lang", "en")
            .finish();

        let mut easy = curl::easy::Easy::new();
        easy.url(&self.endpoint)?;
        easy.post(true)?;
        easy.post_fields_copy(body.as_bytes())?;
        easy.timeout(timeout)?;

        let mut list = curl::easy::List::new();
        for (name, value) in &self.headers {
            list.append(&format!("{name}: {value}"))?;
        }
        easy.http_headers(list)?;

        let mut response = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                response.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(TransferError::Http(code));
        }

        Ok(String::from_utf8_lossy(&response).into_owned())
    }
}
