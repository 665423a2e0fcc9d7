//! Source URL validation.
//!
//! Purely syntactic: scheme prefix plus a domain substring allow-list. A
//! rejected URL never causes a network call.

/// Hosts recognized as TikTok page URLs.
const TIKTOK_DOMAINS: [&str; 4] = [
    "tiktok.com",
    "www.tiktok.com",
    "m.tiktok.com",
    "vm.tiktok.com",
];

/// True if `url` looks like a TikTok page URL: non-empty, `http://` or
/// `https://` prefix, and a known TikTok domain somewhere in its lowercased
/// form.
pub fn is_tiktok_url(url: &str) -> bool {
    if url.is_empty() {
        tracing::debug!("rejected: empty URL");
        return false;
    }

    if !(url.starts_with("https://") || url.starts_with("http://")) {
        tracing::debug!(url, "rejected: no http(s) prefix");
        return false;
    }

    let lower = url.to_lowercase();
    let known = TIKTOK_DOMAINS.iter().any(|domain| lower.contains(domain));
    if !known {
        tracing::debug!(url, "rejected: not a TikTok domain");
    }
    known
}
