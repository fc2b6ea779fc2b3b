//! URL helpers

use percent_encoding::percent_decode_str;
use url::Url;

/// Split an absolute http(s) URL into its base and relative part
///
/// The base is `scheme://host[:port]` exactly as written; the relative part
/// is everything from the first `/` after the host, possibly empty.
/// Returns `None` for anything that is not an absolute http(s) URL.
///
/// # Examples
/// ```
/// use icdsync::utils::split_base_url;
/// let (base, path) = split_base_url("https://www.cms.gov/medicare/coding/icd10").unwrap();
/// assert_eq!(base, "https://www.cms.gov");
/// assert_eq!(path, "/medicare/coding/icd10");
/// assert!(split_base_url("/medicare/coding/icd10").is_none());
/// ```
pub fn split_base_url(url: &str) -> Option<(String, String)> {
    let parsed = Url::parse(url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return None;
    }
    let host_start = url.find("://")? + 3;
    match url[host_start..].find('/') {
        Some(i) => {
            let (base, rest) = url.split_at(host_start + i);
            Some((base.to_string(), rest.to_string()))
        }
        None => Some((url.to_string(), String::new())),
    }
}

/// Resolve a scraped link against the site base
///
/// Absolute http(s) links are returned unchanged.
pub fn resolve_link(base: &str, href: &str) -> String {
    if split_base_url(href).is_some() {
        return href.to_string();
    }
    Url::parse(base)
        .and_then(|b| b.join(href))
        .map(String::from)
        .unwrap_or_else(|_| format!("{}{}", base, href))
}

/// Last path segment of a URL, percent-decoded
pub fn url_file_name(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.next_back()?;
    if segment.is_empty() {
        return None;
    }
    Some(percent_decode_str(segment).decode_utf8_lossy().to_string())
}
