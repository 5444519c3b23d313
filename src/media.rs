//! Media URLs
//!
//! Upload fields come back either as bucket paths or as raw storage-origin
//! URLs. Both are served through the CDN.

use crate::config::AdminConfig;

/// Rewrite a stored media reference to a CDN URL.
///
/// Relative paths are joined onto the CDN base and storage-origin URLs have
/// their origin swapped. Other absolute URLs (YouTube links, data URLs) pass
/// through untouched.
pub fn normalize_media_url(raw: &str, config: &AdminConfig) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    // The origin only matches up to a path boundary
    let on_storage = config
        .storage_origin
        .as_deref()
        .and_then(|origin| raw.strip_prefix(origin.trim_end_matches('/')))
        .filter(|rest| rest.is_empty() || rest.starts_with('/'));
    let path = match on_storage {
        Some(rest) => rest,
        None if is_absolute(raw) => return raw.to_string(),
        None => raw,
    };

    format!("{}/{}", config.cdn_base_url, collapse_slashes(path.trim_start_matches('/')))
}

/// `Some` normalized URL for a present, non-blank field
pub fn media_url(raw: Option<&str>, config: &AdminConfig) -> Option<String> {
    raw.map(|r| normalize_media_url(r, config)).filter(|u| !u.is_empty())
}

fn is_absolute(url: &str) -> bool {
    url.contains("://") || url.starts_with("data:") || url.starts_with("blob:")
}

fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for c in path.chars() {
        if c == '/' && prev_slash {
            continue;
        }
        prev_slash = c == '/';
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AdminConfig {
        AdminConfig {
            cdn_base_url: "https://cdn.zaitoon.app".to_string(),
            storage_origin: Some("https://zaitoon.s3.amazonaws.com".to_string()),
            ..AdminConfig::default()
        }
    }

    #[test]
    fn test_relative_path_joined_to_cdn() {
        assert_eq!(
            normalize_media_url("stories/cover.png", &config()),
            "https://cdn.zaitoon.app/stories/cover.png"
        );
        assert_eq!(
            normalize_media_url("/stories//audio.mp3", &config()),
            "https://cdn.zaitoon.app/stories/audio.mp3"
        );
    }

    #[test]
    fn test_lookalike_host_not_rewritten() {
        let url = "https://zaitoon.s3.amazonaws.com.evil.example/stories/cover.png";
        assert_eq!(normalize_media_url(url, &config()), url);

        let url = "https://zaitoon.s3.amazonaws.com:8443/cover.png";
        assert_eq!(normalize_media_url(url, &config()), url);
    }

    #[test]
    fn test_storage_origin_rewritten() {
        assert_eq!(
            normalize_media_url("https://zaitoon.s3.amazonaws.com//uploads/fox.jpg", &config()),
            "https://cdn.zaitoon.app/uploads/fox.jpg"
        );
    }

    #[test]
    fn test_other_absolute_urls_unchanged() {
        let url = "https://www.youtube.com/watch?v=abc";
        assert_eq!(normalize_media_url(url, &config()), url);
        assert_eq!(normalize_media_url("data:image/png;base64,AAA", &config()), "data:image/png;base64,AAA");
    }

    #[test]
    fn test_empty_stays_empty() {
        assert_eq!(normalize_media_url("  ", &config()), "");
        assert_eq!(media_url(None, &config()), None);
        assert_eq!(media_url(Some(""), &config()), None);
    }
}
