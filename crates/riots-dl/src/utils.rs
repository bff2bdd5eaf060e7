use std::sync::LazyLock;

use regex::Regex;

static NEXT_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([^>]+)>\s*;\s*rel="?next"?"#).expect("unable to compile link header regex")
});

/// Extracts the `rel="next"` target from an RFC 8288 `Link` header value.
///
/// # Examples
///
/// ```
/// use riots_dl::utils::next_link;
///
/// let header = r#"<https://api.github.com/r?page=2>; rel="next", <https://api.github.com/r?page=5>; rel="last""#;
/// assert_eq!(next_link(header).as_deref(), Some("https://api.github.com/r?page=2"));
/// ```
pub fn next_link(header: &str) -> Option<String> {
    header
        .split(',')
        .find_map(|part| NEXT_LINK_RE.captures(part.trim()))
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_link_present() {
        let header = r#"<https://api.github.com/repositories/1/releases?per_page=100&page=2>; rel="next", <https://api.github.com/repositories/1/releases?per_page=100&page=3>; rel="last""#;
        assert_eq!(
            next_link(header).as_deref(),
            Some("https://api.github.com/repositories/1/releases?per_page=100&page=2")
        );
    }

    #[test]
    fn test_next_link_not_first() {
        let header = r#"<https://x/?page=1>; rel="prev", <https://x/?page=3>; rel="next""#;
        assert_eq!(next_link(header).as_deref(), Some("https://x/?page=3"));
    }

    #[test]
    fn test_next_link_absent_on_last_page() {
        let header = r#"<https://x/?page=1>; rel="first", <https://x/?page=2>; rel="prev""#;
        assert_eq!(next_link(header), None);
    }

    #[test]
    fn test_next_link_empty() {
        assert_eq!(next_link(""), None);
    }
}
