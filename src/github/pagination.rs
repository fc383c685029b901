//! `Link` header pagination (RFC 8288 style, as used by the GitHub REST API).
//!
//! A paginated response carries a header such as:
//!
//! ```text
//! link: <https://api.github.com/repositories/1/releases?page=2>; rel="next",
//!       <https://api.github.com/repositories/1/releases?page=5>; rel="last"
//! ```
//!
//! Anything that cannot be parsed is treated as "no next page".

use log::debug;
use reqwest::header::LINK;

use super::types::ApiResponse;

/// A single `<url>; rel="name"` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    pub url: String,
    pub rel: String,
}

/// Returns the URL tagged `rel="next"` in the response's `link` header.
pub fn next_page_url<T>(response: &ApiResponse<T>) -> Option<String> {
    let value = response.headers.get(LINK)?;
    let value = match value.to_str() {
        Ok(v) => v,
        Err(_) => {
            debug!("Ignoring non-UTF-8 link header");
            return None;
        }
    };

    parse_link_header(value)
        .into_iter()
        .find(|entry| entry.rel == "next")
        .map(|entry| entry.url)
}

/// Splits a `link` header into its entries, skipping malformed ones.
pub fn parse_link_header(value: &str) -> Vec<LinkEntry> {
    split_entries(value)
        .into_iter()
        .filter_map(parse_link_entry)
        .collect()
}

/// Splits on commas that are not inside a `<...>` target.
fn split_entries(value: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut in_target = false;
    let mut start = 0;
    for (i, c) in value.char_indices() {
        match c {
            '<' => in_target = true,
            '>' => in_target = false,
            ',' if !in_target => {
                entries.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&value[start..]);
    entries
}

fn parse_link_entry(entry: &str) -> Option<LinkEntry> {
    let (url, params) = entry.trim().strip_prefix('<')?.split_once('>')?;
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    let rel = params.split(';').find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("rel") {
            return None;
        }
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);
        Some(value.to_string())
    })?;

    Some(LinkEntry {
        url: url.to_string(),
        rel,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue};

    fn response_with_link(link: Option<&str>) -> ApiResponse<()> {
        let mut headers = HeaderMap::new();
        if let Some(link) = link {
            headers.insert(LINK, HeaderValue::from_str(link).unwrap());
        }
        ApiResponse {
            status_code: 200,
            result: (),
            headers,
        }
    }

    #[test]
    fn test_next_page_url_first_page() {
        let page1 = r#"<https://api.github.com/repositories/129883600/releases?page=2>; rel="next", <https://api.github.com/repositories/129883600/releases?page=3>; rel="last""#;
        assert_eq!(
            next_page_url(&response_with_link(Some(page1))),
            Some("https://api.github.com/repositories/129883600/releases?page=2".to_string())
        );
    }

    #[test]
    fn test_next_page_url_last_page() {
        let page2 = r#"<https://api.github.com/repositories/129883600/releases?page=1>; rel="prev", <https://api.github.com/repositories/129883600/releases?page=1>; rel="first""#;
        assert_eq!(next_page_url(&response_with_link(Some(page2))), None);
    }

    #[test]
    fn test_next_page_url_without_header() {
        assert_eq!(next_page_url(&response_with_link(None)), None);
    }

    #[test]
    fn test_next_page_url_next_not_first_entry() {
        let link = r#"<https://example.com/a?page=1>; rel="prev", <https://example.com/a?page=3>; rel="next""#;
        assert_eq!(
            next_page_url(&response_with_link(Some(link))),
            Some("https://example.com/a?page=3".to_string())
        );
    }

    #[test]
    fn test_next_page_url_malformed() {
        let link = "https://example.com/a?page=2; rel=next, garbage";
        assert_eq!(next_page_url(&response_with_link(Some(link))), None);
    }

    #[test]
    fn test_next_page_url_relation_must_match_exactly() {
        let link = r#"<https://example.com/a?page=2>; rel="nextpage""#;
        assert_eq!(next_page_url(&response_with_link(Some(link))), None);
    }

    #[test]
    fn test_parse_link_header() {
        let link = r#"<https://example.com/a?page=2>; rel="next", <>; rel="last", <https://example.com/a?page=1>; type="text/html"; rel=first"#;
        assert_eq!(
            parse_link_header(link),
            vec![
                LinkEntry {
                    url: "https://example.com/a?page=2".to_string(),
                    rel: "next".to_string(),
                },
                LinkEntry {
                    url: "https://example.com/a?page=1".to_string(),
                    rel: "first".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_next_page_url_with_comma_in_url() {
        let link = r#"<https://example.com/issues?labels=a,b&page=2>; rel="next", <https://example.com/issues?labels=a,b&page=5>; rel="last""#;
        assert_eq!(
            next_page_url(&response_with_link(Some(link))),
            Some("https://example.com/issues?labels=a,b&page=2".to_string())
        );
    }

    #[test]
    fn test_parse_link_header_semicolon_in_url() {
        let link = r#"<https://example.com/a;v=1?page=2>; rel="next""#;
        assert_eq!(
            parse_link_header(link),
            vec![LinkEntry {
                url: "https://example.com/a;v=1?page=2".to_string(),
                rel: "next".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_link_header_empty() {
        assert!(parse_link_header("").is_empty());
    }
}
