use std::sync::LazyLock;

use regex::{Captures, Regex};
use url::Url;

use crate::model::Link;

static BR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(<br\s*/?>)+").expect("valid br regex"));
static QUOTELINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a[^>]*class="quotelink"[^>]*>(.*?)</a>"#).expect("valid quotelink regex")
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("valid entity regex")
});
static QUOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">>(\d+)").expect("valid quote regex"));
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<url>https?://[^\s<]+[^.,!?;:\s<])|>>(?P<quote>\d+)").expect("valid link regex")
});

/// Convert comment HTML from the API into plain text.
///
/// `<br>` runs become a single newline, quote anchors keep their text, all
/// other tags are dropped and entities are decoded.
pub fn html_to_text(raw: Option<&str>) -> String {
    let raw = match raw {
        Some(r) if !r.is_empty() => r,
        _ => return String::new(),
    };
    let text = raw.replace("<wbr>", "");
    let text = BR_RE.replace_all(&text, "\n");
    let text = QUOTELINK_RE.replace_all(&text, "$1");
    let text = TAG_RE.replace_all(&text, "");
    unescape_entities(&text).trim().to_string()
}

/// Decode the HTML entities that appear in imageboard comments.
/// Unknown named entities are left as-is.
pub fn unescape_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            let decoded = if let Some(hex) = body
                .strip_prefix("#x")
                .or_else(|| body.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                named_entity(body)
            };
            decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "hellip" => '\u{2026}',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        "rsquo" => '\u{2019}',
        "lsquo" => '\u{2018}',
        "rdquo" => '\u{201d}',
        "ldquo" => '\u{201c}',
        _ => return None,
    })
}

/// A line made only of quotes (`>>1 >>2`), ignoring surrounding whitespace
fn is_quote_only_line(line: &str) -> bool {
    QUOTE_RE.is_match(line) && QUOTE_RE.replace_all(line, "").trim().is_empty()
}

/// Split quote ids into the leading header block and the rest of the body.
///
/// The header is the run of quote-only lines (blank lines allowed) at the
/// top of the comment.
pub fn extract_quotes(text: &str) -> (Vec<String>, Vec<String>) {
    let lines: Vec<&str> = text.lines().collect();
    let mut header = Vec::new();
    let mut index = 0;

    for line in &lines {
        let stripped = line.trim();
        if stripped.is_empty() {
            index += 1;
            continue;
        }
        if !is_quote_only_line(stripped) {
            break;
        }
        header.extend(QUOTE_RE.captures_iter(stripped).map(|c| c[1].to_string()));
        index += 1;
    }

    let body = lines[index..]
        .iter()
        .flat_map(|line| QUOTE_RE.captures_iter(line).map(|c| c[1].to_string()))
        .collect();

    (header, body)
}

pub fn extract_all_quotes(text: &str) -> Vec<String> {
    QUOTE_RE
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

/// Drop the leading quote-only lines (see [`extract_quotes`]).
pub fn strip_header_quotes(text: &str) -> String {
    let mut remaining = Vec::new();
    let mut skipping = true;

    for line in text.lines() {
        if skipping {
            let stripped = line.trim();
            if stripped.is_empty() || is_quote_only_line(stripped) {
                continue;
            }
            skipping = false;
        }
        remaining.push(line);
    }

    remaining.join("\n").trim_start().to_string()
}

/// Only well-formed http(s) URLs with a host become links
fn is_safe_url(url: &str) -> bool {
    Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
        .unwrap_or(false)
}

/// Find every quote and external URL in `text`, in document order.
pub fn extract_links(text: &str) -> Vec<Link> {
    LINK_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if let Some(url) = caps.name("url") {
                return is_safe_url(url.as_str())
                    .then(|| Link::external(whole.range(), url.as_str()));
            }
            let quote = caps.name("quote")?;
            Some(Link::quote(whole.range(), quote.as_str()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinkTarget;

    #[test]
    fn html_to_text_strips_tags_and_br() {
        let raw = "Hello<br>World <b>bold</b> &amp; stuff";
        assert_eq!(html_to_text(Some(raw)), "Hello\nWorld bold & stuff");
    }

    #[test]
    fn html_to_text_keeps_quotelink_text() {
        let raw = r##"<a href="#p123" class="quotelink">&gt;&gt;123</a><br><br>yes"##;
        assert_eq!(html_to_text(Some(raw)), ">>123\nyes");
    }

    #[test]
    fn html_to_text_empty() {
        assert_eq!(html_to_text(None), "");
        assert_eq!(html_to_text(Some("")), "");
    }

    #[test]
    fn unescape_numeric_entities() {
        assert_eq!(unescape_entities("it&#039;s &#x41;"), "it's A");
        assert_eq!(unescape_entities("&bogus;"), "&bogus;");
    }

    #[test]
    fn extract_quotes_header_and_body() {
        let text = ">>1111 >>2222\n>>3333\nHello >>4444 world\n>>5555";
        let (header, body) = extract_quotes(text);
        assert_eq!(header, vec!["1111", "2222", "3333"]);
        assert_eq!(body, vec!["4444", "5555"]);
    }

    #[test]
    fn strip_header_quotes_keeps_body() {
        let text = ">>1111\n>>2222\nHello >>3333";
        assert_eq!(strip_header_quotes(text), "Hello >>3333");
    }

    #[test]
    fn extract_all_quotes_in_order() {
        let text = "hi >>1111 there >>2222\n>>3333";
        assert_eq!(extract_all_quotes(text), vec!["1111", "2222", "3333"]);
    }

    #[test]
    fn links_cover_quotes_and_urls() {
        let text = ">>123456 see https://example.com/a, ok";
        let links = extract_links(text);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].span, 0..8);
        assert_eq!(links[0].target, Some(LinkTarget::Quote("123456".into())));
        assert_eq!(&text[links[1].span.clone()], "https://example.com/a");
        assert_eq!(
            links[1].target,
            Some(LinkTarget::External("https://example.com/a".into()))
        );
    }

    #[test]
    fn non_http_schemes_are_not_links() {
        assert!(extract_links("javascript:alert(1) ftp://x.org").is_empty());
    }

    #[test]
    fn malformed_urls_are_not_links() {
        assert!(extract_links("see http://[oops here").is_empty());
        assert_eq!(extract_links("see http://[::1]:8080/x ok").len(), 1);
    }

    #[test]
    fn safe_url_checks_parsed_scheme() {
        assert!(is_safe_url("https://example.com/a"));
        assert!(!is_safe_url("https://"));
        assert!(!is_safe_url("javascript:alert(1)"));
        assert!(!is_safe_url("mailto:a@example.com"));
    }
}
