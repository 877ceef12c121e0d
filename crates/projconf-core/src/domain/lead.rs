//! Homepage lead paragraph → Markdown.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use url::Url;

use crate::domain::error::{DomainError, DomainResult};

static ASIDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<aside.*?</aside>").expect("valid regex"));
static PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<p>(.*?)</p>").expect("valid regex"));
static CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<code>(.*?)</code>").expect("valid regex"));
static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<a\s+href=["']([^'"]*)["']>(.*?)</a>"#).expect("valid regex")
});
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<.*?>").expect("valid regex"));

/// Extract the first paragraph of a homepage as Markdown.
///
/// `<aside>` blocks are skipped, inline code becomes backticks and links are
/// resolved against `page_url`. Remaining markup is stripped.
pub fn extract_lead(html: &str, page_url: &str) -> DomainResult<String> {
    let base = Url::parse(page_url).map_err(|e| DomainError::InvalidUrl {
        url: page_url.to_string(),
        reason: e.to_string(),
    })?;

    let html = ASIDE.replace_all(html, "");
    let lead = PARAGRAPH
        .captures(&html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| DomainError::HomepageLeadMissing {
            url: page_url.to_string(),
        })?;

    let lead = CODE.replace_all(lead, "`$1`");
    let lead = ANCHOR.replace_all(&lead, |c: &Captures<'_>| {
        let href = &c[1];
        let target = base
            .join(href)
            .map(String::from)
            .unwrap_or_else(|_| href.to_string());
        format!("[{}]({})", &c[2], target)
    });
    Ok(TAG.replace_all(&lead, "").into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://sourceafis.example.com/";

    #[test]
    fn takes_first_paragraph_and_strips_markup() {
        let html = "<html><h1>Title</h1><p>SourceAFIS is a <em>fingerprint</em> library.</p><p>Second.</p></html>";
        assert_eq!(
            extract_lead(html, PAGE).unwrap(),
            "SourceAFIS is a fingerprint library."
        );
    }

    #[test]
    fn skips_asides() {
        let html = "<aside><p>Sponsored</p></aside>\n<p>Real lead.</p>";
        assert_eq!(extract_lead(html, PAGE).unwrap(), "Real lead.");
    }

    #[test]
    fn converts_code_and_resolves_links() {
        let html = r#"<p>Call <code>match()</code> from <a href="java">Java</a> or <a href='https://other.org/x'>elsewhere</a>.</p>"#;
        assert_eq!(
            extract_lead(html, PAGE).unwrap(),
            "Call `match()` from [Java](https://sourceafis.example.com/java) or [elsewhere](https://other.org/x)."
        );
    }

    #[test]
    fn paragraph_may_span_lines() {
        let html = "<p>First line\nsecond line.</p>";
        assert_eq!(extract_lead(html, PAGE).unwrap(), "First line\nsecond line.");
    }

    #[test]
    fn missing_paragraph_is_reported() {
        let err = extract_lead("<div>nothing</div>", PAGE).unwrap_err();
        assert!(matches!(err, DomainError::HomepageLeadMissing { .. }));
    }

    #[test]
    fn invalid_page_url_is_reported() {
        let err = extract_lead("<p>x</p>", "not a url").unwrap_err();
        assert!(matches!(err, DomainError::InvalidUrl { .. }));
    }
}
