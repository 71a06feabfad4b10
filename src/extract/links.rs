//! HTML scanning for PDF anchors and iframe sources.
//!
//! These functions are synchronous: the parsed document is not `Send`, so it
//! must never be held across an `.await` in the extractor.

use scraper::{Html, Selector};
use tracing::{debug, trace};
use url::Url;

use super::PdfLink;

/// Substring an href must contain to be treated as a PDF link.
pub const PDF_MARKER: &str = ".pdf";

/// Resolves `href` against `base` unless it is already absolute.
///
/// An href is considered absolute when it starts with `http`; anything else,
/// including protocol-relative `//host/path`, is joined onto `base`.
#[must_use]
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.starts_with("http") {
        Url::parse(href).ok()
    } else {
        base.join(href).ok()
    }
}

/// Returns true if the URL's host contains `allowed_domain` as a substring.
///
/// This is containment, not a suffix or exact match: with `archives.gov`,
/// `www.archives.gov` and `archives.gov.example.com` are both admitted.
#[must_use]
pub fn host_is_allowed(url: &Url, allowed_domain: &str) -> bool {
    url.host_str()
        .is_some_and(|host| host.contains(allowed_domain))
}

/// Collects on-domain PDF links from every `<a href>` in document order.
///
/// Duplicates are kept.
#[must_use]
pub fn scan_pdf_anchors(html: &str, base: &Url, allowed_domain: &str) -> Vec<PdfLink> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut links = Vec::new();
    let mut rejected = 0usize;

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !href.contains(PDF_MARKER) {
            continue;
        }
        let Some(resolved) = resolve_href(base, href) else {
            trace!(href, "unresolvable PDF href");
            rejected += 1;
            continue;
        };

        let link = PdfLink::new(resolved, base.clone(), allowed_domain);
        if link.domain_allowed {
            links.push(link);
        } else {
            trace!(url = %link.url, "PDF link outside allowed domain");
            rejected += 1;
        }
    }

    if rejected > 0 {
        debug!(rejected, page = %base, "ignored PDF hrefs");
    }
    links
}

/// Collects the resolved `src` of every `<iframe>` in document order.
#[must_use]
pub fn scan_iframe_sources(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("iframe[src]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("src"))
        .filter_map(|src| resolve_href(base, src))
        .collect()
}
