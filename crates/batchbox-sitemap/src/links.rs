use std::collections::BTreeSet;

use scraper::{ElementRef, Html};
use url::Url;

use crate::url_rules::{UrlRules, normalize_url};

/// Every `<a href>` on the page, resolved against `page_url`, normalized and
/// filtered by `rules`. Sorted, so crawl order does not depend on hashing.
pub fn extract_links(page_url: &Url, html: &str, rules: &UrlRules) -> BTreeSet<String> {
    let document = Html::parse_document(html);

    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "a")
        .filter_map(|el| el.value().attr("href"))
        .filter_map(|href| page_url.join(href).ok())
        .map(|absolute| normalize_url(absolute.as_str()))
        .filter(|link| rules.is_valid_url(link))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(page: &str, html: &str) -> Vec<String> {
        let rules = UrlRules::for_site("https://example.com").unwrap();
        extract_links(&Url::parse(page).unwrap(), html, &rules)
            .into_iter()
            .collect()
    }

    #[test]
    fn resolves_relative_links() {
        let html = r#"
            <html><body>
              <a href="/about/">About</a>
              <a href="contact">Contact</a>
              <a href="https://example.com/blog#latest">Blog</a>
            </body></html>
        "#;

        assert_eq!(
            links("https://example.com/docs/", html),
            vec![
                "https://example.com/about",
                "https://example.com/blog",
                "https://example.com/docs/contact",
            ]
        );
    }

    #[test]
    fn drops_foreign_and_binary_links() {
        let html = r#"
            <a href="https://other.org/">elsewhere</a>
            <a href="/files/report.pdf">report</a>
            <a href="mailto:hi@example.com">mail</a>
            <a href="javascript:void(0)">noop</a>
            <a>no href</a>
            <a href="/kept">kept</a>
        "#;

        assert_eq!(
            links("https://example.com", html),
            vec!["https://example.com/kept"]
        );
    }

    #[test]
    fn deduplicates_after_normalization() {
        let html = r#"
            <a href="/a">1</a><a href="/a/">2</a><a href="/a#x">3</a>
        "#;

        assert_eq!(links("https://example.com", html), vec!["https://example.com/a"]);
    }

    #[test]
    fn fragment_only_link_points_back_at_the_page() {
        let html = r##"<a href="#top">top</a>"##;
        assert_eq!(
            links("https://example.com/guide", html),
            vec!["https://example.com/guide"]
        );
    }
}
