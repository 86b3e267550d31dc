//! sitemap.xml rendering.

use std::path::Path;

use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::crawler::SitemapEntry;
use crate::error::SitemapError;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const DECLARATION: &str = "<?xml version=\"1.0\" ?>\n";

/// Render `entries` as a sitemap document, two-space indented.
pub fn render_sitemap(entries: &[SitemapEntry]) -> Result<String, SitemapError> {
    let mut writer = Writer::new_with_indent(DECLARATION.as_bytes().to_vec(), b' ', 2);
    let urlset = BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)]);

    if entries.is_empty() {
        writer.write_event(Event::Empty(urlset))?;
    } else {
        writer.write_event(Event::Start(urlset))?;
        for entry in entries {
            writer.write_event(Event::Start(BytesStart::new("url")))?;
            write_text_element(&mut writer, "loc", &entry.loc)?;
            write_text_element(&mut writer, "lastmod", &entry.lastmod)?;
            write_text_element(&mut writer, "priority", &entry.priority)?;
            writer.write_event(Event::End(BytesEnd::new("url")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("urlset")))?;
    }

    let mut document = String::from_utf8_lossy(&writer.into_inner()).into_owned();
    document.push('\n');
    Ok(document)
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), SitemapError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Render and write to `path`. The parent directory must already exist.
pub async fn write_sitemap(path: &Path, entries: &[SitemapEntry]) -> Result<(), SitemapError> {
    let document = render_sitemap(entries)?;
    tokio::fs::write(path, document)
        .await
        .map_err(|source| SitemapError::Write {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(loc: &str) -> SitemapEntry {
        SitemapEntry {
            loc: loc.to_string(),
            lastmod: "2024-05-17".to_string(),
            priority: "0.8".to_string(),
        }
    }

    #[test]
    fn renders_entries() {
        let xml = render_sitemap(&[entry("https://example.com"), entry("https://example.com/a")])
            .unwrap();

        let expected = r#"<?xml version="1.0" ?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://example.com</loc>
    <lastmod>2024-05-17</lastmod>
    <priority>0.8</priority>
  </url>
  <url>
    <loc>https://example.com/a</loc>
    <lastmod>2024-05-17</lastmod>
    <priority>0.8</priority>
  </url>
</urlset>
"#;
        assert_eq!(xml, expected);
    }

    #[test]
    fn empty_urlset_is_self_closing() {
        assert_eq!(
            render_sitemap(&[]).unwrap(),
            "<?xml version=\"1.0\" ?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\"/>\n"
        );
    }

    #[test]
    fn escapes_markup_in_urls() {
        let xml = render_sitemap(&[entry("https://example.com/search?a=1&b=<2>")]).unwrap();
        assert!(xml.contains("<loc>https://example.com/search?a=1&amp;b=&lt;2&gt;</loc>"));
    }

    #[tokio::test]
    async fn write_requires_existing_directory() {
        let dir = tempfile::tempdir().unwrap();

        let path = dir.path().join("sitemap.xml");
        write_sitemap(&path, &[entry("https://example.com")])
            .await
            .unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("<loc>https://example.com</loc>"));

        let missing = dir.path().join("missing").join("sitemap.xml");
        let err = write_sitemap(&missing, &[]).await.unwrap_err();
        assert!(matches!(err, SitemapError::Write { .. }));
        assert!(!dir.path().join("missing").exists());
    }
}
