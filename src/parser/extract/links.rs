use anyhow::{Context, Result};
use reqwest::Url;
use scraper::ElementRef;
use tracing::warn;

use crate::parser::dom;

const DOWNLOAD_LINK: &str = ".DownloadLink";

/// Every download link's href, made absolute against `origin`.
pub fn extract(root: ElementRef<'_>, origin: &Url) -> Result<Vec<String>> {
    let mut links = Vec::new();
    for anchor in dom::all(root, DOWNLOAD_LINK)? {
        let Some(href) = anchor.value().attr("href") else {
            warn!("Skipping download link without href: {:?}", dom::text(anchor));
            continue;
        };
        links.push(qualify(href.trim(), origin)?);
    }
    Ok(links)
}

/// Absolute hrefs are returned verbatim; site-relative ones are prefixed with the origin.
pub fn qualify(href: &str, origin: &Url) -> Result<String> {
    if Url::parse(href).is_ok_and(|url| url.has_host()) {
        return Ok(href.to_string());
    }
    if href.starts_with("//") {
        let joined = origin
            .join(href)
            .with_context(|| format!("Cannot resolve download link {:?} against {}", href, origin))?;
        return Ok(joined.to_string());
    }
    let base = origin.as_str().trim_end_matches('/');
    Ok(format!("{}/{}", base, href.trim_start_matches('/')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn origin() -> Url {
        Url::parse("https://www.kannapedia.net/").unwrap()
    }

    #[test]
    fn absolute_link_untouched() {
        let q = qualify("https://files.example.org/rsp1/a.vcf", &origin()).unwrap();
        assert_eq!(q, "https://files.example.org/rsp1/a.vcf");
    }

    #[test]
    fn root_relative_link_gets_origin() {
        let q = qualify("/downloads/rsp10000/variants.vcf", &origin()).unwrap();
        assert_eq!(q, "https://www.kannapedia.net/downloads/rsp10000/variants.vcf");
    }

    #[test]
    fn bare_relative_link_gets_origin() {
        let q = qualify("downloads/a.bam", &origin()).unwrap();
        assert_eq!(q, "https://www.kannapedia.net/downloads/a.bam");
    }

    #[test]
    fn absolute_link_keeps_page_text() {
        let href = "https://storage.example.com/reports/RSP10000 report (final).pdf";
        assert_eq!(qualify(href, &origin()).unwrap(), href);
    }

    #[test]
    fn relative_link_keeps_page_text() {
        let q = qualify("/reports/RSP10000 report.pdf", &origin()).unwrap();
        assert_eq!(q, "https://www.kannapedia.net/reports/RSP10000 report.pdf");
    }

    #[test]
    fn protocol_relative_link_takes_origin_scheme() {
        let q = qualify("//cdn.example.com/a.vcf", &origin()).unwrap();
        assert_eq!(q, "https://cdn.example.com/a.vcf");
    }

    #[test]
    fn collects_in_page_order_and_skips_missing_href() {
        let doc = Html::parse_document(
            r#"<html><body>
                <a class="DownloadLink" href="/d/one.vcf">one</a>
                <a class="Other" href="/d/ignored">x</a>
                <a class="DownloadLink">no href</a>
                <a class="DownloadLink" href="https://cdn.example.com/two.bam">two</a>
            </body></html>"#,
        );
        let links = extract(doc.root_element(), &origin()).unwrap();
        assert_eq!(
            links,
            vec![
                "https://www.kannapedia.net/d/one.vcf".to_string(),
                "https://cdn.example.com/two.bam".to_string(),
            ]
        );
    }
}
