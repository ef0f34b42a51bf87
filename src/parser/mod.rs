pub mod dom;
pub mod extract;

use anyhow::Result;
use reqwest::Url;
use scraper::Html;
use tracing::info;

use crate::records::{StrainReport, SENTINEL};

/// Parse one strain report page into its metadata, chemical, variant and link records.
pub fn extract_page(html: &str, origin: &Url) -> Result<StrainReport> {
    let document = Html::parse_document(html);
    let report = extract::extract_all(document.root_element(), origin)?;

    let reported = |values: &[String]| values.iter().filter(|v| *v != SENTINEL).count();
    info!(
        "Extracted {} ({}): {}/{} cannabinoids, {}/{} terpenoids, {} variants, {} links",
        report.metadata.name,
        report.metadata.ref_number,
        reported(report.chemicals.cannabinoids()),
        report.chemicals.cannabinoids().len(),
        reported(report.chemicals.terpenoids()),
        report.chemicals.terpenoids().len(),
        report.variants.len(),
        report.links.len(),
    );
    Ok(report)
}

// ── Tests ──
