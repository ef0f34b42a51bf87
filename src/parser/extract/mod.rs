pub mod chemicals;
pub mod links;
pub mod metadata;
pub mod variants;

use anyhow::Result;
use reqwest::Url;
use scraper::ElementRef;

use crate::records::StrainReport;

pub fn extract_all(root: ElementRef<'_>, origin: &Url) -> Result<StrainReport> {
    let metadata = metadata::extract(root)?;
    let links = links::extract(root, origin)?;
    let chemicals = chemicals::extract(root)?;
    let variants = variants::extract(root)?;

    Ok(StrainReport {
        metadata,
        chemicals,
        variants,
        links,
    })
}
