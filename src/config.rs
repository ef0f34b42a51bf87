use std::path::PathBuf;

use anyhow::{Context, Result};
use reqwest::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.kannapedia.net/strains/";

/// What to do with the download links found on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Record the links in a trailing FILES column of the metadata file.
    CollectLinks,
    /// Fetch every linked file into the strain directory; no FILES column.
    DownloadFiles,
}

impl Mode {
    pub fn from_flag(download_files: bool) -> Self {
        if download_files {
            Mode::DownloadFiles
        } else {
            Mode::CollectLinks
        }
    }

    pub fn embeds_links(self) -> bool {
        self == Mode::CollectLinks
    }
}

/// Settings for one run, threaded explicitly through fetch, extract and output.
#[derive(Debug, Clone)]
pub struct Config {
    /// Page identifier appended to the base URL, e.g. `rsp10000`.
    pub page_id: String,
    pub mode: Mode,
    pub base_url: Url,
    /// Scheme + host that relative download links are resolved against.
    pub origin: Url,
    /// Parent of the per-strain output directory.
    pub out_dir: PathBuf,
}

impl Config {
    pub fn new(page_id: &str, mode: Mode, base_url: &str, out_dir: PathBuf) -> Result<Self> {
        let page_id = page_id.trim();
        if page_id.is_empty() {
            anyhow::bail!("page identifier must not be empty");
        }

        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;
        if !base_url.has_host() {
            anyhow::bail!("Base URL has no host: {}", base_url);
        }
        let origin = Url::parse(&base_url.origin().ascii_serialization())
            .with_context(|| format!("Cannot derive site origin from {}", base_url))?;

        Ok(Self {
            page_id: page_id.to_string(),
            mode,
            base_url,
            origin,
            out_dir,
        })
    }

    /// Base URL concatenated with the page identifier.
    pub fn page_url(&self) -> String {
        format!("{}{}", self.base_url, self.page_id)
    }
}
