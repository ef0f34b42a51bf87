use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::info;

use crate::config::Mode;
use crate::records::{ChemicalRecord, MetadataRecord, StrainReport, VARIANT_FIELDS};

static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s/\\]+").unwrap());

/// Strain name as a single path component: whitespace and path separators
/// collapse to `_`, and a name of only dots becomes `_`.
pub fn underscored(name: &str) -> String {
    let name = SEPARATOR_RE.replace_all(name.trim(), "_").to_string();
    if name.chars().all(|c| c == '.') {
        "_".to_string()
    } else {
        name
    }
}

/// `<Strain_Name>-<page_id>`.
pub fn strain_dir_name(strain_name: &str, page_id: &str) -> String {
    format!("{}-{}", underscored(strain_name), page_id)
}

/// Create the per-strain directory under `parent`. An existing directory is reused as is.
pub fn create_strain_dir(parent: &Path, strain_name: &str, page_id: &str) -> Result<PathBuf> {
    let name = strain_dir_name(strain_name, page_id);
    let path = parent.join(&name);

    if path.is_dir() {
        println!("Directory '{}' already exists", name);
        return Ok(path);
    }
    std::fs::create_dir_all(&path)
        .with_context(|| format!("Failed to create directory {}", path.display()))?;
    println!("Directory '{}' created", name);
    Ok(path)
}

/// Paths of the three CSV files written for a strain.
pub struct OutputFiles {
    pub metadata: PathBuf,
    pub chemicals: PathBuf,
    pub variants: PathBuf,
}

impl OutputFiles {
    pub fn new(dir: &Path, strain_name: &str) -> Self {
        let stem = underscored(strain_name);
        Self {
            metadata: dir.join(format!("{}.metadata.csv", stem)),
            chemicals: dir.join(format!("{}.chemicals.csv", stem)),
            variants: dir.join(format!("{}.variants.csv", stem)),
        }
    }
}

/// Write metadata, chemicals and variants CSVs into `dir`, each with its header row.
///
/// In `Mode::CollectLinks` the metadata row carries the links as a trailing FILES cell.
pub fn write_report(dir: &Path, report: &StrainReport, mode: Mode) -> Result<OutputFiles> {
    let files = OutputFiles::new(dir, &report.metadata.name);
    let embed = mode.embeds_links();

    let links = embed.then_some(report.links.as_slice());
    write_csv(
        &files.metadata,
        &MetadataRecord::header(embed),
        std::iter::once(report.metadata.to_row(links)?),
    )?;

    write_csv(
        &files.chemicals,
        &ChemicalRecord::header(),
        std::iter::once(report.chemicals.values.clone()),
    )?;

    write_csv(
        &files.variants,
        &VARIANT_FIELDS,
        report.variants.iter().map(|v| v.values()),
    )?;

    info!(
        "Wrote {} variant rows and {} links to {}",
        report.variants.len(),
        if embed { report.links.len() } else { 0 },
        dir.display()
    );
    Ok(files)
}

fn write_csv<R, I, F>(path: &Path, header: &[&str], rows: R) -> Result<()>
where
    R: IntoIterator<Item = I>,
    I: IntoIterator<Item = F>,
    F: AsRef<[u8]>,
{
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
