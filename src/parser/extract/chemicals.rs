use anyhow::Result;
use scraper::ElementRef;
use tracing::{debug, warn};

use crate::parser::dom;
use crate::records::{ChemicalRecord, CANNABINOID_FIELDS, SENTINEL, TERPENOID_FIELDS};

/// Text the site puts in a chemical region that has no measurements.
const NO_INFO_MARKER: &str = "No information provided";

/// A chemical-content region of the page and the fixed columns it fills.
pub struct ChemicalSection {
    pub name: &'static str,
    pub region: &'static str,
    pub fields: &'static [&'static str],
}

impl ChemicalSection {
    pub fn arity(&self) -> usize {
        self.fields.len()
    }
}

/// Sections in column order; their field lists concatenate to `ChemicalRecord::header()`.
pub const SECTIONS: [ChemicalSection; 2] = [
    ChemicalSection {
        name: "cannabinoids",
        region: ".StrainChemicalInfo--cannabinoids",
        fields: &CANNABINOID_FIELDS,
    },
    ChemicalSection {
        name: "terpenoids",
        region: ".StrainChemicalInfo--terpenoids",
        fields: &TERPENOID_FIELDS,
    },
];

pub fn extract(root: ElementRef<'_>) -> Result<ChemicalRecord> {
    let mut values = Vec::with_capacity(SECTIONS.iter().map(ChemicalSection::arity).sum());
    for section in &SECTIONS {
        values.extend(read_section(root, section)?);
    }
    Ok(ChemicalRecord { values })
}

/// Exactly `section.arity()` values: the region's `<dd>` texts in page order,
/// or the sentinel throughout when the region is absent or empty of data.
fn read_section(root: ElementRef<'_>, section: &ChemicalSection) -> Result<Vec<String>> {
    let Some(region) = dom::first(root, section.region)? else {
        debug!("No {} region on page", section.name);
        return Ok(sentinel_row(section.arity()));
    };
    if dom::text(region).contains(NO_INFO_MARKER) {
        debug!("No {} information provided", section.name);
        return Ok(sentinel_row(section.arity()));
    }

    let mut values: Vec<String> = dom::all(region, "dd")?.into_iter().map(dom::text).collect();
    if values.len() != section.arity() {
        warn!(
            "{} region has {} entries, expected {}; fitting to column count",
            section.name,
            values.len(),
            section.arity()
        );
        values.resize(section.arity(), SENTINEL.to_string());
    }
    Ok(values)
}

fn sentinel_row(arity: usize) -> Vec<String> {
    vec![SENTINEL.to_string(); arity]
}
