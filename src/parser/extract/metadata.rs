use anyhow::{Context, Result};
use scraper::ElementRef;

use crate::parser::dom;
use crate::records::MetadataRecord;

const TITLE: &str = ".StrainInfo--title";
const REPORT_ID: &str = ".StrainInfo--reportId";
const REGISTRANT: &str = ".StrainInfo--registrant";
const GENERAL_INFO: &str = ".StrainGeneralInfo--basic";

const RARITY: (&str, &str) = (".DataPlot.Rarity", "a");
const PLANT_TYPE: (&str, &str) = (".StrainGeneticInfo--basic", "a");
const HETEROZYGOSITY: (&str, &str) = (".DataPlot.Heterozygosity", "strong");
const Y_RATIO: (&str, &str) = (".DataPlot.YRatio", "strong");

/// Fields read from the general-info block's `<dd>` entries.
///
/// The entries carry no keys, so each field is pinned to an ordinal position.
/// If the site reorders that block, these fields silently swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneralInfoField {
    AccessionDate,
    ReportedSex,
    ReportType,
}

impl GeneralInfoField {
    pub const ALL: [GeneralInfoField; 3] = [
        GeneralInfoField::AccessionDate,
        GeneralInfoField::ReportedSex,
        GeneralInfoField::ReportType,
    ];

    pub const fn position(self) -> usize {
        match self {
            GeneralInfoField::AccessionDate => 0,
            GeneralInfoField::ReportedSex => 1,
            GeneralInfoField::ReportType => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            GeneralInfoField::AccessionDate => "accession date",
            GeneralInfoField::ReportedSex => "reported sex",
            GeneralInfoField::ReportType => "report type",
        }
    }
}

pub fn extract(root: ElementRef<'_>) -> Result<MetadataRecord> {
    let name = dom::text(dom::require(root, TITLE, "strain title")?);
    let ref_number = dom::strip_whitespace(&dom::text(dom::require(
        root,
        REPORT_ID,
        "reference number",
    )?));

    let registrant = dom::require(root, REGISTRANT, "registrant")?;
    let grower = dom::text(dom::require(registrant, "a", "registrant link")?);

    let general = read_general_info(root)?;
    let [accession_date, reported_sex, report_type] = general;

    Ok(MetadataRecord {
        name,
        ref_number,
        grower,
        accession_date,
        reported_sex,
        report_type,
        rarity: dom::optional_text(root, RARITY.0, RARITY.1)?,
        plant_type: dom::optional_text(root, PLANT_TYPE.0, PLANT_TYPE.1)?,
        reported_heterozygosity: dom::optional_text(root, HETEROZYGOSITY.0, HETEROZYGOSITY.1)?,
        y_ratio_distribution: dom::optional_text(root, Y_RATIO.0, Y_RATIO.1)?,
    })
}

/// Values of the general-info fields, ordered as `GeneralInfoField::ALL`.
fn read_general_info(root: ElementRef<'_>) -> Result<[String; 3]> {
    let block = dom::require(root, GENERAL_INFO, "general info block")?;
    let entries = dom::all(block, "dd")?;

    let mut values: [String; 3] = Default::default();
    for (value, field) in values.iter_mut().zip(GeneralInfoField::ALL) {
        let entry = entries.get(field.position()).with_context(|| {
            format!(
                "General info block has {} entries, expected {} at position {}",
                entries.len(),
                field.label(),
                field.position()
            )
        })?;
        *value = dom::text(*entry);
    }
    Ok(values)
}
