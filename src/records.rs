use serde::Serialize;

/// Placeholder written for every chemical value of a section with no data.
pub const SENTINEL: &str = "n/a";

pub const METADATA_FIELDS: [&str; 10] = [
    "NAME",
    "REF NUMBER",
    "GROWER",
    "ACCESSION DATE",
    "REPORTED SEX",
    "REPORT TYPE",
    "RARITY",
    "PLANT TYPE",
    "REPORTED HETEROZYGOSITY",
    "Y RATIO DISTRIBUTION",
];

/// Trailing metadata column holding the download links (link-collection mode only).
pub const FILES_FIELD: &str = "FILES";

pub const CANNABINOID_FIELDS: [&str; 6] = [
    "THC + THCA",
    "CBD + CBDA",
    "THCV + THCVA",
    "CBC + CBCA",
    "CBG + CBGA",
    "CBN + CBNA",
];

pub const TERPENOID_FIELDS: [&str; 21] = [
    "ALPHA-BISABOLOL",
    "BORNEOL",
    "CAMPHENE",
    "CARENE",
    "CARYOPHYLLENE OXIDE",
    "BETA-CARYOPHYLLENE",
    "FENCHOL",
    "GERANIOL",
    "ALPHA-HUMULENE",
    "LIMONENE",
    "LINALOOL",
    "MYRCENE",
    "ALPHA-PHELLANDRENE",
    "TERPINOLENE",
    "ALPHA-TERPINEOL",
    "ALPHA-TERPINENE",
    "GAMMA-TERPINENE",
    "TOTAL NEROLIDOL",
    "TOTAL OCIMENE",
    "ALPHA-PINENE",
    "BETA-PINENE",
];

pub const VARIANT_FIELDS: [&str; 10] = [
    "GENE",
    "HGVS_C",
    "HGVS_P",
    "ANNOTATION",
    "ANNOTATION IMPACT",
    "CONTIG",
    "CONTIG POS",
    "REF/ALT",
    "VAR FREQ NGS",
    "VAR FREQ C90",
];

/// General strain metadata. Optional page sections resolve to `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetadataRecord {
    pub name: String,
    pub ref_number: String,
    pub grower: String,
    pub accession_date: String,
    pub reported_sex: String,
    pub report_type: String,
    pub rarity: String,
    pub plant_type: String,
    pub reported_heterozygosity: String,
    pub y_ratio_distribution: String,
}

impl MetadataRecord {
    /// Values in `METADATA_FIELDS` order.
    pub fn values(&self) -> [&str; 10] {
        [
            &self.name,
            &self.ref_number,
            &self.grower,
            &self.accession_date,
            &self.reported_sex,
            &self.report_type,
            &self.rarity,
            &self.plant_type,
            &self.reported_heterozygosity,
            &self.y_ratio_distribution,
        ]
    }

    pub fn header(with_files: bool) -> Vec<&'static str> {
        let mut header = METADATA_FIELDS.to_vec();
        if with_files {
            header.push(FILES_FIELD);
        }
        header
    }

    /// CSV row; `links` becomes one trailing cell when present.
    pub fn to_row(&self, links: Option<&[String]>) -> anyhow::Result<Vec<String>> {
        let mut row: Vec<String> = self.values().iter().map(|v| v.to_string()).collect();
        if let Some(links) = links {
            row.push(serde_json::to_string(links)?);
        }
        Ok(row)
    }
}

/// One row of cannabinoid values followed by terpenoid values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChemicalRecord {
    pub values: Vec<String>,
}

impl ChemicalRecord {
    pub fn header() -> Vec<&'static str> {
        CANNABINOID_FIELDS
            .iter()
            .chain(TERPENOID_FIELDS.iter())
            .copied()
            .collect()
    }

    pub fn cannabinoids(&self) -> &[String] {
        &self.values[..CANNABINOID_FIELDS.len().min(self.values.len())]
    }

    pub fn terpenoids(&self) -> &[String] {
        &self.values[CANNABINOID_FIELDS.len().min(self.values.len())..]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VariantRecord {
    pub gene: String,
    pub hgvs_c: String,
    pub hgvs_p: String,
    pub annotation: String,
    pub annotation_impact: String,
    pub contig: String,
    pub contig_pos: String,
    pub ref_alt: String,
    pub var_freq_ngs: String,
    pub var_freq_c90: String,
}

impl VariantRecord {
    /// Values in `VARIANT_FIELDS` order.
    pub fn values(&self) -> [&str; 10] {
        [
            &self.gene,
            &self.hgvs_c,
            &self.hgvs_p,
            &self.annotation,
            &self.annotation_impact,
            &self.contig,
            &self.contig_pos,
            &self.ref_alt,
            &self.var_freq_ngs,
            &self.var_freq_c90,
        ]
    }
}

/// Everything extracted from one strain report page.
#[derive(Debug, Clone, Serialize)]
pub struct StrainReport {
    pub metadata: MetadataRecord,
    pub chemicals: ChemicalRecord,
    pub variants: Vec<VariantRecord>,
    /// Absolute download URLs, in page order.
    pub links: Vec<String>,
}
