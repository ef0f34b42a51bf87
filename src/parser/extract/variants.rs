use anyhow::{Context, Result};
use scraper::ElementRef;

use crate::parser::dom;
use crate::records::VariantRecord;

const VARIANT_ROW: &str = ".-js.Variants--row";

pub fn extract(root: ElementRef<'_>) -> Result<Vec<VariantRecord>> {
    dom::all(root, VARIANT_ROW)?
        .into_iter()
        .enumerate()
        .map(|(i, row)| extract_row(row).with_context(|| format!("Malformed variant row {}", i)))
        .collect()
}

fn extract_row(row: ElementRef<'_>) -> Result<VariantRecord> {
    let field = |key: &str| -> Result<String> {
        let css = format!(r#"[data-field="{}"]"#, key);
        Ok(dom::text(dom::require(row, &css, key)?))
    };

    let (var_freq_ngs, var_freq_c90) = var_freq(row)?;

    Ok(VariantRecord {
        gene: dom::first_token(&field("gene")?),
        hgvs_c: field("hgvsc")?,
        hgvs_p: field("hgvsp")?,
        annotation: field("annotation")?,
        annotation_impact: field("annotation_impact")?,
        contig: field("contig")?,
        contig_pos: dom::first_token(&field("contig_pos")?),
        ref_alt: field("ref_alt")?,
        var_freq_ngs,
        var_freq_c90,
    })
}

/// The two frequency values nested in the `var_freq` cell, by fixed index.
fn var_freq(row: ElementRef<'_>) -> Result<(String, String)> {
    let cell = dom::require(row, r#"[data-field="var_freq"]"#, "var_freq")?;
    let entries = dom::all(cell, "dd")?;
    match entries.as_slice() {
        [ngs, c90, ..] => Ok((dom::text(*ngs), dom::text(*c90))),
        _ => anyhow::bail!("var_freq has {} entries, expected 2", entries.len()),
    }
}
