use std::fs;
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::warn;

use crate::catalog::{CategoryNode, TypeNode};
use crate::constants::ingestion::{
    CATEGORY_DISTILLED, CATEGORY_FERMENTED, DISTILLED_TYPES, FERMENTED_TYPES,
    GENERAL_KEYWORDS_KEY,
};
use crate::errors::ProbeError;
use crate::types::{Keyword, TypeLabel};

/// Keyword table keyed by category name, then type name.
///
/// The [`GENERAL_KEYWORDS_KEY`] entry of a category holds its general
/// keywords; every other entry maps a type label to its keyword list.
pub type KeywordTable = IndexMap<String, IndexMap<String, Vec<Keyword>>>;

/// One brand listing row (`Brand,Type` columns).
#[derive(Debug, Deserialize)]
struct BrandRow {
    #[serde(rename = "Brand")]
    brand: String,
    #[serde(rename = "Type")]
    alcohol_type: TypeLabel,
}

/// Resolve the category a type label belongs to.
///
/// Returns `None` for labels outside the known distilled/fermented sets.
pub fn category_for_type(alcohol_type: &str) -> Option<&'static str> {
    let lowered = alcohol_type.to_lowercase();
    if DISTILLED_TYPES.contains(&lowered.as_str()) {
        Some(CATEGORY_DISTILLED)
    } else if FERMENTED_TYPES.contains(&lowered.as_str()) {
        Some(CATEGORY_FERMENTED)
    } else {
        None
    }
}

/// Load a keyword table from a JSON file.
pub fn load_keyword_table(path: &Path) -> Result<KeywordTable, ProbeError> {
    let raw = fs::read_to_string(path).map_err(|err| {
        ProbeError::Catalog(format!(
            "failed reading keyword table {}: {err}",
            path.display()
        ))
    })?;
    serde_json::from_str(&raw)
        .map_err(|err| ProbeError::Catalog(format!("failed parsing keyword table JSON: {err}")))
}

/// Build a taxonomy catalog from a CSV brand listing file.
pub fn build_catalog_from_csv(
    csv_path: &Path,
    keywords: &KeywordTable,
) -> Result<Vec<CategoryNode>, ProbeError> {
    let file = fs::File::open(csv_path).map_err(|err| {
        ProbeError::Catalog(format!(
            "failed opening brand listing {}: {err}",
            csv_path.display()
        ))
    })?;
    build_catalog(file, keywords)
}

/// Build a taxonomy catalog from CSV brand-listing rows.
///
/// Rows with a missing brand or type are skipped with a warning, as are
/// rows whose type maps to no known category. Types appear in first-seen
/// order under a fixed `distilled`, `fermented` category order; brands keep
/// listing order under their type.
pub fn build_catalog<R: Read>(
    reader: R,
    keywords: &KeywordTable,
) -> Result<Vec<CategoryNode>, ProbeError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut types_by_category: IndexMap<&'static str, IndexMap<TypeLabel, TypeNode>> =
        IndexMap::new();
    types_by_category.insert(CATEGORY_DISTILLED, IndexMap::new());
    types_by_category.insert(CATEGORY_FERMENTED, IndexMap::new());

    for row in csv_reader.deserialize::<BrandRow>() {
        let row = row.map_err(|err| {
            ProbeError::Catalog(format!("failed reading brand listing row: {err}"))
        })?;
        if row.brand.trim().is_empty() || row.alcohol_type.trim().is_empty() {
            warn!("[brandprobe:ingest] skipping row with missing brand or type");
            continue;
        }
        let Some(category) = category_for_type(&row.alcohol_type) else {
            warn!(
                "[brandprobe:ingest] unknown alcohol type '{}' for brand '{}'",
                row.alcohol_type, row.brand
            );
            continue;
        };

        let type_name = row.alcohol_type.to_lowercase();
        let types = types_by_category
            .entry(category)
            .or_default();
        let node = types.entry(type_name.clone()).or_insert_with(|| TypeNode {
            name: type_name.clone(),
            keywords: type_keywords(keywords, category, &type_name),
            brands: Vec::new(),
        });
        node.brands.push(row.brand);
    }

    Ok(types_by_category
        .into_iter()
        .map(|(category, types)| CategoryNode {
            name: category.to_string(),
            keywords: type_keywords(keywords, category, GENERAL_KEYWORDS_KEY),
            children: types.into_values().collect(),
        })
        .collect())
}

fn type_keywords(keywords: &KeywordTable, category: &str, type_name: &str) -> Vec<Keyword> {
    keywords
        .get(category)
        .and_then(|table| table.get(type_name))
        .cloned()
        .unwrap_or_default()
}
