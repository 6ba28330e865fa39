use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ProbeError;
use crate::types::{BrandName, Keyword, NodeName};

/// Mid-level taxonomy node carrying leaf brand names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeNode {
    /// Node name, e.g. `gin`.
    pub name: NodeName,
    /// Type-specific keywords inherited by every brand below this node.
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    /// Leaf brand names in catalog-declared order.
    #[serde(default)]
    pub brands: Vec<BrandName>,
}

/// Top-level taxonomy grouping with general keywords.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    /// Category name, e.g. `distilled`.
    pub name: NodeName,
    /// General keywords applied below this category.
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    /// Child type nodes in catalog-declared order.
    #[serde(default)]
    pub children: Vec<TypeNode>,
}

/// Load an ordered category list from a JSON catalog file.
///
/// The tree is read once and treated as immutable for the run; failures here
/// are fatal and abort before traversal starts.
pub fn load_catalog(path: &Path) -> Result<Vec<CategoryNode>, ProbeError> {
    let raw = fs::read_to_string(path).map_err(|err| {
        ProbeError::Catalog(format!("failed reading catalog {}: {err}", path.display()))
    })?;
    parse_catalog(&raw)
}

/// Parse a catalog document from raw JSON.
pub fn parse_catalog(raw: &str) -> Result<Vec<CategoryNode>, ProbeError> {
    serde_json::from_str(raw)
        .map_err(|err| ProbeError::Catalog(format!("failed parsing catalog JSON: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_catalog_reads_two_level_taxonomy() {
        let raw = r#"[
            {
                "name": "distilled",
                "keywords": ["alcohol"],
                "children": [
                    {"name": "gin", "keywords": ["juniper"], "brands": ["Bombay Sapphire"]}
                ]
            }
        ]"#;
        let catalog = parse_catalog(raw).expect("catalog");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].name, "distilled");
        assert_eq!(catalog[0].children[0].brands, vec!["Bombay Sapphire"]);
    }

    #[test]
    fn parse_catalog_defaults_missing_lists() {
        let raw = r#"[{"name": "fermented"}]"#;
        let catalog = parse_catalog(raw).expect("catalog");
        assert!(catalog[0].keywords.is_empty());
        assert!(catalog[0].children.is_empty());
    }

    #[test]
    fn parse_catalog_rejects_malformed_input() {
        let err = parse_catalog("{not json").expect_err("must fail");
        assert!(matches!(err, ProbeError::Catalog(_)));
        assert!(!err.is_probe_failure());
    }
}
