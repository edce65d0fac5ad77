//! Stratigraphy definitions and the ordered marker white-list

use super::DatabaseError;
use crate::acquisition::{self, AcquisitionError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Code for "no stratigraphic unit".
pub const NONE_CODE: &str = "NONE";

/// Code of the reference level; always first in the order.
pub const REFERENCE_CODE: &str = "REF";

const BUILT_IN_DEFINITIONS: [(&str, &str); 6] = [
    (NONE_CODE, "None"),
    (REFERENCE_CODE, "Reference Level"),
    ("TERT", "Tertiary"),
    ("CRET", "Cretaceous"),
    ("JUR", "Jurassic"),
    ("TRIA", "Triassic"),
];

const BUILT_IN_ORDER: [&str; 5] = [REFERENCE_CODE, "TERT", "CRET", "JUR", "TRIA"];

/// Stratigraphic unit codes with descriptions, plus the ordered list of codes
/// (youngest first) that markers are matched against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StratigraphyTable {
    definitions: BTreeMap<String, String>,
    order: Vec<String>,
}

impl Default for StratigraphyTable {
    fn default() -> Self {
        Self {
            definitions: BUILT_IN_DEFINITIONS
                .iter()
                .map(|(code, desc)| (code.to_string(), desc.to_string()))
                .collect(),
            order: BUILT_IN_ORDER.iter().map(|code| code.to_string()).collect(),
        }
    }
}

impl StratigraphyTable {
    /// Replace the definitions. `NONE` and `REF` are always present.
    pub fn with_definitions<I>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.definitions = BUILT_IN_DEFINITIONS[..2]
            .iter()
            .map(|(code, desc)| (code.to_string(), desc.to_string()))
            .collect();
        self.definitions.extend(rows);
        self
    }

    /// Replace the order. `REF` is always first and duplicates are dropped.
    pub fn with_order<I>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut order = vec![REFERENCE_CODE.to_string()];
        for code in codes {
            if !order.contains(&code) {
                order.push(code);
            }
        }
        self.order = order;
        self
    }

    /// Built-in table, optionally overridden from definition and order files.
    pub fn load(definition_file: Option<&Path>, order_file: Option<&Path>) -> Result<Self, AcquisitionError> {
        let mut table = Self::default();
        if let Some(path) = definition_file {
            let rows = acquisition::read_stratigraphy_definitions(path)?;
            info!(path = %path.display(), units = rows.len(), "Stratigraphy definitions loaded");
            table = table.with_definitions(rows);
        }
        if let Some(path) = order_file {
            let codes = acquisition::read_stratigraphy_order(path)?;
            info!(path = %path.display(), units = codes.len(), "Stratigraphy order loaded");
            table = table.with_order(codes);
        }
        for code in table.undefined_in_order() {
            warn!(code = %code, "Stratigraphy order lists a code without a definition");
        }
        Ok(table)
    }

    pub fn description(&self, code: &str) -> Result<&str, DatabaseError> {
        self.definitions
            .get(code)
            .map(String::as_str)
            .ok_or_else(|| DatabaseError::UnknownStratigraphy(code.to_string()))
    }

    pub fn is_defined(&self, code: &str) -> bool {
        self.definitions.contains_key(code)
    }

    /// Codes in stratigraphic order.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Whether markers with this code are kept.
    pub fn is_selected(&self, code: &str) -> bool {
        self.order.iter().any(|c| c == code)
    }

    /// Codes in the order that have no definition.
    pub fn undefined_in_order(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter(|code| !self.definitions.contains_key(code.as_str()))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let table = StratigraphyTable::default();
        assert_eq!(table.order(), ["REF", "TERT", "CRET", "JUR", "TRIA"]);
        assert_eq!(table.description("JUR").unwrap(), "Jurassic");
        assert_eq!(table.description(NONE_CODE).unwrap(), "None");
        assert!(!table.is_selected(NONE_CODE));
        assert!(table.undefined_in_order().is_empty());
    }

    #[test]
    fn test_unknown_code_is_error() {
        let table = StratigraphyTable::default();
        assert!(matches!(
            table.description("PERM"),
            Err(DatabaseError::UnknownStratigraphy(code)) if code == "PERM"
        ));
    }

    #[test]
    fn test_definitions_keep_none_and_ref() {
        let table = StratigraphyTable::default()
            .with_definitions(vec![("PERM".to_string(), "Permian".to_string())]);
        assert!(table.is_defined(NONE_CODE));
        assert!(table.is_defined(REFERENCE_CODE));
        assert!(table.is_defined("PERM"));
        assert!(!table.is_defined("TERT"));
        // Order untouched, so TERT..TRIA are now undefined
        assert_eq!(table.undefined_in_order(), vec!["TERT", "CRET", "JUR", "TRIA"]);
    }

    #[test]
    fn test_order_ref_first_without_duplicates() {
        let codes = ["JUR", "REF", "TRIA", "JUR"].map(String::from);
        let table = StratigraphyTable::default().with_order(codes);
        assert_eq!(table.order(), ["REF", "JUR", "TRIA"]);
        assert!(!table.is_selected("TERT"));
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let def = dir.path().join("def.txt");
        let order = dir.path().join("order.txt");
        std::fs::write(&def, "IDX,CODE,NAME\n0,PAL,Paleogene\n1,NEO,Neogene\n").unwrap();
        std::fs::write(&order, "IDX,CODE\n0,NEO\n1,PAL\n").unwrap();
        let table = StratigraphyTable::load(Some(&def), Some(&order)).unwrap();
        assert_eq!(table.order(), ["REF", "NEO", "PAL"]);
        assert_eq!(table.description("PAL").unwrap(), "Paleogene");
    }

    #[test]
    fn test_load_without_files_is_default() {
        assert_eq!(StratigraphyTable::load(None, None).unwrap(), StratigraphyTable::default());
    }
}
