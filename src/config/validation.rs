//! Config validation: unknown-key detection with Levenshtein suggestions
//! and range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use super::defaults;
use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, ", did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for ToolConfig.
///
/// Maintained by hand to match the struct hierarchy in tool_config.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        "data_dir",
        // [units]
        "units",
        "units.depth_unit",
        "units.surface_unit",
        // [survey]
        "survey",
        "survey.interval",
        "survey.mode",
        "survey.relative_coords",
        "survey.origin",
        "survey.header_lines",
        "survey.columns",
        // [wells]
        "wells",
        "wells.file",
        "wells.header_lines",
        "wells.columns",
        // [markers]
        "markers",
        "markers.file",
        "markers.header_lines",
        "markers.columns",
        // [stratigraphy]
        "stratigraphy",
        "stratigraphy.definition_file",
        "stratigraphy.order_file",
        // [output]
        "output",
        "output.dir",
        "output.format",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties are broken alphabetically so the suggestion is stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|k| (levenshtein(unknown, k), *k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

fn check_columns(name: &str, columns: &[usize], allowed: &[usize], errors: &mut Vec<String>) {
    if !allowed.contains(&columns.len()) {
        errors.push(format!(
            "{name} has {} entries, expected {}",
            columns.len(),
            allowed
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(" or ")
        ));
    }
}

/// Validate ranges and column layouts on a parsed ToolConfig.
///
/// Returns (errors, warnings). Errors are values the tool cannot run with;
/// warnings are suspicious but not fatal.
pub fn validate_ranges(config: &super::ToolConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let interval = config.survey.interval;
    if !interval.is_finite() || interval < defaults::MIN_INTERVAL {
        errors.push(format!(
            "survey.interval = {interval} must be a finite number >= {}",
            defaults::MIN_INTERVAL
        ));
    } else if interval > defaults::COARSE_INTERVAL_WARNING {
        warnings.push(ValidationWarning {
            field: "survey.interval".to_string(),
            message: format!(
                "survey.interval = {interval:.1} is coarser than {:.0}, resampled curves will be sparse",
                defaults::COARSE_INTERVAL_WARNING
            ),
            suggestion: None,
        });
    }

    if config.survey.origin.iter().any(|v| !v.is_finite()) {
        errors.push(format!(
            "survey.origin = {:?} must contain finite numbers",
            config.survey.origin
        ));
    }

    check_columns("survey.columns", &config.survey.columns, &[3], &mut errors);
    check_columns("wells.columns", &config.wells.columns, &[5], &mut errors);
    check_columns("markers.columns", &config.markers.columns, &[3, 5], &mut errors);

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolConfig;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("interval", "interval"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("intervall", "interval"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            data_dir = "data"
            [survey]
            interval = 25.0
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"data_dir".to_string()));
        assert!(keys.contains(&"survey".to_string()));
        assert!(keys.contains(&"survey.interval".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let toml_str = r#"
[survey]
intervall = 25.0
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "survey.intervall");
        assert_eq!(warnings[0].suggestion.as_deref(), Some("survey.interval"));
        assert!(warnings[0].to_string().contains("did you mean 'survey.interval'"));
    }

    #[test]
    fn test_all_valid_keys_produce_zero_warnings() {
        let toml_str = r#"
data_dir = "data"

[units]
depth_unit = "m"
surface_unit = "m"

[survey]
mode = "cartesian"
origin = [0.0, 0.0, 30.0]

[stratigraphy]
order_file = "order.txt"

[output]
format = "json"
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert!(warnings.is_empty(), "Expected 0 warnings, got: {:?}", warnings);
    }

    #[test]
    fn test_unknown_section_produces_warning() {
        let warnings = validate_unknown_keys("[plotting]\ncolour = \"red\"\n");
        assert!(warnings.iter().any(|w| w.field == "plotting"));
        assert!(warnings.iter().any(|w| w.field == "plotting.colour"));
    }

    #[test]
    fn test_suggest_correction_no_match_for_garbage() {
        let known = known_config_keys();
        assert!(suggest_correction("completely_unrelated_garbage_key_xyz", &known).is_none());
    }

    #[test]
    fn test_default_serialization_uses_known_keys() {
        let text = ToolConfig::default().to_toml().unwrap();
        let warnings = validate_unknown_keys(&text);
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn test_ranges_defaults_clean() {
        let (errors, warnings) = validate_ranges(&ToolConfig::default());
        assert!(errors.is_empty(), "Defaults should produce no errors: {:?}", errors);
        assert!(warnings.is_empty(), "Defaults should produce no warnings: {:?}", warnings);
    }

    #[test]
    fn test_interval_lower_bound_inclusive() {
        let mut config = ToolConfig::default();
        config.survey.interval = 0.1;
        assert!(validate_ranges(&config).0.is_empty());
        config.survey.interval = 0.0999;
        assert!(validate_ranges(&config).0[0].contains("survey.interval"));
    }

    #[test]
    fn test_coarse_interval_warns() {
        let mut config = ToolConfig::default();
        config.survey.interval = 5000.0;
        let (errors, warnings) = validate_ranges(&config);
        assert!(errors.is_empty());
        assert_eq!(warnings[0].field, "survey.interval");
    }

    #[test]
    fn test_non_finite_origin() {
        let mut config = ToolConfig::default();
        config.survey.origin = [0.0, f64::INFINITY, 0.0];
        let (errors, _) = validate_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("survey.origin")));
    }

    #[test]
    fn test_marker_columns_three_or_five() {
        let mut config = ToolConfig::default();
        config.markers.columns = vec![0, 1, 2];
        assert!(validate_ranges(&config).0.is_empty());
        config.markers.columns = vec![0, 1];
        let (errors, _) = validate_ranges(&config);
        assert!(errors[0].contains("expected 3 or 5"));
    }
}
