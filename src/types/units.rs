//! Length units for depth (vertical) and surface (horizontal) coordinates

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Metres per international foot.
pub const FOOT_IN_METRES: f64 = 0.3048;

/// One of the two supported length units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "ft")]
    Foot,
    #[serde(rename = "m")]
    Metre,
}

impl LengthUnit {
    /// Short label used in report headers ("ft" / "m").
    pub fn label(self) -> &'static str {
        match self {
            LengthUnit::Foot => "ft",
            LengthUnit::Metre => "m",
        }
    }

    /// Factor applied to horizontal increments computed in `depth` units so
    /// they come out in `surface` units.
    ///
    /// - equal units: 1.0
    /// - ft depth, m surface: 0.3048
    /// - m depth, ft surface: 1 / 0.3048
    pub fn horizontal_scale(depth: LengthUnit, surface: LengthUnit) -> f64 {
        match (depth, surface) {
            (LengthUnit::Foot, LengthUnit::Metre) => FOOT_IN_METRES,
            (LengthUnit::Metre, LengthUnit::Foot) => 1.0 / FOOT_IN_METRES,
            _ => 1.0,
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ft" | "feet" | "foot" => Ok(LengthUnit::Foot),
            "m" | "metre" | "meter" | "metres" | "meters" => Ok(LengthUnit::Metre),
            other => Err(format!("unsupported length unit '{other}' (expected 'ft' or 'm')")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_scale_matching_units() {
        assert_eq!(LengthUnit::horizontal_scale(LengthUnit::Foot, LengthUnit::Foot), 1.0);
        assert_eq!(LengthUnit::horizontal_scale(LengthUnit::Metre, LengthUnit::Metre), 1.0);
    }

    #[test]
    fn test_horizontal_scale_mixed_units() {
        let ft_to_m = LengthUnit::horizontal_scale(LengthUnit::Foot, LengthUnit::Metre);
        let m_to_ft = LengthUnit::horizontal_scale(LengthUnit::Metre, LengthUnit::Foot);
        assert!((ft_to_m - 0.3048).abs() < 1e-12);
        assert!((ft_to_m * m_to_ft - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_unit_labels() {
        assert_eq!("ft".parse::<LengthUnit>(), Ok(LengthUnit::Foot));
        assert_eq!(" M ".parse::<LengthUnit>(), Ok(LengthUnit::Metre));
        assert!("yd".parse::<LengthUnit>().is_err());
    }
}
