//! Byte counts and length units.

use crate::error::PipekitError;
use std::fmt;
use std::str::FromStr;

const SIZE_NAMES: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Convert a pure byte count to the most concise binary unit.
///
/// Picks the unit that keeps the value small (1.1 GB, not 1100 MB) and
/// rounds to two decimals. Zero is `(0.0, "B")`.
pub fn human_size(size_bytes: u64) -> (f64, &'static str) {
    if size_bytes == 0 {
        return (0.0, "B");
    }
    let mut i = 0;
    let mut whole = size_bytes;
    while whole >= 1024 && i < SIZE_NAMES.len() - 1 {
        whole /= 1024;
        i += 1;
    }
    let scaled = size_bytes as f64 / 1024f64.powi(i as i32);
    ((scaled * 100.0).round() / 100.0, SIZE_NAMES[i])
}

/// A common length unit. Conversions hub through centimeters rather than
/// carrying a formula for every pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Mm,
    Cm,
    M,
    Km,
    In,
    Ft,
    Yd,
    Mi,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Mm => "mm",
            Unit::Cm => "cm",
            Unit::M => "m",
            Unit::Km => "km",
            Unit::In => "in",
            Unit::Ft => "ft",
            Unit::Yd => "yd",
            Unit::Mi => "mi",
        }
    }

    fn to_cm(self, value: f64) -> f64 {
        match self {
            Unit::Mm => value / 10.0,
            Unit::Cm => value,
            Unit::M => value * 100.0,
            Unit::Km => value * 100000.0,
            Unit::In => value * 2.54,
            Unit::Ft => value * 30.48,
            Unit::Yd => value * 91.44,
            Unit::Mi => value * 160900.0,
        }
    }

    fn from_cm(self, value: f64) -> f64 {
        match self {
            Unit::Mm => value * 10.0,
            Unit::Cm => value,
            Unit::M => value / 100.0,
            Unit::Km => value / 100000.0,
            Unit::In => value / 2.54,
            Unit::Ft => value / 30.48,
            Unit::Yd => value / 91.44,
            Unit::Mi => value / 160900.0,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = PipekitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mm" => Ok(Unit::Mm),
            "cm" => Ok(Unit::Cm),
            "m" => Ok(Unit::M),
            "km" => Ok(Unit::Km),
            "in" => Ok(Unit::In),
            "ft" => Ok(Unit::Ft),
            "yd" => Ok(Unit::Yd),
            "mi" => Ok(Unit::Mi),
            other => Err(PipekitError::UnsupportedUnit(other.to_string())),
        }
    }
}

/// A length tagged with its unit.
///
/// ```
/// use pipekit::size::{Length, Unit};
///
/// let mut scale = Length::new(Unit::Cm, 100.0);
/// scale.convert_to(Unit::M);
/// assert_eq!(scale.value, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: Unit,
}

impl Length {
    pub fn new(unit: Unit, value: f64) -> Self {
        Self { value, unit }
    }

    /// Convert in place to the given unit, returning the new value.
    pub fn convert_to(&mut self, unit: Unit) -> f64 {
        let cm = self.unit.to_cm(self.value);
        self.value = unit.from_cm(cm);
        self.unit = unit;
        self.value
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unit: {} - Length: {}", self.unit, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_size_zero() {
        assert_eq!(human_size(0), (0.0, "B"));
    }

    #[test]
    fn test_human_size_unit_boundaries() {
        assert_eq!(human_size(500), (500.0, "B"));
        assert_eq!(human_size(1024), (1.0, "KB"));
        assert_eq!(human_size(1024 * 1024), (1.0, "MB"));
        assert_eq!(human_size(1024u64.pow(3)), (1.0, "GB"));
        assert_eq!(human_size(1024u64.pow(4)), (1.0, "TB"));
    }

    #[test]
    fn test_human_size_rounds_to_two_decimals() {
        assert_eq!(human_size(1536), (1.5, "KB"));
        assert_eq!(human_size(1234567), (1.18, "MB"));
    }

    #[test]
    fn test_human_size_chooses_most_concise_unit() {
        let (value, unit) = human_size(1_100_000_000);
        assert_eq!(unit, "GB");
        assert!(value < 1024.0);
    }

    #[test]
    fn test_metric_conversions() {
        let mut scale = Length::new(Unit::Mm, 10.0);
        assert_eq!(scale.convert_to(Unit::Cm), 1.0);

        let mut scale = Length::new(Unit::Cm, 100.0);
        assert_eq!(scale.convert_to(Unit::M), 1.0);
        assert_eq!(scale.unit, Unit::M);

        let mut scale = Length::new(Unit::Km, 1.0);
        assert_eq!(scale.convert_to(Unit::Cm), 100000.0);
    }

    #[test]
    fn test_customary_conversions() {
        let mut scale = Length::new(Unit::In, 1.0);
        assert_eq!(scale.convert_to(Unit::Cm), 2.54);

        let mut scale = Length::new(Unit::Cm, 30.48);
        assert_eq!(scale.convert_to(Unit::Ft), 1.0);

        let mut scale = Length::new(Unit::Cm, 91.44);
        assert_eq!(scale.convert_to(Unit::Yd), 1.0);

        let mut scale = Length::new(Unit::Cm, 160900.0);
        assert_eq!(scale.convert_to(Unit::Mi), 1.0);
    }

    #[test]
    fn test_cross_system_conversions() {
        let mut scale = Length::new(Unit::M, 1.0);
        let feet = scale.convert_to(Unit::Ft);
        assert!((feet - 3.28).abs() < 0.01);

        let mut scale = Length::new(Unit::Km, 1.0);
        let miles = scale.convert_to(Unit::Mi);
        assert!((miles - 0.62).abs() < 0.01);

        let mut scale = Length::new(Unit::In, 1.0);
        assert_eq!(scale.convert_to(Unit::Mm), 25.4);
    }

    #[test]
    fn test_same_unit_is_identity() {
        let mut scale = Length::new(Unit::Cm, 100.0);
        assert_eq!(scale.convert_to(Unit::Cm), 100.0);
        assert_eq!(scale.unit, Unit::Cm);
    }

    #[test]
    fn test_sequential_conversions() {
        let mut scale = Length::new(Unit::M, 1.0);
        scale.convert_to(Unit::Cm);
        assert_eq!(scale.value, 100.0);
        scale.convert_to(Unit::Mm);
        assert_eq!(scale.value, 1000.0);
        scale.convert_to(Unit::M);
        assert_eq!(scale.value, 1.0);
    }

    #[test]
    fn test_zero_and_negative_lengths() {
        let mut scale = Length::new(Unit::M, 0.0);
        assert_eq!(scale.convert_to(Unit::Ft), 0.0);

        let mut scale = Length::new(Unit::M, -5.0);
        assert_eq!(scale.convert_to(Unit::Cm), -500.0);
    }

    #[test]
    fn test_display() {
        let scale = Length::new(Unit::Cm, 100.0);
        assert_eq!(scale.to_string(), "Unit: cm - Length: 100");
        assert_eq!(Unit::M.to_string(), "m");
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!("mm".parse::<Unit>().unwrap(), Unit::Mm);
        assert_eq!("mi".parse::<Unit>().unwrap(), Unit::Mi);
        assert!("furlong".parse::<Unit>().is_err());
    }
}
