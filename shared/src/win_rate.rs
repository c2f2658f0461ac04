use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

const NOT_APPLICABLE: &str = "NA";

/// Win rate as reported by the backend: a percentage in `0..=100`, or `"NA"`
/// when no games were recorded for the record.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WinRate {
    Numeric(f64),
    #[default]
    NotApplicable,
}

/// Display tone for win-rate badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Gray,
    Green,
    Orange,
}

impl BadgeTone {
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeTone::Gray => "gray",
            BadgeTone::Green => "green",
            BadgeTone::Orange => "orange",
        }
    }
}

impl WinRate {
    pub fn numeric(&self) -> Option<f64> {
        match *self {
            WinRate::Numeric(value) if value.is_finite() => Some(value),
            _ => None,
        }
    }

    /// Value used by comparators. `NotApplicable` and non-finite numbers sort as 0.
    pub fn sort_value(&self) -> f64 {
        self.numeric().unwrap_or(0.0)
    }

    /// Rounded percentage for badges, e.g. `48%`.
    pub fn label(&self) -> String {
        match self.numeric() {
            Some(value) => format!("{}%", value.round() as i64),
            None => NOT_APPLICABLE.to_string(),
        }
    }

    /// Percentage keeping one decimal when the backend sent one, e.g. `47.5%`.
    pub fn raw_label(&self) -> String {
        match self.numeric() {
            Some(value) if value.fract().abs() < f64::EPSILON => format!("{}%", value as i64),
            Some(value) => format!("{value:.1}%"),
            None => NOT_APPLICABLE.to_string(),
        }
    }

    pub fn tone(&self) -> BadgeTone {
        match self.numeric() {
            Some(value) if value >= 50.0 => BadgeTone::Green,
            Some(_) => BadgeTone::Orange,
            None => BadgeTone::Gray,
        }
    }
}

impl From<f64> for WinRate {
    fn from(value: f64) -> Self {
        WinRate::Numeric(value)
    }
}

impl Serialize for WinRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.numeric() {
            Some(value) => serializer.serialize_f64(value),
            None => serializer.serialize_str(NOT_APPLICABLE),
        }
    }
}

struct WinRateVisitor;

impl<'de> Visitor<'de> for WinRateVisitor {
    type Value = WinRate;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, a numeric string, \"NA\" or null")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<WinRate, E> {
        Ok(if value.is_finite() {
            WinRate::Numeric(value)
        } else {
            WinRate::NotApplicable
        })
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<WinRate, E> {
        Ok(WinRate::Numeric(value as f64))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<WinRate, E> {
        Ok(WinRate::Numeric(value as f64))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<WinRate, E> {
        let trimmed = value.trim().trim_end_matches('%');
        Ok(match trimmed.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => WinRate::Numeric(parsed),
            _ => WinRate::NotApplicable,
        })
    }

    fn visit_unit<E: de::Error>(self) -> Result<WinRate, E> {
        Ok(WinRate::NotApplicable)
    }

    fn visit_none<E: de::Error>(self) -> Result<WinRate, E> {
        Ok(WinRate::NotApplicable)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<WinRate, D::Error> {
        deserializer.deserialize_any(WinRateVisitor)
    }
}

impl<'de> Deserialize<'de> for WinRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(WinRateVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::{BadgeTone, WinRate};

    #[test]
    fn parses_numbers_and_sentinel() {
        let parsed: Vec<WinRate> =
            serde_json::from_str(r#"[52.5, 40, "NA", null, "47.5", "n/a"]"#).expect("parse");
        assert_eq!(
            parsed,
            vec![
                WinRate::Numeric(52.5),
                WinRate::Numeric(40.0),
                WinRate::NotApplicable,
                WinRate::NotApplicable,
                WinRate::Numeric(47.5),
                WinRate::NotApplicable,
            ]
        );
    }

    #[test]
    fn not_applicable_sorts_as_zero() {
        assert_eq!(WinRate::NotApplicable.sort_value(), 0.0);
        assert_eq!(WinRate::Numeric(f64::NAN).sort_value(), 0.0);
        assert_eq!(WinRate::Numeric(61.0).sort_value(), 61.0);
    }

    #[test]
    fn labels_and_tones() {
        assert_eq!(WinRate::Numeric(49.6).label(), "50%");
        assert_eq!(WinRate::Numeric(47.5).raw_label(), "47.5%");
        assert_eq!(WinRate::Numeric(50.0).raw_label(), "50%");
        assert_eq!(WinRate::NotApplicable.label(), "NA");

        assert_eq!(WinRate::Numeric(50.0).tone(), BadgeTone::Green);
        assert_eq!(WinRate::Numeric(49.9).tone(), BadgeTone::Orange);
        assert_eq!(WinRate::NotApplicable.tone(), BadgeTone::Gray);
    }

    #[test]
    fn serializes_back_to_wire_shape() {
        let json = serde_json::to_string(&vec![WinRate::Numeric(12.5), WinRate::NotApplicable])
            .expect("serialize");
        assert_eq!(json, r#"[12.5,"NA"]"#);
    }
}
