//! Diamond Attributes
//!
//! Closed enumerations for the categorical grades plus the fixed-order
//! feature vector the regression model consumes. The ordinal codes must
//! match the training-time encoding exactly; the encoder fails closed on
//! any grade outside its enumeration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{AdvisorError, Result};

/// Cut grade, ordered worst to best
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cut {
    Fair,
    Good,
    #[serde(rename = "Very Good")]
    VeryGood,
    Premium,
    Ideal,
}

impl Cut {
    pub const ALL: [Cut; 5] = [Cut::Fair, Cut::Good, Cut::VeryGood, Cut::Premium, Cut::Ideal];

    /// Training-time ordinal code (Fair=0 ... Ideal=4)
    pub const fn code(self) -> u8 {
        match self {
            Cut::Fair => 0,
            Cut::Good => 1,
            Cut::VeryGood => 2,
            Cut::Premium => 3,
            Cut::Ideal => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Cut::Fair => "Fair",
            Cut::Good => "Good",
            Cut::VeryGood => "Very Good",
            Cut::Premium => "Premium",
            Cut::Ideal => "Ideal",
        }
    }
}

impl FromStr for Cut {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Fair" => Ok(Cut::Fair),
            "Good" => Ok(Cut::Good),
            "Very Good" => Ok(Cut::VeryGood),
            "Premium" => Ok(Cut::Premium),
            "Ideal" => Ok(Cut::Ideal),
            _ => Err(AdvisorError::InvalidGrade {
                field: "cut",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Cut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Color grade D (colorless) through J (noticeable warmth).
///
/// Codes run in reverse-alphabetical rarity order: J=0 ... D=6.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    D,
    E,
    F,
    G,
    H,
    I,
    J,
}

impl Color {
    pub const ALL: [Color; 7] = [
        Color::J,
        Color::I,
        Color::H,
        Color::G,
        Color::F,
        Color::E,
        Color::D,
    ];

    /// Training-time ordinal code (J=0 ... D=6)
    pub const fn code(self) -> u8 {
        match self {
            Color::J => 0,
            Color::I => 1,
            Color::H => 2,
            Color::G => 3,
            Color::F => 4,
            Color::E => 5,
            Color::D => 6,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Color::D => "D",
            Color::E => "E",
            Color::F => "F",
            Color::G => "G",
            Color::H => "H",
            Color::I => "I",
            Color::J => "J",
        }
    }
}

impl FromStr for Color {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "D" => Ok(Color::D),
            "E" => Ok(Color::E),
            "F" => Ok(Color::F),
            "G" => Ok(Color::G),
            "H" => Ok(Color::H),
            "I" => Ok(Color::I),
            "J" => Ok(Color::J),
            _ => Err(AdvisorError::InvalidGrade {
                field: "color",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Clarity grade, ordered most to least included (I1=0 ... IF=7)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum Clarity {
    I1,
    SI2,
    SI1,
    VS2,
    VS1,
    VVS2,
    VVS1,
    IF,
}

impl Clarity {
    pub const ALL: [Clarity; 8] = [
        Clarity::I1,
        Clarity::SI2,
        Clarity::SI1,
        Clarity::VS2,
        Clarity::VS1,
        Clarity::VVS2,
        Clarity::VVS1,
        Clarity::IF,
    ];

    /// Training-time ordinal code (I1=0 ... IF=7)
    pub const fn code(self) -> u8 {
        match self {
            Clarity::I1 => 0,
            Clarity::SI2 => 1,
            Clarity::SI1 => 2,
            Clarity::VS2 => 3,
            Clarity::VS1 => 4,
            Clarity::VVS2 => 5,
            Clarity::VVS1 => 6,
            Clarity::IF => 7,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Clarity::I1 => "I1",
            Clarity::SI2 => "SI2",
            Clarity::SI1 => "SI1",
            Clarity::VS2 => "VS2",
            Clarity::VS1 => "VS1",
            Clarity::VVS2 => "VVS2",
            Clarity::VVS1 => "VVS1",
            Clarity::IF => "IF",
        }
    }
}

impl FromStr for Clarity {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "I1" => Ok(Clarity::I1),
            "SI2" => Ok(Clarity::SI2),
            "SI1" => Ok(Clarity::SI1),
            "VS2" => Ok(Clarity::VS2),
            "VS1" => Ok(Clarity::VS1),
            "VVS2" => Ok(Clarity::VVS2),
            "VVS1" => Ok(Clarity::VVS1),
            "IF" => Ok(Clarity::IF),
            _ => Err(AdvisorError::InvalidGrade {
                field: "clarity",
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Clarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Input bounds enforced by the interactive surface
pub const CARAT_RANGE: (f64, f64) = (0.1, 10.0);
pub const DEPTH_RANGE: (f64, f64) = (45.0, 75.0);
pub const TABLE_RANGE: (f64, f64) = (45.0, 75.0);
pub const DIMENSION_RANGE: (f64, f64) = (0.1, 30.0);

/// Physical and quality attributes of a diamond
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DiamondAttributes {
    /// Weight in carats
    pub carat: f64,
    pub cut: Cut,
    pub color: Color,
    pub clarity: Clarity,
    /// Depth percentage
    #[serde(rename = "depth")]
    pub depth_pct: f64,
    /// Table percentage
    #[serde(rename = "table")]
    pub table_pct: f64,
    /// Length in millimeters
    pub x: f64,
    /// Width in millimeters
    pub y: f64,
    /// Height in millimeters
    pub z: f64,
}

fn check_range(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(AdvisorError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

impl DiamondAttributes {
    /// Check every numeric field against its documented bounds
    pub fn validate(&self) -> Result<()> {
        check_range("carat", self.carat, CARAT_RANGE)?;
        check_range("depth", self.depth_pct, DEPTH_RANGE)?;
        check_range("table", self.table_pct, TABLE_RANGE)?;
        check_range("x", self.x, DIMENSION_RANGE)?;
        check_range("y", self.y, DIMENSION_RANGE)?;
        check_range("z", self.z, DIMENSION_RANGE)?;
        Ok(())
    }

    /// Encode into the model's feature vector. Validates ranges first.
    pub fn encode(&self) -> Result<FeatureVector> {
        self.validate()?;
        Ok(FeatureVector([
            self.carat,
            f64::from(self.cut.code()),
            f64::from(self.color.code()),
            f64::from(self.clarity.code()),
            self.depth_pct,
            self.table_pct,
            self.x,
            self.y,
            self.z,
        ]))
    }
}

/// Feature column names, in training order. The artifact's schema is
/// checked against this list at load time.
pub const FEATURE_NAMES: [&str; 9] = [
    "carat", "cut", "color", "clarity", "depth", "table", "x", "y", "z",
];

/// Fixed-order 9-element feature vector.
///
/// Column order must exactly match the order used when the model was
/// trained; the model is order-sensitive and otherwise schema-less.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureVector(pub(crate) [f64; 9]);

impl FeatureVector {
    pub fn as_array(&self) -> &[f64; 9] {
        &self.0
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_codes() {
        assert_eq!(Cut::Fair.code(), 0);
        assert_eq!(Cut::Ideal.code(), 4);
        assert_eq!(Color::J.code(), 0);
        assert_eq!(Color::D.code(), 6);
        assert_eq!(Clarity::I1.code(), 0);
        assert_eq!(Clarity::IF.code(), 7);
    }

    #[test]
    fn test_codes_are_rank_ordered() {
        for pair in Cut::ALL.windows(2) {
            assert!(pair[0].code() < pair[1].code());
        }
        for pair in Color::ALL.windows(2) {
            assert!(pair[0].code() < pair[1].code());
        }
        for pair in Clarity::ALL.windows(2) {
            assert!(pair[0].code() < pair[1].code());
        }
    }

    #[test]
    fn test_parse_fails_closed() {
        assert!(matches!(
            "Excellent".parse::<Cut>(),
            Err(AdvisorError::InvalidGrade { field: "cut", .. })
        ));
        assert!(matches!(
            "Z".parse::<Color>(),
            Err(AdvisorError::InvalidGrade { field: "color", .. })
        ));
        assert!(matches!(
            "FL".parse::<Clarity>(),
            Err(AdvisorError::InvalidGrade { field: "clarity", .. })
        ));
    }

    #[test]
    fn test_label_roundtrip() {
        for cut in Cut::ALL {
            assert_eq!(cut.label().parse::<Cut>().unwrap(), cut);
        }
        assert_eq!("Very Good".parse::<Cut>().unwrap(), Cut::VeryGood);
    }

    #[test]
    fn test_encode_reference_vector() {
        let attrs = DiamondAttributes {
            carat: 1.0,
            cut: Cut::Ideal,
            color: Color::G,
            clarity: Clarity::VS1,
            depth_pct: 61.5,
            table_pct: 57.0,
            x: 6.0,
            y: 6.0,
            z: 4.0,
        };

        let features = attrs.encode().unwrap();
        assert_eq!(
            features.as_array(),
            &[1.0, 4.0, 3.0, 4.0, 61.5, 57.0, 6.0, 6.0, 4.0]
        );
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut attrs = DiamondAttributes {
            carat: 1.0,
            cut: Cut::Good,
            color: Color::E,
            clarity: Clarity::SI1,
            depth_pct: 61.5,
            table_pct: 57.0,
            x: 6.0,
            y: 6.0,
            z: 4.0,
        };
        assert!(attrs.encode().is_ok());

        attrs.carat = 12.0;
        assert!(matches!(
            attrs.encode(),
            Err(AdvisorError::OutOfRange { field: "carat", .. })
        ));

        attrs.carat = 1.0;
        attrs.depth_pct = 30.0;
        assert!(matches!(
            attrs.encode(),
            Err(AdvisorError::OutOfRange { field: "depth", .. })
        ));
    }
}
