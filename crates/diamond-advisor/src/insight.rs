//! Insight Generator
//!
//! Qualitative, human-readable notes derived from the categorical grades
//! plus a range-based rule for carat weight. Lookups take the display
//! label and fall back to an empty string for anything unrecognized;
//! insight generation never fails.

use serde::{Deserialize, Serialize};

use crate::attributes::DiamondAttributes;

/// Insight text for a cut grade, or `""` if the label is unrecognized
pub fn cut_insight(label: &str) -> &'static str {
    match label {
        "Fair" => {
            "A fair cut reflects less light, resulting in less brilliance. While economical, \
             this cut doesn't showcase a diamond's potential sparkle."
        }
        "Good" => {
            "Good cuts offer decent brilliance at a reasonable price point, making them \
             suitable for budget-conscious buyers who still want quality."
        }
        "Very Good" => {
            "Very Good cuts provide excellent brilliance and fire. They're an excellent value, \
             offering nearly the same visual appeal as Ideal cuts at a lower price."
        }
        "Premium" => {
            "Premium cuts display exceptional brilliance and fire. They're precision-cut to \
             maximize light reflection, though sometimes with slightly deeper proportions."
        }
        "Ideal" => {
            "Ideal cuts represent the pinnacle of diamond cutting, with perfect proportions to \
             maximize brilliance and fire. They reflect nearly all light that enters the diamond."
        }
        _ => "",
    }
}

/// Insight text for a color grade, or `""` if the label is unrecognized
pub fn color_insight(label: &str) -> &'static str {
    match label {
        "D" => "Completely colorless and extremely rare. The highest color grade available.",
        "E" => {
            "Colorless, but slightly less rare than D. Differences are not visible to the \
             untrained eye."
        }
        "F" => {
            "Colorless, but detectable by gemologists. Still considered colorless to the \
             naked eye."
        }
        "G" => "Near-colorless with slight traces of color, visible only to expert gemologists.",
        "H" => "Near-colorless with minimal color visible under magnification.",
        "I" => "Near-colorless with slight warmth that may be visible in larger diamonds.",
        "J" => "Near-colorless with noticeable warmth that provides good value.",
        _ => "",
    }
}

/// Insight text for a clarity grade, or `""` if the label is unrecognized
pub fn clarity_insight(label: &str) -> &'static str {
    match label {
        "IF" => "Internally Flawless: No internal inclusions visible under 10x magnification.",
        "VVS1" => {
            "Very, Very Slightly Included 1: Contains minute inclusions difficult for expert \
             gemologists to see."
        }
        "VVS2" => {
            "Very, Very Slightly Included 2: Contains minute inclusions slightly easier to see \
             than VVS1."
        }
        "VS1" => {
            "Very Slightly Included 1: Contains minor inclusions difficult to see under 10x \
             magnification."
        }
        "VS2" => {
            "Very Slightly Included 2: Contains minor inclusions visible under 10x magnification."
        }
        "SI1" => {
            "Slightly Included 1: Contains noticeable inclusions under 10x magnification but \
             often not visible to naked eye."
        }
        "SI2" => {
            "Slightly Included 2: Contains noticeable inclusions under 10x magnification, \
             sometimes visible to the naked eye."
        }
        "I1" => {
            "Included 1: Contains inclusions visible to the naked eye that may affect brilliance."
        }
        _ => "",
    }
}

/// Carat insight over half-open weight ranges (lower-inclusive, so the
/// boundary weights 0.5, 1.0 and 2.0 land in the upper range).
pub fn carat_insight(carat: f64) -> String {
    let phrase = if carat < 0.5 {
        "is delicate and subtle"
    } else if carat < 1.0 {
        "has a good balance of presence and value"
    } else if carat < 2.0 {
        "makes a substantial statement"
    } else {
        "has exceptional presence and rarity"
    };

    // Debug formatting keeps the trailing `.0` on whole weights
    // ("At 1.0 carats", not "At 1 carats").
    format!("At {:?} carats, this diamond {}.", carat, phrase)
}

/// The four independent insight texts for one diamond
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InsightBundle {
    pub carat: String,
    pub cut: String,
    pub color: String,
    pub clarity: String,
}

impl InsightBundle {
    /// Build a bundle from raw labels. Unrecognized labels produce empty
    /// slots rather than errors.
    pub fn generate(carat: f64, cut: &str, color: &str, clarity: &str) -> Self {
        Self {
            carat: carat_insight(carat),
            cut: cut_insight(cut).to_string(),
            color: color_insight(color).to_string(),
            clarity: clarity_insight(clarity).to_string(),
        }
    }

    /// Build a bundle from typed attributes (labels always recognized)
    pub fn for_attributes(attrs: &DiamondAttributes) -> Self {
        Self::generate(
            attrs.carat,
            attrs.cut.label(),
            attrs.color.label(),
            attrs.clarity.label(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Clarity, Color, Cut};

    #[test]
    fn test_carat_ranges() {
        assert!(carat_insight(0.3).contains("delicate and subtle"));
        assert!(carat_insight(0.7).contains("good balance"));
        assert!(carat_insight(1.5).contains("substantial statement"));
        assert!(carat_insight(3.0).contains("exceptional presence"));
    }

    #[test]
    fn test_carat_boundaries_land_in_upper_range() {
        assert!(carat_insight(0.5).contains("good balance"));
        assert!(carat_insight(1.0).contains("substantial statement"));
        assert!(carat_insight(2.0).contains("exceptional presence"));
    }

    #[test]
    fn test_carat_value_is_interpolated() {
        assert!(carat_insight(1.25).starts_with("At 1.25 carats"));
    }

    #[test]
    fn test_whole_carat_keeps_one_decimal() {
        assert!(carat_insight(1.0).starts_with("At 1.0 carats"));
        assert!(carat_insight(2.0).starts_with("At 2.0 carats"));
    }

    #[test]
    fn test_unknown_labels_fall_back_to_empty() {
        let bundle = InsightBundle::generate(1.0, "Superb", "Z", "FL2");
        assert_eq!(bundle.cut, "");
        assert_eq!(bundle.color, "");
        assert_eq!(bundle.clarity, "");
        assert!(!bundle.carat.is_empty());
    }

    #[test]
    fn test_every_grade_has_text() {
        for cut in Cut::ALL {
            assert!(!cut_insight(cut.label()).is_empty(), "cut {}", cut);
        }
        for color in Color::ALL {
            assert!(!color_insight(color.label()).is_empty(), "color {}", color);
        }
        for clarity in Clarity::ALL {
            assert!(
                !clarity_insight(clarity.label()).is_empty(),
                "clarity {}",
                clarity
            );
        }
    }

    #[test]
    fn test_ideal_cut_text() {
        assert!(cut_insight("Ideal").contains("pinnacle"));
    }
}
