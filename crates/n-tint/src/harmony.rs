//! Harmonies: fixed per-element hue offsets on top of the base hue.
//!
//! Each harmony is a small table: how far around the wheel each element
//! sits from the base hue. The editor element is always at 0°, since it
//! is never tinted.

use std::fmt;
use std::str::FromStr;

use n_color::wrap_hue;
use serde::{Deserialize, Serialize};

use crate::error::TintError;
use crate::key::Element;

/// A named pattern of hue offsets across the chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Harmony {
    /// Every element on the base hue.
    #[default]
    Uniform,
    /// Neighbours ±30°, the side bar halfway.
    Analogous,
    /// Status and activity bars opposite the title bar.
    Complementary,
    /// The two hues either side of the complement (150° / 210°).
    SplitComplementary,
    /// 120° spacing.
    Triadic,
    /// 90° spacing, one element per corner.
    Tetradic,
}

impl Harmony {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Analogous => "analogous",
            Self::Complementary => "complementary",
            Self::SplitComplementary => "split-complementary",
            Self::Triadic => "triadic",
            Self::Tetradic => "tetradic",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Uniform,
            Self::Analogous,
            Self::Complementary,
            Self::SplitComplementary,
            Self::Triadic,
            Self::Tetradic,
        ]
    }

    /// Parse a harmony from its name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Self::all().iter().find(|h| h.name() == lower).copied()
    }

    /// Hue offset in degrees for `element`, in [0, 360).
    #[must_use]
    pub fn offset(self, element: Element) -> f64 {
        wrap_hue(raw_offset(self, element))
    }
}

impl fmt::Display for Harmony {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Harmony {
    type Err = TintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| TintError::UnknownHarmony { name: s.to_owned() })
    }
}

/// Offset lookup as a free function.
#[must_use]
pub fn offset_for(harmony: Harmony, element: Element) -> f64 {
    harmony.offset(element)
}

/// The offset table. Exhaustive over both enums.
const fn raw_offset(harmony: Harmony, element: Element) -> f64 {
    use Element::{ActivityBar, Editor, SideBar, StatusBar, TitleBar};

    match (harmony, element) {
        (_, Editor) | (Harmony::Uniform, _) => 0.0,

        (Harmony::Analogous, TitleBar) => 0.0,
        (Harmony::Analogous, StatusBar) => 30.0,
        (Harmony::Analogous, ActivityBar) => -30.0,
        (Harmony::Analogous, SideBar) => 15.0,

        (Harmony::Complementary, TitleBar | SideBar) => 0.0,
        (Harmony::Complementary, StatusBar | ActivityBar) => 180.0,

        (Harmony::SplitComplementary, TitleBar | SideBar) => 0.0,
        (Harmony::SplitComplementary, StatusBar) => 150.0,
        (Harmony::SplitComplementary, ActivityBar) => 210.0,

        (Harmony::Triadic, TitleBar | SideBar) => 0.0,
        (Harmony::Triadic, StatusBar) => 120.0,
        (Harmony::Triadic, ActivityBar) => 240.0,

        (Harmony::Tetradic, TitleBar) => 0.0,
        (Harmony::Tetradic, StatusBar) => 90.0,
        (Harmony::Tetradic, ActivityBar) => 180.0,
        (Harmony::Tetradic, SideBar) => 270.0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_harmony_defines_every_element_in_range() {
        for harmony in Harmony::all() {
            for element in Element::all() {
                let offset = harmony.offset(*element);
                assert!(
                    (0.0..360.0).contains(&offset),
                    "{harmony}/{element} offset {offset} out of range"
                );
            }
        }
    }

    #[test]
    fn editor_is_always_zero() {
        for harmony in Harmony::all() {
            assert_eq!(harmony.offset(Element::Editor), 0.0, "{harmony}");
        }
    }

    #[test]
    fn uniform_is_all_zero() {
        for element in Element::all() {
            assert_eq!(Harmony::Uniform.offset(*element), 0.0);
        }
    }

    #[test]
    fn every_other_harmony_moves_some_element() {
        for harmony in Harmony::all().iter().filter(|h| **h != Harmony::Uniform) {
            assert!(
                Element::TINTABLE.iter().any(|e| harmony.offset(*e) != 0.0),
                "{harmony} has no non-zero offset"
            );
        }
    }

    #[test]
    fn negative_offsets_wrap() {
        assert_eq!(Harmony::Analogous.offset(Element::ActivityBar), 330.0);
    }

    #[test]
    fn known_offsets() {
        assert_eq!(offset_for(Harmony::Complementary, Element::StatusBar), 180.0);
        assert_eq!(offset_for(Harmony::Triadic, Element::ActivityBar), 240.0);
        assert_eq!(offset_for(Harmony::Tetradic, Element::SideBar), 270.0);
        assert_eq!(offset_for(Harmony::SplitComplementary, Element::TitleBar), 0.0);
    }

    #[test]
    fn names_roundtrip() {
        for harmony in Harmony::all() {
            assert_eq!(Harmony::from_name(harmony.name()), Some(*harmony));
        }
        assert_eq!("Split-Complementary".parse::<Harmony>().unwrap(), Harmony::SplitComplementary);
        assert!(matches!("rainbow".parse::<Harmony>(), Err(TintError::UnknownHarmony { .. })));
    }
}
