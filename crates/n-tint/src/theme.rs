//! The active theme as seen by the tinting engine: a brightness class and
//! a possibly partial map of existing colors.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use n_color::Color;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TintError};
use crate::key::{ColorType, PaletteKey};

/// Canonical fallback for background keys the theme does not define.
pub const EDITOR_BACKGROUND: &str = "editor.background";

/// Canonical fallback for foreground keys the theme does not define.
pub const EDITOR_FOREGROUND: &str = "editor.foreground";

// ---------------------------------------------------------------------------
// ThemeClass
// ---------------------------------------------------------------------------

/// Brightness / contrast category of the active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThemeClass {
    #[default]
    #[serde(rename = "dark")]
    Dark,
    #[serde(rename = "light")]
    Light,
    #[serde(rename = "hc-dark")]
    HighContrastDark,
    #[serde(rename = "hc-light")]
    HighContrastLight,
}

impl ThemeClass {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::HighContrastDark => "hc-dark",
            Self::HighContrastLight => "hc-light",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Dark, Self::Light, Self::HighContrastDark, Self::HighContrastLight]
    }

    /// Parse from `dark`, `light`, `hc-dark`, `hc-light` (case-insensitive).
    /// The long forms `high-contrast-dark` / `high-contrast-light` are
    /// accepted too.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "high-contrast-dark" | "high-contrast" => Some(Self::HighContrastDark),
            "high-contrast-light" => Some(Self::HighContrastLight),
            other => Self::all().iter().find(|c| c.name() == other).copied(),
        }
    }

    /// Dark and high-contrast dark.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark | Self::HighContrastDark)
    }

    /// Guess the class from the theme's editor background.
    ///
    /// OKLCH lightness below 0.5 reads as dark. Without a usable editor
    /// background the guess is `Dark`.
    #[must_use]
    pub fn infer(colors: &ThemeColors) -> Self {
        match colors.get(EDITOR_BACKGROUND).map(Color::hex) {
            Some(Ok(bg)) if bg.l >= 0.5 => Self::Light,
            _ => Self::Dark,
        }
    }
}

impl fmt::Display for ThemeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThemeClass {
    type Err = TintError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| TintError::UnknownThemeClass { name: s.to_owned() })
    }
}

// ---------------------------------------------------------------------------
// ThemeColors
// ---------------------------------------------------------------------------

/// A theme color resolved for one palette key.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColor {
    /// Canonical `#RRGGBB`.
    pub hex: String,
    pub color: Color,
}

/// Existing theme colors keyed by host name (`editor.background`,
/// `statusBar.background`, ...). Read-only to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeColors {
    colors: BTreeMap<String, String>,
}

impl ThemeColors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, hex: impl Into<String>) -> Self {
        self.insert(key, hex);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, hex: impl Into<String>) {
        self.colors.insert(key.into(), hex.into());
    }

    /// Raw value for an exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.colors.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Raw value for a palette key, falling back to the editor background
    /// or foreground by the key's color type.
    #[must_use]
    pub fn lookup(&self, key: PaletteKey) -> Option<&str> {
        self.get(key.name()).or_else(|| {
            self.get(match key.color_type() {
                ColorType::Background => EDITOR_BACKGROUND,
                ColorType::Foreground => EDITOR_FOREGROUND,
            })
        })
    }

    /// Decoded theme color for a palette key (with fallback).
    ///
    /// # Errors
    ///
    /// A value that is present but not `#RRGGBB` is an error, never
    /// silently skipped.
    pub fn resolve(&self, key: PaletteKey) -> Result<Option<ThemeColor>> {
        self.lookup(key)
            .map(|raw| {
                let color = Color::hex(raw)?;
                Ok(ThemeColor {
                    hex: color.to_hex(),
                    color,
                })
            })
            .transpose()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ThemeColors {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            colors: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
