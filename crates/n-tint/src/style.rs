//! Styles: how light and how colorful each palette key is.
//!
//! A static style is a table of [`Tone`]s indexed by theme class and tone
//! role. Chroma is never stored directly: a tone's `chroma_factor` scales
//! the gamut boundary at the key's lightness and hue, so every static
//! color is in gamut by construction.
//!
//! The adaptive style reads the theme's own color for the key and keeps
//! its lightness and chroma, only swapping in the tint hue.
//!
//! Every table is an exhaustive `match` over (class, role), so a missing
//! entry fails to compile.

use std::fmt;
use std::str::FromStr;

use n_color::{Color, max_chroma, wrap_hue};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TintError};
use crate::key::{PaletteKey, ToneRole};
use crate::theme::{ThemeClass, ThemeColors};

/// Lightness and relative chroma for one palette slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// OKLCH lightness.
    pub lightness: f64,
    /// Fraction of the gamut-maximum chroma, in [0, 1].
    pub chroma_factor: f64,
}

const fn tone(lightness: f64, chroma_factor: f64) -> Tone {
    Tone {
        lightness,
        chroma_factor,
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// A named intensity pattern applied uniformly across elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    Muted,
    #[default]
    Pastel,
    Tinted,
    Vibrant,
    Neon,
    /// Lightness and chroma from the theme, hue from the tint.
    Adaptive,
}

impl Style {
    /// Static styles from the most muted to the most vivid.
    pub const STATIC: [Self; 5] = [Self::Muted, Self::Pastel, Self::Tinted, Self::Vibrant, Self::Neon];

    /// What `Adaptive` resolves as when the theme has no color for a key.
    pub const ADAPTIVE_FALLBACK: Self = Self::Pastel;

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Muted => "muted",
            Self::Pastel => "pastel",
            Self::Tinted => "tinted",
            Self::Vibrant => "vibrant",
            Self::Neon => "neon",
            Self::Adaptive => "adaptive",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Muted, Self::Pastel, Self::Tinted, Self::Vibrant, Self::Neon, Self::Adaptive]
    }

    /// Parse a style from its name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Self::all().iter().find(|s| s.name() == lower).copied()
    }

    #[must_use]
    pub const fn is_static(self) -> bool {
        !matches!(self, Self::Adaptive)
    }

    /// The static table entry for (class, role). `None` for `Adaptive`.
    #[must_use]
    pub const fn tone(self, class: ThemeClass, role: ToneRole) -> Option<Tone> {
        match self {
            Self::Muted => Some(muted(class, role)),
            Self::Pastel => Some(pastel(class, role)),
            Self::Tinted => Some(tinted(class, role)),
            Self::Vibrant => Some(vibrant(class, role)),
            Self::Neon => Some(neon(class, role)),
            Self::Adaptive => None,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Style {
    type Err = TintError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| TintError::UnknownStyle { name: s.to_owned() })
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Inputs a resolver may need beyond (class, key).
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub base_hue: f64,
    /// Harmony offset for the key's element.
    pub hue_offset: f64,
    /// Only read by `Adaptive`.
    pub theme_colors: Option<&'a ThemeColors>,
}

impl ResolveContext<'_> {
    /// `base_hue + hue_offset`, wrapped.
    #[must_use]
    pub fn hue(&self) -> f64 {
        wrap_hue(self.base_hue + self.hue_offset)
    }
}

/// A pre-blend tint and how it should be blended with the theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTint {
    pub color: Color,
    /// Blend only the hue channel toward the theme (L and C stay).
    pub hue_only_blend: bool,
}

/// Resolve the pre-blend tint for one key.
///
/// # Errors
///
/// Only `Adaptive` can fail: a theme color that is present but malformed.
pub fn resolve(style: Style, class: ThemeClass, key: PaletteKey, ctx: &ResolveContext<'_>) -> Result<ResolvedTint> {
    match style.tone(class, key.role()) {
        Some(tone) => Ok(resolve_static(tone, ctx.hue())),
        None => resolve_adaptive(class, key, ctx),
    }
}

fn resolve_static(tone: Tone, hue: f64) -> ResolvedTint {
    let c = max_chroma(tone.lightness, hue) * tone.chroma_factor;
    ResolvedTint {
        color: Color::oklch(tone.lightness, c, hue),
        hue_only_blend: false,
    }
}

fn resolve_adaptive(class: ThemeClass, key: PaletteKey, ctx: &ResolveContext<'_>) -> Result<ResolvedTint> {
    let Some(theme) = ctx.theme_colors.map(|t| t.resolve(key)).transpose()?.flatten() else {
        return resolve(Style::ADAPTIVE_FALLBACK, class, key, ctx);
    };
    let hue = ctx.hue();
    // The theme's chroma can exceed the boundary once the hue moves.
    let c = theme.color.c.min(max_chroma(theme.color.l, hue));
    Ok(ResolvedTint {
        color: Color::oklch(theme.color.l, c, hue),
        hue_only_blend: true,
    })
}

// ---------------------------------------------------------------------------
// Static tables
// ---------------------------------------------------------------------------
//
// Row order in every table: Background, SubtleBackground,
// SectionBackground, Foreground, MutedForeground. Background chroma
// factors rise strictly from `muted` to `neon` in every class.

const fn muted(class: ThemeClass, role: ToneRole) -> Tone {
    use ThemeClass::{Dark, HighContrastDark, HighContrastLight, Light};
    use ToneRole::{Background, Foreground, MutedForeground, SectionBackground, SubtleBackground};

    match (class, role) {
        (Dark, Background) => tone(0.32, 0.12),
        (Dark, SubtleBackground) => tone(0.27, 0.10),
        (Dark, SectionBackground) => tone(0.30, 0.11),
        (Dark, Foreground) => tone(0.88, 0.04),
        (Dark, MutedForeground) => tone(0.70, 0.04),

        (Light, Background) => tone(0.88, 0.12),
        (Light, SubtleBackground) => tone(0.92, 0.10),
        (Light, SectionBackground) => tone(0.90, 0.11),
        (Light, Foreground) => tone(0.28, 0.06),
        (Light, MutedForeground) => tone(0.45, 0.05),

        (HighContrastDark, Background) => tone(0.22, 0.14),
        (HighContrastDark, SubtleBackground) => tone(0.17, 0.12),
        (HighContrastDark, SectionBackground) => tone(0.20, 0.13),
        (HighContrastDark, Foreground) => tone(1.00, 0.0),
        (HighContrastDark, MutedForeground) => tone(0.90, 0.02),

        (HighContrastLight, Background) => tone(0.94, 0.14),
        (HighContrastLight, SubtleBackground) => tone(0.97, 0.12),
        (HighContrastLight, SectionBackground) => tone(0.95, 0.13),
        (HighContrastLight, Foreground) => tone(0.0, 0.0),
        (HighContrastLight, MutedForeground) => tone(0.20, 0.02),
    }
}

const fn pastel(class: ThemeClass, role: ToneRole) -> Tone {
    use ThemeClass::{Dark, HighContrastDark, HighContrastLight, Light};
    use ToneRole::{Background, Foreground, MutedForeground, SectionBackground, SubtleBackground};

    match (class, role) {
        (Dark, Background) => tone(0.40, 0.30),
        (Dark, SubtleBackground) => tone(0.33, 0.25),
        (Dark, SectionBackground) => tone(0.37, 0.28),
        (Dark, Foreground) => tone(0.93, 0.06),
        (Dark, MutedForeground) => tone(0.76, 0.06),

        (Light, Background) => tone(0.86, 0.32),
        (Light, SubtleBackground) => tone(0.91, 0.26),
        (Light, SectionBackground) => tone(0.88, 0.30),
        (Light, Foreground) => tone(0.24, 0.08),
        (Light, MutedForeground) => tone(0.42, 0.06),

        (HighContrastDark, Background) => tone(0.26, 0.32),
        (HighContrastDark, SubtleBackground) => tone(0.20, 0.26),
        (HighContrastDark, SectionBackground) => tone(0.23, 0.30),
        (HighContrastDark, Foreground) => tone(1.00, 0.0),
        (HighContrastDark, MutedForeground) => tone(0.92, 0.04),

        (HighContrastLight, Background) => tone(0.93, 0.32),
        (HighContrastLight, SubtleBackground) => tone(0.96, 0.26),
        (HighContrastLight, SectionBackground) => tone(0.94, 0.30),
        (HighContrastLight, Foreground) => tone(0.0, 0.0),
        (HighContrastLight, MutedForeground) => tone(0.18, 0.04),
    }
}

const fn tinted(class: ThemeClass, role: ToneRole) -> Tone {
    use ThemeClass::{Dark, HighContrastDark, HighContrastLight, Light};
    use ToneRole::{Background, Foreground, MutedForeground, SectionBackground, SubtleBackground};

    match (class, role) {
        (Dark, Background) => tone(0.43, 0.50),
        (Dark, SubtleBackground) => tone(0.35, 0.42),
        (Dark, SectionBackground) => tone(0.39, 0.46),
        (Dark, Foreground) => tone(0.95, 0.08),
        (Dark, MutedForeground) => tone(0.80, 0.08),

        (Light, Background) => tone(0.80, 0.50),
        (Light, SubtleBackground) => tone(0.87, 0.42),
        (Light, SectionBackground) => tone(0.83, 0.46),
        (Light, Foreground) => tone(0.20, 0.10),
        (Light, MutedForeground) => tone(0.38, 0.08),

        (HighContrastDark, Background) => tone(0.28, 0.50),
        (HighContrastDark, SubtleBackground) => tone(0.21, 0.42),
        (HighContrastDark, SectionBackground) => tone(0.25, 0.46),
        (HighContrastDark, Foreground) => tone(1.00, 0.0),
        (HighContrastDark, MutedForeground) => tone(0.93, 0.05),

        (HighContrastLight, Background) => tone(0.90, 0.50),
        (HighContrastLight, SubtleBackground) => tone(0.95, 0.42),
        (HighContrastLight, SectionBackground) => tone(0.92, 0.46),
        (HighContrastLight, Foreground) => tone(0.0, 0.0),
        (HighContrastLight, MutedForeground) => tone(0.16, 0.05),
    }
}

const fn vibrant(class: ThemeClass, role: ToneRole) -> Tone {
    use ThemeClass::{Dark, HighContrastDark, HighContrastLight, Light};
    use ToneRole::{Background, Foreground, MutedForeground, SectionBackground, SubtleBackground};

    match (class, role) {
        (Dark, Background) => tone(0.50, 0.75),
        (Dark, SubtleBackground) => tone(0.39, 0.62),
        (Dark, SectionBackground) => tone(0.44, 0.68),
        (Dark, Foreground) => tone(0.98, 0.04),
        (Dark, MutedForeground) => tone(0.86, 0.06),

        (Light, Background) => tone(0.70, 0.75),
        (Light, SubtleBackground) => tone(0.80, 0.62),
        (Light, SectionBackground) => tone(0.75, 0.68),
        (Light, Foreground) => tone(0.14, 0.08),
        (Light, MutedForeground) => tone(0.30, 0.08),

        (HighContrastDark, Background) => tone(0.32, 0.75),
        (HighContrastDark, SubtleBackground) => tone(0.23, 0.62),
        (HighContrastDark, SectionBackground) => tone(0.27, 0.68),
        (HighContrastDark, Foreground) => tone(1.00, 0.0),
        (HighContrastDark, MutedForeground) => tone(0.94, 0.05),

        (HighContrastLight, Background) => tone(0.86, 0.75),
        (HighContrastLight, SubtleBackground) => tone(0.93, 0.62),
        (HighContrastLight, SectionBackground) => tone(0.89, 0.68),
        (HighContrastLight, Foreground) => tone(0.0, 0.0),
        (HighContrastLight, MutedForeground) => tone(0.14, 0.05),
    }
}

const fn neon(class: ThemeClass, role: ToneRole) -> Tone {
    use ThemeClass::{Dark, HighContrastDark, HighContrastLight, Light};
    use ToneRole::{Background, Foreground, MutedForeground, SectionBackground, SubtleBackground};

    match (class, role) {
        (Dark, Background) => tone(0.58, 0.95),
        (Dark, SubtleBackground) => tone(0.44, 0.85),
        (Dark, SectionBackground) => tone(0.50, 0.90),
        (Dark, Foreground) => tone(0.99, 0.02),
        (Dark, MutedForeground) => tone(0.90, 0.05),

        (Light, Background) => tone(0.66, 0.95),
        (Light, SubtleBackground) => tone(0.76, 0.85),
        (Light, SectionBackground) => tone(0.70, 0.90),
        (Light, Foreground) => tone(0.10, 0.06),
        (Light, MutedForeground) => tone(0.24, 0.06),

        (HighContrastDark, Background) => tone(0.36, 0.95),
        (HighContrastDark, SubtleBackground) => tone(0.25, 0.85),
        (HighContrastDark, SectionBackground) => tone(0.30, 0.90),
        (HighContrastDark, Foreground) => tone(1.00, 0.0),
        (HighContrastDark, MutedForeground) => tone(0.95, 0.05),

        (HighContrastLight, Background) => tone(0.82, 0.95),
        (HighContrastLight, SubtleBackground) => tone(0.90, 0.85),
        (HighContrastLight, SectionBackground) => tone(0.86, 0.90),
        (HighContrastLight, Foreground) => tone(0.0, 0.0),
        (HighContrastLight, MutedForeground) => tone(0.12, 0.05),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
