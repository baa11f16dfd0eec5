//! Blending a tint toward the theme's own color.
//!
//! Blending happens in OKLCH. Lightness and chroma interpolate linearly;
//! hue interpolates along a chosen direction around the wheel. One
//! direction is picked per palette (see [`crate::tint::majority_hue_direction`])
//! so every key rotates the same way and the result reads as one family.

use n_color::{Color, hue_diff, wrap_hue};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TintError};

/// Hue differences below this are treated as equal.
const HUE_EPSILON: f64 = 1e-9;

/// Which way round the wheel a hue travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HueDirection {
    /// Increasing hue.
    #[serde(rename = "cw")]
    Clockwise,
    /// Decreasing hue.
    #[serde(rename = "ccw")]
    CounterClockwise,
}

impl HueDirection {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clockwise => "cw",
            Self::CounterClockwise => "ccw",
        }
    }
}

/// The direction a blend from `from` to `to` should take.
///
/// An override always wins. Otherwise the shorter arc is taken, with an
/// exact half-turn going clockwise. Equal hues have no direction.
#[must_use]
pub fn effective_hue_direction(from: f64, to: f64, override_dir: Option<HueDirection>) -> Option<HueDirection> {
    if override_dir.is_some() {
        return override_dir;
    }
    if hue_diff(from, to) < HUE_EPSILON {
        return None;
    }
    if wrap_hue(to - from) <= 180.0 {
        Some(HueDirection::Clockwise)
    } else {
        Some(HueDirection::CounterClockwise)
    }
}

/// Hue `t` of the way from `from` to `to`, travelling in `dir`.
///
/// The arc may be longer than 180° when the direction is forced.
#[must_use]
pub fn interpolate_hue(from: f64, to: f64, t: f64, dir: HueDirection) -> f64 {
    match dir {
        HueDirection::Clockwise => wrap_hue(from + wrap_hue(to - from) * t),
        HueDirection::CounterClockwise => wrap_hue(from - wrap_hue(from - to) * t),
    }
}

/// Blend `tint` toward `theme` by `factor`.
///
/// `factor` is clamped to [0, 1] and NaN counts as 0; callers that must
/// reject bad factors go through [`blend_directed`] or validate first.
///
/// - `factor <= 0` returns `tint` unchanged.
/// - `hue_only` keeps the tint's lightness and chroma; only the hue moves.
/// - An achromatic theme color has no hue to move toward, so the hue
///   stays where the tint has it.
/// - `direction` forces the hue direction; `None` takes the shorter arc.
///
/// The result is not gamut-mapped; hex conversion does that.
#[must_use]
pub fn blend_toward(tint: Color, theme: Color, factor: f64, hue_only: bool, direction: Option<HueDirection>) -> Color {
    let t = if factor.is_nan() { 0.0 } else { factor.clamp(0.0, 1.0) };
    if t <= 0.0 {
        return tint;
    }

    let target_hue = if theme.is_achromatic() { tint.h } else { theme.h };
    let h = effective_hue_direction(tint.h, target_hue, direction)
        .map_or(tint.h, |dir| interpolate_hue(tint.h, target_hue, t, dir));

    if hue_only {
        return Color::oklch(tint.l, tint.c, h);
    }

    let l = tint.l + (theme.l - tint.l) * t;
    let c = tint.c + (theme.c - tint.c) * t;
    Color::oklch(l, c, h)
}

/// [`blend_toward`] with the theme color given as `#RRGGBB`.
///
/// # Errors
///
/// - [`TintError::BlendFactorOutOfRange`] when `factor` is NaN or outside [0, 1]
/// - [`TintError::Color`] for a malformed theme color
pub fn blend_directed(
    tint: Color,
    theme_hex: &str,
    factor: f64,
    hue_only: bool,
    direction: Option<HueDirection>,
) -> Result<Color> {
    check_blend_factor(factor)?;
    let theme = Color::hex(theme_hex)?;
    Ok(blend_toward(tint, theme, factor, hue_only, direction))
}

/// A blend factor must lie in [0, 1].
///
/// # Errors
///
/// [`TintError::BlendFactorOutOfRange`] otherwise, NaN included.
pub fn check_blend_factor(factor: f64) -> Result<()> {
    if (0.0..=1.0).contains(&factor) {
        Ok(())
    } else {
        Err(TintError::BlendFactorOutOfRange { factor })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
