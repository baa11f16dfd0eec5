//! WCAG contrast between a tinted background and its foreground.
//!
//! Luminance is measured on the 8-bit color that actually ends up on
//! screen, so a report always agrees with the hex it sits next to.

use n_color::{Color, ColorError, srgb_to_linear};

/// WCAG AA minimum for body text.
pub const AA_NORMAL_TEXT: f64 = 4.5;

/// WCAG AA minimum for large text and UI glyphs.
pub const AA_LARGE_TEXT: f64 = 3.0;

/// WCAG AAA minimum for body text.
pub const AAA_NORMAL_TEXT: f64 = 7.0;

/// Relative luminance per WCAG 2.1, in [0, 1].
///
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    let (r, g, b) = color.to_rgb8();
    let lin = |v: u8| srgb_to_linear(f64::from(v) / 255.0);
    0.2126 * lin(r) + 0.7152 * lin(g) + 0.0722 * lin(b)
}

/// Contrast ratio in [1, 21], independent of argument order.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// [`contrast_ratio`] for two `#RRGGBB` strings.
///
/// # Errors
///
/// Either string is not a valid hex color.
pub fn contrast_ratio_hex(a: &str, b: &str) -> Result<f64, ColorError> {
    Ok(contrast_ratio(Color::hex(a)?, Color::hex(b)?))
}

/// WCAG grade for a ratio: `"AAA"`, `"AA"`, `"AA large"` or `"fail"`.
#[must_use]
pub fn grade(ratio: f64) -> &'static str {
    if ratio >= AAA_NORMAL_TEXT {
        "AAA"
    } else if ratio >= AA_NORMAL_TEXT {
        "AA"
    } else if ratio >= AA_LARGE_TEXT {
        "AA large"
    } else {
        "fail"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
