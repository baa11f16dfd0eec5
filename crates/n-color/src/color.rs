// SPDX-License-Identifier: MIT
//
// n-color color system: OKLCH with an exact sRGB gamut boundary.
//
// Single-character variable names (r, g, b, l, c, h, a, s, m) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference implementations.
#![allow(clippy::many_single_char_names)]
//
// Conversion pipeline:
//
//   #RRGGBB ↔ sRGB (gamma) ↔ Linear sRGB ↔ LMS ↔ Oklab ↔ OKLCH
//
// The linear sRGB → LMS matrix is Ottosson's product of the sRGB → XYZ
// (D65) matrix and the XYZ → LMS matrix, so the XYZ stage is folded in.
//
// Everything runs in f64 with plain products and sums. Palette output is
// snapshot-tested down to the hex digit, so the arithmetic must not drift
// between targets.
//
// Gamut rule: a color is never clamped channel-by-channel on its way to
// hex. `to_hex` first reduces chroma to the gamut boundary for the color's
// lightness and hue, which keeps hue and lightness intact.
#![allow(clippy::suboptimal_flops)]

use std::fmt;

use crate::error::ColorError;

/// Tolerance for "inside the sRGB cube", in gamma-encoded channel units.
///
/// Decoding a hex color and re-encoding it moves channels by ~1e-12, so
/// exact bounds would reject colors that came straight from hex.
const GAMUT_EPSILON: f64 = 1e-7;

/// Upper bound for the chroma search. The most vivid sRGB color (blue)
/// sits at about 0.313.
const MAX_CHROMA_SEARCH: f64 = 0.4;

/// Bisection steps for [`max_chroma`]. 0.4 / 2^24 ≈ 2.4e-8.
const MAX_CHROMA_ITERATIONS: u32 = 24;

/// Chroma below which hue is meaningless.
const ACHROMATIC_EPSILON: f64 = 1e-5;

// ─── Color ───────────────────────────────────────────────────────────────────

/// A perceptual color stored in OKLCH space.
///
/// OKLCH is the cylindrical form of Björn Ottosson's Oklab. Equal steps
/// in lightness, chroma, or hue read as roughly equal visual steps, which
/// is what lets one style table look consistent at every hue.
///
/// # Examples
///
/// ```
/// use n_color::Color;
///
/// let teal = Color::hex("#008080").unwrap();
/// assert!(teal.h > 180.0 && teal.h < 200.0);
///
/// // Chroma beyond the boundary is brought back before encoding.
/// let loud = Color::oklch(0.6, 0.5, 30.0);
/// assert!(!loud.in_srgb_gamut());
/// assert!(loud.to_gamut().in_srgb_gamut());
/// ```
#[derive(Clone, Copy)]
pub struct Color {
    /// Lightness: 0.0 (black) to 1.0 (white).
    pub l: f64,

    /// Chroma (colorfulness): 0.0 (gray) upward. The sRGB gamut caps it
    /// somewhere below 0.32 depending on lightness and hue.
    pub c: f64,

    /// Hue angle in degrees, [0, 360).
    pub h: f64,
}

impl Color {
    /// Pure black.
    pub const BLACK: Self = Self::oklch(0.0, 0.0, 0.0);

    /// Pure white.
    pub const WHITE: Self = Self::oklch(1.0, 0.0, 0.0);

    // ─── Constructors ────────────────────────────────────────────────────

    /// Create a color from OKLCH values.
    #[inline]
    #[must_use]
    pub const fn oklch(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// Create a color from gamma-encoded sRGB values (0.0 to 1.0).
    #[must_use]
    pub fn srgb(r: f64, g: f64, b: f64) -> Self {
        let (l, c, h) = srgb_to_oklch(r, g, b);
        Self { l, c, h }
    }

    /// Create a color from 8-bit sRGB values.
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::srgb(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Parse `#RRGGBB` or `RRGGBB`, case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidHex`] for any other length or a
    /// non-hex character.
    pub fn hex(s: &str) -> Result<Self, ColorError> {
        let (r, g, b) = parse_hex(s)?;
        Ok(Self::rgb8(r, g, b))
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Whether this color has no visible chroma (its hue carries no meaning).
    #[inline]
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < ACHROMATIC_EPSILON
    }

    /// Largest in-gamut chroma at this color's lightness and hue.
    #[must_use]
    pub fn max_chroma(self) -> f64 {
        max_chroma(self.l, self.h)
    }

    /// Whether this color maps inside the sRGB cube.
    #[must_use]
    pub fn in_srgb_gamut(self) -> bool {
        let (r, g, b) = oklch_to_srgb(self.l, self.c, self.h);
        in_unit_range(r) && in_unit_range(g) && in_unit_range(b)
    }

    // ─── Adjustments ─────────────────────────────────────────────────────

    /// Set hue to an absolute angle (wrapped into [0, 360)).
    #[inline]
    #[must_use]
    pub fn set_hue(self, h: f64) -> Self {
        Self {
            h: wrap_hue(h),
            ..self
        }
    }

    /// Set chroma to an absolute value (clamped to >= 0.0).
    #[inline]
    #[must_use]
    pub const fn set_chroma(self, c: f64) -> Self {
        Self {
            c: c.max(0.0),
            ..self
        }
    }

    /// Bring this color inside the sRGB gamut.
    ///
    /// Lightness is clamped to [0, 1] and chroma reduced to the gamut
    /// boundary; hue is never touched. In-gamut colors come back as-is.
    #[must_use]
    pub fn to_gamut(self) -> Self {
        let candidate = Self {
            l: self.l.clamp(0.0, 1.0),
            c: self.c.max(0.0),
            h: wrap_hue(self.h),
        };
        if candidate.in_srgb_gamut() {
            return candidate;
        }
        Self {
            c: max_chroma(candidate.l, candidate.h).min(candidate.c),
            ..candidate
        }
    }

    // ─── Conversions ─────────────────────────────────────────────────────

    /// Gamma-encoded sRGB channels with no gamut handling at all.
    ///
    /// Out-of-gamut colors produce channels outside [0, 1]. Meant for
    /// gamut diagnostics; use [`to_rgb8`](Self::to_rgb8) for output.
    #[must_use]
    pub fn srgb_unclamped(self) -> (f64, f64, f64) {
        oklch_to_srgb(self.l, self.c, self.h)
    }

    /// Convert to 8-bit sRGB after gamut mapping.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let mapped = self.to_gamut();
        let (r, g, b) = oklch_to_srgb(mapped.l, mapped.c, mapped.h);
        (to_u8(r), to_u8(g), to_u8(b))
    }

    /// Convert to canonical `#RRGGBB` (uppercase) after gamut mapping.
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color::oklch({:.4}, {:.4}, {:.1})", self.l, self.c, self.h)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        const EPS: f64 = 1e-6;
        (self.l - other.l).abs() < EPS
            && (self.c - other.c).abs() < EPS
            && (self.is_achromatic()
                || other.is_achromatic()
                || hue_diff(self.h, other.h) < EPS)
    }
}

impl Default for Color {
    /// Default is black.
    fn default() -> Self {
        Self::BLACK
    }
}

// ─── Free functions ──────────────────────────────────────────────────────────

/// Decode a hex color into OKLCH.
///
/// # Errors
///
/// See [`Color::hex`].
pub fn hex_to_oklch(hex: &str) -> Result<Color, ColorError> {
    Color::hex(hex)
}

/// Encode an OKLCH color as canonical `#RRGGBB`, gamut-mapping first.
#[must_use]
pub fn oklch_to_hex(color: Color) -> String {
    color.to_hex()
}

/// Largest chroma at which `(l, c, h)` still lands inside the sRGB cube.
///
/// Bisection with a fixed step count, so the result is deterministic.
/// The search keeps `lo` in-gamut and `hi` out of gamut, so it settles on
/// some boundary crossing along the chroma ray, not necessarily the
/// outermost one, and the returned `lo` was itself tested in-gamut.
/// Lightness outside [0, 1] is clamped. At L = 0 and L = 1 the answer is
/// (near) zero.
#[must_use]
pub fn max_chroma(l: f64, h: f64) -> f64 {
    let l = l.clamp(0.0, 1.0);
    let h = wrap_hue(h);

    let mut lo = 0.0;
    let mut hi = MAX_CHROMA_SEARCH;
    for _ in 0..MAX_CHROMA_ITERATIONS {
        let mid = (lo + hi) * 0.5;
        let (r, g, b) = oklch_to_srgb(l, mid, h);
        if in_unit_range(r) && in_unit_range(g) && in_unit_range(b) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Wrap a hue angle into [0, 360). Never negative, never 360.
#[inline]
#[must_use]
pub fn wrap_hue(h: f64) -> f64 {
    let h = h % 360.0;
    let h = if h < 0.0 { h + 360.0 } else { h };
    // -1e-15 + 360.0 rounds to exactly 360.0.
    if h >= 360.0 { 0.0 } else { h }
}

/// Absolute hue difference along the shorter arc, in [0, 180].
#[inline]
#[must_use]
pub fn hue_diff(a: f64, b: f64) -> f64 {
    let d = wrap_hue(a - b);
    if d > 180.0 { 360.0 - d } else { d }
}

#[inline]
fn in_unit_range(v: f64) -> bool {
    (-GAMUT_EPSILON..=1.0 + GAMUT_EPSILON).contains(&v)
}

// ─── OKLCH ↔ Oklab ──────────────────────────────────────────────────────────

#[inline]
fn oklch_to_oklab_ab(c: f64, h: f64) -> (f64, f64) {
    let h_rad = h.to_radians();
    (c * h_rad.cos(), c * h_rad.sin())
}

#[inline]
fn oklab_ab_to_oklch(a: f64, b: f64) -> (f64, f64) {
    let c = a.hypot(b);
    let h = if c < 1e-12 {
        0.0 // achromatic: hue undefined
    } else {
        wrap_hue(b.atan2(a).to_degrees())
    };
    (c, h)
}

// ─── Oklab ↔ Linear sRGB ────────────────────────────────────────────────────
//
// Through the intermediate LMS (cone response) space. Matrices are from
// Björn Ottosson's reference: https://bottosson.github.io/posts/oklab/

fn oklab_to_linear_srgb(l_ok: f64, a: f64, b: f64) -> (f64, f64, f64) {
    let l_ = l_ok + 0.396_337_777_4 * a + 0.215_803_757_3 * b;
    let m_ = l_ok - 0.105_561_345_8 * a - 0.063_854_172_8 * b;
    let s_ = l_ok - 0.089_484_177_5 * a - 1.291_485_548_0 * b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    let r = 4.076_741_662_1 * l - 3.307_711_591_3 * m + 0.230_969_929_2 * s;
    let g = -1.268_438_004_6 * l + 2.609_757_401_1 * m - 0.341_319_396_5 * s;
    let bl = -0.004_196_086_3 * l - 0.703_418_614_7 * m + 1.707_614_701_0 * s;

    (r, g, bl)
}

fn linear_srgb_to_oklab(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let l = 0.412_221_470_8 * r + 0.536_332_536_3 * g + 0.051_445_992_9 * b;
    let m = 0.211_903_498_2 * r + 0.680_699_545_1 * g + 0.107_396_956_6 * b;
    let s = 0.088_302_461_9 * r + 0.281_718_837_6 * g + 0.629_978_700_5 * b;

    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    let l_ok = 0.210_454_255_3 * l_ + 0.793_617_785_0 * m_ - 0.004_072_046_8 * s_;
    let a = 1.977_998_495_1 * l_ - 2.428_592_205_0 * m_ + 0.450_593_709_9 * s_;
    let b_ok = 0.025_904_037_1 * l_ + 0.782_771_766_2 * m_ - 0.808_675_766_0 * s_;

    (l_ok, a, b_ok)
}

// ─── Linear sRGB ↔ sRGB (Gamma) ─────────────────────────────────────────────

/// Convert a single linear sRGB component to sRGB (apply gamma).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Convert a single sRGB component to linear sRGB (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── Composite Conversions ───────────────────────────────────────────────────

fn srgb_to_oklch(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let (l, a, b_ok) = linear_srgb_to_oklab(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b));
    let (c, h) = oklab_ab_to_oklch(a, b_ok);
    (l, c, h)
}

/// OKLCH → gamma-encoded sRGB, possibly outside [0, 1].
fn oklch_to_srgb(l: f64, c: f64, h: f64) -> (f64, f64, f64) {
    let (a, b) = oklch_to_oklab_ab(c, h);
    let (lr, lg, lb) = oklab_to_linear_srgb(l, a, b);
    (linear_to_srgb(lr), linear_to_srgb(lg), linear_to_srgb(lb))
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_hex(input: &str) -> Result<(u8, u8, u8), ColorError> {
    let invalid = || ColorError::InvalidHex {
        input: input.to_owned(),
    };
    let digits = input.strip_prefix('#').unwrap_or(input).as_bytes();
    if digits.len() != 6 {
        return Err(invalid());
    }
    let byte = |i: usize| -> Option<u8> {
        let hi = parse_hex_digit(digits[i])?;
        let lo = parse_hex_digit(digits[i + 1])?;
        Some(hi << 4 | lo)
    };
    match (byte(0), byte(2), byte(4)) {
        (Some(r), Some(g), Some(b)) => Ok((r, g, b)),
        _ => Err(invalid()),
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    (v * 255.0 + 0.5).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    // ── Hex Parsing ──────────────────────────────────────────────────────

    #[test]
    fn hex_parsing_rrggbb() {
        let color = Color::hex("#ff8000").unwrap();
        assert_eq!(color.to_rgb8(), (255, 128, 0));
    }

    #[test]
    fn hex_parsing_no_hash() {
        let color = Color::hex("00ff00").unwrap();
        assert_eq!(color.to_rgb8(), (0, 255, 0));
    }

    #[test]
    fn hex_parsing_is_case_insensitive() {
        assert_eq!(Color::hex("#AbCdEf").unwrap(), Color::hex("#abcdef").unwrap());
    }

    #[test]
    fn hex_parsing_invalid() {
        for bad in ["", "#", "xyz", "#12345", "#1234567", "#f80", "#ff000080", "#gg0000", "#ff 000"] {
            assert!(
                matches!(Color::hex(bad), Err(ColorError::InvalidHex { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn hex_error_names_the_input() {
        let err = Color::hex("#12").unwrap_err();
        assert_eq!(err.to_string(), "invalid hex color \"#12\": expected #RRGGBB");
    }

    #[test]
    fn hex_output_is_uppercase_canonical() {
        assert_eq!(Color::hex("c86432").unwrap().to_hex(), "#C86432");
        assert_eq!(oklch_to_hex(hex_to_oklch("#0a0b0c").unwrap()), "#0A0B0C");
    }

    // ── Known Values ─────────────────────────────────────────────────────

    #[test]
    fn black_is_zero_lightness() {
        let black = Color::hex("#000000").unwrap();
        assert!(approx_eq(black.l, 0.0, 1e-9));
        assert!(black.is_achromatic());
    }

    #[test]
    fn white_is_full_lightness() {
        let white = Color::hex("#FFFFFF").unwrap();
        assert!(approx_eq(white.l, 1.0, 1e-6));
        assert!(white.is_achromatic());
        assert_eq!(Color::WHITE.to_hex(), "#FFFFFF");
        assert_eq!(Color::BLACK.to_hex(), "#000000");
    }

    #[test]
    fn gray_has_no_chroma() {
        assert!(Color::rgb8(128, 128, 128).is_achromatic());
    }

    #[test]
    fn red_has_hue_near_29() {
        let red = Color::rgb8(255, 0, 0);
        assert!(approx_eq(red.l, 0.628, 0.001), "red L was {}", red.l);
        assert!(approx_eq(red.c, 0.2577, 0.001), "red C was {}", red.c);
        assert!(approx_eq(red.h, 29.23, 0.05), "red H was {}", red.h);
    }

    // ── Hue arithmetic ───────────────────────────────────────────────────

    #[test]
    fn wrap_hue_boundaries() {
        assert!(approx_eq(wrap_hue(-10.0), 350.0, 1e-12));
        assert!(approx_eq(wrap_hue(370.0), 10.0, 1e-12));
        assert_eq!(wrap_hue(360.0), 0.0);
        assert_eq!(wrap_hue(0.0), 0.0);
        assert_eq!(wrap_hue(-720.0), 0.0);
        assert_eq!(wrap_hue(-1e-15), 0.0);
    }

    #[test]
    fn hue_diff_takes_shorter_arc() {
        assert!(approx_eq(hue_diff(10.0, 350.0), 20.0, 1e-12));
        assert!(approx_eq(hue_diff(350.0, 10.0), 20.0, 1e-12));
        assert!(approx_eq(hue_diff(0.0, 180.0), 180.0, 1e-12));
        assert!(approx_eq(hue_diff(90.0, 90.0), 0.0, 1e-12));
    }

    #[test]
    fn set_hue_wraps() {
        let color = Color::oklch(0.5, 0.1, 350.0).set_hue(380.0);
        assert!(approx_eq(color.h, 20.0, 1e-9));
    }

    #[test]
    fn set_chroma_clamps_to_zero() {
        assert_eq!(Color::oklch(0.5, 0.1, 90.0).set_chroma(-1.0).c, 0.0);
    }

    // ── Gamut ────────────────────────────────────────────────────────────

    #[test]
    fn max_chroma_at_extremes_is_tiny_and_non_negative() {
        for h in [0.0, 90.0, 180.0, 270.0, 359.9] {
            for l in [0.0, 1.0] {
                let c = max_chroma(l, h);
                assert!(c.is_finite() && c >= 0.0, "max_chroma({l}, {h}) = {c}");
                assert!(c < 0.01, "max_chroma({l}, {h}) = {c} should be ~0");
            }
        }
    }

    #[test]
    fn max_chroma_clamps_lightness() {
        assert_eq!(max_chroma(-0.5, 120.0), max_chroma(0.0, 120.0));
        assert_eq!(max_chroma(1.5, 120.0), max_chroma(1.0, 120.0));
    }

    #[test]
    fn max_chroma_matches_primary_red() {
        // sRGB red sits on the boundary, so the search lands on its chroma.
        let red = Color::rgb8(255, 0, 0);
        let c = max_chroma(red.l, red.h);
        assert!(approx_eq(c, red.c, 1e-3), "boundary {c} vs red {}", red.c);
    }

    #[test]
    fn max_chroma_near_blue_settles_on_an_inner_crossing() {
        // The constant-hue line toward sRGB blue leaves the cube around
        // C = 0.266 and only re-enters at blue itself (C ≈ 0.313).
        let blue = Color::rgb8(0, 0, 255);
        assert!(blue.in_srgb_gamut());
        let c = max_chroma(blue.l, blue.h);
        assert!(c > 0.25 && c < blue.c - 0.03, "blue boundary chroma was {c}");
        assert!(Color::oklch(blue.l, c, blue.h).in_srgb_gamut());
    }

    #[test]
    fn max_chroma_result_is_always_in_gamut() {
        for step in 0..=20 {
            let l = f64::from(step) / 20.0;
            for h in (0..360).step_by(15) {
                let h = f64::from(h);
                let c = max_chroma(l, h);
                assert!(Color::oklch(l, c, h).in_srgb_gamut(), "max_chroma({l}, {h}) = {c} left the gamut");
            }
        }
    }

    #[test]
    fn to_gamut_reduces_chroma_only() {
        let loud = Color::oklch(0.7, 0.4, 140.0);
        let mapped = loud.to_gamut();
        assert!(mapped.in_srgb_gamut());
        assert!(mapped.c < loud.c);
        assert_eq!(mapped.l, loud.l);
        assert_eq!(mapped.h, loud.h);
    }

    #[test]
    fn to_gamut_keeps_in_gamut_colors() {
        let calm = Color::oklch(0.6, 0.05, 200.0);
        assert_eq!(calm.to_gamut(), calm);
    }

    #[test]
    fn out_of_gamut_hex_keeps_hue_family() {
        // A naive per-channel clamp of this color drifts toward orange.
        let loud = Color::oklch(0.6, 0.35, 25.0);
        let back = Color::hex(&loud.to_hex()).unwrap();
        assert!(hue_diff(back.h, 25.0) < 2.0, "hue drifted to {}", back.h);
    }

    // ── Roundtrip ────────────────────────────────────────────────────────

    #[test]
    fn hex_roundtrip_dense_grid() {
        for r in (0..=255u8).step_by(15) {
            for g in (0..=255u8).step_by(15) {
                for b in (0..=255u8).step_by(15) {
                    let hex = format!("#{r:02X}{g:02X}{b:02X}");
                    let back = oklch_to_hex(hex_to_oklch(&hex).unwrap());
                    assert_eq!(back, hex);
                }
            }
        }
    }

    #[test]
    fn oklch_identity_roundtrip() {
        let original = Color::oklch(0.7, 0.10, 90.0);
        let recovered = Color::hex(&original.to_hex()).unwrap();
        assert!(approx_eq(original.l, recovered.l, 0.005));
        assert!(approx_eq(original.c, recovered.c, 0.005));
        assert!(hue_diff(original.h, recovered.h) < 1.0);
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(Color::rgb8(18, 52, 86).to_string(), "#123456");
    }
}
