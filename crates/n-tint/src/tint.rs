//! The tint orchestrator.
//!
//! ```text
//!   identifier + seed ──► base hue ──┬──► base swatch (display only)
//!        (or base hue)               │
//!                                    ├──► majority direction (vote pass)
//!                                    │        over background theme colors
//!                                    ▼
//!   for every palette key:  harmony offset ─► style resolver ─► tint
//!                           theme color ─► blend (majority direction) ─► final
//! ```
//!
//! Every key is computed regardless of the active targets; `enabled` only
//! tells the caller which ones to apply.

use std::collections::BTreeMap;

use n_color::{Color, max_chroma, wrap_hue};
use serde::Serialize;
use tracing::{debug, trace};

use crate::blend::{HueDirection, blend_toward, check_blend_factor, effective_hue_direction};
use crate::error::{Result, TintError};
use crate::harmony::Harmony;
use crate::hash;
use crate::key::{ColorType, Element, PaletteKey, Targets};
use crate::style::{self, ResolveContext, Style};
use crate::theme::{ThemeClass, ThemeColors};

/// Blend factor used when neither the caller nor the config sets one.
pub const DEFAULT_BLEND_FACTOR: f64 = 0.35;

/// Lightness of the base swatch for dark classes.
const DARK_SWATCH_LIGHTNESS: f64 = 0.55;

/// Lightness of the base swatch for light classes.
const LIGHT_SWATCH_LIGHTNESS: f64 = 0.65;

/// Fraction of the gamut-maximum chroma used by the base swatch.
const SWATCH_CHROMA_FACTOR: f64 = 0.7;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Everything [`compute_tint`] needs.
///
/// The hue comes from `base_hue` when set, otherwise from hashing
/// `identifier` with `seed`. With neither, computation fails.
#[derive(Debug, Clone, PartialEq)]
pub struct TintOptions {
    pub base_hue: Option<f64>,
    pub identifier: Option<String>,
    pub seed: i64,
    pub targets: Targets,
    pub theme_class: ThemeClass,
    pub style: Style,
    pub harmony: Harmony,
    pub theme_colors: Option<ThemeColors>,
    /// Default blend factor in [0, 1].
    pub blend_factor: f64,
    /// Per-element overrides of `blend_factor`.
    pub element_blend_factors: BTreeMap<Element, f64>,
}

impl Default for TintOptions {
    fn default() -> Self {
        Self {
            base_hue: None,
            identifier: None,
            seed: 0,
            targets: Targets::all(),
            theme_class: ThemeClass::default(),
            style: Style::default(),
            harmony: Harmony::default(),
            theme_colors: None,
            blend_factor: DEFAULT_BLEND_FACTOR,
            element_blend_factors: BTreeMap::new(),
        }
    }
}

impl TintOptions {
    /// Options hashing `identifier` for the hue.
    #[must_use]
    pub fn for_identifier(identifier: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier.into()),
            ..Self::default()
        }
    }

    /// Options with a fixed base hue.
    #[must_use]
    pub fn for_hue(hue: f64) -> Self {
        Self {
            base_hue: Some(hue),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub const fn with_targets(mut self, targets: Targets) -> Self {
        self.targets = targets;
        self
    }

    #[must_use]
    pub const fn with_theme_class(mut self, theme_class: ThemeClass) -> Self {
        self.theme_class = theme_class;
        self
    }

    #[must_use]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub const fn with_harmony(mut self, harmony: Harmony) -> Self {
        self.harmony = harmony;
        self
    }

    #[must_use]
    pub fn with_theme_colors(mut self, theme_colors: ThemeColors) -> Self {
        self.theme_colors = Some(theme_colors);
        self
    }

    #[must_use]
    pub const fn with_blend_factor(mut self, factor: f64) -> Self {
        self.blend_factor = factor;
        self
    }

    #[must_use]
    pub fn with_element_blend_factor(mut self, element: Element, factor: f64) -> Self {
        self.element_blend_factors.insert(element, factor);
        self
    }

    /// The blend factor that applies to `element`.
    #[must_use]
    pub fn blend_factor_for(&self, element: Element) -> f64 {
        self.element_blend_factors
            .get(&element)
            .copied()
            .unwrap_or(self.blend_factor)
    }

    /// The base hue in [0, 360).
    ///
    /// # Errors
    ///
    /// [`TintError::MissingHueSource`] without a hue or identifier, and
    /// [`TintError::InvalidBaseHue`] for a NaN or infinite hue.
    pub fn resolve_base_hue(&self) -> Result<f64> {
        match (self.base_hue, &self.identifier) {
            (Some(hue), _) if hue.is_finite() => Ok(wrap_hue(hue)),
            (Some(hue), _) => Err(TintError::InvalidBaseHue { hue }),
            (None, Some(identifier)) => Ok(f64::from(hash::base_hue(identifier, self.seed))),
            (None, None) => Err(TintError::MissingHueSource),
        }
    }

    fn validate(&self) -> Result<()> {
        std::iter::once(self.blend_factor)
            .chain(self.element_blend_factors.values().copied())
            .try_for_each(check_blend_factor)
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// The computed record for one palette key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TintKeyDetail {
    pub key: PaletteKey,
    pub element: Element,
    pub color_type: ColorType,
    /// Pre-blend tint.
    pub tint_hex: String,
    /// The theme's color for this key (after fallback), if any.
    pub theme_hex: Option<String>,
    pub final_hex: String,
    /// Effective factor for the key's element.
    pub blend_factor: f64,
    pub enabled: bool,
}

/// A full palette: one [`TintKeyDetail`] per managed key, in
/// [`PaletteKey::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TintResult {
    pub base_hue: f64,
    pub base_tint_hex: String,
    /// Direction every blend rotated in; `None` without theme colors.
    pub hue_direction: Option<HueDirection>,
    pub keys: Vec<TintKeyDetail>,
}

impl TintResult {
    #[must_use]
    pub fn get(&self, key: PaletteKey) -> Option<&TintKeyDetail> {
        self.keys.iter().find(|d| d.key == key)
    }

    pub fn enabled(&self) -> impl Iterator<Item = &TintKeyDetail> {
        self.keys.iter().filter(|d| d.enabled)
    }

    /// Key name → final hex for enabled keys: what gets written to the
    /// host's color customizations.
    #[must_use]
    pub fn enabled_colors(&self) -> BTreeMap<&'static str, String> {
        self.enabled().map(|d| (d.key.name(), d.final_hex.clone())).collect()
    }
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// The display swatch for a base hue: neutral lightness, no blending.
#[must_use]
pub fn base_swatch(base_hue: f64, theme_class: ThemeClass) -> Color {
    let l = if theme_class.is_dark() {
        DARK_SWATCH_LIGHTNESS
    } else {
        LIGHT_SWATCH_LIGHTNESS
    };
    Color::oklch(l, max_chroma(l, base_hue) * SWATCH_CHROMA_FACTOR, base_hue)
}

/// The single rotation direction for a palette.
///
/// Each background key with a chromatic theme color votes for the
/// shorter-arc direction from `base_hue` to that color. The majority
/// wins; ties go clockwise, including the case where nobody votes.
///
/// # Errors
///
/// A malformed theme color.
pub fn majority_hue_direction(base_hue: f64, theme_colors: &ThemeColors) -> Result<HueDirection> {
    let mut clockwise = 0_usize;
    let mut counter_clockwise = 0_usize;

    for key in PaletteKey::ALL.into_iter().filter(|k| k.is_background()) {
        let Some(theme) = theme_colors.resolve(key)? else {
            continue;
        };
        if theme.color.is_achromatic() {
            continue;
        }
        match effective_hue_direction(base_hue, theme.color.h, None) {
            Some(HueDirection::Clockwise) => clockwise += 1,
            Some(HueDirection::CounterClockwise) => counter_clockwise += 1,
            None => {}
        }
    }

    debug!(base_hue, clockwise, counter_clockwise, "hue direction vote");

    Ok(if clockwise >= counter_clockwise {
        HueDirection::Clockwise
    } else {
        HueDirection::CounterClockwise
    })
}

/// Compute the palette for `options`.
///
/// # Errors
///
/// - [`TintError::MissingHueSource`] / [`TintError::InvalidBaseHue`]
/// - [`TintError::BlendFactorOutOfRange`] for the default or any override
/// - [`TintError::Color`] for a malformed theme color
pub fn compute_tint(options: &TintOptions) -> Result<TintResult> {
    options.validate()?;
    let base_hue = options.resolve_base_hue()?;
    debug!(
        base_hue,
        style = %options.style,
        harmony = %options.harmony,
        theme_class = %options.theme_class,
        "computing tint"
    );

    let base_tint_hex = base_swatch(base_hue, options.theme_class).to_hex();

    let hue_direction = options
        .theme_colors
        .as_ref()
        .map(|colors| majority_hue_direction(base_hue, colors))
        .transpose()?;

    let keys = PaletteKey::ALL
        .into_iter()
        .map(|key| resolve_key(options, base_hue, hue_direction, key))
        .collect::<Result<Vec<_>>>()?;

    Ok(TintResult {
        base_hue,
        base_tint_hex,
        hue_direction,
        keys,
    })
}

fn resolve_key(
    options: &TintOptions,
    base_hue: f64,
    hue_direction: Option<HueDirection>,
    key: PaletteKey,
) -> Result<TintKeyDetail> {
    let element = key.element();
    let ctx = ResolveContext {
        base_hue,
        hue_offset: options.harmony.offset(element),
        theme_colors: options.theme_colors.as_ref(),
    };
    let resolved = style::resolve(options.style, options.theme_class, key, &ctx)?;
    let tint_hex = resolved.color.to_hex();

    let theme = options
        .theme_colors
        .as_ref()
        .map(|colors| colors.resolve(key))
        .transpose()?
        .flatten();
    let blend_factor = options.blend_factor_for(element);

    let final_hex = match &theme {
        Some(theme) if blend_factor > 0.0 => blend_toward(
            resolved.color,
            theme.color,
            blend_factor,
            resolved.hue_only_blend,
            hue_direction,
        )
        .to_hex(),
        _ => tint_hex.clone(),
    };

    trace!(%key, %tint_hex, %final_hex, blend_factor, "resolved key");

    Ok(TintKeyDetail {
        key,
        element,
        color_type: key.color_type(),
        tint_hex,
        theme_hex: theme.map(|t| t.hex),
        final_hex,
        blend_factor,
        enabled: options.targets.includes(element),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{EDITOR_BACKGROUND, EDITOR_FOREGROUND};
    use n_color::hue_diff;
    use pretty_assertions::assert_eq;

    fn final_color(result: &TintResult, key: PaletteKey) -> Color {
        Color::hex(&result.get(key).unwrap().final_hex).unwrap()
    }

    #[test]
    fn my_project_snapshot() {
        let options = TintOptions::for_identifier("my-project")
            .with_targets(Targets::TITLE_BAR)
            .with_theme_class(ThemeClass::Dark)
            .with_style(Style::Pastel)
            .with_harmony(Harmony::Uniform);
        let result = compute_tint(&options).unwrap();

        assert_eq!(result.base_hue, 51.0);
        assert_eq!(result.base_tint_hex, "#A05F37");
        assert_eq!(result.hue_direction, None);

        let title = result.get(PaletteKey::TitleBarActiveBackground).unwrap();
        assert_eq!(title.tint_hex, "#564338");
        assert_eq!(title.final_hex, "#564338");
        assert_eq!(title.theme_hex, None);
        assert!(title.enabled);
        assert!(!result.get(PaletteKey::StatusBarBackground).unwrap().enabled);
    }

    #[test]
    fn every_key_is_computed_in_order() {
        let result = compute_tint(&TintOptions::for_hue(10.0).with_targets(Targets::empty())).unwrap();
        let keys: Vec<PaletteKey> = result.keys.iter().map(|d| d.key).collect();
        assert_eq!(keys, PaletteKey::ALL.to_vec());
        assert!(result.keys.iter().all(|d| !d.enabled));
        assert!(result.enabled_colors().is_empty());
    }

    #[test]
    fn enabled_colors_follow_targets() {
        let options = TintOptions::for_hue(200.0).with_targets(Targets::TITLE_BAR | Targets::STATUS_BAR);
        let result = compute_tint(&options).unwrap();
        let colors = result.enabled_colors();
        assert_eq!(colors.len(), 6);
        assert!(colors.contains_key("statusBar.background"));
        assert!(!colors.contains_key("sideBar.background"));
        assert_eq!(
            colors["titleBar.activeForeground"],
            result.get(PaletteKey::TitleBarActiveForeground).unwrap().final_hex
        );
    }

    #[test]
    fn missing_hue_source_fails() {
        assert!(matches!(
            compute_tint(&TintOptions::default()),
            Err(TintError::MissingHueSource)
        ));
    }

    #[test]
    fn non_finite_hue_fails() {
        assert!(matches!(
            compute_tint(&TintOptions::for_hue(f64::NAN)),
            Err(TintError::InvalidBaseHue { .. })
        ));
    }

    #[test]
    fn explicit_hue_beats_identifier() {
        let mut options = TintOptions::for_identifier("my-project");
        options.base_hue = Some(-20.0);
        assert_eq!(options.resolve_base_hue().unwrap(), 340.0);
    }

    #[test]
    fn seed_changes_hue() {
        let plain = TintOptions::for_identifier("my-project").resolve_base_hue().unwrap();
        let seeded = TintOptions::for_identifier("my-project")
            .with_seed(7)
            .resolve_base_hue()
            .unwrap();
        assert_eq!(plain, 51.0);
        assert_eq!(seeded, 93.0);
    }

    #[test]
    fn out_of_range_factors_are_rejected() {
        for bad in [-0.1, 1.5, f64::NAN] {
            let options = TintOptions::for_hue(0.0).with_blend_factor(bad);
            assert!(matches!(compute_tint(&options), Err(TintError::BlendFactorOutOfRange { .. })));

            let options = TintOptions::for_hue(0.0).with_element_blend_factor(Element::SideBar, bad);
            assert!(matches!(compute_tint(&options), Err(TintError::BlendFactorOutOfRange { .. })));
        }
    }

    #[test]
    fn without_theme_final_equals_tint() {
        for style in Style::all() {
            let result = compute_tint(&TintOptions::for_hue(140.0).with_style(*style)).unwrap();
            for detail in &result.keys {
                assert_eq!(detail.final_hex, detail.tint_hex, "{style}/{}", detail.key);
            }
        }
    }

    #[test]
    fn stronger_blend_toward_black_is_darker() {
        let theme = ThemeColors::new().with(EDITOR_BACKGROUND, "#000000");
        let strong = compute_tint(
            &TintOptions::for_identifier("my-project")
                .with_theme_colors(theme.clone())
                .with_blend_factor(0.9),
        )
        .unwrap();
        let weak = compute_tint(
            &TintOptions::for_identifier("my-project")
                .with_theme_colors(theme)
                .with_blend_factor(0.1),
        )
        .unwrap();

        for key in PaletteKey::ALL.into_iter().filter(|k| k.is_background()) {
            let dark = final_color(&strong, key);
            let light = final_color(&weak, key);
            assert!(dark.l + 0.05 < light.l, "{key}: {dark:?} vs {light:?}");
        }
        // Black has no hue to vote with.
        assert_eq!(strong.hue_direction, None);
    }

    #[test]
    fn element_override_beats_default() {
        let theme = ThemeColors::new().with(EDITOR_BACKGROUND, "#1e1e1e");
        let options = TintOptions::for_hue(300.0)
            .with_theme_colors(theme)
            .with_blend_factor(0.6)
            .with_element_blend_factor(Element::StatusBar, 0.0);
        let result = compute_tint(&options).unwrap();

        let status = result.get(PaletteKey::StatusBarBackground).unwrap();
        assert_eq!(status.blend_factor, 0.0);
        assert_eq!(status.final_hex, status.tint_hex);
        assert_eq!(status.theme_hex.as_deref(), Some("#1E1E1E"));

        let title = result.get(PaletteKey::TitleBarActiveBackground).unwrap();
        assert_eq!(title.blend_factor, 0.6);
        assert_ne!(title.final_hex, title.tint_hex);
    }

    #[test]
    fn majority_vote_counts_background_keys() {
        let theme = ThemeColors::new()
            .with("titleBar.activeBackground", "#203501")
            .with("statusBar.background", "#14370C")
            .with("activityBar.background", "#472400")
            // Foregrounds never vote.
            .with("activityBar.foreground", "#472400")
            .with("sideBar.foreground", "#472400");
        assert_eq!(majority_hue_direction(100.0, &theme).unwrap(), HueDirection::Clockwise);
    }

    #[test]
    fn majority_vote_ties_go_clockwise() {
        let theme = ThemeColors::new()
            .with("titleBar.activeBackground", &Color::oklch(0.3, 0.08, 130.0).to_hex())
            .with("statusBar.background", &Color::oklch(0.3, 0.08, 60.0).to_hex());
        assert_eq!(majority_hue_direction(100.0, &theme).unwrap(), HueDirection::Clockwise);
    }

    #[test]
    fn majority_vote_follows_fallback_and_skips_gray() {
        let gray = ThemeColors::new().with(EDITOR_BACKGROUND, "#808080");
        assert_eq!(majority_hue_direction(100.0, &gray).unwrap(), HueDirection::Clockwise);

        let fallback = ThemeColors::new().with(EDITOR_BACKGROUND, &Color::oklch(0.3, 0.08, 60.0).to_hex());
        assert_eq!(majority_hue_direction(100.0, &fallback).unwrap(), HueDirection::CounterClockwise);
    }

    #[test]
    fn no_votes_still_rotates_clockwise() {
        // Gray background abstains; the colored foreground sits counter-clockwise.
        let theme = ThemeColors::new()
            .with(EDITOR_BACKGROUND, "#1E1E1E")
            .with(EDITOR_FOREGROUND, &Color::oklch(0.85, 0.08, 60.0).to_hex());
        let options = TintOptions::for_hue(100.0)
            .with_blend_factor(0.5)
            .with_theme_colors(theme);
        let result = compute_tint(&options).unwrap();
        assert_eq!(result.hue_direction, Some(HueDirection::Clockwise));

        let detail = result.get(PaletteKey::StatusBarForeground).unwrap();
        let tint = Color::hex(&detail.tint_hex).unwrap();
        let fin = final_color(&result, PaletteKey::StatusBarForeground);
        let rotation = wrap_hue(fin.h - tint.h);
        assert!(rotation > 90.0 && rotation < 180.0, "rotated {rotation:.1} to {}", detail.final_hex);
    }

    #[test]
    fn blends_rotate_with_the_majority() {
        // Two themes clockwise of the base hue, one counter-clockwise.
        let theme = ThemeColors::new()
            .with("titleBar.activeBackground", "#203501")
            .with("statusBar.background", "#14370C")
            .with("activityBar.background", "#472400");
        let options = TintOptions::for_hue(100.0)
            .with_style(Style::Vibrant)
            .with_theme_colors(theme);
        let result = compute_tint(&options).unwrap();
        assert_eq!(result.hue_direction, Some(HueDirection::Clockwise));

        for detail in result.keys.iter().filter(|d| d.theme_hex.is_some()) {
            let tint = Color::hex(&detail.tint_hex).unwrap();
            let fin = Color::hex(&detail.final_hex).unwrap();
            let rotation = wrap_hue(fin.h - tint.h);
            assert!(
                rotation > 0.5 && rotation < 180.0,
                "{} rotated {rotation:.1} from {} to {}",
                detail.key,
                detail.tint_hex,
                detail.final_hex
            );
        }
        // The activity bar went the long way round rather than against the others.
        let activity = final_color(&result, PaletteKey::ActivityBarBackground);
        assert!(hue_diff(activity.h, 213.0) < 3.0, "{activity:?}");
    }

    #[test]
    fn harmony_changes_some_element() {
        let uniform = compute_tint(&TintOptions::for_hue(51.0)).unwrap();
        for harmony in Harmony::all().iter().filter(|h| **h != Harmony::Uniform) {
            let other = compute_tint(&TintOptions::for_hue(51.0).with_harmony(*harmony)).unwrap();
            let differs = uniform
                .keys
                .iter()
                .zip(&other.keys)
                .any(|(a, b)| a.final_hex != b.final_hex);
            assert!(differs, "{harmony} matches uniform");
        }
    }

    #[test]
    fn light_swatch_is_lighter() {
        let dark = base_swatch(51.0, ThemeClass::Dark);
        let light = base_swatch(51.0, ThemeClass::HighContrastLight);
        assert!(light.l > dark.l);
        assert!(dark.in_srgb_gamut() && light.in_srgb_gamut());
    }

    #[test]
    fn malformed_theme_color_surfaces() {
        let theme = ThemeColors::new().with("statusBar.background", "#12345");
        let options = TintOptions::for_hue(0.0).with_theme_colors(theme);
        assert!(matches!(compute_tint(&options), Err(TintError::Color(_))));
    }

    #[test]
    fn result_serializes_with_host_names() {
        let result = compute_tint(&TintOptions::for_identifier("my-project")).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["baseTintHex"], "#A05F37");
        assert_eq!(json["keys"][0]["key"], "titleBar.activeBackground");
        assert_eq!(json["keys"][0]["element"], "titleBar");
        assert_eq!(json["keys"][0]["colorType"], "background");
        assert_eq!(json["keys"][0]["tintHex"], "#564338");
    }
}
