//! Side-by-side samples of a style and harmony at fixed hues.
//!
//! A preview ignores the workspace and the theme: each row runs the normal
//! pipeline at one sample hue with no blending, keeping only the primary
//! background/foreground pair of every tintable element.

use serde::Serialize;

use crate::contrast::contrast_ratio_hex;
use crate::error::Result;
use crate::harmony::Harmony;
use crate::key::{Element, PaletteKey, Targets};
use crate::style::Style;
use crate::theme::ThemeClass;
use crate::tint::{TintOptions, compute_tint};

/// Sample hues, one every 60°.
pub const PREVIEW_HUES: [f64; 6] = [0.0, 60.0, 120.0, 180.0, 240.0, 300.0];

/// One element's colors at one sample hue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSwatch {
    pub element: Element,
    pub background: String,
    pub foreground: String,
    /// WCAG contrast ratio between the two.
    pub contrast: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRow {
    pub hue: f64,
    pub swatches: Vec<PreviewSwatch>,
}

/// The background and foreground key a preview shows for `element`.
#[must_use]
pub const fn swatch_keys(element: Element) -> Option<(PaletteKey, PaletteKey)> {
    match element {
        Element::TitleBar => Some((PaletteKey::TitleBarActiveBackground, PaletteKey::TitleBarActiveForeground)),
        Element::StatusBar => Some((PaletteKey::StatusBarBackground, PaletteKey::StatusBarForeground)),
        Element::ActivityBar => Some((PaletteKey::ActivityBarBackground, PaletteKey::ActivityBarForeground)),
        Element::SideBar => Some((PaletteKey::SideBarBackground, PaletteKey::SideBarForeground)),
        Element::Editor => None,
    }
}

/// One row per hue in `hues`.
///
/// # Errors
///
/// Only for a non-finite hue.
pub fn preview(style: Style, harmony: Harmony, theme_class: ThemeClass, hues: &[f64]) -> Result<Vec<PreviewRow>> {
    hues.iter()
        .map(|&hue| -> Result<PreviewRow> {
            let options = TintOptions::for_hue(hue)
                .with_style(style)
                .with_harmony(harmony)
                .with_theme_class(theme_class)
                .with_targets(Targets::all());
            let result = compute_tint(&options)?;

            let swatches = Element::TINTABLE
                .iter()
                .filter_map(|&element| swatch_keys(element).map(|keys| (element, keys)))
                .filter_map(|(element, (bg, fg))| {
                    let background = result.get(bg)?.final_hex.clone();
                    let foreground = result.get(fg)?.final_hex.clone();
                    Some((element, background, foreground))
                })
                .map(|(element, background, foreground)| -> Result<PreviewSwatch> {
                    let contrast = contrast_ratio_hex(&background, &foreground)?;
                    Ok(PreviewSwatch {
                        element,
                        background,
                        foreground,
                        contrast,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(PreviewRow {
                hue: result.base_hue,
                swatches,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
