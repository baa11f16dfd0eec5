// SPDX-License-Identifier: MIT
//
// n-color: OKLCH color math for n-chrome.
//
// Everything the tinting engine needs from color science lives here:
// hex parsing and formatting, the sRGB ↔ OKLCH pipeline, the sRGB gamut
// boundary (`max_chroma`), and wrapped hue arithmetic. The crate is pure
// and allocation-free apart from hex string formatting.

pub mod color;
pub mod error;

pub use color::{
    Color, hex_to_oklch, hue_diff, linear_to_srgb, max_chroma, oklch_to_hex, srgb_to_linear, wrap_hue,
};
pub use error::ColorError;
