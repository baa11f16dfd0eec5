//! # n-tint: Workspace Chrome Tinting Engine
//!
//! Turns a workspace identifier into a stable palette for the editor
//! chrome (title bar, status bar, activity bar, side bar). The same
//! identifier always gets the same colors; style, harmony and theme blend
//! settings change how they look, never which hue family they come from.
//!
//! # Architecture
//!
//! ```text
//! identifier + seed
//!     │
//!     ▼
//! hash.rs:     FNV-1a → base hue in [0, 360)
//!     │
//!     ▼
//! harmony.rs:  per-element hue offset
//!     │
//!     ▼
//! style.rs:    (theme class, key) → pre-blend OKLCH tint
//!     │
//!     ▼
//! blend.rs:    move toward the theme color, one rotation direction
//!     │
//!     ▼
//! tint.rs:     TintResult, one record per managed key
//! ```
//!
//! `preview.rs` runs the same pipeline at fixed sample hues, `cache.rs`
//! memoizes results per input fingerprint, and `config.rs` reads the user
//! settings that become [`TintOptions`].
//!
//! # Color Space
//!
//! All math happens in OKLCH through `n-color`. Chroma is always derived
//! from the gamut boundary, so every static color is displayable before
//! it is ever formatted as hex.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Small integer-to-float casts in loops and averages.
#![allow(clippy::cast_precision_loss)]
// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]
// Style tables are one match arm per (class, role).
#![allow(clippy::too_many_lines)]

pub mod blend;
pub mod cache;
pub mod config;
pub mod contrast;
pub mod error;
pub mod harmony;
pub mod hash;
pub mod key;
pub mod preview;
pub mod style;
pub mod theme;
pub mod tint;

pub use blend::{
    HueDirection, blend_directed, blend_toward, check_blend_factor, effective_hue_direction, interpolate_hue,
};
pub use cache::TintCache;
pub use config::TintConfig;
pub use error::{Result, TintError};
pub use harmony::{Harmony, offset_for};
pub use hash::base_hue;
pub use key::{ColorType, Element, PaletteKey, Targets, ToneRole, managed_key_names};
pub use preview::{PREVIEW_HUES, PreviewRow, PreviewSwatch, preview};
pub use style::{ResolveContext, ResolvedTint, Style, Tone};
pub use theme::{ThemeClass, ThemeColor, ThemeColors};
pub use tint::{
    DEFAULT_BLEND_FACTOR, TintKeyDetail, TintOptions, TintResult, base_swatch, compute_tint, majority_hue_direction,
};
