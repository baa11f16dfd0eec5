//! Memoized palettes.
//!
//! Computation is pure, so a result can be reused whenever every input is
//! the same. The cache is an ordinary value owned by the caller; two caches
//! never see each other's entries.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use crate::error::Result;
use crate::harmony::Harmony;
use crate::key::{Element, Targets};
use crate::style::Style;
use crate::theme::{ThemeClass, ThemeColors};
use crate::tint::{TintOptions, TintResult, compute_tint};

/// Fingerprint of every [`TintOptions`] field. Floats are compared by bit
/// pattern, so `0.35` and `0.35000000000000003` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    base_hue: Option<u64>,
    identifier: Option<String>,
    seed: i64,
    targets: Targets,
    theme_class: ThemeClass,
    style: Style,
    harmony: Harmony,
    theme_colors: Option<ThemeColors>,
    blend_factor: u64,
    element_blend_factors: Vec<(Element, u64)>,
}

impl From<&TintOptions> for CacheKey {
    fn from(options: &TintOptions) -> Self {
        Self {
            base_hue: options.base_hue.map(f64::to_bits),
            identifier: options.identifier.clone(),
            seed: options.seed,
            targets: options.targets,
            theme_class: options.theme_class,
            style: options.style,
            harmony: options.harmony,
            theme_colors: options.theme_colors.clone(),
            blend_factor: options.blend_factor.to_bits(),
            element_blend_factors: options
                .element_blend_factors
                .iter()
                .map(|(element, factor)| (*element, factor.to_bits()))
                .collect(),
        }
    }
}

/// Results keyed by [`CacheKey`]. Failed computations are not stored.
#[derive(Debug, Default)]
pub struct TintCache {
    entries: HashMap<CacheKey, TintResult>,
    hits: u64,
    misses: u64,
}

impl TintCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached result for `options`, computing and storing it on a miss.
    ///
    /// # Errors
    ///
    /// Whatever [`compute_tint`] returns.
    pub fn get_or_compute(&mut self, options: &TintOptions) -> Result<&TintResult> {
        match self.entries.entry(CacheKey::from(options)) {
            Entry::Occupied(entry) => {
                self.hits += 1;
                debug!(hits = self.hits, "tint cache hit");
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                let result = compute_tint(options)?;
                self.misses += 1;
                debug!(misses = self.misses, base_hue = result.base_hue, "tint cache miss");
                Ok(entry.insert(result))
            }
        }
    }

    /// Lookup without computing.
    #[must_use]
    pub fn get(&self, options: &TintOptions) -> Option<&TintResult> {
        self.entries.get(&CacheKey::from(options))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    #[must_use]
    pub const fn misses(&self) -> u64 {
        self.misses
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
