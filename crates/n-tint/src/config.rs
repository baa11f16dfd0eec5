//! User configuration for tinting, as read from a JSON file.
//!
//! ```json
//! {
//!   "targets": ["titleBar", "statusBar"],
//!   "style": "pastel",
//!   "harmony": "complementary",
//!   "blendFactor": 0.35,
//!   "elementBlendFactors": { "statusBar": 0.0 },
//!   "seed": 0,
//!   "hueOverride": null
//! }
//! ```
//!
//! Names stay strings until [`TintConfig::into_options`], which parses
//! them case-insensitively and reports the first unknown one.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TintError};
use crate::harmony::Harmony;
use crate::key::{Element, Targets};
use crate::style::Style;
use crate::theme::{ThemeClass, ThemeColors};
use crate::tint::{DEFAULT_BLEND_FACTOR, TintOptions};

/// Tinting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TintConfig {
    /// Elements to tint.
    #[serde(default = "default_targets")]
    pub targets: Vec<String>,

    #[serde(default = "default_style")]
    pub style: String,

    #[serde(default = "default_harmony")]
    pub harmony: String,

    /// How far each color moves toward the theme, in [0, 1].
    #[serde(default = "default_blend_factor")]
    pub blend_factor: f64,

    /// Per-element blend factors, keyed by element name.
    #[serde(default)]
    pub element_blend_factors: BTreeMap<String, f64>,

    /// Shifts every workspace to a different hue.
    #[serde(default)]
    pub seed: i64,

    /// Fixed hue, replacing the hashed one.
    #[serde(default)]
    pub hue_override: Option<f64>,
}

fn default_targets() -> Vec<String> {
    Element::TINTABLE.iter().map(|e| e.name().to_owned()).collect()
}

fn default_style() -> String {
    Style::default().name().to_owned()
}

fn default_harmony() -> String {
    Harmony::default().name().to_owned()
}

const fn default_blend_factor() -> f64 {
    DEFAULT_BLEND_FACTOR
}

impl Default for TintConfig {
    fn default() -> Self {
        Self {
            targets: default_targets(),
            style: default_style(),
            harmony: default_harmony(),
            blend_factor: default_blend_factor(),
            element_blend_factors: BTreeMap::new(),
            seed: 0,
            hue_override: None,
        }
    }
}

impl TintConfig {
    /// Read a config from a JSON file.
    ///
    /// # Errors
    ///
    /// [`TintError::Io`] if the file cannot be read, [`TintError::Json`] if
    /// it is not a valid config.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| TintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| TintError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parsed target set.
    ///
    /// # Errors
    ///
    /// [`TintError::UnknownElement`] for a name that is not an element.
    pub fn parsed_targets(&self) -> Result<Targets> {
        self.targets
            .iter()
            .map(|name| name.parse::<Element>())
            .collect::<Result<Targets>>()
    }

    /// Build [`TintOptions`] for one workspace.
    ///
    /// `hueOverride`, when set, wins over `identifier`.
    ///
    /// # Errors
    ///
    /// The first unknown style, harmony or element name.
    pub fn into_options(
        self,
        identifier: Option<String>,
        theme_class: ThemeClass,
        theme_colors: Option<ThemeColors>,
    ) -> Result<TintOptions> {
        let targets = self.parsed_targets()?;
        let style: Style = self.style.parse()?;
        let harmony: Harmony = self.harmony.parse()?;
        let element_blend_factors = self
            .element_blend_factors
            .iter()
            .map(|(name, factor)| name.parse::<Element>().map(|element| (element, *factor)))
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(TintOptions {
            base_hue: self.hue_override,
            identifier,
            seed: self.seed,
            targets,
            theme_class,
            style,
            harmony,
            theme_colors,
            blend_factor: self.blend_factor,
            element_blend_factors,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn empty_object_is_the_default() {
        let config: TintConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TintConfig::default());
        assert_eq!(config.blend_factor, 0.35);
        assert_eq!(config.parsed_targets().unwrap(), Targets::all());
    }

    #[test]
    fn parses_camel_case_fields() {
        let config: TintConfig = serde_json::from_str(
            r#"{
                "targets": ["titleBar", "statusBar"],
                "style": "Vibrant",
                "harmony": "split-complementary",
                "blendFactor": 0.5,
                "elementBlendFactors": { "statusBar": 0.0 },
                "seed": 3,
                "hueOverride": 120.0
            }"#,
        )
        .unwrap();

        let options = config
            .into_options(Some("repo".to_owned()), ThemeClass::Light, None)
            .unwrap();
        assert_eq!(options.targets, Targets::TITLE_BAR | Targets::STATUS_BAR);
        assert_eq!(options.style, Style::Vibrant);
        assert_eq!(options.harmony, Harmony::SplitComplementary);
        assert_eq!(options.blend_factor, 0.5);
        assert_eq!(options.blend_factor_for(Element::StatusBar), 0.0);
        assert_eq!(options.blend_factor_for(Element::TitleBar), 0.5);
        assert_eq!(options.seed, 3);
        assert_eq!(options.resolve_base_hue().unwrap(), 120.0);
    }

    #[test]
    fn unknown_names_are_reported() {
        let config = TintConfig {
            style: "loud".to_owned(),
            ..TintConfig::default()
        };
        assert!(matches!(
            config.into_options(None, ThemeClass::Dark, None),
            Err(TintError::UnknownStyle { name }) if name == "loud"
        ));

        let config = TintConfig {
            targets: vec!["menuBar".to_owned()],
            ..TintConfig::default()
        };
        assert!(matches!(
            config.into_options(None, ThemeClass::Dark, None),
            Err(TintError::UnknownElement { .. })
        ));

        let mut config = TintConfig::default();
        config.element_blend_factors.insert("panel".to_owned(), 0.1);
        assert!(matches!(
            config.into_options(None, ThemeClass::Dark, None),
            Err(TintError::UnknownElement { .. })
        ));
    }

    #[test]
    fn load_reads_a_file() {
        let path = std::env::temp_dir().join(format!("n-tint-config-{}.json", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        write!(file, r#"{{"style": "neon", "seed": 9}}"#).unwrap();
        drop(file);

        let config = TintConfig::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.style, "neon");
        assert_eq!(config.seed, 9);
        assert_eq!(config.harmony, "uniform");
    }

    #[test]
    fn load_reports_missing_and_malformed_files() {
        let missing = std::env::temp_dir().join("n-tint-config-does-not-exist.json");
        assert!(matches!(TintConfig::load(&missing), Err(TintError::Io { .. })));

        let path = std::env::temp_dir().join(format!("n-tint-config-bad-{}.json", std::process::id()));
        fs::write(&path, "{ not json").unwrap();
        let result = TintConfig::load(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(TintError::Json { .. })));
    }
}
