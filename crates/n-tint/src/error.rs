use std::path::PathBuf;

use n_color::ColorError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TintError>;

/// Everything the tinting engine can reject.
///
/// Every variant is a caller input problem. Valid input never produces
/// an error.
#[derive(Debug, Error)]
pub enum TintError {
    #[error(transparent)]
    Color(#[from] ColorError),

    #[error("no hue source: supply a base hue or a workspace identifier")]
    MissingHueSource,

    #[error("base hue {hue} is not a finite angle")]
    InvalidBaseHue { hue: f64 },

    #[error("blend factor {factor} is outside [0, 1]")]
    BlendFactorOutOfRange { factor: f64 },

    #[error("unknown style: {name}")]
    UnknownStyle { name: String },

    #[error("unknown harmony: {name}")]
    UnknownHarmony { name: String },

    #[error("unknown element: {name}")]
    UnknownElement { name: String },

    #[error("unknown theme class: {name}")]
    UnknownThemeClass { name: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
