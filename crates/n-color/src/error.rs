// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors produced while decoding colors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The string is not six hex digits with an optional leading `#`.
    #[error("invalid hex color {input:?}: expected #RRGGBB")]
    InvalidHex { input: String },
}
