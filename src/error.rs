//! Error types for the gamma tuning controller.

/// Errors that can occur while tuning or restoring gamma tables.
#[derive(Debug, thiserror::Error)]
pub enum GammaError {
    /// The device line held fewer fields than a full gamma table.
    #[error("malformed gamma table: expected {} fields, found {found}", crate::table::FIELD_COUNT)]
    MalformedTable {
        /// Number of fields actually present.
        found: usize,
    },

    /// A field in the device line was not a decimal integer.
    #[error("invalid gamma field at index {index}: {token:?}")]
    InvalidField {
        /// Zero-based field index of the offending token.
        index: usize,
        /// The token that failed to parse.
        token: String,
    },

    /// An I/O error occurred reading or writing a device file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings store file could not be encoded or decoded.
    #[error("settings store error: {0}")]
    Store(#[from] serde_json::Error),
}
