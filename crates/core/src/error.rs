/// Result alias that carries the custom [`FluxError`] type.
pub type Result<T> = std::result::Result<T, FluxError>;

/// Common error type for the core crate.
///
/// The widget model itself never fails; these variants only appear where
/// text is parsed or a host writes to disk.
#[derive(Debug, thiserror::Error)]
pub enum FluxError {
    /// Color text that is not `#RRGGBB` or `#RGB`.
    #[error("invalid color `{0}`, expected #RRGGBB")]
    InvalidColor(String),
    /// Lookup of a gradient preset that is not in the preset table.
    #[error("unknown gradient preset `{0}`")]
    UnknownPreset(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Malformed configuration or state documents.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
