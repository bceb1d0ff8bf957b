use thiserror::Error;

use crate::config::ConfigError;

/// Unified error type covering data loading, configuration, and I/O.
///
/// Returned by convenience methods like
/// [`MutationData::from_json()`](crate::MutationData::from_json) and
/// [`EngineConfig::from_file()`](crate::EngineConfig::from_file).
/// Problems inside individual rules never show up here; they are reported
/// as [`Diagnostic`](crate::Diagnostic)s instead.
#[derive(Debug, Error)]
pub enum MutagenError {
    #[error("invalid mutation data: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
