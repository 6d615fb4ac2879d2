use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while configuring or running a benchmark.
#[derive(Debug, Error)]
pub enum JuliaError {
    #[error("misaligned point batch: {starts} starting points but {params} parameters")]
    MisalignedBatch { starts: usize, params: usize },

    #[error("grid width must be positive")]
    InvalidWidth,

    #[error("grid width {desired_width} exceeds the limit of {max_point_count} points")]
    GridTooLarge {
        desired_width: u32,
        max_point_count: u64,
    },

    #[error("invalid region: {0}")]
    InvalidRegion(String),

    #[error("pause before compute must be finite and non-negative, got {0}")]
    InvalidPause(f64),

    #[error("unable to read parameter file {path:?}: {source}")]
    ReadParams {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse parameter file {path:?}: {source}")]
    ParseParams {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unable to write report: {0}")]
    Report(#[from] std::io::Error),

    #[error("checksum mismatch: expected {expected}, computed {actual}")]
    ChecksumMismatch { expected: u64, actual: u64 },

    #[error("digest mismatch: expected {expected}, computed {actual}")]
    DigestMismatch { expected: String, actual: String },
}
