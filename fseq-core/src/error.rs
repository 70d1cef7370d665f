//! Error types for FSEQ validation

use crate::format::{CompressionType, ShowDuration};
use crate::limits::Percentage;

/// Reasons a sequence is rejected
///
/// Every variant is terminal: validation stops at the first one it hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FseqError {
    /// Buffer is shorter than the header or the frame data it declares
    #[error("File is truncated: expected at least {required} bytes, got {actual}")]
    TruncatedData { required: u64, actual: u64 },
    /// Bad magic, version, data offset, frame count or step time
    #[error("Unknown file format, expected FSEQ v2.0")]
    Format,
    /// Channel count does not match the controller layout
    #[error("Expected {expected} channels, got {actual}")]
    ChannelCount { expected: u32, actual: u32 },
    /// Frame data is compressed
    #[error("Expected file format to be V2 {expected}, got {actual}")]
    Compression {
        expected: &'static str,
        actual: CompressionType,
    },
    /// Show runs longer than the controller allows
    #[error("Expected total duration to be at most {max_secs} seconds, got {actual}")]
    Duration { actual: ShowDuration, max_secs: u64 },
    /// Show needs more commands than the controller can store
    #[error(
        "Sequence uses {command_count} commands. The maximum allowed is {limit} ({percentage} of memory)"
    )]
    MemoryLimit {
        command_count: u32,
        limit: u32,
        percentage: Percentage,
    },
}

impl FseqError {
    /// Stable tag for the error kind, used in machine-readable output
    pub const fn kind(&self) -> &'static str {
        match self {
            FseqError::TruncatedData { .. } => "TruncatedDataError",
            FseqError::Format => "FormatError",
            FseqError::ChannelCount { .. } => "ChannelCountError",
            FseqError::Compression { .. } => "CompressionError",
            FseqError::Duration { .. } => "DurationError",
            FseqError::MemoryLimit { .. } => "MemoryLimitError",
        }
    }
}

/// Result type for FSEQ operations
pub type Result<T> = core::result::Result<T, FseqError>;
