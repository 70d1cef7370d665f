//! FSEQ - Light-show sequence validation with I/O front ends
//!
//! Checks uncompressed FSEQ v2 sequences against the limits of an embedded
//! show controller, reading them from disk, from uploads or from a URL.
//!
//! ## Architecture
//!
//! - **fseq-core**: Format definitions and the validation scan (no I/O, `no_std`)
//! - **fseq**: Files, batches, configuration, the upload server and the CLI
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fseq::{SequenceFile, Validator};
//!
//! fn example() -> fseq::Result<()> {
//!     let file = SequenceFile::open("show.fseq")?;
//!     match file.validate(&Validator::default()) {
//!         Ok(report) => println!(
//!             "{} commands, {} of controller memory",
//!             report.command_count,
//!             report.memory_usage_percentage()
//!         ),
//!         Err(error) => println!("rejected: {error}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **mmap**: Memory-mapped file access
//! - **serde**: JSON configuration and upload responses
//! - **http**: Upload validation server and remote fetches
//! - **cli**: The `fseq` binary

pub use fseq_core::{
    // Validation
    validate, Validator, ValidationReport, ValidationResult,
    // Limits and counts
    ChannelGroup, ControllerLimits, GroupCommands, MemoryUsage, Percentage,
    // Format definitions
    CompressionType, SequenceBuilder, SequenceHeader, SequenceSource, ShowDuration,
    // Error handling
    FseqError,
};

pub mod batch;
#[cfg(feature = "serde")]
pub mod config;
pub mod error;
pub mod file_backend;
pub mod http_backend;
#[cfg(feature = "serde")]
pub mod response;

pub use batch::{map_files, validate_files, FileOutcome};
pub use error::{Error, Result};
pub use file_backend::{validate_file, SequenceFile};

#[cfg(feature = "serde")]
pub use config::{ServerConfig, ValidatorConfig};
#[cfg(feature = "serde")]
pub use response::{FileInfo, MissingUpload, UploadResponse, ValidationSummary};
