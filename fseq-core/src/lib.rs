#![no_std]

//! FSEQ Core - Sequence Format Definitions and Controller Validation
//!
//! This crate decodes uncompressed FSEQ v2 light-show sequences and checks
//! them against the limits of an embedded show controller: header fields,
//! channel layout, show duration and the number of state-change commands
//! the controller has to store.
//!
//! ```
//! use fseq_core::{validate, FseqError};
//!
//! assert_eq!(validate(b"not a sequence file..."), Err(FseqError::Format));
//! ```

#[cfg(any(feature = "alloc", test))]
extern crate alloc;

#[cfg(any(feature = "alloc", test))]
pub mod builder;
pub mod counter;
pub mod error;
pub mod format;
pub mod limits;
pub mod quantize;
pub mod report;
pub mod traits;
pub mod validator;

#[cfg(any(feature = "alloc", test))]
pub use builder::SequenceBuilder;
pub use counter::{count_commands, ChangeCounter, GroupCommands};
pub use error::*;
pub use format::{
    CompressionType, Frame, FrameDecoder, FrameIter, SequenceHeader, ShowDuration,
};
pub use limits::{ControllerLimits, MemoryUsage, Percentage};
pub use quantize::{quantize, ChannelGroup, ChannelGroupState, HalfStep};
pub use report::{ValidationReport, ValidationResult};
pub use traits::SequenceSource;
pub use validator::{validate, Validator};
