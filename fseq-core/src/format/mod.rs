//! Binary format definitions for FSEQ v2 sequences
//!
//! Pure layout definitions and decoding. No I/O.

pub mod constants;
pub mod frame;
pub mod header;

pub use frame::{Frame, FrameDecoder, FrameIter};
pub use header::{CompressionType, SequenceHeader, ShowDuration};
