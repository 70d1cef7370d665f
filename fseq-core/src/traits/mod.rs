//! Abstract interfaces shared with I/O backends

pub mod backend;

pub use backend::SequenceSource;
