//! Single-pass sequence validation
//!
//! Header checks run first and stop at the first failure. Only then is
//! the frame region bounds-checked and scanned once to count commands.

use crate::counter::count_commands;
use crate::format::{FrameDecoder, SequenceHeader};
use crate::limits::ControllerLimits;
use crate::report::{ValidationReport, ValidationResult};
use crate::traits::SequenceSource;

/// Validates sequences against a fixed set of controller limits
///
/// Holds no per-call state, so one validator can be shared between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    limits: ControllerLimits,
}

impl Validator {
    /// Validator for the given limits
    pub const fn new(limits: ControllerLimits) -> Self {
        Self { limits }
    }

    /// Limits this validator enforces
    pub fn limits(&self) -> &ControllerLimits {
        &self.limits
    }

    /// Validate a complete sequence held in memory
    pub fn validate(&self, bytes: &[u8]) -> ValidationResult {
        let header = SequenceHeader::parse(bytes, &self.limits)?;
        tracing::debug!(
            frames = header.frame_count,
            step_time_ms = header.step_time_ms,
            data_offset = header.data_offset,
            "sequence header accepted"
        );

        let frames = FrameDecoder::new(bytes, &header)?;
        let commands = count_commands(&frames);
        tracing::debug!(
            commands = commands.total(),
            light = commands.light,
            ramp = commands.ramp,
            closure_1 = commands.closure_1,
            closure_2 = commands.closure_2,
            "commands counted"
        );

        let usage = self.limits.check_commands(commands.total())?;
        Ok(ValidationReport::new(&header, commands, usage))
    }

    /// Validate any byte source
    pub fn validate_source<S: SequenceSource + ?Sized>(&self, source: &S) -> ValidationResult {
        self.validate(source.as_bytes())
    }
}

/// Validate against the stock controller limits
pub fn validate(bytes: &[u8]) -> ValidationResult {
    Validator::default().validate(bytes)
}
