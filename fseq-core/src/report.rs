//! Successful validation summary

use crate::counter::GroupCommands;
use crate::format::SequenceHeader;
use crate::limits::{MemoryUsage, Percentage};
use crate::FseqError;

/// What the controller needs to play an accepted show
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ValidationReport {
    pub frame_count: u32,
    pub step_time_ms: u8,
    /// `frame_count * step_time_ms / 1000`
    pub duration_secs: f64,
    pub command_count: u32,
    /// `command_count / command_capacity`, at most 1
    pub memory_usage_ratio: f64,
    pub command_capacity: u32,
    pub group_commands: GroupCommands,
}

impl ValidationReport {
    /// Assemble the report for a header whose commands fit in memory
    pub fn new(header: &SequenceHeader, group_commands: GroupCommands, usage: MemoryUsage) -> Self {
        Self {
            frame_count: header.frame_count,
            step_time_ms: header.step_time_ms,
            duration_secs: header.duration().as_secs_f64(),
            command_count: usage.command_count,
            memory_usage_ratio: usage.ratio(),
            command_capacity: usage.capacity,
            group_commands,
        }
    }

    /// Memory usage rounded to 2 decimals
    pub const fn memory_usage_percentage(&self) -> Percentage {
        Percentage::of(self.command_count, self.command_capacity)
    }
}

/// Outcome of validating one sequence
pub type ValidationResult = core::result::Result<ValidationReport, FseqError>;
