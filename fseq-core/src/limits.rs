//! Controller limits and the checks that enforce them

use crate::format::constants;
use crate::format::ShowDuration;
use crate::{FseqError, Result};

/// Hard limits of the target controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerLimits {
    /// Channels every frame must carry
    pub channel_count: u32,
    /// Longest accepted show in whole seconds
    pub max_duration_secs: u64,
    /// Commands the controller can store
    pub command_capacity: u32,
}

impl ControllerLimits {
    /// Limits of the stock controller
    pub const fn new() -> Self {
        Self {
            channel_count: constants::CONTROLLER_CHANNELS,
            max_duration_secs: constants::MAX_DURATION_SECS,
            command_capacity: constants::COMMAND_CAPACITY,
        }
    }

    /// Set the expected channel count
    pub fn with_channel_count(mut self, channel_count: u32) -> Self {
        self.channel_count = channel_count;
        self
    }

    /// Set the longest accepted show in seconds
    pub fn with_max_duration_secs(mut self, secs: u64) -> Self {
        self.max_duration_secs = secs;
        self
    }

    /// Set the command memory size
    pub fn with_command_capacity(mut self, command_capacity: u32) -> Self {
        self.command_capacity = command_capacity;
        self
    }

    /// Longest accepted show in milliseconds
    pub const fn max_duration_ms(&self) -> u64 {
        self.max_duration_secs.saturating_mul(1000)
    }

    /// Reject shows longer than the limit (equal is accepted)
    pub fn check_duration(&self, duration: ShowDuration) -> Result<()> {
        if duration.as_millis() > self.max_duration_ms() {
            return Err(FseqError::Duration {
                actual: duration,
                max_secs: self.max_duration_secs,
            });
        }
        Ok(())
    }

    /// Reject command counts above capacity (full memory is accepted)
    pub fn check_commands(&self, command_count: u32) -> Result<MemoryUsage> {
        let usage = MemoryUsage {
            command_count,
            capacity: self.command_capacity,
        };
        if command_count > self.command_capacity {
            return Err(FseqError::MemoryLimit {
                command_count,
                limit: self.command_capacity,
                percentage: usage.percentage(),
            });
        }
        Ok(usage)
    }
}

impl Default for ControllerLimits {
    fn default() -> Self {
        Self::new()
    }
}

/// Command memory used by a show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryUsage {
    pub command_count: u32,
    pub capacity: u32,
}

impl MemoryUsage {
    /// `command_count / capacity`
    pub fn ratio(&self) -> f64 {
        self.command_count as f64 / self.capacity as f64
    }

    /// Ratio as a percentage rounded to 2 decimals
    pub const fn percentage(&self) -> Percentage {
        Percentage::of(self.command_count, self.capacity)
    }
}

/// Percentage with two decimals, stored in hundredths of a percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Percentage {
    hundredths: u32,
}

impl Percentage {
    /// `part / whole * 100`, rounded half up to 2 decimals
    ///
    /// A zero `whole` saturates.
    pub const fn of(part: u32, whole: u32) -> Self {
        if whole == 0 {
            return Self {
                hundredths: u32::MAX,
            };
        }
        let whole = whole as u64;
        let rounded = (part as u64 * 20_000 + whole) / (2 * whole);
        let hundredths = if rounded > u32::MAX as u64 {
            u32::MAX
        } else {
            rounded as u32
        };
        Self { hundredths }
    }

    /// Hundredths of a percent
    pub const fn hundredths(&self) -> u32 {
        self.hundredths
    }
}

impl core::fmt::Display for Percentage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}%", self.hundredths / 100, self.hundredths % 100)
    }
}
