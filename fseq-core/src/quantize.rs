//! Channel group quantization
//!
//! Turns the raw bytes of one frame into the four states the controller
//! tracks. Fractional levels are kept as exact half-steps so two states
//! compare equal exactly when the controller would see no change.

use crate::format::constants::frame::{
    CLOSURE_CHANNELS, CLOSURE_SPLIT, LIGHT_CHANNELS, RAMP_CHANNELS,
};
use crate::format::Frame;

/// Ramp levels above this are clamped (3.0)
const MAX_RAMP: HalfStep = HalfStep(6);

/// Light bytes per ramp bucket
const RAMP_BUCKET: u8 = 13;

/// Closure bytes per position bucket
const CLOSURE_BUCKET: u8 = 32;

/// A level that is a multiple of 0.5, stored as twice its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HalfStep(u8);

impl HalfStep {
    /// Create from a count of half-steps
    pub const fn from_halves(halves: u8) -> Self {
        Self(halves)
    }

    /// Count of half-steps
    pub const fn halves(self) -> u8 {
        self.0
    }

    /// Level as a float (0.5 steps are exact)
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / 2.0
    }
}

/// Channel groups the controller emits commands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelGroup {
    Light,
    Ramp,
    Closure1,
    Closure2,
}

impl ChannelGroup {
    /// All groups in command order
    pub const ALL: [ChannelGroup; 4] = [
        ChannelGroup::Light,
        ChannelGroup::Ramp,
        ChannelGroup::Closure1,
        ChannelGroup::Closure2,
    ];

    /// Lowercase name for display
    pub const fn name(self) -> &'static str {
        match self {
            ChannelGroup::Light => "light",
            ChannelGroup::Ramp => "ramp",
            ChannelGroup::Closure1 => "closure 1",
            ChannelGroup::Closure2 => "closure 2",
        }
    }
}

impl core::fmt::Display for ChannelGroup {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Quantized states of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelGroupState {
    /// On/off per light channel
    pub light: [u8; LIGHT_CHANNELS],
    /// Ramp level per dimmable light, 0 to 3
    pub ramp: [HalfStep; RAMP_CHANNELS],
    /// First closure positions
    pub closure_1: [HalfStep; CLOSURE_SPLIT],
    /// Remaining closure positions
    pub closure_2: [HalfStep; CLOSURE_CHANNELS - CLOSURE_SPLIT],
}

impl ChannelGroupState {
    /// Quantize raw light and closure bytes
    pub fn from_bytes(light: &[u8; LIGHT_CHANNELS], closure: &[u8; CLOSURE_CHANNELS]) -> Self {
        let mut state = Self {
            light: [0; LIGHT_CHANNELS],
            ramp: [HalfStep::default(); RAMP_CHANNELS],
            closure_1: [HalfStep::default(); CLOSURE_SPLIT],
            closure_2: [HalfStep::default(); CLOSURE_CHANNELS - CLOSURE_SPLIT],
        };

        for (out, &byte) in state.light.iter_mut().zip(light) {
            *out = light_level(byte);
        }
        for (out, &byte) in state.ramp.iter_mut().zip(&light[..RAMP_CHANNELS]) {
            *out = ramp_level(byte);
        }

        let (first, second) = closure.split_at(CLOSURE_SPLIT);
        for (out, &byte) in state.closure_1.iter_mut().zip(first) {
            *out = closure_level(byte);
        }
        for (out, &byte) in state.closure_2.iter_mut().zip(second) {
            *out = closure_level(byte);
        }

        state
    }
}

impl From<&Frame<'_>> for ChannelGroupState {
    fn from(frame: &Frame<'_>) -> Self {
        Self::from_bytes(frame.light, frame.closure)
    }
}

/// Quantize one frame
pub fn quantize(frame: &Frame<'_>) -> ChannelGroupState {
    ChannelGroupState::from(frame)
}

/// 1 when the light is on
pub const fn light_level(byte: u8) -> u8 {
    if byte > 127 {
        1
    } else {
        0
    }
}

/// `min((floor(v / 13) + 1) / 2, 3)` where `v` folds bytes above 127 back down
pub const fn ramp_level(byte: u8) -> HalfStep {
    let magnitude = if byte > 127 { 255 - byte } else { byte };
    let halves = magnitude / RAMP_BUCKET + 1;
    if halves > MAX_RAMP.0 {
        MAX_RAMP
    } else {
        HalfStep(halves)
    }
}

/// `(floor(b / 32) + 1) / 2`
pub const fn closure_level(byte: u8) -> HalfStep {
    HalfStep(byte / CLOSURE_BUCKET + 1)
}
