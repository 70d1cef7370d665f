//! Command counting over a frame sequence
//!
//! Each channel group is an independent controller output that needs one
//! command whenever its quantized state differs from the previous frame.
//! The counter is a plain value folded over the frames.

use crate::format::constants::frame::{
    CLOSURE_CHANNELS, CLOSURE_SPLIT, LIGHT_CHANNELS, RAMP_CHANNELS,
};
use crate::format::Frame;
use crate::quantize::{quantize, ChannelGroup, ChannelGroupState, HalfStep};

/// Commands needed per channel group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GroupCommands {
    pub light: u32,
    pub ramp: u32,
    pub closure_1: u32,
    pub closure_2: u32,
}

impl GroupCommands {
    /// Commands for a single group
    pub const fn get(&self, group: ChannelGroup) -> u32 {
        match group {
            ChannelGroup::Light => self.light,
            ChannelGroup::Ramp => self.ramp,
            ChannelGroup::Closure1 => self.closure_1,
            ChannelGroup::Closure2 => self.closure_2,
        }
    }

    /// Commands across all groups
    pub const fn total(&self) -> u32 {
        self.light
            .saturating_add(self.ramp)
            .saturating_add(self.closure_1)
            .saturating_add(self.closure_2)
    }
}

/// Previous states plus the running tally
///
/// A `None` previous state never equals a current one, so the first
/// frame always costs one command per group.
#[derive(Debug, Clone, Default)]
pub struct ChangeCounter {
    light: Option<[u8; LIGHT_CHANNELS]>,
    ramp: Option<[HalfStep; RAMP_CHANNELS]>,
    closure_1: Option<[HalfStep; CLOSURE_SPLIT]>,
    closure_2: Option<[HalfStep; CLOSURE_CHANNELS - CLOSURE_SPLIT]>,
    commands: GroupCommands,
}

impl ChangeCounter {
    /// Counter with empty previous states
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one frame's state into the counter
    pub fn step(mut self, state: &ChannelGroupState) -> Self {
        self.commands.light += track(&mut self.light, state.light);
        self.commands.ramp += track(&mut self.ramp, state.ramp);
        self.commands.closure_1 += track(&mut self.closure_1, state.closure_1);
        self.commands.closure_2 += track(&mut self.closure_2, state.closure_2);
        self
    }

    /// Total commands so far
    pub fn command_count(&self) -> u32 {
        self.commands.total()
    }

    /// Commands so far, per group
    pub fn commands(&self) -> GroupCommands {
        self.commands
    }
}

/// Replace `previous` and return 1 when `current` differs from it
fn track<T: PartialEq>(previous: &mut Option<T>, current: T) -> u32 {
    if previous.as_ref() == Some(&current) {
        return 0;
    }
    *previous = Some(current);
    1
}

/// Count commands for a frame sequence
pub fn count_commands<'a, I>(frames: I) -> GroupCommands
where
    I: IntoIterator<Item = Frame<'a>>,
{
    frames
        .into_iter()
        .fold(ChangeCounter::new(), |counter, frame| {
            counter.step(&quantize(&frame))
        })
        .commands()
}
