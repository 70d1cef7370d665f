//! Writer for uncompressed v2 sequences (requires alloc)

use alloc::vec::Vec;

use crate::format::constants::{
    frame::{CLOSURE_CHANNELS, LIGHT_CHANNELS, STRIDE},
    HEADER_READ_LEN,
};
use crate::format::SequenceHeader;

/// Builds sequence files frame by frame
///
/// The header's frame count follows the pushed frames unless
/// [`declared_frames`](Self::declared_frames) overrides it.
#[derive(Debug, Clone, Default)]
pub struct SequenceBuilder {
    header: SequenceHeader,
    frames: Vec<[u8; STRIDE]>,
    declared_frames: Option<u32>,
}

impl SequenceBuilder {
    /// Builder with a controller-shaped header and no frames
    pub fn new() -> Self {
        Self::default()
    }

    /// Set where frame data begins
    pub fn data_offset(mut self, data_offset: u16) -> Self {
        self.header.data_offset = data_offset;
        self
    }

    /// Set the step time in milliseconds
    pub fn step_time_ms(mut self, step_time_ms: u8) -> Self {
        self.header.step_time_ms = step_time_ms;
        self
    }

    /// Set the channel count written to the header
    pub fn channel_count(mut self, channel_count: u32) -> Self {
        self.header.channel_count = channel_count;
        self
    }

    /// Set the raw compression byte
    pub fn compression_type(mut self, compression_type: u8) -> Self {
        self.header.compression_type = compression_type;
        self
    }

    /// Write `frame_count` to the header regardless of the frames pushed
    pub fn declared_frames(mut self, frame_count: u32) -> Self {
        self.declared_frames = Some(frame_count);
        self
    }

    /// Append one frame
    pub fn frame(mut self, light: &[u8; LIGHT_CHANNELS], closure: &[u8; CLOSURE_CHANNELS]) -> Self {
        self.push_frame(light, closure);
        self
    }

    /// Append the same frame `count` times
    pub fn repeat_frame(
        mut self,
        light: &[u8; LIGHT_CHANNELS],
        closure: &[u8; CLOSURE_CHANNELS],
        count: usize,
    ) -> Self {
        let encoded = encode_frame(light, closure);
        self.frames.extend(core::iter::repeat(encoded).take(count));
        self
    }

    /// Append one frame in place
    pub fn push_frame(&mut self, light: &[u8; LIGHT_CHANNELS], closure: &[u8; CLOSURE_CHANNELS]) {
        self.frames.push(encode_frame(light, closure));
    }

    /// Header as it will be written
    pub fn header(&self) -> SequenceHeader {
        let mut header = self.header;
        header.frame_count = self
            .declared_frames
            .unwrap_or(self.frames.len() as u32);
        header
    }

    /// Encode the file
    ///
    /// The fixed header is cut or zero-padded to the data offset, but never
    /// shorter than the bytes the header fields occupy.
    pub fn build(&self) -> Vec<u8> {
        let header = self.header();
        let body_start = (header.data_offset as usize).max(HEADER_READ_LEN);

        let mut bytes = Vec::with_capacity(body_start + self.frames.len() * STRIDE);
        bytes.extend_from_slice(&header.to_bytes_array());
        bytes.resize(body_start, 0);
        for frame in &self.frames {
            bytes.extend_from_slice(frame);
        }
        bytes
    }
}

fn encode_frame(light: &[u8; LIGHT_CHANNELS], closure: &[u8; CLOSURE_CHANNELS]) -> [u8; STRIDE] {
    let mut frame = [0u8; STRIDE];
    frame[..LIGHT_CHANNELS].copy_from_slice(light);
    frame[LIGHT_CHANNELS..LIGHT_CHANNELS + CLOSURE_CHANNELS].copy_from_slice(closure);
    frame
}
