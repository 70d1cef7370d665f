//! Frame access over the raw sequence body
//!
//! Frames sit back to back from the header's data offset with a fixed
//! stride. Each holds a light block, a closure block and a reserved gap.

use crate::format::constants::frame::{CLOSURE_CHANNELS, LIGHT_CHANNELS, STRIDE};
use crate::format::SequenceHeader;
use crate::{FseqError, Result};

/// Borrowed view of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Position in the show
    pub index: u32,
    /// Light channel bytes
    pub light: &'a [u8; LIGHT_CHANNELS],
    /// Closure channel bytes
    pub closure: &'a [u8; CLOSURE_CHANNELS],
}

/// Bounds-checked frame access for a validated header
///
/// The whole frame region is checked once in [`FrameDecoder::new`], so
/// iteration never fails part way through.
#[derive(Debug, Clone, Copy)]
pub struct FrameDecoder<'a> {
    data: &'a [u8],
    data_offset: usize,
    frame_count: u32,
}

impl<'a> FrameDecoder<'a> {
    /// Create a decoder, failing if `data` cannot hold every declared frame
    pub fn new(data: &'a [u8], header: &SequenceHeader) -> Result<Self> {
        let required = header.required_len();
        let actual = data.len() as u64;
        if actual < required {
            return Err(FseqError::TruncatedData { required, actual });
        }

        Ok(Self {
            data,
            data_offset: header.data_offset as usize,
            frame_count: header.frame_count,
        })
    }

    /// Random access to a single frame
    pub fn frame(&self, index: u32) -> Option<Frame<'a>> {
        if index >= self.frame_count {
            return None;
        }

        let start = self.data_offset + index as usize * STRIDE;
        let block = self.data.get(start..start + STRIDE)?;
        let light = block[..LIGHT_CHANNELS].try_into().ok()?;
        let closure = block[LIGHT_CHANNELS..LIGHT_CHANNELS + CLOSURE_CHANNELS]
            .try_into()
            .ok()?;

        Some(Frame {
            index,
            light,
            closure,
        })
    }

    /// Iterate frames from the start; can be called any number of times
    pub fn iter(&self) -> FrameIter<'a> {
        FrameIter {
            decoder: *self,
            next: 0,
        }
    }
}

impl<'a> IntoIterator for &FrameDecoder<'a> {
    type Item = Frame<'a>;
    type IntoIter = FrameIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sequential iterator over frames
#[derive(Debug, Clone)]
pub struct FrameIter<'a> {
    decoder: FrameDecoder<'a>,
    next: u32,
}

impl<'a> Iterator for FrameIter<'a> {
    type Item = Frame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.decoder.frame(self.next)?;
        self.next += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.decoder.frame_count - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FrameIter<'_> {}
