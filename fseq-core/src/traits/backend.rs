//! Byte source abstraction for sequence data
//!
//! Validation only needs the whole file as one contiguous slice. Anything
//! that can lend one (owned buffers, memory maps, downloaded bodies) can be
//! validated without copying.

/// A complete sequence file held in memory
pub trait SequenceSource {
    /// The raw file bytes
    fn as_bytes(&self) -> &[u8];

    /// File size in bytes
    fn size(&self) -> usize {
        self.as_bytes().len()
    }
}

impl SequenceSource for [u8] {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

impl<const N: usize> SequenceSource for [u8; N] {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

#[cfg(any(feature = "alloc", test))]
impl SequenceSource for alloc::vec::Vec<u8> {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_defaults_to_slice_len() {
        let bytes = [1u8, 2, 3];
        assert_eq!(bytes.size(), 3);
        assert_eq!(bytes[..2].size(), 2);
        assert_eq!(alloc::vec![0u8; 10].size(), 10);
    }
}
