//! FSEQ v2 file header
//!
//! The header is little-endian and starts every sequence file. Only the
//! fields the controller cares about are decoded; the remaining bytes
//! (header length, flags, sparse ranges, unique id) are carried through
//! `to_bytes_array` as zeros.

use crate::format::constants::{self, offsets};
use crate::limits::ControllerLimits;
use crate::{FseqError, Result};

/// Fixed header of an FSEQ v2 sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceHeader {
    /// Magic bytes: "PSEQ"
    pub magic: [u8; 4],
    /// Offset of the first frame from file start
    pub data_offset: u16,
    /// Minor format version
    pub version_minor: u8,
    /// Major format version
    pub version_major: u8,
    /// Channels per frame
    pub channel_count: u32,
    /// Number of frames in the show
    pub frame_count: u32,
    /// Milliseconds each frame is displayed
    pub step_time_ms: u8,
    /// Compression byte (0 = uncompressed)
    pub compression_type: u8,
}

impl SequenceHeader {
    /// Magic bytes for v2 sequences
    pub const MAGIC: [u8; 4] = constants::MAGIC;

    /// Size of the encoded fixed header in bytes
    pub const SIZE: usize = 32;

    /// Create a controller-shaped header (48 channels, uncompressed, 50 ms steps)
    pub const fn new() -> Self {
        Self {
            magic: Self::MAGIC,
            data_offset: Self::SIZE as u16,
            version_minor: constants::VERSION_MINOR,
            version_major: constants::VERSION_MAJOR,
            channel_count: constants::CONTROLLER_CHANNELS,
            frame_count: 1,
            step_time_ms: 50,
            compression_type: 0,
        }
    }

    /// Read the raw header fields without checking them
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < constants::HEADER_READ_LEN {
            return Err(FseqError::TruncatedData {
                required: constants::HEADER_READ_LEN as u64,
                actual: bytes.len() as u64,
            });
        }

        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[offsets::MAGIC..offsets::MAGIC + 4]);

        let data_offset = u16::from_le_bytes([
            bytes[offsets::DATA_OFFSET],
            bytes[offsets::DATA_OFFSET + 1],
        ]);
        let channel_count = u32::from_le_bytes([
            bytes[offsets::CHANNEL_COUNT],
            bytes[offsets::CHANNEL_COUNT + 1],
            bytes[offsets::CHANNEL_COUNT + 2],
            bytes[offsets::CHANNEL_COUNT + 3],
        ]);
        let frame_count = u32::from_le_bytes([
            bytes[offsets::FRAME_COUNT],
            bytes[offsets::FRAME_COUNT + 1],
            bytes[offsets::FRAME_COUNT + 2],
            bytes[offsets::FRAME_COUNT + 3],
        ]);

        Ok(Self {
            magic,
            data_offset,
            version_minor: bytes[offsets::VERSION_MINOR],
            version_major: bytes[offsets::VERSION_MAJOR],
            channel_count,
            frame_count,
            step_time_ms: bytes[offsets::STEP_TIME],
            compression_type: bytes[offsets::COMPRESSION],
        })
    }

    /// Read the header and run every header check against `limits`
    pub fn parse(bytes: &[u8], limits: &ControllerLimits) -> Result<Self> {
        let header = Self::from_bytes(bytes)?;
        header.validate(limits)?;
        Ok(header)
    }

    /// True when magic, version, offset, frame count and step time describe a v2.0 file
    pub fn is_valid_format(&self) -> bool {
        self.magic == Self::MAGIC
            && self.data_offset >= constants::MIN_DATA_OFFSET
            && self.frame_count >= 1
            && self.step_time_ms >= constants::MIN_STEP_TIME_MS
            && self.version_minor == constants::VERSION_MINOR
            && self.version_major == constants::VERSION_MAJOR
    }

    /// Check the header in a fixed order, stopping at the first failure
    pub fn validate(&self, limits: &ControllerLimits) -> Result<()> {
        if !self.is_valid_format() {
            return Err(FseqError::Format);
        }

        if self.channel_count != limits.channel_count {
            return Err(FseqError::ChannelCount {
                expected: limits.channel_count,
                actual: self.channel_count,
            });
        }

        let compression = self.compression();
        if compression != CompressionType::None {
            return Err(FseqError::Compression {
                expected: "uncompressed",
                actual: compression,
            });
        }

        limits.check_duration(self.duration())
    }

    /// Decoded compression byte
    pub const fn compression(&self) -> CompressionType {
        CompressionType::from_u8(self.compression_type)
    }

    /// Total show length
    pub const fn duration(&self) -> ShowDuration {
        ShowDuration::from_millis(self.frame_count as u64 * self.step_time_ms as u64)
    }

    /// Bytes of frame data the header declares
    pub const fn frame_data_len(&self) -> u64 {
        self.frame_count as u64 * constants::frame::STRIDE as u64
    }

    /// Minimum file length needed to hold every declared frame
    pub const fn required_len(&self) -> u64 {
        self.data_offset as u64 + self.frame_data_len()
    }

    /// Encode the header (no-std compatible)
    pub const fn to_bytes_array(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];

        bytes[0] = self.magic[0];
        bytes[1] = self.magic[1];
        bytes[2] = self.magic[2];
        bytes[3] = self.magic[3];

        let data_offset = self.data_offset.to_le_bytes();
        bytes[4] = data_offset[0];
        bytes[5] = data_offset[1];
        bytes[6] = self.version_minor;
        bytes[7] = self.version_major;

        // Standard header length
        let header_len = (Self::SIZE as u16).to_le_bytes();
        bytes[8] = header_len[0];
        bytes[9] = header_len[1];

        let channel_count = self.channel_count.to_le_bytes();
        bytes[10] = channel_count[0];
        bytes[11] = channel_count[1];
        bytes[12] = channel_count[2];
        bytes[13] = channel_count[3];

        let frame_count = self.frame_count.to_le_bytes();
        bytes[14] = frame_count[0];
        bytes[15] = frame_count[1];
        bytes[16] = frame_count[2];
        bytes[17] = frame_count[3];

        bytes[18] = self.step_time_ms;
        bytes[20] = self.compression_type;

        bytes
    }
}

impl Default for SequenceHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Compression schemes a v2 header can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompressionType {
    /// Raw frame data
    None,
    /// Zstandard blocks
    Zstd,
    /// zlib blocks
    Zlib,
    /// Any other value
    Unknown(u8),
}

impl CompressionType {
    /// Convert from the header byte
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => CompressionType::None,
            1 => CompressionType::Zstd,
            2 => CompressionType::Zlib,
            other => CompressionType::Unknown(other),
        }
    }

    /// Convert to the header byte
    pub const fn to_u8(self) -> u8 {
        match self {
            CompressionType::None => 0,
            CompressionType::Zstd => 1,
            CompressionType::Zlib => 2,
            CompressionType::Unknown(other) => other,
        }
    }
}

impl core::fmt::Display for CompressionType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CompressionType::None => write!(f, "uncompressed"),
            CompressionType::Zstd => write!(f, "zstd"),
            CompressionType::Zlib => write!(f, "zlib"),
            CompressionType::Unknown(value) => write!(f, "unknown compression {value}"),
        }
    }
}

/// Show length in whole milliseconds
///
/// Displays as `HH:MM:SS.mmm`. Hours are not wrapped at 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ShowDuration {
    millis: u64,
}

impl ShowDuration {
    /// Create from milliseconds
    pub const fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// Whole milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.millis
    }

    /// Seconds as a float, `millis / 1000`
    pub fn as_secs_f64(&self) -> f64 {
        self.millis as f64 / 1000.0
    }
}

impl core::fmt::Display for ShowDuration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let hours = self.millis / 3_600_000;
        let minutes = (self.millis / 60_000) % 60;
        let seconds = (self.millis / 1000) % 60;
        let millis = self.millis % 1000;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn header_bytes(header: &SequenceHeader) -> [u8; SequenceHeader::SIZE] {
        header.to_bytes_array()
    }

    #[test]
    fn test_from_bytes_reads_fields() {
        let mut header = SequenceHeader::new();
        header.data_offset = 24;
        header.frame_count = 0x0102_0304;
        header.step_time_ms = 25;
        header.channel_count = 48;

        let parsed = SequenceHeader::from_bytes(&header_bytes(&header)).unwrap();
        assert_eq!(parsed, header);
        assert_eq!(parsed.frame_count, 0x0102_0304);
    }

    #[test]
    fn test_from_bytes_needs_22_bytes() {
        let bytes = header_bytes(&SequenceHeader::new());
        assert_eq!(
            SequenceHeader::from_bytes(&bytes[..21]),
            Err(FseqError::TruncatedData {
                required: 22,
                actual: 21
            })
        );
        assert!(SequenceHeader::from_bytes(&bytes[..22]).is_ok());
    }

    #[test]
    fn test_format_checks() {
        let limits = ControllerLimits::default();
        let valid = SequenceHeader::new();
        assert_eq!(valid.validate(&limits), Ok(()));

        let mut bad = valid;
        bad.magic = *b"ESEQ";
        assert_eq!(bad.validate(&limits), Err(FseqError::Format));

        let mut bad = valid;
        bad.data_offset = 23;
        assert_eq!(bad.validate(&limits), Err(FseqError::Format));

        let mut bad = valid;
        bad.frame_count = 0;
        assert_eq!(bad.validate(&limits), Err(FseqError::Format));

        let mut bad = valid;
        bad.step_time_ms = 14;
        assert_eq!(bad.validate(&limits), Err(FseqError::Format));

        let mut bad = valid;
        bad.version_major = 1;
        assert_eq!(bad.validate(&limits), Err(FseqError::Format));

        let mut bad = valid;
        bad.version_minor = 1;
        assert_eq!(bad.validate(&limits), Err(FseqError::Format));
    }

    #[test]
    fn test_checks_short_circuit_in_order() {
        let limits = ControllerLimits::default();

        // Wrong format wins over wrong channels and compression
        let mut header = SequenceHeader::new();
        header.step_time_ms = 10;
        header.channel_count = 50;
        header.compression_type = 1;
        assert_eq!(header.validate(&limits), Err(FseqError::Format));

        // Wrong channels wins over compression and duration
        header.step_time_ms = 255;
        header.frame_count = 100_000;
        assert_eq!(
            header.validate(&limits),
            Err(FseqError::ChannelCount {
                expected: 48,
                actual: 50
            })
        );

        // Compression wins over duration
        header.channel_count = 48;
        assert_eq!(
            header.validate(&limits),
            Err(FseqError::Compression {
                expected: "uncompressed",
                actual: CompressionType::Zstd
            })
        );

        header.compression_type = 0;
        assert!(matches!(
            header.validate(&limits),
            Err(FseqError::Duration { max_secs: 300, .. })
        ));
    }

    #[test]
    fn test_duration_boundary() {
        let limits = ControllerLimits::default();
        let mut header = SequenceHeader::new();
        header.step_time_ms = 15;

        header.frame_count = 20_000;
        assert_eq!(header.duration().as_secs_f64(), 300.0);
        assert_eq!(header.validate(&limits), Ok(()));

        header.frame_count = 20_001;
        assert_eq!(
            header.validate(&limits),
            Err(FseqError::Duration {
                actual: ShowDuration::from_millis(300_015),
                max_secs: 300
            })
        );
    }

    #[test]
    fn test_duration_display() {
        assert_eq!(ShowDuration::from_millis(15).to_string(), "00:00:00.015");
        assert_eq!(ShowDuration::from_millis(300_015).to_string(), "00:05:00.015");
        assert_eq!(
            ShowDuration::from_millis(25 * 3_600_000 + 61_001).to_string(),
            "25:01:01.001"
        );
    }

    #[test]
    fn test_required_len() {
        let mut header = SequenceHeader::new();
        header.data_offset = 24;
        header.frame_count = 3;
        assert_eq!(header.required_len(), 24 + 3 * 48);

        header.frame_count = u32::MAX;
        assert_eq!(header.required_len(), 24 + u32::MAX as u64 * 48);
    }

    #[test]
    fn test_compression_type_round_trip() {
        for value in 0..=u8::MAX {
            assert_eq!(CompressionType::from_u8(value).to_u8(), value);
        }
        assert_eq!(CompressionType::from_u8(0), CompressionType::None);
        assert_eq!(CompressionType::from_u8(2), CompressionType::Zlib);
        assert_eq!(CompressionType::from_u8(9), CompressionType::Unknown(9));
    }
}
