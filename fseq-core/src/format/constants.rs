//! Format constants for FSEQ v2 sequences and the controller frame layout

/// Magic bytes at the start of every v2 sequence
pub const MAGIC: [u8; 4] = *b"PSEQ";

/// Supported major version
pub const VERSION_MAJOR: u8 = 2;

/// Supported minor version
pub const VERSION_MINOR: u8 = 0;

/// Bytes that must be present to read every fixed header field
pub const HEADER_READ_LEN: usize = 22;

/// Smallest legal offset of the frame data
pub const MIN_DATA_OFFSET: u16 = 24;

/// Shortest step time the controller can play back
pub const MIN_STEP_TIME_MS: u8 = 15;

/// Channels the controller expects in every frame
pub const CONTROLLER_CHANNELS: u32 = frame::STRIDE as u32;

/// Longest show the controller accepts, in seconds
pub const MAX_DURATION_SECS: u64 = 300;

/// Commands the controller can hold in memory
pub const COMMAND_CAPACITY: u32 = 681;

/// Header field offsets
pub mod offsets {
    pub const MAGIC: usize = 0;
    pub const DATA_OFFSET: usize = 4;
    pub const VERSION_MINOR: usize = 6;
    pub const VERSION_MAJOR: usize = 7;
    pub const CHANNEL_COUNT: usize = 10;
    pub const FRAME_COUNT: usize = 14;
    pub const STEP_TIME: usize = 18;
    pub const COMPRESSION: usize = 20;
}

/// Controller frame layout
pub mod frame {
    /// Light channels at the start of each frame
    pub const LIGHT_CHANNELS: usize = 30;

    /// Light channels that also drive a ramp level
    pub const RAMP_CHANNELS: usize = 14;

    /// Closure channels following the light block
    pub const CLOSURE_CHANNELS: usize = 16;

    /// Closure channels reported through the first closure group
    pub const CLOSURE_SPLIT: usize = 10;

    /// Unused bytes closing each frame
    pub const RESERVED: usize = 2;

    /// Distance between consecutive frames
    pub const STRIDE: usize = LIGHT_CHANNELS + CLOSURE_CHANNELS + RESERVED;
}
