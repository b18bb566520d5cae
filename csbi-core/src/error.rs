//! Error types for CSBI frame operations
//!
//! Every failure is recoverable at polling-cycle granularity: the caller logs
//! it, skips the cycle and keeps its last known-good reading.

use crate::constants::Marker;

/// Errors raised while locating a frame inside a raw buffer
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    /// A frame delimiter is missing from the capture
    #[cfg_attr(feature = "std", error("{0} marker not found in buffer"))]
    MarkerNotFound(Marker),
}

/// Errors raised while verifying or decoding a candidate frame
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Frame cannot hold the envelope plus the device header
    #[cfg_attr(feature = "std", error("Frame too short: {len} bytes, need at least {min}"))]
    FrameTooShort {
        /// Length of the rejected frame.
        len: usize,
        /// Minimum length for the requested header size.
        min: usize,
    },

    /// Checksum carried by the frame does not match its contents
    #[cfg_attr(
        feature = "std",
        error("CRC mismatch: frame carries {expected:#06x}, computed {computed:#06x}")
    )]
    CrcMismatch {
        /// CRC read from the frame.
        expected: u16,
        /// CRC computed over header and payload.
        computed: u16,
    },

    /// Payload does not hold exactly the number of fields the profile expects
    #[cfg_attr(
        feature = "std",
        error("Payload length mismatch: expected {expected} bytes, got {actual}")
    )]
    PayloadLengthMismatch {
        /// `2 * (voltage_count + temp_count)`.
        expected: usize,
        /// Length of the stripped payload.
        actual: usize,
    },

    /// More fields requested than a reading can hold
    #[cfg_attr(feature = "std", error("Too many fields: {requested} requested, maximum {max}"))]
    TooManyFields {
        /// Total field count requested.
        requested: usize,
        /// [`crate::constants::MAX_FIELDS`].
        max: usize,
    },
}

/// Invalid device profile parameters
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileError {
    /// Profile declares no cells
    #[cfg_attr(feature = "std", error("Profile must declare at least one cell"))]
    NoCells,

    /// Cells plus temperature channels exceed the reading capacity
    #[cfg_attr(feature = "std", error("Profile declares {0} fields, maximum is {1}"))]
    TooManyFields(usize, usize),

    /// Transport capture is too small to ever contain a full frame
    #[cfg_attr(
        feature = "std",
        error("Capture length {capture_len} is shorter than a {frame_len}-byte frame")
    )]
    CaptureTooShort {
        /// Configured capture length.
        capture_len: usize,
        /// Frame length implied by the profile.
        frame_len: usize,
    },
}

/// Errors raised while building a frame
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// Wrong number of voltage or temperature fields for the profile
    #[cfg_attr(
        feature = "std",
        error("Field count mismatch for {kind}: expected {expected}, got {actual}")
    )]
    FieldCountMismatch {
        /// `"voltage"` or `"temperature"`.
        kind: &'static str,
        /// Count the profile requires.
        expected: usize,
        /// Count supplied.
        actual: usize,
    },

    /// Device header length differs from the profile
    #[cfg_attr(
        feature = "std",
        error("Header length mismatch: expected {expected} bytes, got {actual}")
    )]
    HeaderLengthMismatch {
        /// Header length the profile requires.
        expected: usize,
        /// Header length supplied.
        actual: usize,
    },

    /// The profile itself is invalid
    #[cfg_attr(feature = "std", error("Invalid profile: {0}"))]
    Profile(ProfileError),
}

impl From<ProfileError> for EncodeError {
    fn from(err: ProfileError) -> Self {
        EncodeError::Profile(err)
    }
}

/// Stage of the per-cycle pipeline at which a failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStage {
    /// Locating SOF/EOF
    Extracting,
    /// Checking the envelope and CRC
    Verifying,
    /// Splitting the payload into fields
    Decoding,
}

/// Failure of one full decode cycle
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleError {
    /// No frame could be located
    #[cfg_attr(feature = "std", error(transparent))]
    Extract(ExtractError),

    /// A frame was located but rejected
    #[cfg_attr(feature = "std", error(transparent))]
    Decode(DecodeError),
}

impl CycleError {
    /// The pipeline stage that failed
    pub fn stage(&self) -> CycleStage {
        match self {
            CycleError::Extract(_) => CycleStage::Extracting,
            CycleError::Decode(DecodeError::FrameTooShort { .. })
            | CycleError::Decode(DecodeError::CrcMismatch { .. }) => CycleStage::Verifying,
            CycleError::Decode(_) => CycleStage::Decoding,
        }
    }

    /// True when the frame arrived intact but failed its integrity check
    pub fn is_integrity_failure(&self) -> bool {
        matches!(self, CycleError::Decode(DecodeError::CrcMismatch { .. }))
    }
}

impl From<ExtractError> for CycleError {
    fn from(err: ExtractError) -> Self {
        CycleError::Extract(err)
    }
}

impl From<DecodeError> for CycleError {
    fn from(err: DecodeError) -> Self {
        CycleError::Decode(err)
    }
}
