//! Constants and limits for the CSB-interface telemetry frame format

/// Start-of-frame marker
pub const SOF_MARKER: &[u8; 2] = &[0x1A, 0x85];

/// End-of-frame marker
pub const EOF_MARKER: &[u8; 2] = &[0x22, 0xCE];

/// Size of either frame marker in bytes
pub const MARKER_SIZE: usize = 2;

/// Size of the big-endian CRC-16 field preceding the EOF marker
pub const CRC_SIZE: usize = 2;

/// Size of one encoded payload field (signed 16-bit, big-endian)
pub const FIELD_SIZE: usize = 2;

/// Smallest frame that can carry a CRC: SOF + CRC + EOF
pub const MIN_FRAME_SIZE: usize = MARKER_SIZE + CRC_SIZE + MARKER_SIZE;

/// Length of the device header sitting between SOF and the payload on
/// both known CSB-interface units (`frame[5..len-4]` is the payload)
pub const DEVICE_HEADER_LEN: usize = 3;

/// CRC-16/CCITT generator polynomial (x^16 + x^12 + x^5 + 1)
pub const CRC16_POLY: u16 = 0x1021;

/// CRC-16/CCITT initial register value
pub const CRC16_INIT: u16 = 0xFFFF;

/// Maximum number of fields (voltages + temperatures) a single reading holds.
/// Readings are stored inline, so this bounds the stack footprint.
pub const MAX_FIELDS: usize = 64;

/// The two frame delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Start of frame (`1A 85`)
    Sof,
    /// End of frame (`22 CE`)
    Eof,
}

impl Marker {
    /// Wire bytes of this marker
    pub const fn bytes(&self) -> &'static [u8; MARKER_SIZE] {
        match self {
            Marker::Sof => SOF_MARKER,
            Marker::Eof => EOF_MARKER,
        }
    }

    /// Short display name
    pub const fn name(&self) -> &'static str {
        match self {
            Marker::Sof => "SOF",
            Marker::Eof => "EOF",
        }
    }
}

impl core::fmt::Display for Marker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [a, b] = *self.bytes();
        write!(f, "{} ({:02X} {:02X})", self.name(), a, b)
    }
}
