//! Frame encoding
//!
//! The BMS only ever transmits; encoding exists to produce simulator
//! captures and test fixtures that the decoder accepts.

use crate::constants::{CRC_SIZE, EOF_MARKER, FIELD_SIZE, MARKER_SIZE, SOF_MARKER};
use crate::crc::Crc16;
use crate::error::EncodeError;
use crate::profile::DeviceProfile;
use alloc::vec;
use alloc::vec::Vec;
use bytes::{BufMut, Bytes, BytesMut};

/// Encode a frame into bytes
///
/// Layout:
/// 1. SOF (2 bytes): `1A 85`
/// 2. Device header (`header.len()` bytes)
/// 3. Payload
/// 4. CRC-16/CCITT over header + payload (2 bytes, big-endian)
/// 5. EOF (2 bytes): `22 CE`
pub fn encode_frame(header: &[u8], payload: &[u8]) -> Bytes {
    let total_size = MARKER_SIZE + header.len() + payload.len() + CRC_SIZE + MARKER_SIZE;
    let mut buf = BytesMut::with_capacity(total_size);

    buf.put_slice(SOF_MARKER);
    buf.put_slice(header);
    buf.put_slice(payload);

    let mut crc = Crc16::new();
    crc.update(header);
    crc.update(payload);
    buf.put_u16(crc.finalize());

    buf.put_slice(EOF_MARKER);
    buf.freeze()
}

/// Encode signed fields as big-endian payload bytes
pub fn encode_fields(fields: &[i16]) -> Bytes {
    let mut buf = BytesMut::with_capacity(fields.len() * FIELD_SIZE);
    for &field in fields {
        buf.put_i16(field);
    }
    buf.freeze()
}

/// Builder for frames matching a device profile
pub struct FrameBuilder<'p> {
    profile: &'p DeviceProfile,
    header: Vec<u8>,
    voltages: Vec<i16>,
    temperatures: Vec<i16>,
}

impl<'p> FrameBuilder<'p> {
    /// Create a builder with a zeroed device header
    pub fn new(profile: &'p DeviceProfile) -> Self {
        Self {
            profile,
            header: vec![0u8; profile.header_len],
            voltages: Vec::new(),
            temperatures: Vec::new(),
        }
    }

    /// Set the device header bytes
    pub fn header(mut self, header: &[u8]) -> Self {
        self.header = header.to_vec();
        self
    }

    /// Set the raw cell voltage fields
    pub fn voltages(mut self, voltages: &[i16]) -> Self {
        self.voltages = voltages.to_vec();
        self
    }

    /// Set the raw temperature fields
    pub fn temperatures(mut self, temperatures: &[i16]) -> Self {
        self.temperatures = temperatures.to_vec();
        self
    }

    /// Validate against the profile and encode
    pub fn build(self) -> Result<Bytes, EncodeError> {
        self.profile.validate()?;

        if self.header.len() != self.profile.header_len {
            return Err(EncodeError::HeaderLengthMismatch {
                expected: self.profile.header_len,
                actual: self.header.len(),
            });
        }

        if self.voltages.len() != self.profile.cell_count {
            return Err(EncodeError::FieldCountMismatch {
                kind: "voltage",
                expected: self.profile.cell_count,
                actual: self.voltages.len(),
            });
        }

        if self.temperatures.len() != self.profile.temp_count {
            return Err(EncodeError::FieldCountMismatch {
                kind: "temperature",
                expected: self.profile.temp_count,
                actual: self.temperatures.len(),
            });
        }

        let mut fields = Vec::with_capacity(self.profile.field_count());
        fields.extend_from_slice(&self.voltages);
        fields.extend_from_slice(&self.temperatures);

        Ok(encode_frame(&self.header, &encode_fields(&fields)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crc::crc16_ccitt;

    #[test]
    fn test_encode_layout() {
        let encoded = encode_frame(&[0x01, 0x02, 0x03], &[0x00, 0x64]);

        assert_eq!(&encoded[0..2], SOF_MARKER);
        assert_eq!(&encoded[2..5], &[0x01, 0x02, 0x03]);
        assert_eq!(&encoded[5..7], &[0x00, 0x64]);
        let crc = crc16_ccitt(&[0x01, 0x02, 0x03, 0x00, 0x64]);
        assert_eq!(&encoded[7..9], &crc.to_be_bytes());
        assert_eq!(&encoded[9..], EOF_MARKER);
    }

    #[test]
    fn test_encode_fields_big_endian() {
        assert_eq!(
            encode_fields(&[100, -100]).as_ref(),
            &[0x00, 0x64, 0xFF, 0x9C]
        );
    }

    #[test]
    fn test_builder_frame_len() {
        let profile = DeviceProfile::csb24();
        let encoded = FrameBuilder::new(&profile)
            .header(&[0xAA, 0xBB, 0xCC])
            .voltages(&[3300; 24])
            .temperatures(&[250; 4])
            .build()
            .unwrap();

        assert_eq!(encoded.len(), profile.frame_len());
        assert_eq!(&encoded[2..5], &[0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn test_builder_rejects_wrong_counts() {
        let profile = DeviceProfile::csb12();

        let result = FrameBuilder::new(&profile)
            .voltages(&[0; 11])
            .temperatures(&[0; 4])
            .build();
        assert_eq!(
            result,
            Err(EncodeError::FieldCountMismatch {
                kind: "voltage",
                expected: 12,
                actual: 11
            })
        );

        let result = FrameBuilder::new(&profile)
            .header(&[0x00])
            .voltages(&[0; 12])
            .temperatures(&[0; 4])
            .build();
        assert!(matches!(
            result,
            Err(EncodeError::HeaderLengthMismatch { expected: 3, actual: 1 })
        ));
    }
}
