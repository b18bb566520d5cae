//! Frame verification and field decoding (strict mode)
//!
//! Decoding is all-or-nothing: a frame either yields every field or an error.

use crate::constants::{CRC_SIZE, FIELD_SIZE, MARKER_SIZE, MAX_FIELDS, MIN_FRAME_SIZE};
use crate::crc::crc16_ccitt;
use crate::error::DecodeError;
use crate::types::DecodedReading;

/// Verify a candidate frame's CRC and strip its envelope
///
/// `frame` must span SOF through EOF. The CRC covers everything between SOF
/// and the CRC field. On success the `header_len` bytes that follow SOF are
/// dropped as well and the remaining payload is returned as a sub-slice:
/// `frame[2 + header_len .. len - 4]`.
///
/// The CRC is checked before the header length, so a corrupted frame that is
/// also too short for its header still reports [`DecodeError::CrcMismatch`].
/// Marker bytes themselves are not re-checked; that is the extractor's job.
pub fn verify_and_strip(frame: &[u8], header_len: usize) -> Result<&[u8], DecodeError> {
    if frame.len() < MIN_FRAME_SIZE {
        return Err(DecodeError::FrameTooShort {
            len: frame.len(),
            min: MIN_FRAME_SIZE,
        });
    }

    // Drop SOF and EOF, leaving data + CRC
    let data_crc = &frame[MARKER_SIZE..frame.len() - MARKER_SIZE];
    let (data, crc_bytes) = data_crc.split_at(data_crc.len() - CRC_SIZE);

    let expected = u16::from_be_bytes([crc_bytes[0], crc_bytes[1]]);
    let computed = crc16_ccitt(data);

    if computed != expected {
        return Err(DecodeError::CrcMismatch { expected, computed });
    }

    data.get(header_len..).ok_or(DecodeError::FrameTooShort {
        len: frame.len(),
        min: MIN_FRAME_SIZE.saturating_add(header_len),
    })
}

/// Decode a stripped payload into voltage and temperature fields
///
/// The payload must hold exactly `2 * (voltage_count + temp_count)` bytes of
/// big-endian two's-complement fields. The first `voltage_count` fields are
/// voltages, the rest temperatures. Units are left raw; see
/// [`DecodedReading::scale`].
pub fn decode_fields(
    payload: &[u8],
    voltage_count: usize,
    temp_count: usize,
) -> Result<DecodedReading, DecodeError> {
    let requested = match voltage_count.checked_add(temp_count) {
        Some(n) if n <= MAX_FIELDS => n,
        n => {
            return Err(DecodeError::TooManyFields {
                requested: n.unwrap_or(usize::MAX),
                max: MAX_FIELDS,
            })
        }
    };

    let expected = FIELD_SIZE * requested;
    if payload.len() != expected {
        return Err(DecodeError::PayloadLengthMismatch {
            expected,
            actual: payload.len(),
        });
    }

    let mut fields = [0i16; MAX_FIELDS];
    for (slot, chunk) in fields.iter_mut().zip(payload.chunks_exact(FIELD_SIZE)) {
        *slot = i16::from_be_bytes([chunk[0], chunk[1]]);
    }

    DecodedReading::from_fields(&fields[..requested], voltage_count).ok_or(
        DecodeError::PayloadLengthMismatch {
            expected,
            actual: payload.len(),
        },
    )
}
