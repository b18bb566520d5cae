//! Per-cycle decode entry point
//!
//! One call per polling cycle: extract → verify_and_strip → decode_fields.
//! Any failing step short-circuits; there is no retry inside the core.

use crate::decoder::{decode_fields, verify_and_strip};
use crate::error::CycleError;
use crate::extractor::extract;
use crate::profile::DeviceProfile;
use crate::types::{DecodedReading, Frame};

/// Decode a single frame that has already been extracted
pub fn decode_frame(
    frame: &Frame<'_>,
    profile: &DeviceProfile,
) -> Result<DecodedReading, CycleError> {
    let payload = verify_and_strip(frame.as_bytes(), profile.header_len)?;
    let reading = decode_fields(payload, profile.cell_count, profile.temp_count)?;
    Ok(reading)
}

/// Decode the first frame found in one cycle's capture
pub fn decode_cycle(
    buffer: &[u8],
    profile: &DeviceProfile,
) -> Result<DecodedReading, CycleError> {
    let frame = extract(buffer)?;
    decode_frame(&frame, profile)
}
