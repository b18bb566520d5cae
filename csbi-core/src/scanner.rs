//! Capture-log scanner
//!
//! Walks a long recording (many polling cycles, noise between frames) and
//! decodes every frame it can.

use crate::error::{CycleError, DecodeError};
use crate::extractor::bounded_frames;
use crate::pipeline::decode_frame;
use crate::profile::DeviceProfile;
use crate::types::DecodedReading;
use alloc::vec::Vec;

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// A reading decoded at a specific offset in the capture
#[derive(Debug, Clone)]
pub struct LocatedReading {
    /// Byte offset of the SOF marker
    pub offset: usize,

    /// Frame size in bytes, markers included
    pub size: usize,

    /// The decoded reading
    pub reading: DecodedReading,
}

/// Scan statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Total bytes scanned
    pub bytes_scanned: usize,

    /// Number of SOF..EOF candidates tried
    pub frames_found: usize,

    /// Number of frames decoded successfully
    pub frames_decoded: usize,

    /// Candidates rejected by the CRC check
    pub crc_failures: usize,

    /// Candidates too short or with the wrong payload length
    pub length_failures: usize,

    /// SOF markers with no EOF within one frame length
    pub truncated: usize,
}

impl ScanStats {
    /// Decoded frames as a percentage of candidates
    pub fn success_rate(&self) -> f64 {
        if self.frames_found == 0 {
            0.0
        } else {
            (self.frames_decoded as f64 / self.frames_found as f64) * 100.0
        }
    }
}

/// Scan a capture and decode every frame matching `profile`
///
/// Candidates longer than `profile.frame_len()` are never considered. After a
/// decoded frame the search resumes past its EOF. After a rejected candidate
/// it resumes just past that candidate's SOF, so a truncated frame at the end
/// of one cycle does not swallow the frame of the next.
pub fn scan_capture(data: &[u8], profile: &DeviceProfile) -> (Vec<LocatedReading>, ScanStats) {
    let mut stats = ScanStats {
        bytes_scanned: data.len(),
        ..Default::default()
    };
    let mut results = Vec::new();
    let mut candidates = bounded_frames(data, profile.frame_len());

    #[cfg(feature = "logging")]
    debug!("Starting capture scan of {} bytes", data.len());

    while let Some(frame) = candidates.next() {
        stats.frames_found += 1;

        match decode_frame(&frame, profile) {
            Ok(reading) => {
                #[cfg(feature = "logging")]
                debug!("Decoded frame at offset {} ({} bytes)", frame.offset, frame.len());

                results.push(LocatedReading {
                    offset: frame.offset,
                    size: frame.len(),
                    reading,
                });
            }
            Err(err) => {
                #[cfg(feature = "logging")]
                warn!("Rejected frame at offset {}: {:?}", frame.offset, err);

                match err {
                    CycleError::Decode(DecodeError::CrcMismatch { .. }) => stats.crc_failures += 1,
                    _ => stats.length_failures += 1,
                }
                candidates.resync(&frame);
            }
        }
    }

    stats.frames_decoded = results.len();
    stats.truncated = candidates.truncated();

    #[cfg(feature = "logging")]
    debug!(
        "Scan complete: decoded {} of {} frames, {} truncated",
        stats.frames_decoded, stats.frames_found, stats.truncated
    );

    (results, stats)
}
