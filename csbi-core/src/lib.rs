//! # CSBI Core
//!
//! Framing and decoding for the CSB-interface battery-management-system
//! telemetry stream: find a frame in a raw serial capture, check its
//! CRC-16/CCITT, strip the envelope and decode cell voltages and
//! temperatures.
//!
//! ## Wire format
//!
//! ```text
//! 1A 85 | header | payload (i16 BE fields) | CRC16 BE | 22 CE
//! ```
//!
//! ## Modules
//!
//! - `constants`: Markers, sizes and CRC parameters
//! - `types`: Frame view and decoded/scaled readings
//! - `profile`: Per-device field counts, units and pack-voltage policy
//! - `crc`: Table-driven CRC-16/CCITT
//! - `extractor`: SOF/EOF frame location
//! - `decoder`: CRC verification and field decoding
//! - `pipeline`: One-call-per-cycle decode entry point
//! - `encoder`: Frame building for simulators and fixtures
//! - `scanner`: Multi-frame capture-log scanning

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod constants;
pub mod crc;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod extractor;
pub mod pipeline;
pub mod profile;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use error::{CycleError, DecodeError, ExtractError};
pub use pipeline::decode_cycle;
pub use profile::DeviceProfile;
pub use types::{DecodedReading, Frame, ScaledReading};

/// Result type alias for a full decode cycle
pub type Result<T> = core::result::Result<T, CycleError>;
