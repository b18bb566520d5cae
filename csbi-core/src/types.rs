//! Core types for CSBI frames and readings

use crate::constants::{CRC_SIZE, MARKER_SIZE, MAX_FIELDS, MIN_FRAME_SIZE};
use crate::profile::DeviceProfile;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// A candidate frame borrowed from a raw buffer
///
/// Spans from the first byte of SOF to the last byte of EOF. Nothing about
/// its contents has been verified yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Byte offset of the SOF marker in the source buffer
    pub offset: usize,

    /// Frame bytes, markers included
    pub bytes: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Wrap a frame slice found at `offset`
    pub fn new(offset: usize, bytes: &'a [u8]) -> Self {
        Self { offset, bytes }
    }

    /// Frame bytes, markers included
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Total frame length
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for a zero-length frame (never produced by the extractor)
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Offset one past the EOF marker in the source buffer
    pub fn end(&self) -> usize {
        self.offset + self.bytes.len()
    }

    /// CRC carried in the frame, if the frame is long enough to have one
    pub fn crc_field(&self) -> Option<u16> {
        if self.bytes.len() < MIN_FRAME_SIZE {
            return None;
        }
        let at = self.bytes.len() - MARKER_SIZE - CRC_SIZE;
        Some(u16::from_be_bytes([self.bytes[at], self.bytes[at + 1]]))
    }
}

impl AsRef<[u8]> for Frame<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

/// Raw signed fields decoded from one payload
///
/// Stored inline, so decoding a reading never touches the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedReading {
    fields: [i16; MAX_FIELDS],
    voltage_count: usize,
    temp_count: usize,
}

impl DecodedReading {
    /// Build a reading from already-decoded fields
    ///
    /// Returns `None` if `fields` does not hold exactly
    /// `voltage_count + temp_count` values or exceeds [`MAX_FIELDS`].
    pub fn from_fields(fields: &[i16], voltage_count: usize) -> Option<Self> {
        if fields.len() > MAX_FIELDS || voltage_count > fields.len() {
            return None;
        }
        let mut inline = [0i16; MAX_FIELDS];
        inline[..fields.len()].copy_from_slice(fields);
        Some(Self {
            fields: inline,
            voltage_count,
            temp_count: fields.len() - voltage_count,
        })
    }

    /// All fields in wire order
    pub fn fields(&self) -> &[i16] {
        &self.fields[..self.voltage_count + self.temp_count]
    }

    /// Raw voltage fields, one per cell
    pub fn voltages(&self) -> &[i16] {
        &self.fields[..self.voltage_count]
    }

    /// Raw temperature fields
    pub fn temperatures(&self) -> &[i16] {
        &self.fields[self.voltage_count..self.voltage_count + self.temp_count]
    }

    /// Apply a profile's units and pack-voltage policy
    pub fn scale(&self, profile: &DeviceProfile) -> ScaledReading {
        let cell_voltages: Vec<f32> = self
            .voltages()
            .iter()
            .map(|&raw| profile.voltage_scale.to_volts(raw))
            .collect();
        let temperatures = self
            .temperatures()
            .iter()
            .map(|&raw| profile.temperature_scale.to_celsius(raw))
            .collect();
        let pack_voltage = profile.pack_voltage.aggregate(&cell_voltages);

        ScaledReading {
            cell_voltages,
            temperatures,
            pack_voltage,
        }
    }
}

/// A reading in physical units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledReading {
    /// Cell voltages in volts
    pub cell_voltages: Vec<f32>,

    /// Temperatures in degrees Celsius
    pub temperatures: Vec<f32>,

    /// Pack voltage in volts, per the profile's policy
    pub pack_voltage: f32,
}

impl ScaledReading {
    /// Lowest cell voltage
    pub fn min_cell_voltage(&self) -> Option<f32> {
        self.cell_voltages.iter().copied().reduce(f32::min)
    }

    /// Highest cell voltage
    pub fn max_cell_voltage(&self) -> Option<f32> {
        self.cell_voltages.iter().copied().reduce(f32::max)
    }

    /// Spread between the highest and lowest cell
    pub fn cell_imbalance(&self) -> Option<f32> {
        Some(self.max_cell_voltage()? - self.min_cell_voltage()?)
    }
}
