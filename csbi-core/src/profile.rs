//! Per-device decoding parameters
//!
//! Both known CSB-interface units speak the same wire protocol and differ only
//! in field counts, value units and how the pack voltage is aggregated. Those
//! differences live here instead of in separate decoders.

use crate::constants::{CRC_SIZE, DEVICE_HEADER_LEN, FIELD_SIZE, MARKER_SIZE, MAX_FIELDS};
use crate::error::ProfileError;
use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Unit of the raw voltage fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoltageScale {
    /// Raw value is millivolts
    Millivolts,
    /// Raw value is already volts
    Volts,
}

impl VoltageScale {
    /// Convert a raw field to volts
    pub fn to_volts(&self, raw: i16) -> f32 {
        match self {
            VoltageScale::Millivolts => raw as f32 / 1000.0,
            VoltageScale::Volts => raw as f32,
        }
    }
}

/// Unit of the raw temperature fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureScale {
    /// Raw value is tenths of a degree Celsius
    DeciCelsius,
    /// Raw value is whole degrees Celsius
    Celsius,
}

impl TemperatureScale {
    /// Convert a raw field to degrees Celsius
    pub fn to_celsius(&self, raw: i16) -> f32 {
        match self {
            TemperatureScale::DeciCelsius => raw as f32 / 10.0,
            TemperatureScale::Celsius => raw as f32,
        }
    }
}

/// How the pack voltage is derived from the cell voltages
///
/// The two deployed units disagree (plain sum vs. sum halved for the two
/// half-modules of the 24-cell unit), so this stays a per-profile choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackVoltagePolicy {
    /// Sum of all cells
    Sum,
    /// Sum of all cells divided by two (two parallel half-modules)
    HalfModuleAverage,
    /// Mean cell voltage
    Average,
}

impl PackVoltagePolicy {
    /// Aggregate cell voltages (in volts) into a pack voltage
    pub fn aggregate(&self, cells: &[f32]) -> f32 {
        let sum: f32 = cells.iter().sum();
        match self {
            PackVoltagePolicy::Sum => sum,
            PackVoltagePolicy::HalfModuleAverage => sum / 2.0,
            PackVoltagePolicy::Average => {
                if cells.is_empty() {
                    0.0
                } else {
                    sum / cells.len() as f32
                }
            }
        }
    }
}

/// Decoding parameters for one BMS variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// Human-readable device name
    pub name: String,

    /// Number of cell-voltage fields (N)
    pub cell_count: usize,

    /// Number of temperature fields (M)
    pub temp_count: usize,

    /// Bytes between SOF and the first payload field
    #[serde(default = "default_header_len")]
    pub header_len: usize,

    /// Bytes the transport reads per polling cycle
    pub capture_len: usize,

    /// Unit of voltage fields
    pub voltage_scale: VoltageScale,

    /// Unit of temperature fields
    pub temperature_scale: TemperatureScale,

    /// Pack voltage aggregation
    pub pack_voltage: PackVoltagePolicy,
}

fn default_header_len() -> usize {
    DEVICE_HEADER_LEN
}

impl DeviceProfile {
    /// 24-cell dual half-module unit
    ///
    /// The 89-byte capture leaves room for more than the four temperature
    /// fields declared here; some firmware fills it with up to 16 sensors.
    /// Such a unit needs a profile file with the matching `temp_count`,
    /// otherwise every frame fails with a payload length mismatch.
    pub fn csb24() -> Self {
        Self {
            name: String::from("NV GenD 24S"),
            cell_count: 24,
            temp_count: 4,
            header_len: DEVICE_HEADER_LEN,
            capture_len: 89,
            voltage_scale: VoltageScale::Millivolts,
            temperature_scale: TemperatureScale::DeciCelsius,
            pack_voltage: PackVoltagePolicy::HalfModuleAverage,
        }
    }

    /// 12-cell unit
    pub fn csb12() -> Self {
        Self {
            name: String::from("NV GenD 12S"),
            cell_count: 12,
            temp_count: 4,
            header_len: DEVICE_HEADER_LEN,
            capture_len: 73,
            voltage_scale: VoltageScale::Volts,
            temperature_scale: TemperatureScale::Celsius,
            pack_voltage: PackVoltagePolicy::Sum,
        }
    }

    /// Total number of fields in a payload
    ///
    /// Saturates at `usize::MAX` for nonsensical counts, which [`validate`]
    /// then rejects as too many fields.
    ///
    /// [`validate`]: DeviceProfile::validate
    pub const fn field_count(&self) -> usize {
        self.cell_count.saturating_add(self.temp_count)
    }

    /// Exact payload length in bytes
    pub const fn payload_len(&self) -> usize {
        FIELD_SIZE.saturating_mul(self.field_count())
    }

    /// Exact frame length in bytes, markers included
    pub const fn frame_len(&self) -> usize {
        (MARKER_SIZE + CRC_SIZE + MARKER_SIZE)
            .saturating_add(self.header_len)
            .saturating_add(self.payload_len())
    }

    /// Check the parameters are usable
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.cell_count == 0 {
            return Err(ProfileError::NoCells);
        }

        if self.field_count() > MAX_FIELDS {
            return Err(ProfileError::TooManyFields(self.field_count(), MAX_FIELDS));
        }

        if self.capture_len < self.frame_len() {
            return Err(ProfileError::CaptureTooShort {
                capture_len: self.capture_len,
                frame_len: self.frame_len(),
            });
        }

        Ok(())
    }
}
