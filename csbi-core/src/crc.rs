//! Table-driven CRC-16/CCITT (poly 0x1021, init 0xFFFF, no reflection, no final XOR)

use crate::constants::{CRC16_INIT, CRC16_POLY};

/// Lookup table for [`CRC16_POLY`], generated at compile time
pub const CRC16_TABLE: [u16; 256] = build_table(CRC16_POLY);

const fn build_table(poly: u16) -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ poly
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Compute the CRC-16/CCITT of `data`
///
/// The empty input yields the initial register, `0xFFFF`.
pub fn crc16_ccitt(data: &[u8]) -> u16 {
    let mut digest = Crc16::new();
    digest.update(data);
    digest.finalize()
}

/// Incremental CRC-16/CCITT digest
///
/// Useful when the covered bytes are not contiguous, e.g. when the encoder
/// writes header and payload from separate slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc16 {
    crc: u16,
}

impl Crc16 {
    /// Start a new digest at the initial register value
    pub const fn new() -> Self {
        Self { crc: CRC16_INIT }
    }

    /// Feed more bytes into the digest
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            let index = ((self.crc >> 8) as u8 ^ byte) as usize;
            self.crc = (self.crc << 8) ^ CRC16_TABLE[index];
        }
    }

    /// Current register value
    pub const fn finalize(&self) -> u16 {
        self.crc
    }
}

impl Default for Crc16 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bitwise reference implementation, no table
    fn crc16_bitwise(data: &[u8]) -> u16 {
        let mut crc = CRC16_INIT;
        for &byte in data {
            crc ^= (byte as u16) << 8;
            for _ in 0..8 {
                crc = if crc & 0x8000 != 0 {
                    (crc << 1) ^ CRC16_POLY
                } else {
                    crc << 1
                };
            }
        }
        crc
    }

    #[test]
    fn test_table_known_entries() {
        assert_eq!(CRC16_TABLE[0], 0x0000);
        assert_eq!(CRC16_TABLE[1], 0x1021);
        assert_eq!(CRC16_TABLE[2], 0x2042);
        assert_eq!(CRC16_TABLE[16], 0x1231);
        assert_eq!(CRC16_TABLE[128], 0x9188);
        assert_eq!(CRC16_TABLE[255], 0x1EF0);
    }

    #[test]
    fn test_empty_is_initial_value() {
        assert_eq!(crc16_ccitt(&[]), 0xFFFF);
    }

    #[test]
    fn test_check_value() {
        // CRC-16/CCITT-FALSE catalogue check value
        assert_eq!(crc16_ccitt(b"123456789"), 0x29B1);
    }

    #[test]
    fn test_matches_bitwise() {
        let data: Vec<u8> = (0..=255u8).collect();
        assert_eq!(crc16_ccitt(&data), crc16_bitwise(&data));
        assert_eq!(crc16_ccitt(&[0x00]), crc16_bitwise(&[0x00]));
        assert_eq!(crc16_ccitt(&[0xFF, 0xFF]), crc16_bitwise(&[0xFF, 0xFF]));
    }

    #[test]
    fn test_incremental_equals_one_shot() {
        let data = b"incremental digest over split input";
        for split in 0..data.len() {
            let mut digest = Crc16::new();
            digest.update(&data[..split]);
            digest.update(&data[split..]);
            assert_eq!(digest.finalize(), crc16_ccitt(data));
        }
    }
}
