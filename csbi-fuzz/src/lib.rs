//! Fuzzing entry points for csbi-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_decode_cycle

use csbi_core::DeviceProfile;

pub fn fuzz_extract(data: &[u8]) {
    use csbi_core::extractor::{extract, frames};

    // Try to extract - should never panic
    let _ = extract(data);
    let _ = frames(data).count();
}

pub fn fuzz_verify(data: &[u8]) {
    use csbi_core::decoder::verify_and_strip;

    // First byte picks the header length, the rest is the candidate frame
    if let Some((&header_len, frame)) = data.split_first() {
        let _ = verify_and_strip(frame, (header_len % 8) as usize);
    }
}

pub fn fuzz_decode_cycle(data: &[u8]) {
    use csbi_core::{pipeline::decode_cycle, scanner::scan_capture};

    for profile in [DeviceProfile::csb24(), DeviceProfile::csb12()] {
        let _ = decode_cycle(data, &profile);
        let _ = scan_capture(data, &profile);
    }
}
