use std::fs;
use tempfile::tempdir;

use csbi_cli::commands::scan::{self, RecoveredReading};
use csbi_core::{encoder::FrameBuilder, DeviceProfile};

/// Helper: a capture log of `cycles` 12-cell frames with noise between them
fn create_log(cycles: usize) -> Vec<u8> {
    let profile = DeviceProfile::csb12();
    let mut log = Vec::new();

    for i in 0..cycles {
        let frame = FrameBuilder::new(&profile)
            .voltages(&[3 + (i % 2) as i16; 12])
            .temperatures(&[20, 21, 22, 23])
            .build()
            .unwrap();
        log.extend_from_slice(&[0x00, 0xFF]);
        log.extend_from_slice(&frame);
    }

    log
}

#[test]
fn test_scan_writes_recovered_readings() {
    let td = tempdir().unwrap();
    let output_path = td.path().join("readings.json");

    scan::execute(
        &create_log(5),
        &DeviceProfile::csb12(),
        Some(output_path.to_str().unwrap()),
        false,
    )
    .unwrap();

    let json = fs::read_to_string(&output_path).unwrap();
    let recovered: Vec<RecoveredReading> = serde_json::from_str(&json).unwrap();

    assert_eq!(recovered.len(), 5);
    assert_eq!(recovered[0].offset, 2);
    assert_eq!(recovered[0].size, 41);
    assert_eq!(recovered[0].reading.pack_voltage, 36.0);
    assert_eq!(recovered[1].reading.pack_voltage, 48.0);
}

#[test]
fn test_scan_damaged_log() {
    let td = tempdir().unwrap();
    let output_path = td.path().join("readings.json");

    let mut log = create_log(4);
    // Corrupt a payload byte of the second frame (2 noise + 41 frame + 2 noise + 10)
    log[55] ^= 0x08;

    scan::execute(
        &log,
        &DeviceProfile::csb12(),
        Some(output_path.to_str().unwrap()),
        false,
    )
    .unwrap();

    let json = fs::read_to_string(&output_path).unwrap();
    let recovered: Vec<RecoveredReading> = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered.len(), 3);
    assert!(recovered.iter().all(|r| r.offset != 45));
}

#[test]
fn test_scan_stats_only_writes_nothing() {
    let td = tempdir().unwrap();
    let output_path = td.path().join("readings.json");

    scan::execute(
        &create_log(2),
        &DeviceProfile::csb12(),
        Some(output_path.to_str().unwrap()),
        true,
    )
    .unwrap();

    assert!(!output_path.exists());
}

#[test]
fn test_scan_empty_input() {
    scan::execute(&[], &DeviceProfile::csb24(), None, false).unwrap();
}
