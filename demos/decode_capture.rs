//! Example: decode one polling cycle and a damaged capture log

use csbi_core::{
    encoder::FrameBuilder, pipeline::decode_cycle, scanner::scan_capture, DeviceProfile,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("CSBI capture decoding example\n");

    let profile = DeviceProfile::csb24();
    let voltages: Vec<i16> = (0..24).map(|i| 3280 + i * 2).collect();

    // Step 1: build what the BMS would send
    let frame = FrameBuilder::new(&profile)
        .header(&[0x01, 0x30, 0x38])
        .voltages(&voltages)
        .temperatures(&[215, 220, 198, 205])
        .build()?;

    let mut capture = vec![0x00, 0x13];
    capture.extend_from_slice(&frame);
    println!("Step 1: capture of {} bytes", capture.len());

    // Step 2: decode one cycle
    let reading = decode_cycle(&capture, &profile)?;
    let scaled = reading.scale(&profile);
    println!("Step 2: decoded {} cells", scaled.cell_voltages.len());
    println!("  pack voltage: {:.3} V", scaled.pack_voltage);
    if let (Some(min), Some(max)) = (scaled.min_cell_voltage(), scaled.max_cell_voltage()) {
        println!("  cell range:   {:.3} .. {:.3} V", min, max);
    }
    println!("  temperatures: {:?} °C\n", scaled.temperatures);

    // Step 3: a log of 10 cycles with one corrupted frame
    let mut log = Vec::new();
    for _ in 0..10 {
        log.extend_from_slice(&capture);
    }
    let corrupt_at = 4 * capture.len() + 20;
    log[corrupt_at] ^= 0xFF;

    let (readings, stats) = scan_capture(&log, &profile);
    println!("Step 3: scanned {} bytes", stats.bytes_scanned);
    println!("  frames decoded: {}", readings.len());
    println!("  CRC failures:   {}", stats.crc_failures);
    println!("  success rate:   {:.1}%", stats.success_rate());

    Ok(())
}
