use anyhow::{Context, Result};
use csbi_core::{scanner::scan_capture, DeviceProfile, ScaledReading};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::info;

#[derive(Debug, Serialize, Deserialize)]
pub struct RecoveredReading {
    pub offset: usize,
    pub size: usize,
    pub reading: ScaledReading,
}

pub fn execute(
    data: &[u8],
    profile: &DeviceProfile,
    output: Option<&str>,
    stats_only: bool,
) -> Result<()> {
    info!("Scanning {} bytes with profile '{}'", data.len(), profile.name);

    let (located, stats) = scan_capture(data, profile);

    println!("\n=== Scan Results ===");
    println!("Bytes scanned:     {} bytes", stats.bytes_scanned);
    println!("Frames found:      {}", stats.frames_found);
    println!("Frames decoded:    {}", stats.frames_decoded);
    println!("CRC failures:      {}", stats.crc_failures);
    println!("Length failures:   {}", stats.length_failures);
    println!("Truncated SOFs:    {}", stats.truncated);
    println!("Success rate:      {:.2}%", stats.success_rate());
    println!();

    if stats_only {
        return Ok(());
    }

    let recovered: Vec<RecoveredReading> = located
        .iter()
        .map(|lr| RecoveredReading {
            offset: lr.offset,
            size: lr.size,
            reading: lr.reading.scale(profile),
        })
        .collect();

    if let Some(output_path) = output {
        let json = serde_json::to_string_pretty(&recovered)
            .with_context(|| "Failed to serialize recovered readings")?;

        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;

        info!("Recovered readings written to: {}", output_path);
    } else {
        println!("=== Recovered Readings ===");
        for r in &recovered {
            println!(
                "Frame @ offset {}: {} bytes, pack {:.3} V",
                r.offset, r.size, r.reading.pack_voltage
            );
        }
    }

    Ok(())
}
