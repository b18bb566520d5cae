use anyhow::{Context, Result};
use colored::*;
use csbi_core::{extractor::extract, pipeline::decode_frame, DeviceProfile, ScaledReading};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{info, warn};

/// Decoded cycle as written by `csbi decode --json` / `--output`
#[derive(Debug, Serialize, Deserialize)]
pub struct DecodeReport {
    pub profile: String,
    pub offset: usize,
    pub frame_len: usize,
    pub raw_voltages: Vec<i16>,
    pub raw_temperatures: Vec<i16>,
    pub reading: ScaledReading,
    pub min_cell_voltage: Option<f32>,
    pub max_cell_voltage: Option<f32>,
    pub cell_imbalance: Option<f32>,
}

/// Run one capture through the decode pipeline
pub fn decode_report(data: &[u8], profile: &DeviceProfile) -> Result<DecodeReport> {
    let frame = extract(data).with_context(|| "No frame in capture")?;
    info!("Frame at offset {} ({} bytes)", frame.offset, frame.len());

    let decoded = decode_frame(&frame, profile)
        .map_err(|err| {
            warn!("Frame rejected: {}", err);
            err
        })
        .with_context(|| format!("Frame at offset {} rejected", frame.offset))?;
    let reading = decoded.scale(profile);

    Ok(DecodeReport {
        profile: profile.name.clone(),
        offset: frame.offset,
        frame_len: frame.len(),
        raw_voltages: decoded.voltages().to_vec(),
        raw_temperatures: decoded.temperatures().to_vec(),
        min_cell_voltage: reading.min_cell_voltage(),
        max_cell_voltage: reading.max_cell_voltage(),
        cell_imbalance: reading.cell_imbalance(),
        reading,
    })
}

pub fn execute(
    data: &[u8],
    profile: &DeviceProfile,
    json: bool,
    output: Option<&str>,
) -> Result<()> {
    info!(
        "Decoding {} byte capture with profile '{}'",
        data.len(),
        profile.name
    );

    let report = decode_report(data, profile)?;

    if let Some(output_path) = output {
        let report_json = serde_json::to_string_pretty(&report)
            .with_context(|| "Failed to serialize decode report")?;
        fs::write(output_path, report_json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;
        info!("Decode report written to: {}", output_path);
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n=== {} ===", report.profile);
    println!("Frame:          {} bytes @ offset {}", report.frame_len, report.offset);
    println!("Pack voltage:   {:.3} V", report.reading.pack_voltage);
    if let (Some(min), Some(max), Some(spread)) = (
        report.min_cell_voltage,
        report.max_cell_voltage,
        report.cell_imbalance,
    ) {
        println!("Cell range:     {:.3} .. {:.3} V (spread {:.3} V)", min, max, spread);
    }

    println!("\n=== Cells ===");
    for (i, volts) in report.reading.cell_voltages.iter().enumerate() {
        let line = format!("Cell {:>2}: {:>8.3} V", i + 1, volts);
        if Some(*volts) == report.min_cell_voltage || Some(*volts) == report.max_cell_voltage {
            println!("{}", line.yellow());
        } else {
            println!("{}", line);
        }
    }

    println!("\n=== Temperatures ===");
    for (i, celsius) in report.reading.temperatures.iter().enumerate() {
        println!("Sensor {}: {:>6.1} °C", i + 1, celsius);
    }

    println!("\n{} CRC verified", "✓".green());
    Ok(())
}
