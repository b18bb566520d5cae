use anyhow::{Context, Result};
use csbi_core::{encoder::FrameBuilder, DeviceProfile};
use serde::Deserialize;
use std::fs;
use tracing::info;

/// One frame's raw fields as read from the pack input
#[derive(Debug, Deserialize)]
pub struct FrameFields {
    /// Device header; zeroed when absent
    pub header: Option<Vec<u8>>,
    pub voltages: Vec<i16>,
    pub temperatures: Vec<i16>,
}

/// Encode a JSON array of raw field sets into back-to-back frames
pub fn execute(
    input: &str,
    output: &str,
    profile: &DeviceProfile,
    hex_output: bool,
) -> Result<()> {
    info!("Packing fields from {} to {}", input, output);

    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input))?;

    let entries: Vec<FrameFields> =
        serde_json::from_str(&content).with_context(|| "Failed to parse JSON input")?;

    info!("Found {} frames to pack", entries.len());

    let mut output_data = Vec::new();

    for (i, entry) in entries.iter().enumerate() {
        let mut builder = FrameBuilder::new(profile)
            .voltages(&entry.voltages)
            .temperatures(&entry.temperatures);

        if let Some(header) = &entry.header {
            builder = builder.header(header);
        }

        let encoded = builder
            .build()
            .with_context(|| format!("Failed to build frame {}", i))?;

        output_data.extend_from_slice(&encoded);

        info!("Packed frame {} ({} bytes)", i, encoded.len());
    }

    let written = if hex_output {
        fs::write(output, hex::encode(&output_data))
    } else {
        fs::write(output, &output_data)
    };
    written.with_context(|| format!("Failed to write output file: {}", output))?;

    info!(
        "Successfully packed {} frames ({} bytes total)",
        entries.len(),
        output_data.len()
    );

    Ok(())
}
