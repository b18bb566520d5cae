//! Library entry for csbi-cli used by integration tests and embedding.

pub mod commands;

// Re-export commands for convenience
pub use commands::*;

use anyhow::{Context, Result};
use csbi_core::DeviceProfile;
use std::fs;
use std::io::{self, Read};

/// Built-in device profiles selectable with `--profile`
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ProfileKind {
    /// 24-cell dual half-module unit
    Csb24,
    /// 12-cell unit
    Csb12,
}

impl ProfileKind {
    /// The preset this kind names
    pub fn profile(&self) -> DeviceProfile {
        match self {
            ProfileKind::Csb24 => DeviceProfile::csb24(),
            ProfileKind::Csb12 => DeviceProfile::csb12(),
        }
    }
}

/// Resolve the device profile; a JSON profile file takes precedence over the preset
pub fn load_profile(kind: ProfileKind, file: Option<&str>) -> Result<DeviceProfile> {
    let profile = match file {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read profile file: {}", path))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse profile file: {}", path))?
        }
        None => kind.profile(),
    };

    profile
        .validate()
        .with_context(|| format!("Invalid profile '{}'", profile.name))?;

    Ok(profile)
}

/// Read a capture from a file (or stdin for `-`), raw binary or hex text
pub fn read_capture(input: &str, hex_input: bool) -> Result<Vec<u8>> {
    let data = if input == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        fs::read(input).with_context(|| format!("Failed to read input file: {}", input))?
    };

    if !hex_input {
        return Ok(data);
    }

    let text: String = String::from_utf8(data)
        .with_context(|| "Hex capture is not valid UTF-8")?
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    hex::decode(&text).with_context(|| "Failed to decode hex capture")
}
