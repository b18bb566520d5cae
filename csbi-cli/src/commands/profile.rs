use anyhow::{Context, Result};
use csbi_core::DeviceProfile;
use std::fs;
use tracing::info;

/// Print the resolved profile as JSON, or write it for later `--profile-file` use
pub fn execute(profile: &DeviceProfile, output: Option<&str>) -> Result<()> {
    let json =
        serde_json::to_string_pretty(profile).with_context(|| "Failed to serialize profile")?;

    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write output file: {}", path))?;
            info!("Profile '{}' written to: {}", profile.name, path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
