use anyhow::Result;
use clap::{Parser, Subcommand};
use csbi_cli::{commands, load_profile, read_capture, ProfileKind};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "csbi")]
#[command(about = "CSBI - CSB-interface BMS telemetry decoder", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Built-in device profile
    #[arg(short, long, global = true, value_enum, default_value = "csb24")]
    profile: ProfileKind,

    /// JSON profile file (overrides --profile)
    #[arg(long, global = true)]
    profile_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a single polling-cycle capture
    Decode {
        /// Capture file ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Input is hex text instead of raw bytes
        #[arg(long)]
        hex: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Scan a multi-cycle capture log and decode every frame
    Scan {
        /// Capture log to scan ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Input is hex text instead of raw bytes
        #[arg(long)]
        hex: bool,

        /// Output JSON file for recovered readings
        #[arg(short, long)]
        output: Option<String>,

        /// Show statistics only
        #[arg(long)]
        stats_only: bool,
    },

    /// Build frames from raw fields (simulator captures, fixtures)
    Pack {
        /// Input JSON file (array of {header?, voltages, temperatures})
        #[arg(short, long)]
        input: String,

        /// Output file for packed frames
        #[arg(short, long)]
        output: String,

        /// Write hex text instead of raw bytes
        #[arg(long)]
        hex: bool,
    },

    /// Print the resolved device profile as JSON
    Profile {
        /// Write the profile to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let profile = load_profile(cli.profile, cli.profile_file.as_deref())?;

    // Execute command
    match cli.command {
        Commands::Decode {
            input,
            hex,
            json,
            output,
        } => {
            let data = read_capture(&input, hex)?;
            commands::decode::execute(&data, &profile, json, output.as_deref())
        }

        Commands::Scan {
            input,
            hex,
            output,
            stats_only,
        } => {
            let data = read_capture(&input, hex)?;
            commands::scan::execute(&data, &profile, output.as_deref(), stats_only)
        }

        Commands::Pack { input, output, hex } => {
            commands::pack::execute(&input, &output, &profile, hex)
        }

        Commands::Profile { output } => commands::profile::execute(&profile, output.as_deref()),
    }
}
