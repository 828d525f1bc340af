use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use shift_payroll::error::EngineResult;
use shift_payroll::models::WageProfile;
use shift_payroll::persistence::{self, Format};
use tracing::info;

/// Builds a wage profile, saves it, reads it back and prints it.
#[derive(Debug, Parser)]
#[command(name = "shift-payroll", version, about)]
struct Cli {
    /// Encoding used for the saved profile.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Where to write the profile. Defaults to the system temp directory.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Format::Json,
            OutputFormat::Yaml => Format::Yaml,
        }
    }
}

fn main() -> EngineResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let format = Format::from(cli.format);
    let path = cli
        .output
        .unwrap_or_else(|| std::env::temp_dir().join(format!("profile.{format}")));

    let profile = WageProfile::with_identity(
        "Mr. John Quincy Public",
        "Example Industries Inc.",
        "Software Engineer Intern",
        Decimal::from(85),
        15,
    )?;

    persistence::save(&path, &profile, format)?;
    let restored: WageProfile = persistence::load(&path, format)?;
    info!(path = %path.display(), "Profile restored");

    println!("{restored}");
    Ok(())
}
