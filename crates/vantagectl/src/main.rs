//! Vantage Control - context inspection CLI
//!
//! Resolves the telemetry context against the live host and prints it, or
//! derives the user-agent string, so operators can see exactly what a
//! telemetry event would carry before anything is sent.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{warn, Level};

use vantage_telemetry::config::TelemetryConfig;
use vantage_telemetry::host::{
    HostAppDescriptor, StaticHostApplication, StaticPluginVersions, COMPONENT_ID,
};
use vantage_telemetry::{ContextResolver, TelemetryContext};

// Version is embedded at build time
const VERSION: &str = env!("VANTAGE_VERSION");

#[derive(Parser)]
#[command(name = "vantagectl")]
#[command(about = "Vantage telemetry - context inspection tool", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Path to the telemetry configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the telemetry context against this host and print it as JSON
    Context,

    /// Print the user-agent string derived from this host
    UserAgent {
        /// String returned when the host application metadata is unavailable
        #[arg(long, default_value = "vantagectl")]
        fallback: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .init();

    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => TelemetryConfig::load_or_default(path).install(),
        None => TelemetryConfig::global(),
    };
    if !config.enabled {
        warn!("telemetry collection is disabled in configuration");
    }

    let resolver = host_resolver();

    match cli.command {
        Commands::Context => {
            let mut context = TelemetryContext::default();
            resolver.initialize(&mut context);
            println!("{}", serde_json::to_string_pretty(&context)?);
        }
        Commands::UserAgent { fallback } => {
            println!("{}", resolver.user_agent(&fallback));
        }
    }

    Ok(())
}

/// vantagectl acts as its own host application.
fn host_resolver() -> ContextResolver {
    let descriptor = HostAppDescriptor {
        full_name: "vantagectl".to_string(),
        major_version: env!("CARGO_PKG_VERSION_MAJOR").to_string(),
        minor_version: env!("CARGO_PKG_VERSION_MINOR").to_string(),
        build: env!("CARGO_PKG_VERSION_PATCH").to_string(),
    };

    ContextResolver::system(
        Box::new(StaticHostApplication::new(descriptor)),
        Box::new(StaticPluginVersions::default().with_version(COMPONENT_ID, VERSION)),
    )
}
