use anyhow::Result;
use clap::Parser;
use claimguard::cli::{Cli, Commands};
use claimguard::commands::{self, AnalyzeConfig, ExportConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            thresholds,
            config,
            parallel,
            plain,
            top,
        } => commands::handle_analyze(AnalyzeConfig {
            path,
            format,
            output,
            thresholds,
            config,
            parallel,
            plain,
            top,
        }),
        Commands::Export {
            path,
            analyzer,
            output,
            delimiter,
            stats,
            thresholds,
            config,
        } => commands::handle_export(ExportConfig {
            path,
            analyzer,
            output,
            delimiter,
            stats,
            thresholds,
            config,
        }),
        Commands::Init { force } => commands::init_config(force),
    }
}

fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

// RUST_LOG wins over -v
fn init_logging(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
