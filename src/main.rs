use clap::Parser;
use projsync::config::{Cli, Command};
use projsync::Config;

fn main() -> anyhow::Result<()> {
    // PROJSYNC_LOG controls verbosity, e.g. PROJSYNC_LOG=projsync=info
    let env_filter = tracing_subscriber::EnvFilter::try_from_env("PROJSYNC_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("projsync=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Copy(args) => {
            // Prompts for missing paths, then validates immediately
            let config = Config::try_from(args)?;
            projsync::commands::run(config)?;
        }
    }

    Ok(())
}
