use anyhow::Context;
use clap::{Parser, Subcommand};
use librarian_app::bootstrap::{self, StoreBackend};
use librarian_kernel::settings::Settings;

/// Book catalog service.
#[derive(Debug, Parser)]
#[command(name = "librarian", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API until interrupted.
    Serve {
        /// Override the configured listen port.
        #[arg(long)]
        port: Option<u16>,
        /// Keep books in process memory instead of the document store.
        #[arg(long)]
        in_memory: bool,
    },
    /// Print the effective settings as JSON.
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load librarian settings")?;

    match cli.command {
        Command::Serve { port, in_memory } => {
            librarian_telemetry::init(&settings.telemetry);
            if let Some(port) = port {
                settings.server.port = port;
            }
            let backend = if in_memory {
                StoreBackend::Memory
            } else {
                StoreBackend::Mongo
            };

            let runtime = tokio::runtime::Runtime::new().context("failed to start runtime")?;
            runtime.block_on(bootstrap::run(settings, backend))
        }
        Command::Config => {
            let rendered = serde_json::to_string_pretty(&settings)
                .context("failed to render settings")?;
            println!("{}", rendered);
            Ok(())
        }
    }
}
