use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use medvisa::error::AppError;

use crate::demo::{run_demo, run_export, DemoArgs, ExportArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "medvisa",
    about = "Run the client workflow service for medical-examination visa processing",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Walk one client through the full pipeline in memory and print the trail
    Demo(DemoArgs),
    /// Write the Wafid booking-team CSV export for a seed file
    Export(ExportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed the client store from a JSON file before accepting traffic
    #[arg(long)]
    pub(crate) seed: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args),
        Command::Export(args) => run_export(args),
    }
}
