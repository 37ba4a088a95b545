use crate::quotes::{run_quote, QuoteCommand};
use crate::report::{run_report, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_impact::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Credit Impact",
    about = "Compare what a credit score costs across loans, cards, insurance and utilities",
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
    /// Price a product for every credit bracket
    Quote {
        #[command(subcommand)]
        command: QuoteCommand,
    },
    /// Write the personalized credit improvement report to a PDF file
    Report(ReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quote { command } => run_quote(command),
        Command::Report(args) => run_report(args),
    }
}
