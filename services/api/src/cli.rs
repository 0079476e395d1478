use crate::demo::{run_demo, run_export_report, DemoArgs, ExportReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use staff_registry::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Staff Registry",
    about = "Run the employee record registry service from the command line",
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
    /// Render the filtered profile report as a PDF from seeded demo data
    ExportReport(ExportReportArgs),
    /// Run an end-to-end CLI demo covering intake, security updates, and reporting
    Demo(DemoArgs),
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
        Command::ExportReport(args) => run_export_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
