use clap::{Args, Parser, Subcommand};

use crate::demo::{run_demo, run_season_tables, DemoArgs, SeasonArgs};
use crate::error::AppError;
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Colle Storage",
    about = "Run the seasonal storage pricing and contract service from the command line",
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
    /// Print the published rate cards and add-on services
    Seasons(SeasonArgs),
    /// Walk a sample booking end to end: estimate, validate, generate
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
        Command::Seasons(args) => run_season_tables(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
