use crate::demo::{run_demo, run_score_file, DemoArgs, ScoreFileArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use leadscore::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Lead Scoring Service",
    about = "Score property buyer leads from the command line or serve them over HTTP",
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
    /// Score leads without a server
    Score {
        #[command(subcommand)]
        command: ScoreCommand,
    },
    /// Run an end-to-end demo over a handful of representative leads
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ScoreCommand {
    /// Score every lead in a CRM CSV export and print the triage queue
    Batch(ScoreFileArgs),
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
        Command::Score {
            command: ScoreCommand::Batch(args),
        } => run_score_file(args),
        Command::Demo(args) => run_demo(args),
    }
}
