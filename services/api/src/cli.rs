use crate::demo::{
    run_balance_report, run_demo, run_history_report, BalanceArgs, DemoArgs, HistoryArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use leavedesk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Leave Desk",
    about = "Run the employee leave-request service and reports from the command line",
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
    /// Inspect balances and history in the leave record store
    Leave {
        #[command(subcommand)]
        command: LeaveCommand,
    },
    /// Run an end-to-end CLI demo covering submission, rejection, and accounting
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum LeaveCommand {
    /// Report allowance, usage, and remainder per category for one employee
    Balance(BalanceArgs),
    /// List an employee's requests for a year, optionally narrowed to a month
    History(HistoryArgs),
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
        Command::Leave {
            command: LeaveCommand::Balance(args),
        } => run_balance_report(args),
        Command::Leave {
            command: LeaveCommand::History(args),
        } => run_history_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
