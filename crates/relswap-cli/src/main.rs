use relswap_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    let log_target = logging::init_logging();
    tracing::debug!(?log_target, "starting relswap");

    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("relswap error: {:#}", err);
        std::process::exit(1);
    }
}
