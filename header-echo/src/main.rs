use std::process::ExitCode;

use env_logger::Env;
use header_echo::{bind, config, run, shutdown, ServerError};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn start() -> Result<(), ServerError> {
    let signal = shutdown::signal();
    let listener = bind(config::ADDR).await?;
    run(listener, signal).await
}
