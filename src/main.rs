// src/main.rs

use executer::config::EXIT_STATUS_WHEN_COMPILE_ERROR;
use executer::{cli, logging, run};

#[tokio::main]
async fn main() {
    let code = match run_main().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("executer error: {err:?}");
            EXIT_STATUS_WHEN_COMPILE_ERROR
        }
    };
    std::process::exit(code);
}

async fn run_main() -> anyhow::Result<i32> {
    let args = cli::parse_or_exit(EXIT_STATUS_WHEN_COMPILE_ERROR);
    logging::init_logging(args.log_level)?;
    Ok(run(args).await?)
}
