// src/lib.rs

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod source;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{CONFIG_ENV_VAR, DEBUG_ENV_VAR, load_for_source};
use crate::dispatch::{DispatchRequest, build_plan};
use crate::engine::Runtime;
use crate::errors::{ExecuterError, Result};
use crate::exec::{SigintSource, Supervisor, TokioLauncher};
use crate::fs::RealFileSystem;
use crate::source::Source;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and the debug switch
/// - dispatch (extension table + project markers)
/// - the supervisor with the real process launcher and SIGINT listener
///
/// Returns the exit code the wrapper must terminate with. Errors are only
/// returned when no configuration could be established.
pub async fn run(args: CliArgs) -> Result<i32> {
    let fs = RealFileSystem;
    let source = Source::new(args.source.clone());

    let env_config = std::env::var(CONFIG_ENV_VAR).ok();
    let cfg = load_for_source(&fs, args.config.as_deref(), env_config.as_deref(), &source.dir)?;

    let env_debug = std::env::var(DEBUG_ENV_VAR).ok();
    let verbose_trace = config::debug_mode(&cfg, env_debug.as_deref());
    if verbose_trace {
        eprintln!("{args:?}");
    }

    let failure_code = cfg.config.exit_status_when_compile_error;
    let request = DispatchRequest::from_cli(&args, source, &cfg, verbose_trace);

    let plan = match build_plan(&request, &cfg, &fs) {
        Ok(plan) => plan,
        Err(err @ ExecuterError::UnsupportedFileType(_)) => {
            eprintln!("{err}");
            return Ok(failure_code);
        }
        Err(err) => {
            eprintln!("Failed to prepare the command: {err}");
            return Ok(failure_code);
        }
    };
    debug!(?plan, "plan built");

    if plan.is_empty() {
        info!("nothing to do");
        return Ok(0);
    }

    let interrupts = SigintSource::new()?;
    let supervisor = Supervisor::new(TokioLauncher, interrupts);
    let mut runtime = Runtime::new(supervisor);

    Ok(runtime.run(&plan).await.exit_code())
}
