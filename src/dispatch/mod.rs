// src/dispatch/mod.rs

//! Dispatch layer: from a source file and options to a [`Plan`].
//!
//! - [`table`] is the static extension-to-toolchain lookup.
//! - [`markers`] probes the project layout (Cargo manifests, run-script
//!   markers).
//!
//! The plan is a list of invocations executed in order; a compile step
//! that fails stops everything after it.

pub mod markers;
pub mod table;

use std::path::Path;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::ConfigFile;
use crate::errors::{ExecuterError, Result};
use crate::exec::Invocation;
use crate::fs::FileSystem;
use crate::source::Source;

use self::table::{CARGO_COMMAND_KEY, Toolchain};

/// Ordered invocations for one wrapper run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub steps: Vec<Invocation>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn push(&mut self, step: Invocation) {
        self.steps.push(step);
    }
}

/// Everything the dispatch layer needs, independent of how it was parsed.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    pub source: Source,
    pub compile_args: Vec<String>,
    pub run_args: Vec<String>,
    pub only_compile: bool,
    pub only_execute: bool,
    pub measure_time: bool,
    pub verbose_trace: bool,
    pub compile_error_exit_code: i32,
}

impl DispatchRequest {
    pub fn from_cli(args: &CliArgs, source: Source, config: &ConfigFile, verbose_trace: bool) -> Self {
        Self {
            source,
            compile_args: args.compile_args.clone(),
            run_args: args.run_args(),
            only_compile: args.only_compile,
            only_execute: args.skips_compile(),
            measure_time: args.measure_time,
            verbose_trace,
            compile_error_exit_code: config.config.exit_status_when_compile_error,
        }
    }

    /// `<program> <compile-args> <src> <run-args>`; callers adjust the groups.
    fn step(&self, program: impl Into<String>, is_compile_step: bool) -> Invocation {
        Invocation {
            is_compile_step,
            program: program.into(),
            preceding_args: self.compile_args.clone(),
            positional_args: vec![self.source.path_str()],
            trailing_args: self.run_args.clone(),
            measure_elapsed_time: self.measure_time,
            verbose_trace: self.verbose_trace,
            compile_error_exit_code: self.compile_error_exit_code,
        }
    }

    fn wants_compile(&self) -> bool {
        !self.only_execute
    }

    fn wants_run(&self) -> bool {
        !self.only_compile
    }
}

/// Build the plan for `req`.
///
/// A `.executer` run-script marker next to the source takes precedence over
/// the extension table.
pub fn build_plan(req: &DispatchRequest, config: &ConfigFile, fs: &dyn FileSystem) -> Result<Plan> {
    if let Some(script) = markers::custom_run_script(fs, &req.source.dir)? {
        info!(script = %script.display(), "delegating to custom run script");
        let mut step = req.step(script.to_string_lossy(), false);
        step.preceding_args = vec![];
        return Ok(Plan { steps: vec![step] });
    }

    let toolchain = table::lookup(&req.source.ext)
        .ok_or_else(|| ExecuterError::UnsupportedFileType(req.source.ext.clone()))?;
    debug!(ext = %req.source.ext, ?toolchain, "toolchain selected");

    let plan = match toolchain {
        Toolchain::Interpreted { command, check_args } => {
            plan_interpreted(req, &config.command_for(&req.source.ext, command), check_args)
        }
        Toolchain::Cargo => plan_cargo(req, &config.command_for(CARGO_COMMAND_KEY, "cargo"), fs),
        Toolchain::Compiled {
            command,
            build_args,
        } => plan_compiled(req, &config.command_for(&req.source.ext, command), build_args),
    };

    Ok(plan)
}

fn plan_interpreted(req: &DispatchRequest, command: &str, check_args: Option<&[&str]>) -> Plan {
    let mut plan = Plan::default();

    if req.only_compile {
        match check_args {
            Some(check_args) => {
                let mut step = req.step(command, true);
                step.preceding_args = to_strings(check_args);
                step.trailing_args = vec![];
                plan.push(step);
            }
            None => info!(command, "nothing to compile for this file type"),
        }
        return plan;
    }

    plan.push(req.step(command, false));
    plan
}

fn plan_cargo(req: &DispatchRequest, command: &str, fs: &dyn FileSystem) -> Plan {
    let manifest = markers::find_cargo_manifest(fs, &req.source.dir);
    let runnable = req.source.base == "main.rs" && manifest.is_some();

    let manifest_args = |subcommand: &str| {
        let mut args = to_strings(&[subcommand, "--quiet"]);
        if let Some(manifest) = &manifest {
            args.push("--manifest-path".to_string());
            args.push(manifest.to_string_lossy().into_owned());
        }
        args.extend(req.compile_args.iter().cloned());
        args
    };

    let mut plan = Plan::default();
    if runnable && !req.only_compile {
        let mut step = req.step(command, false);
        step.preceding_args = manifest_args("run");
        step.positional_args = vec![];
        step.trailing_args = if req.run_args.is_empty() {
            vec![]
        } else {
            std::iter::once("--".to_string())
                .chain(req.run_args.iter().cloned())
                .collect()
        };
        plan.push(step);
    } else {
        let mut step = req.step(command, true);
        step.preceding_args = manifest_args("check");
        step.positional_args = vec![];
        step.trailing_args = vec![];
        plan.push(step);
    }
    plan
}

fn plan_compiled(req: &DispatchRequest, command: &str, build_args: &[&str]) -> Plan {
    let output = req.source.path_without_ext_str();
    let mut plan = Plan::default();

    if req.wants_compile() {
        let mut preceding = to_strings(build_args);
        preceding.push("-o".to_string());
        preceding.push(output.clone());
        preceding.extend(req.compile_args.iter().cloned());

        let mut step = req.step(command, true);
        step.preceding_args = preceding;
        step.trailing_args = vec![];
        plan.push(step);
    }

    if req.wants_run() {
        let mut step = req.step(executable_path(&output), false);
        step.preceding_args = vec![];
        step.positional_args = vec![];
        plan.push(step);
    }

    plan
}

/// Path form that `Command` will not resolve through `PATH`.
fn executable_path(output: &str) -> String {
    if Path::new(output).is_absolute() {
        output.to_string()
    } else {
        format!("./{output}")
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
