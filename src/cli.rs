// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! `--compile-args` and `--args` take every following token up to the next
//! option name, including tokens that start with `-` (`-O2`, `-n`). clap
//! cannot stop a hyphen-accepting list at a known option, so argv is
//! rewritten first: each value becomes its own `--args=<value>` occurrence.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `executer`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "executer",
    version,
    about = "Compile and/or run a source file with the toolchain its extension implies.",
    long_about = None,
    after_help = "Examples:\n  executer main.py --args a b\n  executer main.c --compile-args -O2 --time\n  executer main.go -- --verbose"
)]
pub struct CliArgs {
    /// Source file to compile and/or execute.
    #[arg(value_name = "FILE")]
    pub source: String,

    /// Arguments passed to the compiler, up to the next option.
    #[arg(long = "compile-args", value_name = "ARG", num_args = 1)]
    pub compile_args: Vec<String>,

    /// Arguments passed to the program when it is executed, up to the next option.
    #[arg(long = "args", value_name = "ARG", num_args = 1)]
    pub exec_args: Vec<String>,

    /// Just compile and skip execution. Wins over `--only-execute`.
    #[arg(long)]
    pub only_compile: bool,

    /// Just execute and skip compilation.
    #[arg(long)]
    pub only_execute: bool,

    /// Measure the execution time.
    #[arg(long = "time")]
    pub measure_time: bool,

    /// Path to a config file (TOML).
    ///
    /// If omitted, `EXECUTER_CONFIG` or `Executer.toml` next to the source is used.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `EXECUTER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Program arguments after `--`, appended to `--args`.
    #[arg(last = true, value_name = "ARGS")]
    pub trailing_args: Vec<String>,
}

impl CliArgs {
    /// Parse a full argv (program name first).
    pub fn try_parse_argv<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(split_value_lists(argv))
    }

    /// `--only-execute` is dropped when `--only-compile` is also given.
    pub fn skips_compile(&self) -> bool {
        self.only_execute && !self.only_compile
    }

    /// All arguments destined for the executed program, `--args` first.
    pub fn run_args(&self) -> Vec<String> {
        self.exec_args
            .iter()
            .chain(self.trailing_args.iter())
            .cloned()
            .collect()
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Option names that end a `--args`/`--compile-args` value list.
const OPTION_NAMES: &[&str] = &[
    "--compile-args",
    "--args",
    "--only-compile",
    "--only-execute",
    "--time",
    "--config",
    "--log-level",
    "-h",
    "--help",
    "-V",
    "--version",
    "--",
];

const VALUE_LIST_OPTIONS: &[&str] = &["--compile-args", "--args"];

fn is_option_name(token: &OsStr) -> bool {
    let Some(token) = token.to_str() else {
        return false;
    };
    OPTION_NAMES.iter().any(|name| {
        token == *name
            || (name.starts_with("--")
                && token
                    .strip_prefix(*name)
                    .is_some_and(|rest| rest.starts_with('=')))
    })
}

/// Rewrite `--args a -n` into `--args=a --args=-n`.
///
/// A list with no values keeps the bare option so clap reports the missing
/// value. Everything after a bare `--` is left untouched.
fn split_value_lists<I, T>(argv: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    // (option, whether a value was emitted for it)
    let mut open: Option<(&'static str, bool)> = None;
    let mut tokens = argv.into_iter().map(Into::into);

    while let Some(token) = tokens.next() {
        if let Some((option, seen_value)) = open {
            if !is_option_name(&token) {
                let mut attached = OsString::from(option);
                attached.push("=");
                attached.push(&token);
                out.push(attached);
                open = Some((option, true));
                continue;
            }
            if !seen_value {
                out.push(OsString::from(option));
            }
            open = None;
        }

        if token == "--" {
            out.push(token);
            out.extend(tokens.by_ref());
            break;
        }

        match VALUE_LIST_OPTIONS.iter().find(|option| token == **option) {
            Some(option) => open = Some((*option, false)),
            None => out.push(token),
        }
    }

    if let Some((option, false)) = open {
        out.push(OsString::from(option));
    }
    out
}

/// Convenience wrapper around `CliArgs::try_parse_argv`.
///
/// Exits with `exit_code` on a parse error, and with 0 for `--help`/`--version`.
pub fn parse_or_exit(exit_code: i32) -> CliArgs {
    match CliArgs::try_parse_argv(std::env::args_os()) {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { exit_code } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_argv(std::iter::once("executer").chain(args.iter().copied()))
    }

    #[test]
    fn all_options() {
        let args = parse(&[
            "main.go",
            "--time",
            "--only-compile",
            "--args",
            "a",
            "b",
            "--compile-args",
            "c",
            "d",
        ])
        .unwrap();

        assert_eq!(args.source, "main.go");
        assert_eq!(args.exec_args, vec!["a", "b"]);
        assert_eq!(args.compile_args, vec!["c", "d"]);
        assert!(args.only_compile);
        assert!(!args.only_execute);
        assert!(args.measure_time);
    }

    #[test]
    fn only_compile_wins_over_only_execute() {
        let args = parse(&["main.c", "--only-compile", "--only-execute"]).unwrap();
        assert!(args.only_compile);
        assert!(!args.skips_compile());

        let args = parse(&["main.c", "--only-execute"]).unwrap();
        assert!(args.skips_compile());
    }

    #[test]
    fn compile_args_accept_hyphenated_flags() {
        let args = parse(&["--compile-args", "-O2", "-Wall", "--time", "main.c"]).unwrap();
        assert_eq!(args.compile_args, vec!["-O2", "-Wall"]);
        assert!(args.measure_time);
        assert_eq!(args.source, "main.c");
    }

    #[test]
    fn exec_args_accept_hyphenated_flags() {
        let args = parse(&["main.py", "--args", "-n", "5"]).unwrap();
        assert_eq!(args.exec_args, vec!["-n", "5"]);
        assert_eq!(args.source, "main.py");
    }

    #[test]
    fn value_lists_end_at_attached_options() {
        let args = parse(&[
            "main.c",
            "--compile-args",
            "-g",
            "--log-level=debug",
            "--args=-x",
            "--config=exec.toml",
        ])
        .unwrap();
        assert_eq!(args.compile_args, vec!["-g"]);
        assert_eq!(args.exec_args, vec!["-x"]);
        assert_eq!(args.config, Some(PathBuf::from("exec.toml")));
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    }

    #[test]
    fn unknown_long_flags_are_values_inside_a_list() {
        let args = parse(&["main.go", "--args", "--verbose", "-v=1"]).unwrap();
        assert_eq!(args.exec_args, vec!["--verbose", "-v=1"]);
    }

    #[test]
    fn hyphen_values_after_separator_are_untouched() {
        let split = split_value_lists(["executer", "a.py", "--", "--args", "-n"]);
        assert_eq!(split, vec!["executer", "a.py", "--", "--args", "-n"]);
    }

    #[test]
    fn args_stop_at_next_option() {
        let args = parse(&["--args", "a", "b", "--time", "main.go"]).unwrap();
        assert_eq!(args.exec_args, vec!["a", "b"]);
        assert!(args.measure_time);
        assert_eq!(args.source, "main.go");
    }

    #[test]
    fn compile_args_stop_at_next_option() {
        let args = parse(&["--compile-args", "a", "b", "--time", "main.go"]).unwrap();
        assert_eq!(args.compile_args, vec!["a", "b"]);
    }

    #[test]
    fn args_without_value_is_an_error() {
        assert!(parse(&["main.go", "--time", "--args"]).is_err());
        assert!(parse(&["main.go", "--time", "--compile-args"]).is_err());
    }

    #[test]
    fn more_than_one_source_is_an_error() {
        assert!(parse(&["main.go", "main.py"]).is_err());
    }

    #[test]
    fn missing_source_is_an_error() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn unknown_option_is_an_error() {
        assert!(parse(&["main.go", "--main.py"]).is_err());
    }

    #[test]
    fn help_is_not_reported_on_stderr() {
        let err = parse(&["--time", "--help"]).unwrap_err();
        assert!(!err.use_stderr());
    }

    #[test]
    fn trailing_args_follow_exec_args() {
        let args = parse(&["main.py", "--args", "a", "--", "-v", "--time"]).unwrap();
        assert_eq!(args.run_args(), vec!["a", "-v", "--time"]);
        assert!(!args.measure_time);
    }
}
