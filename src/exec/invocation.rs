// src/exec/invocation.rs

//! The per-call invocation descriptor.

/// Exit code used for a failed non-compile step.
pub const DEFAULT_FAILURE_EXIT_CODE: i32 = 1;

/// Everything the supervisor needs to launch one child process.
///
/// The three argument groups exist only for the convenience of whoever
/// builds the descriptor; they are joined in order by [`Invocation::args`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Selects the compile error exit code as the failure policy and
    /// suppresses elapsed time reporting.
    pub is_compile_step: bool,
    pub program: String,
    pub preceding_args: Vec<String>,
    pub positional_args: Vec<String>,
    pub trailing_args: Vec<String>,
    pub measure_elapsed_time: bool,
    pub verbose_trace: bool,
    /// Exit code used on failure when `is_compile_step` is set.
    pub compile_error_exit_code: i32,
}

impl Invocation {
    /// Final argument vector: preceding, then positional, then trailing.
    pub fn args(&self) -> Vec<String> {
        self.preceding_args
            .iter()
            .chain(self.positional_args.iter())
            .chain(self.trailing_args.iter())
            .cloned()
            .collect()
    }

    /// Exit code reported whenever no genuine child exit code is available.
    pub fn failure_exit_code(&self) -> i32 {
        if self.is_compile_step {
            self.compile_error_exit_code
        } else {
            DEFAULT_FAILURE_EXIT_CODE
        }
    }

    pub fn reports_elapsed_time(&self) -> bool {
        (self.measure_elapsed_time || self.verbose_trace) && !self.is_compile_step
    }

    /// `['program', 'arg1', ...]`, as written by the verbose trace.
    pub fn command_line_pretty(&self) -> String {
        let mut line = Vec::with_capacity(1 + self.preceding_args.len());
        line.push(self.program.clone());
        line.extend(self.args());
        to_string_pretty(&line)
    }
}

/// Render a list as `['a', 'b']`, or `nil` when empty.
pub fn to_string_pretty<T: AsRef<str>>(items: &[T]) -> String {
    if items.is_empty() {
        return "nil".to_string();
    }
    let quoted: Vec<String> = items
        .iter()
        .map(|item| format!("'{}'", item.as_ref()))
        .collect();
    format!("[{}]", quoted.join(", "))
}
