#![allow(dead_code)]

use std::path::Path;

use executer::dispatch::DispatchRequest;
use executer::exec::Invocation;
use executer::source::Source;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Builder for `Invocation` to simplify test setup.
///
/// Defaults to a run step with no arguments, no tracing and a compile error
/// exit code of 100.
pub struct InvocationBuilder {
    invocation: Invocation,
}

impl InvocationBuilder {
    pub fn new(program: &str) -> Self {
        Self {
            invocation: Invocation {
                is_compile_step: false,
                program: program.to_string(),
                preceding_args: vec![],
                positional_args: vec![],
                trailing_args: vec![],
                measure_elapsed_time: false,
                verbose_trace: false,
                compile_error_exit_code: 100,
            },
        }
    }

    pub fn preceding(mut self, args: &[&str]) -> Self {
        self.invocation.preceding_args = strings(args);
        self
    }

    pub fn positional(mut self, args: &[&str]) -> Self {
        self.invocation.positional_args = strings(args);
        self
    }

    pub fn trailing(mut self, args: &[&str]) -> Self {
        self.invocation.trailing_args = strings(args);
        self
    }

    /// Mark as a compile step failing with `exit_code`.
    pub fn compile_step(mut self, exit_code: i32) -> Self {
        self.invocation.is_compile_step = true;
        self.invocation.compile_error_exit_code = exit_code;
        self
    }

    pub fn measure_time(mut self) -> Self {
        self.invocation.measure_elapsed_time = true;
        self
    }

    pub fn verbose(mut self) -> Self {
        self.invocation.verbose_trace = true;
        self
    }

    pub fn build(self) -> Invocation {
        self.invocation
    }
}

/// Builder for `DispatchRequest`.
pub struct DispatchRequestBuilder {
    request: DispatchRequest,
}

impl DispatchRequestBuilder {
    /// `source` is resolved against `/work` when relative.
    pub fn new(source: &str) -> Self {
        Self {
            request: DispatchRequest {
                source: Source::with_base_dir(source, Path::new("/work")),
                compile_args: vec![],
                run_args: vec![],
                only_compile: false,
                only_execute: false,
                measure_time: false,
                verbose_trace: false,
                compile_error_exit_code: 100,
            },
        }
    }

    pub fn compile_args(mut self, args: &[&str]) -> Self {
        self.request.compile_args = strings(args);
        self
    }

    pub fn run_args(mut self, args: &[&str]) -> Self {
        self.request.run_args = strings(args);
        self
    }

    pub fn only_compile(mut self) -> Self {
        self.request.only_compile = true;
        self
    }

    pub fn only_execute(mut self) -> Self {
        self.request.only_execute = true;
        self
    }

    pub fn measure_time(mut self) -> Self {
        self.request.measure_time = true;
        self
    }

    pub fn build(self) -> DispatchRequest {
        self.request
    }
}
