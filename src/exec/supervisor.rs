// src/exec/supervisor.rs

//! Runs one invocation to completion and decides the wrapper's fate.

use std::fmt;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::backend::{ChildExit, ProcessLauncher};
use super::interrupt::InterruptSource;
use super::invocation::Invocation;

/// What the caller should do after an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The child exited with 0; the next step (if any) may run.
    Continue,
    /// The wrapper must terminate with this exit code.
    Exit(i32),
}

impl Termination {
    pub fn exit_code(self) -> i32 {
        match self {
            Termination::Continue => 0,
            Termination::Exit(code) => code,
        }
    }
}

/// Which event resolved first.
enum Race {
    Exited(io::Result<ChildExit>),
    Interrupted,
}

/// Launches a child per invocation and races its exit against interrupts.
///
/// The supervisor keeps no state between calls apart from the launcher, the
/// interrupt listener and the diagnostic writer it was built with.
pub struct Supervisor<L: ProcessLauncher, I: InterruptSource> {
    launcher: L,
    interrupts: I,
    diagnostics: Box<dyn Write + Send>,
}

impl<L: ProcessLauncher, I: InterruptSource> fmt::Debug for Supervisor<L, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Supervisor").finish_non_exhaustive()
    }
}

impl<L: ProcessLauncher, I: InterruptSource> Supervisor<L, I> {
    /// Supervisor writing diagnostics to the wrapper's stderr.
    pub fn new(launcher: L, interrupts: I) -> Self {
        Self::with_diagnostics(launcher, interrupts, Box::new(io::stderr()))
    }

    pub fn with_diagnostics(
        launcher: L,
        interrupts: I,
        diagnostics: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            launcher,
            interrupts,
            diagnostics,
        }
    }

    /// Run `invocation` until the child is fully resolved.
    ///
    /// Never returns while the launched child is still alive.
    pub async fn run(&mut self, invocation: &Invocation) -> Termination {
        let started = Instant::now();
        let termination = self.supervise(invocation).await;

        if invocation.reports_elapsed_time() {
            self.report_elapsed(started.elapsed());
        }

        info!(
            program = %invocation.program,
            compile_step = invocation.is_compile_step,
            exit_code = termination.exit_code(),
            "invocation finished"
        );
        termination
    }

    async fn supervise(&mut self, invocation: &Invocation) -> Termination {
        let failure_code = invocation.failure_exit_code();
        let args = invocation.args();

        if invocation.verbose_trace {
            self.diagnostic(&invocation.command_line_pretty());
        }

        debug!(
            program = %invocation.program,
            ?args,
            compile_step = invocation.is_compile_step,
            "launching child process"
        );

        let mut child = match self.launcher.launch(&invocation.program, &args) {
            Ok(child) => child,
            Err(err) => {
                debug!(program = %invocation.program, error = %err, "failed to launch child");
                self.diagnostic(&format!("Failed to execute the command: {err}"));
                return Termination::Exit(failure_code);
            }
        };

        let race = tokio::select! {
            res = child.wait() => Race::Exited(res),
            () = self.interrupts.recv() => Race::Interrupted,
        };

        match race {
            Race::Exited(Ok(exit)) => match exit.code {
                Some(0) => Termination::Continue,
                Some(code) => Termination::Exit(code),
                None => {
                    debug!("child terminated without an exit code");
                    Termination::Exit(failure_code)
                }
            },
            Race::Exited(Err(err)) => {
                debug!(error = %err, "waiting for child failed");
                Termination::Exit(failure_code)
            }
            Race::Interrupted => {
                if invocation.verbose_trace {
                    self.diagnostic("\nSIGINT is caught.");
                }
                info!("interrupt received; forwarding it to the child");

                if let Err(err) = child.interrupt() {
                    debug!(error = %err, "forwarding interrupt failed");
                    self.diagnostic("Failed to send SIGINT.");
                    return Termination::Exit(failure_code);
                }

                // Further interrupts are ignored until the child is gone.
                match child.wait().await {
                    Ok(exit) => debug!(code = ?exit.code, "child reaped after interrupt"),
                    Err(err) => debug!(error = %err, "waiting for interrupted child failed"),
                }

                Termination::Exit(failure_code)
            }
        }
    }

    fn report_elapsed(&mut self, elapsed: Duration) {
        self.diagnostic(&format_elapsed(elapsed));
    }

    fn diagnostic(&mut self, line: &str) {
        let _ = writeln!(self.diagnostics, "{line}");
        let _ = self.diagnostics.flush();
    }
}

/// `elapsed: 1.23 sec`
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("elapsed: {:.2} sec", elapsed.as_secs_f64())
}
