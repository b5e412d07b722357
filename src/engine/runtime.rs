// src/engine/runtime.rs

use std::fmt;

use tracing::{debug, info};

use crate::dispatch::Plan;
use crate::exec::{InterruptSource, ProcessLauncher, Supervisor, Termination};

/// Runs plans step by step through a [`Supervisor`].
pub struct Runtime<L: ProcessLauncher, I: InterruptSource> {
    supervisor: Supervisor<L, I>,
}

impl<L: ProcessLauncher, I: InterruptSource> fmt::Debug for Runtime<L, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("supervisor", &self.supervisor)
            .finish()
    }
}

impl<L: ProcessLauncher, I: InterruptSource> Runtime<L, I> {
    pub fn new(supervisor: Supervisor<L, I>) -> Self {
        Self { supervisor }
    }

    /// Execute `plan` in order.
    ///
    /// Stops at the first step that does not yield `Continue` and returns its
    /// termination; an empty or fully successful plan yields `Continue`.
    pub async fn run(&mut self, plan: &Plan) -> Termination {
        info!(steps = plan.steps.len(), "executer runtime started");

        for (index, step) in plan.steps.iter().enumerate() {
            debug!(index, program = %step.program, compile_step = step.is_compile_step, "running step");

            match self.supervisor.run(step).await {
                Termination::Continue => continue,
                exit @ Termination::Exit(_) => {
                    info!(index, code = exit.exit_code(), "step failed; skipping remaining steps");
                    return exit;
                }
            }
        }

        info!("all steps succeeded");
        Termination::Continue
    }
}
