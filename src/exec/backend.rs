// src/exec/backend.rs

//! Pluggable process backend abstraction.
//!
//! The supervisor talks to a `ProcessLauncher` instead of `tokio::process`
//! directly. Production uses [`TokioLauncher`]; tests can provide a launcher
//! whose children exit, hang or fail on demand without spawning anything.

use std::io;
use std::process::{ExitStatus, Stdio};

use tokio::process::{Child, Command};
use tracing::debug;

use super::BoxFuture;

/// How a child process ended.
///
/// `code` is `None` when the process did not exit normally (for example,
/// it was terminated by a signal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildExit {
    pub code: Option<i32>,
}

impl ChildExit {
    pub fn with_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn without_code() -> Self {
        Self { code: None }
    }
}

impl From<ExitStatus> for ChildExit {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Starts child processes.
pub trait ProcessLauncher: Send {
    /// Launch `program` with `args`, stdio inherited from the wrapper.
    ///
    /// An error here means no process exists; nothing should be awaited.
    fn launch(&mut self, program: &str, args: &[String]) -> io::Result<Box<dyn ChildProcess>>;
}

/// A launched child process.
pub trait ChildProcess: Send {
    /// Wait for the child to terminate and reap it.
    ///
    /// Must be cancel safe: the supervisor drops this future when an
    /// interrupt wins the race and calls `wait` again afterwards.
    fn wait(&mut self) -> BoxFuture<'_, io::Result<ChildExit>>;

    /// Deliver an interrupt (SIGINT on unix) to the child.
    fn interrupt(&mut self) -> io::Result<()>;
}

/// Real launcher backed by `tokio::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioLauncher;

impl ProcessLauncher for TokioLauncher {
    fn launch(&mut self, program: &str, args: &[String]) -> io::Result<Box<dyn ChildProcess>> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(false);

        let child = cmd.spawn()?;
        debug!(program, pid = child.id(), "child process spawned");

        Ok(Box::new(TokioChild { child }))
    }
}

struct TokioChild {
    child: Child,
}

impl ChildProcess for TokioChild {
    fn wait(&mut self) -> BoxFuture<'_, io::Result<ChildExit>> {
        Box::pin(async move { self.child.wait().await.map(ChildExit::from) })
    }

    #[cfg(unix)]
    fn interrupt(&mut self) -> io::Result<()> {
        let pid = self
            .child
            .id()
            .ok_or_else(|| io::Error::other("child process has already been reaped"))?;
        let pid = libc::pid_t::try_from(pid).map_err(io::Error::other)?;

        // SAFETY: `kill` has no memory-safety preconditions. `pid` is our own
        // unreaped child, so it cannot have been recycled for another process.
        let rc = unsafe { libc::kill(pid, libc::SIGINT) };
        if rc == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }

    #[cfg(not(unix))]
    fn interrupt(&mut self) -> io::Result<()> {
        // No SIGINT equivalent can be targeted at a single child here.
        self.child.start_kill()
    }
}
