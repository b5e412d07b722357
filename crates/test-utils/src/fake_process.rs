use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use executer::exec::{BoxFuture, ChildExit, ChildProcess, InterruptSource, ProcessLauncher};
use tokio::sync::{mpsc, watch};

/// What a fake child does once launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeBehaviour {
    /// Exit immediately with this code.
    Exit(i32),
    /// Terminate without an exit code (as if killed by a signal).
    NoCode,
    /// `wait` itself fails.
    WaitError,
    /// `launch` fails with this error kind; no child exists.
    LaunchError(io::ErrorKind),
    /// Run until interrupted, then exit with this code.
    UntilInterrupted(i32),
    /// Run forever; delivering the interrupt fails.
    RefusesInterrupt,
}

/// Everything the fake processes observed.
#[derive(Debug, Default, Clone)]
pub struct FakeLog {
    /// `(program, args)` per successful or failed launch attempt.
    pub launches: Vec<(String, Vec<String>)>,
    pub interrupts_delivered: usize,
    pub reaped: usize,
}

/// A launcher that hands out scripted fake children.
///
/// Each launch consumes the next behaviour; when the script runs out, children
/// exit with 0.
#[derive(Debug, Clone)]
pub struct FakeLauncher {
    script: Arc<Mutex<VecDeque<FakeBehaviour>>>,
    log: Arc<Mutex<FakeLog>>,
}

impl FakeLauncher {
    pub fn new(script: impl IntoIterator<Item = FakeBehaviour>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into_iter().collect())),
            log: Arc::new(Mutex::new(FakeLog::default())),
        }
    }

    pub fn log(&self) -> FakeLog {
        self.log.lock().unwrap().clone()
    }
}

impl ProcessLauncher for FakeLauncher {
    fn launch(&mut self, program: &str, args: &[String]) -> io::Result<Box<dyn ChildProcess>> {
        self.log
            .lock()
            .unwrap()
            .launches
            .push((program.to_string(), args.to_vec()));

        let behaviour = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(FakeBehaviour::Exit(0));

        if let FakeBehaviour::LaunchError(kind) = behaviour {
            return Err(io::Error::new(kind, format!("fake launch failure for {program}")));
        }

        let (interrupted_tx, interrupted_rx) = watch::channel(false);
        Ok(Box::new(FakeChild {
            behaviour,
            interrupted_tx,
            interrupted_rx,
            log: Arc::clone(&self.log),
        }))
    }
}

struct FakeChild {
    behaviour: FakeBehaviour,
    interrupted_tx: watch::Sender<bool>,
    interrupted_rx: watch::Receiver<bool>,
    log: Arc<Mutex<FakeLog>>,
}

impl ChildProcess for FakeChild {
    fn wait(&mut self) -> BoxFuture<'_, io::Result<ChildExit>> {
        Box::pin(async move {
            let result = match self.behaviour {
                FakeBehaviour::Exit(code) => Ok(ChildExit::with_code(code)),
                FakeBehaviour::NoCode => Ok(ChildExit::without_code()),
                FakeBehaviour::WaitError => Err(io::Error::other("fake wait failure")),
                FakeBehaviour::UntilInterrupted(code) => {
                    let _ = self.interrupted_rx.wait_for(|interrupted| *interrupted).await;
                    Ok(ChildExit::with_code(code))
                }
                FakeBehaviour::RefusesInterrupt | FakeBehaviour::LaunchError(_) => {
                    std::future::pending::<io::Result<ChildExit>>().await
                }
            };

            if result.is_ok() {
                self.log.lock().unwrap().reaped += 1;
            }
            result
        })
    }

    fn interrupt(&mut self) -> io::Result<()> {
        if self.behaviour == FakeBehaviour::RefusesInterrupt {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        self.log.lock().unwrap().interrupts_delivered += 1;
        let _ = self.interrupted_tx.send(true);
        Ok(())
    }
}

/// Interrupt source that never fires.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInterrupts;

impl InterruptSource for NoInterrupts {
    fn recv(&mut self) -> BoxFuture<'_, ()> {
        Box::pin(std::future::pending())
    }
}

/// Interrupt source driven by an [`InterruptTrigger`].
#[derive(Debug)]
pub struct ManualInterrupts {
    rx: mpsc::UnboundedReceiver<()>,
}

/// Handle used by tests to fire interrupts.
#[derive(Debug, Clone)]
pub struct InterruptTrigger {
    tx: mpsc::UnboundedSender<()>,
}

impl InterruptTrigger {
    pub fn fire(&self) {
        let _ = self.tx.send(());
    }
}

pub fn manual_interrupts() -> (InterruptTrigger, ManualInterrupts) {
    let (tx, rx) = mpsc::unbounded_channel();
    (InterruptTrigger { tx }, ManualInterrupts { rx })
}

impl InterruptSource for ManualInterrupts {
    fn recv(&mut self) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            if self.rx.recv().await.is_none() {
                std::future::pending::<()>().await;
            }
        })
    }
}

/// Cloneable in-memory diagnostic writer.
#[derive(Debug, Default, Clone)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().unwrap()).into_owned()
    }

    pub fn boxed(&self) -> Box<dyn Write + Send> {
        Box::new(self.clone())
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
