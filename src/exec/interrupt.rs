// src/exec/interrupt.rs

//! Interrupt notifications directed at the wrapper itself.

use std::io;

use super::BoxFuture;

/// Source of interrupt notifications.
pub trait InterruptSource: Send {
    /// Resolve when the next interrupt arrives.
    ///
    /// Must be cancel safe: the supervisor drops this future whenever the
    /// child exits first.
    fn recv(&mut self) -> BoxFuture<'_, ()>;
}

/// SIGINT (Ctrl-C) listener.
///
/// The OS handler is installed by [`SigintSource::new`], so an interrupt
/// delivered at any point after construction is observed by the next
/// `recv`. Once installed, SIGINT no longer terminates the wrapper.
#[derive(Debug)]
pub struct SigintSource {
    #[cfg(unix)]
    inner: tokio::signal::unix::Signal,
    #[cfg(windows)]
    inner: tokio::signal::windows::CtrlC,
}

impl SigintSource {
    /// Must be called from within a Tokio runtime.
    pub fn new() -> io::Result<Self> {
        #[cfg(unix)]
        let inner = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;
        #[cfg(windows)]
        let inner = tokio::signal::windows::ctrl_c()?;

        Ok(Self { inner })
    }
}

impl InterruptSource for SigintSource {
    fn recv(&mut self) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            if self.inner.recv().await.is_none() {
                // Listener shut down; no interrupt can arrive any more.
                std::future::pending::<()>().await;
            }
        })
    }
}
