//! Process signals that trigger a graceful shutdown.
//!
//! Actix's own signal handling is disabled so liveness can be cleared before
//! the server drains. Both Ctrl+C and SIGTERM are honoured.

use std::io;

#[cfg(unix)]
use tokio::signal::unix::{Signal, SignalKind, signal};

/// Signal that ended the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    Interrupt,
    Terminate,
}

/// Handlers registered up front so a signal arriving during startup is not
/// lost to the default disposition.
pub struct ShutdownListener {
    #[cfg(unix)]
    terminate: Signal,
}

impl ShutdownListener {
    pub fn install() -> io::Result<Self> {
        Ok(Self {
            #[cfg(unix)]
            terminate: signal(SignalKind::terminate())?,
        })
    }

    /// Wait for the first shutdown signal.
    pub async fn recv(self) -> io::Result<ShutdownSignal> {
        #[cfg(unix)]
        let terminate = {
            let mut terminate = self.terminate;
            async move { terminate.recv().await }
        };
        #[cfg(not(unix))]
        let terminate = std::future::pending::<Option<()>>();

        tokio::select! {
            result = tokio::signal::ctrl_c() => result.map(|()| ShutdownSignal::Interrupt),
            _ = terminate => Ok(ShutdownSignal::Terminate),
        }
    }
}
