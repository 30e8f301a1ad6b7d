use std::{
    sync::{
        atomic::{
            AtomicBool,
            Ordering,
        },
        Arc,
    },
    time::Duration,
};

use signal_hook::consts::TERM_SIGNALS;

/// Process-wide stop request. The only state shared with signal handlers.
#[derive(Debug, Clone, Default)]
pub struct Cancel(Arc<AtomicBool>);

impl Cancel {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag on any terminal signal. A second terminal signal while the flag is
    /// already set exits the process with status 1.
    pub fn register() -> std::io::Result<Self> {
        let cancel = Self::new();

        for &sig in TERM_SIGNALS {
            // Must be registered before the flag setter so the first signal only arms it.
            signal_hook::flag::register_conditional_shutdown(sig, 1, Arc::clone(&cancel.0))?;
            signal_hook::flag::register(sig, Arc::clone(&cancel.0))?;
        }

        tracing::debug!(signals = ?TERM_SIGNALS, "registered termination handlers");

        Ok(cancel)
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    #[inline]
    pub fn set(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Resolve once the flag is observed set, checking every `poll`.
    pub async fn wait(&self, poll: Duration) {
        while !self.is_set() {
            tokio::time::sleep(poll).await;
        }
    }
}
