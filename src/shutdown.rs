use crate::services::collaborators::Lifecycle;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal;
use tracing::{error, info};

/// Process-wide shutdown flag polled by long-running library work.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag {
    tripped: Arc<AtomicBool>,
}

impl ShutdownFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.tripped.store(true, Ordering::SeqCst);
    }

    /// Trips the flag on the first Ctrl-C. Hosts without their own signal
    /// handling call this once after building the shared state.
    pub fn listen_for_ctrl_c(&self) -> tokio::task::JoinHandle<()> {
        let flag = self.clone();
        tokio::spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Shutdown signal received");
                    flag.trigger();
                }
                Err(e) => {
                    error!("Error listening for shutdown: {}", e);
                }
            }
        })
    }
}

impl Lifecycle for ShutdownFlag {
    fn is_shutting_down(&self) -> bool {
        self.tripped.load(Ordering::SeqCst)
    }
}
