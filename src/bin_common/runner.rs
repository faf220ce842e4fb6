//! Start and stop logging around a binary's main loop

use tracing::{info, warn};

/// A long-running binary
pub trait BinaryRunner {
    /// Name used in the start and stop lines
    fn name(&self) -> &str;

    /// The main loop
    async fn run(&mut self) -> anyhow::Result<()>;

    /// One line summary logged on stop
    fn stats(&self) -> Option<String> {
        None
    }

    /// Run the main loop between a start and a stop line
    ///
    /// The stop line is logged whether or not `run` succeeded.
    async fn execute(&mut self) -> anyhow::Result<()> {
        info!("Starting {} (Ctrl+C to stop)", self.name());
        let result = self.run().await;

        match &result {
            Ok(()) => info!("{} stopped", self.name()),
            Err(_) => warn!("{} stopped on error", self.name()),
        }
        if let Some(stats) = self.stats() {
            info!("{}", stats);
        }
        result
    }
}
