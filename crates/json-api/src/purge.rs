//! Abandoned cart sweeping.

use std::{sync::Arc, time::Duration};

use jiff::Timestamp;
use tokio::{
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{info, warn};

use storefront_app::domain::carts::{CartsService, CartsServiceError};

/// Periodically deletes carts past the retention window.
pub(crate) struct CartReaper {
    carts: Arc<dyn CartsService>,
    interval: Duration,
}

impl CartReaper {
    pub(crate) fn new(carts: Arc<dyn CartsService>, interval: Duration) -> Self {
        Self { carts, interval }
    }

    /// Spawn the sweep loop. The first sweep runs immediately.
    pub(crate) fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = time::interval(self.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;

                match self.run_once().await {
                    Ok(0) => {}
                    Ok(purged) => info!(purged, "purged abandoned carts"),
                    Err(error) => warn!("failed to purge abandoned carts: {error}"),
                }
            }
        })
    }

    pub(crate) async fn run_once(&self) -> Result<u64, CartsServiceError> {
        self.carts.purge_abandoned_carts(Timestamp::now()).await
    }
}

impl std::fmt::Debug for CartReaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartReaper")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}
