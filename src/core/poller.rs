/// Poll/render/degrade loop
///
/// One immediate poll, then one per period for as long as the host lives. Each
/// cycle is independent: it either renders a fresh snapshot or blanks every
/// target, so a dead endpoint never leaves stale numbers on screen.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

use crate::core::page::Page;
use crate::core::source::MetricsSource;
use crate::core::targets::DisplayTargets;

/// How a single poll cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Rendered,
    Degraded,
}

#[derive(Clone)]
pub struct MetricsPoller {
    source: Arc<dyn MetricsSource>,
    targets: DisplayTargets,
}

impl MetricsPoller {
    /// Bind to the page's display targets
    ///
    /// Returns `None` when the page lacks the heap-used text or the heap bar.
    /// In that case nothing is ever fetched.
    pub fn init(page: &Page, source: Arc<dyn MetricsSource>) -> Option<Self> {
        match DisplayTargets::bind(page) {
            Ok(targets) => Some(Self { source, targets }),
            Err(e) => {
                debug!("Metrics widget inactive: {}", e);
                None
            }
        }
    }

    pub fn targets(&self) -> &DisplayTargets {
        &self.targets
    }

    /// Run one fetch/render cycle
    pub async fn poll(&self) -> PollOutcome {
        match self.source.fetch().await {
            Ok(snapshot) => {
                trace!(?snapshot, "Rendering metrics snapshot");
                self.targets.render(&snapshot);
                PollOutcome::Rendered
            }
            Err(e) => {
                debug!("Metrics unavailable: {}", e);
                self.targets.degrade();
                PollOutcome::Degraded
            }
        }
    }

    /// Poll now and then every `period`, forever
    ///
    /// Cycles are spawned rather than awaited, so a slow endpoint never delays
    /// the next tick. Overlapping cycles write in arrival order.
    pub async fn run(self, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let poller = self.clone();
            tokio::spawn(async move {
                poller.poll().await;
            });
        }
    }

    /// Start [`run`](Self::run) on the runtime
    pub fn spawn(self, period: Duration) -> JoinHandle<()> {
        tokio::spawn(self.run(period))
    }
}
