//! The relay loop: poll the store, summarize, broadcast, mark processed.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::errors::RelayError;
use crate::prompt::{render_fallback, render_notification};
use crate::registry::SubscriberRegistry;
use crate::store::MessageStore;
use crate::worker::deliver::{Deliver, broadcast};

/// Seam between the scheduler and the completion stack. The production
/// implementation acquires a token and calls the completion endpoint; an
/// error means "no summary for this item", never a crashed loop.
#[async_trait]
pub trait Summarize: Send {
    async fn summarize(
        &mut self,
        sender: &str,
        chat_title: &str,
        text: &str,
    ) -> Result<String, RelayError>;
}

/// Single-worker relay scheduler.
///
/// Intervals are injected so tests can drive [`run_cycle`] directly with
/// zero delays instead of simulating wall-clock time.
///
/// [`run_cycle`]: RelayScheduler::run_cycle
pub struct RelayScheduler<S, D> {
    store: MessageStore,
    summarizer: S,
    delivery: D,
    subscribers: Arc<SubscriberRegistry>,
    poll_interval: Duration,
    idle_interval: Duration,
    per_item_delay: Duration,
}

impl<S: Summarize, D: Deliver> RelayScheduler<S, D> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        store: MessageStore,
        summarizer: S,
        delivery: D,
        subscribers: Arc<SubscriberRegistry>,
        poll_interval: Duration,
        idle_interval: Duration,
        per_item_delay: Duration,
    ) -> Self {
        Self {
            store,
            summarizer,
            delivery,
            subscribers,
            poll_interval,
            idle_interval,
            per_item_delay,
        }
    }

    /// Drive the relay until the process exits.
    pub async fn run(mut self) {
        loop {
            // Fast path: with nobody subscribed there is no work worth
            // doing, not even the store read.
            if self.subscribers.is_empty().await {
                sleep(self.idle_interval).await;
                continue;
            }

            match self.run_cycle().await {
                Ok(0) => {}
                Ok(relayed) => info!(relayed, "relay cycle complete"),
                Err(e) => error!(error = %e, "relay cycle failed"),
            }

            sleep(self.poll_interval).await;
        }
    }

    /// One poll cycle; returns the number of messages relayed.
    ///
    /// Items are handled strictly oldest-first. A store error aborts the
    /// cycle (unmarked rows are picked up again by the next poll), while
    /// summarization and delivery failures are contained per item.
    pub async fn run_cycle(&mut self) -> Result<usize, RelayError> {
        if self.subscribers.is_empty().await {
            return Ok(0);
        }

        let pending = self.store.fetch_unprocessed().await?;
        let mut relayed = 0;

        for message in pending {
            if message.text.trim().is_empty() {
                // Nothing to summarize; just retire the row.
                self.store.mark_processed(message.id).await?;
                continue;
            }

            let notification = match self
                .summarizer
                .summarize(&message.sender, &message.chat_title, &message.text)
                .await
            {
                Ok(summary) => {
                    render_notification(&message.chat_title, &message.sender, &summary)
                }
                Err(e) => {
                    warn!(id = message.id, error = %e, "summarization unavailable, relaying raw text");
                    render_fallback(&message.chat_title, &message.sender, &message.text)
                }
            };

            let recipients = self.subscribers.snapshot().await;
            broadcast(&self.delivery, &notification, &recipients).await;

            // Marked after the broadcast attempt: a delivery failure must
            // not re-trigger summarization. A crash between the two
            // replays this one item on restart (accepted at-least-once).
            self.store.mark_processed(message.id).await?;
            relayed += 1;

            // Inter-item pause to respect external rate limits.
            sleep(self.per_item_delay).await;
        }

        Ok(relayed)
    }
}
