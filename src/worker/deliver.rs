//! Fan-out delivery with per-recipient failure isolation.

use async_trait::async_trait;
use tracing::{error, info};

use crate::errors::RelayError;

/// One-recipient delivery channel. Implementations may fail per recipient
/// (blocked bot, unreachable chat, transient transport error); the
/// broadcaster treats every such failure as isolated.
#[async_trait]
pub trait Deliver: Send + Sync {
    async fn deliver(&self, recipient: i64, text: &str) -> Result<(), RelayError>;
}

/// Deliver `text` to every recipient independently.
///
/// A failed recipient is logged and skipped; the rest still receive the
/// notification and no error escapes to the caller. Fire-and-forget: no
/// retries, no acknowledgment tracking.
pub async fn broadcast<D: Deliver + ?Sized>(delivery: &D, text: &str, recipients: &[i64]) {
    let mut delivered = 0usize;
    let mut failed = 0usize;

    for &recipient in recipients {
        match delivery.deliver(recipient, text).await {
            Ok(()) => delivered += 1,
            Err(e) => {
                failed += 1;
                error!(recipient, error = %e, "failed to deliver notification");
            }
        }
    }

    if failed > 0 {
        info!(delivered, failed, "broadcast finished with failures");
    }
}
