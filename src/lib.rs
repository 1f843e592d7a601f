//! digestbot - relays chat messages from a shared SQLite store to Telegram
//! subscribers as model-generated digests.
//!
//! An external capture process writes raw messages into the store. This
//! crate owns everything downstream of that table:
//!
//! - a polling relay scheduler that claims unprocessed rows, summarizes
//!   them through an external completion endpoint, and marks them done
//! - a token manager that caches the completion endpoint's short-lived
//!   bearer credential and refreshes it ahead of expiry
//! - a broadcaster that fans each digest out to the current subscriber
//!   set, isolating per-recipient delivery failures
//! - a thin Telegram command surface (`/subscribe`, `/unsubscribe`,
//!   `/stats`) that mutates the in-memory subscriber registry
//!
//! Delivery is at-least-once by design: an item is marked processed only
//! after the broadcast attempt, so a crash in between may replay that one
//! item on restart, but a delivery failure never re-triggers
//! summarization.

pub mod clients;
pub mod commands;
pub mod core;
pub mod errors;
pub mod prompt;
pub mod registry;
pub mod store;
pub mod worker;

/// Configure structured logging with a JSON formatter.
///
/// Call once at process start. The filter honors `RUST_LOG` and defaults
/// to `info`.
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
