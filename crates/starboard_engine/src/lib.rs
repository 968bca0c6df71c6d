//! Reaction-to-post reconciliation for starboards.
//!
//! Raw reaction notifications flow through the [`normalize`] step into the
//! [`ReconciliationEngine`], which evaluates every matching starboard of the
//! guild and creates, edits, or deletes star posts so that each
//! (starboard, message) pair has at most one post showing the current count.
//!
//! All storage access, including the administrative edits made through
//! [`Settings`], goes through the same [`Gateway`](starboard_database::Gateway),
//! so reconciliations and configuration changes never interleave.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod engine;
mod normalizer;
mod report;
mod retry;
mod settings;

pub use engine::ReconciliationEngine;
pub use normalizer::normalize;
pub use report::{ReconcileReport, SyncAction};
pub use retry::{RetryPolicy, RetryingPlatform};
pub use settings::{Settings, StarboardUpdate, StarboardUpdateBuilder};
