//! What a reconciliation did.

use derive_getters::Getters;
use starboard_core::{BlockReason, MessageId, StarboardId};

/// The outcome for one starboard.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SyncAction {
    /// Nothing to do; `count` is the current tally
    #[display("unchanged ({count})")]
    Unchanged {
        /// Current tally
        count: u32,
    },
    /// A star post was published
    #[display("created post {post_id} ({count})")]
    Created {
        /// New star post
        post_id: MessageId,
        /// Count shown on it
        count: u32,
    },
    /// The displayed count was refreshed
    #[display("updated post {post_id} ({from} -> {to})")]
    Updated {
        /// Star post edited
        post_id: MessageId,
        /// Previously stored count
        from: u32,
        /// New count
        to: u32,
    },
    /// The count fell below the threshold and the post was removed
    #[display("deleted post {post_id}")]
    Deleted {
        /// Star post removed
        post_id: MessageId,
    },
    /// The post had vanished from the platform; the mapping was dropped
    #[display("dropped stale mapping to {post_id}")]
    StaleRemoved {
        /// Star post that no longer exists
        post_id: MessageId,
    },
    /// The source message is gone; its mapping was dropped
    #[display("source removed, post {post_id} deleted: {post_deleted}")]
    SourceRemoved {
        /// Star post of the removed message
        post_id: MessageId,
        /// Whether the star post itself was deleted
        post_deleted: bool,
    },
    /// Policy excludes the message from this starboard
    #[display("blocked: {_0}")]
    Blocked(BlockReason),
    /// A permanent platform refusal; nothing was persisted
    #[display("skipped: {_0}")]
    Skipped(String),
    /// A platform failure aborted this starboard's step; nothing was persisted
    #[display("failed: {_0}")]
    Failed(String),
}

/// Per-starboard outcomes of one reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ReconcileReport {
    /// Source message reconciled
    message_id: MessageId,
    /// Outcome per starboard, in evaluation order
    actions: Vec<(StarboardId, SyncAction)>,
}

impl ReconcileReport {
    /// An empty report for `message_id`.
    pub fn new(message_id: MessageId) -> Self {
        Self {
            message_id,
            actions: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, starboard_id: StarboardId, action: SyncAction) {
        self.actions.push((starboard_id, action));
    }

    /// The outcome recorded for `starboard_id`, if it was considered.
    pub fn action_for(&self, starboard_id: StarboardId) -> Option<&SyncAction> {
        self.actions
            .iter()
            .find(|(id, _)| *id == starboard_id)
            .map(|(_, action)| action)
    }

    /// Whether no starboard changed any state.
    pub fn is_noop(&self) -> bool {
        self.actions.iter().all(|(_, action)| {
            matches!(
                action,
                SyncAction::Unchanged { .. }
                    | SyncAction::Blocked(_)
                    | SyncAction::Skipped(_)
                    | SyncAction::Failed(_)
            )
        })
    }
}
