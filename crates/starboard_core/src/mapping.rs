//! Persisted link between a source message and its star post.

use crate::{ChannelId, MessageId, StarboardId};
use serde::{Deserialize, Serialize};

/// The star post that mirrors one source message on one starboard.
///
/// At most one mapping exists per `(starboard_id, message_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostMapping {
    /// Starboard the post lives on
    pub starboard_id: StarboardId,
    /// The starred source message
    pub message_id: MessageId,
    /// Channel of the source message
    pub source_channel_id: ChannelId,
    /// The star post in the starboard's channel
    pub post_id: MessageId,
    /// Star count last written to the post
    pub star_count: u32,
}
