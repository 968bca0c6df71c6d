//! Core data types for the starboard service.
//!
//! This crate holds the data model shared by every other crate plus the pure
//! policy logic: which starboards a message is eligible for, and how many
//! qualifying stars it currently has. Nothing here performs I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod emoji;
mod event;
mod ids;
mod mapping;
mod message;
mod policy;
mod starboard;
mod summary;

pub use emoji::Emoji;
pub use event::{RawReactionEvent, ReactionDirection, ReactionEvent};
pub use ids::{ChannelId, GuildId, MessageId, RoleId, StarboardId, UserId};
pub use mapping::PostMapping;
pub use message::{MessageContext, StarPost};
pub use policy::{BlockReason, Eligibility, evaluate, tally};
pub use starboard::{ChannelRule, RoleRule, RuleSubject, Starboard, StarboardRules};
pub use summary::RuleSummary;
