//! Trait seams between the reconciliation engine and its collaborators.
//!
//! - [`StarboardStore`]: synchronous storage session, only ever used while the
//!   storage gate is held
//! - [`ReactionSource`] and [`PostPublisher`]: the chat platform

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod platform;
mod store;

pub use platform::{Platform, PostPublisher, ReactionSource};
pub use store::{NewStarboard, StarboardStore};
