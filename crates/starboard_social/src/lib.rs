//! Discord integration for the starboard service.
//!
//! - [`SerenityPlatform`]: reads reactions and publishes star posts over the Discord REST API
//! - [`StarboardHandler`]: gateway event handler feeding the reconciliation engine
//! - [`StarboardBot`]: Serenity client lifecycle

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod convert;
mod handler;
mod platform;
mod render;

pub use client::StarboardBot;
pub use convert::{emoji_from_reaction, reaction_from_emoji};
pub use handler::StarboardHandler;
pub use platform::SerenityPlatform;
pub use render::PostEmbed;
