//! Reaction emoji.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

static CUSTOM_EMOJI: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^<(a?):([A-Za-z0-9_]+):([0-9]+)>$").ok());

/// The emoji a reaction was made with.
///
/// Unicode emoji compare by glyph. Custom guild emoji compare by id only, so a
/// starboard keeps matching after the emoji is renamed.
///
/// # Examples
///
/// ```
/// use starboard_core::Emoji;
///
/// let star: Emoji = "⭐".parse().unwrap();
/// assert_eq!(star, Emoji::Unicode("⭐".to_string()));
///
/// let old: Emoji = "<:goldstar:1234>".parse().unwrap();
/// let renamed: Emoji = "<:bigstar:1234>".parse().unwrap();
/// assert_eq!(old, renamed);
/// assert_eq!(renamed.to_string(), "<:bigstar:1234>");
/// ```
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Emoji {
    /// A unicode glyph.
    Unicode(String),
    /// A guild emoji.
    Custom {
        /// Emoji name at the time it was seen
        name: String,
        /// Emoji snowflake
        id: u64,
        /// Whether the emoji is animated
        animated: bool,
    },
}

impl PartialEq for Emoji {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Emoji::Unicode(a), Emoji::Unicode(b)) => a == b,
            (Emoji::Custom { id: a, .. }, Emoji::Custom { id: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Hash for Emoji {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Emoji::Unicode(glyph) => {
                0u8.hash(state);
                glyph.hash(state);
            }
            Emoji::Custom { id, .. } => {
                1u8.hash(state);
                id.hash(state);
            }
        }
    }
}

impl fmt::Display for Emoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Emoji::Unicode(glyph) => write!(f, "{glyph}"),
            Emoji::Custom { name, id, animated } => {
                let prefix = if *animated { "a" } else { "" };
                write!(f, "<{prefix}:{name}:{id}>")
            }
        }
    }
}

impl FromStr for Emoji {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let custom = CUSTOM_EMOJI.as_ref().and_then(|re| re.captures(trimmed));

        if let Some(caps) = custom {
            let id = caps.get(3).and_then(|m| m.as_str().parse::<u64>().ok());
            if let (Some(id), Some(name)) = (id, caps.get(2)) {
                return Ok(Emoji::Custom {
                    name: name.as_str().to_string(),
                    id,
                    animated: caps.get(1).is_some_and(|m| !m.as_str().is_empty()),
                });
            }
        }

        Ok(Emoji::Unicode(trimmed.to_string()))
    }
}

impl From<Emoji> for String {
    fn from(emoji: Emoji) -> Self {
        emoji.to_string()
    }
}

impl TryFrom<String> for Emoji {
    type Error = std::convert::Infallible;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
