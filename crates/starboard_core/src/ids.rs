//! Snowflake identifier newtypes.
//!
//! Discord ids are unsigned 64-bit integers while PostgreSQL only has signed
//! bigints, so every id converts to and from `i64` by reinterpreting the bits.

use serde::{Deserialize, Serialize};

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            derive_more::Display,
            derive_more::From,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// The raw snowflake value.
            pub fn get(self) -> u64 {
                self.0
            }

            /// Bit-preserving conversion into a database bigint.
            pub fn to_db(self) -> i64 {
                self.0 as i64
            }

            /// Inverse of [`Self::to_db`].
            pub fn from_db(value: i64) -> Self {
                Self(value as u64)
            }
        }
    };
}

snowflake!(
    /// A guild (server).
    GuildId
);
snowflake!(
    /// A text channel.
    ChannelId
);
snowflake!(
    /// A message, either a source message or a star post.
    MessageId
);
snowflake!(
    /// A user account.
    UserId
);
snowflake!(
    /// A guild role.
    RoleId
);
snowflake!(
    /// A configured starboard.
    StarboardId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_roundtrip_preserves_high_bit() {
        let id = MessageId(u64::MAX - 7);
        assert!(id.to_db() < 0);
        assert_eq!(MessageId::from_db(id.to_db()), id);
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&GuildId(42)).unwrap();
        assert_eq!(json, "42");
    }
}
