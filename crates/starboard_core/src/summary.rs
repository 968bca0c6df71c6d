//! Human-oriented overview of a starboard's allow/deny lists.

use crate::{ChannelId, RoleId, StarboardId, StarboardRules};
use serde::{Deserialize, Serialize};

/// Allow/deny lists of one starboard, split by axis and list kind.
///
/// The `*_default_deny` flags are set when a whitelist exists on that axis,
/// meaning every unlisted subject is denied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSummary {
    /// Starboard summarised
    pub starboard_id: StarboardId,
    /// Whitelisted channels
    pub channel_whitelist: Vec<ChannelId>,
    /// Blacklisted channels
    pub channel_blacklist: Vec<ChannelId>,
    /// Whitelisted roles
    pub role_whitelist: Vec<RoleId>,
    /// Blacklisted roles
    pub role_blacklist: Vec<RoleId>,
    /// Unlisted channels are denied
    pub channels_default_deny: bool,
    /// Unlisted roles are denied
    pub roles_default_deny: bool,
}

impl RuleSummary {
    /// Builds the summary for `starboard_id` from a rule snapshot.
    pub fn from_rules(starboard_id: StarboardId, rules: &StarboardRules) -> Self {
        let mut summary = Self {
            starboard_id,
            channel_whitelist: Vec::new(),
            channel_blacklist: Vec::new(),
            role_whitelist: Vec::new(),
            role_blacklist: Vec::new(),
            channels_default_deny: false,
            roles_default_deny: false,
        };

        for rule in rules.channels.iter().filter(|r| r.starboard_id == starboard_id) {
            if rule.is_whitelist {
                summary.channel_whitelist.push(rule.channel_id);
            } else {
                summary.channel_blacklist.push(rule.channel_id);
            }
        }
        for rule in rules.roles.iter().filter(|r| r.starboard_id == starboard_id) {
            if rule.is_whitelist {
                summary.role_whitelist.push(rule.role_id);
            } else {
                summary.role_blacklist.push(rule.role_id);
            }
        }

        summary.channels_default_deny = !summary.channel_whitelist.is_empty();
        summary.roles_default_deny = !summary.role_whitelist.is_empty();
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChannelRule, RoleRule};

    #[test]
    fn test_whitelist_sets_default_deny() {
        let rules = StarboardRules {
            channels: vec![ChannelRule {
                starboard_id: StarboardId(1),
                channel_id: ChannelId(5),
                is_whitelist: true,
            }],
            roles: vec![RoleRule {
                starboard_id: StarboardId(1),
                role_id: RoleId(6),
                is_whitelist: false,
            }],
        };
        let summary = RuleSummary::from_rules(StarboardId(1), &rules);
        assert_eq!(summary.channel_whitelist, vec![ChannelId(5)]);
        assert_eq!(summary.role_blacklist, vec![RoleId(6)]);
        assert!(summary.channels_default_deny);
        assert!(!summary.roles_default_deny);
    }

    #[test]
    fn test_empty_rules_summarise_to_default_allow() {
        let summary = RuleSummary::from_rules(StarboardId(3), &StarboardRules::default());
        assert_eq!(summary.starboard_id, StarboardId(3));
        assert!(summary.channel_whitelist.is_empty());
        assert!(summary.role_blacklist.is_empty());
        assert!(!summary.channels_default_deny);
        assert!(!summary.roles_default_deny);
    }
}
