//! Bounded retry of transient platform failures.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use starboard_core::{ChannelId, Emoji, GuildId, MessageContext, MessageId, StarPost, UserId};
use starboard_error::PlatformResult;
use starboard_interface::{Platform, PostPublisher, ReactionSource};
use std::future::Future;
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::warn;

/// How often and how patiently transient platform failures are retried.
///
/// # Example
///
/// ```toml
/// [publisher]
/// max_retries = 3
/// base_delay_ms = 500
/// max_delay_ms = 5000
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Attempts after the first one
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
    /// Delay before the first retry
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    /// Upper bound for any single delay
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_max_retries() -> usize {
    3
}

fn default_base_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    5000
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl RetryPolicy {
    /// Delays double on every attempt, starting at `base_delay_ms`.
    fn strategy(self) -> impl Iterator<Item = Duration> {
        ExponentialBackoff::from_millis(2)
            .factor((self.base_delay_ms / 2).max(1))
            .max_delay(Duration::from_millis(self.max_delay_ms))
            .map(jitter)
            .take(self.max_retries)
    }
}

/// Wraps a platform client so transient failures are retried.
///
/// Permanent failures (`NotFound`, `Forbidden`, anything else) are returned
/// immediately. When retries run out the last transient error is returned and
/// the caller leaves its persisted state untouched.
pub struct RetryingPlatform<P> {
    inner: P,
    policy: RetryPolicy,
}

impl<P> RetryingPlatform<P> {
    /// Wrap `inner` with `policy`.
    pub fn new(inner: P, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    async fn with_retry<T, F, Fut>(&self, operation: &'static str, mut attempt: F) -> PlatformResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = PlatformResult<T>>,
    {
        Retry::spawn(self.policy.strategy(), || {
            let pending = attempt();
            async move {
                match pending.await {
                    Ok(value) => Ok(value),
                    Err(e) if e.is_retryable() => {
                        warn!(operation, error = %e, "Transient platform error, will retry");
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) => Err(RetryError::Permanent(e)),
                }
            }
        })
        .await
    }
}

#[async_trait]
impl<P: Platform> ReactionSource for RetryingPlatform<P> {
    async fn message_context(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> PlatformResult<MessageContext> {
        let inner = &self.inner;
        self.with_retry("message_context", move || async move {
            inner.message_context(guild_id, channel_id, message_id).await
        })
        .await
    }

    async fn reactors(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &Emoji,
    ) -> PlatformResult<Vec<UserId>> {
        let inner = &self.inner;
        self.with_retry("reactors", move || async move {
            inner.reactors(channel_id, message_id, emoji).await
        })
        .await
    }
}

#[async_trait]
impl<P: Platform> PostPublisher for RetryingPlatform<P> {
    async fn create_post(
        &self,
        channel_id: ChannelId,
        post: &StarPost,
    ) -> PlatformResult<MessageId> {
        let inner = &self.inner;
        self.with_retry("create_post", move || async move {
            inner.create_post(channel_id, post).await
        })
        .await
    }

    async fn edit_post(
        &self,
        channel_id: ChannelId,
        post_id: MessageId,
        post: &StarPost,
    ) -> PlatformResult<()> {
        let inner = &self.inner;
        self.with_retry("edit_post", move || async move {
            inner.edit_post(channel_id, post_id, post).await
        })
        .await
    }

    async fn delete_post(&self, channel_id: ChannelId, post_id: MessageId) -> PlatformResult<()> {
        let inner = &self.inner;
        self.with_retry("delete_post", move || async move {
            inner.delete_post(channel_id, post_id).await
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_defaults_from_empty_toml() {
        let policy: RetryPolicy = toml::from_str("").unwrap();
        assert_eq!(policy, RetryPolicy::default());
    }

    #[test]
    fn test_strategy_is_bounded() {
        let policy = RetryPolicy {
            max_retries: 4,
            base_delay_ms: 100,
            max_delay_ms: 150,
        };
        assert_eq!(policy.strategy().count(), 4);

        let none = RetryPolicy {
            max_retries: 0,
            ..policy
        };
        assert_eq!(none.strategy().count(), 0);
    }
}
