//! Scripted chat platform for testing.

use async_trait::async_trait;
use starboard_core::{ChannelId, Emoji, GuildId, MessageContext, MessageId, StarPost, UserId};
use starboard_error::{PlatformError, PlatformErrorKind, PlatformResult};
use starboard_interface::{PostPublisher, ReactionSource};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// A publisher call as observed by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    Create { channel_id: ChannelId, count: u32 },
    Edit { post_id: MessageId, count: u32 },
    Delete { post_id: MessageId },
}

#[derive(Default)]
struct State {
    messages: HashMap<MessageId, MessageContext>,
    reactions: HashMap<(MessageId, Emoji), Vec<UserId>>,
    posts: HashMap<MessageId, (ChannelId, StarPost)>,
    next_post_id: u64,
    calls: Vec<PlatformCall>,
    create_failures: VecDeque<PlatformErrorKind>,
    edit_failures: VecDeque<PlatformErrorKind>,
    delete_failures: VecDeque<PlatformErrorKind>,
    reactor_failures: VecDeque<PlatformErrorKind>,
}

/// In-memory platform whose messages, reactions and failures are set by tests.
///
/// Every operation yields to the scheduler once so concurrent tasks get a
/// chance to interleave at each await point. Clones share their state.
#[derive(Clone)]
pub struct MockPlatform {
    state: Arc<Mutex<State>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                next_post_id: 9000,
                ..State::default()
            })),
        }
    }

    pub fn add_message(&self, message: MessageContext) {
        let mut state = self.state.lock().unwrap();
        state.messages.insert(message.message_id, message);
    }

    pub fn remove_message(&self, message_id: MessageId) {
        self.state.lock().unwrap().messages.remove(&message_id);
    }

    pub fn set_reactors(&self, message_id: MessageId, emoji: Emoji, reactors: Vec<UserId>) {
        self.state
            .lock()
            .unwrap()
            .reactions
            .insert((message_id, emoji), reactors);
    }

    /// Delete a star post behind the engine's back.
    pub fn remove_post(&self, post_id: MessageId) {
        self.state.lock().unwrap().posts.remove(&post_id);
    }

    pub fn fail_next_create(&self, kind: PlatformErrorKind) {
        self.state.lock().unwrap().create_failures.push_back(kind);
    }

    pub fn fail_next_edit(&self, kind: PlatformErrorKind) {
        self.state.lock().unwrap().edit_failures.push_back(kind);
    }

    pub fn fail_next_delete(&self, kind: PlatformErrorKind) {
        self.state.lock().unwrap().delete_failures.push_back(kind);
    }

    pub fn fail_next_reactors(&self, kind: PlatformErrorKind) {
        self.state.lock().unwrap().reactor_failures.push_back(kind);
    }

    /// Publisher calls in the order they were made, failed ones included.
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn create_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, PlatformCall::Create { .. }))
            .count()
    }

    /// Star posts currently visible.
    pub fn post_count(&self) -> usize {
        self.state.lock().unwrap().posts.len()
    }

    pub fn post(&self, post_id: MessageId) -> Option<StarPost> {
        self.state
            .lock()
            .unwrap()
            .posts
            .get(&post_id)
            .map(|(_, post)| post.clone())
    }
}

fn fail(queue: &mut VecDeque<PlatformErrorKind>) -> PlatformResult<()> {
    match queue.pop_front() {
        Some(kind) => Err(PlatformError::new(kind)),
        None => Ok(()),
    }
}

fn not_found(what: impl std::fmt::Display) -> PlatformError {
    PlatformError::new(PlatformErrorKind::NotFound(what.to_string()))
}

#[async_trait]
impl ReactionSource for MockPlatform {
    async fn message_context(
        &self,
        _guild_id: GuildId,
        _channel_id: ChannelId,
        message_id: MessageId,
    ) -> PlatformResult<MessageContext> {
        tokio::task::yield_now().await;
        self.state
            .lock()
            .unwrap()
            .messages
            .get(&message_id)
            .cloned()
            .ok_or_else(|| not_found(format!("message {message_id}")))
    }

    async fn reactors(
        &self,
        _channel_id: ChannelId,
        message_id: MessageId,
        emoji: &Emoji,
    ) -> PlatformResult<Vec<UserId>> {
        tokio::task::yield_now().await;
        let mut state = self.state.lock().unwrap();
        fail(&mut state.reactor_failures)?;
        Ok(state
            .reactions
            .get(&(message_id, emoji.clone()))
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl PostPublisher for MockPlatform {
    async fn create_post(
        &self,
        channel_id: ChannelId,
        post: &StarPost,
    ) -> PlatformResult<MessageId> {
        tokio::task::yield_now().await;
        let mut state = self.state.lock().unwrap();
        state.calls.push(PlatformCall::Create {
            channel_id,
            count: post.count,
        });
        fail(&mut state.create_failures)?;

        state.next_post_id += 1;
        let post_id = MessageId(state.next_post_id);
        state.posts.insert(post_id, (channel_id, post.clone()));
        Ok(post_id)
    }

    async fn edit_post(
        &self,
        _channel_id: ChannelId,
        post_id: MessageId,
        post: &StarPost,
    ) -> PlatformResult<()> {
        tokio::task::yield_now().await;
        let mut state = self.state.lock().unwrap();
        state.calls.push(PlatformCall::Edit {
            post_id,
            count: post.count,
        });
        fail(&mut state.edit_failures)?;

        match state.posts.get_mut(&post_id) {
            Some((_, existing)) => {
                existing.count = post.count;
                Ok(())
            }
            None => Err(not_found(format!("post {post_id}"))),
        }
    }

    async fn delete_post(&self, _channel_id: ChannelId, post_id: MessageId) -> PlatformResult<()> {
        tokio::task::yield_now().await;
        let mut state = self.state.lock().unwrap();
        state.calls.push(PlatformCall::Delete { post_id });
        fail(&mut state.delete_failures)?;

        match state.posts.remove(&post_id) {
            Some(_) => Ok(()),
            None => Err(not_found(format!("post {post_id}"))),
        }
    }
}
