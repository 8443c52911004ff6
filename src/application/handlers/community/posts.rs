//! Community board handlers: anonymous posts and reactions.

use std::sync::Arc;

use crate::domain::community::{CommunityPost, PostBoard, Reaction};
use crate::domain::foundation::{DomainError, PostId, Timestamp};
use crate::ports::{CollectionStore, CollectionStoreExt};

/// Command to publish an anonymous post.
#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub text: String,
}

pub struct CreatePostHandler {
    posts: Arc<dyn CollectionStore<PostBoard>>,
}

impl CreatePostHandler {
    pub fn new(posts: Arc<dyn CollectionStore<PostBoard>>) -> Self {
        Self { posts }
    }

    pub async fn handle(
        &self,
        cmd: CreatePostCommand,
        now: Timestamp,
    ) -> Result<CommunityPost, DomainError> {
        let post = CommunityPost::new(&cmd.text, now)?;
        let stored = post.clone();
        self.posts
            .with_collection(move |board: &mut PostBoard| {
                board.push(stored);
                Ok(())
            })
            .await?;

        tracing::debug!(post_id = %post.id, "Community post created");
        Ok(post)
    }
}

/// Command to add a reaction to a post.
#[derive(Debug, Clone)]
pub struct ReactToPostCommand {
    pub post_id: PostId,
    pub reaction: Reaction,
}

pub struct ReactToPostHandler {
    posts: Arc<dyn CollectionStore<PostBoard>>,
}

impl ReactToPostHandler {
    pub fn new(posts: Arc<dyn CollectionStore<PostBoard>>) -> Self {
        Self { posts }
    }

    /// Returns the new count for the reaction.
    ///
    /// # Errors
    /// `NotFound` for an unknown post id.
    pub async fn handle(&self, cmd: ReactToPostCommand) -> Result<u32, DomainError> {
        self.posts
            .with_collection(move |board: &mut PostBoard| {
                Ok(board.find_mut(cmd.post_id)?.react(cmd.reaction))
            })
            .await
    }
}

/// Lists posts newest first.
pub struct ListPostsHandler {
    posts: Arc<dyn CollectionStore<PostBoard>>,
}

impl ListPostsHandler {
    pub fn new(posts: Arc<dyn CollectionStore<PostBoard>>) -> Self {
        Self { posts }
    }

    pub async fn handle(&self) -> Result<Vec<CommunityPost>, DomainError> {
        let loaded = self.posts.load().await?;
        if let Some(warning) = loaded.warning() {
            tracing::warn!(error = %warning, "Community posts recovered from corruption");
        }
        Ok(loaded.value.newest_first())
    }
}
