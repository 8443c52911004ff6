//! Community handlers: post board and gratitude journal.

mod gratitude;
mod posts;

pub use gratitude::{
    AddGratitudeEntryCommand, AddGratitudeEntryHandler, AddGratitudeEntryResult,
    ListGratitudeEntriesHandler, ListGratitudeEntriesQuery,
};
pub use posts::{
    CreatePostCommand, CreatePostHandler, ListPostsHandler, ReactToPostCommand,
    ReactToPostHandler,
};
