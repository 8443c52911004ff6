//! Community collections: the shared post board and per-user journals.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{CommunityPost, GratitudeEntry};
use crate::domain::foundation::{DomainError, ErrorCode, PostId, Username};

/// All community posts, persisted as a JSON array in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostBoard(Vec<CommunityPost>);

impl PostBoard {
    pub fn push(&mut self, post: CommunityPost) {
        self.0.push(post);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn find_mut(&mut self, id: PostId) -> Result<&mut CommunityPost, DomainError> {
        self.0
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::NotFound, format!("Post '{}' not found", id))
                    .with_detail("post_id", id.to_string())
            })
    }

    /// Posts newest first.
    pub fn newest_first(&self) -> Vec<CommunityPost> {
        let mut posts = self.0.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }
}

/// Gratitude entries per user, persisted as a JSON object keyed by username.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GratitudeJournal(BTreeMap<Username, Vec<GratitudeEntry>>);

impl GratitudeJournal {
    pub fn add(&mut self, username: Username, entry: GratitudeEntry) {
        self.0.entry(username).or_default().push(entry);
    }

    /// Entries for a user in the order they were written.
    pub fn entries_for(&self, username: &Username) -> &[GratitudeEntry] {
        self.0.get(username).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::community::Reaction;
    use crate::domain::foundation::Timestamp;

    #[test]
    fn newest_first_orders_by_creation_time() {
        let mut board = PostBoard::default();
        let t = Timestamp::parse("2024-01-01T00:00:00Z").unwrap();
        board.push(CommunityPost::new("old", t).unwrap());
        board.push(CommunityPost::new("new", t.plus_hours(2)).unwrap());
        let texts: Vec<_> = board.newest_first().into_iter().map(|p| p.text).collect();
        assert_eq!(texts, vec!["new", "old"]);
    }

    #[test]
    fn find_mut_reports_missing_post() {
        let mut board = PostBoard::default();
        let err = board.find_mut(PostId::new()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[test]
    fn reacting_through_the_board() {
        let mut board = PostBoard::default();
        let post = CommunityPost::new("hello", Timestamp::now()).unwrap();
        let id = post.id;
        board.push(post);
        board.find_mut(id).unwrap().react(Reaction::Heart);
        assert_eq!(board.newest_first()[0].count(Reaction::Heart), 1);
    }

    #[test]
    fn journal_is_per_user() {
        let mut journal = GratitudeJournal::default();
        let river = Username::new("river").unwrap();
        let sky = Username::new("sky").unwrap();
        journal.add(river.clone(), GratitudeEntry::new("tea", Timestamp::now()).unwrap());
        assert_eq!(journal.entries_for(&river).len(), 1);
        assert!(journal.entries_for(&sky).is_empty());
    }
}
