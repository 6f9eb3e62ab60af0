//! Ordered collections of stories.
//!
//! A `StoryList` is the in-memory projection of some server-side list: the
//! global feed, a user's favorites, or the stories a user posted. Network
//! operations and local mutation are kept apart; see [`StoryList::delete_story`].

use std::sync::Arc;

use hns_api::{Client, Error, NewStory, StoryRecord};
use tracing::debug;

use crate::story::{Story, StoryId};
use crate::user::User;

/// Stories in display order, newest first once prepended.
#[derive(Debug, Clone, Default)]
pub struct StoryList {
    stories: Vec<Arc<Story>>,
}

impl StoryList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the global story feed. No credential is required.
    pub async fn get_stories(client: &Client) -> Result<Self, Error> {
        let records = client.get_stories().await?;
        debug!(count = records.len(), "fetched story feed");
        Ok(Self::build_story_list(records))
    }

    /// Wrap server records as stories, keeping their order.
    pub fn build_story_list(records: impl IntoIterator<Item = StoryRecord>) -> Self {
        records
            .into_iter()
            .map(|record| Arc::new(Story::from(record)))
            .collect()
    }

    /// Insert a story at the front of the list.
    pub fn add_story_to_list(&mut self, story: Arc<Story>) {
        self.stories.insert(0, story);
    }

    /// Remove the story with the given id. Does nothing if it is absent.
    ///
    /// When several stories share the id, the LAST one is removed. Lookups
    /// through [`get_story_by_id`](Self::get_story_by_id) return the first,
    /// so the two disagree on duplicates; callers rely on this ordering.
    pub fn remove_story_from_list(&mut self, story_id: &StoryId) {
        if let Some(index) = self
            .stories
            .iter()
            .rposition(|story| story.story_id() == story_id)
        {
            self.stories.remove(index);
        }
    }

    /// First story with the given id.
    pub fn get_story_by_id(&self, story_id: &StoryId) -> Option<Arc<Story>> {
        self.stories
            .iter()
            .find(|story| story.story_id() == story_id)
            .cloned()
    }

    /// Post a new story as `user` and prepend it here and to the user's own stories.
    ///
    /// Both lists receive the same `Arc`. On failure neither list changes.
    pub async fn add_story(
        &mut self,
        client: &Client,
        user: &mut User,
        new_story: NewStory,
    ) -> Result<Arc<Story>, Error> {
        let created = client.create_story(user.login_token(), &new_story).await?;
        let story = Arc::new(Story::from_submission(new_story, created));
        debug!(story_id = %story.story_id(), "story created");

        self.add_story_to_list(Arc::clone(&story));
        user.own_stories.add_story_to_list(Arc::clone(&story));
        Ok(story)
    }

    /// Delete a story on the server.
    ///
    /// This does not touch any in-memory list, this one included. Callers
    /// follow up with [`remove_story_from_list`](Self::remove_story_from_list)
    /// on every list that should stop showing the story.
    pub async fn delete_story(
        &self,
        client: &Client,
        user: &User,
        story_id: &StoryId,
    ) -> Result<(), Error> {
        client
            .delete_story(user.login_token(), story_id.as_str())
            .await
    }

    pub fn stories(&self) -> &[Arc<Story>] {
        &self.stories
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Story>> {
        self.stories.iter()
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn contains(&self, story_id: &StoryId) -> bool {
        self.stories.iter().any(|story| story.story_id() == story_id)
    }
}

impl FromIterator<Arc<Story>> for StoryList {
    fn from_iter<I: IntoIterator<Item = Arc<Story>>>(iter: I) -> Self {
        Self {
            stories: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a StoryList {
    type Item = &'a Arc<Story>;
    type IntoIter = std::slice::Iter<'a, Arc<Story>>;

    fn into_iter(self) -> Self::IntoIter {
        self.stories.iter()
    }
}
