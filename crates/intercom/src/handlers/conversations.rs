//! The Conversations resource.
//!
//! See: <https://developers.intercom.com/docs/references/rest-api/api.intercom.io/conversations>

use serde_json::{Value, json};

use crate::{Intercom, PageCursor, RequestOptions, Result};

const CONVERSATIONS: &str = "conversations";
const SEARCH: &str = "conversations/search";
const LAST_REPLY: &str = "conversations/last/reply";

/// Endpoint path of the conversation with the given ID.
///
/// Identifiers are inserted verbatim, without validation or escaping. An
/// empty ID yields an empty path segment.
#[must_use]
pub fn conversation_path(id: &str) -> String {
    format!("{CONVERSATIONS}/{id}")
}

#[must_use]
pub fn conversation_reply_path(id: &str) -> String {
    format!("{CONVERSATIONS}/{id}/reply")
}

#[must_use]
pub fn conversation_tags_path(id: &str) -> String {
    format!("{CONVERSATIONS}/{id}/tags")
}

#[must_use]
pub fn conversation_tags_delete_path(id: &str, tag_id: &str) -> String {
    format!("{CONVERSATIONS}/{id}/tags/{tag_id}")
}

/// Operations on Intercom conversations.
///
/// Every method forwards to the [`Intercom`] client and returns its response
/// and errors untouched.
pub struct ConversationsHandler {
    pub(crate) client: Intercom,
}

impl ConversationsHandler {
    pub async fn create(&self, options: &RequestOptions) -> Result<Value> {
        self.client.post(CONVERSATIONS, options).await
    }

    pub async fn update(&self, id: &str, options: &RequestOptions) -> Result<Value> {
        self.client.put(&conversation_path(id), options).await
    }

    pub async fn add_tag(&self, id: &str, options: &RequestOptions) -> Result<Value> {
        self.client.post(&conversation_tags_path(id), options).await
    }

    pub async fn remove_tag(
        &self,
        id: &str,
        tag_id: &str,
        options: &RequestOptions,
    ) -> Result<Value> {
        self.client
            .delete(&conversation_tags_delete_path(id, tag_id), options)
            .await
    }

    pub async fn list(&self, options: &RequestOptions) -> Result<Value> {
        self.client.get(CONVERSATIONS, options).await
    }

    pub async fn get(&self, id: &str, options: &RequestOptions) -> Result<Value> {
        self.client.get(&conversation_path(id), options).await
    }

    pub async fn search(&self, options: &RequestOptions) -> Result<Value> {
        self.client.post(SEARCH, options).await
    }

    /// Fetch the search results following `cursor`, which is the `pages`
    /// object of the previous search response.
    pub async fn next_search(&self, query: &RequestOptions, cursor: &PageCursor) -> Result<Value> {
        self.client.next_search_page(SEARCH, query, cursor).await
    }

    pub async fn reply(&self, id: &str, options: &RequestOptions) -> Result<Value> {
        self.client.post(&conversation_reply_path(id), options).await
    }

    /// Reply to the last conversation of the contact identified in `options`,
    /// without knowing its ID.
    pub async fn reply_to_last(&self, options: &RequestOptions) -> Result<Value> {
        self.client.post(LAST_REPLY, options).await
    }

    pub async fn mark_as_read(&self, id: &str) -> Result<Value> {
        self.client
            .put(&conversation_path(id), &json!({ "read": true }))
            .await
    }
}

#[cfg(test)]
#[path = "conversations_tests.rs"]
mod tests;
