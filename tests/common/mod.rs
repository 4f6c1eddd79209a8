//! Shared fixtures: an in-memory API serving canned JSON bodies.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use convoport::api::ConversationApi;
use convoport::{Credential, Result};

/// In-memory [`ConversationApi`] with a fixed set of pages and conversations.
#[derive(Default)]
pub struct FakeApi {
    pages: Vec<Vec<String>>,
    conversations: HashMap<String, String>,
    pub requests: RefCell<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a listing page containing the given conversation ids.
    pub fn with_page(mut self, ids: &[&str]) -> Self {
        self.pages.push(ids.iter().map(|id| id.to_string()).collect());
        self
    }

    pub fn with_conversation(mut self, id: &str, body: String) -> Self {
        self.conversations.insert(id.to_string(), body);
        self
    }

    fn page_body(&self, page: u32) -> String {
        let total = self.pages.len();
        let ids = self
            .pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_default();

        let conversations: Vec<String> = ids.iter().map(|id| summary_json(id)).collect();
        format!(
            r#"{{"type": "conversation.list", "pages": {{"type": "pages", "page": {page}, "per_page": {}, "total_pages": {total}}}, "conversations": [{}]}}"#,
            ids.len(),
            conversations.join(",")
        )
    }
}

impl ConversationApi for FakeApi {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn list_conversations(&self, _: &Credential, page: u32, _: u32) -> Result<String> {
        self.requests.borrow_mut().push(format!("page {page}"));
        Ok(self.page_body(page))
    }

    fn conversation(&self, _: &Credential, id: &str) -> Result<String> {
        self.requests.borrow_mut().push(format!("conversation {id}"));
        Ok(self
            .conversations
            .get(id)
            .cloned()
            .unwrap_or_else(|| error_json("not_found")))
    }
}

/// `id` as it appears between the quotes of a JSON string.
fn escaped(id: &str) -> String {
    let quoted = serde_json::to_string(id).unwrap();
    quoted[1..quoted.len() - 1].to_string()
}

pub fn summary_json(id: &str) -> String {
    let id = escaped(id);
    format!(
        r#"{{"type": "conversation", "id": "{id}", "created_at": 1400000000,
            "conversation_message": {{"type": "conversation_message", "id": "m-{id}",
                "subject": "<p>Order\n\n{id}</p>", "url": null,
                "author": {{"type": "user", "id": "u-{id}"}}}}}}"#
    )
}

pub fn error_json(code: &str) -> String {
    format!(r#"{{"type": "error.list", "errors": [{{"code": "{code}", "message": "boom"}}]}}"#)
}

/// A conversation whose first message has no body and whose second part is empty.
pub fn conversation_json(id: &str) -> String {
    let id = escaped(id);
    format!(
        r#"{{
            "type": "conversation",
            "id": "{id}",
            "created_at": 1400000000,
            "user": {{"type": "user", "id": "u-{id}"}},
            "assignee": {{"type": "admin", "id": 25}},
            "conversation_message": {{
                "type": "conversation_message",
                "id": "m-{id}",
                "subject": "",
                "body": null,
                "author": {{"type": "user", "id": "u-{id}"}}
            }},
            "conversation_parts": {{
                "type": "conversation_part.list",
                "conversation_parts": [
                    {{"id": "p1", "created_at": 1400000100, "body": "<p>First <a href=\"x>y\">reply</a></p>", "author": {{"type": "admin", "id": 25}}}},
                    {{"id": "p2", "created_at": 1400000200, "body": null, "part_type": "close", "author": {{"type": "admin", "id": 25}}}},
                    {{"id": "p3", "created_at": 1400000300, "body": "Thanks\n\n\nbye   now", "author": {{"type": "user", "id": "u-{id}"}}}}
                ]
            }}
        }}"#
    )
}
