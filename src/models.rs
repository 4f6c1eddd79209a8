//! Typed records flowing through both export pipelines.
//!
//! - [`ConversationSummary`] - one row of the index CSV
//! - [`PageResult`] - one fetched listing page
//! - [`ConversationDetail`] / [`Message`] / [`Participant`] - a fetched conversation
//! - [`NormalizedMessage`] / [`MessageManifestRow`] - what gets written to disk

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary metadata for one conversation, as stored in the index CSV.
///
/// Column order on disk is `id, time, subject, url, type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: String,
    /// Creation time (unix seconds)
    pub time: i64,
    /// Normalized subject, or `no_subject`
    pub subject: String,
    /// Normalized url, or `no_url`
    pub url: String,
    /// Author type of the first message (e.g. "user", "admin")
    #[serde(rename = "type")]
    pub author_type: String,
}

/// One page of the conversation listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageResult {
    pub records: Vec<ConversationSummary>,
    pub current_page: u32,
    pub total_pages: u32,
    /// Entries per page as reported by the API
    pub per_page: u32,
    /// Set when the requested page lies past the last page. Callers stop here.
    pub exhausted: bool,
}

impl PageResult {
    /// An empty result for a page past the end.
    pub fn exhausted(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            total_pages,
            exhausted: true,
            ..Self::default()
        }
    }
}

/// A conversation member with the platform's type label.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// One message within a conversation, body still raw.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub id: String,
    /// Unix seconds
    pub time: i64,
    pub author_id: String,
    /// Raw body, may contain markup; empty when the API sent none
    pub body: String,
}

/// Full detail of a single conversation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversationDetail {
    pub id: String,
    pub created_at: i64,
    pub user: Participant,
    pub assignee: Participant,
    pub first_message: Message,
    /// Later parts in source order, including empty ones
    pub parts: Vec<Message>,
}

impl ConversationDetail {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }

    /// The `info.csv` row for this conversation.
    pub fn info_row(&self) -> ConversationInfoRow {
        ConversationInfoRow {
            id: self.id.clone(),
            time: self.created_at,
            first_message_id: self.first_message.id.clone(),
        }
    }
}

/// Row of `info.csv`: `id, time, first-message-id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationInfoRow {
    pub id: String,
    pub time: i64,
    pub first_message_id: String,
}

/// A message with its body normalized and its dense position assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedMessage {
    /// Position in the filtered sequence; the first message is 0
    pub position: usize,
    pub id: String,
    pub time: i64,
    pub author_id: String,
    pub body: String,
}

impl NormalizedMessage {
    /// File holding this message's body, e.g. `msg_0003.txt`.
    pub fn filename(&self) -> String {
        message_filename(self.position)
    }

    pub fn manifest_row(&self) -> MessageManifestRow {
        MessageManifestRow {
            id: self.id.clone(),
            time: self.time,
            author_id: self.author_id.clone(),
            filename: self.filename(),
        }
    }
}

/// Row of `messages.csv`: `id, time, author_id, filename`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageManifestRow {
    pub id: String,
    pub time: i64,
    pub author_id: String,
    pub filename: String,
}

/// Zero-padded body file name for a message position.
///
/// Positions past 9999 widen rather than wrap.
pub fn message_filename(position: usize) -> String {
    format!("msg_{:04}.txt", position)
}
