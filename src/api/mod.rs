//! Access to the remote conversations API.
//!
//! The transport sits behind the [`ConversationApi`] trait: it only moves raw
//! response bodies. Turning a body into typed records happens here, at the
//! boundary, via [`parse_list_page`] and [`parse_conversation`]. Both check
//! the payload's declared `type` first and fail with
//! [`ConvoportError::Protocol`] on a mismatch or a missing required field.
//!
//! # Example
//!
//! ```rust
//! use convoport::api::parse_conversation;
//!
//! let body = r#"{"type": "error.list", "errors": []}"#;
//! let err = parse_conversation(body, "42").unwrap_err();
//! assert!(err.is_protocol());
//! ```

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpApi;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::credential::Credential;
use crate::error::{ConvoportError, Result};
use crate::models::{ConversationDetail, Message, Participant};

/// Declared type of a listing response.
pub const CONVERSATION_LIST_TYPE: &str = "conversation.list";

/// Declared type of a single conversation response.
pub const CONVERSATION_TYPE: &str = "conversation";

/// Transport for the two remote endpoints.
///
/// Implementations return the response body verbatim. They block until the
/// body is available; any timeout belongs to the implementation.
pub trait ConversationApi {
    /// Returns the human-readable name of this transport.
    fn name(&self) -> &'static str;

    /// Fetches page `page` of the conversation listing.
    fn list_conversations(&self, credential: &Credential, page: u32, per_page: u32)
    -> Result<String>;

    /// Fetches the full detail of one conversation.
    fn conversation(&self, credential: &Credential, id: &str) -> Result<String>;
}

impl<T: ConversationApi + ?Sized> ConversationApi for &T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn list_conversations(
        &self,
        credential: &Credential,
        page: u32,
        per_page: u32,
    ) -> Result<String> {
        (**self).list_conversations(credential, page, per_page)
    }

    fn conversation(&self, credential: &Credential, id: &str) -> Result<String> {
        (**self).conversation(credential, id)
    }
}

// ============================================================================
// Wire format
// ============================================================================

/// A listing response after its declared type has been checked.
#[derive(Debug, Deserialize)]
pub struct ListPage {
    pub pages: Pagination,
    pub conversations: Vec<WireSummary>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<u32>,
    pub per_page: u32,
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
pub struct WireSummary {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub created_at: i64,
    pub conversation_message: WireMessage,
}

/// The `conversation_message` object: the first message of a conversation.
#[derive(Debug, Deserialize)]
pub struct WireMessage {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "body_string")]
    pub body: String,
    pub author: WireAuthor,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireAuthor {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireConversation {
    #[serde(deserialize_with = "id_string")]
    id: String,
    created_at: i64,
    user: WireAuthor,
    #[serde(default)]
    assignee: WireAuthor,
    conversation_message: WireMessage,
    #[serde(default)]
    conversation_parts: WirePartList,
}

#[derive(Debug, Default, Deserialize)]
struct WirePartList {
    #[serde(default)]
    conversation_parts: Vec<WirePart>,
}

#[derive(Debug, Deserialize)]
struct WirePart {
    #[serde(deserialize_with = "id_string")]
    id: String,
    #[serde(default)]
    created_at: i64,
    #[serde(default, deserialize_with = "body_string")]
    body: String,
    #[serde(default)]
    author: WireAuthor,
}

impl From<WireAuthor> for Participant {
    fn from(author: WireAuthor) -> Self {
        Participant {
            id: author.id,
            kind: author.kind.unwrap_or_default(),
        }
    }
}

/// Accepts a string, a number or null (as the empty string).
fn id_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

/// Coerces a message body to a string; null becomes empty.
fn body_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

// ============================================================================
// Parse / validate
// ============================================================================

/// Parses a body whose declared `type` must equal `expected`.
fn parse_typed<T: DeserializeOwned>(
    body: &str,
    expected: &'static str,
    context: &str,
) -> Result<T> {
    let value: Value = serde_json::from_str(body)?;

    let declared = value.get("type").and_then(Value::as_str);
    if declared != Some(expected) {
        let found = declared.map_or_else(|| "no declared type".to_string(), |t| format!("'{}'", t));
        return Err(ConvoportError::protocol(expected, found, context));
    }

    serde_json::from_value(value).map_err(|e| {
        ConvoportError::protocol(expected, format!("malformed payload: {}", e), context)
    })
}

/// Parses and validates a listing page body.
pub fn parse_list_page(body: &str, page: u32) -> Result<ListPage> {
    parse_typed(
        body,
        CONVERSATION_LIST_TYPE,
        &format!("listing page {}", page),
    )
}

/// Parses and validates a conversation body into a [`ConversationDetail`].
pub fn parse_conversation(body: &str, id: &str) -> Result<ConversationDetail> {
    let wire: WireConversation =
        parse_typed(body, CONVERSATION_TYPE, &format!("fetching conversation {}", id))?;

    let first = wire.conversation_message;
    let first_message = Message {
        id: first.id,
        // The first message carries no timestamp of its own.
        time: wire.created_at,
        author_id: first.author.id,
        body: first.body,
    };

    let parts = wire
        .conversation_parts
        .conversation_parts
        .into_iter()
        .map(|part| Message {
            id: part.id,
            time: part.created_at,
            author_id: part.author.id,
            body: part.body,
        })
        .collect();

    Ok(ConversationDetail {
        id: wire.id,
        created_at: wire.created_at,
        user: wire.user.into(),
        assignee: wire.assignee.into(),
        first_message,
        parts,
    })
}
