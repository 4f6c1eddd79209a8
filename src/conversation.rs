//! Fetching a single conversation and flattening its message thread.

use tracing::debug;

use crate::api::{ConversationApi, parse_conversation};
use crate::credential::Credential;
use crate::error::{ConvoportError, Result};
use crate::models::{ConversationDetail, NormalizedMessage};
use crate::normalize::normalize;

/// Fetches full conversation detail by id.
pub struct ConversationFetcher<A> {
    api: A,
    credential: Credential,
}

impl<A: ConversationApi> ConversationFetcher<A> {
    pub fn new(api: A, credential: Credential) -> Self {
        Self { api, credential }
    }

    /// Fetches and validates one conversation.
    ///
    /// # Errors
    ///
    /// - [`ConvoportError::Auth`] if the credential is empty
    /// - [`ConvoportError::Validation`] if `id` is empty
    /// - [`ConvoportError::Protocol`] if the response is not a conversation
    pub fn fetch(&self, id: &str) -> Result<ConversationDetail> {
        self.credential.ensure_present()?;
        if id.is_empty() {
            return Err(ConvoportError::validation("conversation ID"));
        }

        let body = self.api.conversation(&self.credential, id)?;
        let detail = parse_conversation(&body, id)?;
        debug!(
            id,
            created = ?detail.created_at_utc(),
            parts = detail.parts.len(),
            "conversation fetched"
        );
        Ok(detail)
    }
}

/// Flattens a conversation into its ordered, normalized messages.
///
/// The first message is always at position 0, even with an empty body.
/// Later parts keep their source order; parts with an empty raw body (notes,
/// state changes) are dropped and the remaining ones are numbered densely
/// from 1.
pub fn flatten(detail: &ConversationDetail) -> Vec<NormalizedMessage> {
    let first = &detail.first_message;
    let included_parts = detail.parts.iter().filter(|part| !part.body.is_empty());

    std::iter::once(first)
        .chain(included_parts)
        .enumerate()
        .map(|(position, msg)| NormalizedMessage {
            position,
            id: msg.id.clone(),
            time: msg.time,
            author_id: msg.author_id.clone(),
            body: normalize(&msg.body),
        })
        .collect()
}
