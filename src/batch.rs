//! Message phase: export every conversation listed in the index CSV.
//!
//! Each index row is handled on its own: fetch, flatten, export, then drop
//! the detail before moving on. Nothing is carried from one conversation to
//! the next.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::ConversationApi;
use crate::conversation::{ConversationFetcher, flatten};
use crate::error::Result;
use crate::export::MessageExporter;
use crate::index::read_conversation_ids;

/// What to do when a single conversation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Stop the run at the first failure
    #[default]
    Abort,
    /// Log and skip conversations that failed remotely; credential and
    /// storage failures still abort
    Skip,
}

/// Counters for a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub conversations_exported: usize,
    pub messages_written: usize,
    /// Ids skipped under [`FailurePolicy::Skip`], in index order
    pub skipped: Vec<String>,
}

/// Drives fetch, flatten and export over an index CSV.
pub struct BatchDriver<A> {
    fetcher: ConversationFetcher<A>,
    exporter: MessageExporter,
    policy: FailurePolicy,
}

impl<A: ConversationApi> BatchDriver<A> {
    pub fn new(fetcher: ConversationFetcher<A>, exporter: MessageExporter) -> Self {
        Self {
            fetcher,
            exporter,
            policy: FailurePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Exports a single conversation and returns the number of messages written.
    ///
    /// The id is checked as a directory name before any request is made.
    pub fn export_one(&self, id: &str) -> Result<usize> {
        self.exporter.conversation_dir(id)?;
        let detail = self.fetcher.fetch(id)?;
        let messages = flatten(&detail);
        self.exporter.export(id, &detail, &messages)?;
        Ok(messages.len())
    }

    /// Reads the index row by row and exports each listed conversation.
    pub fn run(&self, index_path: impl AsRef<Path>) -> Result<BatchStats> {
        let mut stats = BatchStats::default();

        for id in read_conversation_ids(index_path)? {
            let id = id?;
            match self.export_one(&id) {
                Ok(count) => {
                    stats.conversations_exported += 1;
                    stats.messages_written += count;
                }
                Err(err)
                    if self.policy == FailurePolicy::Skip
                        && err.is_recoverable_per_conversation() =>
                {
                    warn!(id = %id, error = %err, "skipping conversation");
                    stats.skipped.push(id);
                }
                Err(err) => return Err(err),
            }
        }

        info!(
            exported = stats.conversations_exported,
            messages = stats.messages_written,
            skipped = stats.skipped.len(),
            "batch finished"
        );
        Ok(stats)
    }
}
