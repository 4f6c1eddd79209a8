//! Per-conversation output writer.
//!
//! # Layout
//!
//! ```text
//! <output_dir>/<conversation id>/
//!     users.csv       user and assignee (id, type), rewritten each run
//!     info.csv        id, created_at, first message id; rewritten each run
//!     messages.csv    id, time, author_id, filename; appended
//!     msg_0000.txt    normalized body of message 0
//!     msg_0001.txt    ...
//! ```
//!
//! `messages.csv` is appended without deduplication: exporting the same
//! conversation twice leaves duplicate manifest rows. Treat a conversation
//! directory as written once, or remove the manifest before re-exporting.

use std::fs::{self, OpenOptions};
use std::path::{Component, Path, PathBuf};

use tracing::info;

use crate::error::{ConvoportError, Result};
use crate::models::{ConversationDetail, NormalizedMessage};

pub const USERS_FILE: &str = "users.csv";
pub const INFO_FILE: &str = "info.csv";
pub const MESSAGES_FILE: &str = "messages.csv";

/// Writes flattened conversations below a root output directory.
#[derive(Debug, Clone)]
pub struct MessageExporter {
    output_dir: PathBuf,
}

impl MessageExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Directory holding one conversation's files.
    ///
    /// Fails with [`ConvoportError::Validation`] unless `id` is a single plain
    /// path component, so a hostile id cannot escape the output root.
    pub fn conversation_dir(&self, id: &str) -> Result<PathBuf> {
        let mut components = Path::new(id).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.output_dir.join(id)),
            _ => Err(ConvoportError::validation("conversation ID")),
        }
    }

    /// Writes users, info, message bodies and manifest rows for one conversation.
    ///
    /// Files land under the directory for `id`, the id the conversation was
    /// requested by, whatever id the fetched detail carries. Returns that
    /// directory.
    pub fn export(
        &self,
        id: &str,
        detail: &ConversationDetail,
        messages: &[NormalizedMessage],
    ) -> Result<PathBuf> {
        let dir = self.conversation_dir(id)?;
        fs::create_dir_all(&dir)?;

        write_users(&dir, detail)?;
        write_info(&dir, detail)?;
        write_messages(&dir, messages)?;

        info!(
            id,
            messages = messages.len(),
            dir = %dir.display(),
            "conversation exported"
        );
        Ok(dir)
    }
}

fn write_users(dir: &Path, detail: &ConversationDetail) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(dir.join(USERS_FILE))?;

    writer.serialize(&detail.user)?;
    writer.serialize(&detail.assignee)?;
    writer.flush()?;
    Ok(())
}

fn write_info(dir: &Path, detail: &ConversationDetail) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(dir.join(INFO_FILE))?;

    writer.serialize(detail.info_row())?;
    writer.flush()?;
    Ok(())
}

/// Writes each body to its own file and appends one manifest row per message.
fn write_messages(dir: &Path, messages: &[NormalizedMessage]) -> Result<()> {
    let manifest = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(MESSAGES_FILE))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(manifest);

    for msg in messages {
        let row = msg.manifest_row();
        fs::write(dir.join(&row.filename), &msg.body)?;
        writer.serialize(&row)?;
    }

    writer.flush()?;
    Ok(())
}
