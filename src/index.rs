//! The conversation index CSV.
//!
//! # Format
//! - Columns: `id`, `time`, `subject`, `url`, `type`
//! - No header row
//! - Delimiter: `,`
//! - Encoding: UTF-8
//! - Append-only: each page is appended, earlier rows are never rewritten

use std::fs::{File, OpenOptions};
use std::path::Path;

use crate::error::Result;
use crate::models::ConversationSummary;

/// Appends summaries to the index CSV, creating it if absent.
///
/// The file is opened, written, flushed and closed within the call.
pub fn append_summaries(path: impl AsRef<Path>, records: &[ConversationSummary]) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Lazily reads conversation ids (column 0) from the index CSV.
///
/// Rows are read one at a time, so the index can be arbitrarily large.
pub fn read_conversation_ids(path: impl AsRef<Path>) -> Result<ConversationIds> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    Ok(ConversationIds {
        records: reader.into_records(),
    })
}

/// Iterator over the ids in an index CSV.
pub struct ConversationIds {
    records: csv::StringRecordsIntoIter<File>,
}

impl Iterator for ConversationIds {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(
            record
                .map(|r| r.get(0).unwrap_or_default().to_string())
                .map_err(Into::into),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn summary(id: &str) -> ConversationSummary {
        ConversationSummary {
            id: id.to_string(),
            time: 1_400_000_000,
            subject: "Hello, world".to_string(),
            url: "no_url".to_string(),
            author_type: "user".to_string(),
        }
    }

    #[test]
    fn test_append_creates_and_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.csv");

        append_summaries(&path, &[summary("1")]).unwrap();
        append_summaries(&path, &[summary("2"), summary("3")]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert_eq!(
            content.lines().next().unwrap(),
            "1,1400000000,\"Hello, world\",no_url,user"
        );
    }

    #[test]
    fn test_read_ids_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.csv");
        append_summaries(&path, &[summary("a"), summary("b")]).unwrap();

        let ids: Vec<String> = read_conversation_ids(&path)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_read_missing_index() {
        let result = read_conversation_ids("/nonexistent/index.csv");
        assert!(result.is_err());
    }

    #[test]
    fn test_read_short_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.csv");
        std::fs::write(&path, "42\n43,1\n").unwrap();

        let ids: Vec<String> = read_conversation_ids(&path)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(ids, vec!["42", "43"]);
    }
}
