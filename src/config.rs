//! Configuration for the export pipelines.
//!
//! [`ExportConfig`] is a plain struct with builder methods, free of any CLI
//! framework dependency, so library users can build one directly.
//!
//! # Example
//!
//! ```rust
//! use convoport::config::ExportConfig;
//!
//! let config = ExportConfig::new()
//!     .with_output_dir("out/messages")
//!     .with_timeout_secs(10);
//!
//! assert_eq!(config.per_page, 60);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.intercom.io";

/// Conversations requested per listing page.
pub const DEFAULT_PER_PAGE: u32 = 60;

/// Default index CSV written by the listing phase.
pub const DEFAULT_INDEX_PATH: &str = "intercom_conversation_list.csv";

/// Default root for per-conversation directories.
pub const DEFAULT_OUTPUT_DIR: &str = "messages";

/// Settings shared by the listing and message phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// API root, without trailing slash (default: Intercom)
    pub base_url: String,

    /// Page size requested from the listing endpoint (default: 60)
    pub per_page: u32,

    /// Index CSV path (default: `intercom_conversation_list.csv`)
    pub index_path: PathBuf,

    /// Root directory for per-conversation output (default: `messages`)
    pub output_dir: PathBuf,

    /// Whole-request timeout for the HTTP transport in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            index_path: PathBuf::from(DEFAULT_INDEX_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timeout_secs: 30,
        }
    }
}

impl ExportConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    #[must_use]
    pub fn with_index_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.index_path = path.into();
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the HTTP request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}
