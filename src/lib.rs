//! # Convoport
//!
//! Export customer-support conversations from the Intercom REST API into flat
//! files for analysis and machine learning.
//!
//! ## Overview
//!
//! The export runs in two independent phases joined by an index CSV:
//!
//! 1. **Listing**: page through every conversation and append one summary
//!    row per conversation (`id, time, subject, url, type`) to the index.
//! 2. **Messages**: for each index row, fetch the full conversation, strip
//!    markup from every message body and write each body to its own text
//!    file, plus CSV manifests linking message ids to those files.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # #[cfg(feature = "http")]
//! # fn main() -> convoport::Result<()> {
//! use convoport::prelude::*;
//!
//! let config = ExportConfig::new();
//! let credential = Credential::from_file("api_key")?;
//! let api = HttpApi::new(&config)?;
//!
//! // Phase 1: build the index
//! let paginator = ListingPaginator::new(&api, credential.clone());
//! ListingExporter::new(paginator, &config.index_path).export_all(1, PageBound::Exhaustion)?;
//!
//! // Phase 2: export every listed conversation
//! let driver = BatchDriver::new(
//!     ConversationFetcher::new(&api, credential),
//!     MessageExporter::new(&config.output_dir),
//! );
//! let stats = driver.run(&config.index_path)?;
//! println!("{} conversations exported", stats.conversations_exported);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "http"))]
//! # fn main() {}
//! ```
//!
//! ## Module Structure
//!
//! - [`api`]: transport trait, wire types, response validation
//! - [`listing`]: [`ListingPaginator`](listing::ListingPaginator), [`ListingExporter`](listing::ListingExporter)
//! - [`index`]: index CSV append and lazy read
//! - [`conversation`]: [`ConversationFetcher`](conversation::ConversationFetcher), [`flatten`](conversation::flatten)
//! - [`export`]: [`MessageExporter`](export::MessageExporter)
//! - [`batch`]: [`BatchDriver`](batch::BatchDriver)
//! - [`normalize`]: markup stripping and whitespace collapse
//! - [`models`]: typed records
//! - [`config`], [`credential`], [`error`]

pub mod api;
pub mod batch;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod conversation;
pub mod credential;
pub mod error;
pub mod export;
pub mod index;
pub mod listing;
pub mod models;
pub mod normalize;

// Re-export the main types at the crate root for convenience
pub use credential::Credential;
pub use error::{ConvoportError, Result};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use convoport::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Credential;
    pub use crate::error::{ConvoportError, Result};

    pub use crate::api::ConversationApi;
    #[cfg(feature = "http")]
    pub use crate::api::HttpApi;

    pub use crate::batch::{BatchDriver, BatchStats, FailurePolicy};
    pub use crate::config::ExportConfig;
    pub use crate::conversation::{ConversationFetcher, flatten};
    pub use crate::export::MessageExporter;
    pub use crate::listing::{ListingExporter, ListingPaginator, ListingStats, PageBound};
    pub use crate::models::{
        ConversationDetail, ConversationSummary, Message, MessageManifestRow, NormalizedMessage,
        PageResult, Participant,
    };
    pub use crate::normalize::{normalize, normalize_or};
}
