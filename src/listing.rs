//! Listing phase: page through all conversations into the index CSV.
//!
//! - [`ListingPaginator`] fetches and validates one page at a time
//! - [`ListingExporter`] drives the paginator and appends each page to the index
//! - [`PageBound`] chooses between an explicit last page and running to exhaustion
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "http")]
//! # fn main() -> convoport::Result<()> {
//! use convoport::api::HttpApi;
//! use convoport::config::ExportConfig;
//! use convoport::listing::{ListingExporter, ListingPaginator, PageBound};
//! use convoport::Credential;
//!
//! let config = ExportConfig::new();
//! let credential = Credential::from_file("api_key")?;
//! let paginator = ListingPaginator::new(HttpApi::new(&config)?, credential);
//!
//! let mut exporter = ListingExporter::new(paginator, &config.index_path);
//! let stats = exporter.export_all(1, PageBound::Exhaustion)?;
//! println!("{} pages written", stats.pages_written);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "http"))]
//! # fn main() {}
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::{ConversationApi, WireSummary, parse_list_page};
use crate::config::DEFAULT_PER_PAGE;
use crate::credential::Credential;
use crate::error::{ConvoportError, Result};
use crate::index::append_summaries;
use crate::models::{ConversationSummary, PageResult};
use crate::normalize::{NO_SUBJECT, NO_URL, normalize_or};

/// Fetches listing pages and turns them into [`ConversationSummary`] records.
///
/// The total page count reported with the first fetched page is kept for
/// the lifetime of the paginator. Pages past it come back
/// [`exhausted`](PageResult::exhausted) without another request.
pub struct ListingPaginator<A> {
    api: A,
    credential: Credential,
    per_page: u32,
    total_pages: Option<u32>,
}

impl<A: ConversationApi> ListingPaginator<A> {
    pub fn new(api: A, credential: Credential) -> Self {
        Self {
            api,
            credential,
            per_page: DEFAULT_PER_PAGE,
            total_pages: None,
        }
    }

    /// Sets the page size requested from the API.
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Total pages, once the first page has been fetched.
    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Fetches page `page` (1-based).
    ///
    /// # Errors
    ///
    /// - [`ConvoportError::Auth`] if the credential is empty
    /// - [`ConvoportError::Validation`] if `page` is 0
    /// - [`ConvoportError::Protocol`] if the response is not a conversation list
    pub fn fetch_page(&mut self, page: u32) -> Result<PageResult> {
        self.credential.ensure_present()?;
        if page == 0 {
            return Err(ConvoportError::validation("page number"));
        }

        if let Some(total) = self.total_pages {
            if page > total {
                return Ok(PageResult::exhausted(page, total));
            }
        }

        let body = self
            .api
            .list_conversations(&self.credential, page, self.per_page)?;
        let list = parse_list_page(&body, page)?;

        let total_pages = *self.total_pages.get_or_insert(list.pages.total_pages);
        if page > total_pages {
            return Ok(PageResult::exhausted(page, total_pages));
        }

        // The API may report fewer entries than requested, e.g. on the last page.
        let per_page = list.pages.per_page;
        let records: Vec<ConversationSummary> = list
            .conversations
            .into_iter()
            .take(per_page as usize)
            .map(summarize)
            .collect();

        for (i, record) in records.iter().enumerate() {
            debug!(page, entry = i + 1, id = %record.id, "conversation parsed");
        }

        Ok(PageResult {
            records,
            current_page: list.pages.page.unwrap_or(page),
            total_pages,
            per_page,
            exhausted: false,
        })
    }
}

fn summarize(wire: WireSummary) -> ConversationSummary {
    let message = wire.conversation_message;
    ConversationSummary {
        id: wire.id,
        time: wire.created_at,
        subject: normalize_or(message.subject.as_deref(), NO_SUBJECT),
        url: normalize_or(message.url.as_deref(), NO_URL),
        author_type: message.author.kind.unwrap_or_default(),
    }
}

/// Last page the listing exporter may fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageBound {
    /// Stop after this page even if more remain
    Through(u32),
    /// Keep going until the API's reported total is reached
    Exhaustion,
}

impl PageBound {
    fn allows(self, page: u32) -> bool {
        match self {
            PageBound::Through(last) => page <= last,
            PageBound::Exhaustion => true,
        }
    }
}

impl fmt::Display for PageBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageBound::Through(last) => write!(f, "page {}", last),
            PageBound::Exhaustion => write!(f, "last page"),
        }
    }
}

/// Counters for a listing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListingStats {
    pub pages_written: u32,
    pub records_written: usize,
    /// Total reported by the API, if any page was fetched
    pub total_pages: Option<u32>,
}

/// Appends every fetched page to the index CSV.
pub struct ListingExporter<A> {
    paginator: ListingPaginator<A>,
    index_path: PathBuf,
}

impl<A: ConversationApi> ListingExporter<A> {
    pub fn new(paginator: ListingPaginator<A>, index_path: impl AsRef<Path>) -> Self {
        Self {
            paginator,
            index_path: index_path.as_ref().to_path_buf(),
        }
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Exports pages from `start_page` until `bound` or exhaustion, whichever
    /// comes first.
    ///
    /// Rows are appended, never rewritten, so an interrupted run can be
    /// resumed by passing the next `start_page`.
    pub fn export_all(&mut self, start_page: u32, bound: PageBound) -> Result<ListingStats> {
        let mut stats = ListingStats::default();
        let mut page = start_page;

        while bound.allows(page) {
            let result = self.paginator.fetch_page(page)?;
            stats.total_pages = Some(result.total_pages);

            if result.exhausted {
                info!(page, total_pages = result.total_pages, "no more conversations to get");
                break;
            }

            append_summaries(&self.index_path, &result.records)?;
            stats.pages_written += 1;
            stats.records_written += result.records.len();

            info!(
                page,
                total_pages = result.total_pages,
                records = result.records.len(),
                "page exported"
            );
            page += 1;
        }

        Ok(stats)
    }
}
