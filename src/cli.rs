//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - global options and the chosen [`Command`]
//! - [`Command`] - `list`, `messages` and `conversation` subcommands

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::batch::FailurePolicy;
use crate::config::{
    DEFAULT_BASE_URL, DEFAULT_INDEX_PATH, DEFAULT_OUTPUT_DIR, DEFAULT_PER_PAGE, ExportConfig,
};
use crate::listing::PageBound;

/// Export Intercom conversations into CSV and text files.
#[derive(Parser, Debug, Clone)]
#[command(name = "convoport")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    convoport list
    convoport list --start-page 5 --all
    convoport messages --skip-failed
    convoport conversation 147 --output-dir out")]
pub struct Args {
    /// File holding the API key (overridden by CONVOPORT_API_KEY)
    #[arg(long, global = true, default_value = "api_key", value_name = "PATH")]
    pub api_key_file: PathBuf,

    /// API root URL
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL, value_name = "URL")]
    pub base_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, default_value_t = 30, value_name = "SECS")]
    pub timeout: u64,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Page through all conversations and append them to the index CSV
    List(ListArgs),

    /// Export every conversation listed in the index CSV
    Messages(MessagesArgs),

    /// Export a single conversation by id
    Conversation(ConversationArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ListArgs {
    /// First page to fetch
    #[arg(long, default_value_t = 1, value_name = "N")]
    pub start_page: u32,

    /// Last page to fetch
    #[arg(long, default_value_t = 4, value_name = "N", conflicts_with = "all")]
    pub end_page: u32,

    /// Fetch until the last page reported by the API
    #[arg(long)]
    pub all: bool,

    /// Conversations per page
    #[arg(long, default_value_t = DEFAULT_PER_PAGE, value_name = "N")]
    pub per_page: u32,

    /// Index CSV to append to
    #[arg(long, default_value = DEFAULT_INDEX_PATH, value_name = "PATH")]
    pub index: PathBuf,
}

impl ListArgs {
    pub fn bound(&self) -> PageBound {
        if self.all {
            PageBound::Exhaustion
        } else {
            PageBound::Through(self.end_page)
        }
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct MessagesArgs {
    /// Index CSV produced by `list`
    #[arg(long, default_value = DEFAULT_INDEX_PATH, value_name = "PATH")]
    pub index: PathBuf,

    /// Root directory for per-conversation output
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Log and skip conversations that fail to fetch instead of stopping
    #[arg(long)]
    pub skip_failed: bool,
}

impl MessagesArgs {
    pub fn policy(&self) -> FailurePolicy {
        if self.skip_failed {
            FailurePolicy::Skip
        } else {
            FailurePolicy::Abort
        }
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ConversationArgs {
    /// Conversation id
    pub id: String,

    /// Root directory for per-conversation output
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR, value_name = "DIR")]
    pub output_dir: PathBuf,
}

impl Args {
    /// Library configuration for the selected command.
    pub fn config(&self) -> ExportConfig {
        let config = ExportConfig::new()
            .with_base_url(&self.base_url)
            .with_timeout_secs(self.timeout);

        match &self.command {
            Command::List(list) => config
                .with_per_page(list.per_page)
                .with_index_path(&list.index),
            Command::Messages(messages) => config
                .with_index_path(&messages.index)
                .with_output_dir(&messages.output_dir),
            Command::Conversation(conversation) => {
                config.with_output_dir(&conversation.output_dir)
            }
        }
    }
}
