//! # convoport CLI
//!
//! Command-line interface for the convoport library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use convoport::api::{ConversationApi, HttpApi};
use convoport::batch::BatchDriver;
use convoport::cli::{Args, Command, ConversationArgs, ListArgs, MessagesArgs};
use convoport::config::ExportConfig;
use convoport::conversation::ConversationFetcher;
use convoport::export::MessageExporter;
use convoport::listing::{ListingExporter, ListingPaginator};
use convoport::{ConvoportError, Credential};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn run(args: &Args) -> Result<(), ConvoportError> {
    let start = Instant::now();
    let config = args.config();

    println!("📦 convoport v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let api = HttpApi::new(&config)?;
    println!("🌐 API:     {} ({})", config.base_url, api.name());

    let credential = Credential::load(&args.api_key_file)?;
    credential.ensure_present()?;

    match &args.command {
        Command::List(list) => run_list(list, &config, api, credential)?,
        Command::Messages(messages) => run_messages(messages, &config, api, credential)?,
        Command::Conversation(conversation) => {
            run_conversation(conversation, &config, api, credential)?;
        }
    }

    println!();
    println!("⚡ Total time: {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn run_list(
    list: &ListArgs,
    config: &ExportConfig,
    api: HttpApi,
    credential: Credential,
) -> Result<(), ConvoportError> {
    let bound = list.bound();
    println!("📄 Index:   {}", config.index_path.display());
    println!("📚 Pages:   {} through {}", list.start_page, bound);
    println!();
    println!("⏳ Getting list of all conversations...");

    let paginator = ListingPaginator::new(api, credential).with_per_page(config.per_page);
    let mut exporter = ListingExporter::new(paginator, &config.index_path);
    let stats = exporter.export_all(list.start_page, bound)?;

    println!();
    println!("✅ Done! Conversation list stored in {}", exporter.index_path().display());
    println!();
    println!("📊 Summary:");
    println!("   Pages:          {}", stats.pages_written);
    println!("   Conversations:  {}", stats.records_written);
    if let Some(total) = stats.total_pages {
        println!("   Reported total: {} pages", total);
    }
    Ok(())
}

fn run_messages(
    messages: &MessagesArgs,
    config: &ExportConfig,
    api: HttpApi,
    credential: Credential,
) -> Result<(), ConvoportError> {
    println!("📄 Index:   {}", config.index_path.display());
    println!("📂 Output:  {}", config.output_dir.display());
    if messages.skip_failed {
        println!("⏭️  Mode:    skip failed conversations");
    }
    println!();

    let driver = BatchDriver::new(
        ConversationFetcher::new(api, credential),
        MessageExporter::new(&config.output_dir),
    )
    .with_policy(messages.policy());
    let stats = driver.run(&config.index_path)?;

    println!();
    println!("✅ Done! Messages stored under {}", config.output_dir.display());
    println!();
    println!("📊 Summary:");
    println!("   Conversations:  {}", stats.conversations_exported);
    println!("   Messages:       {}", stats.messages_written);
    if !stats.skipped.is_empty() {
        println!("   Skipped:        {} ({})", stats.skipped.len(), stats.skipped.join(", "));
    }
    Ok(())
}

fn run_conversation(
    conversation: &ConversationArgs,
    config: &ExportConfig,
    api: HttpApi,
    credential: Credential,
) -> Result<(), ConvoportError> {
    println!("💬 Conversation: {}", conversation.id);
    println!("📂 Output:  {}", config.output_dir.display());
    println!();

    let driver = BatchDriver::new(
        ConversationFetcher::new(api, credential),
        MessageExporter::new(&config.output_dir),
    );
    let count = driver.export_one(&conversation.id)?;

    println!("✅ Done! {} messages written", count);
    Ok(())
}
