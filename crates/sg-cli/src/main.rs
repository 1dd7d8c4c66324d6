//! SafeGuard CLI
//!
//! Driver binary around the classification engine: refreshes the remote
//! lists on schedule, answers status queries against the cached state,
//! parses local list documents, and manages user settings.

mod refresh;
mod sources;
mod state;
mod watch;

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};

use sg_core::overrides::{OverrideSets, TrustOverride};
use sg_core::store::{should_refresh, ListStore};
use sg_core::types::{Settings, UpdateFrequency};
use sg_core::url;
use sg_lists::{
    extract_bookmark_urls, extract_markdown_urls, extract_starred_urls, parse_filter_list,
};

use refresh::RefreshDriver;
use sources::HttpSource;
use state::StateFile;

#[derive(Parser)]
#[command(name = "sg-cli")]
#[command(about = "SafeGuard site-reputation lists and status checks")]
struct Cli {
    /// Path to the persisted state file
    #[arg(long, global = true, default_value = "safeguard-state.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all remote lists and rebuild the cached state
    Refresh {
        /// Refresh even if the schedule says the lists are fresh
        #[arg(short, long)]
        force: bool,
    },

    /// Resolve the status of a URL against the cached lists
    Check {
        /// URL (or bare domain) to classify
        url: String,
    },

    /// Show cached list counts and the refresh schedule
    Info,

    /// Refresh periodically in the foreground until interrupted
    Watch,

    /// Parse a local list document and print the extracted entries
    Parse {
        /// Input document format
        #[arg(short, long, value_enum)]
        format: ParseFormat,

        /// Input file
        input: String,
    },

    /// Read or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ParseFormat {
    /// Adblock-style site list (`!` comments)
    Filter,
    /// Markdown document; every URL token is extracted
    Markdown,
    /// Markdown document; only star-marked lines are extracted
    Starred,
    /// Bookmark-export HTML
    Bookmarks,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current settings
    Show,
    /// Set the update frequency (daily, weekly, monthly)
    SetFrequency { frequency: String },
    /// Add a domain to the user-trusted overrides
    Trust { domain: String },
    /// Add a domain to the user-untrusted overrides
    Distrust { domain: String },
    /// Drop a domain from both override lists
    Forget { domain: String },
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let state_file = StateFile::new(cli.state);

    let result = match cli.command {
        Commands::Refresh { force } => cmd_refresh(&state_file, force).await,
        Commands::Check { url } => cmd_check(&state_file, &url),
        Commands::Info => cmd_info(&state_file),
        Commands::Watch => cmd_watch(&state_file).await,
        Commands::Parse { format, input } => cmd_parse(format, &input),
        Commands::Config { action } => cmd_config(&state_file, action),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn cmd_refresh(state_file: &StateFile, force: bool) -> Result<(), String> {
    let state = state_file.load();
    let frequency = state.settings.update_frequency;

    if !force && !should_refresh(Utc::now(), state.last_updated, frequency) {
        println!("Lists are fresh for the {frequency} schedule; use --force to refresh anyway");
        return Ok(());
    }

    let source = HttpSource::new().map_err(|e| format!("Failed to build HTTP client: {e}"))?;
    let store = ListStore::new();
    store.subscribe(Box::new(|summary| {
        log::info!("lists-updated broadcast at {}", summary.refreshed_at.to_rfc3339());
        Ok(())
    }));

    let driver = RefreshDriver::new();
    let summary = driver
        .run(&store, state_file, &source)
        .await
        .map_err(|e| format!("Refresh failed: {e}"))?;

    println!("Refreshed lists into '{}'", state_file.path().display());
    println!("  Unsafe:              {}", summary.counts.unsafe_sites);
    println!("  Potentially unsafe:  {}", summary.counts.potentially_unsafe_sites);
    println!("  Fmhy:                {}", summary.counts.fmhy_sites);
    println!("  Safe:                {}", summary.counts.safe_sites);
    println!("  Starred:             {}", summary.counts.starred_sites);
    if summary.sources_failed > 0 {
        println!("  Sources failed:      {} (previous entries kept)", summary.sources_failed);
    }

    Ok(())
}

fn cmd_check(state_file: &StateFile, url: &str) -> Result<(), String> {
    let state = state_file.load();

    // Rebuild matchers from the persisted flat arrays; no network access.
    let store = ListStore::new();
    store.install(&state.lists);

    let verdict = store.resolve(url, None);
    println!("Status:  {}", verdict.status);
    if let Some(matched) = &verdict.matched {
        println!("Matched: {matched}");
    }

    // User overrides color the highlighting layer only; surfaced here as
    // a note so the asymmetry with the resolver stays visible.
    let overrides = OverrideSets::from_settings(&state.settings);
    if let Some(host) = url::normalize(url).and_then(|n| url::host_of(&n)) {
        match overrides.lookup(&host) {
            Some(TrustOverride::Trusted) => {
                println!("Note:    {host} is user-trusted (affects highlighting only)");
            }
            Some(TrustOverride::Untrusted) => {
                println!("Note:    {host} is user-untrusted (affects highlighting only)");
            }
            None => {}
        }
    }

    Ok(())
}

fn cmd_info(state_file: &StateFile) -> Result<(), String> {
    let state = state_file.load();
    let frequency = state.settings.update_frequency;

    println!("State file: {}", state_file.path().display());
    match state.last_updated {
        Some(at) => println!("  Last updated:        {}", at.to_rfc3339()),
        None => println!("  Last updated:        never"),
    }
    println!("  Update frequency:    {frequency}");
    let due = should_refresh(Utc::now(), state.last_updated, frequency);
    println!("  Refresh due:         {}", if due { "yes" } else { "no" });
    println!();
    println!("Lists:");
    println!("  Unsafe:              {}", state.counts.unsafe_sites);
    println!("  Potentially unsafe:  {}", state.counts.potentially_unsafe_sites);
    println!("  Fmhy:                {}", state.counts.fmhy_sites);
    println!("  Safe:                {}", state.counts.safe_sites);
    println!("  Starred:             {}", state.counts.starred_sites);
    println!();
    println!("Overrides:");
    println!("  Trusted domains:     {}", state.settings.user_trusted_domains.len());
    println!("  Untrusted domains:   {}", state.settings.user_untrusted_domains.len());

    Ok(())
}

async fn cmd_watch(state_file: &StateFile) -> Result<(), String> {
    let source = HttpSource::new().map_err(|e| format!("Failed to build HTTP client: {e}"))?;

    let store = ListStore::new();
    // Serve from the persisted cache until the first due refresh.
    store.install(&state_file.load().lists);
    store.subscribe(Box::new(|summary| {
        log::info!("lists-updated broadcast at {}", summary.refreshed_at.to_rfc3339());
        Ok(())
    }));

    let driver = RefreshDriver::new();
    watch::run_watch(&store, state_file, &driver, &source).await
}

fn cmd_parse(format: ParseFormat, input: &str) -> Result<(), String> {
    let content = fs::read_to_string(input).map_err(|e| format!("Failed to read '{input}': {e}"))?;

    let entries = match format {
        ParseFormat::Filter => parse_filter_list(&content),
        ParseFormat::Markdown => extract_markdown_urls(&content),
        ParseFormat::Starred => extract_starred_urls(&content),
        ParseFormat::Bookmarks => extract_bookmark_urls(&content),
    };

    for entry in &entries {
        println!("{entry}");
    }
    log::info!("parsed {} entries from '{input}'", entries.len());

    Ok(())
}

fn cmd_config(state_file: &StateFile, action: ConfigAction) -> Result<(), String> {
    let mut state = state_file.load();

    match action {
        ConfigAction::Show => {
            let json = serde_json::to_string_pretty(&state.settings)
                .map_err(|e| format!("Failed to render settings: {e}"))?;
            println!("{json}");
            return Ok(());
        }
        ConfigAction::SetFrequency { frequency } => {
            state.settings.update_frequency = frequency.parse::<UpdateFrequency>()?;
            println!("Update frequency set to {}", state.settings.update_frequency);
        }
        ConfigAction::Trust { domain } => {
            let mut overrides = OverrideSets::from_settings(&state.settings);
            overrides.trust(&domain);
            write_overrides(&mut state.settings, &overrides);
            println!("Trusting {domain}");
        }
        ConfigAction::Distrust { domain } => {
            let mut overrides = OverrideSets::from_settings(&state.settings);
            overrides.distrust(&domain);
            write_overrides(&mut state.settings, &overrides);
            println!("Distrusting {domain}");
        }
        ConfigAction::Forget { domain } => {
            let mut overrides = OverrideSets::from_settings(&state.settings);
            overrides.forget(&domain);
            write_overrides(&mut state.settings, &overrides);
            println!("Forgetting {domain}");
        }
    }

    state_file
        .save(&state)
        .map_err(|e| format!("Failed to save settings: {e}"))
}

/// Write the override sets back into the persisted settings vectors,
/// sorted for a stable file.
fn write_overrides(settings: &mut Settings, overrides: &OverrideSets) {
    let mut trusted: Vec<String> = overrides.trusted_domains().map(str::to_string).collect();
    trusted.sort();
    let mut untrusted: Vec<String> = overrides.untrusted_domains().map(str::to_string).collect();
    untrusted.sort();
    settings.user_trusted_domains = trusted;
    settings.user_untrusted_domains = untrusted;
}
