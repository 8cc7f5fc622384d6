//! Katha CLI — commits village stories into a GitHub repository.
//!
//! Set GITHUB_OWNER, GITHUB_REPO and GITHUB_TOKEN (and optionally
//! GITHUB_BRANCH, GITHUB_API_URL, MAX_MEDIA_SIZE_MB, REQUEST_TIMEOUT_SECS).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use katha_cli::{init_tracing, load_uploads, parse_tags, resolve_story};
use katha_core::config::AppConfig;
use katha_core::constants::APP_VERSION;
use katha_core::models::{Category, StoryMetadata};
use katha_store::{GitHubStore, StoryArchive, SubmissionPath};
use serde::Serialize;
use validator::Validate;

#[derive(Parser)]
#[command(name = "katha", about = "Village story archive CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a story, optionally with media files
    Submit {
        /// Story title
        #[arg(long)]
        title: String,
        /// State / UT
        #[arg(long)]
        state: String,
        /// Village / town
        #[arg(long)]
        village: String,
        /// Language the story is told in
        #[arg(long)]
        language: String,
        /// Story text, or @path to read it from a file
        #[arg(long)]
        story: String,
        /// Contributor name
        #[arg(long)]
        contributor: Option<String>,
        /// Contact details
        #[arg(long)]
        contact: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        /// Approximate year (free text)
        #[arg(long)]
        approx_year: Option<String>,
        /// Category: folklore, history, personal-memory, craft, food, festival, song-poem, other
        #[arg(long, default_value = "personal-memory")]
        category: Category,
        /// Media file to attach (repeatable)
        #[arg(long = "media")]
        media: Vec<PathBuf>,
        /// Print the story document and target directory without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// List archive entries under data/ (or a subpath)
    Browse {
        /// Subpath below the archive root, e.g. "goa/old-town"
        path: Option<String>,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn build_archive() -> anyhow::Result<(StoryArchive, AppConfig)> {
    let config = AppConfig::from_env()
        .context("Failed to load configuration. Set GITHUB_OWNER, GITHUB_REPO and GITHUB_TOKEN")?;
    let store = GitHubStore::from_config(&config)?;
    let archive = StoryArchive::new(Arc::new(store), config.max_media_bytes);
    Ok((archive, config))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Submit {
            title,
            state,
            village,
            language,
            story,
            contributor,
            contact,
            tags,
            approx_year,
            category,
            media,
            dry_run,
        } => {
            let meta = StoryMetadata {
                title,
                state,
                village,
                language,
                story: resolve_story(&story)?,
                contributor,
                contact,
                tags: parse_tags(tags.as_deref()),
                approx_year,
                category,
                timestamp: Utc::now(),
                app_version: APP_VERSION.to_string(),
            };
            meta.validate().context("Invalid submission")?;

            let uploads = load_uploads(&media)?;

            if dry_run {
                let path = SubmissionPath::for_story(&meta);
                print_json(&serde_json::json!({
                    "dir": path.base_dir(),
                    "files": uploads.iter().map(|u| path.media_file(&u.name)).collect::<Vec<_>>(),
                    "story": meta,
                }))?;
                return Ok(());
            }

            let (archive, _config) = build_archive()?;
            let saved = archive.save(&meta, &uploads).await?;
            print_json(&saved)?;
        }
        Commands::Browse { path } => {
            let (archive, _config) = build_archive()?;
            let entries = archive.browse(path.as_deref()).await?;
            print_json(&entries)?;
        }
    }

    Ok(())
}
