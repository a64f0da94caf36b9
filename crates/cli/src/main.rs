use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "promptdeck")]
#[command(about = "Search and inspect a prompt library", long_about = None)]
struct Cli {
    /// Library file: `{"prompts": [...], "folders": [...]}` or a bare array of prompts
    #[arg(short, long, global = true, env = "PROMPTDECK_FILE")]
    file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Page through prompts, newest first
    List {
        #[arg(short, long)]
        limit: Option<usize>,
        #[arg(short, long, default_value = "0")]
        offset: usize,
        /// Folder id (`All` for every folder)
        #[arg(long)]
        folder: Option<String>,
        /// Require this tag; repeat to require several
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// Case-insensitive search over titles, bodies, notes and tags
    Search {
        query: String,
        #[arg(short, long)]
        tag: Option<String>,
        #[arg(long)]
        folder: Option<String>,
    },
    /// Distinct tags in first-seen order
    Tags {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Prompt count per folder
    Counts,
    /// Folders in display order
    Folders,
    /// Badge color of a tag
    Color { tag: String },
}

pub(crate) fn get_library_path(file: Option<PathBuf>) -> PathBuf {
    file.unwrap_or_else(|| {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("promptdeck")
            .join("prompts.json")
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .init();

    let cli = Cli::parse();
    let path = get_library_path(cli.file);

    match cli.command {
        Commands::List { limit, offset, folder, tags } => {
            commands::search::run_list(&path, limit, offset, folder, tags).await?;
        },
        Commands::Search { query, tag, folder } => {
            commands::search::run_search(&path, query, tag, folder).await?;
        },
        Commands::Tags { limit } => commands::search::run_tags(&path, limit).await?,
        Commands::Counts => commands::search::run_counts(&path).await?,
        Commands::Folders => commands::folders::run_folders(&path).await?,
        Commands::Color { tag } => commands::color::run_color(&tag)?,
    }

    Ok(())
}
