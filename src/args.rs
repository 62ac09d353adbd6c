use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "google-cogs")]
#[command(about = "Google search commands with paged results, from the terminal")]
#[command(version)]
pub struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Treat the channel as age-restricted (disables safe search)
    #[arg(long)]
    pub nsfw: bool,

    /// Run owner-only commands
    #[arg(long)]
    pub owner: bool,

    /// Print replies as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Books API key, overrides config and environment
    #[arg(long)]
    pub books_api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Google search your query
    Search { query: Vec<String> },

    /// List Google autofill suggestions for a query
    Autofill { query: Vec<String> },

    /// Search Google Books
    #[command(alias = "books")]
    Book { query: Vec<String> },

    /// Google doodles of a month, the current one by default
    Doodle {
        #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
        year: Option<i32>,
    },

    /// Search Google images
    #[command(alias = "img")]
    Image { query: Vec<String> },

    /// Reverse search an image by URL
    #[command(alias = "rev")]
    Reverse { url: Option<String> },

    /// Fetch a page and save its HTML
    #[command(hide = true)]
    Debug { url: String },

    /// Show a snake board
    Snake,
}

/// Join free-form words back into one query, `None` when nothing was given
pub fn join_query(words: &[String]) -> Option<String> {
    let query = words.join(" ");
    if query.trim().is_empty() {
        None
    } else {
        Some(query)
    }
}
