// Re-export modules
pub mod cogs;
pub mod config;
pub mod embed;
pub mod errors;
pub mod fetch;
pub mod filter;
pub mod pages;
pub mod parsers;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use cogs::{Cog, Context, Google, Reply, Snake};
pub use config::CogConfig;
pub use embed::Embed;
pub use errors::SearchError;
pub use fetch::Fetcher;
pub use results::{ReverseImageMatch, SearchResult, TextResults};
