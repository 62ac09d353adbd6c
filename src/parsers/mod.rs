pub mod cards;
pub mod html;
pub mod images;
pub mod reverse;
pub mod script;
pub mod text;

#[cfg(test)]
mod tests;

use scraper::Selector;

use crate::errors::SearchError;

/// Compile a selector written in this crate.
/// Only called with literal selectors, which are covered by the parser tests.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {:?}: {}", css, e))
}

/// Run a CPU-bound extraction on the blocking thread pool so it does not
/// stall the tasks serving other commands
pub async fn offload<T, F>(extract: F) -> Result<T, SearchError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(extract).await?)
}
