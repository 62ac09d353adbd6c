use chrono::{Datelike, Utc};
use scraper::Html;
use serde_json::Value;
use url::Url;

use crate::cogs::cog::{Cog, Context, Reply};
use crate::cogs::embeds;
use crate::config::CogConfig;
use crate::errors::SearchError;
use crate::fetch::{ContentFilter, Fetcher};
use crate::filter::HostFilter;
use crate::pages::{Menu, PageSource};
use crate::parsers::{self, html, images, reverse};
use crate::results::{Doodle, VolumeList};

pub const VERSION: &str = "0.0.4";
pub const AUTHORS: &[&str] = &["epic guy", "ow0x", "fixator10"];

const DESCRIPTION: &str = "A Simple google search with image support.";

/// Usage text per command
const COMMAND_HELP: &[(&str, &str)] = &[
    ("search", "Google search your query from Discord channel."),
    (
        "autofill",
        "Responds with a list of the Google Autofill results for a particular query.",
    ),
    (
        "book",
        "Search for a book or magazine on Google Books.\n\n\
         This command requires an API key. Set `books_api_key` in the config file \
         or the GOOGLE_BOOKS_API_KEY environment variable.",
    ),
    (
        "doodle",
        "Responds with Google doodles of the current month.\n\n\
         Or doodles of specific month/year if `month` and `year` values are provided.",
    ),
    ("image", "Search google images from discord."),
    (
        "reverse",
        "Reverse search the image at the given URL on Google Lens.",
    ),
    ("debug", "Fetch a page and upload its HTML, for checking selectors."),
];

/// Remote endpoints used by the commands
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub search: String,
    pub suggest: String,
    pub books: String,
    /// Base of `/{year}/{month}` doodle listings
    pub doodles: String,
    pub lens: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            search: "https://www.google.com/search".to_string(),
            suggest: "https://suggestqueries.google.com/complete/search".to_string(),
            books: "https://www.googleapis.com/books/v1/volumes".to_string(),
            doodles: "https://www.google.com/doodles/json".to_string(),
            lens: "http://lens.google.com/uploadbyurl".to_string(),
        }
    }
}

/// Web, image, book and doodle search commands
pub struct Google {
    fetcher: Fetcher,
    config: CogConfig,
    endpoints: Endpoints,
    image_filter: HostFilter,
}

impl Google {
    /// The fetcher is built once at start-up and shared by every command
    pub fn new(fetcher: Fetcher, config: CogConfig) -> Self {
        let image_filter = HostFilter::new(config.image_filter.clone());
        Self {
            fetcher,
            config,
            endpoints: Endpoints::default(),
            image_filter,
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    fn format_help(&self, text: &str) -> String {
        format!(
            "{}\n\nAuthors: {}\nCog Version: {}",
            text,
            AUTHORS.join(", "),
            VERSION
        )
    }

    /// Help for a single command
    pub fn command_help(&self, command: &str) -> String {
        let text = COMMAND_HELP
            .iter()
            .find(|(name, _)| *name == command)
            .map(|(_, help)| *help)
            .unwrap_or(DESCRIPTION);
        self.format_help(text)
    }

    pub async fn search(&self, ctx: &Context, query: Option<&str>) -> Reply {
        let Some(query) = non_empty(query) else {
            return Reply::text("Please enter something to search");
        };
        ::log::info!("search: {}", query);
        self.run_search(ctx, query)
            .await
            .unwrap_or_else(|e| failed("search", e))
    }

    async fn run_search(&self, ctx: &Context, query: &str) -> Result<Reply, SearchError> {
        let filter = ContentFilter::from_nsfw_allowed(ctx.nsfw_allowed);
        let fetched = self
            .fetcher
            .fetch_filtered(&self.endpoints.search, &[("q", query)], filter)
            .await?;
        let cards = self.config.cards;
        let body = fetched.body;
        let results = parsers::offload(move || html::parse_with_cards(&body, cards)).await?;
        if results.results.is_empty() {
            return Ok(Reply::text("No results."));
        }
        Ok(Reply::menu(embeds::search_pages(
            query,
            &results,
            &fetched.final_url,
            filter,
            ctx.embed_color,
        )))
    }

    pub async fn autofill(&self, _ctx: &Context, query: &str) -> Reply {
        ::log::info!("autofill: {}", query);
        let params = [("client", "firefox"), ("hl", "en"), ("q", query)];
        match self
            .fetcher
            .get_json::<Value>(&self.endpoints.suggest, &params)
            .await
        {
            Ok(response) => Reply::Text(
                embeds::suggestions_text(&response)
                    .unwrap_or_else(|| "Could not find any results.".to_string()),
            ),
            Err(e) => failed("autofill", e),
        }
    }

    pub async fn book(&self, ctx: &Context, query: &str) -> Reply {
        let Some(api_key) = self.config.books_api_key.as_deref().filter(|k| !k.is_empty()) else {
            ::log::info!("book: no API key configured");
            return Reply::Help(self.command_help("book"));
        };
        ::log::info!("book: {}", query);
        let params = [
            ("apiKey", api_key),
            ("q", query),
            ("printType", "all"),
            ("maxResults", "20"),
            ("orderBy", "relevance"),
        ];
        match self
            .fetcher
            .get_json::<VolumeList>(&self.endpoints.books, &params)
            .await
        {
            Ok(list) if list.items.is_empty() => Reply::text("No results."),
            Ok(list) => Reply::pages(embeds::book_pages(&list.items, ctx.embed_color)),
            Err(e) => failed("book", e),
        }
    }

    /// Doodles of a month, defaulting to the current UTC month and year
    pub async fn doodle(&self, ctx: &Context, month: Option<u32>, year: Option<i32>) -> Reply {
        let now = Utc::now();
        let month = month.unwrap_or_else(|| now.month());
        let year = year.unwrap_or_else(|| now.year());
        ::log::info!("doodle: {}/{}", year, month);

        let url = format!(
            "{}/{}/{}",
            self.endpoints.doodles.trim_end_matches('/'),
            year,
            month
        );
        match self.fetcher.get_json::<Vec<Doodle>>(&url, &[]).await {
            Ok(doodles) if doodles.is_empty() => Reply::text("Could not find any results."),
            Ok(doodles) => Reply::pages(embeds::doodle_pages(&doodles, ctx.embed_color)),
            Err(e) => failed("doodle", e),
        }
    }

    pub async fn image(&self, ctx: &Context, query: Option<&str>) -> Reply {
        let Some(query) = non_empty(query) else {
            return Reply::text("Please enter some image name to search");
        };
        ::log::info!("image: {}", query);
        self.run_image(ctx, query)
            .await
            .unwrap_or_else(|e| failed("image", e))
    }

    async fn run_image(&self, ctx: &Context, query: &str) -> Result<Reply, SearchError> {
        let filter = ContentFilter::from_nsfw_allowed(ctx.nsfw_allowed);
        let fetched = self
            .fetcher
            .fetch_filtered(&self.endpoints.search, &[("tbm", "isch"), ("q", query)], filter)
            .await?;
        let body = fetched.body;
        let host_filter = self.image_filter.clone();
        let links =
            parsers::offload(move || images::parse_with_filter(&body, &host_filter)).await?;
        if links.is_empty() {
            return Ok(Reply::text("No result"));
        }

        let final_url = fetched.final_url;
        let color = ctx.embed_color;
        let formatter = move |page: usize, page_count: usize, entries: &[String]| {
            let image = entries.first().map(String::as_str).unwrap_or_default();
            embeds::image_page(page, page_count, image, &final_url, filter, color)
        };
        Ok(Reply::Menu(Box::new(Menu::new(
            PageSource::new(links, 1),
            formatter,
        ))))
    }

    pub async fn reverse(&self, ctx: &Context, url: Option<&str>) -> Reply {
        let Some(image_url) = url.and_then(image_query) else {
            return Reply::Help(self.command_help("reverse"));
        };
        ::log::info!("reverse: {}", image_url);
        self.run_reverse(ctx, &image_url)
            .await
            .unwrap_or_else(|e| failed("reverse", e))
    }

    async fn run_reverse(&self, ctx: &Context, image_url: &str) -> Result<Reply, SearchError> {
        let fetched = self
            .fetcher
            .fetch(&self.endpoints.lens, &[("url", image_url)])
            .await?;
        let body = fetched.body;
        let matches = parsers::offload(move || reverse::parse(&body)).await?;
        if matches.is_empty() {
            return Ok(Reply::Embed(embeds::reverse_not_found(
                &fetched.final_url,
                image_url,
                ctx.embed_color,
            )));
        }
        Ok(Reply::menu(embeds::reverse_pages(&matches, ctx.embed_color)))
    }

    /// Owner only. Uploads the page as the parser sees it.
    pub async fn debug(&self, ctx: &Context, url: &str) -> Reply {
        if !ctx.is_owner {
            return Reply::text("This command is only available to the bot owner.");
        }
        ::log::info!("debug: {}", url);
        let fetched = match self.fetcher.fetch(url, &[]).await {
            Ok(fetched) => fetched,
            Err(e) => return failed("debug", e),
        };
        let body = fetched.body;
        match parsers::offload(move || Html::parse_document(&body).html()).await {
            Ok(contents) => Reply::File {
                name: "google_debug.html".to_string(),
                contents,
            },
            Err(e) => failed("debug", e),
        }
    }
}

impl Cog for Google {
    fn name(&self) -> &'static str {
        "Google"
    }

    fn help(&self) -> String {
        self.format_help(DESCRIPTION)
    }

    fn unload(self) {
        let Google { fetcher, .. } = self;
        drop(fetcher);
        ::log::info!("Unloaded cog Google, HTTP client released");
    }
}

fn non_empty(query: Option<&str>) -> Option<&str> {
    query.map(str::trim).filter(|q| !q.is_empty())
}

/// An http(s) image URL, with Discord's `<...>` embed suppression removed
fn image_query(input: &str) -> Option<String> {
    let trimmed = input.trim().trim_start_matches('<').trim_end_matches('>');
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url.to_string()),
        Ok(url) => {
            ::log::debug!("Rejecting {} URL {}", url.scheme(), trimmed);
            None
        }
        Err(e) => {
            ::log::debug!("Rejecting unparsable URL {}: {}", trimmed, e);
            None
        }
    }
}

fn failed(command: &str, err: SearchError) -> Reply {
    ::log::warn!("{} failed: {}", command, err);
    Reply::Text(err.user_message())
}
