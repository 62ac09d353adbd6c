use std::time::Duration;

use clap::Parser;
use google_cogs::{Cog, CogConfig, Context, Fetcher, Google, Reply, Snake};

mod args;
mod menu;
use args::{Args, Command, join_query};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CogConfig::from_file(path)?,
        None => CogConfig::default(),
    }
    .with_env_overrides();
    if let Some(key) = &args.books_api_key {
        config.books_api_key = Some(key.clone());
    }

    let ctx = Context::new(&config)
        .with_nsfw_allowed(args.nsfw)
        .with_owner(args.owner);

    let reply = match args.command {
        Command::Snake => {
            let snake = Snake;
            let reply = snake.snake(&ctx);
            snake.unload();
            reply
        }
        command => {
            // One client for the life of the cog
            let fetcher = Fetcher::new(&config)?;
            let google = Google::new(fetcher, config.clone());
            ::log::info!("Loaded cog {}", google.name());
            let reply = dispatch(&google, &ctx, command).await;
            google.unload();
            reply
        }
    };

    let timeout = Duration::from_secs(config.menu_timeout_secs);
    match reply {
        Reply::Text(text) | Reply::Help(text) => println!("{}", text),
        Reply::Embed(embed) => menu::show(&embed, args.json)?,
        Reply::Menu(session) => menu::run(session, timeout, args.json).await?,
        Reply::File { name, contents } => {
            tokio::fs::write(&name, contents).await?;
            println!("Saved {}", name);
        }
    }
    Ok(())
}

async fn dispatch(google: &Google, ctx: &Context, command: Command) -> Reply {
    match command {
        Command::Search { query } => google.search(ctx, join_query(&query).as_deref()).await,
        Command::Autofill { query } => match join_query(&query) {
            Some(query) => google.autofill(ctx, &query).await,
            None => Reply::Help(google.command_help("autofill")),
        },
        Command::Book { query } => match join_query(&query) {
            Some(query) => google.book(ctx, &query).await,
            None => Reply::Help(google.command_help("book")),
        },
        Command::Doodle { month, year } => google.doodle(ctx, month, year).await,
        Command::Image { query } => google.image(ctx, join_query(&query).as_deref()).await,
        Command::Reverse { url } => google.reverse(ctx, url.as_deref()).await,
        Command::Debug { url } => google.debug(ctx, &url).await,
        Command::Snake => Reply::Help(google.help()),
    }
}
