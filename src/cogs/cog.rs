use std::fmt;

use crate::config::CogConfig;
use crate::embed::Embed;
use crate::pages::{Menu, MenuSession};

/// Who invoked a command and where
#[derive(Debug, Clone)]
pub struct Context {
    /// The channel allows unrestricted search results
    pub nsfw_allowed: bool,
    /// The invoking user owns the bot
    pub is_owner: bool,
    /// Colour used for every embed sent in this context
    pub embed_color: u32,
}

impl Context {
    pub fn new(config: &CogConfig) -> Self {
        Self {
            nsfw_allowed: false,
            is_owner: false,
            embed_color: config.embed_color,
        }
    }

    pub fn with_nsfw_allowed(mut self, allowed: bool) -> Self {
        self.nsfw_allowed = allowed;
        self
    }

    pub fn with_owner(mut self, is_owner: bool) -> Self {
        self.is_owner = is_owner;
        self
    }
}

/// What a command sends back to the channel
pub enum Reply {
    Text(String),
    Embed(Embed),
    /// Interactive paged result; the menu UI drives navigation
    Menu(Box<dyn MenuSession>),
    File { name: String, contents: String },
    /// Usage text for the invoked command
    Help(String),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    /// A single embed is sent directly, several open a menu
    pub fn pages(mut embeds: Vec<Embed>) -> Self {
        if embeds.len() == 1 {
            Reply::Embed(embeds.remove(0))
        } else {
            Reply::menu(embeds)
        }
    }

    /// Always open a menu, one embed per page
    pub fn menu(embeds: Vec<Embed>) -> Self {
        Reply::Menu(Box::new(Menu::from_embeds(embeds)))
    }

    /// Text content, if this is a plain text reply
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Reply::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Reply::Embed(embed) => f.debug_tuple("Embed").field(embed).finish(),
            Reply::Menu(menu) => f
                .debug_struct("Menu")
                .field("page_count", &menu.page_count())
                .field("current_page", &menu.current_page())
                .finish(),
            Reply::File { name, contents } => f
                .debug_struct("File")
                .field("name", name)
                .field("len", &contents.len())
                .finish(),
            Reply::Help(text) => f.debug_tuple("Help").field(text).finish(),
        }
    }
}

/// A named group of commands loaded into the bot
pub trait Cog {
    fn name(&self) -> &'static str;

    /// Help text shown for the cog as a whole
    fn help(&self) -> String;

    /// Release anything the cog holds for the life of the process
    fn unload(self)
    where
        Self: Sized,
    {
        ::log::info!("Unloaded cog {}", self.name());
    }
}
