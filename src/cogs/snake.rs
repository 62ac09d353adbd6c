use crate::cogs::cog::{Cog, Context, Reply};
use crate::embed::Embed;

pub const VERSION: &str = "0.0.1";

const EMPTY: &str = "\u{2b1b}";
const HEAD: &str = "\u{1f7e2}";
const BODY: &str = "\u{1f7e9}";
const APPLE: &str = "\u{1f34e}";

/// Starting position of a snake game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Head first
    snake: Vec<(usize, usize)>,
    apple: (usize, usize),
}

impl Board {
    /// A three cell snake in the middle row facing right, apple ahead of it
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(5);
        let height = height.max(3);
        let row = height / 2;
        let head = width / 2;
        Self {
            width,
            height,
            snake: vec![(head, row), (head - 1, row), (head - 2, row)],
            apple: (width - 2, row),
        }
    }

    pub fn render(&self) -> String {
        let mut rows = Vec::with_capacity(self.height);
        for y in 0..self.height {
            let row: String = (0..self.width)
                .map(|x| {
                    if self.snake.first() == Some(&(x, y)) {
                        HEAD
                    } else if self.snake.contains(&(x, y)) {
                        BODY
                    } else if self.apple == (x, y) {
                        APPLE
                    } else {
                        EMPTY
                    }
                })
                .collect();
            rows.push(row);
        }
        rows.join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(8, 8)
    }
}

pub struct Snake;

impl Snake {
    pub fn snake(&self, ctx: &Context) -> Reply {
        ::log::info!("snake: new board");
        let board = Board::default();
        let embed = Embed::new()
            .title("Snake")
            .color(ctx.embed_color)
            .description(board.render())
            .footer("Score: 0");
        Reply::menu(vec![embed])
    }
}

impl Cog for Snake {
    fn name(&self) -> &'static str {
        "Snake"
    }

    fn help(&self) -> String {
        format!("Play a game of snake.\n\nCog Version: {}", VERSION)
    }
}
