pub mod cog;
pub mod embeds;
pub mod google;
pub mod snake;

pub use cog::{Cog, Context, Reply};
pub use google::Google;
pub use snake::Snake;
