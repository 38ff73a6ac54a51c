mod game;
mod player;
mod recording;
pub use game::*;
pub use player::*;
pub use recording::*;
