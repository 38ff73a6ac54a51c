use ludo::{Color, Player, TokenId};
use ludo_bot_utils::Bot;

fn main() -> anyhow::Result<()> {
    GreedyBot { color: None }.run()
}

/// Plays the engine's greedy scoring policy over the wire protocol.
struct GreedyBot {
    color: Option<Color>,
}

impl Bot for GreedyBot {
    fn new_game(&mut self, color: Color) {
        self.color = Some(color);
    }

    fn choose_move(&mut self, players: Vec<Player>, dice_value: u8) -> Option<TokenId> {
        let color = self.color?;
        let me = players.iter().find(|p| p.color == color)?;
        ludo::choose_move(&players, me, dice_value)
    }
}
