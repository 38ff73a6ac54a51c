use clap::Parser;
use ludo::{Color, Player, TokenId};
use ludo_bot_utils::Bot;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = StdRng::seed_from_u64(seed);

    RandomBot { rng, color: None }.run()
}

struct RandomBot {
    rng: StdRng,
    color: Option<Color>,
}

impl Bot for RandomBot {
    fn new_game(&mut self, color: Color) {
        self.color = Some(color);
    }

    fn choose_move(&mut self, players: Vec<Player>, dice_value: u8) -> Option<TokenId> {
        let color = self.color?;
        let me = players.iter().find(|p| p.color == color)?;
        let movable: Vec<TokenId> = ludo::valid_moves(&players, me, dice_value)
            .into_iter()
            .collect();
        movable.choose(&mut self.rng).copied()
    }
}
