use std::path::PathBuf;

use clap::Parser;
use judge::{play_game, GameResult, Player, PlayerConfig, Recorder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Paths to the config JSON files of the 2-4 players at the table
    #[clap(num_args(2..=4), value_delimiter = ' ')]
    player_configs: Vec<PathBuf>,

    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Stop as soon as one player submits an illegal action
    #[arg(short, long, default_value_t = false)]
    stop_on_illegal_move: bool,

    /// Record the games' interactions and move history as JSON files into
    /// this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct TableScore {
    wins: Vec<usize>,
    illegal_actions: Vec<usize>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let player_configs = args
        .player_configs
        .iter()
        .map(|path| PlayerConfig::load(path))
        .collect::<Result<Vec<PlayerConfig>, anyhow::Error>>()?;
    anyhow::ensure!(
        (2..=4).contains(&player_configs.len()),
        "A table needs between two and four players, got {}",
        player_configs.len()
    );

    let mut players = player_configs
        .iter()
        .map(Player::from_config)
        .collect::<Result<Vec<Player>, anyhow::Error>>()?;

    let player_names: Vec<String> = players.iter().map(|p| p.name.clone()).collect();
    let mut score = TableScore {
        wins: vec![0; players.len()],
        illegal_actions: vec![0; players.len()],
    };

    for game_idx in 0..args.num_games {
        match play_game(&mut rng, &mut players, &mut recorder)? {
            GameResult::WonByPlayer { player_idx } => {
                debug!(winner = player_names[player_idx], game_idx);
                score.wins[player_idx] += 1;
            }
            GameResult::IllegalActionByPlayer { player_idx, err } => {
                info!(
                    player = player_names[player_idx],
                    game_idx,
                    reason = err.code(),
                    "Illegal action by player"
                );
                info!("{}", err);
                score.illegal_actions[player_idx] += 1;
                if args.stop_on_illegal_move {
                    break;
                }
            }
        }
    }

    let games_played: usize = score.wins.iter().sum::<usize>()
        + score.illegal_actions.iter().sum::<usize>();
    eprintln!("End result after {} games:", games_played);
    for (idx, name) in player_names.iter().enumerate() {
        let paren = if score.illegal_actions[idx] > 0 {
            format!(" ({} games lost through illegal actions)", score.illegal_actions[idx])
        } else {
            String::new()
        };
        eprintln!("- {} wins by {}{}", score.wins[idx], name, paren);
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
