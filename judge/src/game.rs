use ludo::{
    apply_move, apply_roll, end_turn, join_room, start_game, visualize_room, ActionError,
    GamePhase, Room,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::player::Player;
use crate::recording::Recorder;

pub enum GameResult {
    WonByPlayer { player_idx: usize },
    IllegalActionByPlayer { player_idx: usize, err: ActionError },
}

/// Hard cap on rolls per game, in case a table of misbehaving bots never
/// brings a token home.
const MAX_ROLLS: usize = 100_000;

fn seat_id(seat: usize) -> String {
    format!("seat-{seat}")
}

/// Referees one game. Returns an error only on communication failure, not
/// when a player submits an illegal action.
pub fn play_game(
    rng: &mut StdRng,
    players: &mut [Player],
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    // Shuffle who sits where; colors and turn order follow the seating.
    let mut seating: Vec<usize> = (0..players.len()).collect();
    seating.shuffle(rng);

    let mut room = Room::new();
    for (seat, &player_idx) in seating.iter().enumerate() {
        room = join_room(
            &room,
            &seat_id(seat),
            &players[player_idx].name,
            players[player_idx].is_builtin(),
        )?;
    }
    room = start_game(&room)?;

    // Inform the players about the new game, so that they can reset their state
    for (seat, &player_idx) in seating.iter().enumerate() {
        let color = room
            .player(&seat_id(seat))
            .ok_or_else(|| anyhow::anyhow!("Seat {} vanished after joining", seat))?
            .color;
        players[player_idx].new_game(recorder, color)?;
    }

    let mut rolls = 0;
    let winner_idx = loop {
        rolls += 1;
        if rolls > MAX_ROLLS {
            anyhow::bail!("Game exceeded {} rolls without a winner", MAX_ROLLS);
        }
        let seat = room.current_player;
        let player_idx = seating[seat];
        let id = seat_id(seat);
        let value = rng.gen_range(1..=6);

        let rolled = apply_roll(&room, &id, value)?;
        room = rolled.room;
        debug!(player = %players[player_idx].name, value, "rolled");

        if rolled.busted {
            debug!(player = %players[player_idx].name, "three sixes, turn forfeited");
            continue;
        }
        if rolled.movable.is_empty() {
            room = end_turn(&room, &id)?;
            continue;
        }

        let choice = players[player_idx].choose_move(recorder, &room.players, value)?;
        match choice {
            Some(token_id) => match apply_move(&room, &id, token_id, value) {
                Ok(moved) => {
                    trace!(descriptor = ?moved.descriptor, "move applied");
                    if let Some(rec) = recorder {
                        // The mover is still in the pre-move snapshot.
                        if let Some(mover) = room.player(&id) {
                            rec.store_move(&moved.descriptor, &mover.nickname, mover.color);
                        }
                    }
                    room = moved.room;
                    if room.phase == GamePhase::Finished {
                        break player_idx;
                    }
                }
                Err(err) => {
                    return Ok(GameResult::IllegalActionByPlayer { player_idx, err });
                }
            },
            None => match end_turn(&room, &id) {
                Ok(next) => room = next,
                Err(err) => {
                    // Claiming to have no move while one exists (e.g. on a
                    // six) loses the game like any other illegal action.
                    return Ok(GameResult::IllegalActionByPlayer { player_idx, err });
                }
            },
        }
    };

    debug!("final board:\n{}", visualize_room(&room));

    if let Some(rec) = recorder {
        rec.write_game_recording()?;
    }

    Ok(GameResult::WonByPlayer {
        player_idx: winner_idx,
    })
}
