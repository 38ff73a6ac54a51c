//! Room-level state transitions: rolling, moving, ending a turn.
//!
//! Every function takes a room snapshot and returns a replacement inside
//! an outcome struct. A rejection returns early with the input untouched.

use crate::{moves, validator, ActionError, GamePhase, MoveDescriptor, Room, TokenId, TokenSet};

/// Result of applying a dice roll.
#[derive(Clone, Debug)]
pub struct Rolled {
    pub room: Room,
    /// The tokens the roller may now move. Empty means the turn has to be
    /// ended without a move.
    pub movable: TokenSet,
    /// The roll was the third six in a row: the turn was forfeited and has
    /// already advanced, no move may be played.
    pub busted: bool,
}

/// Result of applying a move.
#[derive(Clone, Debug)]
pub struct Moved {
    pub room: Room,
    pub descriptor: MoveDescriptor,
    /// The mover rolled a six and keeps the turn (a fresh roll is needed).
    pub extra_turn: bool,
}

fn advance_turn(room: &mut Room) {
    room.current_player = (room.current_player + 1) % room.players.len();
    room.dice_value = 0;
    room.has_rolled = false;
    room.consecutive_sixes = 0;
}

/// Records a server-rolled dice value for the current player.
///
/// A six increments the consecutive-six count; the third one busts the
/// turn on the spot. The dice value itself comes from the caller, the
/// engine owns no RNG.
pub fn apply_roll(room: &Room, player_id: &str, value: u8) -> Result<Rolled, ActionError> {
    validator::can_roll_dice(room, player_id)?;
    if !(1..=6).contains(&value) {
        return Err(ActionError::MalformedInput);
    }
    let mut next = room.clone();
    next.dice_value = value;
    next.has_rolled = true;
    if value == 6 {
        next.consecutive_sixes += 1;
        if next.consecutive_sixes == 3 {
            advance_turn(&mut next);
            return Ok(Rolled {
                room: next,
                movable: TokenSet::new(),
                busted: true,
            });
        }
    }
    let player = next.current().ok_or(ActionError::MalformedInput)?;
    let movable = moves::valid_moves(&next.players, player, value);
    Ok(Rolled {
        room: next,
        movable,
        busted: false,
    })
}

/// Moves a token for the current player and resolves the turn: win
/// detection first, then either an extra turn (the roll was a six) or
/// advancement to the next seat.
pub fn apply_move(
    room: &Room,
    player_id: &str,
    token_id: TokenId,
    dice_value: u8,
) -> Result<Moved, ActionError> {
    validator::can_move_token(room, player_id, token_id, dice_value)?;
    let moved = moves::move_token(&room.players, player_id, token_id, room.dice_value)?;

    let mut next = room.clone();
    next.players = moved.players;
    let mover = next.player(player_id).ok_or(ActionError::MalformedInput)?;

    if moves::has_won(mover) {
        next.phase = GamePhase::Finished;
        next.winner = Some(player_id.to_string());
        next.dice_value = 0;
        next.has_rolled = false;
        next.consecutive_sixes = 0;
        return Ok(Moved {
            room: next,
            descriptor: moved.descriptor,
            extra_turn: false,
        });
    }

    let extra_turn = room.dice_value == 6;
    if extra_turn {
        // Same seat rolls again. The six count survives so that three in a
        // row still bust, but the roll itself has to be made explicitly.
        next.dice_value = 0;
        next.has_rolled = false;
    } else {
        advance_turn(&mut next);
    }
    Ok(Moved {
        room: next,
        descriptor: moved.descriptor,
        extra_turn,
    })
}

/// Ends the current player's turn without a move.
pub fn end_turn(room: &Room, player_id: &str) -> Result<Room, ActionError> {
    validator::can_end_turn(room, player_id)?;
    let mut next = room.clone();
    advance_turn(&mut next);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{room, ActionError, BASE, FINISHED};

    fn two_player_room() -> Room {
        let mut lobby = Room::new();
        lobby = room::join_room(&lobby, "p0", "ada", false).unwrap();
        lobby = room::join_room(&lobby, "p1", "bob", false).unwrap();
        room::start_game(&lobby).unwrap()
    }

    fn with_positions(room: &Room, player_id: &str, positions: [i8; 4]) -> Room {
        let mut next = room.clone();
        for player in &mut next.players {
            if player.id == player_id {
                for (token, position) in player.tokens.iter_mut().zip(positions) {
                    token.position = position;
                }
            }
        }
        next
    }

    #[test]
    fn a_six_grants_an_extra_turn() {
        let room = two_player_room();
        let rolled = apply_roll(&room, "p0", 6).unwrap();
        assert!(!rolled.busted);
        let moved = apply_move(&rolled.room, "p0", 0, 6).unwrap();
        assert!(moved.extra_turn);
        assert_eq!(moved.room.current_player, 0);
        assert_eq!(moved.room.dice_value, 0);
        assert!(!moved.room.has_rolled);
        assert_eq!(moved.room.consecutive_sixes, 1);
    }

    #[test]
    fn a_non_six_passes_the_turn_on() {
        let room = with_positions(&two_player_room(), "p0", [5, BASE, BASE, BASE]);
        let rolled = apply_roll(&room, "p0", 3).unwrap();
        let moved = apply_move(&rolled.room, "p0", 0, 3).unwrap();
        assert!(!moved.extra_turn);
        assert_eq!(moved.room.current_player, 1);
        assert_eq!(moved.room.consecutive_sixes, 0);
        assert_eq!(moved.room.players[0].tokens[0].position, 8);
    }

    #[test]
    fn three_sixes_bust_the_turn() {
        let mut room = two_player_room();
        for _ in 0..2 {
            let rolled = apply_roll(&room, "p0", 6).unwrap();
            assert!(!rolled.busted);
            let moved = apply_move(&rolled.room, "p0", 0, 6).unwrap();
            room = moved.room;
        }
        let before = room.players[0].tokens.clone();
        let rolled = apply_roll(&room, "p0", 6).unwrap();
        assert!(rolled.busted);
        assert!(rolled.movable.is_empty());
        assert_eq!(rolled.room.current_player, 1);
        assert_eq!(rolled.room.consecutive_sixes, 0);
        assert_eq!(rolled.room.dice_value, 0);
        assert!(!rolled.room.has_rolled);
        // The bust applied no move.
        assert_eq!(rolled.room.players[0].tokens, before);
    }

    #[test]
    fn ending_a_turn_without_moves() {
        let room = two_player_room();
        let rolled = apply_roll(&room, "p0", 2).unwrap();
        assert!(rolled.movable.is_empty());
        let next = end_turn(&rolled.room, "p0").unwrap();
        assert_eq!(next.current_player, 1);
        assert!(!next.has_rolled);
    }

    #[test]
    fn finishing_the_last_token_ends_the_game() {
        // p0's last token sits one step before the finish square.
        let room = with_positions(
            &two_player_room(),
            "p0",
            [FINISHED, FINISHED, FINISHED, 56],
        );
        let rolled = apply_roll(&room, "p0", 1).unwrap();
        let moved = apply_move(&rolled.room, "p0", 3, 1).unwrap();
        assert_eq!(moved.room.phase, GamePhase::Finished);
        assert_eq!(moved.room.winner.as_deref(), Some("p0"));
        assert!(!moved.extra_turn);
        assert_eq!(
            apply_roll(&moved.room, "p1", 4).unwrap_err(),
            ActionError::GameNotInProgress
        );
    }

    #[test]
    fn duplicate_triggers_are_safe_noops() {
        let room = two_player_room();
        let rolled = apply_roll(&room, "p0", 6).unwrap();
        // A re-fired roll trigger bounces off AlreadyRolled.
        assert_eq!(
            apply_roll(&rolled.room, "p0", 6).unwrap_err(),
            ActionError::AlreadyRolled
        );
        let moved = apply_move(&rolled.room, "p0", 0, 6).unwrap();
        // Replaying the move fails: the dice were cleared for the re-roll.
        assert_eq!(
            apply_move(&moved.room, "p0", 0, 6).unwrap_err(),
            ActionError::MustRollFirst
        );
    }

    #[test]
    fn out_of_range_dice_values_fail_closed() {
        let room = two_player_room();
        assert_eq!(
            apply_roll(&room, "p0", 0).unwrap_err(),
            ActionError::MalformedInput
        );
        assert_eq!(
            apply_roll(&room, "p0", 7).unwrap_err(),
            ActionError::MalformedInput
        );
    }

    #[test]
    fn capturing_during_a_turn() {
        let room = with_positions(
            &with_positions(&two_player_room(), "p0", [17, BASE, BASE, BASE]),
            "p1",
            [20, BASE, BASE, BASE],
        );
        let rolled = apply_roll(&room, "p0", 3).unwrap();
        let moved = apply_move(&rolled.room, "p0", 0, 3).unwrap();
        assert!(moved.descriptor.captured);
        assert_eq!(moved.room.players[1].tokens[0].position, BASE);
        assert_eq!(moved.room.current_player, 1);
    }

    #[test]
    fn pending_bot_action_follows_the_turn() {
        let mut lobby = Room::new();
        lobby = room::join_room(&lobby, "p0", "ada", false).unwrap();
        lobby = room::join_room(&lobby, "bot", "marvin", true).unwrap();
        let playing = room::start_game(&lobby).unwrap();
        assert!(!playing.pending_bot_action());
        let rolled = apply_roll(&playing, "p0", 2).unwrap();
        let next = end_turn(&rolled.room, "p0").unwrap();
        assert!(next.pending_bot_action());
    }

    #[test]
    fn tokens_outside_the_roster_are_rejected() {
        let room = two_player_room();
        let rolled = apply_roll(&room, "p0", 6).unwrap();
        assert_eq!(
            apply_move(&rolled.room, "p0", 9, 6).unwrap_err(),
            ActionError::InvalidToken
        );
    }
}
