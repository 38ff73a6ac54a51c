//! Stateless precondition checks, run before any mutation.
//!
//! Each check only reads the snapshot it is given; calling one twice with
//! the same input yields the same result. This is what makes a duplicate
//! or late-arriving request (e.g. a re-fired bot trigger) a safe no-op.

use crate::{moves, ActionError, GamePhase, Player, Room, TokenId, MAX_PLAYERS, MIN_PLAYERS};

fn acting_player<'a>(room: &'a Room, player_id: &str) -> Result<&'a Player, ActionError> {
    if room.phase != GamePhase::Playing {
        return Err(ActionError::GameNotInProgress);
    }
    let current = room.current().ok_or(ActionError::MalformedInput)?;
    if current.id != player_id {
        return Err(ActionError::NotYourTurn);
    }
    Ok(current)
}

pub fn can_roll_dice(room: &Room, player_id: &str) -> Result<(), ActionError> {
    acting_player(room, player_id)?;
    if room.has_rolled {
        return Err(ActionError::AlreadyRolled);
    }
    Ok(())
}

/// Checks a move request against the authoritative state. The submitted
/// dice value has to match the recorded roll, so a client cannot replay a
/// stale roll after a new one was issued.
pub fn can_move_token(
    room: &Room,
    player_id: &str,
    token_id: TokenId,
    dice_value: u8,
) -> Result<(), ActionError> {
    let player = acting_player(room, player_id)?;
    if !room.has_rolled {
        return Err(ActionError::MustRollFirst);
    }
    if dice_value != room.dice_value {
        return Err(ActionError::StaleDiceValue);
    }
    if player.token(token_id).is_none() {
        return Err(ActionError::InvalidToken);
    }
    if !moves::valid_moves(&room.players, player, room.dice_value).contains(token_id) {
        return Err(ActionError::IllegalMove);
    }
    Ok(())
}

/// A turn may be ended voluntarily, except that a six with at least one
/// legal move is a forced-move state.
pub fn can_end_turn(room: &Room, player_id: &str) -> Result<(), ActionError> {
    let player = acting_player(room, player_id)?;
    if !room.has_rolled {
        return Err(ActionError::MustRollFirst);
    }
    if room.dice_value == 6 && !moves::valid_moves(&room.players, player, 6).is_empty() {
        return Err(ActionError::MustMoveOnSix);
    }
    Ok(())
}

pub fn can_start_game(room: &Room) -> Result<(), ActionError> {
    if room.phase != GamePhase::Waiting {
        return Err(ActionError::GameAlreadyStarted);
    }
    if room.players.len() < MIN_PLAYERS {
        return Err(ActionError::NotEnoughPlayers);
    }
    if room.players.len() > MAX_PLAYERS {
        return Err(ActionError::TooManyPlayers);
    }
    Ok(())
}

pub fn can_join_room(room: &Room) -> Result<(), ActionError> {
    if room.phase != GamePhase::Waiting {
        return Err(ActionError::GameAlreadyStarted);
    }
    if room.is_full() {
        return Err(ActionError::RoomFull);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{room, turn};

    fn playing_room() -> Room {
        let mut lobby = Room::new();
        lobby = room::join_room(&lobby, "p0", "ada", false).unwrap();
        lobby = room::join_room(&lobby, "p1", "bob", false).unwrap();
        room::start_game(&lobby).unwrap()
    }

    #[test]
    fn only_the_current_player_may_roll() {
        let room = playing_room();
        assert_eq!(can_roll_dice(&room, "p0"), Ok(()));
        assert_eq!(can_roll_dice(&room, "p1"), Err(ActionError::NotYourTurn));
    }

    #[test]
    fn rolling_twice_is_rejected() {
        let room = playing_room();
        let rolled = turn::apply_roll(&room, "p0", 4).unwrap();
        assert_eq!(
            can_roll_dice(&rolled.room, "p0"),
            Err(ActionError::AlreadyRolled)
        );
    }

    #[test]
    fn moving_requires_a_roll_first() {
        let room = playing_room();
        assert_eq!(
            can_move_token(&room, "p0", 0, 6),
            Err(ActionError::MustRollFirst)
        );
        assert_eq!(can_end_turn(&room, "p0"), Err(ActionError::MustRollFirst));
    }

    #[test]
    fn a_stale_dice_value_is_rejected() {
        let room = playing_room();
        let rolled = turn::apply_roll(&room, "p0", 6).unwrap();
        assert_eq!(
            can_move_token(&rolled.room, "p0", 0, 4),
            Err(ActionError::StaleDiceValue)
        );
        assert_eq!(can_move_token(&rolled.room, "p0", 0, 6), Ok(()));
    }

    #[test]
    fn a_six_with_a_legal_move_must_be_played() {
        let room = playing_room();
        let rolled = turn::apply_roll(&room, "p0", 6).unwrap();
        assert!(!rolled.movable.is_empty());
        assert_eq!(
            can_end_turn(&rolled.room, "p0"),
            Err(ActionError::MustMoveOnSix)
        );
    }

    #[test]
    fn a_roll_without_moves_may_be_passed() {
        let room = playing_room();
        // Everything still in base, a three moves nothing.
        let rolled = turn::apply_roll(&room, "p0", 3).unwrap();
        assert!(rolled.movable.is_empty());
        assert_eq!(can_end_turn(&rolled.room, "p0"), Ok(()));
    }

    #[test]
    fn validation_never_mutates_the_room() {
        let room = playing_room();
        let before = format!("{room:?}");
        let _ = can_roll_dice(&room, "p1");
        let _ = can_move_token(&room, "p0", 0, 6);
        let _ = can_end_turn(&room, "p0");
        assert_eq!(before, format!("{room:?}"));
    }

    #[test]
    fn lobby_checks() {
        let empty = Room::new();
        assert_eq!(can_start_game(&empty), Err(ActionError::NotEnoughPlayers));
        assert_eq!(can_join_room(&empty), Ok(()));
        let playing = playing_room();
        assert_eq!(
            can_join_room(&playing),
            Err(ActionError::GameAlreadyStarted)
        );
        assert_eq!(
            can_start_game(&playing),
            Err(ActionError::GameAlreadyStarted)
        );
    }
}
