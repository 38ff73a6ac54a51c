use crate::{
    board, ActionError, Color, MoveDescriptor, Player, TokenId, TokenSet, BASE, BOARD_SIZE,
    FINISHED, HOME_COLUMN_SIZE, HOME_COLUMN_START, TOKENS_PER_PLAYER,
};

/// Where a token of `color` standing on `position` ends up after moving
/// `steps` squares. `None` means this roll cannot move the token at all:
/// leaving the base needs a six, and a token near the center may not
/// overshoot the finish square.
pub fn destination(color: Color, position: i8, steps: u8) -> Option<i8> {
    let steps = steps as i8;
    if position == BASE {
        return (steps == 6).then(|| board::start_square(color));
    }
    if board::is_home_column_square(position) {
        let offset = position - HOME_COLUMN_START + steps;
        return (offset < HOME_COLUMN_SIZE).then(|| HOME_COLUMN_START + offset);
    }
    if board::is_track_square(position) {
        let travelled = board::distance_from_start(color, position);
        let lap = board::lap_length(color);
        return if travelled + steps > lap {
            // The token diverts into its home column instead of continuing
            // around the ring. Landing past the finish square is illegal.
            let offset = travelled + steps - lap - 1;
            (offset < HOME_COLUMN_SIZE).then(|| HOME_COLUMN_START + offset)
        } else {
            // The wrap never fires for a lap length below BOARD_SIZE, but
            // the modulo keeps a malformed snapshot from escaping the ring.
            Some((position + steps).rem_euclid(BOARD_SIZE))
        };
    }
    // Finished tokens (and out-of-domain positions) never move again.
    None
}

/// The player holding a block on a track square: two or more of their own
/// tokens stacked there. `exclude` skips that player, since an own block
/// never obstructs its owner.
///
/// Home column positions are color-relative, so equal values belong to
/// different physical squares there; blocks only exist on the shared track.
pub fn block_at<'a>(
    players: &'a [Player],
    square: i8,
    exclude: Option<&str>,
) -> Option<&'a Player> {
    if !board::is_track_square(square) {
        return None;
    }
    players
        .iter()
        .filter(|p| exclude != Some(p.id.as_str()))
        .find(|p| p.tokens.iter().filter(|t| t.position == square).count() >= 2)
}

/// Whether an opposing block sits on any track square the token passes
/// through on its way from `from` (exclusive) to `to` (inclusive).
///
/// Only the shared-track part of the path is checked; once the token
/// leaves the ring for its home column, nothing can stand in its way.
pub fn is_path_blocked(players: &[Player], player: &Player, from: i8, to: i8) -> bool {
    if !board::is_track_square(from) {
        return false;
    }
    let track_steps = if board::is_track_square(to) {
        (to - from).rem_euclid(BOARD_SIZE)
    } else {
        board::lap_length(player.color) - board::distance_from_start(player.color, from)
    };
    let mut square = from;
    for _ in 0..track_steps {
        square = (square + 1).rem_euclid(BOARD_SIZE);
        if block_at(players, square, Some(&player.id)).is_some() {
            return true;
        }
    }
    false
}

/// Whether moving the token from `from` to `to` would leap over another of
/// the player's own tokens inside the home column. Own tokens may be
/// jumped on the open track, but never in the private column.
pub fn jumps_own_token(player: &Player, token_id: TokenId, from: i8, to: i8) -> bool {
    if !board::is_home_column_square(to) && to != FINISHED {
        return false;
    }
    let first_passed = if board::is_home_column_square(from) {
        from + 1
    } else {
        HOME_COLUMN_START
    };
    player
        .tokens
        .iter()
        .any(|t| t.id != token_id && (first_passed..to).contains(&t.position))
}

/// The ids of the tokens `player` may move with this roll. An empty set
/// means there is no legal action and the turn has to be ended.
pub fn valid_moves(players: &[Player], player: &Player, dice_value: u8) -> TokenSet {
    let mut movable = TokenSet::new();
    for token in &player.tokens {
        if token.is_finished() {
            continue;
        }
        if token.in_base() {
            // Entering is only possible on a six, and only when no opposing
            // block holds the entry square. An own block is fine, a third
            // token may join it.
            if dice_value == 6
                && block_at(players, board::start_square(player.color), Some(&player.id)).is_none()
            {
                movable = movable.insert(token.id);
            }
            continue;
        }
        let Some(dest) = destination(player.color, token.position, dice_value) else {
            continue;
        };
        if block_at(players, dest, Some(&player.id)).is_some() {
            continue;
        }
        if is_path_blocked(players, player, token.position, dest) {
            continue;
        }
        if jumps_own_token(player, token.id, token.position, dest) {
            continue;
        }
        movable = movable.insert(token.id);
    }
    movable
}

/// The single opponent token that would be captured by landing on
/// `square`, as `(player index, token id)`.
///
/// Captures only happen on unsafe track squares, and only against a lone
/// token. A block is capture-immune, and so is everything in a home column.
pub fn capture_target(players: &[Player], player_id: &str, square: i8) -> Option<(usize, TokenId)> {
    if !board::is_track_square(square) || board::is_safe_zone(square) {
        return None;
    }
    let mut found = None;
    for (player_idx, player) in players.iter().enumerate() {
        if player.id == player_id {
            continue;
        }
        for token in &player.tokens {
            if token.position == square {
                if found.is_some() {
                    // Two or more opposing tokens form a block.
                    return None;
                }
                found = Some((player_idx, token.id));
            }
        }
    }
    found
}

/// The result of applying a single move to the roster.
#[derive(Clone, Debug)]
pub struct MovedToken {
    /// The full roster with the move (and any capture) applied.
    pub players: Vec<Player>,
    pub descriptor: MoveDescriptor,
}

/// Applies one move and returns the replacement roster.
///
/// The input roster is never touched; rejections leave no partial state
/// behind, which is what makes this safe to call from transactional code.
pub fn move_token(
    players: &[Player],
    player_id: &str,
    token_id: TokenId,
    dice_value: u8,
) -> Result<MovedToken, ActionError> {
    let player_idx = players
        .iter()
        .position(|p| p.id == player_id)
        .ok_or(ActionError::MalformedInput)?;
    let player = &players[player_idx];
    let token = player.token(token_id).ok_or(ActionError::InvalidToken)?;
    if !valid_moves(players, player, dice_value).contains(token_id) {
        return Err(ActionError::IllegalMove);
    }
    let from_position = token.position;
    let to_position =
        destination(player.color, from_position, dice_value).ok_or(ActionError::IllegalMove)?;

    let mut updated: Vec<Player> = players.to_vec();
    let captured = capture_target(players, player_id, to_position);
    if let Some((opponent_idx, opponent_token)) = captured {
        for token in &mut updated[opponent_idx].tokens {
            if token.id == opponent_token {
                token.position = BASE;
            }
        }
    }
    for token in &mut updated[player_idx].tokens {
        if token.id == token_id {
            token.position = to_position;
        }
    }

    Ok(MovedToken {
        players: updated,
        descriptor: MoveDescriptor {
            player_id: player_id.to_string(),
            token_id,
            from_position,
            to_position,
            captured: captured.is_some(),
        },
    })
}

/// Whether the player has brought all four tokens to the center.
pub fn has_won(player: &Player) -> bool {
    player.tokens.len() == TOKENS_PER_PLAYER && player.tokens.iter().all(|t| t.is_finished())
}
