//! The move policy for computer-controlled seats.
//!
//! A single-ply greedy evaluator: every candidate from
//! [`valid_moves`](crate::moves::valid_moves) gets a score, the best one
//! wins. Deterministic given its inputs, so a re-fired bot trigger picks
//! the same move and bounces off the validator as a no-op.

use crate::{board, moves, Player, Token, TokenId, FINISHED, HOME_COLUMN_START};

/// Picks the token the bot should move, or `None` when no move is legal
/// and the turn has to be ended.
pub fn choose_move(players: &[Player], player: &Player, dice_value: u8) -> Option<TokenId> {
    let candidates = moves::valid_moves(players, player, dice_value);
    if candidates.len() == 1 {
        // Nothing to weigh up.
        return candidates.into_iter().next();
    }
    let mut best: Option<(i32, TokenId)> = None;
    for token_id in candidates {
        let token = player.token(token_id)?;
        let score = score_move(players, player, token, dice_value);
        // Strictly-greater keeps the first of equally scored candidates,
        // so the choice is stable across identical inputs.
        if best.map_or(true, |(best_score, _)| score > best_score) {
            best = Some((score, token_id));
        }
    }
    best.map(|(_, token_id)| token_id)
}

fn score_move(players: &[Player], player: &Player, token: &Token, dice_value: u8) -> i32 {
    let Some(dest) = moves::destination(player.color, token.position, dice_value) else {
        return i32::MIN;
    };
    let mut score = 0;

    if token.in_base() {
        // A six entering play.
        score += 50;
    }
    if moves::capture_target(players, &player.id, dest).is_some() {
        score += 100;
    }
    if dest == FINISHED {
        // Finishing dominates everything else.
        score += 200;
    }

    if token.in_home_column() {
        let offset = (token.position - HOME_COLUMN_START) as i32;
        score += 30 + offset * 5;
    } else if token.on_track() {
        score += board::distance_from_start(player.color, token.position) as i32 / 2;
    }

    if board::is_safe_zone(dest) {
        score += 10;
    }
    score
}
