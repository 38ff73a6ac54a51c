use crate::{validator, ActionError, Color, Player, Token, TokenId, BASE};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;
pub const TOKENS_PER_PLAYER: usize = 4;

/// Colors are handed out strictly by join order.
pub const COLOR_ROTATION: [Color; MAX_PLAYERS] =
    [Color::Red, Color::Green, Color::Yellow, Color::Blue];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Waiting,
    Playing,
    Finished,
}

/// The full state of one match, and the single source of truth for it.
///
/// Every turn operation ([`apply_roll`](crate::apply_roll) and friends)
/// takes a snapshot of this and returns a replacement; nothing is ever
/// patched in place. The surrounding
/// session layer is responsible for making read-validate-write atomic per
/// room, the engine makes no guarantees about concurrent callers.
#[derive(Clone, Debug)]
pub struct Room {
    /// Seats in turn order.
    pub players: Vec<Player>,
    pub phase: GamePhase,
    /// Index of the player whose turn it is. Only meaningful while playing.
    pub current_player: usize,
    /// The last rolled value; 0 means the current player has not rolled yet.
    pub dice_value: u8,
    pub has_rolled: bool,
    /// Sixes rolled back-to-back by the current player. Reaching three
    /// forfeits the turn.
    pub consecutive_sixes: u8,
    pub winner: Option<String>,
}

impl Room {
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            phase: GamePhase::Waiting,
            current_player: 0,
            dice_value: 0,
            has_rolled: false,
            consecutive_sixes: 0,
            winner: None,
        }
    }

    pub fn current(&self) -> Option<&Player> {
        self.players.get(self.current_player)
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= MAX_PLAYERS
    }

    /// Whether the next action is up to a computer-controlled seat. The
    /// session layer polls this after every mutation to schedule the bot
    /// follow-up; the engine never invokes itself.
    pub fn pending_bot_action(&self) -> bool {
        self.phase == GamePhase::Playing && self.current().is_some_and(|p| p.is_bot)
    }
}

impl Default for Room {
    fn default() -> Self {
        Self::new()
    }
}

/// Adds a player to a waiting room, assigning the next color in the
/// rotation. Tokens stay empty until the game starts.
pub fn join_room(
    room: &Room,
    player_id: &str,
    nickname: &str,
    is_bot: bool,
) -> Result<Room, ActionError> {
    validator::can_join_room(room)?;
    if room.player(player_id).is_some() {
        return Err(ActionError::MalformedInput);
    }
    let mut next = room.clone();
    next.players.push(Player {
        id: player_id.to_string(),
        nickname: nickname.to_string(),
        color: COLOR_ROTATION[room.players.len()],
        tokens: Vec::new(),
        is_bot,
    });
    Ok(next)
}

/// Starts the game: gives every seat its four tokens (all in base) and
/// hands the first turn to the player who joined first.
pub fn start_game(room: &Room) -> Result<Room, ActionError> {
    validator::can_start_game(room)?;
    let mut next = room.clone();
    for player in &mut next.players {
        player.tokens = (0..TOKENS_PER_PLAYER)
            .map(|id| Token {
                id: id as TokenId,
                position: BASE,
            })
            .collect();
    }
    next.phase = GamePhase::Playing;
    next.current_player = 0;
    next.dice_value = 0;
    next.has_rolled = false;
    next.consecutive_sixes = 0;
    next.winner = None;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_lobby() -> Room {
        let mut room = Room::new();
        for (idx, nick) in ["ada", "bob", "cleo", "dan"].iter().enumerate() {
            room = join_room(&room, &format!("p{idx}"), nick, idx == 3).unwrap();
        }
        room
    }

    #[test]
    fn colors_follow_the_join_order() {
        let room = full_lobby();
        let colors: Vec<Color> = room.players.iter().map(|p| p.color).collect();
        assert_eq!(colors, COLOR_ROTATION);
    }

    #[test]
    fn a_fifth_player_is_turned_away() {
        let room = full_lobby();
        assert_eq!(
            join_room(&room, "p4", "eve", false).unwrap_err(),
            ActionError::RoomFull
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let room = join_room(&Room::new(), "p0", "ada", false).unwrap();
        assert_eq!(
            join_room(&room, "p0", "ada again", false).unwrap_err(),
            ActionError::MalformedInput
        );
    }

    #[test]
    fn starting_populates_the_tokens() {
        let started = start_game(&full_lobby()).unwrap();
        assert_eq!(started.phase, GamePhase::Playing);
        assert_eq!(started.current_player, 0);
        for player in &started.players {
            assert_eq!(player.tokens.len(), TOKENS_PER_PLAYER);
            assert!(player.tokens.iter().all(|t| t.in_base()));
        }
    }

    #[test]
    fn starting_alone_is_not_a_game() {
        let room = join_room(&Room::new(), "p0", "ada", false).unwrap();
        assert_eq!(start_game(&room).unwrap_err(), ActionError::NotEnoughPlayers);
    }

    #[test]
    fn joining_a_running_game_is_rejected() {
        let started = start_game(&full_lobby()).unwrap();
        assert_eq!(
            join_room(&started, "p9", "late", false).unwrap_err(),
            ActionError::GameAlreadyStarted
        );
        assert!(started.players[3].is_bot);
        // The first seat is human, so no bot follow-up is due yet.
        assert!(!started.pending_bot_action());
    }
}
