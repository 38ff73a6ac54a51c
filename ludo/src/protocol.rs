use serde::{Deserialize, Serialize};

use crate::{BASE, FINISHED, HOME_COLUMN_START};

/// Identity of a token within its owning player, `0..=3`.
pub type TokenId = u8;

/// Request for a bot to do something.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Request to reset the bot's state for a new game.
    ///
    /// The response should be an [`Okay`].
    NewGame { color: Color },
    /// Request to pick a token to move for the current roll.
    ///
    /// The response should be a [`ChooseMoveResponse`].
    ChooseMove {
        /// The full roster, in turn order. The bot finds itself by color.
        players: Vec<Player>,
        /// The value the server rolled for this turn.
        dice_value: u8,
    },
    /// The bot should shut down.
    Bye,
}

/// Dummy struct for use in bot communication.
///
/// Used to signal an acknowledgement without data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Okay();

/// The token to move, or `None` to end the turn because no move is legal.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct ChooseMoveResponse(pub Option<TokenId>);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

/// A single playing piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    /// Location encoding: `-1` = in base, `0..=51` = shared track,
    /// `52..=56` = home column, `57` = finished.
    pub position: i8,
}

impl Token {
    pub fn in_base(&self) -> bool {
        self.position == BASE
    }

    pub fn is_finished(&self) -> bool {
        self.position == FINISHED
    }

    pub fn in_home_column(&self) -> bool {
        (HOME_COLUMN_START..FINISHED).contains(&self.position)
    }

    pub fn on_track(&self) -> bool {
        (0..HOME_COLUMN_START).contains(&self.position)
    }
}

/// One seat in a room.
///
/// `id` is an opaque identifier that stays stable across reconnects;
/// equality on it is all the engine ever needs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub nickname: String,
    pub color: Color,
    /// Empty while the room is waiting; exactly four once the game starts.
    pub tokens: Vec<Token>,
    /// Whether moves for this seat are chosen by the bot policy instead of
    /// an external participant.
    pub is_bot: bool,
}

impl Player {
    pub fn token(&self, token_id: TokenId) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == token_id)
    }
}

/// Describes one applied move, for history and broadcast.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoveDescriptor {
    pub player_id: String,
    pub token_id: TokenId,
    pub from_position: i8,
    pub to_position: i8,
    /// Whether an opponent token was sent back to its base.
    pub captured: bool,
}
