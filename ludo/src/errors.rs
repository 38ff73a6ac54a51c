/// The error type for every player-initiated action.
///
/// Every variant is a rejection, not a crash: a rejected action leaves the
/// room untouched, and the caller reports the reason to the requester.
/// Validation always runs before any mutation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionError {
    /// The acting player is not the current player.
    NotYourTurn,
    /// The action only makes sense while a game is running.
    GameNotInProgress,
    /// The current player already rolled this turn.
    AlreadyRolled,
    /// The current player has to roll before moving or ending the turn.
    MustRollFirst,
    /// The submitted dice value does not match the recorded roll.
    StaleDiceValue,
    /// No token with that id exists for the acting player.
    InvalidToken,
    /// The token is not among the currently movable ones.
    IllegalMove,
    /// A six with at least one legal move may not be passed.
    MustMoveOnSix,
    RoomFull,
    GameAlreadyStarted,
    NotEnoughPlayers,
    TooManyPlayers,
    /// Catch-all for inputs outside every expected domain, e.g. a dice
    /// value above six or an unknown player id.
    MalformedInput,
}

impl ActionError {
    /// A stable machine-readable code, for callers that branch on the
    /// reason without matching on the enum (e.g. across a wire).
    pub fn code(self) -> &'static str {
        match self {
            ActionError::NotYourTurn => "NOT_YOUR_TURN",
            ActionError::GameNotInProgress => "GAME_NOT_IN_PROGRESS",
            ActionError::AlreadyRolled => "ALREADY_ROLLED",
            ActionError::MustRollFirst => "MUST_ROLL_FIRST",
            ActionError::StaleDiceValue => "STALE_DICE_VALUE",
            ActionError::InvalidToken => "INVALID_TOKEN",
            ActionError::IllegalMove => "ILLEGAL_MOVE",
            ActionError::MustMoveOnSix => "MUST_MOVE_ON_SIX",
            ActionError::RoomFull => "ROOM_FULL",
            ActionError::GameAlreadyStarted => "GAME_ALREADY_STARTED",
            ActionError::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            ActionError::TooManyPlayers => "TOO_MANY_PLAYERS",
            ActionError::MalformedInput => "MALFORMED_INPUT",
        }
    }
}

impl std::error::Error for ActionError {}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionError::NotYourTurn => write!(f, "It is another player's turn"),
            ActionError::GameNotInProgress => write!(f, "The game is not in progress"),
            ActionError::AlreadyRolled => write!(f, "The dice have already been rolled this turn"),
            ActionError::MustRollFirst => write!(f, "The dice have to be rolled first"),
            ActionError::StaleDiceValue => {
                write!(f, "The submitted dice value does not match the current roll")
            }
            ActionError::InvalidToken => write!(f, "The player has no token with that id"),
            ActionError::IllegalMove => write!(f, "That token cannot be moved with this roll"),
            ActionError::MustMoveOnSix => {
                write!(f, "A six with a legal move available must be played")
            }
            ActionError::RoomFull => write!(f, "The room is already full"),
            ActionError::GameAlreadyStarted => write!(f, "The game has already started"),
            ActionError::NotEnoughPlayers => write!(f, "At least two players are needed to start"),
            ActionError::TooManyPlayers => write!(f, "A room holds at most four players"),
            ActionError::MalformedInput => write!(f, "The request was malformed"),
        }
    }
}
