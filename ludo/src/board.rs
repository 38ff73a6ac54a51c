use crate::Color;

/// Number of squares on the shared circular track.
pub const BOARD_SIZE: i8 = 52;

/// Length of a color's private home column, counting the finish square.
pub const HOME_COLUMN_SIZE: i8 = 6;

/// Position of a token that has not left its base yet.
pub const BASE: i8 = -1;

/// First square of a home column. Home column squares are encoded as
/// `HOME_COLUMN_START..FINISHED`, relative to the owning color.
pub const HOME_COLUMN_START: i8 = BOARD_SIZE;

/// Position of a token that has reached the center.
pub const FINISHED: i8 = BOARD_SIZE + HOME_COLUMN_SIZE - 1;

/// Track squares on which a token can never be captured: the four entry
/// squares plus the four star squares.
pub const SAFE_ZONES: [i8; 8] = [0, 8, 13, 21, 26, 34, 39, 47];

/// The track square a color's tokens enter on when leaving the base.
pub const fn start_square(color: Color) -> i8 {
    match color {
        Color::Red => 0,
        Color::Green => 13,
        Color::Yellow => 26,
        Color::Blue => 39,
    }
}

/// The last track square of a color's lap. One step further leaves the
/// shared track and enters that color's home column.
pub const fn home_entry_square(color: Color) -> i8 {
    match color {
        Color::Red => 50,
        Color::Green => 11,
        Color::Yellow => 24,
        Color::Blue => 37,
    }
}

pub fn is_safe_zone(square: i8) -> bool {
    SAFE_ZONES.contains(&square)
}

pub fn is_track_square(position: i8) -> bool {
    (0..BOARD_SIZE).contains(&position)
}

pub fn is_home_column_square(position: i8) -> bool {
    (HOME_COLUMN_START..FINISHED).contains(&position)
}

/// How many track squares a token of `color` standing on `square` has
/// already travelled since entering.
pub fn distance_from_start(color: Color, square: i8) -> i8 {
    (square - start_square(color)).rem_euclid(BOARD_SIZE)
}

/// Track steps from a color's entry square to its home entry square.
pub fn lap_length(color: Color) -> i8 {
    (home_entry_square(color) - start_square(color)).rem_euclid(BOARD_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_COLORS: [Color; 4] = [Color::Red, Color::Green, Color::Yellow, Color::Blue];

    #[test]
    fn every_lap_has_the_same_length() {
        for color in ALL_COLORS {
            assert_eq!(lap_length(color), 50, "{:?}", color);
        }
    }

    #[test]
    fn entry_squares_are_safe() {
        for color in ALL_COLORS {
            assert!(is_safe_zone(start_square(color)), "{:?}", color);
        }
    }

    #[test]
    fn home_entry_squares_are_distinct_track_squares() {
        for color in ALL_COLORS {
            assert!(is_track_square(home_entry_square(color)));
        }
        for color in ALL_COLORS {
            for other in ALL_COLORS {
                if color != other {
                    assert_ne!(home_entry_square(color), home_entry_square(other));
                    assert_ne!(start_square(color), start_square(other));
                }
            }
        }
    }

    #[test]
    fn position_classification_is_exclusive() {
        for position in BASE..=FINISHED {
            let classes = [
                position == BASE,
                is_track_square(position),
                is_home_column_square(position),
                position == FINISHED,
            ];
            assert_eq!(classes.iter().filter(|&&c| c).count(), 1, "{}", position);
        }
    }
}
