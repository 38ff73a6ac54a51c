use crate::{board, Color, Room, BOARD_SIZE};

fn color_letter(color: Color) -> char {
    match color {
        Color::Red => 'r',
        Color::Green => 'g',
        Color::Yellow => 'y',
        Color::Blue => 'b',
    }
}

/// Renders the shared track plus a per-seat summary, for logs.
///
/// Every track square shows `.` (empty), `*` (empty safe zone), the
/// owner's letter, or the uppercase letter for a stack of two or more.
pub fn visualize_room(room: &Room) -> String {
    let mut result = String::from("    ");
    for square in 0..BOARD_SIZE {
        let mut owner = None;
        let mut count = 0;
        for player in &room.players {
            for token in &player.tokens {
                if token.position == square {
                    owner = Some(player.color);
                    count += 1;
                }
            }
        }
        result.push(match owner {
            Some(color) if count >= 2 => color_letter(color).to_ascii_uppercase(),
            Some(color) => color_letter(color),
            None if board::is_safe_zone(square) => '*',
            None => '.',
        });
    }
    for player in &room.players {
        let in_base = player.tokens.iter().filter(|t| t.in_base()).count();
        let on_track = player.tokens.iter().filter(|t| t.on_track()).count();
        let in_home = player.tokens.iter().filter(|t| t.in_home_column()).count();
        let finished = player.tokens.iter().filter(|t| t.is_finished()).count();
        result += &format!(
            "\n{} {:12} base:{} track:{} home:{} done:{}",
            color_letter(player.color),
            player.nickname,
            in_base,
            on_track,
            in_home,
            finished
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{room, Room};

    #[test]
    fn track_row_has_one_cell_per_square() {
        let mut lobby = Room::new();
        lobby = room::join_room(&lobby, "p0", "ada", false).unwrap();
        lobby = room::join_room(&lobby, "p1", "bob", false).unwrap();
        let playing = room::start_game(&lobby).unwrap();
        let rendered = visualize_room(&playing);
        let track_row = rendered.lines().next().unwrap();
        assert_eq!(track_row.trim_start().len(), BOARD_SIZE as usize);
        assert_eq!(rendered.lines().count(), 1 + playing.players.len());
    }
}
