use crate::{Color, Player, Token, TokenId, BASE, FINISHED, TOKENS_PER_PLAYER};

/// A random 2–4 player roster plus a dice value, for property tests.
///
/// Token positions are drawn from the whole encoding domain, so the
/// properties also have to hold for rosters a real game would never
/// reach (overlapping stacks, every token finished, ...).
#[derive(Clone, Debug)]
pub struct RosterInput {
    pub players: Vec<Player>,
    pub dice_value: u8,
}

impl quickcheck::Arbitrary for RosterInput {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let num_players = 2 + usize::arbitrary(g) % 3;
        let players = (0..num_players)
            .map(|idx| {
                let tokens = (0..TOKENS_PER_PLAYER)
                    .map(|id| Token {
                        id: id as TokenId,
                        position: *g
                            .choose(&Vec::from_iter(BASE..=FINISHED))
                            .expect("position range is nonempty"),
                    })
                    .collect();
                Player {
                    id: format!("p{idx}"),
                    nickname: format!("player {idx}"),
                    color: crate::COLOR_ROTATION[idx],
                    tokens,
                    is_bot: false,
                }
            })
            .collect();
        RosterInput {
            players,
            dice_value: 1 + u8::arbitrary(g) % 6,
        }
    }
}

impl quickcheck::Arbitrary for Color {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[Color::Red, Color::Green, Color::Yellow, Color::Blue])
            .expect("color list is nonempty")
    }
}
