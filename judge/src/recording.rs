use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use ludo::{Color, MoveDescriptor, TokenId};
use serde::{Deserialize, Serialize};

/// One entry of the append-only move history. Purely observational, the
/// engine never reads this back.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player_id: String,
    pub player_nickname: String,
    pub player_color: Color,
    pub token_id: TokenId,
    pub from_position: i8,
    pub to_position: i8,
    pub captured: bool,
    pub timestamp: DateTime<Utc>,
}

pub struct Recorder {
    num: usize,
    directory: PathBuf,
    requests: Vec<RequestToPlayer>,
    moves: Vec<MoveRecord>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            requests: Vec::new(),
            moves: Vec::new(),
        })
    }

    pub fn store_request(&mut self, player: &str, request: String, response: String) {
        self.requests.push(RequestToPlayer {
            player: String::from(player),
            request,
            response,
        });
    }

    pub fn store_move(&mut self, descriptor: &MoveDescriptor, nickname: &str, color: Color) {
        self.moves.push(MoveRecord {
            player_id: descriptor.player_id.clone(),
            player_nickname: String::from(nickname),
            player_color: color,
            token_id: descriptor.token_id,
            from_position: descriptor.from_position,
            to_position: descriptor.to_position,
            captured: descriptor.captured,
            timestamp: Utc::now(),
        });
    }

    // The requests are written as raw JSON instead of through serde, because
    // they are already JSON strings and serde would escape them.
    pub fn write_game_recording(&mut self) -> anyhow::Result<()> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(filepath)?);
        write!(writer, "{{\n\"requests\": [")?;
        let mut first = true;
        for req in std::mem::take(&mut self.requests).into_iter() {
            if !first {
                write!(writer, ",")?;
            } else {
                first = false;
            }
            write!(
                writer,
                "\n  {{\n    \"player\": \"{}\",\n    \"request\": {},\n    \"response\": {}\n  }}",
                req.player,
                req.request.trim_end(),
                req.response
            )?;
        }
        write!(writer, "\n],\n\"moves\": ")?;
        let moves = std::mem::take(&mut self.moves);
        serde_json::to_writer_pretty(&mut writer, &moves)?;
        write!(writer, "\n}}")?;
        self.num += 1;
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
pub struct RequestToPlayer {
    player: String,
    request: String,
    response: String,
}
