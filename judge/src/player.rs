use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{ChildStdin, ChildStdout, Command, Stdio};

use ludo::{ChooseMoveResponse, Color, Okay, Request, TokenId};
use serde::Deserialize;
use tracing::trace;

use crate::recording::Recorder;

/// How one seat at the table is controlled.
#[derive(Clone, Debug, Deserialize)]
pub struct PlayerConfig {
    pub nick: String,
    /// Executable to spawn for this player. When absent, the judge plays
    /// the seat itself with the engine's greedy policy.
    #[serde(default)]
    pub command: Option<String>,
}

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

enum Backend {
    /// An external bot process, spoken to over its stdin/stdout.
    Process {
        stdin: ChildStdin,
        stdout: BufReader<ChildStdout>,
        // A re-usable buffer for IO.
        // Should always be empty before and after perform_request().
        buf: String,
    },
    /// The engine's own move policy, run in-process. This is the seat the
    /// room marks as a bot.
    Builtin { color: Option<Color> },
}

pub struct Player {
    pub name: String,
    backend: Backend,
}

impl Player {
    pub fn from_config(config: &PlayerConfig) -> anyhow::Result<Self> {
        let backend = match &config.command {
            Some(executable_path) => {
                let child_proc = Command::new(executable_path)
                    .stdin(Stdio::piped())
                    .stdout(Stdio::piped())
                    .spawn()?;
                Backend::Process {
                    stdin: child_proc
                        .stdin
                        .ok_or_else(|| anyhow::anyhow!("Could not access stdin"))?,
                    stdout: BufReader::new(
                        child_proc
                            .stdout
                            .ok_or_else(|| anyhow::anyhow!("Could not access stdout"))?,
                    ),
                    buf: String::new(),
                }
            }
            None => Backend::Builtin { color: None },
        };
        Ok(Self {
            name: config.nick.clone(),
            backend,
        })
    }

    /// Whether this seat is computer-controlled by the judge itself.
    pub fn is_builtin(&self) -> bool {
        matches!(self.backend, Backend::Builtin { .. })
    }

    pub fn new_game(
        &mut self,
        recorder: &mut Option<Recorder>,
        color: Color,
    ) -> anyhow::Result<()> {
        if let Backend::Builtin { color: assigned } = &mut self.backend {
            *assigned = Some(color);
            return Ok(());
        }
        let Okay() = self.perform_request(recorder, &Request::NewGame { color })?;
        Ok(())
    }

    pub fn choose_move(
        &mut self,
        recorder: &mut Option<Recorder>,
        players: &[ludo::Player],
        dice_value: u8,
    ) -> anyhow::Result<Option<TokenId>> {
        if let Backend::Builtin { color } = &self.backend {
            let color =
                color.ok_or_else(|| anyhow::anyhow!("Builtin seat was never given a color"))?;
            let me = players
                .iter()
                .find(|p| p.color == color)
                .ok_or_else(|| anyhow::anyhow!("No seat with color {:?} in the roster", color))?;
            return Ok(ludo::choose_move(players, me, dice_value));
        }
        let req = Request::ChooseMove {
            players: players.to_vec(),
            dice_value,
        };
        let ChooseMoveResponse(choice) = self.perform_request(recorder, &req)?;
        Ok(choice)
    }

    fn perform_request<T: serde::de::DeserializeOwned + std::fmt::Debug>(
        &mut self,
        recorder: &mut Option<Recorder>,
        req: &Request,
    ) -> anyhow::Result<T> {
        let Backend::Process { stdin, stdout, buf } = &mut self.backend else {
            anyhow::bail!("perform_request is only for process-backed players");
        };
        let mut req_json = serde_json::to_string(req)?;
        trace!(name: "Sending request", player = &self.name, request = %req_json);
        req_json.push('\n');
        stdin.write_all(req_json.as_bytes())?;
        stdin.flush()?;
        buf.clear();
        stdout.read_line(buf)?;
        let serialized_response = buf.trim_end();
        let response = serde_json::from_str::<T>(serialized_response)?;
        trace!(name: "Received response", player = &self.name, response = %serialized_response);

        if let Some(recorder) = recorder {
            recorder.store_request(&self.name, req_json, String::from(serialized_response));
        }
        Ok(response)
    }
}
