//! Go Text Protocol (GTP) driver.
//!
//! A line-oriented command loop over stdin/stdout: each request is a command
//! word with optional arguments and an optional numeric id, each response is
//! `=` (success) or `?` (failure) plus a message and a blank line. The
//! driver validates every move before touching the position, so the core's
//! legality preconditions always hold.
//!
//! Beyond the standard administrative commands, the engine understands
//! `readouts N` (search effort per `genmove`), `report_search_interval MS`
//! (periodic progress lines on stderr during search) and
//! `gamestate`/`mg_gamestate`, which emits a JSON status report on the
//! stderr side channel for GUI frontends.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Result;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::color::Color;
use crate::constants::N;
use crate::coord::Coord;
use crate::mcts::{tree_search, TreeNode};
use crate::position::Position;
use crate::visitor::{BoardVisitor, GroupVisitor};

const ENGINE_NAME: &str = "tengen";

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "echo",
    "final_score",
    "gamestate",
    "genmove",
    "info",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "readouts",
    "report_search_interval",
    "version",
];

/// Status report serialized to stderr for GUI frontends.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GameStateReport {
    board: String,
    to_play: String,
    last_move: String,
    n: u16,
    ko: Option<String>,
    captures: [u32; 2],
    game_over: bool,
}

/// GTP engine state: the current game plus search settings.
pub struct GtpEngine<'a> {
    board_visitor: &'a RefCell<BoardVisitor>,
    group_visitor: &'a RefCell<GroupVisitor>,
    pos: Position<'a>,
    readouts: u32,
    report_interval: Option<Duration>,
    rng: SmallRng,
}

impl<'a> GtpEngine<'a> {
    /// Creates an engine bound to the given visitor pair. `seed` pins the
    /// search RNG for reproducible games.
    pub fn new(
        board_visitor: &'a RefCell<BoardVisitor>,
        group_visitor: &'a RefCell<GroupVisitor>,
        komi: f32,
        readouts: u32,
        seed: Option<u64>,
    ) -> GtpEngine<'a> {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        GtpEngine {
            board_visitor,
            group_visitor,
            pos: Position::new(board_visitor, group_visitor, komi, Color::Black, 0),
            readouts,
            report_interval: None,
            rng,
        }
    }

    /// Runs the command loop until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];
            log::debug!("gtp <- {command} {args:?}");

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(stdout, "{prefix}{id_str} {message}\n")?;
            stdout.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parses an optional numeric command id from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Executes a command and returns (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, ENGINE_NAME.to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "info" => (
                true,
                format!(
                    "{ENGINE_NAME} {} board={N}x{N} readouts={} komi={}",
                    env!("CARGO_PKG_VERSION"),
                    self.readouts,
                    self.pos.komi(),
                ),
            ),

            "echo" => (true, args.join(" ")),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                match args[0].parse::<usize>() {
                    Ok(size) if size == N => (true, String::new()),
                    Ok(size) => (
                        false,
                        format!("unacceptable size, only {N} is supported (got {size})"),
                    ),
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                let komi = self.pos.komi();
                self.pos = Position::new(
                    self.board_visitor,
                    self.group_visitor,
                    komi,
                    Color::Black,
                    0,
                );
                (true, String::new())
            }

            "komi" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                match args[0].parse::<f32>() {
                    Ok(komi) => {
                        self.pos.set_komi(komi);
                        (true, String::new())
                    }
                    Err(_) => (false, "invalid komi".to_string()),
                }
            }

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let color = match Color::from_gtp(args[0]) {
                    Some(color) => color,
                    None => return (false, "invalid color".to_string()),
                };
                let c = match Coord::from_gtp(args[1]) {
                    Some(c) => c,
                    None => return (false, "invalid coordinate".to_string()),
                };
                if color != self.pos.to_play() {
                    return (false, "out of turn".to_string());
                }
                if !self.pos.is_move_legal(c) {
                    return (false, "illegal move".to_string());
                }
                self.pos.play_move(c, color);
                (true, String::new())
            }

            "genmove" => {
                if let Some(&arg) = args.first() {
                    match Color::from_gtp(arg) {
                        Some(color) if color == self.pos.to_play() => {}
                        Some(_) => return (false, "out of turn".to_string()),
                        None => return (false, "invalid color".to_string()),
                    }
                }
                let mut root = TreeNode::new(&self.pos);
                let c = tree_search(
                    &mut root,
                    self.readouts,
                    self.report_interval,
                    &mut self.rng,
                );
                self.pos.play_move(c, Color::Empty);
                (true, c.to_string())
            }

            "final_score" => {
                let score = self.pos.calculate_score();
                let result = if score > 0.0 {
                    format!("B+{score:.1}")
                } else if score < 0.0 {
                    format!("W+{:.1}", -score)
                } else {
                    "0".to_string()
                };
                (true, result)
            }

            "readouts" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                match args[0].parse::<u32>() {
                    Ok(readouts) if readouts > 0 => {
                        self.readouts = readouts;
                        (true, String::new())
                    }
                    _ => (false, "invalid readouts".to_string()),
                }
            }

            "report_search_interval" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                match args[0].parse::<u64>() {
                    Ok(0) => {
                        self.report_interval = None;
                        (true, String::new())
                    }
                    Ok(millis) => {
                        self.report_interval = Some(Duration::from_millis(millis));
                        (true, String::new())
                    }
                    Err(_) => (false, "invalid interval".to_string()),
                }
            }

            "gamestate" | "mg_gamestate" => {
                self.emit_gamestate();
                (true, String::new())
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// Writes the current game state as JSON to the stderr side channel.
    fn emit_gamestate(&self) {
        let ko = self.pos.ko();
        let report = GameStateReport {
            board: self.pos.to_simple_string(),
            to_play: self.pos.to_play().to_string(),
            last_move: self.pos.previous_move().to_string(),
            n: self.pos.n(),
            ko: if ko == Coord::INVALID {
                None
            } else {
                Some(ko.to_string())
            },
            captures: *self.pos.num_captures(),
            game_over: self.pos.is_game_over(),
        };
        match serde_json::to_string(&report) {
            Ok(json) => eprintln!("mg-gamestate:{json}"),
            Err(err) => log::error!("failed to serialize gamestate: {err}"),
        }
    }
}
