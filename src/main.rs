use std::cell::RefCell;

use anyhow::Result;
use clap::Parser;

use tengen::constants::{DEFAULT_KOMI, DEFAULT_READOUTS, N};
use tengen::gtp::GtpEngine;
use tengen::visitor::{BoardVisitor, GroupVisitor};

#[derive(Parser, Debug)]
#[command(author, version, about = "Go engine speaking GTP on stdin/stdout")]
struct Args {
    /// Readouts per genmove
    #[arg(long, default_value_t = DEFAULT_READOUTS)]
    readouts: u32,

    /// Komi added to White's score
    #[arg(long, default_value_t = DEFAULT_KOMI)]
    komi: f32,

    /// Seed for the search RNG (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug { "debug" } else { "info" };
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, level),
    );

    log::info!(
        "tengen starting: {N}x{N} board, {} readouts, komi {}",
        args.readouts,
        args.komi
    );

    let board_visitor = RefCell::new(BoardVisitor::new());
    let group_visitor = RefCell::new(GroupVisitor::new());
    let mut engine = GtpEngine::new(
        &board_visitor,
        &group_visitor,
        args.komi,
        args.readouts,
        args.seed,
    );
    engine.run()
}
