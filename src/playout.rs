//! Random game simulation for position evaluation.
//!
//! A playout plays uniformly random legal moves until two consecutive passes
//! or a hard length cap, then scores the final position. Moves that would
//! fill the mover's own single-point eye shape are skipped so playouts
//! terminate instead of destroying their own territory.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::color::Color;
use crate::constants::{BOARD_AREA, MAX_PLAYOUT_LEN};
use crate::coord::Coord;
use crate::position::Position;

/// Plays `pos` out with random moves and returns its area score from
/// Black's perspective.
pub fn run_playout(pos: &mut Position<'_>, rng: &mut SmallRng) -> f32 {
    let mut moves_played = 0;
    while !pos.is_game_over() && moves_played < MAX_PLAYOUT_LEN {
        match choose_random_move(pos, rng) {
            Some(c) => pos.play_move(c, Color::Empty),
            None => pos.play_move(Coord::PASS, Color::Empty),
        }
        moves_played += 1;
    }
    pos.calculate_score()
}

/// Picks a random legal move that does not fill the mover's own koish
/// point, or `None` when no such move exists.
pub fn choose_random_move(pos: &Position<'_>, rng: &mut SmallRng) -> Option<Coord> {
    let mut candidates: Vec<Coord> = Vec::with_capacity(BOARD_AREA);
    for i in 0..BOARD_AREA {
        let c = Coord::from_index(i);
        if pos.stones()[i].is_empty() && pos.is_koish(c) != pos.to_play() {
            candidates.push(c);
        }
    }

    // Draw candidates in random order until a legal one turns up; some may
    // be suicides or the ko point.
    let mut remaining = candidates.len();
    while remaining > 0 {
        let j = rng.gen_range(0..remaining);
        let c = candidates[j];
        if pos.is_move_legal(c) {
            return Some(c);
        }
        candidates.swap(j, remaining - 1);
        remaining -= 1;
    }
    None
}
