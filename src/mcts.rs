//! UCT tree search over position copies, evaluated by random playouts.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;

use crate::color::Color;
use crate::constants::{BOARD_AREA, EXPAND_VISITS, UCT_C};
use crate::coord::Coord;
use crate::playout::run_playout;
use crate::position::Position;

pub struct TreeNode<'a> {
    pub pos: Position<'a>,
    /// The move that produced this position; `INVALID` at the root.
    pub mv: Coord,
    pub visits: u32,
    /// Wins for the player who made `mv`.
    pub wins: f64,
    pub children: Vec<TreeNode<'a>>,
}

impl<'a> TreeNode<'a> {
    pub fn new(pos: &Position<'a>) -> TreeNode<'a> {
        TreeNode {
            pos: pos.clone(),
            mv: Coord::INVALID,
            visits: 0,
            wins: 0.0,
            children: Vec::new(),
        }
    }

    pub fn winrate(&self) -> f64 {
        if self.visits > 0 {
            self.wins / f64::from(self.visits)
        } else {
            0.0
        }
    }

    /// Adds one child per legal board move, plus a pass child, so the node
    /// is never left without successors.
    fn expand(&mut self) {
        debug_assert!(self.children.is_empty());
        for i in 0..BOARD_AREA {
            let c = Coord::from_index(i);
            if self.pos.is_move_legal(c) {
                let mut pos = self.pos.clone();
                pos.play_move(c, Color::Empty);
                self.children.push(TreeNode {
                    pos,
                    mv: c,
                    visits: 0,
                    wins: 0.0,
                    children: Vec::new(),
                });
            }
        }
        let mut pos = self.pos.clone();
        pos.play_move(Coord::PASS, Color::Empty);
        self.children.push(TreeNode {
            pos,
            mv: Coord::PASS,
            visits: 0,
            wins: 0.0,
            children: Vec::new(),
        });
    }

    /// UCB1 pick among the children. Unvisited children go first.
    fn select_child(&self) -> usize {
        let ln_parent = f64::from(self.visits.max(1)).ln();
        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (i, child) in self.children.iter().enumerate() {
            let score = if child.visits == 0 {
                f64::INFINITY
            } else {
                child.winrate() + UCT_C * (ln_parent / f64::from(child.visits)).sqrt()
            };
            if score > best_score {
                best_score = score;
                best = i;
            }
        }
        best
    }
}

/// One selection / playout / backup pass. Returns whether Black won.
fn run_readout(node: &mut TreeNode<'_>, rng: &mut SmallRng) -> bool {
    node.visits += 1;
    let black_won = if node.pos.is_game_over() {
        node.pos.calculate_score() > 0.0
    } else if node.children.is_empty() {
        if node.visits >= EXPAND_VISITS {
            node.expand();
        }
        let mut playout_pos = node.pos.clone();
        run_playout(&mut playout_pos, rng) > 0.0
    } else {
        let i = node.select_child();
        run_readout(&mut node.children[i], rng)
    };

    let mover = node.pos.to_play().other();
    if (mover == Color::Black) == black_won {
        node.wins += 1.0;
    }
    black_won
}

/// Runs `readouts` readouts from `root` and returns the most visited move.
/// With a report interval set, progress lines go to stderr at that cadence.
pub fn tree_search(
    root: &mut TreeNode<'_>,
    readouts: u32,
    report_interval: Option<Duration>,
    rng: &mut SmallRng,
) -> Coord {
    if root.children.is_empty() {
        root.expand();
    }
    let mut last_report = Instant::now();
    for i in 0..readouts {
        run_readout(root, rng);
        if let Some(interval) = report_interval {
            if last_report.elapsed() >= interval {
                last_report = Instant::now();
                let best = best_child(root);
                eprintln!(
                    "mg-search: readout {}/{} best {} winrate {:.3}",
                    i + 1,
                    readouts,
                    best.map_or(Coord::PASS, |c| c.mv),
                    best.map_or(0.0, TreeNode::winrate),
                );
            }
        }
    }
    best_child(root).map_or(Coord::PASS, |c| c.mv)
}

fn best_child<'b, 'a>(root: &'b TreeNode<'a>) -> Option<&'b TreeNode<'a>> {
    root.children.iter().max_by_key(|c| c.visits)
}
