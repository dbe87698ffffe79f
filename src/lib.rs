//! Tengen: a small Go engine built around an incrementally updated board
//! position.
//!
//! The heart of the crate is [`position::Position`], which keeps stones,
//! groups and liberty counts consistent across placements, merges and
//! captures without rescanning the board. Tree search copies the position at
//! every node, so the representation is compact and mutation is
//! allocation-free: flood fills run through a pair of epoch-tagged scratch
//! visitors that live outside the position and are shared by all copies.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and engine parameters
//! - [`color`] - Stone colors
//! - [`coord`] - Board coordinates and the neighbor table
//! - [`stone`] - Per-point board cells
//! - [`group`] - Group records and the group pool
//! - [`visitor`] - Reusable scratch structures for board traversals
//! - [`position`] - Core game logic (legality, captures, ko, scoring)
//! - [`playout`] - Random game simulation
//! - [`mcts`] - Monte Carlo Tree Search
//! - [`gtp`] - Go Text Protocol driver
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//!
//! use tengen::color::Color;
//! use tengen::coord::Coord;
//! use tengen::position::Position;
//! use tengen::visitor::{BoardVisitor, GroupVisitor};
//!
//! let bv = RefCell::new(BoardVisitor::new());
//! let gv = RefCell::new(GroupVisitor::new());
//!
//! let mut pos = Position::new(&bv, &gv, 7.5, Color::Black, 0);
//! let c = Coord::from_gtp("D4").unwrap();
//! assert!(pos.is_move_legal(c));
//! pos.play_move(c, Color::Empty);
//! assert_eq!(pos.to_play(), Color::White);
//! ```

pub mod color;
pub mod constants;
pub mod coord;
pub mod gtp;
pub mod group;
pub mod mcts;
pub mod playout;
pub mod position;
pub mod stone;
pub mod visitor;
