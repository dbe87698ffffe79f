//! Board coordinates and the static neighbor table.
//!
//! A [`Coord`] is a flat index into the `N * N` board, or one of the two
//! sentinels [`Coord::PASS`] and [`Coord::INVALID`]. GTP notation uses a
//! column letter (skipping `I`) and a row number counted from the bottom of
//! the board, so `A1` is the lower-left corner.

use std::fmt;
use std::sync::OnceLock;

use smallvec::SmallVec;

use crate::constants::{BOARD_AREA, N};

/// GTP column letters. `I` is skipped to avoid confusion with `J`.
pub const GTP_COLUMNS: &[u8] = b"ABCDEFGHJKLMNOPQRST";

/// A point on the board, a pass, or the invalid sentinel.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Coord(u16);

impl Coord {
    pub const PASS: Coord = Coord(BOARD_AREA as u16);
    pub const INVALID: Coord = Coord(u16::MAX);

    pub fn from_index(index: usize) -> Coord {
        debug_assert!(index < BOARD_AREA);
        Coord(index as u16)
    }

    /// Rows run top to bottom, so row 0 holds the points printed first.
    pub fn from_row_col(row: usize, col: usize) -> Coord {
        debug_assert!(row < N && col < N);
        Coord((row * N + col) as u16)
    }

    /// The flat index of an on-board coordinate.
    pub fn index(self) -> usize {
        debug_assert!(self.is_on_board());
        self.0 as usize
    }

    pub fn row(self) -> usize {
        self.index() / N
    }

    pub fn col(self) -> usize {
        self.index() % N
    }

    pub fn is_on_board(self) -> bool {
        (self.0 as usize) < BOARD_AREA
    }

    pub fn is_pass(self) -> bool {
        self == Coord::PASS
    }

    /// Parses GTP notation: "pass", or a column letter plus a row number.
    pub fn from_gtp(s: &str) -> Option<Coord> {
        if s.eq_ignore_ascii_case("pass") {
            return Some(Coord::PASS);
        }
        let mut chars = s.chars();
        let col_char = chars.next()?.to_ascii_uppercase();
        let col = GTP_COLUMNS[..N].iter().position(|&c| c as char == col_char)?;
        let row: usize = chars.as_str().parse().ok()?;
        if row == 0 || row > N {
            return None;
        }
        Some(Coord::from_row_col(N - row, col))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Coord::PASS {
            write!(f, "pass")
        } else if !self.is_on_board() {
            write!(f, "invalid")
        } else {
            write!(f, "{}{}", GTP_COLUMNS[self.col()] as char, N - self.row())
        }
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

static NEIGHBOR_TABLE: OnceLock<Vec<SmallVec<[Coord; 4]>>> = OnceLock::new();

/// The in-bounds orthogonal neighbors of `c`, at most four of them.
pub fn neighbors(c: Coord) -> &'static [Coord] {
    let table = NEIGHBOR_TABLE.get_or_init(build_neighbor_table);
    &table[c.index()]
}

fn build_neighbor_table() -> Vec<SmallVec<[Coord; 4]>> {
    let mut table = Vec::with_capacity(BOARD_AREA);
    for row in 0..N {
        for col in 0..N {
            let mut coords: SmallVec<[Coord; 4]> = SmallVec::new();
            if col > 0 {
                coords.push(Coord::from_row_col(row, col - 1));
            }
            if col < N - 1 {
                coords.push(Coord::from_row_col(row, col + 1));
            }
            if row > 0 {
                coords.push(Coord::from_row_col(row - 1, col));
            }
            if row < N - 1 {
                coords.push(Coord::from_row_col(row + 1, col));
            }
            table.push(coords);
        }
    }
    table
}
