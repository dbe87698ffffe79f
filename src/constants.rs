/// Board edge length.
pub const N: usize = 9;
/// Number of points on the board.
pub const BOARD_AREA: usize = N * N;
/// Capacity of the group pool. One group per stone is the worst case.
pub const MAX_GROUPS: usize = BOARD_AREA;

pub const DEFAULT_KOMI: f32 = 7.5;

/// Hard cap on playout length, in half-moves.
pub const MAX_PLAYOUT_LEN: usize = 2 * BOARD_AREA;

pub const DEFAULT_READOUTS: u32 = 100;
/// Leaf visits before a tree node is expanded.
pub const EXPAND_VISITS: u32 = 8;
/// UCB1 exploration constant.
pub const UCT_C: f64 = 1.4;
