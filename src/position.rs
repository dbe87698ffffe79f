//! The board position and the rules of play.
//!
//! [`Position`] tracks the stones on the board and their groups, and carries
//! the logic for removing groups with no remaining liberties and merging
//! neighboring groups of the same color. Liberty counts are maintained
//! incrementally; the only full recount is the rare merge of two or more
//! groups by a single placement.
//!
//! Tree search copies the position at every expanded node, so the data
//! stays compact and mutation never allocates: flood fills run through a
//! pair of epoch-tagged visitors that live outside the position and are
//! shared by every copy bound to them. See [`crate::visitor`].

use std::cell::RefCell;
use std::fmt::Write as _;

use smallvec::SmallVec;

use crate::color::Color;
use crate::constants::{BOARD_AREA, N};
use crate::coord::{neighbors, Coord, GTP_COLUMNS};
use crate::group::{Group, GroupId, GroupPool};
use crate::stone::Stone;
use crate::visitor::{BoardVisitor, GroupVisitor};

const PRINT_WHITE: &str = "\x1b[0;31;47m";
const PRINT_BLACK: &str = "\x1b[0;31;40m";
const PRINT_EMPTY: &str = "\x1b[0;31;43m";
const PRINT_NORMAL: &str = "\x1b[0m";

/// Inserts `id` into a small set, returning true if it was not yet present.
fn insert_unique(set: &mut SmallVec<[GroupId; 4]>, id: GroupId) -> bool {
    if set.contains(&id) {
        false
    } else {
        set.push(id);
        true
    }
}

/// A single board position.
///
/// The position owns its stones, groups and scalar state and is freely
/// clonable; the two visitor handles are borrowed from the caller and shared
/// by all clones. Use [`Position::with_visitors`] to copy a position onto a
/// different visitor pair (for example, one owned by another worker thread).
#[derive(Clone)]
pub struct Position<'a> {
    stones: [Stone; BOARD_AREA],
    board_visitor: &'a RefCell<BoardVisitor>,
    group_visitor: &'a RefCell<GroupVisitor>,
    groups: GroupPool,
    to_play: Color,
    previous_move: Coord,
    ko: Coord,
    // Captures by (Black, White).
    num_captures: [u32; 2],
    n: u16,
    num_consecutive_passes: u8,
    komi: f32,
}

impl<'a> Position<'a> {
    /// An empty board with the given komi and player to move.
    pub fn new(
        board_visitor: &'a RefCell<BoardVisitor>,
        group_visitor: &'a RefCell<GroupVisitor>,
        komi: f32,
        to_play: Color,
        n: u16,
    ) -> Position<'a> {
        Position {
            stones: [Stone::EMPTY; BOARD_AREA],
            board_visitor,
            group_visitor,
            groups: GroupPool::new(),
            to_play,
            previous_move: Coord::INVALID,
            ko: Coord::INVALID,
            num_captures: [0, 0],
            n,
            num_consecutive_passes: 0,
            komi,
        }
    }

    /// Copies another position's state while binding the copy to a different
    /// visitor pair.
    pub fn with_visitors(
        board_visitor: &'a RefCell<BoardVisitor>,
        group_visitor: &'a RefCell<GroupVisitor>,
        other: &Position<'_>,
    ) -> Position<'a> {
        Position {
            stones: other.stones,
            board_visitor,
            group_visitor,
            groups: other.groups.clone(),
            to_play: other.to_play,
            previous_move: other.previous_move,
            ko: other.ko,
            num_captures: other.num_captures,
            n: other.n,
            num_consecutive_passes: other.num_consecutive_passes,
            komi: other.komi,
        }
    }

    pub fn to_play(&self) -> Color {
        self.to_play
    }

    pub fn previous_move(&self) -> Coord {
        self.previous_move
    }

    pub fn ko(&self) -> Coord {
        self.ko
    }

    pub fn stones(&self) -> &[Stone; BOARD_AREA] {
        &self.stones
    }

    pub fn n(&self) -> u16 {
        self.n
    }

    pub fn num_consecutive_passes(&self) -> u8 {
        self.num_consecutive_passes
    }

    pub fn num_captures(&self) -> &[u32; 2] {
        &self.num_captures
    }

    pub fn komi(&self) -> f32 {
        self.komi
    }

    pub fn set_komi(&mut self, komi: f32) {
        self.komi = komi;
    }

    pub fn is_game_over(&self) -> bool {
        self.num_consecutive_passes >= 2
    }

    /// The group record of the stone at `c`, if any.
    pub fn group_at(&self, c: Coord) -> Option<Group> {
        let s = self.stones[c.index()];
        if s.is_empty() {
            None
        } else {
            Some(self.groups[s.group_id()])
        }
    }

    /// True if playing at `c` is legal for the player to move.
    pub fn is_move_legal(&self, c: Coord) -> bool {
        if c == Coord::PASS {
            return true;
        }
        if !self.stones[c.index()].is_empty() {
            return false;
        }
        if c == self.ko {
            return false;
        }
        !self.is_move_suicidal(c, self.to_play)
    }

    /// True if a stone of `color` at `c` would end the move with no
    /// liberties: no empty neighbor, no opponent group reduced to zero
    /// liberties, and no friendly neighbor group that keeps a liberty.
    pub fn is_move_suicidal(&self, c: Coord, color: Color) -> bool {
        let other_color = color.other();
        for &nc in neighbors(c) {
            let s = self.stones[nc.index()];
            if s.is_empty() {
                // The point at nc stays a liberty after the placement.
                return false;
            }
            let num_liberties = self.groups[s.group_id()].num_liberties;
            if s.color() == other_color {
                if num_liberties == 1 {
                    // Captures the opponent group with a stone at nc.
                    return false;
                }
            } else if num_liberties > 1 {
                // Connects to a friendly group that keeps a liberty.
                return false;
            }
        }
        true
    }

    /// Returns the surrounding color if `c` is empty and boxed in on all
    /// four sides by stones of a single color, `Empty` otherwise. Edge and
    /// corner points have fewer than four neighbors and are never koish.
    pub fn is_koish(&self, c: Coord) -> Color {
        if !self.stones[c.index()].is_empty() {
            return Color::Empty;
        }
        let ns = neighbors(c);
        if ns.len() < 4 {
            return Color::Empty;
        }
        let mut ko_color = Color::Empty;
        for &nc in ns {
            let s = self.stones[nc.index()];
            if s.is_empty() {
                return Color::Empty;
            }
            if ko_color == Color::Empty {
                ko_color = s.color();
            } else if s.color() != ko_color {
                return Color::Empty;
            }
        }
        ko_color
    }

    /// Plays a move for `color`, or for the player to move when `color` is
    /// `Empty`. A non-empty `color` overrides the stored player to move
    /// before anything else, so legality is evaluated for the override.
    ///
    /// The move must be legal; callers check [`Position::is_move_legal`]
    /// first.
    pub fn play_move(&mut self, c: Coord, color: Color) {
        if c == Coord::PASS {
            self.pass_move();
            return;
        }

        let color = if color == Color::Empty {
            self.to_play
        } else {
            self.to_play = color;
            color
        };
        assert!(self.is_move_legal(c), "illegal move {c} for {color}");

        self.add_stone_to_board(c, color);

        self.n += 1;
        self.num_consecutive_passes = 0;
        self.to_play = self.to_play.other();
        self.previous_move = c;
    }

    fn pass_move(&mut self) {
        self.n += 1;
        self.num_consecutive_passes += 1;
        self.ko = Coord::INVALID;
        self.to_play = self.to_play.other();
        self.previous_move = Coord::PASS;
    }

    /// Places a stone of `color` at `c` without touching the move counters.
    ///
    /// Removes newly surrounded opponent groups, updates the liberty counts
    /// of the remaining groups and the capture totals, and sets the ko point
    /// when the move captured a single stone out of a koish square. Exposed
    /// so tests can lay out a board directly; see [`parse_board`].
    pub fn add_stone_to_board(&mut self, c: Coord, color: Color) {
        debug_assert!(color.is_stone());
        debug_assert!(self.stones[c.index()].is_empty());
        let potential_ko = self.is_koish(c);
        let opponent_color = color.other();

        // One walk over the neighbors collects everything the update needs:
        // the new stone's liberties, the distinct same-color groups it
        // touches, and the distinct opponent groups, whose liberty counts
        // drop by one the first time each is seen. Opponent groups that hit
        // zero are captured and removed below.
        let mut captured_groups: SmallVec<[(GroupId, Coord); 4]> = SmallVec::new();
        let mut liberties: SmallVec<[Coord; 4]> = SmallVec::new();
        let mut opponent_groups: SmallVec<[GroupId; 4]> = SmallVec::new();
        let mut neighbor_groups: SmallVec<[GroupId; 4]> = SmallVec::new();
        for &nc in neighbors(c) {
            let neighbor = self.stones[nc.index()];
            if neighbor.is_empty() {
                liberties.push(nc);
            } else if neighbor.color() == color {
                insert_unique(&mut neighbor_groups, neighbor.group_id());
            } else if insert_unique(&mut opponent_groups, neighbor.group_id()) {
                let opponent_group = &mut self.groups[neighbor.group_id()];
                opponent_group.num_liberties -= 1;
                if opponent_group.num_liberties == 0 {
                    captured_groups.push((neighbor.group_id(), nc));
                }
            }
        }

        // Place the new stone.
        if neighbor_groups.is_empty() {
            let group_id = self.groups.alloc(1, liberties.len() as u16);
            self.stones[c.index()] = Stone::new(color, group_id);
        } else {
            let group_id = neighbor_groups[0];
            if neighbor_groups.len() == 1 {
                // Extending a single group: the placement consumes one
                // liberty, and each empty neighbor not already adjacent to
                // the group becomes a new one. The new stone goes on the
                // board only after the adjacency checks so it cannot count
                // as its own neighbor.
                self.groups[group_id].size += 1;
                self.groups[group_id].num_liberties -= 1;
                for &lc in &liberties {
                    if !self.has_neighboring_group(lc, group_id) {
                        self.groups[group_id].num_liberties += 1;
                    }
                }
                self.stones[c.index()] = Stone::new(color, group_id);
            } else {
                // The stone joins several groups. Incrementally updating the
                // merged liberty count is hard, so recompute size and
                // liberties from scratch. The infrequent slow path.
                self.stones[c.index()] = Stone::new(color, group_id);
                self.merge_group(c);
                for &id in &neighbor_groups[1..] {
                    self.groups.free(id);
                }
            }
        }

        // A lone captured stone out of a koish square bans the immediate
        // recapture. Decided before removal frees the captured record.
        let ko = if captured_groups.len() == 1
            && self.groups[captured_groups[0].0].size == 1
            && potential_ko == opponent_color
        {
            captured_groups[0].1
        } else {
            Coord::INVALID
        };

        for &(group_id, seed) in &captured_groups {
            let num_captured_stones = self.groups[group_id].size;
            self.num_captures[color.player_index()] += u32::from(num_captured_stones);
            self.remove_group(seed);
        }

        self.ko = ko;
    }

    /// Removes the group with a stone at `c` from the board and frees its
    /// record. Each vacated point credits one liberty to every distinct
    /// enemy group adjacent to it.
    fn remove_group(&mut self, c: Coord) {
        let removed_color = self.stones[c.index()].color();
        let other_color = removed_color.other();
        let removed_group_id = self.stones[c.index()].group_id();

        self.group_visitor.borrow_mut().begin();
        let mut bv = self.board_visitor.borrow_mut();
        bv.begin();
        bv.visit(c);
        while !bv.done() {
            let p = bv.next();
            debug_assert_eq!(self.stones[p.index()].group_id(), removed_group_id);
            self.stones[p.index()] = Stone::EMPTY;

            // An enemy group touching this point on two sides still gains
            // only one liberty here, hence the per-point dedup.
            let mut credited: SmallVec<[GroupId; 4]> = SmallVec::new();
            for &nc in neighbors(p) {
                let ns = self.stones[nc.index()];
                if ns.is_empty() {
                    continue;
                }
                if ns.color() == other_color {
                    if insert_unique(&mut credited, ns.group_id()) {
                        self.groups[ns.group_id()].num_liberties += 1;
                    }
                } else {
                    bv.visit(nc);
                }
            }
        }
        drop(bv);
        self.groups.free(removed_group_id);
    }

    /// Merges the same-colored groups around the stone at `c` into that
    /// stone's group, recomputing the merged size and liberty count from
    /// scratch.
    fn merge_group(&mut self, c: Coord) {
        let s = self.stones[c.index()];
        let color = s.color();
        let opponent_color = color.other();
        let group_id = s.group_id();
        self.groups[group_id] = Group {
            size: 0,
            num_liberties: 0,
        };

        let mut bv = self.board_visitor.borrow_mut();
        bv.begin();
        bv.visit(c);
        while !bv.done() {
            let p = bv.next();
            let cell = self.stones[p.index()];
            if cell.is_empty() {
                // The visitor guarantees each empty point counts once even
                // when it borders several stones of the group.
                self.groups[group_id].num_liberties += 1;
            } else {
                debug_assert_eq!(cell.color(), color);
                self.groups[group_id].size += 1;
                self.stones[p.index()] = s;
                for &nc in neighbors(p) {
                    if self.stones[nc.index()].color() != opponent_color {
                        bv.visit(nc);
                    }
                }
            }
        }
    }

    /// True if any neighbor of `c` is a stone of the given group.
    fn has_neighboring_group(&self, c: Coord, group_id: GroupId) -> bool {
        neighbors(c).iter().any(|&nc| {
            let s = self.stones[nc.index()];
            !s.is_empty() && s.group_id() == group_id
        })
    }

    /// Tromp-Taylor area score from Black's perspective: Black points minus
    /// White points minus komi. Positive means Black leads. Every stone on
    /// the board is treated as alive.
    pub fn calculate_score(&self) -> f32 {
        let mut score: i32 = 0;

        let mut gv = self.group_visitor.borrow_mut();
        let mut bv = self.board_visitor.borrow_mut();
        gv.begin();
        bv.begin();
        for i in 0..BOARD_AREA {
            let c = Coord::from_index(i);
            let s = self.stones[i];
            if s.is_empty() {
                if bv.visit(c) {
                    // First sighting of this empty region: flood it,
                    // OR-folding the color codes of its boundary stones.
                    let mut num_visited = 0i32;
                    let mut found_bits = 0u8;
                    while !bv.done() {
                        let p = bv.next();
                        num_visited += 1;
                        for &nc in neighbors(p) {
                            let color = self.stones[nc.index()].color();
                            if color == Color::Empty {
                                bv.visit(nc);
                            } else {
                                found_bits |= color as u8;
                            }
                        }
                    }
                    match found_bits {
                        1 => score += num_visited,
                        2 => score -= num_visited,
                        // Mixed boundary, or an entirely empty board.
                        _ => {}
                    }
                }
            } else if gv.visit(s.group_id()) {
                let size = i32::from(self.groups[s.group_id()].size);
                if s.color() == Color::Black {
                    score += size;
                } else {
                    score -= size;
                }
            }
        }

        score as f32 - self.komi
    }

    /// One character per point: `X` Black, `O` White, `*` the ko point and
    /// `.` empty, with a newline after every row.
    pub fn to_simple_string(&self) -> String {
        let mut out = String::with_capacity(BOARD_AREA + N);
        for row in 0..N {
            for col in 0..N {
                let c = Coord::from_row_col(row, col);
                match self.stones[c.index()].color() {
                    Color::White => out.push('O'),
                    Color::Black => out.push('X'),
                    Color::Empty => out.push(if c == self.ko { '*' } else { '.' }),
                }
            }
            out.push('\n');
        }
        out
    }

    /// Group-id overlay: two hex digits per stone, colorized per color.
    pub fn to_group_string(&self) -> String {
        let mut out = String::new();
        for row in 0..N {
            for col in 0..N {
                let s = self.stones[Coord::from_row_col(row, col).index()];
                if s.is_empty() {
                    write!(out, "{PRINT_EMPTY}.  ").unwrap();
                } else {
                    let tint = if s.color() == Color::White {
                        PRINT_WHITE
                    } else {
                        PRINT_BLACK
                    };
                    write!(out, "{tint}{:02x} ", s.group_id()).unwrap();
                }
            }
            out.push('\n');
        }
        out.push_str(PRINT_NORMAL);
        out
    }

    /// Colorized board with row numbers and column letters on the borders.
    pub fn to_pretty_string(&self) -> String {
        let mut out = String::new();

        let format_cols = |out: &mut String| {
            out.push_str("   ");
            for col in 0..N {
                out.push(GTP_COLUMNS[col] as char);
                out.push(' ');
            }
            out.push('\n');
        };

        format_cols(&mut out);
        for row in 0..N {
            write!(out, "{:2} ", N - row).unwrap();
            for col in 0..N {
                let c = Coord::from_row_col(row, col);
                match self.stones[c.index()].color() {
                    Color::White => write!(out, "{PRINT_WHITE}O "),
                    Color::Black => write!(out, "{PRINT_BLACK}X "),
                    Color::Empty => {
                        write!(out, "{PRINT_EMPTY}{} ", if c == self.ko { '*' } else { '.' })
                    }
                }
                .unwrap();
            }
            writeln!(out, "{PRINT_NORMAL}{:2}", N - row).unwrap();
        }
        format_cols(&mut out);
        out
    }
}

/// Parses a drawn board: `X` is Black, `O` is White, anything else empty.
/// Lines are whitespace-trimmed and right-padded to `N` columns; missing
/// rows at the bottom are empty. Useful with
/// [`Position::add_stone_to_board`] for laying out test positions without
/// advancing the move counters.
pub fn parse_board(board_str: &str) -> [Color; BOARD_AREA] {
    let mut result = [Color::Empty; BOARD_AREA];
    let mut row = 0;
    for line in board_str.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        assert!(row < N, "board drawing has more than {N} rows");
        assert!(
            line.chars().count() <= N,
            "board row wider than {N}: {line:?}"
        );
        for (col, ch) in line.chars().enumerate() {
            result[Coord::from_row_col(row, col).index()] = match ch {
                'X' => Color::Black,
                'O' => Color::White,
                _ => Color::Empty,
            };
        }
        row += 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_KOMI;

    fn visitors() -> (RefCell<BoardVisitor>, RefCell<GroupVisitor>) {
        (
            RefCell::new(BoardVisitor::new()),
            RefCell::new(GroupVisitor::new()),
        )
    }

    fn setup<'a>(
        bv: &'a RefCell<BoardVisitor>,
        gv: &'a RefCell<GroupVisitor>,
        board: &str,
        to_play: Color,
    ) -> Position<'a> {
        let mut pos = Position::new(bv, gv, DEFAULT_KOMI, to_play, 0);
        for (i, &color) in parse_board(board).iter().enumerate() {
            if color != Color::Empty {
                pos.add_stone_to_board(Coord::from_index(i), color);
            }
        }
        pos
    }

    fn gtp(s: &str) -> Coord {
        Coord::from_gtp(s).unwrap()
    }

    #[test]
    fn empty_board() {
        let (bv, gv) = visitors();
        let pos = Position::new(&bv, &gv, DEFAULT_KOMI, Color::Black, 0);
        assert_eq!(pos.n(), 0);
        assert_eq!(pos.to_play(), Color::Black);
        assert_eq!(pos.previous_move(), Coord::INVALID);
        assert_eq!(pos.ko(), Coord::INVALID);
        assert!(!pos.is_game_over());
        assert!(pos.stones().iter().all(|s| s.is_empty()));
    }

    #[test]
    fn first_move_makes_a_group() {
        let (bv, gv) = visitors();
        let mut pos = Position::new(&bv, &gv, DEFAULT_KOMI, Color::Black, 0);
        let d4 = gtp("D4");
        assert!(pos.is_move_legal(d4));
        pos.play_move(d4, Color::Empty);

        assert_eq!(pos.n(), 1);
        assert_eq!(pos.previous_move(), d4);
        assert_eq!(pos.to_play(), Color::White);
        let group = pos.group_at(d4).unwrap();
        assert_eq!(group.size, 1);
        assert_eq!(group.num_liberties, 4);
    }

    #[test]
    fn corner_stone_has_two_liberties() {
        let (bv, gv) = visitors();
        let mut pos = Position::new(&bv, &gv, DEFAULT_KOMI, Color::Black, 0);
        pos.play_move(gtp("A1"), Color::Empty);
        assert_eq!(pos.group_at(gtp("A1")).unwrap().num_liberties, 2);
    }

    #[test]
    fn extending_a_group_updates_liberties() {
        let (bv, gv) = visitors();
        let mut pos = Position::new(&bv, &gv, DEFAULT_KOMI, Color::Black, 0);
        pos.add_stone_to_board(gtp("D4"), Color::Black);
        pos.add_stone_to_board(gtp("E4"), Color::Black);
        let group = pos.group_at(gtp("D4")).unwrap();
        assert_eq!(group.size, 2);
        // C4, D5, D3, E5, E3, F4.
        assert_eq!(group.num_liberties, 6);
        assert_eq!(pos.group_at(gtp("D4")), pos.group_at(gtp("E4")));
    }

    #[test]
    fn koish_requires_four_neighbors() {
        let (bv, gv) = visitors();
        // A1's two neighbors are both White, but edge points are never
        // koish; E5 is boxed in on all four sides.
        let pos = setup(
            &bv,
            &gv,
            "
            .........
            .........
            .........
            ....O....
            ...O.O...
            ....O....
            .........
            O........
            .O.......
            ",
            Color::Black,
        );
        assert_eq!(pos.is_koish(gtp("A1")), Color::Empty);
        assert_eq!(pos.is_koish(gtp("E5")), Color::White);
        assert_eq!(pos.is_koish(gtp("E4")), Color::Empty);
        // An occupied point is never koish.
        assert_eq!(pos.is_koish(gtp("E6")), Color::Empty);
    }

    #[test]
    fn suicide_in_corner() {
        let (bv, gv) = visitors();
        let pos = setup(
            &bv,
            &gv,
            "
            .........
            .........
            .........
            .........
            .........
            .........
            .........
            OO.......
            .O.......
            ",
            Color::Black,
        );
        // A1 is surrounded by a White group that keeps liberties elsewhere.
        assert!(pos.is_move_suicidal(gtp("A1"), Color::Black));
        assert!(!pos.is_move_legal(gtp("A1")));
        // The same point is fine for White.
        assert!(!pos.is_move_suicidal(gtp("A1"), Color::White));
    }

    #[test]
    fn capturing_move_is_not_suicide() {
        let (bv, gv) = visitors();
        let pos = setup(
            &bv,
            &gv,
            "
            .........
            .........
            .........
            .........
            .........
            .........
            XX.......
            OOX......
            .OX......
            ",
            Color::Black,
        );
        // The White group's last liberty is A1; Black captures there.
        assert_eq!(pos.group_at(gtp("A2")).unwrap().num_liberties, 1);
        assert!(!pos.is_move_suicidal(gtp("A1"), Color::Black));
        assert!(pos.is_move_legal(gtp("A1")));
    }

    #[test]
    fn play_move_color_override() {
        let (bv, gv) = visitors();
        let mut pos = Position::new(&bv, &gv, DEFAULT_KOMI, Color::Black, 0);
        // White plays out of turn; the override flips to_play before the
        // move executes, so the stone is White and Black is next.
        pos.play_move(gtp("E5"), Color::White);
        assert_eq!(pos.stones()[gtp("E5").index()].color(), Color::White);
        assert_eq!(pos.to_play(), Color::Black);
    }

    #[test]
    fn pass_flips_player_and_clears_ko() {
        let (bv, gv) = visitors();
        let mut pos = Position::new(&bv, &gv, DEFAULT_KOMI, Color::Black, 0);
        pos.play_move(Coord::PASS, Color::Empty);
        assert_eq!(pos.n(), 1);
        assert_eq!(pos.num_consecutive_passes(), 1);
        assert_eq!(pos.to_play(), Color::White);
        assert_eq!(pos.previous_move(), Coord::PASS);
    }

    #[test]
    fn simple_string_shows_ko() {
        let (bv, gv) = visitors();
        let mut pos = setup(
            &bv,
            &gv,
            "
            .........
            .........
            .........
            ....XO...
            ...XO.O..
            ....XO...
            ",
            Color::Black,
        );
        pos.play_move(gtp("F5"), Color::Empty);
        assert_eq!(pos.ko(), gtp("E5"));
        let s = pos.to_simple_string();
        let rows: Vec<&str> = s.lines().collect();
        assert_eq!(rows.len(), N);
        assert_eq!(rows[4], "...X*XO..");
    }

    #[test]
    fn group_string_mentions_ids() {
        let (bv, gv) = visitors();
        let mut pos = Position::new(&bv, &gv, DEFAULT_KOMI, Color::Black, 0);
        pos.play_move(gtp("D4"), Color::Empty);
        let s = pos.to_group_string();
        let id = pos.stones()[gtp("D4").index()].group_id();
        assert!(s.contains(&format!("{id:02x}")));
    }

    #[test]
    fn pretty_string_has_labels() {
        let (bv, gv) = visitors();
        let pos = Position::new(&bv, &gv, DEFAULT_KOMI, Color::Black, 0);
        let s = pos.to_pretty_string();
        assert!(s.contains("A B C D E F G H J"));
        assert!(s.contains(" 9 "));
        assert!(s.contains(" 1 "));
    }

    #[test]
    fn parse_board_pads_short_input() {
        let stones = parse_board(
            "
            X
            .O
            ",
        );
        assert_eq!(stones[Coord::from_row_col(0, 0).index()], Color::Black);
        assert_eq!(stones[Coord::from_row_col(1, 1).index()], Color::White);
        let placed = stones.iter().filter(|&&c| c != Color::Empty).count();
        assert_eq!(placed, 2);
    }

    #[test]
    fn rebinding_copy_preserves_state() {
        let (bv, gv) = visitors();
        let mut pos = Position::new(&bv, &gv, DEFAULT_KOMI, Color::Black, 0);
        pos.play_move(gtp("C3"), Color::Empty);
        pos.play_move(gtp("G7"), Color::Empty);

        let (bv2, gv2) = visitors();
        let copy = Position::with_visitors(&bv2, &gv2, &pos);
        assert_eq!(copy.to_simple_string(), pos.to_simple_string());
        assert_eq!(copy.n(), pos.n());
        assert_eq!(copy.to_play(), pos.to_play());
        assert_eq!(copy.calculate_score(), pos.calculate_score());
    }
}
