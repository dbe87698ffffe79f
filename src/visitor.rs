//! Epoch-tagged scratch structures for allocation-free board traversals.
//!
//! Both visitors mark things as visited by stamping them with the current
//! epoch instead of clearing a bitset between traversals; only when the epoch
//! counter wraps around do the tags get bulk-cleared. A position borrows one
//! of each and runs its flood fills through them, so traversals never touch
//! the heap.

use crate::constants::{BOARD_AREA, MAX_GROUPS};
use crate::coord::Coord;
use crate::group::GroupId;

/// Visits points on the board at most once per traversal, popping pending
/// points in LIFO order.
///
/// ```
/// use tengen::coord::{neighbors, Coord};
/// use tengen::visitor::BoardVisitor;
///
/// let mut bv = BoardVisitor::new();
/// bv.begin();
/// bv.visit(Coord::from_index(0));
/// let mut seen = 0;
/// while !bv.done() {
///     let c = bv.next();
///     seen += 1;
///     for &nc in neighbors(c) {
///         bv.visit(nc);
///     }
/// }
/// assert_eq!(seen, tengen::constants::BOARD_AREA);
/// ```
pub struct BoardVisitor {
    epoch: u8,
    visited: [u8; BOARD_AREA],
    stack: Vec<Coord>,
}

impl BoardVisitor {
    pub fn new() -> BoardVisitor {
        BoardVisitor {
            epoch: 0,
            visited: [0; BOARD_AREA],
            // Reserved up front; each point enters the stack at most once
            // per traversal, so pushes below never reallocate.
            stack: Vec::with_capacity(BOARD_AREA),
        }
    }

    /// Starts a new traversal. The previous traversal must have finished.
    pub fn begin(&mut self) {
        assert!(self.done(), "board visitor reentered mid-traversal");
        self.epoch = self.epoch.wrapping_add(1);
        if self.epoch == 0 {
            // Stale tags from the previous cycle could collide; clear them
            // and restart the epoch above the cleared value.
            self.visited = [0; BOARD_AREA];
            self.epoch = 1;
        }
    }

    /// True when there are no more points to visit.
    pub fn done(&self) -> bool {
        self.stack.is_empty()
    }

    /// Pops the most recently enqueued pending point.
    pub fn next(&mut self) -> Coord {
        self.stack.pop().expect("next() on a finished traversal")
    }

    /// Enqueues `c` and returns true if this is the first visit since
    /// `begin`; returns false otherwise.
    pub fn visit(&mut self, c: Coord) -> bool {
        let tag = &mut self.visited[c.index()];
        if *tag != self.epoch {
            *tag = self.epoch;
            self.stack.push(c);
            true
        } else {
            false
        }
    }
}

impl Default for BoardVisitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks which groups have been seen since the most recent `begin`. Unlike
/// [`BoardVisitor`] it keeps no pending queue.
pub struct GroupVisitor {
    epoch: u8,
    visited: [u8; MAX_GROUPS],
}

impl GroupVisitor {
    pub fn new() -> GroupVisitor {
        GroupVisitor {
            epoch: 0,
            visited: [0; MAX_GROUPS],
        }
    }

    pub fn begin(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        if self.epoch == 0 {
            self.visited = [0; MAX_GROUPS];
            self.epoch = 1;
        }
    }

    /// Returns true only on the first visit of `id` since `begin`.
    pub fn visit(&mut self, id: GroupId) -> bool {
        let tag = &mut self.visited[id as usize];
        if *tag != self.epoch {
            *tag = self.epoch;
            true
        } else {
            false
        }
    }
}

impl Default for GroupVisitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visits_each_point_once() {
        let mut bv = BoardVisitor::new();
        bv.begin();
        let c = Coord::from_index(17);
        assert!(bv.visit(c));
        assert!(!bv.visit(c));
        assert_eq!(bv.next(), c);
        // Popping does not allow re-visiting within the same traversal.
        assert!(!bv.visit(c));
        assert!(bv.done());
    }

    #[test]
    fn lifo_order() {
        let mut bv = BoardVisitor::new();
        bv.begin();
        bv.visit(Coord::from_index(1));
        bv.visit(Coord::from_index(2));
        bv.visit(Coord::from_index(3));
        assert_eq!(bv.next(), Coord::from_index(3));
        assert_eq!(bv.next(), Coord::from_index(2));
        assert_eq!(bv.next(), Coord::from_index(1));
        assert!(bv.done());
    }

    #[test]
    fn epoch_wraparound_preserves_visited_once() {
        let mut bv = BoardVisitor::new();
        let c = Coord::from_index(5);
        // Far more traversals than the u8 epoch can hold.
        for _ in 0..600 {
            bv.begin();
            assert!(bv.visit(c), "first visit of an epoch must succeed");
            assert!(!bv.visit(c));
            assert_eq!(bv.next(), c);
            assert!(bv.done());
        }
    }

    #[test]
    fn group_visitor_wraparound() {
        let mut gv = GroupVisitor::new();
        for _ in 0..600 {
            gv.begin();
            assert!(gv.visit(3));
            assert!(!gv.visit(3));
            assert!(gv.visit(7));
        }
    }

    #[test]
    #[should_panic(expected = "reentered")]
    fn begin_mid_traversal_panics() {
        let mut bv = BoardVisitor::new();
        bv.begin();
        bv.visit(Coord::from_index(0));
        bv.begin();
    }
}
