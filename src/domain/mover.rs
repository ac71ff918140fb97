/// Mover: per-entity grid movement with sub-cell progress.
///
/// A mover occupies a cell and, while a direction is set, accumulates a
/// progress fraction toward the next cell. The cell advances exactly when
/// progress crosses 1.0; overflow carries into the new traversal, so speed
/// is preserved across cell boundaries.
///
/// Direction changes only take effect at a cell boundary (progress == 0)
/// and only into a corridor cell. A request that cannot be applied is kept
/// in `queued` until it becomes legal; it is never dropped and never
/// force-applied into a wall.

use super::grid::GridMap;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Dir {
    Left,
    Right,
    Up,
    Down,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Left, Dir::Right, Dir::Up, Dir::Down];

    /// Unit step in (col, row) space. Row grows downward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Mover {
    pub col: i32,
    pub row: i32,
    /// Traversal fraction toward the next cell, always in [0, 1).
    pub progress: f32,
    /// Current travel direction; `None` = idle.
    pub dir: Option<Dir>,
    /// Pending direction change, applied at the next legal boundary.
    pub queued: Option<Dir>,
}

impl Mover {
    pub fn new(col: i32, row: i32) -> Self {
        Mover { col, row, progress: 0.0, dir: None, queued: None }
    }

    /// Exactly at a cell boundary: the only moment direction may change.
    pub fn at_boundary(&self) -> bool {
        self.progress == 0.0
    }

    /// Request a direction change. Applied immediately when the mover sits
    /// at a boundary and the target is a corridor; otherwise queued.
    pub fn request_dir(&mut self, grid: &GridMap, dir: Dir) {
        if self.at_boundary() && grid.target_cell(self.col, self.row, dir).is_some() {
            self.dir = Some(dir);
            self.queued = None;
        } else {
            self.queued = Some(dir);
        }
    }

    /// Retry the queued direction. Call once per tick; a no-op unless the
    /// mover is at a boundary and the queued target is a corridor.
    pub fn apply_queued(&mut self, grid: &GridMap) {
        if !self.at_boundary() {
            return;
        }
        if let Some(dir) = self.queued {
            if grid.target_cell(self.col, self.row, dir).is_some() {
                self.dir = Some(dir);
                self.queued = None;
            }
        }
    }

    /// Advance one tick. `speed_frac` is speed divided by cell size, i.e.
    /// the fraction of one cell covered per tick.
    ///
    /// Committing into a wall stops the mover exactly at the boundary:
    /// direction clears and progress resets to 0.
    pub fn advance(&mut self, grid: &GridMap, speed_frac: f32) {
        let Some(dir) = self.dir else { return };
        self.progress += speed_frac;
        while self.progress >= 1.0 {
            match grid.target_cell(self.col, self.row, dir) {
                Some((col, row)) => {
                    self.col = col;
                    self.row = row;
                    self.progress -= 1.0;
                }
                None => {
                    self.dir = None;
                    self.progress = 0.0;
                    return;
                }
            }
        }
    }

    /// Teleport to a cell and drop all movement state (respawn / reset).
    pub fn reset_to(&mut self, col: i32, row: i32) {
        self.col = col;
        self.row = row;
        self.progress = 0.0;
        self.dir = None;
        self.queued = None;
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::GridMap;
    use proptest::prelude::*;

    fn corridor5() -> GridMap {
        // Single open row: both edges are corridor, so it is a tunnel row.
        GridMap::parse(&["....."]).unwrap()
    }

    fn cross() -> GridMap {
        GridMap::parse(&[
            "#####",
            "##.##",
            "#...#",
            "##.##",
            "#####",
        ])
        .unwrap()
    }

    #[test]
    fn idle_mover_does_not_move() {
        let g = corridor5();
        let mut m = Mover::new(2, 0);
        m.advance(&g, 1.0);
        assert_eq!((m.col, m.row, m.progress), (2, 0, 0.0));
    }

    #[test]
    fn one_cell_per_tick_at_full_speed() {
        // Width-5 corridor, speed equal to one cell per tick.
        let g = corridor5();
        let mut m = Mover::new(0, 0);
        m.request_dir(&g, Dir::Right);
        m.advance(&g, 1.0);
        assert_eq!((m.col, m.row), (1, 0));
        assert_eq!(m.progress, 0.0);
    }

    #[test]
    fn wraps_past_the_right_edge() {
        let g = corridor5();
        let mut m = Mover::new(4, 0);
        m.request_dir(&g, Dir::Right);
        m.advance(&g, 1.0);
        assert_eq!((m.col, m.row), (0, 0));
        assert_eq!(m.dir, Some(Dir::Right));
    }

    #[test]
    fn wraps_past_the_left_edge() {
        let g = corridor5();
        let mut m = Mover::new(0, 0);
        m.request_dir(&g, Dir::Left);
        m.advance(&g, 1.0);
        assert_eq!((m.col, m.row), (4, 0));
        assert_eq!(m.dir, Some(Dir::Left));
    }

    #[test]
    fn overflow_carries_across_the_boundary() {
        let g = corridor5();
        let mut m = Mover::new(0, 0);
        m.request_dir(&g, Dir::Right);
        m.advance(&g, 0.6);
        assert_eq!((m.col, m.row), (0, 0));
        m.advance(&g, 0.6);
        assert_eq!((m.col, m.row), (1, 0));
        assert!((m.progress - 0.2).abs() < 1e-5);
    }

    #[test]
    fn wall_hit_stops_exactly_at_the_boundary() {
        let g = cross();
        let mut m = Mover::new(2, 2);
        m.request_dir(&g, Dir::Right);
        m.advance(&g, 1.0); // into (3,2), the last corridor cell
        m.advance(&g, 1.0); // next target is wall
        assert_eq!((m.col, m.row), (3, 2));
        assert_eq!(m.dir, None);
        assert_eq!(m.progress, 0.0);
    }

    #[test]
    fn request_into_wall_is_queued_not_applied() {
        let g = cross();
        let mut m = Mover::new(1, 2);
        m.request_dir(&g, Dir::Up); // wall above (1,2)
        assert_eq!(m.dir, None);
        assert_eq!(m.queued, Some(Dir::Up));
    }

    #[test]
    fn queued_dir_applies_at_the_next_legal_boundary() {
        let g = cross();
        let mut m = Mover::new(1, 2);
        m.request_dir(&g, Dir::Right);
        m.advance(&g, 0.5);
        m.request_dir(&g, Dir::Up); // mid-traversal: queued
        assert_eq!(m.dir, Some(Dir::Right));
        m.advance(&g, 0.5); // lands on (2,2), the junction
        m.apply_queued(&g);
        assert_eq!(m.dir, Some(Dir::Up));
        assert_eq!(m.queued, None);
    }

    #[test]
    fn queued_dir_stays_queued_while_illegal() {
        let g = cross();
        let mut m = Mover::new(1, 2);
        m.request_dir(&g, Dir::Up);
        m.apply_queued(&g);
        assert_eq!(m.dir, None);
        assert_eq!(m.queued, Some(Dir::Up));
    }

    #[test]
    fn reset_drops_all_movement_state() {
        let g = corridor5();
        let mut m = Mover::new(0, 0);
        m.request_dir(&g, Dir::Right);
        m.advance(&g, 0.4);
        m.queued = Some(Dir::Left);
        m.reset_to(2, 0);
        assert_eq!((m.col, m.row, m.progress), (2, 0, 0.0));
        assert_eq!(m.dir, None);
        assert_eq!(m.queued, None);
    }

    proptest! {
        /// Progress stays in [0, 1) across arbitrary speeds and tick counts.
        #[test]
        fn progress_is_always_a_fraction(
            speed in 0.01f32..1.0,
            ticks in 1usize..200,
        ) {
            let g = corridor5();
            let mut m = Mover::new(0, 0);
            m.request_dir(&g, Dir::Right);
            for _ in 0..ticks {
                m.advance(&g, speed);
                prop_assert!(m.progress >= 0.0);
                prop_assert!(m.progress < 1.0);
            }
        }

        /// Tunnel wrap preserves row and direction whichever way it exits.
        #[test]
        fn wrap_preserves_row_and_direction(start in 0i32..5, left in proptest::bool::ANY) {
            let g = corridor5();
            let dir = if left { Dir::Left } else { Dir::Right };
            let mut m = Mover::new(start, 0);
            m.request_dir(&g, dir);
            for _ in 0..7 {
                m.advance(&g, 1.0);
                prop_assert_eq!(m.row, 0);
                prop_assert_eq!(m.dir, Some(dir));
                prop_assert!((0..5).contains(&m.col));
            }
        }
    }
}
