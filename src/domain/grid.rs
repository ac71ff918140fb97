/// Grid map: the immutable maze layout plus the consumable dot layer.
///
/// Cells are addressed by (col, row) with signed coordinates so movers can
/// probe one step past an edge. Out-of-range queries resolve to Wall, with
/// one exception: horizontal overshoot in a *tunnel row* wraps the column
/// to the opposite edge instead.
///
/// A tunnel row is detected at parse time: a row whose leftmost and
/// rightmost cells are both corridor.
///
/// ## Map legend
///   '#' = wall        '.' or ' ' = corridor
///
/// Every corridor cell starts with a dot. Dots only ever transition
/// present → gone; consuming twice is a no-op.

use std::fmt;

use super::mover::Dir;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CellKind {
    Wall,
    Corridor,
}

impl CellKind {
    pub fn is_corridor(self) -> bool {
        matches!(self, CellKind::Corridor)
    }

    pub fn is_wall(self) -> bool {
        matches!(self, CellKind::Wall)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GridError {
    EmptyMap,
    RaggedRow { row: usize, len: usize, expected: usize },
    UnknownGlyph { row: usize, col: usize, glyph: char },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::EmptyMap => write!(f, "map has no cells"),
            GridError::RaggedRow { row, len, expected } => {
                write!(f, "row {row} has {len} cells, expected {expected}")
            }
            GridError::UnknownGlyph { row, col, glyph } => {
                write!(f, "unknown glyph {glyph:?} at col {col}, row {row}")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[derive(Clone, Debug)]
pub struct GridMap {
    cells: Vec<Vec<CellKind>>,
    dots: Vec<Vec<bool>>,
    width: i32,
    height: i32,
    tunnel_rows: Vec<i32>,
}

impl GridMap {
    /// Build a grid from a text diagram. All rows must have equal width.
    pub fn parse(rows: &[&str]) -> Result<GridMap, GridError> {
        if rows.is_empty() {
            return Err(GridError::EmptyMap);
        }
        let expected = rows[0].chars().count();
        if expected == 0 {
            return Err(GridError::EmptyMap);
        }

        let mut cells: Vec<Vec<CellKind>> = Vec::with_capacity(rows.len());
        for (y, raw) in rows.iter().enumerate() {
            let mut row = Vec::with_capacity(expected);
            for (x, ch) in raw.chars().enumerate() {
                row.push(match ch {
                    '#' => CellKind::Wall,
                    '.' | ' ' => CellKind::Corridor,
                    glyph => return Err(GridError::UnknownGlyph { row: y, col: x, glyph }),
                });
            }
            if row.len() != expected {
                return Err(GridError::RaggedRow { row: y, len: row.len(), expected });
            }
            cells.push(row);
        }

        let dots = cells
            .iter()
            .map(|row| row.iter().map(|c| c.is_corridor()).collect())
            .collect();
        let tunnel_rows = cells
            .iter()
            .enumerate()
            .filter(|(_, row)| row[0].is_corridor() && row[expected - 1].is_corridor())
            .map(|(y, _)| y as i32)
            .collect();

        Ok(GridMap {
            width: expected as i32,
            height: cells.len() as i32,
            cells,
            dots,
            tunnel_rows,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tunnel_rows(&self) -> &[i32] {
        &self.tunnel_rows
    }

    pub fn is_tunnel_row(&self, row: i32) -> bool {
        self.tunnel_rows.contains(&row)
    }

    /// Wrap a column into [0, width).
    pub fn wrap_col(&self, col: i32) -> i32 {
        col.rem_euclid(self.width)
    }

    /// Bounds-checked cell query. Out of range is Wall, except horizontal
    /// overshoot in a tunnel row, which wraps.
    pub fn cell_kind(&self, col: i32, row: i32) -> CellKind {
        if row < 0 || row >= self.height {
            return CellKind::Wall;
        }
        let col = if self.is_tunnel_row(row) { self.wrap_col(col) } else { col };
        if col < 0 || col >= self.width {
            return CellKind::Wall;
        }
        self.cells[row as usize][col as usize]
    }

    pub fn is_corridor(&self, col: i32, row: i32) -> bool {
        self.cell_kind(col, row).is_corridor()
    }

    /// One step from (col, row) in `dir`: the cell a mover would commit to.
    /// `None` means blocked (wall, or off the map outside a tunnel row).
    pub fn target_cell(&self, col: i32, row: i32, dir: Dir) -> Option<(i32, i32)> {
        let (dc, dr) = dir.delta();
        let (nc, nr) = (col + dc, row + dr);
        if self.cell_kind(nc, nr).is_corridor() {
            let nc = if self.is_tunnel_row(nr) { self.wrap_col(nc) } else { nc };
            Some((nc, nr))
        } else {
            None
        }
    }

    // ── Dot layer ──

    pub fn has_dot(&self, col: i32, row: i32) -> bool {
        if col < 0 || row < 0 || col >= self.width || row >= self.height {
            return false;
        }
        self.dots[row as usize][col as usize]
    }

    /// Clear the dot at (col, row). Idempotent: true only on the first call.
    pub fn consume_dot(&mut self, col: i32, row: i32) -> bool {
        if col < 0 || row < 0 || col >= self.width || row >= self.height {
            return false;
        }
        let dot = &mut self.dots[row as usize][col as usize];
        let had = *dot;
        *dot = false;
        had
    }

    pub fn dots_remaining(&self) -> usize {
        self.dots
            .iter()
            .map(|row| row.iter().filter(|d| **d).count())
            .sum()
    }

    /// Restore every corridor cell's dot (full reset).
    pub fn reset_dots(&mut self) {
        for (dots, cells) in self.dots.iter_mut().zip(&self.cells) {
            for (d, c) in dots.iter_mut().zip(cells) {
                *d = c.is_corridor();
            }
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mover::Dir;

    fn grid(rows: &[&str]) -> GridMap {
        GridMap::parse(rows).expect("test grid should parse")
    }

    #[test]
    fn parse_rejects_empty_map() {
        assert!(matches!(GridMap::parse(&[]), Err(GridError::EmptyMap)));
        assert!(matches!(GridMap::parse(&[""]), Err(GridError::EmptyMap)));
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = GridMap::parse(&["###", "##"]).unwrap_err();
        assert_eq!(err, GridError::RaggedRow { row: 1, len: 2, expected: 3 });
    }

    #[test]
    fn parse_rejects_unknown_glyph() {
        let err = GridMap::parse(&["#X#"]).unwrap_err();
        assert_eq!(err, GridError::UnknownGlyph { row: 0, col: 1, glyph: 'X' });
    }

    #[test]
    fn out_of_bounds_is_wall() {
        let g = grid(&["###", "#.#", "###"]);
        assert!(g.cell_kind(-1, 1).is_wall());
        assert!(g.cell_kind(3, 1).is_wall());
        assert!(g.cell_kind(1, -1).is_wall());
        assert!(g.cell_kind(1, 3).is_wall());
        assert!(g.cell_kind(1, 1).is_corridor());
    }

    #[test]
    fn tunnel_rows_detected_from_open_edges() {
        let g = grid(&[
            "#####",
            ".....",
            "#####",
            ".....",
            "#####",
        ]);
        assert_eq!(g.tunnel_rows(), &[1, 3]);
        assert!(!g.is_tunnel_row(0));
    }

    #[test]
    fn tunnel_row_wraps_horizontal_overshoot() {
        let g = grid(&["#####", ".....", "#####"]);
        assert!(g.cell_kind(-1, 1).is_corridor()); // wraps to col 4
        assert!(g.cell_kind(5, 1).is_corridor()); // wraps to col 0
        assert!(g.cell_kind(-1, 0).is_wall()); // non-tunnel row stays wall
    }

    #[test]
    fn target_cell_blocked_by_wall_and_edge() {
        let g = grid(&["###", "#.#", "###"]);
        assert_eq!(g.target_cell(1, 1, Dir::Left), None);
        assert_eq!(g.target_cell(1, 1, Dir::Up), None);
        assert_eq!(g.target_cell(1, 1, Dir::Down), None);
        assert_eq!(g.target_cell(1, 1, Dir::Right), None);
    }

    #[test]
    fn target_cell_wraps_in_tunnel_row() {
        let g = grid(&["#####", ".....", "#####"]);
        assert_eq!(g.target_cell(0, 1, Dir::Left), Some((4, 1)));
        assert_eq!(g.target_cell(4, 1, Dir::Right), Some((0, 1)));
    }

    #[test]
    fn every_corridor_cell_starts_with_a_dot() {
        let g = grid(&["#.#", "...", "#.#"]);
        assert_eq!(g.dots_remaining(), 5);
        assert!(g.has_dot(1, 1));
        assert!(!g.has_dot(0, 0));
    }

    #[test]
    fn consume_dot_is_idempotent() {
        let mut g = grid(&["#.#"]);
        assert!(g.consume_dot(1, 0));
        assert!(!g.consume_dot(1, 0));
        assert!(!g.has_dot(1, 0));
        assert_eq!(g.dots_remaining(), 0);
    }

    #[test]
    fn consume_dot_out_of_bounds_is_noop() {
        let mut g = grid(&["#.#"]);
        assert!(!g.consume_dot(-1, 0));
        assert!(!g.consume_dot(1, 7));
        assert_eq!(g.dots_remaining(), 1);
    }

    #[test]
    fn reset_dots_restores_corridors_only() {
        let mut g = grid(&["#.#", "..."]);
        g.consume_dot(1, 0);
        g.consume_dot(0, 1);
        g.reset_dots();
        assert_eq!(g.dots_remaining(), 4);
        assert!(!g.has_dot(0, 0));
    }
}
