/// Ghost direction choice.
///
/// At each cell boundary the ghost picks uniformly at random among the
/// legal steps, excluding an immediate reversal. Reversal is only allowed
/// implicitly: when a dead end leaves the reverse as the sole option, the
/// filter removes it too and the ghost stalls for that choice. This matches
/// the classic drifting ghost, and the built-in maze has no dead ends.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::domain::grid::GridMap;
use crate::domain::mover::{Dir, Mover};

/// Pick the ghost's next direction at a cell boundary.
/// Returns `None` when no non-reversing step is legal.
pub fn choose_dir(grid: &GridMap, ghost: &Mover, rng: &mut Pcg32) -> Option<Dir> {
    let banned = ghost.dir.map(Dir::opposite);
    let options: Vec<Dir> = Dir::ALL
        .into_iter()
        .filter(|d| Some(*d) != banned)
        .filter(|d| grid.target_cell(ghost.col, ghost.row, *d).is_some())
        .collect();
    if options.is_empty() {
        None
    } else {
        Some(options[rng.random_range(0..options.len())])
    }
}
