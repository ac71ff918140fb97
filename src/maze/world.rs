/// MazeWorld: the complete snapshot of a running maze game.
///
/// All global counters (score, lives, phase, tick) live here, next to the
/// grid and the two movers. `restart()` rebuilds the exact starting state,
/// including the RNG, so a restarted run replays identically.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::MazeConfig;
use crate::domain::grid::{GridError, GridMap};
use crate::domain::mover::{Dir, Mover};

/// The built-in maze. Rows 5 and 13 are open at both edges and therefore
/// wrap horizontally (tunnel rows).
pub const DEFAULT_MAZE: [&str; 19] = [
    "###################",
    "#........#........#",
    "# ### ## # ## ### #",
    "# ### ## # ## ### #",
    "# ### ## # ## ### #",
    "...................",
    "# ### # ### # ### #",
    "# ### # ### # ### #",
    "#     #     #     #",
    "# ############### #",
    "#     #     #     #",
    "# ### # ### # ### #",
    "# ### # ### # ### #",
    "...................",
    "# ### ## # ## ### #",
    "# ### ## # ## ### #",
    "# ### ## # ## ### #",
    "#.................#",
    "###################",
];

pub const PLAYER_SPAWN: (i32, i32) = (9, 17);
pub const GHOST_SPAWN: (i32, i32) = (9, 5);
pub const DOT_SCORE: u32 = 10;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Playing,
    GameOver,
}

/// One tick of input, as a plain value.
#[derive(Clone, Copy, Debug, Default)]
pub struct MazeInput {
    pub dir: Option<Dir>,
    pub restart: bool,
}

pub struct MazeWorld {
    pub grid: GridMap,
    pub player: Mover,
    pub ghost: Mover,
    pub score: u32,
    pub lives: u32,
    pub phase: Phase,
    pub tick: u64,
    pub config: MazeConfig,
    pub rng: Pcg32,
    seed: u64,
}

impl MazeWorld {
    /// World on the built-in maze. The layout is a checked constant.
    pub fn new(config: MazeConfig, seed: u64) -> Self {
        Self::from_map(&DEFAULT_MAZE, config, seed).expect("built-in maze is valid")
    }

    /// World on a custom maze diagram.
    pub fn from_map(rows: &[&str], config: MazeConfig, seed: u64) -> Result<Self, GridError> {
        let grid = GridMap::parse(rows)?;
        let lives = config.lives;
        Ok(MazeWorld {
            grid,
            player: Mover::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1),
            ghost: Mover::new(GHOST_SPAWN.0, GHOST_SPAWN.1),
            score: 0,
            lives,
            phase: Phase::Playing,
            tick: 0,
            config,
            rng: Pcg32::seed_from_u64(seed),
            seed,
        })
    }

    /// Put both movers back on their spawn cells (after a caught player).
    pub fn respawn_movers(&mut self) {
        self.player.reset_to(PLAYER_SPAWN.0, PLAYER_SPAWN.1);
        self.ghost.reset_to(GHOST_SPAWN.0, GHOST_SPAWN.1);
    }

    /// Full reset: dots, movers, score, lives, phase, tick, RNG.
    pub fn restart(&mut self) {
        self.grid.reset_dots();
        self.respawn_movers();
        self.score = 0;
        self.lives = self.config.lives;
        self.phase = Phase::Playing;
        self.tick = 0;
        self.rng = Pcg32::seed_from_u64(self.seed);
    }
}
