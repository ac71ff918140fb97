/// External configuration loader.
///
/// Reads `tinycade.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub maze: MazeConfig,
    pub spiral: SpiralConfig,
    pub snake: SnakeConfig,
    pub wrecker: WreckerConfig,
}

#[derive(Clone, Debug)]
pub struct MazeConfig {
    pub cell_size: f32,
    pub player_speed: f32,   // pixels per tick
    pub ghost_speed: f32,
    pub lives: u32,
}

#[derive(Clone, Debug)]
pub struct SpiralConfig {
    pub field_w: f32,
    pub field_h: f32,
    pub player_speed: f32,
    pub ghost_speed: f32,         // initial spiral-ghost speed
    pub red_speed: f32,
    pub laser_speed: f32,
    pub ghost_count: usize,
    pub speedup_ticks: u64,       // interval between ghost speed bumps
    pub speedup_amount: f32,
    pub red_spawn_ticks: u64,     // interval between red-ghost spawns
}

#[derive(Clone, Debug)]
pub struct SnakeConfig {
    pub grid_w: i32,
    pub grid_h: i32,
}

#[derive(Clone, Debug)]
pub struct WreckerConfig {
    pub field_w: f32,
    pub field_h: f32,
    pub track_width: f32,
    pub move_scale: f32,     // pixels per velocity unit per turn
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    maze: TomlMaze,
    #[serde(default)]
    spiral: TomlSpiral,
    #[serde(default)]
    snake: TomlSnake,
    #[serde(default)]
    wrecker: TomlWrecker,
}

#[derive(Deserialize, Debug)]
struct TomlMaze {
    #[serde(default = "default_cell_size")]
    cell_size: f32,
    #[serde(default = "default_maze_player_speed")]
    player_speed: f32,
    #[serde(default = "default_maze_ghost_speed")]
    ghost_speed: f32,
    #[serde(default = "default_maze_lives")]
    lives: u32,
}

#[derive(Deserialize, Debug)]
struct TomlSpiral {
    #[serde(default = "default_field_w")]
    field_w: f32,
    #[serde(default = "default_field_h")]
    field_h: f32,
    #[serde(default = "default_spiral_player_speed")]
    player_speed: f32,
    #[serde(default = "default_spiral_ghost_speed")]
    ghost_speed: f32,
    #[serde(default = "default_red_speed")]
    red_speed: f32,
    #[serde(default = "default_laser_speed")]
    laser_speed: f32,
    #[serde(default = "default_ghost_count")]
    ghost_count: usize,
    #[serde(default = "default_speedup_ticks")]
    speedup_ticks: u64,
    #[serde(default = "default_speedup_amount")]
    speedup_amount: f32,
    #[serde(default = "default_red_spawn_ticks")]
    red_spawn_ticks: u64,
}

#[derive(Deserialize, Debug)]
struct TomlSnake {
    #[serde(default = "default_snake_grid_w")]
    grid_w: i32,
    #[serde(default = "default_snake_grid_h")]
    grid_h: i32,
}

#[derive(Deserialize, Debug)]
struct TomlWrecker {
    #[serde(default = "default_field_w")]
    field_w: f32,
    #[serde(default = "default_field_h")]
    field_h: f32,
    #[serde(default = "default_track_width")]
    track_width: f32,
    #[serde(default = "default_move_scale")]
    move_scale: f32,
}

// ── Defaults ──

fn default_cell_size() -> f32 { 30.0 }
fn default_maze_player_speed() -> f32 { 3.0 }
fn default_maze_ghost_speed() -> f32 { 2.0 }
fn default_maze_lives() -> u32 { 3 }

fn default_field_w() -> f32 { 800.0 }
fn default_field_h() -> f32 { 600.0 }
fn default_spiral_player_speed() -> f32 { 5.0 }
fn default_spiral_ghost_speed() -> f32 { 1.0 }
fn default_red_speed() -> f32 { 5.0 }
fn default_laser_speed() -> f32 { 10.0 }
fn default_ghost_count() -> usize { 5 }
fn default_speedup_ticks() -> u64 { 600 }      // 10s at 60 ticks/s
fn default_speedup_amount() -> f32 { 0.5 }
fn default_red_spawn_ticks() -> u64 { 1800 }   // 30s at 60 ticks/s

fn default_snake_grid_w() -> i32 { 40 }
fn default_snake_grid_h() -> i32 { 30 }

fn default_track_width() -> f32 { 60.0 }
fn default_move_scale() -> f32 { 10.0 }

impl Default for TomlMaze {
    fn default() -> Self {
        TomlMaze {
            cell_size: default_cell_size(),
            player_speed: default_maze_player_speed(),
            ghost_speed: default_maze_ghost_speed(),
            lives: default_maze_lives(),
        }
    }
}

impl Default for TomlSpiral {
    fn default() -> Self {
        TomlSpiral {
            field_w: default_field_w(),
            field_h: default_field_h(),
            player_speed: default_spiral_player_speed(),
            ghost_speed: default_spiral_ghost_speed(),
            red_speed: default_red_speed(),
            laser_speed: default_laser_speed(),
            ghost_count: default_ghost_count(),
            speedup_ticks: default_speedup_ticks(),
            speedup_amount: default_speedup_amount(),
            red_spawn_ticks: default_red_spawn_ticks(),
        }
    }
}

impl Default for TomlSnake {
    fn default() -> Self {
        TomlSnake {
            grid_w: default_snake_grid_w(),
            grid_h: default_snake_grid_h(),
        }
    }
}

impl Default for TomlWrecker {
    fn default() -> Self {
        TomlWrecker {
            field_w: default_field_w(),
            field_h: default_field_h(),
            track_width: default_track_width(),
            move_scale: default_move_scale(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `tinycade.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let toml_cfg = load_toml(&candidate_dirs());
        GameConfig::from_toml(toml_cfg)
    }

    pub fn defaults() -> Self {
        GameConfig::from_toml(TomlConfig::default())
    }

    fn from_toml(t: TomlConfig) -> Self {
        GameConfig {
            maze: MazeConfig {
                cell_size: t.maze.cell_size,
                player_speed: t.maze.player_speed,
                ghost_speed: t.maze.ghost_speed,
                lives: t.maze.lives,
            },
            spiral: SpiralConfig {
                field_w: t.spiral.field_w,
                field_h: t.spiral.field_h,
                player_speed: t.spiral.player_speed,
                ghost_speed: t.spiral.ghost_speed,
                red_speed: t.spiral.red_speed,
                laser_speed: t.spiral.laser_speed,
                ghost_count: t.spiral.ghost_count,
                speedup_ticks: t.spiral.speedup_ticks,
                speedup_amount: t.spiral.speedup_amount,
                red_spawn_ticks: t.spiral.red_spawn_ticks,
            },
            snake: SnakeConfig {
                grid_w: t.snake.grid_w,
                grid_h: t.snake.grid_h,
            },
            wrecker: WreckerConfig {
                field_w: t.wrecker.field_w,
                field_h: t.wrecker.field_h,
                track_width: t.wrecker.track_width,
                move_scale: t.wrecker.move_scale,
            },
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. Fallback
    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for tinycade.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("tinycade.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        log::warn!("tinycade.toml parse error: {e}; using defaults");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    log::warn!("could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}
