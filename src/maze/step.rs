/// The maze step function: advances the world by one tick.
///
/// Processing order:
///   1. Restart request (GameOver only)
///   2. Player direction (apply or queue)
///   3. Player movement
///   4. Ghost direction choice (cell boundaries only)
///   5. Ghost movement
///   6. Dot consumption at the player's cell
///   7. Player / ghost collision (interpolated rects)

use crate::domain::geom::mover_rect;
use crate::domain::mover::Dir;
use crate::maze::ai;
use crate::maze::event::MazeEvent;
use crate::maze::world::{MazeInput, MazeWorld, Phase, DOT_SCORE};

pub fn step(world: &mut MazeWorld, input: MazeInput) -> Vec<MazeEvent> {
    let mut events: Vec<MazeEvent> = Vec::new();

    if world.phase == Phase::GameOver {
        if input.restart {
            world.restart();
            events.push(MazeEvent::Restarted);
        }
        return events;
    }

    world.tick += 1;

    resolve_player_movement(world, input.dir);
    resolve_ghost_movement(world);
    resolve_dots(world, &mut events);
    resolve_ghost_collision(world, &mut events);

    events
}

fn resolve_player_movement(world: &mut MazeWorld, dir: Option<Dir>) {
    if let Some(dir) = dir {
        world.player.request_dir(&world.grid, dir);
    }
    world.player.apply_queued(&world.grid);
    let frac = world.config.player_speed / world.config.cell_size;
    world.player.advance(&world.grid, frac);
}

fn resolve_ghost_movement(world: &mut MazeWorld) {
    if world.ghost.at_boundary() {
        world.ghost.dir = ai::choose_dir(&world.grid, &world.ghost, &mut world.rng);
    }
    let frac = world.config.ghost_speed / world.config.cell_size;
    world.ghost.advance(&world.grid, frac);
}

fn resolve_dots(world: &mut MazeWorld, events: &mut Vec<MazeEvent>) {
    let (col, row) = (world.player.col, world.player.row);
    if world.grid.consume_dot(col, row) {
        world.score += DOT_SCORE;
        events.push(MazeEvent::DotEaten { col, row });
        if world.grid.dots_remaining() == 0 {
            events.push(MazeEvent::MazeCleared);
        }
    }
}

fn resolve_ghost_collision(world: &mut MazeWorld, events: &mut Vec<MazeEvent>) {
    let cell = world.config.cell_size;
    let player = mover_rect(&world.player, cell);
    let ghost = mover_rect(&world.ghost, cell);
    if !player.overlaps(ghost) {
        return;
    }
    world.lives -= 1;
    if world.lives == 0 {
        world.phase = Phase::GameOver;
        events.push(MazeEvent::GameOver);
    } else {
        world.respawn_movers();
        events.push(MazeEvent::PlayerCaught { lives_left: world.lives });
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, MazeConfig};
    use crate::domain::mover::Dir;
    use crate::maze::world::{GHOST_SPAWN, PLAYER_SPAWN};

    fn full_speed_config() -> MazeConfig {
        // One cell per tick: speed equals the cell size.
        MazeConfig { cell_size: 30.0, player_speed: 30.0, ghost_speed: 30.0, lives: 3 }
    }

    /// Width-5 corridor with the ghost walled into a side pocket so
    /// player movement can be observed in isolation.
    fn corridor_world(player_col: i32) -> MazeWorld {
        let mut w = MazeWorld::from_map(
            &[
                ".....",
                "#####",
                "#.###",
            ],
            full_speed_config(),
            1,
        )
        .unwrap();
        w.player.reset_to(player_col, 0);
        w.ghost.reset_to(1, 2);
        w
    }

    fn go(dir: Dir) -> MazeInput {
        MazeInput { dir: Some(dir), restart: false }
    }

    #[test]
    fn one_tick_moves_the_player_one_cell() {
        let mut w = corridor_world(0);
        step(&mut w, go(Dir::Right));
        assert_eq!((w.player.col, w.player.row), (1, 0));
        assert_eq!(w.player.progress, 0.0);
    }

    #[test]
    fn moving_past_the_last_column_wraps_to_the_first() {
        let mut w = corridor_world(4);
        step(&mut w, go(Dir::Right));
        assert_eq!((w.player.col, w.player.row), (0, 0));
        assert_eq!(w.player.dir, Some(Dir::Right));
    }

    #[test]
    fn entering_a_cell_eats_its_dot_once() {
        let mut w = corridor_world(0);
        let events = step(&mut w, go(Dir::Right));
        assert!(events.contains(&MazeEvent::DotEaten { col: 1, row: 0 }));
        assert_eq!(w.score, 10);
        // Staying on the cell does not score again.
        let mut w2 = corridor_world(0);
        step(&mut w2, go(Dir::Right));
        w2.player.dir = None;
        let events = step(&mut w2, MazeInput::default());
        assert!(events.is_empty());
        assert_eq!(w2.score, 10);
    }

    #[test]
    fn eating_the_last_dot_emits_maze_cleared() {
        let mut w = corridor_world(0);
        // Leave only the dot at column 1.
        for col in [0, 2, 3, 4] {
            w.grid.consume_dot(col, 0);
        }
        w.grid.consume_dot(1, 2); // ghost pocket
        let events = step(&mut w, go(Dir::Right));
        assert!(events.contains(&MazeEvent::MazeCleared));
    }

    #[test]
    fn ghost_contact_costs_a_life_and_respawns_both() {
        let mut w = MazeWorld::new(GameConfig::defaults().maze, 1);
        w.player.reset_to(GHOST_SPAWN.0, GHOST_SPAWN.1);
        let events = step(&mut w, MazeInput::default());
        assert!(events.contains(&MazeEvent::PlayerCaught { lives_left: 2 }));
        assert_eq!(w.lives, 2);
        assert_eq!((w.player.col, w.player.row), PLAYER_SPAWN);
        assert_eq!((w.ghost.col, w.ghost.row), GHOST_SPAWN);
        assert_eq!(w.phase, Phase::Playing);
    }

    #[test]
    fn last_life_ends_the_game() {
        let mut w = MazeWorld::new(GameConfig::defaults().maze, 1);
        w.lives = 1;
        w.player.reset_to(GHOST_SPAWN.0, GHOST_SPAWN.1);
        let events = step(&mut w, MazeInput::default());
        assert!(events.contains(&MazeEvent::GameOver));
        assert_eq!(w.phase, Phase::GameOver);
    }

    #[test]
    fn game_over_ignores_everything_but_restart() {
        let mut w = MazeWorld::new(GameConfig::defaults().maze, 1);
        w.phase = Phase::GameOver;
        let tick = w.tick;
        assert!(step(&mut w, go(Dir::Left)).is_empty());
        assert_eq!(w.tick, tick);

        let events = step(&mut w, MazeInput { dir: None, restart: true });
        assert!(events.contains(&MazeEvent::Restarted));
        assert_eq!(w.phase, Phase::Playing);
    }

    #[test]
    fn queued_turn_fires_at_the_junction() {
        // Player runs right along the top corridor and queues Down midway;
        // the turn must happen exactly at the junction column.
        let mut w = MazeWorld::from_map(
            &[
                "#####",
                "#...#",
                "###.#",
                "###.#",
                "#####",
            ],
            MazeConfig { cell_size: 30.0, player_speed: 15.0, ghost_speed: 0.0, lives: 3 },
            1,
        )
        .unwrap();
        w.player.reset_to(1, 1);
        w.ghost.reset_to(3, 3);
        step(&mut w, go(Dir::Right)); // progress 0.5
        step(&mut w, go(Dir::Down)); // lands on (2,1), Down queued (wall below)
        assert_eq!((w.player.col, w.player.row), (2, 1));
        assert_eq!(w.player.queued, Some(Dir::Down));
        step(&mut w, MazeInput::default()); // progress 0.5 toward (3,1)
        step(&mut w, MazeInput::default()); // lands on (3,1)
        assert_eq!((w.player.col, w.player.row), (3, 1));
        step(&mut w, MazeInput::default()); // boundary reached: queue applies
        assert_eq!(w.player.dir, Some(Dir::Down));
        assert_eq!(w.player.col, 3);
    }

    #[test]
    fn identical_seeds_replay_identically() {
        let run = |seed: u64| {
            let mut w = MazeWorld::new(GameConfig::defaults().maze, seed);
            let mut trail = Vec::new();
            for i in 0..200 {
                let dir = if i % 2 == 0 { Some(Dir::Left) } else { Some(Dir::Up) };
                step(&mut w, MazeInput { dir, restart: false });
                trail.push((w.player.col, w.player.row, w.ghost.col, w.ghost.row, w.lives));
            }
            trail
        };
        assert_eq!(run(99), run(99));
    }
}
