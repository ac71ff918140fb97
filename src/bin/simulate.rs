/// Headless smoke/balance runner.
///
/// Drives each simulation core with a scripted input policy for a fixed
/// number of ticks, counts the events, and prints one summary line per
/// run. Useful for eyeballing balance changes and for catching panics or
/// stuck states without a frontend.

use clap::{Parser, ValueEnum};

use tinycade::config::GameConfig;
use tinycade::domain::mover::Dir;
use tinycade::maze::{self, MazeEvent, MazeInput, MazeWorld};
use tinycade::snake::{self, SnakeEvent, SnakeInput, SnakeWorld};
use tinycade::spiral::{self, SpiralEvent, SpiralInput, SpiralWorld};
use tinycade::wrecker::{self, MoveOption, TrackShape, WreckerEvent, WreckerInput, WreckerWorld};

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
enum Game {
    Maze,
    Spiral,
    Snake,
    Wrecker,
    All,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Scripted headless runs of the tinycade sims")]
struct Cli {
    /// Which simulation to run.
    #[arg(long, value_enum, default_value_t = Game::All)]
    game: Game,
    /// Ticks (turns, for wrecker) per run.
    #[arg(long, default_value_t = 3600)]
    ticks: u64,
    /// RNG seed; identical seeds replay identically.
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let config = GameConfig::load();

    match cli.game {
        Game::Maze => run_maze(&config, cli.ticks, cli.seed),
        Game::Spiral => run_spiral(&config, cli.ticks, cli.seed),
        Game::Snake => run_snake(&config, cli.ticks, cli.seed),
        Game::Wrecker => run_wrecker(&config, cli.ticks, cli.seed),
        Game::All => {
            run_maze(&config, cli.ticks, cli.seed);
            run_spiral(&config, cli.ticks, cli.seed);
            run_snake(&config, cli.ticks, cli.seed);
            run_wrecker(&config, cli.ticks, cli.seed);
        }
    }
}

/// Sweep the four directions in long strokes; restart after every game over.
fn run_maze(config: &GameConfig, ticks: u64, seed: u64) {
    let mut world = MazeWorld::new(config.maze.clone(), seed);
    let mut dots = 0u64;
    let mut caught = 0u64;
    let mut games = 0u64;
    let mut best_score = 0u32;

    for tick in 0..ticks {
        let dir = match (tick / 30) % 4 {
            0 => Dir::Left,
            1 => Dir::Up,
            2 => Dir::Right,
            _ => Dir::Down,
        };
        let restart = world.phase == maze::Phase::GameOver;
        let events = maze::step(&mut world, MazeInput { dir: Some(dir), restart });
        for event in events {
            match event {
                MazeEvent::DotEaten { .. } => dots += 1,
                MazeEvent::PlayerCaught { .. } => caught += 1,
                MazeEvent::GameOver => games += 1,
                MazeEvent::MazeCleared => log::info!("maze cleared at tick {tick}"),
                MazeEvent::Restarted => {}
            }
        }
        best_score = best_score.max(world.score);
    }

    println!(
        "maze    seed={seed} ticks={ticks} dots={dots} caught={caught} \
         game_overs={games} best_score={best_score}"
    );
}

/// Orbit the field while firing; restart after every hit.
fn run_spiral(config: &GameConfig, ticks: u64, seed: u64) {
    let mut world = SpiralWorld::new(config.spiral.clone(), seed);
    let mut kills = 0u64;
    let mut red_spawns = 0u64;
    let mut red_kills = 0u64;
    let mut hits = 0u64;

    for tick in 0..ticks {
        let (dx, dy) = match (tick / 40) % 4 {
            0 => (1, 0),
            1 => (0, 1),
            2 => (-1, 0),
            _ => (0, -1),
        };
        let input = SpiralInput {
            dx,
            dy,
            fire_blue: tick % 15 == 0,
            fire_red: tick % 40 == 0,
            restart: world.phase == spiral::Phase::GameOver,
        };
        for event in spiral::step(&mut world, input) {
            match event {
                SpiralEvent::GhostDestroyed => kills += 1,
                SpiralEvent::RedGhostSpawned => red_spawns += 1,
                SpiralEvent::RedGhostDestroyed => red_kills += 1,
                SpiralEvent::PlayerHit => hits += 1,
                SpiralEvent::Restarted => {}
            }
        }
    }

    println!(
        "spiral  seed={seed} ticks={ticks} ghost_kills={kills} red_spawns={red_spawns} \
         red_kills={red_kills} player_hits={hits}"
    );
}

/// Chase the food greedily; restart after every death.
fn run_snake(config: &GameConfig, ticks: u64, seed: u64) {
    let mut world = SnakeWorld::new(config.snake.clone(), seed);
    let mut eaten = 0u64;
    let mut deaths = 0u64;
    let mut best_len = 1usize;

    for _ in 0..ticks {
        let (hc, hr) = world.head();
        let (fc, fr) = world.food;
        let dir = if fc > hc {
            Dir::Right
        } else if fc < hc {
            Dir::Left
        } else if fr > hr {
            Dir::Down
        } else {
            Dir::Up
        };
        let input = SnakeInput {
            dir: Some(dir),
            restart: world.phase == snake::Phase::GameOver,
        };
        for event in snake::step(&mut world, input) {
            match event {
                SnakeEvent::FoodEaten { length } => {
                    eaten += 1;
                    best_len = best_len.max(length);
                }
                SnakeEvent::GameOver { .. } => deaths += 1,
                SnakeEvent::Restarted => {}
            }
        }
    }

    println!(
        "snake   seed={seed} ticks={ticks} food_eaten={eaten} deaths={deaths} \
         best_length={best_len}"
    );
}

/// Floor it until roughly cruising speed, then coast; restart after every
/// crash or finish. Alternates the two track shapes across runs.
fn run_wrecker(config: &GameConfig, ticks: u64, seed: u64) {
    for shape in [TrackShape::Loop, TrackShape::Polyline] {
        let mut world = WreckerWorld::new(config.wrecker.clone(), shape, seed);
        let mut crashes = 0u64;
        let mut finishes = 0u64;
        let mut best_turns: Option<u64> = None;

        for _ in 0..ticks {
            let mv = if world.car.vel.length() < 3.0 {
                MoveOption::Forward
            } else {
                MoveOption::Keep
            };
            let input = WreckerInput {
                mv: Some(mv),
                restart: world.phase != wrecker::Phase::Racing,
            };
            for event in wrecker::step(&mut world, input) {
                match event {
                    WreckerEvent::Crashed => crashes += 1,
                    WreckerEvent::Finished { turns } => {
                        finishes += 1;
                        best_turns = Some(best_turns.map_or(turns, |b| b.min(turns)));
                    }
                    WreckerEvent::Restarted => {}
                }
            }
        }

        println!(
            "wrecker seed={seed} shape={shape:?} turns={ticks} crashes={crashes} \
             finishes={finishes} best_finish={best_turns:?}"
        );
    }
}
