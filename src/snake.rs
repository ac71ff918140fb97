/// Snake on a plain cell grid.
///
/// The body is a queue of cells, tail at the front and head at the back.
/// Each tick the head advances one cell in the held direction and the tail
/// is trimmed to the current length. A turn onto the axis the snake is
/// already moving along is rejected, which makes reversal impossible.
/// Score is length minus one.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::SnakeConfig;
use crate::domain::mover::Dir;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Playing,
    GameOver,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DeathCause {
    Wall,
    SelfHit,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SnakeInput {
    pub dir: Option<Dir>,
    pub restart: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SnakeEvent {
    FoodEaten { length: usize },
    GameOver { cause: DeathCause },
    Restarted,
}

pub struct SnakeWorld {
    /// Tail first, head last.
    pub body: VecDeque<(i32, i32)>,
    pub length: usize,
    pub dir: Option<Dir>,
    pub food: (i32, i32),
    pub phase: Phase,
    pub tick: u64,
    pub config: SnakeConfig,
    pub rng: Pcg32,
    seed: u64,
}

impl SnakeWorld {
    pub fn new(config: SnakeConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let head = (config.grid_w / 2, config.grid_h / 2);
        let mut body = VecDeque::new();
        body.push_back(head);
        let food = place_food(&config, &body, &mut rng);
        SnakeWorld {
            body,
            length: 1,
            dir: None,
            food,
            phase: Phase::Playing,
            tick: 0,
            config,
            rng,
            seed,
        }
    }

    pub fn head(&self) -> (i32, i32) {
        *self.body.back().expect("body is never empty")
    }

    pub fn score(&self) -> usize {
        self.length - 1
    }

    pub fn restart(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        let head = (self.config.grid_w / 2, self.config.grid_h / 2);
        self.body.clear();
        self.body.push_back(head);
        self.length = 1;
        self.dir = None;
        self.food = place_food(&self.config, &self.body, &mut self.rng);
        self.phase = Phase::Playing;
        self.tick = 0;
    }
}

/// Uniform random free cell. Cells under the body are excluded, so food
/// can never spawn where the snake already is.
fn place_food(config: &SnakeConfig, body: &VecDeque<(i32, i32)>, rng: &mut Pcg32) -> (i32, i32) {
    let free: Vec<(i32, i32)> = (0..config.grid_h)
        .flat_map(|row| (0..config.grid_w).map(move |col| (col, row)))
        .filter(|cell| !body.contains(cell))
        .collect();
    if free.is_empty() {
        // Board full: the snake has won the board; park the food on the head.
        return *body.back().expect("body is never empty");
    }
    free[rng.random_range(0..free.len())]
}

/// A turn is legal only onto the perpendicular axis.
fn turn_allowed(current: Option<Dir>, requested: Dir) -> bool {
    match current {
        None => true,
        Some(d) => horizontal(d) != horizontal(requested),
    }
}

fn horizontal(d: Dir) -> bool {
    matches!(d, Dir::Left | Dir::Right)
}

pub fn step(world: &mut SnakeWorld, input: SnakeInput) -> Vec<SnakeEvent> {
    let mut events: Vec<SnakeEvent> = Vec::new();

    if world.phase == Phase::GameOver {
        if input.restart {
            world.restart();
            events.push(SnakeEvent::Restarted);
        }
        return events;
    }

    world.tick += 1;

    if let Some(requested) = input.dir {
        if turn_allowed(world.dir, requested) {
            world.dir = Some(requested);
        }
    }

    let Some(dir) = world.dir else { return events };

    let (dc, dr) = dir.delta();
    let (hc, hr) = world.head();
    let head = (hc + dc, hr + dr);

    if head.0 < 0 || head.0 >= world.config.grid_w || head.1 < 0 || head.1 >= world.config.grid_h {
        world.phase = Phase::GameOver;
        events.push(SnakeEvent::GameOver { cause: DeathCause::Wall });
        return events;
    }

    world.body.push_back(head);
    while world.body.len() > world.length {
        world.body.pop_front();
    }

    // Self hit: the head landed on an older body cell.
    if world.body.iter().take(world.body.len() - 1).any(|&c| c == head) {
        world.phase = Phase::GameOver;
        events.push(SnakeEvent::GameOver { cause: DeathCause::SelfHit });
        return events;
    }

    if head == world.food {
        world.length += 1;
        world.food = place_food(&world.config, &world.body, &mut world.rng);
        events.push(SnakeEvent::FoodEaten { length: world.length });
    }

    events
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SnakeConfig;

    fn world() -> SnakeWorld {
        SnakeWorld::new(SnakeConfig { grid_w: 10, grid_h: 10 }, 3)
    }

    fn go(dir: Dir) -> SnakeInput {
        SnakeInput { dir: Some(dir), restart: false }
    }

    #[test]
    fn snake_waits_for_the_first_direction() {
        let mut w = world();
        let head = w.head();
        step(&mut w, SnakeInput::default());
        assert_eq!(w.head(), head);
        step(&mut w, go(Dir::Right));
        assert_eq!(w.head(), (head.0 + 1, head.1));
    }

    #[test]
    fn held_direction_keeps_the_snake_moving() {
        let mut w = world();
        step(&mut w, go(Dir::Down));
        let (c, r) = w.head();
        step(&mut w, SnakeInput::default());
        assert_eq!(w.head(), (c, r + 1));
    }

    #[test]
    fn reversal_is_rejected() {
        let mut w = world();
        step(&mut w, go(Dir::Right));
        let (c, r) = w.head();
        step(&mut w, go(Dir::Left));
        // Still travelling right.
        assert_eq!(w.head(), (c + 1, r));
        assert_eq!(w.dir, Some(Dir::Right));
    }

    #[test]
    fn perpendicular_turns_are_accepted() {
        let mut w = world();
        step(&mut w, go(Dir::Right));
        step(&mut w, go(Dir::Up));
        assert_eq!(w.dir, Some(Dir::Up));
    }

    #[test]
    fn hitting_a_wall_ends_the_game() {
        let mut w = world();
        let events: Vec<_> = (0..10).flat_map(|_| step(&mut w, go(Dir::Left))).collect();
        assert!(events.contains(&SnakeEvent::GameOver { cause: DeathCause::Wall }));
        assert_eq!(w.phase, Phase::GameOver);
    }

    #[test]
    fn biting_the_body_ends_the_game() {
        let mut w = world();
        w.length = 5;
        // Tight clockwise loop back onto the body.
        step(&mut w, go(Dir::Right));
        step(&mut w, go(Dir::Down));
        step(&mut w, go(Dir::Left));
        let events = step(&mut w, go(Dir::Up));
        assert!(events.contains(&SnakeEvent::GameOver { cause: DeathCause::SelfHit }));
    }

    #[test]
    fn eating_food_grows_the_snake() {
        let mut w = world();
        let (c, r) = w.head();
        w.food = (c + 1, r);
        let events = step(&mut w, go(Dir::Right));
        assert!(events.contains(&SnakeEvent::FoodEaten { length: 2 }));
        assert_eq!(w.length, 2);
        assert_eq!(w.score(), 1);
        // Tail catches up on the next move.
        step(&mut w, SnakeInput::default());
        assert_eq!(w.body.len(), 2);
    }

    #[test]
    fn food_never_lands_on_the_body() {
        let cfg = SnakeConfig { grid_w: 3, grid_h: 3 };
        let mut rng = Pcg32::seed_from_u64(5);
        // Body fills every cell but (2,2).
        let body: VecDeque<(i32, i32)> =
            [(0, 0), (1, 0), (2, 0), (2, 1), (1, 1), (0, 1), (0, 2), (1, 2)]
                .into_iter()
                .collect();
        for _ in 0..50 {
            assert_eq!(place_food(&cfg, &body, &mut rng), (2, 2));
        }
    }

    #[test]
    fn full_board_parks_the_food_on_the_head() {
        let cfg = SnakeConfig { grid_w: 2, grid_h: 2 };
        let mut rng = Pcg32::seed_from_u64(5);
        let body: VecDeque<(i32, i32)> = [(0, 0), (1, 0), (1, 1), (0, 1)].into_iter().collect();
        assert_eq!(place_food(&cfg, &body, &mut rng), (0, 1));
    }

    #[test]
    fn restart_resets_to_the_seeded_start() {
        let mut w = world();
        let food = w.food;
        step(&mut w, go(Dir::Up));
        w.phase = Phase::GameOver;
        let events = step(&mut w, SnakeInput { restart: true, ..Default::default() });
        assert!(events.contains(&SnakeEvent::Restarted));
        assert_eq!(w.food, food);
        assert_eq!(w.length, 1);
        assert_eq!(w.dir, None);
        assert_eq!(w.head(), (5, 5));
    }
}
