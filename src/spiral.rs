/// Ghost-avoidance shooter on an open field.
///
/// The player slides around a bounded field while ghosts converge on it
/// along a spiral: each ghost carries an angle accumulator and moves by the
/// sum of a rotating offset and a normalized pursuit vector. A red strafer
/// periodically crosses the field right to left and only dies to red
/// lasers. Removals are resolved mark-and-compact: hits are computed
/// first, then the live lists are rebuilt once per tick.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::SpiralConfig;
use crate::domain::geom::{Rect, Vec2};

pub const PLAYER_SIZE: f32 = 20.0;
pub const GHOST_SIZE: f32 = 20.0;
pub const RED_SIZE: f32 = 30.0;
pub const LASER_W: f32 = 5.0;
pub const LASER_H: f32 = 10.0;
/// Radians added to each ghost's angle accumulator per tick.
pub const SPIRAL_TURN: f32 = 0.02;

// ══════════════════════════════════════════════════════════════
// Entities
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LaserColor {
    Blue,
    Red,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Vec2,
}

#[derive(Clone, Debug)]
pub struct SpiralGhost {
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
}

#[derive(Clone, Debug)]
pub struct RedGhost {
    pub pos: Vec2,
}

#[derive(Clone, Debug)]
pub struct Laser {
    pub pos: Vec2,
    pub color: LaserColor,
}

impl Player {
    fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PLAYER_SIZE, PLAYER_SIZE)
    }
}

impl SpiralGhost {
    fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, GHOST_SIZE, GHOST_SIZE)
    }
}

impl RedGhost {
    fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, RED_SIZE, RED_SIZE)
    }
}

impl Laser {
    fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, LASER_W, LASER_H)
    }
}

// ══════════════════════════════════════════════════════════════
// World
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Playing,
    GameOver,
}

/// One tick of input. `dx`/`dy` are held-direction components in -1..=1.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpiralInput {
    pub dx: i32,
    pub dy: i32,
    pub fire_blue: bool,
    pub fire_red: bool,
    pub restart: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SpiralEvent {
    GhostDestroyed,
    RedGhostSpawned,
    RedGhostDestroyed,
    PlayerHit,
    Restarted,
}

pub struct SpiralWorld {
    pub player: Player,
    pub ghosts: Vec<SpiralGhost>,
    pub red_ghost: Option<RedGhost>,
    pub lasers: Vec<Laser>,
    pub phase: Phase,
    pub tick: u64,
    pub config: SpiralConfig,
    pub rng: Pcg32,
    seed: u64,
}

impl SpiralWorld {
    pub fn new(config: SpiralConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let ghosts = spawn_ghosts(&config, &mut rng);
        SpiralWorld {
            player: Player { pos: field_center(&config) },
            ghosts,
            red_ghost: None,
            lasers: Vec::new(),
            phase: Phase::Playing,
            tick: 0,
            config,
            rng,
            seed,
        }
    }

    /// Full reset. The reseeded RNG makes the ghost spawns identical to
    /// the first run.
    pub fn restart(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.ghosts = spawn_ghosts(&self.config, &mut self.rng);
        self.player.pos = field_center(&self.config);
        self.red_ghost = None;
        self.lasers.clear();
        self.phase = Phase::Playing;
        self.tick = 0;
    }
}

fn field_center(config: &SpiralConfig) -> Vec2 {
    Vec2::new(config.field_w / 2.0, config.field_h / 2.0)
}

fn spawn_ghosts(config: &SpiralConfig, rng: &mut Pcg32) -> Vec<SpiralGhost> {
    (0..config.ghost_count)
        .map(|_| SpiralGhost {
            pos: Vec2::new(
                rng.random_range(0.0..config.field_w),
                rng.random_range(0.0..config.field_h),
            ),
            angle: 0.0,
            speed: config.ghost_speed,
        })
        .collect()
}

// ══════════════════════════════════════════════════════════════
// Step
// ══════════════════════════════════════════════════════════════

/// Processing order:
///   1. Restart request (GameOver only)
///   2. Player movement (clamped to the field)
///   3. Laser firing (red shots need a red ghost on the field)
///   4. Ghost spiral pursuit
///   5. Red-ghost strafe (wraps right to left)
///   6. Laser advance + off-screen cull
///   7. Laser/ghost hits, then player/ghost contact (mark and compact)
///   8. Timers: ghost speed-up, red-ghost spawn
pub fn step(world: &mut SpiralWorld, input: SpiralInput) -> Vec<SpiralEvent> {
    let mut events: Vec<SpiralEvent> = Vec::new();

    if world.phase == Phase::GameOver {
        if input.restart {
            world.restart();
            events.push(SpiralEvent::Restarted);
        }
        return events;
    }

    world.tick += 1;

    resolve_player_movement(world, input.dx, input.dy);
    resolve_firing(world, input);
    resolve_ghost_pursuit(world);
    resolve_red_strafe(world);
    resolve_lasers(world);
    resolve_hits(world, &mut events);
    resolve_timers(world, &mut events);

    events
}

fn resolve_player_movement(world: &mut SpiralWorld, dx: i32, dy: i32) {
    let cfg = &world.config;
    let p = &mut world.player.pos;
    p.x = (p.x + dx as f32 * cfg.player_speed).clamp(0.0, cfg.field_w - PLAYER_SIZE);
    p.y = (p.y + dy as f32 * cfg.player_speed).clamp(0.0, cfg.field_h - PLAYER_SIZE);
}

fn resolve_firing(world: &mut SpiralWorld, input: SpiralInput) {
    let muzzle = Vec2::new(world.player.pos.x + PLAYER_SIZE / 2.0, world.player.pos.y);
    if input.fire_blue {
        world.lasers.push(Laser { pos: muzzle, color: LaserColor::Blue });
    }
    if input.fire_red && world.red_ghost.is_some() {
        world.lasers.push(Laser { pos: muzzle, color: LaserColor::Red });
    }
}

fn resolve_ghost_pursuit(world: &mut SpiralWorld) {
    let target = world.player.pos;
    for ghost in &mut world.ghosts {
        let to_player = target.sub(ghost.pos);
        let dist = to_player.length();
        if dist == 0.0 {
            continue;
        }
        ghost.angle += SPIRAL_TURN;
        let orbit = Vec2::new(ghost.angle.cos(), ghost.angle.sin()).scale(ghost.speed);
        let pursuit = to_player.scale(ghost.speed / dist);
        ghost.pos = ghost.pos.add(orbit).add(pursuit);
    }
}

fn resolve_red_strafe(world: &mut SpiralWorld) {
    if let Some(red) = &mut world.red_ghost {
        red.pos.x -= world.config.red_speed;
        if red.pos.x < -RED_SIZE {
            red.pos.x = world.config.field_w;
        }
    }
}

fn resolve_lasers(world: &mut SpiralWorld) {
    for laser in &mut world.lasers {
        laser.pos.y -= world.config.laser_speed;
    }
    world.lasers.retain(|l| l.pos.y >= -LASER_H);
}

fn resolve_hits(world: &mut SpiralWorld, events: &mut Vec<SpiralEvent>) {
    let mut dead_ghosts = vec![false; world.ghosts.len()];
    let mut spent_lasers = vec![false; world.lasers.len()];

    // Each laser kills at most one ghost.
    for (gi, ghost) in world.ghosts.iter().enumerate() {
        for (li, laser) in world.lasers.iter().enumerate() {
            if spent_lasers[li] {
                continue;
            }
            if laser.rect().overlaps(ghost.rect()) {
                dead_ghosts[gi] = true;
                spent_lasers[li] = true;
                events.push(SpiralEvent::GhostDestroyed);
                break;
            }
        }
    }

    if let Some(red) = &world.red_ghost {
        let red_rect = red.rect();
        let hit = world.lasers.iter().enumerate().find(|(li, laser)| {
            !spent_lasers[*li]
                && laser.color == LaserColor::Red
                && laser.rect().overlaps(red_rect)
        });
        if let Some((li, _)) = hit {
            spent_lasers[li] = true;
            world.red_ghost = None;
            events.push(SpiralEvent::RedGhostDestroyed);
        }
    }

    // Compact the live lists once.
    let mut gi = 0;
    world.ghosts.retain(|_| {
        let keep = !dead_ghosts[gi];
        gi += 1;
        keep
    });
    let mut li = 0;
    world.lasers.retain(|_| {
        let keep = !spent_lasers[li];
        li += 1;
        keep
    });

    // Player contact with any survivor ends the run.
    let player_rect = world.player.rect();
    let touched = world.ghosts.iter().any(|g| g.rect().overlaps(player_rect))
        || world
            .red_ghost
            .as_ref()
            .is_some_and(|r| r.rect().overlaps(player_rect));
    if touched {
        world.phase = Phase::GameOver;
        events.push(SpiralEvent::PlayerHit);
    }
}

fn resolve_timers(world: &mut SpiralWorld, events: &mut Vec<SpiralEvent>) {
    let cfg = &world.config;
    if cfg.speedup_ticks > 0 && world.tick % cfg.speedup_ticks == 0 {
        for ghost in &mut world.ghosts {
            ghost.speed += cfg.speedup_amount;
        }
    }
    if cfg.red_spawn_ticks > 0
        && world.tick % cfg.red_spawn_ticks == 0
        && world.red_ghost.is_none()
    {
        let y = world.rng.random_range(0.0..cfg.field_h);
        world.red_ghost = Some(RedGhost { pos: Vec2::new(cfg.field_w, y) });
        events.push(SpiralEvent::RedGhostSpawned);
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
