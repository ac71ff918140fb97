/// Turn-based vector racer.
///
/// Each confirmed move is one turn: the chosen acceleration is added to
/// the velocity, the velocity (scaled) is added to the position, and the
/// resulting state is resolved. Leaving the track crashes the car; the
/// movement segment crossing the finish line with forward velocity wins.
///
/// Two track shapes share one type:
///   - `Loop`: a closed ellipse band. Containment is a ring test, inside
///     the outer ring and outside the inner one. The finish line sits at
///     the bottom of the loop and the car starts just past it, so a win
///     takes a full lap.
///   - `Polyline`: an open course of random segments. Containment is
///     distance to the nearest centerline segment within half the track
///     width. The finish line sits at the far end.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::WreckerConfig;
use crate::domain::geom::{dist_point_segment, point_in_polygon, segments_intersect, Vec2};

const LOOP_RX: f32 = 200.0;
const LOOP_RY: f32 = 150.0;
const LOOP_SAMPLES: usize = 36;
const POLYLINE_SEGMENTS: usize = 10;

// ══════════════════════════════════════════════════════════════
// Moves
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveOption {
    Keep,
    Forward,
    ForwardLeft,
    ForwardRight,
    Brake,
}

impl MoveOption {
    pub const ALL: [MoveOption; 5] = [
        MoveOption::Keep,
        MoveOption::Forward,
        MoveOption::ForwardLeft,
        MoveOption::ForwardRight,
        MoveOption::Brake,
    ];

    pub fn accel(self) -> Vec2 {
        match self {
            MoveOption::Keep => Vec2::new(0.0, 0.0),
            MoveOption::Forward => Vec2::new(1.0, 0.0),
            MoveOption::ForwardLeft => Vec2::new(1.0, -1.0),
            MoveOption::ForwardRight => Vec2::new(1.0, 1.0),
            MoveOption::Brake => Vec2::new(-1.0, 0.0),
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Track
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TrackShape {
    Loop,
    Polyline,
}

#[derive(Clone, Debug)]
pub struct Track {
    pub centerline: Vec<Vec2>,
    pub width: f32,
    pub shape: TrackShape,
    /// Crossing this segment with forward velocity finishes the race.
    pub finish: (Vec2, Vec2),
}

impl Track {
    /// Closed ellipse band around the field center.
    pub fn loop_track(config: &WreckerConfig) -> Track {
        let center = Vec2::new(config.field_w / 2.0, config.field_h / 2.0);
        let centerline = ellipse_ring(center, LOOP_RX, LOOP_RY);
        let half = config.track_width / 2.0;
        let bottom = Vec2::new(center.x, center.y + LOOP_RY);
        Track {
            centerline,
            width: config.track_width,
            shape: TrackShape::Loop,
            finish: (
                Vec2::new(bottom.x, bottom.y - half),
                Vec2::new(bottom.x, bottom.y + half),
            ),
        }
    }

    /// Open course: a straight start and random curves heading right.
    pub fn polyline_track(config: &WreckerConfig, rng: &mut Pcg32) -> Track {
        let mut points = vec![Vec2::new(100.0, config.field_h / 2.0)];
        for _ in 0..POLYLINE_SEGMENTS {
            let last = points[points.len() - 1];
            points.push(Vec2::new(
                last.x + rng.random_range(50.0..150.0),
                last.y + rng.random_range(-50.0..50.0),
            ));
        }
        let half = config.track_width / 2.0;
        let end = points[points.len() - 1];
        Track {
            centerline: points,
            width: config.track_width,
            shape: TrackShape::Polyline,
            finish: (Vec2::new(end.x, end.y - half), Vec2::new(end.x, end.y + half)),
        }
    }

    /// Is the point on the drivable surface?
    pub fn contains(&self, p: Vec2) -> bool {
        let half = self.width / 2.0;
        match self.shape {
            TrackShape::Loop => {
                // Band between two concentric rings.
                let center = ring_center(&self.centerline);
                let outer = ellipse_ring(center, LOOP_RX + half, LOOP_RY + half);
                let inner = ellipse_ring(center, LOOP_RX - half, LOOP_RY - half);
                point_in_polygon(p, &outer) && !point_in_polygon(p, &inner)
            }
            TrackShape::Polyline => self
                .centerline
                .windows(2)
                .any(|seg| dist_point_segment(p, seg[0], seg[1]) <= half),
        }
    }
}

fn ellipse_ring(center: Vec2, rx: f32, ry: f32) -> Vec<Vec2> {
    (0..LOOP_SAMPLES)
        .map(|i| {
            let rad = (i as f32) * std::f32::consts::TAU / LOOP_SAMPLES as f32;
            Vec2::new(center.x + rad.cos() * rx, center.y + rad.sin() * ry)
        })
        .collect()
}

fn ring_center(ring: &[Vec2]) -> Vec2 {
    let n = ring.len() as f32;
    let sum = ring.iter().fold(Vec2::default(), |acc, p| acc.add(*p));
    sum.scale(1.0 / n)
}

// ══════════════════════════════════════════════════════════════
// World
// ══════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug)]
pub struct Car {
    pub pos: Vec2,
    pub vel: Vec2,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Racing,
    Crashed,
    Finished,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct WreckerInput {
    pub mv: Option<MoveOption>,
    pub restart: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WreckerEvent {
    Crashed,
    Finished { turns: u64 },
    Restarted,
}

pub struct WreckerWorld {
    pub track: Track,
    pub car: Car,
    pub phase: Phase,
    pub turns: u64,
    pub config: WreckerConfig,
    seed: u64,
}

impl WreckerWorld {
    pub fn new(config: WreckerConfig, shape: TrackShape, seed: u64) -> Self {
        let (track, car) = build(&config, shape, seed);
        WreckerWorld { track, car, phase: Phase::Racing, turns: 0, config, seed }
    }

    /// World on a caller-supplied track.
    pub fn with_track(config: WreckerConfig, track: Track, car: Car) -> Self {
        WreckerWorld { track, car, phase: Phase::Racing, turns: 0, config, seed: 0 }
    }

    /// Rebuild the same track from the stored seed and reset the car.
    pub fn restart(&mut self) {
        let (track, car) = build(&self.config, self.track.shape, self.seed);
        self.track = track;
        self.car = car;
        self.phase = Phase::Racing;
        self.turns = 0;
    }
}

fn build(config: &WreckerConfig, shape: TrackShape, seed: u64) -> (Track, Car) {
    let mut rng = Pcg32::seed_from_u64(seed);
    match shape {
        TrackShape::Loop => {
            let track = Track::loop_track(config);
            // Just past the finish line, rolling forward: a win is a lap.
            let start = Vec2::new(track.finish.0.x + 20.0, config.field_h / 2.0 + LOOP_RY);
            (track, Car { pos: start, vel: Vec2::new(1.0, 0.0) })
        }
        TrackShape::Polyline => {
            let track = Track::polyline_track(config, &mut rng);
            let start = track.centerline[0];
            (track, Car { pos: start, vel: Vec2::new(0.0, 0.0) })
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Step
// ══════════════════════════════════════════════════════════════

pub fn step(world: &mut WreckerWorld, input: WreckerInput) -> Vec<WreckerEvent> {
    let mut events: Vec<WreckerEvent> = Vec::new();

    if world.phase != Phase::Racing {
        if input.restart {
            world.restart();
            events.push(WreckerEvent::Restarted);
        }
        return events;
    }

    let Some(mv) = input.mv else { return events };
    world.turns += 1;

    let from = world.car.pos;
    world.car.vel = world.car.vel.add(mv.accel());
    world.car.pos = from.add(world.car.vel.scale(world.config.move_scale));

    // Finish check first: crossing the line and running off beyond it in
    // the same move still counts as a finish.
    let forward = world.car.vel.x > 0.0;
    if forward
        && segments_intersect(from, world.car.pos, world.track.finish.0, world.track.finish.1)
    {
        world.phase = Phase::Finished;
        events.push(WreckerEvent::Finished { turns: world.turns });
        return events;
    }

    if !world.track.contains(world.car.pos) {
        world.phase = Phase::Crashed;
        events.push(WreckerEvent::Crashed);
    }

    events
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
