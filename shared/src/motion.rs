//! Balloon motion: where a balloon wants to go and how it gets there.
//!
//! Destinations come from login recency. Every frame a balloon steers toward
//! a short-lived local destination near its real one, which gives the
//! approach-then-loiter drift instead of a straight line.

use chrono::{DateTime, Utc};
use rand::Rng;
use std::f64::consts::TAU;

use crate::config::SceneConfig;
use crate::point::{distance, floor, heading, on_circle, Point};

pub const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

/// Highest destination, as a fraction of scene height (most recent login).
pub const TOP_FRACTION: f64 = 0.15;
/// Vertical band covered between the most and least recent logins.
pub const HEIGHT_BAND: f64 = 0.45;
/// Horizontal spread for users inactive a full day.
pub const MIN_X_SPAN: f64 = 0.1;
/// Extra horizontal spread for a login that just happened.
pub const EXTRA_X_SPAN: f64 = 0.6;

const MIN_STEP_DISTANCE: f64 = 1e-6;

/// Fraction of a day since `last_login`, clamped to [0, 1].
/// Timestamps in the future count as "just now".
pub fn inactivity_fraction(last_login: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let minutes = (now - last_login).num_milliseconds() as f64 / 60_000.0;
    minutes.clamp(0.0, MINUTES_PER_DAY) / MINUTES_PER_DAY
}

/// Destination height as a fraction of scene height, in [0.15, 0.60].
pub fn destination_y_fraction(f: f64) -> f64 {
    f.clamp(0.0, 1.0) * HEIGHT_BAND + TOP_FRACTION
}

/// Width of the permitted destination band as a fraction of scene width.
pub fn destination_x_span(f: f64) -> f64 {
    MIN_X_SPAN + EXTRA_X_SPAN * (1.0 - f.clamp(0.0, 1.0))
}

/// Permitted destination x range, centered on the scene midpoint.
pub fn destination_x_range(f: f64, width: f64) -> (f64, f64) {
    let half = destination_x_span(f) * width * 0.5;
    let mid = width * 0.5;
    (mid - half, mid + half)
}

/// Pick a destination for a balloon with inactivity fraction `f`.
pub fn pick_destination<R: Rng + ?Sized>(f: f64, config: &SceneConfig, rng: &mut R) -> Point {
    let (lo, hi) = destination_x_range(f, config.width);
    let x = lo + rng.gen::<f64>() * (hi - lo);
    let y = destination_y_fraction(f) * config.height;
    Point::new(x, y)
}

/// Launch point for new balloons, just above the vendor stall.
pub fn spawn_position<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Point {
    Point::new(
        config.width * 0.5 + (30.0 * rng.gen::<f64>() - 15.0),
        config.height * 0.65 + (50.0 * rng.gen::<f64>() - 25.0),
    )
}

/// A local destination must be replaced when it is unset or reached.
pub fn needs_local_destination(pos: Point, local: Option<Point>, config: &SceneConfig) -> bool {
    match local {
        None => true,
        Some(target) => distance(pos, target) < config.arrive_radius,
    }
}

/// Near the destination: a random point on the wandering circle around it.
/// Otherwise: one float radius from `pos` straight toward the destination.
pub fn choose_local_destination<R: Rng + ?Sized>(
    pos: Point,
    destination: Point,
    config: &SceneConfig,
    rng: &mut R,
) -> Point {
    let near = distance(pos, destination) < config.float_radius + config.arrive_radius;
    let target = if near {
        let angle = rng.gen::<f64>() * TAU;
        on_circle(destination, config.float_radius, angle)
    } else {
        on_circle(pos, config.float_radius, heading(pos, destination))
    };
    floor(target)
}

/// Full speed far away, then a linear slowdown to `min_speed` at the destination.
pub fn speed_modifier(distance_to_destination: f64, config: &SceneConfig) -> f64 {
    if distance_to_destination > config.max_speed_distance {
        return config.max_speed;
    }
    let t = (distance_to_destination / config.max_speed_distance).max(0.0);
    t * (config.max_speed - config.min_speed) + config.min_speed
}

/// Move `pos` toward `target` at `speed` units/s for `dt` seconds.
pub fn step_toward(pos: Point, target: Point, speed: f64, dt: f64) -> Point {
    let d = distance(pos, target);
    if d < MIN_STEP_DISTANCE {
        return pos;
    }
    Point::new(
        pos.x + speed * (target.x - pos.x) * dt / d,
        pos.y + speed * (target.y - pos.y) * dt / d,
    )
}

/// Tether sway. `direction` is always +1 or -1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sway {
    pub amount: f64,
    pub direction: f64,
}

impl Default for Sway {
    fn default() -> Self {
        Self {
            amount: 0.0,
            direction: 1.0,
        }
    }
}

pub fn step_sway(mut sway: Sway, config: &SceneConfig) -> Sway {
    if sway.amount.abs() > config.max_sway {
        sway.direction = -sway.direction;
    }
    sway.amount += config.sway_speed * sway.direction;
    sway
}
