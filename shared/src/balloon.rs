use chrono::{DateTime, Utc};
use rand::Rng;

use crate::config::SceneConfig;
use crate::motion::{
    choose_local_destination, inactivity_fraction, needs_local_destination, pick_destination,
    spawn_position, speed_modifier, step_sway, step_toward, Sway,
};
use crate::point::{distance, Point};
use crate::protocol::UserRecord;

/// Horizontal offset of the tether tail, trailing behind the direction of travel.
const TETHER_TAIL_OFFSET: f64 = 10.0;

/// A user's balloon.
#[derive(Debug, Clone)]
pub struct Balloon {
    pub id: String,
    pub label: String,
    pub color: u32,
    pub pos: Point,
    /// Fixed at creation from login recency.
    pub destination: Point,
    /// Short-lived steering target near `destination`; `None` until first assigned.
    pub local_destination: Option<Point>,
    pub sway: Sway,
    pub rank: Option<u32>,
    pub last_login: DateTime<Utc>,
}

/// Cubic Bézier control points for a balloon's tether, in scene space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TetherCurve {
    pub start: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub end: Point,
}

impl Balloon {
    pub fn spawn<R: Rng + ?Sized>(
        user: &UserRecord,
        now: DateTime<Utc>,
        config: &SceneConfig,
        rng: &mut R,
    ) -> Self {
        let f = inactivity_fraction(user.last_login, now);
        let destination = pick_destination(f, config, rng);
        Self {
            id: user.id.clone(),
            label: user.initials.clone(),
            color: rng.gen::<u32>() & 0xFF_FFFF,
            pos: spawn_position(config, rng),
            destination,
            local_destination: None,
            sway: Sway::default(),
            rank: user.rank,
            last_login: user.last_login,
        }
    }

    pub fn is_featured(&self) -> bool {
        self.rank == Some(1)
    }

    /// Advance one frame: refresh the local destination if needed, move, then sway.
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f64, config: &SceneConfig, rng: &mut R) {
        if needs_local_destination(self.pos, self.local_destination, config) {
            self.local_destination = Some(choose_local_destination(
                self.pos,
                self.destination,
                config,
                rng,
            ));
        }

        let speed = speed_modifier(distance(self.pos, self.destination), config);
        if let Some(target) = self.local_destination {
            self.pos = step_toward(self.pos, target, speed, dt);
        }

        self.sway = step_sway(self.sway, config);
    }

    pub fn tether(&self, config: &SceneConfig) -> TetherCurve {
        let Point { x, y } = self.pos;
        let top = y + config.balloon_radius;
        let len = config.tether_length;
        let heading_right = self
            .local_destination
            .map(|local| local.x - x > 0.0)
            .unwrap_or(false);
        let tail = if heading_right {
            -TETHER_TAIL_OFFSET
        } else {
            TETHER_TAIL_OFFSET
        };

        TetherCurve {
            start: Point::new(x, top),
            ctrl1: Point::new(x + self.sway.amount, top + len * 0.4),
            ctrl2: Point::new(x - self.sway.amount, top + len * 0.7),
            end: Point::new(x + tail, top + len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn user(id: &str, hours_ago: i64, now: DateTime<Utc>) -> UserRecord {
        UserRecord::new(id, id.to_uppercase(), now - Duration::hours(hours_ago))
    }

    #[test]
    fn spawn_places_balloon_near_stall_with_recency_destination() {
        let config = SceneConfig::default();
        let now = Utc::now();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let b = Balloon::spawn(&user("gw", 12, now), now, &config, &mut rng);

        assert_eq!(b.label, "GW");
        assert!(b.local_destination.is_none());
        assert!(b.color <= 0xFF_FFFF);
        assert!((b.pos.x - config.width * 0.5).abs() <= 15.0);
        assert!((b.pos.y - config.height * 0.65).abs() <= 25.0);
        assert!((b.destination.y - 0.375 * config.height).abs() < 1e-6);
    }

    #[test]
    fn first_advance_assigns_local_destination_before_moving() {
        let config = SceneConfig::default();
        let now = Utc::now();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut b = Balloon::spawn(&user("a", 0, now), now, &config, &mut rng);
        let start = b.pos;

        b.advance(1.0 / 60.0, &config, &mut rng);

        assert!(b.local_destination.is_some());
        assert_ne!(b.pos, start);
    }

    #[test]
    fn balloon_at_local_destination_gets_a_new_one() {
        let config = SceneConfig::default();
        let now = Utc::now();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut b = Balloon::spawn(&user("a", 2, now), now, &config, &mut rng);
        b.local_destination = Some(b.pos);

        b.advance(1.0 / 60.0, &config, &mut rng);

        let local = b.local_destination.unwrap();
        assert!(distance(local, b.pos) >= config.arrive_radius);
    }

    #[test]
    fn balloon_eventually_loiters_around_destination() {
        let config = SceneConfig::default();
        let now = Utc::now();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut b = Balloon::spawn(&user("a", 6, now), now, &config, &mut rng);

        // Two simulated minutes at 60 fps.
        for _ in 0..7200 {
            b.advance(1.0 / 60.0, &config, &mut rng);
        }

        let d = distance(b.pos, b.destination);
        assert!(d < config.float_radius + config.arrive_radius + 2.0, "d={d}");
    }

    #[test]
    fn tether_tail_trails_direction_of_travel() {
        let config = SceneConfig::default();
        let now = Utc::now();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut b = Balloon::spawn(&user("a", 1, now), now, &config, &mut rng);
        b.pos = Point::new(100.0, 100.0);
        b.sway.amount = 4.0;

        b.local_destination = Some(Point::new(150.0, 100.0));
        let right = b.tether(&config);
        assert_eq!(right.end.x, 90.0);
        assert_eq!(right.start, Point::new(100.0, 120.0));
        assert_eq!(right.ctrl1.x, 104.0);
        assert_eq!(right.ctrl2.x, 96.0);
        assert!((right.end.y - (120.0 + config.tether_length)).abs() < 1e-9);

        b.local_destination = Some(Point::new(50.0, 100.0));
        assert_eq!(b.tether(&config).end.x, 110.0);
    }

    #[test]
    fn rank_one_is_featured() {
        let config = SceneConfig::default();
        let now = Utc::now();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut u = user("abe", 1, now);
        u.rank = Some(1);
        assert!(Balloon::spawn(&u, now, &config, &mut rng).is_featured());
        u.rank = Some(2);
        assert!(!Balloon::spawn(&u, now, &config, &mut rng).is_featured());
    }
}
