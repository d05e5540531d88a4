use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::balloon::Balloon;
use crate::clouds::CloudField;
use crate::config::SceneConfig;
use crate::protocol::UserRecord;

/// Outcome of merging one snapshot into the scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub added: usize,
    pub refreshed: usize,
}

/// Everything that moves in the scene. Owned by whoever drives the frame
/// clock; sync results are merged into it on the same timeline.
pub struct SceneState {
    pub config: SceneConfig,
    balloons: Vec<Balloon>,
    index_by_id: HashMap<String, usize>,
    pub clouds: CloudField,
}

impl SceneState {
    pub fn new(config: SceneConfig) -> Self {
        let clouds = CloudField::with_initial_clouds(&config);
        Self {
            config,
            balloons: Vec::new(),
            index_by_id: HashMap::new(),
            clouds,
        }
    }

    pub fn balloons(&self) -> &[Balloon] {
        &self.balloons
    }

    pub fn balloon(&self, id: &str) -> Option<&Balloon> {
        self.index_by_id.get(id).map(|&i| &self.balloons[i])
    }

    pub fn balloon_count(&self) -> usize {
        self.balloons.len()
    }

    /// Reconcile a user snapshot: unknown ids get a new balloon, known ids only
    /// get their login timestamp refreshed. Balloons are never removed and an
    /// existing balloon's destination is never recomputed.
    pub fn merge_snapshot<R: Rng + ?Sized>(
        &mut self,
        users: &[UserRecord],
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> MergeReport {
        let mut report = MergeReport::default();
        for user in users {
            if let Some(&i) = self.index_by_id.get(&user.id) {
                self.balloons[i].last_login = user.last_login;
                report.refreshed += 1;
                continue;
            }

            let balloon = Balloon::spawn(user, now, &self.config, rng);
            self.index_by_id.insert(user.id.clone(), self.balloons.len());
            self.balloons.push(balloon);
            report.added += 1;
        }
        report
    }

    /// Advance one frame. `dt` is clamped to the configured maximum step.
    pub fn tick<R: Rng + ?Sized>(&mut self, dt: f64, rng: &mut R) {
        let dt = dt.clamp(0.0, self.config.max_frame_step);
        self.clouds.step(dt, &self.config, rng);
        for balloon in &mut self.balloons {
            balloon.advance(dt, &self.config, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{destination_x_range, destination_y_fraction, inactivity_fraction};
    use chrono::Duration;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn roster(now: DateTime<Utc>) -> Vec<UserRecord> {
        vec![
            UserRecord::new("honestabe", "AL", now - Duration::hours(30)),
            UserRecord::new("georgewash", "GW", now - Duration::hours(54)),
            UserRecord::new("fdr", "FDR", now - Duration::hours(2)),
            UserRecord::new("jfk", "JFK", now - Duration::minutes(5)),
        ]
    }

    #[test]
    fn first_merge_adds_every_user() {
        let now = Utc::now();
        let mut scene = SceneState::new(SceneConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        let report = scene.merge_snapshot(&roster(now), now, &mut rng);

        assert_eq!(report, MergeReport { added: 4, refreshed: 0 });
        assert_eq!(scene.balloon_count(), 4);
        assert_eq!(scene.balloon("fdr").unwrap().label, "FDR");
    }

    #[test]
    fn identical_snapshot_is_idempotent() {
        let now = Utc::now();
        let mut scene = SceneState::new(SceneConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        let users = roster(now);
        scene.merge_snapshot(&users, now, &mut rng);
        scene.tick(0.1, &mut rng);
        let before: Vec<_> = scene
            .balloons()
            .iter()
            .map(|b| (b.id.clone(), b.pos, b.destination))
            .collect();

        let report = scene.merge_snapshot(&users, now, &mut rng);

        assert_eq!(report, MergeReport { added: 0, refreshed: 4 });
        let after: Vec<_> = scene
            .balloons()
            .iter()
            .map(|b| (b.id.clone(), b.pos, b.destination))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn refresh_only_touches_timestamp() {
        let now = Utc::now();
        let mut scene = SceneState::new(SceneConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let mut users = roster(now);
        scene.merge_snapshot(&users, now, &mut rng);
        let dest_before = scene.balloon("georgewash").unwrap().destination;

        users[1].last_login = now;
        scene.merge_snapshot(&users, now, &mut rng);

        let gw = scene.balloon("georgewash").unwrap();
        assert_eq!(gw.last_login, now);
        assert_eq!(gw.destination, dest_before);
    }

    #[test]
    fn one_new_user_appends_one_balloon_with_recency_destination() {
        let now = Utc::now();
        let config = SceneConfig::default();
        let mut scene = SceneState::new(config.clone());
        let mut rng = ChaCha8Rng::seed_from_u64(24);
        let mut users = roster(now);
        scene.merge_snapshot(&users, now, &mut rng);

        let newcomer = UserRecord::new("lbj", "LBJ", now - Duration::hours(12));
        users.push(newcomer.clone());
        let report = scene.merge_snapshot(&users, now, &mut rng);

        assert_eq!(report.added, 1);
        assert_eq!(scene.balloon_count(), 5);
        let b = &scene.balloons()[4];
        assert_eq!(b.id, "lbj");

        let f = inactivity_fraction(newcomer.last_login, now);
        assert!((b.destination.y - destination_y_fraction(f) * config.height).abs() < 1e-6);
        assert!((b.destination.y - 0.375 * config.height).abs() < 1e-6);
        let (lo, hi) = destination_x_range(f, config.width);
        assert!(b.destination.x >= lo && b.destination.x <= hi);
    }

    #[test]
    fn users_missing_from_snapshot_keep_their_balloons() {
        let now = Utc::now();
        let mut scene = SceneState::new(SceneConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(25);
        scene.merge_snapshot(&roster(now), now, &mut rng);

        scene.merge_snapshot(&[], now, &mut rng);

        assert_eq!(scene.balloon_count(), 4);
    }

    #[test]
    fn duplicate_ids_in_one_snapshot_make_one_balloon() {
        let now = Utc::now();
        let mut scene = SceneState::new(SceneConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(26);
        let twice = vec![
            UserRecord::new("a", "A", now - Duration::hours(3)),
            UserRecord::new("a", "A", now - Duration::hours(1)),
        ];

        let report = scene.merge_snapshot(&twice, now, &mut rng);

        assert_eq!(report, MergeReport { added: 1, refreshed: 1 });
        assert_eq!(scene.balloon("a").unwrap().last_login, now - Duration::hours(1));
    }

    #[test]
    fn tick_clamps_long_frames() {
        let now = Utc::now();
        let config = SceneConfig::default();
        let mut scene = SceneState::new(config.clone());
        let mut rng = ChaCha8Rng::seed_from_u64(27);
        scene.merge_snapshot(&roster(now)[..1], now, &mut rng);
        let start = scene.balloons()[0].pos;

        scene.tick(30.0, &mut rng);

        let moved = crate::point::distance(start, scene.balloons()[0].pos);
        assert!(moved <= config.max_speed * config.max_frame_step + 1e-9);
    }
}
