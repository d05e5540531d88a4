use rand::Rng;

use crate::config::SceneConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudSize {
    Large,
    Small,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub size: CloudSize,
    /// Scene units per second, always drifting right
    pub speed: f64,
}

/// Clouds drifting across the sky. Bounded by `SceneConfig::cloud_cap`.
#[derive(Debug, Clone)]
pub struct CloudField {
    clouds: Vec<Cloud>,
    next_id: u64,
}

impl CloudField {
    pub fn empty() -> Self {
        Self {
            clouds: Vec::new(),
            next_id: 1,
        }
    }

    /// The three clouds the sky starts with.
    pub fn with_initial_clouds(config: &SceneConfig) -> Self {
        let mut field = Self::empty();
        let (w, h) = (config.width, config.height);
        field.push(w * 0.2, h * 0.1, CloudSize::Large, 3.0);
        field.push(w * 0.8, h * 0.2, CloudSize::Small, 1.8);
        field.push(-w * 0.1, h * 0.17, CloudSize::Large, 1.92);
        field
    }

    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }

    pub fn len(&self) -> usize {
        self.clouds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clouds.is_empty()
    }

    fn push(&mut self, x: f64, y: f64, size: CloudSize, speed: f64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.clouds.push(Cloud {
            id,
            x,
            y,
            size,
            speed,
        });
        id
    }

    /// Maybe spawn one cloud off the left edge, drift all clouds, and drop
    /// the ones that left the right edge.
    pub fn step<R: Rng + ?Sized>(&mut self, dt: f64, config: &SceneConfig, rng: &mut R) {
        let entering = self.clouds.iter().any(|c| c.x < 0.0);
        if self.clouds.len() < config.cloud_cap
            && rng.gen::<f64>() > 1.0 - config.cloud_spawn_chance
            && !entering
        {
            let height_variance = 0.15 * rng.gen::<f64>() - 0.1;
            let size = if rng.gen::<f64>() > 0.5 {
                CloudSize::Large
            } else {
                CloudSize::Small
            };
            let speed = 1.0 + 7.0 * rng.gen::<f64>();
            self.push(
                config.cloud_spawn_x,
                config.height * (0.12 + height_variance),
                size,
                speed,
            );
        }

        for cloud in &mut self.clouds {
            cloud.x += cloud.speed * dt;
        }

        let limit = config.width + config.cloud_margin;
        self.clouds.retain(|c| c.x <= limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn starts_with_three_clouds() {
        let config = SceneConfig::default();
        let field = CloudField::with_initial_clouds(&config);
        assert_eq!(field.len(), 3);
        let ids: Vec<u64> = field.clouds().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn population_never_exceeds_cap() {
        let config = SceneConfig {
            cloud_spawn_chance: 1.0,
            ..Default::default()
        };
        let mut field = CloudField::empty();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..20_000 {
            field.step(1.0, &config, &mut rng);
            assert!(field.len() <= config.cloud_cap);
        }
    }

    #[test]
    fn no_spawn_while_a_cloud_is_entering() {
        let config = SceneConfig {
            cloud_spawn_chance: 1.0,
            ..Default::default()
        };
        let mut field = CloudField::empty();
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        field.step(0.0, &config, &mut rng);
        assert_eq!(field.len(), 1);
        // Still at x = -125 with dt = 0, so nothing else may spawn.
        for _ in 0..10 {
            field.step(0.0, &config, &mut rng);
        }
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn cloud_past_right_margin_is_removed_on_next_step() {
        let config = SceneConfig {
            cloud_spawn_chance: 0.0,
            ..Default::default()
        };
        let mut field = CloudField::empty();
        field.push(config.width + config.cloud_margin - 0.5, 50.0, CloudSize::Small, 1.0);
        field.push(10.0, 50.0, CloudSize::Large, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(13);

        field.step(1.0, &config, &mut rng);

        assert_eq!(field.len(), 1);
        assert_eq!(field.clouds()[0].size, CloudSize::Large);
    }

    #[test]
    fn removes_every_exited_cloud_in_one_step() {
        let config = SceneConfig {
            cloud_spawn_chance: 0.0,
            ..Default::default()
        };
        let mut field = CloudField::empty();
        let far = config.width + config.cloud_margin + 1.0;
        field.push(far, 10.0, CloudSize::Small, 1.0);
        field.push(far + 5.0, 20.0, CloudSize::Small, 1.0);
        field.push(far + 10.0, 30.0, CloudSize::Large, 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(14);

        field.step(0.016, &config, &mut rng);

        assert!(field.is_empty());
    }

    #[test]
    fn spawned_clouds_have_fresh_ids_and_sane_speed() {
        let config = SceneConfig {
            cloud_spawn_chance: 1.0,
            ..Default::default()
        };
        let mut field = CloudField::with_initial_clouds(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(15);
        // Let the initial off-screen cloud clear the left edge first.
        for _ in 0..200 {
            field.step(1.0, &config, &mut rng);
        }
        for c in field.clouds() {
            if c.id > 3 {
                assert!((1.0..=8.0).contains(&c.speed));
            }
        }
        assert!(field.clouds().iter().any(|c| c.id > 3));
    }
}
