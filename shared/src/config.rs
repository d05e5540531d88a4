use std::time::Duration;

/// Scene geometry and motion tuning. All lengths are scene units (pixels of
/// the logical canvas), all speeds are units per second.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneConfig {
    pub width: f64,
    pub height: f64,
    pub balloon_radius: f64,
    /// Radius of the wandering circle around a balloon's destination
    pub float_radius: f64,
    /// A local destination closer than this counts as reached
    pub arrive_radius: f64,
    /// Beyond this distance from the destination balloons move at `max_speed`
    pub max_speed_distance: f64,
    pub max_speed: f64,
    pub min_speed: f64,
    /// Sway added per frame
    pub sway_speed: f64,
    pub max_sway: f64,
    pub tether_length: f64,
    /// Upper bound for a single frame step (seconds)
    pub max_frame_step: f64,
    pub cloud_cap: usize,
    /// Per-frame chance of spawning a cloud when allowed
    pub cloud_spawn_chance: f64,
    /// How far past the right edge a cloud travels before removal
    pub cloud_margin: f64,
    pub cloud_spawn_x: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let width = 450.0;
        let balloon_radius = 20.0;
        Self {
            width,
            height: width * (16.0 / 9.0),
            balloon_radius,
            float_radius: 70.0,
            arrive_radius: 5.0,
            max_speed_distance: 200.0,
            max_speed: 25.0,
            min_speed: 5.0,
            sway_speed: 0.05,
            max_sway: 12.0,
            tether_length: balloon_radius * 3.5,
            max_frame_step: 0.25,
            cloud_cap: 6,
            cloud_spawn_chance: 0.01,
            cloud_margin: 100.0,
            cloud_spawn_x: -125.0,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err("width must be finite and > 0".to_string());
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err("height must be finite and > 0".to_string());
        }
        if !self.float_radius.is_finite() || self.float_radius <= self.arrive_radius {
            return Err("float_radius must be finite and > arrive_radius".to_string());
        }
        if !self.arrive_radius.is_finite() || self.arrive_radius <= 0.0 {
            return Err("arrive_radius must be finite and > 0".to_string());
        }
        if !self.max_speed_distance.is_finite() || self.max_speed_distance <= 0.0 {
            return Err("max_speed_distance must be finite and > 0".to_string());
        }
        if !self.min_speed.is_finite() || self.min_speed < 0.0 {
            return Err("min_speed must be finite and >= 0".to_string());
        }
        if !self.max_speed.is_finite() || self.max_speed < self.min_speed {
            return Err("max_speed must be finite and >= min_speed".to_string());
        }
        if !self.max_frame_step.is_finite() || self.max_frame_step <= 0.0 {
            return Err("max_frame_step must be finite and > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.cloud_spawn_chance) {
            return Err("cloud_spawn_chance must be within [0, 1]".to_string());
        }
        Ok(())
    }
}

/// Where and how often the user snapshot is polled.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedConfig {
    pub users_url: String,
    pub fetch_interval_secs: f64,
    pub request_timeout_secs: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            users_url: "http://127.0.0.1:8080/users".to_string(),
            fetch_interval_secs: 5.0,
            request_timeout_secs: 4.0,
        }
    }
}

impl FeedConfig {
    pub fn fetch_interval(&self) -> Duration {
        Duration::from_secs_f64(self.fetch_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.users_url.trim().is_empty() {
            return Err("users_url must not be empty".to_string());
        }
        if !self.fetch_interval_secs.is_finite() || self.fetch_interval_secs <= 0.0 {
            return Err("fetch_interval_secs must be finite and > 0".to_string());
        }
        if !self.request_timeout_secs.is_finite() || self.request_timeout_secs <= 0.0 {
            return Err("request_timeout_secs must be finite and > 0".to_string());
        }
        Ok(())
    }
}
