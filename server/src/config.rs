use std::net::SocketAddr;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Start with the demo roster instead of an empty one
    pub seed_demo_users: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            seed_demo_users: true,
        }
    }
}

impl ServerConfig {
    /// Defaults, with `BALLOONS_LISTEN_ADDR` and `BALLOONS_SEED` overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(addr) = std::env::var("BALLOONS_LISTEN_ADDR") {
            config.listen_addr = addr;
        }
        if let Ok(seed) = std::env::var("BALLOONS_SEED") {
            config.seed_demo_users = !matches!(seed.as_str(), "0" | "false" | "no");
        }
        config
    }

    pub fn validate(&self) -> Result<(), String> {
        self.listen_addr
            .parse::<SocketAddr>()
            .map_err(|e| format!("listen_addr {:?} is not a socket address: {}", self.listen_addr, e))?;
        Ok(())
    }
}
