//! Login simulator for the balloon server.
//!
//! Keeps a running server lively:
//! - Periodically records a login for a random existing user
//! - Now and then registers a brand new user
//!
//! Usage: cargo run --bin simulate_logins -- [OPTIONS]
//!
//! Options:
//!   --url URL            Users endpoint (default: http://127.0.0.1:8080/users)
//!   --interval S         Seconds between logins (default: 3)
//!   --new-user-chance P  Chance per tick of registering a new user (default: 0.2)
//!   --duration S         Stop after this many seconds, 0 runs forever (default: 0)

use std::time::{Duration, Instant};

use balloon_shared::protocol::UserRecord;
use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Grace", "Alan", "Edsger", "Barbara", "Dennis", "Ken", "Margaret", "Linus", "Radia",
];
const LAST_NAMES: &[&str] = &[
    "Lovelace", "Hopper", "Turing", "Dijkstra", "Liskov", "Ritchie", "Thompson", "Hamilton",
    "Torvalds", "Perlman",
];

struct Options {
    url: String,
    interval: Duration,
    new_user_chance: f64,
    duration: Option<Duration>,
}

fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().collect();
    let mut opts = Options {
        url: "http://127.0.0.1:8080/users".to_string(),
        interval: Duration::from_secs(3),
        new_user_chance: 0.2,
        duration: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--url" => {
                i += 1;
                opts.url = args.get(i).cloned().unwrap_or(opts.url);
            }
            "--interval" => {
                i += 1;
                let secs: f64 = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(3.0);
                opts.interval = Duration::from_secs_f64(secs.max(0.1));
            }
            "--new-user-chance" => {
                i += 1;
                opts.new_user_chance = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0.2_f64)
                    .clamp(0.0, 1.0);
            }
            "--duration" => {
                i += 1;
                let secs: u64 = args.get(i).and_then(|s| s.parse().ok()).unwrap_or(0);
                opts.duration = (secs > 0).then(|| Duration::from_secs(secs));
            }
            _ => {}
        }
        i += 1;
    }
    opts
}

fn random_user(rng: &mut impl Rng) -> UserRecord {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Ada");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Lovelace");
    let suffix: u32 = rng.gen_range(100..1000);
    let initials: String = [first, last].iter().filter_map(|s| s.chars().next()).collect();

    let mut user = UserRecord::new(
        format!("{}{}{}", first.to_lowercase(), last.to_lowercase(), suffix),
        initials,
        Utc::now(),
    );
    user.name = Some(format!("{} {}", first, last));
    user
}

async fn tick(client: &reqwest::Client, opts: &Options) -> Result<(), reqwest::Error> {
    let mut rng = rand::thread_rng();

    if rng.gen::<f64>() < opts.new_user_chance {
        let user = random_user(&mut rng);
        let resp = client.post(&opts.url).json(&user).send().await?;
        tracing::info!("Registered {} ({})", user.id, resp.status());
        return Ok(());
    }

    let users: Vec<UserRecord> = client
        .get(&opts.url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let Some(user) = users.choose(&mut rng) else {
        tracing::warn!("Roster is empty, nothing to log in");
        return Ok(());
    };

    let login_url = format!("{}/{}/login", opts.url.trim_end_matches('/'), user.id);
    let resp = client.post(&login_url).send().await?;
    tracing::info!("Login for {} ({})", user.id, resp.status());
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let opts = parse_args();
    println!("=== Balloon Login Simulator ===");
    println!("URL: {}", opts.url);
    println!("Interval: {:?}", opts.interval);
    println!("New user chance: {}", opts.new_user_chance);
    println!();

    let client = reqwest::Client::new();
    let start = Instant::now();
    let mut interval = tokio::time::interval(opts.interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        if let Some(limit) = opts.duration {
            if start.elapsed() >= limit {
                break;
            }
        }
        if let Err(e) = tick(&client, &opts).await {
            tracing::warn!("Simulation tick failed: {}", e);
        }
    }

    println!("Simulator stopped after {:?}", start.elapsed());
}
