use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;

use balloon_shared::config::FeedConfig;
use balloon_shared::error::SyncError;
use balloon_shared::protocol::{parse_snapshot, UserRecord};
use bevy::prelude::Resource;

#[derive(Debug, Clone)]
pub enum FeedEvent {
    Snapshot(Vec<UserRecord>),
    Failed(String),
}

/// Receiving end of the background snapshot poller. The poller owns the
/// network; the render loop only drains events.
#[derive(Resource)]
pub struct SnapshotFeed {
    pub users_url: String,
    event_rx: Mutex<Receiver<FeedEvent>>,
}

impl SnapshotFeed {
    pub fn start(config: FeedConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel::<FeedEvent>();
        let users_url = config.users_url.clone();

        #[cfg(not(target_arch = "wasm32"))]
        spawn_native_feed_thread(config, event_tx);

        #[cfg(target_arch = "wasm32")]
        spawn_wasm_feed_task(config, event_tx);

        Self {
            users_url,
            event_rx: Mutex::new(event_rx),
        }
    }

    pub fn poll_events(&self) -> Vec<FeedEvent> {
        let mut out = Vec::new();
        if let Ok(rx) = self.event_rx.lock() {
            while let Ok(evt) = rx.try_recv() {
                out.push(evt);
            }
        }
        out
    }

    #[cfg(test)]
    pub fn test_stub_with_sender() -> (Self, Sender<FeedEvent>) {
        let (event_tx, event_rx) = mpsc::channel::<FeedEvent>();
        (
            Self {
                users_url: "http://test.invalid/users".to_string(),
                event_rx: Mutex::new(event_rx),
            },
            event_tx,
        )
    }
}

/// One GET of the full user snapshot.
pub async fn fetch_snapshot(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<UserRecord>, SyncError> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| SyncError::Transport(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(SyncError::Status(status.as_u16()));
    }

    let body = resp
        .text()
        .await
        .map_err(|e| SyncError::Transport(e.to_string()))?;
    parse_snapshot(&body)
}

fn to_event(result: Result<Vec<UserRecord>, SyncError>) -> FeedEvent {
    match result {
        Ok(users) => FeedEvent::Snapshot(users),
        Err(e) => FeedEvent::Failed(e.to_string()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_native_feed_thread(config: FeedConfig, event_tx: Sender<FeedEvent>) {
    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .enable_time()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                let _ = event_tx.send(FeedEvent::Failed(format!("no async runtime: {e}")));
                return;
            }
        };

        rt.block_on(async move {
            let client = match reqwest::Client::builder()
                .timeout(config.request_timeout())
                .build()
            {
                Ok(client) => client,
                Err(e) => {
                    let _ = event_tx.send(FeedEvent::Failed(format!("no HTTP client: {e}")));
                    return;
                }
            };

            let mut interval = tokio::time::interval(config.fetch_interval());
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let event = to_event(fetch_snapshot(&client, &config.users_url).await);
                if event_tx.send(event).is_err() {
                    // Render loop is gone.
                    break;
                }
            }
        });
    });
}

#[cfg(target_arch = "wasm32")]
fn spawn_wasm_feed_task(config: FeedConfig, event_tx: Sender<FeedEvent>) {
    use futures_util::future::{select, Either};
    use gloo_timers::future::TimeoutFuture;

    wasm_bindgen_futures::spawn_local(async move {
        let client = reqwest::Client::new();
        let interval_ms = config.fetch_interval().as_millis() as u32;
        let timeout_ms = config.request_timeout().as_millis() as u32;

        loop {
            let fetch = Box::pin(fetch_snapshot(&client, &config.users_url));
            let timeout = Box::pin(TimeoutFuture::new(timeout_ms));
            let event = match select(fetch, timeout).await {
                Either::Left((result, _)) => to_event(result),
                Either::Right(_) => FeedEvent::Failed(
                    SyncError::Transport("request timed out".to_string()).to_string(),
                ),
            };
            if event_tx.send(event).is_err() {
                break;
            }
            TimeoutFuture::new(interval_ms).await;
        }
    });
}
