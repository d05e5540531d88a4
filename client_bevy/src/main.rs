mod constants;
mod coord;
mod game;
mod shared;

use balloon_shared::config::{FeedConfig, SceneConfig};
use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};
use bevy_prototype_lyon::prelude::ShapePlugin;

use constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use game::{BalloonsPlugin, CloudsPlugin, CorePlugin, HudPlugin, SceneryPlugin, SyncPlugin};

fn main() {
    let scene = SceneConfig::default();
    let feed = FeedConfig {
        users_url: users_url_from_env_or_location(),
        ..FeedConfig::default()
    };

    if let Err(e) = validate(&scene, &feed) {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Balloon Park".to_string(),
                resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                present_mode: PresentMode::AutoVsync,
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(ShapePlugin)
        .add_plugins(CorePlugin { scene, feed })
        .add_plugins(SceneryPlugin)
        .add_plugins(CloudsPlugin)
        .add_plugins(BalloonsPlugin)
        .add_plugins(SyncPlugin)
        .add_plugins(HudPlugin)
        .run();
}

fn validate(scene: &SceneConfig, feed: &FeedConfig) -> Result<(), String> {
    scene.validate()?;
    feed.validate()?;
    url::Url::parse(&feed.users_url).map_err(|e| format!("users url {}: {e}", feed.users_url))?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn users_url_from_env_or_location() -> String {
    std::env::var("BALLOONS_USERS_URL").unwrap_or_else(|_| FeedConfig::default().users_url)
}

#[cfg(target_arch = "wasm32")]
fn users_url_from_env_or_location() -> String {
    let Some(window) = web_sys::window() else {
        return FeedConfig::default().users_url;
    };

    let location = window.location();
    let host = location
        .host()
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "127.0.0.1:8080".to_string());
    let scheme = if location.protocol().ok().as_deref() == Some("https:") {
        "https"
    } else {
        "http"
    };

    format!("{scheme}://{host}/users")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        assert!(validate(&SceneConfig::default(), &FeedConfig::default()).is_ok());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn users_url_falls_back_to_feed_default() {
        if std::env::var("BALLOONS_USERS_URL").is_err() {
            assert_eq!(users_url_from_env_or_location(), FeedConfig::default().users_url);
        }
    }

    #[test]
    fn malformed_users_url_is_rejected() {
        let feed = FeedConfig {
            users_url: "not a url".to_string(),
            ..FeedConfig::default()
        };
        let err = validate(&SceneConfig::default(), &feed).unwrap_err();
        assert!(err.contains("not a url"));
    }
}
