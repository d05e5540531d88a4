use bevy::prelude::*;
use chrono::Utc;

use crate::shared::connection::{FeedEvent, SnapshotFeed};
use crate::shared::feed_state::FeedStatus;

use super::core::Scene;
use super::UpdateSet;

pub struct SyncPlugin;

impl Plugin for SyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, apply_feed_events.in_set(UpdateSet::Sync));
    }
}

/// Merge every snapshot that arrived since the last frame. Failures only
/// touch the status; the scene keeps animating what it already has.
fn apply_feed_events(
    feed: Res<SnapshotFeed>,
    mut scene: ResMut<Scene>,
    mut status: ResMut<FeedStatus>,
    time: Res<Time>,
) {
    for evt in feed.poll_events() {
        match evt {
            FeedEvent::Snapshot(users) => {
                let Scene { state, rng, .. } = &mut *scene;
                let report = state.merge_snapshot(&users, Utc::now(), rng);
                if report.added > 0 {
                    info!(
                        "Snapshot: {} new balloons, {} refreshed ({} total)",
                        report.added,
                        report.refreshed,
                        state.balloon_count()
                    );
                } else {
                    debug!("Snapshot: {} refreshed", report.refreshed);
                }
                status.record_success(users.len(), time.elapsed_secs_f64());
            }
            FeedEvent::Failed(reason) => {
                warn!("Snapshot fetch failed: {reason}");
                status.record_failure(reason);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::feed_state::FeedPhase;
    use balloon_shared::config::SceneConfig;
    use balloon_shared::protocol::UserRecord;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn make_test_app_with_events() -> (App, std::sync::mpsc::Sender<FeedEvent>) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(Scene::new(
            SceneConfig::default(),
            ChaCha8Rng::seed_from_u64(7),
        ));
        app.init_resource::<FeedStatus>();

        let (feed, event_tx) = SnapshotFeed::test_stub_with_sender();
        app.insert_resource(feed);

        app.add_systems(Update, apply_feed_events);

        (app, event_tx)
    }

    fn users() -> Vec<UserRecord> {
        let now = Utc::now();
        vec![
            UserRecord::new("honestabe", "AL", now - chrono::Duration::hours(30)),
            UserRecord::new("jfk", "JFK", now - chrono::Duration::minutes(1)),
        ]
    }

    #[test]
    fn snapshot_adds_balloons_and_marks_feed_healthy() {
        let (mut app, tx) = make_test_app_with_events();
        tx.send(FeedEvent::Snapshot(users())).unwrap();

        app.update();

        let scene = app.world().resource::<Scene>();
        assert_eq!(scene.state.balloon_count(), 2);
        assert!(scene.state.balloon("jfk").is_some());
        let status = app.world().resource::<FeedStatus>();
        assert_eq!(status.phase, FeedPhase::Healthy);
        assert_eq!(status.users_in_last_snapshot, 2);
    }

    #[test]
    fn repeated_snapshot_does_not_duplicate_balloons() {
        let (mut app, tx) = make_test_app_with_events();
        tx.send(FeedEvent::Snapshot(users())).unwrap();
        app.update();
        tx.send(FeedEvent::Snapshot(users())).unwrap();
        app.update();

        assert_eq!(app.world().resource::<Scene>().state.balloon_count(), 2);
    }

    #[test]
    fn failure_leaves_scene_untouched() {
        let (mut app, tx) = make_test_app_with_events();
        tx.send(FeedEvent::Snapshot(users())).unwrap();
        app.update();

        tx.send(FeedEvent::Failed("HTTP status 503".to_string()))
            .unwrap();
        app.update();

        assert_eq!(app.world().resource::<Scene>().state.balloon_count(), 2);
        let status = app.world().resource::<FeedStatus>();
        assert!(matches!(&status.phase, FeedPhase::Failing(r) if r.contains("503")));
        assert_eq!(status.consecutive_failures, 1);
        assert_eq!(status.users_in_last_snapshot, 2);
    }
}
