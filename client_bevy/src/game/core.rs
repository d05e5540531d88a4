use balloon_shared::config::{FeedConfig, SceneConfig};
use balloon_shared::scene::SceneState;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::constants::{color_from_hex, Colors};
use crate::coord::SceneFrame;
use crate::shared::connection::SnapshotFeed;
use crate::shared::feed_state::FeedStatus;

#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum UpdateSet {
    Sync,
    Simulate,
    Visuals,
}

/// The live scene plus the randomness that drives it.
#[derive(Resource)]
pub(crate) struct Scene {
    pub(crate) state: SceneState,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) frame: SceneFrame,
}

impl Scene {
    pub(crate) fn new(config: SceneConfig, rng: ChaCha8Rng) -> Self {
        let frame = SceneFrame::new(&config);
        Self {
            state: SceneState::new(config),
            rng,
            frame,
        }
    }
}

pub struct CorePlugin {
    pub scene: SceneConfig,
    pub feed: FeedConfig,
}

#[derive(Component)]
struct MainCamera;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let feed = SnapshotFeed::start(self.feed.clone());
        info!("Polling {} every {:?}", feed.users_url, self.feed.fetch_interval());

        app.insert_resource(Scene::new(self.scene.clone(), ChaCha8Rng::from_entropy()))
            .insert_resource(feed)
            .init_resource::<FeedStatus>()
            .insert_resource(ClearColor(color_from_hex(Colors::SKY)))
            .configure_sets(
                Update,
                (UpdateSet::Sync, UpdateSet::Simulate, UpdateSet::Visuals).chain(),
            )
            .add_systems(Startup, setup_camera)
            .add_systems(Update, advance_scene.in_set(UpdateSet::Simulate))
            .add_systems(Update, fit_camera_to_canvas);
    }
}

fn setup_camera(mut commands: Commands) {
    // WebGL2 MSAA is expensive (often CPU fallback); lyon already provides AA via tessellation.
    #[cfg(target_arch = "wasm32")]
    let msaa = Msaa::Off;
    #[cfg(not(target_arch = "wasm32"))]
    let msaa = Msaa::Sample4;

    commands.spawn((Camera2d, msaa, MainCamera));
}

/// The frame clock: one motion step for every balloon and cloud.
pub(crate) fn advance_scene(mut scene: ResMut<Scene>, time: Res<Time>) {
    let Scene { state, rng, .. } = &mut *scene;
    state.tick(time.delta_secs_f64(), rng);
}

fn fit_camera_to_canvas(
    scene: Res<Scene>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut q_projection: Query<&mut Projection, With<MainCamera>>,
) {
    let Ok(window) = q_window.single() else {
        return;
    };

    if window.width() <= 0.0 || window.height() <= 0.0 {
        return;
    }

    let scale_x = scene.frame.width / window.width();
    let scale_y = scene.frame.height / window.height();
    let target_scale = scale_x.max(scale_y).max(0.0001);

    for mut projection in &mut q_projection {
        if let Projection::Orthographic(ortho) = &mut *projection {
            ortho.scale = target_scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balloon_shared::protocol::UserRecord;
    use chrono::Utc;
    use std::time::Duration;

    #[test]
    fn advance_scene_moves_balloons_with_frame_time() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        let mut scene = Scene::new(SceneConfig::default(), ChaCha8Rng::seed_from_u64(1));
        let Scene { state, rng, .. } = &mut scene;
        state.merge_snapshot(&[UserRecord::new("a", "A", Utc::now())], Utc::now(), rng);
        let start = scene.state.balloons()[0].pos;
        app.insert_resource(scene);
        app.add_systems(Update, advance_scene);

        app.update();
        std::thread::sleep(Duration::from_millis(20));
        app.update();

        let scene = app.world().resource::<Scene>();
        assert!(scene.state.balloons()[0].local_destination.is_some());
        assert_ne!(scene.state.balloons()[0].pos, start);
    }
}
