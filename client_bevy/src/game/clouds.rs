use std::collections::HashSet;

use balloon_shared::clouds::{Cloud, CloudSize};
use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;

use crate::constants::{color_from_hex, Colors, Z_CLOUD};
use crate::coord::{local_offset, SceneFrame};

use super::core::Scene;
use super::UpdateSet;

pub struct CloudsPlugin;

/// Puff circles as (dx, dy, radius) around the cloud center, scene space.
const LARGE_PUFFS: [(f32, f32, f32); 5] = [
    (0.0, 0.0, 40.0),
    (25.0, -30.0, 35.0),
    (-25.0, -30.0, 35.0),
    (50.0, 0.0, 40.0),
    (-50.0, 0.0, 40.0),
];
const SMALL_PUFFS: [(f32, f32, f32); 5] = [
    (0.0, 0.0, 20.0),
    (15.0, -15.0, 18.0),
    (-15.0, -15.0, 18.0),
    (25.0, 0.0, 20.0),
    (-25.0, 0.0, 20.0),
];

#[derive(Component)]
pub(crate) struct CloudSprite {
    pub(crate) id: u64,
}

impl Plugin for CloudsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, sync_cloud_sprites.in_set(UpdateSet::Visuals));
    }
}

pub(crate) fn puffs(size: CloudSize) -> &'static [(f32, f32, f32)] {
    match size {
        CloudSize::Large => &LARGE_PUFFS,
        CloudSize::Small => &SMALL_PUFFS,
    }
}

fn cloud_translation(frame: &SceneFrame, cloud: &Cloud) -> Vec3 {
    frame.to_world(cloud.x as f32, cloud.y as f32, Z_CLOUD)
}

fn spawn_cloud(commands: &mut Commands, frame: &SceneFrame, cloud: &Cloud) {
    let fill = color_from_hex(Colors::CLOUD);
    commands
        .spawn((
            Transform::from_translation(cloud_translation(frame, cloud)),
            Visibility::default(),
            CloudSprite { id: cloud.id },
        ))
        .with_children(|parent| {
            for &(dx, dy, radius) in puffs(cloud.size) {
                parent.spawn(
                    ShapeBuilder::with(&shapes::Circle {
                        radius,
                        center: local_offset(dx, dy),
                    })
                    .fill(fill)
                    .build(),
                );
            }
        });
}

/// Keep one sprite per live cloud: move survivors, drop the ones the field
/// removed, add the ones it spawned.
fn sync_cloud_sprites(
    mut commands: Commands,
    scene: Res<Scene>,
    mut q_sprites: Query<(Entity, &CloudSprite, &mut Transform)>,
) {
    let clouds = scene.state.clouds.clouds();
    let mut drawn = HashSet::with_capacity(clouds.len());

    for (entity, sprite, mut transform) in &mut q_sprites {
        match clouds.iter().find(|c| c.id == sprite.id) {
            Some(cloud) => {
                transform.translation = cloud_translation(&scene.frame, cloud);
                drawn.insert(sprite.id);
            }
            None => commands.entity(entity).despawn(),
        }
    }

    for cloud in clouds.iter().filter(|c| !drawn.contains(&c.id)) {
        spawn_cloud(&mut commands, &scene.frame, cloud);
    }
}
