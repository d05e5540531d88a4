use std::f32::consts::PI;

use balloon_shared::balloon::Balloon;
use balloon_shared::config::SceneConfig;
use balloon_shared::point::Point;
use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;

use crate::constants::{
    color_from_hex, Colors, FEATURED_LABEL_FONT_SIZE, FEATURED_RADIUS, LABEL_FONT_SIZE, Z_BALLOON,
};
use crate::coord::{local_offset, SceneFrame};

use super::core::Scene;
use super::UpdateSet;

const TETHER_WIDTH: f32 = 1.0;
const ROPE_WIDTH: f32 = 1.0;

pub struct BalloonsPlugin;

/// Root entity of one balloon; `index` points into the scene's balloon list,
/// which only ever grows.
#[derive(Component)]
pub(crate) struct BalloonSprite {
    pub(crate) index: usize,
}

#[derive(Component)]
pub(crate) struct Tether {
    pub(crate) index: usize,
}

impl Plugin for BalloonsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (spawn_balloon_sprites, update_balloon_sprites, update_tethers)
                .chain()
                .in_set(UpdateSet::Visuals),
        );
    }
}

fn spawn_balloon_sprites(
    mut commands: Commands,
    scene: Res<Scene>,
    mut spawned: Local<usize>,
) {
    let balloons = scene.state.balloons();
    for (index, balloon) in balloons.iter().enumerate().skip(*spawned) {
        if balloon.is_featured() {
            spawn_featured_balloon(&mut commands, &scene.frame, index, balloon);
        } else {
            spawn_regular_balloon(&mut commands, &scene.frame, &scene.state.config, index, balloon);
        }
    }
    *spawned = balloons.len();
}

fn balloon_translation(frame: &SceneFrame, balloon: &Balloon, index: usize) -> Vec3 {
    // Later balloons draw on top without z-fighting.
    frame.point_to_world(balloon.pos, Z_BALLOON + index as f32 * 0.01)
}

fn label_bundle(text: &str, font_size: f32, offset: Vec2) -> impl Bundle {
    (
        Text2d::new(text),
        TextFont::from_font_size(font_size),
        TextColor(Color::WHITE),
        Transform::from_xyz(offset.x, offset.y, 0.5),
    )
}

fn spawn_regular_balloon(
    commands: &mut Commands,
    frame: &SceneFrame,
    config: &SceneConfig,
    index: usize,
    balloon: &Balloon,
) {
    let radius = config.balloon_radius as f32;
    let fill = color_from_hex(balloon.color);
    let tether = tether_path(balloon, config);

    commands
        .spawn((
            Transform::from_translation(balloon_translation(frame, balloon, index)),
            Visibility::default(),
            BalloonSprite { index },
        ))
        .with_children(|parent| {
            parent.spawn((
                ShapeBuilder::with(&tether)
                    .stroke((color_from_hex(Colors::TETHER), TETHER_WIDTH))
                    .build(),
                Transform::from_xyz(0.0, 0.0, -0.1),
                Tether { index },
            ));
            parent.spawn((
                ShapeBuilder::with(&shapes::Circle {
                    radius,
                    center: Vec2::ZERO,
                })
                .fill(fill)
                .build(),
                Transform::default(),
            ));
            parent.spawn(label_bundle(&balloon.label, LABEL_FONT_SIZE, Vec2::ZERO));
        });
}

/// Hot-air balloon: cone and basket below a striped envelope.
fn spawn_featured_balloon(
    commands: &mut Commands,
    frame: &SceneFrame,
    index: usize,
    balloon: &Balloon,
) {
    let r = FEATURED_RADIUS;
    let envelope = color_from_hex(Colors::FEATURED_ENVELOPE);
    let stripe = color_from_hex(Colors::FEATURED_STRIPE);
    let basket = color_from_hex(Colors::FEATURED_BASKET);

    let on_envelope = |angle: f32| local_offset(r * angle.cos(), r * angle.sin());
    let cone = shapes::Polygon {
        points: vec![
            on_envelope(5.0 * PI / 6.0),
            on_envelope(PI / 6.0),
            local_offset(0.0, r + 25.0),
        ],
        closed: true,
    };

    commands
        .spawn((
            Transform::from_translation(balloon_translation(frame, balloon, index)),
            Visibility::default(),
            BalloonSprite { index },
        ))
        .with_children(|parent| {
            parent.spawn((
                ShapeBuilder::with(&cone).fill(stripe).build(),
                Transform::from_xyz(0.0, 0.0, 0.0),
            ));
            parent.spawn((
                ShapeBuilder::with(&rect(0.0, r + 17.5, 20.0, 15.0))
                    .fill(stripe)
                    .build(),
                Transform::from_xyz(0.0, 0.0, 0.05),
            ));
            parent.spawn((
                ShapeBuilder::with(&shapes::Circle {
                    radius: r,
                    center: Vec2::ZERO,
                })
                .fill(envelope)
                .build(),
                Transform::from_xyz(0.0, 0.0, 0.1),
            ));
            parent.spawn((
                ShapeBuilder::with(&shapes::Ellipse {
                    radii: Vec2::new(45.0, r),
                    center: Vec2::ZERO,
                })
                .fill(stripe)
                .build(),
                Transform::from_xyz(0.0, 0.0, 0.15),
            ));
            parent.spawn((
                ShapeBuilder::with(&shapes::Ellipse {
                    radii: Vec2::new(20.0, r),
                    center: Vec2::ZERO,
                })
                .fill(envelope)
                .build(),
                Transform::from_xyz(0.0, 0.0, 0.2),
            ));
            for x in [-9.0, 0.0, 9.0] {
                parent.spawn((
                    ShapeBuilder::with(&shapes::Line(
                        local_offset(x, r + 25.0),
                        local_offset(x, r + 40.0),
                    ))
                    .stroke((basket, ROPE_WIDTH))
                    .build(),
                    Transform::from_xyz(0.0, 0.0, 0.05),
                ));
            }
            parent.spawn((
                ShapeBuilder::with(&rect(0.0, r + 47.5, 24.0, 15.0))
                    .fill(basket)
                    .build(),
                Transform::from_xyz(0.0, 0.0, 0.05),
            ));
            parent.spawn(label_bundle(
                &balloon.label,
                FEATURED_LABEL_FONT_SIZE,
                Vec2::ZERO,
            ));
        });
}

/// Rectangle centered at a scene-space offset.
fn rect(cx: f32, cy: f32, w: f32, h: f32) -> shapes::Rectangle {
    shapes::Rectangle {
        extents: Vec2::new(w, h),
        origin: shapes::RectangleOrigin::CustomCenter(local_offset(cx, cy)),
        radii: None,
    }
}

/// Tether curve relative to the balloon center, in child-local space.
fn tether_path(balloon: &Balloon, config: &SceneConfig) -> ShapePath {
    let curve = balloon.tether(config);
    let local = |p: Point| {
        local_offset(
            (p.x - balloon.pos.x) as f32,
            (p.y - balloon.pos.y) as f32,
        )
    };
    ShapePath::new()
        .move_to(local(curve.start))
        .cubic_bezier_to(local(curve.ctrl1), local(curve.ctrl2), local(curve.end))
}

fn update_balloon_sprites(
    scene: Res<Scene>,
    mut q_sprites: Query<(&BalloonSprite, &mut Transform)>,
) {
    let balloons = scene.state.balloons();
    for (sprite, mut transform) in &mut q_sprites {
        if let Some(balloon) = balloons.get(sprite.index) {
            transform.translation = balloon_translation(&scene.frame, balloon, sprite.index);
        }
    }
}

fn update_tethers(scene: Res<Scene>, mut q_tethers: Query<(&Tether, &mut Shape)>) {
    let balloons = scene.state.balloons();
    let color = color_from_hex(Colors::TETHER);
    for (tether, mut shape) in &mut q_tethers {
        if let Some(balloon) = balloons.get(tether.index) {
            *shape = ShapeBuilder::with(&tether_path(balloon, &scene.state.config))
                .stroke((color, TETHER_WIDTH))
                .build();
        }
    }
}
