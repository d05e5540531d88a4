use std::f32::consts::TAU;

use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;

use crate::constants::{color_from_hex, Colors, Z_BUSH, Z_FLOWER, Z_GRASS, Z_VENDOR};
use crate::coord::SceneFrame;

use super::core::Scene;

pub struct SceneryPlugin;

const GRASS_FRACTION: f32 = 0.35;

/// Bush anchors and the flowers around each, as fractions of the scene size.
const BUSHES: [((f32, f32), [(f32, f32); 3]); 3] = [
    ((0.1, 0.65), [(0.06, 0.63), (0.13, 0.65), (0.105, 0.625)]),
    ((0.2, 0.95), [(0.17, 0.925), (0.205, 0.929), (0.215, 0.945)]),
    ((0.78, 0.88), [(0.8, 0.86), (0.76, 0.88), (0.775, 0.85)]),
];

/// (dx, dy, radius) around the bush anchor.
const BUSH_PUFFS: [(f32, f32, f32); 6] = [
    (-20.0, -25.0, 20.0),
    (20.0, -25.0, 20.0),
    (0.0, -20.0, 25.0),
    (0.0, -35.0, 20.0),
    (-35.0, -20.0, 15.0),
    (35.0, -20.0, 15.0),
];

const PETALS: usize = 5;
const PETAL_RADII: Vec2 = Vec2::new(4.5, 3.0);
const PETAL_DISTANCE: f32 = 2.25;
const FLOWER_CENTER_RADIUS: f32 = 2.0;

const VENDOR_ANCHOR: (f32, f32) = (0.8, 0.59);
/// Small balloons above the stall roof: (dx, dy, radius, color).
const VENDOR_BALLOONS: [(f32, f32, f32, u32); 4] = [
    (20.0, -40.0, 10.0, 0xff0000),
    (40.0, -50.0, 12.0, 0x00ff00),
    (60.0, -40.0, 10.0, 0x0000ff),
    (80.0, -50.0, 12.0, 0xffff00),
];

impl Plugin for SceneryPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_scenery);
    }
}

fn spawn_scenery(mut commands: Commands, scene: Res<Scene>) {
    let frame = scene.frame;
    spawn_grass(&mut commands, &frame);

    for (anchor, flowers) in BUSHES {
        let (x, y) = (anchor.0 * frame.width, anchor.1 * frame.height);
        spawn_bush(&mut commands, &frame, x, y);
        for (i, (fx, fy)) in flowers.into_iter().enumerate() {
            let petal = Colors::FLOWER_PETALS[i % Colors::FLOWER_PETALS.len()];
            spawn_flower(&mut commands, &frame, fx * frame.width, fy * frame.height, petal);
        }
    }

    spawn_vendor(
        &mut commands,
        &frame,
        VENDOR_ANCHOR.0 * frame.width,
        VENDOR_ANCHOR.1 * frame.height,
    );
}

/// Shapes built from world-space geometry only need their depth.
fn spawn_at_depth(commands: &mut Commands, shape: Shape, z: f32) {
    commands.spawn((shape, Transform::from_xyz(0.0, 0.0, z)));
}

fn scene_rect(frame: &SceneFrame, cx: f32, cy: f32, w: f32, h: f32) -> shapes::Rectangle {
    shapes::Rectangle {
        extents: Vec2::new(w, h),
        origin: shapes::RectangleOrigin::CustomCenter(frame.to_world(cx, cy, 0.0).truncate()),
        radii: None,
    }
}

fn scene_circle(frame: &SceneFrame, x: f32, y: f32, radius: f32) -> shapes::Circle {
    shapes::Circle {
        radius,
        center: frame.to_world(x, y, 0.0).truncate(),
    }
}

fn spawn_grass(commands: &mut Commands, frame: &SceneFrame) {
    let h = frame.height * GRASS_FRACTION;
    let grass = scene_rect(frame, frame.width * 0.5, frame.height - h * 0.5, frame.width, h);
    spawn_at_depth(
        commands,
        ShapeBuilder::with(&grass)
            .fill(color_from_hex(Colors::GRASS))
            .build(),
        Z_GRASS,
    );
}

fn spawn_bush(commands: &mut Commands, frame: &SceneFrame, x: f32, y: f32) {
    let color = color_from_hex(Colors::BUSH);
    let base = shapes::Ellipse {
        radii: Vec2::new(50.0, 20.0),
        center: frame.to_world(x, y, 0.0).truncate(),
    };
    spawn_at_depth(commands, ShapeBuilder::with(&base).fill(color).build(), Z_BUSH);
    for (dx, dy, radius) in BUSH_PUFFS {
        let puff = scene_circle(frame, x + dx, y + dy, radius);
        spawn_at_depth(commands, ShapeBuilder::with(&puff).fill(color).build(), Z_BUSH);
    }
}

fn spawn_flower(commands: &mut Commands, frame: &SceneFrame, x: f32, y: f32, petal: u32) {
    let center = frame.to_world(x, y, Z_FLOWER);
    let petal_color = color_from_hex(petal);
    for i in 0..PETALS {
        let angle = i as f32 * TAU / PETALS as f32;
        let offset = Vec2::from_angle(angle) * PETAL_DISTANCE;
        commands.spawn((
            ShapeBuilder::with(&shapes::Ellipse {
                radii: PETAL_RADII,
                center: Vec2::ZERO,
            })
            .fill(petal_color)
            .build(),
            Transform::from_translation(center + offset.extend(0.0))
                .with_rotation(Quat::from_rotation_z(angle)),
        ));
    }
    commands.spawn((
        ShapeBuilder::with(&shapes::Circle {
            radius: FLOWER_CENTER_RADIUS,
            center: Vec2::ZERO,
        })
        .fill(color_from_hex(Colors::FLOWER_CENTER))
        .build(),
        Transform::from_translation(center + Vec3::Z * 0.01),
    ));
}

fn spawn_vendor(commands: &mut Commands, frame: &SceneFrame, x: f32, y: f32) {
    let string_color = color_from_hex(Colors::STALL_STRING);
    for (dx, dy, radius, color) in VENDOR_BALLOONS {
        let string = shapes::Line(
            frame.to_world(x + dx, y + dy, 0.0).truncate(),
            frame.to_world(x + dx, y, 0.0).truncate(),
        );
        spawn_at_depth(
            commands,
            ShapeBuilder::with(&string).stroke((string_color, 1.0)).build(),
            Z_VENDOR,
        );
        let balloon = scene_circle(frame, x + dx, y + dy, radius);
        spawn_at_depth(
            commands,
            ShapeBuilder::with(&balloon).fill(color_from_hex(color)).build(),
            Z_VENDOR + 0.05,
        );
    }

    let legs = color_from_hex(Colors::STALL_LEGS);
    for dx in [10.0, 90.0] {
        let leg = shapes::Line(
            frame.to_world(x + dx, y, 0.0).truncate(),
            frame.to_world(x + dx, y + 30.0, 0.0).truncate(),
        );
        spawn_at_depth(
            commands,
            ShapeBuilder::with(&leg).stroke((legs, 3.0)).build(),
            Z_VENDOR,
        );
    }

    let boxes = [
        ((x + 50.0, y - 15.0, 100.0, 30.0), Colors::STALL_ROOF, 0.1),
        ((x + 50.0, y + 60.0, 120.0, 60.0), Colors::STALL_BODY, 0.1),
        ((x + 50.0, y + 65.0, 100.0, 50.0), Colors::STALL_PANEL, 0.2),
    ];
    for ((cx, cy, w, h), color, dz) in boxes {
        let rect = scene_rect(frame, cx, cy, w, h);
        spawn_at_depth(
            commands,
            ShapeBuilder::with(&rect).fill(color_from_hex(color)).build(),
            Z_VENDOR + dz,
        );
    }

    commands.spawn((
        Text2d::new("MX"),
        TextFont::from_font_size(26.0),
        TextColor(color_from_hex(Colors::STALL_BODY)),
        Transform::from_translation(frame.to_world(x + 50.0, y + 65.0, Z_VENDOR + 0.3)),
    ));
}
