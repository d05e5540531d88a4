use bevy::prelude::*;

use crate::constants::{color_from_hex, Colors};
use crate::shared::feed_state::FeedStatus;

use super::core::Scene;
use super::UpdateSet;

pub struct HudPlugin;

const HUD_LEFT: f32 = 8.0;
const HUD_TOP: f32 = 8.0;
const HUD_FONT_SIZE: f32 = 12.0;
const TOGGLE_KEY: KeyCode = KeyCode::F3;

#[derive(Component)]
struct HudStatusText;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud).add_systems(
            Update,
            (toggle_hud, update_status_text)
                .chain()
                .in_set(UpdateSet::Visuals),
        );
    }
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(HUD_LEFT),
            top: Val::Px(HUD_TOP),
            ..default()
        },
        Text::new("feed: waiting"),
        TextFont::from_font_size(HUD_FONT_SIZE),
        TextColor(color_from_hex(Colors::HUD_TEXT).with_alpha(0.85)),
        HudStatusText,
    ));
}

fn toggle_hud(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut q_text: Query<&mut Visibility, With<HudStatusText>>,
) {
    let Some(keys) = keys else {
        return;
    };
    if !keys.just_pressed(TOGGLE_KEY) {
        return;
    }
    for mut visibility in &mut q_text {
        *visibility = match *visibility {
            Visibility::Hidden => Visibility::Inherited,
            _ => Visibility::Hidden,
        };
    }
}

fn update_status_text(
    status: Res<FeedStatus>,
    scene: Res<Scene>,
    time: Res<Time>,
    mut q_text: Query<&mut Text, With<HudStatusText>>,
) {
    let summary = status.summary(scene.state.balloon_count(), time.elapsed_secs_f64());
    for mut text in &mut q_text {
        if text.0 != summary {
            text.0 = summary.clone();
        }
    }
}
