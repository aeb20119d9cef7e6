//! Pointer and keyboard input.
//!
//! The player aims with the mouse and fires with a click or the spacebar.
//! Positions are converted to field coordinates before they reach the session.

use bevy::{prelude::*, window::PrimaryWindow};

use super::{
    clock::{AimAt, FireAt, SimulationSystems},
    geometry::direction,
    session::GameSession,
};
use crate::config::GameConfig;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Update, read_pointer.before(SimulationSystems));
}

/// Distance along the current aim used as the target of a keyboard shot.
const KEYBOARD_AIM_REACH: f32 = 100.0;

/// Turn cursor movement and fire buttons into session messages.
fn read_pointer(
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    mouse_input: Res<ButtonInput<MouseButton>>,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    config: Res<GameConfig>,
    session: Option<Res<GameSession>>,
    mut aim_events: MessageWriter<AimAt>,
    mut fire_events: MessageWriter<FireAt>,
) {
    // Get cursor position in field coordinates
    let cursor = window_query.single().ok().and_then(|window| {
        let (camera, camera_transform) = camera_query.single().ok()?;
        let world = window
            .cursor_position()
            .and_then(|p| camera.viewport_to_world_2d(camera_transform, p).ok())?;
        Some(config.world_to_field(world))
    });

    if let Some(point) = cursor {
        aim_events.write(AimAt(point));
        if mouse_input.just_pressed(MouseButton::Left) {
            fire_events.write(FireAt(point));
        }
    }

    if keyboard_input.just_pressed(KeyCode::Space)
        && let Some(session) = session
    {
        let shooter = session.shooter();
        let target = shooter.position + direction(shooter.angle) * KEYBOARD_AIM_REACH;
        fire_events.write(FireAt(target));
    }
}
