//! Drawing the session with gizmos.
//!
//! Reads a snapshot once per frame and never mutates game state.

use bevy::{color::palettes::css, prelude::*};

use super::{
    bubble::BubbleColor,
    clock::{FieldCleared, SimulationSystems},
    session::{GameSession, trace_aim},
};
use crate::config::GameConfig;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (draw_walls, draw_session, spawn_win_banner).after(SimulationSystems),
    );
}

/// Length of the barrel drawn from the shooter.
const BARREL_LENGTH: f32 = 50.0;

/// Draw one bubble as nested rings so it reads as filled.
fn draw_bubble(gizmos: &mut Gizmos, center: Vec2, radius: f32, color: BubbleColor) {
    let color = color.to_color();
    for scale in [1.0, 0.8, 0.6, 0.4, 0.2] {
        gizmos.circle_2d(Isometry2d::from_translation(center), radius * scale, color);
    }
}

/// Draw field bubbles, projectile, shooter, aim guide and next-color preview.
fn draw_session(mut gizmos: Gizmos, session: Option<Res<GameSession>>) {
    let Some(session) = session else {
        return;
    };
    let config = session.config();
    let radius = config.bubble_radius;
    let snapshot = session.snapshot();

    for bubble in &snapshot.field {
        draw_bubble(
            &mut gizmos,
            config.field_to_world(bubble.position),
            radius,
            bubble.color,
        );
    }

    if let Some(projectile) = snapshot.projectile {
        draw_bubble(
            &mut gizmos,
            config.field_to_world(projectile.position),
            radius,
            projectile.color,
        );
    }

    let shooter = snapshot.shooter;
    let barrel_end = shooter.position + Vec2::from_angle(shooter.angle) * BARREL_LENGTH;
    gizmos.line_2d(
        config.field_to_world(shooter.position),
        config.field_to_world(barrel_end),
        Color::WHITE,
    );

    if snapshot.cleared {
        return;
    }

    // Dashed guide: draw every other segment
    let guide = trace_aim(config, shooter);
    for (i, pair) in guide.windows(2).enumerate() {
        if i % 2 == 0 {
            gizmos.line_2d(
                config.field_to_world(pair[0]),
                config.field_to_world(pair[1]),
                Color::srgba(1.0, 1.0, 1.0, 0.4),
            );
        }
    }

    if let Some(next) = snapshot.next_color {
        let preview = shooter.position + Vec2::new(radius * 4.0, 0.0);
        draw_bubble(&mut gizmos, config.field_to_world(preview), radius * 0.6, next);
    }
}

/// Draw the walls and ceiling of the field.
fn draw_walls(mut gizmos: Gizmos, config: Res<GameConfig>) {
    let wall_color = css::ORANGE.with_alpha(0.8);
    let top_left = config.field_to_world(Vec2::ZERO);
    let bottom_right = config.field_to_world(Vec2::new(config.field_width, config.field_height));

    // Left wall
    gizmos.line_2d(top_left, Vec2::new(top_left.x, bottom_right.y), wall_color);

    // Right wall
    gizmos.line_2d(Vec2::new(bottom_right.x, top_left.y), bottom_right, wall_color);

    // Ceiling
    gizmos.line_2d(top_left, Vec2::new(bottom_right.x, top_left.y), wall_color);
}

/// Show the win message when the field is cleared.
fn spawn_win_banner(mut commands: Commands, mut cleared_events: MessageReader<FieldCleared>) {
    if cleared_events.read().next().is_none() {
        return;
    }

    commands.spawn((
        Name::new("Win Banner"),
        Text2d::new("You Win!"),
        TextFont {
            font_size: 40.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Transform::from_xyz(0.0, 0.0, 10.0),
    ));
    info!("Showing win banner");
}
