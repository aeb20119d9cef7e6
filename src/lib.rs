//! A bubble shooter: aim, fire, and pop groups of three or more.

pub mod config;
pub mod game;

use bevy::prelude::*;

use config::GameConfig;

pub struct AppPlugin;

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        // Add Bevy plugins.
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Window {
                title: "Bubble Shooter".to_string(),
                fit_canvas_to_parent: true,
                ..default()
            }
            .into(),
            ..default()
        }));

        app.insert_resource(ClearColor(Color::srgb(0.15, 0.35, 0.45)));
        app.insert_resource(GameConfig::load_or_default());

        app.add_plugins(game::plugin);

        app.add_systems(Startup, spawn_camera);
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((Name::new("Camera"), Camera2d));
}
