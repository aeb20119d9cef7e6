//! The main game module for the bubble shooter.
//!
//! The simulation itself is plain Rust with no ECS access:
//! - Lattice geometry
//! - The bubble field
//! - Snapping impacts onto the lattice
//! - Cluster detection and popping
//! - Projectile stepping
//! - The game session that owns all of the above
//!
//! The Bevy side only feeds it input, ticks it on a timer and draws it.

pub mod bubble;
pub mod clock;
pub mod cluster;
pub mod field;
pub mod geometry;
mod input;
pub mod projectile;
mod render;
pub mod session;
pub mod snap;

use bevy::prelude::*;

use crate::config::GameConfig;
use session::GameSession;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((simulation_plugin, input::plugin, render::plugin));
    app.add_systems(Startup, start_session);
}

/// Message types and the tick clock, without any window or rendering.
pub fn simulation_plugin(app: &mut App) {
    app.add_plugins(clock::plugin);
}

/// Start a new game from the loaded config.
fn start_session(mut commands: Commands, config: Res<GameConfig>) {
    commands.insert_resource(GameSession::new(config.clone()));
    info!("Game spawned - bubble shooter ready!");
}
