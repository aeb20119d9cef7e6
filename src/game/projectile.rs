//! Projectile - the bubble being shot.
//!
//! The projectile travels in a straight line, bouncing off the side walls,
//! until it touches a placed bubble or rises past the ceiling. It then snaps
//! onto the lattice, joins the field, and may pop a cluster.

use bevy::math::Vec2;
use tracing::{debug, info};

use super::{
    bubble::{BubbleColor, BubbleId},
    cluster::{Pop, resolve},
    field::Field,
    snap::snap,
};
use crate::config::GameConfig;

/// The bubble in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub position: Vec2,
    /// Displacement per tick.
    pub velocity: Vec2,
    pub color: BubbleColor,
}

/// What stopped the projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    Bubble,
    Ceiling,
}

/// A projectile turned into a placed bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct Landing {
    pub id: BubbleId,
    pub position: Vec2,
    pub color: BubbleColor,
    pub impact: Impact,
    /// The cluster removed by this landing, if any.
    pub pop: Option<Pop>,
}

/// Result of advancing a projectile by one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Still moving; this is its new state.
    Flying(Projectile),
    /// Came to rest in the field.
    Landed(Landing),
    /// Left the bottom of the field, or stopped rising, without touching
    /// anything.
    Lost,
}

/// Advance `projectile` by one tick against `field`.
///
/// The bounce is applied to the velocity before the position is committed;
/// the tentative position itself is kept, so the next tick moves back
/// inward instead of bouncing again. A bubble collision is checked before
/// the ceiling, so touching both counts as a bubble hit.
///
/// Only the walls change the velocity, so a projectile whose y does not
/// decrease on this tick can never reach the ceiling and is lost.
pub fn step(projectile: Projectile, field: &mut Field, config: &GameConfig) -> Step {
    let radius = config.bubble_radius;
    let mut velocity = projectile.velocity;
    let next = projectile.position + velocity;

    if next.x < radius || next.x > config.field_width - radius {
        velocity.x = -velocity.x;
        debug!("Projectile bounced at x={}", next.x);
    }

    if field.first_within(next, radius * 2.0).is_some() {
        return Step::Landed(land(next, projectile.color, Impact::Bubble, field, config));
    }

    if next.y < radius {
        return Step::Landed(land(next, projectile.color, Impact::Ceiling, field, config));
    }

    if next.y > config.field_height + radius {
        info!("Projectile left the field at {:?}", next);
        return Step::Lost;
    }

    if next.y >= projectile.position.y {
        info!("Projectile stopped rising at {:?}", next);
        return Step::Lost;
    }

    Step::Flying(Projectile {
        position: next,
        velocity,
        color: projectile.color,
    })
}

/// Snap the impact point, add the new bubble, then pop its cluster if big enough.
fn land(
    impact_point: Vec2,
    color: BubbleColor,
    impact: Impact,
    field: &mut Field,
    config: &GameConfig,
) -> Landing {
    let position = snap(
        impact_point,
        field,
        config.bubble_radius,
        config.adjacency_slack,
    );
    let id = field.insert(position, color);
    info!(
        "Bubble {} landed at {:?} with color {:?} ({:?})",
        id, position, color, impact
    );

    let pop = resolve(field, id, config.adjacency_distance());

    Landing {
        id,
        position,
        color,
        impact,
        pop,
    }
}
