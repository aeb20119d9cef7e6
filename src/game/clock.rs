//! Fixed-period simulation clock and the messages around it.
//!
//! The clock only exists while a projectile is in flight: firing inserts it,
//! and the first tick that ends the flight removes it again. The frame that
//! fires does not advance the projectile.

use bevy::prelude::*;
use std::time::Duration;

use super::{
    bubble::{BubbleColor, BubbleId},
    session::{GameSession, TickOutcome},
};

pub(super) fn plugin(app: &mut App) {
    app.add_message::<AimAt>();
    app.add_message::<FireAt>();
    app.add_message::<BubbleLanded>();
    app.add_message::<ClusterPopped>();
    app.add_message::<FieldCleared>();

    app.add_systems(
        Update,
        (
            handle_aim,
            handle_fire,
            advance_projectile.run_if(resource_exists::<ProjectileClock>),
        )
            .chain()
            .in_set(SimulationSystems),
    );
}

/// System set for everything that mutates the session.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimulationSystems;

/// Aim the shooter at a point in field coordinates.
#[derive(Message, Debug, Clone, Copy)]
pub struct AimAt(pub Vec2);

/// Fire toward a point in field coordinates.
#[derive(Message, Debug, Clone, Copy)]
pub struct FireAt(pub Vec2);

/// Message sent when a projectile comes to rest in the field.
#[derive(Message, Debug, Clone)]
pub struct BubbleLanded {
    pub id: BubbleId,
    pub position: Vec2,
    pub color: BubbleColor,
}

/// Message sent when a cluster is popped.
#[derive(Message, Debug, Clone)]
pub struct ClusterPopped {
    pub ids: Vec<BubbleId>,
    pub color: BubbleColor,
    pub count: usize,
}

/// Message sent once, when the last bubble leaves the field.
#[derive(Message, Debug, Clone)]
pub struct FieldCleared;

/// Repeating timer driving the projectile; present only during a flight.
#[derive(Resource, Debug)]
pub struct ProjectileClock(pub Timer);

impl ProjectileClock {
    pub fn new(period_millis: u64) -> Self {
        Self(Timer::new(
            Duration::from_millis(period_millis),
            TimerMode::Repeating,
        ))
    }
}

fn handle_aim(mut aim_events: MessageReader<AimAt>, session: Option<ResMut<GameSession>>) {
    let Some(mut session) = session else {
        aim_events.clear();
        return;
    };
    // Only the latest pointer position matters.
    if let Some(AimAt(point)) = aim_events.read().last() {
        session.on_aim_changed(*point);
    }
}

fn handle_fire(
    mut commands: Commands,
    mut fire_events: MessageReader<FireAt>,
    session: Option<ResMut<GameSession>>,
) {
    let Some(mut session) = session else {
        fire_events.clear();
        return;
    };

    for FireAt(point) in fire_events.read() {
        if session.on_fire(*point) {
            commands.insert_resource(ProjectileClock::new(session.config().tick_millis));
            info!("Fired toward {:?}", point);
        }
    }
}

/// Advance the session once per elapsed clock period.
fn advance_projectile(
    mut commands: Commands,
    time: Res<Time>,
    mut clock: ResMut<ProjectileClock>,
    session: Option<ResMut<GameSession>>,
    mut landed_events: MessageWriter<BubbleLanded>,
    mut popped_events: MessageWriter<ClusterPopped>,
    mut cleared_events: MessageWriter<FieldCleared>,
) {
    let Some(mut session) = session else {
        commands.remove_resource::<ProjectileClock>();
        return;
    };
    if session.projectile().is_none() {
        commands.remove_resource::<ProjectileClock>();
        return;
    }

    // A clock inserted this frame starts counting from the next one.
    if clock.is_added() {
        return;
    }
    clock.0.tick(time.delta());

    for _ in 0..clock.0.times_finished_this_tick() {
        match session.on_tick() {
            TickOutcome::Flying => continue,
            TickOutcome::Landed { landing, cleared } => {
                landed_events.write(BubbleLanded {
                    id: landing.id,
                    position: landing.position,
                    color: landing.color,
                });
                if let Some(pop) = landing.pop {
                    popped_events.write(ClusterPopped {
                        count: pop.count(),
                        ids: pop.ids,
                        color: pop.color,
                    });
                }
                if cleared {
                    cleared_events.write(FieldCleared);
                }
            }
            TickOutcome::Lost => warn!("Projectile left the field without landing"),
            TickOutcome::Idle => {}
        }

        commands.remove_resource::<ProjectileClock>();
        break;
    }
}
