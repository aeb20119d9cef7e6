//! The game session - shooter aim, next color, the projectile slot and the
//! win flag.
//!
//! Every input is applied as one full transition on `&mut GameSession`, so
//! callers never observe a half-updated field or two projectiles at once.

use bevy::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use super::{
    bubble::{Bubble, BubbleColor},
    field::Field,
    geometry::{aim_angle, direction},
    projectile::{Landing, Projectile, Step, step},
};
use crate::config::GameConfig;

/// The turret: fixed position, free aim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shooter {
    pub position: Vec2,
    /// Aim in radians, measured in field coordinates (y down).
    pub angle: f32,
}

/// One input delivered to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Aim(Vec2),
    Fire(Vec2),
    Tick,
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// No projectile in flight; nothing to do.
    Idle,
    /// The projectile moved and is still in flight.
    Flying,
    /// The projectile came to rest. `cleared` is set when this emptied the field.
    Landed { landing: Landing, cleared: bool },
    /// The projectile left the field without landing.
    Lost,
}

impl TickOutcome {
    pub fn is_flying(&self) -> bool {
        matches!(self, TickOutcome::Flying)
    }
}

/// Read-only view handed to the renderer each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub field: Vec<Bubble>,
    pub projectile: Option<Projectile>,
    pub shooter: Shooter,
    pub cleared: bool,
    pub next_color: Option<BubbleColor>,
}

/// Owns all mutable game state.
#[derive(Resource, Debug)]
pub struct GameSession {
    config: GameConfig,
    field: Field,
    shooter: Shooter,
    projectile: Option<Projectile>,
    next_color: Option<BubbleColor>,
    cleared: bool,
    rng: StdRng,
}

impl GameSession {
    /// Start a game with a randomly colored starting layout.
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Start a reproducible game.
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let field = Field::with_layout(
            config.initial_rows,
            config.initial_cols,
            config.bubble_radius,
            &mut rng,
        );
        let mut session = Self::with_field(config, field, rng);
        session.next_color = Some(BubbleColor::random_with(&mut session.rng));
        info!(
            "New game with {} bubbles, next color {:?}",
            session.field.len(),
            session.next_color
        );
        session
    }

    /// Start from a hand-built field. `NextColor` starts unset.
    pub fn from_field(config: GameConfig, field: Field, seed: u64) -> Self {
        Self::with_field(config, field, StdRng::seed_from_u64(seed))
    }

    fn with_field(config: GameConfig, field: Field, rng: StdRng) -> Self {
        let shooter = Shooter {
            position: config.shooter_position(),
            angle: -std::f32::consts::FRAC_PI_2,
        };
        let cleared = field.is_empty();
        Self {
            config,
            field,
            shooter,
            projectile: None,
            next_color: None,
            cleared,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn shooter(&self) -> Shooter {
        self.shooter
    }

    pub fn projectile(&self) -> Option<Projectile> {
        self.projectile
    }

    pub fn next_color(&self) -> Option<BubbleColor> {
        self.next_color
    }

    pub fn set_next_color(&mut self, color: Option<BubbleColor>) {
        self.next_color = color;
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    /// Point the turret at `point`. Always accepted.
    pub fn on_aim_changed(&mut self, point: Vec2) {
        self.shooter.angle = aim_angle(self.shooter.position, point);
    }

    /// Fire toward `point`.
    ///
    /// Ignored while a projectile is in flight, when no color is loaded, or
    /// once the field has been cleared. Returns whether a shot was fired.
    pub fn on_fire(&mut self, point: Vec2) -> bool {
        if self.cleared || self.projectile.is_some() {
            return false;
        }
        let Some(color) = self.next_color else {
            return false;
        };

        self.on_aim_changed(point);
        let velocity = direction(self.shooter.angle) * self.config.projectile_speed;
        self.projectile = Some(Projectile {
            position: self.shooter.position,
            velocity,
            color,
        });
        self.next_color = Some(BubbleColor::random_with(&mut self.rng));

        debug!(
            "Fired {:?} at angle {:.3}, next is {:?}",
            color, self.shooter.angle, self.next_color
        );
        true
    }

    /// Advance the projectile by one fixed step.
    pub fn on_tick(&mut self) -> TickOutcome {
        if self.cleared {
            return TickOutcome::Idle;
        }
        let Some(projectile) = self.projectile.take() else {
            return TickOutcome::Idle;
        };

        match step(projectile, &mut self.field, &self.config) {
            Step::Flying(moved) => {
                self.projectile = Some(moved);
                TickOutcome::Flying
            }
            Step::Landed(landing) => {
                if self.field.is_empty() {
                    self.cleared = true;
                    info!("Field cleared - you win!");
                }
                TickOutcome::Landed {
                    landing,
                    cleared: self.cleared,
                }
            }
            Step::Lost => TickOutcome::Lost,
        }
    }

    /// Apply one input. Only ticks produce an outcome.
    pub fn apply(&mut self, input: Input) -> Option<TickOutcome> {
        match input {
            Input::Aim(point) => {
                self.on_aim_changed(point);
                None
            }
            Input::Fire(point) => {
                self.on_fire(point);
                None
            }
            Input::Tick => Some(self.on_tick()),
        }
    }

    /// Copy out everything the renderer needs.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            field: self.field.to_vec(),
            projectile: self.projectile,
            shooter: self.shooter,
            cleared: self.cleared,
            next_color: self.next_color,
        }
    }
}

/// Step size of the aim guide.
const GUIDE_STEP: f32 = 5.0;

/// Maximum traced length of the aim guide.
const GUIDE_LENGTH: f32 = 1000.0;

/// Trace the dotted aim guide from the shooter, reflecting off the side walls.
///
/// Stops after the point that rises above the ceiling, or after
/// [`GUIDE_LENGTH`] units. Bubbles in the field are ignored.
pub fn trace_aim(config: &GameConfig, shooter: Shooter) -> Vec<Vec2> {
    let radius = config.bubble_radius;
    let mut stride = direction(shooter.angle) * GUIDE_STEP;
    let mut point = shooter.position;
    let mut points = vec![point];

    let mut travelled = 0.0;
    while travelled < GUIDE_LENGTH {
        point += stride;
        if point.x < radius || point.x > config.field_width - radius {
            stride.x = -stride.x;
        }
        points.push(point);
        if point.y < radius {
            break;
        }
        travelled += GUIDE_STEP;
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::seeded(GameConfig::default(), 3)
    }

    #[test]
    fn test_new_game_is_ready() {
        let session = session();
        assert_eq!(session.field().len(), 50);
        assert!(session.next_color().is_some());
        assert!(session.projectile().is_none());
        assert!(!session.is_cleared());
        assert_eq!(session.shooter().position, Vec2::new(250.0, 480.0));
    }

    #[test]
    fn test_aim_updates_angle_only() {
        let mut session = session();
        let before = session.snapshot();
        session.on_aim_changed(Vec2::new(480.0, 480.0));
        assert_eq!(session.shooter().angle, 0.0);
        assert_eq!(session.snapshot().field, before.field);
        assert_eq!(session.next_color(), before.next_color);
    }

    #[test]
    fn test_fire_spawns_projectile_with_loaded_color() {
        let mut session = session();
        let loaded = session.next_color();
        assert!(session.on_fire(Vec2::new(250.0, 0.0)));

        let projectile = session.projectile().expect("projectile in flight");
        assert_eq!(Some(projectile.color), loaded);
        assert_eq!(projectile.position, Vec2::new(250.0, 480.0));
        assert!((projectile.velocity.y + 8.0).abs() < 1e-4);
        assert!(projectile.velocity.x.abs() < 1e-4);
        assert!(session.next_color().is_some());
    }

    #[test]
    fn test_second_fire_is_ignored() {
        let mut session = session();
        session.on_fire(Vec2::new(250.0, 0.0));
        let before = session.snapshot();

        assert!(!session.on_fire(Vec2::new(0.0, 300.0)));
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_fire_without_color_is_ignored() {
        let mut session = session();
        session.set_next_color(None);
        assert!(!session.on_fire(Vec2::new(250.0, 0.0)));
        assert!(session.projectile().is_none());
    }

    #[test]
    fn test_tick_without_projectile_is_idle() {
        let mut session = session();
        let before = session.snapshot();
        assert_eq!(session.on_tick(), TickOutcome::Idle);
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_straight_shot_eventually_lands() {
        let mut session = session();
        session.on_fire(Vec2::new(250.0, 0.0));

        let mut ticks = 0;
        let outcome = loop {
            let outcome = session.on_tick();
            if !outcome.is_flying() {
                break outcome;
            }
            ticks += 1;
            assert!(ticks < 200, "projectile never landed");
        };

        assert!(matches!(outcome, TickOutcome::Landed { .. }));
        assert!(session.projectile().is_none());
    }

    #[test]
    fn test_apply_routes_inputs() {
        let mut session = session();
        assert_eq!(session.apply(Input::Aim(Vec2::new(0.0, 480.0))), None);
        assert_eq!(session.apply(Input::Fire(Vec2::new(250.0, 0.0))), None);
        assert!(session.projectile().is_some());
        assert_eq!(session.apply(Input::Tick), Some(TickOutcome::Flying));
    }

    #[test]
    fn test_empty_start_is_already_cleared() {
        let mut session = GameSession::from_field(GameConfig::default(), Field::new(), 0);
        session.set_next_color(Some(BubbleColor::Coral));
        assert!(session.is_cleared());
        assert!(!session.on_fire(Vec2::new(250.0, 0.0)));
    }

    #[test]
    fn test_aim_guide_reflects_and_stops_at_ceiling() {
        let config = GameConfig::default();
        let shooter = Shooter {
            position: config.shooter_position(),
            angle: aim_angle(config.shooter_position(), Vec2::new(0.0, 400.0)),
        };
        let points = trace_aim(&config, shooter);
        let last = points.last().copied().unwrap();

        assert!(points.len() > 2);
        assert!(
            points
                .iter()
                .all(|p| p.x >= config.bubble_radius - GUIDE_STEP
                    && p.x <= config.field_width - config.bubble_radius + GUIDE_STEP)
        );
        assert!(last.y < config.bubble_radius || points.len() as f32 > GUIDE_LENGTH / GUIDE_STEP);
    }
}
