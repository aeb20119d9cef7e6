//! Snapping an impact point onto the bubble lattice.
//!
//! Every placed bubble proposes the seven cells around it; the candidate
//! closest to the impact point wins. Ties go to the first candidate found,
//! so the result depends on field order but is a pure function of its inputs.

use bevy::math::Vec2;

use super::{
    field::Field,
    geometry::{distance, hex_neighbor_offsets},
};

/// Pick the lattice position where a projectile hitting `point` comes to rest.
///
/// Candidates that overlap an existing bubble (closer than `2r - slack`) are
/// skipped; if every candidate is blocked, the nearest one is used anyway.
/// The result is pushed down to `y = radius` if it would sit above the ceiling.
///
/// # Panics
///
/// Panics if `field` is empty. There is nothing to snap against, and no
/// projectile can reach this point in that state since an empty field ends
/// the game.
pub fn snap(point: Vec2, field: &Field, radius: f32, slack: f32) -> Vec2 {
    assert!(
        !field.is_empty(),
        "snap requires at least one bubble in the field"
    );

    let offsets = hex_neighbor_offsets(radius);
    let blocked = radius * 2.0 - slack;

    let mut best: Option<(f32, Vec2)> = None;
    let mut fallback: Option<(f32, Vec2)> = None;

    for bubble in field.iter() {
        for offset in offsets {
            let candidate = clamp_to_ceiling(bubble.position + offset, radius);
            let dist = distance(candidate, point);

            if fallback.is_none_or(|(d, _)| dist < d) {
                fallback = Some((dist, candidate));
            }
            if best.is_some_and(|(d, _)| dist >= d) {
                continue;
            }
            if field.first_within(candidate, blocked).is_none() {
                best = Some((dist, candidate));
            }
        }
    }

    // Field is non-empty, so at least one candidate was seen.
    best.or(fallback).map(|(_, p)| p).unwrap_or(point)
}

fn clamp_to_ceiling(mut point: Vec2, radius: f32) -> Vec2 {
    if point.y < radius {
        point.y = radius;
    }
    point
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{bubble::BubbleColor, geometry::SQRT_3};

    const R: f32 = 20.0;
    const SLACK: f32 = 1.0;

    fn single(at: Vec2) -> Field {
        Field::from_bubbles([(at, BubbleColor::Coral)])
    }

    #[test]
    fn test_snaps_to_nearest_neighbor_cell() {
        let field = single(Vec2::new(100.0, 100.0));
        let snapped = snap(Vec2::new(138.0, 102.0), &field, R, SLACK);
        assert_eq!(snapped, Vec2::new(140.0, 100.0));
    }

    #[test]
    fn test_below_bubble_snaps_to_diagonal() {
        let field = single(Vec2::new(100.0, 100.0));
        let snapped = snap(Vec2::new(112.0, 130.0), &field, R, SLACK);
        assert_eq!(snapped, Vec2::new(120.0, 100.0 + R * SQRT_3));
    }

    #[test]
    fn test_never_returns_occupied_cell() {
        // Two touching bubbles: the east cell of the first is the second.
        let field = Field::from_bubbles([
            (Vec2::new(100.0, 100.0), BubbleColor::Coral),
            (Vec2::new(140.0, 100.0), BubbleColor::Sky),
        ]);
        let snapped = snap(Vec2::new(140.0, 100.0), &field, R, SLACK);
        for bubble in field.iter() {
            assert!(distance(bubble.position, snapped) >= 2.0 * R - SLACK);
        }
    }

    #[test]
    fn test_clamped_to_ceiling() {
        let field = single(Vec2::new(100.0, R));
        let snapped = snap(Vec2::new(100.0, 0.0), &field, R, SLACK);
        assert!(snapped.y >= R);
    }

    #[test]
    fn test_is_deterministic() {
        let field = Field::from_bubbles([
            (Vec2::new(100.0, 20.0), BubbleColor::Coral),
            (Vec2::new(140.0, 20.0), BubbleColor::Sky),
            (Vec2::new(120.0, 20.0 + R * SQRT_3), BubbleColor::Mint),
        ]);
        let point = Vec2::new(131.0, 77.0);
        assert_eq!(snap(point, &field, R, SLACK), snap(point, &field, R, SLACK));
    }

    #[test]
    fn test_first_candidate_wins_ties() {
        // Straight below the bubble, southeast and southwest are equally
        // close; southeast comes first in offset order.
        let field = single(Vec2::new(100.0, 100.0));
        let snapped = snap(Vec2::new(100.0, 300.0), &field, R, SLACK);
        assert_eq!(snapped, Vec2::new(120.0, 100.0 + R * SQRT_3));
    }

    #[test]
    #[should_panic]
    fn test_empty_field_panics() {
        snap(Vec2::new(10.0, 10.0), &Field::new(), R, SLACK);
    }
}
