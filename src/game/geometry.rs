//! Geometry helpers for a hex-packed circle lattice.
//!
//! Bubbles of radius `r` pack in rows `r * sqrt(3)` apart, with every other
//! row shifted by `r`. All positions are in field coordinates: origin at the
//! top-left corner, y growing downward toward the shooter.

use bevy::math::Vec2;

/// Square root of 3, used frequently in hex math.
pub const SQRT_3: f32 = 1.732_050_8;

/// Euclidean distance between two points.
#[inline]
pub fn distance(p: Vec2, q: Vec2) -> f32 {
    p.distance(q)
}

/// The seven candidate offsets around a placed bubble of the given radius.
///
/// Up, the two horizontal neighbors, then the four diagonals. The "up"
/// offset is not a true lattice neighbor; it overlaps the source bubble and
/// is kept only as a candidate for the snapper to reject.
pub fn hex_neighbor_offsets(radius: f32) -> [Vec2; 7] {
    let row = radius * SQRT_3;
    [
        Vec2::new(0.0, -row),           // Up
        Vec2::new(radius * 2.0, 0.0),   // East
        Vec2::new(-radius * 2.0, 0.0),  // West
        Vec2::new(radius, -row),        // Northeast
        Vec2::new(-radius, -row),       // Northwest
        Vec2::new(radius, row),         // Southeast
        Vec2::new(-radius, row),        // Southwest
    ]
}

/// Angle in radians of the ray from `from` toward `to`.
///
/// Total for every input; pointing at `from` itself yields 0.
#[inline]
pub fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Unit vector for an angle produced by [`aim_angle`].
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Center of the bubble at `row`, `col` in the starting layout.
///
/// Odd rows are shifted right by one radius.
pub fn lattice_position(row: u32, col: u32, radius: f32) -> Vec2 {
    let shift = if row % 2 != 0 { radius } else { 0.0 };
    Vec2::new(
        col as f32 * radius * 2.0 + radius + shift,
        row as f32 * radius * SQRT_3 + radius,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: f32 = 20.0;

    #[test]
    fn test_six_offsets_are_touching() {
        // Everything except "up" sits exactly one diameter away.
        for offset in &hex_neighbor_offsets(R)[1..] {
            assert!((offset.length() - 2.0 * R).abs() < 1e-3, "{offset:?}");
        }
    }

    #[test]
    fn test_up_offset_overlaps() {
        let up = hex_neighbor_offsets(R)[0];
        assert!(up.length() < 2.0 * R);
        assert_eq!(up.x, 0.0);
    }

    #[test]
    fn test_aim_angle_straight_up() {
        let angle = aim_angle(Vec2::new(250.0, 480.0), Vec2::new(250.0, 0.0));
        assert!((angle + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        let dir = direction(angle);
        assert!(dir.x.abs() < 1e-6);
        assert!((dir.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_lattice_rows_touch() {
        let a = lattice_position(0, 0, R);
        let b = lattice_position(1, 0, R);
        let c = lattice_position(0, 1, R);
        assert_eq!(a, Vec2::new(R, R));
        assert!((distance(a, b) - 2.0 * R).abs() < 1e-3);
        assert!((distance(a, c) - 2.0 * R).abs() < 1e-3);
    }
}
