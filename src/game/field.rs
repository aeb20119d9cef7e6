//! The field that holds all placed bubbles.
//!
//! Bubbles live in a plain `Vec` in insertion order; the renderer draws them
//! in that order and nothing else depends on it. Every bubble gets a
//! [`BubbleId`] on insertion, and all membership tests go through that id
//! rather than comparing float positions.

use bevy::math::Vec2;
use rand::Rng;
use std::collections::HashSet;

use super::{
    bubble::{Bubble, BubbleColor, BubbleId},
    geometry::{distance, lattice_position},
};

/// The set of bubbles currently resting in the field.
#[derive(Debug, Clone, Default)]
pub struct Field {
    bubbles: Vec<Bubble>,
    next_id: u32,
}

impl Field {
    /// Create a new empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a field from loose positions, assigning ids in order.
    pub fn from_bubbles(bubbles: impl IntoIterator<Item = (Vec2, BubbleColor)>) -> Self {
        let mut field = Self::new();
        for (position, color) in bubbles {
            field.insert(position, color);
        }
        field
    }

    /// Fill `rows` x `cols` lattice cells below the ceiling with random colors.
    pub fn with_layout<R: Rng>(rows: u32, cols: u32, radius: f32, rng: &mut R) -> Self {
        let mut field = Self::new();
        for row in 0..rows {
            for col in 0..cols {
                let color = BubbleColor::random_with(rng);
                field.insert(lattice_position(row, col, radius), color);
            }
        }
        field
    }

    /// Insert a bubble and return its new id.
    pub fn insert(&mut self, position: Vec2, color: BubbleColor) -> BubbleId {
        let id = BubbleId(self.next_id);
        self.next_id += 1;
        self.bubbles.push(Bubble {
            id,
            position,
            color,
        });
        id
    }

    /// Remove every bubble whose id is in `ids`.
    ///
    /// Returns how many were removed.
    pub fn remove_many(&mut self, ids: &HashSet<BubbleId>) -> usize {
        let before = self.bubbles.len();
        self.bubbles.retain(|b| !ids.contains(&b.id));
        before - self.bubbles.len()
    }

    /// Get a bubble by id.
    pub fn get(&self, id: BubbleId) -> Option<&Bubble> {
        self.bubbles.iter().find(|b| b.id == id)
    }

    /// Bubbles of `color` within `within` (inclusive) of `point`.
    pub fn neighbors_of_color(
        &self,
        point: Vec2,
        color: BubbleColor,
        within: f32,
    ) -> impl Iterator<Item = &Bubble> + '_ {
        self.bubbles
            .iter()
            .filter(move |b| b.color == color && distance(b.position, point) <= within)
    }

    /// First bubble strictly closer than `threshold` to `point`, if any.
    pub fn first_within(&self, point: Vec2, threshold: f32) -> Option<&Bubble> {
        self.bubbles
            .iter()
            .find(|b| distance(b.position, point) < threshold)
    }

    /// Get the number of bubbles in the field.
    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    /// Check if the field is empty.
    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    /// Iterate over bubbles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Bubble> {
        self.bubbles.iter()
    }

    /// Copy out the bubbles for a read-only view.
    pub fn to_vec(&self) -> Vec<Bubble> {
        self.bubbles.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut field = Field::new();
        let a = field.insert(Vec2::new(20.0, 20.0), BubbleColor::Coral);
        let b = field.insert(Vec2::new(20.0, 20.0), BubbleColor::Coral);
        assert_ne!(a, b);
        assert!(a < b);
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut field = Field::new();
        let a = field.insert(Vec2::new(20.0, 20.0), BubbleColor::Sky);
        field.remove_many(&HashSet::from([a]));
        let b = field.insert(Vec2::new(20.0, 20.0), BubbleColor::Sky);
        assert_ne!(a, b);
        assert!(field.get(a).is_none());
        assert!(field.get(b).is_some());
    }

    #[test]
    fn test_neighbors_of_color_inclusive_threshold() {
        let field = Field::from_bubbles([
            (Vec2::new(0.0, 0.0), BubbleColor::Mint),
            (Vec2::new(41.0, 0.0), BubbleColor::Mint),
            (Vec2::new(41.5, 0.0), BubbleColor::Mint),
            (Vec2::new(10.0, 0.0), BubbleColor::Pink),
        ]);
        let found: Vec<_> = field
            .neighbors_of_color(Vec2::ZERO, BubbleColor::Mint, 41.0)
            .map(|b| b.position.x)
            .collect();
        assert_eq!(found, vec![0.0, 41.0]);
    }

    #[test]
    fn test_first_within_is_exclusive() {
        let field = Field::from_bubbles([(Vec2::new(40.0, 0.0), BubbleColor::Coral)]);
        assert!(field.first_within(Vec2::ZERO, 40.0).is_none());
        assert!(field.first_within(Vec2::new(0.5, 0.0), 40.0).is_some());
    }

    #[test]
    fn test_remove_many_keeps_order() {
        let mut field = Field::from_bubbles([
            (Vec2::new(0.0, 0.0), BubbleColor::Coral),
            (Vec2::new(1.0, 0.0), BubbleColor::Sky),
            (Vec2::new(2.0, 0.0), BubbleColor::Mint),
        ]);
        let removed = field.remove_many(&HashSet::from([BubbleId(1)]));
        assert_eq!(removed, 1);
        let xs: Vec<_> = field.iter().map(|b| b.position.x).collect();
        assert_eq!(xs, vec![0.0, 2.0]);
    }

    #[test]
    fn test_layout_fills_rows_below_ceiling() {
        let mut rng = StdRng::seed_from_u64(1);
        let field = Field::with_layout(5, 10, 20.0, &mut rng);
        assert_eq!(field.len(), 50);
        assert!(field.iter().all(|b| b.position.y >= 20.0));
        assert!(field.iter().all(|b| b.position.x + 20.0 <= 500.0));
    }
}
