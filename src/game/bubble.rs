//! Bubbles - the colored circles that fill the field.
//!
//! When 3+ of the same color are connected, they pop!

use bevy::prelude::*;
use rand::Rng;

/// The different bubble colors.
/// Six colors, drawn uniformly at random.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BubbleColor {
    #[default]
    Coral,
    Mustard,
    Sky,
    Mint,
    Pink,
    Violet,
}

impl BubbleColor {
    /// Get all possible bubble colors.
    pub const ALL: [BubbleColor; 6] = [
        BubbleColor::Coral,
        BubbleColor::Mustard,
        BubbleColor::Sky,
        BubbleColor::Mint,
        BubbleColor::Pink,
        BubbleColor::Violet,
    ];

    /// Get the actual color for rendering.
    pub fn to_color(self) -> Color {
        match self {
            BubbleColor::Coral => Color::srgb_u8(0xff, 0x6b, 0x6b),
            BubbleColor::Mustard => Color::srgb_u8(0xfe, 0xca, 0x57),
            BubbleColor::Sky => Color::srgb_u8(0x48, 0xdb, 0xfb),
            BubbleColor::Mint => Color::srgb_u8(0x1d, 0xd1, 0xa1),
            BubbleColor::Pink => Color::srgb_u8(0xff, 0x9f, 0xf3),
            BubbleColor::Violet => Color::srgb_u8(0x5f, 0x27, 0xcd),
        }
    }

    /// Draw a color uniformly from the palette.
    pub fn random_with<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Stable identity of a placed bubble, assigned when it joins the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BubbleId(pub u32);

impl std::fmt::Display for BubbleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A bubble resting in the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bubble {
    pub id: BubbleId,
    /// Center in field coordinates.
    pub position: Vec2,
    pub color: BubbleColor,
}
