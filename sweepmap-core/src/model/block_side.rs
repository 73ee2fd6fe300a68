//! Block side labels of the schedule dataset

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of a street a sweeping rule applies to.
///
/// Cardinal and intercardinal labels are compass directions and have to be
/// resolved against the bearing of the street line; `Left`/`Right` are
/// already relative to the line direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockSide {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    Left,
    Right,
    Unknown,
}

impl BlockSide {
    pub const ALL: [BlockSide; 11] = [
        BlockSide::North,
        BlockSide::South,
        BlockSide::East,
        BlockSide::West,
        BlockSide::NorthEast,
        BlockSide::NorthWest,
        BlockSide::SouthEast,
        BlockSide::SouthWest,
        BlockSide::Left,
        BlockSide::Right,
        BlockSide::Unknown,
    ];

    /// Parses a dataset label. Anything unrecognised becomes `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "North" => BlockSide::North,
            "South" => BlockSide::South,
            "East" => BlockSide::East,
            "West" => BlockSide::West,
            "NorthEast" => BlockSide::NorthEast,
            "NorthWest" => BlockSide::NorthWest,
            "SouthEast" => BlockSide::SouthEast,
            "SouthWest" => BlockSide::SouthWest,
            // the dataset uses the single letter tokens
            "L" | "Left" => BlockSide::Left,
            "R" | "Right" => BlockSide::Right,
            _ => BlockSide::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockSide::North => "North",
            BlockSide::South => "South",
            BlockSide::East => "East",
            BlockSide::West => "West",
            BlockSide::NorthEast => "NorthEast",
            BlockSide::NorthWest => "NorthWest",
            BlockSide::SouthEast => "SouthEast",
            BlockSide::SouthWest => "SouthWest",
            BlockSide::Left => "Left",
            BlockSide::Right => "Right",
            BlockSide::Unknown => "Unknown",
        }
    }
}

impl From<&str> for BlockSide {
    fn from(label: &str) -> Self {
        BlockSide::from_label(label)
    }
}

impl fmt::Display for BlockSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
