use serde::{Deserialize, Serialize};

use geo::LineString;

use super::line_bearing;
use crate::BlockSide;

/// Half of a corridor that is swept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanedSide {
    Left,
    Right,
}

/// Open compass arc walked clockwise from `from` to `to`, both ends excluded.
/// `from > to` wraps through north.
#[derive(Debug, Clone, Copy)]
struct OpenArc {
    from: f64,
    to: f64,
}

impl OpenArc {
    const fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    fn contains(self, bearing: f64) -> bool {
        if self.from < self.to {
            bearing > self.from && bearing < self.to
        } else {
            bearing > self.from || bearing < self.to
        }
    }
}

/// Arcs are checked in order; the first hit decides the sign, otherwise `fallback`.
struct SideRule {
    arcs: &'static [(OpenArc, i8)],
    fallback: i8,
}

const NORTHWARD: OpenArc = OpenArc::new(270.0, 90.0);
const SOUTHWARD: OpenArc = OpenArc::new(90.0, 270.0);
const EASTWARD: OpenArc = OpenArc::new(45.0, 135.0);
const WESTWARD: OpenArc = OpenArc::new(225.0, 315.0);
const NORTHEASTWARD: OpenArc = OpenArc::new(315.0, 135.0);
const SOUTHEASTWARD: OpenArc = OpenArc::new(45.0, 225.0);

const fn rule(side: BlockSide) -> SideRule {
    match side {
        BlockSide::East => SideRule {
            arcs: &[(NORTHWARD, 1), (SOUTHWARD, -1)],
            fallback: 1,
        },
        BlockSide::West => SideRule {
            arcs: &[(NORTHWARD, -1), (SOUTHWARD, 1)],
            fallback: -1,
        },
        BlockSide::North => SideRule {
            arcs: &[(EASTWARD, -1), (WESTWARD, 1)],
            fallback: -1,
        },
        BlockSide::South => SideRule {
            arcs: &[(EASTWARD, 1), (WESTWARD, -1)],
            fallback: 1,
        },
        BlockSide::NorthEast => SideRule {
            arcs: &[(NORTHEASTWARD, 1)],
            fallback: -1,
        },
        BlockSide::NorthWest => SideRule {
            arcs: &[(SOUTHEASTWARD, -1)],
            fallback: 1,
        },
        BlockSide::SouthEast => SideRule {
            arcs: &[(SOUTHEASTWARD, 1)],
            fallback: -1,
        },
        BlockSide::SouthWest => SideRule {
            arcs: &[(NORTHEASTWARD, -1)],
            fallback: 1,
        },
        BlockSide::Left => SideRule {
            arcs: &[],
            fallback: -1,
        },
        BlockSide::Right => SideRule {
            arcs: &[],
            fallback: 1,
        },
        BlockSide::Unknown => SideRule {
            arcs: &[],
            fallback: 0,
        },
    }
}

/// Resolves a block side label against the direction of travel of a line.
///
/// Returns `1` when the labelled side lies to the right of the line, `-1` when
/// it lies to the left and `0` when the label carries no side information.
/// `bearing` is in degrees, 0 = north, clockwise.
pub fn classify_side(bearing: f64, side: BlockSide) -> i8 {
    let rule = rule(side);
    rule.arcs
        .iter()
        .find(|(arc, _)| arc.contains(bearing))
        .map_or(rule.fallback, |(_, sign)| *sign)
}

/// Which corridor half should be highlighted for the label.
/// Labels without side information resolve to `Right`, degenerate lines to `Left`.
pub fn cleaned_side(geometry: &LineString<f64>, side: BlockSide) -> CleanedSide {
    let Some(bearing) = line_bearing(geometry) else {
        return CleanedSide::Left;
    };
    if classify_side(bearing, side) >= 0 {
        CleanedSide::Right
    } else {
        CleanedSide::Left
    }
}
