//! # Passage Carving
//!
//! Integer line rasterization plus disc stamping. A passage is the union of
//! discs of radius `passage_width` centered on every point of the line.

use cavern_shared::{CellState, Coord, Grid};

use crate::room::{RoomId, RoomLink};

/// A carved passage, recorded for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Passage {
    /// Room the passage starts in.
    pub from_room: RoomId,
    /// Room the passage ends in.
    pub to_room: RoomId,
    /// Start tile.
    pub from: Coord,
    /// End tile.
    pub to: Coord,
}

impl From<RoomLink> for Passage {
    fn from(link: RoomLink) -> Self {
        Self {
            from_room: link.from_room,
            to_room: link.to_room,
            from: link.from,
            to: link.to,
        }
    }
}

/// Rasterizes the line from `from` toward `to` with an incremental integer
/// walk (Bresenham).
///
/// Emits one point per step along the dominant axis, starting at `from`.
/// `to` itself is not emitted; it is always a tile of an open room.
#[must_use]
pub fn line(from: Coord, to: Coord) -> Vec<Coord> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    let steep = dx.abs() < dy.abs();
    let (longest, shortest, step, gradient_step) = if steep {
        (dy.abs(), dx.abs(), dy.signum(), dx.signum())
    } else {
        (dx.abs(), dy.abs(), dx.signum(), dy.signum())
    };

    let mut points = Vec::with_capacity(longest as usize);
    let (mut x, mut y) = (from.x, from.y);
    let mut accumulation = longest / 2;

    for _ in 0..longest {
        points.push(Coord::new(x, y));

        if steep {
            y += step;
        } else {
            x += step;
        }

        accumulation += shortest;
        if accumulation >= longest {
            if steep {
                x += gradient_step;
            } else {
                y += gradient_step;
            }
            accumulation -= longest;
        }
    }

    points
}

/// Opens every cell within `radius` of `center` (`dx² + dy² ≤ r²`),
/// clipped to the grid.
pub fn carve_disc(grid: &mut Grid, center: Coord, radius: i32) {
    let radius_squared = i64::from(radius) * i64::from(radius);
    for dx in -radius..=radius {
        for dy in -radius..=radius {
            if i64::from(dx).pow(2) + i64::from(dy).pow(2) <= radius_squared {
                grid.set(center.x + dx, center.y + dy, CellState::Open);
            }
        }
    }
}

/// Carves a passage between two tiles and returns the line it followed.
///
/// The radius is clamped to the larger grid dimension.
pub fn carve_passage(grid: &mut Grid, from: Coord, to: Coord, radius: u32) -> Vec<Coord> {
    let limit = grid.width().max(grid.height());
    let radius = i32::try_from(radius)
        .unwrap_or(i32::MAX)
        .min(i32::try_from(limit).unwrap_or(i32::MAX));
    let points = line(from, to);
    for &point in &points {
        carve_disc(grid, point, radius);
    }
    points
}
