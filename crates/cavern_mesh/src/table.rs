//! # Marching Squares Lookup Table
//!
//! Pure data: configuration → ordered polygon outline.
//!
//! A configuration is the 4-bit code `8·TL + 4·TR + 2·BR + 1·BL`, one bit
//! per solid corner. Each entry lists the corner and edge-midpoint nodes of
//! the polygon covering the solid part of the square, in fan order: the
//! first point is the pivot.
//!
//! ```text
//!   TL ── CT ── TR
//!   │            │
//!   CL          CR
//!   │            │
//!   BL ── CB ── BR
//! ```

use crate::error::{MeshError, MeshResult};

/// One of the eight nodes a square can reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SquarePoint {
    /// Top-left corner.
    TopLeft = 0,
    /// Top-right corner.
    TopRight = 1,
    /// Bottom-right corner.
    BottomRight = 2,
    /// Bottom-left corner.
    BottomLeft = 3,
    /// Midpoint of the top edge.
    CenterTop = 4,
    /// Midpoint of the right edge.
    CenterRight = 5,
    /// Midpoint of the bottom edge.
    CenterBottom = 6,
    /// Midpoint of the left edge.
    CenterLeft = 7,
}

impl SquarePoint {
    /// Returns true for the four corner points.
    #[inline]
    #[must_use]
    pub const fn is_corner(self) -> bool {
        (self as u8) < 4
    }
}

use self::SquarePoint::{
    BottomLeft as BL, BottomRight as BR, CenterBottom as CB, CenterLeft as CL,
    CenterRight as CR, CenterTop as CT, TopLeft as TL, TopRight as TR,
};

/// Polygon for every configuration, indexed by configuration.
pub const POLYGONS: [&[SquarePoint]; 16] = [
    &[],
    &[CL, CB, BL],
    &[BR, CB, CR],
    &[CR, BR, BL, CL],
    &[TR, CR, CT],
    // Saddle: both solid corners joined through the middle.
    &[CT, TR, CR, CB, BL, CL],
    &[CT, TR, BR, CB],
    &[CT, TR, BR, BL, CL],
    &[TL, CT, CL],
    &[TL, CT, CB, BL],
    &[TL, CT, CR, BR, CB, CL],
    &[TL, CT, CR, BR, BL],
    &[TL, TR, CR, CL],
    &[TL, TR, CR, CB, BL],
    &[TL, TR, BR, CB, CL],
    &[TL, TR, BR, BL],
];

/// Computes the 4-bit configuration from corner activity.
#[inline]
#[must_use]
pub const fn configuration(top_left: bool, top_right: bool, bottom_right: bool, bottom_left: bool) -> u8 {
    ((top_left as u8) << 3) | ((top_right as u8) << 2) | ((bottom_right as u8) << 1) | (bottom_left as u8)
}

/// Looks up the polygon for a configuration.
///
/// # Errors
///
/// Returns [`MeshError::InvariantViolation`] for values above 15.
pub fn polygon(configuration: u8) -> MeshResult<&'static [SquarePoint]> {
    POLYGONS
        .get(usize::from(configuration))
        .copied()
        .ok_or_else(|| {
            MeshError::InvariantViolation(format!("square configuration {configuration} outside 0..=15"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORNERS: [(SquarePoint, u8); 4] = [(TL, 8), (TR, 4), (BR, 2), (BL, 1)];

    #[test]
    fn test_entry_corners_match_configuration() {
        for (config, points) in POLYGONS.iter().enumerate() {
            for (corner, bit) in CORNERS {
                let solid = config as u8 & bit != 0;
                assert_eq!(
                    points.contains(&corner),
                    solid,
                    "configuration {config}: corner {corner:?}"
                );
            }
        }
    }

    #[test]
    fn test_entry_sizes() {
        let sizes: Vec<usize> = POLYGONS.iter().map(|p| p.len()).collect();
        assert_eq!(sizes, vec![0, 3, 3, 4, 3, 6, 4, 5, 3, 4, 6, 5, 4, 5, 5, 4]);
    }

    #[test]
    fn test_edge_midpoints_between_differing_corners() {
        // A midpoint appears exactly when its edge joins a solid and an open corner.
        let edges = [(CT, TL, TR), (CR, TR, BR), (CB, BR, BL), (CL, BL, TL)];
        for (config, points) in POLYGONS.iter().enumerate() {
            let solid = |corner: SquarePoint| {
                CORNERS
                    .iter()
                    .any(|&(c, bit)| c == corner && config as u8 & bit != 0)
            };
            for (mid, a, b) in edges {
                assert_eq!(
                    points.contains(&mid),
                    solid(a) != solid(b),
                    "configuration {config}: midpoint {mid:?}"
                );
            }
        }
    }

    #[test]
    fn test_no_repeated_points() {
        for points in POLYGONS {
            for (i, a) in points.iter().enumerate() {
                assert!(!points[i + 1..].contains(a));
            }
        }
    }

    #[test]
    fn test_configuration_bits() {
        assert_eq!(configuration(false, false, false, false), 0);
        assert_eq!(configuration(true, false, false, false), 8);
        assert_eq!(configuration(false, true, false, true), 5);
        assert_eq!(configuration(true, true, true, true), 15);
    }

    #[test]
    fn test_out_of_range_lookup_fails() {
        assert!(polygon(15).is_ok());
        assert!(matches!(polygon(16), Err(MeshError::InvariantViolation(_))));
    }

    #[test]
    fn test_is_corner() {
        assert!(TL.is_corner() && BL.is_corner());
        assert!(!CT.is_corner() && !CL.is_corner());
    }
}
