//! # Marching Square
//!
//! Four corner control nodes plus the four edge midpoints borrowed from
//! them:
//!
//! - center top = top-left's `right`
//! - center right = bottom-right's `above`
//! - center bottom = bottom-left's `right`
//! - center left = bottom-left's `above`

use crate::node::{ControlNode, NodeId};
use crate::table::{configuration, SquarePoint};

/// One 2×2 block of control nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Square {
    /// Nodes indexed by [`SquarePoint`] discriminant.
    points: [NodeId; 8],
    configuration: u8,
}

impl Square {
    /// Assembles a square from its corners.
    #[must_use]
    pub fn new(
        top_left: &ControlNode,
        top_right: &ControlNode,
        bottom_right: &ControlNode,
        bottom_left: &ControlNode,
    ) -> Self {
        Self {
            points: [
                top_left.node,
                top_right.node,
                bottom_right.node,
                bottom_left.node,
                top_left.right,
                bottom_right.above,
                bottom_left.right,
                bottom_left.above,
            ],
            configuration: configuration(
                top_left.active,
                top_right.active,
                bottom_right.active,
                bottom_left.active,
            ),
        }
    }

    /// The node behind a square point.
    #[inline]
    #[must_use]
    pub const fn node(&self, point: SquarePoint) -> NodeId {
        self.points[point as usize]
    }

    /// 4-bit corner code, `8·TL + 4·TR + 2·BR + 1·BL`.
    #[inline]
    #[must_use]
    pub const fn configuration(&self) -> u8 {
        self.configuration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeGrid;
    use cavern_shared::Grid;

    #[test]
    fn test_neighbors_share_midpoints() {
        let grid = Grid::from_ascii("...\n...").unwrap();
        let nodes = NodeGrid::new(&grid, 1.0);
        let left = nodes.square(0, 0);
        let right = nodes.square(1, 0);

        assert_eq!(left.node(SquarePoint::CenterRight), right.node(SquarePoint::CenterLeft));
        assert_eq!(left.node(SquarePoint::TopRight), right.node(SquarePoint::TopLeft));
        assert_ne!(left.node(SquarePoint::CenterTop), right.node(SquarePoint::CenterTop));
    }

    #[test]
    fn test_configuration_from_corners() {
        // Row 0 is y = 0, the bottom of the square.
        let grid = Grid::from_ascii("#.\n..").unwrap();
        let nodes = NodeGrid::new(&grid, 1.0);
        assert_eq!(nodes.square(0, 0).configuration(), 1);

        let grid = Grid::from_ascii("..\n.#").unwrap();
        let nodes = NodeGrid::new(&grid, 1.0);
        assert_eq!(nodes.square(0, 0).configuration(), 4);
    }
}
