//! # Node Arena
//!
//! Every mesh point lives once in a flat arena and is referenced by
//! [`NodeId`]. A [`ControlNode`] sits at a cell center and owns two edge
//! nodes: `above` (+½ cell along z) and `right` (+½ cell along x). Squares
//! borrow their edge midpoints from the control nodes at their corners, so
//! midpoints shared by neighboring squares are the same node.
//!
//! Each node also records which sides of the grid frame it lies on, as a
//! mask of the `FRAME_*` bits.

use cavern_shared::{Grid, Vec3};

use crate::square::Square;

/// Node on the `x = 0` side of the grid.
pub const FRAME_LEFT: u8 = 1;
/// Node on the `x = W - 1` side of the grid.
pub const FRAME_RIGHT: u8 = 2;
/// Node on the `y = 0` side of the grid.
pub const FRAME_BOTTOM: u8 = 4;
/// Node on the `y = H - 1` side of the grid.
pub const FRAME_TOP: u8 = 8;

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// A mesh point with a lazily assigned vertex index.
#[derive(Clone, Copy, Debug)]
pub struct Node {
    /// Position in mesh space.
    pub position: Vec3,
    /// Index into the floor vertex buffer, once referenced by a triangle.
    pub vertex: Option<u32>,
    /// Grid sides the node lies on; zero for interior nodes.
    pub frame: u8,
}

impl Node {
    const fn at(position: Vec3, frame: u8) -> Self {
        Self {
            position,
            vertex: None,
            frame,
        }
    }
}

/// A node at a cell center plus its two edge nodes.
#[derive(Clone, Copy, Debug)]
pub struct ControlNode {
    /// The center node.
    pub node: NodeId,
    /// True if the cell is solid.
    pub active: bool,
    /// Edge node half a cell toward +z.
    pub above: NodeId,
    /// Edge node half a cell toward +x.
    pub right: NodeId,
}

/// All nodes for one grid, centered on the origin.
pub struct NodeGrid {
    nodes: Vec<Node>,
    controls: Vec<ControlNode>,
    width: usize,
    height: usize,
}

impl NodeGrid {
    /// Builds one control node per cell.
    ///
    /// Cell `(x, y)` sits at `(-W·s/2 + x·s + s/2, 0, -H·s/2 + y·s + s/2)`.
    #[must_use]
    pub fn new(grid: &Grid, cell_size: f32) -> Self {
        let (width, height) = (grid.width(), grid.height());
        let map_width = width as f32 * cell_size;
        let map_height = height as f32 * cell_size;
        let half = cell_size / 2.0;

        let mut nodes = Vec::with_capacity(width * height * 3);
        let mut controls = Vec::with_capacity(width * height);

        // Column-major so that control index = x * height + y.
        for coord in grid.coords() {
            let position = Vec3::new(
                -map_width / 2.0 + coord.x as f32 * cell_size + half,
                0.0,
                -map_height / 2.0 + coord.y as f32 * cell_size + half,
            );

            let (x, y) = (coord.x as usize, coord.y as usize);
            let mut vertical = 0;
            if x == 0 {
                vertical |= FRAME_LEFT;
            }
            if x + 1 == width {
                vertical |= FRAME_RIGHT;
            }
            let mut horizontal = 0;
            if y == 0 {
                horizontal |= FRAME_BOTTOM;
            }
            if y + 1 == height {
                horizontal |= FRAME_TOP;
            }

            let node = NodeId(nodes.len());
            nodes.push(Node::at(position, vertical | horizontal));
            let above = NodeId(nodes.len());
            nodes.push(Node::at(position + Vec3::Z * half, vertical));
            let right = NodeId(nodes.len());
            nodes.push(Node::at(position + Vec3::X * half, horizontal));

            controls.push(ControlNode {
                node,
                active: grid.is_solid(coord.x, coord.y),
                above,
                right,
            });
        }

        Self {
            nodes,
            controls,
            width,
            height,
        }
    }

    /// Control node of cell `(x, y)`. Callers stay in bounds.
    #[inline]
    fn control(&self, x: usize, y: usize) -> &ControlNode {
        &self.controls[x * self.height + y]
    }

    /// The square whose bottom-left corner is cell `(x, y)`.
    #[must_use]
    pub fn square(&self, x: usize, y: usize) -> Square {
        Square::new(
            self.control(x, y + 1),
            self.control(x + 1, y + 1),
            self.control(x + 1, y),
            self.control(x, y),
        )
    }

    /// Number of squares along x.
    #[inline]
    #[must_use]
    pub fn squares_x(&self) -> usize {
        self.width.saturating_sub(1)
    }

    /// Number of squares along z.
    #[inline]
    #[must_use]
    pub fn squares_y(&self) -> usize {
        self.height.saturating_sub(1)
    }

    /// Node lookup.
    #[inline]
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Mutable node lookup.
    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}
