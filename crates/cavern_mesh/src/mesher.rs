//! # Marching Squares Mesher
//!
//! Turns a binary [`Grid`] into a floor mesh covering the solid cells and a
//! wall mesh hanging from every floor boundary.
//!
//! ## Steps
//!
//! 1. One control node per cell, centered on the origin
//! 2. One square per 2×2 block, visited column by column
//! 3. Fan-triangulate each square's polygon from the lookup table; nodes get
//!    a vertex index on first use, so shared nodes become shared vertices
//! 4. Trace boundary loops over the triangle adjacency index
//! 5. Drop the loop that only runs along the grid frame
//! 6. Extrude one wall quad per remaining boundary edge
//!
//! Where the floor reaches the edge of the grid (no solid border), the
//! outline through that gap follows the grid edge.

use std::time::Instant;

use cavern_shared::constants::{DEFAULT_CELL_SIZE, DEFAULT_WALL_HEIGHT};
use cavern_shared::Grid;
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, MeshResult};
use crate::mesh::{CaveMesh, MeshBuffers, Triangle, Vertex};
use crate::node::{NodeGrid, NodeId};
use crate::outline::{Outline, OutlineTracer, TriangleAdjacency};
use crate::square::Square;
use crate::table;
use crate::walls::extrude_walls;

/// Largest polygon in the lookup table.
const MAX_POLYGON_POINTS: usize = 6;

/// Mesh scale parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshSettings {
    /// Edge length of one grid cell in mesh units.
    pub cell_size: f32,
    /// How far walls extend below the floor.
    pub wall_height: f32,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            wall_height: DEFAULT_WALL_HEIGHT,
        }
    }
}

impl MeshSettings {
    /// Sets the cell size.
    #[must_use]
    pub const fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Sets the wall height.
    #[must_use]
    pub const fn with_wall_height(mut self, wall_height: f32) -> Self {
        self.wall_height = wall_height;
        self
    }

    /// Checks both values.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidSettings`] unless `cell_size` is finite and
    /// positive and `wall_height` is finite and not negative.
    pub fn validate(&self) -> MeshResult<()> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(MeshError::InvalidSettings(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        if !self.wall_height.is_finite() || self.wall_height < 0.0 {
            return Err(MeshError::InvalidSettings(format!(
                "wall_height must not be negative, got {}",
                self.wall_height
            )));
        }
        Ok(())
    }
}

/// Floor geometry under construction.
#[derive(Default)]
struct FloorBuilder {
    vertices: Vec<Vertex>,
    triangles: Vec<Triangle>,
    adjacency: TriangleAdjacency,
    /// Vertices that can never start an outline.
    checked: Vec<bool>,
    /// Grid frame sides of each vertex.
    frame: Vec<u8>,
}

impl FloorBuilder {
    /// Vertex index of a node, assigning the next free index on first use.
    fn vertex_for(&mut self, nodes: &mut NodeGrid, id: NodeId) -> MeshResult<u32> {
        let node = nodes.node_mut(id);
        if let Some(index) = node.vertex {
            return Ok(index);
        }

        let index = u32::try_from(self.vertices.len()).map_err(|_| {
            MeshError::InvariantViolation("floor buffer exceeds u32 indices".to_string())
        })?;
        node.vertex = Some(index);
        self.vertices.push(Vertex::new(node.position));
        self.adjacency.push_vertex();
        self.checked.push(false);
        self.frame.push(node.frame);
        Ok(index)
    }

    fn add_triangle(&mut self, a: u32, b: u32, c: u32) -> MeshResult<()> {
        let triangle = Triangle::new(a, b, c);
        self.adjacency.add_triangle(self.triangles.len(), triangle)?;
        self.triangles.push(triangle);
        Ok(())
    }

    fn triangulate(&mut self, nodes: &mut NodeGrid, square: &Square) -> MeshResult<()> {
        let polygon = table::polygon(square.configuration())?;
        if polygon.is_empty() {
            return Ok(());
        }
        if polygon.len() < 3 || polygon.len() > MAX_POLYGON_POINTS {
            return Err(MeshError::InvariantViolation(format!(
                "configuration {} has a {}-point polygon",
                square.configuration(),
                polygon.len()
            )));
        }

        let mut fan = [0u32; MAX_POLYGON_POINTS];
        for (slot, &point) in fan.iter_mut().zip(polygon) {
            *slot = self.vertex_for(nodes, square.node(point))?;
        }
        let fan = &fan[..polygon.len()];

        for pair in fan[1..].windows(2) {
            self.add_triangle(fan[0], pair[0], pair[1])?;
        }

        // Corners of a fully solid square are interior to the floor unless
        // they sit on the grid frame.
        if square.configuration() == 15 {
            for (&point, &vertex) in polygon.iter().zip(fan) {
                if point.is_corner() && self.frame[vertex as usize] == 0 {
                    self.checked[vertex as usize] = true;
                }
            }
        }

        Ok(())
    }

    /// True if every edge of `outline` lies along one side of the grid.
    fn is_frame_loop(&self, outline: &Outline) -> bool {
        let side = |v: u32| self.frame.get(v as usize).copied().unwrap_or(0);
        outline.edges().all(|(a, b)| side(a) & side(b) != 0)
    }

    fn into_buffers(self) -> MeshBuffers {
        MeshBuffers {
            indices: self.triangles.iter().flat_map(|t| t.vertices).collect(),
            vertices: self.vertices,
        }
    }
}

/// Marching-squares mesher.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarchingSquaresMesher {
    settings: MeshSettings,
}

impl MarchingSquaresMesher {
    /// Creates a mesher. Settings are checked on every build.
    #[must_use]
    pub const fn new(settings: MeshSettings) -> Self {
        Self { settings }
    }

    /// The active settings.
    #[inline]
    #[must_use]
    pub const fn settings(&self) -> &MeshSettings {
        &self.settings
    }

    /// Builds floor, outlines and walls for `grid`.
    ///
    /// # Errors
    ///
    /// - [`MeshError::InvalidSettings`] for a bad cell size or wall height
    /// - [`MeshError::MalformedGrid`] if the grid is smaller than 2×2
    /// - [`MeshError::InvariantViolation`] on inconsistent internal state
    pub fn build(&self, grid: &Grid) -> MeshResult<CaveMesh> {
        self.settings.validate()?;
        if grid.width() < 2 || grid.height() < 2 {
            return Err(MeshError::MalformedGrid(format!(
                "need at least 2x2 cells, got {}x{}",
                grid.width(),
                grid.height()
            )));
        }

        let start = Instant::now();
        let mut nodes = NodeGrid::new(grid, self.settings.cell_size);
        let mut floor = FloorBuilder::default();

        for x in 0..nodes.squares_x() {
            for y in 0..nodes.squares_y() {
                let square = nodes.square(x, y);
                floor.triangulate(&mut nodes, &square)?;
            }
        }
        tracing::debug!(
            "Floor triangulated: {} vertices, {} triangles",
            floor.vertices.len(),
            floor.triangles.len()
        );

        let checked = std::mem::take(&mut floor.checked);
        let mut outlines = OutlineTracer::new(&floor.triangles, &floor.adjacency, checked).trace()?;
        let traced = outlines.len();
        outlines.retain(|outline| !floor.is_frame_loop(outline));
        tracing::debug!("Outlines traced: {}, frame loops dropped: {}", traced, traced - outlines.len());
        let walls = extrude_walls(&floor.vertices, &outlines, self.settings.wall_height)?;
        let floor = floor.into_buffers();

        tracing::info!(
            "Mesh built: {}x{} grid, floor={} tris, outlines={}, walls={} tris in {:?}",
            grid.width(),
            grid.height(),
            floor.triangle_count(),
            outlines.len(),
            walls.triangle_count(),
            start.elapsed()
        );

        Ok(CaveMesh {
            floor,
            walls,
            outlines,
        })
    }
}
