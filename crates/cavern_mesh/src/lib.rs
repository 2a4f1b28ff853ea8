//! # CAVERN Mesh
//!
//! Marching-squares meshing for binary grids.
//!
//! ## Output
//!
//! A [`CaveMesh`] holds two independent buffer pairs:
//! - `floor`: triangles covering every solid cell, vertices shared between
//!   neighboring squares
//! - `walls`: one quad per boundary edge, extruded `wall_height` downward
//!
//! plus the closed boundary [`Outline`]s the walls were built from.
//!
//! ## Modules
//!
//! - `table`: the 16-entry configuration → polygon table (pure data)
//! - `node`, `square`: node arena and 2×2 squares
//! - `outline`: triangle adjacency and boundary loop tracing
//! - `walls`: wall extrusion
//! - `mesher`: [`MarchingSquaresMesher`] tying it together
//!
//! ## Example
//!
//! ```rust,ignore
//! use cavern_mesh::{MarchingSquaresMesher, MeshSettings};
//!
//! let mesh = MarchingSquaresMesher::new(MeshSettings::default()).build(&grid)?;
//! upload(mesh.floor.vertex_bytes(), mesh.floor.index_bytes());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod mesh;
pub mod mesher;
pub mod node;
pub mod outline;
pub mod square;
pub mod table;
pub mod walls;

pub use error::{MeshError, MeshResult};
pub use mesh::{CaveMesh, MeshBuffers, Triangle, Vertex};
pub use mesher::{MarchingSquaresMesher, MeshSettings};
pub use outline::{Outline, OutlineTracer, TriangleAdjacency};
pub use table::{SquarePoint, POLYGONS};
pub use walls::extrude_walls;
