//! # CAVERN Shared
//!
//! Common types used by both the cave generator and the mesher.
//!
//! ## CRITICAL RULE
//!
//! This crate holds data, not algorithms:
//! - `Grid`: the binary occupancy map handed from generator to mesher
//! - `Coord`: integer cell address
//! - `Vec3`: mesh-space positions
//!
//! If you need flood fills or triangulation, put them in `cavern_procedural`
//! or `cavern_mesh`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
pub mod error;
pub mod grid;
pub mod math;

pub use error::{GridError, GridResult};
pub use grid::{CellState, Coord, Grid};
pub use math::Vec3;
