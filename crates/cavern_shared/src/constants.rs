//! # Default Cave Parameters
//!
//! Baseline values for a medium cave. Config files override any of them.

// =============================================================================
// GENERATION
// =============================================================================

/// Interior map width in cells.
pub const DEFAULT_WIDTH: usize = 100;

/// Interior map height in cells.
pub const DEFAULT_HEIGHT: usize = 100;

/// Chance (percent) that an interior cell starts solid.
pub const DEFAULT_FILL_PERCENT: u8 = 50;

/// Seed text used when no seed is configured.
pub const DEFAULT_SEED_TEXT: &str = "hello world";

/// Cellular-automaton passes after the random fill.
pub const DEFAULT_SMOOTH_ITERATIONS: u32 = 5;

/// Neighbor count at which a cell keeps its state.
pub const DEFAULT_SURROUND_THRESHOLD: u8 = 4;

/// Solid regions with fewer cells than this are opened up.
pub const DEFAULT_MIN_WALL_REGION: usize = 50;

/// Open regions with fewer cells than this are filled in.
pub const DEFAULT_MIN_ROOM_REGION: usize = 50;

/// Radius of carved passages.
pub const DEFAULT_PASSAGE_WIDTH: u32 = 1;

/// Width of the solid frame added around the finished map.
pub const DEFAULT_BORDER_SIZE: usize = 5;

// =============================================================================
// MESHING
// =============================================================================

/// World-space size of one grid cell.
pub const DEFAULT_CELL_SIZE: f32 = 1.0;

/// How far walls extend below the floor surface.
pub const DEFAULT_WALL_HEIGHT: f32 = 5.0;
