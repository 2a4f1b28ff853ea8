//! # CAVERN
//!
//! Cave generation and meshing, wired together.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │ cavern_procedural│     │   cavern_shared  │     │   cavern_mesh    │
//! │                  │────>│                  │<────│                  │
//! │ • Automaton      │     │ • Grid / Coord   │     │ • Lookup table   │
//! │ • Regions/Rooms  │     │ • Vec3           │     │ • Outlines       │
//! │ • Passages       │     │ • Constants      │     │ • Walls          │
//! └────────┬─────────┘     └──────────────────┘     └────────┬─────────┘
//!          │                                                 │
//!          └──────────────> CavePipeline <───────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: TOML config for both stages
//! - `pipeline`: [`CavePipeline`], the generate-then-mesh driver
//!
//! ## Example
//!
//! ```rust,ignore
//! use cavern::{CaveConfig, CavePipeline};
//!
//! let mut pipeline = CavePipeline::new(CaveConfig::load("cave.toml")?)?;
//! let cave = pipeline.run()?;
//! println!("{}", cave.map.grid());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod pipeline;

// Re-export the stages
pub use cavern_mesh as mesh;
pub use cavern_procedural as procedural;
pub use cavern_shared as shared;

pub use config::CaveConfig;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{CavePipeline, GeneratedCave};
