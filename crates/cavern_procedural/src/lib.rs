//! # CAVERN Procedural Generation
//!
//! Deterministic cave generation on a binary grid.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed and config always produce the same grid
//! 2. **Connected**: Every surviving room is reachable from the main room
//! 3. **Enclosed**: The finished map is framed by solid cells
//!
//! ## Pipeline
//!
//! ```text
//! random fill → smoothing → region pruning → room graph → passages → border
//! ```
//!
//! - `automaton`: random fill and double-buffered smoothing
//! - `region`: 4-connected flood fill
//! - `room`: `Room`, `RoomGraph`, nearest-pair search and reachability
//! - `passage`: line rasterization and disc carving
//! - `generator`: `CaveGenerator` orchestrating the whole pipeline
//!
//! ## Example
//!
//! ```rust,ignore
//! use cavern_procedural::{CaveGenerator, GeneratorConfig, SeedSource};
//!
//! let config = GeneratorConfig::default().with_seed(SeedSource::Number(42));
//! let cave = CaveGenerator::new(config).generate()?;
//!
//! assert!(cave.rooms().all_accessible());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod automaton;
pub mod config;
pub mod error;
pub mod generator;
pub mod passage;
pub mod region;
pub mod room;
pub mod seed;

pub use config::GeneratorConfig;
pub use error::{CaveError, CaveResult};
pub use generator::{CaveGenerator, CaveMap, GenerationStats};
pub use passage::Passage;
pub use region::{Region, RegionScanner};
pub use room::{Room, RoomGraph, RoomId, RoomLink};
pub use seed::{CaveSeed, SeedSource};
