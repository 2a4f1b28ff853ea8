//! # Cave Generator
//!
//! Runs the full generation pipeline for one [`GeneratorConfig`].
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut generator = CaveGenerator::new(GeneratorConfig::default());
//! let cave = generator.generate_with_seed(CaveSeed::new(7))?;
//! println!("{}", cave.grid());
//! ```

use std::time::{Duration, Instant};

use cavern_shared::{CellState, Coord, Grid, Vec3};

use crate::automaton::{random_fill, Smoother};
use crate::config::GeneratorConfig;
use crate::error::{CaveError, CaveResult};
use crate::passage::{carve_passage, Passage};
use crate::region::RegionScanner;
use crate::room::RoomGraph;
use crate::seed::CaveSeed;

/// Counters collected during one generation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Seed the run actually used.
    pub seed: u64,
    /// Solid regions turned open by the wall filter.
    pub wall_regions_removed: usize,
    /// Open regions turned solid by the room filter.
    pub room_regions_removed: usize,
    /// Rooms that survived pruning.
    pub room_count: usize,
    /// Passages carved.
    pub passage_count: usize,
    /// Open cells in the finished interior.
    pub open_cells: usize,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

/// A finished cave.
#[derive(Clone, Debug)]
pub struct CaveMap {
    grid: Grid,
    interior: Grid,
    rooms: RoomGraph,
    passages: Vec<Passage>,
    border_size: usize,
    stats: GenerationStats,
}

impl CaveMap {
    /// The bordered grid, ready for meshing.
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The grid before border padding.
    #[inline]
    #[must_use]
    pub const fn interior(&self) -> &Grid {
        &self.interior
    }

    /// Rooms and their links.
    #[inline]
    #[must_use]
    pub const fn rooms(&self) -> &RoomGraph {
        &self.rooms
    }

    /// Passages in carving order.
    #[inline]
    #[must_use]
    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    /// Width of the solid frame around the interior.
    #[inline]
    #[must_use]
    pub const fn border_size(&self) -> usize {
        self.border_size
    }

    /// Run statistics.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Consumes the map, returning the bordered grid.
    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Maps an interior cell to the center of its cell in mesh space.
    ///
    /// Matches the node layout of a mesh built from [`CaveMap::grid`] with
    /// the same `cell_size`: the bordered grid is centered on the origin and
    /// the floor lies at `y = 0`.
    #[must_use]
    pub fn coord_to_world_point(&self, coord: Coord, cell_size: f32) -> Vec3 {
        let width = self.interior.width() as f32;
        let height = self.interior.height() as f32;
        Vec3::new(
            (-width / 2.0 + coord.x as f32 + 0.5) * cell_size,
            0.0,
            (-height / 2.0 + coord.y as f32 + 0.5) * cell_size,
        )
    }
}

/// Cave generator with reusable scratch buffers.
pub struct CaveGenerator {
    config: GeneratorConfig,
    scanner: RegionScanner,
    smoother: Smoother,
}

impl CaveGenerator {
    /// Creates a generator for `config`. The config is checked on every run
    /// and cannot change afterwards.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        let smoother = Smoother::new(config.surround_threshold);
        Self {
            config,
            scanner: RegionScanner::new(),
            smoother,
        }
    }

    /// The active configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a cave with the configured seed.
    ///
    /// # Errors
    ///
    /// See [`CaveGenerator::generate_with_seed`].
    pub fn generate(&mut self) -> CaveResult<CaveMap> {
        let seed = self.config.resolve_seed();
        self.generate_with_seed(seed)
    }

    /// Generates a cave with an explicit seed, ignoring the configured one.
    ///
    /// # Errors
    ///
    /// - [`CaveError::InvalidParameter`] if the config is out of range
    /// - [`CaveError::NoSurvivingRoom`] if pruning removed every room
    /// - [`CaveError::UnreachableRoom`] if some rooms could not be linked
    pub fn generate_with_seed(&mut self, seed: CaveSeed) -> CaveResult<CaveMap> {
        self.config.validate()?;
        let start = Instant::now();
        let config = &self.config;

        let mut rng = seed.rng();
        let mut grid = random_fill(config.width, config.height, config.fill_percent, &mut rng)?;
        tracing::debug!(
            "Random fill {}x{} seed={} solid={}",
            config.width,
            config.height,
            seed,
            grid.count(CellState::Solid)
        );

        self.smoother.smooth(&mut grid, config.smooth_iterations);
        tracing::debug!("Smoothing done: {} passes", config.smooth_iterations);

        let mut stats = GenerationStats {
            seed: seed.value(),
            ..GenerationStats::default()
        };

        let walls = self.scanner.scan(&grid, CellState::Solid);
        for region in walls.iter().filter(|r| r.len() < config.min_wall_region) {
            for tile in &region.tiles {
                grid.set(tile.x, tile.y, CellState::Open);
            }
            stats.wall_regions_removed += 1;
        }

        let (survivors, pockets): (Vec<_>, Vec<_>) = self
            .scanner
            .scan(&grid, CellState::Open)
            .into_iter()
            .partition(|r| r.len() >= config.min_room_region);
        for region in &pockets {
            for tile in &region.tiles {
                grid.set(tile.x, tile.y, CellState::Solid);
            }
        }
        stats.room_regions_removed = pockets.len();
        tracing::debug!(
            "Region pruning: {} wall regions opened, {} room regions filled, {} rooms kept",
            stats.wall_regions_removed,
            stats.room_regions_removed,
            survivors.len()
        );

        let mut rooms = RoomGraph::from_regions(survivors, &grid).ok_or(
            CaveError::NoSurvivingRoom {
                min_room_region: config.min_room_region,
            },
        )?;
        stats.room_count = rooms.len();

        let links = rooms.plan_passages().map_err(|err| {
            tracing::warn!("Room connectivity failed: {}", err);
            err
        })?;

        let mut passages = Vec::with_capacity(links.len());
        for link in links {
            carve_passage(&mut grid, link.from, link.to, config.passage_width);
            tracing::debug!(
                "Passage {} -> {}: ({}, {}) -> ({}, {}), d2={}",
                link.from_room,
                link.to_room,
                link.from.x,
                link.from.y,
                link.to.x,
                link.to.y,
                link.distance_squared
            );
            passages.push(Passage::from(link));
        }
        stats.passage_count = passages.len();
        stats.open_cells = grid.count(CellState::Open);

        let bordered = grid.padded(config.border_size, CellState::Solid);
        stats.elapsed = start.elapsed();

        tracing::info!(
            "Cave generated: {}x{} rooms={} passages={} open={} in {:?}",
            bordered.width(),
            bordered.height(),
            stats.room_count,
            stats.passage_count,
            stats.open_cells,
            stats.elapsed
        );

        Ok(CaveMap {
            grid: bordered,
            interior: grid,
            rooms,
            passages,
            border_size: config.border_size,
            stats,
        })
    }
}
