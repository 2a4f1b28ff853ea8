//! # Cave Pipeline
//!
//! Generate, then mesh, keeping the latest result around for the caller.
//!
//! ```text
//! CaveConfig ──> CaveGenerator ──> CaveMap (bordered Grid)
//!                                      │
//!                                      v
//!                       MarchingSquaresMesher ──> CaveMesh
//! ```
//!
//! Every run replaces the previous cave completely. A failed run leaves no
//! cave behind.

use cavern_mesh::{CaveMesh, MarchingSquaresMesher};
use cavern_procedural::{CaveError, CaveGenerator, CaveMap, CaveSeed};
use cavern_shared::{Coord, Vec3};

use crate::config::CaveConfig;
use crate::error::{PipelineError, PipelineResult};

/// A generated cave and its mesh.
#[derive(Clone, Debug)]
pub struct GeneratedCave {
    /// The generated map.
    pub map: CaveMap,
    /// Mesh built from the map's bordered grid.
    pub mesh: CaveMesh,
}

impl GeneratedCave {
    /// Seed the map was generated from.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> CaveSeed {
        CaveSeed::new(self.map.stats().seed)
    }
}

/// Owns a generator and a mesher built from one [`CaveConfig`].
pub struct CavePipeline {
    config: CaveConfig,
    generator: CaveGenerator,
    mesher: MarchingSquaresMesher,
    current: Option<GeneratedCave>,
}

impl CavePipeline {
    /// Creates a pipeline. Nothing is generated until [`CavePipeline::run`].
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if either section is out of range.
    pub fn new(config: CaveConfig) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self {
            generator: CaveGenerator::new(config.generator.clone()),
            mesher: MarchingSquaresMesher::new(config.mesh),
            config,
            current: None,
        })
    }

    /// The active configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &CaveConfig {
        &self.config
    }

    /// The latest successful cave, if the last run succeeded.
    #[inline]
    #[must_use]
    pub const fn current(&self) -> Option<&GeneratedCave> {
        self.current.as_ref()
    }

    /// The latest map.
    #[must_use]
    pub fn map(&self) -> Option<&CaveMap> {
        self.current.as_ref().map(|cave| &cave.map)
    }

    /// The latest mesh.
    #[must_use]
    pub fn mesh(&self) -> Option<&CaveMesh> {
        self.current.as_ref().map(|cave| &cave.mesh)
    }

    /// Takes the latest cave out of the pipeline.
    pub fn take(&mut self) -> Option<GeneratedCave> {
        self.current.take()
    }

    /// Generates and meshes a cave with the configured seed.
    ///
    /// # Errors
    ///
    /// See [`CavePipeline::regenerate_with_seed`].
    pub fn run(&mut self) -> PipelineResult<&GeneratedCave> {
        let seed = self.config.generator.resolve_seed();
        self.regenerate_with_seed(seed)
    }

    /// Discards the current cave and builds a new one from `seed`.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Generation`] if the generator fails
    /// - [`PipelineError::Mesh`] if the mesher fails
    pub fn regenerate_with_seed(&mut self, seed: CaveSeed) -> PipelineResult<&GeneratedCave> {
        self.current = None;
        let cave = self.build(seed)?;
        Ok(self.current.insert(cave))
    }

    /// Like [`CavePipeline::run`], but retries with derived seeds while
    /// pruning leaves no room. At least one attempt is made.
    ///
    /// # Errors
    ///
    /// Returns the last error once `attempts` runs have failed, or the first
    /// error that is not [`CaveError::NoSurvivingRoom`].
    pub fn generate_with_retries(&mut self, attempts: u32) -> PipelineResult<&GeneratedCave> {
        self.current = None;
        let base = self.config.generator.resolve_seed();
        let mut last_error = None;

        for attempt in 0..attempts.max(1) {
            let seed = if attempt == 0 {
                base
            } else {
                base.derive(u64::from(attempt))
            };

            match self.build(seed) {
                Ok(cave) => {
                    if attempt > 0 {
                        tracing::info!("Cave found on attempt {} (seed {})", attempt + 1, seed);
                    }
                    return Ok(self.current.insert(cave));
                }
                Err(err @ PipelineError::Generation(CaveError::NoSurvivingRoom { .. })) => {
                    tracing::warn!("Attempt {} with seed {} failed: {}", attempt + 1, seed, err);
                    last_error = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            PipelineError::Config("no generation attempt was made".to_string())
        }))
    }

    /// Mesh-space center of an interior cell of the current cave.
    #[must_use]
    pub fn coord_to_world_point(&self, coord: Coord) -> Option<Vec3> {
        self.map()
            .map(|map| map.coord_to_world_point(coord, self.config.mesh.cell_size))
    }

    fn build(&mut self, seed: CaveSeed) -> PipelineResult<GeneratedCave> {
        let map = self.generator.generate_with_seed(seed)?;
        let mesh = self.mesher.build(map.grid())?;
        tracing::info!(
            "Pipeline run: seed={} rooms={} floor_tris={} wall_tris={}",
            seed,
            map.stats().room_count,
            mesh.floor.triangle_count(),
            mesh.walls.triangle_count()
        );
        Ok(GeneratedCave { map, mesh })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cavern_shared::CellState;

    fn small_config() -> CaveConfig {
        let mut config = CaveConfig::default();
        config.generator = config
            .generator
            .with_size(40, 30)
            .with_fill_percent(45)
            .with_region_limits(10, 10)
            .with_seed(17u64);
        config
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let mut config = small_config();
        config.mesh.cell_size = 0.0;
        assert!(matches!(CavePipeline::new(config), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_run_keeps_last_cave() {
        let mut pipeline = CavePipeline::new(small_config()).unwrap();
        assert!(pipeline.current().is_none());

        let seed = pipeline.run().unwrap().seed();
        assert_eq!(seed, CaveSeed::new(17));
        assert!(pipeline.map().is_some());
        assert!(pipeline.mesh().is_some());
    }

    #[test]
    fn test_regenerate_replaces_cave() {
        let mut pipeline = CavePipeline::new(small_config()).unwrap();
        let first = pipeline.run().unwrap().map.grid().clone();
        let second = pipeline.regenerate_with_seed(CaveSeed::new(99)).unwrap();
        assert_eq!(second.seed(), CaveSeed::new(99));
        assert_ne!(&first, second.map.grid());
    }

    #[test]
    fn test_failed_run_clears_cave() {
        let mut config = small_config();
        config.generator = config.generator.with_fill_percent(100);
        let mut pipeline = CavePipeline::new(config).unwrap();

        assert!(matches!(
            pipeline.run(),
            Err(PipelineError::Generation(CaveError::NoSurvivingRoom { .. }))
        ));
        assert!(pipeline.current().is_none());
    }

    #[test]
    fn test_retries_give_up_after_attempts() {
        let mut config = small_config();
        config.generator = config.generator.with_fill_percent(100);
        let mut pipeline = CavePipeline::new(config).unwrap();

        assert!(matches!(
            pipeline.generate_with_retries(3),
            Err(PipelineError::Generation(CaveError::NoSurvivingRoom { .. }))
        ));
    }

    #[test]
    fn test_world_point_is_open_floor_center() {
        let mut pipeline = CavePipeline::new(small_config()).unwrap();
        assert!(pipeline.coord_to_world_point(Coord::new(0, 0)).is_none());

        pipeline.run().unwrap();
        let map = pipeline.map().unwrap();
        let open = map
            .interior()
            .coords()
            .find(|c| map.interior().get(c.x, c.y) == Some(CellState::Open))
            .unwrap();
        let point = pipeline.coord_to_world_point(open).unwrap();
        assert!(point.y.abs() < f32::EPSILON);
    }
}
