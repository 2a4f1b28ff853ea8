//! # Generator Configuration
//!
//! All knobs of the cave generator in one serializable struct.
//! Missing fields in a config file fall back to the defaults in
//! [`cavern_shared::constants`].

use cavern_shared::constants::{
    DEFAULT_BORDER_SIZE, DEFAULT_FILL_PERCENT, DEFAULT_HEIGHT, DEFAULT_MIN_ROOM_REGION,
    DEFAULT_MIN_WALL_REGION, DEFAULT_PASSAGE_WIDTH, DEFAULT_SMOOTH_ITERATIONS,
    DEFAULT_SURROUND_THRESHOLD, DEFAULT_WIDTH,
};
use serde::{Deserialize, Serialize};

use crate::error::{CaveError, CaveResult};
use crate::seed::{CaveSeed, SeedSource};

/// Parameters for one cave generation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Interior width in cells (before the border is added).
    pub width: usize,
    /// Interior height in cells (before the border is added).
    pub height: usize,
    /// Chance (0-100) that an interior cell starts solid.
    pub fill_percent: u8,
    /// Seed for the random fill.
    pub seed: SeedSource,
    /// Ignore `seed` and seed from the system clock instead.
    pub use_random_seed: bool,
    /// Number of smoothing passes.
    pub smooth_iterations: u32,
    /// Solid-neighbor count (0-8) at which a cell keeps its state.
    pub surround_threshold: u8,
    /// Solid regions smaller than this become open.
    pub min_wall_region: usize,
    /// Open regions smaller than this become solid.
    pub min_room_region: usize,
    /// Radius of carved passages (at least 1).
    pub passage_width: u32,
    /// Width of the solid frame around the finished map.
    pub border_size: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fill_percent: DEFAULT_FILL_PERCENT,
            seed: SeedSource::default(),
            use_random_seed: false,
            smooth_iterations: DEFAULT_SMOOTH_ITERATIONS,
            surround_threshold: DEFAULT_SURROUND_THRESHOLD,
            min_wall_region: DEFAULT_MIN_WALL_REGION,
            min_room_region: DEFAULT_MIN_ROOM_REGION,
            passage_width: DEFAULT_PASSAGE_WIDTH,
            border_size: DEFAULT_BORDER_SIZE,
        }
    }
}

impl GeneratorConfig {
    /// Sets the interior size.
    #[must_use]
    pub const fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the fill percentage.
    #[must_use]
    pub const fn with_fill_percent(mut self, fill_percent: u8) -> Self {
        self.fill_percent = fill_percent;
        self
    }

    /// Sets the seed and turns off clock seeding.
    #[must_use]
    pub fn with_seed(mut self, seed: impl Into<SeedSource>) -> Self {
        self.seed = seed.into();
        self.use_random_seed = false;
        self
    }

    /// Sets the smoothing passes and threshold.
    #[must_use]
    pub const fn with_smoothing(mut self, iterations: u32, surround_threshold: u8) -> Self {
        self.smooth_iterations = iterations;
        self.surround_threshold = surround_threshold;
        self
    }

    /// Sets the region size filters.
    #[must_use]
    pub const fn with_region_limits(mut self, min_wall_region: usize, min_room_region: usize) -> Self {
        self.min_wall_region = min_wall_region;
        self.min_room_region = min_room_region;
        self
    }

    /// Sets the passage radius.
    #[must_use]
    pub const fn with_passage_width(mut self, passage_width: u32) -> Self {
        self.passage_width = passage_width;
        self
    }

    /// Sets the border width.
    #[must_use]
    pub const fn with_border_size(mut self, border_size: usize) -> Self {
        self.border_size = border_size;
        self
    }

    /// Checks every parameter range.
    ///
    /// # Errors
    ///
    /// Returns [`CaveError::InvalidParameter`] for the first bad value.
    pub fn validate(&self) -> CaveResult<()> {
        if self.width == 0 {
            return Err(CaveError::invalid("width", "must be at least 1"));
        }
        if self.height == 0 {
            return Err(CaveError::invalid("height", "must be at least 1"));
        }
        let frame = self.border_size.saturating_mul(2);
        if i32::try_from(self.width.saturating_add(frame)).is_err()
            || i32::try_from(self.height.saturating_add(frame)).is_err()
        {
            return Err(CaveError::invalid("width/height", "bordered map exceeds i32 coordinates"));
        }
        if self.fill_percent > 100 {
            return Err(CaveError::invalid(
                "fill_percent",
                format!("{} is outside 0..=100", self.fill_percent),
            ));
        }
        if self.surround_threshold > 8 {
            return Err(CaveError::invalid(
                "surround_threshold",
                format!("{} is outside 0..=8", self.surround_threshold),
            ));
        }
        if self.passage_width == 0 {
            return Err(CaveError::invalid("passage_width", "must be at least 1"));
        }
        Ok(())
    }

    /// Resolves the seed for one run. Clock seeding yields a fresh seed on
    /// every call.
    #[must_use]
    pub fn resolve_seed(&self) -> CaveSeed {
        if self.use_random_seed {
            CaveSeed::from_clock()
        } else {
            self.seed.resolve()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(GeneratorConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_out_of_range() {
        let bad = [
            GeneratorConfig::default().with_size(0, 10),
            GeneratorConfig::default().with_size(10, 0),
            GeneratorConfig::default().with_fill_percent(101),
            GeneratorConfig::default().with_smoothing(5, 9),
            GeneratorConfig::default().with_passage_width(0),
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(CaveError::InvalidParameter { .. })),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_with_seed_disables_clock() {
        let config = GeneratorConfig {
            use_random_seed: true,
            ..GeneratorConfig::default()
        }
        .with_seed(9u64);
        assert!(!config.use_random_seed);
        assert_eq!(config.resolve_seed(), CaveSeed::new(9));
    }
}
