//! # Pipeline Configuration
//!
//! One TOML file configures both stages:
//!
//! ```toml
//! [generator]
//! width = 96
//! height = 64
//! fill_percent = 47
//! seed = "crystal grotto"
//!
//! [mesh]
//! cell_size = 1.0
//! wall_height = 5.0
//! ```
//!
//! Missing tables and keys fall back to their defaults.

use std::fs;
use std::path::Path;

use cavern_mesh::MeshSettings;
use cavern_procedural::GeneratorConfig;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

/// Settings for one generate-then-mesh run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveConfig {
    /// Generator parameters.
    pub generator: GeneratorConfig,
    /// Mesher parameters.
    pub mesh: MeshSettings,
}

impl CaveConfig {
    /// Parses a config from TOML text and validates both sections.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] for malformed TOML or out-of-range
    /// values.
    pub fn from_toml_str(text: &str) -> PipelineResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| PipelineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Io`] if the file cannot be read, otherwise
    /// the errors of [`CaveConfig::from_toml_str`].
    pub fn load<P: AsRef<Path>>(path: P) -> PipelineResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded cave config from {}", path.display());
        Ok(config)
    }

    /// Serializes the config back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if serialization fails.
    pub fn to_toml_string(&self) -> PipelineResult<String> {
        toml::to_string(self).map_err(|e| PipelineError::Config(e.to_string()))
    }

    /// Checks both sections.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] naming the first bad value.
    pub fn validate(&self) -> PipelineResult<()> {
        self.generator
            .validate()
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        self.mesh
            .validate()
            .map_err(|e| PipelineError::Config(e.to_string()))
    }
}
