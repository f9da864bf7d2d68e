use serde::{Deserialize, Serialize};

use crate::detail::{DetailLevel, MAX_SUPPORTED_LEVEL};
use crate::error::CoreError;

/// Fixed parameters of a render engine.
///
/// Everything here is decided once at startup; changing any of it means
/// building a new engine. Missing keys fall back to their defaults when
/// deserialized, so older preference files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Frame width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Frame height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Escape cap. Also sets the color gradient resolution.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Number of refinement steps; the coarsest stride is `2^max_detail_level`.
    #[serde(default = "default_max_detail_level")]
    pub max_detail_level: DetailLevel,
    /// Input younger than this keeps the render at the coarse floor.
    #[serde(default = "default_interaction_threshold_ms")]
    pub interaction_threshold_ms: u64,
    /// Pin the worker count. `None` uses the available hardware parallelism.
    #[serde(default)]
    pub workers: Option<usize>,
}

impl EngineConfig {
    pub const DEFAULT_WIDTH: u32 = 1920;
    pub const DEFAULT_HEIGHT: u32 = 1080;
    pub const DEFAULT_MAX_ITERATIONS: u32 = 512;
    pub const DEFAULT_MAX_DETAIL_LEVEL: DetailLevel = 5;
    pub const DEFAULT_INTERACTION_THRESHOLD_MS: u64 = 10;

    /// Default config with a different frame size.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check the invariants the renderer relies on.
    pub fn validate(&self) -> crate::Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid(format!(
                "frame dimensions must be > 0, got {}×{}",
                self.width, self.height
            )));
        }
        if self.max_iterations == 0 {
            return Err(invalid("max_iterations must be >= 1".into()));
        }
        if self.max_detail_level > MAX_SUPPORTED_LEVEL {
            return Err(invalid(format!(
                "max_detail_level must be <= {MAX_SUPPORTED_LEVEL}, got {}",
                self.max_detail_level
            )));
        }
        if self.workers == Some(0) {
            return Err(invalid("workers must be >= 1 when set".into()));
        }
        Ok(())
    }

    /// Bytes in one RGB frame of this size.
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

fn invalid(reason: String) -> CoreError {
    CoreError::InvalidConfig { reason }
}

fn default_width() -> u32 {
    EngineConfig::DEFAULT_WIDTH
}
fn default_height() -> u32 {
    EngineConfig::DEFAULT_HEIGHT
}
fn default_max_iterations() -> u32 {
    EngineConfig::DEFAULT_MAX_ITERATIONS
}
fn default_max_detail_level() -> DetailLevel {
    EngineConfig::DEFAULT_MAX_DETAIL_LEVEL
}
fn default_interaction_threshold_ms() -> u64 {
    EngineConfig::DEFAULT_INTERACTION_THRESHOLD_MS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            max_iterations: default_max_iterations(),
            max_detail_level: default_max_detail_level(),
            interaction_threshold_ms: default_interaction_threshold_ms(),
            workers: None,
        }
    }
}
