//! Progressive level-of-detail policy.
//!
//! Level 0 is the coarsest render (one sample per `2^max × 2^max` block);
//! `max_level` samples every pixel. While the viewport is being dragged or
//! zoomed the level is pinned to the floor; once input stops, each frame
//! refines by exactly one level until full resolution is reached.

use std::time::{Duration, Instant};

use crate::config::EngineConfig;

/// Discrete sampling-density index, `0..=max_level`.
pub type DetailLevel = u8;

/// The coarse floor every interaction snaps back to.
pub const COARSEST_LEVEL: DetailLevel = 0;

/// Largest supported `max_level`. Keeps the stride well inside `u32`.
pub const MAX_SUPPORTED_LEVEL: DetailLevel = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailScheduler {
    max_level: DetailLevel,
    interaction_threshold: Duration,
}

impl DetailScheduler {
    pub const DEFAULT_THRESHOLD: Duration = Duration::from_millis(10);

    pub fn new(max_level: DetailLevel, interaction_threshold: Duration) -> Self {
        Self {
            max_level: max_level.min(MAX_SUPPORTED_LEVEL),
            interaction_threshold,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.max_detail_level,
            Duration::from_millis(config.interaction_threshold_ms),
        )
    }

    pub fn max_level(&self) -> DetailLevel {
        self.max_level
    }

    pub fn interaction_threshold(&self) -> Duration {
        self.interaction_threshold
    }

    /// Level for the next frame.
    ///
    /// Returns the floor if `now` is within the interaction threshold of
    /// `last_interaction`, otherwise `previous + 1` saturated at the max.
    pub fn next_level(
        &self,
        last_interaction: Instant,
        now: Instant,
        previous: DetailLevel,
    ) -> DetailLevel {
        if self.is_interacting(last_interaction, now) {
            return COARSEST_LEVEL;
        }
        previous.saturating_add(1).min(self.max_level)
    }

    /// `true` while input is recent enough to keep rendering coarse.
    pub fn is_interacting(&self, last_interaction: Instant, now: Instant) -> bool {
        now.saturating_duration_since(last_interaction) < self.interaction_threshold
    }

    /// Sampling stride in pixels for `level`: `2^(max_level - level)`.
    #[inline]
    pub fn stride(&self, level: DetailLevel) -> u32 {
        1 << (self.max_level - level.min(self.max_level))
    }
}

impl Default for DetailScheduler {
    fn default() -> Self {
        Self::new(EngineConfig::DEFAULT_MAX_DETAIL_LEVEL, Self::DEFAULT_THRESHOLD)
    }
}
