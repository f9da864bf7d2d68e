pub mod buffer;
pub mod color;
pub mod engine;
pub mod error;
pub mod job;
pub mod partition;
pub mod present;

pub use buffer::{FrameBuffer, BYTES_PER_PIXEL};
pub use color::{colorize, hsv_to_rgb, Rgb};
pub use engine::{Engine, FrameStats};
pub use error::RenderError;
pub use job::RenderJob;
pub use partition::{partition, resolve_worker_count, RowBand};
pub use present::FramePresenter;

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
