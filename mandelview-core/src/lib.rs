pub mod complex;
pub mod config;
pub mod detail;
pub mod error;
pub mod fractal;
pub mod mandelbrot;
pub mod viewport;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use config::EngineConfig;
pub use detail::{DetailLevel, DetailScheduler, COARSEST_LEVEL};
pub use error::CoreError;
pub use fractal::Fractal;
pub use mandelbrot::{evaluate, Mandelbrot};
pub use viewport::{wheel_zoom_factor, PixelMapping, View, Viewport};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
