use crate::complex::Complex;

/// Trait implemented by escape-time fractals.
///
/// Used through static dispatch: the frame renderer is generic over
/// `F: Fractal`, never `dyn Fractal`, so the escape loop inlines into each
/// band kernel.
pub trait Fractal {
    /// Iterate the point `c` and return the number of completed iterations.
    ///
    /// The result is always in `0..=max_iterations()`; exactly
    /// `max_iterations()` means the orbit never escaped and the point is
    /// presumed interior.
    fn escape_time(&self, c: Complex) -> u32;

    /// The fixed iteration cap. Shared by the color mapper to tell interior
    /// points from escaped ones.
    fn max_iterations(&self) -> u32;
}
