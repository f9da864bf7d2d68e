use crate::complex::Complex;
use crate::fractal::Fractal;

/// Squared bailout radius. Orbits with `|z|² >= 4` have escaped.
pub const ESCAPE_NORM_SQ: f64 = 4.0;

/// The Mandelbrot set: `z_{n+1} = z_n² + c`, starting from `z₀ = 0`.
///
/// The iteration cap is fixed for the lifetime of the value; detail levels
/// only change how many points are sampled, never how deep each one goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mandelbrot {
    max_iterations: u32,
}

impl Mandelbrot {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 512;

    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }
}

impl Default for Mandelbrot {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ITERATIONS)
    }
}

/// Count iterations of `z ← z² + c` for `c = (x0, y0)`.
///
/// The loop keeps going while `x² + y² < 4.0` and the cap has not been hit,
/// so the returned count lies in `0..=max_iterations`.
#[inline]
pub fn evaluate(x0: f64, y0: f64, max_iterations: u32) -> u32 {
    let mut x = 0.0_f64;
    let mut y = 0.0_f64;
    let mut iteration = 0;

    while x * x + y * y < ESCAPE_NORM_SQ && iteration < max_iterations {
        let x_next = x * x - y * y + x0;
        y = 2.0 * x * y + y0;
        x = x_next;
        iteration += 1;
    }

    iteration
}

impl Fractal for Mandelbrot {
    #[inline]
    fn escape_time(&self, c: Complex) -> u32 {
        evaluate(c.re, c.im, self.max_iterations)
    }

    fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}
