use mandelview_core::{DetailLevel, Fractal, View};

use crate::buffer::BYTES_PER_PIXEL;
use crate::color::colorize;
use crate::partition::RowBand;

/// One worker's share of a frame.
///
/// Built fresh every frame from the view snapshot and discarded afterwards.
/// `pixels` is the worker's exclusive slice of the frame buffer and covers
/// exactly `rows`; its first byte is pixel `(0, rows.start)`.
#[derive(Debug)]
pub struct RenderJob<'a> {
    pub rows: RowBand,
    pub view: View,
    pub detail_level: DetailLevel,
    /// Sampling stride in pixels for `detail_level`.
    pub stride: u32,
    pub frame_width: u32,
    pub frame_height: u32,
    pixels: &'a mut [u8],
}

impl<'a> RenderJob<'a> {
    pub fn new(
        rows: RowBand,
        view: View,
        detail_level: DetailLevel,
        stride: u32,
        frame_width: u32,
        frame_height: u32,
        pixels: &'a mut [u8],
    ) -> Self {
        debug_assert_eq!(
            pixels.len(),
            rows.height() as usize * frame_width as usize * BYTES_PER_PIXEL
        );
        Self {
            rows,
            view,
            detail_level,
            stride: stride.max(1),
            frame_width,
            frame_height,
            pixels,
        }
    }

    /// Fill the band and return the number of points evaluated.
    ///
    /// Samples sit every `stride` pixels, starting at the band's first row
    /// and column 0. Each sample's color is copied to the `stride × stride`
    /// block below and to the right of it, clipped to the band and frame.
    pub fn run<F: Fractal>(self, fractal: &F) -> u64 {
        let mapping = self.view.mapping(self.frame_width, self.frame_height);
        let max_iterations = fractal.max_iterations();
        let step = self.stride as usize;
        let row_len = self.frame_width as usize * BYTES_PER_PIXEL;
        let mut samples = 0;

        for py in (self.rows.start..self.rows.end).step_by(step) {
            let block_bottom = py.saturating_add(self.stride).min(self.rows.end);

            for px in (0..self.frame_width).step_by(step) {
                let n = fractal.escape_time(mapping.pixel_to_complex(px, py));
                let rgb = colorize(n, max_iterations).to_array();
                samples += 1;

                let block_right = px.saturating_add(self.stride).min(self.frame_width);
                let (x0, x1) = (
                    px as usize * BYTES_PER_PIXEL,
                    block_right as usize * BYTES_PER_PIXEL,
                );
                for y in py..block_bottom {
                    let row = (y - self.rows.start) as usize * row_len;
                    self.pixels[row + x0..row + x1]
                        .chunks_exact_mut(BYTES_PER_PIXEL)
                        .for_each(|p| p.copy_from_slice(&rgb));
                }
            }
        }

        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandelview_core::{Complex, Mandelbrot};

    /// Escape count equals the sampled column, so every block has a
    /// distinct, predictable color.
    struct ColumnFractal;

    impl Fractal for ColumnFractal {
        fn escape_time(&self, c: Complex) -> u32 {
            // With zoom 1 on a 16-wide frame, column px maps to re = px/8 - 1.
            ((c.re + 1.0) * 8.0).round() as u32
        }

        fn max_iterations(&self) -> u32 {
            64
        }
    }

    fn run_band(
        fractal: &impl Fractal,
        rows: RowBand,
        stride: u32,
        w: u32,
        h: u32,
    ) -> (Vec<u8>, u64) {
        let mut pixels = vec![0u8; rows.height() as usize * w as usize * 3];
        let job = RenderJob::new(rows, View::default(), 0, stride, w, h, &mut pixels);
        let samples = job.run(fractal);
        (pixels, samples)
    }

    fn at(pixels: &[u8], w: u32, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * w as usize + x as usize) * 3;
        [pixels[i], pixels[i + 1], pixels[i + 2]]
    }

    #[test]
    fn stride_one_evaluates_every_pixel() {
        let rows = RowBand { start: 0, end: 4 };
        let (_, samples) = run_band(&Mandelbrot::new(20), rows, 1, 6, 4);
        assert_eq!(samples, 24);
    }

    #[test]
    fn blocks_replicate_their_sample() {
        let rows = RowBand { start: 0, end: 8 };
        let (pixels, samples) = run_band(&ColumnFractal, rows, 4, 16, 8);
        assert_eq!(samples, 2 * 4);

        for by in (0..8).step_by(4) {
            for bx in (0..16).step_by(4) {
                let expected = colorize(bx, 64).to_array();
                for y in by..by + 4 {
                    for x in bx..bx + 4 {
                        assert_eq!(at(&pixels, 16, x, y), expected, "pixel ({x}, {y})");
                    }
                }
            }
        }
    }

    #[test]
    fn blocks_clip_to_band_and_frame_edges() {
        // 10 wide, band of 3 rows, stride 4: last column block is 2 wide and
        // the only block row is 3 tall.
        let rows = RowBand { start: 5, end: 8 };
        let (pixels, samples) = run_band(&Mandelbrot::new(30), rows, 4, 10, 12);
        assert_eq!(pixels.len(), 3 * 10 * 3);
        assert_eq!(samples, 3);

        let last_block = at(&pixels, 10, 8, 0);
        assert_eq!(at(&pixels, 10, 9, 2), last_block);
    }

    #[test]
    fn sampling_starts_at_band_top() {
        // Band starts on row 3: the first sample row is 3, not 4.
        let mandelbrot = Mandelbrot::new(40);
        let rows = RowBand { start: 3, end: 7 };
        let (w, h) = (8, 8);
        let (pixels, _) = run_band(&mandelbrot, rows, 2, w, h);

        let mapping = View::default().mapping(w, h);
        let expected = colorize(mandelbrot.escape_time(mapping.pixel_to_complex(2, 3)), 40);
        assert_eq!(at(&pixels, w, 2, 0), expected.to_array());
        assert_eq!(at(&pixels, w, 3, 1), expected.to_array());
    }
}
