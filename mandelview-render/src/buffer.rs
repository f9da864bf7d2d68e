use crate::color::Rgb;
use crate::partition::RowBand;

/// Bytes per pixel (R, G, B).
pub const BYTES_PER_PIXEL: usize = 3;

/// The RGB frame shared by all workers.
///
/// Allocated once per engine and overwritten in place every frame. Workers
/// never see the whole buffer: [`split_bands`](Self::split_bands) hands each
/// one an exclusive slice covering only its rows.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    /// RGB pixel data, 3 bytes per pixel, row-major order.
    pixels: Vec<u8>,
}

impl FrameBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * BYTES_PER_PIXEL],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw row-major RGB bytes, `width * height * 3` long.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Bytes in one row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Color at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let idx = y as usize * self.row_len() + x as usize * BYTES_PER_PIXEL;
        Rgb::new(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2])
    }

    /// Carve the buffer into one mutable slice per band.
    ///
    /// `bands` must tile `0..height` in order (see
    /// [`partition`](crate::partition::partition)); the returned slices are
    /// therefore disjoint and each covers exactly its band's rows.
    pub fn split_bands(&mut self, bands: &[RowBand]) -> Vec<&mut [u8]> {
        debug_assert!(crate::partition::covers_exactly(bands, self.height));
        let row_len = self.row_len();
        let mut rest: &mut [u8] = &mut self.pixels;
        let mut slices = Vec::with_capacity(bands.len());
        for band in bands {
            let (head, tail) =
                std::mem::take(&mut rest).split_at_mut(band.height() as usize * row_len);
            slices.push(head);
            rest = tail;
        }
        slices
    }
}
