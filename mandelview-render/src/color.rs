/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Map an iteration count to a color.
///
/// Interior points (`iterations >= max_iterations`) are black. Escaped
/// points walk the hue wheel once over `0..max_iterations` at full
/// saturation and value, so faster escapes are red and slow ones violet.
#[inline]
pub fn colorize(iterations: u32, max_iterations: u32) -> Rgb {
    if iterations >= max_iterations {
        return Rgb::BLACK;
    }
    let hue = iterations as f64 / max_iterations as f64;
    hsv_to_rgb(hue, 1.0, 1.0)
}

/// Standard HSV → RGB conversion with `hue` in `[0, 1)`.
///
/// Channels are scaled to `0..=255` and truncated.
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> Rgb {
    let chroma = value * saturation;
    let x = chroma * (1.0 - ((hue * 6.0) % 2.0 - 1.0).abs());
    let m = value - chroma;

    let (r, g, b) = if hue < 1.0 / 6.0 {
        (chroma, x, 0.0)
    } else if hue < 2.0 / 6.0 {
        (x, chroma, 0.0)
    } else if hue < 3.0 / 6.0 {
        (0.0, chroma, x)
    } else if hue < 4.0 / 6.0 {
        (0.0, x, chroma)
    } else if hue < 5.0 / 6.0 {
        (x, 0.0, chroma)
    } else {
        (chroma, 0.0, x)
    };

    Rgb::new(channel(r + m), channel(g + m), channel(b + m))
}

#[inline]
fn channel(v: f64) -> u8 {
    (v * 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_is_black() {
        assert_eq!(colorize(512, 512), Rgb::BLACK);
        assert_eq!(colorize(50, 50), Rgb::BLACK);
        assert_eq!(colorize(1, 1), Rgb::BLACK);
    }

    #[test]
    fn immediate_escape_is_red() {
        assert_eq!(colorize(0, 512), Rgb::new(255, 0, 0));
    }

    #[test]
    fn half_cap_is_cyan() {
        assert_eq!(colorize(256, 512), Rgb::new(0, 255, 255));
    }

    #[test]
    fn sextant_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(0.5, 1.0, 1.0), Rgb::new(0, 255, 255));
        // Value 0 is black whatever the hue.
        assert_eq!(hsv_to_rgb(0.3, 1.0, 0.0), Rgb::BLACK);
        // Saturation 0 at full value is white.
        assert_eq!(hsv_to_rgb(0.7, 0.0, 1.0), Rgb::new(255, 255, 255));
    }

    #[test]
    fn each_sextant_has_one_full_and_one_empty_channel() {
        for i in 0..512 {
            let c = colorize(i, 512).to_array();
            assert!(c.contains(&255), "no saturated channel at {i}: {c:?}");
            assert!(c.contains(&0), "no empty channel at {i}: {c:?}");
        }
    }

    #[test]
    fn colorize_is_pure() {
        for (n, max) in [(0, 512), (17, 512), (300, 512), (49, 50), (50, 50)] {
            assert_eq!(colorize(n, max), colorize(n, max));
        }
    }

    #[test]
    fn escaped_points_are_never_black() {
        for i in 0..50 {
            assert_ne!(colorize(i, 50), Rgb::BLACK);
        }
    }
}
