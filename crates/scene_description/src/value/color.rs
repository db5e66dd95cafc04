//! RGB color values

use serde::{Deserialize, Serialize};

/// Linear RGB triple, emitted as `{type: "rgb", value: [r, g, b]}`
///
/// Components are not clamped: emitter intensities routinely exceed 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub [f64; 3]);

impl Rgb {
    /// Type tag of the emitted document
    pub const TYPE_TAG: &'static str = "rgb";

    /// Create a color from components
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self([r, g, b])
    }

    /// Create a gray color with all components equal
    pub const fn gray(value: f64) -> Self {
        Self([value, value, value])
    }

    /// Create a color from a `0xRRGGBB` code, components in 0-1
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| f64::from((hex >> shift) & 0xFF) / 255.0;
        Self([channel(16), channel(8), channel(0)])
    }

    /// Component array
    pub const fn values(&self) -> [f64; 3] {
        self.0
    }
}

impl From<[f64; 3]> for Rgb {
    fn from(values: [f64; 3]) -> Self {
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hex_channels() {
        let color = Rgb::from_hex(0xFF8000);
        assert_relative_eq!(color.0[0], 1.0);
        assert_relative_eq!(color.0[1], 128.0 / 255.0);
        assert_relative_eq!(color.0[2], 0.0);
    }

    #[test]
    fn test_components_not_clamped() {
        assert_eq!(Rgb::gray(3.0).values(), [3.0, 3.0, 3.0]);
    }
}
