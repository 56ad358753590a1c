/// Gradient lookup for height-graded histogram bars.

/// A perceptual gradient mapping a scalar in [0, 1] to an RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMap {
    /// Blue (low) to green (high).
    Winter,
}

impl ColorMap {
    pub fn color_at(&self, t: f64) -> (u8, u8, u8) {
        match self {
            ColorMap::Winter => winter(t),
        }
    }
}

/// Blue-to-green gradient: R = 0, G = t, B = 1 - t/2.
fn winter(t: f64) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    let g = (t * 255.0).round() as u8;
    let b = ((1.0 - 0.5 * t) * 255.0).round() as u8;
    (0, g, b)
}

/// Linear min-max rescaling of a value into [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct Normalize {
    min: f64,
    max: f64,
}

impl Normalize {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Rescale over the min/max of `values`.
    pub fn from_values(values: &[f64]) -> Self {
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Self { min, max }
    }

    pub fn apply(&self, value: f64) -> f64 {
        if self.max <= self.min {
            // Degenerate span: everything maps to the gradient start
            return 0.0;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}
