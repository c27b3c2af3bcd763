//! Per-layer footprint along the layout axis.
//!
//! Widths scale inversely with the zoom ratio: a larger ratio shrinks every
//! layer, letting more of the model fit in view. The ratio is validated at
//! the boundary - a non-positive divisor is a caller bug and fails fast
//! instead of producing NaN geometry downstream.

use crate::model::{rank_class, RankClass};

/// Marker circle diameter in world units (2-D layers).
pub const MARKER_DIAMETER: f32 = 10.0;

/// Horizontal room reserved for the per-layer name label so labels never
/// overlap neighboring layers.
pub const NAME_TERM: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutError {
    /// The zoom divisor must be strictly positive.
    NonPositiveRatio(f32),
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::NonPositiveRatio(r) => {
                write!(f, "zoom ratio must be > 0, got {}", r)
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Validated zoom divisor. Larger ratio means a smaller on-screen footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratio(f32);

impl Ratio {
    pub fn new(value: f32) -> Result<Self, LayoutError> {
        if value > 0.0 && value.is_finite() {
            Ok(Self(value))
        } else {
            Err(LayoutError::NonPositiveRatio(value))
        }
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

/// On-axis footprint of a single layer at the given ratio.
///
/// Volume layers occupy their channel-like dimension, selected by position
/// from the *end* of the shape so a leading batch dimension does not shift
/// it. 2-D layers occupy a fixed marker diameter plus label room. Returns
/// None for unsupported shapes (no visual, no footprint).
pub fn layer_width(output_shape: &[u32], ratio: Ratio) -> Option<f32> {
    match rank_class(output_shape) {
        RankClass::Volume => {
            let channel = output_shape[output_shape.len() - 3];
            Some(channel.max(1) as f32 / ratio.get())
        }
        RankClass::TwoD => Some((MARKER_DIAMETER + NAME_TERM) / ratio.get()),
        RankClass::Unsupported => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_rejects_non_positive() {
        assert!(Ratio::new(0.0).is_err());
        assert!(Ratio::new(-2.0).is_err());
        assert!(Ratio::new(f32::NAN).is_err());
        assert!(Ratio::new(10.0).is_ok());
    }

    #[test]
    fn test_volume_width_uses_channel_dim() {
        let r = Ratio::new(10.0).unwrap();
        // Without batch: [C, W, H, D]? shape len 4, len-3 = index 1... shape
        // [64, 3, 28, 28]: channel-like dim is 3rd from the end = 3.
        assert_eq!(layer_width(&[64, 3, 28, 28], r), Some(3.0 / 10.0));
        // Leading batch dim does not shift the selection
        assert_eq!(layer_width(&[2, 64, 3, 28, 28], r), Some(3.0 / 10.0));
    }

    #[test]
    fn test_two_d_width() {
        let r = Ratio::new(2.0).unwrap();
        assert_eq!(layer_width(&[64, 100], r), Some((10.0 + 6.0) / 2.0));
        assert_eq!(layer_width(&[100], r), Some((10.0 + 6.0) / 2.0));
    }

    #[test]
    fn test_unsupported_has_no_width() {
        let r = Ratio::new(1.0).unwrap();
        assert_eq!(layer_width(&[3, 28, 28], r), None);
        assert_eq!(layer_width(&[], r), None);
    }

    #[test]
    fn test_width_positive_and_monotonic_in_ratio() {
        let shapes: [&[u32]; 3] = [&[64, 3, 28, 28], &[64, 100], &[1, 1, 1, 1]];
        for shape in shapes {
            let mut prev = f32::INFINITY;
            for r in [0.5f32, 1.0, 2.0, 10.0, 100.0] {
                let w = layer_width(shape, Ratio::new(r).unwrap()).unwrap();
                assert!(w > 0.0, "width must be positive for {:?} at {}", shape, r);
                assert!(w <= prev, "width must not grow as ratio grows");
                prev = w;
            }
        }
    }
}
