//! Layer classification - operator kind and shape into visual configuration.
//!
//! Classification happens once per layer per layout pass; downstream code
//! branches on the closed `RankClass` variant instead of re-testing shape
//! lengths.

use once_cell::sync::Lazy;

/// Rank class derived from output shape length.
///
/// Length-3 shapes are a known gap: they are neither flat vectors nor full
/// volumes and currently produce no visual. They classify as `Unsupported`
/// and the caller logs the omission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankClass {
    /// Shape length <= 2: rendered as a marker column
    TwoD,
    /// Shape length >= 4: rendered as a box volume
    Volume,
    /// Shape length 3 (or 0): no visual
    Unsupported,
}

/// Display color tag for a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerColor {
    Yellow,
    Green,
    Red,
    Gray,
}

impl LayerColor {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            LayerColor::Yellow => [230, 200, 50],
            LayerColor::Green => [80, 180, 90],
            LayerColor::Red => [210, 80, 70],
            LayerColor::Gray => [150, 150, 150],
        }
    }
}

/// Visual configuration derived from operator kind. Never stored - always
/// recomputed when a layer is rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualConfig {
    pub color: LayerColor,
    pub translucent: bool,
}

/// Operator substring -> color table. Matched case-insensitively, first
/// hit wins; unknown operators get the neutral default.
static COLOR_TABLE: Lazy<Vec<(&'static str, LayerColor)>> = Lazy::new(|| {
    vec![
        ("conv", LayerColor::Yellow),
        ("max_pool", LayerColor::Green),
        ("maxpool", LayerColor::Green),
        ("sum_pool", LayerColor::Red),
        ("avg_pool", LayerColor::Red),
        ("averagepool", LayerColor::Red),
    ]
});

const BASE_TRANSLUCENT: bool = true;

/// Classify an output shape into its rank class.
pub fn rank_class(output_shape: &[u32]) -> RankClass {
    match output_shape.len() {
        0 | 3 => RankClass::Unsupported,
        1 | 2 => RankClass::TwoD,
        _ => RankClass::Volume,
    }
}

/// Derive the visual configuration for an operator kind. Pure lookup.
pub fn visual_config(op_kind: &str) -> VisualConfig {
    let lower = op_kind.to_ascii_lowercase();
    let color = COLOR_TABLE
        .iter()
        .find(|(pat, _)| lower.contains(pat))
        .map(|(_, c)| *c)
        .unwrap_or(LayerColor::Gray);
    VisualConfig {
        color,
        translucent: BASE_TRANSLUCENT,
    }
}
