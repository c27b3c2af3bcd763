//! Group layout - left-to-right placement of one group's layers.
//!
//! Pure given identical inputs: the caller may cache the result keyed on
//! (layers, ratio, base) content and recompute only on change. Positions
//! advance monotonically by each layer's footprint; a layer is centered in
//! the slot it occupies, so adjacent layers touch but never overlap.

use glam::Vec3;
use log::debug;

use crate::model::{rank_class, shape_string, visual_config, LayerRecord, RankClass, VisualConfig};

use super::width::{layer_width, Ratio, MARKER_DIAMETER};

/// Vertical drop of the shape label below a layer, world units (pre-ratio).
pub const LABEL_DROP: f32 = 10.0;

/// Extra drop per consecutive overflowing name, world units (pre-ratio).
pub const LABEL_STEP: f32 = 4.0;

/// Estimated horizontal room per name character, world units (pre-ratio).
/// A heuristic, not text measurement - label collision is reduced, not
/// eliminated.
pub const CHAR_WIDTH: f32 = 2.0;

/// How a placed layer is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerGeometry {
    /// Box with full (x, y, z) extents
    Volume { size: Vec3 },
    /// Column of markers
    Markers { count: usize, radius: f32 },
}

/// One laid-out layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPlacement {
    /// Dense index within the group
    pub layer_index: usize,
    /// Index into the flat symbol table
    pub symbol_idx: usize,
    pub center: Vec3,
    pub width: f32,
    pub rank: RankClass,
    pub visual: VisualConfig,
    pub geometry: LayerGeometry,
    /// Vertical offset of this layer's labels (already ratio-scaled)
    pub label_drop: f32,
    pub name: String,
    pub shape_text: String,
}

/// Layout result for one group.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupLayout {
    pub placements: Vec<LayerPlacement>,
    /// Sum of all per-layer widths; the caller adds the inter-group gap
    /// before placing the next group.
    pub total_width: f32,
}

/// Lay out a group's layers from `base_x`, left to right.
///
/// Unsupported shapes (rank 3) produce no placement; the omission is
/// logged so malformed data is visible rather than silently dropped.
pub fn layout_group(layers: &[LayerRecord], ratio: Ratio, base_x: f32) -> GroupLayout {
    let mut placements = Vec::with_capacity(layers.len());
    let mut run = 0.0f32;
    let mut overflow_run = 0usize;

    for layer in layers {
        let rank = rank_class(&layer.output_shape);
        let Some(width) = layer_width(&layer.output_shape, ratio) else {
            debug!(
                "layer {} ({}) has unsupported shape {:?} - no visual",
                layer.index,
                layer.op_kind,
                layer.output_shape
            );
            continue;
        };

        // Label-overflow run: consecutive long names get increasing drops
        // so neighbors do not collide.
        let est_name_width = layer.op_kind.chars().count() as f32 * CHAR_WIDTH / ratio.get();
        if est_name_width > width {
            overflow_run += 1;
        } else {
            overflow_run = 0;
        }
        let label_drop = (LABEL_DROP + overflow_run as f32 * LABEL_STEP) / ratio.get();

        let geometry = match rank {
            RankClass::Volume => {
                let d = &layer.output_shape;
                let n = d.len();
                // Channel-like, width, height - from the end, batch-agnostic
                let size = Vec3::new(
                    d[n - 3].max(1) as f32,
                    d[n - 2].max(1) as f32,
                    d[n - 1].max(1) as f32,
                ) / ratio.get();
                LayerGeometry::Volume { size }
            }
            RankClass::TwoD => LayerGeometry::Markers {
                count: *layer.output_shape.last().unwrap_or(&0) as usize,
                radius: MARKER_DIAMETER / 2.0 / ratio.get(),
            },
            RankClass::Unsupported => unreachable!("filtered by layer_width"),
        };

        placements.push(LayerPlacement {
            layer_index: layer.index,
            symbol_idx: layer.symbol_idx,
            center: Vec3::new(base_x + run + width / 2.0, 0.0, 0.0),
            width,
            rank,
            visual: visual_config(&layer.op_kind),
            geometry,
            label_drop,
            name: layer.op_kind.clone(),
            shape_text: shape_string(&layer.output_shape),
        });
        run += width;
    }

    GroupLayout {
        placements,
        total_width: run,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(index: usize, op: &str, shape: &[u32]) -> LayerRecord {
        LayerRecord {
            index,
            symbol_idx: index,
            op_kind: op.to_string(),
            output_shape: shape.to_vec(),
            inputs: vec![],
            outputs: vec![],
            symbol: String::new(),
            forward: String::new(),
        }
    }

    fn ratio(r: f32) -> Ratio {
        Ratio::new(r).unwrap()
    }

    #[test]
    fn test_positions_strictly_increasing() {
        let layers = vec![
            layer(0, "Conv", &[1, 25, 100, 100]),
            layer(1, "Conv", &[1, 25, 100, 100]),
            layer(2, "MaxPool", &[1, 30, 25, 25]),
            layer(3, "Gemm", &[64, 100]),
        ];
        let out = layout_group(&layers, ratio(10.0), 0.0);
        assert_eq!(out.placements.len(), 4);
        for pair in out.placements.windows(2) {
            assert!(pair[0].center.x < pair[1].center.x);
        }
    }

    #[test]
    fn test_no_overlap() {
        let layers = vec![
            layer(0, "Conv", &[1, 25, 100, 100]),
            layer(1, "MaxPool", &[1, 30, 25, 25]),
            layer(2, "Gemm", &[64, 100]),
        ];
        let out = layout_group(&layers, ratio(5.0), 2.0);
        for pair in out.placements.windows(2) {
            let right_edge = pair[0].center.x + pair[0].width / 2.0;
            let left_edge = pair[1].center.x - pair[1].width / 2.0;
            assert!(right_edge <= left_edge + 1e-4);
        }
    }

    #[test]
    fn test_total_width_is_sum() {
        let layers = vec![
            layer(0, "Conv", &[1, 20, 10, 10]),
            layer(1, "Conv", &[1, 30, 10, 10]),
        ];
        let out = layout_group(&layers, ratio(10.0), 0.0);
        assert!((out.total_width - (20.0 + 30.0) / 10.0).abs() < 1e-4);
        let last = out.placements.last().unwrap();
        assert!((last.center.x + last.width / 2.0 - out.total_width).abs() < 1e-4);
    }

    #[test]
    fn test_base_offset_shifts_group() {
        let layers = vec![layer(0, "Conv", &[1, 20, 10, 10])];
        let a = layout_group(&layers, ratio(10.0), 0.0);
        let b = layout_group(&layers, ratio(10.0), 7.5);
        assert!((b.placements[0].center.x - a.placements[0].center.x - 7.5).abs() < 1e-4);
    }

    #[test]
    fn test_unsupported_layers_omitted() {
        let layers = vec![
            layer(0, "Conv", &[1, 20, 10, 10]),
            layer(1, "Reshape", &[3, 28, 28]),
            layer(2, "Gemm", &[64, 100]),
        ];
        let out = layout_group(&layers, ratio(10.0), 0.0);
        assert_eq!(out.placements.len(), 2);
    }

    #[test]
    fn test_label_overflow_run_grows_then_resets() {
        // Narrow volumes with long names overflow; a wide one resets the run
        let layers = vec![
            layer(0, "BatchNormalization", &[1, 2, 8, 8]),
            layer(1, "BatchNormalization", &[1, 2, 8, 8]),
            layer(2, "Conv", &[1, 200, 8, 8]),
            layer(3, "BatchNormalization", &[1, 2, 8, 8]),
        ];
        let out = layout_group(&layers, ratio(1.0), 0.0);
        assert!(out.placements[0].label_drop < out.placements[1].label_drop);
        // Short/wide layer resets to the base drop
        assert!((out.placements[2].label_drop - LABEL_DROP).abs() < 1e-4);
        // Run restarts at one step, below the second element of the first run
        assert!(out.placements[3].label_drop < out.placements[1].label_drop);
        assert!(out.placements[3].label_drop > out.placements[2].label_drop);
    }

    #[test]
    fn test_pure_for_identical_input() {
        let layers = vec![
            layer(0, "Conv", &[1, 25, 100, 100]),
            layer(1, "Gemm", &[64, 100]),
        ];
        let a = layout_group(&layers, ratio(10.0), 1.0);
        let b = layout_group(&layers, ratio(10.0), 1.0);
        assert_eq!(a, b);
    }
}
