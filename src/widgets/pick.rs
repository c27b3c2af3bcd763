//! Layer picking - screen-space hit test over projected layer bounds.
//!
//! The viewport projects each laid-out layer into a screen rectangle with a
//! view-space depth; picking walks them front to back and the first rect
//! containing the pointer wins. O(layers) per click.

use eframe::egui;

/// One pickable region: a layer's projected bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickRegion {
    pub group_idx: i32,
    pub layer_idx: i32,
    pub rect: egui::Rect,
    /// View-space depth; smaller is closer to the camera
    pub depth: f32,
}

/// First hit front-to-back, or None.
pub fn pick_layer(regions: &[PickRegion], pos: egui::Pos2) -> Option<(i32, i32)> {
    let mut sorted: Vec<&PickRegion> = regions.iter().collect();
    sorted.sort_by(|a, b| {
        a.depth
            .partial_cmp(&b.depth)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted
        .iter()
        .find(|r| r.rect.contains(pos))
        .map(|r| (r.group_idx, r.layer_idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, Rect};

    fn region(g: i32, l: i32, min: (f32, f32), max: (f32, f32), depth: f32) -> PickRegion {
        PickRegion {
            group_idx: g,
            layer_idx: l,
            rect: Rect::from_min_max(pos2(min.0, min.1), pos2(max.0, max.1)),
            depth,
        }
    }

    #[test]
    fn test_miss() {
        let regions = [region(0, 0, (0.0, 0.0), (10.0, 10.0), 1.0)];
        assert_eq!(pick_layer(&regions, pos2(50.0, 50.0)), None);
    }

    #[test]
    fn test_single_hit() {
        let regions = [region(2, 3, (0.0, 0.0), (10.0, 10.0), 1.0)];
        assert_eq!(pick_layer(&regions, pos2(5.0, 5.0)), Some((2, 3)));
    }

    #[test]
    fn test_front_most_wins_on_overlap() {
        let regions = [
            region(0, 0, (0.0, 0.0), (10.0, 10.0), 5.0),
            region(1, 1, (5.0, 5.0), (15.0, 15.0), 2.0),
        ];
        assert_eq!(pick_layer(&regions, pos2(7.0, 7.0)), Some((1, 1)));
    }

    #[test]
    fn test_empty_regions() {
        assert_eq!(pick_layer(&[], pos2(0.0, 0.0)), None);
    }
}
