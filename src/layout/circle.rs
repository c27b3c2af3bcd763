//! Marker column for 2-D layers.
//!
//! A vector's breadth is shown as a column of circle markers placed
//! symmetrically above and below the layer center. Wide vectors are capped:
//! past `MAX_MARKERS` only the capped count is emitted plus one enclosing
//! placeholder volume signaling "n markers collapsed here". This bounds
//! per-layer draw cost for wide vectors.

use glam::Vec3;

/// Marker-count cap per column.
pub const MAX_MARKERS: usize = 16;

/// Enclosing volume standing in for the markers beyond the cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placeholder {
    pub center: Vec3,
    /// Full vertical extent of the uncapped column
    pub height: f32,
    /// Collapsed marker count (the original n)
    pub count: usize,
}

/// Result of a circle layout pass. Deterministic for fixed input - the
/// offset sequence is used as a memoization key by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleLayout {
    pub markers: Vec<Vec3>,
    /// Present exactly once when n exceeds the cap
    pub placeholder: Option<Placeholder>,
}

/// Lay out `n` markers of radius `r` around `base`.
///
/// Markers are spaced one diameter apart. Emission works inward in
/// left/right pairs from (n-1)/2 steps out: an odd n lands exactly once on
/// the center, an even n never emits a duplicate center point.
pub fn circle_layout(base: Vec3, n: usize, r: f32) -> CircleLayout {
    let capped = n.min(MAX_MARKERS);
    let step = 2.0 * r;

    let mut markers = Vec::with_capacity(capped);
    if capped > 0 {
        let mut lo = -((capped as f32 - 1.0) / 2.0);
        let mut hi = -lo;
        while lo < hi {
            markers.push(base + Vec3::new(0.0, lo * step, 0.0));
            markers.push(base + Vec3::new(0.0, hi * step, 0.0));
            lo += 1.0;
            hi -= 1.0;
        }
        if (lo - hi).abs() < f32::EPSILON {
            markers.push(base + Vec3::new(0.0, lo * step, 0.0));
        }
        // Draw order top-to-bottom
        markers.sort_by(|a, b| b.y.partial_cmp(&a.y).unwrap_or(std::cmp::Ordering::Equal));
    }

    let placeholder = (n > MAX_MARKERS).then(|| Placeholder {
        center: base,
        height: n as f32 * step,
        count: n,
    });

    CircleLayout {
        markers,
        placeholder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_below_cap() {
        for n in 1..=16 {
            let out = circle_layout(Vec3::ZERO, n, 1.0);
            assert_eq!(out.markers.len(), n);
            assert!(out.placeholder.is_none());
        }
    }

    #[test]
    fn test_capped_with_placeholder() {
        let out = circle_layout(Vec3::ZERO, 100, 1.0);
        assert_eq!(out.markers.len(), MAX_MARKERS);
        let ph = out.placeholder.expect("placeholder for n > cap");
        assert_eq!(ph.count, 100);
        assert!(ph.height > out.markers.len() as f32 * 2.0);
    }

    #[test]
    fn test_even_n_symmetric_without_center() {
        let base = Vec3::new(5.0, 3.0, 0.0);
        let out = circle_layout(base, 4, 1.0);
        let ys: Vec<f32> = out.markers.iter().map(|m| m.y - base.y).collect();
        // Symmetric about base: offsets sum to zero
        assert!(ys.iter().sum::<f32>().abs() < 1e-4);
        // No marker at the exact center
        assert!(ys.iter().all(|y| y.abs() > 1e-4));
    }

    #[test]
    fn test_odd_n_lands_once_on_center() {
        let base = Vec3::new(0.0, 2.0, 0.0);
        let out = circle_layout(base, 5, 1.5);
        let centered = out
            .markers
            .iter()
            .filter(|m| (m.y - base.y).abs() < 1e-4)
            .count();
        assert_eq!(centered, 1);
    }

    #[test]
    fn test_spacing_is_one_diameter() {
        let out = circle_layout(Vec3::ZERO, 3, 2.0);
        let mut ys: Vec<f32> = out.markers.iter().map(|m| m.y).collect();
        ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((ys[1] - ys[0] - 4.0).abs() < 1e-4);
        assert!((ys[2] - ys[1] - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_deterministic() {
        let a = circle_layout(Vec3::new(1.0, 2.0, 3.0), 9, 0.5);
        let b = circle_layout(Vec3::new(1.0, 2.0, 3.0), 9, 0.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_markers() {
        let out = circle_layout(Vec3::ZERO, 0, 1.0);
        assert!(out.markers.is_empty());
        assert!(out.placeholder.is_none());
    }
}
