//! Scene assembly - full model layout with inter-group connectors.
//!
//! Runs every group through the group layout with a cumulative base offset,
//! a fixed gap between groups, and a connector arrow in each gap. The
//! result is the draw list consumed by the viewport each layout pass.

use glam::Vec3;

use crate::model::GroupRecord;

use super::group::{layout_group, GroupLayout};
use super::width::Ratio;

/// World-space gap between consecutive groups (pre-ratio).
pub const GROUP_GAP: f32 = 40.0;

/// Fraction of a connector occupied by the shaft; the rest is the head.
pub const CONN_RATE: f32 = 0.7;

/// Connector shaft radius (pre-ratio).
pub const CONN_RADIUS: f32 = 5.0;

/// Connector arrow between two groups.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub from: Vec3,
    pub to: Vec3,
    /// Shaft/head split along the arrow length
    pub rate: f32,
    pub radius: f32,
}

/// One group's placements within the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGroup {
    pub group_index: usize,
    pub layout: GroupLayout,
}

/// Complete laid-out scene.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub groups: Vec<SceneGroup>,
    pub arrows: Vec<Arrow>,
    /// Total occupied extent including gaps
    pub total_width: f32,
}

impl Scene {
    /// Center of the whole arrangement, for camera framing.
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.total_width / 2.0, 0.0, 0.0)
    }
}

/// Lay out all groups left to right with connector arrows in the gaps.
pub fn build_scene(groups: &[GroupRecord], ratio: Ratio) -> Scene {
    let gap = GROUP_GAP / ratio.get();
    let mut scene = Scene::default();
    let mut cursor = 0.0f32;

    for (i, group) in groups.iter().enumerate() {
        let layout = layout_group(&group.layers, ratio, cursor);
        let group_end = cursor + layout.total_width;

        if i + 1 < groups.len() {
            scene.arrows.push(Arrow {
                from: Vec3::new(group_end, 0.0, 0.0),
                to: Vec3::new(group_end + gap, 0.0, 0.0),
                rate: CONN_RATE,
                radius: CONN_RADIUS / ratio.get(),
            });
        }

        scene.groups.push(SceneGroup {
            group_index: group.group_index,
            layout,
        });
        cursor = group_end + gap;
    }

    scene.total_width = if scene.groups.is_empty() {
        0.0
    } else {
        cursor - gap
    };
    scene
}
