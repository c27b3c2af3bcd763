//! 3D viewport - software-projected scene rendering and input handling.
//!
//! Projects the laid-out scene through the camera rig's view-projection
//! matrix and paints boxes, marker columns, connector arrows and labels
//! with the egui painter. Pointer input turns into dispatched actions:
//! drags pan the camera (and suppress picking), the wheel drives the zoom
//! level, clicks select the layer under the pointer.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke};
use glam::{Mat4, Vec3, Vec4};

use crate::camera::CameraRig;
use crate::core::{Action, AppState, ZOOM_MAX, ZOOM_MIN};
use crate::layout::{circle_layout, LayerGeometry, LayerPlacement, Scene};

use super::pick::{pick_layer, PickRegion};

/// Zoom-level change per scroll unit.
const WHEEL_ZOOM_STEP: f32 = 0.05;

const EDGE_COLOR: Color32 = Color32::BLACK;
const HOVER_COLOR: Color32 = Color32::from_rgb(60, 90, 220);
const SELECT_COLOR: Color32 = Color32::from_rgb(220, 120, 30);
const ARROW_COLOR: Color32 = Color32::from_rgb(230, 230, 0);
const FILL_ALPHA: u8 = 110;

/// World -> screen projection for one frame.
pub struct Projector {
    vp: Mat4,
    rect: Rect,
}

impl Projector {
    pub fn new(rig: &CameraRig, rect: Rect) -> Self {
        let aspect = rect.width() / rect.height().max(1.0);
        Self {
            vp: rig.view_projection(aspect),
            rect,
        }
    }

    /// Project a world point. None when behind the camera. The returned
    /// depth grows with distance from the eye.
    pub fn project(&self, world: Vec3) -> Option<(Pos2, f32)> {
        let clip = self.vp * Vec4::new(world.x, world.y, world.z, 1.0);
        if clip.w <= 1e-6 {
            return None;
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let center = self.rect.center();
        Some((
            egui::pos2(
                center.x + ndc_x * self.rect.width() / 2.0,
                center.y - ndc_y * self.rect.height() / 2.0,
            ),
            clip.w,
        ))
    }
}

/// Render the scene and translate pointer input into actions.
pub fn show(
    ui: &mut egui::Ui,
    rect: Rect,
    state: &AppState,
    rig: &CameraRig,
    scene: &Scene,
    actions: &mut Vec<Action>,
) {
    let response = ui.allocate_rect(rect, Sense::click_and_drag());
    let painter = ui.painter().with_clip_rect(rect);
    let proj = Projector::new(rig, rect);

    // Camera drag: pan intent while dragged, zeroed on release. Drag
    // begin/end also gate picking via the selection reducer.
    if response.drag_started() {
        actions.push(Action::DragBegin);
    }
    if response.dragged() {
        let delta = response.drag_delta();
        actions.push(Action::CameraPan {
            x: delta.x,
            y: -delta.y,
        });
    }
    if response.drag_stopped() {
        actions.push(Action::CameraPan { x: 0.0, y: 0.0 });
        actions.push(Action::DragEnd);
    }

    // Wheel zoom moves the slider level so all zoom paths share one state
    if response.hovered() {
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll != 0.0 {
            let level =
                (state.camera.zoom_level + scroll * WHEEL_ZOOM_STEP).clamp(ZOOM_MIN, ZOOM_MAX);
            actions.push(Action::CameraZoom { level });
        }
    }

    // Pass 1: projected pick regions
    let mut regions: Vec<PickRegion> = Vec::new();
    for group in &scene.groups {
        for placement in &group.layout.placements {
            if let Some(region) = placement_region(&proj, group.group_index as i32, placement) {
                regions.push(region);
            }
        }
    }

    let hovered = response
        .hover_pos()
        .and_then(|pos| pick_layer(&regions, pos));

    // Pass 2: draw arrows below layers, then layers with their labels
    for arrow in &scene.arrows {
        draw_arrow(&painter, &proj, arrow);
    }
    for group in &scene.groups {
        let g = group.group_index as i32;
        for placement in &group.layout.placements {
            let is_hovered = hovered == Some((g, placement.layer_index as i32));
            let is_selected = state.selection.group_idx == g
                && state.selection.layer_idx == placement.layer_index as i32;
            draw_placement(&painter, &proj, placement, is_hovered, is_selected);
        }
    }

    // Click-to-select; swallowed while dragging by the reducer itself
    if response.clicked()
        && let Some(pos) = response.interact_pointer_pos()
        && let Some((group, layer)) = pick_layer(&regions, pos)
    {
        actions.push(Action::Select { group, layer });
    }
}

/// Projected bounding region of one placement, for picking.
fn placement_region(
    proj: &Projector,
    group_idx: i32,
    placement: &LayerPlacement,
) -> Option<PickRegion> {
    let (points, depth) = match &placement.geometry {
        LayerGeometry::Volume { size } => {
            let mut pts = Vec::with_capacity(8);
            let mut depth = f32::INFINITY;
            for corner in box_corners(placement.center, *size) {
                let (p, d) = proj.project(corner)?;
                depth = depth.min(d);
                pts.push(p);
            }
            (pts, depth)
        }
        LayerGeometry::Markers { count, radius } => {
            let column = circle_layout(placement.center, *count, *radius);
            let extent = match &column.placeholder {
                Some(ph) => ph.height / 2.0,
                None => (*count as f32).max(1.0) * *radius,
            };
            let half = Vec3::new(*radius, extent, 0.0);
            let (top, d0) = proj.project(placement.center + half)?;
            let (bottom, d1) = proj.project(placement.center - half)?;
            (vec![top, bottom], d0.min(d1))
        }
    };
    Some(PickRegion {
        group_idx,
        layer_idx: placement.layer_index as i32,
        rect: bounding_rect(&points)?,
        depth,
    })
}

fn bounding_rect(points: &[Pos2]) -> Option<Rect> {
    let first = points.first()?;
    let mut rect = Rect::from_min_max(*first, *first);
    for p in &points[1..] {
        rect.extend_with(*p);
    }
    Some(rect)
}

fn box_corners(center: Vec3, size: Vec3) -> [Vec3; 8] {
    let h = size / 2.0;
    let mut corners = [Vec3::ZERO; 8];
    let mut i = 0;
    for sx in [-1.0f32, 1.0] {
        for sy in [-1.0f32, 1.0] {
            for sz in [-1.0f32, 1.0] {
                corners[i] = center + Vec3::new(sx * h.x, sy * h.y, sz * h.z);
                i += 1;
            }
        }
    }
    corners
}

// Corner index pairs forming the 12 box edges (see box_corners ordering)
const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

fn draw_placement(
    painter: &egui::Painter,
    proj: &Projector,
    placement: &LayerPlacement,
    hovered: bool,
    selected: bool,
) {
    let edge = if selected {
        Stroke::new(2.0, SELECT_COLOR)
    } else if hovered {
        Stroke::new(1.5, HOVER_COLOR)
    } else {
        Stroke::new(1.0, EDGE_COLOR)
    };

    let [r, g, b] = placement.visual.color.rgb();
    let alpha = if placement.visual.translucent {
        FILL_ALPHA
    } else {
        255
    };
    let fill = Color32::from_rgba_unmultiplied(r, g, b, alpha);

    let mut label_anchor: Option<Pos2> = None;

    match &placement.geometry {
        LayerGeometry::Volume { size } => {
            let corners = box_corners(placement.center, *size);
            let projected: Option<Vec<(Pos2, f32)>> =
                corners.iter().map(|c| proj.project(*c)).collect();
            let Some(projected) = projected else { return };

            // Front face fill (camera looks down -z, face indices with sz=+1)
            let face = [projected[1].0, projected[3].0, projected[7].0, projected[5].0];
            painter.add(egui::Shape::convex_polygon(
                face.to_vec(),
                fill,
                Stroke::NONE,
            ));
            for (a, b) in BOX_EDGES {
                painter.line_segment([projected[a].0, projected[b].0], edge);
            }

            let below = placement.center
                - Vec3::new(0.0, size.y / 2.0 + placement.label_drop, 0.0);
            label_anchor = proj.project(below).map(|(p, _)| p);
        }
        LayerGeometry::Markers { count, radius } => {
            let column = circle_layout(placement.center, *count, *radius);
            let screen_r = projected_radius(proj, placement.center, *radius).unwrap_or(2.0);
            for marker in &column.markers {
                if let Some((p, _)) = proj.project(*marker) {
                    painter.circle(p, screen_r.max(1.0), fill, edge);
                }
            }
            if let Some(ph) = &column.placeholder {
                // Enclosing volume signals "count markers collapsed here"
                let size = Vec3::new(*radius * 2.0, ph.height, *radius * 2.0);
                let corners = box_corners(ph.center, size);
                let projected: Option<Vec<(Pos2, f32)>> =
                    corners.iter().map(|c| proj.project(*c)).collect();
                if let Some(projected) = projected {
                    for (a, b) in BOX_EDGES {
                        painter.line_segment([projected[a].0, projected[b].0], edge);
                    }
                }
                if let Some((p, _)) = proj.project(ph.center) {
                    painter.text(
                        p,
                        Align2::CENTER_CENTER,
                        format!("x{}", ph.count),
                        FontId::proportional(10.0),
                        EDGE_COLOR,
                    );
                }
            }

            let extent = match &column.placeholder {
                Some(ph) => ph.height / 2.0,
                None => (*count as f32).max(1.0) * *radius,
            };
            let below =
                placement.center - Vec3::new(0.0, extent + placement.label_drop, 0.0);
            label_anchor = proj.project(below).map(|(p, _)| p);
        }
    }

    if let Some(anchor) = label_anchor {
        painter.text(
            anchor,
            Align2::CENTER_TOP,
            &placement.name,
            FontId::proportional(11.0),
            EDGE_COLOR,
        );
        painter.text(
            anchor + egui::vec2(0.0, 13.0),
            Align2::CENTER_TOP,
            &placement.shape_text,
            FontId::proportional(10.0),
            Color32::DARK_GRAY,
        );
    }
}

fn projected_radius(proj: &Projector, center: Vec3, r: f32) -> Option<f32> {
    let (a, _) = proj.project(center)?;
    let (b, _) = proj.project(center + Vec3::new(0.0, r, 0.0))?;
    Some((a - b).length())
}

fn draw_arrow(painter: &egui::Painter, proj: &Projector, arrow: &crate::layout::Arrow) {
    let split = arrow.from + (arrow.to - arrow.from) * arrow.rate;
    let Some((from, _)) = proj.project(arrow.from) else { return };
    let Some((split_p, _)) = proj.project(split) else { return };
    let Some((to, _)) = proj.project(arrow.to) else { return };

    let shaft_w = projected_radius(proj, arrow.from, arrow.radius)
        .unwrap_or(1.0)
        .max(1.0);
    painter.line_segment([from, split_p], Stroke::new(shaft_w, ARROW_COLOR));

    // Head: triangle from the split point to the tip
    let dir = to - split_p;
    let normal = egui::vec2(-dir.y, dir.x) * 0.5;
    painter.add(egui::Shape::convex_polygon(
        vec![split_p + normal, split_p - normal, to],
        ARROW_COLOR,
        Stroke::NONE,
    ));
}
