//! Camera rig - continuous pan/zoom/reset controller sampled once per frame.
//!
//! Pan integrates joystick/drag velocity along the camera's local right/up
//! basis, not world axes, so panning feels the same at any orbit angle.
//! Zoom is multiplicative so a step feels proportionally identical at every
//! zoom level. Reset is edge-triggered: the rig restores its home pose and
//! the caller clears the request flag the same frame.

use glam::{Mat4, Vec3};

use crate::core::{CameraState, ZOOM_BASE};

/// World units of pan per intent unit per frame.
pub const PAN_SPEED: f32 = 1.0 / 100.0;

/// Multiplicative zoom speed per slider-level unit.
pub const CAMERA_SPEED: f32 = 0.01;

/// Vertical field of view in degrees at zoom 1.0.
pub const FOV_DEG: f32 = 39.6;

const ZOOM_CLAMP: (f32, f32) = (0.05, 20.0);

#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub zoom: f32,
    home_eye: Vec3,
    home_target: Vec3,
    /// Last slider level already folded into `zoom`
    applied_level: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO)
    }
}

impl CameraRig {
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        Self {
            eye,
            target,
            up: Vec3::Y,
            zoom: 1.0,
            home_eye: eye,
            home_target: target,
            applied_level: ZOOM_BASE,
        }
    }

    /// Frame the given scene center at a distance proportional to extent.
    pub fn framing(center: Vec3, extent: f32) -> Self {
        let distance = (extent * 1.2).max(20.0);
        Self::new(center + Vec3::new(0.0, 0.0, distance), center)
    }

    /// Integrate a pan intent along the camera's local basis. Both eye and
    /// look-at target move, keeping the view direction unchanged.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        let eye_vec = self.eye - self.target;
        let side = eye_vec.cross(self.up).normalize_or_zero();
        let lift = self.up.normalize_or_zero();
        let pan = side * (-dx * PAN_SPEED) + lift * (dy * PAN_SPEED);
        self.eye += pan;
        self.target += pan;
    }

    /// Multiplicative zoom step.
    pub fn zoom_by(&mut self, delta: f32) {
        if delta == 0.0 {
            return;
        }
        self.zoom = (self.zoom * (1.0 + CAMERA_SPEED * delta)).clamp(ZOOM_CLAMP.0, ZOOM_CLAMP.1);
    }

    /// Fold in an absolute slider level: applies the multiplicative step
    /// for the delta since the last applied level.
    pub fn apply_zoom_level(&mut self, level: f32) {
        let delta = level - self.applied_level;
        if delta != 0.0 {
            self.zoom_by(delta);
            self.applied_level = level;
        }
    }

    /// Restore the initial pose.
    pub fn reset(&mut self) {
        self.eye = self.home_eye;
        self.target = self.home_target;
        self.up = Vec3::Y;
        self.zoom = 1.0;
        self.applied_level = ZOOM_BASE;
    }

    /// Consume the per-frame camera intents. Returns true when a reset was
    /// applied so the caller can clear the edge-triggered request.
    pub fn apply(&mut self, cam: &CameraState) -> bool {
        if cam.reset_requested {
            self.reset();
            return true;
        }
        if cam.pan_x != 0.0 || cam.pan_y != 0.0 {
            self.pan(cam.pan_x, cam.pan_y);
        }
        self.apply_zoom_level(cam.zoom_level);
        false
    }

    /// World -> camera space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Camera -> clip space. Zoom narrows the field of view.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        let fov_rad = (FOV_DEG.to_radians() / self.zoom).clamp(0.01, std::f32::consts::PI - 0.01);
        Mat4::perspective_rh_gl(fov_rad, aspect.max(1e-3), 0.1, 10_000.0)
    }

    /// World -> clip space.
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pan_moves_eye_and_target_equally() {
        let mut rig = CameraRig::default();
        let before = rig.eye - rig.target;
        rig.pan(30.0, -10.0);
        let after = rig.eye - rig.target;
        assert!((before - after).length() < 1e-5);
        assert!(rig.eye != CameraRig::default().eye);
    }

    #[test]
    fn test_pan_is_orbit_angle_independent() {
        // Same intent from a rotated pose still moves along the local basis
        let mut rig = CameraRig::new(Vec3::new(20.0, 0.0, 0.0), Vec3::ZERO);
        let dir_before = (rig.eye - rig.target).normalize();
        rig.pan(10.0, 0.0);
        let dir_after = (rig.eye - rig.target).normalize();
        assert!((dir_before - dir_after).length() < 1e-5);
        // Horizontal intent must not move the camera vertically
        assert!(rig.eye.y.abs() < 1e-5);
    }

    #[test]
    fn test_zoom_is_multiplicative() {
        let mut rig = CameraRig::default();
        rig.zoom_by(10.0);
        let once = rig.zoom;
        rig.zoom_by(10.0);
        // Second identical step scales by the same factor
        assert!((rig.zoom / once - once / 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_zoom_level_applies_delta_once() {
        let mut rig = CameraRig::default();
        rig.apply_zoom_level(60.0);
        let z = rig.zoom;
        // Re-applying the same level is a no-op
        rig.apply_zoom_level(60.0);
        assert_eq!(rig.zoom, z);
        rig.apply_zoom_level(50.0);
        assert!(rig.zoom < z);
    }

    #[test]
    fn test_reset_restores_home_pose() {
        let mut rig = CameraRig::default();
        let home = rig.clone();
        rig.pan(100.0, 50.0);
        rig.zoom_by(30.0);
        rig.reset();
        assert_eq!(rig, home);
    }

    #[test]
    fn test_apply_consumes_reset_edge() {
        let mut rig = CameraRig::default();
        let mut cam = CameraState::default();
        cam.request_reset();
        assert!(rig.apply(&cam));
        cam.clear_reset();
        assert!(!rig.apply(&cam));
    }

    #[test]
    fn test_matrices_are_finite() {
        let rig = CameraRig::framing(Vec3::new(50.0, 0.0, 0.0), 100.0);
        let vp = rig.view_projection(16.0 / 9.0);
        assert!(!vp.is_nan());
    }
}
