//! Fit a subject into the viewport without distorting its scale.
//!
//! The camera distance fits the subject's bounding sphere on both axes and is
//! then divided by a fill fraction. A normalized on-screen offset is realised
//! by moving the subject the opposite way rather than moving the camera.

use crate::camera::{horizontal_fov, Camera};
use crate::constants::{DETAIL_WIDTH_FILL, DETAIL_X_OFFSET_N, DETAIL_Y_OFFSET_N};
use crate::mesh::Aabb;
use crate::scene::{NodeId, Scene};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramingConfig {
    pub width_fill: f32,
    pub x_offset_n: f32,
    pub y_offset_n: f32,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            width_fill: 0.5,
            x_offset_n: -0.28,
            y_offset_n: 0.0,
        }
    }
}

impl FramingConfig {
    /// Preset used by the emotion detail page.
    pub const DETAIL: FramingConfig = FramingConfig {
        width_fill: DETAIL_WIDTH_FILL,
        x_offset_n: DETAIL_X_OFFSET_N,
        y_offset_n: DETAIL_Y_OFFSET_N,
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Framing {
    pub camera_position: Vec3,
    pub target: Vec3,
    pub distance: f32,
    pub near: f32,
    pub far: f32,
    /// Translation for the subject root.
    pub subject_offset: Vec3,
}

/// Compute a framing for `bounds` (in the subject's un-offset space). Returns
/// `None` for empty or non-finite boxes so callers can retry later.
pub fn frame_to_viewport(bounds: &Aabb, fov_y_rad: f32, aspect: f32, cfg: &FramingConfig) -> Option<Framing> {
    if !bounds.is_valid() || !(aspect > 0.0) || !(cfg.width_fill > 0.0) {
        return None;
    }
    let (center, radius) = bounds.bounding_sphere();
    let h_fov = horizontal_fov(fov_y_rad, aspect);

    let fit_x = radius / (h_fov / 2.0).sin();
    let fit_y = radius / (fov_y_rad / 2.0).sin();
    let distance = fit_x.max(fit_y) / cfg.width_fill;
    if !distance.is_finite() {
        return None;
    }

    let half_w = (h_fov / 2.0).tan() * distance;
    let half_h = (fov_y_rad / 2.0).tan() * distance;
    let dx = cfg.x_offset_n * half_w * 2.0;
    let dy = cfg.y_offset_n * half_h * 2.0;

    Some(Framing {
        camera_position: center + Vec3::Z * distance,
        target: center,
        distance,
        near: (distance * 0.01).max(0.01),
        far: distance * 50.0 + radius * 10.0,
        subject_offset: Vec3::new(-dx, -dy, 0.0),
    })
}

/// Frame the subtree under `subject` and apply the result to the camera and
/// the subject's translation. The subject's own current translation is
/// removed from the box first, so repeated calls converge on the same result.
pub fn frame_subject(scene: &mut Scene, subject: NodeId, camera: &mut Camera, cfg: &FramingConfig) -> Option<Framing> {
    let current = scene.node(subject).transform.translation;
    let b = scene.bounds(subject);
    if !b.is_valid() {
        return None;
    }
    let neutral = Aabb {
        min: b.min - current,
        max: b.max - current,
    };
    let f = frame_to_viewport(&neutral, camera.fov_y_rad(), camera.aspect, cfg)?;
    camera.position = f.camera_position;
    camera.target = f.target;
    camera.near = f.near;
    camera.far = f.far;
    scene.node_mut(subject).transform.translation = f.subject_offset;
    log::debug!("[frame] distance {:.2}", f.distance);
    Some(f)
}
