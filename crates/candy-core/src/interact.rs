//! Pointer gesture state that is independent of the DOM.

use crate::constants::{
    DETAIL_DRAG_SPEED, ROTATE_HINT_MAX_WIDTH, TILT_EASE, TILT_MAX_DEG, WHEEL_ZOOM_MAX_Z,
    WHEEL_ZOOM_MIN_Z, WHEEL_ZOOM_STEP,
};
use glam::Vec2;

/// What a click on the carousel canvas means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselClick {
    /// The front entity was clicked.
    OpenDetail(usize),
    /// Another entity was clicked; bring it to the front.
    BringToFront(usize),
    /// Empty space; rotate by one step.
    Step(i32),
}

/// `hit` is the ordinal of the entity under the pointer, if any; `x` is the
/// pointer offset inside a canvas `width` pixels wide.
pub fn route_carousel_click(hit: Option<usize>, front: usize, x: f32, width: f32) -> CarouselClick {
    match hit {
        Some(i) if i == front => CarouselClick::OpenDetail(i),
        Some(i) => CarouselClick::BringToFront(i),
        None if x < width / 2.0 => CarouselClick::Step(1),
        None => CarouselClick::Step(-1),
    }
}

/// Drag-to-rotate. Mouse and touch share one implementation.
#[derive(Clone, Copy, Debug)]
pub struct DragRotate {
    speed: f32,
    last: Option<Vec2>,
}

impl Default for DragRotate {
    fn default() -> Self {
        Self::new(DETAIL_DRAG_SPEED)
    }
}

impl DragRotate {
    pub fn new(speed: f32) -> Self {
        Self { speed, last: None }
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    pub fn press(&mut self, x: f32, y: f32) {
        self.last = Some(Vec2::new(x, y));
    }

    pub fn release(&mut self) {
        self.last = None;
    }

    /// Returns the (pitch, yaw) increment in radians for this move, if dragging.
    pub fn drag(&mut self, x: f32, y: f32) -> Option<Vec2> {
        let last = self.last?;
        let p = Vec2::new(x, y);
        self.last = Some(p);
        let d = p - last;
        Some(Vec2::new(d.y * self.speed, d.x * self.speed))
    }
}

/// Wheel dolly along the camera's z axis.
#[derive(Clone, Copy, Debug)]
pub struct WheelZoom {
    pub step: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Default for WheelZoom {
    fn default() -> Self {
        Self {
            step: WHEEL_ZOOM_STEP,
            min_z: WHEEL_ZOOM_MIN_Z,
            max_z: WHEEL_ZOOM_MAX_Z,
        }
    }
}

impl WheelZoom {
    pub fn apply(&self, z: f32, delta_y: f64) -> f32 {
        let dir = if delta_y > 0.0 {
            1.0
        } else if delta_y < 0.0 {
            -1.0
        } else {
            0.0
        };
        (z + dir * self.step).clamp(self.min_z, self.max_z)
    }
}

/// Eased 3D tilt of the info card, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CardTilt {
    target: Vec2,
    current: Vec2,
}

impl CardTilt {
    /// `u`, `v` are the pointer's position inside the card in 0..1.
    pub fn point(&mut self, u: f32, v: f32) {
        let x = u - 0.5;
        let y = v - 0.5;
        self.target = Vec2::new(-y * TILT_MAX_DEG * 2.0, x * TILT_MAX_DEG * 2.0);
    }

    pub fn leave(&mut self) {
        self.target = Vec2::ZERO;
    }

    /// Advance one frame; returns (rotate-x, rotate-y) in degrees.
    pub fn step(&mut self) -> Vec2 {
        self.current += (self.target - self.current) * TILT_EASE;
        self.current
    }

    pub fn is_settled(&self) -> bool {
        (self.current - self.target).abs().max_element() <= 0.1
    }
}

/// Narrow portrait viewports get a "please rotate" overlay.
#[inline]
pub fn rotate_hint_visible(width: f64, height: f64) -> bool {
    width < ROTATE_HINT_MAX_WIDTH && height > width
}
