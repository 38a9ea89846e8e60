use glam::Vec3;

// Shared visual tuning constants. Layout tables are hand-authored designer
// data and are kept as literals.

/// A layout slot: target position and uniform scale, indexed by distance from front.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slot {
    pub position: [f32; 3],
    pub scale: f32,
}

impl Slot {
    pub const fn new(x: f32, y: f32, z: f32, scale: f32) -> Self {
        Self {
            position: [x, y, z],
            scale,
        }
    }

    #[inline]
    pub fn position_vec3(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

// Carousel (shop page)
pub const SHIFT_DURATION_SEC: f64 = 0.5;
pub const CAROUSEL_EASE: f32 = 0.12; // fraction of remaining distance per frame
pub const FRONT_SPIN_PER_FRAME: f32 = 0.018;
pub const IDLE_ROTATION_DECAY: f32 = 0.92;
pub const IDLE_BOB_FREQ: f32 = 1.4;
pub const IDLE_BOB_AMPLITUDE: f32 = 0.03;
pub const SAD_SCALE_FACTOR: f32 = 0.9;

/// Placement applied once at startup, before the per-frame easing takes over.
pub const INITIAL_SLOTS: [Slot; 6] = [
    Slot::new(0.0, -1.0, 0.3, 1.5), // front
    Slot::new(9.2, 0.8, -0.4, 0.7),
    Slot::new(6.5, 3.2, -1.0, 0.4),
    Slot::new(0.0, 3.8, -1.2, 0.375),
    Slot::new(-6.5, 3.2, -1.0, 0.4),
    Slot::new(-9.2, 0.8, -0.4, 0.7),
];

/// Per-frame easing targets.
pub const HAND_DRAWN_SLOTS: [Slot; 6] = [
    Slot::new(0.5, -1.2, 4.6, 1.7),  // front, slightly low and forward
    Slot::new(-9.0, -0.5, 2.2, 0.8), // left front
    Slot::new(-9.2, 4.0, -0.8, 0.45),
    Slot::new(-3.0, 5.0, -2.0, 0.25), // top, smallest
    Slot::new(7.0, 4.0, -0.8, 0.45),
    Slot::new(9.5, 0.5, 2.2, 0.9), // right front
];

// Candy entity staging
pub const CANDY_ROOT_SCALE: f32 = 1.5;
pub const CANDY_RENDER_ORDER: i32 = 10;
pub const WRAPPER_BACK_RENDER_ORDER: i32 = 20;
pub const WRAPPER_FRONT_RENDER_ORDER: i32 = 21;
pub const RIBBON_RENDER_ORDER: i32 = 30;
pub const WRAPPER_BACK_OPACITY: f32 = 0.12;
pub const WRAPPER_FRONT_OPACITY: f32 = 0.48;
pub const WRAPPER_DIAGONAL_RATIO: f32 = 1.8;
pub const DECO_LOCAL_POSITION: Vec3 = Vec3::new(0.0, -0.08, -0.15);
pub const DECO_LOCAL_EULER: Vec3 = Vec3::new(0.0, 0.25, 0.1);
pub const SHOP_INITIAL_ROT_X_DEG: f32 = 170.0;

// Shop camera
pub const SHOP_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 1.5, 17.0);
pub const CAMERA_FOV_DEG: f32 = 45.0;

// Ribbon trail
pub const MAX_TRAIL_POINTS: usize = 22;
pub const TRAIL_FOLLOW: f32 = 0.25;
pub const TRAIL_LIFE_DECAY: f32 = 0.018;
pub const TRAIL_LIFE_EPSILON: f32 = 0.02;
pub const RIBBON_DEPTH: f32 = 14.0; // distance in front of the camera
pub const RIBBON_BASE_WIDTH: f32 = 0.65;
pub const RIBBON_OPACITY: f32 = 0.96;

// Emotion detail page framing
pub const DETAIL_WIDTH_FILL: f32 = 1.58;
pub const DETAIL_X_OFFSET_N: f32 = -0.34;
pub const DETAIL_Y_OFFSET_N: f32 = 0.0;
pub const DETAIL_TIME_STEP: f32 = 0.01;
pub const DETAIL_DRAG_SPEED: f32 = 0.01; // radians per pixel
pub const WHEEL_ZOOM_STEP: f32 = 0.5;
pub const WHEEL_ZOOM_MIN_Z: f32 = 3.0;
pub const WHEEL_ZOOM_MAX_Z: f32 = 25.0;

// Info card tilt
pub const TILT_MAX_DEG: f32 = 6.0;
pub const TILT_EASE: f32 = 0.12;

// Hint modal
pub const HINT_DELAY_SEC: f64 = 0.6;

// Rotate-orientation hint
pub const ROTATE_HINT_MAX_WIDTH: f64 = 900.0;
