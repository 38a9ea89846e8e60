//! Interpolation helpers shared by the carousel, camera tweens and uniforms.

use glam::Vec3;

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite smoothstep over an already-normalized `p` in 0..=1.
#[inline]
pub fn smoothstep(p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);
    p * p * (3.0 - 2.0 * p)
}

/// Cubic in-out curve, the camera tween shape.
#[inline]
pub fn power3_in_out(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    if p < 0.5 {
        4.0 * p * p * p
    } else {
        let q = -2.0 * p + 2.0;
        1.0 - q * q * q / 2.0
    }
}

/// Move `current` a fixed fraction of the remaining distance toward `target`.
#[inline]
pub fn approach(current: f32, target: f32, rate: f32) -> f32 {
    current + (target - current) * rate
}

#[inline]
pub fn approach_vec3(current: Vec3, target: Vec3, rate: f32) -> Vec3 {
    current + (target - current) * rate
}

/// A time-based tween between two points; sampled once per frame.
#[derive(Clone, Copy, Debug)]
pub struct Vec3Tween {
    pub from: Vec3,
    pub to: Vec3,
    pub start_sec: f64,
    pub duration_sec: f64,
}

impl Vec3Tween {
    pub fn new(from: Vec3, to: Vec3, start_sec: f64, duration_sec: f64) -> Self {
        Self {
            from,
            to,
            start_sec,
            duration_sec,
        }
    }

    /// Returns the eased value and whether the tween has finished.
    pub fn sample(&self, now_sec: f64) -> (Vec3, bool) {
        if self.duration_sec <= 0.0 {
            return (self.to, true);
        }
        let p = ((now_sec - self.start_sec) / self.duration_sec).clamp(0.0, 1.0) as f32;
        let k = power3_in_out(p);
        (self.from.lerp(self.to, k), p >= 1.0)
    }
}
