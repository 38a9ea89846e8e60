//! Carousel rotation state and per-frame layout easing.
//!
//! A single continuous `rotation_index` drives which entity sits in which
//! layout slot. Transitions are time-based (sampled once per frame) and only
//! one may be in flight at a time.

use crate::constants::{
    Slot, CAROUSEL_EASE, FRONT_SPIN_PER_FRAME, IDLE_BOB_AMPLITUDE, IDLE_BOB_FREQ,
    IDLE_ROTATION_DECAY, SHIFT_DURATION_SEC,
};
use crate::ease::{approach, approach_vec3, smoothstep};
use crate::scene::Transform;
use glam::{EulerRot, Quat, Vec3};

#[derive(Clone, Copy, Debug)]
struct Transition {
    start: f64,
    end: f64,
    t0: f64,
}

#[derive(Clone, Debug)]
pub struct Carousel {
    count: usize,
    rotation_index: f64,
    duration_sec: f64,
    transition: Option<Transition>,
}

impl Carousel {
    pub fn new(count: usize) -> Self {
        assert!(count > 0, "carousel needs at least one entity");
        Self {
            count,
            rotation_index: 0.0,
            duration_sec: SHIFT_DURATION_SEC,
            transition: None,
        }
    }

    pub fn with_duration(mut self, duration_sec: f64) -> Self {
        self.duration_sec = duration_sec.max(0.0);
        self
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn rotation_index(&self) -> f64 {
        self.rotation_index
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Start easing `rotation_index` by `step`. Ignored while a transition is
    /// in flight or when `step` is zero. Returns whether a transition started.
    pub fn shift(&mut self, step: i32, now_sec: f64) -> bool {
        if self.transition.is_some() || step == 0 {
            return false;
        }
        let start = self.rotation_index;
        self.transition = Some(Transition {
            start,
            end: start + step as f64,
            t0: now_sec,
        });
        true
    }

    /// Bring `target` to the front along the shortest rotational path.
    /// Returns the delta that was issued, or `None` when nothing started.
    pub fn shift_to(&mut self, target: usize, now_sec: f64) -> Option<i32> {
        if self.transition.is_some() {
            return None;
        }
        let delta = shortest_delta(self.front_index(), target, self.count);
        self.shift(delta, now_sec).then_some(delta)
    }

    /// Sample the in-flight transition. On completion the index snaps to the
    /// integral result modulo the entity count and the guard clears.
    pub fn advance(&mut self, now_sec: f64) {
        let Some(tr) = self.transition else {
            return;
        };
        let p = if self.duration_sec <= 0.0 {
            1.0
        } else {
            ((now_sec - tr.t0) / self.duration_sec).clamp(0.0, 1.0)
        };
        if p < 1.0 {
            self.rotation_index = tr.start + (tr.end - tr.start) * smoothstep(p);
        } else {
            self.rotation_index = tr.end.rem_euclid(self.count as f64);
            self.transition = None;
        }
    }

    /// Ordinal of the entity currently resolving to slot 0.
    #[inline]
    pub fn front_index(&self) -> usize {
        (self.rotation_index.round() as i64).rem_euclid(self.count as i64) as usize
    }

    /// Slot (distance from front) occupied by entity `i`.
    #[inline]
    pub fn slot_of(&self, i: usize) -> usize {
        let r = self.rotation_index.round() as i64;
        (i as i64 - r).rem_euclid(self.count as i64) as usize
    }
}

/// Signed shortest delta from `current` to `target` in (-n/2, n/2].
pub fn shortest_delta(current: usize, target: usize, n: usize) -> i32 {
    let n = n as i64;
    let mut diff = (target as i64 - current as i64).rem_euclid(n);
    if diff * 2 > n {
        diff -= n;
    }
    diff as i32
}

/// Continuous pose of one carousel entity, eased every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandyPose {
    pub position: Vec3,
    pub scale: f32,
    pub spin_y: f32,
    pub tilt_x: f32,
}

impl CandyPose {
    pub fn at_slot(slot: &Slot, tilt_x: f32) -> Self {
        Self {
            position: slot.position_vec3(),
            scale: slot.scale,
            spin_y: 0.0,
            tilt_x,
        }
    }

    pub fn to_transform(&self) -> Transform {
        Transform {
            translation: self.position,
            rotation: Quat::from_euler(EulerRot::XYZ, self.tilt_x, self.spin_y, 0.0),
            scale: Vec3::splat(self.scale),
        }
    }
}

/// Ease every entity toward its slot target. `scale_bias` lets individual
/// entities adjust their target scale (1.0 for none).
pub fn ease_layout(
    carousel: &Carousel,
    slots: &[Slot],
    poses: &mut [CandyPose],
    scale_bias: impl Fn(usize) -> f32,
    elapsed_sec: f32,
) {
    debug_assert_eq!(slots.len(), carousel.count());
    for (i, pose) in poses.iter_mut().enumerate().take(carousel.count()) {
        let rel = carousel.slot_of(i);
        let slot = &slots[rel];
        pose.position = approach_vec3(pose.position, slot.position_vec3(), CAROUSEL_EASE);
        pose.scale = approach(pose.scale, slot.scale * scale_bias(i), CAROUSEL_EASE);
        if rel == 0 {
            pose.spin_y += FRONT_SPIN_PER_FRAME;
        } else {
            pose.spin_y *= IDLE_ROTATION_DECAY;
            pose.position.y += (elapsed_sec * IDLE_BOB_FREQ + i as f32).sin() * IDLE_BOB_AMPLITUDE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortest_delta_prefers_backwards_when_closer() {
        assert_eq!(shortest_delta(0, 4, 6), -2);
        assert_eq!(shortest_delta(0, 2, 6), 2);
        assert_eq!(shortest_delta(5, 0, 6), 1);
        assert_eq!(shortest_delta(3, 0, 6), 3);
        assert_eq!(shortest_delta(2, 2, 6), 0);
    }

    #[test]
    fn zero_step_does_not_lock() {
        let mut c = Carousel::new(6);
        assert!(!c.shift(0, 0.0));
        assert!(!c.is_animating());
    }
}
