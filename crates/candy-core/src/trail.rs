//! Decaying pointer trail and the ribbon strip built from it.

use crate::camera::{pixel_to_ndc, Camera};
use crate::constants::{
    MAX_TRAIL_POINTS, RIBBON_BASE_WIDTH, RIBBON_DEPTH, TRAIL_FOLLOW, TRAIL_LIFE_DECAY,
    TRAIL_LIFE_EPSILON,
};
use crate::mesh::StripMesh;
use glam::Vec3;
use std::collections::VecDeque;
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub x: f32,
    pub y: f32,
    pub life: f32,
}

impl TrailPoint {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > TRAIL_LIFE_EPSILON
    }
}

/// Screen-space samples, newest first, bounded by `capacity`.
#[derive(Clone, Debug)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
    capacity: usize,
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(MAX_TRAIL_POINTS)
    }
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn points(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    /// Record a fresh sample at the head, evicting the oldest past capacity.
    pub fn push(&mut self, x: f32, y: f32) {
        self.points.push_front(TrailPoint { x, y, life: 1.0 });
        while self.points.len() > self.capacity {
            self.points.pop_back();
        }
    }

    /// One frame of follow-and-decay. Every point after the head eases toward
    /// its predecessor by a fraction growing with its position and loses life.
    /// Dead points are dropped.
    pub fn step(&mut self) {
        let cap = self.capacity as f32;
        for i in 1..self.points.len() {
            let prev = self.points[i - 1];
            let follow = TRAIL_FOLLOW * (i as f32 / cap);
            let p = &mut self.points[i];
            p.x += (prev.x - p.x) * follow;
            p.y += (prev.y - p.y) * follow;
            p.life -= TRAIL_LIFE_DECAY;
        }
        self.points.retain(|p| p.is_alive());
    }

    pub fn alive(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter().filter(|p| p.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }
}

/// Strip through `points` with a `sin(pi*t)` width profile: two vertices per
/// point, zero width at both ends. Fewer than two points yield an empty strip.
pub fn build_ribbon(points: &[Vec3], eye: Vec3, base_width: f32) -> StripMesh {
    let n = points.len();
    if n < 2 {
        return StripMesh::default();
    }
    let mut strip = StripMesh {
        positions: Vec::with_capacity(n * 2),
        uvs: Vec::with_capacity(n * 2),
        indices: Vec::with_capacity((n - 1) * 6),
    };
    for i in 0..n {
        let p = points[i];
        let prev = points[i.saturating_sub(1)];
        let next = points[(i + 1).min(n - 1)];
        let tangent = (next - prev).normalize_or_zero();
        let to_eye = (eye - p).normalize_or_zero();
        let side = tangent.cross(to_eye).normalize_or_zero();

        let t = i as f32 / (n - 1) as f32;
        let width = base_width * (PI * t).sin();
        // sin(pi) is not exactly zero in f32
        let width = if i == 0 || i == n - 1 { 0.0 } else { width };

        strip.positions.push((p + side * width).to_array());
        strip.positions.push((p - side * width).to_array());
        strip.uvs.push([0.0, t]);
        strip.uvs.push([1.0, t]);
    }
    for i in 0..(n as u32 - 1) {
        let a = i * 2;
        let (b, c, d) = (a + 1, a + 2, a + 3);
        strip.indices.extend_from_slice(&[a, b, c, c, b, d]);
    }
    strip
}

/// Unproject the alive samples onto the fixed-depth plane in front of the
/// camera and build the ribbon.
pub fn ribbon_for(trail: &Trail, camera: &Camera, width: f32, height: f32) -> StripMesh {
    let world: Vec<Vec3> = trail
        .alive()
        .map(|p| camera.point_at_distance(pixel_to_ndc(p.x, p.y, width, height), RIBBON_DEPTH))
        .collect();
    build_ribbon(&world, camera.position, RIBBON_BASE_WIDTH)
}
