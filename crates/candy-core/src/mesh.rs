//! CPU-side geometry and bounding volumes.

use glam::{Mat4, Vec3};

/// Axis-aligned bounding box. Starts empty (inverted infinities).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut b = Self::EMPTY;
        for p in points {
            b.expand(p);
        }
        b
    }

    #[inline]
    pub fn expand(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    /// Non-empty and every component finite.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.is_empty() && self.min.is_finite() && self.max.is_finite()
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    /// Bounding sphere enclosing the box: (center, radius).
    pub fn bounding_sphere(&self) -> (Vec3, f32) {
        if self.is_empty() {
            return (Vec3::ZERO, -1.0);
        }
        (self.center(), self.size().length() * 0.5)
    }

    /// Box of the eight transformed corners.
    pub fn transformed(&self, m: &Mat4) -> Aabb {
        if self.is_empty() {
            return *self;
        }
        let mut out = Aabb::EMPTY;
        for i in 0..8 {
            let c = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            out.expand(m.transform_point3(c));
        }
        out
    }

    /// Slab test. Returns the entry distance along the ray, clamped at 0 when
    /// the origin is inside.
    pub fn ray_hit(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        if self.is_empty() {
            return None;
        }
        let inv = dir.recip();
        let t1 = (self.min - origin) * inv;
        let t2 = (self.max - origin) * inv;
        let tmin = t1.min(t2).max_element();
        let tmax = t1.max(t2).min_element();
        if tmax < 0.0 || tmin > tmax || tmin.is_nan() || tmax.is_nan() {
            return None;
        }
        Some(tmin.max(0.0))
    }
}

#[derive(Clone, Debug, Default)]
pub struct CpuMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub bounds: Aabb,
}

impl CpuMesh {
    pub fn new(positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        let bounds = Aabb::from_points(positions.iter().map(|p| Vec3::from_array(*p)));
        let n = positions.len();
        let mut mesh = Self {
            positions,
            normals: Vec::new(),
            uvs: vec![[0.0, 0.0]; n],
            indices,
            bounds,
        };
        mesh.compute_vertex_normals();
        mesh
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Area-weighted smooth normals from the index buffer.
    pub fn compute_vertex_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            if a >= acc.len() || b >= acc.len() || c >= acc.len() {
                continue;
            }
            let pa = Vec3::from_array(self.positions[a]);
            let pb = Vec3::from_array(self.positions[b]);
            let pc = Vec3::from_array(self.positions[c]);
            let n = (pb - pa).cross(pc - pa);
            acc[a] += n;
            acc[b] += n;
            acc[c] += n;
        }
        self.normals = acc
            .into_iter()
            .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
            .collect();
    }

    /// Nearest triangle hit in mesh-local space (two-sided).
    pub fn ray_hit(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        self.bounds.ray_hit(origin, dir)?;
        let mut best: Option<f32> = None;
        for tri in self.indices.chunks_exact(3) {
            let fetch = |i: u32| self.positions.get(i as usize).map(|p| Vec3::from_array(*p));
            let (Some(a), Some(b), Some(c)) = (fetch(tri[0]), fetch(tri[1]), fetch(tri[2])) else {
                continue;
            };
            if let Some(t) = ray_triangle(origin, dir, a, b, c) {
                if best.map_or(true, |bt| t < bt) {
                    best = Some(t);
                }
            }
        }
        best
    }
}

/// Möller–Trumbore, two-sided. Returns distance along `dir`.
pub fn ray_triangle(origin: Vec3, dir: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    const EPS: f32 = 1e-7;
    let e1 = b - a;
    let e2 = c - a;
    let p = dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPS {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t > EPS).then_some(t)
}

/// Dynamic triangle strip used by the cursor ribbon.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StripMesh {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl StripMesh {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> CpuMesh {
        CpuMesh::new(
            vec![
                [-1.0, -1.0, 0.0],
                [1.0, -1.0, 0.0],
                [1.0, 1.0, 0.0],
                [-1.0, 1.0, 0.0],
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    #[test]
    fn empty_box_is_invalid() {
        assert!(Aabb::EMPTY.is_empty());
        assert!(!Aabb::EMPTY.is_valid());
        assert_eq!(Aabb::EMPTY.size(), Vec3::ZERO);
    }

    #[test]
    fn quad_normals_face_positive_z() {
        let m = quad();
        for n in &m.normals {
            assert!((n[2] - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn ray_hits_quad_from_both_sides() {
        let m = quad();
        let t = m.ray_hit(Vec3::new(0.2, 0.1, 5.0), Vec3::NEG_Z).unwrap();
        assert!((t - 5.0).abs() < 1e-5);
        let t = m.ray_hit(Vec3::new(0.2, 0.1, -3.0), Vec3::Z).unwrap();
        assert!((t - 3.0).abs() < 1e-5);
        assert!(m.ray_hit(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z).is_none());
    }

    #[test]
    fn transformed_box_follows_translation() {
        let b = Aabb::from_points([Vec3::ZERO, Vec3::ONE]);
        let moved = b.transformed(&Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0)));
        assert_eq!(moved.min, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(moved.max, Vec3::new(3.0, 1.0, 1.0));
    }
}
