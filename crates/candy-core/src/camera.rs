use glam::{Mat4, Vec2, Vec3};

/// Perspective camera looking at a target point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(position: Vec3, fov_y_deg: f32, aspect: f32) -> Self {
        Self {
            position,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_deg,
            aspect: aspect.max(1e-4),
            near: 0.1,
            far: 1000.0,
        }
    }

    #[inline]
    pub fn fov_y_rad(&self) -> f32 {
        self.fov_y_deg.to_radians()
    }

    /// Horizontal field of view derived from the vertical one and the aspect.
    #[inline]
    pub fn fov_x_rad(&self) -> f32 {
        horizontal_fov(self.fov_y_rad(), self.aspect)
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_rad(), self.aspect, self.near, self.far)
    }

    #[inline]
    pub fn view_proj(&self) -> Mat4 {
        self.proj() * self.view()
    }

    /// Unit vector from the camera toward its target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    /// World-space ray through a normalized device coordinate.
    pub fn ray(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_proj().inverse();
        let near = inv.project_point3(ndc.extend(0.0));
        let far = inv.project_point3(ndc.extend(1.0));
        let dir = (far - near).try_normalize().unwrap_or_else(|| self.forward());
        (self.position, dir)
    }

    /// Point `distance` along the ray through `ndc`.
    pub fn point_at_distance(&self, ndc: Vec2, distance: f32) -> Vec3 {
        let (origin, dir) = self.ray(ndc);
        origin + dir * distance
    }

    /// World point to pixel coordinates (origin top-left). `None` behind the camera.
    pub fn project_to_screen(&self, p: Vec3, width: f32, height: f32) -> Option<Vec2> {
        let clip = self.view_proj() * p.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x * 0.5 + 0.5) * width,
            (-ndc.y * 0.5 + 0.5) * height,
        ))
    }
}

#[inline]
pub fn horizontal_fov(fov_y_rad: f32, aspect: f32) -> f32 {
    2.0 * ((fov_y_rad / 2.0).tan() * aspect).atan()
}

/// Pixel position inside a `width × height` surface to NDC (y up).
#[inline]
pub fn pixel_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(x / width * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_ray_points_at_target() {
        let cam = Camera::new(Vec3::new(0.0, 0.0, 10.0), 45.0, 1.5);
        let (o, d) = cam.ray(Vec2::ZERO);
        assert_eq!(o, cam.position);
        assert!((d - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn project_round_trips_through_ray() {
        let cam = Camera::new(Vec3::new(1.0, 2.0, 9.0), 45.0, 16.0 / 9.0);
        let ndc = Vec2::new(0.3, -0.4);
        let p = cam.point_at_distance(ndc, 7.0);
        let px = cam.project_to_screen(p, 1600.0, 900.0).unwrap();
        let back = pixel_to_ndc(px.x, px.y, 1600.0, 900.0);
        assert!((back - ndc).length() < 1e-3);
    }
}
