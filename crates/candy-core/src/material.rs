//! Typed material parameters.
//!
//! Each material kind owns named fields; the renderer never looks uniforms up
//! by name. [`Material::block`] packs the fields into the fixed uniform layout
//! shared with `scene.wgsl`.

use crate::emotion::{hex_to_rgb, Emotion};
use crate::ease::lerp;
use glam::Vec3;

/// GPU-facing parameter block. Field meaning depends on [`ShaderKind`]; the
/// layout matches `MaterialBlock` in `scene.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialBlock {
    pub color: [f32; 4],
    pub accent: [f32; 4],
    pub params: [f32; 4],
    pub extra: [f32; 4],
    pub hover: [f32; 4],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Front,
    Back,
    Double,
}

/// Which pipeline draws a material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    Candy,
    Wrapper(Side),
    Bubble,
    Basic,
}

impl ShaderKind {
    /// Samples the offscreen scene texture.
    #[inline]
    pub fn is_refractive(self) -> bool {
        matches!(self, ShaderKind::Wrapper(_) | ShaderKind::Bubble)
    }
}

/// Inner candy surface, one palette per emotion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandyParams {
    pub base: [f32; 3],
    pub accent: [f32; 3],
    pub pattern: u32,
    pub time: f32,
    pub glow: f32,
    pub opacity: f32,
}

impl CandyParams {
    pub fn for_emotion(emotion: Emotion) -> Self {
        let (base, accent, pattern, glow) = match emotion {
            Emotion::Tired => (0x78ffcd, 0x2f8f7a, 0, 0.35),
            Emotion::Sad => (0x6ec7ff, 0x1d3f8f, 1, 0.30),
            Emotion::Boring => (0xff8ee6, 0x8a4fb8, 2, 0.25),
            Emotion::Upset => (0xff7a7a, 0xb01830, 3, 0.45),
            Emotion::Happy => (0xffe066, 0xff9a1f, 4, 0.55),
            Emotion::Anxiety => (0x3ecf55, 0xc9ff3d, 5, 0.50),
        };
        Self {
            base: hex_to_rgb(base),
            accent: hex_to_rgb(accent),
            pattern,
            time: 0.0,
            glow,
            opacity: 1.0,
        }
    }
}

/// Iridescent translucent shell sampling the offscreen candy pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WrapperParams {
    pub time: f32,
    pub opacity: f32,
    pub side: Side,
    pub film_strength: f32,
    pub refraction: f32,
    pub fresnel_power: f32,
}

impl WrapperParams {
    pub fn new(opacity: f32, side: Side) -> Self {
        Self {
            time: 0.0,
            opacity,
            side,
            film_strength: 0.9,
            refraction: 0.035,
            fresnel_power: 3.0,
        }
    }
}

pub const BUBBLE_HOVER_PARKED: Vec3 = Vec3::splat(9999.0);
const BUBBLE_DEFORM_ACTIVE: f32 = 0.45;
const BUBBLE_REFRACT_ACTIVE: f32 = 0.22;
const BUBBLE_HOVER_RATE_ACTIVE: f32 = 0.18;
const BUBBLE_DEFORM_IDLE: f32 = 0.15;
const BUBBLE_REFRACT_IDLE: f32 = 0.05;
const BUBBLE_HOVER_RATE_IDLE: f32 = 0.10;

const BUBBLE_FILM_THICKNESS: f32 = 4.0;
const BUBBLE_IRIDESCENCE_SPEED: f32 = 6.0;
const BUBBLE_ABERRATION: f32 = 0.7;
const BUBBLE_REFRACTION: f32 = 0.03;

/// Soap-bubble shell with pointer pressure deformation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BubbleParams {
    pub time: f32,
    pub hover_pos: Vec3,
    pub hover_radius: f32,
    pub deform_amount: f32,
    pub deform_refract: f32,
    pub refraction: f32,
    pub inner_refraction: f32,
    pub aberration: f32,
    pub film_thickness: f32,
    pub film_thickness_inner: f32,
    pub transmission: f32,
    pub iridescence_strength: f32,
    pub iridescence_speed: f32,
    pub iridescence_shift: f32,
}

impl BubbleParams {
    pub fn new(iridescence_shift: f32) -> Self {
        Self {
            time: 1.0,
            hover_pos: Vec3::splat(1000.0),
            hover_radius: 0.3,
            deform_amount: 0.001,
            deform_refract: 0.001,
            refraction: BUBBLE_REFRACTION,
            inner_refraction: 0.011,
            aberration: BUBBLE_ABERRATION,
            film_thickness: BUBBLE_FILM_THICKNESS,
            film_thickness_inner: 1.8,
            transmission: 1.0,
            iridescence_strength: 1.2,
            iridescence_speed: BUBBLE_IRIDESCENCE_SPEED,
            iridescence_shift,
        }
    }

    /// Pressure deformation: ease toward the active target while the pointer
    /// ray hits this bubble, else back toward idle with the hover parked.
    pub fn ease_hover(&mut self, hit: Option<Vec3>) {
        match hit {
            Some(p) => {
                self.hover_pos = p;
                self.deform_amount = lerp(self.deform_amount, BUBBLE_DEFORM_ACTIVE, BUBBLE_HOVER_RATE_ACTIVE);
                self.deform_refract = lerp(self.deform_refract, BUBBLE_REFRACT_ACTIVE, BUBBLE_HOVER_RATE_ACTIVE);
            }
            None => {
                self.hover_pos = BUBBLE_HOVER_PARKED;
                self.deform_amount = lerp(self.deform_amount, BUBBLE_DEFORM_IDLE, BUBBLE_HOVER_RATE_IDLE);
                self.deform_refract = lerp(self.deform_refract, BUBBLE_REFRACT_IDLE, BUBBLE_HOVER_RATE_IDLE);
            }
        }
    }

    /// Audio-reactive shimmer; `None` restores the resting values.
    pub fn apply_dance(&mut self, strength: Option<f32>) {
        match strength {
            Some(s) => {
                let s = s.clamp(0.0, 1.0);
                self.film_thickness = BUBBLE_FILM_THICKNESS + s * 12.0;
                self.iridescence_speed = BUBBLE_IRIDESCENCE_SPEED + s * 25.0;
                self.aberration = BUBBLE_ABERRATION + s * 1.3;
                self.refraction = BUBBLE_REFRACTION + s * 0.06;
            }
            None => {
                self.film_thickness = BUBBLE_FILM_THICKNESS;
                self.iridescence_speed = BUBBLE_IRIDESCENCE_SPEED;
                self.aberration = BUBBLE_ABERRATION;
                self.refraction = BUBBLE_REFRACTION;
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BasicParams {
    pub color: [f32; 3],
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Material {
    Candy(CandyParams),
    Wrapper(WrapperParams),
    Bubble(BubbleParams),
    Basic(BasicParams),
}

impl Material {
    /// Material factory: the inner surface for a named entity.
    pub fn candy_for(emotion: Emotion) -> Self {
        Material::Candy(CandyParams::for_emotion(emotion))
    }

    pub fn shader_kind(&self) -> ShaderKind {
        match self {
            Material::Candy(_) => ShaderKind::Candy,
            Material::Wrapper(w) => ShaderKind::Wrapper(w.side),
            Material::Bubble(_) => ShaderKind::Bubble,
            Material::Basic(_) => ShaderKind::Basic,
        }
    }

    #[inline]
    pub fn is_wrapper(&self) -> bool {
        matches!(self, Material::Wrapper(_))
    }

    /// Advance the continuous time parameter, if the kind has one.
    pub fn set_time(&mut self, t: f32) {
        match self {
            Material::Candy(c) => c.time = t,
            Material::Wrapper(w) => w.time = t,
            Material::Bubble(b) => b.time = t,
            Material::Basic(_) => {}
        }
    }

    pub fn time(&self) -> Option<f32> {
        match self {
            Material::Candy(c) => Some(c.time),
            Material::Wrapper(w) => Some(w.time),
            Material::Bubble(b) => Some(b.time),
            Material::Basic(_) => None,
        }
    }

    pub fn block(&self) -> MaterialBlock {
        match self {
            Material::Candy(c) => MaterialBlock {
                color: [c.base[0], c.base[1], c.base[2], c.opacity],
                accent: [c.accent[0], c.accent[1], c.accent[2], c.pattern as f32],
                params: [c.time, c.glow, 0.0, 0.0],
                ..Default::default()
            },
            Material::Wrapper(w) => MaterialBlock {
                color: [1.0, 1.0, 1.0, w.opacity],
                params: [w.time, w.film_strength, w.refraction, w.fresnel_power],
                ..Default::default()
            },
            Material::Bubble(b) => MaterialBlock {
                color: [
                    b.film_thickness,
                    b.film_thickness_inner,
                    b.iridescence_strength,
                    b.transmission,
                ],
                accent: [
                    b.refraction,
                    b.inner_refraction,
                    b.aberration,
                    b.iridescence_speed,
                ],
                params: [b.time, b.deform_amount, b.deform_refract, b.iridescence_shift],
                extra: [0.0; 4],
                hover: [b.hover_pos.x, b.hover_pos.y, b.hover_pos.z, b.hover_radius],
            },
            Material::Basic(p) => MaterialBlock {
                color: [p.color[0], p.color[1], p.color[2], p.opacity],
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_is_uniform_aligned() {
        assert_eq!(std::mem::size_of::<MaterialBlock>() % 16, 0);
    }

    #[test]
    fn refractive_kinds() {
        assert!(ShaderKind::Bubble.is_refractive());
        assert!(ShaderKind::Wrapper(Side::Back).is_refractive());
        assert!(!ShaderKind::Candy.is_refractive());
        assert!(!ShaderKind::Basic.is_refractive());
    }
}
