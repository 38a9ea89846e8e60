//! The floating bubble field on the landing page.
//!
//! Bubbles are clones of one template, each tagged with its ordinal and a
//! navigation target. They drift with pointer parallax, deform under hover,
//! pulse with the music, and act as a toggle when clicked.

use crate::ease::approach;
use crate::material::{BubbleParams, Material};
use crate::scene::{Hit, NodeId, Scene, Tag};
use glam::{EulerRot, Quat, Vec2, Vec3};
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BubbleConfig {
    pub position: [f32; 3],
    pub euler: [f32; 3],
    pub scale: [f32; 3],
}

pub const BUBBLE_COUNT: usize = 5;

/// Hand-placed layout.
pub const BUBBLE_CONFIGS: [BubbleConfig; BUBBLE_COUNT] = [
    BubbleConfig { position: [1.5, 4.0, 1.5], euler: [0.0, PI, PI], scale: [1.8, 1.8, 1.0] },
    BubbleConfig { position: [-2.8, -1.3, 5.0], euler: [0.0, PI, PI / 2.0], scale: [2.0, 2.0, 2.0] },
    BubbleConfig { position: [-6.5, -1.3, 3.0], euler: [0.0, PI, PI / 2.0], scale: [2.0, 2.0, 2.0] },
    BubbleConfig { position: [-8.0, 0.3, 3.0], euler: [0.0, PI, PI / 2.0], scale: [4.0, 3.0, 3.0] },
    BubbleConfig { position: [-2.0, -1.5, 1.5], euler: [0.0, PI, PI / 3.0], scale: [1.0, 1.0, 1.0] },
];

/// Camera offset from a bubble when it is focused.
pub const BUBBLE_CAMERA_OFFSETS: [Vec3; BUBBLE_COUNT] = [
    Vec3::new(0.0, -2.0, 0.0),
    Vec3::new(4.0, 0.5, 0.0),
    Vec3::new(5.0, 0.5, 0.0),
    Vec3::new(6.0, 0.3, 0.0),
    Vec3::new(1.8, 0.5, 0.0),
];

/// Info box offset from the bubble's screen position, as fractions of the viewport.
pub const BUBBLE_INFO_OFFSETS: [Vec2; BUBBLE_COUNT] = [
    Vec2::new(0.25, 0.9), // music
    Vec2::new(2.5, -0.7),
    Vec2::new(0.55, -0.16),
    Vec2::new(0.82, -0.38),
    Vec2::new(0.02, -0.12),
];

pub const FALLBACK_URLS: [&str; BUBBLE_COUNT] = [
    "./html/pages/shop.html",
    "./html/pages/shop.html",
    "./html/pages/contact.html",
    "./html/pages/about.html",
    "music",
];

pub const HOME_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 6.0);
pub const FOCUS_CAMERA_Z: f32 = 6.0;
pub const FOCUS_TWEEN_SEC: f64 = 1.1;
pub const HOME_TWEEN_SEC: f64 = 1.2;

/// The bubble that opens the sound panel instead of an info box.
pub const SOUND_BUBBLE: usize = 0;

const PARALLAX: f32 = 0.2;
const PARALLAX_OFFSET: Vec2 = Vec2::new(-0.02, -0.01);
const FLOAT_FREQ: f32 = 1.2;
const FLOAT_AMPLITUDE: f32 = 0.03;
const PHASE_STEP: f32 = 0.8;
const EASE_X: f32 = 0.08;
const EASE_Y: f32 = 0.06;
const BREATH_FREQ: f32 = 1.5;
const BREATH_AMPLITUDE: f32 = 0.003;
const DANCE_SCALE_PULSE: f32 = 0.35;

#[derive(Clone, Debug)]
pub struct Bubble {
    pub node: NodeId,
    pub base_position: Vec3,
    pub base_scale: Vec3,
    pub url: String,
}

/// What a click on a bubble asks the page to do.
#[derive(Clone, Debug, PartialEq)]
pub enum BubbleAction {
    /// Show the sound panel following the bubble and start the music.
    OpenSound { index: usize, camera_to: Vec3 },
    /// Show the info box for the bubble.
    OpenInfo { index: usize, camera_to: Vec3 },
    /// The active bubble was clicked again: hide overlays and go home.
    Close { camera_to: Vec3 },
}

#[derive(Clone, Debug, Default)]
pub struct BubbleField {
    bubbles: Vec<Bubble>,
    active: Option<usize>,
    sound_follow: Option<usize>,
}

impl BubbleField {
    /// Clone `template` once per layout entry. `urls[i]` overrides the fallback
    /// target when non-empty; `shift` supplies each bubble's iridescence phase.
    pub fn spawn(scene: &mut Scene, template: NodeId, urls: &[String], mut shift: impl FnMut() -> f32) -> Self {
        let mut bubbles = Vec::with_capacity(BUBBLE_COUNT);
        for (i, cfg) in BUBBLE_CONFIGS.iter().enumerate() {
            let node = scene.clone_subtree(template);
            scene.attach(scene.root(), node);
            let url = urls
                .get(i)
                .filter(|u| !u.is_empty())
                .cloned()
                .unwrap_or_else(|| FALLBACK_URLS[i].to_string());

            let base_position = Vec3::from_array(cfg.position);
            let base_scale = Vec3::from_array(cfg.scale);
            {
                let n = scene.node_mut(node);
                n.transform.translation = base_position;
                n.transform.rotation = Quat::from_euler(EulerRot::XYZ, cfg.euler[0], cfg.euler[1], cfg.euler[2]);
                n.transform.scale = base_scale;
                n.tag = Some(Tag::Link { index: i, url: url.clone() });
            }
            let params = BubbleParams::new(shift());
            scene.for_each_material_mut(node, |m| *m = Material::Bubble(params));

            bubbles.push(Bubble {
                node,
                base_position,
                base_scale,
                url,
            });
        }
        Self {
            bubbles,
            active: None,
            sound_follow: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Bubble> {
        self.bubbles.get(i)
    }

    pub fn roots(&self) -> Vec<NodeId> {
        self.bubbles.iter().map(|b| b.node).collect()
    }

    #[inline]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    #[inline]
    pub fn sound_follow(&self) -> Option<usize> {
        self.sound_follow
    }

    /// Ordinal of the bubble a ray hit belongs to.
    pub fn index_of_hit(&self, scene: &Scene, hit: &Hit) -> Option<usize> {
        match scene.tagged_ancestor(hit.node) {
            Some((_, Tag::Link { index, .. })) if *index < self.bubbles.len() => Some(*index),
            _ => None,
        }
    }

    /// Per-frame drift, breathing, audio dance and time uniforms.
    /// `pointer` is in NDC; `dance` is the 0..1 audio level when enabled.
    pub fn animate(&mut self, scene: &mut Scene, t: f32, pointer: Vec2, dance: Option<f32>) {
        for (i, b) in self.bubbles.iter().enumerate() {
            let phase = i as f32 * PHASE_STEP;
            let float = (t * FLOAT_FREQ + phase).sin() * FLOAT_AMPLITUDE;
            let target = b.base_position.truncate() + pointer * PARALLAX + PARALLAX_OFFSET + Vec2::new(0.0, float);

            let scale = match dance {
                Some(s) => b.base_scale * (1.0 + s.clamp(0.0, 1.0) * DANCE_SCALE_PULSE),
                None => b.base_scale * (1.0 + (t * BREATH_FREQ + phase).sin() * BREATH_AMPLITUDE),
            };

            let tr = &mut scene.node_mut(b.node).transform;
            tr.translation.x = approach(tr.translation.x, target.x, EASE_X);
            tr.translation.y = approach(tr.translation.y, target.y, EASE_Y);
            tr.scale = scale;

            scene.for_each_material_mut(b.node, |m| {
                m.set_time(t);
                if let Material::Bubble(p) = m {
                    p.apply_dance(dance);
                }
            });
        }
    }

    /// Pressure deformation: the hit bubble eases toward active; with no hit
    /// at all every bubble eases back to idle.
    pub fn apply_hover(&mut self, scene: &mut Scene, hit: Option<(usize, Vec3)>) {
        for (i, b) in self.bubbles.iter().enumerate() {
            let point = match hit {
                Some((h, p)) if h == i => Some(p),
                Some(_) => continue,
                None => None,
            };
            scene.for_each_material_mut(b.node, |m| {
                if let Material::Bubble(p) = m {
                    p.ease_hover(point);
                }
            });
        }
    }

    /// Toggle selection of bubble `index` whose world position is `world`.
    pub fn click(&mut self, index: usize, world: Vec3) -> Option<BubbleAction> {
        if index >= self.bubbles.len() {
            return None;
        }
        if self.active == Some(index) {
            self.active = None;
            self.sound_follow = None;
            return Some(BubbleAction::Close {
                camera_to: HOME_CAMERA_POSITION,
            });
        }
        let offset = BUBBLE_CAMERA_OFFSETS[index.min(BUBBLE_COUNT - 1)];
        let camera_to = Vec3::new(world.x + offset.x, world.y + offset.y, FOCUS_CAMERA_Z);
        self.active = Some(index);
        if index == SOUND_BUBBLE {
            self.sound_follow = Some(index);
            Some(BubbleAction::OpenSound { index, camera_to })
        } else {
            self.sound_follow = None;
            Some(BubbleAction::OpenInfo { index, camera_to })
        }
    }
}

/// Whether an info call-to-action should be shown for `url`.
#[inline]
pub fn has_call_to_action(url: &str) -> bool {
    !url.is_empty() && url != "#"
}

/// Mean analyser bin as a 0..1 level.
pub fn audio_level(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|b| *b as u32).sum();
    sum as f32 / bins.len() as f32 / 255.0
}

fn offset_px(index: usize, viewport: Vec2) -> Vec2 {
    BUBBLE_INFO_OFFSETS[index.min(BUBBLE_COUNT - 1)] * viewport
}

/// Info box top-left for a bubble at `screen`.
pub fn info_box_position(index: usize, screen: Vec2, viewport: Vec2) -> Vec2 {
    let p = screen + offset_px(index, viewport);
    Vec2::new(
        p.x.min(viewport.x - 320.0).max(20.0),
        p.y.min(viewport.y - 160.0).max(80.0),
    )
}

/// Sound panel top-left for a bubble at `screen`. The panel may overhang the
/// right edge.
pub fn sound_panel_position(index: usize, screen: Vec2, viewport: Vec2) -> Vec2 {
    const PANEL: Vec2 = Vec2::new(280.0, 220.0);
    const RIGHT_SAFE: f32 = -150.0;
    let p = screen + offset_px(index, viewport);
    Vec2::new(
        p.x.min(viewport.x - PANEL.x - RIGHT_SAFE).max(20.0),
        p.y.min(viewport.y - PANEL.y - 20.0).max(160.0),
    )
}
