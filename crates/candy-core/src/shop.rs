//! Shop page session: the six-candy carousel, its picking, and the cursor
//! ribbon.
//!
//! Everything the page mutates lives here and is driven from one frame
//! callback and the DOM event handlers, so no interior locking is needed.

use crate::camera::{pixel_to_ndc, Camera};
use crate::carousel::{ease_layout, CandyPose, Carousel};
use crate::constants::{
    CAMERA_FOV_DEG, HAND_DRAWN_SLOTS, INITIAL_SLOTS, SAD_SCALE_FACTOR, SHOP_CAMERA_POSITION,
    SHOP_INITIAL_ROT_X_DEG,
};
use crate::emotion::Emotion;
use crate::interact::{route_carousel_click, CarouselClick};
use crate::material::{BasicParams, Material};
use crate::mesh::StripMesh;
use crate::model::Model;
use crate::pass::{plan_frame, FramePlan};
use crate::scene::{NodeId, Scene, Tag};
use crate::staging::{candy_subtree, deco_template, wrapper_template, Attached, Staging};
use crate::trail::{ribbon_for, Trail};
use glam::{Vec2, Vec3};

pub const DECO_TINT: [f32; 3] = [1.0, 0.86, 0.92];

pub struct ShopSession {
    pub scene: Scene,
    pub camera: Camera,
    carousel: Carousel,
    staging: Staging,
    roots: Vec<NodeId>,
    poses: Vec<CandyPose>,
    trail: Trail,
    ribbon: StripMesh,
    viewport: Vec2,
    started_at: f64,
}

impl ShopSession {
    /// One root per emotion is created eagerly and placed with the initial
    /// layout table.
    pub fn new(width: f32, height: f32, now_sec: f64) -> Self {
        let mut scene = Scene::new();
        let tilt = SHOP_INITIAL_ROT_X_DEG.to_radians();
        let mut roots = Vec::with_capacity(Emotion::COUNT);
        let mut poses = Vec::with_capacity(Emotion::COUNT);
        let carousel = Carousel::new(Emotion::COUNT);
        for e in Emotion::ALL {
            let root = scene.spawn(scene.root(), e.name());
            scene.node_mut(root).tag = Some(Tag::Entity(e.ordinal()));
            let pose = CandyPose::at_slot(&INITIAL_SLOTS[carousel.slot_of(e.ordinal())], tilt);
            scene.node_mut(root).transform = pose.to_transform();
            roots.push(root);
            poses.push(pose);
        }
        let mut camera = Camera::new(SHOP_CAMERA_POSITION, CAMERA_FOV_DEG, 1.0);
        camera.set_viewport(width, height);
        Self {
            scene,
            camera,
            carousel,
            staging: Staging::new(&roots),
            roots,
            poses,
            trail: Trail::default(),
            ribbon: StripMesh::default(),
            viewport: Vec2::new(width, height),
            started_at: now_sec,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        self.camera.set_viewport(width, height);
    }

    #[inline]
    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    #[inline]
    pub fn staging(&self) -> &Staging {
        &self.staging
    }

    pub fn entity_root(&self, i: usize) -> Option<NodeId> {
        self.roots.get(i).copied()
    }

    #[inline]
    pub fn front(&self) -> Emotion {
        Emotion::from_ordinal(self.carousel.front_index())
    }

    pub fn candy_loaded(&mut self, emotion: Emotion, model: Model) -> Attached {
        let candy = candy_subtree(model, &mut self.scene, Material::candy_for(emotion));
        let out = self.staging.candy_loaded(&mut self.scene, emotion.ordinal(), candy);
        log::info!("[shop] {} candy ready ({} wrappers, {} decos)", emotion, out.wrappers, out.decos);
        out
    }

    pub fn wrapper_loaded(&mut self, model: Model) -> Attached {
        let template = wrapper_template(model, &mut self.scene);
        self.staging.wrapper_template_loaded(&mut self.scene, template)
    }

    pub fn deco_loaded(&mut self, model: Model) -> Attached {
        let tint = Material::Basic(BasicParams {
            color: DECO_TINT,
            opacity: 1.0,
        });
        let template = deco_template(model, &mut self.scene, tint);
        self.staging.deco_template_loaded(&mut self.scene, template)
    }

    pub fn shift(&mut self, step: i32, now_sec: f64) -> bool {
        self.carousel.shift(step, now_sec)
    }

    pub fn shift_to(&mut self, target: usize, now_sec: f64) -> Option<i32> {
        self.carousel.shift_to(target, now_sec)
    }

    fn ndc(&self, px: f32, py: f32) -> Vec2 {
        pixel_to_ndc(px, py, self.viewport.x, self.viewport.y)
    }

    /// Entity ordinal under a canvas pixel, if any.
    pub fn pick(&self, px: f32, py: f32) -> Option<usize> {
        let (origin, dir) = self.camera.ray(self.ndc(px, py));
        let hit = self.scene.raycast(origin, dir, &self.roots)?;
        match self.scene.tagged_ancestor(hit.node) {
            Some((_, Tag::Entity(i))) => Some(*i),
            _ => None,
        }
    }

    /// Route a canvas click and start the carousel motion it asks for.
    /// Opening the detail modal is left to the caller.
    pub fn click(&mut self, px: f32, py: f32, now_sec: f64) -> CarouselClick {
        let routed = route_carousel_click(self.pick(px, py), self.carousel.front_index(), px, self.viewport.x);
        match routed {
            CarouselClick::OpenDetail(_) => {}
            CarouselClick::BringToFront(i) => {
                self.carousel.shift_to(i, now_sec);
            }
            CarouselClick::Step(s) => {
                self.carousel.shift(s, now_sec);
            }
        }
        routed
    }

    /// The floating label shows only over the front candy while settled.
    pub fn hover_label_visible(&self, px: f32, py: f32) -> bool {
        if self.carousel.is_animating() {
            return false;
        }
        let front = self.carousel.front_index();
        let Some(root) = self.roots.get(front) else {
            return false;
        };
        let (origin, dir) = self.camera.ray(self.ndc(px, py));
        self.scene.raycast(origin, dir, &[*root]).is_some()
    }

    pub fn pointer_moved(&mut self, px: f32, py: f32) {
        self.trail.push(px, py);
    }

    #[inline]
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// One animation frame: carousel sample, layout easing, time uniforms and
    /// the ribbon rebuild.
    pub fn tick(&mut self, now_sec: f64) {
        let t = (now_sec - self.started_at) as f32;
        self.carousel.advance(now_sec);
        ease_layout(
            &self.carousel,
            &HAND_DRAWN_SLOTS,
            &mut self.poses,
            |i| {
                if Emotion::from_ordinal(i) == Emotion::Sad {
                    SAD_SCALE_FACTOR
                } else {
                    1.0
                }
            },
            t,
        );
        for (root, pose) in self.roots.iter().zip(self.poses.iter()) {
            self.scene.node_mut(*root).transform = pose.to_transform();
            self.scene.for_each_material_mut(*root, |m| m.set_time(t));
        }

        self.trail.step();
        self.ribbon = ribbon_for(&self.trail, &self.camera, self.viewport.x, self.viewport.y);
    }

    #[inline]
    pub fn ribbon(&self) -> &StripMesh {
        &self.ribbon
    }

    /// Ribbon tint keyed by the front entity.
    pub fn ribbon_color(&self) -> [f32; 3] {
        self.front().trail_rgb()
    }

    pub fn plan(&mut self) -> FramePlan {
        let wrappers = self.staging.wrapper_roots();
        let ready = !wrappers.is_empty();
        plan_frame(&mut self.scene, &wrappers, ready)
    }

    pub fn pose(&self, i: usize) -> Option<&CandyPose> {
        self.poses.get(i)
    }

    pub fn world_position(&self, i: usize) -> Option<Vec3> {
        self.roots.get(i).map(|r| self.scene.world_position(*r))
    }
}
