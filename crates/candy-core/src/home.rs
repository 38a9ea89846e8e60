//! Landing page session: the bubble field, hover pressure, and the camera
//! tween that focuses a clicked bubble.

use crate::bubbles::{BubbleAction, BubbleField, FOCUS_TWEEN_SEC, HOME_CAMERA_POSITION, HOME_TWEEN_SEC};
use crate::camera::{pixel_to_ndc, Camera};
use crate::constants::CAMERA_FOV_DEG;
use crate::ease::Vec3Tween;
use crate::material::{BubbleParams, Material};
use crate::model::Model;
use crate::pass::{plan_frame, FramePlan};
use crate::scene::{NodeId, Scene};
use glam::{Vec2, Vec3};

pub const BUBBLE_RENDER_ORDER: i32 = 0;

pub struct HomeSession {
    pub scene: Scene,
    pub camera: Camera,
    field: BubbleField,
    tween: Option<Vec3Tween>,
    pointer: Vec2,
    viewport: Vec2,
    hovered: Option<usize>,
}

impl HomeSession {
    pub fn new(width: f32, height: f32) -> Self {
        let mut camera = Camera::new(HOME_CAMERA_POSITION, CAMERA_FOV_DEG, 1.0);
        camera.set_viewport(width, height);
        camera.near = 0.1;
        camera.far = 100.0;
        camera.target = camera.position - Vec3::Z;
        Self {
            scene: Scene::new(),
            camera,
            field: BubbleField::default(),
            tween: None,
            pointer: Vec2::ZERO,
            viewport: Vec2::new(width, height),
            hovered: None,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        self.camera.set_viewport(width, height);
    }

    #[inline]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    #[inline]
    pub fn field(&self) -> &BubbleField {
        &self.field
    }

    #[inline]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Clone the bubble model into the field. `urls` come from the page's data
    /// nodes; `shift` seeds each bubble's iridescence phase.
    pub fn bubbles_loaded(&mut self, model: Model, urls: &[String], shift: impl FnMut() -> f32) {
        let template = model.into_template(&mut self.scene, "bubble", |_| {
            vec![(Material::Bubble(BubbleParams::new(0.0)), BUBBLE_RENDER_ORDER)]
        });
        self.field = BubbleField::spawn(&mut self.scene, template, urls, shift);
        log::info!("[home] {} bubbles placed", self.field.len());
    }

    pub fn pointer_moved(&mut self, px: f32, py: f32) {
        self.pointer = pixel_to_ndc(px, py, self.viewport.x, self.viewport.y);
    }

    #[inline]
    pub fn pointer_ndc(&self) -> Vec2 {
        self.pointer
    }

    fn pick_ndc(&self, ndc: Vec2) -> Option<(usize, Vec3)> {
        let (origin, dir) = self.camera.ray(ndc);
        let hit = self.scene.raycast(origin, dir, &self.field.roots())?;
        self.field.index_of_hit(&self.scene, &hit).map(|i| (i, hit.point))
    }

    /// Toggle the bubble under a canvas pixel and start the camera tween.
    pub fn click(&mut self, px: f32, py: f32, now_sec: f64) -> Option<BubbleAction> {
        let ndc = pixel_to_ndc(px, py, self.viewport.x, self.viewport.y);
        let (index, _) = self.pick_ndc(ndc)?;
        let node = self.field.get(index)?.node;
        let world = self.scene.world_position(node);
        let action = self.field.click(index, world)?;
        let (to, duration) = match &action {
            BubbleAction::OpenSound { camera_to, .. } | BubbleAction::OpenInfo { camera_to, .. } => {
                (*camera_to, FOCUS_TWEEN_SEC)
            }
            BubbleAction::Close { camera_to } => (*camera_to, HOME_TWEEN_SEC),
        };
        self.tween = Some(Vec3Tween::new(self.camera.position, to, now_sec, duration));
        Some(action)
    }

    /// Pixel position of a bubble's origin, for overlays that follow it.
    pub fn screen_position(&self, index: usize) -> Option<Vec2> {
        let node = self.field.get(index)?.node;
        let p = self.scene.world_position(node);
        self.camera.project_to_screen(p, self.viewport.x, self.viewport.y)
    }

    /// One frame. `t` is seconds since load; `dance` is the audio level when
    /// audio-reactive motion is enabled.
    pub fn tick(&mut self, now_sec: f64, t: f32, dance: Option<f32>) {
        if let Some(tw) = self.tween {
            let (p, done) = tw.sample(now_sec);
            self.camera.position = p;
            if done {
                self.tween = None;
            }
        }
        self.camera.target = self.camera.position - Vec3::Z;

        self.field.animate(&mut self.scene, t, self.pointer, dance);
        let hit = self.pick_ndc(self.pointer);
        self.hovered = hit.map(|(i, _)| i);
        self.field.apply_hover(&mut self.scene, hit);
    }

    pub fn plan(&mut self) -> FramePlan {
        let roots: Vec<NodeId> = self.field.roots();
        let ready = !roots.is_empty();
        plan_frame(&mut self.scene, &roots, ready)
    }
}
