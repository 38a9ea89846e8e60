//! Emotion detail page session: one candy in its shell, auto-framed to the
//! left part of the viewport, rotated by drag and dollied by the wheel.

use crate::camera::Camera;
use crate::constants::{CAMERA_FOV_DEG, DETAIL_TIME_STEP};
use crate::emotion::Emotion;
use crate::framing::{frame_subject, Framing, FramingConfig};
use crate::interact::{DragRotate, WheelZoom};
use crate::material::{BasicParams, Material};
use crate::model::Model;
use crate::pass::{plan_frame, FramePlan};
use crate::scene::{NodeId, Scene};
use crate::shop::DECO_TINT;
use crate::staging::{candy_subtree, deco_template, wrapper_template, Staging};
use glam::{EulerRot, Quat, Vec2, Vec3};

pub struct DetailSession {
    pub scene: Scene,
    pub camera: Camera,
    emotion: Emotion,
    model_root: NodeId,
    staging: Staging,
    framing: FramingConfig,
    frame_requested: bool,
    framed_once: bool,
    drag: DragRotate,
    zoom: WheelZoom,
    rotation: Vec2,
    time: f32,
}

impl DetailSession {
    pub fn new(emotion: Emotion, width: f32, height: f32) -> Self {
        let mut scene = Scene::new();
        let model_root = scene.spawn(scene.root(), "model");
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 6.0), CAMERA_FOV_DEG, 1.0);
        camera.set_viewport(width, height);
        Self {
            scene,
            camera,
            emotion,
            model_root,
            staging: Staging::new(&[model_root]),
            framing: FramingConfig::DETAIL,
            // framed once more on the first frame after start
            frame_requested: true,
            framed_once: false,
            drag: DragRotate::default(),
            zoom: WheelZoom::default(),
            rotation: Vec2::ZERO,
            time: 0.0,
        }
    }

    #[inline]
    pub fn emotion(&self) -> Emotion {
        self.emotion
    }

    #[inline]
    pub fn model_root(&self) -> NodeId {
        self.model_root
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.staging.is_complete(0)
    }

    pub fn candy_loaded(&mut self, model: Model) {
        let candy = candy_subtree(model, &mut self.scene, Material::candy_for(self.emotion));
        self.staging.candy_loaded(&mut self.scene, 0, candy);
        self.frame_when_complete();
    }

    pub fn wrapper_loaded(&mut self, model: Model) {
        let template = wrapper_template(model, &mut self.scene);
        self.staging.wrapper_template_loaded(&mut self.scene, template);
        self.frame_when_complete();
    }

    pub fn deco_loaded(&mut self, model: Model) {
        let tint = Material::Basic(BasicParams {
            color: DECO_TINT,
            opacity: 1.0,
        });
        let template = deco_template(model, &mut self.scene, tint);
        self.staging.deco_template_loaded(&mut self.scene, template);
    }

    fn frame_when_complete(&mut self) {
        if !self.framed_once && self.is_complete() {
            self.framed_once = true;
            self.reframe();
        }
    }

    /// Frame now. An invalid box leaves everything untouched and keeps a
    /// retry queued for the next frame.
    pub fn reframe(&mut self) -> Option<Framing> {
        let f = frame_subject(&mut self.scene, self.model_root, &mut self.camera, &self.framing);
        self.frame_requested = f.is_none();
        f
    }

    pub fn request_frame(&mut self) {
        self.frame_requested = true;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.set_viewport(width, height);
        self.reframe();
    }

    pub fn press(&mut self, x: f32, y: f32) {
        self.drag.press(x, y);
    }

    pub fn release(&mut self) {
        self.drag.release();
    }

    pub fn drag(&mut self, x: f32, y: f32) {
        if let Some(d) = self.drag.drag(x, y) {
            self.rotation += d;
            self.scene.node_mut(self.model_root).transform.rotation =
                Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0);
        }
    }

    pub fn wheel(&mut self, delta_y: f64) {
        let z = self.zoom.apply(self.camera.position.z, delta_y);
        let dz = z - self.camera.position.z;
        self.camera.position.z = z;
        self.camera.target.z += dz;
    }

    pub fn tick(&mut self) {
        if self.frame_requested {
            self.reframe();
        }
        self.time += DETAIL_TIME_STEP;
        let t = self.time;
        self.scene.for_each_material_mut(self.model_root, |m| m.set_time(t));
    }

    pub fn plan(&mut self) -> FramePlan {
        let wrappers = self.staging.wrapper_roots();
        let ready = self.is_complete();
        plan_frame(&mut self.scene, &wrappers, ready)
    }
}
