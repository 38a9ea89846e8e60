mod common;

use candy_core::camera::Camera;
use candy_core::framing::{frame_subject, frame_to_viewport, FramingConfig};
use candy_core::material::{BasicParams, Material};
use candy_core::mesh::Aabb;
use candy_core::scene::Scene;
use common::{approx, cube_mesh};
use glam::Vec3;

fn subject_scene(center: Vec3) -> (Scene, candy_core::NodeId) {
    let mut scene = Scene::new();
    let root = scene.root();
    let subject = scene.spawn(root, "subject");
    let mesh = scene.add_mesh(cube_mesh(2.0, center));
    scene.spawn_mesh(
        subject,
        "body",
        mesh,
        Material::Basic(BasicParams {
            color: [1.0; 3],
            opacity: 1.0,
        }),
    );
    (scene, subject)
}

#[test]
fn invalid_boxes_are_rejected() {
    let cfg = FramingConfig::default();
    let fov = 45f32.to_radians();
    assert!(frame_to_viewport(&Aabb::EMPTY, fov, 1.5, &cfg).is_none());
    let nan = Aabb {
        min: Vec3::splat(f32::NAN),
        max: Vec3::ONE,
    };
    assert!(frame_to_viewport(&nan, fov, 1.5, &cfg).is_none());
    let unit = Aabb {
        min: -Vec3::ONE,
        max: Vec3::ONE,
    };
    assert!(frame_to_viewport(&unit, fov, 0.0, &cfg).is_none());
}

#[test]
fn full_fill_fits_the_bounding_sphere_on_both_axes() {
    let cfg = FramingConfig {
        width_fill: 1.0,
        x_offset_n: 0.0,
        y_offset_n: 0.0,
    };
    let b = Aabb {
        min: Vec3::new(-3.0, -1.0, -1.0),
        max: Vec3::new(3.0, 1.0, 1.0),
    };
    let fov = 45f32.to_radians();
    for aspect in [0.5, 1.0, 2.0] {
        let f = frame_to_viewport(&b, fov, aspect, &cfg).expect("valid box");
        let (_, radius) = b.bounding_sphere();
        let h = candy_core::camera::horizontal_fov(fov, aspect);
        assert!(f.distance * (fov / 2.0).sin() >= radius - 1e-4);
        assert!(f.distance * (h / 2.0).sin() >= radius - 1e-4);
        assert_eq!(f.subject_offset, Vec3::ZERO);
        assert!(f.near < f.distance && f.far > f.distance);
    }
}

#[test]
fn negative_screen_offset_moves_subject_right() {
    let b = Aabb {
        min: -Vec3::ONE,
        max: Vec3::ONE,
    };
    let f = frame_to_viewport(&b, 45f32.to_radians(), 1.6, &FramingConfig::DETAIL).expect("valid");
    assert!(f.subject_offset.x > 0.0);
    assert!(approx(f.subject_offset.y, 0.0, 1e-6));
    assert_eq!(f.target, Vec3::ZERO);
    assert!(approx(f.camera_position.z, f.distance, 1e-4));
}

#[test]
fn framing_twice_gives_the_same_result() {
    let (mut scene, subject) = subject_scene(Vec3::new(0.5, 2.0, -1.0));
    let mut camera = Camera::new(Vec3::new(0.0, 0.0, 10.0), 45.0, 1.0);
    camera.set_viewport(1280.0, 720.0);
    let cfg = FramingConfig::DETAIL;

    let first = frame_subject(&mut scene, subject, &mut camera, &cfg).expect("framed");
    let pos_after_first = camera.position;
    let offset_after_first = scene.node(subject).transform.translation;

    let second = frame_subject(&mut scene, subject, &mut camera, &cfg).expect("framed");
    assert!(approx(first.distance, second.distance, 1e-5));
    assert!(camera.position.abs_diff_eq(pos_after_first, 1e-5));
    assert!(scene
        .node(subject)
        .transform
        .translation
        .abs_diff_eq(offset_after_first, 1e-5));
}

#[test]
fn empty_subject_leaves_camera_untouched() {
    let mut scene = Scene::new();
    let root = scene.root();
    let subject = scene.spawn(root, "nothing");
    let mut camera = Camera::new(Vec3::new(0.0, 0.0, 10.0), 45.0, 1.0);
    assert!(frame_subject(&mut scene, subject, &mut camera, &FramingConfig::DETAIL).is_none());
    assert_eq!(camera.position, Vec3::new(0.0, 0.0, 10.0));
}
