mod common;

use candy_core::carousel::Carousel;
use candy_core::constants::{HAND_DRAWN_SLOTS, SAD_SCALE_FACTOR};
use candy_core::detail::DetailSession;
use candy_core::interact::CarouselClick;
use candy_core::material::{Material, ShaderKind};
use candy_core::shop::ShopSession;
use candy_core::Emotion;
use common::{approx, cube_model};
use glam::Vec3;

const W: f32 = 800.0;
const H: f32 = 600.0;

fn loaded_shop() -> ShopSession {
    let mut shop = ShopSession::new(W, H, 0.0);
    for e in Emotion::ALL {
        shop.candy_loaded(e, cube_model(1.0, Vec3::ZERO));
    }
    shop.wrapper_loaded(cube_model(2.0, Vec3::ZERO));
    shop.deco_loaded(cube_model(0.2, Vec3::ZERO));
    shop
}

#[test]
fn front_candy_is_picked_at_the_centre() {
    let empty = ShopSession::new(W, H, 0.0);
    assert_eq!(empty.pick(W / 2.0 + 3.0, H / 2.0 + 2.0), None);

    let shop = loaded_shop();
    assert_eq!(shop.pick(W / 2.0 + 3.0, H / 2.0 + 2.0), Some(0));
    assert!(shop.hover_label_visible(W / 2.0 + 3.0, H / 2.0 + 2.0));
    assert!(!shop.hover_label_visible(5.0, 5.0));
}

#[test]
fn clicking_the_front_candy_opens_detail_without_rotating() {
    let mut shop = loaded_shop();
    let routed = shop.click(W / 2.0 + 3.0, H / 2.0 + 2.0, 0.0);
    assert_eq!(routed, CarouselClick::OpenDetail(0));
    assert!(!shop.carousel().is_animating());
}

#[test]
fn empty_space_steps_by_side() {
    let mut left = loaded_shop();
    assert_eq!(left.click(10.0, 10.0, 0.0), CarouselClick::Step(1));
    assert!(left.carousel().is_animating());
    assert!(!left.hover_label_visible(W / 2.0 + 3.0, H / 2.0 + 2.0));

    let mut right = loaded_shop();
    assert_eq!(right.click(W - 10.0, 10.0, 0.0), CarouselClick::Step(-1));
    right.tick(1.0);
    assert_eq!(right.front(), Emotion::Anxiety);
}

#[test]
fn clicking_a_side_candy_brings_it_forward() {
    let mut shop = loaded_shop();
    let p = shop.world_position(1).expect("entity");
    let px = shop.camera.project_to_screen(p, W, H).expect("visible") + glam::Vec2::new(2.0, 1.0);
    assert_eq!(shop.click(px.x, px.y, 0.0), CarouselClick::BringToFront(1));
    shop.tick(0.6);
    assert_eq!(shop.front(), Emotion::Sad);
    assert_eq!(shop.carousel().rotation_index(), 1.0);
}

#[test]
fn plan_goes_two_pass_once_a_wrapper_exists() {
    let mut shop = ShopSession::new(W, H, 0.0);
    shop.candy_loaded(Emotion::Happy, cube_model(1.0, Vec3::ZERO));
    assert!(!shop.plan().is_two_pass());

    shop.wrapper_loaded(cube_model(2.0, Vec3::ZERO));
    let plan = shop.plan();
    assert!(plan.is_two_pass());
    let off = plan.offscreen.expect("offscreen list");
    assert!(off.iter().all(|d| !d.material.is_wrapper()));
    // one candy and two wrapper shells
    assert_eq!(plan.onscreen.len(), 3);
    let kinds: Vec<ShaderKind> = plan.onscreen.iter().map(|d| d.material.shader_kind()).collect();
    assert_eq!(kinds[0], ShaderKind::Candy);
}

#[test]
fn sad_candy_settles_smaller() {
    let mut shop = loaded_shop();
    let mut now = 0.0;
    for _ in 0..400 {
        now += 1.0 / 60.0;
        shop.tick(now);
    }
    let c = Carousel::new(Emotion::COUNT);
    let sad = Emotion::Sad.ordinal();
    let happy = Emotion::Happy.ordinal();
    let sad_pose = shop.pose(sad).expect("pose");
    let happy_pose = shop.pose(happy).expect("pose");
    assert!(approx(sad_pose.scale, HAND_DRAWN_SLOTS[c.slot_of(sad)].scale * SAD_SCALE_FACTOR, 1e-3));
    assert!(approx(happy_pose.scale, HAND_DRAWN_SLOTS[c.slot_of(happy)].scale, 1e-3));
}

#[test]
fn tick_drives_time_uniforms() {
    let mut shop = loaded_shop();
    shop.tick(2.5);
    let root = shop.entity_root(0).expect("root");
    let times: Vec<f32> = shop
        .scene
        .descendants(root)
        .into_iter()
        .filter_map(|id| shop.scene.node(id).material.and_then(|m| m.time()))
        .collect();
    assert!(!times.is_empty());
    assert!(times.iter().all(|t| approx(*t, 2.5, 1e-6)));
}

#[test]
fn pointer_motion_builds_a_ribbon() {
    let mut shop = loaded_shop();
    for i in 0..10 {
        shop.pointer_moved(100.0 + i as f32 * 30.0, 200.0 + i as f32 * 10.0);
    }
    shop.tick(0.016);
    let alive = shop.trail().alive_count();
    assert_eq!(alive, 10);
    assert_eq!(shop.ribbon().vertex_count(), 2 * alive);
    assert_eq!(shop.ribbon_color(), Emotion::Tired.trail_rgb());
}

#[test]
fn detail_frames_once_both_halves_arrive() {
    let mut detail = DetailSession::new(Emotion::Upset, 1280.0, 720.0);
    let start = detail.camera.position;
    detail.tick();
    assert_eq!(detail.camera.position, start);

    detail.wrapper_loaded(cube_model(2.0, Vec3::ZERO));
    assert!(!detail.is_complete());
    detail.candy_loaded(cube_model(1.0, Vec3::new(0.0, 0.4, 0.0)));
    assert!(detail.is_complete());
    assert_ne!(detail.camera.position, start);

    // the subject is pushed right to leave room for the text column
    let offset = detail.scene.node(detail.model_root()).transform.translation;
    assert!(offset.x > 0.0);

    let framed = detail.camera.position;
    detail.tick();
    assert!(detail.camera.position.abs_diff_eq(framed, 1e-5));
    assert!(detail.plan().is_two_pass());
}

#[test]
fn detail_drag_rotates_and_wheel_dollies() {
    let mut detail = DetailSession::new(Emotion::Happy, 1280.0, 720.0);
    detail.candy_loaded(cube_model(1.0, Vec3::ZERO));

    detail.drag(50.0, 50.0);
    assert_eq!(detail.scene.node(detail.model_root()).transform.rotation, glam::Quat::IDENTITY);
    detail.press(0.0, 0.0);
    detail.drag(100.0, 0.0);
    detail.release();
    detail.drag(300.0, 300.0);
    let (_, yaw, _) = detail
        .scene
        .node(detail.model_root())
        .transform
        .rotation
        .to_euler(glam::EulerRot::XYZ);
    assert!(approx(yaw, 1.0, 1e-4));

    detail.camera.position.z = 10.0;
    detail.camera.target.z = 0.0;
    detail.wheel(120.0);
    assert!(approx(detail.camera.position.z, 10.5, 1e-6));
    assert!(approx(detail.camera.target.z, 0.5, 1e-6));
    for _ in 0..40 {
        detail.wheel(-120.0);
    }
    assert!(approx(detail.camera.position.z, 3.0, 1e-6));
}

#[test]
fn detail_time_advances_per_frame() {
    let mut detail = DetailSession::new(Emotion::Tired, 800.0, 600.0);
    detail.candy_loaded(cube_model(1.0, Vec3::ZERO));
    for _ in 0..10 {
        detail.tick();
    }
    assert!(approx(detail.time(), 0.1, 1e-5));
    let root = detail.model_root();
    let candy_time = detail
        .scene
        .descendants(root)
        .into_iter()
        .find_map(|id| match detail.scene.node(id).material {
            Some(m @ Material::Candy(_)) => m.time(),
            _ => None,
        });
    assert_eq!(candy_time, Some(detail.time()));
}
