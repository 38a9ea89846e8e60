mod common;

use candy_core::bubbles::{
    audio_level, has_call_to_action, info_box_position, sound_panel_position, BubbleAction,
    BUBBLE_COUNT, FALLBACK_URLS, HOME_CAMERA_POSITION, SOUND_BUBBLE,
};
use candy_core::home::HomeSession;
use candy_core::material::Material;
use candy_core::scene::Tag;
use common::cube_model;
use glam::{Vec2, Vec3};

fn home_with_bubbles() -> HomeSession {
    let mut home = HomeSession::new(1280.0, 720.0);
    let urls = vec![String::new(), "./html/pages/shop.html".to_string()];
    let mut k = 0.0;
    home.bubbles_loaded(cube_model(1.0, Vec3::ZERO), &urls, || {
        k += 1.0;
        k
    });
    home
}

#[test]
fn every_bubble_is_tagged_with_a_link() {
    let home = home_with_bubbles();
    assert_eq!(home.field().len(), BUBBLE_COUNT);
    for i in 0..BUBBLE_COUNT {
        let b = home.field().get(i).expect("bubble");
        match &home.scene.node(b.node).tag {
            Some(Tag::Link { index, url }) => {
                assert_eq!(*index, i);
                assert_eq!(url, &b.url);
            }
            other => panic!("bubble {i} tag {other:?}"),
        }
    }
    // empty data urls fall back
    assert_eq!(home.field().get(0).map(|b| b.url.as_str()), Some(FALLBACK_URLS[0]));
    assert_eq!(home.field().get(4).map(|b| b.url.as_str()), Some(FALLBACK_URLS[4]));
}

#[test]
fn bubble_materials_get_distinct_phases() {
    let home = home_with_bubbles();
    let mut shifts = Vec::new();
    for i in 0..BUBBLE_COUNT {
        let node = home.field().get(i).expect("bubble").node;
        for id in home.scene.descendants(node) {
            if let Some(Material::Bubble(p)) = home.scene.node(id).material {
                shifts.push(p.iridescence_shift);
            }
        }
    }
    assert_eq!(shifts, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
}

/// A pixel just off the projected centre of bubble `i`.
fn aim(home: &HomeSession, i: usize) -> Vec2 {
    home.screen_position(i).expect("in front of the camera") + Vec2::new(3.0, 2.0)
}

#[test]
fn clicking_the_active_bubble_closes_it() {
    let mut home = home_with_bubbles();
    let node = home.field().get(4).expect("bubble").node;
    let world = home.scene.world_position(node);

    let px = aim(&home, 4);
    match home.click(px.x, px.y, 0.0) {
        Some(BubbleAction::OpenInfo { index, camera_to }) => {
            assert_eq!(index, 4);
            assert!((camera_to.x - (world.x + 1.8)).abs() < 1e-4);
            assert!((camera_to.y - (world.y + 0.5)).abs() < 1e-4);
            assert_eq!(camera_to.z, 6.0);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(home.field().active(), Some(4));
    assert_eq!(home.field().sound_follow(), None);

    // the camera has not moved yet, so the same pixel still hits it
    let again = home.click(px.x, px.y, 0.0);
    assert_eq!(
        again,
        Some(BubbleAction::Close {
            camera_to: HOME_CAMERA_POSITION
        })
    );
    assert_eq!(home.field().active(), None);
}

#[test]
fn the_music_bubble_opens_the_sound_panel() {
    let mut home = home_with_bubbles();
    let px = aim(&home, SOUND_BUBBLE);
    match home.click(px.x, px.y, 0.0) {
        Some(BubbleAction::OpenSound { index, .. }) => assert_eq!(index, SOUND_BUBBLE),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(home.field().sound_follow(), Some(SOUND_BUBBLE));
}

#[test]
fn camera_tween_settles_on_the_focus_point() {
    let mut home = home_with_bubbles();
    let px = aim(&home, 4);
    let Some(BubbleAction::OpenInfo { camera_to, .. }) = home.click(px.x, px.y, 1.0) else {
        panic!("expected info");
    };
    home.tick(1.5, 0.5, None);
    assert_ne!(home.camera.position, camera_to);
    home.tick(2.2, 1.2, None);
    assert!(home.camera.position.abs_diff_eq(camera_to, 1e-5));
}

#[test]
fn hovering_a_bubble_is_reported() {
    let mut home = home_with_bubbles();
    let px = aim(&home, 4);
    home.pointer_moved(px.x, px.y);
    home.tick(0.0, 0.0, None);
    assert_eq!(home.hovered(), Some(4));
    home.pointer_moved(2.0, 2.0);
    home.tick(0.016, 0.016, None);
    assert_eq!(home.hovered(), None);
}

#[test]
fn missing_the_bubbles_does_nothing() {
    let mut home = home_with_bubbles();
    assert!(home.click(2.0, 2.0, 0.0).is_none());
    assert_eq!(home.field().active(), None);
}

#[test]
fn call_to_action_needs_a_real_target() {
    assert!(!has_call_to_action(""));
    assert!(!has_call_to_action("#"));
    assert!(has_call_to_action("./html/pages/about.html"));
}

#[test]
fn audio_level_is_the_mean_bin() {
    assert_eq!(audio_level(&[]), 0.0);
    assert_eq!(audio_level(&[255; 16]), 1.0);
    assert!((audio_level(&[0, 255]) - 0.5).abs() < 1e-6);
}

#[test]
fn overlays_are_clamped_into_the_viewport() {
    let viewport = Vec2::new(1000.0, 800.0);
    let p = info_box_position(1, Vec2::new(900.0, 0.0), viewport);
    assert_eq!(p, Vec2::new(680.0, 80.0));
    let p = info_box_position(4, Vec2::new(-500.0, 5000.0), viewport);
    assert_eq!(p, Vec2::new(20.0, 640.0));

    // the sound panel may hang past the right edge
    let p = sound_panel_position(SOUND_BUBBLE, Vec2::new(2000.0, 0.0), viewport);
    assert_eq!(p, Vec2::new(870.0, 560.0));
}
