mod common;

use candy_core::constants::WRAPPER_DIAGONAL_RATIO;
use candy_core::material::{BasicParams, Material};
use candy_core::model::{center_or_origin, diagonal};
use candy_core::scene::{Scene, Tag};
use candy_core::staging::{candy_subtree, deco_template, wrapper_template, Staging};
use candy_core::{Emotion, NodeId};
use common::{approx, cube_model};
use glam::{Quat, Vec3};

fn tint() -> Material {
    Material::Basic(BasicParams {
        color: [1.0, 0.9, 0.9],
        opacity: 1.0,
    })
}

fn entity_roots(scene: &mut Scene, n: usize) -> Vec<NodeId> {
    (0..n)
        .map(|i| {
            let root = scene.spawn(scene.root(), "entity");
            let node = scene.node_mut(root);
            node.tag = Some(Tag::Entity(i));
            node.transform.translation = Vec3::new(i as f32 * 3.0, 1.0, -2.0);
            node.transform.rotation = Quat::from_rotation_x(170f32.to_radians());
            node.transform.scale = Vec3::splat(0.7);
            root
        })
        .collect()
}

fn candy(scene: &mut Scene, i: usize) -> NodeId {
    // off-centre geometry so the alignment has real work to do
    candy_subtree(
        cube_model(1.0, Vec3::new(0.3, -0.2, 0.1)),
        scene,
        Material::candy_for(Emotion::from_ordinal(i)),
    )
}

fn assert_aligned(scene: &Scene, staging: &Staging, i: usize) {
    let candy_box = scene.bounds(staging.candy(i).expect("candy"));
    let wrapper_box = scene.bounds(staging.wrapper(i).expect("wrapper"));
    let ratio = diagonal(&wrapper_box) / diagonal(&candy_box);
    assert!(approx(ratio, WRAPPER_DIAGONAL_RATIO, 1e-3), "ratio {ratio}");
    let d = center_or_origin(&wrapper_box).distance(center_or_origin(&candy_box));
    assert!(d < 1e-3, "centers apart by {d}");
}

#[test]
fn candy_before_templates_waits_then_attaches() {
    let mut scene = Scene::new();
    let roots = entity_roots(&mut scene, 3);
    let mut staging = Staging::new(&roots);

    for i in 0..3 {
        let c = candy(&mut scene, i);
        let attached = staging.candy_loaded(&mut scene, i, c);
        assert_eq!(attached.wrappers, 0);
    }
    let (ww, wd) = staging.waiting();
    assert_eq!(ww, &[0, 1, 2]);
    assert_eq!(wd, &[0, 1, 2]);
    assert!(!staging.is_complete(0));

    let template = wrapper_template(cube_model(2.0, Vec3::ZERO), &mut scene);
    let attached = staging.wrapper_template_loaded(&mut scene, template);
    assert_eq!(attached.wrappers, 3);
    assert!(staging.waiting().0.is_empty());
    for i in 0..3 {
        assert!(staging.is_complete(i));
        assert_aligned(&scene, &staging, i);
    }

    let deco = deco_template(cube_model(0.2, Vec3::ZERO), &mut scene, tint());
    let attached = staging.deco_template_loaded(&mut scene, deco);
    assert_eq!(attached.decos, 3);
    for i in 0..3 {
        let d = staging.deco(i).expect("deco");
        assert_eq!(scene.node(d).parent(), staging.candy(i));
    }
}

#[test]
fn templates_before_candy_attach_on_arrival() {
    let mut scene = Scene::new();
    let roots = entity_roots(&mut scene, 2);
    let mut staging = Staging::new(&roots);

    let template = wrapper_template(cube_model(2.0, Vec3::ZERO), &mut scene);
    assert_eq!(staging.wrapper_template_loaded(&mut scene, template).wrappers, 0);
    let deco = deco_template(cube_model(0.2, Vec3::ZERO), &mut scene, tint());
    assert_eq!(staging.deco_template_loaded(&mut scene, deco).decos, 0);

    let c = candy(&mut scene, 1);
    let attached = staging.candy_loaded(&mut scene, 1, c);
    assert_eq!(attached.wrappers, 1);
    assert_eq!(attached.decos, 1);
    assert!(staging.is_complete(1));
    assert!(!staging.is_complete(0));
    assert_aligned(&scene, &staging, 1);
}

#[test]
fn both_orders_give_the_same_wrapper_pose() {
    let build = |templates_first: bool| {
        let mut scene = Scene::new();
        let roots = entity_roots(&mut scene, 1);
        let mut staging = Staging::new(&roots);
        let template = wrapper_template(cube_model(2.0, Vec3::ZERO), &mut scene);
        let c = candy(&mut scene, 0);
        if templates_first {
            staging.wrapper_template_loaded(&mut scene, template);
            staging.candy_loaded(&mut scene, 0, c);
        } else {
            staging.candy_loaded(&mut scene, 0, c);
            staging.wrapper_template_loaded(&mut scene, template);
        }
        let w = staging.wrapper(0).expect("wrapper");
        scene.node(w).transform
    };
    let a = build(true);
    let b = build(false);
    assert!(a.translation.abs_diff_eq(b.translation, 1e-5));
    assert!(a.scale.abs_diff_eq(b.scale, 1e-5));
}

#[test]
fn second_candy_arrival_is_ignored() {
    let mut scene = Scene::new();
    let roots = entity_roots(&mut scene, 1);
    let mut staging = Staging::new(&roots);
    let first = candy(&mut scene, 0);
    staging.candy_loaded(&mut scene, 0, first);
    let second = candy(&mut scene, 0);
    staging.candy_loaded(&mut scene, 0, second);
    assert_eq!(staging.candy(0), Some(first));
    assert!(!scene.is_in_scene(second));
    assert_eq!(staging.waiting().0, &[0]);
}

#[test]
fn unknown_entity_is_ignored() {
    let mut scene = Scene::new();
    let roots = entity_roots(&mut scene, 1);
    let mut staging = Staging::new(&roots);
    let c = candy(&mut scene, 0);
    let attached = staging.candy_loaded(&mut scene, 7, c);
    assert_eq!(attached.wrappers + attached.decos, 0);
    assert!(staging.candy(0).is_none());
}

#[test]
fn wrappers_are_independent_clones() {
    let mut scene = Scene::new();
    let roots = entity_roots(&mut scene, 2);
    let mut staging = Staging::new(&roots);
    let template = wrapper_template(cube_model(2.0, Vec3::ZERO), &mut scene);
    staging.wrapper_template_loaded(&mut scene, template);
    for i in 0..2 {
        let c = candy(&mut scene, i);
        staging.candy_loaded(&mut scene, i, c);
    }
    let w0 = staging.wrapper(0).expect("w0");
    let w1 = staging.wrapper(1).expect("w1");
    assert_ne!(w0, w1);
    assert_ne!(w0, template);
    assert!(!scene.is_in_scene(template));
    assert_eq!(staging.wrapper_roots().len(), 2);
}
