mod common;

use candy_core::material::{BasicParams, Material, Side, WrapperParams};
use candy_core::pass::plan_frame;
use candy_core::scene::{Scene, Tag};
use common::cube_mesh;
use glam::{Quat, Vec3};

fn basic() -> Material {
    Material::Basic(BasicParams {
        color: [0.5; 3],
        opacity: 1.0,
    })
}

#[test]
fn bounds_follow_the_node_chain() {
    let mut scene = Scene::new();
    let mesh = scene.add_mesh(cube_mesh(2.0, Vec3::ZERO));
    let parent = scene.spawn(scene.root(), "parent");
    scene.node_mut(parent).transform.translation = Vec3::new(10.0, 0.0, 0.0);
    scene.node_mut(parent).transform.scale = Vec3::splat(2.0);
    let child = scene.spawn_mesh(parent, "child", mesh, basic());
    scene.node_mut(child).transform.translation = Vec3::new(0.0, 1.0, 0.0);

    let b = scene.bounds(parent);
    assert!(b.min.abs_diff_eq(Vec3::new(8.0, 0.0, -2.0), 1e-5));
    assert!(b.max.abs_diff_eq(Vec3::new(12.0, 4.0, 2.0), 1e-5));

    // hidden meshes still count
    scene.set_visible(child, false);
    assert!(scene.bounds(parent).is_valid());
}

#[test]
fn clone_shares_meshes_but_not_transforms() {
    let mut scene = Scene::new();
    let mesh = scene.add_mesh(cube_mesh(1.0, Vec3::ZERO));
    let template = scene.create_detached("tpl");
    scene.spawn_mesh(template, "a", mesh, basic());
    scene.spawn_mesh(template, "b", mesh, basic());

    let copy = scene.clone_subtree(template);
    assert_eq!(scene.mesh_count(), 1);
    assert_eq!(scene.node(copy).children().len(), 2);
    assert!(scene.node(copy).parent().is_none());

    scene.attach(scene.root(), copy);
    scene.node_mut(copy).transform.translation = Vec3::X;
    assert_eq!(scene.node(template).transform.translation, Vec3::ZERO);
    assert!(scene.is_in_scene(copy));
    assert!(!scene.is_in_scene(template));
}

#[test]
fn attach_refuses_cycles() {
    let mut scene = Scene::new();
    let a = scene.spawn(scene.root(), "a");
    let b = scene.spawn(a, "b");
    scene.attach(b, a);
    assert_eq!(scene.node(a).parent(), Some(scene.root()));
    assert!(scene.is_ancestor(a, b));
}

#[test]
fn raycast_returns_nearest_visible_hit() {
    let mut scene = Scene::new();
    let mesh = scene.add_mesh(cube_mesh(1.0, Vec3::ZERO));
    let near = scene.spawn_mesh(scene.root(), "near", mesh, basic());
    scene.node_mut(near).transform.translation = Vec3::new(0.0, 0.0, 2.0);
    let far = scene.spawn_mesh(scene.root(), "far", mesh, basic());
    scene.node_mut(far).transform.translation = Vec3::new(0.0, 0.0, -2.0);
    scene.node_mut(far).transform.scale = Vec3::splat(3.0);

    let roots = [near, far];
    let origin = Vec3::new(0.1, 0.05, 10.0);
    let dir = -Vec3::Z;
    let hit = scene.raycast(origin, dir, &roots).expect("hit");
    assert_eq!(hit.node, near);
    assert!((hit.distance - 7.5).abs() < 1e-4);

    scene.set_visible(near, false);
    let hit = scene.raycast(origin, dir, &roots).expect("hit");
    assert_eq!(hit.node, far);
    // scaled node: distance is still measured in world units
    assert!((hit.distance - 10.5).abs() < 1e-4);

    assert!(scene.raycast(origin, Vec3::Z, &roots).is_none());
}

#[test]
fn hits_resolve_to_the_tagged_ancestor() {
    let mut scene = Scene::new();
    let mesh = scene.add_mesh(cube_mesh(1.0, Vec3::ZERO));
    let entity = scene.spawn(scene.root(), "entity");
    scene.node_mut(entity).tag = Some(Tag::Entity(4));
    let inner = scene.spawn(entity, "inner");
    scene.node_mut(inner).transform.rotation = Quat::from_rotation_y(0.7);
    let leaf = scene.spawn_mesh(inner, "leaf", mesh, basic());

    let hit = scene.raycast(Vec3::new(0.1, 0.05, 5.0), -Vec3::Z, &[entity]).expect("hit");
    assert_eq!(hit.node, leaf);
    match scene.tagged_ancestor(hit.node) {
        Some((id, Tag::Entity(4))) => assert_eq!(id, entity),
        other => panic!("unexpected tag {other:?}"),
    }
    let untagged = scene.spawn(scene.root(), "plain");
    assert!(scene.tagged_ancestor(untagged).is_none());
}

#[test]
fn draw_list_is_sorted_by_render_order() {
    let mut scene = Scene::new();
    let mesh = scene.add_mesh(cube_mesh(1.0, Vec3::ZERO));
    let a = scene.spawn_mesh(scene.root(), "a", mesh, basic());
    let b = scene.spawn_mesh(scene.root(), "b", mesh, basic());
    let c = scene.spawn_mesh(scene.root(), "c", mesh, basic());
    scene.node_mut(a).render_order = 21;
    scene.node_mut(b).render_order = 10;
    scene.node_mut(c).render_order = 20;
    let order: Vec<_> = scene.draw_list().iter().map(|d| d.node).collect();
    assert_eq!(order, vec![b, c, a]);
}

#[test]
fn refractive_subtrees_are_hidden_only_offscreen() {
    let mut scene = Scene::new();
    let mesh = scene.add_mesh(cube_mesh(1.0, Vec3::ZERO));
    let candy = scene.spawn_mesh(scene.root(), "candy", mesh, basic());
    let shell = scene.spawn(scene.root(), "shell");
    scene.spawn_mesh(
        shell,
        "back",
        mesh,
        Material::Wrapper(WrapperParams::new(0.12, Side::Back)),
    );

    let plan = plan_frame(&mut scene, &[shell], true);
    assert!(plan.is_two_pass());
    let off = plan.offscreen.as_ref().expect("offscreen");
    assert_eq!(off.len(), 1);
    assert_eq!(off[0].node, candy);
    assert_eq!(plan.onscreen.len(), 2);
    assert!(scene.node(shell).visible);

    let single = plan_frame(&mut scene, &[shell], false);
    assert!(!single.is_two_pass());
    assert_eq!(single.onscreen.len(), 2);

    let none = plan_frame(&mut scene, &[], true);
    assert!(!none.is_two_pass());
}
