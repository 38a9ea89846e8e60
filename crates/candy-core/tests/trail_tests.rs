use candy_core::camera::Camera;
use candy_core::constants::MAX_TRAIL_POINTS;
use candy_core::trail::{build_ribbon, ribbon_for, Trail};
use glam::Vec3;

#[test]
fn trail_never_exceeds_capacity() {
    let mut t = Trail::default();
    for i in 0..100 {
        t.push(i as f32, 0.0);
        assert!(t.len() <= MAX_TRAIL_POINTS);
    }
    assert_eq!(t.len(), MAX_TRAIL_POINTS);
}

#[test]
fn oldest_samples_are_evicted_first() {
    let mut t = Trail::new(22);
    for i in 0..30 {
        t.push(i as f32, 0.0);
    }
    let xs: Vec<f32> = t.points().map(|p| p.x).collect();
    assert_eq!(xs.first().copied(), Some(29.0));
    assert_eq!(xs.last().copied(), Some(8.0));
}

#[test]
fn points_follow_their_predecessor_and_fade() {
    let mut t = Trail::new(4);
    t.push(0.0, 0.0);
    t.push(100.0, 50.0);
    t.step();
    let pts: Vec<_> = t.points().copied().collect();
    assert_eq!(pts[0].x, 100.0);
    assert_eq!(pts[0].life, 1.0);
    assert!(pts[1].x > 0.0 && pts[1].x < 100.0);
    assert!(pts[1].life < 1.0);
}

#[test]
fn dead_points_are_removed() {
    let mut t = Trail::new(8);
    for i in 0..8 {
        t.push(i as f32 * 10.0, 0.0);
    }
    for _ in 0..200 {
        t.step();
    }
    // only the head is refreshed by the pointer; everything behind it dies out
    assert_eq!(t.len(), 1);
    assert_eq!(t.alive_count(), 1);
}

#[test]
fn ribbon_has_two_vertices_per_alive_point() {
    let mut camera = Camera::new(Vec3::new(0.0, 1.5, 17.0), 45.0, 1.0);
    camera.set_viewport(800.0, 600.0);
    let mut t = Trail::default();
    for i in 0..12 {
        t.push(100.0 + i as f32 * 20.0, 300.0 + i as f32 * 5.0);
    }
    t.step();
    let strip = ribbon_for(&t, &camera, 800.0, 600.0);
    assert_eq!(strip.vertex_count(), 2 * t.alive_count());
    assert_eq!(strip.uvs.len(), strip.positions.len());
    assert_eq!(strip.indices.len(), 6 * (t.alive_count() - 1));
}

#[test]
fn ribbon_ends_have_zero_width() {
    let pts: Vec<Vec3> = (0..6).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
    let strip = build_ribbon(&pts, Vec3::new(2.5, 0.0, 10.0), 0.65);
    let n = strip.positions.len();
    assert_eq!(strip.positions[0], strip.positions[1]);
    assert_eq!(strip.positions[n - 2], strip.positions[n - 1]);
    // the middle is wide
    let a = Vec3::from(strip.positions[6]);
    let b = Vec3::from(strip.positions[7]);
    assert!(a.distance(b) > 0.5);
}

#[test]
fn short_trails_produce_no_ribbon() {
    assert!(build_ribbon(&[], Vec3::Z, 1.0).is_empty());
    assert!(build_ribbon(&[Vec3::ZERO], Vec3::Z, 1.0).is_empty());
}
