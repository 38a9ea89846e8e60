use candy_core::carousel::{ease_layout, shortest_delta, CandyPose, Carousel};
use candy_core::constants::{HAND_DRAWN_SLOTS, SHIFT_DURATION_SEC};

fn settle(c: &mut Carousel, now: &mut f64) {
    *now += SHIFT_DURATION_SEC + 0.01;
    c.advance(*now);
    assert!(!c.is_animating());
}

fn front_count(c: &Carousel) -> usize {
    (0..c.count()).filter(|i| c.slot_of(*i) == 0).count()
}

#[test]
fn exactly_one_entity_in_front_at_every_sample() {
    for n in 1..=8 {
        let mut c = Carousel::new(n);
        let mut now = 0.0;
        for step in [1, -1, 2, -3, 5, 1] {
            c.shift(step, now);
            for k in 0..=10 {
                c.advance(now + SHIFT_DURATION_SEC * k as f64 / 10.0);
                assert_eq!(front_count(&c), 1, "n={n} step={step} k={k}");
            }
            settle(&mut c, &mut now);
            assert_eq!(front_count(&c), 1);
        }
    }
}

#[test]
fn shortest_delta_never_exceeds_half_the_ring() {
    for n in 1..=9usize {
        for cur in 0..n {
            for target in 0..n {
                let d = shortest_delta(cur, target, n);
                assert!(d.unsigned_abs() as usize * 2 <= n, "n={n} {cur}->{target} gave {d}");
                let landed = (cur as i64 + d as i64).rem_euclid(n as i64) as usize;
                assert_eq!(landed, target);
            }
        }
    }
    assert_eq!(shortest_delta(0, 4, 6), -2);
}

#[test]
fn second_shift_is_ignored_while_animating() {
    let mut c = Carousel::new(6);
    assert!(c.shift(1, 0.0));
    assert!(!c.shift(1, 0.1));
    assert_eq!(c.shift_to(3, 0.2), None);
    c.advance(0.25);
    assert!(c.is_animating());
    assert!((c.rotation_index() - 0.5).abs() < 1e-9);
    c.advance(0.6);
    assert!(!c.is_animating());
    assert_eq!(c.rotation_index(), 1.0);
}

#[test]
fn completion_snaps_modulo_count() {
    let mut c = Carousel::new(6);
    let mut now = 0.0;
    c.shift(-1, now);
    settle(&mut c, &mut now);
    assert_eq!(c.rotation_index(), 5.0);
    assert_eq!(c.front_index(), 5);

    c.shift(3, now);
    settle(&mut c, &mut now);
    assert_eq!(c.rotation_index(), 2.0);
    assert_eq!(c.rotation_index().fract(), 0.0);
}

#[test]
fn three_single_steps_then_return_to_start() {
    let mut c = Carousel::new(6);
    let mut now = 0.0;
    for _ in 0..3 {
        assert!(c.shift(1, now));
        settle(&mut c, &mut now);
    }
    assert_eq!(c.rotation_index(), 3.0);

    // exactly half the ring resolves forward
    assert_eq!(c.shift_to(0, now), Some(3));
    settle(&mut c, &mut now);
    assert_eq!(c.rotation_index(), 0.0);
    assert_eq!(c.front_index(), 0);
}

#[test]
fn shift_to_front_entity_is_a_no_op() {
    let mut c = Carousel::new(6);
    assert_eq!(c.shift_to(0, 0.0), None);
    assert!(!c.is_animating());
}

#[test]
fn zero_duration_completes_on_first_advance() {
    let mut c = Carousel::new(4).with_duration(0.0);
    c.shift(2, 1.0);
    c.advance(1.0);
    assert_eq!(c.rotation_index(), 2.0);
    assert!(!c.is_animating());
}

#[test]
fn layout_eases_toward_slot_targets() {
    let c = Carousel::new(6);
    let mut poses: Vec<CandyPose> = (0..6).map(|_| CandyPose::at_slot(&HAND_DRAWN_SLOTS[3], 0.0)).collect();
    for _ in 0..200 {
        ease_layout(&c, &HAND_DRAWN_SLOTS, &mut poses, |_| 1.0, 0.0);
    }
    let front = &poses[0];
    let target = HAND_DRAWN_SLOTS[0];
    assert!((front.position.x - target.position[0]).abs() < 1e-3);
    assert!((front.scale - target.scale).abs() < 1e-3);
    // the front entity keeps spinning, the others settle
    assert!(front.spin_y > 1.0);
    assert!(poses[1].spin_y.abs() < 1e-6);
}

#[test]
fn scale_bias_adjusts_target() {
    let c = Carousel::new(6);
    let mut poses: Vec<CandyPose> = (0..6).map(|i| CandyPose::at_slot(&HAND_DRAWN_SLOTS[i], 0.0)).collect();
    for _ in 0..300 {
        ease_layout(&c, &HAND_DRAWN_SLOTS, &mut poses, |i| if i == 1 { 0.9 } else { 1.0 }, 0.0);
    }
    let slot = c.slot_of(1);
    assert!((poses[1].scale - HAND_DRAWN_SLOTS[slot].scale * 0.9).abs() < 1e-3);
}
