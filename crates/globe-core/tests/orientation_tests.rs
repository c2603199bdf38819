use globe_core::constants::*;
use globe_core::geometry::Axis;
use globe_core::orientation::*;
use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn same_rotation(a: Quat, b: Quat) -> bool {
    a.dot(b).abs() > 1.0 - 1e-5
}

#[test]
fn starts_at_the_default_pose() {
    let o = Orientation::default();
    assert_eq!(o.quat(), default_orientation().normalize());
    assert_eq!(o.default_pose(), o.quat());
}

#[test]
fn increments_post_multiply() {
    let mut o = Orientation::default();
    o.rotate_by(Axis::X, 1.0, 90.0);
    let expected = default_orientation() * Quat::from_rotation_x(90_f32.to_radians());
    assert!(same_rotation(o.quat(), expected));

    o.rotate_by(Axis::Y, -1.0, 30.0);
    let expected = expected * Quat::from_rotation_y(-30_f32.to_radians());
    assert!(same_rotation(o.quat(), expected));
}

#[test]
fn four_quarter_turns_come_back() {
    let mut o = Orientation::default();
    for _ in 0..4 {
        o.rotate_by(Axis::Z, 1.0, 90.0);
    }
    assert!(same_rotation(o.quat(), o.default_pose()));
}

#[test]
fn stays_unit_length_after_many_steps() {
    let mut o = Orientation::default();
    for i in 0..5000 {
        let axis = Axis::ALL[i % 3];
        o.rotate_by(axis, if i % 7 == 0 { -1.0 } else { 1.0 }, 13.0);
    }
    assert!((o.quat().length() - 1.0).abs() < 1e-5);
}

#[test]
fn reset_restores_default_exactly() {
    let mut o = Orientation::default();
    o.rotate_by(Axis::X, 1.0, 15.0);
    o.rotate_by(Axis::Y, -1.0, 45.0);
    o.reset();
    assert_eq!(o.quat(), o.default_pose());
}

#[test]
fn random_front_rotation_faces_the_camera_or_does_nothing() {
    let mut rng = StdRng::seed_from_u64(42);
    let to_camera = camera_eye_vec3().normalize();
    let mut o = Orientation::default();
    let mut accepted = 0;
    for _ in 0..1000 {
        let before = o.quat();
        if o.random_front_rotation(&mut rng, to_camera) {
            accepted += 1;
            assert!(front_alignment(o.quat(), to_camera) > FRONT_DOT_THRESHOLD);
        } else {
            assert_eq!(o.quat(), before);
        }
        assert!((o.quat().length() - 1.0).abs() < 1e-5);
    }
    assert!(accepted > 0);
}

#[test]
fn random_front_rotation_gives_up_silently() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut o = Orientation::default();
    o.rotate_by(Axis::X, 1.0, 10.0);
    let before = o.quat();
    // A zero direction can never clear the threshold.
    assert!(!o.random_front_rotation(&mut rng, Vec3::ZERO));
    assert_eq!(o.quat(), before);
}

#[test]
fn random_rotation_is_unit() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..200 {
        assert!((random_rotation(&mut rng).length() - 1.0).abs() < 1e-4);
    }
}
