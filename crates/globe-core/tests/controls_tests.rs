use globe_core::constants::*;
use globe_core::controls::*;
use globe_core::frame::GizmoMode;
use globe_core::geometry::Axis;
use globe_core::globe::{Globe, GlobeConfig};
use globe_core::theme::Theme;
use glam::Quat;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn globe() -> Globe {
    Globe::new(GlobeConfig::default()).expect("globe mounts")
}

#[test]
fn params_clamp_to_their_ranges() {
    let mut p = Params::default();
    assert_eq!(p.set(Param::ContactAngle, 120.0), CONTACT_ANGLE_RANGE.1);
    assert_eq!(p.set(Param::ContactAngle, -5.0), CONTACT_ANGLE_RANGE.0);
    assert_eq!(p.set(Param::IntersectionAngle, 91.0), 90.0);
    assert_eq!(p.set(Param::ArcLengthScale, 250.0), 200.0);
    assert_eq!(p.set(Param::RotationStep, 0.0), ROTATION_STEP_RANGE.0);
}

#[test]
fn non_finite_input_is_ignored() {
    let mut p = Params::default();
    assert_eq!(p.set(Param::ContactAngle, f32::NAN), DEFAULT_CONTACT_ANGLE_DEG);
    assert_eq!(
        p.set(Param::ArcLengthScale, f32::INFINITY),
        DEFAULT_ARC_LENGTH_SCALE_PCT
    );
}

#[test]
fn defaults_are_inside_their_ranges() {
    let p = Params::default();
    for param in Param::ALL {
        let (lo, hi) = param.range();
        let v = p.get(param);
        assert!(v >= lo && v <= hi, "{} = {v}", param.label());
    }
}

#[test]
fn nudges_use_the_matching_step() {
    let mut p = Params::default();
    let v = p.nudge(Param::ContactAngle, 1.0);
    assert!((v - (DEFAULT_CONTACT_ANGLE_DEG + DEFAULT_CONTACT_STEP_DEG)).abs() < 1e-5);

    p.nudge(Param::ContactStep, 1.0);
    assert!((p.contact_step_deg - 0.6).abs() < 1e-5);
    let before = p.contact_angle_deg;
    p.nudge(Param::ContactAngle, -1.0);
    assert!((p.contact_angle_deg - (before - 0.6)).abs() < 1e-4);

    let v = p.nudge(Param::IntersectionAngle, -100.0);
    assert_eq!(v, INTERSECTION_ANGLE_RANGE.0);
}

#[test]
fn rotate_command_uses_the_rotation_step() {
    let mut g = globe();
    let mut rng = StdRng::seed_from_u64(3);
    g.apply(Command::Set(Param::RotationStep, 30.0), &mut rng);
    assert!(g.apply(Command::RotateBy { axis: Axis::Y, sign: 1.0 }, &mut rng));
    let expected = default_orientation() * Quat::from_rotation_y(30_f32.to_radians());
    assert!(g.orientation().quat().dot(expected).abs() > 1.0 - 1e-5);
}

#[test]
fn setting_the_same_value_changes_nothing() {
    let mut g = globe();
    let mut rng = StdRng::seed_from_u64(3);
    let disk = g.overlays().plane_disks[0];
    let gen = g.scene().get(disk).generation();
    assert!(!g.apply(
        Command::Set(Param::ContactAngle, DEFAULT_CONTACT_ANGLE_DEG),
        &mut rng
    ));
    assert_eq!(g.scene().get(disk).generation(), gen);

    assert!(g.apply(Command::Set(Param::ContactAngle, 45.0), &mut rng));
    assert_eq!(g.scene().get(disk).generation(), gen + 1);
}

#[test]
fn step_changes_leave_geometry_alone() {
    let mut g = globe();
    let mut rng = StdRng::seed_from_u64(3);
    let arc = g.overlays().arc_curve;
    let gen = g.scene().get(arc).generation();
    assert!(g.apply(Command::Nudge(Param::IntersectionStep, 1.0), &mut rng));
    assert_eq!(g.scene().get(arc).generation(), gen);
    assert!(g.apply(Command::Nudge(Param::IntersectionAngle, 1.0), &mut rng));
    assert_eq!(g.scene().get(arc).generation(), gen + 1);
    assert!((g.params().intersection_angle_deg - 31.5).abs() < 1e-4);
}

#[test]
fn reset_all_restores_mount_state_but_keeps_theme() {
    let mut g = globe();
    let mut rng = StdRng::seed_from_u64(9);
    g.apply(Command::Set(Param::ContactAngle, 10.0), &mut rng);
    g.apply(Command::Set(Param::ArcLengthScale, 150.0), &mut rng);
    g.apply(Command::RotateBy { axis: Axis::X, sign: -1.0 }, &mut rng);
    g.apply(Command::ToggleTheme, &mut rng);
    g.apply(Command::ToggleGizmoMode, &mut rng);
    g.apply(Command::ToggleBackFaces(BackFaceTarget::Equator), &mut rng);
    g.orbit_mut().drag(120.0, 40.0, 600.0);
    for _ in 0..30 {
        g.orbit_mut().update();
    }

    assert!(g.apply(Command::ResetAll, &mut rng));
    assert_eq!(g.params(), &Params::default());
    assert_eq!(g.orientation().quat(), g.orientation().default_pose());
    assert_eq!(g.gizmo_mode(), GizmoMode::Globe);
    assert!(!g.back_faces_visible(BackFaceTarget::Equator));
    assert_eq!(g.theme(), Theme::Light);
    assert_eq!(g.orbit().camera().eye, camera_eye_vec3());
    let equator = g.scene().get(g.overlays().equator);
    assert!(equator.material().depth_test);
}

#[test]
fn reset_orientation_also_resets_the_camera() {
    let mut g = globe();
    let mut rng = StdRng::seed_from_u64(9);
    g.apply(Command::RotateBy { axis: Axis::Z, sign: 1.0 }, &mut rng);
    g.orbit_mut().drag(-80.0, 10.0, 600.0);
    g.orbit_mut().update();
    assert_ne!(g.orbit().camera().eye, camera_eye_vec3());
    g.apply(Command::ResetOrientation, &mut rng);
    assert_eq!(g.orientation().quat(), g.orientation().default_pose());
    assert_eq!(g.orbit().camera().eye, camera_eye_vec3());
}

#[test]
fn orbit_reset_returns_to_the_saved_pose() {
    let mut g = globe();
    g.orbit_mut().drag(60.0, -30.0, 600.0);
    for _ in 0..10 {
        g.orbit_mut().update();
    }
    g.orbit_mut().save_state();
    let saved = g.orbit().camera().eye;

    g.orbit_mut().dolly(-4.0);
    g.orbit_mut().update();
    assert!(g.orbit().camera().eye.length() > saved.length());
    g.orbit_mut().reset();
    assert_eq!(g.orbit().camera().eye, saved);
}

#[test]
fn theme_toggle_recolors_scene_and_gizmo() {
    let mut g = globe();
    let mut rng = StdRng::seed_from_u64(0);
    g.apply(Command::ToggleTheme, &mut rng);
    let light = Theme::Light.palette();
    let sphere = g.scene().get(g.overlays().sphere);
    assert_eq!(sphere.material().color, light.sphere);
    let tip = g.gizmo().lookup("gizmo_tip_x").unwrap();
    assert_eq!(g.gizmo().get(tip).material().color, light.axis(Axis::X));
    g.apply(Command::ToggleTheme, &mut rng);
    assert_eq!(g.theme(), Theme::Dark);
}

#[test]
fn random_front_rotation_through_the_context() {
    let mut g = globe();
    let mut rng = StdRng::seed_from_u64(1234);
    let to_camera = g.orbit().camera().to_camera();
    if g.apply(Command::RandomFrontRotation, &mut rng) {
        let facing = g.orientation().quat() * front_reference_vec3();
        assert!(facing.dot(to_camera) > FRONT_DOT_THRESHOLD);
    }
}

#[test]
fn unmount_releases_every_buffer() {
    let mut g = globe();
    g.unmount();
    assert!(g.scene().iter().all(|(_, e)| e.geometry().is_empty()));
    assert!(g.gizmo().iter().all(|(_, e)| e.geometry().is_empty()));
}

#[test]
fn commands_after_unmount_are_ignored() {
    let mut g = globe();
    let mut rng = StdRng::seed_from_u64(11);
    g.unmount();
    assert!(!g.is_mounted());
    for param in Param::ALL {
        let (lo, hi) = param.range();
        assert!(!g.apply(Command::Set(param, (lo + hi) * 0.5), &mut rng));
        assert!(!g.apply(Command::Nudge(param, 1.0), &mut rng));
    }
    assert!(!g.apply(Command::ResetAll, &mut rng));
    assert!(!g.apply(Command::ToggleTheme, &mut rng));
    assert!(!g.apply(
        Command::RotateBy {
            axis: Axis::X,
            sign: 1.0
        },
        &mut rng
    ));
    assert!(g.scene().iter().all(|(_, e)| e.geometry().is_empty()));
    assert!(g.gizmo().iter().all(|(_, e)| e.geometry().is_empty()));
}
