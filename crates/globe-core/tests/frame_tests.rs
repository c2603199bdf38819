// Frame driver behavior against a recording sink.

use globe_core::camera::Camera;
use globe_core::controls::Command;
use globe_core::frame::*;
use globe_core::geometry::Axis;
use globe_core::globe::{Globe, GlobeConfig};
use globe_core::scene::Scene;
use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
struct RecordingSink {
    scenes: usize,
    elements: usize,
    gizmo_poses: Vec<Quat>,
    readouts: Vec<AngleReadout>,
}

impl FrameSink for RecordingSink {
    fn draw_scene(&mut self, scene: &Scene, _camera: &Camera, _orientation: Quat, _bg: [f32; 3]) {
        self.scenes += 1;
        self.elements = scene.len();
    }
    fn draw_gizmo(&mut self, _gizmo: &Scene, pose: Quat) {
        self.gizmo_poses.push(pose);
    }
    fn show_readout(&mut self, readout: &AngleReadout) {
        self.readouts.push(*readout);
    }
}

fn globe() -> Globe {
    Globe::new(GlobeConfig::default()).expect("globe mounts")
}

#[test]
fn every_tick_draws_scene_and_gizmo() {
    let mut g = globe();
    let mut driver = FrameDriver::default();
    let mut sink = RecordingSink::default();
    for i in 0..5 {
        driver.tick(&mut g, i as f64 * 0.001, &mut sink);
    }
    assert_eq!(sink.scenes, 5);
    assert_eq!(sink.gizmo_poses.len(), 5);
    assert_eq!(sink.elements, g.scene().len());
}

#[test]
fn readout_is_throttled_and_needs_a_real_change() {
    let mut g = globe();
    let mut rng = StdRng::seed_from_u64(5);
    let mut driver = FrameDriver::default();
    let mut sink = RecordingSink::default();

    driver.tick(&mut g, 0.0, &mut sink);
    assert_eq!(sink.readouts.len(), 1);

    // Inside the refresh interval nothing is measured.
    g.apply(Command::RotateBy { axis: Axis::X, sign: 1.0 }, &mut rng);
    driver.tick(&mut g, 0.01, &mut sink);
    assert_eq!(sink.readouts.len(), 1);

    // Due and changed.
    driver.tick(&mut g, 0.1, &mut sink);
    assert_eq!(sink.readouts.len(), 2);

    // Due but unchanged.
    driver.tick(&mut g, 0.2, &mut sink);
    assert_eq!(sink.readouts.len(), 2);
    assert_eq!(driver.readout(), sink.readouts.last());
}

#[test]
fn gizmo_pose_follows_the_mode() {
    let mut g = globe();
    let mut rng = StdRng::seed_from_u64(5);
    let mut driver = FrameDriver::default();
    let mut sink = RecordingSink::default();

    driver.tick(&mut g, 0.0, &mut sink);
    let view = g.orbit().camera().view_rotation();
    let q = g.orientation().quat();
    assert!(sink.gizmo_poses[0].dot(view * q).abs() > 1.0 - 1e-5);

    g.apply(Command::ToggleGizmoMode, &mut rng);
    driver.tick(&mut g, 0.001, &mut sink);
    let view = g.orbit().camera().view_rotation();
    assert!(sink.gizmo_poses[1].dot(view).abs() > 1.0 - 1e-5);
}

#[test]
fn readout_measures_axis_angles_to_the_camera() {
    let camera = Camera {
        eye: Vec3::new(0.0, 0.0, 5.0),
        ..Camera::default()
    };
    let r = AngleReadout::measure(Quat::IDENTITY, &camera);
    assert!((r.degrees[0] - 90.0).abs() < 1e-3);
    assert!((r.degrees[1] - 90.0).abs() < 1e-3);
    assert!(r.degrees[2].abs() < 1e-2);

    let turned = AngleReadout::measure(Quat::from_rotation_y(std::f32::consts::PI), &camera);
    assert!((turned.degrees[2] - 180.0).abs() < 0.1);
}

#[test]
fn changed_beyond_uses_a_strict_threshold() {
    let a = AngleReadout {
        degrees: [10.0, 20.0, 30.0],
    };
    let b = AngleReadout {
        degrees: [10.05, 20.0, 30.0],
    };
    let c = AngleReadout {
        degrees: [10.0, 20.0, 30.5],
    };
    assert!(!a.changed_beyond(&b, 0.1));
    assert!(a.changed_beyond(&c, 0.1));
}

#[test]
fn orbit_damping_settles() {
    let mut g = globe();
    let mut driver = FrameDriver::default();
    let mut sink = RecordingSink::default();
    g.orbit_mut().drag(200.0, 0.0, 600.0);
    let start = g.orbit().camera().eye;
    for i in 0..400 {
        driver.tick(&mut g, i as f64 / 60.0, &mut sink);
    }
    let eye = g.orbit().camera().eye;
    assert!(eye.distance(start) > 0.1);
    assert!(!g.orbit_mut().update(), "motion should have decayed");
}
