// Scene arena and overlay update rules.

use globe_core::constants::*;
use globe_core::controls::{BackFaceTarget, Params};
use globe_core::error::GlobeError;
use globe_core::geometry::*;
use globe_core::gpu::draw_rank;
use globe_core::overlays::*;
use globe_core::scene::*;
use globe_core::theme::Theme;
use glam::Vec3;

const EPS: f32 = 1e-4;

fn mounted() -> (Scene, OverlayHandles) {
    build_scene(
        &SphereParams::default(),
        &Params::default(),
        &Theme::Dark.palette(),
    )
    .expect("scene builds")
}

#[test]
fn duplicate_names_are_rejected() {
    let mut scene = Scene::new();
    let g = || Geometry::segment(Vec3::ZERO, Vec3::X);
    scene
        .add("a", Role::Equator, g(), Material::line([1.0; 3]))
        .unwrap();
    let err = scene
        .add("a", Role::Equator, g(), Material::line([1.0; 3]))
        .unwrap_err();
    assert_eq!(err, GlobeError::DuplicateElement("a".into()));
}

#[test]
fn unknown_lookup_is_a_typed_error() {
    let (scene, _) = mounted();
    assert!(scene.lookup("equator").is_ok());
    assert_eq!(
        scene.lookup("nope"),
        Err(GlobeError::UnknownElement("nope".into()))
    );
}

#[test]
fn polyline_indices_and_distances() {
    let pts = circle_points(1.0, Axis::Y, 0.0, 12);
    let closed = Geometry::polyline(pts.clone(), true);
    assert_eq!(closed.indices().len(), 24);
    let open = Geometry::polyline(pts, false);
    assert_eq!(open.indices().len(), 22);
    assert_eq!(open.line_distances()[0], 0.0);
    assert!(open.line_distances().windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn replace_bumps_generation_and_update_bumps_version() {
    let mut scene = Scene::new();
    let id = scene
        .add(
            "seg",
            Role::GuideLine,
            Geometry::segment(Vec3::ZERO, Vec3::X),
            Material::line([1.0; 3]),
        )
        .unwrap();
    scene.update_geometry(id, |g| g.set_segment(Vec3::ZERO, Vec3::Y));
    assert_eq!(scene.get(id).version(), 1);
    assert_eq!(scene.get(id).generation(), 0);
    assert_eq!(scene.get(id).geometry().positions()[1], Vec3::Y);

    scene.replace_geometry(id, Geometry::segment(Vec3::X, Vec3::Z));
    assert_eq!(scene.get(id).generation(), 1);
    assert_eq!(scene.get(id).geometry().positions()[0], Vec3::X);
}

#[test]
fn release_frees_every_buffer() {
    let (mut scene, _) = mounted();
    scene.release();
    assert!(scene.iter().all(|(_, e)| e.geometry().is_empty()));
}

#[test]
fn contact_markers_sit_at_the_plane_offsets() {
    let (scene, h) = mounted();
    let g = contact_plane_geometry(DEFAULT_CONTACT_ANGLE_DEG, SPHERE_RADIUS);
    let d = g.plane_offset * SURFACE_OFFSET;
    let ys: Vec<f32> = h
        .contact_markers
        .iter()
        .map(|id| scene.get(*id).position().y)
        .collect();
    assert!((ys[0] - d).abs() < EPS && (ys[1] - d).abs() < EPS);
    assert!((ys[2] + d).abs() < EPS && (ys[3] + d).abs() < EPS);
}

#[test]
fn intersection_dots_lie_on_the_overlay_sphere() {
    let (scene, h) = mounted();
    let ro = SPHERE_RADIUS * SURFACE_OFFSET;
    for (k, id) in h.intersection_dots.iter().enumerate() {
        let p = scene.get(*id).position();
        if k % 5 == 0 {
            assert!(p.x == 0.0 && p.z == 0.0, "center dot on the Y axis");
        } else {
            assert!((p.length() - ro).abs() < EPS, "dot {k} at {p}");
        }
    }
}

#[test]
fn contact_change_replaces_planes_and_moves_rings() {
    let sphere = SphereParams::default();
    let (mut scene, h) = mounted();
    let disk_gen = scene.get(h.plane_disks[0]).generation();
    let ring_ver = scene.get(h.intersection_rings[1]).version();
    let ring_len = scene.get(h.intersection_rings[1]).geometry().positions().len();

    apply_contact_angle(&mut scene, &h, &sphere, 45.0);

    assert_eq!(scene.get(h.plane_disks[0]).generation(), disk_gen + 1);
    assert_eq!(scene.get(h.caps[1]).generation(), disk_gen + 1);
    let ring = scene.get(h.intersection_rings[1]);
    assert_eq!(ring.version(), ring_ver + 1);
    assert_eq!(ring.geometry().positions().len(), ring_len);

    let d = 1.5 * 45_f32.to_radians().cos();
    assert!((scene.get(h.plane_disks[0]).position().y - d).abs() < EPS);
    assert!((scene.get(h.plane_disks[1]).position().y + d).abs() < EPS);
    assert!(ring
        .geometry()
        .positions()
        .iter()
        .all(|p| (p.y + d * SURFACE_OFFSET).abs() < EPS));
}

#[test]
fn dashed_chords_span_the_intersection_circle() {
    let (scene, h) = mounted();
    let g = contact_plane_geometry(DEFAULT_CONTACT_ANGLE_DEG, SPHERE_RADIUS);
    for id in h.intersection_lines {
        let el = scene.get(id);
        assert!(el.material().dash.is_some());
        let p = el.geometry().positions();
        let len = p[0].distance(p[1]);
        assert!((len - 2.0 * g.intersection_radius * SURFACE_OFFSET).abs() < EPS);
    }
}

#[test]
fn parallel_guides_drop_to_the_south_pole_latitude() {
    let sphere = SphereParams::default();
    let (mut scene, h) = mounted();
    apply_intersection_angle(&mut scene, &h, &sphere, 40.0);
    for (k, id) in h.parallel_guides.iter().enumerate() {
        let p = scene.get(*id).geometry().positions();
        let contact = scene.get(h.equator_contacts[k]).position();
        assert!(p[0].distance(contact) < EPS);
        assert!((p[1].y + SPHERE_RADIUS * SURFACE_OFFSET).abs() < EPS);
        assert!((p[1].x - p[0].x).abs() < EPS && (p[1].z - p[0].z).abs() < EPS);
    }
}

#[test]
fn arc_scale_moves_guide_dots_and_line_end() {
    let (mut scene, h) = mounted();
    apply_arc_length_scale(&mut scene, &h, 50.0);
    let first = scene.get(h.guide_dots[0]).position();
    assert!((first.y - (h.guide_origin.y - h.base_arc_length * 0.5)).abs() < EPS);

    let line = scene.get(h.guide_line).geometry().positions();
    assert_eq!(line[0], h.guide_origin);
    assert!((line[1].y - (h.guide_origin.y - h.base_arc_length)).abs() < EPS);
}

#[test]
fn back_faces_toggle_depth_testing() {
    let (mut scene, h) = mounted();
    set_back_faces(&mut scene, &h, BackFaceTarget::Meridians, true);
    assert!(h.meridians.iter().all(|id| !scene.get(*id).material().depth_test));
    assert!(scene.get(h.equator).material().depth_test);
    set_back_faces(&mut scene, &h, BackFaceTarget::Meridians, false);
    assert!(h.meridians.iter().all(|id| scene.get(*id).material().depth_test));
}

#[test]
fn palette_swap_keeps_geometry() {
    let (mut scene, h) = mounted();
    let before = scene.get(h.equator).geometry().clone();
    let light = Theme::Light.palette();
    apply_palette(&mut scene, &light);
    assert_eq!(scene.get(h.equator).material().color, light.equator);
    assert_eq!(scene.get(h.equator).geometry(), &before);
    assert_eq!(scene.get(h.equator).generation(), 0);
}

#[test]
fn gizmo_has_three_axes_with_tips() {
    let gizmo = build_gizmo(&Theme::Dark.palette()).unwrap();
    assert_eq!(gizmo.len(), 6);
    let tip = gizmo.lookup("gizmo_tip_y").unwrap();
    assert_eq!(gizmo.get(tip).position(), Vec3::Y);
}

#[test]
fn sphere_draws_before_the_lines_it_hides() {
    let (mut scene, h) = mounted();
    set_back_faces(&mut scene, &h, BackFaceTarget::Equator, false);
    let sphere = draw_rank(scene.get(h.sphere).material());
    let equator = draw_rank(scene.get(h.equator).material());
    assert!(sphere < equator);
    for id in &h.meridians {
        assert!(sphere < draw_rank(scene.get(*id).material()));
    }
    for id in h.caps {
        assert!(sphere < draw_rank(scene.get(id).material()));
    }
}
