//! Builds the globe's overlay elements once and applies parameter changes
//! to them.
//!
//! Each `apply_*` function recomputes one family of geometry through the
//! kernel and writes it into existing elements. Plane disks, caps and the
//! intersection arc get fresh buffers; everything else moves in place.

use crate::constants::*;
use crate::controls::{BackFaceTarget, Params};
use crate::error::Result;
use crate::geometry::*;
use crate::scene::{ElementId, Geometry, Material, Role, Scene};
use crate::theme::Palette;
use glam::Vec3;
use smallvec::SmallVec;

const SPHERE_OPACITY: f32 = 0.28;
const PLANE_OPACITY: f32 = 0.22;
const CAP_OPACITY: f32 = 0.35;
const CAP_LIFT: f32 = 1.002; // caps sit between the sphere and the line overlays
const DOT_LAT: usize = 8;
const DOT_LON: usize = 12;

/// Meridian longitudes drawn around the globe, degrees.
const MERIDIAN_LONGITUDES: [f32; 2] = [0.0, 90.0];

/// Stable handles to every element the update rules touch.
#[derive(Clone, Debug)]
pub struct OverlayHandles {
    pub sphere: ElementId,
    pub axes: [ElementId; 3],
    pub poles: [ElementId; 2],
    pub meridians: SmallVec<[ElementId; 4]>,
    pub equator: ElementId,
    pub contact_markers: [ElementId; 4],
    pub plane_disks: [ElementId; 2],
    pub caps: [ElementId; 2],
    pub intersection_rings: [ElementId; 2],
    /// Per plane (north, then south): center, +X, −X, +Z, −Z.
    pub intersection_dots: [ElementId; 10],
    /// Per plane (north, then south): X-direction chord, Z-direction chord.
    pub intersection_lines: [ElementId; 4],
    pub arc_curve: ElementId,
    pub equator_contacts: [ElementId; 2],
    pub parallel_guides: [ElementId; 2],
    pub reference_arc: ElementId,
    pub reference_dot: ElementId,
    pub guide_dots: [ElementId; 6],
    pub guide_line: ElementId,
    /// Start of the construction line, on the equator of the reference meridian.
    pub guide_origin: Vec3,
    /// Arc length from the equator to the 45° reference point.
    pub base_arc_length: f32,
}

fn dot_geometry() -> Geometry {
    Geometry::mesh(sphere_mesh(1.0, DOT_LAT, DOT_LON))
}

fn add_dot(
    scene: &mut Scene,
    name: &'static str,
    role: Role,
    palette: &Palette,
    radius: f32,
    position: Vec3,
) -> Result<ElementId> {
    let id = scene.add(name, role, dot_geometry(), Material::solid(palette.color_for(role)))?;
    scene.set_scale(id, radius);
    scene.set_position(id, position);
    Ok(id)
}

fn add_line(
    scene: &mut Scene,
    name: &'static str,
    role: Role,
    palette: &Palette,
    geometry: Geometry,
) -> Result<ElementId> {
    scene.add(name, role, geometry, Material::line(palette.color_for(role)))
}

fn add_dashed(
    scene: &mut Scene,
    name: &'static str,
    role: Role,
    palette: &Palette,
    geometry: Geometry,
) -> Result<ElementId> {
    let material = Material::line(palette.color_for(role)).dashed(DASH_PATTERN);
    scene.add(name, role, geometry, material)
}

/// Allocate every overlay element and bring it to the state described by
/// `params`.
pub fn build_scene(
    sphere: &SphereParams,
    params: &Params,
    palette: &Palette,
) -> Result<(Scene, OverlayHandles)> {
    let mut scene = Scene::new();
    let r = sphere.radius;
    let ro = sphere.overlay_radius();
    let segs = sphere.segments;

    let sphere_id = scene.add(
        "sphere",
        Role::Sphere,
        Geometry::mesh(sphere_mesh(r, SPHERE_LAT_SEGMENTS, SPHERE_LON_SEGMENTS)),
        Material {
            depth_write: true,
            ..Material::translucent(palette.sphere, SPHERE_OPACITY)
        },
    )?;

    let axis_names = ["axis_x", "axis_y", "axis_z"];
    let mut axes = [sphere_id; 3];
    for (slot, (axis, name)) in axes.iter_mut().zip(Axis::ALL.iter().zip(axis_names)) {
        let half = axis.unit() * r * AXIS_EXTENT;
        *slot = add_line(&mut scene, name, Role::Axis(*axis), palette, Geometry::segment(-half, half))?;
    }

    let poles = [
        add_dot(&mut scene, "pole_north", Role::PoleMarker, palette, POLE_MARKER_RADIUS, Vec3::Y * ro)?,
        add_dot(&mut scene, "pole_south", Role::PoleMarker, palette, POLE_MARKER_RADIUS, -Vec3::Y * ro)?,
    ];

    let meridian_names = ["meridian_0", "meridian_90"];
    let mut meridians: SmallVec<[ElementId; 4]> = SmallVec::new();
    for (lon, name) in MERIDIAN_LONGITUDES.iter().zip(meridian_names) {
        let g = Geometry::polyline(meridian_points(ro, *lon, segs), true);
        meridians.push(add_line(&mut scene, name, Role::Meridian, palette, g)?);
    }

    let equator = add_line(
        &mut scene,
        "equator",
        Role::Equator,
        palette,
        Geometry::polyline(circle_points(ro, Axis::Y, 0.0, segs), true),
    )?;

    // Contact-angle family. Placeholder geometry; the apply pass below fills it.
    let marker_names = ["contact_marker_0", "contact_marker_1", "contact_marker_2", "contact_marker_3"];
    let mut contact_markers = [sphere_id; 4];
    for (slot, name) in contact_markers.iter_mut().zip(marker_names) {
        *slot = add_dot(&mut scene, name, Role::ContactMarker, palette, MARKER_DOT_RADIUS, Vec3::ZERO)?;
    }

    let plane_disks = [
        scene.add("plane_north", Role::PlaneDisk, Geometry::default(), Material::translucent(palette.plane, PLANE_OPACITY))?,
        scene.add("plane_south", Role::PlaneDisk, Geometry::default(), Material::translucent(palette.plane, PLANE_OPACITY))?,
    ];
    let caps = [
        scene.add("cap_north", Role::Cap, Geometry::default(), Material::translucent(palette.cap, CAP_OPACITY))?,
        scene.add("cap_south", Role::Cap, Geometry::default(), Material::translucent(palette.cap, CAP_OPACITY))?,
    ];

    let ring_placeholder = || Geometry::polyline(vec![Vec3::ZERO; segs.max(3)], true);
    let intersection_rings = [
        add_line(&mut scene, "intersection_ring_north", Role::IntersectionRing, palette, ring_placeholder())?,
        add_line(&mut scene, "intersection_ring_south", Role::IntersectionRing, palette, ring_placeholder())?,
    ];

    let dot_names = [
        "intersection_dot_n_center",
        "intersection_dot_n_px",
        "intersection_dot_n_nx",
        "intersection_dot_n_pz",
        "intersection_dot_n_nz",
        "intersection_dot_s_center",
        "intersection_dot_s_px",
        "intersection_dot_s_nx",
        "intersection_dot_s_pz",
        "intersection_dot_s_nz",
    ];
    let mut intersection_dots = [sphere_id; 10];
    for (slot, name) in intersection_dots.iter_mut().zip(dot_names) {
        *slot = add_dot(&mut scene, name, Role::IntersectionDot, palette, MARKER_DOT_RADIUS, Vec3::ZERO)?;
    }

    let line_names = [
        "intersection_line_n_x",
        "intersection_line_n_z",
        "intersection_line_s_x",
        "intersection_line_s_z",
    ];
    let mut intersection_lines = [sphere_id; 4];
    for (slot, name) in intersection_lines.iter_mut().zip(line_names) {
        let g = Geometry::segment(Vec3::ZERO, Vec3::ZERO);
        *slot = add_dashed(&mut scene, name, Role::IntersectionLine, palette, g)?;
    }

    // Intersection-angle family.
    let arc_curve = add_line(&mut scene, "intersection_arc", Role::ArcCurve, palette, Geometry::default())?;
    let equator_contacts = [
        add_dot(&mut scene, "equator_contact_west", Role::EquatorContactDot, palette, MARKER_DOT_RADIUS, Vec3::ZERO)?,
        add_dot(&mut scene, "equator_contact_east", Role::EquatorContactDot, palette, MARKER_DOT_RADIUS, Vec3::ZERO)?,
    ];
    let parallel_guides = [
        add_dashed(&mut scene, "parallel_guide_west", Role::ParallelGuide, palette, Geometry::segment(Vec3::ZERO, Vec3::ZERO))?,
        add_dashed(&mut scene, "parallel_guide_east", Role::ParallelGuide, palette, Geometry::segment(Vec3::ZERO, Vec3::ZERO))?,
    ];

    // Arc-length construction.
    let base_arc_length = base_arc_length(r);
    let guide_origin = meridian_point(ro, 0.0);
    let reference_arc = add_line(
        &mut scene,
        "reference_arc",
        Role::ReferenceArc,
        palette,
        Geometry::polyline(meridian_arc_points(ro, 0.0, ARC_REFERENCE_LATITUDE_DEG, segs), false),
    )?;
    let reference_dot = add_dot(
        &mut scene,
        "reference_dot",
        Role::ReferenceDot,
        palette,
        MARKER_DOT_RADIUS,
        meridian_point(ro, ARC_REFERENCE_LATITUDE_DEG),
    )?;
    let guide_names = [
        "guide_dot_1",
        "guide_dot_2",
        "guide_dot_1_3",
        "guide_dot_2_3",
        "guide_dot_1_2",
        "guide_dot_1_4",
    ];
    let mut guide_dots = [sphere_id; 6];
    for (slot, name) in guide_dots.iter_mut().zip(guide_names) {
        *slot = add_dot(&mut scene, name, Role::GuideDot, palette, GUIDE_DOT_RADIUS, guide_origin)?;
    }
    let guide_line = add_line(
        &mut scene,
        "guide_line",
        Role::GuideLine,
        palette,
        Geometry::segment(guide_origin, guide_origin),
    )?;

    let handles = OverlayHandles {
        sphere: sphere_id,
        axes,
        poles,
        meridians,
        equator,
        contact_markers,
        plane_disks,
        caps,
        intersection_rings,
        intersection_dots,
        intersection_lines,
        arc_curve,
        equator_contacts,
        parallel_guides,
        reference_arc,
        reference_dot,
        guide_dots,
        guide_line,
        guide_origin,
        base_arc_length,
    };

    apply_contact_angle(&mut scene, &handles, sphere, params.contact_angle_deg);
    apply_intersection_angle(&mut scene, &handles, sphere, params.intersection_angle_deg);
    apply_arc_length_scale(&mut scene, &handles, params.arc_length_scale_pct);

    log::debug!("[scene] built {} overlay elements", scene.len());
    Ok((scene, handles))
}

/// Contact-angle update: planes, caps, markers, intersection rings, dots and
/// dashed chords.
pub fn apply_contact_angle(
    scene: &mut Scene,
    h: &OverlayHandles,
    sphere: &SphereParams,
    contact_deg: f32,
) {
    let geo = contact_plane_geometry(contact_deg, sphere.radius);
    let s = sphere.surface_offset;
    let d = geo.plane_offset;
    let r = geo.intersection_radius;
    let segs = sphere.segments;

    for (id, sign) in h.plane_disks.iter().zip([1.0f32, -1.0]) {
        scene.replace_geometry(*id, Geometry::mesh(disk_mesh(r, segs)));
        scene.set_position(*id, Vec3::Y * d * sign);
    }

    let cap = cap_mesh(sphere.radius * CAP_LIFT, geo.cap_half_angle, segs);
    scene.replace_geometry(h.caps[1], Geometry::mesh(cap.clone().mirrored_y()));
    scene.replace_geometry(h.caps[0], Geometry::mesh(cap));

    let ro = sphere.overlay_radius();
    let marker_angles = [
        90.0 - contact_deg,
        90.0 + contact_deg,
        270.0 - contact_deg,
        270.0 + contact_deg,
    ];
    for (id, angle) in h.contact_markers.iter().zip(marker_angles) {
        scene.set_position(*id, meridian_point(ro, angle));
    }

    for (plane, sign) in [1.0f32, -1.0].into_iter().enumerate() {
        let y = d * sign;
        let ring = circle_points(r * s, Axis::Y, y * s, segs);
        scene.update_geometry(h.intersection_rings[plane], |g| g.set_points(&ring));

        let dots = [
            Vec3::new(0.0, y, 0.0),
            Vec3::new(r, y, 0.0),
            Vec3::new(-r, y, 0.0),
            Vec3::new(0.0, y, r),
            Vec3::new(0.0, y, -r),
        ];
        for (k, p) in dots.into_iter().enumerate() {
            scene.set_position(h.intersection_dots[plane * 5 + k], p * s);
        }

        let x_chord = (Vec3::new(-r, y, 0.0) * s, Vec3::new(r, y, 0.0) * s);
        let z_chord = (Vec3::new(0.0, y, -r) * s, Vec3::new(0.0, y, r) * s);
        scene.update_geometry(h.intersection_lines[plane * 2], |g| g.set_segment(x_chord.0, x_chord.1));
        scene.update_geometry(h.intersection_lines[plane * 2 + 1], |g| g.set_segment(z_chord.0, z_chord.1));
    }
}

/// Intersection-angle update: arc buffer, equator contacts and the two
/// parallel guides dropped to the south pole's latitude.
pub fn apply_intersection_angle(
    scene: &mut Scene,
    h: &OverlayHandles,
    sphere: &SphereParams,
    intersection_deg: f32,
) {
    let geo = intersection_arc_geometry(
        intersection_deg,
        sphere.radius,
        sphere.surface_offset,
        sphere.segments,
    );
    let [west, east] = geo.equator_contacts;
    scene.replace_geometry(h.arc_curve, Geometry::polyline(geo.arc_points, false));

    for (k, contact) in [west, east].into_iter().enumerate() {
        scene.set_position(h.equator_contacts[k], contact);
        let foot = Vec3::new(contact.x, -sphere.overlay_radius(), contact.z);
        scene.update_geometry(h.parallel_guides[k], |g| g.set_segment(contact, foot));
    }
}

/// Arc-length update: guide dots and the far end of the construction line.
pub fn apply_arc_length_scale(scene: &mut Scene, h: &OverlayHandles, scale_pct: f32) {
    let offsets = arc_length_positions(h.base_arc_length, scale_pct);
    for (id, offset) in h.guide_dots.iter().zip(offsets) {
        scene.set_position(*id, h.guide_origin + offset);
    }
    let far = offsets
        .iter()
        .copied()
        .min_by(|a, b| a.y.total_cmp(&b.y))
        .unwrap_or(Vec3::ZERO);
    scene.update_geometry(h.guide_line, |g| g.set_last_point(h.guide_origin + far));
}

/// Show or hide the far side of the equator or meridians by toggling depth
/// testing on those lines.
pub fn set_back_faces(scene: &mut Scene, h: &OverlayHandles, target: BackFaceTarget, visible: bool) {
    let ids: SmallVec<[ElementId; 4]> = match target {
        BackFaceTarget::Equator => SmallVec::from_slice(&[h.equator]),
        BackFaceTarget::Meridians => h.meridians.clone(),
    };
    for id in ids {
        scene.material_mut(id).depth_test = !visible;
    }
}

pub fn apply_palette(scene: &mut Scene, palette: &Palette) {
    scene.recolor(|role| palette.color_for(role));
}

/// Small axis triad shown in the orientation gizmo, unit length.
pub fn build_gizmo(palette: &Palette) -> Result<Scene> {
    let mut scene = Scene::new();
    let names = [("gizmo_x", "gizmo_tip_x"), ("gizmo_y", "gizmo_tip_y"), ("gizmo_z", "gizmo_tip_z")];
    for (axis, (line, tip)) in Axis::ALL.into_iter().zip(names) {
        let role = Role::GizmoAxis(axis);
        scene.add(line, role, Geometry::segment(Vec3::ZERO, axis.unit()), Material::line(palette.color_for(role)))?;
        let tip_role = Role::GizmoTip(axis);
        let id = scene.add(tip, tip_role, dot_geometry(), Material::solid(palette.color_for(tip_role)))?;
        scene.set_scale(id, 0.12);
        scene.set_position(id, axis.unit());
    }
    Ok(scene)
}
