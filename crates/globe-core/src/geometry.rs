//! Geometry kernel for the globe overlays.
//!
//! Every function here is a pure, deterministic mapping from scalar
//! parameters to point sets, scalar quantities or plain mesh data. Nothing
//! validates its input range: callers clamp parameters before they arrive.
//!
//! Conventions: the sphere is centered at the origin with the poles on the Y
//! axis (north is +Y), so the equator lies in the XZ plane. The reference
//! meridian is the great circle in the XY plane; meridian angles are measured
//! from +X toward +Y.

use crate::constants::{
    ARC_GUIDE_FRACTIONS, ARC_REFERENCE_LATITUDE_DEG, CIRCLE_SEGMENTS, SPHERE_RADIUS,
    SURFACE_OFFSET,
};
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Principal axis of the globe frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// In-plane basis `(u, v)` of the plane orthogonal to this axis, with
    /// `u × v` equal to the axis itself.
    pub fn basis(self) -> (Vec3, Vec3) {
        match self {
            Axis::X => (Vec3::Y, Vec3::Z),
            Axis::Y => (Vec3::Z, Vec3::X),
            Axis::Z => (Vec3::X, Vec3::Y),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// Fixed sphere description for a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereParams {
    pub radius: f32,
    /// Factor slightly above 1 applied to overlay geometry so it does not
    /// z-fight with the sphere surface.
    pub surface_offset: f32,
    /// Angular resolution of circular curves.
    pub segments: usize,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: SPHERE_RADIUS,
            surface_offset: SURFACE_OFFSET,
            segments: CIRCLE_SEGMENTS,
        }
    }
}

impl SphereParams {
    /// Radius at which overlay lines and markers are drawn.
    #[inline]
    pub fn overlay_radius(&self) -> f32 {
        self.radius * self.surface_offset
    }
}

/// Samples a closed ring of `segments` points around `center`, spanned by the
/// orthonormal in-plane vectors `u` and `v`. The closing edge back to the
/// first point is implied.
pub fn ring_points(center: Vec3, u: Vec3, v: Vec3, radius: f32, segments: usize) -> Vec<Vec3> {
    let n = segments.max(3);
    (0..n)
        .map(|i| {
            let t = TAU * i as f32 / n as f32;
            center + (u * t.cos() + v * t.sin()) * radius
        })
        .collect()
}

/// Circle of `radius` in the plane orthogonal to `axis`, centered at
/// `offset` along that axis.
pub fn circle_points(radius: f32, axis: Axis, offset: f32, segments: usize) -> Vec<Vec3> {
    let (u, v) = axis.basis();
    ring_points(axis.unit() * offset, u, v, radius, segments)
}

/// Great circle through both poles at the given longitude phase. Longitude
/// 0 is the reference meridian in the XY plane.
pub fn meridian_points(radius: f32, longitude_deg: f32, segments: usize) -> Vec<Vec3> {
    let phi = longitude_deg.to_radians();
    let u = Vec3::new(phi.cos(), 0.0, -phi.sin());
    ring_points(Vec3::ZERO, u, Vec3::Y, radius, segments)
}

/// Point on the reference meridian at `angle_deg`, measured from +X toward +Y.
#[inline]
pub fn meridian_point(radius: f32, angle_deg: f32) -> Vec3 {
    let a = angle_deg.to_radians();
    Vec3::new(radius * a.cos(), radius * a.sin(), 0.0)
}

/// Open arc along the reference meridian from `from_deg` to `to_deg`, using
/// the same angular step as a full circle of `segments` points.
pub fn meridian_arc_points(radius: f32, from_deg: f32, to_deg: f32, segments: usize) -> Vec<Vec3> {
    let step = 360.0 / segments.max(3) as f32;
    let steps = (((to_deg - from_deg).abs() / step).ceil() as usize).max(1);
    (0..=steps)
        .map(|i| meridian_point(radius, from_deg + (to_deg - from_deg) * i as f32 / steps as f32))
        .collect()
}

/// Scalars derived from the contact angle of the paper planes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactPlaneGeometry {
    /// Distance of each paper plane from the equator plane.
    pub plane_offset: f32,
    /// Radius of the circle where a paper plane cuts the sphere.
    pub intersection_radius: f32,
    /// Angular half-width of the spherical cap beyond each plane, radians.
    pub cap_half_angle: f32,
}

/// Closed-form plane placement for the paper planes touching the sphere at
/// meridian angles `90° ± contact_deg` (and the `270°` mirror).
pub fn contact_plane_geometry(contact_deg: f32, radius: f32) -> ContactPlaneGeometry {
    let touch = (90.0 - contact_deg).to_radians();
    ContactPlaneGeometry {
        plane_offset: radius * touch.sin(),
        intersection_radius: radius * touch.cos(),
        cap_half_angle: (90.0 - (90.0 - contact_deg)).to_radians(),
    }
}

/// Geometry of the independent cutting plane, whose normal is the Z axis.
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionArcGeometry {
    pub plane_offset: f32,
    pub intersection_radius: f32,
    /// Near-side half of the intersection circle, from one equator contact
    /// over the northern hemisphere to the other.
    pub arc_points: Vec<Vec3>,
    /// Where the arc meets the equator: `[-X side, +X side]`.
    pub equator_contacts: [Vec3; 2],
}

/// Cut of the sphere by the plane `z = R·sin(intersection_deg)`. The arc is
/// parametrized over `t ∈ [−π/2, π/2]` and only spans that half circle.
pub fn intersection_arc_geometry(
    intersection_deg: f32,
    radius: f32,
    surface_offset: f32,
    segments: usize,
) -> IntersectionArcGeometry {
    let a = intersection_deg.to_radians();
    let plane_offset = radius * a.sin();
    let intersection_radius = radius * a.cos();
    let point = |t: f32| {
        Vec3::new(
            intersection_radius * t.sin(),
            intersection_radius * t.cos(),
            plane_offset,
        ) * surface_offset
    };
    let half = (segments.max(4) / 2).max(2);
    let arc_points = (0..=half)
        .map(|i| point(-FRAC_PI_2 + PI * i as f32 / half as f32))
        .collect();
    IntersectionArcGeometry {
        plane_offset,
        intersection_radius,
        arc_points,
        equator_contacts: [point(-FRAC_PI_2), point(FRAC_PI_2)],
    }
}

/// Arc length along the reference meridian from the equator to the 45°
/// reference point. Computed from the two points rather than assumed.
pub fn base_arc_length(radius: f32) -> f32 {
    let start = meridian_point(radius, 0.0);
    let reference = meridian_point(radius, ARC_REFERENCE_LATITUDE_DEG);
    radius * start.angle_between(reference)
}

/// Offsets of the six guide dots from the construction line origin. The
/// line points along −Y; dot `k` sits at `ARC_GUIDE_FRACTIONS[k]` of the
/// scaled arc length.
pub fn arc_length_positions(base_arc_length: f32, scale_pct: f32) -> [Vec3; 6] {
    let scaled = base_arc_length * (scale_pct / 100.0);
    ARC_GUIDE_FRACTIONS.map(|f| Vec3::new(0.0, -(scaled * f), 0.0))
}

/// Indexed triangle mesh in plain vectors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Reflect through the equator plane.
    pub fn mirrored_y(mut self) -> Self {
        for p in &mut self.positions {
            p.y = -p.y;
        }
        self
    }
}

/// Filled disk in the XZ plane (normal +Y), centered at the origin.
pub fn disk_mesh(radius: f32, segments: usize) -> MeshData {
    let ring = circle_points(radius, Axis::Y, 0.0, segments);
    let n = ring.len() as u32;
    let mut positions = Vec::with_capacity(ring.len() + 1);
    positions.push(Vec3::ZERO);
    positions.extend(ring);
    let mut indices = Vec::with_capacity(n as usize * 3);
    for i in 0..n {
        indices.extend_from_slice(&[0, 1 + i, 1 + (i + 1) % n]);
    }
    MeshData { positions, indices }
}

/// Latitude/longitude section of a sphere around +Y, covering polar angles
/// `0..=theta_len`. A full sphere uses `theta_len = π`.
pub fn sphere_section_mesh(radius: f32, theta_len: f32, lat: usize, lon: usize) -> MeshData {
    let lat = lat.max(1);
    let lon = lon.max(3);
    let mut positions = Vec::with_capacity((lat + 1) * (lon + 1));
    let mut indices = Vec::with_capacity(lat * lon * 6);

    for i in 0..=lat {
        let theta = theta_len * i as f32 / lat as f32;
        let y = radius * theta.cos();
        let sin_t = theta.sin();
        for j in 0..=lon {
            let phi = TAU * j as f32 / lon as f32;
            positions.push(Vec3::new(
                radius * phi.cos() * sin_t,
                y,
                radius * phi.sin() * sin_t,
            ));
        }
    }

    for i in 0..lat {
        for j in 0..lon {
            let a = (i * (lon + 1) + j) as u32;
            let b = a + (lon + 1) as u32;
            indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }

    MeshData { positions, indices }
}

#[inline]
pub fn sphere_mesh(radius: f32, lat: usize, lon: usize) -> MeshData {
    sphere_section_mesh(radius, PI, lat, lon)
}

/// Spherical cap around +Y with the given angular half-width.
#[inline]
pub fn cap_mesh(radius: f32, half_angle: f32, segments: usize) -> MeshData {
    sphere_section_mesh(radius, half_angle, (segments / 8).max(4), segments)
}
