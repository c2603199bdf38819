//! Dark/light color assignments. Purely cosmetic: switching theme recolors
//! existing materials and never touches geometry.

use crate::geometry::Axis;
use crate::scene::Role;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => DARK,
            Theme::Light => LIGHT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: [f32; 3],
    pub sphere: [f32; 3],
    pub axes: [[f32; 3]; 3],
    pub pole: [f32; 3],
    pub meridian: [f32; 3],
    pub equator: [f32; 3],
    pub marker: [f32; 3],
    pub plane: [f32; 3],
    pub cap: [f32; 3],
    pub intersection: [f32; 3],
    pub arc: [f32; 3],
    pub guide: [f32; 3],
    pub reference: [f32; 3],
}

const DARK: Palette = Palette {
    background: [0.03, 0.04, 0.07],
    sphere: [0.16, 0.30, 0.52],
    axes: [[0.92, 0.32, 0.30], [0.35, 0.85, 0.42], [0.32, 0.55, 0.95]],
    pole: [0.95, 0.95, 0.98],
    meridian: [0.62, 0.70, 0.82],
    equator: [0.98, 0.80, 0.35],
    marker: [0.98, 0.55, 0.25],
    plane: [0.85, 0.88, 0.95],
    cap: [0.95, 0.45, 0.55],
    intersection: [0.40, 0.92, 0.90],
    arc: [0.78, 0.50, 0.98],
    guide: [0.95, 0.92, 0.45],
    reference: [0.70, 0.72, 0.78],
};

const LIGHT: Palette = Palette {
    background: [0.95, 0.96, 0.98],
    sphere: [0.55, 0.70, 0.90],
    axes: [[0.80, 0.12, 0.10], [0.10, 0.60, 0.20], [0.12, 0.30, 0.80]],
    pole: [0.10, 0.10, 0.15],
    meridian: [0.30, 0.36, 0.48],
    equator: [0.80, 0.52, 0.05],
    marker: [0.85, 0.35, 0.05],
    plane: [0.40, 0.44, 0.55],
    cap: [0.82, 0.22, 0.35],
    intersection: [0.05, 0.55, 0.55],
    arc: [0.50, 0.20, 0.75],
    guide: [0.60, 0.50, 0.02],
    reference: [0.35, 0.36, 0.42],
};

impl Palette {
    pub fn axis(&self, axis: Axis) -> [f32; 3] {
        match axis {
            Axis::X => self.axes[0],
            Axis::Y => self.axes[1],
            Axis::Z => self.axes[2],
        }
    }

    pub fn color_for(&self, role: Role) -> [f32; 3] {
        match role {
            Role::Sphere => self.sphere,
            Role::Axis(a) | Role::GizmoAxis(a) | Role::GizmoTip(a) => self.axis(a),
            Role::PoleMarker => self.pole,
            Role::Meridian => self.meridian,
            Role::Equator => self.equator,
            Role::ContactMarker => self.marker,
            Role::PlaneDisk => self.plane,
            Role::Cap => self.cap,
            Role::IntersectionRing | Role::IntersectionDot | Role::IntersectionLine => {
                self.intersection
            }
            Role::ArcCurve | Role::EquatorContactDot | Role::ParallelGuide => self.arc,
            Role::ReferenceArc | Role::ReferenceDot => self.reference,
            Role::GuideDot | Role::GuideLine => self.guide,
        }
    }
}
