//! Control surface model: the tunable parameters and the discrete commands a
//! front-end can emit. Values are clamped here, so everything downstream can
//! assume its documented domain.

use crate::constants::*;
use crate::geometry::Axis;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Param {
    RotationStep,
    ContactAngle,
    ContactStep,
    IntersectionAngle,
    IntersectionStep,
    ArcLengthScale,
    ArcLengthStep,
}

impl Param {
    pub const ALL: [Param; 7] = [
        Param::RotationStep,
        Param::ContactAngle,
        Param::ContactStep,
        Param::IntersectionAngle,
        Param::IntersectionStep,
        Param::ArcLengthScale,
        Param::ArcLengthStep,
    ];

    pub fn range(self) -> (f32, f32) {
        match self {
            Param::RotationStep => ROTATION_STEP_RANGE,
            Param::ContactAngle => CONTACT_ANGLE_RANGE,
            Param::ContactStep => CONTACT_STEP_RANGE,
            Param::IntersectionAngle => INTERSECTION_ANGLE_RANGE,
            Param::IntersectionStep => INTERSECTION_STEP_RANGE,
            Param::ArcLengthScale => ARC_LENGTH_SCALE_RANGE,
            Param::ArcLengthStep => ARC_LENGTH_STEP_RANGE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Param::RotationStep => "rotation step",
            Param::ContactAngle => "contact angle",
            Param::ContactStep => "contact-angle step",
            Param::IntersectionAngle => "intersection angle",
            Param::IntersectionStep => "intersection-angle step",
            Param::ArcLengthScale => "arc-length scale",
            Param::ArcLengthStep => "arc-length step",
        }
    }

    #[inline]
    pub fn clamp(self, value: f32) -> f32 {
        let (lo, hi) = self.range();
        value.clamp(lo, hi)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Params {
    pub rotation_step_deg: f32,
    pub contact_angle_deg: f32,
    pub contact_step_deg: f32,
    pub intersection_angle_deg: f32,
    pub intersection_step_deg: f32,
    pub arc_length_scale_pct: f32,
    pub arc_length_step_pct: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            rotation_step_deg: DEFAULT_ROTATION_STEP_DEG,
            contact_angle_deg: DEFAULT_CONTACT_ANGLE_DEG,
            contact_step_deg: DEFAULT_CONTACT_STEP_DEG,
            intersection_angle_deg: DEFAULT_INTERSECTION_ANGLE_DEG,
            intersection_step_deg: DEFAULT_INTERSECTION_STEP_DEG,
            arc_length_scale_pct: DEFAULT_ARC_LENGTH_SCALE_PCT,
            arc_length_step_pct: DEFAULT_ARC_LENGTH_STEP_PCT,
        }
    }
}

impl Params {
    pub fn get(&self, param: Param) -> f32 {
        match param {
            Param::RotationStep => self.rotation_step_deg,
            Param::ContactAngle => self.contact_angle_deg,
            Param::ContactStep => self.contact_step_deg,
            Param::IntersectionAngle => self.intersection_angle_deg,
            Param::IntersectionStep => self.intersection_step_deg,
            Param::ArcLengthScale => self.arc_length_scale_pct,
            Param::ArcLengthStep => self.arc_length_step_pct,
        }
    }

    fn slot(&mut self, param: Param) -> &mut f32 {
        match param {
            Param::RotationStep => &mut self.rotation_step_deg,
            Param::ContactAngle => &mut self.contact_angle_deg,
            Param::ContactStep => &mut self.contact_step_deg,
            Param::IntersectionAngle => &mut self.intersection_angle_deg,
            Param::IntersectionStep => &mut self.intersection_step_deg,
            Param::ArcLengthScale => &mut self.arc_length_scale_pct,
            Param::ArcLengthStep => &mut self.arc_length_step_pct,
        }
    }

    /// Store a clamped value and return what was stored. Non-finite input
    /// leaves the parameter unchanged.
    pub fn set(&mut self, param: Param, value: f32) -> f32 {
        let slot = self.slot(param);
        if value.is_finite() {
            *slot = param.clamp(value);
        }
        *slot
    }

    /// Increment used when `param` is nudged one notch.
    pub fn increment(&self, param: Param) -> f32 {
        match param {
            Param::ContactAngle => self.contact_step_deg,
            Param::IntersectionAngle => self.intersection_step_deg,
            Param::ArcLengthScale => self.arc_length_step_pct,
            Param::RotationStep => ROTATION_STEP_NUDGE,
            Param::ContactStep => CONTACT_STEP_NUDGE,
            Param::IntersectionStep => INTERSECTION_STEP_NUDGE,
            Param::ArcLengthStep => ARC_LENGTH_STEP_NUDGE,
        }
    }

    /// Move `param` by `sign` notches and return the clamped result.
    pub fn nudge(&mut self, param: Param, sign: f32) -> f32 {
        let next = self.get(param) + sign * self.increment(param);
        self.set(param, next)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackFaceTarget {
    Equator,
    Meridians,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    RotateBy { axis: Axis, sign: f32 },
    Set(Param, f32),
    Nudge(Param, f32),
    ResetOrientation,
    ResetAll,
    RandomFrontRotation,
    ToggleTheme,
    ToggleBackFaces(BackFaceTarget),
    ToggleGizmoMode,
}
