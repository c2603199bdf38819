//! Orientation state of the globe: one unit quaternion relative to a fixed
//! default pose.

use crate::constants::{
    default_orientation, front_reference_vec3, FRONT_DOT_THRESHOLD, FRONT_MAX_ATTEMPTS,
};
use crate::geometry::Axis;
use glam::{Quat, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub struct Orientation {
    current: Quat,
    default: Quat,
}

impl Default for Orientation {
    fn default() -> Self {
        Self::new(default_orientation())
    }
}

impl Orientation {
    pub fn new(default: Quat) -> Self {
        let default = default.normalize();
        Self {
            current: default,
            default,
        }
    }

    #[inline]
    pub fn quat(&self) -> Quat {
        self.current
    }

    #[inline]
    pub fn default_pose(&self) -> Quat {
        self.default
    }

    /// Compose a `step_deg` rotation about the globe's own `axis` (object
    /// space, post-multiplied). `sign` selects the direction.
    pub fn rotate_by(&mut self, axis: Axis, sign: f32, step_deg: f32) {
        let delta = Quat::from_axis_angle(axis.unit(), sign.signum() * step_deg.to_radians());
        self.current = (self.current * delta).normalize();
        log::debug!(
            "[orientation] rotate {}{} by {:.1}°",
            if sign < 0.0 { "-" } else { "+" },
            axis.label(),
            step_deg
        );
    }

    pub fn reset(&mut self) {
        self.current = self.default;
    }

    /// Rejection-sample a uniformly random rotation composed onto the default
    /// pose until the reference direction faces the camera (`dot` above the
    /// threshold). Gives up after a bounded number of draws and leaves the
    /// orientation untouched; returns whether a pose was accepted.
    pub fn random_front_rotation<R: Rng + ?Sized>(&mut self, rng: &mut R, to_camera: Vec3) -> bool {
        let to_camera = to_camera.normalize_or_zero();
        for attempt in 0..FRONT_MAX_ATTEMPTS {
            let candidate = (self.default * random_rotation(rng)).normalize();
            if front_alignment(candidate, to_camera) > FRONT_DOT_THRESHOLD {
                self.current = candidate;
                log::debug!("[orientation] front rotation accepted after {} draws", attempt + 1);
                return true;
            }
        }
        log::debug!(
            "[orientation] no front-facing rotation within {} draws; unchanged",
            FRONT_MAX_ATTEMPTS
        );
        false
    }
}

/// Uniform random rotation: axis drawn as `(u = cos θ, φ)` on the unit
/// sphere, angle uniform in `[0, 2π)`.
pub fn random_rotation<R: Rng + ?Sized>(rng: &mut R) -> Quat {
    let u: f32 = rng.gen_range(-1.0..=1.0);
    let phi: f32 = rng.gen_range(0.0..TAU);
    let s = (1.0 - u * u).max(0.0).sqrt();
    let axis = Vec3::new(s * phi.cos(), s * phi.sin(), u).normalize();
    let angle: f32 = rng.gen_range(0.0..TAU);
    Quat::from_axis_angle(axis, angle)
}

/// Dot product of the rotated reference direction with the to-camera vector.
#[inline]
pub fn front_alignment(orientation: Quat, to_camera: Vec3) -> f32 {
    (orientation * front_reference_vec3()).dot(to_camera)
}
