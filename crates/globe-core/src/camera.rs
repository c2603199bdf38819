//! Camera description and damped orbit controls.
//!
//! The orbit controls move the camera, never the globe. They keep a saved
//! pose so a reset can restore the initial position, target and zoom.

use crate::constants::*;
use glam::{Mat4, Quat, Vec3};
use std::f32::consts::{PI, TAU};

const EPS: f32 = 1e-6;
const MIN_POLAR: f32 = 1e-3;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Lens zoom; values above 1 narrow the field of view.
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: camera_eye_vec3(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        let fovy = 2.0 * ((self.fovy_radians * 0.5).tan() / self.zoom.max(EPS)).atan();
        Mat4::perspective_rh(fovy, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
    /// Rotation taking world directions into view space.
    pub fn view_rotation(&self) -> Quat {
        Quat::from_mat4(&self.view_matrix()).normalize()
    }
    /// Unit vector from the target toward the eye.
    pub fn to_camera(&self) -> Vec3 {
        (self.eye - self.target).normalize_or_zero()
    }
}

/// Radius/azimuth/polar triple around the orbit target, Y up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius < EPS {
            return Self::default();
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let s = self.phi.sin() * self.radius;
        Vec3::new(s * self.theta.sin(), self.phi.cos() * self.radius, s * self.theta.cos())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SavedPose {
    eye: Vec3,
    target: Vec3,
    zoom: f32,
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    camera: Camera,
    spherical: Spherical,
    delta: Spherical,
    scale: f32,
    saved: SavedPose,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

impl OrbitControls {
    pub fn new(camera: Camera) -> Self {
        let saved = SavedPose {
            eye: camera.eye,
            target: camera.target,
            zoom: camera.zoom,
        };
        let spherical = Spherical::from_offset(camera.eye - camera.target);
        Self {
            camera,
            spherical,
            delta: Spherical::default(),
            scale: 1.0,
            saved,
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
        }
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta.theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta.phi -= angle;
    }

    /// Pointer drag in pixels over a viewport of `viewport_height` pixels.
    pub fn drag(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.rotate_left(TAU * dx / h * self.rotate_speed);
        self.rotate_up(TAU * dy / h * self.rotate_speed);
    }

    /// Scroll zoom: positive `steps` move the camera closer.
    pub fn dolly(&mut self, steps: f32) {
        self.scale *= ORBIT_DOLLY_STEP.powf(steps);
    }

    /// Advance damping one tick and place the camera. Returns whether the
    /// camera moved noticeably.
    pub fn update(&mut self) -> bool {
        let before = self.camera.eye;
        let k = self.damping_factor.clamp(0.0, 1.0);

        self.spherical.theta += self.delta.theta * k;
        self.spherical.phi += self.delta.phi * k;
        self.spherical.phi = self.spherical.phi.clamp(MIN_POLAR, PI - MIN_POLAR);
        self.spherical.radius =
            (self.spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        self.camera.eye = self.camera.target + self.spherical.to_offset();

        self.delta.theta *= 1.0 - k;
        self.delta.phi *= 1.0 - k;
        self.scale = 1.0;

        before.distance_squared(self.camera.eye) > EPS
    }

    /// Remember the current camera pose as the reset target.
    pub fn save_state(&mut self) {
        self.saved = SavedPose {
            eye: self.camera.eye,
            target: self.camera.target,
            zoom: self.camera.zoom,
        };
    }

    /// Restore the saved pose and drop pending motion.
    pub fn reset(&mut self) {
        self.camera.eye = self.saved.eye;
        self.camera.target = self.saved.target;
        self.camera.zoom = self.saved.zoom;
        self.spherical = Spherical::from_offset(self.camera.eye - self.camera.target);
        self.delta = Spherical::default();
        self.scale = 1.0;
    }
}
