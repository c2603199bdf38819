use glam::{EulerRot, Quat, Vec3};

// Shared geometry/interaction tuning constants used by the core and the frontends.

// Sphere
pub const SPHERE_RADIUS: f32 = 1.5;
pub const SURFACE_OFFSET: f32 = 1.005; // pushes overlay lines just outside the sphere
pub const CIRCLE_SEGMENTS: usize = 128;
pub const SPHERE_LAT_SEGMENTS: usize = 48;
pub const SPHERE_LON_SEGMENTS: usize = 64;

// Parameter defaults
pub const DEFAULT_CONTACT_ANGLE_DEG: f32 = 33.56;
pub const DEFAULT_CONTACT_STEP_DEG: f32 = 0.5;
pub const DEFAULT_INTERSECTION_ANGLE_DEG: f32 = 30.0;
pub const DEFAULT_INTERSECTION_STEP_DEG: f32 = 1.0;
pub const DEFAULT_ARC_LENGTH_SCALE_PCT: f32 = 100.0;
pub const DEFAULT_ARC_LENGTH_STEP_PCT: f32 = 5.0;
pub const DEFAULT_ROTATION_STEP_DEG: f32 = 15.0;

// Parameter ranges (inclusive)
pub const CONTACT_ANGLE_RANGE: (f32, f32) = (0.1, 89.9);
pub const CONTACT_STEP_RANGE: (f32, f32) = (0.01, 10.0);
pub const INTERSECTION_ANGLE_RANGE: (f32, f32) = (0.0, 90.0);
pub const INTERSECTION_STEP_RANGE: (f32, f32) = (0.1, 10.0);
pub const ARC_LENGTH_SCALE_RANGE: (f32, f32) = (0.0, 200.0);
pub const ARC_LENGTH_STEP_RANGE: (f32, f32) = (1.0, 50.0);
pub const ROTATION_STEP_RANGE: (f32, f32) = (1.0, 90.0);

// Increments applied when a step parameter itself is nudged
pub const CONTACT_STEP_NUDGE: f32 = 0.1;
pub const INTERSECTION_STEP_NUDGE: f32 = 0.5;
pub const ARC_LENGTH_STEP_NUDGE: f32 = 1.0;
pub const ROTATION_STEP_NUDGE: f32 = 5.0;

// Arc-length construction
pub const ARC_REFERENCE_LATITUDE_DEG: f32 = 45.0;
pub const ARC_GUIDE_FRACTIONS: [f32; 6] = [1.0, 2.0, 1.0 / 3.0, 2.0 / 3.0, 0.5, 0.25];

// Default globe pose (Euler XYZ, degrees)
pub const DEFAULT_ORIENTATION_EULER_DEG: [f32; 3] = [15.0, -25.0, 0.0];

// Random front-facing rotation
pub const FRONT_REFERENCE_DIR: [f32; 3] = [0.0, 0.0, 1.0];
pub const FRONT_DOT_THRESHOLD: f32 = 0.2;
pub const FRONT_MAX_ATTEMPTS: usize = 400;

// Camera
pub const CAMERA_EYE: [f32; 3] = [0.0, 1.2, 5.5];
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Orbit controls
pub const ORBIT_DAMPING_FACTOR: f32 = 0.08;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_MIN_DISTANCE: f32 = 2.0;
pub const ORBIT_MAX_DISTANCE: f32 = 20.0;
pub const ORBIT_DOLLY_STEP: f32 = 0.95;

// Frame driver
pub const HUD_REFRESH_HZ: f64 = 16.0;
pub const HUD_MIN_DELTA_DEG: f32 = 0.1;

// Marker sizing
pub const MARKER_DOT_RADIUS: f32 = 0.035;
pub const GUIDE_DOT_RADIUS: f32 = 0.028;
pub const POLE_MARKER_RADIUS: f32 = 0.05;
pub const AXIS_EXTENT: f32 = 1.4; // axis half-length as a multiple of the radius
pub const DASH_PATTERN: [f32; 2] = [0.06, 0.04];

#[inline]
pub fn default_orientation() -> Quat {
    let [x, y, z] = DEFAULT_ORIENTATION_EULER_DEG;
    Quat::from_euler(EulerRot::XYZ, x.to_radians(), y.to_radians(), z.to_radians())
}

#[inline]
pub fn camera_eye_vec3() -> Vec3 {
    Vec3::from(CAMERA_EYE)
}

#[inline]
pub fn front_reference_vec3() -> Vec3 {
    Vec3::from(FRONT_REFERENCE_DIR)
}
