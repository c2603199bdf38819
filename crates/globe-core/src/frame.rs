//! Per-tick frame driver: advances orbit damping, hands the scene and the
//! gizmo to a [`FrameSink`] and refreshes the angle readout at a bounded
//! rate.

use crate::camera::Camera;
use crate::constants::{HUD_MIN_DELTA_DEG, HUD_REFRESH_HZ};
use crate::geometry::Axis;
use crate::globe::Globe;
use crate::scene::Scene;
use glam::{Quat, Vec3};

/// Frame the orientation gizmo is drawn in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GizmoMode {
    /// Gizmo follows the globe's orientation.
    #[default]
    Globe,
    /// Gizmo shows the fixed world axes as seen by the camera.
    Camera,
}

impl GizmoMode {
    pub fn toggled(self) -> Self {
        match self {
            GizmoMode::Globe => GizmoMode::Camera,
            GizmoMode::Camera => GizmoMode::Globe,
        }
    }
}

/// Angle in degrees between each rotated globe axis and the direction
/// toward the camera, in X, Y, Z order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleReadout {
    pub degrees: [f32; 3],
}

impl AngleReadout {
    pub fn measure(orientation: Quat, camera: &Camera) -> Self {
        let to_camera = camera.to_camera();
        let degrees = Axis::ALL.map(|axis| angle_deg(orientation * axis.unit(), to_camera));
        Self { degrees }
    }

    /// Whether any axis reading differs from `other` by more than `min_delta_deg`.
    pub fn changed_beyond(&self, other: &AngleReadout, min_delta_deg: f32) -> bool {
        self.degrees
            .iter()
            .zip(other.degrees.iter())
            .any(|(a, b)| (a - b).abs() > min_delta_deg)
    }
}

impl std::fmt::Display for AngleReadout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [x, y, z] = self.degrees;
        write!(f, "X {x:6.1}°  Y {y:6.1}°  Z {z:6.1}°")
    }
}

fn angle_deg(a: Vec3, b: Vec3) -> f32 {
    let d = a.normalize_or_zero().dot(b.normalize_or_zero()).clamp(-1.0, 1.0);
    d.acos().to_degrees()
}

/// Render collaborator driven once per tick.
pub trait FrameSink {
    fn draw_scene(&mut self, scene: &Scene, camera: &Camera, orientation: Quat, background: [f32; 3]);
    fn draw_gizmo(&mut self, gizmo: &Scene, pose: Quat);
    fn show_readout(&mut self, readout: &AngleReadout);
}

/// Monotonic seconds since construction, for feeding [`FrameDriver::tick`].
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    start: instant::Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            start: instant::Instant::now(),
        }
    }
}

impl FrameClock {
    pub fn now_sec(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

#[derive(Clone, Debug)]
pub struct FrameDriver {
    refresh_interval: f64,
    min_delta_deg: f32,
    last_check: Option<f64>,
    last_readout: Option<AngleReadout>,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(HUD_REFRESH_HZ, HUD_MIN_DELTA_DEG)
    }
}

impl FrameDriver {
    pub fn new(refresh_hz: f64, min_delta_deg: f32) -> Self {
        Self {
            refresh_interval: 1.0 / refresh_hz.max(f64::EPSILON),
            min_delta_deg,
            last_check: None,
            last_readout: None,
        }
    }

    /// Last readout handed to the sink.
    pub fn readout(&self) -> Option<&AngleReadout> {
        self.last_readout.as_ref()
    }

    /// Run one frame at time `now_sec`.
    pub fn tick<S: FrameSink + ?Sized>(&mut self, globe: &mut Globe, now_sec: f64, sink: &mut S) {
        globe.orbit_mut().update();

        let camera = globe.orbit().camera();
        let orientation = globe.orientation().quat();
        sink.draw_scene(globe.scene(), camera, orientation, globe.palette().background);

        let gizmo_pose = match globe.gizmo_mode() {
            GizmoMode::Globe => camera.view_rotation() * orientation,
            GizmoMode::Camera => camera.view_rotation(),
        };
        sink.draw_gizmo(globe.gizmo(), gizmo_pose.normalize());

        let due = self
            .last_check
            .map_or(true, |t| now_sec - t >= self.refresh_interval);
        if !due {
            return;
        }
        self.last_check = Some(now_sec);

        let readout = AngleReadout::measure(orientation, camera);
        let changed = self
            .last_readout
            .map_or(true, |prev| readout.changed_beyond(&prev, self.min_delta_deg));
        if changed {
            sink.show_readout(&readout);
            self.last_readout = Some(readout);
        }
    }
}
