//! The globe context: every piece of mutable session state in one struct,
//! passed explicitly to command handlers and the frame driver.

use crate::camera::{Camera, OrbitControls};
use crate::constants::default_orientation;
use crate::controls::{BackFaceTarget, Command, Param, Params};
use crate::error::Result;
use crate::frame::GizmoMode;
use crate::geometry::SphereParams;
use crate::orientation::Orientation;
use crate::overlays::{self, OverlayHandles};
use crate::scene::Scene;
use crate::theme::{Palette, Theme};
use glam::Quat;
use rand::Rng;

/// Session configuration. Defaults come from `constants`; front-ends may
/// override individual fields before mounting.
#[derive(Clone, Debug)]
pub struct GlobeConfig {
    pub sphere: SphereParams,
    pub params: Params,
    pub default_orientation: Quat,
    pub camera: Camera,
    pub theme: Theme,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            sphere: SphereParams::default(),
            params: Params::default(),
            default_orientation: default_orientation(),
            camera: Camera::default(),
            theme: Theme::default(),
        }
    }
}

pub struct Globe {
    config: GlobeConfig,
    params: Params,
    scene: Scene,
    overlays: OverlayHandles,
    gizmo: Scene,
    orientation: Orientation,
    orbit: OrbitControls,
    theme: Theme,
    gizmo_mode: GizmoMode,
    equator_back_faces: bool,
    meridian_back_faces: bool,
    mounted: bool,
}

impl Globe {
    /// Mount: allocate every scene element in its default state.
    pub fn new(config: GlobeConfig) -> Result<Self> {
        let params = config.params.clone();
        let theme = config.theme;
        let palette = theme.palette();
        let (scene, overlays) = overlays::build_scene(&config.sphere, &params, &palette)?;
        let gizmo = overlays::build_gizmo(&palette)?;
        let orientation = Orientation::new(config.default_orientation);
        let orbit = OrbitControls::new(config.camera.clone());
        log::info!(
            "[scene] mounted {} elements (R = {}, {} segments)",
            scene.len(),
            config.sphere.radius,
            config.sphere.segments
        );
        Ok(Self {
            config,
            params,
            scene,
            overlays,
            gizmo,
            orientation,
            orbit,
            theme,
            gizmo_mode: GizmoMode::default(),
            equator_back_faces: false,
            meridian_back_faces: false,
            mounted: true,
        })
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }
    pub fn params(&self) -> &Params {
        &self.params
    }
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
    pub fn overlays(&self) -> &OverlayHandles {
        &self.overlays
    }
    pub fn gizmo(&self) -> &Scene {
        &self.gizmo
    }
    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }
    pub fn orbit(&self) -> &OrbitControls {
        &self.orbit
    }
    pub fn orbit_mut(&mut self) -> &mut OrbitControls {
        &mut self.orbit
    }
    pub fn theme(&self) -> Theme {
        self.theme
    }
    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }
    pub fn gizmo_mode(&self) -> GizmoMode {
        self.gizmo_mode
    }
    pub fn back_faces_visible(&self, target: BackFaceTarget) -> bool {
        match target {
            BackFaceTarget::Equator => self.equator_back_faces,
            BackFaceTarget::Meridians => self.meridian_back_faces,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Handle one control-surface command. Returns whether any state changed.
    /// Every command is ignored once the globe is unmounted.
    pub fn apply<R: Rng + ?Sized>(&mut self, command: Command, rng: &mut R) -> bool {
        if !self.mounted {
            log::debug!("[controls] {:?} ignored after unmount", command);
            return false;
        }
        match command {
            Command::RotateBy { axis, sign } => {
                self.orientation
                    .rotate_by(axis, sign, self.params.rotation_step_deg);
                true
            }
            Command::Set(param, value) => {
                let before = self.params.get(param);
                let after = self.params.set(param, value);
                self.param_changed(param, before, after)
            }
            Command::Nudge(param, sign) => {
                let before = self.params.get(param);
                let after = self.params.nudge(param, sign);
                self.param_changed(param, before, after)
            }
            Command::ResetOrientation => {
                self.orientation.reset();
                self.orbit.reset();
                log::info!("[orientation] reset to default pose");
                true
            }
            Command::ResetAll => {
                self.reset_all();
                true
            }
            Command::RandomFrontRotation => {
                let to_camera = self.orbit.camera().to_camera();
                self.orientation.random_front_rotation(rng, to_camera)
            }
            Command::ToggleTheme => {
                self.theme = self.theme.toggled();
                let palette = self.theme.palette();
                overlays::apply_palette(&mut self.scene, &palette);
                overlays::apply_palette(&mut self.gizmo, &palette);
                log::info!("[controls] theme: {:?}", self.theme);
                true
            }
            Command::ToggleBackFaces(target) => {
                let flag = match target {
                    BackFaceTarget::Equator => &mut self.equator_back_faces,
                    BackFaceTarget::Meridians => &mut self.meridian_back_faces,
                };
                *flag = !*flag;
                let visible = *flag;
                overlays::set_back_faces(&mut self.scene, &self.overlays, target, visible);
                log::info!("[controls] {:?} back faces visible: {}", target, visible);
                true
            }
            Command::ToggleGizmoMode => {
                self.gizmo_mode = self.gizmo_mode.toggled();
                log::info!("[controls] gizmo mode: {:?}", self.gizmo_mode);
                true
            }
        }
    }

    fn param_changed(&mut self, param: Param, before: f32, after: f32) -> bool {
        if before == after {
            return false;
        }
        log::info!("[controls] {} = {:.2}", param.label(), after);
        self.refresh(param);
        true
    }

    /// Recompute the geometry family a parameter drives. Step parameters
    /// drive nothing.
    fn refresh(&mut self, param: Param) {
        if !self.mounted {
            return;
        }
        let sphere = self.config.sphere;
        match param {
            Param::ContactAngle => overlays::apply_contact_angle(
                &mut self.scene,
                &self.overlays,
                &sphere,
                self.params.contact_angle_deg,
            ),
            Param::IntersectionAngle => overlays::apply_intersection_angle(
                &mut self.scene,
                &self.overlays,
                &sphere,
                self.params.intersection_angle_deg,
            ),
            Param::ArcLengthScale => overlays::apply_arc_length_scale(
                &mut self.scene,
                &self.overlays,
                self.params.arc_length_scale_pct,
            ),
            Param::RotationStep
            | Param::ContactStep
            | Param::IntersectionStep
            | Param::ArcLengthStep => {}
        }
    }

    /// Parameters, pose, camera and toggles back to their mount state. The
    /// theme is kept.
    fn reset_all(&mut self) {
        self.params = self.config.params.clone();
        for param in [
            Param::ContactAngle,
            Param::IntersectionAngle,
            Param::ArcLengthScale,
        ] {
            self.refresh(param);
        }
        self.orientation.reset();
        self.orbit.reset();
        self.gizmo_mode = GizmoMode::default();
        self.equator_back_faces = false;
        self.meridian_back_faces = false;
        for target in [BackFaceTarget::Equator, BackFaceTarget::Meridians] {
            overlays::set_back_faces(&mut self.scene, &self.overlays, target, false);
        }
        log::info!("[controls] reset all");
    }

    /// Unmount: free every geometry buffer. The context stays addressable
    /// but draws nothing and ignores further commands.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.scene.release();
        self.gizmo.release();
        log::info!("[scene] unmounted");
    }
}
