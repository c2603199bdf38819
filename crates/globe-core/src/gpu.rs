//! Plain-old-data layouts shared with `shaders/globe.wgsl`.

use crate::scene::{Element, Geometry, Material};
use glam::{Mat4, Quat, Vec3};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobeVertex {
    pub position: [f32; 3],
    pub line_distance: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ElementUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// `dash, gap, enabled, unused`
    pub dash: [f32; 4],
}

impl ElementUniforms {
    pub fn new(view_proj: Mat4, model: Mat4, element: &Element) -> Self {
        let material = element.material();
        let dash = match material.dash {
            Some([d, g]) => [d, g, 1.0, 0.0],
            None => [0.0; 4],
        };
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            color: material.rgba(),
            dash,
        }
    }
}

/// Interleave positions and line distances into vertex data.
pub fn vertices(geometry: &Geometry) -> Vec<GlobeVertex> {
    geometry
        .positions()
        .iter()
        .zip(geometry.line_distances())
        .map(|(p, d)| GlobeVertex {
            position: p.to_array(),
            line_distance: *d,
        })
        .collect()
}

/// Element transform: local translation and uniform scale, then the globe
/// orientation.
#[inline]
pub fn model_matrix(orientation: Quat, element: &Element) -> Mat4 {
    Mat4::from_quat(orientation)
        * Mat4::from_scale_rotation_translation(
            Vec3::splat(element.scale()),
            Quat::IDENTITY,
            element.position(),
        )
}

/// Draw order bucket for a material. Translucent occluders that write depth
/// (the sphere) go first so depth-tested overlays behind them are hidden;
/// opaque elements follow; translucent surfaces without depth writes go last.
#[inline]
pub fn draw_rank(material: &Material) -> u8 {
    match (material.opacity < 1.0, material.depth_write) {
        (true, true) => 0,
        (false, _) => 1,
        (true, false) => 2,
    }
}
