//! Scene model: an arena of named visual elements created once at mount.
//!
//! Elements are addressed by [`ElementId`], which stays valid for the whole
//! session. Parameter changes either mutate an element's geometry in place
//! (bumping its `version`) or replace the geometry buffer wholesale (bumping
//! its `generation`). Renderers key their GPU copies on those two counters.

use crate::error::{GlobeError, Result};
use crate::geometry::{Axis, MeshData};
use fnv::FnvHashMap;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// What an element depicts. Drives theme colors and toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Sphere,
    Axis(Axis),
    PoleMarker,
    Meridian,
    Equator,
    ContactMarker,
    PlaneDisk,
    Cap,
    IntersectionRing,
    IntersectionDot,
    IntersectionLine,
    ArcCurve,
    EquatorContactDot,
    ParallelGuide,
    ReferenceArc,
    ReferenceDot,
    GuideDot,
    GuideLine,
    GizmoAxis(Axis),
    GizmoTip(Axis),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Topology {
    #[default]
    Lines,
    Triangles,
}

/// CPU-side geometry buffer of one element.
///
/// Line geometry carries a cumulative distance per vertex so dashed
/// materials can be resolved by the renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    positions: Vec<Vec3>,
    line_distances: Vec<f32>,
    indices: Vec<u32>,
    topology: Topology,
}

impl Geometry {
    /// Line strip through `points`, closed back to the first point if asked.
    pub fn polyline(points: Vec<Vec3>, closed: bool) -> Self {
        let n = points.len() as u32;
        let mut indices = Vec::with_capacity(points.len() * 2);
        for i in 0..n.saturating_sub(1) {
            indices.extend_from_slice(&[i, i + 1]);
        }
        if closed && n > 2 {
            indices.extend_from_slice(&[n - 1, 0]);
        }
        let mut g = Self {
            positions: points,
            line_distances: Vec::new(),
            indices,
            topology: Topology::Lines,
        };
        g.compute_line_distances();
        g
    }

    /// Single straight segment.
    pub fn segment(a: Vec3, b: Vec3) -> Self {
        Self::polyline(vec![a, b], false)
    }

    pub fn mesh(mesh: MeshData) -> Self {
        let line_distances = vec![0.0; mesh.positions.len()];
        Self {
            positions: mesh.positions,
            line_distances,
            indices: mesh.indices,
            topology: Topology::Triangles,
        }
    }

    fn compute_line_distances(&mut self) {
        self.line_distances.clear();
        self.line_distances.reserve(self.positions.len());
        let mut acc = 0.0;
        let mut prev: Option<Vec3> = None;
        for p in &self.positions {
            if let Some(q) = prev {
                acc += p.distance(q);
            }
            self.line_distances.push(acc);
            prev = Some(*p);
        }
    }

    /// Overwrite the vertices without changing the buffer size. Sizes must
    /// match; surplus input is ignored in release builds.
    pub fn set_points(&mut self, points: &[Vec3]) {
        debug_assert_eq!(points.len(), self.positions.len(), "in-place update must keep size");
        for (dst, src) in self.positions.iter_mut().zip(points) {
            *dst = *src;
        }
        if self.topology == Topology::Lines {
            self.compute_line_distances();
        }
    }

    /// Move the endpoints of a two-vertex segment.
    pub fn set_segment(&mut self, a: Vec3, b: Vec3) {
        self.set_points(&[a, b]);
    }

    /// Move only the last vertex of a line geometry.
    pub fn set_last_point(&mut self, p: Vec3) {
        if let Some(last) = self.positions.last_mut() {
            *last = p;
        }
        self.compute_line_distances();
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn line_distances(&self) -> &[f32] {
        &self.line_distances
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub opacity: f32,
    pub depth_test: bool,
    pub depth_write: bool,
    /// `[dash, gap]` lengths in world units.
    pub dash: Option<[f32; 2]>,
    pub visible: bool,
}

impl Material {
    pub fn line(color: [f32; 3]) -> Self {
        Self {
            color,
            opacity: 1.0,
            depth_test: true,
            depth_write: true,
            dash: None,
            visible: true,
        }
    }

    pub fn solid(color: [f32; 3]) -> Self {
        Self::line(color)
    }

    /// Translucent surface: depth tested but never occluding.
    pub fn translucent(color: [f32; 3], opacity: f32) -> Self {
        Self {
            opacity,
            depth_write: false,
            ..Self::line(color)
        }
    }

    pub fn dashed(mut self, pattern: [f32; 2]) -> Self {
        self.dash = Some(pattern);
        self
    }

    pub fn rgba(&self) -> [f32; 4] {
        [self.color[0], self.color[1], self.color[2], self.opacity]
    }
}

#[derive(Clone, Debug)]
pub struct Element {
    name: &'static str,
    role: Role,
    geometry: Geometry,
    material: Material,
    position: Vec3,
    scale: f32,
    generation: u64,
    version: u64,
}

impl Element {
    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn role(&self) -> Role {
        self.role
    }
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }
    pub fn material(&self) -> &Material {
        &self.material
    }
    /// Translation applied before the globe orientation.
    pub fn position(&self) -> Vec3 {
        self.position
    }
    pub fn scale(&self) -> f32 {
        self.scale
    }
    /// Incremented each time the geometry buffer is replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }
    /// Incremented each time the geometry is mutated in place.
    pub fn version(&self) -> u64 {
        self.version
    }
}

#[derive(Debug, Default)]
pub struct Scene {
    elements: Vec<Element>,
    by_name: FnvHashMap<&'static str, ElementId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        name: &'static str,
        role: Role,
        geometry: Geometry,
        material: Material,
    ) -> Result<ElementId> {
        if self.by_name.contains_key(name) {
            return Err(GlobeError::DuplicateElement(name.to_string()));
        }
        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            name,
            role,
            geometry,
            material,
            position: Vec3::ZERO,
            scale: 1.0,
            generation: 0,
            version: 0,
        });
        self.by_name.insert(name, id);
        Ok(id)
    }

    pub fn lookup(&self, name: &str) -> Result<ElementId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| GlobeError::UnknownElement(name.to_string()))
    }

    #[inline]
    pub fn get(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, e)| (ElementId(i), e))
    }

    /// Swap in a new geometry buffer. The previous buffer is freed before
    /// the new one is installed.
    pub fn replace_geometry(&mut self, id: ElementId, geometry: Geometry) {
        let el = &mut self.elements[id.0];
        drop(std::mem::take(&mut el.geometry));
        el.geometry = geometry;
        el.generation += 1;
    }

    /// Mutate geometry in place; the buffer keeps its size and identity.
    pub fn update_geometry(&mut self, id: ElementId, f: impl FnOnce(&mut Geometry)) {
        let el = &mut self.elements[id.0];
        f(&mut el.geometry);
        el.version += 1;
    }

    pub fn set_position(&mut self, id: ElementId, position: Vec3) {
        self.elements[id.0].position = position;
    }

    pub fn set_scale(&mut self, id: ElementId, scale: f32) {
        self.elements[id.0].scale = scale;
    }

    pub fn material_mut(&mut self, id: ElementId) -> &mut Material {
        &mut self.elements[id.0].material
    }

    /// Recolor every element through `color_for`; geometry is untouched.
    pub fn recolor(&mut self, mut color_for: impl FnMut(Role) -> [f32; 3]) {
        for el in &mut self.elements {
            el.material.color = color_for(el.role);
        }
    }

    /// Free every geometry buffer. Element ids stay addressable but empty.
    pub fn release(&mut self) {
        for el in &mut self.elements {
            drop(std::mem::take(&mut el.geometry));
            el.generation += 1;
        }
        log::debug!("[scene] released {} element buffers", self.elements.len());
    }
}
