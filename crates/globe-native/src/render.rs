//! wgpu renderer for the globe scene and the orientation gizmo.
//!
//! Scene elements are mirrored into a GPU cache keyed by element id. A new
//! geometry generation destroys and re-uploads the element's buffers; a new
//! version rewrites the existing vertex buffer in place.

mod helpers;
mod targets;

use fnv::FnvHashMap;
use glam::{Mat4, Quat};
use globe_core::{
    draw_rank, model_matrix, vertices, AngleReadout, Camera, Element, ElementId, ElementUniforms,
    FrameSink, Scene, GLOBE_WGSL,
};
use helpers::PipelineKey;
use targets::RenderTargets;
use wgpu::util::DeviceExt;

const GIZMO_VIEWPORT_PX: f32 = 140.0;
const GIZMO_MARGIN_PX: f32 = 12.0;
const GIZMO_EXTENT: f32 = 1.6;

struct GpuElement {
    generation: u64,
    version: u64,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl GpuElement {
    fn destroy(&self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        self.uniform_buffer.destroy();
    }
}

#[derive(Default)]
struct GpuCache {
    elements: FnvHashMap<ElementId, GpuElement>,
}

impl GpuCache {
    /// Bring the GPU copy of `element` up to date. Returns false when the
    /// element has nothing to draw.
    fn sync(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        id: ElementId,
        element: &Element,
    ) -> bool {
        let geometry = element.geometry();
        if geometry.is_empty() || geometry.indices().is_empty() {
            if let Some(old) = self.elements.remove(&id) {
                old.destroy();
            }
            return false;
        }

        let current = self
            .elements
            .get(&id)
            .is_some_and(|gpu| gpu.generation == element.generation());
        if !current {
            if let Some(old) = self.elements.remove(&id) {
                old.destroy();
            }
            self.elements.insert(id, upload(device, layout, element));
        } else if let Some(gpu) = self.elements.get_mut(&id) {
            if gpu.version != element.version() {
                queue.write_buffer(&gpu.vertex_buffer, 0, bytemuck::cast_slice(&vertices(geometry)));
                gpu.version = element.version();
            }
        }
        true
    }

    fn get(&self, id: ElementId) -> Option<&GpuElement> {
        self.elements.get(&id)
    }

    fn clear(&mut self) {
        for (_, gpu) in self.elements.drain() {
            gpu.destroy();
        }
    }
}

fn upload(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, element: &Element) -> GpuElement {
    let geometry = element.geometry();
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(element.name()),
        contents: bytemuck::cast_slice(&vertices(geometry)),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(element.name()),
        contents: bytemuck::cast_slice(geometry.indices()),
        usage: wgpu::BufferUsages::INDEX,
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(element.name()),
        size: std::mem::size_of::<ElementUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(element.name()),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });
    GpuElement {
        generation: element.generation(),
        version: element.version(),
        vertex_buffer,
        index_buffer,
        index_count: geometry.indices().len() as u32,
        uniform_buffer,
        bind_group,
    }
}

#[derive(Clone, Copy)]
struct DrawItem {
    id: ElementId,
    key: PipelineKey,
}

pub struct Renderer<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    shader: wgpu::ShaderModule,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    pipelines: FnvHashMap<PipelineKey, wgpu::RenderPipeline>,
    scene_cache: GpuCache,
    gizmo_cache: GpuCache,
    scene_draws: Vec<DrawItem>,
    gizmo_draws: Vec<DrawItem>,
    clear_color: wgpu::Color,
}

impl<'w> Renderer<'w> {
    pub async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        log::info!(
            "[gpu] {} ({:?}), surface {:?} {}x{}",
            adapter.get_info().name,
            adapter.get_info().backend,
            format,
            config.width,
            config.height
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("globe_shader"),
            source: wgpu::ShaderSource::Wgsl(GLOBE_WGSL.into()),
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("element_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("element_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let targets = RenderTargets::new(&device, config.width, config.height);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            targets,
            shader,
            bind_group_layout,
            pipeline_layout,
            pipelines: FnvHashMap::default(),
            scene_cache: GpuCache::default(),
            gizmo_cache: GpuCache::default(),
            scene_draws: Vec::new(),
            gizmo_draws: Vec::new(),
            clear_color: wgpu::Color::BLACK,
        })
    }

    pub fn window(&self) -> &'w winit::window::Window {
        self.window
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.targets
            .recreate(&self.device, new_size.width, new_size.height);
    }

    fn ensure_pipeline(&mut self, key: PipelineKey) {
        if !self.pipelines.contains_key(&key) {
            let pipeline = helpers::make_element_pipeline(
                &self.device,
                &self.pipeline_layout,
                &self.shader,
                self.config.format,
                key,
            );
            log::debug!("[gpu] built pipeline {:?}", key);
            self.pipelines.insert(key, pipeline);
        }
    }

    /// Sync and queue every visible element of `scene` in `draw_rank` order.
    fn queue_scene(&mut self, scene: &Scene, view_proj: Mat4, orientation: Quat, gizmo: bool) {
        let mut draws = Vec::with_capacity(scene.len());
        for (id, element) in scene.iter() {
            if !element.material().visible {
                continue;
            }
            let cache = if gizmo {
                &mut self.gizmo_cache
            } else {
                &mut self.scene_cache
            };
            if !cache.sync(&self.device, &self.queue, &self.bind_group_layout, id, element) {
                continue;
            }
            if let Some(gpu) = cache.get(id) {
                let uniforms = ElementUniforms::new(view_proj, model_matrix(orientation, element), element);
                self.queue
                    .write_buffer(&gpu.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
            }
            let material = element.material();
            let key = PipelineKey {
                topology: element.geometry().topology(),
                depth_test: material.depth_test,
                depth_write: material.depth_write,
            };
            self.ensure_pipeline(key);
            draws.push((draw_rank(material), DrawItem { id, key }));
        }
        draws.sort_by_key(|(rank, _)| *rank);
        let draws: Vec<DrawItem> = draws.into_iter().map(|(_, d)| d).collect();
        if gizmo {
            self.gizmo_draws = draws;
        } else {
            self.scene_draws = draws;
        }
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            draw_items(&mut rpass, &self.pipelines, &self.scene_cache, &self.scene_draws);
        }
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("gizmo_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            let w = self.config.width as f32;
            let side = GIZMO_VIEWPORT_PX.min(w).min(self.config.height as f32);
            let x = (w - side - GIZMO_MARGIN_PX).max(0.0);
            rpass.set_viewport(x, GIZMO_MARGIN_PX, side, side, 0.0, 1.0);
            draw_items(&mut rpass, &self.pipelines, &self.gizmo_cache, &self.gizmo_draws);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Drop every GPU buffer held for the scene and the gizmo.
    pub fn release(&mut self) {
        self.scene_cache.clear();
        self.gizmo_cache.clear();
        self.scene_draws.clear();
        self.gizmo_draws.clear();
        log::debug!("[gpu] released element buffers");
    }
}

fn draw_items(
    rpass: &mut wgpu::RenderPass<'_>,
    pipelines: &FnvHashMap<PipelineKey, wgpu::RenderPipeline>,
    cache: &GpuCache,
    items: &[DrawItem],
) {
    for item in items {
        let (Some(pipeline), Some(gpu)) = (pipelines.get(&item.key), cache.get(item.id)) else {
            continue;
        };
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &gpu.bind_group, &[]);
        rpass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
        rpass.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..gpu.index_count, 0, 0..1);
    }
}

impl FrameSink for Renderer<'_> {
    fn draw_scene(&mut self, scene: &Scene, camera: &Camera, orientation: Quat, background: [f32; 3]) {
        let [r, g, b] = background;
        self.clear_color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        };
        self.queue_scene(scene, camera.view_proj(), orientation, false);
    }

    fn draw_gizmo(&mut self, gizmo: &Scene, pose: Quat) {
        let e = GIZMO_EXTENT;
        let view_proj = Mat4::orthographic_rh(-e, e, -e, e, -e, e);
        self.queue_scene(gizmo, view_proj, pose, true);
    }

    fn show_readout(&mut self, readout: &AngleReadout) {
        self.window
            .set_title(&format!("Globe  |  axis to camera: {readout}"));
    }
}
