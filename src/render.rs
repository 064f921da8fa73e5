use crate::constants::CLEAR_COLOR;
use arrayviz_core::{Camera, Scene};
use web_sys as web;

mod helpers;
mod mesh;

pub static BOXES_WGSL: &str = include_str!("../shaders/boxes.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    opaque_pipeline: wgpu::RenderPipeline,
    translucent_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,

    fill_buffer: wgpu::Buffer,
    line_buffer: wgpu::Buffer,
    fill_count: u32,
    translucent_start: u32,
    line_count: u32,
    signature: Option<mesh::MeshSignature>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
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
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("boxes_shader"),
            source: wgpu::ShaderSource::Wgsl(BOXES_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let opaque_pipeline = helpers::make_scene_pipeline(
            &device,
            &layout,
            &shader,
            "opaque_fill",
            wgpu::PrimitiveTopology::TriangleList,
            true,
            format,
        );
        let translucent_pipeline = helpers::make_scene_pipeline(
            &device,
            &layout,
            &shader,
            "translucent_fill",
            wgpu::PrimitiveTopology::TriangleList,
            false,
            format,
        );
        let line_pipeline = helpers::make_scene_pipeline(
            &device,
            &layout,
            &shader,
            "lines",
            wgpu::PrimitiveTopology::LineList,
            true,
            format,
        );

        let depth_view = helpers::create_depth_view(&device, width, height);
        let fill_buffer = helpers::create_vertex_buffer(&device, "fill_vb", 256);
        let line_buffer = helpers::create_vertex_buffer(&device, "line_vb", 256);
        let [r, g, b] = CLEAR_COLOR;

        Ok(Self {
            surface,
            device,
            queue,
            config,
            opaque_pipeline,
            translucent_pipeline,
            line_pipeline,
            uniform_buffer,
            bind_group,
            depth_view,
            fill_buffer,
            line_buffer,
            fill_count: 0,
            translucent_start: 0,
            line_count: 0,
            signature: None,
            width,
            height,
            clear_color: wgpu::Color { r, g, b, a: 1.0 },
        })
    }

    /// Returns `true` when the surface was reconfigured.
    pub fn resize_if_needed(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        if width == self.width && height == self.height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = helpers::create_depth_view(&self.device, width, height);
        true
    }

    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Rebuild vertex data when any visible box moved, resized, appeared or
    /// disappeared since the last upload.
    pub fn sync_scene(&mut self, scene: &Scene) {
        let sig = mesh::signature(scene);
        if self.signature.as_ref() == Some(&sig) {
            return;
        }
        let built = mesh::build(scene);
        helpers::upload_vertices(
            &self.device,
            &self.queue,
            &mut self.fill_buffer,
            "fill_vb",
            &built.fills,
        );
        helpers::upload_vertices(
            &self.device,
            &self.queue,
            &mut self.line_buffer,
            "line_vb",
            &built.lines,
        );
        self.fill_count = built.fills.len() as u32;
        self.translucent_start = built.translucent_start;
        self.line_count = built.lines.len() as u32;
        self.signature = Some(sig);
    }

    pub fn set_camera(&mut self, camera: &Camera) {
        let g = Globals {
            view_proj: camera.view_proj().to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&g));
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
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);

            // Opaque fills, then outlines and axes, then translucent fills
            // without depth writes so the outlines behind them stay visible.
            if self.translucent_start > 0 {
                rpass.set_pipeline(&self.opaque_pipeline);
                rpass.set_vertex_buffer(0, self.fill_buffer.slice(..));
                rpass.draw(0..self.translucent_start, 0..1);
            }
            if self.line_count > 0 {
                rpass.set_pipeline(&self.line_pipeline);
                rpass.set_vertex_buffer(0, self.line_buffer.slice(..));
                rpass.draw(0..self.line_count, 0..1);
            }
            if self.fill_count > self.translucent_start {
                rpass.set_pipeline(&self.translucent_pipeline);
                rpass.set_vertex_buffer(0, self.fill_buffer.slice(..));
                rpass.draw(self.translucent_start..self.fill_count, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
