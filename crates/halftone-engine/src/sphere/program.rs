use bytemuck::{Pod, Zeroable};
use wgpu::naga;
use wgpu::util::DeviceExt;

use crate::device::Gpu;
use crate::render::straight_alpha_blend;

use super::backend::SphereBackend;
use super::config::RenderSurface;
use super::error::{SetupError, ShaderStage};
use super::uniforms::SphereUniforms;

const VERTEX_SOURCE: &str = include_str!("shaders/fullscreen_quad.wgsl");
const FRAGMENT_SOURCE: &str = include_str!("shaders/dithered_sphere.wgsl");

const VS_ENTRY: &str = "vs_main";
const FS_ENTRY: &str = "fs_main";

/// Format of every sphere surface.
pub const SURFACE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

// ── quad ──────────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ClipVertex {
    pos: [f32; 2],
}

impl ClipVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ClipVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Two triangles covering clip space.
const FULLSCREEN_QUAD: [ClipVertex; 6] = [
    ClipVertex { pos: [-1.0, -1.0] },
    ClipVertex { pos: [1.0, -1.0] },
    ClipVertex { pos: [-1.0, 1.0] },
    ClipVertex { pos: [-1.0, 1.0] },
    ClipVertex { pos: [1.0, -1.0] },
    ClipVertex { pos: [1.0, 1.0] },
];

// ── program ───────────────────────────────────────────────────────────────

/// Compiled sphere program plus the surface it draws into.
///
/// Owned by exactly one instance. Dropping it frees GPU memory lazily;
/// [`GpuSphereBackend::release`] frees it eagerly.
pub struct SphereProgram {
    pipeline: wgpu::RenderPipeline,
    quad_vbo: wgpu::Buffer,
    uniform_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    surface: RenderSurface,
}

impl SphereProgram {
    /// View of the surface texture, for compositing.
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn surface(&self) -> RenderSurface {
        self.surface
    }
}

/// wgpu implementation of [`SphereBackend`].
///
/// Borrows the window's device for the duration of a frame. Sphere frames are
/// recorded and submitted on their own encoder, ahead of the window pass that
/// composites them.
pub struct GpuSphereBackend<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
    format_features: wgpu::TextureFormatFeatures,
}

impl<'a> GpuSphereBackend<'a> {
    pub fn new(gpu: &'a Gpu<'_>) -> Self {
        Self {
            device: gpu.device(),
            queue: gpu.queue(),
            format_features: gpu.adapter().get_texture_format_features(SURFACE_FORMAT),
        }
    }

    fn check_environment(&self, surface: &RenderSurface) -> Result<(), SetupError> {
        let needed = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
        if !self.format_features.allowed_usages.contains(needed) {
            return Err(SetupError::unsupported(format!(
                "adapter cannot render to and sample {SURFACE_FORMAT:?}"
            )));
        }
        if !self
            .format_features
            .flags
            .contains(wgpu::TextureFormatFeatureFlags::BLENDABLE)
        {
            return Err(SetupError::unsupported(format!("{SURFACE_FORMAT:?} is not blendable")));
        }

        if surface.is_empty() {
            return Err(SetupError::unsupported("surface has zero size"));
        }
        let max = self.device.limits().max_texture_dimension_2d;
        if surface.width > max || surface.height > max {
            return Err(SetupError::unsupported(format!(
                "surface {}x{} exceeds the device limit of {max}",
                surface.width, surface.height
            )));
        }
        Ok(())
    }

    fn create_surface_texture(
        &self,
        surface: &RenderSurface,
        label: &str,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&format!("halftone {label} surface")),
            size: wgpu::Extent3d {
                width: surface.width,
                height: surface.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: SURFACE_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }
}

impl SphereBackend for GpuSphereBackend<'_> {
    type Program = SphereProgram;

    fn create_program(
        &mut self,
        surface: &RenderSurface,
        label: &str,
    ) -> Result<SphereProgram, SetupError> {
        self.check_environment(surface)?;

        let vertex = compile_stage(ShaderStage::Vertex, VERTEX_SOURCE)?;
        let fragment = compile_stage(ShaderStage::Fragment, FRAGMENT_SOURCE)?;
        link(&vertex, &fragment)?;

        // Both modules validated above; wgpu re-parses the same sources.
        let vs = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("halftone {label} vertex")),
            source: wgpu::ShaderSource::Wgsl(VERTEX_SOURCE.into()),
        });
        let fs = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("halftone {label} fragment")),
            source: wgpu::ShaderSource::Wgsl(FRAGMENT_SOURCE.into()),
        });

        let quad_vbo = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("halftone {label} quad vbo")),
            contents: bytemuck::cast_slice(&FULLSCREEN_QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let bind_group_layout =
            self.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("halftone {label} bgl")),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: Some(SphereUniforms::min_binding_size()),
                    },
                    count: None,
                }],
            });

        let uniform_ubo = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("halftone {label} uniforms")),
            size: SphereUniforms::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("halftone {label} bind group")),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_ubo.as_entire_binding(),
            }],
        });

        let pipeline_layout = self.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("halftone {label} pipeline layout")),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("halftone {label} pipeline")),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(VS_ENTRY),
                compilation_options: Default::default(),
                buffers: &[ClipVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some(FS_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: SURFACE_FORMAT,
                    blend: Some(straight_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let (texture, view) = self.create_surface_texture(surface, label);

        log::debug!(
            "{label}: program ready, surface {}x{} @{}x",
            surface.width,
            surface.height,
            surface.pixel_ratio
        );

        Ok(SphereProgram {
            pipeline,
            quad_vbo,
            uniform_ubo,
            bind_group,
            texture,
            view,
            surface: *surface,
        })
    }

    fn draw(&mut self, program: &mut SphereProgram, uniforms: &SphereUniforms) {
        self.queue
            .write_buffer(&program.uniform_ubo, 0, bytemuck::bytes_of(uniforms));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("halftone sphere encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("halftone sphere pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &program.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let [w, h] = program.surface.resolution();
            rpass.set_viewport(0.0, 0.0, w, h, 0.0, 1.0);
            rpass.set_pipeline(&program.pipeline);
            rpass.set_bind_group(0, &program.bind_group, &[]);
            rpass.set_vertex_buffer(0, program.quad_vbo.slice(..));
            rpass.draw(0..FULLSCREEN_QUAD.len() as u32, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
    }

    fn release(&mut self, program: SphereProgram) {
        program.quad_vbo.destroy();
        program.uniform_ubo.destroy();
        program.texture.destroy();
        drop(program);
    }
}

// ── compile / link ────────────────────────────────────────────────────────

/// Parses and validates one WGSL stage.
pub fn compile_stage(stage: ShaderStage, source: &str) -> Result<naga::Module, SetupError> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| SetupError::compile(stage, e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .map_err(|e| SetupError::compile(stage, e.into_inner().to_string()))?;

    Ok(module)
}

/// Checks that two compiled stages form a program the host can drive.
pub fn link(vertex: &naga::Module, fragment: &naga::Module) -> Result<(), SetupError> {
    require_entry(vertex, naga::ShaderStage::Vertex, VS_ENTRY)?;
    require_entry(fragment, naga::ShaderStage::Fragment, FS_ENTRY)?;

    let block = fragment
        .global_variables
        .iter()
        .map(|(_, var)| var)
        .find(|var| {
            var.space == naga::AddressSpace::Uniform
                && var
                    .binding
                    .as_ref()
                    .is_some_and(|b| b.group == 0 && b.binding == 0)
        })
        .ok_or_else(|| {
            SetupError::link("fragment stage declares no uniform block at @group(0) @binding(0)")
        })?;

    let size = u64::from(fragment.types[block.ty].inner.size(fragment.to_ctx()));
    if size != SphereUniforms::SIZE {
        return Err(SetupError::link(format!(
            "uniform block is {size} bytes, host provides {}",
            SphereUniforms::SIZE
        )));
    }
    Ok(())
}

fn require_entry(
    module: &naga::Module,
    stage: naga::ShaderStage,
    name: &str,
) -> Result<(), SetupError> {
    if module
        .entry_points
        .iter()
        .any(|ep| ep.stage == stage && ep.name == name)
    {
        Ok(())
    } else {
        Err(SetupError::link(format!("missing {stage:?} entry point `{name}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── compile ───────────────────────────────────────────────────────────

    #[test]
    fn bundled_stages_compile_and_link() {
        let vs = compile_stage(ShaderStage::Vertex, VERTEX_SOURCE).unwrap();
        let fs = compile_stage(ShaderStage::Fragment, FRAGMENT_SOURCE).unwrap();
        link(&vs, &fs).unwrap();
    }

    #[test]
    fn syntax_error_is_a_compile_failure() {
        let err = compile_stage(ShaderStage::Fragment, "fn fs_main( {").unwrap_err();
        assert!(matches!(err, SetupError::Compile { stage: ShaderStage::Fragment, .. }));
    }

    #[test]
    fn type_error_is_a_compile_failure() {
        let src = "@fragment fn fs_main() -> @location(0) vec4<f32> { return 1.0; }";
        let err = compile_stage(ShaderStage::Fragment, src).unwrap_err();
        assert!(matches!(err, SetupError::Compile { .. }));
    }

    // ── link ──────────────────────────────────────────────────────────────

    #[test]
    fn missing_fragment_entry_is_a_link_failure() {
        let vs = compile_stage(ShaderStage::Vertex, VERTEX_SOURCE).unwrap();
        let other = compile_stage(ShaderStage::Fragment, VERTEX_SOURCE).unwrap();
        let err = link(&vs, &other).unwrap_err();
        assert!(matches!(err, SetupError::Link(_)));
    }

    #[test]
    fn mismatched_uniform_block_is_a_link_failure() {
        let vs = compile_stage(ShaderStage::Vertex, VERTEX_SOURCE).unwrap();
        let src = "
            struct Small { time: f32 };
            @group(0) @binding(0) var<uniform> u: Small;
            @fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(u.time); }
        ";
        let fs = compile_stage(ShaderStage::Fragment, src).unwrap();
        let err = link(&vs, &fs).unwrap_err();
        assert!(err.to_string().contains("48"));
    }

    #[test]
    fn quad_is_six_clip_space_vertices() {
        assert_eq!(FULLSCREEN_QUAD.len(), 6);
        let flat: &[f32] = bytemuck::cast_slice(&FULLSCREEN_QUAD);
        assert_eq!(flat, &[-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, -1.0, 1.0, 1.0, -1.0, 1.0, 1.0]);
    }
}
