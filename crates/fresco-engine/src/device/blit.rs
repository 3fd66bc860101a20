use anyhow::Result;

use crate::paint::PixelValue;
use crate::render::PixelBuffer;

use super::gpu::{Gpu, SurfaceErrorAction};

/// Copies a finished CPU frame to the visible surface.
///
/// The frame is uploaded to a texture and drawn with a single fullscreen
/// triangle. GPU resources are created lazily and rebuilt when the surface
/// format or the frame size changes; a mismatch between frame size and
/// surface size just stretches, which keeps resizes cheap.
///
/// Transient surface errors are absorbed (the frame is skipped); only device
/// memory exhaustion is reported upward.
#[derive(Default)]
pub struct FrameBlitter {
    pipeline: Option<wgpu::RenderPipeline>,
    pipeline_format: Option<wgpu::TextureFormat>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    texture: Option<wgpu::Texture>,
    texture_size: (u32, u32),
    sampler: Option<wgpu::Sampler>,
    clear_color: wgpu::Color,
}

impl FrameBlitter {
    /// `background` is the pixel the surface is cleared to before the copy;
    /// it shows wherever the stretched frame leaves the surface uncovered.
    pub fn new(background: PixelValue) -> Self {
        Self {
            clear_color: unpack_clear_color(background),
            ..Self::default()
        }
    }

    pub fn present(&mut self, gpu: &mut Gpu<'_>, frame: &PixelBuffer) -> Result<()> {
        if frame.width() == 0 || frame.height() == 0 {
            return Ok(());
        }

        self.ensure_pipeline(gpu);
        self.ensure_texture(gpu, frame.width(), frame.height());

        let Some(texture) = self.texture.as_ref() else {
            return Ok(());
        };

        gpu.queue().write_texture(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            frame.as_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * frame.width()),
                rows_per_image: Some(frame.height()),
            },
            wgpu::Extent3d {
                width: frame.width(),
                height: frame.height(),
                depth_or_array_layers: 1,
            },
        );

        let mut gpu_frame = match gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        log::debug!("presentation skipped after surface error");
                        Ok(())
                    }
                    SurfaceErrorAction::Fatal => {
                        Err(anyhow::anyhow!("presentation surface is out of memory"))
                    }
                };
            }
        };

        {
            let Some(pipeline) = self.pipeline.as_ref() else {
                return Ok(());
            };
            let Some(bind_group) = self.bind_group.as_ref() else {
                return Ok(());
            };

            let mut rpass = gpu_frame
                .encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("fresco blit pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &gpu_frame.view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(self.clear_color),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    ..Default::default()
                });

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, bind_group, &[]);
            rpass.draw(0..3, 0..1);
        }

        gpu.submit(gpu_frame);
        Ok(())
    }

    fn ensure_pipeline(&mut self, gpu: &Gpu<'_>) {
        if self.pipeline_format == Some(gpu.surface_format()) && self.pipeline.is_some() {
            return;
        }

        let shader = gpu
            .device()
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("fresco blit shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/blit.wgsl").into()),
            });

        let bind_group_layout =
            gpu.device()
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("fresco blit bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                });

        let layout = gpu
            .device()
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("fresco blit pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = gpu
            .device()
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("fresco blit pipeline"),
                layout: Some(&layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: gpu.surface_format(),
                        blend: None,
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

        self.pipeline_format = Some(gpu.surface_format());
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        // Bindings reference the old layout; rebuild them.
        self.bind_group = None;
    }

    fn ensure_texture(&mut self, gpu: &Gpu<'_>, width: u32, height: u32) {
        if self.texture.is_some() && self.bind_group.is_some() && self.texture_size == (width, height)
        {
            return;
        }

        let texture = gpu.device().create_texture(&wgpu::TextureDescriptor {
            label: Some("fresco frame texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let sampler = self.sampler.get_or_insert_with(|| {
            gpu.device().create_sampler(&wgpu::SamplerDescriptor {
                label: Some("fresco frame sampler"),
                mag_filter: wgpu::FilterMode::Nearest,
                min_filter: wgpu::FilterMode::Nearest,
                ..Default::default()
            })
        });

        let Some(bgl) = self.bind_group_layout.as_ref() else {
            return;
        };

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = gpu.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("fresco blit bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        self.texture = Some(texture);
        self.texture_size = (width, height);
        self.bind_group = Some(bind_group);
    }
}

/// Surface clear color from a packed background pixel ([r, g, b, a] bytes).
fn unpack_clear_color(pixel: PixelValue) -> wgpu::Color {
    let [r, g, b, _] = pixel.to_le_bytes();
    wgpu::Color {
        r: r as f64 / 255.0,
        g: g as f64 / 255.0,
        b: b as f64 / 255.0,
        a: 1.0,
    }
}
