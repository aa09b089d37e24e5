// src/app.rs

use std::sync::Arc;

use log::{debug, info};
use thiserror::Error;
use winit::{event::{ElementState, WindowEvent}, window::Window};

use crate::config::AppConfig;
use crate::rendering_lib::frame::{RenderFrame, BACKGROUND_COLOR};
use crate::rendering_lib::renderer::Renderer;
use crate::rendering_lib::shader::GRAPH_SHADER_SOURCE;
use crate::ui::{build_ui, UiState};
use crate::view_lib::{InputController, Session};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create the event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to open the window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create a drawing surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no graphics adapter can present to this window")]
    NoAdapter,

    #[error("the surface reports no supported formats")]
    UnsupportedSurface,

    #[error("failed to open the graphics device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}

pub struct GraphApp {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    renderer: Renderer,
    session: Session,
    controller: InputController,
    ui_state: UiState,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl GraphApp {
    pub async fn new(window: Arc<Window>, app_config: AppConfig) -> Result<Self, AppError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(AppError::NoAdapter)?;
        info!("using adapter {:?}", adapter.get_info().name);
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(AppError::UnsupportedSurface)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = Renderer::new(
            &device, config.format, GRAPH_SHADER_SOURCE,
            config.width as f32, config.height as f32,
        );

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(), egui::ViewportId::ROOT, &window,
            Some(window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, config.format, None, 1);

        let controller = InputController::new(app_config.view.clone());
        let mut session = Session::new(app_config.centered_on(config.width, config.height));
        session.set_viewport(config.width as f32, config.height as f32);

        Ok(Self {
            surface, device, queue, config, size,
            renderer, session, controller,
            ui_state: UiState::default(),
            egui_ctx, egui_state, egui_renderer,
        })
    }

    pub fn get_size(&self) -> winit::dpi::PhysicalSize<u32> { self.size }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            debug!("resize to {}x{}", new_size.width, new_size.height);
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.session.set_viewport(new_size.width as f32, new_size.height as f32);
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.session.update(dt);
    }

    pub fn render(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        let output_texture = self.surface.get_current_texture()?;
        let view = output_texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Main Command Encoder"),
        });

        let frame = RenderFrame::build(&self.session);
        let [r, g, b, a] = BACKGROUND_COLOR;
        self.renderer.render_frame(
            &self.device, &self.queue, &mut encoder, &view,
            &frame,
            self.config.width as f32, self.config.height as f32,
            wgpu::Color { r: r as f64, g: g as f64, b: b as f64, a: a as f64 },
        );

        let raw_input = self.egui_state.take_egui_input(window);
        let mut commands = Vec::new();
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            commands = build_ui(ctx, &mut self.ui_state, &self.session, &frame);
        });
        self.egui_state.handle_platform_output(window, full_output.platform_output);
        let tris = self.egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };
        self.egui_renderer.update_buffers(&self.device, &self.queue, &mut encoder, &tris, &screen_descriptor);
        {
            let mut gui_render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("GUI Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view, resolve_target: None,
                    ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                })],
                depth_stencil_attachment: None, occlusion_query_set: None, timestamp_writes: None,
            });
            self.egui_renderer.render(&mut gui_render_pass, &tris, &screen_descriptor);
        }
        for tex_id in &full_output.textures_delta.free { self.egui_renderer.free_texture(tex_id); }

        self.queue.submit(std::iter::once(encoder.finish()));
        output_texture.present();

        // Panel clicks take effect on the next frame.
        for command in commands {
            self.session.dispatch(command);
        }
        Ok(())
    }

    /// egui gets first refusal; whatever it leaves goes to the graph controls.
    pub fn handle_window_event(&mut self, event: &WindowEvent, window: &Window) -> bool {
        if self.egui_state.on_window_event(window, event).consumed {
            // A drag that ends over the panel still has to end.
            if let WindowEvent::MouseInput { state: ElementState::Released, .. } = event {
                self.session.pointer_released();
            }
            return true;
        }
        self.controller.handle_window_event(event, &mut self.session)
    }
}
