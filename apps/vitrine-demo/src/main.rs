use anyhow::Result;
use clap::{Parser, ValueEnum};
use egui::Context as EguiContext;
use glam::Vec3;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use vitrine_common::Color;
use vitrine_render::{RenderError, RenderView, SceneRenderer};
use vitrine_render_wgpu::{request_gpu, RendererOptions, ShadowRefresh, WgpuSceneRenderer};
use vitrine_scene::{FloatingObject, MotionSet, ParticleField, PrimitiveKind, Scene};
use vitrine_surface::{LoadingIndicator, Surface, SurfaceConfig, SurfaceView, DOT_COUNT};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "vitrine-demo", about = "Vitrine decorative 3D surface demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Which page section to compose
    #[arg(long, value_enum, default_value_t = Section::Hero)]
    section: Section,
}

/// Page sections of the site the demo mirrors, each with its own camera,
/// interactivity, loading label, and object set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Section {
    Hero,
    Skills,
    Contact,
}

impl Section {
    fn config(self) -> SurfaceConfig {
        match self {
            Section::Hero => SurfaceConfig::default()
                .camera(Vec3::new(0.0, 0.0, 8.0), 75.0)
                .controls(false),
            Section::Skills => SurfaceConfig::default()
                .camera(Vec3::new(0.0, 0.0, 6.0), 60.0)
                .controls(true)
                .loading_text("Loading Interactive Skills..."),
            Section::Contact => SurfaceConfig::default()
                .camera(Vec3::new(0.0, 0.0, 8.0), 60.0)
                .controls(false)
                .loading_text("Loading Contact Background..."),
        }
    }

    fn populate(self, scene: &mut Scene, motions: &mut MotionSet) {
        match self {
            Section::Hero => {
                ParticleField::default().spawn(scene, motions);
                FloatingObject::new(Vec3::new(-3.0, 2.0, -2.0))
                    .kind(PrimitiveKind::Sphere)
                    .color(Color::BLUE)
                    .scale(0.8)
                    .speed(0.8)
                    .spawn(scene, motions);
                FloatingObject::new(Vec3::new(3.0, -1.0, -1.0))
                    .kind(PrimitiveKind::Box)
                    .color(Color::VIOLET)
                    .scale(0.6)
                    .speed(1.2)
                    .spawn(scene, motions);
                FloatingObject::new(Vec3::new(-2.0, -2.0, 1.0))
                    .kind(PrimitiveKind::Torus)
                    .color(Color::CYAN)
                    .scale(0.4)
                    .speed(1.5)
                    .spawn(scene, motions);
                FloatingObject::new(Vec3::new(2.0, 3.0, 0.0))
                    .kind(PrimitiveKind::Sphere)
                    .color(Color::PINK)
                    .scale(0.5)
                    .speed(0.9)
                    .spawn(scene, motions);
            }
            Section::Skills => {
                // One marker per skill category: primitive kinds cycle with
                // the category index and speed ramps up by 0.2 per category.
                let categories = [
                    (Vec3::new(-2.0, 1.0, 0.0), Color::BLUE),
                    (Vec3::new(2.0, -0.5, 0.0), Color::VIOLET),
                    (Vec3::new(0.0, -1.5, 1.0), Color::CYAN),
                    (Vec3::new(-1.5, -1.0, -1.0), Color::PINK),
                ];
                let kinds = [
                    PrimitiveKind::Sphere,
                    PrimitiveKind::Box,
                    PrimitiveKind::Torus,
                ];
                for (index, (position, color)) in categories.into_iter().enumerate() {
                    FloatingObject::new(position)
                        .kind(kinds[index % kinds.len()])
                        .color(color)
                        .scale(0.8)
                        .speed(0.5 + index as f32 * 0.2)
                        .spawn(scene, motions);
                }
            }
            Section::Contact => {
                FloatingObject::new(Vec3::new(-4.0, 2.0, -3.0))
                    .kind(PrimitiveKind::Sphere)
                    .color(Color::BLUE)
                    .scale(0.5)
                    .speed(0.3)
                    .spawn(scene, motions);
                FloatingObject::new(Vec3::new(4.0, -1.0, -2.0))
                    .kind(PrimitiveKind::Torus)
                    .color(Color::VIOLET)
                    .scale(0.3)
                    .speed(0.5)
                    .spawn(scene, motions);
                FloatingObject::new(Vec3::new(-2.0, -3.0, 1.0))
                    .kind(PrimitiveKind::Box)
                    .color(Color::CYAN)
                    .scale(0.4)
                    .speed(0.4)
                    .spawn(scene, motions);
                FloatingObject::new(Vec3::new(3.0, 3.0, -1.0))
                    .kind(PrimitiveKind::Sphere)
                    .color(Color::PINK)
                    .scale(0.3)
                    .speed(0.6)
                    .spawn(scene, motions);
            }
        }
    }
}

/// One acquired frame, handed back to the host so the egui overlay can be
/// drawn before presentation.
struct ViewportFrame {
    frame: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
}

/// Window-backed renderer driven by the surface controller.
///
/// The swapchain is shared with the application so the overlay can still
/// present after a failure drops this renderer. A lost or outdated
/// swapchain is reconfigured and the frame skipped; any other acquisition
/// failure is a real error and trips the controller's boundary.
struct WindowRenderer {
    swapchain: Arc<wgpu::Surface<'static>>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuSceneRenderer,
}

impl WindowRenderer {
    fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.swapchain.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }
}

impl SceneRenderer for WindowRenderer {
    type Output = Option<ViewportFrame>;

    fn render(
        &mut self,
        scene: &Scene,
        view: &RenderView,
        _elapsed: f32,
    ) -> Result<Option<ViewportFrame>, RenderError> {
        let frame = match self.swapchain.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.swapchain.configure(&self.device, &self.config);
                return Ok(None);
            }
            Err(e) => return Err(RenderError::SurfaceLost(e.to_string())),
        };
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer
            .draw(&self.device, &self.queue, &target, scene, view)?;
        Ok(Some(ViewportFrame {
            frame,
            view: target,
        }))
    }
}

/// Render resolution for the window: physical size with the device pixel
/// ratio capped, so high-DPI displays do not quadruple the GPU load.
fn render_extent(size: PhysicalSize<u32>, scale_factor: f64, config: &SurfaceConfig) -> (u32, u32) {
    let ratio = config.capped_pixel_ratio(scale_factor as f32) as f64;
    let w = (size.width as f64 / scale_factor * ratio).round() as u32;
    let h = (size.height as f64 / scale_factor * ratio).round() as u32;
    (w.max(1), h.max(1))
}

struct DemoApp {
    section: Section,
    window: Option<Arc<Window>>,
    surface: Option<Surface<WindowRenderer>>,
    // App-level GPU handles, cloned from the mounted renderer. They outlive
    // a failure so the fallback notice can still be drawn and presented.
    swapchain: Option<Arc<wgpu::Surface<'static>>>,
    swap_config: Option<wgpu::SurfaceConfiguration>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    dragging: bool,
    cursor: Option<(f64, f64)>,
    retry_requested: bool,
}

impl DemoApp {
    fn new(section: Section) -> Self {
        Self {
            section,
            window: None,
            surface: None,
            swapchain: None,
            swap_config: None,
            device: None,
            queue: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
            dragging: false,
            cursor: None,
            retry_requested: false,
        }
    }

    /// Clone the mounted renderer's GPU handles up to the app and build the
    /// egui renderer against them. Called after every successful mount.
    fn adopt_gpu_handles(&mut self) {
        let Some(renderer) = self.surface.as_mut().and_then(|s| s.renderer_mut()) else {
            return;
        };
        let device = renderer.device.clone();
        let queue = renderer.queue.clone();
        let config = renderer.config.clone();
        self.egui_renderer = Some(egui_wgpu::Renderer::new(
            &device,
            config.format,
            None,
            1,
            false,
        ));
        self.device = Some(device);
        self.queue = Some(queue);
        self.swap_config = Some(config);
    }

    fn draw_overlay(&mut self, ctx: &EguiContext) {
        let Some(surface) = &self.surface else {
            return;
        };
        match surface.view() {
            SurfaceView::Live => {}
            SurfaceView::Loading { label } => Self::draw_loading(ctx, label),
            SurfaceView::Failed { notice } => {
                let mut retry = false;
                egui::Window::new("fallback")
                    .title_bar(false)
                    .resizable(false)
                    .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                    .show(ctx, |ui| {
                        ui.label(notice);
                        if let Some(message) = surface.failure_message() {
                            ui.small(message.to_string());
                        }
                        if ui.button("Retry").clicked() {
                            retry = true;
                        }
                    });
                if retry {
                    self.retry_requested = true;
                }
            }
        }
    }

    fn draw_loading(ctx: &EguiContext, label: &str) {
        let t = ctx.input(|i| i.time) as f32;
        egui::Area::new(egui::Id::new("loading"))
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(160.0, 100.0), egui::Sense::hover());
                let painter = ui.painter();
                let center = rect.center() - egui::vec2(0.0, 24.0);

                // Rotating marker on a ring, one revolution per second.
                let angle = LoadingIndicator::spinner_angle(t);
                painter.circle_stroke(
                    center,
                    16.0,
                    egui::Stroke::new(2.0, egui::Color32::DARK_GRAY),
                );
                let marker = center + 16.0 * egui::vec2(angle.cos(), angle.sin());
                painter.circle_filled(marker, 3.0, egui::Color32::WHITE);

                painter.text(
                    center + egui::vec2(0.0, 32.0),
                    egui::Align2::CENTER_CENTER,
                    label,
                    egui::FontId::proportional(14.0),
                    egui::Color32::GRAY,
                );

                // Three staggered pulsing dots.
                for index in 0..DOT_COUNT {
                    let pulse = LoadingIndicator::dot_pulse(index, t);
                    let x = (index as f32 - 1.0) * 14.0;
                    let alpha = (pulse.opacity * 255.0) as u8;
                    painter.circle_filled(
                        center + egui::vec2(x, 52.0),
                        3.0 * pulse.scale,
                        egui::Color32::from_white_alpha(alpha),
                    );
                }
                ctx.request_repaint();
            });
    }

    /// Run egui for this frame and draw its output onto `target`.
    fn render_overlay(&mut self, target: &wgpu::TextureView) {
        let (Some(window), Some(device), Some(queue), Some(config)) = (
            self.window.clone(),
            self.device.clone(),
            self.queue.clone(),
            self.swap_config.clone(),
        ) else {
            return;
        };
        let Some(egui_winit) = self.egui_winit.as_mut() else {
            return;
        };

        let raw_input = egui_winit.take_egui_input(&window);
        let egui_ctx = self.egui_ctx.clone();
        let full_output = egui_ctx.run(raw_input, |ctx| {
            self.draw_overlay(ctx);
        });

        if let Some(egui_winit) = self.egui_winit.as_mut() {
            egui_winit.handle_platform_output(&window, full_output.platform_output);
        }

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [config.width, config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let Some(egui_renderer) = self.egui_renderer.as_mut() else {
            return;
        };
        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(&device, &queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("overlay_encoder"),
        });
        egui_renderer.update_buffers(&device, &queue, &mut encoder, &paint_jobs, &screen_descriptor);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("overlay_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }
    }

    /// Present a frame when the surface controller produced none: clear the
    /// swapchain and draw the overlay. Covers the loading and failed states.
    fn render_overlay_only(&mut self) {
        let (Some(swapchain), Some(device), Some(queue)) = (
            self.swapchain.clone(),
            self.device.clone(),
            self.queue.clone(),
        ) else {
            return;
        };
        let frame = match swapchain.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(config) = &self.swap_config {
                    swapchain.configure(&device, config);
                }
                return;
            }
            Err(e) => {
                tracing::error!("overlay present failed: {e}");
                return;
            }
        };
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("clear_encoder"),
        });
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("clear_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        });
        queue.submit(std::iter::once(encoder.finish()));
        self.render_overlay(&target);
        frame.present();
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Vitrine")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let swapchain = match instance.create_surface(window.clone()) {
            Ok(surface) => Arc::new(surface),
            Err(e) => {
                tracing::error!("failed to create rendering surface: {e}");
                event_loop.exit();
                return;
            }
        };

        let config = self.section.config();
        let section = self.section;
        let size = window.inner_size();
        let (width, height) = render_extent(size, window.scale_factor(), &config);
        let pixels_per_point = config.capped_pixel_ratio(window.scale_factor() as f32);

        // The factory owns the instance and the shared swapchain; a retry
        // re-acquires the device against the same window surface.
        let factory_window = window.clone();
        let factory_swapchain = swapchain.clone();
        let factory_config = config.clone();
        let factory: Box<dyn FnMut() -> Result<WindowRenderer, RenderError>> =
            Box::new(move || {
                let gpu = request_gpu(&instance, Some(&factory_swapchain))?;

                let size = factory_window.inner_size();
                let (width, height) =
                    render_extent(size, factory_window.scale_factor(), &factory_config);
                let caps = factory_swapchain.get_capabilities(&gpu.adapter);
                let format = caps
                    .formats
                    .iter()
                    .find(|f| f.is_srgb())
                    .copied()
                    .unwrap_or(caps.formats[0]);
                let surface_config = wgpu::SurfaceConfiguration {
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    format,
                    width,
                    height,
                    present_mode: wgpu::PresentMode::AutoVsync,
                    alpha_mode: caps.alpha_modes[0],
                    view_formats: vec![],
                    desired_maximum_frame_latency: 2,
                };
                factory_swapchain.configure(&gpu.device, &surface_config);

                let renderer = WgpuSceneRenderer::new(
                    &gpu.device,
                    format,
                    width,
                    height,
                    RendererOptions {
                        eye: factory_config.camera_position,
                        controls: factory_config.controls,
                        shadow_refresh: if factory_config.shadow_auto_refresh {
                            ShadowRefresh::EveryFrame
                        } else {
                            ShadowRefresh::Static
                        },
                    },
                );
                Ok(WindowRenderer {
                    swapchain: factory_swapchain.clone(),
                    device: gpu.device,
                    queue: gpu.queue,
                    config: surface_config,
                    renderer,
                })
            });

        let mut surface = Surface::new(
            config,
            Box::new(move |scene, motions| section.populate(scene, motions)),
            factory,
        );
        surface.resize(width, height);
        surface.mount();

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(pixels_per_point),
            None,
            None,
        );

        self.window = Some(window);
        self.swapchain = Some(swapchain);
        self.surface = Some(surface);
        self.egui_winit = Some(egui_winit);
        self.adopt_gpu_handles();

        if let Some(surface) = &self.surface {
            if let Some(message) = surface.failure_message() {
                tracing::error!("surface failed to mount: {message}");
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                if let Some(surface) = &mut self.surface {
                    surface.teardown();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                let Some(window) = &self.window else { return };
                let scale = window.scale_factor();
                let Some(surface) = &mut self.surface else {
                    return;
                };
                let (width, height) = render_extent(new_size, scale, surface.config());
                surface.resize(width, height);
                if let Some(renderer) = surface.renderer_mut() {
                    renderer.resize(width, height);
                    self.swap_config = Some(renderer.config.clone());
                } else if let (Some(swapchain), Some(device), Some(config)) = (
                    &self.swapchain,
                    &self.device,
                    self.swap_config.as_mut(),
                ) {
                    // Keep the fallback overlay presentable after a failure.
                    config.width = width.max(1);
                    config.height = height.max(1);
                    swapchain.configure(device, config);
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                self.dragging = state == ElementState::Pressed;
                if !self.dragging {
                    self.cursor = None;
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let current = (position.x, position.y);
                if self.dragging {
                    if let Some(last) = self.cursor {
                        let dx = (current.0 - last.0) as f32;
                        let dy = (current.1 - last.1) as f32;
                        if let Some(orbit) = self
                            .surface
                            .as_mut()
                            .and_then(|s| s.renderer_mut())
                            .and_then(|r| r.renderer.orbit.as_mut())
                        {
                            orbit.rotate(dx, dy);
                        }
                    }
                    self.cursor = Some(current);
                }
            }
            WindowEvent::RedrawRequested => {
                if self.retry_requested {
                    self.retry_requested = false;
                    if let Some(surface) = &mut self.surface {
                        if surface.retry() {
                            self.adopt_gpu_handles();
                        }
                    }
                }

                let output = self.surface.as_mut().and_then(|s| s.tick());
                match output {
                    Some(Some(viewport)) => {
                        self.render_overlay(&viewport.view);
                        viewport.frame.present();
                    }
                    Some(None) => {
                        // Swapchain was reconfigured this frame; skip it.
                    }
                    None => {
                        self.render_overlay_only();
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!(section = ?cli.section, "vitrine-demo starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DemoApp::new(cli.section);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_scene::{Motion, NodeKind, PARTICLE_COUNT};

    fn populate(section: Section) -> (Scene, MotionSet) {
        let mut scene = Scene::new();
        let mut motions = MotionSet::new();
        section.populate(&mut scene, &mut motions);
        (scene, motions)
    }

    /// The drifting meshes of a populated scene as
    /// (position, kind, color, scale, speed), sorted by position so the
    /// comparison does not depend on node id order.
    fn floaters(
        scene: &Scene,
        motions: &MotionSet,
    ) -> Vec<(Vec3, PrimitiveKind, Color, f32, f32)> {
        let mut rows: Vec<_> = scene
            .nodes()
            .filter_map(|(id, node)| match &node.kind {
                NodeKind::Mesh {
                    primitive,
                    material,
                } if *primitive != PrimitiveKind::ParticleSphere => {
                    let speed = match motions.get(id) {
                        Some(Motion::Drift { speed, .. }) => *speed,
                        other => panic!("floater without drift motion: {other:?}"),
                    };
                    Some((
                        node.transform.position,
                        *primitive,
                        material.color,
                        node.transform.scale.x,
                        speed,
                    ))
                }
                _ => None,
            })
            .collect();
        rows.sort_by(|a, b| a.0.x.total_cmp(&b.0.x).then(a.0.y.total_cmp(&b.0.y)));
        rows
    }

    #[test]
    fn hero_composes_particles_and_four_floaters() {
        let (scene, motions) = populate(Section::Hero);
        assert_eq!(floaters(&scene, &motions).len(), 4);
        assert_eq!(scene.mesh_count(), PARTICLE_COUNT + 4);
    }

    #[test]
    fn contact_uses_its_own_distant_arrangement() {
        let (scene, motions) = populate(Section::Contact);
        assert_eq!(
            floaters(&scene, &motions),
            vec![
                (
                    Vec3::new(-4.0, 2.0, -3.0),
                    PrimitiveKind::Sphere,
                    Color::BLUE,
                    0.5,
                    0.3
                ),
                (
                    Vec3::new(-2.0, -3.0, 1.0),
                    PrimitiveKind::Box,
                    Color::CYAN,
                    0.4,
                    0.4
                ),
                (
                    Vec3::new(3.0, 3.0, -1.0),
                    PrimitiveKind::Sphere,
                    Color::PINK,
                    0.3,
                    0.6
                ),
                (
                    Vec3::new(4.0, -1.0, -2.0),
                    PrimitiveKind::Torus,
                    Color::VIOLET,
                    0.3,
                    0.5
                ),
            ]
        );
    }

    #[test]
    fn skills_markers_cycle_kinds_and_ramp_speed() {
        let (scene, motions) = populate(Section::Skills);
        let rows = floaters(&scene, &motions);
        let expected = [
            (
                Vec3::new(-2.0, 1.0, 0.0),
                PrimitiveKind::Sphere,
                Color::BLUE,
                0.5,
            ),
            (
                Vec3::new(-1.5, -1.0, -1.0),
                PrimitiveKind::Sphere,
                Color::PINK,
                1.1,
            ),
            (
                Vec3::new(0.0, -1.5, 1.0),
                PrimitiveKind::Torus,
                Color::CYAN,
                0.9,
            ),
            (
                Vec3::new(2.0, -0.5, 0.0),
                PrimitiveKind::Box,
                Color::VIOLET,
                0.7,
            ),
        ];
        assert_eq!(rows.len(), expected.len());
        for ((position, kind, color, scale, speed), (e_position, e_kind, e_color, e_speed)) in
            rows.into_iter().zip(expected)
        {
            assert_eq!(position, e_position);
            assert_eq!(kind, e_kind);
            assert_eq!(color, e_color);
            assert_eq!(scale, 0.8);
            assert!((speed - e_speed).abs() < 1e-6);
        }
    }

    #[test]
    fn section_cameras_match_their_pages() {
        let hero = Section::Hero.config();
        assert_eq!(hero.camera_position, Vec3::new(0.0, 0.0, 8.0));
        assert!(!hero.controls);

        let skills = Section::Skills.config();
        assert_eq!(skills.camera_position, Vec3::new(0.0, 0.0, 6.0));
        assert!(skills.controls);

        let contact = Section::Contact.config();
        assert_eq!(contact.camera_position, Vec3::new(0.0, 0.0, 8.0));
        assert!(!contact.controls);
    }
}
