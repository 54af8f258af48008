mod keys;
mod redraw;

use anyhow::{Context, Result};
use clap::Parser;
use egui::Context as EguiContext;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use redraw::RedrawScheduler;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use vectorscape_common::SceneConfig;
use vectorscape_driver::FrameDriver;
use vectorscape_input::{Action, MoveKey, action_for_key};
use vectorscape_kernel::World;
use vectorscape_render::{PixmapSurface, Surface};
use vectorscape_render_wgpu::FramePresenter;
use vectorscape_tools::TracingSink;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "vectorscape-desktop", about = "Vectorscape desktop application")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene config (YAML or JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed for world generation; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Show the debug panel at startup
    #[arg(long)]
    debug: bool,
}

/// Window, GPU device and UI state, created once the event loop resumes.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    presenter: FramePresenter,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct App {
    driver: FrameDriver<RedrawScheduler>,
    frame: PixmapSurface,
    started: Instant,
    show_debug: bool,
    egui_ctx: EguiContext,
    gpu: Option<Gpu>,
}

impl App {
    fn new(config: &SceneConfig, world: World, show_debug: bool) -> Result<Self> {
        let driver = FrameDriver::new(config, world, RedrawScheduler::default())
            .with_diagnostics(Box::new(TracingSink));
        let viewport = driver.viewport();
        let frame = PixmapSurface::new(viewport.width, viewport.height)?;
        Ok(Self {
            driver,
            frame,
            started: Instant::now(),
            show_debug,
            egui_ctx: EguiContext::default(),
            gpu: None,
        })
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let viewport = self.driver.viewport();
        let attrs = Window::default_attributes()
            .with_title("Vectorscape")
            .with_inner_size(PhysicalSize::new(viewport.width, viewport.height));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no suitable GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("vectorscape_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let presenter = FramePresenter::new(&device, surface_format, viewport.width, viewport.height);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        self.driver.scheduler_mut().attach(window.clone());
        self.gpu = Some(Gpu {
            window,
            surface,
            device,
            queue,
            config,
            presenter,
            egui_winit,
            egui_renderer,
        });

        // The canvas follows the real window size, clamped to the configured bounds.
        self.resize(size.width, size.height);
        self.driver.start()?;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Some(gpu) = &mut self.gpu {
            gpu.config.width = width.max(1);
            gpu.config.height = height.max(1);
            gpu.surface.configure(&gpu.device, &gpu.config);
        }
        self.driver.handle_action(Action::Resize { width, height });
        let viewport = self.driver.viewport();
        if let Err(e) = self.frame.resize(viewport.width, viewport.height) {
            tracing::error!("failed to resize frame buffer: {e}");
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if key == KeyCode::F1 && pressed {
            self.show_debug = !self.show_debug;
            return;
        }
        if let Some(name) = keys::key_name(key) {
            self.driver.handle_action(action_for_key(name, pressed));
        }
    }

    fn redraw(&mut self) {
        if self.driver.scheduler_mut().take_pending().is_some() {
            let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
            if let Err(e) = self.driver.tick(now_ms, &mut self.frame) {
                tracing::warn!("tick skipped: {e}");
            }
        }
        self.present();
    }

    fn present(&mut self) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let (width, height) = self.frame.size();
        gpu.presenter
            .upload(&gpu.device, &gpu.queue, self.frame.pixels(), width, height);
        gpu.presenter.render(
            &gpu.device,
            &gpu.queue,
            &view,
            (gpu.config.width, gpu.config.height),
        );

        let driver = &self.driver;
        let show_debug = self.show_debug;
        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            if show_debug {
                draw_debug_panel(ctx, driver);
            }
        });
        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
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
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
    }
}

fn draw_debug_panel(ctx: &EguiContext, driver: &FrameDriver<RedrawScheduler>) {
    let report = driver.last_report().unwrap_or_default();
    let camera = driver.camera();
    egui::Window::new("Debug")
        .default_pos([10.0, 10.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("FPS: {}", report.fps));
            ui.label(format!("Objects: {}", report.object_count));
            ui.label(format!("Particles: {}", report.particle_count));
            ui.separator();
            ui.label(format!(
                "Camera: ({:.1}, {:.1}, {:.1})",
                camera.x, camera.y, camera.z
            ));
            ui.label(format!("Yaw: {:.3} rad", camera.rot_y));
            ui.label(format!(
                "Auto-rotate: {}",
                if driver.auto_rotate() { "on" } else { "off" }
            ));
            ui.separator();
            ui.small("WASD/Arrows: Move | Space: Auto-rotate | F1: Debug");
        });
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        if let Err(e) = self.init_gpu(event_loop) {
            tracing::error!("failed to initialize window: {e:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = &mut self.gpu {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                self.driver.shutdown();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.resize(new_size.width, new_size.height);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::Focused(false) => {
                // Key-up events are lost while unfocused.
                for key in MoveKey::ALL {
                    self.driver.handle_action(Action::Move {
                        key,
                        pressed: false,
                    });
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("vectorscape-desktop starting");

    let config = match &cli.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SceneConfig::default(),
    };
    let world = match cli.seed {
        Some(seed) => World::generate(&config, &mut Pcg64Mcg::seed_from_u64(seed)),
        None => World::generate(&config, &mut rand::rng()),
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(&config, world, cli.debug)?;
    event_loop.run_app(&mut app)?;

    Ok(())
}
