//! Particle Swarm
//!
//! Particles pushed around by a random, one-sided pairwise force table and
//! drawn as points every frame.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::SwarmConfig;
use particle_physics::Bounds;
use particle_renderer::{GpuContext, GpuError, ParticleRenderer};
use particle_simulation::ParticleSimulation;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

#[derive(Parser, Debug)]
#[command(about = "Pairwise-force particle swarm")]
struct Args {
    /// Path to the JSON config file
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Run this many ticks without a window, then log a summary at info level
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,

    /// Override the configured particle count
    #[arg(short, long)]
    particles: Option<usize>,

    /// Override the configured RNG seed
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    fn apply(&self, config: &mut SwarmConfig) {
        if let Some(particles) = self.particles {
            config.particles = particles;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

struct GpuState {
    context: GpuContext,
    simulation: ParticleSimulation,
    renderer: ParticleRenderer,

    frame_times: VecDeque<f32>,
    last_frame_time: Instant,
}

impl GpuState {
    async fn new(window: Arc<Window>, config: &SwarmConfig) -> Result<Self, GpuError> {
        let size = window.inner_size();
        let context = GpuContext::new(window, size.width, size.height).await?;

        let simulation = ParticleSimulation::new(
            &config.params(),
            Bounds::new(context.config.width, context.config.height),
        );
        log::info!("✓ Simulation initialized");

        let mut renderer = ParticleRenderer::new(
            &context.device,
            &context.config,
            simulation.particle_count(),
        );
        renderer.resize(&context.queue, context.config.width, context.config.height);
        renderer.upload(
            &context.device,
            &context.queue,
            simulation.feed().vertices(),
        );
        log::info!("✓ Renderer initialized");

        Ok(Self {
            context,
            simulation,
            renderer,
            frame_times: VecDeque::with_capacity(100),
            last_frame_time: Instant::now(),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if self.context.resize(new_size.width, new_size.height) {
            self.renderer
                .resize(&self.context.queue, new_size.width, new_size.height);
            self.simulation
                .set_bounds(Bounds::new(new_size.width, new_size.height));
        }
    }

    /// Run one tick and present it. Returns `(fps, avg_frame_time_ms)`.
    fn render(&mut self) -> Result<(f32, f32), wgpu::SurfaceError> {
        let now = Instant::now();
        let frame_time = (now - self.last_frame_time).as_secs_f32() * 1000.0;
        self.last_frame_time = now;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > 100 {
            self.frame_times.pop_front();
        }
        let avg_frame_time = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        let fps = 1000.0 / avg_frame_time;

        self.simulation.step();
        self.renderer.upload(
            &self.context.device,
            &self.context.queue,
            self.simulation.feed().vertices(),
        );

        let output = self.context.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer
            .render(&self.context.device, &self.context.queue, &view);

        output.present();
        Ok((fps, avg_frame_time))
    }
}

struct App {
    config: SwarmConfig,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    /// First fatal error hit inside the event loop, reported after it exits
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: SwarmConfig) -> Self {
        Self {
            config,
            window: None,
            gpu_state: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error.get_or_insert(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("Particle Swarm")
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.width,
                self.config.height,
            ))
            .with_resizable(self.config.resizable);

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, anyhow::Error::new(e).context("failed to create window"));
                return;
            }
        };

        match pollster::block_on(GpuState::new(window.clone(), &self.config)) {
            Ok(gpu_state) => {
                self.gpu_state = Some(gpu_state);
                self.window = Some(window);
            }
            Err(e) => self.fail(event_loop, anyhow::Error::new(e).context("failed to initialize GPU")),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                log::info!("Quit requested");
                event_loop.exit();
                return;
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(gpu_state) = &mut self.gpu_state else {
                    return;
                };
                match gpu_state.render() {
                    Ok((fps, frame_time)) => {
                        if let Some(window) = &self.window {
                            window.set_title(&format!(
                                "Particle Swarm - {:.0} FPS ({:.2}ms) - {} particles",
                                fps,
                                frame_time,
                                gpu_state.simulation.particle_count()
                            ));
                        }
                    }
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        gpu_state.context.reconfigure()
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        self.fail(event_loop, anyhow::anyhow!("GPU out of memory"));
                        return;
                    }
                    Err(e) => log::warn!("Render error: {e:?}"),
                }
            }

            _ => {}
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Step the swarm `ticks` times without a window and log where it ended up.
fn run_headless(config: &SwarmConfig, ticks: u64) {
    let mut simulation = ParticleSimulation::new(&config.params(), config.bounds());
    let report_every = (ticks / 10).max(1);

    let start = Instant::now();
    simulation.run(|sim| {
        let done = sim.tick_count();
        if done > 0 && done % report_every == 0 {
            log::info!("tick {done}/{ticks}: mean speed {:.4}", sim.mean_speed());
        }
        done >= ticks
    });
    let elapsed = start.elapsed();

    log::info!(
        "✓ {} ticks of {} particles in {:.2?} ({:.2?}/tick), mean speed {:.4}",
        simulation.tick_count(),
        simulation.particle_count(),
        elapsed,
        elapsed.div_f64(ticks.max(1) as f64),
        simulation.mean_speed()
    );
}

fn main() -> Result<()> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = SwarmConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    args.apply(&mut config);
    config.validate()?;
    log::info!("Loaded config: {config:?}");

    if let Some(ticks) = args.headless {
        log::info!("Running {ticks} ticks headless...");
        run_headless(&config, ticks);
        return Ok(());
    }

    log::info!("Starting particle swarm...");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
