use crate::DriverError;
use crate::scheduler::{FrameHandle, Scheduler};
use std::fmt;
use vectorscape_common::{CameraConfig, CanvasConfig, SceneConfig, Viewport};
use vectorscape_input::{Action, InputState};
use vectorscape_kernel::{CameraState, World};
use vectorscape_render::{FrameStats, Surface, WireframeRenderer};
use vectorscape_tools::{DiagnosticsSink, FpsCounter, FrameReport};

/// Lifecycle of the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
    Stopped,
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Everything one tick reads and mutates.
#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub camera: CameraState,
    pub world: World,
    pub viewport: Viewport,
    pub auto_rotate: bool,
    pub input: InputState,
}

impl SimulationContext {
    pub fn new(world: World, viewport: Viewport, auto_rotate: bool) -> Self {
        Self {
            camera: CameraState::default(),
            world,
            viewport,
            auto_rotate,
            input: InputState::new(),
        }
    }
}

/// Runs the per-tick sequence and owns the simulation context.
///
/// The host invokes [`tick`](Self::tick) whenever the handle returned by the
/// scheduler fires. The driver keeps at most one pending handle.
pub struct FrameDriver<S: Scheduler> {
    context: SimulationContext,
    renderer: WireframeRenderer,
    camera_config: CameraConfig,
    canvas: CanvasConfig,
    scheduler: S,
    pending: Option<FrameHandle>,
    state: DriverState,
    fps: FpsCounter,
    diagnostics: Option<Box<dyn DiagnosticsSink>>,
    last_report: Option<FrameReport>,
}

impl<S: Scheduler> FrameDriver<S> {
    pub fn new(config: &SceneConfig, world: World, scheduler: S) -> Self {
        Self {
            context: SimulationContext::new(
                world,
                config.initial_viewport(),
                config.camera.auto_rotate,
            ),
            renderer: WireframeRenderer::from_config(config),
            camera_config: config.camera,
            canvas: config.canvas,
            scheduler,
            pending: None,
            state: DriverState::Idle,
            fps: FpsCounter::new(),
            diagnostics: None,
            last_report: None,
        }
    }

    /// Send a report to `sink` each time an FPS window closes.
    pub fn with_diagnostics(mut self, sink: Box<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    /// Start the loop and schedule the first tick.
    pub fn start(&mut self) -> Result<(), DriverError> {
        if self.state != DriverState::Idle {
            return Err(DriverError::AlreadyStarted(self.state));
        }
        self.state = DriverState::Running;
        self.pending = Some(self.scheduler.schedule_next());
        tracing::info!(
            entities = self.context.world.entity_count(),
            width = self.context.viewport.width,
            height = self.context.viewport.height,
            "frame loop started"
        );
        Ok(())
    }

    /// Run one frame: timing, input, particles, render, then schedule the next tick.
    pub fn tick<T: Surface + ?Sized>(
        &mut self,
        timestamp_ms: f64,
        surface: &mut T,
    ) -> Result<FrameStats, DriverError> {
        if self.state != DriverState::Running {
            tracing::warn!(state = %self.state, "tick rejected");
            return Err(DriverError::NotRunning(self.state));
        }
        self.pending = None;

        if let Some(fps) = self.fps.record_frame(timestamp_ms) {
            self.publish_report(fps);
        }

        let ctx = &mut self.context;
        ctx.camera
            .translate(ctx.input.movement(self.camera_config.move_speed));
        if ctx.auto_rotate {
            ctx.camera.yaw_by(self.camera_config.rotation_speed);
        }

        ctx.world.step_particles();

        let stats = self
            .renderer
            .render_frame(&ctx.world, &ctx.camera, ctx.viewport, surface);

        self.pending = Some(self.scheduler.schedule_next());
        Ok(stats)
    }

    /// Apply an input action between ticks. Returns false when it was ignored.
    pub fn handle_action(&mut self, action: Action) -> bool {
        if self.state == DriverState::Stopped {
            return false;
        }
        let ctx = &mut self.context;
        match action {
            Action::Move { key, pressed } => ctx.input.set_held(key, pressed),
            Action::ToggleAutoRotate => {
                ctx.auto_rotate = !ctx.auto_rotate;
                tracing::debug!(auto_rotate = ctx.auto_rotate, "auto-rotate toggled");
            }
            Action::Resize { width, height } => {
                ctx.viewport = self.canvas.fit(width, height);
                tracing::debug!(
                    width = ctx.viewport.width,
                    height = ctx.viewport.height,
                    "viewport resized"
                );
            }
            Action::Noop => return false,
        }
        true
    }

    /// Cancel the pending tick, release held keys and stop for good.
    pub fn shutdown(&mut self) {
        if self.state == DriverState::Stopped {
            return;
        }
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        self.context.input.release_all();
        self.state = DriverState::Stopped;
        tracing::info!(frames = self.context.world.frame(), "frame loop stopped");
    }

    fn publish_report(&mut self, fps: u32) {
        let report = FrameReport {
            fps,
            object_count: self.context.world.object_count(),
            particle_count: self.context.world.particle_count(),
        };
        if let Some(sink) = self.diagnostics.as_mut() {
            sink.report(&report);
        }
        self.last_report = Some(report);
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn context(&self) -> &SimulationContext {
        &self.context
    }

    pub fn camera(&self) -> &CameraState {
        &self.context.camera
    }

    pub fn world(&self) -> &World {
        &self.context.world
    }

    pub fn viewport(&self) -> Viewport {
        self.context.viewport
    }

    pub fn auto_rotate(&self) -> bool {
        self.context.auto_rotate
    }

    /// Handle of the tick currently scheduled, if any.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Most recent once-per-second report.
    pub fn last_report(&self) -> Option<FrameReport> {
        self.last_report
    }

    pub fn fps(&self) -> &FpsCounter {
        &self.fps
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl FrameDriver<crate::ManualScheduler> {
    /// Fire pending ticks until `frames` have run or the loop stops.
    ///
    /// Timestamps come from `clock`. Returns the stats of the last frame.
    pub fn run_frames<T: Surface + ?Sized>(
        &mut self,
        frames: u32,
        clock: &mut crate::FixedStepClock,
        surface: &mut T,
    ) -> Result<FrameStats, DriverError> {
        let mut last = FrameStats::default();
        for _ in 0..frames {
            if self.scheduler.fire().is_none() {
                break;
            }
            last = self.tick(clock.next_timestamp(), surface)?;
        }
        Ok(last)
    }
}
