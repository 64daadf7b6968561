use std::time::Duration;

use glam::DVec2;
use tracing::{debug, info};

use crate::control::{CommandQueue, RuntimeCommand};
use crate::core::schema::NormalizedParameters;
use crate::investigation::probe::{self, Annotation};
use crate::platform::surface::{Align, DrawCommand, Surface, palette};
use crate::simulation::camera::Camera;
use crate::simulation::host::{FrameHost, FrameToken, ManualHost};
use crate::simulation::object::{SimulationObject, Stage};
use crate::simulation::router::{Constructor, RuntimeHandle};

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Longest simulated step a single frame may take.
    pub max_step: Duration,
    pub grid_spacing: f64,
    /// Hover hit radius in surface units.
    pub hover_radius: f64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_step: Duration::from_millis(50),
            grid_spacing: 50.0,
            hover_radius: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Clock {
    Stopped,
    Running {
        pending: Option<FrameToken>,
        last: Duration,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Stale, cancelled or unexpected token; nothing ran.
    Ignored,
    Rendered { step: f64, settled: bool },
}

/// Owns the camera, the live objects and the frame clock.
pub struct SimulationRuntime<H: FrameHost> {
    host: H,
    config: RuntimeConfig,
    camera: Camera,
    objects: Vec<Box<dyn SimulationObject>>,
    constructor: Option<Constructor>,
    params: Option<NormalizedParameters>,
    clock: Clock,
    sim_time: f64,
    frames: u64,
    viewport: DVec2,
}

impl<H: FrameHost> SimulationRuntime<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, RuntimeConfig::default())
    }

    pub fn with_config(host: H, config: RuntimeConfig) -> Self {
        Self {
            host,
            config,
            camera: Camera::new(),
            objects: Vec::new(),
            constructor: None,
            params: None,
            clock: Clock::Stopped,
            sim_time: 0.0,
            frames: 0,
            viewport: DVec2::new(900.0, 600.0),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn objects(&self) -> &[Box<dyn SimulationObject>] {
        &self.objects
    }

    pub fn params(&self) -> Option<&NormalizedParameters> {
        self.params.as_ref()
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Frames rendered since the runtime was created.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_running(&self) -> bool {
        matches!(self.clock, Clock::Running { .. })
    }

    /// Replaces the scene and starts the clock.
    pub fn load(&mut self, constructor: Constructor, params: NormalizedParameters) {
        self.stop();
        info!(target: "runtime", topic = %params.topic, "loading simulation");
        self.constructor = Some(constructor);
        self.params = Some(params);
        self.sim_time = 0.0;
        self.rebuild();
        self.start();
    }

    pub fn load_handle(&mut self, handle: &RuntimeHandle, params: NormalizedParameters) {
        self.load(handle.constructor(), params);
    }

    /// Rebuilds the current scene from scratch and restarts the clock.
    pub fn reset(&mut self) {
        self.stop();
        self.sim_time = 0.0;
        self.rebuild();
        self.start();
    }

    /// Rebuilds the scene for new parameters. A running clock keeps running.
    pub fn update_params(&mut self, params: NormalizedParameters) {
        self.params = Some(params);
        self.sim_time = 0.0;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.objects.clear();
        let (Some(constructor), Some(params)) = (self.constructor.as_ref(), self.params.as_ref()) else {
            return;
        };
        self.camera.fit(params);
        let mut stage = Stage::new(&mut self.objects, &self.camera);
        constructor(params, &mut stage);
        debug!(
            target: "runtime",
            objects = self.objects.len(),
            auto_scale = self.camera.auto_scale(),
            "scene built"
        );
    }

    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        let last = self.host.now();
        let pending = Some(self.host.request_frame());
        self.clock = Clock::Running { pending, last };
    }

    /// Stops the clock; the pending frame request is cancelled.
    pub fn stop(&mut self) {
        if let Clock::Running { pending: Some(token), .. } = self.clock {
            self.host.cancel_frame(token);
        }
        self.clock = Clock::Stopped;
    }

    pub fn play(&mut self) {
        self.start();
    }

    pub fn pause(&mut self) {
        self.stop();
    }

    /// Runs one frame for a delivered request.
    pub fn tick(&mut self, token: FrameToken, surface: &mut dyn Surface) -> FrameOutcome {
        let Clock::Running { pending: Some(expected), last } = self.clock else {
            return FrameOutcome::Ignored;
        };
        if expected != token {
            return FrameOutcome::Ignored;
        }

        let now = self.host.now();
        let step = now.saturating_sub(last).min(self.config.max_step).as_secs_f64();
        self.clock = Clock::Running { pending: None, last: now };
        self.sim_time += step;

        for object in &mut self.objects {
            object.update(step, self.sim_time);
        }
        let settled = self.objects.iter().any(|o| o.is_settled());

        self.render(surface);
        self.frames += 1;
        debug!(target: "runtime", frame = self.frames, step, sim_time = self.sim_time, "frame");

        if settled {
            info!(target: "runtime", sim_time = self.sim_time, "motion settled; stopping");
            self.stop();
        } else {
            let next = self.host.request_frame();
            self.clock = Clock::Running { pending: Some(next), last: now };
        }
        FrameOutcome::Rendered { step, settled }
    }

    /// Draws the current state without advancing time.
    pub fn render(&mut self, surface: &mut dyn Surface) {
        let viewport = surface.viewport();
        self.viewport = viewport;
        let view = self.camera.view_transform(viewport);

        surface.clear();
        surface.grid(self.config.grid_spacing, view);
        surface.push_transform(view);
        for object in &self.objects {
            object.render(surface, &self.camera);
        }
        surface.pop_transform();
        surface.draw(DrawCommand::Text {
            at: DVec2::new(viewport.x - 16.0, viewport.y - 10.0),
            text: format!(
                "Zoom: {:.0}%  |  Unit: {}  |  Scroll to zoom  |  Drag to pan",
                self.camera.zoom() * 100.0,
                self.camera.unit()
            ),
            align: Align::Right,
            color: palette::OVERLAY,
        });
    }

    /// Annotation of the first object near a viewport point.
    pub fn hover(&self, point: DVec2) -> Option<Annotation> {
        let local = self
            .camera
            .view_transform(self.viewport)
            .inverse()
            .transform_point2(point);
        probe::hit(&self.objects, &self.camera, local, self.config.hover_radius)
    }

    pub fn apply(&mut self, command: RuntimeCommand) {
        debug!(target: "runtime", ?command, "command");
        match command {
            RuntimeCommand::Pause => self.pause(),
            RuntimeCommand::Resume => self.play(),
            RuntimeCommand::Reset => self.reset(),
            RuntimeCommand::SetZoom(zoom) => self.camera.set_zoom(zoom),
            RuntimeCommand::ZoomBy(factor) => self.camera.zoom_by(factor),
            RuntimeCommand::SetPan(x, y) => self.camera.set_pan(x, y),
            RuntimeCommand::PanBy(dx, dy) => self.camera.pan_by(DVec2::new(dx, dy)),
            RuntimeCommand::ResetView => self.camera.reset_view(),
            RuntimeCommand::SetUnit(unit) => self.camera.set_unit(unit),
        }
    }

    /// Applies every queued command. Call between frames.
    pub fn drain(&mut self, queue: &CommandQueue) -> usize {
        let mut applied = 0;
        while let Some(command) = queue.try_recv() {
            self.apply(command);
            applied += 1;
        }
        applied
    }
}

impl SimulationRuntime<ManualHost> {
    /// Advances the manual clock by `dt` and delivers the due frames.
    pub fn pump(&mut self, dt: Duration, surface: &mut dyn Surface) -> FrameOutcome {
        self.host.advance(dt);
        let mut outcome = FrameOutcome::Ignored;
        for token in self.host.drain_due() {
            if let rendered @ FrameOutcome::Rendered { .. } = self.tick(token, surface) {
                outcome = rendered;
            }
        }
        outcome
    }
}
