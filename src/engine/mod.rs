pub mod core;

use std::collections::VecDeque;

use anyhow::Result;
use kinema::control::CommandQueue;
use kinema::investigation::probe::Annotation;
use kinema::platform::surface::RecordingSurface;
use kinema::simulation::host::ManualHost;
use kinema::simulation::object::SimulationObject as _;
use kinema::simulation::router::RouteSource;
use kinema::simulation::runtime::{FrameOutcome, SimulationRuntime};
use kinema::{attach_computed, builtin_router, normalize_str, NormalizedParameters};
use serde::Serialize;

use self::core::{EngineConfig, FixedTimestep};

/// Summary of one headless run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub topic: String,
    pub scene: &'static str,
    pub frames: u64,
    pub sim_time: f64,
    pub settled: bool,
    pub commands: usize,
    pub zoom: f64,
    pub unit: String,
    pub draws: usize,
    pub annotations: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub parameters: NormalizedParameters,
    pub run: RunReport,
}

pub struct EngineApp {
    config: EngineConfig,
    surface: RecordingSurface,
    runtime: SimulationRuntime<ManualHost>,
}

impl EngineApp {
    pub fn new(config: EngineConfig) -> Self {
        let surface = RecordingSurface::new(config.surface_width, config.surface_height);
        let runtime = SimulationRuntime::with_config(ManualHost::new(), config.runtime());
        Self {
            config,
            surface,
            runtime,
        }
    }

    /// Normalizes a problem, animates its scene and reports what happened.
    pub fn run(&mut self, problem: &str, frames: Option<u64>) -> Result<RunOutput> {
        tracing::info!(target: "engine", app = %self.config.app_name, "Engine starting");

        let mut params = normalize_str(problem);
        attach_computed(&mut params);
        let topic = params.topic;

        let handle = builtin_router().route(&params);
        let scene = match handle.source() {
            RouteSource::Registered => "registered",
            RouteSource::Stub => "stub",
        };
        tracing::info!(target: "engine", %topic, scene, status = handle.status().as_str(), "routed problem");

        self.runtime.load_handle(&handle, params.clone());
        self.runtime.camera_mut().set_unit(self.config.unit);
        self.runtime.camera_mut().set_zoom(self.config.zoom);

        let limit = frames.unwrap_or(self.config.max_frames);
        let (settled, commands) = self.drive(limit);
        let draws = self.surface.draws().count();

        let annotations = self
            .runtime
            .objects()
            .iter()
            .filter_map(|object| {
                object
                    .annotation()
                    .map(|p| Annotation::from_params(p, object.caption()).lines())
            })
            .collect();

        let run = RunReport {
            topic: topic.to_string(),
            scene,
            frames: self.runtime.frames(),
            sim_time: self.runtime.sim_time(),
            settled,
            commands,
            zoom: self.runtime.camera().zoom(),
            unit: self.runtime.camera().unit().to_string(),
            draws,
            annotations,
        };
        tracing::info!(
            target: "engine",
            frames = run.frames,
            sim_time = run.sim_time,
            settled = run.settled,
            "Engine shutdown complete"
        );
        Ok(RunOutput { parameters: params, run })
    }

    /// Steps frames until the scene settles or `limit` frames have rendered,
    /// applying scripted commands at their frame. Returns whether the scene
    /// settled and how many commands were applied.
    fn drive(&mut self, limit: u64) -> (bool, usize) {
        let (queue, sender) = CommandQueue::new();
        let mut script: VecDeque<_> = {
            let mut script = self.config.script.clone();
            script.sort_by_key(|s| s.frame);
            script.into()
        };
        let mut timestep = FixedTimestep::from_fps(self.config.target_fps);
        let frame = timestep.frame_duration();
        let mut applied = 0;

        while self.runtime.frames() < limit {
            while let Some(next) = script.front() {
                if next.frame > self.runtime.frames() {
                    break;
                }
                sender.send(next.command.clone());
                script.pop_front();
            }
            applied += self.runtime.drain(&queue);

            if !self.runtime.is_running() {
                // A paused run renders nothing until the script resumes it.
                match script.pop_front() {
                    Some(next) => {
                        sender.send(next.command);
                        continue;
                    }
                    None => break,
                }
            }

            timestep.accumulate(frame);
            while timestep.should_step() {
                match self.runtime.pump(frame, &mut self.surface) {
                    FrameOutcome::Rendered { settled: true, .. } => return (true, applied),
                    FrameOutcome::Rendered { .. } => {}
                    FrameOutcome::Ignored => {
                        tracing::debug!(target: "engine", "frame ignored");
                    }
                }
            }
        }
        (false, applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinema::control::RuntimeCommand;
    use kinema::simulation::camera::Unit;

    use super::core::ScriptedCommand;

    #[test]
    fn test_run_reports_enriched_problem() {
        let mut app = EngineApp::new(EngineConfig::default());
        let output = app
            .run(r#"{"topic": "waves", "waves": {"frequency": 170, "wavelength": 2}}"#, Some(30))
            .unwrap();

        assert_eq!(output.run.topic, "waves");
        assert_eq!(output.run.scene, "registered");
        assert_eq!(output.run.frames, 30);
        assert!(!output.run.settled);
        assert!(output.run.draws > 0);
        assert_eq!(output.parameters.formulas.get("wave_speed"), Some(340.0));
        assert_eq!(output.run.annotations.len(), 1);
    }

    #[test]
    fn test_settling_scene_ends_early() {
        let config = EngineConfig {
            target_fps: 20,
            ..EngineConfig::default()
        };
        let mut app = EngineApp::new(config);
        let output = app
            .run(r#"{"topic": "pulley_spring"}"#, Some(5000))
            .unwrap();
        assert!(output.run.settled);
        assert!(output.run.frames < 5000);
    }

    #[test]
    fn test_script_pauses_and_resumes() {
        let config = EngineConfig {
            script: vec![
                ScriptedCommand { frame: 0, command: RuntimeCommand::SetZoom(2.0) },
                ScriptedCommand { frame: 5, command: RuntimeCommand::Pause },
                ScriptedCommand { frame: 5, command: RuntimeCommand::SetUnit(Unit::Cm) },
                ScriptedCommand { frame: 8, command: RuntimeCommand::Resume },
            ],
            ..EngineConfig::default()
        };
        let mut app = EngineApp::new(config);
        let output = app.run(r#"{"topic": "spring"}"#, Some(20)).unwrap();

        assert_eq!(output.run.frames, 20);
        assert_eq!(output.run.commands, 4);
        assert_eq!(output.run.zoom, 2.0);
        assert_eq!(output.run.unit, "cm");
    }

    #[test]
    fn test_pause_without_resume_ends_the_run() {
        let config = EngineConfig {
            script: vec![ScriptedCommand { frame: 3, command: RuntimeCommand::Pause }],
            ..EngineConfig::default()
        };
        let mut app = EngineApp::new(config);
        let output = app.run(r#"{"topic": "waves"}"#, Some(50)).unwrap();
        assert_eq!(output.run.frames, 3);
        assert!(!output.run.settled);
    }
}
