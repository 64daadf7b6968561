use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use kinema::control::RuntimeCommand;
use kinema::simulation::camera::Unit;
use kinema::simulation::runtime::RuntimeConfig;
use serde::Deserialize;

/// A command issued once the run has rendered `frame` frames.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptedCommand {
    pub frame: u64,
    pub command: RuntimeCommand,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub app_name: String,
    pub surface_width: f64,
    pub surface_height: f64,
    pub target_fps: u32,
    /// Upper bound on rendered frames for one run.
    pub max_frames: u64,
    /// Longest simulated step per frame, in milliseconds.
    pub max_step_ms: u64,
    pub unit: Unit,
    pub zoom: f64,
    pub script: Vec<ScriptedCommand>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app_name: "Kinema Studio".to_string(),
            surface_width: 900.0,
            surface_height: 600.0,
            target_fps: 60,
            max_frames: 600,
            max_step_ms: 50,
            unit: Unit::M,
            zoom: 1.0,
            script: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading engine config {}", path.display()))?;
        ron::from_str(&text).with_context(|| format!("parsing engine config {}", path.display()))
    }

    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            max_step: Duration::from_millis(self.max_step_ms),
            ..RuntimeConfig::default()
        }
    }
}

/// Accumulates wall time and releases it in whole frames.
pub struct FixedTimestep {
    frame_duration: Duration,
    accumulator: Duration,
}

impl FixedTimestep {
    pub fn from_fps(fps: u32) -> Self {
        Self {
            frame_duration: Duration::from_nanos(1_000_000_000 / u64::from(fps.max(1))),
            accumulator: Duration::ZERO,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    pub fn accumulate(&mut self, delta: Duration) {
        self.accumulator += delta;
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.frame_duration {
            self.accumulator -= self.frame_duration;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestep_releases_whole_frames() {
        let mut step = FixedTimestep::from_fps(50);
        step.accumulate(Duration::from_millis(45));
        assert!(step.should_step());
        assert!(step.should_step());
        assert!(!step.should_step());
        step.accumulate(Duration::from_millis(15));
        assert!(step.should_step());
    }

    #[test]
    fn test_zero_fps_is_one_frame_per_second() {
        let step = FixedTimestep::from_fps(0);
        assert_eq!(step.frame_duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: EngineConfig = ron::from_str("(target_fps: 30, unit: cm)").unwrap();
        assert_eq!(config.target_fps, 30);
        assert_eq!(config.unit, Unit::Cm);
        assert_eq!(config.max_frames, 600);
        assert_eq!(config.surface_width, 900.0);
        assert_eq!(config.runtime().max_step, Duration::from_millis(50));
    }

    #[test]
    fn test_script_parses_runtime_commands() {
        let config: EngineConfig = ron::from_str(
            "(script: [(frame: 10, command: Pause), (frame: 12, command: SetUnit(km)), (frame: 12, command: SetZoom(2.0))])",
        )
        .unwrap();
        assert_eq!(config.script.len(), 3);
        assert_eq!(config.script[0], ScriptedCommand { frame: 10, command: RuntimeCommand::Pause });
        assert_eq!(config.script[1].command, RuntimeCommand::SetUnit(Unit::Km));
    }

    #[test]
    fn test_unknown_unit_is_rejected() {
        assert!(ron::from_str::<EngineConfig>("(unit: furlong)").is_err());
    }
}
