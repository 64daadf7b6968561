use std::sync::Arc;
use std::time::Duration;

use glam::DVec2;
use kinema::control::{CommandQueue, RuntimeCommand};
use kinema::platform::surface::{DrawCommand, RecordingSurface, SurfaceEvent};
use kinema::simulation::camera::Unit;
use kinema::simulation::host::{FrameHost, FrameToken, ManualHost};
use kinema::simulation::router::Constructor;
use kinema::simulation::runtime::{FrameOutcome, SimulationRuntime};
use kinema::{NormalizedParameters, attach_computed, builtin_router, normalize};
use serde_json::{Value, json};

const FRAME: Duration = Duration::from_millis(16);

fn problem(value: Value) -> NormalizedParameters {
    let mut params = normalize(&value);
    attach_computed(&mut params);
    params
}

fn loaded(value: Value) -> SimulationRuntime<ManualHost> {
    let params = problem(value);
    let handle = builtin_router().route(&params);
    let mut runtime = SimulationRuntime::new(ManualHost::new());
    runtime.load_handle(&handle, params);
    runtime
}

fn step_of(outcome: FrameOutcome) -> f64 {
    match outcome {
        FrameOutcome::Rendered { step, .. } => step,
        FrameOutcome::Ignored => panic!("frame was not rendered"),
    }
}

#[test]
fn test_load_starts_the_clock() {
    let mut runtime = loaded(json!({"topic": "projectile", "initial_velocity": {"magnitude": 20}, "launch_angle": 45}));
    let mut surface = RecordingSurface::new(900.0, 600.0);

    assert!(runtime.is_running());
    assert_eq!(runtime.host().pending(), 1);
    assert_eq!(runtime.objects().len(), 1);

    for _ in 0..10 {
        let step = step_of(runtime.pump(FRAME, &mut surface));
        assert!((step - 0.016).abs() < 1e-9);
    }
    assert_eq!(runtime.frames(), 10);
    assert!((runtime.sim_time() - 0.16).abs() < 1e-9);
    assert_eq!(surface.frames(), 10);
}

#[test]
fn test_long_pauses_are_clamped() {
    let mut runtime = loaded(json!({"topic": "waves"}));
    let mut surface = RecordingSurface::new(900.0, 600.0);

    let step = step_of(runtime.pump(Duration::from_secs(3), &mut surface));
    assert!((step - 0.05).abs() < 1e-12);
    assert!((runtime.sim_time() - 0.05).abs() < 1e-12);
}

#[test]
fn test_stale_and_cancelled_ticks_are_ignored() {
    let mut runtime = loaded(json!({"topic": "spring"}));
    let mut surface = RecordingSurface::new(900.0, 600.0);

    runtime.pump(FRAME, &mut surface);
    let frames = runtime.frames();

    // A token that was already delivered.
    assert_eq!(runtime.tick(FrameToken(1), &mut surface), FrameOutcome::Ignored);

    runtime.stop();
    assert!(!runtime.is_running());
    assert_eq!(runtime.host().pending(), 0);
    for token in 0..5 {
        assert_eq!(runtime.tick(FrameToken(token), &mut surface), FrameOutcome::Ignored);
    }
    assert_eq!(runtime.pump(FRAME, &mut surface), FrameOutcome::Ignored);
    assert_eq!(runtime.frames(), frames);

    // Restarting hands out a fresh request; the old ones stay dead.
    runtime.start();
    runtime.start();
    assert_eq!(runtime.host().pending(), 1);
    let fresh = runtime.host_mut().request_frame();
    assert_eq!(runtime.tick(fresh, &mut surface), FrameOutcome::Ignored);
}

#[test]
fn test_frame_draws_in_order() {
    let mut runtime = loaded(json!({"topic": "circular_motion", "radius": 50, "angular_velocity": 1}));
    let mut surface = RecordingSurface::new(900.0, 600.0);
    runtime.pump(FRAME, &mut surface);

    let events = surface.events();
    assert!(matches!(events[0], SurfaceEvent::Clear));
    assert!(matches!(events[1], SurfaceEvent::Grid { spacing, .. } if spacing == 50.0));
    assert!(matches!(events[2], SurfaceEvent::Push(_)));
    let pop = events
        .iter()
        .position(|e| matches!(e, SurfaceEvent::Pop))
        .unwrap();
    assert!(pop > 3, "objects draw between push and pop");
    match &events[pop + 1] {
        SurfaceEvent::Draw(DrawCommand::Text { text, .. }) => {
            assert!(text.starts_with("Zoom: 100%"));
            assert!(text.contains("Unit: m"));
        }
        other => panic!("expected footer, found {other:?}"),
    }
    assert_eq!(events.len(), pop + 2);
    assert_eq!(surface.depth(), 0);
}

#[test]
fn test_reset_rebuilds_and_restarts() {
    let mut runtime = loaded(json!({"topic": "linear_motion", "initial_velocity": {"magnitude": 3}}));
    let mut surface = RecordingSurface::new(900.0, 600.0);
    for _ in 0..20 {
        runtime.pump(FRAME, &mut surface);
    }
    assert!(runtime.sim_time() > 0.3);

    runtime.pause();
    runtime.reset();
    assert_eq!(runtime.sim_time(), 0.0);
    assert!(runtime.is_running());
    assert_eq!(runtime.objects().len(), 1);
    assert_eq!(runtime.host().pending(), 1);

    // New parameters keep a paused clock paused.
    runtime.pause();
    runtime.update_params(problem(json!({"topic": "linear_motion", "initial_velocity": {"magnitude": 8}})));
    assert!(!runtime.is_running());
    assert_eq!(runtime.params().and_then(|p| p.initial_velocity.magnitude.get()), Some(8.0));
}

#[test]
fn test_update_params_keeps_running_clock() {
    let mut runtime = loaded(json!({"topic": "waves"}));
    let mut surface = RecordingSurface::new(900.0, 600.0);
    runtime.pump(FRAME, &mut surface);

    runtime.update_params(problem(json!({"topic": "waves", "waves": {"amplitude": 2}})));
    assert!(runtime.is_running());
    assert_eq!(runtime.sim_time(), 0.0);
    assert!(matches!(runtime.pump(FRAME, &mut surface), FrameOutcome::Rendered { .. }));
}

#[test]
fn test_settled_scene_stops_the_clock() {
    let mut runtime = loaded(json!({"topic": "pulley_spring", "pulley": {"mass1": 10, "mass2": 5, "spring_constant": 20}}));
    let mut surface = RecordingSurface::new(900.0, 600.0);

    let mut settled_at = None;
    for frame in 0..2000 {
        if let FrameOutcome::Rendered { settled: true, .. } = runtime.pump(Duration::from_millis(50), &mut surface) {
            settled_at = Some(frame);
            break;
        }
    }
    assert!(settled_at.is_some(), "never settled");
    assert!(!runtime.is_running());
    assert_eq!(runtime.host().pending(), 0);

    let frames = runtime.frames();
    assert_eq!(runtime.pump(FRAME, &mut surface), FrameOutcome::Ignored);
    assert_eq!(runtime.frames(), frames);
}

#[test]
fn test_hover_finds_annotated_object() {
    let mut runtime = loaded(json!({
        "topic": "optics",
        "sub_topic": "refraction",
        "optics": {"indices": {"n1": 1, "n2": 1.5}, "angles": {"incidence": 30}},
    }));
    let mut surface = RecordingSurface::new(900.0, 600.0);
    runtime.pump(FRAME, &mut surface);

    let note = runtime.hover(DVec2::new(460.0, 310.0)).expect("diagram under cursor");
    assert_eq!(note.title, "Ray Diagram");
    assert_eq!(note.topic_line, "optics / refraction");
    assert!(note.equations.iter().any(|e| e == "n₁·sin(θ₁) = n₂·sin(θ₂)"));
    assert!(note.values.iter().any(|(k, v)| k == "Angle Of Refraction" && v == "19.47"));
    assert!(note.lines().contains(&"Values".to_string()));

    assert!(runtime.hover(DVec2::new(10.0, 10.0)).is_none());

    // At 2x zoom about the centre, 60 viewport units is 30 scene units.
    let off_centre = DVec2::new(510.0, 300.0);
    assert!(runtime.hover(off_centre).is_none());
    runtime.camera_mut().set_zoom(2.0);
    assert!(runtime.hover(off_centre).is_some());
}

#[test]
fn test_commands_apply_between_frames() {
    let mut runtime = loaded(json!({"topic": "energy"}));
    let mut surface = RecordingSurface::new(900.0, 600.0);
    let (queue, sender) = CommandQueue::new();

    assert!(sender.send(RuntimeCommand::SetZoom(50.0)));
    assert!(sender.send(RuntimeCommand::PanBy(10.0, 5.0)));
    assert!(sender.send(RuntimeCommand::SetUnit(Unit::Cm)));
    assert!(sender.send(RuntimeCommand::Pause));
    assert_eq!(runtime.drain(&queue), 4);

    assert_eq!(runtime.camera().zoom(), 10.0);
    assert_eq!(runtime.camera().pan(), DVec2::new(10.0, 5.0));
    assert_eq!(runtime.camera().unit(), Unit::Cm);
    assert!(!runtime.is_running());

    sender.send(RuntimeCommand::ResetView);
    sender.send(RuntimeCommand::Resume);
    runtime.drain(&queue);
    assert_eq!(runtime.camera().zoom(), 1.0);
    assert_eq!(runtime.camera().unit(), Unit::Cm);
    assert!(runtime.is_running());
    assert!(matches!(runtime.pump(FRAME, &mut surface), FrameOutcome::Rendered { .. }));

    drop(queue);
    assert!(!sender.send(RuntimeCommand::Reset));
}

#[test]
fn test_custom_constructor_runs_on_load() {
    use kinema::platform::surface::Surface;
    use kinema::simulation::camera::Camera;
    use kinema::simulation::object::{SimulationObject, Stage};

    struct Counter {
        updates: u32,
    }

    impl SimulationObject for Counter {
        fn update(&mut self, _dt: f64, _elapsed: f64) {
            self.updates += 1;
        }

        fn render(&self, surface: &mut dyn Surface, _camera: &Camera) {
            surface.label(DVec2::ZERO, self.updates.to_string(), kinema::platform::surface::palette::WHITE);
        }

        fn is_settled(&self) -> bool {
            self.updates >= 3
        }
    }

    let constructor: Constructor = Arc::new(|_params: &NormalizedParameters, stage: &mut Stage<'_>| {
        stage.add_object(Counter { updates: 0 });
        stage.add_object(Counter { updates: 1 });
    });
    let mut runtime = SimulationRuntime::new(ManualHost::new());
    runtime.load(constructor, normalize(&json!({})));
    let mut surface = RecordingSurface::new(900.0, 600.0);

    let mut rendered = 0;
    while runtime.is_running() && rendered < 10 {
        runtime.pump(FRAME, &mut surface);
        rendered += 1;
    }
    // The second counter reaches three updates first and stops both.
    assert_eq!(rendered, 2);
    assert_eq!(runtime.objects().len(), 2);
}
