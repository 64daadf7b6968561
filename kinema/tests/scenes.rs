use std::time::Duration;

use glam::DVec2;
use kinema::platform::surface::{DrawCommand, RecordingSurface};
use kinema::scenes::collision::HeadOnCollision;
use kinema::scenes::elasticity::ElasticBar;
use kinema::scenes::energy::BouncingBall;
use kinema::scenes::gravitation::Orbit;
use kinema::scenes::pulley::{Atwood, BlockAndTackle};
use kinema::scenes::thermo::GasContainer;
use kinema::simulation::camera::Camera;
use kinema::simulation::host::ManualHost;
use kinema::simulation::object::SimulationObject;
use kinema::simulation::runtime::{FrameOutcome, SimulationRuntime};
use kinema::{NormalizedParameters, Topic, attach_computed, builtin_router, normalize};
use serde_json::{Value, json};

const FRAME: Duration = Duration::from_millis(16);

fn problem(value: Value) -> NormalizedParameters {
    let mut params = normalize(&value);
    attach_computed(&mut params);
    params
}

fn points(command: &DrawCommand) -> Vec<DVec2> {
    match command {
        DrawCommand::Dot { at, radius, .. } | DrawCommand::Ring { at, radius, .. } => {
            vec![*at, DVec2::splat(*radius)]
        }
        DrawCommand::Line { from, to, .. } | DrawCommand::Arrow { from, to, .. } => vec![*from, *to],
        DrawCommand::Trail { points, .. } | DrawCommand::Polygon { points, .. } => points.clone(),
        DrawCommand::Rect { at, size, .. } => vec![*at, *size],
        DrawCommand::Label { at, .. } | DrawCommand::Text { at, .. } | DrawCommand::Hud { at, .. } => {
            vec![*at]
        }
    }
}

#[test]
fn test_every_topic_animates_with_finite_draws() {
    let router = builtin_router();
    for topic in Topic::ALL {
        let params = problem(json!({ "topic": topic.as_str() }));
        let handle = router.route(&params);
        let mut runtime = SimulationRuntime::new(ManualHost::new());
        runtime.load_handle(&handle, params);
        let mut surface = RecordingSurface::new(900.0, 600.0);

        for frame in 0..200 {
            if runtime.pump(FRAME, &mut surface) == FrameOutcome::Ignored {
                break;
            }
            for command in surface.draws() {
                for p in points(command) {
                    assert!(p.is_finite(), "{topic} frame {frame}: {command:?}");
                }
            }
            surface.take_events();
        }
        assert!(runtime.frames() > 0, "{topic}");
    }
}

#[test]
fn test_spring_friction_comes_to_rest() {
    let params = problem(json!({"topic": "spring_friction"}));
    let handle = builtin_router().route(&params);
    let mut runtime = SimulationRuntime::new(ManualHost::new());
    runtime.load_handle(&handle, params);
    let mut surface = RecordingSurface::new(900.0, 600.0);

    let mut settled = false;
    for _ in 0..3000 {
        if let FrameOutcome::Rendered { settled: true, .. } = runtime.pump(FRAME, &mut surface) {
            settled = true;
            break;
        }
        surface.take_events();
    }
    assert!(settled, "still moving after {:.1} s", runtime.sim_time());
    assert!(!runtime.is_running());
}

#[test]
fn test_atwood_machine() {
    let params = problem(json!({"topic": "pulley", "pulley": {"mass1": 10, "mass2": 5}}));
    let atwood = Atwood::new(&params);
    assert!((atwood.acceleration() - 9.8 / 3.0).abs() < 1e-9);
    assert!((atwood.tension() - 65.333333).abs() < 1e-5);

    // Stacked masses override the pair.
    let stacked = problem(json!({"topic": "pulley", "pulley": {"masses_left": [2, 3], "masses_right": [5]}}));
    let balanced = Atwood::new(&stacked);
    assert_eq!(balanced.left_mass(), 5.0);
    assert_eq!(balanced.acceleration(), 0.0);
}

#[test]
fn test_block_and_tackle_advantage() {
    let params = problem(json!({"topic": "multi_pulley", "multi_pulley": {"num_pulleys": 4, "load_mass": 100}}));
    let mut tackle = BlockAndTackle::new(&params);
    assert_eq!(tackle.mechanical_advantage(), 4.0);
    assert!((tackle.ideal_effort() - 245.0).abs() < 1e-9);

    let start = tackle.load_height();
    let mut elapsed = 0.0;
    for _ in 0..60 {
        elapsed += 0.016;
        tackle.update(0.016, elapsed);
    }
    assert!(tackle.acceleration() > 0.0);
    assert!(tackle.load_height() < start, "load rises towards the beam");

    let single = BlockAndTackle::new(&problem(json!({"topic": "multi_pulley", "multi_pulley": {"num_pulleys": 0.2}})));
    assert_eq!(single.mechanical_advantage(), 1.0);
}

#[test]
fn test_large_tackle_draws_a_bounded_frame() {
    let params = problem(json!({"topic": "multi_pulley", "multi_pulley": {"num_pulleys": 2e6, "load_mass": 100}}));
    let tackle = BlockAndTackle::new(&params);
    assert_eq!(tackle.mechanical_advantage(), 2e6);

    let mut surface = RecordingSurface::new(900.0, 600.0);
    tackle.render(&mut surface, &Camera::new());
    let draws: Vec<_> = surface.draws().collect();
    assert!(draws.len() < 100, "{} draw commands", draws.len());
    for command in draws {
        for p in points(command) {
            assert!(p.is_finite(), "{command:?}");
        }
    }
}

#[test]
fn test_earth_orbit_takes_a_year() {
    let orbit = Orbit::new(&problem(json!({"topic": "gravitation"})));
    let days = orbit.period() / 86_400.0;
    assert!((364.0..367.0).contains(&days), "{days}");
    assert!((orbit.orbital_velocity() - 29_780.0).abs() < 100.0);
}

#[test]
fn test_elastic_bar_reaches_full_load() {
    let mut bar = ElasticBar::new(&problem(json!({"topic": "elasticity"})));
    assert!((bar.stress() - 5e5).abs() < 1e-6);
    assert!((bar.deformation() - 5e-6).abs() < 1e-15);
    let mut elapsed = 0.0;
    for _ in 0..200 {
        elapsed += 0.016;
        bar.update(0.016, elapsed);
    }
    assert_eq!(bar.progress(), 1.0);
}

#[test]
fn test_gas_particles_stay_in_the_container() {
    let mut gas = GasContainer::new(&problem(json!({"topic": "thermodynamics"})));
    assert!((gas.heat() - 200_000.0).abs() < 1e-6);
    let mut elapsed = 0.0;
    for _ in 0..600 {
        elapsed += 0.016;
        gas.update(0.016, elapsed);
        assert!(gas.is_contained());
        assert!((300.0..=500.0).contains(&gas.temperature()));
    }
}

#[test]
fn test_collision_keeps_momentum_across_contact() {
    let mut collision = HeadOnCollision::new(&problem(json!({
        "topic": "collision",
        "collision": {"type": "elastic", "masses": [2, 3], "velocities_before": [5, -2]},
    })));
    let before = collision.momentum();
    let energy = collision.kinetic_energy();
    collision.update(0.016, 1.0);
    assert!(!collision.has_collided());

    collision.update(0.016, 4.0);
    assert!(collision.has_collided());
    assert!((collision.momentum() - before).abs() < 1e-9);
    assert!((collision.kinetic_energy() - energy).abs() < 1e-9);
    assert_ne!(collision.velocities(), [5.0, -2.0]);

    // A pair with a missing entry falls back as a whole.
    let partial = HeadOnCollision::new(&problem(json!({
        "topic": "collision",
        "collision": {"masses": [7, "x"], "velocities_before": [1]},
    })));
    assert_eq!(partial.velocities(), [5.0, -2.0]);
    assert!((partial.momentum() - 4.0).abs() < 1e-12);
}

#[test]
fn test_bouncing_ball_trades_energy() {
    let mut ball = BouncingBall::new(&problem(json!({"topic": "energy"})));
    let total = ball.total_energy();
    let mut elapsed = 0.0;
    for _ in 0..150 {
        elapsed += 0.016;
        ball.update(0.016, elapsed);
        assert!((ball.kinetic() + ball.potential() - total).abs() < 1e-6 * total.max(1.0));
        assert!(ball.height() >= -1e-9);
    }
}
