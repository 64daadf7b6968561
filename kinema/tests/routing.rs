use std::cell::Cell;
use std::rc::Rc;

use kinema::Topic;
use kinema::builtin_router;
use kinema::core::normalize::normalize;
use kinema::simulation::camera::{Camera, MAX_AUTO_SCALE, MIN_AUTO_SCALE, Unit, auto_scale};
use kinema::simulation::object::Stage;
use kinema::simulation::router::{RouteSource, RouterError, SimulationRouter};
use serde_json::json;

fn build(router: &SimulationRouter, topic: &str) -> usize {
    let params = normalize(&json!({ "topic": topic }));
    let handle = router.route(&params);
    let camera = Camera::new();
    let mut objects = Vec::new();
    let mut stage = Stage::new(&mut objects, &camera);
    (handle.constructor())(&params, &mut stage);
    objects.len()
}

#[test]
fn test_unregistered_topic_gets_ready_stub() {
    let router = SimulationRouter::new();
    let params = normalize(&json!({"topic": "optics"}));
    let handle = router.route(&params);

    assert_eq!(handle.status().as_str(), "ready");
    assert_eq!(handle.topic(), Topic::Optics);
    assert!(handle.is_stub());
    assert_eq!(build(&router, "optics"), 0);
}

#[test]
fn test_builtin_router_covers_every_topic() {
    let router = builtin_router();
    for topic in Topic::ALL {
        assert!(router.is_registered(topic), "{topic}");
        let params = normalize(&json!({ "topic": topic.as_str() }));
        assert_eq!(router.route(&params).source(), RouteSource::Registered);
        assert_eq!(build(&router, topic.as_str()), 1, "{topic}");
    }
}

#[test]
fn test_later_registration_replaces_handler() {
    let calls = Rc::new(Cell::new(0));
    let mut router = builtin_router();
    let seen = Rc::clone(&calls);
    router
        .register(" Projectile ", move |_params, _stage| seen.set(seen.get() + 1))
        .unwrap();

    assert_eq!(build(&router, "projectile"), 0);
    assert_eq!(calls.get(), 1);
    // Other topics keep their scenes.
    assert_eq!(build(&router, "waves"), 1);
}

#[test]
fn test_register_rejects_bad_topics() {
    let mut router = SimulationRouter::new();
    assert_eq!(
        router.register("   ", |_, _| {}).err(),
        Some(RouterError::EmptyTopic)
    );
    assert_eq!(
        router.register("time_travel", |_, _| {}).err(),
        Some(RouterError::UnknownTopic("time_travel".to_string()))
    );
    assert!(router.register("Waves", |_, _| {}).is_ok());
    assert!(router.is_registered(Topic::Waves));
}

#[test]
fn test_register_normalizes_topic_spelling() {
    let mut router = SimulationRouter::new();
    assert!(router.register("Linear Motion", |_, _| {}).is_ok());
    assert!(router.register("fluid-dynamics", |_, _| {}).is_ok());
    assert!(router.register("  Spring -  Friction ", |_, _| {}).is_ok());
    assert!(router.is_registered(Topic::LinearMotion));
    assert!(router.is_registered(Topic::FluidDynamics));
    assert!(router.is_registered(Topic::SpringFriction));
}

#[test]
fn test_camera_zoom_is_clamped() {
    let mut camera = Camera::new();
    camera.set_zoom(1000.0);
    assert_eq!(camera.zoom(), 10.0);
    camera.set_zoom(0.0);
    assert_eq!(camera.zoom(), 0.1);
    camera.set_zoom(f64::NAN);
    assert_eq!(camera.zoom(), 0.1);

    camera.set_zoom(2.0);
    camera.zoom_by(1.5);
    assert!((camera.zoom() - 3.0).abs() < 1e-12);

    camera.pan_by(glam::DVec2::new(10.0, -4.0));
    camera.reset_view();
    assert_eq!(camera.zoom(), 1.0);
    assert_eq!(camera.pan(), glam::DVec2::ZERO);
}

#[test]
fn test_units_multiply_the_auto_scale() {
    let mut camera = Camera::new();
    let params = normalize(&json!({"topic": "circular_motion", "radius": 35}));
    camera.fit(&params);
    assert!((camera.auto_scale() - 10.0).abs() < 1e-12);

    for (unit, factor, label) in [(Unit::Mm, 0.1, "mm"), (Unit::Cm, 10.0, "cm"), (Unit::M, 1.0, "m"), (Unit::Km, 0.001, "km")] {
        camera.set_unit(unit);
        assert_eq!(camera.unit_scale(), factor);
        assert!((camera.scale() - 10.0 * factor).abs() < 1e-12);
        assert_eq!(camera.unit().to_string(), label);
        assert_eq!(label.parse::<Unit>(), Ok(unit));
    }
    assert!("furlong".parse::<Unit>().is_err());

    // Physics y points up; the surface y points down.
    camera.set_unit(Unit::M);
    let at = camera.to_surface(glam::DVec2::new(2.0, 3.0), glam::DVec2::new(100.0, 500.0));
    assert_eq!(at, glam::DVec2::new(120.0, 470.0));
}

#[test]
fn test_auto_scale_targets_dominant_length() {
    let projectile = normalize(&json!({"topic": "projectile", "initial_velocity": {"magnitude": 20}, "launch_angle": 45}));
    // Range v²/g = 40.82 m dominates the apex.
    assert!((auto_scale(&projectile) - 350.0 / (400.0 / 9.8)).abs() < 1e-9);

    let tiny = normalize(&json!({"topic": "circular_motion", "radius": 0.001}));
    assert!((auto_scale(&tiny) - 350.0 / 20.0).abs() < 1e-9);

    let huge = normalize(&json!({"topic": "optics", "optics": {"object_distance": 1e9}}));
    assert_eq!(auto_scale(&huge), MIN_AUTO_SCALE);

    let other = normalize(&json!({"topic": "spring"}));
    assert_eq!(auto_scale(&other), 3.5);
    assert!(auto_scale(&other) <= MAX_AUTO_SCALE);
}
