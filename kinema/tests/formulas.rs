use kinema::core::math::round6;
use kinema::laws::classical::momentum::resolve_1d;
use kinema::laws::registry::FormulaEngine;
use kinema::{NormalizedParameters, Topic, attach_computed, normalize};
use serde_json::{Value, json};

fn computed(value: Value) -> NormalizedParameters {
    let mut params = normalize(&value);
    attach_computed(&mut params);
    params
}

fn calc(params: &NormalizedParameters, key: &str) -> f64 {
    params
        .formulas
        .get(key)
        .unwrap_or_else(|| panic!("missing calculation {key}"))
}

#[test]
fn test_projectile_range_and_height() {
    let params = computed(json!({
        "topic": "projectile",
        "initial_velocity": {"magnitude": 20},
        "launch_angle": 45,
    }));

    assert!((calc(&params, "range") - 40.816327).abs() < 1e-5);
    assert!((calc(&params, "max_height") - 10.204082).abs() < 1e-5);
    assert!((calc(&params, "time_of_flight") - 2.886150).abs() < 1e-5);
    assert!((calc(&params, "velocity_x") - calc(&params, "velocity_y")).abs() < 1e-9);
    // Backfilled from the computed values.
    assert_eq!(params.time.get(), Some(calc(&params, "time_of_flight")));
    assert_eq!(params.distance.get(), Some(calc(&params, "range")));
    assert!(params.formulas.equations.iter().any(|e| e == "R = (v₀²·sin(2θ)) / g"));
}

#[test]
fn test_projectile_from_height_lands_further() {
    let flat = computed(json!({"topic": "projectile", "initial_velocity": {"magnitude": 20}, "launch_angle": 45}));
    let raised = computed(json!({
        "topic": "projectile",
        "initial_velocity": {"magnitude": 20},
        "launch_angle": 45,
        "launch_height": 10,
    }));
    assert!(calc(&raised, "range") > calc(&flat, "range"));
    assert!((calc(&raised, "max_height") - 20.204082).abs() < 1e-5);
}

#[test]
fn test_values_are_rounded_to_six_places() {
    let params = computed(json!({"topic": "projectile", "initial_velocity": {"magnitude": 20}, "launch_angle": 45}));
    for (key, value) in &params.formulas.calculations {
        let scaled = value * 1e6;
        assert!((scaled - scaled.round()).abs() < 1e-6, "{key} = {value}");
    }
}

#[test]
fn test_huge_values_stay_finite_through_serialization() {
    assert_eq!(round6(1e303), 1e303);
    assert_eq!(round6(-f64::MAX), -f64::MAX);

    let params = computed(json!({"topic": "elasticity", "forces": {"applied": 1e303}, "elasticity": {"area": 1}}));
    assert_eq!(params.formulas.get("stress"), Some(1e303));
    let reloaded = normalize(&serde_json::to_value(&params).unwrap());
    assert_eq!(reloaded.formulas.get("stress"), Some(1e303));
    assert_eq!(reloaded.formulas, params.formulas);
}

#[test]
fn test_linear_motion_final_velocity() {
    let params = computed(json!({
        "topic": "linear_motion",
        "initial_velocity": {"magnitude": 2},
        "acceleration": {"value": 3},
        "time": 4,
    }));
    assert_eq!(calc(&params, "final_velocity"), 14.0);
    assert_eq!(calc(&params, "displacement"), 32.0);
    assert_eq!(params.final_velocity.magnitude.get(), Some(14.0));

    let from_distance = computed(json!({
        "topic": "linear_motion",
        "initial_velocity": {"magnitude": 3},
        "acceleration": {"value": 2},
        "distance": 4,
    }));
    assert_eq!(calc(&from_distance, "final_velocity"), 5.0);

    // Decelerating past rest has no real final speed.
    let negative = computed(json!({
        "topic": "linear_motion",
        "initial_velocity": {"magnitude": 2},
        "acceleration": {"value": -10},
        "displacement": 5,
    }));
    assert!(negative.formulas.get("final_velocity").is_none());
    assert!(negative.final_velocity.magnitude.is_absent());
    assert!(negative.formulas.equations.iter().any(|e| e == "v² = u² + 2as"));
}

#[test]
fn test_circular_motion_from_angular_velocity() {
    let params = computed(json!({"topic": "circular_motion", "radius": 2, "angular_velocity": 3}));
    assert_eq!(calc(&params, "speed"), 6.0);
    assert_eq!(calc(&params, "centripetal_acceleration"), 18.0);
    assert_eq!(calc(&params, "centripetal_force"), 18.0);
    assert_eq!(params.centripetal_acc.get(), Some(18.0));
    assert!((params.period.get().unwrap() - std::f64::consts::TAU / 3.0).abs() < 1e-6);
    assert!((params.frequency.get().unwrap() - 3.0 / std::f64::consts::TAU).abs() < 1e-6);

    let given = computed(json!({"topic": "circular_motion", "radius": 2, "angular_velocity": 3, "period": 9}));
    assert_eq!(given.period.get(), Some(9.0));
}

#[test]
fn test_wave_speed_and_period() {
    let params = computed(json!({"topic": "waves", "waves": {"frequency": 170, "wavelength": 2}}));
    assert_eq!(calc(&params, "wave_speed"), 340.0);
    assert_eq!(params.waves.speed.get(), Some(340.0));
    assert!((calc(&params, "period") - 1.0 / 170.0).abs() < 1e-6);

    let completed = computed(json!({"topic": "waves", "waves": {"speed": 340, "frequency": 170}}));
    assert_eq!(calc(&completed, "wavelength"), 2.0);
    assert_eq!(completed.waves.wavelength.get(), Some(2.0));
}

#[test]
fn test_ohms_law_completion() {
    let params = computed(json!({"topic": "electricity", "electricity": {"voltage": 12, "resistance": 4}}));
    assert_eq!(calc(&params, "current"), 3.0);
    assert_eq!(calc(&params, "power"), 36.0);
    assert_eq!(params.electricity.current.get(), Some(3.0));
}

#[test]
fn test_snell_and_thin_lens() {
    let refraction = computed(json!({
        "topic": "optics",
        "optics": {"indices": {"n1": 1.0, "n2": 1.5}, "angles": {"incidence": 30}},
    }));
    assert!((calc(&refraction, "angle_of_refraction") - 19.471221).abs() < 1e-5);

    let total = computed(json!({
        "topic": "optics",
        "optics": {"indices": {"n1": 1.5, "n2": 1.0}, "angles": {"incidence": 60}},
    }));
    assert!(total.formulas.get("angle_of_refraction").is_none());
    assert!(total.optics.angles.refraction.is_absent());

    let lens = computed(json!({"topic": "optics", "optics": {"focal_length": 50, "object_distance": 100}}));
    assert_eq!(calc(&lens, "image_distance"), 100.0);
    assert_eq!(calc(&lens, "magnification"), -1.0);
}

#[test]
fn test_inclined_plane_falls_back_to_launch_angle() {
    let params = computed(json!({"topic": "inclined_plane", "mass": 2, "launch_angle": 30}));
    assert!((calc(&params, "parallel_force") - 9.8).abs() < 1e-6);
    assert!((calc(&params, "acceleration") - 4.9).abs() < 1e-6);
}

#[test]
fn test_zero_mass_uses_fallback_inside_rules() {
    let params = computed(json!({"topic": "forces", "mass": 0, "acceleration": {"value": 2}}));
    // The record keeps the explicit zero; the rule treats it as unit mass.
    assert_eq!(params.mass.get(), Some(0.0));
    assert_eq!(calc(&params, "net_force"), 2.0);
    assert_eq!(calc(&params, "weight"), 9.8);
}

#[test]
fn test_collision_conserves_momentum() {
    for (kind, e) in [("elastic", 1.0), ("partially elastic", 0.5), ("perfectly inelastic", 0.0)] {
        let params = computed(json!({
            "topic": "collision",
            "collision": {
                "type": kind,
                "masses": [2, 3],
                "velocities_before": [5, -2],
                "coefficient_of_restitution": e,
            },
        }));
        let before = calc(&params, "total_momentum_before");
        let after = calc(&params, "total_momentum_after");
        assert!((before - 4.0).abs() < 1e-9, "{kind}");
        assert!((before - after).abs() < 1e-6, "{kind}: {before} vs {after}");
        let (ke_before, ke_after) = (
            calc(&params, "total_kinetic_energy_before"),
            calc(&params, "total_kinetic_energy_after"),
        );
        if e == 0.0 {
            assert!(ke_after < ke_before, "{kind}: {ke_after} vs {ke_before}");
        } else {
            assert!(ke_after <= ke_before + 1e-6, "{kind}");
        }
    }

    let stuck = computed(json!({
        "topic": "collision",
        "collision": {"type": "perfectly inelastic", "masses": [2, 3], "velocities_before": [5, -2]},
    }));
    assert_eq!(calc(&stuck, "total_kinetic_energy_before"), 31.0);
    assert!((calc(&stuck, "total_kinetic_energy_after") - 1.6).abs() < 1e-9);

    let elastic = computed(json!({
        "topic": "collision",
        "collision": {"type": "elastic", "masses": [2, 3], "velocities_before": [5, -2]},
    }));
    assert!((calc(&elastic, "total_kinetic_energy_after") - calc(&elastic, "total_kinetic_energy_before")).abs() < 1e-6);
    assert!((calc(&elastic, "velocity_after_1") + 3.4).abs() < 1e-9);
    assert!((calc(&elastic, "velocity_after_2") - 3.6).abs() < 1e-9);

    let (v1, v2) = resolve_1d(1.0, 1.0, 1.0, 0.0, 1.0);
    assert_eq!((v1, v2), (0.0, 1.0));
}

#[test]
fn test_inelastic_collision_shares_final_velocity() {
    let params = computed(json!({
        "topic": "collision",
        "collision": {"type": "inelastic", "masses": [2, 3], "velocities_before": [5, 0]},
    }));
    assert_eq!(calc(&params, "final_velocity"), 2.0);
    assert_eq!(params.collision.velocities_after.len(), 1);
    assert_eq!(calc(&params, "impulse"), -6.0);
}

#[test]
fn test_backfill_never_overwrites() {
    let params = computed(json!({
        "topic": "projectile",
        "initial_velocity": {"magnitude": 20},
        "launch_angle": 45,
        "time": 99,
        "distance": 1,
    }));
    assert_eq!(params.time.get(), Some(99.0));
    assert_eq!(params.distance.get(), Some(1.0));
    assert!((calc(&params, "range") - 40.816327).abs() < 1e-5);

    let tension = computed(json!({"topic": "pulley", "pulley": {"mass1": 10, "mass2": 5}, "forces": {"tension": 1}}));
    assert_eq!(tension.forces.tension.get(), Some(1.0));
    assert!((calc(&tension, "tension") - 65.333333).abs() < 1e-5);
}

#[test]
fn test_attach_is_idempotent_for_every_topic() {
    let problem = json!({
        "initial_velocity": {"magnitude": 12},
        "launch_angle": 30,
        "launch_height": 4,
        "radius": 3,
        "angular_velocity": 2,
        "time": 2,
        "acceleration": {"value": 1.5},
        "displacement": 0.4,
        "forces": {"applied": 40},
        "friction": {"static_coefficient": 0.4, "kinetic_coefficient": 0.3},
        "incline": {"angle": 25},
        "energy": {"spring_constant": 80},
        "collision": {"masses": [1, 2], "velocities_before": [3, -1]},
        "optics": {"focal_length": 20, "object_distance": 60, "indices": {"n1": 1, "n2": 1.33}, "angles": {"incidence": 40}},
        "waves": {"speed": 340, "frequency": 170, "doppler": {"source_velocity": 10}},
        "electricity": {"voltage": 9, "current": 3, "charge": 1.6e-19},
        "magnetism": {"magnetic_field": 0.2},
        "thermodynamics": {"temperature_initial": 300, "temperature_final": 350, "specific_heat": 900, "pressure": 101325, "volume": 0.02, "moles": 1},
        "fluid": {"area1": 0.05, "area2": 0.02, "velocity1": 2},
        "lift": {"velocity_top": 60, "velocity_bottom": 45, "wing_area": 20},
        "spring": {"constant": 50, "displacement": 0.2},
        "elasticity": {"area": 0.01, "original_length": 2, "youngs_modulus": 2e11},
        "pulley": {"mass1": 8, "mass2": 3, "spring_constant": 30},
        "multi_pulley": {"num_pulleys": 4, "load_mass": 120},
        "gravitation": {"central_mass": 5.97e24, "orbital_radius": 6.771e6},
    });

    let engine = FormulaEngine::default();
    for topic in Topic::ALL {
        assert!(engine.covers(topic), "{topic} has no rule");
        let mut value = problem.clone();
        value["topic"] = json!(topic.as_str());
        let mut once = normalize(&value);
        engine.attach(&mut once);
        let mut twice = once.clone();
        engine.attach(&mut twice);
        assert_eq!(once, twice, "{topic}");
        assert!(!once.formulas.equations.is_empty(), "{topic}");
    }
}

#[test]
fn test_engine_rules_can_be_overridden() {
    fn constant(p: &mut NormalizedParameters) {
        p.formulas.record("answer", 42.0);
    }
    let mut engine = FormulaEngine::default();
    engine.register(Topic::Projectile, constant);

    let mut params = normalize(&json!({"topic": "projectile", "initial_velocity": {"magnitude": 20}, "launch_angle": 45}));
    engine.attach(&mut params);
    assert_eq!(params.formulas.get("answer"), Some(42.0));
    assert!(params.formulas.get("range").is_none());

    let mut untouched = normalize(&json!({"topic": "optics"}));
    FormulaEngine::empty().attach(&mut untouched);
    assert!(untouched.formulas.equations.is_empty());
}
