use kinema::core::schema::Measure;
use kinema::{Topic, normalize, normalize_str};
use serde_json::{Value, json};

fn renormalize(value: &Value) -> kinema::NormalizedParameters {
    let first = normalize(value);
    let serialized = serde_json::to_value(&first).unwrap();
    normalize(&serialized)
}

#[test]
fn test_normalization_is_idempotent() {
    let inputs = [
        json!({}),
        json!({"topic": "Projectile Motion", "initial_velocity": {"magnitude": "20"}, "launch_angle": 45}),
        json!({"topic": "collision", "collision": {"type": "inelastic", "masses": [2, "3"], "velocities_before": [4, 0]}}),
        json!({"mass": 0, "gravity": "NaN", "formulas": {"equations": ["F = ma", "F = ma"], "calculations": {"a": "2.5", "b": "x"}}}),
        json!([1, 2, 3]),
        json!("just text"),
    ];
    for input in &inputs {
        assert_eq!(normalize(input), renormalize(input), "input {input}");
    }
}

#[test]
fn test_every_schema_key_is_present() {
    let params = normalize(&json!({}));
    let value = serde_json::to_value(&params).unwrap();
    let record = value.as_object().unwrap();

    for key in [
        "topic", "sub_topic", "object", "initial_position", "initial_velocity", "final_velocity",
        "acceleration", "mass", "time", "duration", "distance", "displacement", "launch_angle",
        "launch_height", "gravity", "air_resistance", "radius", "angular_velocity", "centripetal_acc",
        "period", "frequency", "forces", "energy", "collision", "optics", "waves", "electricity",
        "magnetism", "thermodynamics", "friction", "incline", "fluid", "lift", "spring", "elasticity",
        "pulley", "multi_pulley", "gravitation", "composite_topics", "formulas",
    ] {
        assert!(record.contains_key(key), "missing {key}");
    }
    // Absent numbers stay in the record as null.
    assert_eq!(record["time"], Value::Null);
    assert_eq!(record["acceleration"]["type"], Value::Null);
    assert_eq!(record["collision"]["masses"], json!([]));
    assert_eq!(record["waves"]["doppler"]["source_velocity"], Value::Null);
}

#[test]
fn test_defaults_fill_only_absent_values() {
    let defaults = normalize(&json!({}));
    assert_eq!(defaults.gravity.get(), Some(9.8));
    assert_eq!(defaults.mass.get(), Some(1.0));
    assert_eq!(defaults.initial_position.x0.get(), Some(0.0));
    assert_eq!(defaults.initial_position.y0.get(), Some(0.0));
    assert_eq!(defaults.initial_position.z0.get(), Some(0.0));
    assert_eq!(defaults.topic, Topic::LinearMotion);

    // An explicit zero is a value, not a gap.
    let zero = normalize(&json!({"mass": 0, "gravity": 1.62}));
    assert_eq!(zero.mass.get(), Some(0.0));
    assert_eq!(zero.gravity.get(), Some(1.62));

    // One given component keeps the others absent.
    let partial = normalize(&json!({"initial_position": {"y0": 5}}));
    assert_eq!(partial.initial_position.y0.get(), Some(5.0));
    assert!(partial.initial_position.x0.is_absent());
    assert!(partial.initial_position.z0.is_absent());
}

#[test]
fn test_topic_matching() {
    let cases = [
        ("projectile", Topic::Projectile),
        ("  Inclined Plane ", Topic::InclinedPlane),
        ("fluid-dynamics", Topic::FluidDynamics),
        ("Projectile Motion", Topic::Projectile),
        ("spring", Topic::Spring),
        ("SPRING_FRICTION", Topic::SpringFriction),
        ("pulley", Topic::Pulley),
        ("magnet", Topic::Magnetism),
        ("astrology", Topic::LinearMotion),
        ("", Topic::LinearMotion),
    ];
    for (raw, expected) in cases {
        assert_eq!(normalize(&json!({ "topic": raw })).topic, expected, "topic {raw:?}");
    }
    assert_eq!(normalize(&json!({"topic": 7})).topic, Topic::LinearMotion);
    assert_eq!(Topic::canonical("Circular  -  Motion"), "circular_motion");
}

#[test]
fn test_invalid_numbers_become_absent() {
    let params = normalize(&json!({
        "launch_angle": "NaN",
        "launch_height": "abc",
        "radius": " 2.5 ",
        "time": null,
        "duration": true,
        "distance": "",
        "gravity": "NaN",
        "mass": {"value": 3},
        "frequency": "1e3",
    }));
    assert!(params.launch_angle.is_absent());
    assert!(params.launch_height.is_absent());
    assert_eq!(params.radius.get(), Some(2.5));
    assert!(params.time.is_absent());
    assert!(params.duration.is_absent());
    assert!(params.distance.is_absent());
    assert_eq!(params.gravity.get(), Some(9.8));
    assert_eq!(params.mass.get(), Some(1.0));
    assert_eq!(params.frequency.get(), Some(1000.0));

    assert!(Measure::new(f64::INFINITY).is_absent());
    assert!(Measure::new(f64::NAN).is_absent());
}

#[test]
fn test_labels_are_never_coerced() {
    let params = normalize(&json!({
        "sub_topic": 12,
        "object": "",
        "acceleration": {"type": "uniform", "value": "3"},
        "multi_pulley": {"config": "block_and_tackle"},
    }));
    assert_eq!(params.sub_topic.as_deref(), Some("12"));
    assert!(params.object.is_absent());
    assert_eq!(params.acceleration.kind.as_deref(), Some("uniform"));
    assert_eq!(params.acceleration.value.get(), Some(3.0));
    assert_eq!(params.multi_pulley.config.as_deref(), Some("block_and_tackle"));
}

#[test]
fn test_shape_mismatch_yields_record_defaults() {
    let params = normalize(&json!({
        "initial_velocity": 5,
        "forces": [1, 2],
        "optics": {"angles": "steep", "indices": {"n1": 1.0}},
    }));
    assert!(params.initial_velocity.magnitude.is_absent());
    assert!(params.forces.applied.is_absent());
    assert!(params.optics.angles.incidence.is_absent());
    assert_eq!(params.optics.indices.n1.get(), Some(1.0));

    for bad in [json!([1, 2]), json!(3), json!(null), json!("x")] {
        assert_eq!(normalize(&bad), normalize(&json!({})));
    }
    assert_eq!(normalize_str("{not json"), normalize(&json!({})));
}

#[test]
fn test_sequences_are_coerced_element_wise() {
    let params = normalize(&json!({
        "collision": {"masses": [2, "3", "x"], "velocities_before": 4, "velocities_after": null},
        "pulley": {"masses_left": ["5", 2.5], "spring_coupled": "yes"},
        "composite_topics": "energy",
    }));
    let masses: Vec<Option<f64>> = params.collision.masses.iter().map(|m| m.get()).collect();
    assert_eq!(masses, vec![Some(2.0), Some(3.0), None]);
    assert!(params.collision.velocities_before.is_empty());
    assert!(params.collision.velocities_after.is_empty());
    assert_eq!(params.pulley.masses_left.len(), 2);
    assert!(!params.pulley.spring_coupled);
    assert!(params.composite_topics.is_empty());
}

#[test]
fn test_formulas_are_sanitized() {
    let params = normalize(&json!({
        "formulas": {
            "equations": ["v = u + at", 3, "v = u + at", "s = ut"],
            "calculations": {"range": "40.8", "angle": 45, "bogus": "n/a", "nothing": null},
        }
    }));
    assert_eq!(params.formulas.equations, vec!["v = u + at", "s = ut"]);
    let keys: Vec<&str> = params.formulas.calculations.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["range", "angle"]);
    assert_eq!(params.formulas.get("range"), Some(40.8));

    let scalar = normalize(&json!({"formulas": {"calculations": [1, 2]}}));
    assert!(scalar.formulas.calculations.is_empty());
}
