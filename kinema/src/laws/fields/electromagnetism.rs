use crate::core::schema::NormalizedParameters;

/// Electron rest mass (kg), the default particle for cyclotron problems.
pub const ELECTRON_MASS: f64 = 9.11e-31;

/// Ohm's law completion, then power from the completed circuit.
pub fn electricity(p: &mut NormalizedParameters) {
    let e = &mut p.electricity;
    let f = &mut p.formulas;
    f.equation("V = IR");
    f.equation("P = IV");
    f.equation("Q = CV");

    match (e.voltage.get(), e.current.get(), e.resistance.get()) {
        (Some(v), Some(i), None) => {
            let r = f.record("resistance", v / i);
            e.resistance.fill(r);
        }
        (Some(v), None, Some(r)) => {
            let i = f.record("current", v / r);
            e.current.fill(i);
        }
        (None, Some(i), Some(r)) => {
            let v = f.record("voltage", i * r);
            e.voltage.fill(v);
        }
        _ => {}
    }

    let power = match (e.voltage.get(), e.current.get(), e.resistance.get()) {
        (Some(v), Some(i), _) => Some(v * i),
        (_, Some(i), Some(r)) => Some(i * i * r),
        (Some(v), _, Some(r)) if r != 0.0 => Some(v * v / r),
        _ => None,
    };
    if let Some(power) = power {
        f.record("power", power);
    }
}

pub fn magnetism(p: &mut NormalizedParameters) {
    let f = &mut p.formulas;
    f.equation("F = qvB·sin(θ)");
    f.equation("EMF = −dΦ/dt");

    if let (Some(b), Some(q), Some(v)) = (
        p.magnetism.magnetic_field.get(),
        p.electricity.charge.get(),
        p.initial_velocity.magnitude.get(),
    ) {
        let force = f.record("lorentz_force", q * v * b);
        p.magnetism.force_on_charge.fill(force);
    }
}

/// Charged particle in a uniform field: Lorentz force and cyclotron orbit.
pub fn magnetism_advanced(p: &mut NormalizedParameters) {
    let m = p.mass.nonzero_or(ELECTRON_MASS);
    let f = &mut p.formulas;
    f.equation("F = qvB");
    f.equation("r = mv/(qB)");
    f.equation("ω = qB/m");

    let (Some(b), Some(q), Some(v)) = (
        p.magnetism.magnetic_field.get(),
        p.electricity.charge.get(),
        p.initial_velocity.magnitude.get(),
    ) else {
        return;
    };
    let q = q.abs();
    f.record("lorentz_force", q * v * b);
    if q != 0.0 && b != 0.0 {
        f.record("cyclotron_radius", m * v / (q * b));
        f.record("cyclotron_frequency", q * b / m);
    }
}
