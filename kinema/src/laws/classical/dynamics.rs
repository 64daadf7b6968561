use crate::core::math::{radians, round6};
use crate::core::normalize::DEFAULT_GRAVITY;
use crate::core::schema::NormalizedParameters;

pub fn forces(p: &mut NormalizedParameters) {
    let m = p.mass.nonzero_or(1.0);
    let g = p.gravity.nonzero_or(DEFAULT_GRAVITY);
    let a = p.acceleration.value.get();
    let f = &mut p.formulas;
    f.equation("F = ma");
    f.equation("W = mg");
    f.equation("f = μN");

    f.record("weight", m * g);
    if p.forces.normal_force.is_absent() {
        p.forces.normal_force.set(round6(m * g));
        f.record("normal_force", m * g);
    }
    if let Some(a) = a {
        let net = f.record("net_force", m * a);
        p.forces.net_force.fill(net);
    }
}

pub fn friction(p: &mut NormalizedParameters) {
    let m = p.mass.nonzero_or(1.0);
    let g = p.gravity.nonzero_or(DEFAULT_GRAVITY);
    let normal = m * g;
    let f = &mut p.formulas;
    f.equation("f_s = μ_s·N");
    f.equation("f_k = μ_k·N");
    f.equation("N = mg");

    f.record("normal_force", normal);
    if let Some(mu_s) = p.friction.static_coefficient.get() {
        f.record("max_static_friction", mu_s * normal);
    }
    let Some(mu_k) = p.friction.kinetic_coefficient.get() else {
        return;
    };
    f.record("kinetic_friction", mu_k * normal);
    if let Some(applied) = p.forces.applied.get() {
        let net = applied - mu_k * normal;
        f.record("net_force", net);
        f.record("acceleration", net / m);
    }
}

/// Block on a slope; the angle falls back to the launch angle, then 30°.
pub fn inclined_plane(p: &mut NormalizedParameters) {
    let m = p.mass.nonzero_or(1.0);
    let g = p.gravity.nonzero_or(DEFAULT_GRAVITY);
    let theta = p
        .incline
        .angle
        .nonzero()
        .unwrap_or_else(|| p.launch_angle.nonzero_or(30.0));
    let mu = p.friction.kinetic_coefficient.nonzero_or(0.0);
    let f = &mut p.formulas;
    f.equation("F∥ = mg·sin(θ)");
    f.equation("N = mg·cos(θ)");
    f.equation("f = μN");

    let weight = m * g;
    let rad = radians(theta);
    let parallel = weight * rad.sin();
    let normal = weight * rad.cos();
    let friction = mu * normal;
    f.record("parallel_force", parallel);
    f.record("normal_force", normal);
    f.record("friction_force", friction);
    f.record("net_force", parallel - friction);
    f.record("acceleration", (parallel - friction) / m);
}

/// Atwood machine.
pub fn pulley(p: &mut NormalizedParameters) {
    let g = p.gravity.nonzero_or(DEFAULT_GRAVITY);
    let f = &mut p.formulas;
    f.equation("a = (m₁−m₂)g/(m₁+m₂)");
    f.equation("T = 2m₁m₂g/(m₁+m₂)");

    let (Some(m1), Some(m2)) = (p.pulley.mass1.get(), p.pulley.mass2.get()) else {
        return;
    };
    if m1 + m2 <= 0.0 {
        return;
    }
    f.record("acceleration", (m1 - m2) * g / (m1 + m2));
    let tension = f.record("tension", 2.0 * m1 * m2 * g / (m1 + m2));
    p.forces.tension.fill(tension);
}

/// Block and tackle. The ideal mechanical advantage equals the pulley count.
pub fn multi_pulley(p: &mut NormalizedParameters) {
    let g = p.gravity.nonzero_or(DEFAULT_GRAVITY);
    let n = p.multi_pulley.num_pulleys.nonzero_or(4.0);
    let load = p.multi_pulley.load_mass.nonzero_or(100.0);
    let effort = p.multi_pulley.effort_mass.nonzero_or(load / n + 2.0);
    let f = &mut p.formulas;
    f.equation("MA = n");
    f.equation("F_effort = W / MA");
    f.equation("a = (F_e·MA − W)/(m_load + m_effort·MA)");

    let weight = load * g;
    f.record("mechanical_advantage", n);
    f.record("load_weight", weight);
    f.record("ideal_effort", weight / n);
    f.record("effort_force", effort * g);
    let total = load + effort * n;
    if total != 0.0 {
        f.record("net_acceleration", (effort * g * n - weight) / total);
    }
}

/// Axial stress and strain of a loaded rod.
pub fn elasticity(p: &mut NormalizedParameters) {
    let f = &mut p.formulas;
    f.equation("σ = F/A");
    f.equation("ε = σ/E");
    f.equation("ΔL = εL₀");

    let (Some(force), Some(area)) = (p.forces.applied.get(), p.elasticity.area.nonzero()) else {
        return;
    };
    let stress = force / area;
    f.record("stress", stress);
    let Some(modulus) = p.elasticity.youngs_modulus.nonzero() else {
        return;
    };
    let strain = stress / modulus;
    f.record("strain", strain);
    if let Some(length) = p.elasticity.original_length.get() {
        f.record("deformation", strain * length);
    }
}
