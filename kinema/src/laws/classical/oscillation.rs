use std::f64::consts::{PI, TAU};

use crate::core::normalize::DEFAULT_GRAVITY;
use crate::core::schema::NormalizedParameters;

pub fn spring(p: &mut NormalizedParameters) {
    let k = p.energy.spring_constant.nonzero().or(p.spring.constant.get());
    let x = p.spring.displacement.nonzero().or(p.displacement.get());
    let m = p.mass.nonzero_or(1.0);
    let f = &mut p.formulas;
    f.equation("F = -kx");
    f.equation("PE = ½kx²");
    f.equation("ω = √(k/m)");
    f.equation("T = 2π/ω");

    let Some(k) = k else {
        return;
    };
    if let Some(x) = x {
        f.record("spring_force", -k * x);
        f.record("elastic_pe", 0.5 * k * x * x);
    }
    if k > 0.0 && m > 0.0 {
        let omega = (k / m).sqrt();
        f.record("angular_frequency", omega);
        f.record("period", TAU / omega);
        f.record("frequency", omega / TAU);
    }
}

/// Oscillator on a rough floor, estimated as equivalent linear damping.
pub fn spring_friction(p: &mut NormalizedParameters) {
    let m = p.mass.nonzero_or(2.0);
    let k = p.spring.constant.nonzero_or(50.0);
    let mu_k = p.friction.kinetic_coefficient.nonzero_or(0.15);
    let g = p.gravity.nonzero_or(DEFAULT_GRAVITY);
    let x0 = p.spring.displacement.nonzero_or(1.5);
    let f = &mut p.formulas;
    f.equation("ω₀ = √(k/m)");
    f.equation("f_friction = μ_k·mg");
    f.equation("Damping: b_eff ≈ 2f/(πx₀)");
    f.equation("Energy loss per cycle ≈ 4μ_k·mg·x");

    let friction = mu_k * m * g;
    f.record("natural_frequency", (k / m).sqrt());
    f.record("friction_force", friction);
    f.record("effective_damping", 2.0 * friction / (PI * x0));
    f.record("energy_loss_per_cycle", 4.0 * friction * x0);
}

/// Two masses over a pulley joined by a spring, reduced to one oscillator.
pub fn pulley_spring(p: &mut NormalizedParameters) {
    let m1 = p.pulley.mass1.nonzero_or(10.0);
    let m2 = p.pulley.mass2.nonzero_or(5.0);
    let k = p.pulley.spring_constant.nonzero_or(20.0);
    let g = p.gravity.nonzero_or(DEFAULT_GRAVITY);
    let f = &mut p.formulas;
    f.equation("m_eff = (m₁·m₂)/(m₁+m₂)");
    f.equation("ω = √(k/m_eff)");
    f.equation("T = 2π/ω");
    f.equation("Δx_eq = (m₁-m₂)g/k");

    let m_eff = m1 * m2 / (m1 + m2);
    let omega = (k / m_eff).sqrt();
    f.record("effective_mass", m_eff);
    f.record("angular_frequency", omega);
    f.record("period", TAU / omega);
    f.record("equilibrium_extension", (m1 - m2) * g / k);
}
