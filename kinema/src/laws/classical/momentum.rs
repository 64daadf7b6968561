use crate::core::normalize::DEFAULT_GRAVITY;
use crate::core::schema::{Measure, NormalizedParameters};

/// Post-collision velocities of two bodies on a line.
///
/// `e` is the coefficient of restitution: 1 is elastic, 0 leaves both bodies
/// with the common centre-of-mass velocity. Momentum is conserved for any `e`.
pub fn resolve_1d(m1: f64, u1: f64, m2: f64, u2: f64, e: f64) -> (f64, f64) {
    let total = m1 + m2;
    let momentum = m1 * u1 + m2 * u2;
    let v1 = (momentum - m2 * e * (u1 - u2)) / total;
    let v2 = (momentum + m1 * e * (u1 - u2)) / total;
    (v1, v2)
}

/// Σmᵢvᵢ over the pairs where both values are present.
pub fn momentum(masses: &[Measure], velocities: &[Measure]) -> f64 {
    masses
        .iter()
        .zip(velocities)
        .filter_map(|(m, v)| Some(m.get()? * v.get()?))
        .sum()
}

/// Σ½mᵢvᵢ² over the pairs where both values are present.
pub fn kinetic_energy(masses: &[Measure], velocities: &[Measure]) -> f64 {
    masses
        .iter()
        .zip(velocities)
        .filter_map(|(m, v)| Some(0.5 * m.get()? * v.get()?.powi(2)))
        .sum()
}

pub fn energy(p: &mut NormalizedParameters) {
    let m = p.mass.nonzero_or(1.0);
    let g = p.gravity.nonzero_or(DEFAULT_GRAVITY);
    let v = p.initial_velocity.magnitude.get();
    let h = p.launch_height.nonzero().or(p.initial_position.y0.get());
    let f = &mut p.formulas;
    f.equation("KE = ½mv²");
    f.equation("PE = mgh");
    f.equation("W = Fd");
    f.equation("P = W/t");

    let e = &mut p.energy;
    if let Some(v) = v {
        let ke = f.record("kinetic_energy", 0.5 * m * v * v);
        e.kinetic.fill(ke);
    }
    if let Some(h) = h {
        let pe = f.record("potential_energy", m * g * h);
        e.potential_gravitational.fill(pe);
    }
    if let (Some(ke), Some(pe)) = (e.kinetic.get(), e.potential_gravitational.get()) {
        f.record("total_energy", ke + pe);
    }
    if let (Some(k), Some(x)) = (e.spring_constant.get(), p.displacement.get()) {
        let elastic = f.record("elastic_pe", 0.5 * k * x * x);
        e.potential_elastic.fill(elastic);
    }
    if let (Some(force), Some(d)) = (p.forces.applied.get(), p.distance.get()) {
        let work = f.record("work_done", force * d);
        e.work_done.fill(work);
    }
    if let (Some(work), Some(t)) = (e.work_done.get(), p.time.get()) {
        if t > 0.0 {
            f.record("power", work / t);
        }
    }
}

/// Momentum bookkeeping for a collision.
///
/// Without after-velocities a perfectly inelastic collision gets the shared
/// final velocity, and a two-body collision is resolved with the coefficient
/// of restitution (1 when unspecified). Both write the result back.
pub fn collision(p: &mut NormalizedParameters) {
    let f = &mut p.formulas;
    f.equation("p = mv");
    f.equation("p₁+p₂ = p₁′+p₂′");
    f.equation("J = Δp");

    let c = &mut p.collision;
    if c.masses.len() < 2 || c.velocities_before.len() < 2 {
        return;
    }
    let before = momentum(&c.masses, &c.velocities_before);
    f.record("total_momentum_before", before);
    f.record(
        "total_kinetic_energy_before",
        kinetic_energy(&c.masses, &c.velocities_before),
    );

    if c.velocities_after.is_empty() {
        if c.is_inelastic() {
            let total_mass: f64 = c.masses.iter().filter_map(|m| m.get()).sum();
            if total_mass > 0.0 {
                if let Some(vf) = f.record("final_velocity", before / total_mass) {
                    c.velocities_after = vec![Measure::new(vf)];
                }
            }
        } else if c.masses.len() == 2 && c.velocities_before.len() == 2 {
            if let (Some(m1), Some(u1), Some(m2), Some(u2)) = (
                c.masses[0].get(),
                c.velocities_before[0].get(),
                c.masses[1].get(),
                c.velocities_before[1].get(),
            ) {
                let e = c.coefficient_of_restitution.or(1.0);
                if m1 + m2 > 0.0 {
                    let (v1, v2) = resolve_1d(m1, u1, m2, u2, e);
                    let v1 = f.record("velocity_after_1", v1);
                    let v2 = f.record("velocity_after_2", v2);
                    if let (Some(v1), Some(v2)) = (v1, v2) {
                        c.velocities_after = vec![Measure::new(v1), Measure::new(v2)];
                    }
                }
            }
        }
    }

    let after = match c.velocities_after.as_slice() {
        [] => return,
        [shared] => vec![*shared; c.masses.len()],
        each => each.to_vec(),
    };
    f.record("total_momentum_after", momentum(&c.masses, &after));
    f.record("total_kinetic_energy_after", kinetic_energy(&c.masses, &after));
    if let (Some(m1), Some(u1), Some(v1)) = (
        c.masses[0].get(),
        c.velocities_before[0].get(),
        after[0].get(),
    ) {
        let impulse = f.record("impulse", m1 * (v1 - u1));
        c.impulse.fill(impulse);
    }
}
