use crate::core::normalize::DEFAULT_GRAVITY;
use crate::core::schema::NormalizedParameters;

pub const WATER_DENSITY: f64 = 1000.0;
pub const AIR_DENSITY: f64 = 1.225;
pub const ATMOSPHERE: f64 = 101_325.0;

/// Continuity and Bernoulli along a pipe with two cross sections.
pub fn fluid_dynamics(p: &mut NormalizedParameters) {
    let rho = p.fluid.density.nonzero_or(WATER_DENSITY);
    let g = p.gravity.nonzero_or(DEFAULT_GRAVITY);
    let fluid = &p.fluid;
    let f = &mut p.formulas;
    f.equation("A₁v₁ = A₂v₂");
    f.equation("P + ½ρv² + ρgh = const");

    let (Some(a1), Some(a2), Some(v1)) = (fluid.area1.get(), fluid.area2.nonzero(), fluid.velocity1.get()) else {
        return;
    };
    let v2 = a1 * v1 / a2;
    f.record("velocity2", v2);
    let p1 = fluid.pressure1.nonzero_or(ATMOSPHERE);
    let h1 = fluid.height1.nonzero_or(0.0);
    let h2 = fluid.height2.nonzero_or(0.0);
    let p2 = p1 + 0.5 * rho * (v1 * v1 - v2 * v2) + rho * g * (h1 - h2);
    f.record("pressure2", p2);
}

/// Pressure difference across a wing, from the airspeeds above and below it
/// or else from the measured surface pressures.
pub fn lift(p: &mut NormalizedParameters) {
    let rho = p.fluid.density.nonzero_or(AIR_DENSITY);
    let f = &mut p.formulas;
    f.equation("F_lift = ΔP × A");
    f.equation("ΔP = ½ρ(v_b² - v_t²)");

    let Some(area) = p.lift.wing_area.get() else {
        return;
    };
    let dp = match (p.lift.velocity_top.get(), p.lift.velocity_bottom.get()) {
        (Some(top), Some(bottom)) => 0.5 * rho * (bottom * bottom - top * top),
        _ => match (p.lift.pressure_top.get(), p.lift.pressure_bottom.get()) {
            (Some(top), Some(bottom)) => bottom - top,
            _ => return,
        },
    };
    let dp = dp.abs();
    f.record("pressure_difference", dp);
    f.record("lift_force", dp * area);
}
