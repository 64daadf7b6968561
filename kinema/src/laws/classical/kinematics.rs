use std::f64::consts::TAU;

use crate::core::math::{radians, round6};
use crate::core::normalize::DEFAULT_GRAVITY;
use crate::core::schema::NormalizedParameters;

pub fn projectile(p: &mut NormalizedParameters) {
    let g = p.gravity.nonzero_or(DEFAULT_GRAVITY);
    let h0 = p.launch_height.nonzero_or(0.0);
    let f = &mut p.formulas;
    f.equation("x = v₀·cos(θ)·t");
    f.equation("y = v₀·sin(θ)·t − ½gt²");
    f.equation("R = (v₀²·sin(2θ)) / g");
    f.equation("H = (v₀²·sin²(θ)) / (2g)");
    f.equation("T = (2·v₀·sin(θ)) / g");

    let (Some(v0), Some(angle)) = (p.initial_velocity.magnitude.get(), p.launch_angle.get()) else {
        return;
    };
    let theta = radians(angle);
    let vx = v0 * theta.cos();
    let vy = v0 * theta.sin();
    let flight = if h0 != 0.0 {
        let disc = vy * vy + 2.0 * g * h0;
        (disc >= 0.0).then(|| (vy + disc.sqrt()) / g)
    } else {
        Some(2.0 * vy / g)
    };

    f.record("velocity_x", vx);
    f.record("velocity_y", vy);
    f.record("max_height", h0 + vy * vy / (2.0 * g));
    if let Some(t) = flight {
        let range = vx * t;
        f.record("time_of_flight", t);
        f.record("range", range);
        p.time.fill(Some(round6(t)));
        p.distance.fill(Some(round6(range)));
    }
}

pub fn linear_motion(p: &mut NormalizedParameters) {
    let u = p.initial_velocity.magnitude.get();
    let a = p.acceleration.value.get();
    let t = p.time.get();
    let s = p.displacement.nonzero().or(p.distance.get());
    let f = &mut p.formulas;
    f.equation("v = u + at");
    f.equation("s = ut + ½at²");
    f.equation("v² = u² + 2as");

    let mut final_velocity = None;
    if let (Some(u), Some(a), Some(t)) = (u, a, t) {
        final_velocity = f.record("final_velocity", u + a * t);
        f.record("displacement", u * t + 0.5 * a * t * t);
    }
    if let (Some(u), Some(a), Some(s)) = (u, a, s) {
        let v2 = u * u + 2.0 * a * s;
        if v2 >= 0.0 {
            final_velocity = f.record("final_velocity", v2.sqrt());
        }
    }
    p.final_velocity.magnitude.fill(final_velocity);
}

pub fn circular_motion(p: &mut NormalizedParameters) {
    let r = p.radius.get();
    let w = p.angular_velocity.get();
    let m = p.mass.nonzero_or(1.0);
    let f = &mut p.formulas;
    f.equation("v = ωr");
    f.equation("a_c = v²/r");
    f.equation("F_c = mv²/r");
    f.equation("T = 2π/ω");

    let speed = p.initial_velocity.magnitude.get().or_else(|| Some(w? * r?));
    if let Some(v) = speed {
        f.record("speed", v);
    }
    if let (Some(v), Some(r)) = (speed, r) {
        let ac = f.record("centripetal_acceleration", v * v / r);
        f.record("centripetal_force", m * v * v / r);
        p.centripetal_acc.fill(ac);
    }
    if let Some(w) = w {
        let period = f.record("period", TAU / w);
        let frequency = f.record("frequency", w / TAU);
        p.period.fill(period);
        p.frequency.fill(frequency);
    }
}

/// Launch onto a slope, bounced with the coefficient of restitution.
pub fn projectile_incline(p: &mut NormalizedParameters) {
    let v0 = p.initial_velocity.magnitude.nonzero_or(20.0);
    let launch = p.launch_angle.nonzero_or(25.0);
    let incline = p.incline.angle.nonzero_or(45.0);
    let e = p.collision.coefficient_of_restitution.nonzero_or(0.7);
    let f = &mut p.formulas;
    f.equation("v₀ₓ = v₀·cos(θ)");
    f.equation("v₀ᵧ = v₀·sin(θ)");
    f.equation("Impact angle = θ_launch - θ_incline");
    f.equation("Bounce: v' = e·v");

    let theta = radians(launch);
    f.record("initial_vx", v0 * theta.cos());
    f.record("initial_vy", v0 * theta.sin());
    f.record("impact_angle_diff", launch - incline);
    f.record("restitution_coeff", e);
}
