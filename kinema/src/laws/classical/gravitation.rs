use std::f64::consts::TAU;

use crate::core::schema::NormalizedParameters;

/// Newtonian constant of gravitation (m³ kg⁻¹ s⁻²).
pub const G: f64 = 6.674e-11;

/// Speed of a circular orbit of radius `r` for gravitational parameter `mu`.
pub fn orbital_speed(mu: f64, r: f64) -> f64 {
    (mu / r).sqrt()
}

pub fn gravitation(p: &mut NormalizedParameters) {
    let f = &mut p.formulas;
    f.equation("F = GMm/r²");
    f.equation("v = √(GM/r)");
    f.equation("T = 2πr/v");

    let (Some(central), Some(m), Some(r)) = (
        p.gravitation.central_mass.get(),
        p.mass.get(),
        p.gravitation.orbital_radius.get(),
    ) else {
        return;
    };
    if r <= 0.0 {
        return;
    }
    f.record("gravitational_force", G * central * m / (r * r));
    let v = orbital_speed(G * central, r);
    f.record("orbital_velocity", v);
    f.record("orbital_period", TAU * r / v);
}
