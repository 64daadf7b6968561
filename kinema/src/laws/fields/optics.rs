use crate::core::math::{degrees, radians};
use crate::core::schema::NormalizedParameters;

/// Refraction angle in degrees, `None` past the critical angle.
pub fn snell(n1: f64, n2: f64, incidence: f64) -> Option<f64> {
    let sin_r = n1 * radians(incidence).sin() / n2;
    (sin_r.abs() <= 1.0).then(|| degrees(sin_r.asin()))
}

/// Image distance from the thin lens equation.
pub fn image_distance(focal: f64, object: f64) -> f64 {
    1.0 / (1.0 / focal - 1.0 / object)
}

pub fn optics(p: &mut NormalizedParameters) {
    let o = &mut p.optics;
    let f = &mut p.formulas;

    if let (Some(n1), Some(n2), Some(incidence)) = (o.indices.n1.get(), o.indices.n2.get(), o.angles.incidence.get()) {
        f.equation("n₁·sin(θ₁) = n₂·sin(θ₂)");
        if let Some(refraction) = snell(n1, n2, incidence) {
            let refraction = f.record("angle_of_refraction", refraction);
            o.angles.refraction.fill(refraction);
        }
    }

    f.equation("1/f = 1/dₒ + 1/dᵢ");
    f.equation("M = −dᵢ/dₒ");
    let object = o.object_distance.nonzero();
    match (o.focal_length.get(), object, o.image_distance.nonzero()) {
        (Some(focal), Some(d_o), _) => {
            let d_i = image_distance(focal, d_o);
            let stored = f.record("image_distance", d_i);
            f.record("magnification", -d_i / d_o);
            o.image_distance.fill(stored);
        }
        (None, Some(d_o), Some(d_i)) => {
            f.record("focal_length", 1.0 / (1.0 / d_o + 1.0 / d_i));
            f.record("magnification", -d_i / d_o);
        }
        _ => {}
    }
}
