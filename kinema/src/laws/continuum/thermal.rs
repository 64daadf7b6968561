use crate::core::schema::NormalizedParameters;

/// Molar gas constant (J mol⁻¹ K⁻¹).
pub const R: f64 = 8.314;

pub fn thermodynamics(p: &mut NormalizedParameters) {
    let m = p.mass.nonzero_or(1.0);
    let t = &mut p.thermodynamics;
    let f = &mut p.formulas;
    f.equation("Q = mcΔT");
    f.equation("PV = nRT");

    if let (Some(ti), Some(tf), Some(c)) = (
        t.temperature_initial.get(),
        t.temperature_final.get(),
        t.specific_heat.get(),
    ) {
        let dt = tf - ti;
        let q = f.record("heat_transfer", m * c * dt);
        f.record("temperature_change", dt);
        t.heat_transfer.fill(q);
    }
    if let (Some(pressure), Some(volume)) = (t.pressure.get(), t.volume.get()) {
        let pv = pressure * volume;
        f.record("PV_product", pv);
        if let Some(n) = t.moles.nonzero() {
            f.record("gas_temperature", pv / (n * R));
        }
    }
}
