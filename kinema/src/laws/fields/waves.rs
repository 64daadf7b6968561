use crate::core::schema::NormalizedParameters;

/// Speed of sound in air (m/s) used when a Doppler problem gives no wave speed.
pub const SOUND_SPEED: f64 = 343.0;

/// Observed frequency for a moving source and observer.
pub fn doppler(frequency: f64, wave_speed: f64, observer: f64, source: f64) -> f64 {
    frequency * (wave_speed + observer) / (wave_speed + source)
}

/// `v = fλ` completion, period and Doppler shift.
///
/// The missing member of (speed, frequency, wavelength) is completed first
/// so every later quantity is derived from the same stored values.
pub fn waves(p: &mut NormalizedParameters) {
    let w = &mut p.waves;
    let f = &mut p.formulas;
    f.equation("v = fλ");
    f.equation("T = 1/f");

    match (w.speed.get(), w.frequency.nonzero(), w.wavelength.get()) {
        (Some(v), Some(freq), None) => {
            let lambda = f.record("wavelength", v / freq);
            w.wavelength.fill(lambda);
        }
        (Some(v), None, Some(lambda)) if lambda != 0.0 && w.frequency.is_absent() => {
            let freq = f.record("frequency", v / lambda);
            w.frequency.fill(freq);
        }
        _ => {}
    }

    if let (Some(freq), Some(lambda)) = (w.frequency.get(), w.wavelength.get()) {
        let speed = f.record("wave_speed", freq * lambda);
        w.speed.fill(speed);
    }
    if let Some(freq) = w.frequency.nonzero() {
        let period = f.record("period", 1.0 / freq);
        w.period.fill(period);
    }

    let source = w.doppler.source_velocity.get();
    let observer = w.doppler.observer_velocity.get();
    if source.is_none() && observer.is_none() {
        return;
    }
    f.equation("f_obs = f·(v+v_obs)/(v+v_src)");
    let wave_speed = w.speed.or(SOUND_SPEED);
    if let Some(freq) = w.frequency.get() {
        f.record(
            "observed_frequency",
            doppler(freq, wave_speed, observer.unwrap_or(0.0), source.unwrap_or(0.0)),
        );
    }
}
