use std::f64::consts::TAU;

use glam::DVec2;

use crate::core::schema::NormalizedParameters;
use crate::platform::surface::{DrawCommand, Surface, palette};
use crate::scenes::Meta;
use crate::simulation::camera::Camera;
use crate::simulation::object::{SimulationObject, Stage};

const BASELINE: DVec2 = DVec2::new(450.0, 300.0);
/// Sampled span either side of the centre, in surface units.
const HALF_SPAN: f64 = 1200.0;
const SAMPLES: usize = 600;
/// Offset of the tracked particle from the centre.
const PARTICLE_OFFSET: f64 = 100.0;

/// A travelling transverse wave `y = A sin(ωt - kx + φ)`.
pub struct TravellingWave {
    meta: Meta,
    kind: String,
    amplitude: f64,
    frequency: f64,
    wavelength: f64,
    phase: f64,
    speed: f64,
    t: f64,
}

impl TravellingWave {
    pub fn new(params: &NormalizedParameters) -> Self {
        let waves = &params.waves;
        let frequency = waves.frequency.nonzero_or(2.0);
        let wavelength = waves.wavelength.nonzero_or(2.0);
        Self {
            meta: Meta::new(params, "Wave"),
            kind: waves.kind.or("transverse").to_string(),
            amplitude: waves.amplitude.nonzero_or(1.0),
            frequency,
            wavelength,
            phase: waves.phase.nonzero_or(0.0),
            speed: waves.speed.nonzero_or(frequency * wavelength),
            t: 0.0,
        }
    }

    /// Displacement at position `x` metres from the centre.
    pub fn displacement(&self, x: f64) -> f64 {
        let k = TAU / self.wavelength;
        let omega = TAU * self.frequency;
        self.amplitude * (omega * self.t - k * x + self.phase).sin()
    }

    fn velocity_sign(&self, x: f64) -> f64 {
        let k = TAU / self.wavelength;
        let omega = TAU * self.frequency;
        (omega * self.t - k * x + self.phase).cos().signum()
    }
}

impl SimulationObject for TravellingWave {
    fn update(&mut self, _dt: f64, elapsed: f64) {
        self.t = elapsed;
    }

    fn render(&self, surface: &mut dyn Surface, camera: &Camera) {
        let s = camera.scale();
        surface.line(
            BASELINE - DVec2::X * HALF_SPAN,
            BASELINE + DVec2::X * HALF_SPAN,
            1.0,
            palette::WHITE.with_alpha(0.06),
        );

        let points = (0..=SAMPLES)
            .map(|i| {
                let px = -HALF_SPAN + 2.0 * HALF_SPAN * i as f64 / SAMPLES as f64;
                let x = px / s;
                camera.to_surface(DVec2::new(x, self.displacement(x)), BASELINE)
            })
            .collect();
        surface.draw(DrawCommand::Trail {
            points,
            width: 2.5,
            color: palette::CYAN,
        });

        let peak = BASELINE - DVec2::Y * self.amplitude * s;
        surface.line(BASELINE, peak, 2.0, palette::VIOLET);
        surface.dot(peak, 4.0, palette::VIOLET);
        surface.label(
            DVec2::new(BASELINE.x + 8.0, (BASELINE.y + peak.y) / 2.0),
            format!("A={:.2} m", self.amplitude),
            palette::VIOLET,
        );

        let span = self.wavelength * s;
        if span > 20.0 {
            let y = BASELINE.y + self.amplitude.abs() * s + 30.0;
            let (from, to) = (DVec2::new(BASELINE.x, y), DVec2::new(BASELINE.x + span, y));
            surface.line(from, to, 2.0, palette::ORANGE);
            surface.line(from - DVec2::Y * 5.0, from + DVec2::Y * 5.0, 2.0, palette::ORANGE);
            surface.line(to - DVec2::Y * 5.0, to + DVec2::Y * 5.0, 2.0, palette::ORANGE);
            surface.label(
                DVec2::new((from.x + to.x) / 2.0, y + 15.0),
                format!("λ={:.2} m", self.wavelength),
                palette::ORANGE,
            );
        }

        let x = PARTICLE_OFFSET / s;
        let particle = camera.to_surface(DVec2::new(x, self.displacement(x)), BASELINE);
        surface.dot(particle, 6.0, palette::RED);
        surface.arrow(
            particle,
            particle - DVec2::Y * 30.0 * self.velocity_sign(x),
            palette::RED,
            Some("v_p".to_string()),
        );

        surface.hud(vec![
            format!("Wave - {}", self.kind),
            "y = A·sin(2πft − kx)".to_string(),
            format!(
                "A = {:.2} m   f = {} Hz   λ = {:.2} m",
                self.amplitude, self.frequency, self.wavelength
            ),
            format!("v = {:.2} m/s   T = {:.3} s", self.speed, 1.0 / self.frequency),
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, camera: &Camera) -> Option<DVec2> {
        let x = PARTICLE_OFFSET / camera.scale();
        Some(camera.to_surface(DVec2::new(x, self.displacement(x)), BASELINE))
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }
}

pub fn waves(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    stage.add_object(TravellingWave::new(params));
}
