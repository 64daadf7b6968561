//! Ideal gas in a piston, heated and cooled between two temperatures.

use glam::DVec2;

use crate::core::schema::NormalizedParameters;
use crate::laws::continuum::thermal::R;
use crate::platform::surface::{Align, Color, DrawCommand, Surface, palette};
use crate::scenes::{Meta, scatter};
use crate::simulation::camera::Camera;
use crate::simulation::object::{SimulationObject, Stage};

const PARTICLES: usize = 50;
const CONTAINER_X: f64 = 400.0;
const CONTAINER_TOP: f64 = 150.0;
const CONTAINER_BOTTOM: f64 = 420.0;
const BASE_WIDTH: f64 = 200.0;
/// Extra width at the final temperature.
const EXPANSION: f64 = 100.0;
const WALL_MARGIN: f64 = 5.0;

#[derive(Debug, Clone, Copy)]
struct Particle {
    at: DVec2,
    velocity: DVec2,
}

/// Gas container whose width follows the temperature at constant pressure.
pub struct GasContainer {
    meta: Meta,
    moles: f64,
    initial: f64,
    target: f64,
    pressure: f64,
    heat: f64,
    temperature: f64,
    width: f64,
    particles: Vec<Particle>,
}

impl GasContainer {
    pub fn new(params: &NormalizedParameters) -> Self {
        let t = &params.thermodynamics;
        let initial = t.temperature_initial.nonzero_or(300.0);
        let target = t.temperature_final.nonzero_or(500.0);
        let mass = params.mass.nonzero_or(1.0);
        let c = t.specific_heat.nonzero_or(1000.0);
        let particles = (0..PARTICLES)
            .map(|i| Particle {
                at: DVec2::new(300.0 + scatter(i) * 200.0, 150.0 + scatter(i + PARTICLES) * 250.0),
                velocity: DVec2::new(scatter(i + 2 * PARTICLES) - 0.5, scatter(i + 3 * PARTICLES) - 0.5) * 60.0,
            })
            .collect();
        Self {
            meta: Meta::new(params, "Gas System"),
            moles: t.moles.nonzero_or(1.0),
            initial,
            target,
            pressure: t.pressure.nonzero_or(101_325.0),
            heat: mass * c * (target - initial),
            temperature: initial,
            width: BASE_WIDTH,
            particles,
        }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Volume at the current temperature from `PV = nRT`.
    pub fn volume(&self) -> f64 {
        self.moles * R * self.temperature / self.pressure
    }

    pub fn heat(&self) -> f64 {
        self.heat
    }

    /// Position of the current temperature between the two extremes.
    fn ratio(&self) -> f64 {
        let span = self.target - self.initial;
        if span == 0.0 { 0.0 } else { (self.temperature - self.initial) / span }
    }

    fn walls(&self) -> (f64, f64) {
        (CONTAINER_X - self.width / 2.0, CONTAINER_X + self.width / 2.0)
    }

    /// Every particle lies inside the current container.
    pub fn is_contained(&self) -> bool {
        let (left, right) = self.walls();
        self.particles.iter().all(|p| {
            (left..=right).contains(&p.at.x) && (CONTAINER_TOP..=CONTAINER_BOTTOM).contains(&p.at.y)
        })
    }
}

impl SimulationObject for GasContainer {
    fn update(&mut self, dt: f64, elapsed: f64) {
        let cycle = ((elapsed * 0.5).sin() + 1.0) / 2.0;
        self.temperature = self.initial + (self.target - self.initial) * cycle;
        let speed = (self.temperature / self.initial).abs().sqrt();
        self.width = BASE_WIDTH + self.ratio() * EXPANSION;

        let (left, right) = self.walls();
        let (left, right) = (left + WALL_MARGIN, right - WALL_MARGIN);
        let (top, bottom) = (CONTAINER_TOP + WALL_MARGIN, CONTAINER_BOTTOM - WALL_MARGIN);
        for p in &mut self.particles {
            p.at += p.velocity * speed * dt;
            if p.at.x < left {
                p.at.x = left;
                p.velocity.x = p.velocity.x.abs();
            }
            if p.at.x > right {
                p.at.x = right;
                p.velocity.x = -p.velocity.x.abs();
            }
            if p.at.y < top {
                p.at.y = top;
                p.velocity.y = p.velocity.y.abs();
            }
            if p.at.y > bottom {
                p.at.y = bottom;
                p.velocity.y = -p.velocity.y.abs();
            }
        }
    }

    fn render(&self, surface: &mut dyn Surface, _camera: &Camera) {
        let (left, right) = self.walls();
        let height = CONTAINER_BOTTOM - CONTAINER_TOP;
        let mid_y = (CONTAINER_TOP + CONTAINER_BOTTOM) / 2.0;
        let ratio = self.ratio() as f32;
        let glass = Color::rgba(0.63, 0.71, 0.86, 0.5);

        surface.draw(DrawCommand::Rect {
            at: DVec2::new(left, CONTAINER_TOP),
            size: DVec2::new(self.width, height),
            color: Color::rgba((50.0 + ratio * 150.0) / 255.0, 0.12, (150.0 - ratio * 100.0) / 255.0, 0.15),
        });
        let corners = vec![
            DVec2::new(right, CONTAINER_TOP),
            DVec2::new(left, CONTAINER_TOP),
            DVec2::new(left, CONTAINER_BOTTOM),
            DVec2::new(right, CONTAINER_BOTTOM),
        ];
        surface.draw(DrawCommand::Trail { points: corners, width: 3.0, color: glass });

        let particle = Color::rgba(
            (100.0 + ratio * 155.0) / 255.0,
            (80.0 + ratio * 80.0) / 255.0,
            (200.0 - ratio * 150.0) / 255.0,
            1.0,
        );
        for p in &self.particles {
            surface.dot(p.at, 3.0, particle);
        }

        surface.draw(DrawCommand::Rect {
            at: DVec2::new(right - 8.0, CONTAINER_TOP),
            size: DVec2::new(8.0, height),
            color: glass.with_alpha(0.3),
        });
        surface.line(DVec2::new(right, CONTAINER_TOP), DVec2::new(right, CONTAINER_BOTTOM), 2.0, palette::SILVER);
        surface.draw(DrawCommand::Rect {
            at: DVec2::new(right, mid_y - 20.0),
            size: DVec2::new(40.0, 40.0),
            color: Color::rgba(0.47, 0.55, 0.71, 0.3),
        });

        let (tx, ty, th, tw) = (180.0, 160.0, 250.0, 20.0);
        let fill = f64::from(ratio) * th;
        surface.draw(DrawCommand::Rect {
            at: DVec2::new(tx, ty),
            size: DVec2::new(tw, th),
            color: palette::WHITE.with_alpha(0.05),
        });
        surface.draw(DrawCommand::Rect {
            at: DVec2::new(tx + 2.0, ty + th - fill),
            size: DVec2::new(tw - 4.0, fill),
            color: palette::RED,
        });
        surface.dot(DVec2::new(tx + tw / 2.0, ty + th + 15.0), 15.0, palette::RED);

        let kelvin = self.temperature;
        let celsius = kelvin - 273.15;
        let texts = [
            (DVec2::new(tx + tw / 2.0, ty - 10.0), format!("{kelvin:.0} K"), Align::Center, palette::RED),
            (DVec2::new(tx + tw / 2.0, ty - 25.0), format!("{celsius:.0}°C"), Align::Center, palette::RED),
            (DVec2::new(tx - 5.0, ty + th + 4.0), format!("{}K", self.initial), Align::Right, palette::STEEL),
            (DVec2::new(tx - 5.0, ty + 8.0), format!("{}K", self.target), Align::Right, palette::STEEL),
            (DVec2::new(450.0, 55.0), "PV = nRT  (Ideal Gas Law)".to_string(), Align::Center, palette::YELLOW),
            (DVec2::new(450.0, 78.0), "Q = mcΔT  (Heat Transfer)".to_string(), Align::Center, palette::SILVER),
        ];
        for (at, text, align, color) in texts {
            surface.draw(DrawCommand::Text { at, text, align, color });
        }

        if kelvin < self.target {
            surface.arrow(
                DVec2::new(120.0, mid_y),
                DVec2::new(left - 10.0, mid_y),
                palette::RED,
                Some(format!("Q = {:.1} kJ", self.heat / 1000.0)),
            );
        }

        surface.hud(vec![
            "Thermodynamics".to_string(),
            format!("T = {kelvin:.0} K  ({celsius:.0}°C)"),
            format!("P = {:.1} kPa", self.pressure / 1000.0),
            format!("V = {:.4} m³", self.volume()),
            format!("n = {} mol", self.moles),
            format!("Q = mc∆T = {:.1} kJ", self.heat / 1000.0),
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, _camera: &Camera) -> Option<DVec2> {
        Some(DVec2::new(CONTAINER_X, 300.0))
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }
}

pub fn thermodynamics(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    stage.add_object(GasContainer::new(params));
}
