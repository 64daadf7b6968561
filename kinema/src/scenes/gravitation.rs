use std::f64::consts::TAU;

use glam::DVec2;

use crate::core::schema::NormalizedParameters;
use crate::laws::classical::gravitation::{G, orbital_speed};
use crate::platform::surface::{Align, Color, DrawCommand, Surface, palette};
use crate::scenes::{CENTRE, Meta, Trail};
use crate::simulation::camera::Camera;
use crate::simulation::object::{SimulationObject, Stage};

const SOLAR_MASS: f64 = 1.989e30;
const EARTH_MASS: f64 = 5.972e24;
const ASTRONOMICAL_UNIT: f64 = 1.496e11;
const SECONDS_PER_DAY: f64 = 86_400.0;

const ORBIT_RADIUS: f64 = 180.0;
const MOON_RADIUS: f64 = 60.0;
/// Seconds per drawn revolution of the planet.
const ORBIT_PERIOD: f64 = 8.0;

const STAR: Color = Color::rgb(0xff, 0xcc, 0x00);

/// A planet on a circular orbit with one moon.
///
/// Real orbital periods are reported in the HUD; the drawn orbit always
/// takes [`ORBIT_PERIOD`] seconds.
pub struct Orbit {
    meta: Meta,
    central_mass: f64,
    mass: f64,
    radius: f64,
    angle: f64,
    moon_angle: f64,
    trail: Trail,
    moon_trail: Trail,
}

impl Orbit {
    pub fn new(params: &NormalizedParameters) -> Self {
        Self {
            meta: Meta::new(params, "Orbital System"),
            central_mass: params.gravitation.central_mass.nonzero_or(SOLAR_MASS),
            mass: params.mass.nonzero_or(EARTH_MASS),
            radius: params.gravitation.orbital_radius.nonzero_or(ASTRONOMICAL_UNIT).abs(),
            angle: 0.0,
            moon_angle: 0.0,
            trail: Trail::new(500),
            moon_trail: Trail::new(200),
        }
    }

    pub fn orbital_velocity(&self) -> f64 {
        orbital_speed(G * self.central_mass, self.radius)
    }

    pub fn period(&self) -> f64 {
        TAU * self.radius / self.orbital_velocity()
    }

    pub fn force(&self) -> f64 {
        G * self.central_mass * self.mass / (self.radius * self.radius)
    }

    fn planet(&self) -> DVec2 {
        CENTRE + DVec2::from_angle(self.angle) * ORBIT_RADIUS
    }

    fn moon(&self) -> DVec2 {
        self.planet() + DVec2::from_angle(self.moon_angle) * MOON_RADIUS
    }
}

impl SimulationObject for Orbit {
    fn update(&mut self, _dt: f64, elapsed: f64) {
        let w = TAU / ORBIT_PERIOD;
        self.angle = w * elapsed;
        self.moon_angle = 4.0 * w * elapsed;
        let (planet, moon) = (self.planet(), self.moon());
        self.trail.push(planet);
        self.moon_trail.push(moon);
    }

    fn render(&self, surface: &mut dyn Surface, _camera: &Camera) {
        let view = surface.viewport();
        for i in 0..50u32 {
            let x = f64::from((i * 137 + 42) * 7) % view.x.max(1.0);
            let y = f64::from((i * 193 + 42) * 11) % view.y.max(1.0);
            let alpha = 0.1 + (i % 5) as f32 * 0.05;
            surface.dot(DVec2::new(x, y), 0.8, palette::WHITE.with_alpha(alpha));
        }
        surface.draw(DrawCommand::Ring {
            at: CENTRE,
            radius: ORBIT_RADIUS,
            width: 1.0,
            color: palette::WHITE.with_alpha(0.06),
        });

        surface.dot(CENTRE, 50.0, STAR.with_alpha(0.15));
        surface.dot(CENTRE, 18.0, STAR);
        for i in 0..12 {
            let dir = DVec2::from_angle(i as f64 * TAU / 12.0);
            surface.line(
                CENTRE + dir * 30.0,
                CENTRE + dir * (ORBIT_RADIUS - 20.0),
                1.0,
                STAR.with_alpha(0.04),
            );
        }

        self.trail.draw_raw(surface, 2.0, palette::CYAN);
        self.moon_trail.draw_raw(surface, 1.0, palette::SILVER);

        let planet = self.planet();
        surface.dot(planet, 12.0, palette::CYAN);
        surface.dot(self.moon(), 5.0, palette::SILVER);

        let inward = (CENTRE - planet).normalize_or_zero();
        surface.arrow(planet, planet + inward * 45.0, palette::RED, Some("F_g".to_string()));
        let tangent = DVec2::new(-self.angle.sin(), self.angle.cos());
        surface.arrow(planet, planet + tangent * 40.0, palette::YELLOW, Some("v".to_string()));

        for (at, text, color) in [
            (CENTRE + DVec2::Y * 30.0, "M (Star)", STAR),
            (planet + DVec2::Y * 22.0, "m (Planet)", palette::CYAN),
            (DVec2::new(view.x / 2.0, 40.0), "F = G·M·m / r²  - Gravitational Orbit", palette::YELLOW),
        ] {
            surface.draw(DrawCommand::Text {
                at,
                text: text.to_string(),
                align: Align::Center,
                color,
            });
        }

        surface.hud(vec![
            "Gravitation - G = 6.674×10⁻¹¹".to_string(),
            format!("M = {:.2e} kg", self.central_mass),
            format!("m = {:.2e} kg", self.mass),
            format!("r = {:.2e} m", self.radius),
            format!("v = {:.2e} m/s", self.orbital_velocity()),
            format!("F = {:.2e} N", self.force()),
            format!("T = {:.1} days", self.period() / SECONDS_PER_DAY),
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, _camera: &Camera) -> Option<DVec2> {
        Some(self.planet())
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }
}

pub fn gravitation(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    stage.add_object(Orbit::new(params));
}
