use std::f64::consts::{PI, TAU};

use glam::DVec2;

use crate::core::schema::{NormalizedParameters, Topic};
use crate::laws::fields::electromagnetism::ELECTRON_MASS;
use crate::platform::surface::{Align, Color, DrawCommand, Surface, palette};
use crate::scenes::{CENTRE, Meta, Trail};
use crate::simulation::camera::Camera;
use crate::simulation::object::{SimulationObject, Stage};

const FIELD_LINES: usize = 12;
const NORTH: Color = Color::rgb(0xff, 0x6b, 0x6b);
const SOUTH: Color = Color::rgb(0x44, 0x88, 0xcc);
const FIELD: Color = Color::rgba(0.78, 0.78, 1.0, 0.5);
const ELEMENTARY_CHARGE: f64 = 1.6e-19;

/// Radial field lines around a point charge, with charge flowing along them.
pub struct PointCharge {
    meta: Meta,
    charge: f64,
    field: f64,
    t: f64,
}

impl PointCharge {
    pub fn new(params: &NormalizedParameters) -> Self {
        Self {
            meta: Meta::new(params, "Electric Field"),
            charge: params.electricity.charge.nonzero_or(5.0),
            field: params.electricity.electric_field.nonzero_or(100.0),
            t: 0.0,
        }
    }

    fn color(&self) -> Color {
        if self.charge >= 0.0 { palette::RED } else { palette::CYAN }
    }
}

impl SimulationObject for PointCharge {
    fn update(&mut self, _dt: f64, elapsed: f64) {
        self.t = elapsed;
    }

    fn render(&self, surface: &mut dyn Surface, camera: &Camera) {
        let color = self.color();
        let outward = self.charge >= 0.0;
        for i in 0..FIELD_LINES {
            let dir = DVec2::from_angle(i as f64 / FIELD_LINES as f64 * TAU);
            let (inner, outer) = (CENTRE + dir * 30.0, CENTRE + dir * 200.0);
            surface.line(inner, outer, 1.5, color.with_alpha(0.6));
            let mid = CENTRE + dir * 115.0;
            let (from, to) = if outward { (mid, mid + dir * 8.0) } else { (mid + dir * 8.0, mid) };
            surface.arrow(from, to, color, None);

            let flow = (self.t * 40.0 + i as f64 * 15.0) % 170.0;
            let r = if outward { 30.0 + flow } else { 200.0 - flow };
            surface.dot(CENTRE + dir * r, 2.5, color);
        }
        for r in [70.0, 120.0, 170.0] {
            surface.draw(DrawCommand::Ring {
                at: CENTRE,
                radius: r,
                width: 1.0,
                color: palette::WHITE.with_alpha(0.06),
            });
        }
        surface.dot(CENTRE, 20.0, color);
        surface.label(CENTRE + DVec2::new(-4.0, 8.0), if outward { "+" } else { "−" }.to_string(), palette::WHITE);

        surface.hud(vec![
            "Electric Field - Point Charge".to_string(),
            format!(
                "Q = {} μC ({})",
                self.charge,
                if outward { "positive" } else { "negative" }
            ),
            "E = kQ/r²   k = 8.99×10⁹".to_string(),
            format!("E(at 1{}) ≈ {} N/C", camera.unit(), self.field),
            format!("Field lines: {}", if outward { "outward" } else { "inward" }),
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, _camera: &Camera) -> Option<DVec2> {
        Some(CENTRE)
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }
}

const MAGNET: DVec2 = DVec2::new(200.0, 60.0);

/// Bar magnet with looping external field lines.
pub struct BarMagnet {
    meta: Meta,
    field: f64,
    t: f64,
}

impl BarMagnet {
    pub fn new(params: &NormalizedParameters) -> Self {
        Self {
            meta: Meta::new(params, "Magnetic Field"),
            field: params.magnetism.magnetic_field.nonzero_or(0.5),
            t: 0.0,
        }
    }

    /// Point `progress` of the way along a field loop from N to S.
    fn loop_point(offset: f64, progress: f64, above: bool) -> DVec2 {
        let left = CENTRE.x - MAGNET.x / 2.0 + 20.0;
        let span = MAGNET.x - 40.0;
        let bulge = offset * 1.8 * (progress * PI).sin() * 0.7;
        let edge = MAGNET.y / 2.0;
        let y = if above { CENTRE.y - edge - bulge } else { CENTRE.y + edge + bulge };
        DVec2::new(left + span * progress, y)
    }
}

impl SimulationObject for BarMagnet {
    fn update(&mut self, _dt: f64, elapsed: f64) {
        self.t = elapsed;
    }

    fn render(&self, surface: &mut dyn Surface, _camera: &Camera) {
        let top_left = CENTRE - MAGNET / 2.0;
        let half = DVec2::new(MAGNET.x / 2.0, MAGNET.y);
        surface.draw(DrawCommand::Rect { at: top_left, size: half, color: NORTH });
        surface.draw(DrawCommand::Rect {
            at: DVec2::new(CENTRE.x, top_left.y),
            size: half,
            color: SOUTH,
        });
        surface.label(DVec2::new(top_left.x + MAGNET.x * 0.25, CENTRE.y + 8.0), "N".to_string(), palette::WHITE);
        surface.label(DVec2::new(top_left.x + MAGNET.x * 0.75, CENTRE.y + 8.0), "S".to_string(), palette::WHITE);

        for (idx, offset) in [30.0, 60.0, 100.0, 150.0].into_iter().enumerate() {
            let color = FIELD.with_alpha(0.5 - idx as f32 * 0.1);
            for above in [true, false] {
                let points = (0..=24)
                    .map(|i| Self::loop_point(offset, i as f64 / 24.0, above))
                    .collect();
                surface.draw(DrawCommand::Trail { points, width: 1.5, color });
            }
            let progress = (self.t * 0.5 + idx as f64 * 0.25) % 1.0;
            surface.dot(Self::loop_point(offset, progress, true), 2.5, palette::YELLOW);
        }

        surface.hud(vec![
            "Bar Magnet - Magnetic Field".to_string(),
            format!("B = {} T", self.field),
            "B = μ₀I/(2πr)   F = qvB".to_string(),
            "Field: N → S (external)".to_string(),
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, _camera: &Camera) -> Option<DVec2> {
        Some(CENTRE)
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }
}

pub fn fields(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    if params.topic == Topic::Magnetism {
        stage.add_object(BarMagnet::new(params));
    } else {
        stage.add_object(PointCharge::new(params));
    }
}

/// Drawn orbit radius; real cyclotron radii span many orders of magnitude.
const ORBIT_RADIUS: f64 = 150.0;
/// Seconds per drawn revolution.
const ORBIT_PERIOD: f64 = 4.0;

/// A charge circling in a uniform field pointing into the screen.
pub struct Cyclotron {
    meta: Meta,
    field: f64,
    charge: f64,
    mass: f64,
    speed: f64,
    angle: f64,
    trail: Trail,
}

impl Cyclotron {
    pub fn new(params: &NormalizedParameters) -> Self {
        Self {
            meta: Meta::new(params, "Charged Particle"),
            field: params.magnetism.magnetic_field.nonzero_or(0.5),
            charge: params.electricity.charge.nonzero_or(ELEMENTARY_CHARGE),
            mass: params.mass.nonzero_or(ELECTRON_MASS),
            speed: params.initial_velocity.magnitude.nonzero_or(1e6),
            angle: 0.0,
            trail: Trail::new(400),
        }
    }

    pub fn radius(&self) -> f64 {
        self.mass * self.speed / (self.charge.abs() * self.field)
    }

    pub fn angular_frequency(&self) -> f64 {
        self.charge * self.field / self.mass
    }

    pub fn lorentz_force(&self) -> f64 {
        self.charge.abs() * self.speed * self.field
    }

    fn position(&self) -> DVec2 {
        let offset = DVec2::from_angle(self.angle) * ORBIT_RADIUS;
        DVec2::new(CENTRE.x + offset.x, CENTRE.y - offset.y)
    }
}

impl SimulationObject for Cyclotron {
    fn update(&mut self, _dt: f64, elapsed: f64) {
        // Positive charges circle anticlockwise in a field into the screen.
        let sense = (self.charge * self.field).signum();
        self.angle = sense * TAU * elapsed / ORBIT_PERIOD;
        let at = self.position();
        self.trail.push(at);
    }

    fn render(&self, surface: &mut dyn Surface, _camera: &Camera) {
        let viewport = surface.viewport();
        let marker = Color::rgba(0.39, 0.59, 1.0, 0.3);
        let mut gx = 60.0;
        while gx < viewport.x - 40.0 {
            let mut gy = 80.0;
            while gy < viewport.y - 40.0 {
                let at = DVec2::new(gx, gy);
                surface.line(at - DVec2::splat(5.0), at + DVec2::splat(5.0), 1.0, marker);
                surface.line(at + DVec2::new(5.0, -5.0), at + DVec2::new(-5.0, 5.0), 1.0, marker);
                gy += 60.0;
            }
            gx += 60.0;
        }
        surface.draw(DrawCommand::Text {
            at: DVec2::new(viewport.x / 2.0, viewport.y - 30.0),
            text: format!("B = {} T  (into screen ⊗)", self.field),
            align: Align::Center,
            color: marker,
        });

        surface.draw(DrawCommand::Ring {
            at: CENTRE,
            radius: ORBIT_RADIUS,
            width: 1.0,
            color: palette::ORANGE.with_alpha(0.1),
        });
        self.trail.draw_raw(surface, 2.5, palette::ORANGE);

        let at = self.position();
        surface.dot(at, 10.0, palette::ORANGE);
        let sense = (self.charge * self.field).signum();
        let tangent = DVec2::new(-self.angle.sin(), -self.angle.cos()) * sense;
        surface.arrow(at, at + tangent * 50.0, palette::CYAN, Some("v".to_string()));
        let inward = (CENTRE - at).normalize_or_zero();
        surface.arrow(at, at + inward * 40.0, palette::RED, Some("F".to_string()));

        surface.hud(vec![
            format!("Magnetic Field - B = {} T", self.field),
            format!("q = {:.2e} C", self.charge),
            format!("m = {:.2e} kg", self.mass),
            format!("v = {:.2e} m/s", self.speed),
            format!("F = qvB = {:.2e} N", self.lorentz_force()),
            format!("r = mv/(qB) = {:.2e} m", self.radius()),
            format!("ω = qB/m = {:.2e} rad/s", self.angular_frequency()),
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, _camera: &Camera) -> Option<DVec2> {
        Some(self.position())
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }
}

pub fn magnetism_advanced(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    stage.add_object(Cyclotron::new(params));
}
