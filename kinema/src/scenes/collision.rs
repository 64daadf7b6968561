use glam::DVec2;

use crate::core::schema::{Measure, NormalizedParameters};
use crate::laws::classical::momentum::resolve_1d;
use crate::platform::surface::{DrawCommand, Surface, palette};
use crate::scenes::{Meta, ground};
use crate::simulation::camera::Camera;
use crate::simulation::object::{SimulationObject, Stage};

/// Seconds before approaching bodies meet at the origin.
const LEAD_TIME: f64 = 3.0;
const TRACK: DVec2 = DVec2::new(450.0, 380.0);

/// Two bodies on a line meeting head-on.
///
/// Start positions are chosen so approaching bodies touch at `x = 0`; the
/// contact is resolved with the coefficient of restitution.
pub struct HeadOnCollision {
    meta: Meta,
    kind: String,
    masses: [f64; 2],
    before: [f64; 2],
    after: [f64; 2],
    start: [f64; 2],
    contact: Option<f64>,
    restitution: f64,
    t: f64,
    x: [f64; 2],
}

/// The first two values when both are present, otherwise `fallback`.
fn pair(values: &[Measure], fallback: [f64; 2]) -> [f64; 2] {
    let [a, b, ..] = values else {
        return fallback;
    };
    match (a.get(), b.get()) {
        (Some(a), Some(b)) => [a, b],
        _ => fallback,
    }
}

impl HeadOnCollision {
    pub fn new(params: &NormalizedParameters) -> Self {
        let collision = &params.collision;
        let [m1, m2] = pair(&collision.masses, [2.0, 3.0]);
        let masses = [Measure::from(m1).nonzero_or(2.0).abs(), Measure::from(m2).nonzero_or(3.0).abs()];
        let before = pair(&collision.velocities_before, [5.0, -2.0]);
        let restitution = if collision.is_inelastic() {
            0.0
        } else {
            collision.coefficient_of_restitution.or(1.0).clamp(0.0, 1.0)
        };

        let (contact, start) = if before[0] > before[1] {
            (Some(LEAD_TIME), [-before[0] * LEAD_TIME, -before[1] * LEAD_TIME])
        } else {
            (None, [-5.0, 5.0])
        };
        let (v1, v2) = resolve_1d(masses[0], before[0], masses[1], before[1], restitution);

        Self {
            meta: Meta::new(params, "Collision"),
            kind: collision.kind.or("elastic").to_string(),
            masses,
            before,
            after: [v1, v2],
            start,
            contact,
            restitution,
            t: 0.0,
            x: start,
        }
    }

    pub fn has_collided(&self) -> bool {
        self.contact.is_some_and(|tc| self.t >= tc)
    }

    pub fn velocities(&self) -> [f64; 2] {
        if self.has_collided() { self.after } else { self.before }
    }

    pub fn momentum(&self) -> f64 {
        let v = self.velocities();
        self.masses[0] * v[0] + self.masses[1] * v[1]
    }

    pub fn kinetic_energy(&self) -> f64 {
        let v = self.velocities();
        0.5 * (self.masses[0] * v[0] * v[0] + self.masses[1] * v[1] * v[1])
    }

    fn radius(&self, i: usize) -> f64 {
        10.0 + self.masses[i].min(20.0) * 4.0
    }
}

impl SimulationObject for HeadOnCollision {
    fn update(&mut self, _dt: f64, elapsed: f64) {
        self.t = elapsed;
        self.x = match self.contact {
            Some(tc) if elapsed >= tc => {
                let since = elapsed - tc;
                [self.after[0] * since, self.after[1] * since]
            }
            _ => [
                self.start[0] + self.before[0] * elapsed,
                self.start[1] + self.before[1] * elapsed,
            ],
        };
    }

    fn render(&self, surface: &mut dyn Surface, camera: &Camera) {
        ground(surface, TRACK.y + 30.0);
        let v = self.velocities();
        let arrow_scale = 30.0 / self.before[0].abs().max(self.before[1].abs()).max(1.0);
        let colors = [palette::CYAN, palette::VIOLET];

        for i in 0..2 {
            let r = self.radius(i);
            let at = camera.to_surface(DVec2::new(self.x[i], 0.0), TRACK);
            surface.dot(at, r, colors[i]);
            surface.label(at + DVec2::new(-10.0, -r - 8.0), format!("{}kg", self.masses[i]), palette::WHITE);
            let y = at.y + r + 10.0;
            surface.arrow(
                DVec2::new(at.x, y),
                DVec2::new(at.x + v[i] * arrow_scale, y),
                colors[i],
                Some(format!("{:.2} m/s", v[i])),
            );
        }

        if self.contact.is_some_and(|tc| (self.t - tc).abs() < 0.1) {
            surface.draw(DrawCommand::Ring {
                at: TRACK,
                radius: 60.0,
                width: 6.0,
                color: palette::WHITE.with_alpha(0.5),
            });
        }

        let mut kind = self.kind.clone();
        if let Some(first) = kind.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        surface.hud(vec![
            format!("{kind} Collision  (e = {})", self.restitution),
            format!("m₁={}kg  v₁={:.2} m/s", self.masses[0], v[0]),
            format!("m₂={}kg  v₂={:.2} m/s", self.masses[1], v[1]),
            format!("p = {:.2} kg·m/s   KE = {:.2} J", self.momentum(), self.kinetic_energy()),
            if self.has_collided() { "Separating..." } else { "Approaching..." }.to_string(),
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, camera: &Camera) -> Option<DVec2> {
        let mid = (self.x[0] + self.x[1]) / 2.0;
        Some(camera.to_surface(DVec2::new(mid, 0.0), TRACK))
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }
}

pub fn collision(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    stage.add_object(HeadOnCollision::new(params));
}
