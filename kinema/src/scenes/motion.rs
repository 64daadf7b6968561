use glam::DVec2;

use crate::core::schema::NormalizedParameters;
use crate::platform::surface::{Color, DrawCommand, Surface, palette};
use crate::scenes::{GROUND_ORIGIN, Meta, Trail, contact, ground};
use crate::simulation::camera::Camera;
use crate::simulation::object::{SimulationObject, Stage};

const VELOCITY_SCALE: f64 = 2.5;

/// A body moving along the ground under constant acceleration.
pub struct LinearBody {
    meta: Meta,
    x0: f64,
    v0: f64,
    a: f64,
    t: f64,
    x: f64,
    v: f64,
    trail: Trail,
}

impl LinearBody {
    pub fn new(params: &NormalizedParameters) -> Self {
        let x0 = params.initial_position.x0.nonzero_or(0.0);
        let v0 = params.initial_velocity.magnitude.nonzero_or(5.0);
        Self {
            meta: Meta::new(params, "Object"),
            x0,
            v0,
            a: params.acceleration.value.nonzero_or(0.0),
            t: 0.0,
            x: x0,
            v: v0,
            trail: Trail::new(400),
        }
    }

    pub fn position(&self) -> f64 {
        self.x
    }

    pub fn velocity(&self) -> f64 {
        self.v
    }
}

impl SimulationObject for LinearBody {
    fn update(&mut self, _dt: f64, elapsed: f64) {
        let t = elapsed;
        self.t = t;
        self.x = self.x0 + self.v0 * t + 0.5 * self.a * t * t;
        self.v = self.v0 + self.a * t;
        self.trail.push(DVec2::new(self.x, 0.0));
    }

    fn render(&self, surface: &mut dyn Surface, camera: &Camera) {
        let width = surface.viewport().x;
        ground(surface, GROUND_ORIGIN.y);

        // Distance markers.
        let step = ((20.0 / camera.scale().max(1e-6)).round() * 5.0).max(5.0);
        let mut m = 0.0;
        while m <= 500.0 {
            let px = camera.to_surface(DVec2::new(m, 0.0), GROUND_ORIGIN).x;
            if px > 30.0 && px < width - 30.0 {
                surface.line(DVec2::new(px, 498.0), DVec2::new(px, 504.0), 1.0, palette::OVERLAY);
                surface.label(DVec2::new(px - 8.0, 516.0), format!("{m:.0}m"), palette::OVERLAY);
            }
            m += step;
        }

        self.trail.draw(surface, camera, GROUND_ORIGIN, 2.5, palette::CYAN);
        let at = camera.to_surface(DVec2::new(self.x, 0.0), GROUND_ORIGIN);
        surface.dot(at, 12.0, palette::CYAN);

        surface.arrow(
            at - DVec2::Y * 25.0,
            at + DVec2::new(self.v * VELOCITY_SCALE, -25.0),
            palette::CYAN,
            Some(format!("v = {:.1} m/s", self.v)),
        );
        if self.a.abs() > 0.01 {
            surface.arrow(
                at + DVec2::Y * 25.0,
                at + DVec2::new(self.a * VELOCITY_SCALE * 4.0, 25.0),
                palette::RED,
                Some(format!("a = {:.1} m/s²", self.a)),
            );
        }

        let start = camera.to_surface(DVec2::new(self.x0, 0.0), GROUND_ORIGIN);
        surface.line(
            DVec2::new(start.x, 470.0),
            DVec2::new(at.x, 470.0),
            1.0,
            Color::rgba(1.0, 0.62, 0.26, 0.3),
        );
        surface.label(
            DVec2::new((start.x + at.x) / 2.0 - 25.0, 466.0),
            format!("Δx = {:.1} m", self.x - self.x0),
            palette::ORANGE,
        );

        surface.hud(vec![
            format!("{} - Linear Motion", self.meta.caption),
            format!("t = {:.2} s", self.t),
            format!("x = {:.2} m   v = {:.2} m/s", self.x, self.v),
            "x = x₀ + v₀t + ½at²".to_string(),
            if self.a != 0.0 {
                format!("a = {} m/s²", self.a)
            } else {
                "Uniform velocity".to_string()
            },
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, camera: &Camera) -> Option<DVec2> {
        Some(camera.to_surface(DVec2::new(self.x, 0.0), GROUND_ORIGIN))
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }
}

pub fn linear_motion(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    stage.add_object(LinearBody::new(params));
}

/// Force problems reuse the scene that matches what they describe: a
/// slope, a rough surface, or plain motion.
pub fn forces(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    if params.incline.angle.get().is_some_and(|a| a > 0.0) {
        contact::inclined_plane(params, stage);
    } else if params.friction.static_coefficient.get().is_some_and(|mu| mu > 0.0)
        || params.friction.kinetic_coefficient.get().is_some_and(|mu| mu > 0.0)
    {
        contact::friction(params, stage);
    } else {
        linear_motion(params, stage);
    }
}

/// Filled rectangle centred on `at`.
pub(crate) fn block(surface: &mut dyn Surface, at: DVec2, size: DVec2, color: Color) {
    surface.draw(DrawCommand::Rect {
        at: at - size * 0.5,
        size,
        color,
    });
}
