use std::f64::consts::TAU;

use glam::DVec2;

use crate::core::schema::NormalizedParameters;
use crate::platform::surface::{DrawCommand, Surface, palette};
use crate::scenes::{CENTRE, Meta};
use crate::simulation::camera::Camera;
use crate::simulation::object::{SimulationObject, Stage};

/// Surface length of the velocity and acceleration arrows.
const ARROW: f64 = 40.0;

/// Uniform circular motion about the viewport centre.
pub struct CircularBody {
    meta: Meta,
    radius: f64,
    omega: f64,
    theta: f64,
}

impl CircularBody {
    pub fn new(params: &NormalizedParameters) -> Self {
        Self {
            meta: Meta::new(params, "Object"),
            radius: params.radius.nonzero_or(100.0),
            omega: params.angular_velocity.nonzero_or(2.0),
            theta: 0.0,
        }
    }

    pub fn position(&self) -> DVec2 {
        DVec2::from_angle(self.theta) * self.radius
    }

    pub fn speed(&self) -> f64 {
        self.omega * self.radius
    }
}

impl SimulationObject for CircularBody {
    fn update(&mut self, _dt: f64, elapsed: f64) {
        self.theta = self.omega * elapsed;
    }

    fn render(&self, surface: &mut dyn Surface, camera: &Camera) {
        let r_px = self.radius * camera.scale();
        surface.draw(DrawCommand::Ring {
            at: CENTRE,
            radius: r_px,
            width: 2.0,
            color: palette::VIOLET.with_alpha(0.25),
        });
        surface.dot(CENTRE, 4.0, palette::STEEL);

        let at = camera.to_surface(self.position(), CENTRE);
        surface.line(CENTRE, at, 1.0, palette::WHITE.with_alpha(0.12));
        surface.dot(at, 10.0, palette::VIOLET);

        let speed = self.speed();
        let accel = self.omega * self.omega * self.radius;
        // Tangent in surface space, y down.
        let tangent = DVec2::new(-self.theta.sin(), -self.theta.cos()) * self.omega.signum();
        surface.arrow(at, at + tangent * ARROW, palette::CYAN, Some(format!("v={speed:.1}")));
        let inward = (CENTRE - at).normalize_or_zero();
        surface.arrow(at, at + inward * ARROW, palette::RED, Some(format!("ac={accel:.1}")));
        surface.label(
            CENTRE + DVec2::new(r_px / 2.0, -6.0),
            format!("r={}m", self.radius),
            palette::OVERLAY,
        );

        let unit = camera.unit();
        surface.hud(vec![
            format!("{} - Circular Motion", self.meta.caption),
            format!("ω = {:.2} rad/s   r = {} {unit}", self.omega, self.radius),
            format!("v = {speed:.1} {unit}/s"),
            format!(
                "T = {:.3} s   f = {:.3} Hz",
                TAU / self.omega,
                self.omega / TAU
            ),
            format!("ac = {accel:.2} {unit}/s²"),
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, camera: &Camera) -> Option<DVec2> {
        Some(camera.to_surface(self.position(), CENTRE))
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }
}

pub fn circular_motion(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    stage.add_object(CircularBody::new(params));
}
