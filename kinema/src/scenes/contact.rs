//! Blocks pressed against surfaces: friction on the flat and the slope.

use glam::DVec2;

use crate::core::normalize::DEFAULT_GRAVITY;
use crate::core::schema::NormalizedParameters;
use crate::platform::surface::{Align, Color, DrawCommand, Surface, palette};
use crate::scenes::{Meta, ground, motion::block};
use crate::simulation::camera::Camera;
use crate::simulation::object::{SimulationObject, Stage};

const FLOOR: DVec2 = DVec2::new(200.0, 400.0);
const BLOCK: DVec2 = DVec2::new(80.0, 50.0);
/// Distance after which a sliding block is placed back at the start.
const RUN_LENGTH: f64 = 150.0;
const FORCE_SCALE: f64 = 1.5;
const BLOCK_FILL: Color = Color::rgb(0x4a, 0x6f, 0xa5);

fn status(surface: &mut dyn Surface, y: f64, text: String, color: Color) {
    let x = surface.viewport().x / 2.0;
    surface.draw(DrawCommand::Text {
        at: DVec2::new(x, y),
        text,
        align: Align::Center,
        color,
    });
}

/// A block pushed along a rough floor.
///
/// It only moves when the push beats maximum static friction; kinetic
/// friction then opposes it.
pub struct FrictionBlock {
    meta: Meta,
    mass: f64,
    g: f64,
    mu_s: f64,
    mu_k: f64,
    applied: f64,
    x: f64,
    v: f64,
}

impl FrictionBlock {
    pub fn new(params: &NormalizedParameters) -> Self {
        let mass = params.mass.nonzero_or(5.0);
        let g = params.gravity.nonzero_or(DEFAULT_GRAVITY);
        let mu_s = params.friction.static_coefficient.nonzero_or(0.5);
        Self {
            meta: Meta::new(params, "Block"),
            mass,
            g,
            mu_s,
            mu_k: params.friction.kinetic_coefficient.nonzero_or(0.3),
            applied: params.forces.applied.nonzero_or(mass * g * mu_s * 0.8),
            x: 0.0,
            v: 0.0,
        }
    }

    pub fn normal(&self) -> f64 {
        self.mass * self.g
    }

    pub fn max_static(&self) -> f64 {
        self.mu_s * self.normal()
    }

    pub fn kinetic(&self) -> f64 {
        self.mu_k * self.normal()
    }

    pub fn is_moving(&self) -> bool {
        self.applied > self.max_static()
    }

    pub fn acceleration(&self) -> f64 {
        if self.is_moving() {
            (self.applied - self.kinetic()) / self.mass
        } else {
            0.0
        }
    }

    pub fn position(&self) -> f64 {
        self.x
    }

    fn centre(&self, camera: &Camera) -> DVec2 {
        camera.to_surface(DVec2::new(self.x, 0.0), FLOOR) + DVec2::new(BLOCK.x / 2.0, -BLOCK.y / 2.0)
    }
}

impl SimulationObject for FrictionBlock {
    fn update(&mut self, dt: f64, _elapsed: f64) {
        if !self.is_moving() {
            return;
        }
        self.v += self.acceleration() * dt;
        self.x += self.v * dt;
        if self.x > RUN_LENGTH {
            self.x = 0.0;
            self.v = 0.0;
        }
    }

    fn render(&self, surface: &mut dyn Surface, camera: &Camera) {
        let width = surface.viewport().x;
        ground(surface, FLOOR.y);
        let mut i = 40.0;
        while i < width - 40.0 {
            surface.line(
                DVec2::new(i, FLOOR.y + 2.0),
                DVec2::new(i - 4.0, FLOOR.y + 8.0),
                1.0,
                palette::WHITE.with_alpha(0.05),
            );
            i += 12.0;
        }

        let c = self.centre(camera);
        block(surface, c, BLOCK, BLOCK_FILL);
        surface.label(c + DVec2::new(-16.0, 5.0), format!("{} kg", self.mass), palette::WHITE);

        let half = BLOCK.x / 2.0;
        surface.arrow(
            c + DVec2::X * half,
            c + DVec2::X * (half + self.applied * FORCE_SCALE),
            palette::RED,
            Some(format!("F = {:.1} N", self.applied)),
        );
        let friction = if self.is_moving() {
            self.kinetic()
        } else {
            self.applied.min(self.max_static())
        };
        surface.arrow(
            c - DVec2::X * half,
            c - DVec2::X * (half + friction * FORCE_SCALE),
            palette::YELLOW,
            Some(format!("f = {friction:.1} N")),
        );
        let top = c.y - BLOCK.y / 2.0;
        surface.arrow(
            DVec2::new(c.x, top),
            DVec2::new(c.x, top - self.normal() * 0.5),
            palette::CYAN,
            Some(format!("N = {:.1} N", self.normal())),
        );
        surface.arrow(
            DVec2::new(c.x, FLOOR.y),
            DVec2::new(c.x, FLOOR.y + self.normal() * 0.5),
            palette::VIOLET,
            Some(format!("W = {:.1} N", self.normal())),
        );

        if self.is_moving() {
            status(surface, 80.0, "Object is MOVING (kinetic friction)".to_string(), palette::CYAN);
            status(surface, 105.0, format!("a = {:.2} m/s²", self.acceleration()), palette::STEEL);
        } else {
            status(surface, 80.0, "Object is STATIONARY (static friction)".to_string(), palette::YELLOW);
            status(
                surface,
                105.0,
                format!(
                    "F_applied ({:.1} N) ≤ f_s_max ({:.1} N)",
                    self.applied,
                    self.max_static()
                ),
                palette::STEEL,
            );
        }

        surface.hud(vec![
            format!("Friction - μs={}  μk={}", self.mu_s, self.mu_k),
            format!("m = {} kg   g = {} m/s²", self.mass, self.g),
            format!("N = {:.1} N", self.normal()),
            format!("f_s_max = {:.1} N", self.max_static()),
            format!("f_k = {:.1} N", self.kinetic()),
            format!("F_applied = {:.1} N", self.applied),
            if self.is_moving() {
                format!("a = {:.2} m/s²", self.acceleration())
            } else {
                "Static: no motion".to_string()
            },
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, camera: &Camera) -> Option<DVec2> {
        Some(self.centre(camera))
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }
}

pub fn friction(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    stage.add_object(FrictionBlock::new(params));
}

const SLOPE_FOOT: DVec2 = DVec2::new(120.0, 450.0);
/// Drawn slope length in surface units.
const SLOPE_LENGTH: f64 = 500.0;
const SLOPE_BLOCK: f64 = 36.0;
/// Fractions of the slope where a slide starts and is restarted.
const SLIDE_START: f64 = 0.85;
const SLIDE_END: f64 = 0.05;

/// A block sliding from near the top of a ramp, with optional friction.
pub struct SlopeBlock {
    meta: Meta,
    mass: f64,
    g: f64,
    angle: f64,
    mu: f64,
    /// Slope length in metres at the load-time scale.
    length: f64,
    /// Distance from the foot, in metres.
    along: f64,
    speed: f64,
}

impl SlopeBlock {
    pub fn new(params: &NormalizedParameters, camera: &Camera) -> Self {
        let angle = params
            .incline
            .angle
            .nonzero()
            .or_else(|| params.launch_angle.nonzero())
            .unwrap_or(30.0);
        let length = SLOPE_LENGTH / camera.scale().max(1e-6);
        Self {
            meta: Meta::new(params, "Block"),
            mass: params.mass.nonzero_or(5.0),
            g: params.gravity.nonzero_or(DEFAULT_GRAVITY),
            angle,
            mu: params.friction.kinetic_coefficient.nonzero_or(0.0),
            length,
            along: length * SLIDE_START,
            speed: 0.0,
        }
    }

    pub fn weight(&self) -> f64 {
        self.mass * self.g
    }

    pub fn normal(&self) -> f64 {
        self.weight() * self.angle.to_radians().cos()
    }

    pub fn parallel(&self) -> f64 {
        self.weight() * self.angle.to_radians().sin()
    }

    pub fn friction(&self) -> f64 {
        self.mu * self.normal()
    }

    pub fn acceleration(&self) -> f64 {
        (self.parallel() - self.friction()) / self.mass
    }

    pub fn is_sliding(&self) -> bool {
        self.parallel() - self.friction() > 0.0
    }

    pub fn distance_from_foot(&self) -> f64 {
        self.along
    }

    fn direction(&self) -> DVec2 {
        let rad = self.angle.to_radians();
        DVec2::new(rad.cos(), -rad.sin())
    }

    fn block_base(&self) -> DVec2 {
        SLOPE_FOOT + self.direction() * SLOPE_LENGTH * (self.along / self.length)
    }
}

impl SimulationObject for SlopeBlock {
    fn update(&mut self, dt: f64, _elapsed: f64) {
        if !self.is_sliding() {
            return;
        }
        self.speed += self.acceleration() * dt;
        self.along -= self.speed * dt;
        if self.along < self.length * SLIDE_END {
            self.along = self.length * SLIDE_START;
            self.speed = 0.0;
        }
    }

    fn render(&self, surface: &mut dyn Surface, _camera: &Camera) {
        let dir = self.direction();
        let top = SLOPE_FOOT + dir * SLOPE_LENGTH;
        let corner = DVec2::new(top.x, SLOPE_FOOT.y);
        surface.draw(DrawCommand::Polygon {
            points: vec![SLOPE_FOOT, top, corner],
            color: Color::rgba(0.2, 0.24, 0.35, 0.5),
        });
        surface.line(SLOPE_FOOT, top, 3.0, Color::rgba(0.39, 0.55, 0.78, 0.6));
        surface.line(SLOPE_FOOT, corner, 1.0, Color::rgba(0.39, 0.55, 0.78, 0.2));
        surface.line(corner, top, 1.0, Color::rgba(0.39, 0.55, 0.78, 0.2));
        surface.label(SLOPE_FOOT + DVec2::new(55.0, -8.0), format!("θ = {}°", self.angle), palette::YELLOW);

        // Block square resting on the slope.
        let base = self.block_base();
        // Away from the slope face.
        let outward = DVec2::new(dir.y, -dir.x);
        let half = dir * SLOPE_BLOCK / 2.0;
        let lift = outward * SLOPE_BLOCK;
        surface.draw(DrawCommand::Polygon {
            points: vec![base - half, base + half, base + half + lift, base - half + lift],
            color: palette::VIOLET,
        });

        let centre = base + lift / 2.0;
        surface.arrow(centre, centre + DVec2::Y * 60.0, palette::VIOLET, Some(format!("W = {:.1} N", self.weight())));
        surface.arrow(
            centre,
            centre + outward * self.normal() * 0.8,
            palette::CYAN,
            Some(format!("N = {:.1} N", self.normal())),
        );
        surface.arrow(
            centre,
            centre - dir * self.parallel() * 0.8,
            palette::RED,
            Some(format!("F∥ = {:.1} N", self.parallel())),
        );
        if self.mu > 0.0 {
            surface.arrow(
                centre,
                centre + dir * self.friction() * 0.8,
                palette::YELLOW,
                Some(format!("f = {:.1} N", self.friction())),
            );
        }

        let (text, color) = if self.is_sliding() {
            (format!("Sliding ↓  a = {:.2} m/s²", self.acceleration()), palette::CYAN)
        } else {
            ("Stationary - friction balances gravity".to_string(), palette::YELLOW)
        };
        status(surface, 50.0, text, color);

        let mut hud = vec![
            format!(
                "Inclined Plane - θ={}°  {}",
                self.angle,
                if self.mu > 0.0 { format!("μ={}", self.mu) } else { "frictionless".to_string() }
            ),
            format!("m = {} kg   g = {} m/s²", self.mass, self.g),
            format!("W = {:.1} N", self.weight()),
            format!("N = W·cos(θ) = {:.1} N", self.normal()),
            format!("F∥ = W·sin(θ) = {:.1} N", self.parallel()),
        ];
        if self.mu > 0.0 {
            hud.push(format!("f = μN = {:.1} N", self.friction()));
        }
        hud.push(format!("a = {:.2} m/s²", self.acceleration()));
        surface.hud(hud);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, _camera: &Camera) -> Option<DVec2> {
        Some(self.block_base())
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }
}

pub fn inclined_plane(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    let block = SlopeBlock::new(params, stage.camera());
    stage.add_object(block);
}
