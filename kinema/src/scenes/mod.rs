//! Built-in scene for every topic.
//!
//! Models keep their state in SI units with y pointing up and convert to
//! surface coordinates only when drawing, through [`Camera::to_surface`].

use std::collections::VecDeque;

use glam::DVec2;
use tracing::warn;

use crate::core::schema::{NormalizedParameters, Topic};
use crate::platform::surface::{Color, DrawCommand, Surface, palette};
use crate::simulation::camera::Camera;
use crate::simulation::router::SimulationRouter;

pub mod circular;
pub mod collision;
pub mod contact;
pub mod elasticity;
pub mod energy;
pub mod fields;
pub mod fluids;
pub mod gravitation;
pub mod motion;
pub mod optics;
pub mod oscillators;
pub mod projectile;
pub mod pulley;
pub mod thermo;
pub mod waves;

/// Ground-level origin for scenes drawn above a floor.
pub const GROUND_ORIGIN: DVec2 = DVec2::new(100.0, 500.0);
/// Viewport centre of the reference 900x600 surface.
pub const CENTRE: DVec2 = DVec2::new(450.0, 300.0);

/// A router with the built-in scene registered for every topic.
pub fn builtin_router() -> SimulationRouter {
    let mut router = SimulationRouter::new();
    let scenes: [(Topic, fn(&NormalizedParameters, &mut crate::simulation::object::Stage<'_>)); 24] = [
        (Topic::LinearMotion, motion::linear_motion),
        (Topic::Forces, motion::forces),
        (Topic::Projectile, projectile::projectile),
        (Topic::ProjectileIncline, projectile::projectile_incline),
        (Topic::CircularMotion, circular::circular_motion),
        (Topic::Energy, energy::energy),
        (Topic::Collision, collision::collision),
        (Topic::Waves, waves::waves),
        (Topic::Optics, optics::optics),
        (Topic::Electricity, fields::fields),
        (Topic::Magnetism, fields::fields),
        (Topic::MagnetismAdvanced, fields::magnetism_advanced),
        (Topic::Friction, contact::friction),
        (Topic::InclinedPlane, contact::inclined_plane),
        (Topic::FluidDynamics, fluids::fluid_dynamics),
        (Topic::Lift, fluids::lift),
        (Topic::Spring, oscillators::spring),
        (Topic::SpringFriction, oscillators::spring_friction),
        (Topic::PulleySpring, oscillators::pulley_spring),
        (Topic::Pulley, pulley::pulley),
        (Topic::MultiPulley, pulley::multi_pulley),
        (Topic::Gravitation, gravitation::gravitation),
        (Topic::Elasticity, elasticity::elasticity),
        (Topic::Thermodynamics, thermo::thermodynamics),
    ];
    for (topic, scene) in scenes {
        if let Err(err) = router.register(topic.as_str(), scene) {
            warn!(target: "router", %topic, %err, "built-in scene not registered");
        }
    }
    router
}

/// Caption plus the parameters a scene was built from.
#[derive(Debug, Clone)]
pub struct Meta {
    pub caption: String,
    pub params: NormalizedParameters,
}

impl Meta {
    /// Uses the problem's `object` label when there is one.
    pub fn new(params: &NormalizedParameters, fallback: &str) -> Self {
        Self {
            caption: params.object.or(fallback).to_string(),
            params: params.clone(),
        }
    }
}

/// Bounded history of physics-space points.
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<DVec2>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, point: DVec2) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DVec2> {
        self.points.iter()
    }

    pub fn draw(&self, surface: &mut dyn Surface, camera: &Camera, origin: DVec2, width: f64, color: Color) {
        if self.points.len() < 2 {
            return;
        }
        surface.draw(DrawCommand::Trail {
            points: self.points.iter().map(|p| camera.to_surface(*p, origin)).collect(),
            width,
            color,
        });
    }

    /// Draws points that are already in surface coordinates.
    pub fn draw_raw(&self, surface: &mut dyn Surface, width: f64, color: Color) {
        if self.points.len() < 2 {
            return;
        }
        surface.draw(DrawCommand::Trail {
            points: self.points.iter().copied().collect(),
            width,
            color,
        });
    }
}

pub fn ground(surface: &mut dyn Surface, y: f64) {
    let width = surface.viewport().x;
    surface.line(DVec2::new(30.0, y), DVec2::new(width - 30.0, y), 2.0, palette::GROUND);
}

/// Low-discrepancy sequence in `[0, 1)`, used to scatter particles
/// reproducibly.
pub fn scatter(i: usize) -> f64 {
    (i as f64 * 0.618_033_988_749_895 + 0.5).fract()
}
