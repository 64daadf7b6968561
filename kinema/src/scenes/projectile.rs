use glam::DVec2;

use crate::core::normalize::DEFAULT_GRAVITY;
use crate::core::schema::NormalizedParameters;
use crate::platform::surface::{Color, DrawCommand, Surface, palette};
use crate::scenes::{GROUND_ORIGIN, Meta, Trail, ground};
use crate::simulation::camera::Camera;
use crate::simulation::object::{SimulationObject, Stage};

const VELOCITY_SCALE: f64 = 1.8;
const GHOST_SAMPLES: usize = 100;

/// Closed-form projectile. It freezes where it lands.
pub struct Projectile {
    meta: Meta,
    v0: f64,
    angle: f64,
    h0: f64,
    g: f64,
    vx: f64,
    vy: f64,
    max_height: f64,
    flight_time: f64,
    range: f64,
    ghost: Vec<DVec2>,
    t: f64,
    pos: DVec2,
    vel: DVec2,
    landed: bool,
    trail: Trail,
}

impl Projectile {
    pub fn new(params: &NormalizedParameters) -> Self {
        let v0 = params.initial_velocity.magnitude.nonzero_or(20.0);
        let angle = params.launch_angle.nonzero_or(45.0);
        let h0 = params.launch_height.nonzero_or(0.0);
        let g = params.gravity.nonzero_or(DEFAULT_GRAVITY);
        let (sin, cos) = angle.to_radians().sin_cos();
        let (vx, vy) = (v0 * cos, v0 * sin);

        let max_height = h0 + vy * vy / (2.0 * g);
        let flight_time = ((vy + (vy * vy + 2.0 * g * h0).max(0.0).sqrt()) / g).max(0.0);
        let range = vx * flight_time;

        let ghost = (0..=GHOST_SAMPLES)
            .map(|i| {
                let t = flight_time * i as f64 / GHOST_SAMPLES as f64;
                DVec2::new(vx * t, (h0 + vy * t - 0.5 * g * t * t).max(0.0))
            })
            .collect();

        Self {
            meta: Meta::new(params, "Projectile"),
            v0,
            angle,
            h0,
            g,
            vx,
            vy,
            max_height,
            flight_time,
            range,
            ghost,
            t: 0.0,
            pos: DVec2::new(0.0, h0),
            vel: DVec2::new(vx, vy),
            landed: false,
            trail: Trail::new(2000),
        }
    }

    pub fn position(&self) -> DVec2 {
        self.pos
    }

    pub fn has_landed(&self) -> bool {
        self.landed
    }

    pub fn range(&self) -> f64 {
        self.range
    }
}

impl SimulationObject for Projectile {
    fn update(&mut self, _dt: f64, elapsed: f64) {
        if self.landed {
            return;
        }
        let t = elapsed;
        self.t = t;
        let mut y = self.h0 + self.vy * t - 0.5 * self.g * t * t;
        if y < 0.0 && t > 0.1 {
            y = 0.0;
            self.landed = true;
        }
        self.pos = DVec2::new(self.vx * t, y);
        self.vel = DVec2::new(self.vx, self.vy - self.g * t);
        self.trail.push(self.pos);
    }

    fn render(&self, surface: &mut dyn Surface, camera: &Camera) {
        let origin = GROUND_ORIGIN;
        ground(surface, origin.y);

        surface.draw(DrawCommand::Trail {
            points: self.ghost.iter().map(|p| camera.to_surface(*p, origin)).collect(),
            width: 1.5,
            color: palette::ORANGE.with_alpha(0.12),
        });
        self.trail.draw(surface, camera, origin, 3.0, palette::ORANGE);

        let launch = camera.to_surface(DVec2::new(0.0, self.h0), origin);
        surface.dot(launch, 4.0, palette::STEEL);

        let apex = camera.to_surface(DVec2::new(self.vx * self.vy / self.g, self.max_height), origin);
        surface.line(apex, DVec2::new(apex.x, origin.y), 1.0, palette::ORANGE.with_alpha(0.15));
        surface.label(apex + DVec2::new(6.0, -4.0), format!("↕ H = {:.1} m", self.max_height), palette::ORANGE);

        let landing = camera.to_surface(DVec2::new(self.range, 0.0), origin);
        surface.line(
            DVec2::new(launch.x, origin.y + 4.0),
            DVec2::new(landing.x, origin.y + 4.0),
            1.0,
            palette::CYAN.with_alpha(0.3),
        );
        surface.label(
            DVec2::new((launch.x + landing.x) / 2.0 - 30.0, origin.y + 20.0),
            format!("↔ R = {:.1} m", self.range),
            palette::CYAN,
        );

        let at = camera.to_surface(self.pos, origin);
        surface.dot(at, 10.0, palette::ORANGE);
        let v = DVec2::new(self.vel.x, -self.vel.y) * VELOCITY_SCALE;
        surface.arrow(at, at + DVec2::new(v.x, 0.0), palette::CYAN, Some(format!("vx {:.1}", self.vel.x)));
        surface.arrow(at, at + DVec2::new(0.0, v.y), palette::VIOLET, Some(format!("vy {:.1}", self.vel.y)));
        surface.arrow(at, at + v, palette::WHITE, Some(format!("v {:.1}", self.vel.length())));

        if self.landed {
            surface.label(at + DVec2::new(14.0, -12.0), "Landed".to_string(), palette::CYAN);
        }

        surface.hud(vec![
            format!("{} - v₀={} m/s  θ={}°", self.meta.caption, self.v0, self.angle),
            format!("t = {:.2} s", self.t),
            format!("x = {:.1} m   y = {:.1} m", self.pos.x, self.pos.y),
            format!("Range = {:.1} m   H_max = {:.1} m", self.range, self.max_height),
            format!("T = {:.2} s   g = {} m/s²", self.flight_time, self.g),
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, camera: &Camera) -> Option<DVec2> {
        Some(camera.to_surface(self.pos, GROUND_ORIGIN))
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }
}

pub fn projectile(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    stage.add_object(Projectile::new(params));
}

/// Where the slope starts, measured from the launch point.
const INCLINE_X0: f64 = 50.0;
const INCLINE_LENGTH: f64 = 80.0;
const MAX_BOUNCES: u32 = 5;
/// Minimum time between two bounces.
const BOUNCE_COOLDOWN: f64 = 0.1;

/// A ball launched at a slope, bouncing off it with restitution `e`.
///
/// Integrated with explicit Euler; settles once it leaves the scene.
pub struct InclineBall {
    meta: Meta,
    mass: f64,
    g: f64,
    launch_angle: f64,
    incline_angle: f64,
    restitution: f64,
    slope: f64,
    pos: DVec2,
    vel: DVec2,
    t: f64,
    bounces: u32,
    last_bounce: f64,
    trajectory: Trail,
    bounce_points: Vec<DVec2>,
}

impl InclineBall {
    pub fn new(params: &NormalizedParameters) -> Self {
        let v0 = params.initial_velocity.magnitude.nonzero_or(20.0);
        let launch_angle = params.launch_angle.nonzero_or(25.0);
        let incline_angle = params.incline.angle.nonzero_or(45.0);
        let (sin, cos) = launch_angle.to_radians().sin_cos();
        Self {
            meta: Meta::new(params, "Projectile"),
            mass: params.mass.nonzero_or(1.0),
            g: params.gravity.nonzero_or(DEFAULT_GRAVITY),
            launch_angle,
            incline_angle,
            restitution: params.collision.coefficient_of_restitution.nonzero_or(0.7),
            slope: incline_angle.to_radians().tan(),
            pos: DVec2::ZERO,
            vel: DVec2::new(v0 * cos, v0 * sin),
            t: 0.0,
            bounces: 0,
            last_bounce: -10.0,
            trajectory: Trail::new(500),
            bounce_points: Vec::new(),
        }
    }

    pub fn bounces(&self) -> u32 {
        self.bounces
    }

    pub fn position(&self) -> DVec2 {
        self.pos
    }

    fn surface_height(&self, x: f64) -> f64 {
        self.slope * (x - INCLINE_X0)
    }
}

impl SimulationObject for InclineBall {
    fn update(&mut self, dt: f64, _elapsed: f64) {
        if self.is_settled() {
            return;
        }
        self.t += dt;
        self.vel.y -= self.g * dt;
        self.pos += self.vel * dt;
        self.trajectory.push(self.pos);

        if self.pos.x >= INCLINE_X0 && self.bounces < MAX_BOUNCES {
            let surface_y = self.surface_height(self.pos.x);
            if self.pos.y <= surface_y && self.t - self.last_bounce > BOUNCE_COOLDOWN {
                self.bounce_points.push(self.pos);
                self.last_bounce = self.t;
                self.bounces += 1;

                let normal_angle = self.incline_angle.to_radians() + std::f64::consts::FRAC_PI_2;
                let normal = DVec2::new(normal_angle.cos(), normal_angle.sin());
                let v_normal = self.vel.dot(normal);
                self.vel -= (1.0 + self.restitution) * v_normal * normal;
                // Lift clear of the slope so the next step does not collide again.
                self.pos.y = surface_y + 0.5;
            }
        }
    }

    fn render(&self, surface: &mut dyn Surface, camera: &Camera) {
        let origin = GROUND_ORIGIN;
        let (sin, cos) = self.incline_angle.to_radians().sin_cos();
        let foot = camera.to_surface(DVec2::new(INCLINE_X0, 0.0), origin);
        let top = camera.to_surface(
            DVec2::new(INCLINE_X0 + INCLINE_LENGTH * cos, INCLINE_LENGTH * sin),
            origin,
        );
        surface.line(foot, top, 4.0, palette::STEEL);
        surface.line(camera.to_surface(DVec2::ZERO, origin), foot, 2.0, palette::GROUND);

        self.trajectory.draw(surface, camera, origin, 2.0, Color::rgba(0.39, 0.78, 1.0, 0.4));
        for point in &self.bounce_points {
            surface.dot(camera.to_surface(*point, origin), 4.0, palette::RED);
        }

        let at = camera.to_surface(self.pos, origin);
        surface.dot(at, 6.0, palette::CYAN);
        let tip = camera.to_surface(self.pos + self.vel * 0.5, origin);
        surface.arrow(at, tip, palette::ORANGE, None);
        surface.label(at + DVec2::new(12.0, -8.0), format!("{} kg", self.mass), palette::CYAN);

        surface.hud(vec![
            "Projectile + Incline - Composite".to_string(),
            format!("Launch: {}°, Incline: {}°", self.launch_angle, self.incline_angle),
            format!("Position: ({:.1} m, {:.1} m)", self.pos.x, self.pos.y),
            format!(
                "Velocity: {:.1} m/s @ {:.0}°",
                self.vel.length(),
                self.vel.y.atan2(self.vel.x).to_degrees()
            ),
            format!("Bounces: {}/{}", self.bounces, MAX_BOUNCES),
            format!("Restitution: e = {}", self.restitution),
            format!("t = {:.2} s", self.t),
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, camera: &Camera) -> Option<DVec2> {
        Some(camera.to_surface(self.pos, GROUND_ORIGIN))
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }

    fn is_settled(&self) -> bool {
        self.pos.y < -20.0 || self.pos.x > 200.0
    }
}

pub fn projectile_incline(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    stage.add_object(InclineBall::new(params));
}
