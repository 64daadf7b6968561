//! Flow through a narrowing pipe, and lift across a wing.

use glam::DVec2;

use crate::core::normalize::DEFAULT_GRAVITY;
use crate::core::schema::NormalizedParameters;
use crate::laws::continuum::fluid::{AIR_DENSITY, ATMOSPHERE, WATER_DENSITY};
use crate::platform::surface::{Align, Color, DrawCommand, Surface, palette};
use crate::scenes::{Meta, scatter};
use crate::simulation::camera::Camera;
use crate::simulation::object::{SimulationObject, Stage};

const PIPE_START: f64 = 80.0;
const PIPE_END: f64 = 820.0;
const PIPE_NECK: f64 = 400.0;
const PIPE_Y: f64 = 300.0;
const WIDE_HALF: f64 = 80.0;
const NARROW_HALF: f64 = 40.0;
/// Surface units per metre of flow.
const FLOW_SCALE: f64 = 25.0;
const PARTICLES: usize = 40;
const PRESSURE_BAR: f64 = 100.0;

fn centred(surface: &mut dyn Surface, at: DVec2, text: String, color: Color) {
    surface.draw(DrawCommand::Text { at, text, align: Align::Center, color });
}

/// Continuity and Bernoulli in a pipe that narrows part way along.
pub struct PipeFlow {
    meta: Meta,
    density: f64,
    area1: f64,
    area2: f64,
    v1: f64,
    v2: f64,
    p1: f64,
    p2: f64,
    particles: Vec<DVec2>,
    respawned: usize,
}

impl PipeFlow {
    pub fn new(params: &NormalizedParameters) -> Self {
        let fluid = &params.fluid;
        let density = fluid.density.nonzero_or(WATER_DENSITY);
        let area1 = fluid.area1.nonzero_or(0.05);
        let area2 = fluid.area2.nonzero_or(0.02);
        let v1 = fluid.velocity1.nonzero_or(2.0);
        let v2 = area1 * v1 / area2;
        let (h1, h2) = (fluid.height1.nonzero_or(0.0), fluid.height2.nonzero_or(0.0));
        let g = params.gravity.nonzero_or(DEFAULT_GRAVITY);
        let p1 = fluid.pressure1.nonzero_or(ATMOSPHERE);
        let p2 = p1 + 0.5 * density * (v1 * v1 - v2 * v2) + density * g * (h1 - h2);

        let particles = (0..PARTICLES)
            .map(|i| {
                DVec2::new(
                    PIPE_START + scatter(i) * (PIPE_END - PIPE_START),
                    PIPE_Y + (scatter(i + PARTICLES) - 0.5) * WIDE_HALF * 1.5,
                )
            })
            .collect();

        Self {
            meta: Meta::new(params, "Fluid Flow"),
            density,
            area1,
            area2,
            v1,
            v2,
            p1,
            p2,
            particles,
            respawned: 0,
        }
    }

    pub fn outlet_velocity(&self) -> f64 {
        self.v2
    }

    pub fn outlet_pressure(&self) -> f64 {
        self.p2
    }

    fn in_neck(x: f64) -> bool {
        x > PIPE_NECK - 40.0
    }
}

impl SimulationObject for PipeFlow {
    fn update(&mut self, dt: f64, _elapsed: f64) {
        for i in 0..self.particles.len() {
            let narrow = Self::in_neck(self.particles[i].x);
            let p = &mut self.particles[i];
            p.x += if narrow { self.v2 } else { self.v1 } * FLOW_SCALE * dt;
            if narrow {
                let target = PIPE_Y + (p.y - PIPE_Y) * NARROW_HALF / WIDE_HALF;
                p.y += (target - p.y) * 0.05;
            }
            if p.x > PIPE_END + 10.0 {
                self.respawned += 1;
                p.x = PIPE_START - 5.0;
                p.y = PIPE_Y + (scatter(self.respawned + 2 * PARTICLES) - 0.5) * WIDE_HALF * 1.5;
            }
        }
    }

    fn render(&self, surface: &mut dyn Surface, _camera: &Camera) {
        let outline = vec![
            DVec2::new(PIPE_START, PIPE_Y - WIDE_HALF),
            DVec2::new(PIPE_NECK - 60.0, PIPE_Y - WIDE_HALF),
            DVec2::new(PIPE_NECK + 20.0, PIPE_Y - NARROW_HALF),
            DVec2::new(PIPE_END, PIPE_Y - NARROW_HALF),
            DVec2::new(PIPE_END, PIPE_Y + NARROW_HALF),
            DVec2::new(PIPE_NECK + 20.0, PIPE_Y + NARROW_HALF),
            DVec2::new(PIPE_NECK - 60.0, PIPE_Y + WIDE_HALF),
            DVec2::new(PIPE_START, PIPE_Y + WIDE_HALF),
        ];
        surface.draw(DrawCommand::Polygon {
            points: outline,
            color: Color::rgba(0.2, 0.47, 0.86, 0.2),
        });

        for p in &self.particles {
            let narrow = Self::in_neck(p.x);
            let half = if narrow { NARROW_HALF } else { WIDE_HALF };
            if (p.y - PIPE_Y).abs() < half + 5.0 {
                surface.dot(*p, 3.0, if narrow { palette::RED } else { palette::CYAN });
            }
        }

        let wide_top = PIPE_Y - WIDE_HALF - 25.0;
        let narrow_top = PIPE_Y - NARROW_HALF - 25.0;
        surface.arrow(
            DVec2::new(160.0, wide_top),
            DVec2::new(260.0, wide_top),
            palette::CYAN,
            Some(format!("v₁ = {:.1} m/s", self.v1)),
        );
        surface.arrow(
            DVec2::new(580.0, narrow_top),
            DVec2::new(720.0, narrow_top),
            palette::RED,
            Some(format!("v₂ = {:.1} m/s", self.v2)),
        );
        centred(surface, DVec2::new(200.0, PIPE_Y + WIDE_HALF + 30.0), format!("A₁ = {} m²", self.area1), palette::CYAN);
        centred(surface, DVec2::new(650.0, PIPE_Y + NARROW_HALF + 30.0), format!("A₂ = {} m²", self.area2), palette::RED);

        for (x, half, pressure, name, color) in [
            (140.0, WIDE_HALF, self.p1, "P₁", palette::CYAN),
            (700.0, NARROW_HALF, self.p2, "P₂", palette::RED),
        ] {
            let top = PIPE_Y + half + 50.0;
            let h = (pressure / 200_000.0 * PRESSURE_BAR).clamp(0.0, PRESSURE_BAR);
            surface.draw(DrawCommand::Rect {
                at: DVec2::new(x - 9.0, top + PRESSURE_BAR - h),
                size: DVec2::new(18.0, h),
                color,
            });
            centred(surface, DVec2::new(x, top + PRESSURE_BAR + 16.0), name.to_string(), color);
            centred(surface, DVec2::new(x, top - 8.0), format!("{:.1} kPa", pressure / 1000.0), color);
        }

        let mid = surface.viewport().x / 2.0;
        centred(surface, DVec2::new(mid, 60.0), "A₁v₁ = A₂v₂  (Continuity)".to_string(), palette::YELLOW);
        centred(surface, DVec2::new(mid, 85.0), "P + ½ρv² + ρgh = const  (Bernoulli)".to_string(), palette::SILVER);

        surface.hud(vec![
            format!("Fluid Flow - ρ = {} kg/m³", self.density),
            format!("A₁ = {} m²  v₁ = {:.1} m/s", self.area1, self.v1),
            format!("A₂ = {} m²  v₂ = {:.1} m/s", self.area2, self.v2),
            format!("P₁ = {:.1} kPa", self.p1 / 1000.0),
            format!("P₂ = {:.1} kPa", self.p2 / 1000.0),
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, _camera: &Camera) -> Option<DVec2> {
        Some(DVec2::new(450.0, PIPE_Y))
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }
}

pub fn fluid_dynamics(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    stage.add_object(PipeFlow::new(params));
}

const WING: DVec2 = DVec2::new(450.0, 310.0);
const CHORD_HALF: f64 = 180.0;
const STREAM: usize = 25;

/// Faster air over the top of a wing, shown as two particle streams.
pub struct Wing {
    meta: Meta,
    density: f64,
    v_top: f64,
    v_bottom: f64,
    area: f64,
    p_top: f64,
    p_bottom: f64,
    top: Vec<DVec2>,
    bottom: Vec<DVec2>,
}

impl Wing {
    pub fn new(params: &NormalizedParameters) -> Self {
        let lift = &params.lift;
        let density = params.fluid.density.nonzero_or(AIR_DENSITY);
        let v_top = lift.velocity_top.nonzero_or(60.0);
        let v_bottom = lift.velocity_bottom.nonzero_or(45.0);
        let scattered = |y: f64, salt: usize| -> Vec<DVec2> {
            (0..STREAM)
                .map(|i| DVec2::new(scatter(i + salt) * 900.0, y + (scatter(i + salt + STREAM) - 0.5) * 80.0))
                .collect()
        };
        Self {
            meta: Meta::new(params, "Wing"),
            density,
            v_top,
            v_bottom,
            area: lift.wing_area.nonzero_or(20.0),
            p_top: lift.pressure_top.nonzero_or(0.5 * density * v_top * v_top),
            p_bottom: lift.pressure_bottom.nonzero_or(0.5 * density * v_bottom * v_bottom),
            top: scattered(250.0, 0),
            bottom: scattered(370.0, 3 * STREAM),
        }
    }

    pub fn pressure_difference(&self) -> f64 {
        self.p_bottom - self.p_top
    }

    pub fn lift_force(&self) -> f64 {
        self.pressure_difference() * self.area
    }

    /// Upper and lower camber lines of the airfoil.
    fn outline() -> Vec<DVec2> {
        let mut points = Vec::with_capacity(41);
        for i in 0..=20 {
            let u = i as f64 / 20.0;
            let x = WING.x - CHORD_HALF + 2.0 * CHORD_HALF * u;
            points.push(DVec2::new(x, WING.y - 50.0 * (std::f64::consts::PI * u).sin() * (1.0 - 0.3 * u)));
        }
        for i in (1..20).rev() {
            let u = i as f64 / 20.0;
            let x = WING.x - CHORD_HALF + 2.0 * CHORD_HALF * u;
            points.push(DVec2::new(x, WING.y + 12.0 * (std::f64::consts::PI * u).sin()));
        }
        points
    }
}

impl SimulationObject for Wing {
    fn update(&mut self, dt: f64, _elapsed: f64) {
        let advance = |stream: &mut Vec<DVec2>, v: f64| {
            for p in stream.iter_mut() {
                p.x += v / 80.0 * 120.0 * dt;
                if p.x > 920.0 {
                    p.x = -20.0;
                }
            }
        };
        advance(&mut self.top, self.v_top);
        advance(&mut self.bottom, self.v_bottom);
    }

    fn render(&self, surface: &mut dyn Surface, _camera: &Camera) {
        surface.draw(DrawCommand::Polygon {
            points: Self::outline(),
            color: Color::rgb(0x5a, 0x7f, 0xbf),
        });
        for p in self.top.iter().filter(|p| p.y < WING.y - 5.0) {
            surface.dot(*p, 2.5, palette::RED);
        }
        for p in self.bottom.iter().filter(|p| p.y > WING.y + 5.0) {
            surface.dot(*p, 2.5, palette::CYAN);
        }

        let mid = surface.viewport().x / 2.0;
        centred(
            surface,
            DVec2::new(mid, 200.0),
            format!("v_top = {} m/s  (faster → lower P)", self.v_top),
            palette::RED,
        );
        centred(
            surface,
            DVec2::new(mid, 430.0),
            format!("v_bot = {} m/s  (slower → higher P)", self.v_bottom),
            palette::CYAN,
        );
        surface.arrow(
            WING,
            WING - DVec2::Y * 120.0,
            palette::YELLOW,
            Some(format!("Lift = {:.0} N", self.lift_force())),
        );
        for (dy, text, color) in [
            (-30.0, format!("P_top = {:.0} Pa", self.p_top), palette::RED),
            (40.0, format!("P_bot = {:.0} Pa", self.p_bottom), palette::CYAN),
        ] {
            surface.draw(DrawCommand::Text {
                at: DVec2::new(WING.x - 200.0, WING.y + dy),
                text,
                align: Align::Right,
                color,
            });
        }
        centred(surface, DVec2::new(mid, 55.0), "Bernoulli Lift: ΔP × A = F_lift".to_string(), palette::YELLOW);

        surface.hud(vec![
            format!("Lift - ρ = {} kg/m³", self.density),
            format!("v_top = {} m/s  v_bot = {} m/s", self.v_top, self.v_bottom),
            format!("ΔP = {:.0} Pa", self.pressure_difference()),
            format!("A = {} m²", self.area),
            format!("F_lift = {:.0} N", self.lift_force()),
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, _camera: &Camera) -> Option<DVec2> {
        Some(WING)
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }
}

pub fn lift(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    stage.add_object(Wing::new(params));
}
