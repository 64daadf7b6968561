//! Ideal pulleys: the Atwood machine and block-and-tackle systems.

use glam::DVec2;

use crate::core::normalize::DEFAULT_GRAVITY;
use crate::core::schema::{Measure, NormalizedParameters};
use crate::platform::surface::{Align, Color, DrawCommand, Surface, palette};
use crate::scenes::{CENTRE, Meta, motion::block};
use crate::simulation::camera::Camera;
use crate::simulation::object::{SimulationObject, Stage};

const WHEEL: DVec2 = DVec2::new(450.0, 100.0);
const WHEEL_RADIUS: f64 = 30.0;
const ROPE_LENGTH: f64 = 220.0;
/// Horizontal distance from the wheel axis to each hanging stack.
const SIDE_OFFSET: f64 = 80.0;
/// Largest drawn travel before the animation restarts.
const MAX_TRAVEL: f64 = 120.0;
const BLOCK: DVec2 = DVec2::new(60.0, 40.0);
const BLOCK_GAP: f64 = 20.0;

const ROPE: Color = Color::rgba(0.78, 0.82, 0.9, 0.6);
const SUPPORT: Color = Color::rgba(0.31, 0.39, 0.55, 0.4);
const LEFT: Color = Color::rgb(0xff, 0x6b, 0x6b);
const RIGHT: Color = Color::rgb(0x4e, 0xcd, 0xc4);

/// Present values of a mass list, or `[fallback]` when there are none.
fn stack(values: &[Measure], fallback: f64) -> Vec<f64> {
    let present: Vec<f64> = values.iter().filter_map(|m| m.get()).collect();
    if present.is_empty() { vec![fallback] } else { present }
}

fn ceiling(surface: &mut dyn Surface, centre_x: f64, top: f64) {
    surface.draw(DrawCommand::Rect {
        at: DVec2::new(centre_x - 100.0, top),
        size: DVec2::new(200.0, 12.0),
        color: SUPPORT,
    });
    for i in 0..8 {
        let x = centre_x - 90.0 + i as f64 * 25.0;
        surface.line(DVec2::new(x, top), DVec2::new(x - 10.0, top - 10.0), 1.5, SUPPORT);
    }
}

/// Two stacks of masses over one fixed wheel.
pub struct Atwood {
    meta: Meta,
    left: Vec<f64>,
    right: Vec<f64>,
    g: f64,
    offset: f64,
}

impl Atwood {
    pub fn new(params: &NormalizedParameters) -> Self {
        let pulley = &params.pulley;
        Self {
            meta: Meta::new(params, "Pulley System"),
            left: stack(&pulley.masses_left, pulley.mass1.nonzero_or(10.0)),
            right: stack(&pulley.masses_right, pulley.mass2.nonzero_or(5.0)),
            g: params.gravity.nonzero_or(DEFAULT_GRAVITY),
            offset: 0.0,
        }
    }

    pub fn left_mass(&self) -> f64 {
        self.left.iter().sum()
    }

    pub fn right_mass(&self) -> f64 {
        self.right.iter().sum()
    }

    /// Acceleration of the left stack, positive downwards.
    pub fn acceleration(&self) -> f64 {
        let (m1, m2) = (self.left_mass(), self.right_mass());
        if m1 + m2 <= 0.0 {
            return 0.0;
        }
        (m1 - m2) * self.g / (m1 + m2)
    }

    pub fn tension(&self) -> f64 {
        let (m1, m2) = (self.left_mass(), self.right_mass());
        if m1 + m2 <= 0.0 {
            return 0.0;
        }
        2.0 * m1 * m2 * self.g / (m1 + m2)
    }

    fn render_stack(surface: &mut dyn Surface, x: f64, top: f64, masses: &[f64], color: Color, prefix: &str) {
        let mut y = top;
        for (i, m) in masses.iter().enumerate() {
            block(surface, DVec2::new(x, y), BLOCK, color);
            surface.draw(DrawCommand::Text {
                at: DVec2::new(x, y - 5.0),
                text: format!("{prefix}{}", i + 1),
                align: Align::Center,
                color: palette::WHITE,
            });
            surface.draw(DrawCommand::Text {
                at: DVec2::new(x, y + 10.0),
                text: format!("{m}kg"),
                align: Align::Center,
                color: palette::WHITE,
            });
            if i + 1 < masses.len() {
                let bottom = y + BLOCK.y / 2.0;
                surface.line(DVec2::new(x, bottom), DVec2::new(x, bottom + BLOCK_GAP), 2.0, ROPE);
            }
            y += BLOCK.y + BLOCK_GAP;
        }
    }
}

impl SimulationObject for Atwood {
    fn update(&mut self, dt: f64, _elapsed: f64) {
        self.offset += self.acceleration() * dt * 8.0;
        if self.offset.abs() > MAX_TRAVEL {
            self.offset = 0.0;
        }
    }

    fn render(&self, surface: &mut dyn Surface, _camera: &Camera) {
        let left_x = WHEEL.x - SIDE_OFFSET;
        let right_x = WHEEL.x + SIDE_OFFSET;
        let left_top = WHEEL.y + ROPE_LENGTH + self.offset;
        let right_top = WHEEL.y + ROPE_LENGTH - self.offset;

        ceiling(surface, WHEEL.x, 40.0);
        surface.line(DVec2::new(WHEEL.x, 52.0), WHEEL - DVec2::Y * WHEEL_RADIUS, 3.0, SUPPORT);
        surface.dot(WHEEL, WHEEL_RADIUS, Color::rgb(0x50, 0x66, 0xa0));
        surface.dot(WHEEL, 4.0, palette::SILVER);

        let arc = (0..=16)
            .map(|i| {
                let theta = std::f64::consts::PI * (1.0 - i as f64 / 16.0);
                WHEEL + DVec2::new(theta.cos(), -theta.sin()) * WHEEL_RADIUS
            })
            .collect();
        surface.draw(DrawCommand::Trail { points: arc, width: 2.0, color: ROPE });
        let rope_top = WHEEL.y;
        surface.line(DVec2::new(left_x, left_top - 25.0), DVec2::new(left_x, rope_top), 2.0, ROPE);
        surface.line(DVec2::new(right_x, right_top - 25.0), DVec2::new(right_x, rope_top), 2.0, ROPE);

        Self::render_stack(surface, left_x, left_top, &self.left, LEFT, "L");
        Self::render_stack(surface, right_x, right_top, &self.right, RIGHT, "R");

        let tension = self.tension();
        let lift = tension * 0.35;
        for (x, top) in [(left_x, left_top), (right_x, right_top)] {
            let from = DVec2::new(x, top - BLOCK.y / 2.0 - 5.0);
            surface.arrow(from, from - DVec2::Y * lift, palette::YELLOW, Some(format!("T={tension:.1}N")));
        }
        let (m1, m2) = (self.left_mass(), self.right_mass());
        for (x, top, count, weight, color, name) in [
            (left_x, left_top, self.left.len(), m1 * self.g, LEFT, "ΣW₁"),
            (right_x, right_top, self.right.len(), m2 * self.g, RIGHT, "ΣW₂"),
        ] {
            let base = top + (BLOCK.y + BLOCK_GAP) * count as f64;
            surface.arrow(
                DVec2::new(x, base - 10.0),
                DVec2::new(x, base + 40.0),
                color,
                Some(format!("{name}={weight:.0}N")),
            );
        }

        let join = |masses: &[f64]| masses.iter().map(f64::to_string).collect::<Vec<_>>().join(" + ");
        surface.hud(vec![
            "Atwood Machine (Multi-Mass)".to_string(),
            format!("Left: {} = {m1} kg", join(&self.left)),
            format!("Right: {} = {m2} kg", join(&self.right)),
            format!("a = {:.2} m/s²", self.acceleration()),
            format!("T = {tension:.1} N"),
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, _camera: &Camera) -> Option<DVec2> {
        Some(WHEEL)
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }
}

pub fn pulley(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    stage.add_object(Atwood::new(params));
}

const BEAM_Y: f64 = 80.0;
const LOAD_START: f64 = 150.0;
const LOAD_LOWEST: f64 = 400.0;
const SHEAVE_SPACING: f64 = 15.0;
const SHEAVE_RADIUS: f64 = 12.0;
/// Most sheaves drawn; larger systems keep their full mechanical advantage.
const MAX_SHEAVES: f64 = 12.0;
const LOAD: DVec2 = DVec2::new(50.0, 40.0);

/// Block and tackle: a load hanging from movable sheaves, balanced by an
/// effort mass on the free end of the rope.
pub struct BlockAndTackle {
    meta: Meta,
    config: String,
    pulleys: f64,
    sheaves: usize,
    load: f64,
    effort: f64,
    g: f64,
    load_y: f64,
    load_v: f64,
    t: f64,
}

impl BlockAndTackle {
    pub fn new(params: &NormalizedParameters) -> Self {
        let system = &params.multi_pulley;
        let n = system.num_pulleys.nonzero_or(4.0).round().max(1.0);
        let load = system.load_mass.nonzero_or(100.0);
        Self {
            meta: Meta::new(params, "Multi-Pulley System"),
            config: system.config.or("block_and_tackle").to_string(),
            pulleys: n,
            sheaves: n.min(MAX_SHEAVES) as usize,
            load,
            effort: system.effort_mass.nonzero_or(load / n + 2.0),
            g: params.gravity.nonzero_or(DEFAULT_GRAVITY),
            load_y: LOAD_START,
            load_v: 0.0,
            t: 0.0,
        }
    }

    /// Ideal mechanical advantage, one supporting segment per sheave.
    pub fn mechanical_advantage(&self) -> f64 {
        self.pulleys
    }

    pub fn ideal_effort(&self) -> f64 {
        self.load * self.g / self.mechanical_advantage()
    }

    /// Upward acceleration of the load.
    pub fn acceleration(&self) -> f64 {
        let ma = self.mechanical_advantage();
        let total = self.load + self.effort * ma;
        if total == 0.0 {
            return 0.0;
        }
        (self.effort * self.g * ma - self.load * self.g) / total
    }

    /// Surface height of the movable block.
    pub fn load_height(&self) -> f64 {
        self.load_y
    }

    fn sheave_x(centre: f64, count: usize, i: usize) -> f64 {
        centre - (count as f64 - 1.0) * SHEAVE_SPACING / 2.0 + i as f64 * SHEAVE_SPACING
    }
}

impl SimulationObject for BlockAndTackle {
    fn update(&mut self, dt: f64, elapsed: f64) {
        self.t = elapsed;
        self.load_v += self.acceleration() * dt;
        // Drawn travel is a tenth of the modelled travel.
        self.load_y -= self.load_v * dt * 0.1;
        if self.load_y < BEAM_Y + 40.0 {
            self.load_y = BEAM_Y + 40.0;
            self.load_v = 0.0;
        }
        if self.load_y > LOAD_LOWEST {
            self.load_y = LOAD_LOWEST;
            self.load_v = 0.0;
        }
    }

    fn render(&self, surface: &mut dyn Surface, _camera: &Camera) {
        let mid = surface.viewport().x / 2.0;
        let upper = self.sheaves.div_ceil(2);
        let lower = self.sheaves / 2;
        let sheave = palette::SILVER;

        surface.draw(DrawCommand::Rect {
            at: DVec2::new(mid - 100.0, BEAM_Y - 20.0),
            size: DVec2::new(200.0, 10.0),
            color: Color::rgb(0x2c, 0x3e, 0x50),
        });
        for i in 0..upper {
            let x = Self::sheave_x(mid, upper, i);
            surface.dot(DVec2::new(x, BEAM_Y), SHEAVE_RADIUS, sheave);
            surface.line(DVec2::new(x, BEAM_Y - 10.0), DVec2::new(x, BEAM_Y - 20.0), 3.0, palette::STEEL);
        }
        for i in 0..lower {
            surface.dot(DVec2::new(Self::sheave_x(mid, lower, i), self.load_y), SHEAVE_RADIUS, sheave);
        }

        let mut rope = vec![DVec2::new(Self::sheave_x(mid, upper, 0), BEAM_Y)];
        for i in 0..lower {
            rope.push(DVec2::new(Self::sheave_x(mid, lower, i), self.load_y));
            if i + 1 < upper {
                rope.push(DVec2::new(Self::sheave_x(mid, upper, i + 1), BEAM_Y));
            }
        }
        surface.draw(DrawCommand::Trail { points: rope, width: 2.0, color: palette::WHITE });

        let ma = self.mechanical_advantage();
        let last_upper = Self::sheave_x(mid, upper, upper.saturating_sub(1));
        let effort_at = DVec2::new(
            last_upper + SHEAVE_RADIUS + 30.0,
            BEAM_Y + (LOAD_LOWEST - self.load_y) * ma + 20.0,
        );
        surface.line(DVec2::new(last_upper + SHEAVE_RADIUS, BEAM_Y), effort_at, 2.0, palette::WHITE);

        let load_centre = DVec2::new(mid, self.load_y + 20.0 + LOAD.y / 2.0);
        block(surface, load_centre, LOAD, palette::YELLOW);
        surface.draw(DrawCommand::Text {
            at: DVec2::new(mid, self.load_y + 45.0),
            text: format!("{}kg", self.load),
            align: Align::Center,
            color: Color::rgb(0, 0, 0),
        });

        surface.dot(effort_at, 8.0, palette::RED);
        surface.label(effort_at + DVec2::X * 10.0, format!("Effort: {}kg", self.effort), palette::RED);

        surface.arrow(
            load_centre,
            load_centre + DVec2::Y * 50.0,
            palette::RED,
            Some(format!("F_g = {:.0}N", self.load * self.g)),
        );
        surface.arrow(
            effort_at,
            effort_at + DVec2::Y * 40.0,
            palette::YELLOW,
            Some(format!("F_e = {:.0}N", self.effort * self.g)),
        );

        surface.hud(vec![
            format!("Multi-Pulley System: {}", self.config.replacen('_', " ", 1)),
            format!("Number of Pulleys: {}", self.pulleys),
            format!("Mechanical Advantage: {ma}"),
            format!("Load: {} kg ({:.0} N)", self.load, self.load * self.g),
            format!("Effort: {} kg ({:.0} N)", self.effort, self.effort * self.g),
            format!("Ideal Effort needed: {:.1} N", self.ideal_effort()),
            format!("t = {:.2} s", self.t),
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, _camera: &Camera) -> Option<DVec2> {
        Some(DVec2::new(CENTRE.x, self.load_y + 20.0 + LOAD.y / 2.0))
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }
}

pub fn multi_pulley(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    stage.add_object(BlockAndTackle::new(params));
}
