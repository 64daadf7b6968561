//! Springs: free oscillation, Coulomb-damped sliding and a sprung Atwood
//! machine.

use glam::DVec2;

use crate::core::normalize::DEFAULT_GRAVITY;
use crate::core::schema::NormalizedParameters;
use crate::platform::surface::{Color, DrawCommand, Surface, palette};
use crate::scenes::{Meta, Trail, motion::block};
use crate::simulation::camera::Camera;
use crate::simulation::object::{SimulationObject, Stage};

const ANCHOR: DVec2 = DVec2::new(150.0, 300.0);
const EQUILIBRIUM_X: f64 = 450.0;
/// Drawn length of one metre of spring travel.
const SPRING_SCALE: f64 = 80.0;
const BLOCK_SIZE: f64 = 50.0;

/// Zig-zag between two points.
pub(crate) fn coil(surface: &mut dyn Surface, from: DVec2, to: DVec2, turns: usize, amplitude: f64, color: Color) {
    let axis = to - from;
    let normal = axis.perp().normalize_or_zero() * amplitude;
    let mut points = Vec::with_capacity(turns + 2);
    points.push(from);
    for i in 1..=turns {
        let side = if i % 2 == 0 { -1.0 } else { 1.0 };
        points.push(from + axis * (i as f64 - 0.5) / turns as f64 + normal * side);
    }
    points.push(to);
    surface.draw(DrawCommand::Trail { points, width: 2.5, color });
}

fn wall(surface: &mut dyn Surface) {
    surface.draw(DrawCommand::Rect {
        at: ANCHOR - DVec2::new(15.0, 60.0),
        size: DVec2::new(15.0, 120.0),
        color: Color::rgba(0.31, 0.39, 0.55, 0.4),
    });
}

/// Recent samples of one quantity, drawn as a small strip chart.
struct Strip {
    samples: Trail,
    full_scale: f64,
}

impl Strip {
    const ORIGIN: DVec2 = DVec2::new(20.0, 500.0);
    const SIZE: DVec2 = DVec2::new(200.0, 60.0);

    fn new(capacity: usize, full_scale: f64) -> Self {
        Self {
            samples: Trail::new(capacity),
            full_scale: if full_scale.abs() > 0.0 { full_scale.abs() } else { 1.0 },
        }
    }

    fn push(&mut self, t: f64, value: f64) {
        self.samples.push(DVec2::new(t, value));
    }

    fn render(&self, surface: &mut dyn Surface, title: &str) {
        surface.draw(DrawCommand::Rect {
            at: Self::ORIGIN,
            size: Self::SIZE,
            color: palette::WHITE.with_alpha(0.03),
        });
        surface.label(Self::ORIGIN + DVec2::new(5.0, -5.0), title.to_string(), palette::STEEL);

        let n = self.samples.len();
        if n < 2 {
            return;
        }
        let mid = Self::ORIGIN.y + Self::SIZE.y / 2.0;
        let points = self
            .samples
            .iter()
            .enumerate()
            .map(|(i, sample)| {
                let x = Self::ORIGIN.x + i as f64 / n as f64 * Self::SIZE.x;
                let y = mid - (sample.y / self.full_scale).clamp(-1.0, 1.0) * Self::SIZE.y / 2.0;
                DVec2::new(x, y)
            })
            .collect();
        surface.draw(DrawCommand::Trail { points, width: 1.5, color: palette::CYAN });
    }
}

/// Mass on a horizontal spring, `x(t) = x₀ cos(ωt) e^{-γt}`.
pub struct SpringMass {
    meta: Meta,
    k: f64,
    mass: f64,
    amplitude: f64,
    damping: f64,
    x: f64,
    v: f64,
}

impl SpringMass {
    pub fn new(params: &NormalizedParameters) -> Self {
        let amplitude = params.spring.displacement.nonzero_or(1.5);
        Self {
            meta: Meta::new(params, "Spring-Mass"),
            k: params
                .energy
                .spring_constant
                .nonzero()
                .unwrap_or_else(|| params.spring.constant.nonzero_or(50.0))
                .abs(),
            mass: params.mass.nonzero_or(2.0).abs(),
            amplitude,
            damping: params.spring.damping.nonzero_or(0.0),
            x: amplitude,
            v: 0.0,
        }
    }

    pub fn omega(&self) -> f64 {
        (self.k / self.mass).sqrt()
    }

    pub fn displacement(&self) -> f64 {
        self.x
    }

    pub fn energy(&self) -> (f64, f64) {
        (0.5 * self.mass * self.v * self.v, 0.5 * self.k * self.x * self.x)
    }

    fn block_x(&self) -> f64 {
        EQUILIBRIUM_X + self.x * SPRING_SCALE
    }
}

impl SimulationObject for SpringMass {
    fn update(&mut self, _dt: f64, elapsed: f64) {
        let omega = self.omega();
        let decay = (-self.damping * elapsed).exp();
        self.x = self.amplitude * (omega * elapsed).cos() * decay;
        self.v = -self.amplitude * omega * (omega * elapsed).sin() * decay;
    }

    fn render(&self, surface: &mut dyn Surface, _camera: &Camera) {
        wall(surface);
        let bx = self.block_x();
        let stretch = (self.x / self.amplitude).abs().min(1.0) as f32;
        let tint = if self.x > 0.0 { palette::RED } else { palette::CYAN };
        coil(surface, ANCHOR, DVec2::new(bx, ANCHOR.y), 12, 18.0, tint.with_alpha(0.4 + stretch * 0.6));

        let centre = DVec2::new(bx + BLOCK_SIZE / 2.0, ANCHOR.y);
        block(surface, centre, DVec2::splat(BLOCK_SIZE), palette::ORANGE);
        surface.label(centre + DVec2::new(-12.0, 5.0), format!("{}kg", self.mass), palette::WHITE);

        let eq = EQUILIBRIUM_X + BLOCK_SIZE / 2.0;
        surface.line(DVec2::new(eq, ANCHOR.y - 80.0), DVec2::new(eq, ANCHOR.y + 80.0), 1.0, palette::WHITE.with_alpha(0.15));
        surface.label(DVec2::new(eq - 12.0, ANCHOR.y + 95.0), "x = 0".to_string(), palette::OVERLAY);

        let force = -self.k * self.x;
        if force.abs() > 0.1 {
            let y = ANCHOR.y + BLOCK_SIZE / 2.0 + 30.0;
            surface.arrow(
                DVec2::new(centre.x, y),
                DVec2::new(centre.x + force * 0.8, y),
                palette::RED,
                Some(format!("F = {force:.1} N")),
            );
        }

        let (ke, pe) = self.energy();
        let total = 0.5 * self.k * self.amplitude * self.amplitude;
        let bar = |value: f64| if total > 0.0 { (value / total).min(1.0) * 200.0 } else { 0.0 };
        for (row, name, value, color) in [(0.0, "KE", ke, palette::CYAN), (30.0, "PE", pe, palette::VIOLET)] {
            let at = DVec2::new(300.0, 460.0 + row);
            surface.draw(DrawCommand::Rect { at, size: DVec2::new(bar(value), 16.0), color });
            surface.label(at - DVec2::Y * 5.0, format!("{name} = {value:.2} J"), color);
        }
        surface.label(DVec2::new(300.0, 525.0), format!("E_total = {total:.2} J"), palette::YELLOW);

        surface.hud(vec![
            format!("Spring - k = {} N/m", self.k),
            format!("m = {} kg   ω = {:.2} rad/s", self.mass, self.omega()),
            format!("T = {:.3} s", std::f64::consts::TAU / self.omega()),
            format!("x = {:.3} m", self.x),
            format!("v = {:.3} m/s", self.v),
            format!("F = -kx = {force:.1} N"),
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, _camera: &Camera) -> Option<DVec2> {
        Some(DVec2::new(self.block_x() + BLOCK_SIZE / 2.0, ANCHOR.y))
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }
}

pub fn spring(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    stage.add_object(SpringMass::new(params));
}

/// Spring-driven block sliding on a rough floor.
///
/// Kinetic friction opposes the motion; the block sticks once it is at rest
/// where the spring cannot overcome friction.
pub struct FrictionOscillator {
    meta: Meta,
    mass: f64,
    k: f64,
    amplitude: f64,
    mu_k: f64,
    friction: f64,
    x: f64,
    v: f64,
    t: f64,
    dissipated: f64,
    stuck: bool,
    history: Strip,
}

impl FrictionOscillator {
    pub fn new(params: &NormalizedParameters) -> Self {
        let mass = params.mass.nonzero_or(2.0).abs();
        let mu_k = params.friction.kinetic_coefficient.nonzero_or(0.15).abs();
        let g = params.gravity.nonzero_or(DEFAULT_GRAVITY).abs();
        let amplitude = params.spring.displacement.nonzero_or(1.5);
        Self {
            meta: Meta::new(params, "Spring + Friction"),
            mass,
            k: params.spring.constant.nonzero_or(50.0).abs(),
            amplitude,
            mu_k,
            friction: mu_k * mass * g,
            x: amplitude,
            v: 0.0,
            t: 0.0,
            dissipated: 0.0,
            stuck: false,
            history: Strip::new(800, amplitude),
        }
    }

    pub fn displacement(&self) -> f64 {
        self.x
    }

    pub fn velocity(&self) -> f64 {
        self.v
    }

    pub fn mechanical_energy(&self) -> f64 {
        0.5 * self.mass * self.v * self.v + 0.5 * self.k * self.x * self.x
    }

    pub fn dissipated(&self) -> f64 {
        self.dissipated
    }

    fn friction_force(&self) -> f64 {
        if self.v != 0.0 { -self.v.signum() * self.friction } else { 0.0 }
    }

    fn holds(&self) -> bool {
        (self.k * self.x).abs() <= self.friction
    }
}

impl SimulationObject for FrictionOscillator {
    fn update(&mut self, dt: f64, _elapsed: f64) {
        if self.stuck {
            return;
        }
        self.t += dt;
        let spring = -self.k * self.x;
        let friction = if self.v != 0.0 {
            self.friction_force()
        } else {
            // Static friction opposes the spring until it gives way.
            -spring.signum() * self.friction.min(spring.abs())
        };
        let previous = self.v;
        self.v += (spring + friction) / self.mass * dt;
        if previous != 0.0 && previous.signum() != self.v.signum() && self.holds() {
            self.v = 0.0;
        }
        self.x += self.v * dt;
        self.dissipated += (friction * self.v * dt).abs();

        if self.v.abs() < 1e-3 && self.holds() {
            self.v = 0.0;
            self.stuck = true;
        }
        self.history.push(self.t, self.x);
    }

    fn render(&self, surface: &mut dyn Surface, _camera: &Camera) {
        wall(surface);
        surface.line(DVec2::new(ANCHOR.x, ANCHOR.y + 25.0), DVec2::new(820.0, ANCHOR.y + 25.0), 2.0, palette::GROUND);
        let bx = EQUILIBRIUM_X + self.x * SPRING_SCALE;
        coil(surface, ANCHOR, DVec2::new(bx, ANCHOR.y), 12, 14.0, palette::CYAN);
        let centre = DVec2::new(bx + BLOCK_SIZE / 2.0, ANCHOR.y);
        block(surface, centre, DVec2::splat(BLOCK_SIZE), palette::RED);
        surface.label(centre + DVec2::new(BLOCK_SIZE / 2.0 + 5.0, 0.0), format!("{} kg", self.mass), palette::RED);

        let spring = -self.k * self.x;
        if spring.abs() > 0.1 {
            surface.arrow(centre, centre + DVec2::X * spring * 1.5, palette::CYAN, None);
        }
        let friction = self.friction_force();
        if friction.abs() > 0.1 {
            let at = centre - DVec2::Y * 30.0;
            surface.arrow(at, at + DVec2::X * friction * 1.5, palette::ORANGE, None);
        }
        self.history.render(surface, "Displacement vs Time");

        let ke = 0.5 * self.mass * self.v * self.v;
        let pe = 0.5 * self.k * self.x * self.x;
        surface.hud(vec![
            "Spring + Friction - Damped Oscillation".to_string(),
            format!("m = {} kg, k = {} N/m, μ_k = {}, x₀ = {} m", self.mass, self.k, self.mu_k, self.amplitude),
            format!("Displacement: x = {:.3} m", self.x),
            format!("Velocity: v = {:.3} m/s", self.v),
            format!("KE = {ke:.2} J, PE = {pe:.2} J"),
            format!("Total E = {:.2} J", ke + pe),
            format!("Energy lost to friction: {:.2} J", self.dissipated),
            format!("t = {:.2} s", self.t),
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, _camera: &Camera) -> Option<DVec2> {
        Some(DVec2::new(EQUILIBRIUM_X + self.x * SPRING_SCALE + BLOCK_SIZE / 2.0, ANCHOR.y))
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }

    fn is_settled(&self) -> bool {
        self.stuck
    }
}

pub fn spring_friction(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    stage.add_object(FrictionOscillator::new(params));
}

const PULLEY: DVec2 = DVec2::new(450.0, 80.0);
const PULLEY_RADIUS: f64 = 30.0;
/// Rest length of each hanging side, and how it is drawn.
const HANG: f64 = 120.0;
const HANG_SCALE: f64 = 6.0;
const MAX_EXTENSION: f64 = 30.0;
const RUN_TIME: f64 = 20.0;

/// Atwood machine whose rope includes a spring.
///
/// `y1` is how far the first mass has descended, `y2` how far the second
/// has risen; the spring stretches by their difference and a slack rope
/// carries no tension.
pub struct SprungAtwood {
    meta: Meta,
    m1: f64,
    m2: f64,
    k: f64,
    g: f64,
    y1: f64,
    y2: f64,
    v1: f64,
    v2: f64,
    t: f64,
    tension: f64,
    history: Strip,
}

impl SprungAtwood {
    pub fn new(params: &NormalizedParameters) -> Self {
        let pulley = &params.pulley;
        Self {
            meta: Meta::new(params, "Pulley + Spring"),
            m1: pulley.mass1.nonzero_or(10.0).abs(),
            m2: pulley.mass2.nonzero_or(5.0).abs(),
            k: pulley.spring_constant.nonzero_or(20.0).abs(),
            g: params.gravity.nonzero_or(DEFAULT_GRAVITY),
            y1: 0.0,
            y2: 0.0,
            v1: 0.0,
            v2: 0.0,
            t: 0.0,
            tension: 0.0,
            history: Strip::new(600, 10.0),
        }
    }

    pub fn extension(&self) -> f64 {
        self.y1 - self.y2
    }

    pub fn tension(&self) -> f64 {
        self.tension
    }

    pub fn elapsed(&self) -> f64 {
        self.t
    }

    fn mass_positions(&self) -> (DVec2, DVec2) {
        let drop = |d: f64| (PULLEY.y + HANG + d * HANG_SCALE).clamp(PULLEY.y + 20.0, 560.0);
        (
            DVec2::new(PULLEY.x - PULLEY_RADIUS, drop(self.y1)),
            DVec2::new(PULLEY.x + PULLEY_RADIUS, drop(-self.y2)),
        )
    }
}

impl SimulationObject for SprungAtwood {
    fn update(&mut self, dt: f64, _elapsed: f64) {
        if self.is_settled() {
            return;
        }
        self.t += dt;
        self.tension = (self.k * self.extension()).max(0.0);
        let a1 = self.g - self.tension / self.m1;
        let a2 = self.tension / self.m2 - self.g;
        self.v1 += a1 * dt;
        self.v2 += a2 * dt;
        self.y1 += self.v1 * dt;
        self.y2 += self.v2 * dt;
        self.history.push(self.t, self.extension());
    }

    fn render(&self, surface: &mut dyn Surface, _camera: &Camera) {
        surface.draw(DrawCommand::Ring {
            at: PULLEY,
            radius: PULLEY_RADIUS,
            width: 3.0,
            color: palette::STEEL,
        });
        surface.dot(PULLEY, 4.0, palette::SILVER);

        let (p1, p2) = self.mass_positions();
        let rope_top1 = DVec2::new(p1.x, PULLEY.y);
        let rope_top2 = DVec2::new(p2.x, PULLEY.y);
        coil(surface, rope_top1, p1, 10, 6.0, palette::CYAN);
        surface.line(rope_top2, p2, 2.0, palette::CYAN);

        surface.dot(p1, 14.0, palette::RED);
        surface.dot(p2, 11.0, palette::ORANGE);
        surface.arrow(p1, p1 + DVec2::Y * self.m1 * self.g * 0.3, palette::RED, None);
        surface.arrow(p2, p2 + DVec2::Y * self.m2 * self.g * 0.3, palette::ORANGE, None);
        surface.label(p1 + DVec2::new(-70.0, 0.0), format!("m₁={}kg", self.m1), palette::RED);
        surface.label(p2 + DVec2::new(18.0, 0.0), format!("m₂={}kg", self.m2), palette::ORANGE);

        self.history.render(surface, "Spring Extension vs Time");

        surface.hud(vec![
            "Pulley + Spring - Oscillating Atwood".to_string(),
            format!("m₁ = {} kg, m₂ = {} kg, k = {} N/m", self.m1, self.m2, self.k),
            format!("Extension: Δx = {:.3} m", self.extension()),
            format!("Tension: T = {:.2} N", self.tension),
            format!("Spring force: F_s = {:.2} N", -self.tension),
            format!("v₁ = {:.2} m/s, v₂ = {:.2} m/s", self.v1, self.v2),
            format!("t = {:.2} s", self.t),
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, _camera: &Camera) -> Option<DVec2> {
        Some(self.mass_positions().0)
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }

    fn is_settled(&self) -> bool {
        self.extension().abs() > MAX_EXTENSION || self.t > RUN_TIME
    }
}

pub fn pulley_spring(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    stage.add_object(SprungAtwood::new(params));
}
