use glam::DVec2;

use crate::core::normalize::DEFAULT_GRAVITY;
use crate::core::schema::NormalizedParameters;
use crate::platform::surface::{Surface, palette};
use crate::scenes::{GROUND_ORIGIN, Meta, ground, motion::block};
use crate::simulation::camera::Camera;
use crate::simulation::object::{SimulationObject, Stage};

const MAX_BAR_HEIGHT: f64 = 200.0;
const BAR_WIDTH: f64 = 40.0;
const BAR_GAP: f64 = 60.0;
const BALL_X: f64 = 350.0;

/// A ball dropped from rest that bounces back to its release height.
///
/// Energy bars are scaled so the conserved total spans a fixed height.
pub struct BouncingBall {
    meta: Meta,
    mass: f64,
    g: f64,
    drop_height: f64,
    height: f64,
    velocity: f64,
}

impl BouncingBall {
    pub fn new(params: &NormalizedParameters) -> Self {
        let drop_height = params
            .launch_height
            .nonzero()
            .or_else(|| params.initial_position.y0.nonzero())
            .unwrap_or(10.0)
            .abs();
        Self {
            meta: Meta::new(params, "Bouncing Ball"),
            mass: params.mass.nonzero_or(2.0),
            g: params.gravity.nonzero_or(DEFAULT_GRAVITY).abs(),
            drop_height,
            height: drop_height,
            velocity: 0.0,
        }
    }

    pub fn total_energy(&self) -> f64 {
        self.mass * self.g * self.drop_height
    }

    pub fn kinetic(&self) -> f64 {
        0.5 * self.mass * self.velocity * self.velocity
    }

    pub fn potential(&self) -> f64 {
        self.mass * self.g * self.height
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl SimulationObject for BouncingBall {
    fn update(&mut self, _dt: f64, elapsed: f64) {
        let fall = (2.0 * self.drop_height / self.g).sqrt();
        if fall <= 0.0 {
            return;
        }
        let t = elapsed % (2.0 * fall);
        let (h, v) = if t < fall {
            (self.drop_height - 0.5 * self.g * t * t, -self.g * t)
        } else {
            let rise = t - fall;
            let v0 = self.g * fall;
            (v0 * rise - 0.5 * self.g * rise * rise, v0 - self.g * rise)
        };
        self.height = h.max(0.0);
        self.velocity = v;
    }

    fn render(&self, surface: &mut dyn Surface, camera: &Camera) {
        let base = GROUND_ORIGIN.y;
        let s = camera.scale();
        ground(surface, base);

        let ruler_x = 200.0;
        surface.line(
            DVec2::new(ruler_x, base),
            DVec2::new(ruler_x, base - self.drop_height * s),
            1.0,
            palette::OVERLAY,
        );
        for i in 0..=5 {
            let h = self.drop_height * i as f64 / 5.0;
            let y = base - h * s;
            surface.line(DVec2::new(ruler_x - 5.0, y), DVec2::new(ruler_x + 5.0, y), 1.0, palette::SILVER);
            surface.label(DVec2::new(ruler_x - 45.0, y + 3.0), format!("{h:.1} m"), palette::SILVER);
        }

        surface.dot(DVec2::new(BALL_X, base - self.height * s), 12.0, palette::ORANGE);

        let total = self.total_energy();
        let per_joule = if total > 0.0 { MAX_BAR_HEIGHT / total } else { 0.0 };
        let bars = [
            ("KE", self.kinetic(), palette::CYAN),
            ("PE", self.potential(), palette::RED),
            ("Total", total, palette::VIOLET),
        ];
        for (i, (name, value, color)) in bars.into_iter().enumerate() {
            let x = 500.0 + BAR_GAP * i as f64;
            let h = value * per_joule;
            block(surface, DVec2::new(x + BAR_WIDTH / 2.0, base - h / 2.0), DVec2::new(BAR_WIDTH, h), color);
            surface.label(DVec2::new(x + 5.0, base + 15.0), name.to_string(), color);
            surface.label(DVec2::new(x + 5.0, base - h - 5.0), format!("{value:.1}"), color);
        }

        surface.hud(vec![
            "Energy Conservation".to_string(),
            format!("Mass = {} kg", self.mass),
            format!("Height = {:.2} m", self.height),
            format!("Velocity = {:.2} m/s", self.velocity.abs()),
            format!("Total E = {total:.1} J (Conserved)"),
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, camera: &Camera) -> Option<DVec2> {
        Some(DVec2::new(BALL_X, GROUND_ORIGIN.y - self.height * camera.scale()))
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }
}

pub fn energy(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    stage.add_object(BouncingBall::new(params));
}
