use glam::DVec2;

use crate::core::schema::NormalizedParameters;
use crate::platform::surface::{Align, Color, DrawCommand, Surface, palette};
use crate::scenes::Meta;
use crate::simulation::camera::Camera;
use crate::simulation::object::{SimulationObject, Stage};

const STEEL_MODULUS: f64 = 2e11;
const BAR: DVec2 = DVec2::new(200.0, 250.0);
const BAR_LENGTH: f64 = 400.0;
const BAR_HEIGHT: f64 = 60.0;
/// Visual exaggeration of the extension, on top of the pixel scale.
const EXAGGERATION: f64 = 200.0;
/// Fraction of the full load applied per second.
const LOAD_RATE: f64 = 0.4;

const DIMENSION: Color = Color::rgba(0.31, 0.8, 0.77, 0.3);
const EXTENSION: Color = Color::rgba(1.0, 0.42, 0.42, 0.3);

/// A rod fixed at one end, gradually loaded in tension.
pub struct ElasticBar {
    meta: Meta,
    force: f64,
    area: f64,
    length: f64,
    modulus: f64,
    progress: f64,
}

impl ElasticBar {
    pub fn new(params: &NormalizedParameters) -> Self {
        Self {
            meta: Meta::new(params, "Elastic Bar"),
            force: params.forces.applied.nonzero_or(5000.0),
            area: params.elasticity.area.nonzero_or(0.01),
            length: params.elasticity.original_length.nonzero_or(2.0),
            modulus: params.elasticity.youngs_modulus.nonzero_or(STEEL_MODULUS),
            progress: 0.0,
        }
    }

    pub fn stress(&self) -> f64 {
        self.force / self.area
    }

    pub fn strain(&self) -> f64 {
        self.stress() / self.modulus
    }

    pub fn deformation(&self) -> f64 {
        self.strain() * self.length
    }

    /// Fraction of the load applied so far, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    fn full_extension(&self) -> f64 {
        self.deformation() * BAR_LENGTH / self.length * EXAGGERATION
    }
}

impl SimulationObject for ElasticBar {
    fn update(&mut self, dt: f64, _elapsed: f64) {
        self.progress = (self.progress + dt * LOAD_RATE).min(1.0);
    }

    fn render(&self, surface: &mut dyn Surface, _camera: &Camera) {
        let full = self.full_extension();
        let ext = full * self.progress;
        let top = BAR.y - BAR_HEIGHT / 2.0;
        let wall = Color::rgba(0.31, 0.39, 0.55, 0.4);

        surface.draw(DrawCommand::Rect {
            at: DVec2::new(BAR.x - 20.0, BAR.y - BAR_HEIGHT),
            size: DVec2::new(20.0, BAR_HEIGHT * 2.0 + 20.0),
            color: wall,
        });
        for i in 0..7 {
            let y = BAR.y - BAR_HEIGHT + 5.0 + i as f64 * 20.0;
            surface.line(DVec2::new(BAR.x - 20.0, y), DVec2::new(BAR.x - 30.0, y + 10.0), 1.5, wall);
        }

        let outline = [
            DVec2::new(BAR.x, top),
            DVec2::new(BAR.x + BAR_LENGTH, top),
            DVec2::new(BAR.x + BAR_LENGTH, top + BAR_HEIGHT),
            DVec2::new(BAR.x, top + BAR_HEIGHT),
            DVec2::new(BAR.x, top),
        ];
        surface.draw(DrawCommand::Trail {
            points: outline.to_vec(),
            width: 1.0,
            color: palette::WHITE.with_alpha(0.1),
        });

        // Blue at rest, shifting to red under full load.
        let ratio = (ext / (full + 1.0)).min(1.0) as f32;
        let current = BAR_LENGTH + ext;
        surface.draw(DrawCommand::Rect {
            at: DVec2::new(BAR.x, top),
            size: DVec2::new(current, BAR_HEIGHT),
            color: Color::rgba((60.0 + ratio * 195.0) / 255.0, 0.2, (180.0 - ratio * 130.0) / 255.0, 1.0),
        });
        let mut x = BAR.x + 10.0;
        while x < BAR.x + current - 5.0 {
            surface.line(
                DVec2::new(x, top + 3.0),
                DVec2::new(x + 10.0, top + BAR_HEIGHT - 3.0),
                0.5,
                palette::WHITE.with_alpha(0.04),
            );
            x += 15.0;
        }

        let end = BAR.x + current;
        surface.arrow(
            DVec2::new(end + 5.0, BAR.y),
            DVec2::new(end + 60.0, BAR.y),
            palette::RED,
            Some(format!("F = {} N", self.force)),
        );

        let dim_y = top + BAR_HEIGHT + 40.0;
        dimension(surface, BAR.x, BAR.x + BAR_LENGTH, dim_y, DIMENSION);
        surface.draw(DrawCommand::Text {
            at: DVec2::new(BAR.x + BAR_LENGTH / 2.0, dim_y + 16.0),
            text: format!("L₀ = {} m", self.length),
            align: Align::Center,
            color: palette::CYAN,
        });
        if ext > 5.0 {
            let y = dim_y + 30.0;
            dimension(surface, BAR.x + BAR_LENGTH, end, y, EXTENSION);
            surface.draw(DrawCommand::Text {
                at: DVec2::new(BAR.x + BAR_LENGTH + ext / 2.0, y + 16.0),
                text: format!("ΔL = {:.2e} m", self.deformation()),
                align: Align::Center,
                color: palette::RED,
            });
        }

        let origin = DVec2::new(100.0, 440.0);
        let axes = palette::WHITE.with_alpha(0.2);
        surface.line(origin, origin - DVec2::Y * 80.0, 1.0, axes);
        surface.line(origin, origin + DVec2::X * 150.0, 1.0, axes);
        surface.label(origin + DVec2::new(2.0, -85.0), "σ (stress)".to_string(), palette::STEEL);
        surface.label(origin + DVec2::new(155.0, 4.0), "ε (strain)".to_string(), palette::STEEL);
        let reach = 80.0 * self.progress;
        let point = origin + DVec2::new(reach, -reach);
        surface.line(origin, point, 2.0, palette::YELLOW);
        surface.dot(point, 4.0, palette::YELLOW);

        surface.draw(DrawCommand::Text {
            at: DVec2::new(surface.viewport().x / 2.0, 50.0),
            text: "Elasticity - Young's Modulus (E = σ/ε)".to_string(),
            align: Align::Center,
            color: palette::YELLOW,
        });

        surface.hud(vec![
            format!("Elasticity - E = {:.1e} Pa", self.modulus),
            format!("F = {} N   A = {} m²", self.force, self.area),
            format!("σ = F/A = {:.2e} Pa", self.stress()),
            format!("ε = σ/E = {:.4e}", self.strain()),
            format!("L₀ = {} m   ΔL = {:.2e} m", self.length, self.deformation()),
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, _camera: &Camera) -> Option<DVec2> {
        Some(DVec2::new(400.0, 280.0))
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }
}

/// Horizontal dimension line with end ticks.
fn dimension(surface: &mut dyn Surface, from: f64, to: f64, y: f64, color: Color) {
    surface.line(DVec2::new(from, y - 5.0), DVec2::new(from, y + 5.0), 1.0, color);
    surface.line(DVec2::new(to, y - 5.0), DVec2::new(to, y + 5.0), 1.0, color);
    surface.line(DVec2::new(from, y), DVec2::new(to, y), 1.0, color);
}

pub fn elasticity(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    stage.add_object(ElasticBar::new(params));
}
