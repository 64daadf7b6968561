use glam::DVec2;

use crate::core::schema::NormalizedParameters;
use crate::laws::fields::optics::{image_distance, snell};
use crate::platform::surface::{Color, DrawCommand, Surface, palette};
use crate::scenes::{CENTRE, Meta};
use crate::simulation::camera::Camera;
use crate::simulation::object::{SimulationObject, Stage};

const RAY_LENGTH: f64 = 180.0;
const OBJECT_HEIGHT: f64 = 70.0;
/// Tallest image drawn, in surface units.
const MAX_IMAGE_HEIGHT: f64 = 250.0;

const MEDIUM_1: Color = Color::rgb(0x6c, 0xa0, 0xff);
const MEDIUM_2: Color = Color::rgb(0xff, 0xaa, 0x77);

/// Static diagram of light crossing a flat boundary.
pub struct RayDiagram {
    meta: Meta,
    n1: f64,
    n2: f64,
    incidence: f64,
    refraction: Option<f64>,
}

impl RayDiagram {
    pub fn new(params: &NormalizedParameters) -> Self {
        let optics = &params.optics;
        let n1 = optics.indices.n1.nonzero_or(1.0);
        let n2 = optics.indices.n2.nonzero_or(1.5);
        let incidence = optics.angles.incidence.nonzero_or(30.0);
        Self {
            meta: Meta::new(params, "Ray Diagram"),
            n1,
            n2,
            incidence,
            refraction: optics.angles.refraction.nonzero().or_else(|| snell(n1, n2, incidence)),
        }
    }

    /// Refracted angle; `None` under total internal reflection.
    pub fn refraction(&self) -> Option<f64> {
        self.refraction
    }
}

impl SimulationObject for RayDiagram {
    fn update(&mut self, _dt: f64, _elapsed: f64) {}

    fn render(&self, surface: &mut dyn Surface, _camera: &Camera) {
        let c = CENTRE;
        surface.draw(DrawCommand::Rect {
            at: DVec2::new(150.0, c.y),
            size: DVec2::new(600.0, 180.0),
            color: Color::rgba(0.12, 0.2, 0.31, 0.5),
        });
        surface.line(DVec2::new(150.0, c.y), DVec2::new(750.0, c.y), 2.0, MEDIUM_1.with_alpha(0.4));
        surface.line(c - DVec2::Y * 200.0, c + DVec2::Y * 200.0, 1.0, palette::WHITE.with_alpha(0.15));
        surface.label(c + DVec2::new(6.0, -185.0), "Normal".to_string(), palette::OVERLAY);

        let first = if self.n1 <= 1.01 { "air" } else { "medium" };
        let second = if self.n2 > 1.4 { "glass" } else { "medium" };
        surface.label(DVec2::new(170.0, c.y - 20.0), format!("n₁ = {} ({first})", self.n1), MEDIUM_1);
        surface.label(DVec2::new(170.0, c.y + 35.0), format!("n₂ = {} ({second})", self.n2), MEDIUM_2);

        let (sin, cos) = self.incidence.to_radians().sin_cos();
        let incoming = c + DVec2::new(-sin, -cos) * RAY_LENGTH;
        let reflected = c + DVec2::new(sin, -cos) * RAY_LENGTH;
        surface.arrow(incoming, c, palette::YELLOW, Some(format!("θ₁ = {:.1}°", self.incidence)));
        surface.arrow(c, reflected, palette::RED, Some(format!("θᵣ = {:.1}°", self.incidence)));

        match self.refraction {
            Some(angle) => {
                let (sin, cos) = angle.to_radians().sin_cos();
                surface.arrow(
                    c,
                    c + DVec2::new(sin, cos) * RAY_LENGTH,
                    palette::CYAN,
                    Some(format!("θ₂ = {angle:.1}°")),
                );
            }
            None => surface.label(
                c + DVec2::new(30.0, 50.0),
                "Total Internal Reflection".to_string(),
                palette::RED,
            ),
        }
        surface.dot(c, 5.0, palette::WHITE);

        surface.hud(vec![
            "Snell's Law - Refraction".to_string(),
            "n₁·sin(θ₁) = n₂·sin(θ₂)".to_string(),
            format!(
                "{}·sin({:.1}°) = {}·sin({:.1}°)",
                self.n1,
                self.incidence,
                self.n2,
                self.refraction.unwrap_or(0.0)
            ),
            format!("n₁ = {}   n₂ = {}", self.n1, self.n2),
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, _camera: &Camera) -> Option<DVec2> {
        Some(CENTRE)
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }
}

/// Thin-lens ray construction, scaled to fit the viewport.
pub struct LensDiagram {
    meta: Meta,
    focal: f64,
    object: f64,
    image: f64,
    scale: f64,
}

impl LensDiagram {
    pub fn new(params: &NormalizedParameters) -> Self {
        let optics = &params.optics;
        let focal = optics.focal_length.nonzero_or(50.0);
        let object = optics.object_distance.nonzero_or(100.0);
        let image = optics
            .image_distance
            .nonzero()
            .or_else(|| Some(image_distance(focal, object)).filter(|d| d.is_finite() && *d != 0.0))
            .unwrap_or(100.0);
        let span = object.abs().max(image.abs()).max(focal.abs()) * 1.3;
        Self {
            meta: Meta::new(params, "Lens Diagram"),
            focal,
            object,
            image,
            scale: (300.0 / span.max(1.0)).min(2.5),
        }
    }

    pub fn image_distance(&self) -> f64 {
        self.image
    }

    pub fn magnification(&self) -> f64 {
        -self.image / self.object
    }
}

impl SimulationObject for LensDiagram {
    fn update(&mut self, _dt: f64, _elapsed: f64) {}

    fn render(&self, surface: &mut dyn Surface, _camera: &Camera) {
        let c = CENTRE;
        let s = self.scale;
        let width = surface.viewport().x;
        surface.line(DVec2::new(40.0, c.y), DVec2::new(width - 40.0, c.y), 1.5, palette::WHITE.with_alpha(0.08));

        surface.draw(DrawCommand::Rect {
            at: c - DVec2::new(3.0, 130.0),
            size: DVec2::new(6.0, 260.0),
            color: MEDIUM_1.with_alpha(0.6),
        });
        surface.label(c - DVec2::new(12.0, 140.0), "Lens".to_string(), MEDIUM_1);

        for (k, name) in [(1.0, "F"), (2.0, "2F")] {
            let offset = DVec2::X * k * self.focal * s;
            let radius = if k == 1.0 { 5.0 } else { 3.0 };
            surface.dot(c - offset, radius, palette::ORANGE);
            surface.dot(c + offset, radius, palette::ORANGE);
            surface.label(c - offset + DVec2::new(-4.0, 20.0), name.to_string(), palette::ORANGE);
            surface.label(c + offset + DVec2::new(-4.0, 20.0), format!("{name}'"), palette::ORANGE);
        }

        let object_x = c.x - self.object * s;
        let image_x = c.x + self.image * s;
        let magnification = self.magnification();
        let image_h = (OBJECT_HEIGHT * magnification).clamp(-MAX_IMAGE_HEIGHT, MAX_IMAGE_HEIGHT);
        let object_top = DVec2::new(object_x, c.y - OBJECT_HEIGHT);
        let image_top = DVec2::new(image_x, c.y - image_h);

        surface.line(DVec2::new(object_x, c.y + 40.0), DVec2::new(c.x, c.y + 40.0), 1.0, palette::CYAN.with_alpha(0.2));
        surface.label(
            DVec2::new((object_x + c.x) / 2.0 - 15.0, c.y + 55.0),
            format!("dₒ = {}", self.object),
            palette::CYAN,
        );
        surface.line(DVec2::new(c.x, c.y + 40.0), DVec2::new(image_x, c.y + 40.0), 1.0, palette::VIOLET.with_alpha(0.2));
        surface.label(
            DVec2::new((c.x + image_x) / 2.0 - 15.0, c.y + 55.0),
            format!("dᵢ = {:.1}", self.image),
            palette::VIOLET,
        );

        surface.line(DVec2::new(object_x, c.y), object_top, 3.0, palette::CYAN);
        surface.dot(object_top, 6.0, palette::CYAN);
        surface.label(object_top + DVec2::new(-15.0, -12.0), "Object".to_string(), palette::CYAN);

        surface.line(DVec2::new(image_x, c.y), image_top, 3.0, palette::VIOLET);
        surface.dot(image_top, 6.0, palette::VIOLET);
        surface.label(
            image_top + DVec2::new(-20.0, if image_h > 0.0 { -12.0 } else { 20.0 }),
            format!("Image (M={magnification:.2})"),
            palette::VIOLET,
        );

        let ray = palette::YELLOW.with_alpha(0.4);
        surface.line(object_top, DVec2::new(c.x, object_top.y), 1.5, ray);
        surface.line(DVec2::new(c.x, object_top.y), image_top, 1.5, ray);
        surface.line(object_top, image_top, 1.5, palette::RED.with_alpha(0.3));

        surface.hud(vec![
            "Thin Lens - 1/f = 1/dₒ + 1/dᵢ".to_string(),
            format!("f = {}   dₒ = {}   dᵢ = {:.1}", self.focal, self.object, self.image),
            format!("M = −dᵢ/dₒ = {magnification:.2}"),
            if magnification < 0.0 {
                "Image: real, inverted"
            } else {
                "Image: virtual, upright"
            }
            .to_string(),
        ]);
    }

    fn caption(&self) -> Option<&str> {
        Some(&self.meta.caption)
    }

    fn location(&self, _camera: &Camera) -> Option<DVec2> {
        Some(DVec2::new(CENTRE.x - self.object * self.scale, CENTRE.y - OBJECT_HEIGHT))
    }

    fn annotation(&self) -> Option<&NormalizedParameters> {
        Some(&self.meta.params)
    }
}

/// Lenses and mirrors get the ray construction; anything else is refraction.
pub fn optics(params: &NormalizedParameters, stage: &mut Stage<'_>) {
    let kind = params
        .optics
        .kind
        .as_deref()
        .or(params.sub_topic.as_deref())
        .unwrap_or("refraction")
        .to_lowercase();
    if kind.contains("lens") || kind.contains("mirror") {
        stage.add_object(LensDiagram::new(params));
    } else {
        stage.add_object(RayDiagram::new(params));
    }
}
