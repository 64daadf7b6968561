use std::fmt;
use std::str::FromStr;

use glam::{DAffine2, DVec2};
use serde::{Deserialize, Serialize};

use crate::core::normalize::DEFAULT_GRAVITY;
use crate::core::schema::{NormalizedParameters, Topic};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;

/// Surface units the dominant length of a problem should span.
pub const TARGET_EXTENT: f64 = 350.0;
pub const MIN_AUTO_SCALE: f64 = 0.01;
pub const MAX_AUTO_SCALE: f64 = 50.0;

/// Display length unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Mm,
    Cm,
    #[default]
    M,
    Km,
}

impl Unit {
    /// Multiplier applied on top of the auto scale.
    pub const fn scale(self) -> f64 {
        match self {
            Unit::Mm => 0.1,
            Unit::Cm => 10.0,
            Unit::M => 1.0,
            Unit::Km => 0.001,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Unit::Mm => "mm",
            Unit::Cm => "cm",
            Unit::M => "m",
            Unit::Km => "km",
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mm" => Ok(Unit::Mm),
            "cm" => Ok(Unit::Cm),
            "m" => Ok(Unit::M),
            "km" => Ok(Unit::Km),
            other => Err(format!("unknown unit \"{other}\"")),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// View state shared by every simulation object.
///
/// Pan and zoom only change how a frame is presented; physics never reads
/// them. `auto_scale` is the per-load pixels-per-metre factor.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pan: DVec2,
    zoom: f64,
    unit: Unit,
    auto_scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pan: DVec2::ZERO,
            zoom: 1.0,
            unit: Unit::M,
            auto_scale: 1.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pan(&self) -> DVec2 {
        self.pan
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn unit_scale(&self) -> f64 {
        self.unit.scale()
    }

    pub fn auto_scale(&self) -> f64 {
        self.auto_scale
    }

    /// Effective surface units per metre.
    pub fn scale(&self) -> f64 {
        self.auto_scale * self.unit.scale()
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_nan() {
            return;
        }
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Multiplies the zoom, as a mouse wheel step does.
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_zoom(self.zoom * factor);
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan = DVec2::new(x, y);
    }

    pub fn pan_by(&mut self, delta: DVec2) {
        self.pan += delta;
    }

    /// Restores pan and zoom. The unit and auto scale are kept.
    pub fn reset_view(&mut self) {
        self.pan = DVec2::ZERO;
        self.zoom = 1.0;
    }

    pub fn set_unit(&mut self, unit: Unit) {
        self.unit = unit;
    }

    /// Recomputes `auto_scale` so the problem's dominant length fills
    /// roughly [`TARGET_EXTENT`] surface units.
    pub fn fit(&mut self, params: &NormalizedParameters) {
        self.auto_scale = auto_scale(params);
    }

    /// Pan/zoom about the viewport centre.
    pub fn view_transform(&self, viewport: DVec2) -> DAffine2 {
        let centre = viewport * 0.5;
        DAffine2::from_translation(centre + self.pan)
            * DAffine2::from_scale(DVec2::splat(self.zoom))
            * DAffine2::from_translation(-centre)
    }

    /// Maps a physics point (y up, metres) to surface space around `origin`.
    pub fn to_surface(&self, point: DVec2, origin: DVec2) -> DVec2 {
        let s = self.scale();
        DVec2::new(origin.x + point.x * s, origin.y - point.y * s)
    }
}

/// Characteristic extent of a problem in metres.
fn extent(p: &NormalizedParameters) -> f64 {
    let v = p.initial_velocity.magnitude.nonzero_or(0.0);
    let r = p.radius.nonzero_or(0.0);
    let h = p
        .launch_height
        .nonzero()
        .unwrap_or_else(|| p.initial_position.y0.nonzero_or(0.0));
    let d = p
        .optics
        .object_distance
        .nonzero()
        .unwrap_or_else(|| p.optics.focal_length.nonzero_or(0.0));

    match p.topic {
        Topic::Projectile => {
            let angle = p.launch_angle.nonzero_or(45.0).to_radians();
            let g = p.gravity.nonzero_or(DEFAULT_GRAVITY);
            let range = v * v / g;
            let apex = h + v * v * angle.sin().powi(2) / (2.0 * g);
            range.max(apex).max(10.0)
        }
        Topic::LinearMotion => {
            let a = p.acceleration.value.nonzero_or(0.0);
            (v * 5.0 + 0.5 * a * 25.0).max(20.0)
        }
        Topic::CircularMotion => r.max(20.0),
        Topic::Optics => (d * 2.5).max(50.0),
        Topic::Energy => h.max(20.0),
        _ => 100.0,
    }
}

/// Pixels-per-metre factor for `params`, clamped to
/// [[`MIN_AUTO_SCALE`], [`MAX_AUTO_SCALE`]].
pub fn auto_scale(params: &NormalizedParameters) -> f64 {
    let raw = TARGET_EXTENT / extent(params).max(1.0);
    if raw.is_nan() {
        return 1.0;
    }
    raw.clamp(MIN_AUTO_SCALE, MAX_AUTO_SCALE)
}
