use glam::DVec2;

use crate::core::schema::NormalizedParameters;
use crate::simulation::camera::Camera;
use crate::simulation::object::SimulationObject;

/// Tooltip content for a hovered object.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub title: String,
    /// `topic / sub_topic`.
    pub topic_line: String,
    pub equations: Vec<String>,
    /// Title-cased label and the value formatted to two decimals.
    pub values: Vec<(String, String)>,
}

impl Annotation {
    pub fn from_params(params: &NormalizedParameters, caption: Option<&str>) -> Self {
        let title = params
            .object
            .as_deref()
            .or(caption)
            .unwrap_or("Object")
            .to_string();
        let topic_line = format!("{} / {}", params.topic, params.sub_topic.or("—"));
        let values = params
            .formulas
            .calculations
            .iter()
            .map(|(key, value)| (title_case(key), format!("{value:.2}")))
            .collect();
        Self {
            title,
            topic_line,
            equations: params.formulas.equations.clone(),
            values,
        }
    }

    /// Plain-text rendering, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.title.clone(), self.topic_line.clone()];
        if !self.equations.is_empty() {
            lines.push("Formulas".to_string());
            lines.extend(self.equations.iter().cloned());
        }
        if !self.values.is_empty() {
            lines.push("Values".to_string());
            lines.extend(self.values.iter().map(|(k, v)| format!("{k}: {v}")));
        }
        lines
    }
}

/// `centripetal_force` -> `Centripetal Force`.
pub fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// First object whose location lies strictly within `radius` of `point`
/// and that carries problem parameters.
pub fn hit(
    objects: &[Box<dyn SimulationObject>],
    camera: &Camera,
    point: DVec2,
    radius: f64,
) -> Option<Annotation> {
    let object = objects.iter().find(|o| {
        o.location(camera)
            .is_some_and(|at| at.distance(point) < radius)
    })?;
    let params = object.annotation()?;
    Some(Annotation::from_params(params, object.caption()))
}
