//! The normalized problem record.
//!
//! Every field of the wire schema exists on these types. A missing or
//! invalid number is an absent [`Measure`] and serializes as `null`, so a
//! serialized record always carries the complete key set.

mod lenient;
mod measure;
mod topic;

pub use measure::{Measure, Text};
pub use topic::{Topic, UnknownTopic};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::math::round6;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizedParameters {
    #[serde(deserialize_with = "lenient::topic")]
    pub topic: Topic,
    pub sub_topic: Text,
    pub object: Text,
    #[serde(deserialize_with = "lenient::record")]
    pub initial_position: Position,
    #[serde(deserialize_with = "lenient::record")]
    pub initial_velocity: Vector,
    #[serde(deserialize_with = "lenient::record")]
    pub final_velocity: Vector,
    #[serde(deserialize_with = "lenient::record")]
    pub acceleration: Acceleration,
    pub mass: Measure,
    pub time: Measure,
    pub duration: Measure,
    pub distance: Measure,
    pub displacement: Measure,
    pub launch_angle: Measure,
    pub launch_height: Measure,
    pub gravity: Measure,
    pub air_resistance: Measure,
    pub radius: Measure,
    pub angular_velocity: Measure,
    pub centripetal_acc: Measure,
    pub period: Measure,
    pub frequency: Measure,
    #[serde(deserialize_with = "lenient::record")]
    pub forces: Forces,
    #[serde(deserialize_with = "lenient::record")]
    pub energy: Energy,
    #[serde(deserialize_with = "lenient::record")]
    pub collision: Collision,
    #[serde(deserialize_with = "lenient::record")]
    pub optics: Optics,
    #[serde(deserialize_with = "lenient::record")]
    pub waves: Waves,
    #[serde(deserialize_with = "lenient::record")]
    pub electricity: Electricity,
    #[serde(deserialize_with = "lenient::record")]
    pub magnetism: Magnetism,
    #[serde(deserialize_with = "lenient::record")]
    pub thermodynamics: Thermodynamics,
    #[serde(deserialize_with = "lenient::record")]
    pub friction: Friction,
    #[serde(deserialize_with = "lenient::record")]
    pub incline: Incline,
    #[serde(deserialize_with = "lenient::record")]
    pub fluid: Fluid,
    #[serde(deserialize_with = "lenient::record")]
    pub lift: Lift,
    #[serde(deserialize_with = "lenient::record")]
    pub spring: Spring,
    #[serde(deserialize_with = "lenient::record")]
    pub elasticity: Elasticity,
    #[serde(deserialize_with = "lenient::record")]
    pub pulley: Pulley,
    #[serde(deserialize_with = "lenient::record")]
    pub multi_pulley: MultiPulley,
    #[serde(deserialize_with = "lenient::record")]
    pub gravitation: Gravitation,
    #[serde(deserialize_with = "lenient::strings")]
    pub composite_topics: Vec<String>,
    #[serde(deserialize_with = "lenient::record")]
    pub formulas: Formulas,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub x0: Measure,
    pub y0: Measure,
    pub z0: Measure,
}

impl Position {
    pub fn is_unset(&self) -> bool {
        self.x0.is_absent() && self.y0.is_absent() && self.z0.is_absent()
    }
}

/// Magnitude plus a free-form direction label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vector {
    pub magnitude: Measure,
    pub direction: Text,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Acceleration {
    pub value: Measure,
    pub direction: Text,
    #[serde(rename = "type")]
    pub kind: Text,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Forces {
    pub applied: Measure,
    pub friction_static: Measure,
    pub friction_kinetic: Measure,
    pub normal_force: Measure,
    pub tension: Measure,
    pub net_force: Measure,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Energy {
    pub kinetic: Measure,
    pub potential_gravitational: Measure,
    pub potential_elastic: Measure,
    pub work_done: Measure,
    pub power: Measure,
    pub spring_constant: Measure,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collision {
    #[serde(rename = "type")]
    pub kind: Text,
    #[serde(deserialize_with = "lenient::sequence")]
    pub masses: Vec<Measure>,
    #[serde(deserialize_with = "lenient::sequence")]
    pub velocities_before: Vec<Measure>,
    #[serde(deserialize_with = "lenient::sequence")]
    pub velocities_after: Vec<Measure>,
    pub impulse: Measure,
    pub coefficient_of_restitution: Measure,
}

impl Collision {
    pub fn is_inelastic(&self) -> bool {
        self.kind.lowercase().contains("inelastic")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Optics {
    #[serde(rename = "type")]
    pub kind: Text,
    pub focal_length: Measure,
    pub object_distance: Measure,
    pub image_distance: Measure,
    #[serde(deserialize_with = "lenient::record")]
    pub angles: Angles,
    #[serde(deserialize_with = "lenient::record")]
    pub indices: Indices,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Angles {
    pub incidence: Measure,
    pub reflection: Measure,
    pub refraction: Measure,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Indices {
    pub n1: Measure,
    pub n2: Measure,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Waves {
    pub wavelength: Measure,
    pub frequency: Measure,
    pub amplitude: Measure,
    pub period: Measure,
    pub speed: Measure,
    pub phase: Measure,
    #[serde(rename = "type")]
    pub kind: Text,
    pub phenomena: Text,
    #[serde(deserialize_with = "lenient::record")]
    pub doppler: Doppler,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Doppler {
    pub source_velocity: Measure,
    pub observer_velocity: Measure,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Electricity {
    pub voltage: Measure,
    pub current: Measure,
    pub resistance: Measure,
    pub capacitance: Measure,
    pub charge: Measure,
    pub electric_field: Measure,
    pub potential: Measure,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Magnetism {
    pub magnetic_field: Measure,
    pub force_on_charge: Measure,
    pub induced_emf: Measure,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thermodynamics {
    pub temperature_initial: Measure,
    pub temperature_final: Measure,
    pub heat_transfer: Measure,
    pub specific_heat: Measure,
    pub pressure: Measure,
    pub volume: Measure,
    pub moles: Measure,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Friction {
    pub static_coefficient: Measure,
    pub kinetic_coefficient: Measure,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Incline {
    pub angle: Measure,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fluid {
    pub density: Measure,
    pub area1: Measure,
    pub area2: Measure,
    pub velocity1: Measure,
    pub pressure1: Measure,
    pub height1: Measure,
    pub height2: Measure,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lift {
    pub velocity_top: Measure,
    pub velocity_bottom: Measure,
    pub wing_area: Measure,
    pub pressure_top: Measure,
    pub pressure_bottom: Measure,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spring {
    pub constant: Measure,
    pub displacement: Measure,
    pub damping: Measure,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Elasticity {
    pub area: Measure,
    pub original_length: Measure,
    pub youngs_modulus: Measure,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pulley {
    pub mass1: Measure,
    pub mass2: Measure,
    #[serde(deserialize_with = "lenient::sequence")]
    pub masses_left: Vec<Measure>,
    #[serde(deserialize_with = "lenient::sequence")]
    pub masses_right: Vec<Measure>,
    #[serde(deserialize_with = "lenient::flag")]
    pub spring_coupled: bool,
    pub spring_constant: Measure,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiPulley {
    pub config: Text,
    pub num_pulleys: Measure,
    pub load_mass: Measure,
    pub effort_mass: Measure,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gravitation {
    pub central_mass: Measure,
    pub orbital_radius: Measure,
}

/// Symbolic equations plus the numeric results derived from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Formulas {
    #[serde(deserialize_with = "lenient::strings")]
    pub equations: Vec<String>,
    #[serde(deserialize_with = "lenient::calculations")]
    pub calculations: IndexMap<String, f64>,
}

impl Formulas {
    /// Appends `equation` unless it is already listed.
    pub fn equation(&mut self, equation: &str) {
        if !self.equations.iter().any(|e| e == equation) {
            self.equations.push(equation.to_string());
        }
    }

    /// Stores a finite `value` under `key`, rounded to 6 decimals.
    ///
    /// Returns the stored value; non-finite input stores nothing.
    pub fn record(&mut self, key: &str, value: f64) -> Option<f64> {
        let rounded = round6(value);
        if !rounded.is_finite() {
            return None;
        }
        self.calculations.insert(key.to_string(), rounded);
        Some(rounded)
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.calculations.get(key).copied()
    }

    /// Drops repeated equations, keeping the first occurrence.
    pub fn dedup_equations(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.equations.retain(|e| seen.insert(e.clone()));
    }
}
