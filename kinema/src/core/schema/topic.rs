use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The physics domain a problem belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    #[default]
    LinearMotion,
    Projectile,
    CircularMotion,
    Forces,
    Energy,
    Collision,
    Waves,
    Optics,
    Electricity,
    Magnetism,
    Thermodynamics,
    Friction,
    InclinedPlane,
    FluidDynamics,
    Lift,
    MagnetismAdvanced,
    Spring,
    Pulley,
    Gravitation,
    Elasticity,
    ProjectileIncline,
    SpringFriction,
    PulleySpring,
    MultiPulley,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTopic(pub String);

impl fmt::Display for UnknownTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown topic \"{}\"", self.0)
    }
}

impl std::error::Error for UnknownTopic {}

impl Topic {
    /// Every topic, in matching priority order.
    pub const ALL: [Topic; 24] = [
        Topic::LinearMotion,
        Topic::Projectile,
        Topic::CircularMotion,
        Topic::Forces,
        Topic::Energy,
        Topic::Collision,
        Topic::Waves,
        Topic::Optics,
        Topic::Electricity,
        Topic::Magnetism,
        Topic::Thermodynamics,
        Topic::Friction,
        Topic::InclinedPlane,
        Topic::FluidDynamics,
        Topic::Lift,
        Topic::MagnetismAdvanced,
        Topic::Spring,
        Topic::Pulley,
        Topic::Gravitation,
        Topic::Elasticity,
        Topic::ProjectileIncline,
        Topic::SpringFriction,
        Topic::PulleySpring,
        Topic::MultiPulley,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Topic::LinearMotion => "linear_motion",
            Topic::Projectile => "projectile",
            Topic::CircularMotion => "circular_motion",
            Topic::Forces => "forces",
            Topic::Energy => "energy",
            Topic::Collision => "collision",
            Topic::Waves => "waves",
            Topic::Optics => "optics",
            Topic::Electricity => "electricity",
            Topic::Magnetism => "magnetism",
            Topic::Thermodynamics => "thermodynamics",
            Topic::Friction => "friction",
            Topic::InclinedPlane => "inclined_plane",
            Topic::FluidDynamics => "fluid_dynamics",
            Topic::Lift => "lift",
            Topic::MagnetismAdvanced => "magnetism_advanced",
            Topic::Spring => "spring",
            Topic::Pulley => "pulley",
            Topic::Gravitation => "gravitation",
            Topic::Elasticity => "elasticity",
            Topic::ProjectileIncline => "projectile_incline",
            Topic::SpringFriction => "spring_friction",
            Topic::PulleySpring => "pulley_spring",
            Topic::MultiPulley => "multi_pulley",
        }
    }

    /// Lower-cases, trims and joins words with `_`.
    pub fn canonical(raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        let mut pending_sep = false;
        for ch in raw.trim().chars() {
            if ch.is_whitespace() || ch == '-' {
                pending_sep = true;
                continue;
            }
            if pending_sep {
                out.push('_');
                pending_sep = false;
            }
            out.extend(ch.to_lowercase());
        }
        out
    }

    /// Fuzzy lookup used for externally supplied topics.
    ///
    /// An exact canonical match wins, otherwise the first topic (in
    /// [`Topic::ALL`] order) where either name contains the other.
    pub fn resolve(raw: &str) -> Option<Topic> {
        let norm = Self::canonical(raw);
        if norm.is_empty() {
            return None;
        }
        if let Ok(topic) = norm.parse() {
            return Some(topic);
        }
        Self::ALL
            .into_iter()
            .find(|t| norm.contains(t.as_str()) || t.as_str().contains(norm.as_str()))
    }
}

impl FromStr for Topic {
    type Err = UnknownTopic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTopic(s.to_string()))
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
