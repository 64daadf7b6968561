//! Problem normalization, closed-form physics and per-topic simulations.
//!
//! A problem flows through [`core::normalize::normalize`], then
//! [`laws::registry::attach_computed`], then a
//! [`simulation::router::SimulationRouter`] that picks the scene a
//! [`simulation::runtime::SimulationRuntime`] animates.

pub mod core {
    pub mod math;
    pub mod normalize;
    pub mod schema;
}

pub mod laws {
    pub mod classical;
    pub mod continuum;
    pub mod fields;
    pub mod registry;
}

pub mod platform {
    pub mod surface;
}

pub mod investigation {
    pub mod probe;
}

pub mod simulation {
    pub mod camera;
    pub mod host;
    pub mod object;
    pub mod router;
    pub mod runtime;
}

pub mod control;
pub mod scenes;

pub use crate::core::normalize::{normalize, normalize_str};
pub use crate::core::schema::{NormalizedParameters, Topic};
pub use crate::laws::registry::{FormulaEngine, attach_computed};
pub use crate::scenes::builtin_router;
