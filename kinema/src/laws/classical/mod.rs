//! Particle mechanics: kinematics, forces, oscillators, momentum and orbits.

pub mod dynamics;
pub mod gravitation;
pub mod kinematics;
pub mod momentum;
pub mod oscillation;
